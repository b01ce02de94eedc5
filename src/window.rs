//! Display-range resolution.
//!
//! Maps the coarse range selector coming off the request to the concrete
//! `(start, end, step)` window used for every range query in a fan-out round.
//! `now` is captured once per request so the window bound and the instant
//! query timestamp agree even while wall-clock time advances.

/// A concrete query window in epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
    /// Query resolution in seconds.
    pub step: u64,
}

impl TimeWindow {
    /// Number of sample points the window resolves to.
    ///
    /// Bounded at 360 across all selectors to keep response payloads small.
    pub fn points(&self) -> u64 {
        (self.end - self.start) as u64 / self.step
    }
}

/// The closed set of display-range selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    #[default]
    OneHour,
    SixHours,
    TwentyFourHours,
}

impl TimeRange {
    /// Parse a selector string.
    ///
    /// Anything outside the enumeration falls back to one hour. This is the
    /// defined default, not an error.
    pub fn from_selector(selector: &str) -> Self {
        match selector {
            "6h" => TimeRange::SixHours,
            "24h" => TimeRange::TwentyFourHours,
            _ => TimeRange::OneHour,
        }
    }

    /// The canonical selector string.
    pub fn selector(&self) -> &'static str {
        match self {
            TimeRange::OneHour => "1h",
            TimeRange::SixHours => "6h",
            TimeRange::TwentyFourHours => "24h",
        }
    }

    /// Resolve the window ending at `now` (epoch seconds).
    pub fn window(&self, now: i64) -> TimeWindow {
        let (duration, step) = match self {
            TimeRange::OneHour => (3600, 60),
            TimeRange::SixHours => (21_600, 300),
            TimeRange::TwentyFourHours => (86_400, 900),
        };
        TimeWindow {
            start: now - duration,
            end: now,
            step,
        }
    }
}
