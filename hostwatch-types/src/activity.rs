//! Code-contribution activity calendar.
//!
//! Matches the GitHub GraphQL `contributionCalendar` shape so the upstream
//! payload deserializes straight into these types.

/// A year of contribution activity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ContributionCalendar {
    pub total_contributions: u64,
    pub weeks: Vec<ContributionWeek>,
}

/// One calendar week.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ContributionWeek {
    pub contribution_days: Vec<ContributionDay>,
}

/// One day of activity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ContributionDay {
    pub contribution_count: u32,
    /// ISO date, `YYYY-MM-DD`.
    pub date: String,
}

impl ContributionCalendar {
    /// Total number of days across all weeks.
    pub fn day_count(&self) -> usize {
        self.weeks.iter().map(|w| w.contribution_days.len()).sum()
    }
}
