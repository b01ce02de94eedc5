//! GitHub contribution activity client.
//!
//! One GraphQL POST with a bearer token fetches the contribution calendar.
//! A missing token, transport failure, non-2xx status, or GraphQL-level
//! error all yield the placeholder calendar instead, so consumers never
//! special-case missing activity data. The placeholder is deterministic for
//! a given request time (fixed-seed generator, no process randomness).

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use hostwatch_types::{ContributionCalendar, ContributionDay, ContributionWeek};

use crate::error::QueryError;
use crate::sources::ActivitySource;

const GITHUB_GRAPHQL_API: &str = "https://api.github.com/graphql";

const CONTRIBUTIONS_QUERY: &str = "\
query($username: String!) {
  user(login: $username) {
    contributionsCollection {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            contributionCount
            date
          }
        }
      }
    }
  }
}";

/// Weeks of history in the placeholder calendar (one year, GitHub-style).
const PLACEHOLDER_WEEKS: i64 = 53;
/// Clearly-synthetic total so a placeholder is recognizable at a glance.
const PLACEHOLDER_TOTAL: u64 = 1337;
const PLACEHOLDER_SEED: u64 = 0x5EED;

/// Client for the GitHub contribution-calendar API.
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl GithubClient {
    /// Create a client. Without a token every fetch serves the placeholder.
    pub fn new(token: Option<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("hostwatch")
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            endpoint: GITHUB_GRAPHQL_API.to_string(),
            token,
        }
    }

    /// Fetch the contribution calendar for `user`.
    ///
    /// Never fails: every failure path resolves to the placeholder.
    pub async fn contributions(&self, user: &str) -> ContributionCalendar {
        let Some(token) = &self.token else {
            debug!("activity token not configured; serving placeholder calendar");
            return placeholder_calendar(Utc::now());
        };

        match self.try_fetch(token, user).await {
            Ok(calendar) => calendar,
            Err(e) => {
                warn!(user, error = %e, "activity fetch failed; serving placeholder calendar");
                placeholder_calendar(Utc::now())
            }
        }
    }

    async fn try_fetch(&self, token: &str, user: &str) -> Result<ContributionCalendar, QueryError> {
        let body = serde_json::json!({
            "query": CONTRIBUTIONS_QUERY,
            "variables": { "username": user },
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(QueryError::Auth("Invalid token".to_string()));
        }

        if !response.status().is_success() {
            return Err(QueryError::Http(format!(
                "API returned status {}",
                response.status()
            )));
        }

        let envelope: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| QueryError::Parse(e.to_string()))?;

        if !envelope.errors.is_empty() {
            return Err(QueryError::Api(format!(
                "{} GraphQL error(s) reported",
                envelope.errors.len()
            )));
        }

        envelope
            .data
            .and_then(|d| d.user)
            .map(|u| u.contributions_collection.contribution_calendar)
            .ok_or_else(|| QueryError::Api(format!("no such user: {user}")))
    }
}

#[async_trait]
impl ActivitySource for GithubClient {
    async fn contributions(&self, user: &str) -> ContributionCalendar {
        GithubClient::contributions(self, user).await
    }
}

/// GraphQL response envelope for the contributions query.
#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<GraphQlData>,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GraphQlData {
    user: Option<GraphQlUser>,
}

#[derive(Debug, Deserialize)]
struct GraphQlUser {
    #[serde(rename = "contributionsCollection")]
    contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
struct ContributionsCollection {
    #[serde(rename = "contributionCalendar")]
    contribution_calendar: ContributionCalendar,
}

/// Build the offline placeholder calendar for the given request time.
///
/// 53 weeks of 7 days ending at `now`, counts drawn from a fixed-seed LCG
/// (~30% of days active, 0..=9 contributions). Same `now` in, same calendar
/// out, in any process.
pub fn placeholder_calendar(now: DateTime<Utc>) -> ContributionCalendar {
    let today = now.date_naive();
    let mut state = PLACEHOLDER_SEED;

    let weeks = (0..PLACEHOLDER_WEEKS)
        .map(|week| {
            let contribution_days = (0..7)
                .map(|day| {
                    let offset = (PLACEHOLDER_WEEKS - 1 - week) * 7 + day;
                    let date = today - chrono::Duration::days(offset);
                    let roll = next(&mut state);
                    let contribution_count = if roll % 10 >= 7 {
                        ((roll >> 8) % 10) as u32
                    } else {
                        0
                    };
                    ContributionDay {
                        contribution_count,
                        date: date.format("%Y-%m-%d").to_string(),
                    }
                })
                .collect();
            ContributionWeek { contribution_days }
        })
        .collect();

    ContributionCalendar {
        total_contributions: PLACEHOLDER_TOTAL,
        weeks,
    }
}

fn next(state: &mut u64) -> u64 {
    *state = state
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    *state
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_placeholder_shape() {
        let calendar = placeholder_calendar(fixed_now());
        assert_eq!(calendar.total_contributions, 1337);
        assert_eq!(calendar.weeks.len(), 53);
        assert!(calendar
            .weeks
            .iter()
            .all(|w| w.contribution_days.len() == 7));
        assert_eq!(calendar.day_count(), 53 * 7);
    }

    #[test]
    fn test_placeholder_is_deterministic() {
        assert_eq!(
            placeholder_calendar(fixed_now()),
            placeholder_calendar(fixed_now())
        );
    }

    #[test]
    fn test_placeholder_dates_end_today() {
        let calendar = placeholder_calendar(fixed_now());
        let last_week = calendar.weeks.last().unwrap();
        assert_eq!(last_week.contribution_days[0].date, "2026-08-05");
        assert_eq!(last_week.contribution_days[6].date, "2026-07-30");

        let first_week = calendar.weeks.first().unwrap();
        assert_eq!(first_week.contribution_days[0].date, "2025-08-06");
    }

    #[test]
    fn test_placeholder_counts_in_range() {
        let calendar = placeholder_calendar(fixed_now());
        let active: usize = calendar
            .weeks
            .iter()
            .flat_map(|w| &w.contribution_days)
            .filter(|d| d.contribution_count > 0)
            .count();
        assert!(calendar
            .weeks
            .iter()
            .flat_map(|w| &w.contribution_days)
            .all(|d| d.contribution_count <= 9));
        // Roughly 30% of days are active; leave generous slack.
        assert!(active > 50 && active < 200, "{active} active days");
    }

    #[tokio::test]
    async fn test_missing_token_serves_placeholder() {
        let client = GithubClient::new(None, Duration::from_millis(100));
        let calendar = client.contributions("whoever").await;
        assert_eq!(calendar.total_contributions, 1337);
        assert_eq!(calendar.weeks.len(), 53);
    }
}
