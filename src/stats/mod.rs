//! Aggregate counts over an issue list for dashboards.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::models::{Issue, Severity, Status};

/// Counts per status, category and severity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueStats {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
    /// Ordered by category name
    pub by_category: BTreeMap<String, usize>,
    /// Keyed by the wire name, e.g. "HIGH"; unknown severities are counted as "UNKNOWN"
    pub by_severity: BTreeMap<&'static str, usize>,
}

/// Longest timeline [`IssueStats::timeline`] will build.
pub const MAX_TIMELINE_DAYS: u32 = 3650;

/// Number of issues reported on or before `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub issues: usize,
}

impl IssueStats {
    pub fn from_issues(issues: &[Issue]) -> Self {
        let mut stats = IssueStats {
            total: issues.len(),
            ..Default::default()
        };

        for issue in issues {
            match issue.status {
                Status::Open => stats.open += 1,
                Status::InProgress => stats.in_progress += 1,
                Status::Resolved => stats.resolved += 1,
                Status::Unknown => {}
            }
            *stats
                .by_category
                .entry(issue.category.clone())
                .or_default() += 1;
            *stats.by_severity.entry(issue.severity.as_str()).or_default() += 1;
        }

        stats
    }

    pub fn count_for(&self, severity: Severity) -> usize {
        self.by_severity
            .get(severity.as_str())
            .copied()
            .unwrap_or(0)
    }

    /// Cumulative issue count for each of the `days` days ending at `end`.
    ///
    /// Issues without a parseable creation time are left out. `days` is capped at
    /// [`MAX_TIMELINE_DAYS`], and the timeline stops early at the start of the calendar.
    pub fn timeline(issues: &[Issue], end: NaiveDate, days: u32) -> Vec<TimelinePoint> {
        let mut created: Vec<NaiveDate> = issues
            .iter()
            .filter_map(|i| i.created_at_parsed())
            .map(|dt| dt.date())
            .collect();
        created.sort_unstable();

        let mut points: Vec<TimelinePoint> = (0..days.min(MAX_TIMELINE_DAYS))
            .map_while(|offset| end.checked_sub_signed(Duration::days(i64::from(offset))))
            .map(|date| TimelinePoint {
                date,
                issues: created.partition_point(|d| *d <= date),
            })
            .collect();
        points.reverse();
        points
    }
}
