//! Client-side issue query pipeline.
//!
//! Filters an in-memory issue list by free text, category, status and severity, then
//! orders it by one sort key. Pure and synchronous: the input slice is never modified.

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use crate::errors::ClientError;
use crate::models::{Issue, Severity, Status};

/// Sentinel the UI uses to switch a filter off.
pub const ALL: &str = "all";

/// An exact-match filter that can be disabled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Filter<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(expected) => expected == value,
        }
    }
}

fn is_all(raw: &str) -> bool {
    let raw = raw.trim();
    raw.is_empty() || raw.eq_ignore_ascii_case(ALL)
}

impl Filter<String> {
    pub fn category(raw: &str) -> Self {
        if is_all(raw) {
            Filter::All
        } else {
            Filter::Only(raw.to_string())
        }
    }
}

impl Filter<Status> {
    /// Unrecognised values become a filter that matches nothing.
    pub fn status(raw: &str) -> Self {
        if is_all(raw) {
            Filter::All
        } else {
            Filter::Only(Status::from_str(raw).unwrap_or(Status::Unknown))
        }
    }
}

impl Filter<Severity> {
    /// Unrecognised values become a filter that matches nothing.
    pub fn severity(raw: &str) -> Self {
        if is_all(raw) {
            Filter::All
        } else {
            Filter::Only(Severity::from_str(raw).unwrap_or(Severity::Unknown))
        }
    }
}

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Newest first
    #[default]
    Recent,
    /// Most votes first; a missing count counts as zero
    Upvotes,
    /// CRITICAL, HIGH, MEDIUM, LOW, then unknown
    Severity,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Recent => "recent",
            SortKey::Upvotes => "upvotes",
            SortKey::Severity => "severity",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recent" => Ok(SortKey::Recent),
            "upvotes" => Ok(SortKey::Upvotes),
            "severity" => Ok(SortKey::Severity),
            other => Err(ClientError::Validation(format!(
                "unknown sort key '{}' (expected recent, upvotes or severity)",
                other
            ))),
        }
    }
}

/// Filter and sort criteria for the issue list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueQuery {
    /// Case-insensitive substring matched against title, description and address
    pub search: String,
    pub category: Filter<String>,
    pub status: Filter<Status>,
    pub severity: Filter<Severity>,
    pub sort: SortKey,
}

impl IssueQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the string criteria a filter bar produces.
    pub fn from_criteria(
        search: &str,
        category: &str,
        status: &str,
        severity: &str,
        sort: SortKey,
    ) -> Self {
        Self {
            search: search.to_string(),
            category: Filter::category(category),
            status: Filter::status(status),
            severity: Filter::severity(severity),
            sort,
        }
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = query.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Filter::Only(category.into());
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Filter::Only(status);
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Filter::Only(severity);
        self
    }

    pub fn sort_by(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Whether a single issue passes every filter.
    pub fn matches(&self, issue: &Issue) -> bool {
        self.matches_with(issue, &self.search.to_lowercase())
    }

    /// `needle` is the already lowercased search text.
    fn matches_with(&self, issue: &Issue, needle: &str) -> bool {
        matches_text(issue, needle)
            && self.category.admits(&issue.category)
            && (matches!(self.status, Filter::All)
                || (issue.status.is_known() && self.status.admits(&issue.status)))
            && (matches!(self.severity, Filter::All)
                || (issue.severity.is_known() && self.severity.admits(&issue.severity)))
    }

    /// Filter then sort, returning a new list.
    pub fn apply(&self, issues: &[Issue]) -> Vec<Issue> {
        let needle = self.search.to_lowercase();
        let mut visible: Vec<Issue> = issues
            .iter()
            .filter(|issue| self.matches_with(issue, &needle))
            .cloned()
            .collect();
        sort_issues(&mut visible, self.sort);

        tracing::debug!(
            total = issues.len(),
            visible = visible.len(),
            sort = %self.sort,
            "Applied issue query"
        );
        visible
    }
}

fn matches_text(issue: &Issue, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    issue.title.to_lowercase().contains(needle)
        || issue
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
        || issue.address.to_lowercase().contains(needle)
}

/// Stable in-place sort by the given key.
pub fn sort_issues(issues: &mut [Issue], key: SortKey) {
    match key {
        // None < Some, so reversing puts unparseable timestamps last
        SortKey::Recent => issues.sort_by_cached_key(|i| Reverse(i.created_at_parsed())),
        SortKey::Upvotes => issues.sort_by_key(|i| Reverse(i.vote_count())),
        SortKey::Severity => issues.sort_by_key(|i| Reverse(i.severity.rank())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_issue(id: i64, title: &str, severity: Severity, votes: Option<i64>) -> Issue {
        Issue {
            id,
            title: title.to_string(),
            description: None,
            category: "roads".to_string(),
            severity,
            status: Status::Open,
            address: "Main Street".to_string(),
            created_at: format!("2025-10-{:02}T09:00:00", id),
            reporter_id: Some(1),
            reporter_name: Some("Ana".to_string()),
            votes,
            is_voted_by_user: None,
        }
    }

    fn ids(issues: &[Issue]) -> Vec<i64> {
        issues.iter().map(|i| i.id).collect()
    }

    fn seeded() -> Vec<Issue> {
        vec![
            create_test_issue(1, "Pothole on Main Street", Severity::Low, Some(5)),
            create_test_issue(2, "Broken streetlight", Severity::Critical, Some(1)),
            create_test_issue(3, "Overflowing bins", Severity::High, Some(9)),
        ]
    }

    #[test]
    fn test_end_to_end_sorts() {
        let issues = seeded();

        let by_votes = IssueQuery::from_criteria("", "all", "all", "all", SortKey::Upvotes)
            .apply(&issues);
        let votes: Vec<i64> = by_votes.iter().map(Issue::vote_count).collect();
        assert_eq!(votes, vec![9, 5, 1]);

        let by_severity = IssueQuery::from_criteria("", "all", "all", "all", SortKey::Severity)
            .apply(&issues);
        let severities: Vec<Severity> = by_severity.iter().map(|i| i.severity).collect();
        assert_eq!(
            severities,
            vec![Severity::Critical, Severity::High, Severity::Low]
        );
    }

    #[test]
    fn test_severity_sort_low_critical_medium() {
        let issues = vec![
            create_test_issue(1, "a", Severity::Low, None),
            create_test_issue(2, "b", Severity::Critical, None),
            create_test_issue(3, "c", Severity::Medium, None),
        ];
        let sorted = IssueQuery::new().sort_by(SortKey::Severity).apply(&issues);
        assert_eq!(ids(&sorted), vec![2, 3, 1]);
    }

    #[test]
    fn test_unknown_severity_sinks() {
        let issues = vec![
            create_test_issue(1, "a", Severity::Unknown, None),
            create_test_issue(2, "b", Severity::Low, None),
        ];
        let sorted = IssueQuery::new().sort_by(SortKey::Severity).apply(&issues);
        assert_eq!(ids(&sorted), vec![2, 1]);
    }

    #[test]
    fn test_upvote_sort_is_stable_and_treats_missing_as_zero() {
        let issues = vec![
            create_test_issue(1, "a", Severity::Low, None),
            create_test_issue(2, "b", Severity::Low, Some(2)),
            create_test_issue(3, "c", Severity::Low, Some(0)),
            create_test_issue(4, "d", Severity::Low, Some(2)),
        ];
        let sorted = IssueQuery::new().sort_by(SortKey::Upvotes).apply(&issues);
        assert_eq!(ids(&sorted), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_recent_sort_newest_first_unparseable_last() {
        let mut issues = seeded();
        issues[1].created_at = "not a date".to_string();
        let sorted = IssueQuery::new().sort_by(SortKey::Recent).apply(&issues);
        assert_eq!(ids(&sorted), vec![3, 1, 2]);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let mut issues = seeded();
        issues[1].description = Some("Dark corner near the POTHOLE".to_string());
        issues[2].address = "44.1, 26.1".to_string();

        let hits = IssueQuery::new().search("pothole").apply(&issues);
        assert_eq!(ids(&hits), vec![2, 1]);

        let hits = IssueQuery::new().search("44.1").apply(&issues);
        assert_eq!(ids(&hits), vec![3]);

        let hits = IssueQuery::new().search("").apply(&issues);
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn test_all_sentinel_equals_no_filter() {
        let mut issues = seeded();
        issues[0].category = "lighting".to_string();
        issues[2].status = Status::Resolved;

        let unfiltered = IssueQuery::new().apply(&issues);
        let with_all = IssueQuery::from_criteria("", "all", "ALL", "all", SortKey::Recent)
            .apply(&issues);
        assert_eq!(unfiltered, with_all);
    }

    #[test]
    fn test_blank_filter_strings_disable_filters() {
        assert_eq!(Filter::category(""), Filter::All);
        assert_eq!(Filter::category("   "), Filter::All);
        assert_eq!(Filter::status(" "), Filter::All);
        assert_eq!(Filter::severity(""), Filter::All);
        assert_eq!(Filter::category(" roads "), Filter::Only(" roads ".to_string()));

        let mut issues = seeded();
        issues[0].category = "lighting".to_string();
        let blank = IssueQuery::from_criteria("", "", "  ", "", SortKey::Recent).apply(&issues);
        assert_eq!(blank, IssueQuery::new().apply(&issues));
    }

    #[test]
    fn test_mixed_case_search_matches_address() {
        let query = IssueQuery::new().search("MAIN street");
        let issues = seeded();

        assert!(query.matches(&issues[0]));
        assert_eq!(ids(&query.apply(&issues)), vec![3, 2, 1]);
    }

    #[test]
    fn test_filters_are_and_combined() {
        let mut issues = seeded();
        issues[0].category = "lighting".to_string();
        issues[2].status = Status::InProgress;

        let hits = IssueQuery::from_criteria("", "roads", "in-progress", "all", SortKey::Recent)
            .apply(&issues);
        assert_eq!(ids(&hits), vec![3]);

        let hits = IssueQuery::new()
            .category("roads")
            .severity(Severity::Critical)
            .apply(&issues);
        assert_eq!(ids(&hits), vec![2]);
    }

    #[test]
    fn test_unrecognised_filter_values_match_nothing() {
        let mut issues = seeded();
        issues[0].status = Status::Unknown;
        issues[0].severity = Severity::Unknown;

        let hits = IssueQuery::from_criteria("", "all", "closed", "all", SortKey::Recent)
            .apply(&issues);
        assert!(hits.is_empty());

        let hits = IssueQuery::from_criteria("", "all", "all", "severe", SortKey::Recent)
            .apply(&issues);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_output_is_subset_without_duplicates() {
        let issues = seeded();
        let hits = IssueQuery::new().search("o").sort_by(SortKey::Upvotes).apply(&issues);

        let mut seen = ids(&hits);
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), hits.len());
        assert!(hits.iter().all(|h| issues.contains(h)));
        assert_eq!(ids(&issues), vec![1, 2, 3]);
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("Upvotes".parse::<SortKey>().unwrap(), SortKey::Upvotes);
        assert!(matches!(
            "popular".parse::<SortKey>(),
            Err(ClientError::Validation(_))
        ));
    }
}
