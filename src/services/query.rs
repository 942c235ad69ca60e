//! Filtered and derived views over a report listing. Every function here is
//! pure: same reports and criteria in, same ordered reports out.

use crate::models::{Report, ReportCategory, ReportPriority, ReportStatus};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Coarse status grouping used by the admin tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    #[default]
    All,
    New,
    Active,
    Resolved,
}

impl Bucket {
    pub const fn contains(self, status: ReportStatus) -> bool {
        match self {
            Self::All => true,
            Self::New => matches!(status, ReportStatus::New),
            Self::Active => status.is_active(),
            Self::Resolved => status.is_finished(),
        }
    }
}

/// Which text fields a free-text search looks at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchScope {
    /// Title, description and reporter name.
    #[default]
    All,
    /// Title and description only.
    Content,
}

/// Criteria combined with AND. `None` means unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub bucket: Bucket,
    pub status: Option<ReportStatus>,
    pub category: Option<ReportCategory>,
    pub priority: Option<ReportPriority>,
    pub search: Option<String>,
    pub search_scope: SearchScope,
}

impl ReportFilter {
    pub fn matches(&self, report: &Report) -> bool {
        self.bucket.contains(report.status)
            && self.status.map_or(true, |s| report.status == s)
            && self.category.map_or(true, |c| report.category == c)
            && self.priority.map_or(true, |p| report.priority == p)
            && self.matches_search(report)
    }

    fn matches_search(&self, report: &Report) -> bool {
        // Matched as typed; only an empty string means "no search".
        let Some(needle) = self.search.as_deref().filter(|s| !s.is_empty()) else {
            return true;
        };
        let needle = needle.to_lowercase();

        let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);
        contains(&report.title)
            || contains(&report.description)
            || (self.search_scope == SearchScope::All && contains(&report.reporter_name))
    }
}

pub fn filter_reports(reports: &[Report], filter: &ReportFilter) -> Vec<Report> {
    reports
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct BucketCounts {
    pub all: u64,
    pub new: u64,
    pub active: u64,
    pub resolved: u64,
}

pub fn bucket_counts(reports: &[Report]) -> BucketCounts {
    let count = |bucket: Bucket| reports.iter().filter(|r| bucket.contains(r.status)).count() as u64;
    BucketCounts {
        all: reports.len() as u64,
        new: count(Bucket::New),
        active: count(Bucket::Active),
        resolved: count(Bucket::Resolved),
    }
}

/// Newest reports that are new or in progress, for the staff dashboard feed.
pub fn recent_active(reports: &[Report], limit: usize) -> Vec<Report> {
    reports
        .iter()
        .filter(|r| matches!(r.status, ReportStatus::New | ReportStatus::InProgress))
        .take(limit)
        .cloned()
        .collect()
}

/// High priority reports still awaiting a fix.
pub fn urgent(reports: &[Report]) -> Vec<Report> {
    reports
        .iter()
        .filter(|r| r.priority == ReportPriority::High && !r.status.is_finished())
        .cloned()
        .collect()
}
