use crate::models::{Report, ReportCategory, ReportPriority, ReportStatus};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total: u64,
    pub new: u64,
    /// In progress or pending the student.
    pub in_progress: u64,
    pub resolved: u64,
    pub closed: u64,
    /// Mean days from creation to resolution over reports that have been
    /// resolved at least once. Zero when there are none.
    pub avg_resolution_days: f64,
}

impl DashboardStats {
    /// `round(resolved / total * 100)`, zero for an empty store.
    pub fn resolution_rate_percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.resolved as f64 / self.total as f64 * 100.0).round() as u32
    }

    pub const fn active_issues(&self) -> u64 {
        self.new + self.in_progress
    }
}

pub fn compute_stats(reports: &[Report]) -> DashboardStats {
    let count = |pred: fn(ReportStatus) -> bool| {
        reports.iter().filter(|r| pred(r.status)).count() as u64
    };

    let durations: Vec<f64> = reports.iter().filter_map(Report::resolution_days).collect();
    let avg_resolution_days = if durations.is_empty() {
        0.0
    } else {
        durations.iter().sum::<f64>() / durations.len() as f64
    };

    DashboardStats {
        total: reports.len() as u64,
        new: count(|s| s == ReportStatus::New),
        in_progress: count(ReportStatus::is_active),
        resolved: count(|s| s == ReportStatus::Resolved),
        closed: count(|s| s == ReportStatus::Closed),
        avg_resolution_days,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct CategoryCount {
    pub category: ReportCategory,
    pub count: u64,
    pub percent: f64,
}

/// Categories that occur at least once, most frequent first. Ties keep
/// the category enumeration order.
pub fn category_breakdown(reports: &[Report]) -> Vec<CategoryCount> {
    let total = reports.len() as u64;
    let mut counts: Vec<CategoryCount> = ReportCategory::ALL
        .into_iter()
        .map(|category| {
            let count = reports.iter().filter(|r| r.category == category).count() as u64;
            CategoryCount {
                category,
                count,
                percent: percent(count, total),
            }
        })
        .filter(|c| c.count > 0)
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StatusCount {
    pub status: ReportStatus,
    pub label: String,
    pub count: u64,
    pub percent: f64,
}

/// Every status in lifecycle order, including those with no reports.
pub fn status_breakdown(reports: &[Report]) -> Vec<StatusCount> {
    let total = reports.len() as u64;
    ReportStatus::ALL
        .into_iter()
        .map(|status| {
            let count = reports.iter().filter(|r| r.status == status).count() as u64;
            StatusCount {
                status,
                label: status.label().to_string(),
                count,
                percent: percent(count, total),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct PriorityBreakdown {
    pub low: u64,
    pub medium: u64,
    pub high: u64,
}

pub fn priority_breakdown(reports: &[Report]) -> PriorityBreakdown {
    reports
        .iter()
        .fold(PriorityBreakdown::default(), |mut acc, r| {
            match r.priority {
                ReportPriority::Low => acc.low += 1,
                ReportPriority::Medium => acc.medium += 1,
                ReportPriority::High => acc.high += 1,
            }
            acc
        })
}

/// What a student sees about their own submissions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct StudentSummary {
    pub total: u64,
    pub open: u64,
    pub resolved: u64,
}

pub fn student_summary(reports: &[Report]) -> StudentSummary {
    let resolved = reports.iter().filter(|r| r.status.is_finished()).count() as u64;
    let total = reports.len() as u64;
    StudentSummary {
        total,
        open: total - resolved,
        resolved,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AnalyticsReport {
    pub stats: DashboardStats,
    pub resolution_rate_percent: u32,
    pub active_issues: u64,
    pub high_priority: u64,
    pub by_status: Vec<StatusCount>,
    pub by_category: Vec<CategoryCount>,
    pub by_priority: PriorityBreakdown,
}

pub fn analytics(reports: &[Report]) -> AnalyticsReport {
    let stats = compute_stats(reports);
    let by_priority = priority_breakdown(reports);
    AnalyticsReport {
        stats,
        resolution_rate_percent: stats.resolution_rate_percent(),
        active_issues: stats.active_issues(),
        high_priority: by_priority.high,
        by_status: status_breakdown(reports),
        by_category: category_breakdown(reports),
        by_priority,
    }
}

fn percent(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}
