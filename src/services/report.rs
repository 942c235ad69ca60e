use crate::{
    error::{AppError, AppResult},
    models::{NewReport, Report, ReportId, ReportStatus},
    services::{
        clock::SharedClock,
        query::{self, ReportFilter},
        transition::TransitionPolicy,
    },
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

struct Inner {
    /// Most recent first.
    reports: Vec<Report>,
    next_id: ReportId,
}

impl Inner {
    fn find_mut(&mut self, id: ReportId) -> AppResult<&mut Report> {
        self.reports
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(AppError::NotFound)
    }
}

/// Shared, in-memory home of every report.
///
/// Cloning yields another handle onto the same collection. Every mutation
/// runs under one write lock, so changes to a given report are applied one
/// at a time and each bumps `updated_at` and `version`.
#[derive(Clone)]
pub struct ReportStore {
    inner: Arc<RwLock<Inner>>,
    clock: SharedClock,
    policy: TransitionPolicy,
}

impl ReportStore {
    pub fn new(clock: SharedClock, policy: TransitionPolicy) -> Self {
        Self::with_reports(Vec::new(), clock, policy)
    }

    /// Start from existing reports, given most recent first.
    pub fn with_reports(
        reports: Vec<Report>,
        clock: SharedClock,
        policy: TransitionPolicy,
    ) -> Self {
        let next_id = reports.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        Self {
            inner: Arc::new(RwLock::new(Inner { reports, next_id })),
            clock,
            policy,
        }
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    pub async fn create(
        &self,
        reporter_id: &str,
        reporter_name: &str,
        input: NewReport,
    ) -> Report {
        let mut inner = self.inner.write().await;
        let now = self.clock.now();

        let id = inner.next_id;
        inner.next_id += 1;

        let report = Report {
            id,
            reporter_id: reporter_id.to_string(),
            reporter_name: reporter_name.to_string(),
            title: input.title,
            description: input.description,
            category: input.category,
            location: input.location,
            priority: input.priority,
            status: ReportStatus::New,
            assigned_to: None,
            assigned_to_name: None,
            attachments: input.attachments,
            created_at: now,
            updated_at: now,
            resolved_at: None,
            version: 1,
        };
        inner.reports.insert(0, report.clone());

        tracing::info!(
            report_id = id,
            reporter_id,
            category = %report.category,
            priority = %report.priority,
            "report created"
        );
        report
    }

    /// Move a report to `status`. Entering `resolved` stamps `resolved_at`
    /// with the current time, replacing any earlier stamp.
    pub async fn update_status(
        &self,
        id: ReportId,
        status: ReportStatus,
        acting_admin_id: &str,
        expected_version: Option<u64>,
    ) -> AppResult<Report> {
        self.with_report(id, |report, now| {
            self.apply_status(report, status, acting_admin_id, expected_version, now)?;
            Ok(report.clone())
        })
        .await
    }

    /// Set the assignee. The status is left alone.
    pub async fn assign(
        &self,
        id: ReportId,
        assignee_id: &str,
        assignee_name: &str,
        expected_version: Option<u64>,
    ) -> AppResult<Report> {
        self.with_report(id, |report, now| {
            apply_assignment(report, assignee_id, assignee_name, expected_version, now)?;
            Ok(report.clone())
        })
        .await
    }

    /// Run `f` on report `id` under the write lock. `now` is read after the
    /// lock is taken, so writes land in timestamp order and the last write
    /// owns `updated_at`.
    pub(crate) async fn with_report<T>(
        &self,
        id: ReportId,
        f: impl FnOnce(&mut Report, DateTime<Utc>) -> AppResult<T>,
    ) -> AppResult<T> {
        let mut inner = self.inner.write().await;
        let now = self.clock.now();
        let report = inner.find_mut(id)?;
        f(report, now)
    }

    /// Status change for a report already held under the write lock.
    pub(crate) fn apply_status(
        &self,
        report: &mut Report,
        status: ReportStatus,
        acting_admin_id: &str,
        expected_version: Option<u64>,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        check_version(report, expected_version)?;

        if let Err(err) = self.policy.check(report.status, status) {
            tracing::warn!(
                report_id = report.id,
                from = %report.status,
                to = %status,
                acting_admin_id,
                "status transition rejected"
            );
            return Err(err);
        }

        let previous = report.status;
        report.status = status;
        if status == ReportStatus::Resolved {
            report.resolved_at = Some(now);
        }
        report.record_activity(now);

        tracing::info!(
            report_id = report.id,
            from = %previous,
            to = %status,
            acting_admin_id,
            "report status updated"
        );
        Ok(())
    }

    pub async fn get(&self, id: ReportId) -> AppResult<Report> {
        self.inner
            .read()
            .await
            .reports
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    /// Snapshot of every report, most recent first.
    pub async fn all(&self) -> Vec<Report> {
        self.inner.read().await.reports.clone()
    }

    pub async fn query_by_reporter(&self, user_id: &str) -> Vec<Report> {
        self.inner
            .read()
            .await
            .reports
            .iter()
            .filter(|r| r.reporter_id == user_id)
            .cloned()
            .collect()
    }

    pub async fn query_filtered(&self, filter: &ReportFilter) -> Vec<Report> {
        let inner = self.inner.read().await;
        let matched = query::filter_reports(&inner.reports, filter);
        tracing::debug!(matched = matched.len(), "filtered reports");
        matched
    }
}

fn check_version(report: &Report, expected: Option<u64>) -> AppResult<()> {
    match expected {
        Some(v) if v != report.version => Err(AppError::Conflict(format!(
            "Report {} was modified (version {}, expected {})",
            report.id, report.version, v
        ))),
        _ => Ok(()),
    }
}

/// Assignment for a report already held under the write lock.
pub(crate) fn apply_assignment(
    report: &mut Report,
    assignee_id: &str,
    assignee_name: &str,
    expected_version: Option<u64>,
    now: DateTime<Utc>,
) -> AppResult<()> {
    check_version(report, expected_version)?;

    report.assigned_to = Some(assignee_id.to_string());
    report.assigned_to_name = Some(assignee_name.to_string());
    report.record_activity(now);

    tracing::info!(report_id = report.id, assignee_id, "report assigned");
    Ok(())
}
