use crate::{
    error::AppResult,
    models::{Comment, NewComment, Report, ReportId},
    services::report::ReportStore,
};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Per-report discussion threads, oldest comment first.
#[derive(Clone)]
pub struct CommentStore {
    threads: Arc<DashMap<ReportId, Vec<Comment>>>,
    reports: ReportStore,
}

impl CommentStore {
    pub fn new(reports: ReportStore) -> Self {
        Self {
            threads: Arc::new(DashMap::new()),
            reports,
        }
    }

    /// Start from existing threads. Each thread must already be oldest first.
    pub fn with_threads(
        reports: ReportStore,
        threads: impl IntoIterator<Item = (ReportId, Vec<Comment>)>,
    ) -> Self {
        let store = Self::new(reports);
        for (report_id, thread) in threads {
            store.threads.insert(report_id, thread);
        }
        store
    }

    /// Append to a report's thread. The report's `updated_at` is moved to the
    /// comment's `created_at`; an unknown report stores nothing.
    pub async fn append(&self, report_id: ReportId, input: NewComment) -> AppResult<Comment> {
        self.reports
            .with_report(report_id, |report, now| Ok(self.record(report, now, input)))
            .await
    }

    /// Append for a report already held under the report store's write lock,
    /// which keeps each thread in `created_at` order.
    pub(crate) fn record(&self, report: &mut Report, now: DateTime<Utc>, input: NewComment) -> Comment {
        report.record_activity(now);

        let comment = Comment {
            id: Uuid::now_v7(),
            report_id: report.id,
            author_id: input.author_id,
            author_name: input.author_name,
            author_role: input.author_role,
            content: input.content,
            attachments: input.attachments,
            created_at: now,
        };
        self.threads
            .entry(report.id)
            .or_default()
            .push(comment.clone());

        tracing::debug!(
            report_id = report.id,
            comment_id = %comment.id,
            author_role = %comment.author_role,
            "comment appended"
        );
        comment
    }

    /// The thread for a report; empty when nothing has been said yet.
    pub fn list_for(&self, report_id: ReportId) -> Vec<Comment> {
        self.threads
            .get(&report_id)
            .map(|thread| thread.clone())
            .unwrap_or_default()
    }

}
