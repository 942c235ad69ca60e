use crate::{
    error::AppResult,
    models::{Comment, Identity, NewComment, Report, ReportId, ReportStatus},
    services::{
        comment::CommentStore,
        report::{apply_assignment, ReportStore},
    },
};

/// Staff actions that also leave a note in the report's thread, so the
/// student can follow what happened.
#[derive(Clone)]
pub struct Workflow {
    reports: ReportStore,
    comments: CommentStore,
}

impl Workflow {
    pub fn new(reports: ReportStore, comments: CommentStore) -> Self {
        Self { reports, comments }
    }

    pub fn reports(&self) -> &ReportStore {
        &self.reports
    }

    pub fn comments(&self) -> &CommentStore {
        &self.comments
    }

    /// Change the status and leave a note, both under one write lock so no
    /// other writer lands between them.
    pub async fn change_status(
        &self,
        report_id: ReportId,
        status: ReportStatus,
        actor: &Identity,
        expected_version: Option<u64>,
    ) -> AppResult<(Report, Comment)> {
        self.reports
            .with_report(report_id, |report, now| {
                self.reports
                    .apply_status(report, status, &actor.id, expected_version, now)?;
                let note = self
                    .comments
                    .record(report, now, note_from(actor, status_note(status)));
                Ok((report.clone(), note))
            })
            .await
    }

    pub async fn assign_to_self(
        &self,
        report_id: ReportId,
        actor: &Identity,
        expected_version: Option<u64>,
    ) -> AppResult<(Report, Comment)> {
        self.reports
            .with_report(report_id, |report, now| {
                apply_assignment(report, &actor.id, &actor.name, expected_version, now)?;
                let note = self.comments.record(
                    report,
                    now,
                    note_from(actor, "Assigned this report to themselves".to_string()),
                );
                Ok((report.clone(), note))
            })
            .await
    }
}

fn note_from(actor: &Identity, content: String) -> NewComment {
    NewComment {
        author_id: actor.id.clone(),
        author_name: actor.name.clone(),
        author_role: actor.role,
        content,
        attachments: Vec::new(),
    }
}

/// `Status updated to "in progress"`: only the first underscore becomes a space.
pub fn status_note(status: ReportStatus) -> String {
    format!("Status updated to \"{}\"", status.as_str().replacen('_', " ", 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{ReportCategory, UserRole};
    use crate::services::clock::ManualClock;
    use crate::services::report::tests::{new_report, start};
    use crate::services::transition::TransitionPolicy;
    use chrono::Duration;
    use std::sync::Arc;

    fn admin() -> Identity {
        Identity {
            id: "2".into(),
            name: "Admin User".into(),
            role: UserRole::Admin,
        }
    }

    fn workflow(policy: TransitionPolicy) -> (Workflow, ManualClock) {
        let clock = ManualClock::new(start());
        let reports = ReportStore::new(Arc::new(clock.clone()), policy);
        let comments = CommentStore::new(reports.clone());
        (Workflow::new(reports, comments), clock)
    }

    #[test]
    fn status_notes_use_readable_names() {
        assert_eq!(status_note(ReportStatus::InProgress), "Status updated to \"in progress\"");
        assert_eq!(
            status_note(ReportStatus::PendingStudent),
            "Status updated to \"pending student\""
        );
        assert_eq!(status_note(ReportStatus::Resolved), "Status updated to \"resolved\"");
    }

    #[tokio::test]
    async fn change_status_leaves_a_note() {
        let (workflow, clock) = workflow(TransitionPolicy::Open);
        let report = workflow
            .reports()
            .create("1", "John Student", new_report("WiFi", ReportCategory::It))
            .await;

        clock.advance(Duration::hours(2));
        let (updated, note) = workflow
            .change_status(report.id, ReportStatus::InProgress, &admin(), None)
            .await
            .unwrap();

        assert_eq!(updated.status, ReportStatus::InProgress);
        // status change = 2, note = 3
        assert_eq!(updated.version, report.version + 2);
        assert_eq!(workflow.reports().get(report.id).await.unwrap(), updated);
        assert_eq!(note.author_id, "2");
        assert!(note.author_is_staff());
        assert_eq!(updated.updated_at, note.created_at);
        assert_eq!(workflow.comments().list_for(report.id), vec![note]);
    }

    #[tokio::test]
    async fn rejected_status_change_leaves_no_note() {
        let (workflow, _) = workflow(TransitionPolicy::Guarded);
        let report = workflow
            .reports()
            .create("1", "John Student", new_report("WiFi", ReportCategory::It))
            .await;

        let err = workflow
            .change_status(report.id, ReportStatus::PendingStudent, &admin(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition { .. }));
        assert!(workflow.comments().list_for(report.id).is_empty());
    }

    #[tokio::test]
    async fn assign_to_self_uses_actor_identity() {
        let (workflow, _) = workflow(TransitionPolicy::Open);
        let report = workflow
            .reports()
            .create("1", "John Student", new_report("Leak", ReportCategory::Hostel))
            .await;

        let (assigned, note) = workflow
            .assign_to_self(report.id, &admin(), None)
            .await
            .unwrap();
        assert_eq!(assigned.assigned_to.as_deref(), Some("2"));
        assert_eq!(assigned.assigned_to_name.as_deref(), Some("Admin User"));
        assert_eq!(note.content, "Assigned this report to themselves");
        // create = 1, assign = 2, note touch = 3
        assert_eq!(assigned.version, 3);
    }
}
