use super::{report::ReportId, Attachment, UserRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A single entry in a report's discussion thread. Never edited or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Comment {
    pub id: Uuid,
    pub report_id: ReportId,
    pub author_id: String,
    pub author_name: String,
    pub author_role: UserRole,
    pub content: String,
    pub attachments: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub const fn author_is_staff(&self) -> bool {
        self.author_role.is_staff()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    pub author_id: String,
    pub author_name: String,
    pub author_role: UserRole,
    pub content: String,
    pub attachments: Vec<Attachment>,
}
