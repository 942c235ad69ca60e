use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use validator::ValidationError;

pub type ReportId = u64;

/// Lifecycle states of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    New,
    InProgress,
    PendingStudent,
    Resolved,
    Closed,
}

impl ReportStatus {
    /// Fixed display order used by breakdowns.
    pub const ALL: [Self; 5] = [
        Self::New,
        Self::InProgress,
        Self::PendingStudent,
        Self::Resolved,
        Self::Closed,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::PendingStudent => "pending_student",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::InProgress => "In Progress",
            Self::PendingStudent => "Pending Student",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
        }
    }

    /// Being worked on by staff or waiting on the student.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::InProgress | Self::PendingStudent)
    }

    /// Resolved or closed; no further work expected.
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ReportCategory {
    #[serde(rename = "IT")]
    It,
    Hostel,
    Library,
    Academics,
    Infrastructure,
    Other,
}

impl ReportCategory {
    pub const ALL: [Self; 6] = [
        Self::It,
        Self::Hostel,
        Self::Library,
        Self::Academics,
        Self::Infrastructure,
        Self::Other,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::It => "IT",
            Self::Hostel => "Hostel",
            Self::Library => "Library",
            Self::Academics => "Academics",
            Self::Infrastructure => "Infrastructure",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ReportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl ReportPriority {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for ReportPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque file metadata. Storage of the file itself happens elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Attachment {
    pub id: String,
    pub filename: String,
    pub url: String,
    pub mime_type: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Report {
    pub id: ReportId,
    pub reporter_id: String,
    pub reporter_name: String,
    pub title: String,
    pub description: String,
    pub category: ReportCategory,
    pub location: String,
    pub priority: ReportPriority,
    pub status: ReportStatus,
    pub assigned_to: Option<String>,
    pub assigned_to_name: Option<String>,
    pub attachments: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    /// Bumped on every mutation; used for optimistic concurrency.
    pub version: u64,
}

impl Report {
    /// Days between creation and the recorded resolution, if any.
    pub fn resolution_days(&self) -> Option<f64> {
        self.resolved_at.map(|resolved| {
            let elapsed = resolved.signed_duration_since(self.created_at);
            elapsed.num_milliseconds() as f64 / MILLIS_PER_DAY
        })
    }

    /// Any mutation, comments included: stamp `updated_at` and bump `version`.
    pub(crate) fn record_activity(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
        self.version += 1;
    }
}

const MILLIS_PER_DAY: f64 = 1000.0 * 60.0 * 60.0 * 24.0;

/// Fields the submitter supplies. Everything else is assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReport {
    pub title: String,
    pub description: String,
    pub category: ReportCategory,
    pub location: String,
    pub priority: ReportPriority,
    pub attachments: Vec<Attachment>,
}

/// Rejects strings that are empty once surrounding whitespace is removed.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}
