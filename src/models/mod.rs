pub mod comment;
pub mod report;
pub mod user;

pub use comment::{Comment, NewComment};
pub use report::{
    Attachment, NewReport, Report, ReportCategory, ReportId, ReportPriority, ReportStatus,
};
pub use user::{Identity, User, UserRole};
