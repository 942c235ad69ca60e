pub mod clock;
pub mod comment;
pub mod query;
pub mod report;
pub mod seed;
pub mod stats;
pub mod transition;
pub mod workflow;

pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use comment::CommentStore;
pub use query::{Bucket, ReportFilter, SearchScope};
pub use report::ReportStore;
pub use transition::TransitionPolicy;
pub use workflow::Workflow;
