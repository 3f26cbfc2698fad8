pub mod dispatch;
pub mod ingest;
pub mod paths;
pub mod snapshot;
pub mod step;

pub use dispatch::resolve_operation;
pub use paths::{classify, PathKind};
pub use step::UploadStep;
