pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{
    ExtensionFormatService, InMemoryContentService, JsonDescriptorBuilder, MapHandlerRegistry,
};
pub use crate::config::StepConfig;
pub use crate::core::{classify, resolve_operation, PathKind, UploadStep};
pub use crate::domain::model::{
    ErrorReport, FilePayload, OperationId, PatchInstruction, RequestContext, RequestMeta,
    Submission, UploadData, Verb, ORIGINAL_GROUP,
};
pub use crate::utils::error::{Result, UploadError};
