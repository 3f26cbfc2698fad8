use crate::domain::model::{GroupId, ItemId, Verb};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("the path {path} is not supported by the operation {verb}")]
    UnsupportedInstruction { path: String, verb: Verb },

    #[error("no handler registered for operation {operation} with verb {verb}")]
    HandlerNotRegistered { operation: String, verb: Verb },

    #[error("patch handler failed: {0}")]
    Handler(#[source] anyhow::Error),

    #[error("primary item {item} is not a member of group {group}")]
    PrimaryNotInGroup { item: ItemId, group: GroupId },

    #[error("content storage error: {message}")]
    Storage { message: String },

    #[error("format inference error: {message}")]
    Format { message: String },

    #[error("descriptor rendering error: {message}")]
    Descriptor { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl UploadError {
    /// Client-class errors map to 4xx responses at the transport layer.
    pub fn is_client_error(&self) -> bool {
        matches!(self, UploadError::UnsupportedInstruction { .. })
    }

    pub fn storage(message: impl Into<String>) -> Self {
        UploadError::Storage {
            message: message.into(),
        }
    }

    pub fn format(message: impl Into<String>) -> Self {
        UploadError::Format {
            message: message.into(),
        }
    }

    pub fn descriptor(message: impl Into<String>) -> Self {
        UploadError::Descriptor {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, UploadError>;
