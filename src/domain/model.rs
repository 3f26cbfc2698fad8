use crate::utils::error::{Result, UploadError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Well-known name of the content group that holds the originally
/// uploaded files of a submission.
pub const ORIGINAL_GROUP: &str = "ORIGINAL";

macro_rules! id_type {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_type!(SubmissionId);
id_type!(ItemId);
id_type!(GroupId);

/// An in-progress submission. The archival item's content groups live
/// behind the `ContentService`; the submission only carries identities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub item: Item,
}

impl Submission {
    pub fn new() -> Self {
        Self {
            id: SubmissionId::new(),
            item: Item::new(),
        }
    }
}

impl Default for Submission {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
}

impl Item {
    pub fn new() -> Self {
        Self { id: ItemId::new() }
    }
}

impl Default for Item {
    fn default() -> Self {
        Self::new()
    }
}

/// Inferred file format. `unknown` is a valid outcome of format
/// inference, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFormat {
    pub short_name: String,
    pub mime_type: String,
}

impl FileFormat {
    pub fn new(short_name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            short_name: short_name.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn unknown() -> Self {
        Self::new("Unknown", "application/octet-stream")
    }

    pub fn is_unknown(&self) -> bool {
        self.short_name == "Unknown"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessCondition {
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// One uploaded file as persisted in a content group. The bytes
/// themselves are owned by the persistence layer once ingested; the
/// model carries the stored size only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ItemId,
    pub name: String,
    pub source: String,
    pub size_bytes: u64,
    pub format: FileFormat,
    pub access_conditions: Vec<AccessCondition>,
    pub uploaded_at: DateTime<Utc>,
}

impl ContentItem {
    pub fn new(size_bytes: u64) -> Self {
        Self {
            id: ItemId::new(),
            name: String::new(),
            source: String::new(),
            size_bytes,
            format: FileFormat::unknown(),
            access_conditions: Vec::new(),
            uploaded_at: Utc::now(),
        }
    }
}

/// Named, ordered collection of content items. The primary designation
/// is a weak identity reference into the group's own members.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentGroup {
    pub id: GroupId,
    pub name: String,
    pub items: Vec<ContentItem>,
    primary: Option<ItemId>,
}

impl ContentGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: GroupId::new(),
            name: name.into(),
            items: Vec::new(),
            primary: None,
        }
    }

    pub fn primary(&self) -> Option<ItemId> {
        self.primary
    }

    /// Designates a member item as primary. Rejects identities that are
    /// not members of this group.
    pub fn set_primary(&mut self, item: ItemId) -> Result<()> {
        if !self.items.iter().any(|i| i.id == item) {
            return Err(UploadError::PrimaryNotInGroup {
                item,
                group: self.id,
            });
        }
        self.primary = Some(item);
        Ok(())
    }

    pub fn clear_primary(&mut self) {
        self.primary = None;
    }
}

/// Patch verbs, a closed set. Only a subset is exercised by the upload
/// step; copy and test fall through to the unsupported path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    Add,
    Remove,
    Replace,
    Move,
    Copy,
    Test,
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verb::Add => "add",
            Verb::Remove => "remove",
            Verb::Replace => "replace",
            Verb::Move => "move",
            Verb::Copy => "copy",
            Verb::Test => "test",
        };
        f.write_str(s)
    }
}

/// Key under which a patch handler is registered. A typed equivalent of
/// the registry's identifier strings; `Display` renders the wire form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OperationId {
    Metadata,
    AccessConditions { step_type: String },
    PrimaryFlag,
    Remove,
    Move,
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationId::Metadata => f.write_str("metadata-operation"),
            OperationId::AccessConditions { step_type } => {
                write!(f, "{}.accessconditions-operation", step_type)
            }
            OperationId::PrimaryFlag => f.write_str("primary-flag-operation"),
            OperationId::Remove => f.write_str("remove-operation"),
            OperationId::Move => f.write_str("move-operation"),
        }
    }
}

/// One unit of a partial-update request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchInstruction {
    pub op: Verb,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

impl PatchInstruction {
    pub fn new(op: Verb, path: impl Into<String>) -> Self {
        Self {
            op,
            path: path.into(),
            value: None,
        }
    }

    pub fn with_value(op: Verb, path: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            op,
            path: path.into(),
            value: Some(value),
        }
    }
}

/// Failure report returned by the upload operation. Paths are
/// JSON-Pointer style and identify the resource locations implicated by
/// the failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub message: String,
    pub paths: Vec<String>,
}

impl ErrorReport {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            paths: Vec::new(),
        }
    }
}

/// Uploaded file payload, fully materialized before ingestion starts.
#[derive(Debug, Clone)]
pub struct FilePayload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl FilePayload {
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            data,
        }
    }
}

/// External data representation of the upload step: the designated
/// primary item plus one rendered descriptor per content item.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UploadData {
    pub primary: Option<ItemId>,
    pub files: Vec<serde_json::Value>,
}

/// Request-scoped unit-of-work context handed through to ports and
/// handlers. Stands in for the hosting framework's session.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
    pub user: Option<String>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            user: None,
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Transport metadata forwarded to patch handlers untouched.
#[derive(Debug, Clone, Default)]
pub struct RequestMeta {
    pub headers: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_must_be_group_member() {
        let mut group = ContentGroup::new(ORIGINAL_GROUP);
        group.items.push(ContentItem::new(3));
        let member = group.items[0].id;

        assert!(group.set_primary(ItemId::new()).is_err());
        assert!(group.primary().is_none());

        group.set_primary(member).unwrap();
        assert_eq!(group.primary(), Some(member));

        group.clear_primary();
        assert!(group.primary().is_none());
    }

    #[test]
    fn test_verb_serde_roundtrip() {
        let instruction: PatchInstruction =
            serde_json::from_str(r#"{"op":"remove","path":"/sections/upload/files/0"}"#).unwrap();
        assert_eq!(instruction.op, Verb::Remove);
        assert_eq!(instruction.op.to_string(), "remove");
        assert!(instruction.value.is_none());
    }
}
