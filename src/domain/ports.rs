use crate::domain::model::{
    ContentGroup, ContentItem, FileFormat, GroupId, ItemId, OperationId, PatchInstruction,
    RequestContext, RequestMeta, Submission, Verb,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Persistence of content groups and items. All mutations run inside the
/// request-scoped unit of work carried by the context; transaction
/// isolation against concurrent requests is this layer's concern.
#[async_trait]
pub trait ContentService: Send + Sync {
    /// Groups with the given name attached to the item, in storage order.
    async fn groups_by_name(
        &self,
        ctx: &RequestContext,
        item: ItemId,
        name: &str,
    ) -> Result<Vec<ContentGroup>>;

    /// Creates a group with the given name on the item and stores the
    /// bytes as its first content item, atomically from the caller's
    /// perspective.
    async fn create_group_with_item(
        &self,
        ctx: &RequestContext,
        item: ItemId,
        name: &str,
        data: Vec<u8>,
    ) -> Result<ContentItem>;

    /// Appends a new content item with the given bytes to an existing
    /// group.
    async fn append_item(
        &self,
        ctx: &RequestContext,
        group: GroupId,
        data: Vec<u8>,
    ) -> Result<ContentItem>;

    /// Persists changes to a content item's attributes.
    async fn save_content_item(&self, ctx: &RequestContext, item: &ContentItem) -> Result<()>;

    /// Persists the parent item after its content changed.
    async fn save_item(&self, ctx: &RequestContext, item: ItemId) -> Result<()>;
}

/// Infers a file format from stored content and name. Black box; an
/// unknown format is a valid answer, not an error.
#[async_trait]
pub trait FormatService: Send + Sync {
    async fn guess_format(
        &self,
        ctx: &RequestContext,
        item: &ContentItem,
        data: &[u8],
    ) -> Result<FileFormat>;
}

/// Executable patch operation. Errors are opaque to the upload step and
/// propagate to the caller unchanged.
#[async_trait]
pub trait PatchHandler: Send + Sync {
    async fn perform(
        &self,
        ctx: &RequestContext,
        meta: &RequestMeta,
        submission: &Submission,
        instruction: &PatchInstruction,
    ) -> anyhow::Result<()>;
}

/// Registry of patch handlers keyed by operation identifier and verb.
pub trait HandlerRegistry: Send + Sync {
    fn lookup(&self, operation: &OperationId, verb: Verb) -> Option<Arc<dyn PatchHandler>>;
}

/// Renders a content item into its external descriptor representation.
/// The shape is opaque to the upload step.
pub trait DescriptorBuilder: Send + Sync {
    fn build(&self, item: &ContentItem) -> Result<serde_json::Value>;
}
