use upload_step::domain::model::{ContentGroup, ContentItem, GroupId, ItemId};
use upload_step::domain::ports::ContentService;
use upload_step::{
    ExtensionFormatService, FilePayload, InMemoryContentService, JsonDescriptorBuilder,
    MapHandlerRegistry, RequestContext, Result, StepConfig, Submission, UploadError, UploadStep,
    ORIGINAL_GROUP,
};

fn step_config() -> StepConfig {
    StepConfig::from_toml_str(
        r#"
[step]
id = "upload"
type = "upload"
"#,
    )
    .unwrap()
}

fn memory_step() -> UploadStep<
    InMemoryContentService,
    ExtensionFormatService,
    MapHandlerRegistry,
    JsonDescriptorBuilder,
> {
    UploadStep::new(
        InMemoryContentService::new(),
        ExtensionFormatService::new(),
        MapHandlerRegistry::new(),
        JsonDescriptorBuilder::new(),
    )
}

#[tokio::test]
async fn test_snapshot_lists_files_in_upload_order() {
    let step = memory_step();
    let ctx = RequestContext::new();
    let submission = Submission::new();
    let config = step_config();

    for name in ["first.pdf", "second.txt"] {
        let payload = FilePayload::new(name, b"%PDF data".to_vec());
        assert!(step.upload(&ctx, &submission, &config, payload).await.is_none());
    }

    let data = step.get_data(&ctx, &submission).await.unwrap();

    assert!(data.primary.is_none());
    assert_eq!(data.files.len(), 2);
    assert_eq!(data.files[0]["name"], "first.pdf");
    assert_eq!(data.files[1]["name"], "second.txt");
    assert_eq!(data.files[0]["format"]["mimeType"], "application/pdf");
}

#[tokio::test]
async fn test_snapshot_reports_designated_primary() {
    let step = memory_step();
    let ctx = RequestContext::new();
    let submission = Submission::new();
    let config = step_config();

    for name in ["a.txt", "b.txt"] {
        let payload = FilePayload::new(name, b"text".to_vec());
        assert!(step.upload(&ctx, &submission, &config, payload).await.is_none());
    }

    let groups = step
        .content()
        .groups_by_name(&ctx, submission.item.id, ORIGINAL_GROUP)
        .await
        .unwrap();
    let second_item = groups[0].items[1].id;
    step.content().set_primary(groups[0].id, second_item).await.unwrap();

    let data = step.get_data(&ctx, &submission).await.unwrap();
    assert_eq!(data.primary, Some(second_item));
}

#[tokio::test]
async fn test_primary_must_reference_group_member() {
    let step = memory_step();
    let ctx = RequestContext::new();
    let submission = Submission::new();
    let config = step_config();

    let payload = FilePayload::new("a.txt", b"text".to_vec());
    assert!(step.upload(&ctx, &submission, &config, payload).await.is_none());

    let groups = step
        .content()
        .groups_by_name(&ctx, submission.item.id, ORIGINAL_GROUP)
        .await
        .unwrap();

    let err = step
        .content()
        .set_primary(groups[0].id, ItemId::new())
        .await
        .unwrap_err();
    assert!(matches!(err, UploadError::PrimaryNotInGroup { .. }));
}

#[tokio::test]
async fn test_later_group_primary_overwrites_earlier_one() {
    let step = memory_step();
    let ctx = RequestContext::new();
    let submission = Submission::new();

    // two ORIGINAL groups created directly against the service
    let first = step
        .content()
        .create_group_with_item(&ctx, submission.item.id, ORIGINAL_GROUP, b"one".to_vec())
        .await
        .unwrap();
    let second = step
        .content()
        .create_group_with_item(&ctx, submission.item.id, ORIGINAL_GROUP, b"two".to_vec())
        .await
        .unwrap();

    let groups = step
        .content()
        .groups_by_name(&ctx, submission.item.id, ORIGINAL_GROUP)
        .await
        .unwrap();
    assert_eq!(groups.len(), 2);

    step.content().set_primary(groups[0].id, first.id).await.unwrap();
    step.content().set_primary(groups[1].id, second.id).await.unwrap();

    let data = step.get_data(&ctx, &submission).await.unwrap();
    // bundle iteration order: the later group's designation wins
    assert_eq!(data.primary, Some(second.id));
    assert_eq!(data.files.len(), 2);
}

struct BrokenContentService;

#[async_trait::async_trait]
impl ContentService for BrokenContentService {
    async fn groups_by_name(
        &self,
        _ctx: &RequestContext,
        _item: ItemId,
        _name: &str,
    ) -> Result<Vec<ContentGroup>> {
        Err(UploadError::storage("store unavailable"))
    }

    async fn create_group_with_item(
        &self,
        _ctx: &RequestContext,
        _item: ItemId,
        _name: &str,
        _data: Vec<u8>,
    ) -> Result<ContentItem> {
        Err(UploadError::storage("store unavailable"))
    }

    async fn append_item(
        &self,
        _ctx: &RequestContext,
        _group: GroupId,
        _data: Vec<u8>,
    ) -> Result<ContentItem> {
        Err(UploadError::storage("store unavailable"))
    }

    async fn save_content_item(&self, _ctx: &RequestContext, _item: &ContentItem) -> Result<()> {
        Err(UploadError::storage("store unavailable"))
    }

    async fn save_item(&self, _ctx: &RequestContext, _item: ItemId) -> Result<()> {
        Err(UploadError::storage("store unavailable"))
    }
}

#[tokio::test]
async fn test_snapshot_propagates_read_failure() {
    let step = UploadStep::new(
        BrokenContentService,
        ExtensionFormatService::new(),
        MapHandlerRegistry::new(),
        JsonDescriptorBuilder::new(),
    );

    let err = step
        .get_data(&RequestContext::new(), &Submission::new())
        .await
        .unwrap_err();
    assert!(matches!(err, UploadError::Storage { .. }));
}
