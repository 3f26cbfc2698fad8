use crate::config::StepConfig;
use crate::core::step::UploadStep;
use crate::domain::model::{
    ErrorReport, FilePayload, ItemId, RequestContext, Submission, ORIGINAL_GROUP,
};
use crate::domain::ports::{ContentService, DescriptorBuilder, FormatService, HandlerRegistry};
use crate::utils::error::{Result, UploadError};
use crate::utils::filename::display_name;

/// Content sniffing only needs the leading bytes of the payload.
const FORMAT_PROBE_LEN: usize = 512;

impl<C, F, R, D> UploadStep<C, F, R, D>
where
    C: ContentService,
    F: FormatService,
    R: HandlerRegistry,
    D: DescriptorBuilder,
{
    /// Places the uploaded bytes into the submission's original content
    /// group. Returns `None` on success; any failure aborts the whole
    /// sequence and is converted into an `ErrorReport` whose path names
    /// the file slot the upload would have occupied (or the section
    /// root when no group existed yet).
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        submission: &Submission,
        config: &StepConfig,
        payload: FilePayload,
    ) -> Option<ErrorReport> {
        let mut existing_count: Option<usize> = None;

        match self
            .ingest(ctx, submission, config, &mut existing_count, payload)
            .await
        {
            Ok(item_id) => {
                tracing::debug!(
                    "Stored content item {} on submission {}",
                    item_id,
                    submission.id
                );
                None
            }
            Err(err) => {
                tracing::error!(
                    "File ingestion failed for submission {}: {}",
                    submission.id,
                    err
                );

                let mut report = ErrorReport::new(err.to_string());
                report.paths.push(match existing_count {
                    Some(count) => format!("/sections/{}/files/{}", config.id(), count),
                    None => format!("/sections/{}", config.id()),
                });
                Some(report)
            }
        }
    }

    /// The fallible part of the upload sequence. `existing_count` is set
    /// as soon as the group read succeeds so that the caller can point
    /// at the right file slot when a later step fails.
    async fn ingest(
        &self,
        ctx: &RequestContext,
        submission: &Submission,
        config: &StepConfig,
        existing_count: &mut Option<usize>,
        payload: FilePayload,
    ) -> Result<ItemId> {
        let item = submission.item.id;

        let groups = self.content.groups_by_name(ctx, item, ORIGINAL_GROUP).await?;
        *existing_count = groups.first().map(|group| group.items.len());

        if let Some(max) = config.max_size_bytes() {
            if payload.data.len() as u64 > max {
                return Err(UploadError::storage(format!(
                    "upload of {} bytes exceeds the configured limit of {} bytes",
                    payload.data.len(),
                    max
                )));
            }
        }

        let probe: Vec<u8> = payload.data[..payload.data.len().min(FORMAT_PROBE_LEN)].to_vec();

        let mut content_item = match groups.first() {
            None => {
                self.content
                    .create_group_with_item(ctx, item, ORIGINAL_GROUP, payload.data)
                    .await?
            }
            Some(group) => self.content.append_item(ctx, group.id, payload.data).await?,
        };

        content_item.name = display_name(&payload.file_name);
        content_item.source = payload.file_name;

        // An unknown format is a valid outcome, not an error.
        content_item.format = self
            .formats
            .guess_format(ctx, &content_item, &probe)
            .await?;

        self.content.save_content_item(ctx, &content_item).await?;
        self.content.save_item(ctx, item).await?;

        Ok(content_item.id)
    }
}
