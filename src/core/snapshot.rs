use crate::core::step::UploadStep;
use crate::domain::model::{RequestContext, Submission, UploadData, ORIGINAL_GROUP};
use crate::domain::ports::{ContentService, DescriptorBuilder, FormatService, HandlerRegistry};
use crate::utils::error::Result;

impl<C, F, R, D> UploadStep<C, F, R, D>
where
    C: ContentService,
    F: FormatService,
    R: HandlerRegistry,
    D: DescriptorBuilder,
{
    /// Renders the current state of the submission's original content:
    /// the designated primary item (if any) and one descriptor per
    /// content item, in group order then item order. Read-only; read
    /// failures propagate.
    pub async fn get_data(&self, ctx: &RequestContext, submission: &Submission) -> Result<UploadData> {
        let mut result = UploadData::default();

        let groups = self
            .content
            .groups_by_name(ctx, submission.item.id, ORIGINAL_GROUP)
            .await?;

        for group in &groups {
            if let Some(primary) = group.primary() {
                result.primary = Some(primary);
            }
            for item in &group.items {
                result.files.push(self.descriptors.build(item)?);
            }
        }

        Ok(result)
    }
}
