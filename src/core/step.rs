use crate::config::StepConfig;
use crate::core::dispatch::resolve_operation;
use crate::domain::model::{PatchInstruction, RequestContext, RequestMeta, Submission};
use crate::domain::ports::{ContentService, DescriptorBuilder, FormatService, HandlerRegistry};
use crate::utils::error::{Result, UploadError};

/// The upload step engine. Routes patch instructions to registered
/// handlers, ingests uploaded files into the submission's original
/// content group, and renders the step's external data representation.
pub struct UploadStep<C, F, R, D> {
    pub(crate) content: C,
    pub(crate) formats: F,
    pub(crate) registry: R,
    pub(crate) descriptors: D,
}

impl<C, F, R, D> UploadStep<C, F, R, D>
where
    C: ContentService,
    F: FormatService,
    R: HandlerRegistry,
    D: DescriptorBuilder,
{
    pub fn new(content: C, formats: F, registry: R, descriptors: D) -> Self {
        Self {
            content,
            formats,
            registry,
            descriptors,
        }
    }

    /// The underlying content service, for callers that need direct
    /// access (marking a primary item, inspection in tests).
    pub fn content(&self) -> &C {
        &self.content
    }

    /// Resolves the patch instruction to an operation and executes the
    /// registered handler against the submission. Fails with a
    /// client-class error when the verb/path combination is not
    /// supported; handler errors propagate unchanged.
    pub async fn do_patch_processing(
        &self,
        ctx: &RequestContext,
        meta: &RequestMeta,
        submission: &Submission,
        instruction: &PatchInstruction,
        config: &StepConfig,
    ) -> Result<()> {
        let operation = resolve_operation(instruction.op, &instruction.path, config.step_type())
            .ok_or_else(|| UploadError::UnsupportedInstruction {
                path: instruction.path.clone(),
                verb: instruction.op,
            })?;

        tracing::debug!(
            "Resolved patch {} {} to operation {}",
            instruction.op,
            instruction.path,
            operation
        );

        let handler = self.registry.lookup(&operation, instruction.op).ok_or_else(|| {
            UploadError::HandlerNotRegistered {
                operation: operation.to_string(),
                verb: instruction.op,
            }
        })?;

        handler
            .perform(ctx, meta, submission, instruction)
            .await
            .map_err(UploadError::Handler)
    }
}
