use crate::core::paths::{classify, PathKind};
use crate::domain::model::{OperationId, Verb};

/// Resolves the operation identifier for a patch instruction. Pure and
/// deterministic in (verb, path, step_type); `None` means the
/// combination is not supported by the upload step.
///
/// The table is verb-first: the same path shape can resolve to
/// different handlers, or to none, depending solely on the verb.
pub fn resolve_operation(verb: Verb, path: &str, step_type: &str) -> Option<OperationId> {
    let kind = classify(path);
    match verb {
        Verb::Remove => match kind {
            PathKind::MetadataField => Some(OperationId::Metadata),
            PathKind::AccessConditions => Some(access_conditions(step_type)),
            PathKind::PrimaryFlag => Some(OperationId::PrimaryFlag),
            PathKind::GenericFile => Some(OperationId::Remove),
            PathKind::Unsupported => None,
        },
        Verb::Move => match kind {
            PathKind::MetadataField => Some(OperationId::Metadata),
            // Access-condition and primary paths are intentionally not
            // special-cased for move; registered move handlers see them
            // as plain file moves.
            PathKind::AccessConditions | PathKind::PrimaryFlag | PathKind::GenericFile => {
                Some(OperationId::Move)
            }
            PathKind::Unsupported => None,
        },
        Verb::Add | Verb::Replace | Verb::Copy | Verb::Test => match kind {
            PathKind::AccessConditions => Some(access_conditions(step_type)),
            PathKind::MetadataField => Some(OperationId::Metadata),
            PathKind::PrimaryFlag => Some(OperationId::PrimaryFlag),
            PathKind::GenericFile | PathKind::Unsupported => None,
        },
    }
}

fn access_conditions(step_type: &str) -> OperationId {
    OperationId::AccessConditions {
        step_type: step_type.to_string(),
    }
}
