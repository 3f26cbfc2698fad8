use once_cell::sync::Lazy;
use regex::Regex;

static METADATA_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^/sections/[^/]+/files/[^/]+/metadata/[^/]+(/[^/]+)?$").unwrap()
});

static PRIMARY_FLAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/sections/[^/]+/primary$").unwrap());

static ACCESS_CONDITION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^/sections/[^/]+/files/[^/]+/accessConditions(/[^/]+)?$").unwrap()
});

static SECTION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/sections/[^/]+(/.*)?$").unwrap());

/// Semantic target of a patch path. Classification is purely syntactic;
/// whether the referenced entities exist is the downstream handler's
/// concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// `/sections/{section}/files/{fileId}/metadata/{field}` with an
    /// optional trailing value index.
    MetadataField,
    /// `/sections/{section}/primary`
    PrimaryFlag,
    /// `/sections/{section}/files/{fileId}/accessConditions` or one
    /// indexed access rule under it.
    AccessConditions,
    /// Any other path under `/sections/{section}`, addressing the file
    /// list as a whole (add/remove/move of entire files).
    GenericFile,
    /// Not a section path at all.
    Unsupported,
}

/// Maps a patch path onto exactly one target kind.
pub fn classify(path: &str) -> PathKind {
    if METADATA_PATTERN.is_match(path) {
        PathKind::MetadataField
    } else if PRIMARY_FLAG_PATTERN.is_match(path) {
        PathKind::PrimaryFlag
    } else if ACCESS_CONDITION_PATTERN.is_match(path) {
        PathKind::AccessConditions
    } else if SECTION_PATTERN.is_match(path) {
        PathKind::GenericFile
    } else {
        PathKind::Unsupported
    }
}
