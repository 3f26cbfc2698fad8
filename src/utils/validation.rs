use crate::utils::error::{Result, UploadError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(UploadError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty".to_string(),
        });
    }

    Ok(())
}

/// Section ids and step types end up embedded in JSON-Pointer paths, so
/// they must not contain the pointer separator.
pub fn validate_path_segment(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty(field_name, value)?;

    if value.contains('/') {
        return Err(UploadError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot contain '/'".to_string(),
        });
    }

    if value.contains('\0') {
        return Err(UploadError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value contains null bytes".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_value_rejected() {
        assert!(validate_non_empty("section.id", "  ").is_err());
    }

    #[test]
    fn test_slash_rejected_in_segment() {
        assert!(validate_path_segment("section.id", "upload/extra").is_err());
        assert!(validate_path_segment("section.id", "upload").is_ok());
    }
}
