use crate::utils::error::{Result, UploadError};
use crate::utils::validation::{validate_path_segment, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Configuration of one upload step within a submission workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepConfig {
    pub step: StepSection,
    pub upload: Option<UploadSection>,
    pub environment: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepSection {
    /// Section id, embedded in patch paths and error-report pointers.
    pub id: String,
    pub r#type: String,
    pub heading: Option<String>,
    pub mandatory: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadSection {
    pub max_size_bytes: Option<u64>,
    pub required: Option<bool>,
}

impl StepConfig {
    /// Loads a step configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(UploadError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses a step configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| UploadError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` references with environment values.
    /// Unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn id(&self) -> &str {
        &self.step.id
    }

    pub fn step_type(&self) -> &str {
        &self.step.r#type
    }

    pub fn mandatory(&self) -> bool {
        self.step.mandatory.unwrap_or(false)
    }

    pub fn max_size_bytes(&self) -> Option<u64> {
        self.upload.as_ref().and_then(|u| u.max_size_bytes)
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path_segment("step.id", &self.step.id)?;
        validate_path_segment("step.type", &self.step.r#type)?;

        if let Some(max) = self.max_size_bytes() {
            if max == 0 {
                return Err(UploadError::InvalidConfigValueError {
                    field: "upload.max_size_bytes".to_string(),
                    value: max.to_string(),
                    reason: "Maximum size must be greater than zero".to_string(),
                });
            }
        }

        Ok(())
    }
}

impl Validate for StepConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_step_config() {
        let toml_content = r#"
[step]
id = "upload"
type = "upload"
heading = "Upload files"
mandatory = true

[upload]
max_size_bytes = 1048576
"#;

        let config = StepConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.id(), "upload");
        assert_eq!(config.step_type(), "upload");
        assert!(config.mandatory());
        assert_eq!(config.max_size_bytes(), Some(1048576));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_STEP_ID", "upload-env");

        let toml_content = r#"
[step]
id = "${TEST_STEP_ID}"
type = "upload"
"#;

        let config = StepConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.id(), "upload-env");

        std::env::remove_var("TEST_STEP_ID");
    }

    #[test]
    fn test_slash_in_section_id_rejected() {
        let toml_content = r#"
[step]
id = "upload/extra"
type = "upload"
"#;

        let config = StepConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[step]
id = "upload"
type = "upload"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = StepConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.step_type(), "upload");
        assert!(!config.mandatory());
    }
}
