use crate::core::InputFormat;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{validate_range, Validate};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

/// Optional defaults file.
///
/// ```toml
/// [conversion]
/// threshold = 70
/// format = "marker"
///
/// [logging]
/// verbose = false
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub conversion: Option<ConversionConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConversionConfig {
    /// Passing percent, 0 to 100.
    pub threshold: Option<u32>,
    pub format: Option<InputFormat>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn threshold_percent(&self) -> Option<u32> {
        self.conversion.as_ref().and_then(|c| c.threshold)
    }

    pub fn input_format(&self) -> Option<InputFormat> {
        self.conversion.as_ref().and_then(|c| c.format)
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(percent) = self.threshold_percent() {
            validate_range("conversion.threshold", percent, 0, 100)?;
        }
        Ok(())
    }
}
