#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::{ConfigProvider, InputFormat, Threshold};
use crate::utils::error::Result;
use crate::utils::validation::{validate_distinct_paths, validate_path, validate_range, Validate};
use toml_config::TomlConfig;

/// Settings for one run after merging flags, the optional file and defaults.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input_path: String,
    pub output_path: String,
    pub threshold: Threshold,
    pub format: InputFormat,
    pub verbose: bool,
}

impl RunConfig {
    /// Explicit values win over `file`, `file` wins over built-in defaults.
    pub fn resolve(
        input_path: String,
        output_path: String,
        threshold_percent: Option<u32>,
        format: Option<InputFormat>,
        verbose: bool,
        file: Option<&TomlConfig>,
    ) -> Result<Self> {
        if let Some(file) = file {
            file.validate()?;
        }

        let percent = threshold_percent
            .or_else(|| file.and_then(TomlConfig::threshold_percent))
            .unwrap_or(Threshold::DEFAULT_PERCENT);
        validate_range("threshold", percent, 0, 100)?;

        Ok(Self {
            input_path,
            output_path,
            threshold: Threshold::from_percent(percent)?,
            format: format
                .or_else(|| file.and_then(TomlConfig::input_format))
                .unwrap_or_default(),
            verbose: verbose || file.is_some_and(TomlConfig::verbose),
        })
    }
}

impl ConfigProvider for RunConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn threshold(&self) -> Threshold {
        self.threshold
    }

    fn input_format(&self) -> InputFormat {
        self.format
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input_fname", &self.input_path)?;
        validate_path("output_fname", &self.output_path)?;
        validate_distinct_paths(&self.input_path, &self.output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(
        percent: Option<u32>,
        format: Option<InputFormat>,
        file: Option<&TomlConfig>,
    ) -> Result<RunConfig> {
        RunConfig::resolve(
            "in.csv".to_string(),
            "out.csv".to_string(),
            percent,
            format,
            false,
            file,
        )
    }

    #[test]
    fn test_defaults() {
        let config = resolve(None, None, None).unwrap();
        assert_eq!(config.threshold.ratio(), 0.7);
        assert_eq!(config.format, InputFormat::Marker);
        assert!(!config.verbose);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags_override_file() {
        let file = TomlConfig::from_toml_str(
            "[conversion]\nthreshold = 60\nformat = \"tabular\"\n[logging]\nverbose = true\n",
        )
        .unwrap();

        let from_file = resolve(None, None, Some(&file)).unwrap();
        assert_eq!(from_file.threshold.ratio(), 0.6);
        assert_eq!(from_file.format, InputFormat::Tabular);
        assert!(from_file.verbose);

        let overridden = resolve(Some(90), Some(InputFormat::Marker), Some(&file)).unwrap();
        assert_eq!(overridden.threshold.ratio(), 0.9);
        assert_eq!(overridden.format, InputFormat::Marker);
    }

    #[test]
    fn test_threshold_out_of_range() {
        assert!(resolve(Some(101), None, None).is_err());
        assert!(resolve(Some(100), None, None).is_ok());
    }

    #[test]
    fn test_same_input_and_output_rejected() {
        let config = RunConfig::resolve(
            "grades.csv".to_string(),
            "grades.csv".to_string(),
            None,
            None,
            false,
            None,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }
}
