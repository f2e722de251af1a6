use crate::utils::error::{EtlError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_distinct_paths(input: &str, output: &str) -> Result<()> {
    if input == output {
        return Err(EtlError::InvalidConfigValueError {
            field: "output_fname".to_string(),
            value: output.to_string(),
            reason: "Output file would overwrite the input file".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("input_fname", "grades.csv").is_ok());
        assert!(validate_path("input_fname", "").is_err());
        assert!(validate_path("input_fname", "   ").is_err());
        assert!(validate_path("input_fname", "bad\0name.csv").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("threshold", 0u32, 0, 100).is_ok());
        assert!(validate_range("threshold", 100u32, 0, 100).is_ok());
        assert!(validate_range("threshold", 101u32, 0, 100).is_err());
    }

    #[test]
    fn test_validate_distinct_paths() {
        assert!(validate_distinct_paths("in.csv", "out.csv").is_ok());
        assert!(validate_distinct_paths("same.csv", "same.csv").is_err());
    }
}
