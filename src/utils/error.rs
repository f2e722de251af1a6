use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Input file '{path}' not found.")]
    InputNotFound { path: String },

    #[error("Malformed data found on line {line}.\nContent: {content}\nExpected format: {expected}")]
    MalformedRecord {
        line: usize,
        content: String,
        expected: &'static str,
    },

    #[error("Invalid scores string in D2L file on line {line}: {scores}")]
    InvalidScore { line: usize, scores: String },

    #[error("Inconsistent record on line {line}: expected {expected} score pairs, found {found}")]
    InconsistentRecord {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("No valid student records found.")]
    EmptyResult,

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::InputNotFound { .. } => ErrorCategory::Input,
            EtlError::MalformedRecord { .. }
            | EtlError::InvalidScore { .. }
            | EtlError::InconsistentRecord { .. }
            | EtlError::EmptyResult => ErrorCategory::Data,
            EtlError::ConfigValidationError { .. } | EtlError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            EtlError::CsvError(_) | EtlError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Every failure aborts the run; grade data is never partially converted.
    pub fn exit_code(&self) -> i32 {
        1
    }

    pub fn user_friendly_message(&self) -> String {
        format!("Error: {}", self)
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::InputNotFound { .. } => "Check the input path and try again",
            EtlError::MalformedRecord { .. } => {
                "Fix the reported line in the D2L export or re-export the gradebook"
            }
            EtlError::InvalidScore { .. } => {
                "A score has zero points possible; correct the grade item in D2L"
            }
            EtlError::InconsistentRecord { .. } => {
                "Every student row must carry the same number of grade items"
            }
            EtlError::EmptyResult => {
                "Make sure the export includes student rows starting with '#'"
            }
            EtlError::ConfigValidationError { .. } | EtlError::InvalidConfigValueError { .. } => {
                "Review the command-line options and configuration file"
            }
            EtlError::CsvError(_) | EtlError::IoError(_) => {
                "Check file permissions and available disk space"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_cites_line_and_content() {
        let err = EtlError::MalformedRecord {
            line: 4,
            content: "#A0123,10,#".to_string(),
            expected: "#StudentId,Num,Denom,Num,Denom,...,#",
        };
        let message = err.to_string();
        assert!(message.contains("line 4"));
        assert!(message.contains("#A0123,10,#"));
        assert_eq!(err.category(), ErrorCategory::Data);
    }

    #[test]
    fn test_every_error_exits_with_one() {
        let errors = [
            EtlError::EmptyResult,
            EtlError::InputNotFound {
                path: "missing.csv".to_string(),
            },
            EtlError::InvalidScore {
                line: 2,
                scores: "10,0".to_string(),
            },
        ];
        for err in errors {
            assert_eq!(err.exit_code(), 1);
        }
    }
}
