use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("No file selected")]
    NoFileSelected,

    #[error("Unsupported file type: {name}")]
    UnsupportedFileType { name: String },

    #[error("No current resume")]
    NoCurrentResume,

    #[error("Resume not found: {id}")]
    ResumeNotFound { id: String },

    #[error("Entry not found: {id}")]
    EntryNotFound { id: String },

    #[error("Duplicate entry id: {id}")]
    DuplicateEntry { id: String },

    #[error("Speech recognition not supported")]
    SpeechUnsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    State,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ResumeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ResumeError::ConfigError { .. }
            | ResumeError::ConfigValidationError { .. }
            | ResumeError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ResumeError::ValidationError { .. }
            | ResumeError::NoFileSelected
            | ResumeError::UnsupportedFileType { .. }
            | ResumeError::SpeechUnsupported => ErrorCategory::Input,
            ResumeError::NoCurrentResume
            | ResumeError::ResumeNotFound { .. }
            | ResumeError::EntryNotFound { .. }
            | ResumeError::DuplicateEntry { .. } => ErrorCategory::State,
            ResumeError::IoError(_)
            | ResumeError::SerializationError(_)
            | ResumeError::ZipError(_) => ErrorCategory::Storage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::State => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            ResumeError::NoFileSelected => "Please select a file".to_string(),
            ResumeError::NoCurrentResume => "No resume is open".to_string(),
            ResumeError::SpeechUnsupported => {
                "Speech recognition not supported in this environment".to_string()
            }
            ResumeError::UnsupportedFileType { name } => {
                format!("'{}' is not a PDF or DOCX file", name)
            }
            ResumeError::ResumeNotFound { id } => format!("No saved resume with id '{}'", id),
            ResumeError::IoError(e) => format!("Could not access resume data: {}", e),
            ResumeError::SerializationError(_) => "Saved resume data is unreadable".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => "Check the settings file and command-line flags",
            ErrorCategory::Input => "Check the arguments and try again",
            ErrorCategory::State => {
                "Create a resume with `resumedia new` or pick one with `resumedia select`"
            }
            ErrorCategory::Storage => "Check permissions and free space in the storage directory",
        }
    }
}

pub type Result<T> = std::result::Result<T, ResumeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_low_severity() {
        assert_eq!(ResumeError::NoFileSelected.category(), ErrorCategory::Input);
        assert_eq!(ResumeError::NoFileSelected.severity(), ErrorSeverity::Low);
        assert_eq!(
            ResumeError::NoFileSelected.user_friendly_message(),
            "Please select a file"
        );
    }

    #[test]
    fn test_storage_errors_are_critical() {
        let err: ResumeError = std::io::Error::other("disk gone").into();
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
