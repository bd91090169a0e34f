use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Backend responded with {status}: {message}")]
    BackendError { status: u16, message: String },

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Please select at least 2 colleges to compare")]
    InsufficientSelection { selected: usize },

    #[error("Slot {index} is out of range (expected 0..{max})")]
    SlotOutOfRange { index: usize, max: usize },

    #[error("College '{id}' is not in the directory")]
    UnknownCollege { id: String },
}

pub type Result<T> = std::result::Result<T, PortalError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Backend,
    Configuration,
    Data,
    UserInput,
    Authorization,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PortalError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PortalError::ApiError(_) | PortalError::UrlError(_) => ErrorCategory::Network,
            PortalError::BackendError { .. } | PortalError::NotFound { .. } => {
                ErrorCategory::Backend
            }
            PortalError::ConfigValidationError { .. }
            | PortalError::InvalidConfigValueError { .. }
            | PortalError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PortalError::CsvError(_) | PortalError::SerializationError(_) => ErrorCategory::Data,
            PortalError::ValidationError { .. }
            | PortalError::InsufficientSelection { .. }
            | PortalError::SlotOutOfRange { .. }
            | PortalError::UnknownCollege { .. } => ErrorCategory::UserInput,
            PortalError::Unauthorized { .. } => ErrorCategory::Authorization,
            PortalError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::UserInput => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Backend => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data | ErrorCategory::Authorization => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 網路層錯誤才值得使用者手動重試
    pub fn is_retryable(&self) -> bool {
        match self {
            PortalError::ApiError(e) => e.is_timeout() || e.is_connect(),
            PortalError::BackendError { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PortalError::ApiError(_) => "Network error. Please try again.".to_string(),
            PortalError::BackendError { message, .. } => message.clone(),
            PortalError::NotFound { resource } => format!("{} not found.", resource),
            PortalError::Unauthorized { .. } => {
                "Your admin session is missing or has expired.".to_string()
            }
            PortalError::InsufficientSelection { .. } => {
                "Please select at least 2 colleges to compare".to_string()
            }
            PortalError::ValidationError { message } => message.clone(),
            PortalError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            PortalError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            PortalError::MissingConfigError { field } => {
                format!("Configuration value '{}' is required", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PortalError::ApiError(_) => "Check that the backend is reachable and retry",
            PortalError::UrlError(_) => "Check the backend URL",
            PortalError::BackendError { .. } => "Retry later or inspect the backend logs",
            PortalError::NotFound { .. } => "Check the identifier and list the resources again",
            PortalError::Unauthorized { .. } => {
                "Provide a valid admin token via --admin-token or STUDY_PORTAL_ADMIN_TOKEN"
            }
            PortalError::InsufficientSelection { .. } => "Add more colleges before comparing",
            PortalError::SlotOutOfRange { .. } => "Use slot 0, 1 or 2",
            PortalError::UnknownCollege { .. } => "Run `colleges` to list valid college ids",
            PortalError::ValidationError { .. } => "Fix the highlighted input and submit again",
            PortalError::ConfigValidationError { .. }
            | PortalError::InvalidConfigValueError { .. }
            | PortalError::MissingConfigError { .. } => "Review the configuration file and flags",
            PortalError::CsvError(_) | PortalError::SerializationError(_) => {
                "The backend returned data in an unexpected shape"
            }
            PortalError::IoError(_) => "Check file permissions and disk space",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_errors_are_low_severity() {
        let err = PortalError::InsufficientSelection { selected: 1 };
        assert_eq!(err.category(), ErrorCategory::UserInput);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(
            err.user_friendly_message(),
            "Please select at least 2 colleges to compare"
        );
    }

    #[test]
    fn test_backend_error_surfaces_server_message() {
        let err = PortalError::BackendError {
            status: 422,
            message: "Phone number already registered".to_string(),
        };
        assert_eq!(err.user_friendly_message(), "Phone number already registered");
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(!err.is_retryable());

        let err = PortalError::BackendError {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert!(err.is_retryable());
    }

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = PortalError::MissingConfigError {
            field: "backend.base_url".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
    }
}
