use thiserror::Error;

#[derive(Error, Debug)]
pub enum FloorPlanError {
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV rendering error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Request,
    Configuration,
    Output,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FloorPlanError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidRequest { .. } | Self::SerializationError(_) => ErrorCategory::Request,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } | Self::TomlError(_) => {
                ErrorCategory::Configuration
            }
            Self::CsvError(_) => ErrorCategory::Output,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Request | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息 (不含內部細節)
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidRequest { message } => message.clone(),
            Self::SerializationError(e) => format!("Request body is not valid JSON: {}", e),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::TomlError(_) => "Allocator configuration file is not valid TOML".to_string(),
            Self::CsvError(_) => "Failed to render the layout as CSV".to_string(),
            Self::IoError(e) => format!("File access failed: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidRequest { .. } => {
                "Check that width and length are positive, the lot is larger than its setbacks, and at least one room is requested"
            }
            Self::SerializationError(_) => {
                "Send an object shaped like {\"dimensions\": {\"width\": 10, \"length\": 10}, \"rooms\": {\"bedrooms\": 2}}"
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } | Self::TomlError(_) => {
                "Fix the allocator TOML file or remove --config to use the built-in defaults"
            }
            Self::CsvError(_) => "Retry with --format json",
            Self::IoError(_) => "Make sure the request file exists and the output directory is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, FloorPlanError>;
