use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid input for '{field}': {message}")]
    ValidationError { field: String, message: String },

    #[error("Could not resolve '{query}': {message}")]
    LookupError { query: String, message: String },

    #[error("Configuration fault: {message}")]
    ConfigurationFault { message: String },

    #[error("Chart provider failed: {message}")]
    ProviderError { message: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

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
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    ExternalService,
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

impl EngineError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        EngineError::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn lookup(query: &str, message: impl Into<String>) -> Self {
        EngineError::LookupError {
            query: query.to_string(),
            message: message.into(),
        }
    }

    pub fn fault(message: impl Into<String>) -> Self {
        EngineError::ConfigurationFault {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EngineError::ValidationError { .. } => ErrorCategory::Input,
            EngineError::LookupError { .. }
            | EngineError::ProviderError { .. }
            | EngineError::ApiError(_) => ErrorCategory::ExternalService,
            EngineError::ConfigurationFault { .. }
            | EngineError::ConfigValidationError { .. }
            | EngineError::InvalidConfigValueError { .. }
            | EngineError::MissingConfigError { .. } => ErrorCategory::Configuration,
            EngineError::IoError(_) | EngineError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EngineError::ValidationError { .. } | EngineError::LookupError { .. } => {
                ErrorSeverity::High
            }
            // 外部服務暫時失敗，重試可能成功
            EngineError::ProviderError { .. } | EngineError::ApiError(_) => ErrorSeverity::Medium,
            EngineError::ConfigurationFault { .. } => ErrorSeverity::Critical,
            EngineError::ConfigValidationError { .. }
            | EngineError::InvalidConfigValueError { .. }
            | EngineError::MissingConfigError { .. } => ErrorSeverity::High,
            EngineError::IoError(_) | EngineError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EngineError::ValidationError { .. } => {
                "Check the birth data: date as YYYY-MM-DD, time as HH:MM, and a place name"
            }
            EngineError::LookupError { .. } => {
                "Try a more specific place name, e.g. include the country"
            }
            EngineError::ConfigurationFault { .. } => {
                "The arcana catalog or compatibility tables are damaged; reinstall or fix tables_path"
            }
            EngineError::ProviderError { .. } | EngineError::ApiError(_) => {
                "Check that the chart/geocoding endpoints are reachable and retry"
            }
            EngineError::ConfigValidationError { .. }
            | EngineError::InvalidConfigValueError { .. }
            | EngineError::MissingConfigError { .. } => "Review the TOML configuration file",
            EngineError::IoError(_) | EngineError::SerializationError(_) => {
                "Check file permissions and disk space"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EngineError::ValidationError { field, message } => {
                format!("The field '{}' is not usable: {}", field, message)
            }
            EngineError::LookupError { query, .. } => {
                format!("We could not find the place '{}'", query)
            }
            EngineError::ConfigurationFault { .. } => {
                "Internal error: the engine's reference data is inconsistent".to_string()
            }
            EngineError::ProviderError { .. } | EngineError::ApiError(_) => {
                "An external service did not answer correctly".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_fault_is_critical() {
        let err = EngineError::fault("arcana id 7 missing");
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.to_string().contains("arcana id 7 missing"));
    }

    #[test]
    fn test_validation_error_names_field() {
        let err = EngineError::validation("birth_time", "required for a full profile");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert!(err.user_friendly_message().contains("birth_time"));
    }
}
