use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigError { field: String, message: String },

    #[error("{message}")]
    ValidationError { message: String },

    #[error("{kind} '{name}' not found")]
    NotFoundError { kind: String, name: String },

    #[error("Invalid state: {message}")]
    InvalidStateError { message: String },

    #[error("Operation not supported: {operation}")]
    UnsupportedError { operation: String },

    #[error("Gateway error: {message}")]
    GatewayError { message: String },
}

impl LabError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn not_found(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFoundError {
            kind: kind.into(),
            name: name.into(),
        }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidStateError {
            message: message.into(),
        }
    }

    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::UnsupportedError {
            operation: operation.into(),
        }
    }

    pub fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }

    /// Short message meant for the terminal, without the variant prefix.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { message } => format!("Invalid input: {}", message),
            Self::ConfigError { field, message } => {
                format!("Check the configuration value '{}': {}", field, message)
            }
            Self::NotFoundError { kind, name } => format!("No {} named '{}'", kind, name),
            Self::UnsupportedError { operation } => {
                format!("This setup does not support {}", operation)
            }
            Self::HttpError(_) | Self::GatewayError { .. } => {
                "An external service could not be reached".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LabError>;
