use thiserror::Error;
use tracing::error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ProximityError {
    #[error("Wrong type for parameter \"{parameter}\" of {label}: Expected {expected}, but got {actual}.")]
    ArgumentType {
        label: String,
        parameter: String,
        expected: String,
        actual: String,
    },

    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Proximity sensor unavailable")]
    SensorUnavailable,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, ProximityError>;

/// Errors delivered to a bridge error callback
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("No plugin registered for service: {0}")]
    ClassNotFound(String),

    #[error("Action {action} not supported by service {service}")]
    InvalidAction { service: String, action: String },

    #[error("Plugin error: {0}")]
    Plugin(String),
}

impl From<ProximityError> for BridgeError {
    fn from(err: ProximityError) -> Self {
        BridgeError::Plugin(err.to_string())
    }
}

/// Context for error logging
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    pub request_id: Option<Uuid>,
    pub service: Option<String>,
    pub action: Option<String>,
    pub additional_info: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_info(mut self, info: String) -> Self {
        self.additional_info = Some(info);
        self
    }
}

impl ProximityError {
    /// Log error with structured context
    pub fn log_with_context(&self, context: &ErrorContext) {
        error!(
            error = %self,
            category = %self.category(),
            request_id = ?context.request_id,
            service = ?context.service,
            action = ?context.action,
            additional_info = ?context.additional_info,
            timestamp = %chrono::Utc::now(),
            "Proximity error occurred"
        );
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ProximityError::ArgumentType { label, expected, .. } => {
                format!("{} was called incorrectly: it expects a {} argument.", label, expected)
            }
            ProximityError::UnknownMethod(method) => {
                format!("'{}' is not part of the proximity API.", method)
            }
            ProximityError::InvalidAction(action) => {
                format!("The proximity sensor does not support the '{}' action.", action)
            }
            ProximityError::SensorUnavailable => {
                "This device has no proximity sensor.".to_string()
            }
            ProximityError::Internal(details) => {
                format!("An internal error occurred: {}. Please try again or contact support.", details)
            }
        }
    }

    /// Get error category for monitoring
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProximityError::ArgumentType { .. } => ErrorCategory::Validation,
            ProximityError::UnknownMethod(_) => ErrorCategory::Validation,
            ProximityError::InvalidAction(_) => ErrorCategory::Validation,
            ProximityError::SensorUnavailable => ErrorCategory::Hardware,
            ProximityError::Internal(_) => ErrorCategory::Internal,
        }
    }
}

/// Error categories for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Hardware,
    Internal,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Validation => write!(f, "validation"),
            ErrorCategory::Hardware => write!(f, "hardware"),
            ErrorCategory::Internal => write!(f, "internal"),
        }
    }
}
