//! Error types for billed-core
//!
//! Error codes, severities and suggestion-carrying details for everything
//! the bill adapter and the stores can fail with.

use thiserror::Error;
use serde::{Deserialize, Serialize};

use crate::store::StoreError;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Bill not found
    BillNotFound,
    /// Store call rejected or failed
    StoreError,
    /// Invalid data format
    InvalidFormat,
    /// Validation error
    ValidationError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::BillNotFound => write!(f, "BILL_NOT_FOUND"),
            ErrorCode::StoreError => write!(f, "STORE_ERROR"),
            ErrorCode::InvalidFormat => write!(f, "INVALID_FORMAT"),
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational
    Info,
    /// Warning - operation may be affected
    Warning,
    /// Error - operation failed
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Main error type for billed-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Bill not found: {id}")]
    BillNotFound { id: String },

    /// Store failures keep the store's own message, it is what the error page shows
    #[error(transparent)]
    Store(StoreError),

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

impl From<StoreError> for CoreError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound { id } => CoreError::BillNotFound { id },
            other => CoreError::Store(other),
        }
    }
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::BillNotFound { .. } => ErrorCode::BillNotFound,
            CoreError::Store(_) => ErrorCode::StoreError,
            CoreError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            CoreError::ValidationError { .. } => ErrorCode::ValidationError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::BillNotFound { .. } => ErrorSeverity::Info,
            CoreError::Store(_) => ErrorSeverity::Error,
            CoreError::InvalidFormat { .. } => ErrorSeverity::Warning,
            CoreError::ValidationError { .. } => ErrorSeverity::Warning,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::BillNotFound { id } => {
                details = details.with_detail(serde_json::json!({ "bill_id": id }));
                details = details.with_suggestion(
                    "Use the /api/bills endpoint to list all bills.".to_string()
                );
            }
            CoreError::Store(StoreError::Status { status }) => {
                details = details.with_detail(serde_json::json!({ "status": status }));
                if *status == 401 || *status == 403 {
                    details = details.with_suggestion(
                        "Check the store.token value in the configuration.".to_string()
                    );
                } else {
                    details = details.with_suggestion(
                        "The bill backend rejected the request, check its logs.".to_string()
                    );
                }
            }
            CoreError::Store(_) => {
                details = details.with_suggestion(
                    "Check that store.base_url points to a running backend.".to_string()
                );
            }
            CoreError::ValidationError { message } => {
                details = details.with_detail(serde_json::json!({ "validation_message": message }));
            }
            _ => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Connected user
    pub user: Option<String>,
    /// Operation being performed
    pub operation: String,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new(operation: &str) -> Self {
        Self {
            user: None,
            operation: operation.to_string(),
            data: serde_json::json!({}),
        }
    }

    /// Add the connected user
    pub fn with_user(mut self, user: &str) -> Self {
        self.user = Some(user.to_string());
        self
    }

    /// Add context data
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger {
    /// Log an error
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        let details = error.to_details();
        match error.severity() {
            ErrorSeverity::Info => log::info!(
                target: "billed::error",
                "{} - Operation: {} - User: {:?} - Data: {}",
                details, context.operation, context.user, context.data
            ),
            ErrorSeverity::Warning => log::warn!(
                target: "billed::error",
                "{} - Operation: {} - User: {:?} - Data: {}",
                details, context.operation, context.user, context.data
            ),
            ErrorSeverity::Error => log::error!(
                target: "billed::error",
                "{} - Operation: {} - User: {:?} - Data: {}",
                details, context.operation, context.user, context.data
            ),
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::BillNotFound.to_string(), "BILL_NOT_FOUND");
        assert_eq!(ErrorCode::StoreError.to_string(), "STORE_ERROR");
        assert_eq!(ErrorCode::InvalidFormat.to_string(), "INVALID_FORMAT");
    }

    #[test]
    fn test_store_error_keeps_message() {
        let error: CoreError = StoreError::Status { status: 500 }.into();
        assert_eq!(error.code(), ErrorCode::StoreError);
        assert_eq!(error.to_string(), "Erreur 500");
        assert_eq!(error.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_store_not_found_becomes_bill_not_found() {
        let error: CoreError = StoreError::NotFound { id: "abc".to_string() }.into();
        assert!(matches!(error, CoreError::BillNotFound { ref id } if id == "abc"));
        assert_eq!(error.severity(), ErrorSeverity::Info);
    }

    #[test]
    fn test_error_details_unauthorized() {
        let error: CoreError = StoreError::Status { status: 401 }.into();
        let details = error.to_details();
        assert_eq!(details.code, ErrorCode::StoreError);
        assert!(details.details.is_some());
        assert!(details.suggestions[0].contains("store.token"));
    }

    #[test]
    fn test_error_details_display() {
        let details = ErrorDetails::new(ErrorCode::ValidationError, "Validation failed".to_string())
            .with_detail(serde_json::json!({"field": "amount"}))
            .with_suggestion("Check the value".to_string());

        let rendered = details.to_string();
        assert!(rendered.starts_with("[VALIDATION_ERROR] Validation failed"));
        assert!(rendered.contains("Check the value"));
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("list_bills")
            .with_user("a@a")
            .with_data("bill_id", serde_json::json!("47qAXb6fIm2zOKkLzMro"));

        assert_eq!(context.operation, "list_bills");
        assert_eq!(context.user.as_deref(), Some("a@a"));
        assert_eq!(context.data["bill_id"], "47qAXb6fIm2zOKkLzMro");
    }
}
