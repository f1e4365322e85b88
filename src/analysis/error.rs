//! Error types for the analysis client and lifecycle controller

use serde::Serialize;
use thiserror::Error;

/// Result type for analysis operations
pub type ApiResult<T> = Result<T, AnalysisError>;

/// Status code used when no HTTP response reached the client
pub const STATUS_NO_RESPONSE: u16 = 0;
/// Status code reported for caller-side validation failures and bad requests
pub const STATUS_BAD_REQUEST: u16 = 400;
/// Status code reported when an analysis is already running on a controller
pub const STATUS_CONFLICT: u16 = 409;
/// Status code reported for client-enforced timeouts
pub const STATUS_TIMEOUT: u16 = 408;
/// Status code reported by the service for internal errors
pub const STATUS_SERVER_ERROR: u16 = 500;

/// Broad origin of an [`AnalysisError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Input rejected before any network call
    Validation,
    /// The service answered with a non-success status
    Http,
    /// No response arrived within the configured bound
    Timeout,
    /// DNS, connection or other transport failure
    Transport,
    /// A success response whose body could not be decoded
    MalformedResponse,
    /// The controller already has an analysis in flight
    Busy,
}

/// Uniform failure shape for every analysis operation.
///
/// `status_code` is the HTTP status when one was received, `0` for transport
/// failures, and a synthetic code (400, 408, 409) for failures the client
/// raises itself.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("{message}")]
pub struct AnalysisError {
    pub kind: ErrorKind,
    pub status_code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl AnalysisError {
    /// Create an error with no attached payload
    pub fn new(kind: ErrorKind, status_code: u16, message: impl Into<String>) -> Self {
        Self {
            kind,
            status_code,
            message: message.into(),
            data: None,
        }
    }

    /// Create a caller-side validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, STATUS_BAD_REQUEST, message)
    }

    /// Create an error for a non-success HTTP response
    pub fn http(status_code: u16, reason: &str, data: serde_json::Value) -> Self {
        Self {
            kind: ErrorKind::Http,
            status_code,
            message: format!("HTTP {}: {}", status_code, reason),
            data: Some(data),
        }
    }

    /// Create the client timeout error
    pub fn timeout() -> Self {
        Self::new(ErrorKind::Timeout, STATUS_TIMEOUT, "Request timeout")
    }

    /// Create a transport error (no HTTP response)
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, STATUS_NO_RESPONSE, message)
    }

    /// Create an error for a success response with an undecodable body
    pub fn malformed_response(status_code: u16, details: impl std::fmt::Display, body: String) -> Self {
        Self {
            kind: ErrorKind::MalformedResponse,
            status_code,
            message: format!("Malformed response: {}", details),
            data: Some(serde_json::Value::String(body)),
        }
    }

    /// Create the error returned when an analysis is already running
    pub fn busy() -> Self {
        Self::new(
            ErrorKind::Busy,
            STATUS_CONFLICT,
            "An analysis is already in progress",
        )
    }

    /// Replace the message, keeping kind, status code and payload
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Whether a response from the service was received at all
    pub fn has_response(&self) -> bool {
        matches!(self.kind, ErrorKind::Http | ErrorKind::MalformedResponse)
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AnalysisError::timeout()
        } else {
            AnalysisError::transport(err.to_string())
        }
    }
}

/// User-facing category of an [`AnalysisError`], keyed by status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Status 0: the service could not be reached
    Connection,
    /// Status 408: the request timed out
    Timeout,
    /// Status 500: the service failed internally
    Server,
    /// Status 400: the input was rejected
    InvalidInput,
    /// Any other status; the original message is kept
    Other { status_code: u16, message: String },
}

impl ErrorCategory {
    /// Classify an error by its status code
    pub fn classify(error: &AnalysisError) -> Self {
        match error.status_code {
            STATUS_NO_RESPONSE => ErrorCategory::Connection,
            STATUS_TIMEOUT => ErrorCategory::Timeout,
            STATUS_SERVER_ERROR => ErrorCategory::Server,
            STATUS_BAD_REQUEST => ErrorCategory::InvalidInput,
            status_code => ErrorCategory::Other {
                status_code,
                message: error.message.clone(),
            },
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ErrorCategory::Connection => STATUS_NO_RESPONSE,
            ErrorCategory::Timeout => STATUS_TIMEOUT,
            ErrorCategory::Server => STATUS_SERVER_ERROR,
            ErrorCategory::InvalidInput => STATUS_BAD_REQUEST,
            ErrorCategory::Other { status_code, .. } => *status_code,
        }
    }

    /// Message shown to the user for this category
    pub fn user_message(&self) -> &str {
        match self {
            ErrorCategory::Connection => {
                "Unable to connect to the server. Please check your connection."
            }
            ErrorCategory::Timeout => "Request timed out. Please try again.",
            ErrorCategory::Server => "Server error. Please try again later.",
            ErrorCategory::InvalidInput => "Invalid input. Please check your text and try again.",
            ErrorCategory::Other { message, .. } => message.as_str(),
        }
    }

    /// Rewrite an error's message for display, preserving its status code
    pub fn remap(error: AnalysisError) -> AnalysisError {
        let category = Self::classify(&error);
        let message = category.user_message().to_string();
        error.with_message(message)
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Connection => write!(f, "Connection"),
            ErrorCategory::Timeout => write!(f, "Timeout"),
            ErrorCategory::Server => write!(f, "Server"),
            ErrorCategory::InvalidInput => write!(f, "InvalidInput"),
            ErrorCategory::Other { status_code, .. } => write!(f, "Other({})", status_code),
        }
    }
}
