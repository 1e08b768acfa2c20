use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Application-specific error types.
#[derive(Debug, Clone)]
pub enum AppError {
    /// Bad request error (invalid input).
    BadRequest(String),
    /// The requested appointment slot is already taken.
    SlotTaken(String),
    /// Error reading from or appending to the tabular store.
    StoreError(String),
    /// Error dispatching a notification email.
    NotifyError(String),
    /// Internal server error.
    InternalError(String),
    /// Error with context chain for better debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<AppError>,
        /// Additional context message.
        context: String,
    },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::SlotTaken(slot) => write!(f, "Time slot already booked: {}", slot),
            AppError::StoreError(msg) => write!(f, "Sheets store error: {}", msg),
            AppError::NotifyError(msg) => write!(f, "Email delivery error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            AppError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response.
    ///
    /// Maps each error variant to an appropriate HTTP status code and JSON body.
    /// `SlotTaken` keeps the wire shape the chatbot client expects
    /// (`error: "TIME_SLOT_TAKEN"`) so it can prompt for a different slot.
    fn into_response(self) -> Response {
        match &self {
            AppError::BadRequest(msg) => {
                let body = Json(json!({
                    "success": false,
                    "error": msg,
                }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            AppError::SlotTaken(slot) => {
                tracing::info!("Rejected double-booking for slot: {}", slot);
                let body = Json(json!({
                    "success": false,
                    "error": "TIME_SLOT_TAKEN",
                    "message": "Sorry, this time slot was just booked by someone else. Please select a different time.",
                }));
                (StatusCode::CONFLICT, body).into_response()
            }
            AppError::StoreError(msg) => {
                tracing::error!("Sheets store error: {}", msg);
                let body = Json(json!({
                    "success": false,
                    "error": "Tabular store unavailable",
                }));
                (StatusCode::BAD_GATEWAY, body).into_response()
            }
            AppError::NotifyError(msg) => {
                tracing::error!("Email delivery error: {}", msg);
                let body = Json(json!({
                    "success": false,
                    "error": "Notification delivery failed",
                }));
                (StatusCode::BAD_GATEWAY, body).into_response()
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                let body = Json(json!({
                    "success": false,
                    "error": "Internal server error",
                }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
            AppError::WithContext { source, context } => {
                // Log full context chain for debugging
                tracing::error!("Error with context: {} -> {}", context, source);
                // Delegate to underlying error's response
                source.clone().into_response()
            }
        }
    }
}

impl From<reqwest::Error> for AppError {
    /// Converts a `reqwest::Error` into an `AppError`.
    ///
    /// All outbound HTTP from this service targets the tabular store, so
    /// transport failures (including timeouts) map to `StoreError`, which the
    /// caller sees as a retryable 502.
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::StoreError(format!("Request timed out: {}", err))
        } else {
            AppError::StoreError(err.to_string())
        }
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `AppError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T, AppError>;

    /// Add context lazily (only evaluated on error).
    #[allow(dead_code)]
    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T, AppError> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: f(),
        })
    }
}
