//! Error handling module for the office locations service.
//!
//! Server errors map to HTTP status codes and the `{code, message}` envelope.
//! Client errors classify failed calls into one contract shared by every
//! office operation.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::{messages, Envelope};

/// Server-side error type.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Request addressed something the server cannot act on
    InvalidRequest(String),
    /// Payload failed validation or could not be parsed
    Validation(String),
    /// Internal server error
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> &str {
        match self {
            AppError::NotFound(msg)
            | AppError::InvalidRequest(msg)
            | AppError::Validation(msg)
            | AppError::Internal(msg) => msg,
        }
    }

    /// The `400 Invalid request.` answer for an update of an unknown id.
    pub fn invalid_request() -> Self {
        AppError::InvalidRequest(messages::INVALID_REQUEST.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status_code().as_u16(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected office payload: {}", rejection.body_text());
        AppError::Validation(format!("Invalid payload: {}", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body: Envelope<()> = Envelope::new(status.as_u16(), self.message(), None);
        (status, Json(body)).into_response()
    }
}

/// Which office operation a client call was performing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fetch,
    Add,
    Update,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Fetch => "fetch",
            Action::Add => "add",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

/// Client-side error returned by every `ApiClient` operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The addressed office does not exist
    NotFound { id: Option<String> },
    /// The server refused the operation
    Forbidden { action: Action },
    /// The payload was rejected
    Validation(String),
    /// Anything else, including transport failures with no response
    Failed { action: Action, message: String },
}

impl ClientError {
    /// Classify a non-success status.
    ///
    /// `id` is the office the call addressed; a `400` on an id-addressed call
    /// is how the server reports an unknown id.
    pub fn from_status(action: Action, status: u16, id: Option<&str>, message: &str) -> Self {
        match (status, id) {
            (404, _) | (400, Some(_)) => ClientError::NotFound {
                id: id.map(str::to_string),
            },
            (403, _) => ClientError::Forbidden { action },
            (400, None) | (422, _) => ClientError::Validation(message.to_string()),
            _ => ClientError::Failed {
                action,
                message: format!("{} (status {})", message, status),
            },
        }
    }

    /// A call that produced no usable response.
    pub fn transport(action: Action, message: impl std::fmt::Display) -> Self {
        ClientError::Failed {
            action,
            message: message.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::NotFound { id: Some(id) } => write!(f, "Office with ID {} not found.", id),
            ClientError::NotFound { id: None } => write!(f, "Office not found."),
            ClientError::Forbidden { action } => write!(
                f,
                "You are not authorized to {} this office.",
                action.as_str()
            ),
            ClientError::Validation(msg) => write!(f, "Invalid office payload: {}", msg),
            ClientError::Failed { action, message } => {
                write!(f, "Failed to {} office: {}", action.as_str(), message)
            }
        }
    }
}

impl std::error::Error for ClientError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(AppError::invalid_request().status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Validation("x".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(AppError::invalid_request().message(), "Invalid request.");
    }

    #[test]
    fn test_update_classification_messages() {
        let not_found = ClientError::from_status(Action::Update, 404, Some("42"), "gone");
        assert_eq!(not_found.to_string(), "Office with ID 42 not found.");

        let forbidden = ClientError::from_status(Action::Update, 403, Some("42"), "no");
        assert_eq!(
            forbidden.to_string(),
            "You are not authorized to update this office."
        );

        let failed = ClientError::from_status(Action::Update, 500, Some("42"), "boom");
        assert_eq!(
            failed.to_string(),
            "Failed to update office: boom (status 500)"
        );
    }

    #[test]
    fn test_bad_request_on_id_means_not_found() {
        let err = ClientError::from_status(Action::Update, 400, Some("abc"), "Invalid request.");
        assert!(err.is_not_found());

        let err = ClientError::from_status(Action::Add, 400, None, "Invalid request.");
        assert_eq!(err, ClientError::Validation("Invalid request.".to_string()));
    }

    #[test]
    fn test_classification_is_uniform_across_actions() {
        for action in [Action::Add, Action::Update, Action::Delete] {
            assert!(matches!(
                ClientError::from_status(action, 403, None, ""),
                ClientError::Forbidden { .. }
            ));
            assert!(matches!(
                ClientError::from_status(action, 422, None, "bad"),
                ClientError::Validation(_)
            ));
            assert!(ClientError::from_status(action, 404, None, "").is_not_found());
        }
    }

    #[test]
    fn test_transport_failure_is_generic() {
        let err = ClientError::transport(Action::Delete, "connection refused");
        assert_eq!(
            err.to_string(),
            "Failed to delete office: connection refused"
        );
    }
}
