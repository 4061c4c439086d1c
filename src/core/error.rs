use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Login rejected or an operation attempted without a session.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The service answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    /// HTTP 401 from any operation. The stored session is no longer valid.
    #[error("Session expired (HTTP 401): {0}")]
    AuthExpired(String),

    /// The request was sent but no response came back.
    #[error("No response from the server. Check that the signalement API is running and that it accepts requests from this client (CORS)")]
    Network,

    /// The request could not be built or sent at all.
    #[error("Request failed: {0}")]
    Request(String),

    /// A client-side form constraint was violated; no request was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The session file could not be written or removed.
    #[error("Session storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Classify a non-2xx response. 401 is the session-expiry signal and
    /// gets its own variant so callers can react by logging out instead of
    /// showing a generic error banner.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = response_message(body);
        if status == 401 {
            AppError::AuthExpired(message)
        } else {
            AppError::Server { status, message }
        }
    }

    /// Classify a transport-level reqwest failure: no response at all vs. a
    /// request that could not even be sent.
    pub fn from_reqwest(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            tracing::error!("No response from API: {error}");
            AppError::Network
        } else {
            AppError::Request(error.to_string())
        }
    }

    pub fn from_validation(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Extract a human-readable message from an error response body: the JSON
/// `detail` field, then `message`, then the raw serialized body.
pub fn response_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::String(text)) => text,
        Ok(value) => match value.get("detail").or_else(|| value.get("message")) {
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
            None => value.to_string(),
        },
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_message_prefers_detail() {
        let body = r#"{"detail": "Signalement non trouvé", "message": "other"}"#;
        assert_eq!(response_message(body), "Signalement non trouvé");
    }

    #[test]
    fn test_response_message_falls_back_to_message() {
        let body = r#"{"message": "Email already registered"}"#;
        assert_eq!(response_message(body), "Email already registered");
    }

    #[test]
    fn test_response_message_raw_body_fallback() {
        assert_eq!(response_message("plain text error"), "plain text error");
        assert_eq!(response_message(r#"{"code": 42}"#), r#"{"code":42}"#);
    }

    #[test]
    fn test_response_message_non_string_detail() {
        // FastAPI validation errors put an array under `detail`
        let body = r#"{"detail": [{"loc": ["body", "titre"], "msg": "field required"}]}"#;
        assert!(response_message(body).contains("field required"));
    }

    #[test]
    fn test_from_status_classifies_401_as_expired() {
        let error = AppError::from_status(401, r#"{"detail": "Could not validate credentials"}"#);
        assert!(matches!(error, AppError::AuthExpired(_)));
    }

    #[test]
    fn test_from_status_other_statuses_are_server_errors() {
        let error = AppError::from_status(404, r#"{"detail": "Signalement non trouvé"}"#);
        match error {
            AppError::Server { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Signalement non trouvé");
            }
            other => panic!("expected Server error, got {other:?}"),
        }
    }
}
