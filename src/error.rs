// SPDX-License-Identifier: MIT

//! Client error types with HTTP status classification.

use std::collections::BTreeMap;

/// Field-keyed validation messages as returned by the API
/// (e.g. `{"username": ["A user with that username already exists."]}`).
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Key used by the API for errors not tied to a single field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Error type for all remote calls and client-side flows.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Permission denied")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Server error: HTTP {status}")]
    Server { status: u16, body: String },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Session expired, sign in again")]
    SessionExpired,

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Classify a non-success HTTP response into an error variant.
    ///
    /// 400 bodies are parsed as field-keyed validation maps; 403/404
    /// bodies usually carry a `detail` message. Anything else keeps the
    /// raw body for logging.
    pub fn from_status(status: u16, body: &str, context: &str) -> Self {
        match status {
            400 => ApiError::Validation(parse_field_errors(body)),
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound(detail_message(body).unwrap_or_else(|| context.to_string())),
            _ => ApiError::Server {
                status,
                body: body.to_string(),
            },
        }
    }

    /// Validation messages keyed by field, if this is a validation error.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// Whether the error should send the user back through sign-in.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ApiError::Unauthorized | ApiError::SessionExpired)
    }

    /// First human-readable message for display, preferring non-field errors.
    pub fn display_message(&self) -> String {
        if let ApiError::Validation(errors) = self {
            let first = errors
                .get(NON_FIELD_ERRORS)
                .and_then(|msgs| msgs.first())
                .or_else(|| errors.values().next().and_then(|msgs| msgs.first()));
            if let Some(message) = first {
                return message.clone();
            }
        }
        self.to_string()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Parse a 400 body into field-keyed messages.
///
/// The API returns either `{"field": ["msg", ...]}` or `{"field": "msg"}`;
/// both are normalized to message lists. Unparseable bodies become a
/// single non-field message.
fn parse_field_errors(body: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => {
            for (field, value) in map {
                let messages = match value {
                    serde_json::Value::Array(items) => items
                        .into_iter()
                        .filter_map(|item| item.as_str().map(str::to_string))
                        .collect(),
                    serde_json::Value::String(message) => vec![message],
                    other => vec![other.to_string()],
                };
                errors.insert(field, messages);
            }
        }
        _ => {
            errors.insert(NON_FIELD_ERRORS.to_string(), vec![body.to_string()]);
        }
    }

    errors
}

/// Extract the `detail` message from an error body, if present.
fn detail_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("detail")?
        .as_str()
        .map(str::to_string)
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ApiError>;
