//! Error types for backend calls

use serde::Deserialize;

/// PostgREST code for "single object requested, zero rows returned".
pub const POSTGREST_NO_ROWS: &str = "PGRST116";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request failed with status {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Not found")]
    NotFound,

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BackendError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::NotFound)
    }

    /// Text suitable for showing in a form banner.
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Auth(msg) => msg.clone(),
            BackendError::Network(_) => {
                "Unable to reach SwiftFyx. Check your connection and try again.".to_string()
            }
            BackendError::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BackendError>;

/// Which backend service produced a failed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Auth,
    Rest,
}

/// Error body returned by GoTrue or PostgREST.
///
/// GoTrue has used several shapes over time (`error_description`, `msg`,
/// `message`), PostgREST always sends `code`/`message`/`details`/`hint`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub code: Option<serde_json::Value>,
    pub error: Option<String>,
    pub error_description: Option<String>,
    pub msg: Option<String>,
    pub message: Option<String>,
    pub details: Option<String>,
    pub hint: Option<String>,
}

impl ErrorBody {
    /// Parse a response body, falling back to an empty body for non-JSON text.
    pub fn parse(text: &str) -> Self {
        serde_json::from_str(text).unwrap_or_default()
    }

    fn code_str(&self) -> Option<&str> {
        self.code.as_ref().and_then(|code| code.as_str())
    }

    fn message(&self) -> Option<String> {
        [
            &self.error_description,
            &self.msg,
            &self.message,
            &self.error,
        ]
        .into_iter()
        .flatten()
        .find(|m| !m.trim().is_empty())
        .cloned()
    }

    /// PostgREST `details` and `hint`, for logs.
    fn context(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.details, &self.hint]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join("; "))
    }

    pub fn into_error(self, status: u16, service: Service) -> BackendError {
        if self.code_str() == Some(POSTGREST_NO_ROWS) {
            return BackendError::NotFound;
        }

        let message = self
            .message()
            .unwrap_or_else(|| format!("Request failed with status {}", status));

        match (service, status) {
            (Service::Auth, 400 | 401 | 403 | 422 | 429) => BackendError::Auth(message),
            (Service::Rest, 404) => BackendError::NotFound,
            (Service::Rest, _) => BackendError::Http {
                status,
                message: match self.context() {
                    Some(context) => format!("{} ({})", message, context),
                    None => message,
                },
            },
            (Service::Auth, _) => BackendError::Http { status, message },
        }
    }
}
