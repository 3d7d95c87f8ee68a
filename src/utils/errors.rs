use serde_json::{json, Value};
use thiserror::Error;

/// Main error type for the stack client
#[derive(Error, Debug)]
pub enum StackError {
    /// The server answered with a non-success status
    #[error("request failed with status {status}")]
    Http { status: u16, body: Value },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("A login is already in progress")]
    LoginInProgress,

    #[error("UI error: {0}")]
    Ui(String),
}

impl From<reqwest::Error> for StackError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StackError::Decode(err.to_string())
        } else {
            StackError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for StackError {
    fn from(err: serde_json::Error) -> Self {
        StackError::Decode(err.to_string())
    }
}

impl StackError {
    /// Project the error into the loose JSON shape understood by
    /// [`extract_error_message`]. HTTP failures carry the response body under
    /// `response.data`.
    pub fn to_error_value(&self) -> Value {
        match self {
            StackError::Http { status, body } => json!({
                "response": { "status": status, "data": body },
                "message": self.to_string(),
            }),
            other => json!({ "message": other.to_string() }),
        }
    }

    /// Human readable message suitable for the snackbar
    pub fn user_message(&self) -> String {
        extract_error_message(&self.to_error_value())
    }
}

/// Best-effort human readable message from an error value of unknown shape.
///
/// Resolution order:
/// 1. `response.data.message` or `response.data.error`
/// 2. the raw `response.data`
/// 3. a top-level `error`
/// 4. a top-level `message`
/// 5. the JSON encoding of the whole value
///
/// Nulls and empty strings count as absent.
pub fn extract_error_message(error: &Value) -> String {
    let data = error
        .get("response")
        .and_then(|response| response.get("data"))
        .filter(|data| is_present(data));

    if let Some(data) = data {
        if let Some(message) = field_text(data, "message").or_else(|| field_text(data, "error")) {
            return message;
        }
        return value_text(data);
    }

    if let Some(message) = field_text(error, "error") {
        return message;
    }
    if let Some(message) = field_text(error, "message") {
        return message;
    }

    error.to_string()
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

fn field_text(value: &Value, key: &str) -> Option<String> {
    value.get(key).filter(|v| is_present(v)).map(value_text)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
