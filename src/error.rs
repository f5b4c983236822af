//! Error taxonomy for the explorer core

use thiserror::Error;

/// Failure while reading a templated query string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A `key=value` pair with nothing before the `=`
    #[error("empty parameter name in segment `{0}`")]
    EmptyKey(String),

    /// Percent-decoding produced bytes that are not UTF-8
    #[error("invalid percent-encoding in `{0}`")]
    InvalidEncoding(String),
}

/// Every failure the explorer can produce.
///
/// Only `Validation`, `Transport` and `Application` ever reach the user;
/// `SettingsLoad` and `Parse` are recovered where they happen.
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// The settings document could not be fetched or parsed
    #[error("failed to load settings: {0}")]
    SettingsLoad(String),

    /// One or more required parameters are empty
    #[error("Please fill in all required parameters: {}", .missing.join(", "))]
    Validation { missing: Vec<String> },

    /// Non-2xx status or a failure below HTTP
    #[error("{}", transport_message(.status, .message))]
    Transport { status: Option<u16>, message: String },

    /// 2xx response whose JSON payload carries an `error` field
    #[error("API Error: {0}")]
    Application(String),

    /// Malformed query template
    #[error("malformed query: {0}")]
    Parse(#[from] QueryError),
}

fn transport_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("HTTP {}: {}", code, message),
        None => message.to_string(),
    }
}

impl ExplorerError {
    /// HTTP status attached to the failure, if any
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ExplorerError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

pub type ExplorerResult<T> = Result<T, ExplorerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_message_includes_status() {
        let err = ExplorerError::Transport {
            status: Some(404),
            message: "Not Found".into(),
        };
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
        assert_eq!(err.http_status(), Some(404));
    }

    #[test]
    fn test_validation_lists_missing_fields() {
        let err = ExplorerError::Validation {
            missing: vec!["url".into(), "apikey".into()],
        };
        assert_eq!(
            err.to_string(),
            "Please fill in all required parameters: url, apikey"
        );
    }
}
