use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading configuration or running hooks
///
/// Hooks and point logic return `TapError` themselves; the middleware
/// never wraps or swallows them, so a failing hook aborts the rest of
/// that dispatch.
#[derive(Debug, Error)]
pub enum TapError {
    /// Configuration text is not valid JSON
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configuration file could not be read
    #[error("Failed to read configuration from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Strict schema validation failed
    #[error("Validation error: {message}{}", format_errors(.errors))]
    Validation { message: String, errors: Vec<String> },

    /// Error raised by a hook or point logic
    #[error("{message}")]
    Custom { message: String },
}

impl TapError {
    /// Create a Custom error
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom {
            message: message.into(),
        }
    }

    /// Create a Validation error
    pub fn validation(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self::Validation {
            message: message.into(),
            errors,
        }
    }
}

fn format_errors(errors: &[String]) -> String {
    errors.iter().map(|error| format!("\n    - {}", error)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom() {
        let err = TapError::custom("analytics endpoint rejected event");
        assert_eq!(err.to_string(), "analytics endpoint rejected event");
    }

    #[test]
    fn test_validation() {
        let err = TapError::validation(
            "Invalid configuration",
            vec!["\"points\" is not of type \"array\"".to_string()],
        );
        let display = err.to_string();
        assert!(display.starts_with("Validation error: Invalid configuration"));
        assert!(display.contains("- \"points\" is not of type \"array\""));
    }

    #[test]
    fn test_parse_from_serde() {
        let err: TapError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(err.to_string().starts_with("Failed to parse configuration"));
    }
}
