//! Error handling for the envdash-rs application
//!
//! This module defines custom error types and a Result alias for use
//! throughout the application.

use thiserror::Error;

/// Reason a sensor payload could not be decoded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The payload was empty or whitespace only
    #[error("empty payload")]
    Empty,
    /// The payload did not contain 3 or 4 fields
    #[error("expected 3 or 4 fields, found {found}")]
    FieldCount { found: usize },
    /// A field could not be converted to a finite number
    #[error("field {index} is not a number: {field:?}")]
    NotANumber { index: usize, field: String },
}

/// Main error type for envdash-rs operations
#[derive(Error, Debug)]
pub enum DashError {
    /// A sensor payload was malformed
    #[error("Parse error: {kind} (payload {payload:?})")]
    Parse {
        payload: String,
        kind: ParseErrorKind,
    },

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors related to the single-instance lock marker
    #[error("Lock error: {0}")]
    Lock(String),

    /// The rendering surface could not be initialized
    #[error("Render error: {0}")]
    Render(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<DashError>,
    },
}

impl DashError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        DashError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create a parse error for a payload
    pub fn parse(payload: impl Into<String>, kind: ParseErrorKind) -> Self {
        DashError::Parse {
            payload: payload.into(),
            kind,
        }
    }
}

impl From<serde_json::Error> for DashError {
    fn from(err: serde_json::Error) -> Self {
        DashError::Serialization(err.to_string())
    }
}

/// Result type alias for envdash-rs operations
pub type Result<T> = std::result::Result<T, DashError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| DashError::Io(e).with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| DashError::Io(e).with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = DashError::parse(
            "abc,1,2",
            ParseErrorKind::NotANumber {
                index: 0,
                field: "abc".to_string(),
            },
        );
        let text = err.to_string();
        assert!(text.contains("field 0"));
        assert!(text.contains("abc,1,2"));
    }

    #[test]
    fn test_error_with_context() {
        let err = DashError::Config("bad value".to_string());
        let with_ctx = err.with_context("Failed to load config");
        assert!(with_ctx.to_string().contains("Failed to load config"));
        assert!(std::error::Error::source(&with_ctx).is_some());
    }

    #[test]
    fn test_parse_error_kind_messages() {
        assert_eq!(ParseErrorKind::Empty.to_string(), "empty payload");
        assert_eq!(
            ParseErrorKind::FieldCount { found: 5 }.to_string(),
            "expected 3 or 4 fields, found 5"
        );
        assert_eq!(
            ParseErrorKind::NotANumber {
                index: 2,
                field: "x".to_string()
            }
            .to_string(),
            "field 2 is not a number: \"x\""
        );
    }

    #[test]
    fn test_io_context() {
        let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = res.context("reading source").unwrap_err();
        assert!(err.to_string().starts_with("reading source"));
    }
}
