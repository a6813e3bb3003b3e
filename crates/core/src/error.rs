//! Errors for configuration and local state
//!
//! Catalog failures belong to the engine; this type covers what the CLI reads
//! and writes on the local machine. Each error carries a stable [`ErrorCode`]
//! so the binary can pick an exit status and render a JSON report.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Stable error codes, grouped by thousands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Anything without a more specific code
    Internal = 1000,

    /// Filesystem failure
    Io = 2000,
    /// A required file is missing
    FileNotFound = 2001,
    /// The history file exists but is not a JSON string array
    HistoryCorrupt = 2002,

    /// Configuration could not be located
    Config = 3000,
    /// Configuration file is not valid TOML for the schema
    ConfigParse = 3001,
    /// A configuration value is out of range
    InvalidConfigValue = 3002,
}

impl ErrorCode {
    /// Numeric value
    #[must_use]
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Group name derived from the thousands digit
    #[must_use]
    pub fn category(self) -> &'static str {
        match self.code() / 1000 {
            2 => "IO",
            3 => "Configuration",
            _ => "General",
        }
    }

    /// Whether the user can fix this by editing configuration
    #[must_use]
    pub fn is_config(self) -> bool {
        self.code() / 1000 == 3
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Error with a code, optional context and an optional hint for the user
#[derive(Error, Debug)]
pub struct Error {
    /// Stable code
    pub code: ErrorCode,
    /// What went wrong
    pub message: String,
    /// What was being done when the error happened
    pub context: Option<String>,
    /// How the user might fix it
    pub suggestion: Option<String>,
    /// Underlying cause
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.context {
            Some(context) => write!(f, "{context}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl Error {
    /// Error with a code and message only
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Attach what was being done
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Attach a hint for the user
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach the underlying cause
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Configuration could not be located
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Config, message)
    }

    /// `field` holds an unusable value
    pub fn invalid_config(field: &str, reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InvalidConfigValue,
            format!("invalid value for {field}: {}", reason.into()),
        )
        .with_suggestion("Fix the value in .dictsearch.toml or pass --config with a valid file")
    }

    /// The history file at `path` could not be parsed
    pub fn history_corrupt(path: &Path, source: serde_json::Error) -> Self {
        Self::new(
            ErrorCode::HistoryCorrupt,
            format!("history file {} is not a JSON list of queries", path.display()),
        )
        .with_suggestion("Run `dictsearch history --clear` to start a fresh history")
        .with_source(source)
    }

    /// Serializable summary for `--format json`
    #[must_use]
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code.to_string(),
            category: self.code.category(),
            message: self.to_string(),
            suggestion: self.suggestion.clone(),
            source: self.source.as_ref().map(ToString::to_string),
        }
    }
}

/// JSON shape of an error
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    /// Code as `E####`
    pub code: String,
    /// Group name of the code
    pub category: &'static str,
    /// Message including context
    pub message: String,
    /// Hint for the user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Underlying cause
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit statuses used by the binary
pub mod exit_codes {
    /// Success, including searches that found nothing
    pub const SUCCESS: u8 = 0;
    /// Search or I/O failure
    pub const FAILURE: u8 = 1;
    /// Configuration missing or invalid
    pub const CONFIG_ERROR: u8 = 3;
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = if err.kind() == std::io::ErrorKind::NotFound {
            ErrorCode::FileNotFound
        } else {
            ErrorCode::Io
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorCode::Internal, format!("JSON error: {err}")).with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParse, err.message().to_string()).with_source(err)
    }
}

/// Attach context to a core [`Result`]
pub trait ResultExt<T> {
    /// Record what was being attempted
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_display_and_category() {
        assert_eq!(ErrorCode::HistoryCorrupt.to_string(), "E2002");
        assert_eq!(ErrorCode::InvalidConfigValue.category(), "Configuration");
        assert_eq!(ErrorCode::Io.category(), "IO");
        assert!(ErrorCode::ConfigParse.is_config());
        assert!(!ErrorCode::FileNotFound.is_config());
    }

    #[test]
    fn test_display_prefixes_context() {
        let err = Error::config("no such file").with_context("Loading nope.toml");
        assert_eq!(err.to_string(), "Loading nope.toml: no such file");
    }

    #[test]
    fn test_io_not_found_code() {
        let err = Error::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.code, ErrorCode::FileNotFound);
    }

    #[test]
    fn test_report_json() {
        let err = Error::invalid_config("search.batch_size", "must be at least 1");
        let json = serde_json::to_value(err.to_report()).unwrap();

        assert_eq!(json["code"], "E3002");
        assert_eq!(json["category"], "Configuration");
        assert!(json["message"].as_str().unwrap().contains("search.batch_size"));
        assert!(json["suggestion"].is_string());
        assert!(json.get("source").is_none());
    }
}
