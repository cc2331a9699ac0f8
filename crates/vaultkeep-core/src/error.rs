//! Error types and exit codes for vaultkeep
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args)
//! - 3: Data/vault error (missing vault, invalid frontmatter, etc.)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes reported by the vaultkeep binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2); emitted by the argument parser
    /// itself, no error variant maps here
    Usage = 2,
    /// Data/vault error - missing vault, invalid frontmatter (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during vaultkeep operations
#[derive(Error, Debug)]
pub enum VaultkeepError {
    // Data/vault errors (exit code 3)
    #[error("vault not found: {path:?} is not a directory")]
    VaultNotFound { path: PathBuf },

    #[error("invalid frontmatter in {path:?}: {reason}")]
    InvalidFrontmatter { path: PathBuf, reason: String },

    #[error("{context} already exists: {value}")]
    AlreadyExists { context: String, value: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation}: {reason}")]
    FailedOperation { operation: String, reason: String },

    #[error("{0}")]
    Other(String),
}

impl VaultkeepError {
    /// Create an error for a failed operation
    pub fn failed_operation(operation: &str, error: impl std::fmt::Display) -> Self {
        VaultkeepError::FailedOperation {
            operation: operation.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an entity that already exists
    pub fn already_exists(context: &str, value: impl std::fmt::Display) -> Self {
        VaultkeepError::AlreadyExists {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            VaultkeepError::VaultNotFound { .. }
            | VaultkeepError::InvalidFrontmatter { .. }
            | VaultkeepError::AlreadyExists { .. } => ExitCode::Data,

            VaultkeepError::Io(_)
            | VaultkeepError::Yaml(_)
            | VaultkeepError::Json(_)
            | VaultkeepError::Toml(_)
            | VaultkeepError::FailedOperation { .. }
            | VaultkeepError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier used in structured output
    fn error_type(&self) -> &'static str {
        match self {
            VaultkeepError::VaultNotFound { .. } => "vault_not_found",
            VaultkeepError::InvalidFrontmatter { .. } => "invalid_frontmatter",
            VaultkeepError::AlreadyExists { .. } => "already_exists",
            VaultkeepError::Io(_) => "io_error",
            VaultkeepError::Yaml(_) => "yaml_error",
            VaultkeepError::Json(_) => "json_error",
            VaultkeepError::Toml(_) => "toml_error",
            VaultkeepError::FailedOperation { .. } => "failed_operation",
            VaultkeepError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": i32::from(self.exit_code()),
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for vaultkeep operations
pub type Result<T> = std::result::Result<T, VaultkeepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            VaultkeepError::VaultNotFound {
                path: PathBuf::from("/missing")
            }
            .exit_code(),
            ExitCode::Data
        );
        assert_eq!(
            VaultkeepError::already_exists("destination", "Archive/x.md").exit_code(),
            ExitCode::Data
        );
        assert_eq!(
            VaultkeepError::Other("boom".into()).exit_code(),
            ExitCode::Failure
        );
        assert_eq!(i32::from(ExitCode::Usage), 2);
    }

    #[test]
    fn test_error_to_json() {
        let err = VaultkeepError::VaultNotFound {
            path: PathBuf::from("/missing"),
        };
        let json = err.to_json();
        assert_eq!(json["error"]["code"], 3);
        assert_eq!(json["error"]["type"], "vault_not_found");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("/missing"));
    }
}
