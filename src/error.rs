//! Error types for the ambient layer (options and rule-file loading).
//!
//! The analysis itself never fails: anything it cannot make sense of simply
//! produces no issue.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading options or rule files
#[derive(Error, Debug)]
pub enum Error {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_norway::Error),

    #[error("Invalid option '{option}': {reason}")]
    InvalidOption {
        option: &'static str,
        reason: String,
    },
}
