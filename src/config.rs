//! Options controlling the checks.
//!
//! Options can be built in code or loaded from a YAML snippet:
//!
//! ```rust
//! use rusty_promql_fmt::CheckOptions;
//!
//! let options = CheckOptions::from_yaml_str("disable_line_length: true\n").unwrap();
//! assert!(options.disable_line_length);
//! assert_eq!(options.max_line_length, 80);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default threshold above which an expression should be split over lines
pub const DEFAULT_MAX_LINE_LENGTH: usize = 80;

/// Options for [`analyze`](crate::analyze)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckOptions {
    /// Skip the line-length test when deciding whether an expression should
    /// be multiline. The operator-count test still applies.
    pub disable_line_length: bool,

    /// Expressions longer than this (in bytes) should be multiline
    pub max_line_length: usize,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            disable_line_length: false,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }
}

impl CheckOptions {
    /// Load options from YAML. Missing fields take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let options: CheckOptions = serde_norway::from_str(yaml)?;
        options.validate()?;
        Ok(options)
    }

    /// Reject option values the checks cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.max_line_length == 0 {
            return Err(Error::InvalidOption {
                option: "max_line_length",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
