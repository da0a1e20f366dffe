//! Grammar fragments of PromQL.
//!
//! The analyzer works on raw expression text, so this module does not parse
//! whole expressions. It recognizes the pieces the style checks care about
//! and leaves everything else as text.
//!
//! # Submodules
//!
//! - [`aggregation`] - Aggregation grouping clauses (`by`, `without`) and their placement
//! - [`binary`] - Binary operators and top-level operator splitting
//! - [`selector`] - Vector selectors and label matchers
//!
//! # Example
//!
//! ```rust
//! use rusty_promql_fmt::parser::{aggregation::extract_trailing, binary::split_first};
//!
//! let (_, left, right) = split_first("sum(a) by (job) / sum(b) by (job)").unwrap();
//! assert_eq!(extract_trailing(left), extract_trailing(right));
//! ```

pub mod aggregation;
pub mod binary;
pub mod selector;
