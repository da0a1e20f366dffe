//! Structural analysis of a single expression.
//!
//! - [`extract`] - Metric names, selectors, matcher labels and rate calls
//! - [`redundancy`] - Redundant and misplaced grouping clauses across binary operands
//! - [`style`] - Prefix/postfix clause placement and the per-document tally

pub mod extract;
pub mod redundancy;
pub mod style;

pub use extract::{Extracted, RateCall, extract};
pub use redundancy::{BinaryAnalysis, RedundantOn, analyze_binary};
pub use style::{AggregationStyle, StyleTally, detect};
