//! Multiline formatting of expressions and their YAML embedding.
//!
//! - [`multiline`] - When to split an expression and how to lay it out
//! - [`yaml`] - Finding `expr:`/`query:` fields and rewriting them as block scalars

pub mod multiline;
pub mod yaml;

pub use multiline::{format_multiline, format_operand, should_be_multiline};
pub use yaml::{ExprField, expr_field, format_yaml_block, get_indentation};
