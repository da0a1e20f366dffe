//! Locating and rewriting query fields in YAML text.
//!
//! Fields are found line by line, without parsing the surrounding YAML: a
//! line qualifies when it is indentation, `expr:` or `query:`, and a
//! non-empty value on the same line. A rewrite replaces that single line
//! with a literal block scalar.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::char,
    combinator::{consumed, rest, verify},
};

use crate::lexer::whitespace::ws_opt;

/// A query field found on one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExprField<'a> {
    /// Leading spaces and tabs
    pub indentation: &'a str,
    /// Indentation, key and colon, e.g. `    expr:`
    pub prefix: &'a str,
    /// `expr` or `query`
    pub key: &'a str,
    /// The value as written, trimmed
    pub value: &'a str,
    /// The value with one pair of surrounding quotes removed
    pub expression: &'a str,
    /// The quote character that was removed, if any
    pub quote: Option<char>,
}

impl ExprField<'_> {
    /// Whether the expression can be moved into a literal block without
    /// changing its meaning.
    ///
    /// Escapes mean something inside double quotes and `''` means `'` inside
    /// single quotes; neither survives in a block scalar.
    pub fn can_rewrite(&self) -> bool {
        match self.quote {
            Some('"') => !self.expression.contains('\\'),
            Some('\'') => !self.expression.contains("''"),
            _ => true,
        }
    }
}

/// Indentation of a line: its leading spaces and tabs
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::format::yaml::get_indentation;
///
/// assert_eq!(get_indentation("    expr: up"), "    ");
/// assert_eq!(get_indentation("expr: up"), "");
/// ```
pub fn get_indentation(line: &str) -> &str {
    let end = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..end]
}

fn field_key(input: &str) -> IResult<&str, &str> {
    alt((tag("expr"), tag("query"))).parse(input)
}

fn field_head(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, indentation) = take_while(|c: char| c == ' ' || c == '\t').parse(input)?;
    let (input, key) = field_key(input)?;
    let (input, _) = char(':').parse(input)?;
    Ok((input, (indentation, key)))
}

/// Values that open a block scalar; the expression is on the lines below
fn is_block_indicator(value: &str) -> bool {
    value.starts_with('|') || value.starts_with('>')
}

fn unquote(value: &str) -> (&str, Option<char>) {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return (&value[1..value.len() - 1], Some(quote));
        }
    }
    (value, None)
}

/// Parse a single line (without its line ending) as a query field.
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::format::yaml::expr_field;
///
/// let (_, field) = expr_field(r#"    expr: "up{job='a'}""#).unwrap();
/// assert_eq!(field.prefix, "    expr:");
/// assert_eq!(field.expression, "up{job='a'}");
/// assert_eq!(field.quote, Some('"'));
///
/// assert!(expr_field("    expr: |").is_err());
/// assert!(expr_field("    expression: up").is_err());
/// ```
pub fn expr_field(line: &str) -> IResult<&str, ExprField<'_>> {
    let (input, (prefix, (indentation, key))) = consumed(field_head).parse(line)?;
    let (input, _) = ws_opt(input)?;
    let (input, value) = verify(rest, |v: &str| {
        let v = v.trim();
        !v.is_empty() && !is_block_indicator(v)
    })
    .parse(input)?;

    let value = value.trim();
    let (expression, quote) = unquote(value);
    let expression = expression.trim();

    Ok((
        input,
        ExprField {
            indentation,
            prefix,
            key,
            value,
            expression,
            quote,
        },
    ))
}

/// Render `prefix |` followed by the expression's lines, each indented two
/// spaces past `indentation`.
///
/// Relative indentation inside the expression is kept, trailing whitespace
/// and blank lines are dropped. The result has no trailing line ending.
/// An expression without a line break stays on the key's line.
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::format::yaml::format_yaml_block;
///
/// assert_eq!(
///     format_yaml_block("  expr:", "a\n  /\nb", "  ", "\n"),
///     "  expr: |\n    a\n      /\n    b"
/// );
/// assert_eq!(format_yaml_block("  expr:", "up", "  ", "\n"), "  expr: up");
/// ```
pub fn format_yaml_block(prefix: &str, expr: &str, indentation: &str, line_ending: &str) -> String {
    if !expr.contains('\n') {
        return format!("{} {}", prefix, expr);
    }

    let mut block = format!("{} |", prefix);
    for line in expr.lines().filter(|l| !l.trim().is_empty()) {
        block.push_str(line_ending);
        block.push_str(indentation);
        block.push_str("  ");
        block.push_str(line.trim_end());
    }
    block
}
