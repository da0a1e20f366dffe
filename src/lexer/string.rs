//! String literal recognition for PromQL.
//!
//! PromQL supports three string literal formats:
//!
//! - **Double-quoted**: `"hello \"world\""`
//! - **Single-quoted**: `'hello \'world\''`
//! - **Raw/backtick**: `` `no escapes here` ``
//!
//! The analyzer never needs decoded values: it only has to know where a
//! literal starts and ends so that operators, parentheses and identifiers
//! inside it stay inert. The parsers here therefore return the raw slice,
//! quotes included. Inside double and single quotes a backslash escapes the
//! following character, whatever it is.
//!
//! # Examples
//!
//! ```rust
//! use rusty_promql_fmt::lexer::string::{string_literal, literal_body};
//!
//! let (rest, raw) = string_literal(r#""a / b" / c"#).unwrap();
//! assert_eq!(raw, r#""a / b""#);
//! assert_eq!(rest, " / c");
//! assert_eq!(literal_body(raw), "a / b");
//! ```

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::take_while,
    character::complete::{anychar, char, none_of},
    combinator::{recognize, value},
    multi::many0,
    sequence::{delimited, preceded},
};

/// Check if a character opens a string literal
#[inline]
pub fn is_quote(c: char) -> bool {
    c == '"' || c == '\'' || c == '`'
}

/// Recognize a PromQL string literal and return it verbatim, quotes included.
pub fn string_literal(input: &str) -> IResult<&str, &str> {
    alt((
        escaped_literal('"'),
        escaped_literal('\''),
        raw_literal,
    ))
    .parse(input)
}

/// Recognize a quoted literal in which `\` escapes the next character.
fn escaped_literal(quote: char) -> impl FnMut(&str) -> IResult<&str, &str> {
    move |input: &str| {
        recognize(delimited(
            char(quote),
            many0(alt((
                value((), preceded(char('\\'), anychar)),
                value((), none_of(&['\\', quote, '\n'][..])),
            ))),
            char(quote),
        ))
        .parse(input)
    }
}

/// Recognize a raw/backtick literal: no escape processing, newlines allowed
fn raw_literal(input: &str) -> IResult<&str, &str> {
    recognize(delimited(char('`'), take_while(|c| c != '`'), char('`'))).parse(input)
}

/// Strip the surrounding quotes from a literal returned by [`string_literal`]
pub fn literal_body(raw: &str) -> &str {
    let mut chars = raw.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open), Some(close)) if is_quote(open) && open == close => chars.as_str(),
        _ => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: the whole input must be recognized as one literal
    fn assert_literal(input: &str) {
        match string_literal(input) {
            Ok((remaining, raw)) => {
                assert!(
                    remaining.is_empty(),
                    "Parser did not consume entire input '{}', remaining: '{}'",
                    input,
                    remaining
                );
                assert_eq!(raw, input);
            }
            Err(e) => panic!("Failed to recognize '{}': {:?}", input, e),
        }
    }

    fn assert_literal_fails(input: &str) {
        let result = string_literal(input);
        assert!(
            result.is_err() || !result.unwrap().0.is_empty(),
            "Expected '{}' to fail or not fully parse",
            input
        );
    }

    #[test]
    fn test_double_quoted() {
        assert_literal(r#""hello""#);
        assert_literal(r#""""#);
        assert_literal(r#""5..""#);
    }

    #[test]
    fn test_escaped_quotes() {
        assert_literal(r#""say \"hello\"""#);
        assert_literal(r"'it\'s'");
        assert_literal(r#""trailing backslash \\""#);
    }

    #[test]
    fn test_other_quote_is_inert() {
        assert_literal(r#""it's""#);
        assert_literal(r#"'say "hi"'"#);
    }

    #[test]
    fn test_raw_literal() {
        assert_literal(r"`\d+`");
        assert_literal("`multi\nline`");
    }

    #[test]
    fn test_unterminated() {
        assert_literal_fails(r#""hello"#);
        assert_literal_fails("'hello");
        assert_literal_fails("`hello");
        assert_literal_fails("\"hello\nworld\"");
    }

    #[test]
    fn test_literal_followed_by_content() {
        let (rest, raw) = string_literal(r#"'a' or b"#).unwrap();
        assert_eq!(raw, "'a'");
        assert_eq!(rest, " or b");
    }

    #[test]
    fn test_literal_stops_at_first_closing_quote() {
        let (rest, raw) = string_literal(r#""a\"b" / "c""#).unwrap();
        assert_eq!(raw, r#""a\"b""#);
        assert_eq!(rest, r#" / "c""#);
    }

    #[test]
    fn test_literal_body() {
        assert_eq!(literal_body(r#""api""#), "api");
        assert_eq!(literal_body("''"), "");
        assert_eq!(literal_body("`x`"), "x");
        assert_eq!(literal_body("\"unbalanced'"), "\"unbalanced'");
    }
}
