//! Whitespace between tokens.
//!
//! Expressions analyzed here come from YAML scalars, so only blank
//! characters are skipped. A `#` inside such a scalar is either part of a
//! string literal or already consumed by YAML as a comment.
//!
//! # Examples
//!
//! ```rust
//! use rusty_promql_fmt::lexer::whitespace::{ws_opt, ws1};
//!
//! let (rest, _) = ws_opt("  \t foo").unwrap();
//! assert_eq!(rest, "foo");
//!
//! assert!(ws1("foo").is_err());
//! ```

use nom::{
    IResult, Parser,
    bytes::complete::{take_while, take_while1},
    combinator::value,
};

/// Space, tab, newline or carriage return
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Skip optional whitespace
pub fn ws_opt(input: &str) -> IResult<&str, ()> {
    value((), take_while(is_whitespace)).parse(input)
}

/// Skip required whitespace, e.g. between `sum` and `by` in `sum by (job) (x)`
pub fn ws1(input: &str) -> IResult<&str, ()> {
    value((), take_while1(is_whitespace)).parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_whitespace() {
        assert!(" \t\n\r".chars().all(is_whitespace));
        assert!(!is_whitespace('a'));
        assert!(!is_whitespace('#'));
    }

    #[test]
    fn test_ws_opt() {
        assert_eq!(ws_opt(""), Ok(("", ())));
        assert_eq!(ws_opt("by"), Ok(("by", ())));
        assert_eq!(ws_opt("\r\n  by"), Ok(("by", ())));
    }

    #[test]
    fn test_ws1_requires_whitespace() {
        assert_eq!(ws1(" \tby"), Ok(("by", ())));
        assert!(ws1("by").is_err());
        assert!(ws1("").is_err());
    }
}
