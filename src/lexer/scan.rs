//! Depth and quote aware scanning over raw expression text.
//!
//! The analyzer does not build a full expression tree. Instead it walks the
//! text keeping track of parenthesis depth and string literals, which is
//! enough to find top-level operators, unwrap one level of parentheses and
//! pull identifiers out of an expression.
//!
//! Nothing in here fails on malformed input: an unterminated string makes the
//! rest of the text inert and unbalanced parentheses simply leave the depth
//! counter off zero.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{anychar, one_of, satisfy},
    combinator::{map, recognize, rest},
    sequence::pair,
};

use super::identifier::{is_alpha_numeric, metric_name};
use super::string::{is_quote, string_literal};
use super::whitespace::is_whitespace;

/// Iterator over the byte offsets of characters that sit at parenthesis
/// depth zero and outside any string literal.
///
/// Parentheses themselves and string literals are never yielded.
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::lexer::scan::TopLevel;
///
/// let expr = r#"(a / b) / c{x="/"}"#;
/// let slashes: Vec<usize> = TopLevel::new(expr)
///     .filter(|&i| expr[i..].starts_with('/'))
///     .collect();
/// assert_eq!(slashes, vec![8]);
/// ```
#[derive(Debug, Clone)]
pub struct TopLevel<'a> {
    input: &'a str,
    pos: usize,
    depth: i32,
    prev: Option<char>,
}

impl<'a> TopLevel<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
            prev: None,
        }
    }
}

impl Iterator for TopLevel<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while let Some(c) = self.input[self.pos..].chars().next() {
            let at = self.pos;
            let escaped = self.prev == Some('\\');
            self.prev = Some(c);
            self.pos += c.len_utf8();

            match c {
                '(' => self.depth += 1,
                ')' => self.depth -= 1,
                q if is_quote(q) && !escaped => match string_literal(&self.input[at..]) {
                    Ok((remaining, _)) => {
                        self.pos = self.input.len() - remaining.len();
                        self.prev = Some(q);
                    }
                    Err(_) => {
                        // Unterminated: everything after the quote is inert
                        self.pos = self.input.len();
                    }
                },
                _ if self.depth == 0 => return Some(at),
                _ => {}
            }
        }
        None
    }
}

/// Find the first top-level occurrence of `needle` in `input`.
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::lexer::scan::find_top_level;
///
/// assert_eq!(find_top_level("sum(a / b) / c", " / "), Some(10));
/// assert_eq!(find_top_level(r#"a{x=" / "}"#, " / "), None);
/// ```
pub fn find_top_level(input: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    TopLevel::new(input).find(|&i| input[i..].starts_with(needle))
}

/// Parse a balanced parenthesized group and return the text between the
/// outer parentheses.
///
/// Parentheses inside string literals are ignored.
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::lexer::scan::balanced_parens;
///
/// let (rest, inner) = balanced_parens(r#"(rate(x{a=")"}[5m])) by (job)"#).unwrap();
/// assert_eq!(inner, r#"rate(x{a=")"}[5m])"#);
/// assert_eq!(rest, " by (job)");
///
/// assert!(balanced_parens("(unclosed").is_err());
/// ```
pub fn balanced_parens(input: &str) -> IResult<&str, &str> {
    let fail = || nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Char));

    if !input.starts_with('(') {
        return Err(fail());
    }

    let mut depth = 0usize;
    let mut pos = 0;
    while let Some(c) = input[pos..].chars().next() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&input[pos + 1..], &input[1..pos]));
                }
            }
            q if is_quote(q) && !input[..pos].ends_with('\\') => {
                let (remaining, _) = string_literal(&input[pos..]).map_err(|_| fail())?;
                pos = input.len() - remaining.len();
                continue;
            }
            _ => {}
        }
        pos += c.len_utf8();
    }

    Err(fail())
}

/// Kind of a lexical token produced by [`tokenize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Metric name, label name, function name or keyword
    Identifier,
    /// Number or duration literal (`42`, `1e3`, `5m`)
    Number,
    /// String literal including its quotes. An unterminated literal runs to
    /// the end of the input.
    String,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    /// Run of operator characters (`/`, `==`, `=~`, `!=`)
    Operator,
    /// Anything else (`@`, `$`, ...)
    Other,
}

/// A token borrowed from the scanned expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset of the token in the scanned expression
    pub offset: usize,
}

impl Token<'_> {
    /// Byte offset just past the token
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }

    /// Identifier token spelling `word`, compared case-insensitively
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Identifier && self.text.eq_ignore_ascii_case(word)
    }
}

fn is_operator_char(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '%' | '^' | '=' | '!' | '<' | '>' | '~')
}

fn number_like(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_digit() || c == '.'),
        take_while(|c| is_alpha_numeric(c) || c == '.'),
    ))
    .parse(input)
}

fn unterminated_string(input: &str) -> IResult<&str, &str> {
    recognize(pair(one_of("\"'`"), rest)).parse(input)
}

fn punctuation(c: char) -> TokenKind {
    match c {
        '(' => TokenKind::LParen,
        ')' => TokenKind::RParen,
        '{' => TokenKind::LBrace,
        '}' => TokenKind::RBrace,
        '[' => TokenKind::LBracket,
        ']' => TokenKind::RBracket,
        ',' => TokenKind::Comma,
        _ => TokenKind::Other,
    }
}

fn token(input: &str) -> IResult<&str, (TokenKind, &str)> {
    alt((
        map(string_literal, |s| (TokenKind::String, s)),
        map(unterminated_string, |s| (TokenKind::String, s)),
        map(metric_name, |s| (TokenKind::Identifier, s)),
        map(number_like, |s| (TokenKind::Number, s)),
        map(take_while1(is_operator_char), |s| (TokenKind::Operator, s)),
        map(recognize(anychar), |s: &str| {
            (punctuation(s.chars().next().unwrap_or(' ')), s)
        }),
    ))
    .parse(input)
}

/// Split an expression into tokens. Never fails: unknown characters become
/// [`TokenKind::Other`] tokens.
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::lexer::scan::{tokenize, TokenKind};
///
/// let tokens = tokenize(r#"rate(x{job="a b"}[5m])"#);
/// let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(kinds[0], TokenKind::Identifier);
/// assert_eq!(tokens[4].text, "job");
/// assert_eq!(tokens[6].kind, TokenKind::String);
/// ```
pub fn tokenize(expr: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut remaining = expr.trim_start_matches(is_whitespace);

    while !remaining.is_empty() {
        match token(remaining) {
            Ok((next, (kind, text))) => {
                tokens.push(Token {
                    kind,
                    text,
                    offset: expr.len() - remaining.len(),
                });
                remaining = next.trim_start_matches(is_whitespace);
            }
            Err(_) => break,
        }
    }

    tokens
}

/// Index of the token closing the group opened at `open`.
///
/// Works for any bracket kind; other kinds of brackets inside are not
/// counted.
pub fn matching_close(tokens: &[Token<'_>], open: usize) -> Option<usize> {
    let open_kind = tokens.get(open)?.kind;
    let close_kind = match open_kind {
        TokenKind::LParen => TokenKind::RParen,
        TokenKind::LBrace => TokenKind::RBrace,
        TokenKind::LBracket => TokenKind::RBracket,
        _ => return None,
    };

    let mut depth = 0usize;
    for (i, tok) in tokens.iter().enumerate().skip(open) {
        if tok.kind == open_kind {
            depth += 1;
        } else if tok.kind == close_kind {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(tokens: &[Token<'a>]) -> Vec<&'a str> {
        tokens.iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_top_level_skips_nested() {
        let expr = "a + (b + c) + d";
        let plus: Vec<usize> = TopLevel::new(expr)
            .filter(|&i| expr[i..].starts_with('+'))
            .collect();
        assert_eq!(plus, vec![2, 12]);
    }

    #[test]
    fn test_top_level_skips_strings() {
        assert_eq!(find_top_level(r#"x{a="1 / 2"} / y"#, " / "), Some(12));
        assert_eq!(find_top_level(r#"x{a='it\'s / ok'} / y"#, " / "), Some(17));
    }

    #[test]
    fn test_top_level_unterminated_string_is_inert() {
        assert_eq!(find_top_level(r#"x{a="1 / 2} / y"#, " / "), None);
    }

    #[test]
    fn test_top_level_unbalanced_parens() {
        // Depth never returns to zero after the extra `)`
        assert_eq!(find_top_level("a) / (b", " / "), None);
        assert_eq!(find_top_level("(a / b", " / "), None);
    }

    #[test]
    fn test_top_level_multibyte() {
        assert_eq!(find_top_level("é / ü", " / "), Some(2));
    }

    #[test]
    fn test_find_top_level_empty_needle() {
        assert_eq!(find_top_level("a", ""), None);
    }

    #[test]
    fn test_balanced_parens_nested() {
        let (rest, inner) = balanced_parens("((a)(b)) or c").unwrap();
        assert_eq!(inner, "(a)(b)");
        assert_eq!(rest, " or c");
    }

    #[test]
    fn test_balanced_parens_failures() {
        assert!(balanced_parens("").is_err());
        assert!(balanced_parens("x(a)").is_err());
        assert!(balanced_parens("((a)").is_err());
        assert!(balanced_parens(r#"(a{x=")}"#).is_err());
    }

    #[test]
    fn test_tokenize_selector() {
        let tokens = tokenize(r#"sum by (job) (rate(http_requests_total{code=~"5.."}[5m]))"#);
        assert_eq!(
            texts(&tokens),
            vec![
                "sum", "by", "(", "job", ")", "(", "rate", "(", "http_requests_total", "{",
                "code", "=~", r#""5..""#, "}", "[", "5m", "]", ")", ")"
            ]
        );
        assert_eq!(tokens[15].kind, TokenKind::Number);
        assert_eq!(tokens[11].kind, TokenKind::Operator);
    }

    #[test]
    fn test_tokenize_unknown_and_unterminated() {
        let tokens = tokenize(r#"x @ 100 or y{a="oops"#);
        assert_eq!(tokens[1].kind, TokenKind::Other);
        assert_eq!(tokens[2].kind, TokenKind::Number);
        let last = tokens.last().unwrap();
        assert_eq!(last.kind, TokenKind::String);
        assert_eq!(last.text, r#""oops"#);
    }

    #[test]
    fn test_tokenize_offsets() {
        let expr = "sum( x ) by (job)";
        let tokens = tokenize(expr);
        for tok in &tokens {
            assert_eq!(&expr[tok.offset..tok.end()], tok.text);
        }
        assert!(tokens[4].is_word("BY"));
    }

    #[test]
    fn test_matching_close() {
        let tokens = tokenize("f((a), [b]) + c");
        assert_eq!(matching_close(&tokens, 1), Some(9));
        assert_eq!(matching_close(&tokens, 2), Some(4));
        assert_eq!(matching_close(&tokens, 0), None);
        assert_eq!(matching_close(&tokenize("f(a"), 1), None);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }
}
