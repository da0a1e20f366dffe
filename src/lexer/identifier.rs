//! Identifiers and keywords.
//!
//! Two identifier shapes matter to the checks:
//! - **Label names**: `[a-zA-Z_][a-zA-Z0-9_]*`
//! - **Metric names**: `[a-zA-Z_:][a-zA-Z0-9_:]*`, colons being reserved
//!   for recording rules
//!
//! Keywords are context-sensitive: `sum` is an aggregation in `sum(x)` but a
//! legal metric name elsewhere. Callers decide from context.

use nom::{
    IResult, Parser,
    bytes::complete::{take_while, take_while1},
    combinator::{recognize, verify},
    error::{Error, ErrorKind},
    sequence::pair,
};

fn is_label_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

/// `[a-zA-Z0-9_]`
pub fn is_alpha_numeric(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

fn is_metric_start(c: char) -> bool {
    c == ':' || is_label_start(c)
}

fn is_metric_char(c: char) -> bool {
    c == ':' || is_alpha_numeric(c)
}

/// Parse a label name.
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::lexer::identifier::label_name;
///
/// let (rest, name) = label_name("job=\"api\"").unwrap();
/// assert_eq!(name, "job");
/// assert_eq!(rest, "=\"api\"");
///
/// assert!(label_name("0abc").is_err());
/// ```
pub fn label_name(input: &str) -> IResult<&str, &str> {
    recognize(pair(take_while1(is_label_start), take_while(is_alpha_numeric))).parse(input)
}

/// Parse a metric name.
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::lexer::identifier::metric_name;
///
/// let (_, name) = metric_name("job:request_rate:5m").unwrap();
/// assert_eq!(name, "job:request_rate:5m");
/// ```
pub fn metric_name(input: &str) -> IResult<&str, &str> {
    recognize(pair(take_while1(is_metric_start), take_while(is_metric_char))).parse(input)
}

/// Reserved words of the query language that the scanners need to tell
/// apart from metric names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    // Aggregation operators
    Sum,
    Avg,
    Count,
    Min,
    Max,
    Group,
    Stddev,
    Stdvar,
    Topk,
    Bottomk,
    CountValues,
    Quantile,
    Limitk,
    LimitRatio,

    // Set operators
    And,
    Or,
    Unless,

    Atan2,
    Offset,

    // Grouping and vector matching
    By,
    Without,
    On,
    Ignoring,
    GroupLeft,
    GroupRight,
    Bool,
}

const KEYWORDS: [(&str, Keyword); 26] = [
    ("sum", Keyword::Sum),
    ("avg", Keyword::Avg),
    ("count", Keyword::Count),
    ("min", Keyword::Min),
    ("max", Keyword::Max),
    ("group", Keyword::Group),
    ("stddev", Keyword::Stddev),
    ("stdvar", Keyword::Stdvar),
    ("topk", Keyword::Topk),
    ("bottomk", Keyword::Bottomk),
    ("count_values", Keyword::CountValues),
    ("quantile", Keyword::Quantile),
    ("limitk", Keyword::Limitk),
    ("limit_ratio", Keyword::LimitRatio),
    ("and", Keyword::And),
    ("or", Keyword::Or),
    ("unless", Keyword::Unless),
    ("atan2", Keyword::Atan2),
    ("offset", Keyword::Offset),
    ("by", Keyword::By),
    ("without", Keyword::Without),
    ("on", Keyword::On),
    ("ignoring", Keyword::Ignoring),
    ("group_left", Keyword::GroupLeft),
    ("group_right", Keyword::GroupRight),
    ("bool", Keyword::Bool),
];

impl Keyword {
    /// Look up a keyword by name, ignoring case
    pub fn from_name(name: &str) -> Option<Keyword> {
        KEYWORDS
            .iter()
            .find(|(word, _)| word.eq_ignore_ascii_case(name))
            .map(|&(_, kw)| kw)
    }

    pub fn is_aggregation(&self) -> bool {
        matches!(
            self,
            Keyword::Sum
                | Keyword::Avg
                | Keyword::Count
                | Keyword::Min
                | Keyword::Max
                | Keyword::Group
                | Keyword::Stddev
                | Keyword::Stdvar
                | Keyword::Topk
                | Keyword::Bottomk
                | Keyword::CountValues
                | Keyword::Quantile
                | Keyword::Limitk
                | Keyword::LimitRatio
        )
    }

    /// Followed by a parenthesized label list rather than arguments
    pub fn takes_label_list(&self) -> bool {
        matches!(
            self,
            Keyword::By
                | Keyword::Without
                | Keyword::On
                | Keyword::Ignoring
                | Keyword::GroupLeft
                | Keyword::GroupRight
        )
    }
}

/// Parse a keyword as a whole word, ignoring case: `summary` is not `sum`,
/// and `sum:rate` is a metric name.
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::lexer::identifier::{keyword, Keyword};
///
/// assert_eq!(keyword("SUM(x)").unwrap(), ("(x)", Keyword::Sum));
/// assert!(keyword("summary").is_err());
/// ```
pub fn keyword(input: &str) -> IResult<&str, Keyword> {
    let (rest, word) = metric_name(input)?;
    Keyword::from_name(word)
        .map(|kw| (rest, kw))
        .ok_or_else(|| nom::Err::Error(Error::new(input, ErrorKind::Tag)))
}

/// Parse an aggregation operator, ignoring case
pub fn aggregation_op(input: &str) -> IResult<&str, Keyword> {
    verify(keyword, Keyword::is_aggregation).parse(input)
}
