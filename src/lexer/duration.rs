// Duration literals
//
// Durations show up in two places the analyzer cares about:
// - Range windows inside expressions: rate(metric[5m])
// - The `for:` clause of an alerting rule: for: 10m
//
// A literal is one or more <digits><unit> components, largest unit first by
// convention but not by requirement: 5m, 1h30m, 2d12h, 4s180ms.

use std::time::Duration;

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1},
    combinator::{consumed, map_res, value},
    multi::many1,
    sequence::delimited,
};

const MILLI: u64 = 1;
const SECOND: u64 = 1_000 * MILLI;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const WEEK: u64 = 7 * DAY;
const YEAR: u64 = 365 * DAY;

/// Unit suffix, as a multiplier in milliseconds. `ms` is tried before `m`.
fn unit(input: &str) -> IResult<&str, u64> {
    alt((
        value(MILLI, tag("ms")),
        value(SECOND, tag("s")),
        value(MINUTE, tag("m")),
        value(HOUR, tag("h")),
        value(DAY, tag("d")),
        value(WEEK, tag("w")),
        value(YEAR, tag("y")),
    ))
    .parse(input)
}

/// `<digits><unit>` in milliseconds; fails on overflow
fn component(input: &str) -> IResult<&str, u64> {
    map_res((digit1, unit), |(digits, per_unit): (&str, u64)| {
        digits
            .parse::<u64>()
            .ok()
            .and_then(|n| n.checked_mul(per_unit))
            .ok_or("duration overflow")
    })
    .parse(input)
}

/// Parse a duration literal such as `5m` or `1h30m`.
///
/// Fails when the total does not fit in 64 bits of milliseconds.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use rusty_promql_fmt::lexer::duration::duration;
///
/// assert_eq!(duration("1h30m").unwrap().1, Duration::from_secs(5400));
/// assert_eq!(duration("10m offset").unwrap().0, " offset");
/// assert!(duration("5").is_err());
/// ```
pub fn duration(input: &str) -> IResult<&str, Duration> {
    map_res(many1(component), |parts: Vec<u64>| {
        parts
            .into_iter()
            .try_fold(0u64, u64::checked_add)
            .map(Duration::from_millis)
            .ok_or("duration overflow")
    })
    .parse(input)
}

/// Parse a range written in square brackets, e.g. the `[5m]` of
/// `rate(x[5m])`. Returns the raw duration text along with its value.
///
/// Subquery ranges (`[30m:5m]`) are not accepted: only a plain range
/// window is a candidate for the hysteresis check.
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::lexer::duration::bracketed_duration;
///
/// let (rest, (raw, dur)) = bracketed_duration("[1h30m])").unwrap();
/// assert_eq!(raw, "1h30m");
/// assert_eq!(dur.as_secs(), 5400);
/// assert_eq!(rest, ")");
///
/// assert!(bracketed_duration("[30m:5m]").is_err());
/// ```
pub fn bracketed_duration(input: &str) -> IResult<&str, (&str, Duration)> {
    delimited(char('['), consumed(duration), char(']')).parse(input)
}
