// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar-interval text: decoder with ISO 8601 fallback, and the three
//! interval-style encoders.
//!
//! The decoder produces a [`DurationFields`] delta rather than a scalar,
//! because years, months and days are not interchangeable until a caller
//! picks conversion constants for them.

use crate::config::IntervalStyle;
use crate::error::{Error, Result};
use std::fmt::Write as _;

const USECS_PER_SEC: i64 = 1_000_000;

/// A calendar delta, each component carrying its own sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct DurationFields {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub micros: i64,
}

impl DurationFields {
    fn negate(&mut self) -> Decoded<()> {
        for field in [
            &mut self.years,
            &mut self.months,
            &mut self.days,
            &mut self.hours,
            &mut self.minutes,
            &mut self.seconds,
            &mut self.micros,
        ] {
            *field = field.checked_neg().ok_or(Failure::Overflow)?;
        }
        Ok(())
    }

    fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DurationKind {
    Delta(DurationFields),
    /// The `invalid` keyword, which no duration type accepts.
    Invalid,
}

/// Decoder failure before it is turned into a user-facing [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Failure {
    BadFormat,
    Overflow,
}

type Decoded<T> = std::result::Result<T, Failure>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Microsecond,
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
    Decade,
    Century,
    Millennium,
}

fn unit_of(word: &str) -> Option<Unit> {
    let unit = match word {
        "microsecond" | "microseconds" | "microsecon" | "usec" | "usecs" | "us" => {
            Unit::Microsecond
        }
        "millisecond" | "milliseconds" | "millisecon" | "msec" | "msecs" | "ms" => {
            Unit::Millisecond
        }
        "second" | "seconds" | "sec" | "secs" | "s" => Unit::Second,
        "minute" | "minutes" | "min" | "mins" | "m" => Unit::Minute,
        "hour" | "hours" | "hr" | "hrs" | "h" => Unit::Hour,
        "day" | "days" | "d" => Unit::Day,
        "week" | "weeks" | "w" => Unit::Week,
        "month" | "months" | "mon" | "mons" => Unit::Month,
        "year" | "years" | "yr" | "yrs" | "y" => Unit::Year,
        "decade" | "decades" | "dec" | "decs" => Unit::Decade,
        "century" | "centuries" | "cent" | "c" => Unit::Century,
        "millennium" | "millennia" | "mil" | "mils" => Unit::Millennium,
        _ => return None,
    };
    Some(unit)
}

/// A signed decimal split into integral and fractional parts of equal sign.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Number {
    whole: i64,
    fraction: f64,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    At,
    Number(Number, Option<String>),
    Clock {
        negative: bool,
        hours: i64,
        minutes: i64,
        seconds: i64,
        micros: i64,
    },
    Word(String),
}

fn add(field: &mut i64, value: i64) -> Decoded<()> {
    *field = field.checked_add(value).ok_or(Failure::Overflow)?;
    Ok(())
}

fn scaled(value: i64, factor: i64) -> Decoded<i64> {
    value.checked_mul(factor).ok_or(Failure::Overflow)
}

fn rint(value: f64) -> Decoded<i64> {
    let rounded = value.round_ties_even();
    if rounded.is_finite() && rounded.abs() < 9.0e18 {
        Ok(rounded as i64)
    } else {
        Err(Failure::Overflow)
    }
}

/// Spill a fraction of `scale` seconds into whole seconds and micros.
fn spill_seconds(fields: &mut DurationFields, fraction: f64, scale: i64) -> Decoded<()> {
    if fraction == 0.0 {
        return Ok(());
    }
    let seconds = fraction * scale as f64;
    let whole = seconds.trunc();
    add(&mut fields.seconds, rint(whole)?)?;
    add(&mut fields.micros, rint((seconds - whole) * USECS_PER_SEC as f64)?)
}

/// Spill a fraction of `scale` days into whole days, then seconds.
fn spill_days(fields: &mut DurationFields, fraction: f64, scale: i64) -> Decoded<()> {
    if fraction == 0.0 {
        return Ok(());
    }
    let days = fraction * scale as f64;
    let whole = days.trunc();
    add(&mut fields.days, rint(whole)?)?;
    spill_seconds(fields, days - whole, 86_400)
}

fn apply(fields: &mut DurationFields, n: Number, unit: Unit) -> Decoded<()> {
    let Number { whole, fraction } = n;
    match unit {
        Unit::Microsecond => add(&mut fields.micros, rint(whole as f64 + fraction)?),
        Unit::Millisecond => add(&mut fields.micros, rint((whole as f64 + fraction) * 1000.0)?),
        Unit::Second => {
            add(&mut fields.seconds, whole)?;
            add(&mut fields.micros, rint(fraction * USECS_PER_SEC as f64)?)
        }
        Unit::Minute => {
            add(&mut fields.minutes, whole)?;
            spill_seconds(fields, fraction, 60)
        }
        Unit::Hour => {
            add(&mut fields.hours, whole)?;
            spill_seconds(fields, fraction, 3_600)
        }
        Unit::Day => {
            add(&mut fields.days, whole)?;
            spill_seconds(fields, fraction, 86_400)
        }
        Unit::Week => {
            add(&mut fields.days, scaled(whole, 7)?)?;
            spill_days(fields, fraction, 7)
        }
        Unit::Month => {
            add(&mut fields.months, whole)?;
            spill_days(fields, fraction, 30)
        }
        Unit::Year | Unit::Decade | Unit::Century | Unit::Millennium => {
            let years = match unit {
                Unit::Decade => 10,
                Unit::Century => 100,
                Unit::Millennium => 1_000,
                _ => 1,
            };
            add(&mut fields.years, scaled(whole, years)?)?;
            add(&mut fields.months, (fraction * (12 * years) as f64) as i64)
        }
    }
}

/// Scan `[+-]digits[.digits]` at the front of `text`; returns the number
/// and how many bytes it used.
fn scan_number(text: &str) -> Decoded<(Number, usize)> {
    let bytes = text.as_bytes();
    let mut i = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            i += 1;
            true
        }
        Some(b'+') => {
            i += 1;
            false
        }
        _ => false,
    };
    let int_start = i;
    while bytes.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    let int_end = i;
    let mut fraction = 0.0;
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        let frac_start = i;
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        if i > frac_start {
            fraction = format!("0.{}", &text[frac_start..i])
                .parse::<f64>()
                .map_err(|_| Failure::BadFormat)?;
        }
    }
    if int_end == int_start && i == int_end {
        return Err(Failure::BadFormat);
    }
    let whole = if int_end > int_start {
        text[int_start..int_end]
            .parse::<i64>()
            .map_err(|_| Failure::Overflow)?
    } else {
        0
    };
    let sign = if negative { -1 } else { 1 };
    Ok((
        Number {
            whole: sign * whole,
            fraction: sign as f64 * fraction,
        },
        i,
    ))
}

/// `[+-]HH:MM[:SS[.fraction]]`.
fn scan_clock(text: &str) -> Decoded<Token> {
    let (negative, body) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let mut parts = body.split(':');
    let int = |part: Option<&str>| -> Decoded<i64> {
        match part {
            Some(p) if !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()) => {
                p.parse().map_err(|_| Failure::Overflow)
            }
            _ => Err(Failure::BadFormat),
        }
    };
    let hours = int(parts.next())?;
    let minutes = int(parts.next())?;
    let (seconds, micros) = match parts.next() {
        None => (0, 0),
        Some(sec) => {
            let (n, used) = scan_number(sec)?;
            if used != sec.len() || sec.starts_with(['+', '-']) {
                return Err(Failure::BadFormat);
            }
            (n.whole, rint(n.fraction * USECS_PER_SEC as f64)?)
        }
    };
    if parts.next().is_some() {
        return Err(Failure::BadFormat);
    }
    if minutes > 59 || seconds > 60 {
        return Err(Failure::Overflow);
    }
    Ok(Token::Clock {
        negative,
        hours,
        minutes,
        seconds,
        micros,
    })
}

fn tokenize(input: &str) -> Decoded<Vec<Token>> {
    let mut tokens = Vec::new();
    for chunk in input.split_ascii_whitespace() {
        let mut rest = chunk;
        while !rest.is_empty() {
            let first = rest.as_bytes()[0];
            if first == b'@' {
                tokens.push(Token::At);
                rest = &rest[1..];
            } else if first.is_ascii_alphabetic() {
                let end = rest
                    .find(|c: char| !c.is_ascii_alphabetic())
                    .unwrap_or(rest.len());
                tokens.push(Token::Word(rest[..end].to_ascii_lowercase()));
                rest = &rest[end..];
            } else if first.is_ascii_digit() || matches!(first, b'+' | b'-' | b'.') {
                let end = rest
                    .find(|c: char| c.is_ascii_alphabetic() || c == '@')
                    .unwrap_or(rest.len());
                let numeric = &rest[..end];
                if numeric.contains(':') {
                    tokens.push(scan_clock(numeric)?);
                    rest = &rest[end..];
                    continue;
                }
                let (number, used) = scan_number(numeric)?;
                if used != numeric.len() {
                    return Err(Failure::BadFormat);
                }
                rest = &rest[end..];
                let unit_end = rest
                    .find(|c: char| !c.is_ascii_alphabetic())
                    .unwrap_or(rest.len());
                let unit = (unit_end > 0).then(|| rest[..unit_end].to_ascii_lowercase());
                rest = &rest[unit_end..];
                tokens.push(Token::Number(number, unit));
            } else if first == b',' {
                rest = &rest[1..];
            } else {
                return Err(Failure::BadFormat);
            }
        }
    }
    Ok(tokens)
}

fn decode_postgres(input: &str) -> Decoded<DurationKind> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(Failure::BadFormat);
    }
    if let [Token::Word(word)] = tokens.as_slice() {
        if word == "invalid" {
            return Ok(DurationKind::Invalid);
        }
    }

    let mut fields = DurationFields::default();
    let mut pending: Option<Number> = None;
    let mut ago = false;
    let last = tokens.len() - 1;
    for (i, token) in tokens.into_iter().enumerate() {
        match token {
            Token::At if i == 0 => {}
            Token::At => return Err(Failure::BadFormat),
            Token::Number(n, Some(unit)) => {
                if pending.is_some() {
                    return Err(Failure::BadFormat);
                }
                apply(&mut fields, n, unit_of(&unit).ok_or(Failure::BadFormat)?)?;
            }
            Token::Number(n, None) => {
                if pending.replace(n).is_some() {
                    return Err(Failure::BadFormat);
                }
            }
            Token::Word(word) if word == "ago" => {
                if i != last || ago {
                    return Err(Failure::BadFormat);
                }
                ago = true;
            }
            Token::Word(word) => {
                let unit = unit_of(&word).ok_or(Failure::BadFormat)?;
                let n = pending.take().ok_or(Failure::BadFormat)?;
                apply(&mut fields, n, unit)?;
            }
            Token::Clock {
                negative,
                hours,
                minutes,
                seconds,
                micros,
            } => {
                if pending.is_some() {
                    return Err(Failure::BadFormat);
                }
                let sign = if negative { -1 } else { 1 };
                add(&mut fields.hours, sign * hours)?;
                add(&mut fields.minutes, sign * minutes)?;
                add(&mut fields.seconds, sign * seconds)?;
                add(&mut fields.micros, sign * micros)?;
            }
        }
    }
    if let Some(n) = pending {
        apply(&mut fields, n, Unit::Second)?;
    }
    if ago {
        fields.negate()?;
    }
    Ok(DurationKind::Delta(fields))
}

/// ISO 8601 durations: designator form `P1Y2M3W4DT5H6M7.5S` and the
/// alternative form `P0001-02-03T04:05:06`.
fn decode_iso8601(input: &str) -> Decoded<DurationKind> {
    let body = input.trim_matches(' ');
    let mut rest = body.strip_prefix('P').ok_or(Failure::BadFormat)?;
    if rest.is_empty() {
        return Err(Failure::BadFormat);
    }

    let mut fields = DurationFields::default();
    let mut in_time = false;
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix('T') {
            if in_time {
                return Err(Failure::BadFormat);
            }
            in_time = true;
            rest = after;
            continue;
        }
        let (n, used) = scan_number(rest)?;
        rest = &rest[used..];
        let designator = rest.as_bytes().first().copied();
        rest = rest.get(1..).unwrap_or("");
        match (in_time, designator) {
            (false, Some(b'Y')) => apply(&mut fields, n, Unit::Year)?,
            (false, Some(b'M')) => apply(&mut fields, n, Unit::Month)?,
            (false, Some(b'W')) => apply(&mut fields, n, Unit::Week)?,
            (false, Some(b'D')) => apply(&mut fields, n, Unit::Day)?,
            (true, Some(b'H')) => apply(&mut fields, n, Unit::Hour)?,
            (true, Some(b'M')) => apply(&mut fields, n, Unit::Minute)?,
            (true, Some(b'S')) => apply(&mut fields, n, Unit::Second)?,
            (false, Some(b'-')) | (false, None) => {
                // Alternative form: YYYY-MM-DD, date part must come first.
                if fields != DurationFields::default() || n.fraction != 0.0 {
                    return Err(Failure::BadFormat);
                }
                fields.years = n.whole;
                if designator.is_some() {
                    let (month, used) = scan_number(rest)?;
                    fields.months = month.whole;
                    rest = &rest[used..];
                    if let Some(after) = rest.strip_prefix('-') {
                        let (day, used) = scan_number(after)?;
                        fields.days = day.whole;
                        rest = &after[used..];
                    }
                }
            }
            (true, Some(b':')) | (true, None) => {
                if fields.hours != 0 || fields.minutes != 0 || fields.seconds != 0 {
                    return Err(Failure::BadFormat);
                }
                fields.hours = n.whole;
                if designator.is_some() {
                    let (minutes, used) = scan_number(rest)?;
                    fields.minutes = minutes.whole;
                    rest = &rest[used..];
                    if let Some(after) = rest.strip_prefix(':') {
                        let (seconds, used) = scan_number(after)?;
                        apply(&mut fields, seconds, Unit::Second)?;
                        rest = &after[used..];
                    }
                }
            }
            _ => return Err(Failure::BadFormat),
        }
    }
    Ok(DurationKind::Delta(fields))
}

/// Decode calendar-interval text, trying ISO 8601 only when the primary
/// grammar rejects the layout.
pub(crate) fn decode_duration(input: &str, type_name: &'static str) -> Result<DurationKind> {
    let outcome = match decode_postgres(input) {
        Err(Failure::BadFormat) => decode_iso8601(input),
        other => other,
    };
    outcome.map_err(|failure| {
        log::debug!("rejected {type_name} text {input:?}: {failure:?}");
        match failure {
            Failure::BadFormat => Error::syntax(type_name, input),
            Failure::Overflow => Error::IntervalOutOfRange {
                input: input.to_owned(),
            },
        }
    })
}

fn push_seconds(out: &mut String, seconds: i64, micros: i64, zero_pad: bool) {
    let seconds = seconds.unsigned_abs();
    let _ = if zero_pad {
        write!(out, "{seconds:02}")
    } else {
        write!(out, "{seconds}")
    };
    if micros != 0 {
        let fraction = format!("{:06}", micros.unsigned_abs());
        let _ = write!(out, ".{}", fraction.trim_end_matches('0'));
    }
}

fn postgres_part(out: &mut String, value: i64, unit: &str, is_zero: &mut bool, is_before: &mut bool) {
    if value == 0 {
        return;
    }
    let _ = write!(
        out,
        "{}{}{value} {unit}{}",
        if *is_zero { "" } else { " " },
        if *is_before && value > 0 { "+" } else { "" },
        if value != 1 { "s" } else { "" }
    );
    *is_before = value < 0;
    *is_zero = false;
}

fn verbose_part(out: &mut String, value: i64, unit: &str, is_zero: &mut bool, is_before: &mut bool) {
    if value == 0 {
        return;
    }
    let mut value = value;
    if *is_zero {
        *is_before = value < 0;
        value = value.abs();
    } else if *is_before {
        value = -value;
    }
    let _ = write!(out, " {value} {unit}{}", if value == 1 { "" } else { "s" });
    *is_zero = false;
}

fn iso_part(out: &mut String, value: i64, designator: char) {
    if value != 0 {
        let _ = write!(out, "{value}{designator}");
    }
}

/// Render a calendar delta in the requested interval style.
pub(crate) fn encode_duration(d: &DurationFields, style: IntervalStyle) -> String {
    let mut out = String::with_capacity(64);
    let mut is_zero = true;
    let mut is_before = false;

    match style {
        IntervalStyle::Postgres => {
            postgres_part(&mut out, d.years, "year", &mut is_zero, &mut is_before);
            postgres_part(&mut out, d.months, "mon", &mut is_zero, &mut is_before);
            postgres_part(&mut out, d.days, "day", &mut is_zero, &mut is_before);
            if is_zero || d.hours != 0 || d.minutes != 0 || d.seconds != 0 || d.micros != 0 {
                let minus = d.hours < 0 || d.minutes < 0 || d.seconds < 0 || d.micros < 0;
                let _ = write!(
                    out,
                    "{}{}{:02}:{:02}:",
                    if is_zero { "" } else { " " },
                    if minus {
                        "-"
                    } else if is_before {
                        "+"
                    } else {
                        ""
                    },
                    d.hours.unsigned_abs(),
                    d.minutes.unsigned_abs()
                );
                push_seconds(&mut out, d.seconds, d.micros, true);
            }
        }
        IntervalStyle::PostgresVerbose => {
            out.push('@');
            verbose_part(&mut out, d.years, "year", &mut is_zero, &mut is_before);
            verbose_part(&mut out, d.months, "mon", &mut is_zero, &mut is_before);
            verbose_part(&mut out, d.days, "day", &mut is_zero, &mut is_before);
            verbose_part(&mut out, d.hours, "hour", &mut is_zero, &mut is_before);
            verbose_part(&mut out, d.minutes, "min", &mut is_zero, &mut is_before);
            if d.seconds != 0 || d.micros != 0 {
                out.push(' ');
                if d.seconds < 0 || (d.seconds == 0 && d.micros < 0) {
                    if is_zero {
                        is_before = true;
                    } else if !is_before {
                        out.push('-');
                    }
                } else if is_before {
                    out.push('-');
                }
                push_seconds(&mut out, d.seconds, d.micros, false);
                let plural = d.seconds.abs() != 1 || d.micros != 0;
                let _ = write!(out, " sec{}", if plural { "s" } else { "" });
                is_zero = false;
            }
            if is_zero {
                out.push_str(" 0");
            }
            if is_before {
                out.push_str(" ago");
            }
        }
        IntervalStyle::Iso8601 => {
            if d.is_zero() {
                return "PT0S".to_owned();
            }
            out.push('P');
            iso_part(&mut out, d.years, 'Y');
            iso_part(&mut out, d.months, 'M');
            iso_part(&mut out, d.days, 'D');
            if d.hours != 0 || d.minutes != 0 || d.seconds != 0 || d.micros != 0 {
                out.push('T');
            }
            iso_part(&mut out, d.hours, 'H');
            iso_part(&mut out, d.minutes, 'M');
            if d.seconds != 0 || d.micros != 0 {
                if d.seconds < 0 || d.micros < 0 {
                    out.push('-');
                }
                push_seconds(&mut out, d.seconds, d.micros, false);
                out.push('S');
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(input: &str) -> DurationFields {
        match decode_duration(input, "reltime").unwrap() {
            DurationKind::Delta(fields) => fields,
            DurationKind::Invalid => panic!("unexpected invalid for {input:?}"),
        }
    }

    fn fields(years: i64, months: i64, days: i64, h: i64, m: i64, s: i64) -> DurationFields {
        DurationFields {
            years,
            months,
            days,
            hours: h,
            minutes: m,
            seconds: s,
            micros: 0,
        }
    }

    #[test]
    fn unit_words_and_clock() {
        assert_eq!(delta("3 years 2 days"), fields(3, 0, 2, 0, 0, 0));
        assert_eq!(delta("1 year 2 mons 3 days 04:05:06"), fields(1, 2, 3, 4, 5, 6));
        assert_eq!(delta("@ 1 hour 30 mins"), fields(0, 0, 0, 1, 30, 0));
        assert_eq!(delta("2 weeks"), fields(0, 0, 14, 0, 0, 0));
        assert_eq!(delta("1 decade"), fields(10, 0, 0, 0, 0, 0));
        assert_eq!(delta("90"), fields(0, 0, 0, 0, 0, 90));
        assert_eq!(delta("5d 3h"), fields(0, 0, 5, 3, 0, 0));
    }

    #[test]
    fn ago_and_negative_clock() {
        assert_eq!(delta("@ 1 day 2 hours ago"), fields(0, 0, -1, -2, 0, 0));
        assert_eq!(delta("-01:30:00"), fields(0, 0, 0, -1, -30, 0));
        assert!(decode_duration("1 day ago 2 hours", "reltime").is_err());
    }

    #[test]
    fn fractions_spill_down() {
        assert_eq!(delta("1.5 years"), fields(1, 6, 0, 0, 0, 0));
        assert_eq!(delta("1.5 days"), fields(0, 0, 1, 0, 0, 43_200));
        assert_eq!(delta("0.5 mon"), fields(0, 0, 15, 0, 0, 0));
        let d = delta("1.25 sec");
        assert_eq!((d.seconds, d.micros), (1, 250_000));
    }

    #[test]
    fn iso8601_fallback() {
        assert_eq!(delta("P1Y2M3DT4H5M6S"), fields(1, 2, 3, 4, 5, 6));
        assert_eq!(delta("P2W"), fields(0, 0, 14, 0, 0, 0));
        assert_eq!(delta("PT36H"), fields(0, 0, 0, 36, 0, 0));
        assert_eq!(delta("P0001-02-03T04:05:06"), fields(1, 2, 3, 4, 5, 6));
        assert!(decode_duration("P", "reltime").is_err());
        assert!(decode_duration("P1X", "reltime").is_err());
    }

    #[test]
    fn errors_are_classified() {
        assert_eq!(
            decode_duration("3 fortnights", "reltime"),
            Err(Error::syntax("reltime", "3 fortnights"))
        );
        assert_eq!(
            decode_duration("99999999999999999999 days", "reltime"),
            Err(Error::IntervalOutOfRange {
                input: "99999999999999999999 days".into()
            })
        );
        let saturated = "-9223372036854775807 days -1 days ago";
        assert_eq!(
            decode_duration(saturated, "reltime"),
            Err(Error::IntervalOutOfRange {
                input: saturated.into()
            })
        );
        assert!(decode_duration("", "reltime").unwrap_err().is_syntax_error());
        assert_eq!(decode_duration("invalid", "reltime"), Ok(DurationKind::Invalid));
    }

    #[test]
    fn postgres_style_output() {
        let style = IntervalStyle::Postgres;
        assert_eq!(encode_duration(&fields(0, 0, 0, 0, 0, 0), style), "00:00:00");
        assert_eq!(
            encode_duration(&fields(1, 2, 3, 4, 5, 6), style),
            "1 year 2 mons 3 days 04:05:06"
        );
        assert_eq!(encode_duration(&fields(0, 0, 1, 0, 0, 0), style), "1 day");
        assert_eq!(
            encode_duration(&fields(0, 0, -1, 2, 0, 0), style),
            "-1 days +02:00:00"
        );
        assert_eq!(encode_duration(&fields(0, 0, 0, -1, -30, 0), style), "-01:30:00");
    }

    #[test]
    fn verbose_style_output() {
        let style = IntervalStyle::PostgresVerbose;
        assert_eq!(encode_duration(&fields(0, 0, 0, 0, 0, 0), style), "@ 0");
        assert_eq!(
            encode_duration(&fields(0, 0, 1, 2, 0, 1), style),
            "@ 1 day 2 hours 1 sec"
        );
        assert_eq!(
            encode_duration(&fields(0, 0, -1, -2, 0, 0), style),
            "@ 1 day 2 hours ago"
        );
        assert_eq!(
            encode_duration(&fields(0, 0, 0, 0, 0, -30), style),
            "@ 30 secs ago"
        );
    }

    #[test]
    fn iso_style_output() {
        let style = IntervalStyle::Iso8601;
        assert_eq!(encode_duration(&fields(0, 0, 0, 0, 0, 0), style), "PT0S");
        assert_eq!(
            encode_duration(&fields(1, 2, 3, 4, 5, 6), style),
            "P1Y2M3DT4H5M6S"
        );
        assert_eq!(encode_duration(&fields(0, 0, 2, 0, 0, 0), style), "P2D");
        assert_eq!(encode_duration(&fields(0, 0, 0, 0, 0, -5), style), "PT-5S");
    }

    #[test]
    fn fractional_seconds_render() {
        let mut d = fields(0, 0, 0, 0, 0, 1);
        d.micros = 500_000;
        assert_eq!(encode_duration(&d, IntervalStyle::Postgres), "00:00:01.5");
        assert_eq!(
            encode_duration(&d, IntervalStyle::PostgresVerbose),
            "@ 1.5 secs"
        );
    }
}
