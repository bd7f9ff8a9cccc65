// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Date/time text scanner, decoder and date-style encoder.
//!
//! The decoder splits its input into fields (numbers, delimited dates,
//! clock times, words, numeric offsets), assigns each field to a calendar
//! slot, and resolves the time zone last, once the wall-clock reading is
//! known. It understands every layout the encoder produces in any
//! [`DateStyle`], plus the common hand-written forms:
//!
//! | Input | Reading |
//! |-------|---------|
//! | `1970-01-01 00:00:00+00` | ISO, `T` separator also accepted |
//! | `Thu Jan 01 00:00:00 1970 PST` | Postgres style |
//! | `01/02/1970 10:00` | by [`DateOrder`] |
//! | `18 Jan 1902`, `January 18, 1902` | month names |
//! | `19700101` | packed `YYYYMMDD` |
//! | `epoch`, `infinity`, `-infinity`, `invalid` | reserved words |
//! | `now`, `today`, `tomorrow`, `yesterday` | read the clock, in the session zone |

use crate::calendar::{
    days_in_month, determine_offset, fields_of, naive_of, CalendarFields, ZonedFields,
    HOURS_PER_DAY, MINS_PER_HOUR, SECS_PER_MINUTE,
};
use crate::config::{parse_offset_seconds, DateOrder, DateStyle, DateTimeConfig, TimeZoneSetting};
use crate::error::{Error, Result};
use chrono::{LocalResult, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt::Write as _;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const DAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Abbreviations understood regardless of the session zone, in seconds
/// east of UTC.
const ZONE_ABBREVIATIONS: &[(&str, i32)] = &[
    ("utc", 0),
    ("ut", 0),
    ("gmt", 0),
    ("z", 0),
    ("zulu", 0),
    ("wet", 0),
    ("west", 3_600),
    ("bst", 3_600),
    ("cet", 3_600),
    ("met", 3_600),
    ("cest", 7_200),
    ("mest", 7_200),
    ("eet", 7_200),
    ("eest", 10_800),
    ("msk", 10_800),
    ("jst", 32_400),
    ("kst", 32_400),
    ("awst", 28_800),
    ("acst", 34_200),
    ("aest", 36_000),
    ("aedt", 39_600),
    ("nzst", 43_200),
    ("nzdt", 46_800),
    ("ast", -14_400),
    ("adt", -10_800),
    ("est", -18_000),
    ("edt", -14_400),
    ("cst", -21_600),
    ("cdt", -18_000),
    ("mst", -25_200),
    ("mdt", -21_600),
    ("pst", -28_800),
    ("pdt", -25_200),
    ("akst", -32_400),
    ("akdt", -28_800),
    ("hst", -36_000),
];

/// Classification of a decoded date/time string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DateKind {
    /// A concrete wall-clock reading and its offset in seconds west of UTC.
    Date { fields: CalendarFields, tz: i32 },
    Epoch,
    Late,
    Early,
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field<'a> {
    Number(&'a str),
    Date(&'a str, char),
    Time(&'a str),
    Word(&'a str),
    Offset(&'a str),
    SignedWord(&'a str),
}

/// Split `input` into fields; `None` means the text is not tokenizable.
fn tokenize(input: &str) -> Option<Vec<Field<'_>>> {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let digit_at = |i: usize| bytes.get(i).is_some_and(u8::is_ascii_digit);
    let alpha_at = |i: usize| bytes.get(i).is_some_and(u8::is_ascii_alphabetic);

    let mut fields = Vec::new();
    let mut i = 0;
    while i < len {
        let c = bytes[i];
        if c.is_ascii_whitespace() || c == b',' {
            i += 1;
        } else if c.is_ascii_digit() {
            let start = i;
            while digit_at(i) {
                i += 1;
            }
            match bytes.get(i) {
                Some(b':') => {
                    while i < len && (bytes[i].is_ascii_digit() || matches!(bytes[i], b':' | b'.'))
                    {
                        i += 1;
                    }
                    fields.push(Field::Time(&input[start..i]));
                }
                Some(&sep @ (b'-' | b'/' | b'.')) if digit_at(i + 1) => {
                    while i < len && (bytes[i].is_ascii_digit() || bytes[i] == sep) {
                        i += 1;
                    }
                    fields.push(Field::Date(&input[start..i], sep as char));
                }
                _ => fields.push(Field::Number(&input[start..i])),
            }
            // ISO 8601 `T` between date and time.
            if matches!(bytes.get(i), Some(b'T' | b't')) && digit_at(i + 1) {
                i += 1;
            }
        } else if c.is_ascii_alphabetic() {
            let start = i;
            while i < len && (bytes[i].is_ascii_alphabetic() || matches!(bytes[i], b'/' | b'_')) {
                i += 1;
            }
            fields.push(Field::Word(&input[start..i]));
        } else if c == b'+' || c == b'-' {
            let start = i;
            i += 1;
            if digit_at(i) {
                while digit_at(i) || bytes.get(i) == Some(&b':') {
                    i += 1;
                }
                fields.push(Field::Offset(&input[start..i]));
            } else if alpha_at(i) {
                while alpha_at(i) {
                    i += 1;
                }
                fields.push(Field::SignedWord(&input[start..i]));
            } else {
                return None;
            }
        } else {
            return None;
        }
    }
    Some(fields)
}

fn special_word(word: &str) -> Option<DateKind> {
    match word.to_ascii_lowercase().as_str() {
        "epoch" => Some(DateKind::Epoch),
        "infinity" | "+infinity" => Some(DateKind::Late),
        "-infinity" => Some(DateKind::Early),
        "invalid" => Some(DateKind::Invalid),
        _ => None,
    }
}

const CLOCK_WORDS: [&str; 4] = ["now", "today", "tomorrow", "yesterday"];

/// `now`, or midnight of `today`, `tomorrow` or `yesterday`, as seen from
/// the session zone.
fn clock_word(word: &str, config: &DateTimeConfig) -> Option<DateKind> {
    let days = match word.to_ascii_lowercase().as_str() {
        "now" => None,
        "today" => Some(0),
        "tomorrow" => Some(1),
        "yesterday" => Some(-1),
        _ => return None,
    };
    let now = Utc::now();
    let (local, tz) = match &config.time_zone {
        TimeZoneSetting::Named(zone) => {
            let local = now.with_timezone(zone);
            (local.naive_local(), -local.offset().fix().local_minus_utc())
        }
        TimeZoneSetting::Fixed(offset) => (
            now.with_timezone(offset).naive_local(),
            -offset.local_minus_utc(),
        ),
    };
    let Some(days) = days else {
        return Some(DateKind::Date {
            fields: fields_of(&local),
            tz,
        });
    };
    let midnight = local
        .date()
        .checked_add_signed(TimeDelta::days(days))?
        .and_hms_opt(0, 0, 0)?;
    let fields = fields_of(&midnight);
    let tz = determine_offset(&fields, &config.time_zone);
    Some(DateKind::Date { fields, tz })
}

fn month_number(word: &str) -> Option<i32> {
    let month = match word {
        "jan" | "january" => 1,
        "feb" | "february" => 2,
        "mar" | "march" => 3,
        "apr" | "april" => 4,
        "may" => 5,
        "jun" | "june" => 6,
        "jul" | "july" => 7,
        "aug" | "august" => 8,
        "sep" | "sept" | "september" => 9,
        "oct" | "october" => 10,
        "nov" | "november" => 11,
        "dec" | "december" => 12,
        _ => return None,
    };
    Some(month)
}

fn is_weekday(word: &str) -> bool {
    matches!(
        word,
        "sun"
            | "sunday"
            | "mon"
            | "monday"
            | "tue"
            | "tues"
            | "tuesday"
            | "wed"
            | "wednesday"
            | "thu"
            | "thur"
            | "thurs"
            | "thursday"
            | "fri"
            | "friday"
            | "sat"
            | "saturday"
    )
}

fn two_digit_year(text: &str, value: i32) -> i32 {
    if text.len() > 2 {
        value
    } else if value < 70 {
        2000 + value
    } else {
        1900 + value
    }
}

/// Slots filled while walking the fields.
#[derive(Debug, Default)]
struct Slots<'a> {
    year: Option<i32>,
    month: Option<i32>,
    day: Option<i32>,
    clock: Option<(i32, i32, i32)>,
    meridiem: Option<bool>,
    bc: bool,
    offset: Option<i32>,
    zone_word: Option<&'a str>,
}

/// Decode date/time text into a [`DateKind`].
///
/// `type_name` only labels the error messages.
pub(crate) fn decode_date_time(
    input: &str,
    config: &DateTimeConfig,
    type_name: &'static str,
) -> Result<DateKind> {
    let syntax = || Error::syntax(type_name, input);
    let range = || Error::out_of_range(type_name, input);

    let fields = tokenize(input).ok_or_else(syntax)?;
    if let [Field::Word(word) | Field::SignedWord(word)] = fields.as_slice() {
        if let Some(kind) = special_word(word) {
            return Ok(kind);
        }
        if let Some(kind) = clock_word(word, config) {
            return Ok(kind);
        }
    }

    let mut slots = Slots::default();
    for field in &fields {
        match *field {
            Field::Number(text) => {
                let value: i32 = text.parse().map_err(|_| range())?;
                if text.len() == 8 && slots.year.is_none() && slots.month.is_none() {
                    slots.year = Some(value / 10_000);
                    slots.month = Some(value / 100 % 100);
                    slots.day = Some(value % 100);
                } else if text.len() <= 2 && slots.day.is_none() {
                    slots.day = Some(value);
                } else if slots.year.is_none() {
                    slots.year = Some(two_digit_year(text, value));
                } else {
                    return Err(syntax());
                }
            }
            Field::Date(text, sep) => {
                if slots.year.is_some() || slots.month.is_some() || slots.day.is_some() {
                    return Err(syntax());
                }
                let parts: Vec<&str> = text.split(sep).collect();
                let [a, b, c] = parts.as_slice() else {
                    return Err(syntax());
                };
                let num = |s: &str| s.parse::<i32>().map_err(|_| range());
                let (y, m, d) = if a.len() > 2 {
                    (a, b, c)
                } else {
                    match config.date_order {
                        DateOrder::Dmy => (c, b, a),
                        DateOrder::Ymd if c.len() <= 2 => (a, b, c),
                        DateOrder::Mdy | DateOrder::Ymd => (c, a, b),
                    }
                };
                slots.year = Some(two_digit_year(y, num(y)?));
                slots.month = Some(num(m)?);
                slots.day = Some(num(d)?);
            }
            Field::Time(text) => {
                if slots.clock.is_some() {
                    return Err(syntax());
                }
                slots.clock = Some(parse_clock(text).ok_or_else(syntax)?);
            }
            Field::Offset(text) => {
                if slots.offset.is_some() || slots.zone_word.is_some() {
                    return Err(syntax());
                }
                let east = parse_offset_seconds(text).ok_or_else(syntax)?;
                slots.offset = Some(-east);
            }
            Field::SignedWord(_) => return Err(syntax()),
            Field::Word(word) => {
                let lower = word.to_ascii_lowercase();
                if let Some(month) = month_number(&lower) {
                    if slots.month.is_some() {
                        return Err(syntax());
                    }
                    slots.month = Some(month);
                } else if is_weekday(&lower) || lower == "t" || lower == "ad" {
                    continue;
                } else if lower == "am" || lower == "pm" {
                    slots.meridiem = Some(lower == "pm");
                } else if lower == "bc" {
                    slots.bc = true;
                } else if special_word(&lower).is_some()
                    || CLOCK_WORDS.contains(&lower.as_str())
                {
                    return Err(syntax());
                } else {
                    if slots.offset.is_some() || slots.zone_word.is_some() {
                        return Err(syntax());
                    }
                    slots.zone_word = Some(word);
                }
            }
        }
    }

    let (Some(mut year), Some(month), Some(day)) = (slots.year, slots.month, slots.day) else {
        return Err(syntax());
    };
    if slots.bc {
        year = 1 - year;
    }
    let (mut hour, minute, second) = slots.clock.unwrap_or((0, 0, 0));
    if let Some(pm) = slots.meridiem {
        if !(0..=12).contains(&hour) {
            return Err(range());
        }
        hour = match (pm, hour) {
            (false, 12) => 0,
            (true, h) if h < 12 => h + 12,
            (_, h) => h,
        };
    }

    if !(-4713..=294_276).contains(&year)
        || !(1..=12).contains(&month)
        || day < 1
        || day > days_in_month(year, month)
        || !(0..=HOURS_PER_DAY).contains(&hour)
        || !(0..MINS_PER_HOUR).contains(&minute)
        || !(0..=SECS_PER_MINUTE).contains(&second)
    {
        return Err(range());
    }

    let fields = CalendarFields {
        year,
        month,
        day,
        hour,
        minute,
        second,
    };
    let tz = match (slots.offset, slots.zone_word) {
        (Some(tz), _) => tz,
        (None, Some(word)) => resolve_zone_word(word, &fields, &config.time_zone)?,
        (None, None) => determine_offset(&fields, &config.time_zone),
    };
    Ok(DateKind::Date { fields, tz })
}

/// `HH:MM[:SS[.fraction]]`; the fraction is dropped.
fn parse_clock(text: &str) -> Option<(i32, i32, i32)> {
    let mut parts = text.split(':');
    let hour = parts.next()?.parse().ok()?;
    let minute = parts.next()?.parse().ok()?;
    let second = match parts.next() {
        Some(sec) => {
            let whole = sec.split_once('.').map_or(sec, |(whole, fraction)| {
                if fraction.bytes().all(|b| b.is_ascii_digit()) {
                    whole
                } else {
                    ""
                }
            });
            whole.parse().ok()?
        }
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }
    Some((hour, minute, second))
}

/// Resolve a zone word in context: the session zone's own abbreviation
/// first, then the fixed abbreviation table, then IANA names.
fn resolve_zone_word(word: &str, fields: &CalendarFields, session: &TimeZoneSetting) -> Result<i32> {
    if let TimeZoneSetting::Named(tz) = session {
        if let Some(tz) = session_abbreviation_offset(word, fields, tz) {
            return Ok(tz);
        }
    }

    let lower = word.to_ascii_lowercase();
    if let Some((_, east)) = ZONE_ABBREVIATIONS.iter().find(|(name, _)| *name == lower) {
        return Ok(-east);
    }

    if let Ok(tz) = word.parse::<Tz>() {
        return Ok(determine_offset(fields, &TimeZoneSetting::Named(tz)));
    }

    log::debug!("unrecognized time zone word {word:?}");
    Err(Error::UnknownTimeZone {
        zone: word.to_owned(),
    })
}

fn session_abbreviation_offset(word: &str, fields: &CalendarFields, tz: &Tz) -> Option<i32> {
    let naive = naive_of(fields)?;
    let candidates = match tz.from_local_datetime(&naive) {
        LocalResult::Single(local) => vec![local],
        LocalResult::Ambiguous(earlier, later) => vec![earlier, later],
        LocalResult::None => Vec::new(),
    };
    candidates
        .into_iter()
        .find(|local| local.format("%Z").to_string().eq_ignore_ascii_case(word))
        .map(|local| -local.offset().fix().local_minus_utc())
}

/// Numeric zone in legacy form: `+HH`, `+HH:MM` or `+HH:MM:SS`, with the
/// sign flipped from the west-positive `tz`.
pub(crate) fn encode_timezone(out: &mut String, tz: i32) {
    let sign = if tz <= 0 { '+' } else { '-' };
    let secs = tz.unsigned_abs();
    let (hour, min, sec) = (secs / 3600, secs / 60 % 60, secs % 60);
    let _ = match (min, sec) {
        (_, s) if s != 0 => write!(out, "{sign}{hour:02}:{min:02}:{s:02}"),
        (m, _) if m != 0 => write!(out, "{sign}{hour:02}:{m:02}"),
        _ => write!(out, "{sign}{hour:02}"),
    };
}

/// Render zoned calendar fields in the requested date style.
pub(crate) fn encode_date_time(zoned: &ZonedFields, style: DateStyle, order: DateOrder) -> String {
    let tm = &zoned.fields;
    let month_name = MONTHS[(tm.month - 1).clamp(0, 11) as usize];
    let mut out = String::with_capacity(64);

    let _ = match style {
        DateStyle::Iso => write!(
            out,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            tm.year, tm.month, tm.day, tm.hour, tm.minute, tm.second
        ),
        DateStyle::Sql => {
            let (first, second) = match order {
                DateOrder::Dmy => (tm.day, tm.month),
                DateOrder::Mdy | DateOrder::Ymd => (tm.month, tm.day),
            };
            write!(
                out,
                "{first:02}/{second:02}/{:04} {:02}:{:02}:{:02}",
                tm.year, tm.hour, tm.minute, tm.second
            )
        }
        DateStyle::German => write!(
            out,
            "{:02}.{:02}.{:04} {:02}:{:02}:{:02}",
            tm.day, tm.month, tm.year, tm.hour, tm.minute, tm.second
        ),
        DateStyle::Postgres => {
            let weekday = DAYS[(zoned.weekday % 7) as usize];
            let _ = match order {
                DateOrder::Dmy => write!(out, "{weekday} {:02} {month_name}", tm.day),
                DateOrder::Mdy | DateOrder::Ymd => {
                    write!(out, "{weekday} {month_name} {:02}", tm.day)
                }
            };
            write!(
                out,
                " {:02}:{:02}:{:02} {:04}",
                tm.hour, tm.minute, tm.second, tm.year
            )
        }
    };

    match (&zoned.zone, style) {
        (_, DateStyle::Iso) => encode_timezone(&mut out, zoned.tz),
        (Some(zone), _) => {
            out.push(' ');
            out.push_str(zone);
        }
        (None, DateStyle::Postgres) => {
            out.push(' ');
            encode_timezone(&mut out, zoned.tz);
        }
        (None, _) => encode_timezone(&mut out, zoned.tz),
    }
    out
}

/// Current wall-clock time with microseconds, e.g.
/// `Thu Oct 15 09:12:44.123456 2026 CEST`.
pub fn time_of_day(config: &DateTimeConfig) -> String {
    const LAYOUT: &str = "%a %b %d %H:%M:%S%.6f %Y %Z";
    let now = Utc::now();
    match config.time_zone {
        TimeZoneSetting::Named(tz) => now.with_timezone(&tz).format(LAYOUT).to_string(),
        TimeZoneSetting::Fixed(offset) => now.with_timezone(&offset).format(LAYOUT).to_string(),
    }
}
