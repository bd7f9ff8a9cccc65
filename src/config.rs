// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Session-style settings consumed by the text codecs.
//!
//! The legacy types read their date style, interval style and time zone from
//! ambient session state. Here the same knobs travel explicitly as a
//! [`DateTimeConfig`] passed by reference into every call that needs them.
//!
//! All settings parse from the textual forms the legacy server accepted:
//!
//! ```
//! use abstime::{DateOrder, DateStyle, DateTimeConfig};
//!
//! let config = DateTimeConfig::default()
//!     .with_datestyle("Postgres, DMY")
//!     .unwrap();
//! assert_eq!(config.date_style, DateStyle::Postgres);
//! assert_eq!(config.date_order, DateOrder::Dmy);
//! ```

use crate::error::{Error, Result};
use chrono::FixedOffset;
use chrono_tz::Tz;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Output layout for absolute times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DateStyle {
    /// `1970-01-01 00:00:00+00`
    #[default]
    Iso,
    /// `01/01/1970 00:00:00 UTC`
    Sql,
    /// `Thu Jan 01 00:00:00 1970 UTC`
    Postgres,
    /// `01.01.1970 00:00:00 UTC`
    German,
}

/// Field order for ambiguous numeric dates, on input and output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DateOrder {
    Ymd,
    Dmy,
    #[default]
    Mdy,
}

/// Output layout for relative times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IntervalStyle {
    /// `1 year 2 mons 3 days 04:05:06`
    #[default]
    Postgres,
    /// `@ 1 year 2 mons 3 days 4 hours 5 mins 6 secs`
    PostgresVerbose,
    /// `P1Y2M3DT4H5M6S`
    Iso8601,
}

/// Session time zone.
///
/// `Fixed` is the "brute force" numeric zone: output never carries an
/// abbreviation and daylight-saving rules never apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
/// Session time zone: a named zone with its own abbreviations, or a bare
/// numeric offset.
pub enum TimeZoneSetting {
    Named(Tz),
    Fixed(FixedOffset),
}

impl Default for TimeZoneSetting {
    fn default() -> Self {
        TimeZoneSetting::Named(Tz::UTC)
    }
}

/// Everything the text codecs would otherwise read from session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DateTimeConfig {
    pub date_style: DateStyle,
    pub date_order: DateOrder,
    pub interval_style: IntervalStyle,
    pub time_zone: TimeZoneSetting,
}

impl DateTimeConfig {
    /// Default settings in the given zone.
    pub fn in_zone(time_zone: TimeZoneSetting) -> Self {
        Self {
            time_zone,
            ..Self::default()
        }
    }

    /// Replace the output date style.
    pub fn with_date_style(mut self, date_style: DateStyle) -> Self {
        self.date_style = date_style;
        self
    }

    /// Replace the day/month order used for numeric dates.
    pub fn with_date_order(mut self, date_order: DateOrder) -> Self {
        self.date_order = date_order;
        self
    }

    /// Replace the output interval style.
    pub fn with_interval_style(mut self, interval_style: IntervalStyle) -> Self {
        self.interval_style = interval_style;
        self
    }

    /// Replace the session time zone.
    pub fn with_time_zone(mut self, time_zone: TimeZoneSetting) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// Apply a combined `DateStyle` setting such as `"ISO, MDY"` or
    /// `"German"`.
    ///
    /// Each comma- or space-separated word names either an output style or
    /// an input order; naming two different styles (or two different orders)
    /// is rejected. `German` without an explicit order implies `DMY`.
    pub fn with_datestyle(mut self, value: &str) -> Result<Self> {
        let invalid = || Error::InvalidSetting {
            name: "DateStyle",
            value: value.to_owned(),
        };

        let mut style: Option<DateStyle> = None;
        let mut order: Option<DateOrder> = None;
        let mut saw_default = false;

        for word in value
            .split(|c: char| c == ',' || c.is_ascii_whitespace())
            .filter(|w| !w.is_empty())
        {
            if word.eq_ignore_ascii_case("default") {
                saw_default = true;
                continue;
            }
            if let Ok(parsed) = word.parse::<DateStyle>() {
                if style.is_some_and(|s| s != parsed) {
                    return Err(invalid());
                }
                style = Some(parsed);
            } else if let Ok(parsed) = word.parse::<DateOrder>() {
                if order.is_some_and(|o| o != parsed) {
                    return Err(invalid());
                }
                order = Some(parsed);
            } else {
                return Err(invalid());
            }
        }

        if style.is_none() && order.is_none() && !saw_default {
            return Err(invalid());
        }
        if saw_default {
            style = style.or(Some(DateStyle::Iso));
            order = order.or(Some(DateOrder::Mdy));
        }
        if let Some(style) = style {
            self.date_style = style;
            if style == DateStyle::German && order.is_none() {
                self.date_order = DateOrder::Dmy;
            }
        }
        if let Some(order) = order {
            self.date_order = order;
        }
        Ok(self)
    }
}

// ── FromStr / Display ─────────────────────────────────────────────────────

impl FromStr for DateStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "iso" => Ok(DateStyle::Iso),
            "sql" => Ok(DateStyle::Sql),
            "postgres" => Ok(DateStyle::Postgres),
            "german" => Ok(DateStyle::German),
            _ => Err(Error::InvalidSetting {
                name: "DateStyle",
                value: s.to_owned(),
            }),
        }
    }
}

impl FromStr for DateOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ymd" => Ok(DateOrder::Ymd),
            "dmy" | "euro" | "european" => Ok(DateOrder::Dmy),
            "mdy" | "us" | "noneuro" | "noneuropean" => Ok(DateOrder::Mdy),
            _ => Err(Error::InvalidSetting {
                name: "DateStyle",
                value: s.to_owned(),
            }),
        }
    }
}

impl FromStr for IntervalStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" => Ok(IntervalStyle::Postgres),
            "postgres_verbose" => Ok(IntervalStyle::PostgresVerbose),
            "iso_8601" => Ok(IntervalStyle::Iso8601),
            _ => Err(Error::InvalidSetting {
                name: "IntervalStyle",
                value: s.to_owned(),
            }),
        }
    }
}

impl FromStr for TimeZoneSetting {
    type Err = Error;

    /// Accepts an IANA name (`"Europe/Madrid"`), `UTC`/`GMT`/`Z`, or an
    /// ISO-signed numeric offset (`"+05:30"`, `"-8"`, `"+0530"`).
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let invalid = || Error::InvalidSetting {
            name: "TimeZone",
            value: s.to_owned(),
        };

        if ["utc", "gmt", "z", "zulu"]
            .iter()
            .any(|alias| trimmed.eq_ignore_ascii_case(alias))
        {
            return Ok(TimeZoneSetting::Named(Tz::UTC));
        }

        if trimmed.starts_with('+') || trimmed.starts_with('-') {
            let east = parse_offset_seconds(trimmed).ok_or_else(invalid)?;
            return FixedOffset::east_opt(east)
                .map(TimeZoneSetting::Fixed)
                .ok_or_else(invalid);
        }

        trimmed
            .parse::<Tz>()
            .map(TimeZoneSetting::Named)
            .map_err(|_| invalid())
    }
}

impl fmt::Display for TimeZoneSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeZoneSetting::Named(tz) => f.write_str(tz.name()),
            TimeZoneSetting::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

impl From<TimeZoneSetting> for String {
    fn from(value: TimeZoneSetting) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for TimeZoneSetting {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Parse `±HH`, `±HHMM`, `±HH:MM` or `±HH:MM:SS` into seconds east of UTC.
pub(crate) fn parse_offset_seconds(text: &str) -> Option<i32> {
    let (sign, body) = match text.as_bytes().first()? {
        b'+' => (1, &text[1..]),
        b'-' => (-1, &text[1..]),
        _ => return None,
    };
    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit() || b == b':') {
        return None;
    }

    let (hours, minutes, seconds) = if body.contains(':') {
        let mut parts = body.split(':');
        let h = parts.next()?.parse::<i32>().ok()?;
        let m = parts.next().map_or(Some(0), |p| p.parse::<i32>().ok())?;
        let s = parts.next().map_or(Some(0), |p| p.parse::<i32>().ok())?;
        if parts.next().is_some() {
            return None;
        }
        (h, m, s)
    } else {
        match body.len() {
            1 | 2 => (body.parse().ok()?, 0, 0),
            3 | 4 => {
                let split = body.len() - 2;
                (body[..split].parse().ok()?, body[split..].parse().ok()?, 0)
            }
            _ => return None,
        }
    };

    if hours > 15 || minutes > 59 || seconds > 59 {
        return None;
    }
    Some(sign * (hours * 3600 + minutes * 60 + seconds))
}
