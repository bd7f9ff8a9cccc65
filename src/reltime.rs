// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Legacy relative time: a signed 32-bit count of seconds.
//!
//! `i32::MIN` is reserved as the `Invalid` sentinel, so the representable
//! span is `-(2^31 - 1) ..= 2^31 - 1`. Calendar units flatten with fixed
//! constants: one year is 365.25 days and one month is 30 days.

use crate::calendar::{DAYS_PER_MONTH, SECS_PER_DAY, SECS_PER_HOUR, SECS_PER_MINUTE, SECS_PER_YEAR};
use crate::config::DateTimeConfig;
use crate::duration::{decode_duration, encode_duration, DurationFields, DurationKind};
use crate::error::{Error, Result};
use crate::interval::{Interval, USECS_PER_SEC};
use crate::wire::read_i32;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use qtty::Seconds;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub(crate) const INVALID_RAW: i32 = i32::MIN;

const SECS_PER_MONTH: i32 = DAYS_PER_MONTH * SECS_PER_DAY;

/// A signed span of whole seconds, or `Invalid`.
#[derive(Debug, Clone, Copy)]
pub enum RelativeTime {
    Seconds(i32),
    Invalid,
}

impl RelativeTime {
    /// The empty span.
    pub const ZERO: Self = RelativeTime::Seconds(0);

    /// Classify a raw 32-bit value; every value is meaningful.
    pub const fn from_raw(raw: i32) -> Self {
        match raw {
            INVALID_RAW => RelativeTime::Invalid,
            seconds => RelativeTime::Seconds(seconds),
        }
    }

    /// Raw 32-bit value on the wire; `i32::MIN` for `Invalid`.
    pub const fn to_raw(self) -> i32 {
        match self {
            RelativeTime::Seconds(seconds) => seconds,
            RelativeTime::Invalid => INVALID_RAW,
        }
    }

    /// `false` only for `Invalid`.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.to_raw() != INVALID_RAW
    }

    /// The span in seconds, `None` when invalid.
    pub const fn seconds(self) -> Option<i32> {
        if self.is_valid() {
            Some(self.to_raw())
        } else {
            None
        }
    }

    /// The span as a unit-typed quantity.
    pub fn to_seconds(self) -> Option<Seconds> {
        self.seconds().map(|s| Seconds::new(f64::from(s)))
    }

    fn cmp_internal(self, other: Self) -> Ordering {
        match (self.is_valid(), other.is_valid()) {
            (false, false) => Ordering::Equal,
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (true, true) => self.to_raw().cmp(&other.to_raw()),
        }
    }

    /// Three-way comparison as `-1`, `0` or `1`.
    pub fn btree_cmp(self, other: Self) -> i32 {
        self.cmp_internal(other) as i32
    }

    /// Decode calendar-interval text such as `3 years 2 days` or `P1DT2H`.
    ///
    /// Years count 365.25 days and months 30 days. Sub-second parts are
    /// dropped. A total of exactly `i32::MIN` is `Invalid`; totals outside
    /// `i32` are an error.
    pub fn decode_text(input: &str) -> Result<Self> {
        let fields = match decode_duration(input, "reltime")? {
            DurationKind::Delta(fields) => fields,
            DurationKind::Invalid => {
                return Err(Error::UnexpectedDateType {
                    kind: "invalid",
                    type_name: "reltime",
                    input: input.to_owned(),
                })
            }
        };
        let total = flatten(&fields);
        match i32::try_from(total) {
            Ok(seconds) => Ok(RelativeTime::from_raw(seconds)),
            Err(_) => {
                log::debug!("reltime text {input:?} flattens to {total} seconds");
                Err(Error::IntervalOutOfRange {
                    input: input.to_owned(),
                })
            }
        }
    }

    /// Render in the configured interval style. `Invalid` renders as the
    /// span of its raw value, which decodes back to `Invalid`.
    pub fn encode_text(&self, config: &DateTimeConfig) -> String {
        encode_duration(&decompose(self.to_raw()), config.interval_style)
    }

    /// Read one big-endian `i32`.
    pub fn decode_binary<B: Buf>(buf: &mut B) -> Result<Self> {
        read_i32(buf).map(Self::from_raw)
    }

    /// Write the raw value as one big-endian `i32`.
    pub fn encode_binary<B: BufMut>(&self, buf: &mut B) {
        buf.put_i32(self.to_raw());
    }

    /// The four-byte wire form.
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(4);
        self.encode_binary(&mut buf);
        buf.freeze()
    }
}

fn flatten(d: &DurationFields) -> i128 {
    let clock = (i128::from(d.hours) * 60 + i128::from(d.minutes)) * 60 + i128::from(d.seconds);
    let days = i128::from(d.months) * i128::from(DAYS_PER_MONTH) + i128::from(d.days);
    clock + i128::from(d.years) * i128::from(SECS_PER_YEAR) + days * i128::from(SECS_PER_DAY)
}

/// Split seconds into calendar fields by truncating division, every field
/// carrying the sign of the input.
fn decompose(seconds: i32) -> DurationFields {
    let mut rest = seconds;
    let mut take = |unit: i32| {
        let q = rest / unit;
        rest -= q * unit;
        i64::from(q)
    };
    DurationFields {
        years: take(SECS_PER_YEAR),
        months: take(SECS_PER_MONTH),
        days: take(SECS_PER_DAY),
        hours: take(SECS_PER_HOUR),
        minutes: take(SECS_PER_MINUTE),
        seconds: take(1),
        micros: 0,
    }
}

// ── Ordering ──────────────────────────────────────────────────────────────

impl PartialEq for RelativeTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_internal(*other) == Ordering::Equal
    }
}

impl Eq for RelativeTime {}

impl PartialOrd for RelativeTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RelativeTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_internal(*other)
    }
}

impl Hash for RelativeTime {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_raw().hash(state);
    }
}

// ── Interval conversions ──────────────────────────────────────────────────

impl From<Interval> for RelativeTime {
    /// Flatten with 365.25-day years and 30-day months, truncating
    /// microseconds. Spans outside `i32` become `Invalid`.
    fn from(interval: Interval) -> Self {
        let years = i128::from(interval.months() / 12);
        let months = i128::from(interval.months() % 12);
        let days = i128::from(interval.days());
        let micros = (365_250_000 * years + 30_000_000 * months + 1_000_000 * days)
            * i128::from(SECS_PER_DAY)
            + i128::from(interval.micros());
        let span = micros / i128::from(USECS_PER_SEC);
        match i32::try_from(span) {
            Ok(seconds) => RelativeTime::from_raw(seconds),
            Err(_) => {
                log::trace!("interval {interval:?} does not fit a reltime");
                RelativeTime::Invalid
            }
        }
    }
}

impl TryFrom<RelativeTime> for Interval {
    type Error = Error;

    fn try_from(time: RelativeTime) -> Result<Self> {
        let mut rest = time.seconds().ok_or(Error::InvalidReltimeConversion)?;
        let years = rest / SECS_PER_YEAR;
        rest -= years * SECS_PER_YEAR;
        let months = rest / SECS_PER_MONTH;
        rest -= months * SECS_PER_MONTH;
        let days = rest / SECS_PER_DAY;
        rest -= days * SECS_PER_DAY;
        Ok(Interval::new(
            12 * years + months,
            days,
            i64::from(rest) * USECS_PER_SEC,
        ))
    }
}

// ── Display / FromStr ─────────────────────────────────────────────────────

impl fmt::Display for RelativeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode_text(&DateTimeConfig::default()))
    }
}

impl FromStr for RelativeTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode_text(s)
    }
}

impl From<RelativeTime> for i32 {
    fn from(time: RelativeTime) -> Self {
        time.to_raw()
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for RelativeTime {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i32(self.to_raw())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for RelativeTime {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        i32::deserialize(deserializer).map(RelativeTime::from_raw)
    }
}
