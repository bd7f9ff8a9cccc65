// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Legacy absolute time: 32-bit seconds since 1970-01-01 UTC.
//!
//! Three raw values near the ends of the `i32` range are sentinels:
//!
//! | Variant | Raw | Text |
//! |---------|-----|------|
//! | [`AbsoluteTime::NoStart`] | `i32::MIN` | `-infinity` |
//! | [`AbsoluteTime::NoEnd`] | `0x7FFFFFFC` | `infinity` |
//! | [`AbsoluteTime::Invalid`] | `0x7FFFFFFE` | `invalid` |
//!
//! `0x7FFFFFFD` and `0x7FFFFFFF` are never produced by decoding text or by
//! arithmetic, but they are accepted from the wire as non-finite `Real`
//! values that sort between `NoEnd` and `Invalid`.
//!
//! Ordering is numeric on the raw value, except that every `Invalid`
//! compares equal to every other `Invalid` and greater than anything else:
//!
//! ```
//! use abstime::AbsoluteTime;
//!
//! let mut times = vec![
//!     AbsoluteTime::Invalid,
//!     AbsoluteTime::NoEnd,
//!     AbsoluteTime::Real(0),
//!     AbsoluteTime::NoStart,
//! ];
//! times.sort();
//! assert_eq!(
//!     times,
//!     [
//!         AbsoluteTime::NoStart,
//!         AbsoluteTime::Real(0),
//!         AbsoluteTime::NoEnd,
//!         AbsoluteTime::Invalid,
//!     ]
//! );
//! ```

use crate::calendar::{abstime2tm, determine_offset, fields_of, naive_of, tm2abstime};
use crate::config::DateTimeConfig;
use crate::datetime::{decode_date_time, encode_date_time, DateKind};
use crate::error::{Error, Result};
use crate::reltime::RelativeTime;
use crate::timestamp::{LocalTimestamp, Timestamp, UtcTimestamp};
use crate::wire::read_i32;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub(crate) const NOSTART_RAW: i32 = i32::MIN;
pub(crate) const NOEND_RAW: i32 = 0x7FFF_FFFC;
pub(crate) const INVALID_RAW: i32 = 0x7FFF_FFFE;

const INVALID_TEXT: &str = "invalid";
const LATE_TEXT: &str = "infinity";
const EARLY_TEXT: &str = "-infinity";

/// A point in time with 1-second resolution, or one of three sentinels.
///
/// Variants compare, hash and render by their raw value, so `Real(i32::MIN)`
/// is the same value as `NoStart`. [`AbsoluteTime::from_raw`] gives the
/// canonical variant for any raw value.
#[derive(Debug, Clone, Copy)]
pub enum AbsoluteTime {
    Real(i32),
    /// Negative infinity.
    NoStart,
    /// Positive infinity.
    NoEnd,
    Invalid,
}

impl AbsoluteTime {
    /// The Unix epoch.
    pub const EPOCH: Self = AbsoluteTime::Real(0);

    // ── raw representation ────────────────────────────────────────────

    /// Classify a raw 32-bit value into its canonical variant.
    pub const fn from_raw(raw: i32) -> Self {
        match raw {
            NOSTART_RAW => AbsoluteTime::NoStart,
            NOEND_RAW => AbsoluteTime::NoEnd,
            INVALID_RAW => AbsoluteTime::Invalid,
            seconds => AbsoluteTime::Real(seconds),
        }
    }

    /// Raw 32-bit value on the wire.

    pub const fn to_raw(self) -> i32 {
        match self {
            AbsoluteTime::Real(seconds) => seconds,
            AbsoluteTime::NoStart => NOSTART_RAW,
            AbsoluteTime::NoEnd => NOEND_RAW,
            AbsoluteTime::Invalid => INVALID_RAW,
        }
    }

    /// `true` for real values strictly between the two infinities.
    #[inline]
    pub const fn is_finite(self) -> bool {
        let raw = self.to_raw();
        raw > NOSTART_RAW && raw < NOEND_RAW
    }

    /// `true` for `Invalid` and for `Real(0x7FFFFFFE)`.
    #[inline]
    pub const fn is_invalid(self) -> bool {
        self.to_raw() == INVALID_RAW
    }

    /// Seconds since the epoch, for finite values only.
    pub const fn seconds(self) -> Option<i32> {
        if self.is_finite() {
            Some(self.to_raw())
        } else {
            None
        }
    }

    /// Current time, `Invalid` once the clock has passed 2038-01-18.
    pub fn now() -> Self {
        tm2abstime(&fields_of(&Utc::now().naive_utc()), 0)
    }

    // ── comparison ────────────────────────────────────────────────────

    fn cmp_internal(self, other: Self) -> Ordering {
        match (self.is_invalid(), other.is_invalid()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self.to_raw().cmp(&other.to_raw()),
        }
    }

    /// Three-way comparison as `-1`, `0` or `1`, for index support code.
    pub fn btree_cmp(self, other: Self) -> i32 {
        self.cmp_internal(other) as i32
    }

    // ── text codec ────────────────────────────────────────────────────

    /// Decode date/time text under the given session settings.
    pub fn decode_text(input: &str, config: &DateTimeConfig) -> Result<Self> {
        let time = match decode_date_time(input, config, "abstime")? {
            DateKind::Date { fields, tz } => tm2abstime(&fields, tz),
            DateKind::Epoch => AbsoluteTime::EPOCH,
            DateKind::Late => AbsoluteTime::NoEnd,
            DateKind::Early => AbsoluteTime::NoStart,
            DateKind::Invalid => AbsoluteTime::Invalid,
        };
        if time.is_invalid() {
            log::trace!("abstime text {input:?} decoded to invalid");
        }
        Ok(time)
    }

    /// Render in the configured date style and time zone.
    pub fn encode_text(&self, config: &DateTimeConfig) -> String {
        match Self::from_raw(self.to_raw()) {
            AbsoluteTime::Invalid => INVALID_TEXT.to_owned(),
            AbsoluteTime::NoEnd => LATE_TEXT.to_owned(),
            AbsoluteTime::NoStart => EARLY_TEXT.to_owned(),
            AbsoluteTime::Real(seconds) => {
                let zoned = abstime2tm(seconds, &config.time_zone);
                encode_date_time(&zoned, config.date_style, config.date_order)
            }
        }
    }

    // ── binary codec ──────────────────────────────────────────────────

    /// Read one big-endian `i32`. Every raw value is accepted.
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

    // ── timestamp conversions ─────────────────────────────────────────

    /// Wall-clock timestamp in the configured zone.
    pub fn to_timestamp(&self, config: &DateTimeConfig) -> Result<LocalTimestamp> {
        match Self::from_raw(self.to_raw()) {
            AbsoluteTime::NoStart => Ok(Timestamp::NoBegin),
            AbsoluteTime::NoEnd => Ok(Timestamp::NoEnd),
            AbsoluteTime::Invalid => Err(Error::InvalidAbstimeConversion),
            time => {
                let zoned = abstime2tm(time.to_raw(), &config.time_zone);
                naive_of(&zoned.fields)
                    .map(Timestamp::At)
                    .ok_or(Error::TimestampOutOfRange)
            }
        }
    }

    /// UTC instant.
    pub fn to_timestamptz(&self) -> Result<UtcTimestamp> {
        match Self::from_raw(self.to_raw()) {
            AbsoluteTime::NoStart => Ok(Timestamp::NoBegin),
            AbsoluteTime::NoEnd => Ok(Timestamp::NoEnd),
            AbsoluteTime::Invalid => Err(Error::InvalidAbstimeConversion),
            time => DateTime::from_timestamp(i64::from(time.to_raw()), 0)
                .map(Timestamp::At)
                .ok_or(Error::TimestampOutOfRange),
        }
    }

    /// Interpret a wall-clock timestamp in the configured zone.
    ///
    /// Readings outside the representable 1901–2038 span are an error,
    /// never `Invalid`.
    pub fn from_timestamp(timestamp: &LocalTimestamp, config: &DateTimeConfig) -> Result<Self> {
        match timestamp {
            Timestamp::NoBegin => Ok(AbsoluteTime::NoStart),
            Timestamp::NoEnd => Ok(AbsoluteTime::NoEnd),
            Timestamp::At(naive) => {
                let fields = fields_of(naive);
                let tz = determine_offset(&fields, &config.time_zone);
                finite_or_out_of_range(tm2abstime(&fields, tz))
            }
        }
    }

    /// Convert a UTC instant. Instants outside 1901–2038 are an error.
    pub fn from_timestamptz(timestamp: &UtcTimestamp) -> Result<Self> {
        match timestamp {
            Timestamp::NoBegin => Ok(AbsoluteTime::NoStart),
            Timestamp::NoEnd => Ok(AbsoluteTime::NoEnd),
            Timestamp::At(instant) => {
                finite_or_out_of_range(tm2abstime(&fields_of(&instant.naive_utc()), 0))
            }
        }
    }
}

fn finite_or_out_of_range(time: AbsoluteTime) -> Result<AbsoluteTime> {
    if time.is_finite() {
        Ok(time)
    } else {
        log::debug!("timestamp outside the abstime range");
        Err(Error::TimestampOutOfRange)
    }
}

// ── Ordering ──────────────────────────────────────────────────────────────

impl PartialEq for AbsoluteTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_internal(*other) == Ordering::Equal
    }
}

impl Eq for AbsoluteTime {}

impl PartialOrd for AbsoluteTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AbsoluteTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_internal(*other)
    }
}

impl Hash for AbsoluteTime {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_raw().hash(state);
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl Add<RelativeTime> for AbsoluteTime {
    type Output = AbsoluteTime;

    /// `Invalid` unless `self` is finite, `rhs` is valid, and the sum stays
    /// strictly between the infinities.
    fn add(self, rhs: RelativeTime) -> AbsoluteTime {
        let t1 = self.to_raw();
        match rhs.seconds() {
            Some(t2)
                if self.is_finite()
                    && ((t2 > 0 && t1 < NOEND_RAW - t2) || (t2 <= 0 && t1 > NOSTART_RAW - t2)) =>
            {
                AbsoluteTime::Real(t1 + t2)
            }
            _ => {
                log::trace!("abstime {t1} + {rhs:?} is invalid");
                AbsoluteTime::Invalid
            }
        }
    }
}

impl Sub<RelativeTime> for AbsoluteTime {
    type Output = AbsoluteTime;

    fn sub(self, rhs: RelativeTime) -> AbsoluteTime {
        let t1 = self.to_raw();
        match rhs.seconds() {
            Some(t2)
                if self.is_finite()
                    && ((t2 > 0 && t1 > NOSTART_RAW + t2) || (t2 <= 0 && t1 < NOEND_RAW + t2)) =>
            {
                AbsoluteTime::Real(t1 - t2)
            }
            _ => {
                log::trace!("abstime {t1} - {rhs:?} is invalid");
                AbsoluteTime::Invalid
            }
        }
    }
}

// ── Display / FromStr ─────────────────────────────────────────────────────

impl fmt::Display for AbsoluteTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode_text(&DateTimeConfig::default()))
    }
}

impl FromStr for AbsoluteTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode_text(s, &DateTimeConfig::default())
    }
}

impl From<AbsoluteTime> for i32 {
    fn from(time: AbsoluteTime) -> Self {
        time.to_raw()
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for AbsoluteTime {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i32(self.to_raw())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for AbsoluteTime {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        i32::deserialize(deserializer).map(AbsoluteTime::from_raw)
    }
}
