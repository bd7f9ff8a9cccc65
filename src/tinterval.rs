// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Closed interval between two absolute times.
//!
//! Endpoints are stored in canonical `(min, max)` order under the
//! absolute-time ordering, so an `Invalid` endpoint always ends up as the
//! end. An interval with an `Invalid` endpoint has status
//! [`IntervalStatus::Invalid`].
//!
//! Ordering and equality look at the **length** only:
//!
//! ```
//! use abstime::{AbsoluteTime, TimeInterval};
//!
//! let a = TimeInterval::new(AbsoluteTime::Real(0), AbsoluteTime::Real(100));
//! let b = TimeInterval::new(AbsoluteTime::Real(600), AbsoluteTime::Real(500));
//! assert_eq!(a, b);
//! assert!(!a.same(&b));
//! ```
//!
//! Lengths are computed in 32 bits and wrap for spans longer than about
//! 68 years, and the infinities are treated as ordinary numbers there.

use crate::abstime::AbsoluteTime;
use crate::config::DateTimeConfig;
use crate::error::{Error, Result};
use crate::grammar::{parse_literal, Literal, UNDEFINED_RANGE};
use crate::reltime::RelativeTime;
use crate::wire::read_i32;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use qtty::{Day, Days};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{de, ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer};

/// Validity flag carried next to the endpoints, also on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum IntervalStatus {
    Invalid = 0,
    Valid = 1,
}

impl IntervalStatus {
    fn of(start: AbsoluteTime, end: AbsoluteTime) -> Self {
        if start.is_invalid() || end.is_invalid() {
            IntervalStatus::Invalid
        } else {
            IntervalStatus::Valid
        }
    }
}

/// `[start, end]` with a validity status.
#[derive(Debug, Clone, Copy)]
pub struct TimeInterval {
    status: IntervalStatus,
    start: AbsoluteTime,
    end: AbsoluteTime,
}

impl TimeInterval {
    /// Interval spanning `t1` and `t2`, in either order.
    pub fn new(t1: AbsoluteTime, t2: AbsoluteTime) -> Self {
        Self {
            status: IntervalStatus::of(t1, t2),
            start: t1.min(t2),
            end: t1.max(t2),
        }
    }

    /// The `Undefined Range` interval.
    pub const fn undefined() -> Self {
        Self {
            status: IntervalStatus::Invalid,
            start: AbsoluteTime::Invalid,
            end: AbsoluteTime::Invalid,
        }
    }

    /// Rebuild from wire parts, checking that `status` matches the
    /// endpoints.
    fn from_parts(status: i32, start: AbsoluteTime, end: AbsoluteTime) -> Result<Self> {
        let expected = IntervalStatus::of(start, end);
        if status != expected as i32 {
            log::debug!("tinterval status {status} disagrees with endpoints {start:?}, {end:?}");
            return Err(Error::InvalidStatus { status });
        }
        Ok(Self {
            status: expected,
            start,
            end,
        })
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// Validity flag as stored on the wire.
    pub fn status(&self) -> IntervalStatus {
        self.status
    }

    /// `true` when neither endpoint is `Invalid`.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.status == IntervalStatus::Valid
    }

    /// Stored endpoints, regardless of status.
    pub fn endpoints(&self) -> (AbsoluteTime, AbsoluteTime) {
        (self.start, self.end)
    }

    /// Start, or `Invalid` for an invalid interval.
    pub fn start(&self) -> AbsoluteTime {
        if self.is_valid() {
            self.start
        } else {
            AbsoluteTime::Invalid
        }
    }

    /// End, or `Invalid` for an invalid interval.
    pub fn end(&self) -> AbsoluteTime {
        if self.is_valid() {
            self.end
        } else {
            AbsoluteTime::Invalid
        }
    }

    /// `end - start`, or `Invalid` unless the interval is valid with two
    /// finite endpoints. The difference wraps in 32 bits.
    pub fn length(&self) -> RelativeTime {
        if self.is_valid() && self.start.is_finite() && self.end.is_finite() {
            RelativeTime::from_raw(self.end.to_raw().wrapping_sub(self.start.to_raw()))
        } else {
            RelativeTime::Invalid
        }
    }

    /// Length as a unit-typed quantity.
    pub fn duration_days(&self) -> Option<Days> {
        self.length().to_seconds().map(|s| s.to::<Day>())
    }

    // ── range predicates ──────────────────────────────────────────────

    /// `true` iff `t` lies within a valid interval, endpoints included.
    pub fn contains_time(&self, t: AbsoluteTime) -> bool {
        self.is_valid() && !t.is_invalid() && t >= self.start && t <= self.end
    }

    /// `true` iff `other` lies entirely within `self`.
    pub fn contains(&self, other: &TimeInterval) -> bool {
        self.is_valid() && other.is_valid() && self.start <= other.start && self.end >= other.end
    }

    /// `true` iff the two valid intervals share at least one instant.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.is_valid()
            && other.is_valid()
            && !(self.end < other.start || self.start > other.end)
    }

    /// Structural equality of two valid intervals: same start, same end.
    pub fn same(&self, other: &TimeInterval) -> bool {
        self.is_valid() && other.is_valid() && self.start == other.start && self.end == other.end
    }

    // ── length predicates ─────────────────────────────────────────────

    fn length_cmp(&self, t: RelativeTime) -> Option<Ordering> {
        if !self.is_valid() || !t.is_valid() {
            return None;
        }
        let length = self.length().seconds()?;
        t.seconds().map(|t| length.cmp(&t))
    }

    /// Length equals `t`. Every length predicate is `false` when the
    /// interval, its length or `t` is invalid.
    pub fn length_eq(&self, t: RelativeTime) -> bool {
        self.length_cmp(t).is_some_and(Ordering::is_eq)
    }

    /// Length differs from `t`.
    pub fn length_ne(&self, t: RelativeTime) -> bool {
        self.length_cmp(t).is_some_and(Ordering::is_ne)
    }

    /// Length shorter than `t`.
    pub fn length_lt(&self, t: RelativeTime) -> bool {
        self.length_cmp(t).is_some_and(Ordering::is_lt)
    }

    /// Length longer than `t`.
    pub fn length_gt(&self, t: RelativeTime) -> bool {
        self.length_cmp(t).is_some_and(Ordering::is_gt)
    }

    /// Length at most `t`.
    pub fn length_le(&self, t: RelativeTime) -> bool {
        self.length_cmp(t).is_some_and(Ordering::is_le)
    }

    /// Length at least `t`.
    pub fn length_ge(&self, t: RelativeTime) -> bool {
        self.length_cmp(t).is_some_and(Ordering::is_ge)
    }

    // ── ordering ──────────────────────────────────────────────────────

    fn counts_as_invalid(&self) -> bool {
        !self.is_valid() || self.start.is_invalid() || self.end.is_invalid()
    }

    fn raw_length(&self) -> i32 {
        self.end.to_raw().wrapping_sub(self.start.to_raw())
    }

    fn cmp_internal(&self, other: &Self) -> Ordering {
        match (self.counts_as_invalid(), other.counts_as_invalid()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self.raw_length().cmp(&other.raw_length()),
        }
    }

    /// Three-way length comparison as `-1`, `0` or `1`.
    pub fn btree_cmp(&self, other: &Self) -> i32 {
        self.cmp_internal(other) as i32
    }

    // ── codecs ────────────────────────────────────────────────────────

    /// Decode `["<abstime>" "<abstime>"]` or `Undefined Range`.
    pub fn decode_text(input: &str, config: &DateTimeConfig) -> Result<Self> {
        Ok(match parse_literal(input, config)? {
            Literal::Undefined => Self::undefined(),
            Literal::Range(t1, t2) => Self::new(t1, t2),
        })
    }

    /// Render both endpoints in the session style, or `["Undefined Range"]`
    /// when invalid.
    pub fn encode_text(&self, config: &DateTimeConfig) -> String {
        if self.is_valid() {
            format!(
                "[\"{}\" \"{}\"]",
                self.start.encode_text(config),
                self.end.encode_text(config)
            )
        } else {
            format!("[\"{UNDEFINED_RANGE}\"]")
        }
    }

    /// Decode `status, start, end` and reject a status that disagrees with
    /// the endpoints.
    pub fn decode_binary<B: Buf>(buf: &mut B) -> Result<Self> {
        let status = read_i32(buf)?;
        let start = AbsoluteTime::decode_binary(buf)?;
        let end = AbsoluteTime::decode_binary(buf)?;
        Self::from_parts(status, start, end)
    }

    /// Write `status, start, end` as three big-endian `i32`s.
    pub fn encode_binary<B: BufMut>(&self, buf: &mut B) {
        buf.put_i32(self.status as i32);
        self.start.encode_binary(buf);
        self.end.encode_binary(buf);
    }

    /// The twelve-byte wire form.
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(12);
        self.encode_binary(&mut buf);
        buf.freeze()
    }
}

// ── Ordering ──────────────────────────────────────────────────────────────

impl PartialEq for TimeInterval {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_internal(other) == Ordering::Equal
    }
}

impl Eq for TimeInterval {}

impl PartialOrd for TimeInterval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeInterval {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_internal(other)
    }
}

impl Hash for TimeInterval {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.counts_as_invalid() {
            state.write_u8(0);
        } else {
            state.write_u8(1);
            self.raw_length().hash(state);
        }
    }
}

// ── Display / FromStr ─────────────────────────────────────────────────────

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode_text(&DateTimeConfig::default()))
    }
}

impl FromStr for TimeInterval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode_text(s, &DateTimeConfig::default())
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for TimeInterval {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("TimeInterval", 3)?;
        s.serialize_field("status", &(self.status as i32))?;
        s.serialize_field("start", &self.start)?;
        s.serialize_field("end", &self.end)?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for TimeInterval {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            status: i32,
            start: AbsoluteTime,
            end: AbsoluteTime,
        }

        let raw = Raw::deserialize(deserializer)?;
        TimeInterval::from_parts(raw.status, raw.start, raw.end).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: AbsoluteTime = AbsoluteTime::Real(0);

    fn real(seconds: i32) -> AbsoluteTime {
        AbsoluteTime::Real(seconds)
    }

    #[test]
    fn construction_sorts_endpoints() {
        let interval = TimeInterval::new(real(100), real(-100));
        assert_eq!(interval.endpoints(), (real(-100), real(100)));
        assert!(interval.is_valid());

        let with_invalid = TimeInterval::new(AbsoluteTime::Invalid, real(5));
        assert_eq!(with_invalid.endpoints(), (real(5), AbsoluteTime::Invalid));
        assert_eq!(with_invalid.status(), IntervalStatus::Invalid);
        assert_eq!(with_invalid.start(), AbsoluteTime::Invalid);
        assert_eq!(with_invalid.end(), AbsoluteTime::Invalid);

        let open = TimeInterval::new(AbsoluteTime::NoEnd, AbsoluteTime::NoStart);
        assert_eq!(open.endpoints(), (AbsoluteTime::NoStart, AbsoluteTime::NoEnd));
        assert!(open.is_valid());
    }

    #[test]
    fn length_needs_finite_endpoints() {
        assert_eq!(
            TimeInterval::new(real(10), real(70)).length(),
            RelativeTime::Seconds(60)
        );
        assert_eq!(
            TimeInterval::new(T0, AbsoluteTime::NoEnd).length(),
            RelativeTime::Invalid
        );
        assert_eq!(TimeInterval::undefined().length(), RelativeTime::Invalid);
        let days = TimeInterval::new(T0, real(86_400)).duration_days().unwrap();
        assert!((days.value() - 1.0).abs() < 1e-12);
        assert!(TimeInterval::undefined().duration_days().is_none());
    }

    #[test]
    fn ordering_by_length_only() {
        let short = TimeInterval::new(real(500), real(600));
        let long = TimeInterval::new(T0, real(1_000));
        assert_eq!(short, TimeInterval::new(T0, real(100)));
        assert!(short < long);
        assert!(long < TimeInterval::undefined());
        assert_eq!(TimeInterval::undefined().btree_cmp(&TimeInterval::undefined()), 0);
        assert_eq!(long.btree_cmp(&short), 1);
    }

    #[test]
    fn length_comparison_wraps() {
        // [-infinity, infinity] spans more than 2^31 seconds and wraps negative.
        let everything = TimeInterval::new(AbsoluteTime::NoStart, AbsoluteTime::NoEnd);
        let day = TimeInterval::new(T0, real(86_400));
        assert!(everything < day);
    }

    #[test]
    fn point_and_range_predicates() {
        let outer = TimeInterval::new(T0, real(100));
        let inner = TimeInterval::new(real(10), real(20));
        let after = TimeInterval::new(real(100), real(200));
        let apart = TimeInterval::new(real(101), real(200));

        assert!(outer.contains_time(T0));
        assert!(outer.contains_time(real(100)));
        assert!(!outer.contains_time(real(101)));
        assert!(!outer.contains_time(AbsoluteTime::Invalid));
        assert!(!TimeInterval::undefined().contains_time(T0));

        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(outer.overlaps(&after));
        assert!(!outer.overlaps(&apart));
        assert!(!outer.overlaps(&TimeInterval::undefined()));

        assert!(outer.same(&TimeInterval::new(real(100), T0)));
        assert!(!outer.same(&TimeInterval::new(real(200), real(100))));
        assert!(!TimeInterval::undefined().same(&TimeInterval::undefined()));
    }

    #[test]
    fn length_predicates() {
        let minute = TimeInterval::new(T0, real(60));
        let sixty = RelativeTime::Seconds(60);
        assert!(minute.length_eq(sixty));
        assert!(minute.length_le(sixty));
        assert!(minute.length_ge(sixty));
        assert!(!minute.length_ne(sixty));
        assert!(minute.length_lt(RelativeTime::Seconds(61)));
        assert!(minute.length_gt(RelativeTime::Seconds(59)));

        assert!(!minute.length_ne(RelativeTime::Invalid));
        assert!(!TimeInterval::undefined().length_ne(sixty));
        let unbounded = TimeInterval::new(T0, AbsoluteTime::NoEnd);
        assert!(!unbounded.length_gt(sixty));
        assert!(!unbounded.length_ne(sixty));
    }

    #[test]
    fn text_round_trip() {
        let config = DateTimeConfig::default();
        let interval = TimeInterval::new(T0, real(86_400));
        let text = interval.encode_text(&config);
        assert_eq!(text, r#"["1970-01-01 00:00:00+00" "1970-01-02 00:00:00+00"]"#);
        let back = TimeInterval::decode_text(&text, &config).unwrap();
        assert!(back.same(&interval));

        assert_eq!(TimeInterval::undefined().to_string(), r#"["Undefined Range"]"#);
        let undefined: TimeInterval = r#"["Undefined Range"]"#.parse().unwrap();
        assert_eq!(undefined.status(), IntervalStatus::Invalid);
    }

    #[test]
    fn binary_layout_and_status_check() {
        let interval = TimeInterval::new(real(2), real(1));
        assert_eq!(
            interval.to_bytes().as_ref(),
            &[0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 2]
        );
        let mut buf = interval.to_bytes();
        assert!(TimeInterval::decode_binary(&mut buf).unwrap().same(&interval));

        let mut lying: &[u8] = &[0, 0, 0, 1, 0x7F, 0xFF, 0xFF, 0xFE, 0, 0, 0, 2];
        assert_eq!(
            TimeInterval::decode_binary(&mut lying),
            Err(Error::InvalidStatus { status: 1 })
        );
        let mut bogus: &[u8] = &[0, 0, 0, 7, 0, 0, 0, 1, 0, 0, 0, 2];
        assert_eq!(
            TimeInterval::decode_binary(&mut bogus),
            Err(Error::InvalidStatus { status: 7 })
        );
        let mut undefined = TimeInterval::undefined().to_bytes();
        let decoded = TimeInterval::decode_binary(&mut undefined).unwrap();
        assert_eq!(decoded.status(), IntervalStatus::Invalid);
    }
}
