// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Legacy fixed-width time primitives.
//!
//! This crate provides the three 32-bit time types of the old PostgreSQL
//! catalogue together with their text and binary codecs, ordering rules and
//! conversions to the higher-precision types that replaced them.
//!
//! # Core types
//!
//! - [`AbsoluteTime`]: seconds since 1970-01-01 UTC, with `early`/`late`/`invalid` sentinels.
//! - [`RelativeTime`]: signed span in seconds, with an `invalid` sentinel.
//! - [`TimeInterval`]: a closed pair of absolute times plus a validity status.
//! - [`Interval`]: higher-precision duration (`months`, `days`, `micros`).
//! - [`Timestamp<T>`]: higher-precision timestamp with `-infinity`/`infinity`.
//! - [`DateTimeConfig`]: session settings consulted by every text codec.
//!
//! # Sentinels
//!
//! | Type | Raw value | Meaning | Text |
//! |------|-----------|---------|------|
//! | [`AbsoluteTime::NoStart`] | `i32::MIN` | −∞ | `-infinity` |
//! | [`AbsoluteTime::NoEnd`] | `0x7FFFFFFC` | +∞ | `infinity` |
//! | [`AbsoluteTime::Invalid`] | `0x7FFFFFFE` | invalid | `invalid` |
//! | [`RelativeTime::Invalid`] | `i32::MIN` | invalid | `-68 years -18 days -03:14:08` |
//!
//! Every `invalid` value compares equal to every other and greater than
//! every valid one. [`TimeInterval`]s order by length only.
//!
//! # Example
//!
//! ```
//! use abstime::{AbsoluteTime, DateTimeConfig, RelativeTime, TimeInterval};
//!
//! let config = DateTimeConfig::default();
//! let start = AbsoluteTime::decode_text("1970-01-01 00:00:00+00", &config).unwrap();
//! let end = start + RelativeTime::Seconds(86_400);
//!
//! let interval = TimeInterval::new(end, start);
//! assert_eq!(interval.start(), start);
//! assert_eq!(interval.length(), RelativeTime::Seconds(86_400));
//! ```

pub(crate) mod abstime;
mod calendar;
pub(crate) mod config;
mod datetime;
mod duration;
mod error;
mod grammar;
mod interval;
pub(crate) mod reltime;
mod timestamp;
pub(crate) mod tinterval;
mod wire;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use abstime::AbsoluteTime;
pub use config::{DateOrder, DateStyle, DateTimeConfig, IntervalStyle, TimeZoneSetting};
pub use datetime::time_of_day;
pub use error::{Error, Result};
pub use interval::Interval;
pub use reltime::RelativeTime;
pub use timestamp::{LocalTimestamp, Timestamp, UtcTimestamp};
pub use tinterval::{IntervalStatus, TimeInterval};
