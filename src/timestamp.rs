// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Higher-precision timestamps with their own unbounded sentinels.
//!
//! - [`Timestamp<T>`]: generic over the finite representation
//! - [`LocalTimestamp`]: wall-clock reading without a zone
//! - [`UtcTimestamp`]: absolute instant

use chrono::{DateTime, NaiveDateTime, Utc};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A finite timestamp or one of the two unbounded ends.
///
/// Variant order gives the natural ordering: `NoBegin < At(_) < NoEnd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Timestamp<T> {
    NoBegin,
    At(T),
    NoEnd,
}

/// Timestamp without time zone.
pub type LocalTimestamp = Timestamp<NaiveDateTime>;

/// Timestamp with time zone, held in UTC.
pub type UtcTimestamp = Timestamp<DateTime<Utc>>;

impl<T> Timestamp<T> {
    /// `true` unless this is one of the unbounded ends.
    #[inline]
    pub fn is_finite(&self) -> bool {
        matches!(self, Timestamp::At(_))
    }

    /// The finite value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Timestamp::At(value) => Some(value),
            _ => None,
        }
    }

    /// Transform the finite value, keeping sentinels as they are.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Timestamp<U> {
        match self {
            Timestamp::NoBegin => Timestamp::NoBegin,
            Timestamp::At(value) => Timestamp::At(f(value)),
            Timestamp::NoEnd => Timestamp::NoEnd,
        }
    }
}

impl<T> From<T> for Timestamp<T> {
    fn from(value: T) -> Self {
        Timestamp::At(value)
    }
}

impl<T: fmt::Display> fmt::Display for Timestamp<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::NoBegin => f.write_str("-infinity"),
            Timestamp::At(value) => value.fmt(f),
            Timestamp::NoEnd => f.write_str("infinity"),
        }
    }
}
