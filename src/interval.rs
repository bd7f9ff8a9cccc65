// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Higher-precision duration with independent month, day and microsecond
//! fields.

use crate::config::IntervalStyle;
use crate::duration::{encode_duration, DurationFields};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub(crate) const USECS_PER_SEC: i64 = 1_000_000;

/// A calendar-aware duration: months and days are kept apart from the
/// clock part because their length in seconds depends on context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval {
    months: i32,
    days: i32,
    micros: i64,
}

impl Interval {
    /// Build from its three independent fields.
    pub const fn new(months: i32, days: i32, micros: i64) -> Self {
        Self {
            months,
            days,
            micros,
        }
    }

    /// Calendar months, years included.
    pub const fn months(&self) -> i32 {
        self.months
    }

    /// Calendar days.
    pub const fn days(&self) -> i32 {
        self.days
    }

    /// Clock part in microseconds.
    pub const fn micros(&self) -> i64 {
        self.micros
    }

    pub(crate) fn to_fields(self) -> DurationFields {
        let seconds = self.micros / USECS_PER_SEC;
        DurationFields {
            years: i64::from(self.months / 12),
            months: i64::from(self.months % 12),
            days: i64::from(self.days),
            hours: seconds / 3_600,
            minutes: seconds / 60 % 60,
            seconds: seconds % 60,
            micros: self.micros % USECS_PER_SEC,
        }
    }

    /// Text in the given interval style.
    pub fn to_text(&self, style: IntervalStyle) -> String {
        encode_duration(&self.to_fields(), style)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text(IntervalStyle::Postgres))
    }
}
