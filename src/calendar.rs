// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar bridge.
//!
//! Converts between broken-down calendar fields and the 32-bit
//! seconds-since-1970 representation of [`AbsoluteTime`], including the
//! legacy range validation and the "overflow slop" near both ends of the
//! representable span.
//!
//! Time zone offsets follow the legacy sign convention: `tz` is measured in
//! seconds **west** of UTC, so `local + tz = UTC`.

use crate::abstime::AbsoluteTime;
use crate::config::TimeZoneSetting;
use chrono::{
    DateTime, Datelike, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone, Timelike, Utc,
};

pub(crate) const SECS_PER_MINUTE: i32 = 60;
pub(crate) const SECS_PER_HOUR: i32 = 3_600;
pub(crate) const SECS_PER_DAY: i32 = 86_400;
pub(crate) const MINS_PER_HOUR: i32 = 60;
pub(crate) const HOURS_PER_DAY: i32 = 24;
pub(crate) const MONTHS_PER_YEAR: i32 = 12;
pub(crate) const DAYS_PER_MONTH: i32 = 30;
/// 365.25 days.
pub(crate) const SECS_PER_YEAR: i32 = 31_557_600;

/// Julian day number of 1970-01-01.
pub(crate) const UNIX_EPOCH_JDATE: i32 = 2_440_588;

/// 1901-12-13, the first day fully representable in 32-bit seconds.
const MIN_DAYNUM: i32 = -24_856;
/// 2038-01-18, the last day fully representable in 32-bit seconds.
const MAX_DAYNUM: i32 = 24_854;

/// Longest zone abbreviation carried into formatted output.
const MAXTZLEN: usize = 10;

/// Broken-down wall-clock fields. Year is the full year, month is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct CalendarFields {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
}

/// Calendar fields of an instant as seen from a particular zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ZonedFields {
    pub fields: CalendarFields,
    /// 0 = Sunday.
    pub weekday: u32,
    /// Seconds west of UTC.
    pub tz: i32,
    /// Abbreviation, absent for fixed numeric zones.
    pub zone: Option<String>,
}

/// Julian day number of a proleptic Gregorian date.
///
/// Out-of-range days simply spill into the next month (`Feb 31` is
/// `Mar 3`), which the legacy validation relies on.
pub(crate) fn date2j(year: i32, month: i32, day: i32) -> i32 {
    let (m, y) = if month > 2 {
        (month + 1, year + 4800)
    } else {
        (month + 13, year + 4799)
    };
    let century = y / 100;
    let mut julian = y * 365 - 32_167;
    julian += y / 4 - century + century / 4;
    julian += 7834 * m / 256 + day;
    julian
}

pub(crate) fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub(crate) fn days_in_month(year: i32, month: i32) -> i32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Convert calendar fields plus a west-of-UTC offset to an absolute time.
///
/// Anything outside 1901–2038, any malformed field, and any result landing
/// on a reserved value yields [`AbsoluteTime::Invalid`]; nothing is clamped.
pub(crate) fn tm2abstime(tm: &CalendarFields, tz: i32) -> AbsoluteTime {
    if tm.year < 1901
        || tm.year > 2038
        || tm.month < 1
        || tm.month > MONTHS_PER_YEAR
        || tm.day < 1
        || tm.day > 31
        || tm.hour < 0
        || tm.hour > HOURS_PER_DAY
        || (tm.hour == HOURS_PER_DAY && (tm.minute > 0 || tm.second > 0))
        || tm.minute < 0
        || tm.minute > MINS_PER_HOUR - 1
        || tm.second < 0
        || tm.second > SECS_PER_MINUTE
    {
        return AbsoluteTime::Invalid;
    }

    let day = date2j(tm.year, tm.month, tm.day) - UNIX_EPOCH_JDATE;
    if !(MIN_DAYNUM..=MAX_DAYNUM).contains(&day) {
        return AbsoluteTime::Invalid;
    }

    // 32-bit arithmetic on purpose: the sign test below catches the wrap.
    let minutes = day
        .wrapping_mul(HOURS_PER_DAY)
        .wrapping_add(tm.hour)
        .wrapping_mul(MINS_PER_HOUR)
        .wrapping_add(tm.minute);
    let sec = minutes
        .wrapping_mul(SECS_PER_MINUTE)
        .wrapping_add(tm.second)
        .wrapping_add(tz);

    // H/M/S plus the zone offset can add up to more than a day.
    if (day >= MAX_DAYNUM - 10 && sec < 0) || (day <= MIN_DAYNUM + 10 && sec > 0) {
        return AbsoluteTime::Invalid;
    }

    match AbsoluteTime::from_raw(sec) {
        time if time.is_finite() => time,
        _ => AbsoluteTime::Invalid,
    }
}

/// Decompose real seconds-since-epoch into fields in the configured zone.
pub(crate) fn abstime2tm(seconds: i32, zone: &TimeZoneSetting) -> ZonedFields {
    let instant = DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(i64::from(seconds));
    match zone {
        TimeZoneSetting::Named(tz) => {
            let local = instant.with_timezone(tz);
            let gmtoff = local.offset().fix().local_minus_utc();
            ZonedFields {
                fields: fields_of(&local.naive_local()),
                weekday: local.weekday().num_days_from_sunday(),
                tz: -gmtoff,
                zone: Some(truncate_abbreviation(local.format("%Z").to_string())),
            }
        }
        TimeZoneSetting::Fixed(offset) => {
            let local = instant.with_timezone(offset);
            ZonedFields {
                fields: fields_of(&local.naive_local()),
                weekday: local.weekday().num_days_from_sunday(),
                tz: -offset.local_minus_utc(),
                zone: None,
            }
        }
    }
}

/// Offset (seconds west) the configured zone applies to a wall-clock time.
///
/// Inside a fall-back overlap the later (post-transition) reading wins;
/// inside a spring-forward gap the pre-transition offset is used.
pub(crate) fn determine_offset(tm: &CalendarFields, zone: &TimeZoneSetting) -> i32 {
    let tz = match zone {
        TimeZoneSetting::Fixed(offset) => return -offset.local_minus_utc(),
        TimeZoneSetting::Named(tz) => tz,
    };
    let Some(naive) = naive_of(tm) else {
        return 0;
    };

    let east = match tz.offset_from_local_datetime(&naive) {
        LocalResult::Single(offset) => offset.fix().local_minus_utc(),
        LocalResult::Ambiguous(_, later) => later.fix().local_minus_utc(),
        LocalResult::None => naive
            .checked_sub_signed(TimeDelta::days(1))
            .map(|before| tz.offset_from_utc_datetime(&before).fix().local_minus_utc())
            .unwrap_or(0),
    };
    -east
}

/// Wall-clock fields as a naive date-time, letting days and a 24:00 hour
/// spill forward the way [`date2j`] does.
pub(crate) fn naive_of(tm: &CalendarFields) -> Option<NaiveDateTime> {
    let day = i64::from(date2j(tm.year, tm.month, tm.day) - UNIX_EPOCH_JDATE);
    let seconds = day * i64::from(SECS_PER_DAY)
        + i64::from(tm.hour) * i64::from(SECS_PER_HOUR)
        + i64::from(tm.minute) * i64::from(SECS_PER_MINUTE)
        + i64::from(tm.second);
    DateTime::<Utc>::UNIX_EPOCH
        .naive_utc()
        .checked_add_signed(TimeDelta::try_seconds(seconds)?)
}

pub(crate) fn fields_of(naive: &NaiveDateTime) -> CalendarFields {
    CalendarFields {
        year: naive.year(),
        month: naive.month() as i32,
        day: naive.day() as i32,
        hour: naive.hour() as i32,
        minute: naive.minute() as i32,
        second: naive.second() as i32,
    }
}

fn truncate_abbreviation(abbreviation: String) -> String {
    if abbreviation.len() <= MAXTZLEN {
        return abbreviation;
    }
    log::warn!("invalid time zone name: \"{abbreviation}\"");
    abbreviation.chars().take(MAXTZLEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use chrono_tz::Tz;

    fn tm(year: i32, month: i32, day: i32, hour: i32, minute: i32, second: i32) -> CalendarFields {
        CalendarFields {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    #[test]
    fn julian_day_anchors() {
        assert_eq!(date2j(1970, 1, 1), UNIX_EPOCH_JDATE);
        assert_eq!(date2j(2000, 1, 1), 2_451_545);
        assert_eq!(date2j(1970, 2, 31), date2j(1970, 3, 3));
    }

    #[test]
    fn epoch_and_simple_dates() {
        assert_eq!(tm2abstime(&tm(1970, 1, 1, 0, 0, 0), 0), AbsoluteTime::Real(0));
        assert_eq!(
            tm2abstime(&tm(1970, 1, 2, 0, 0, 0), 0),
            AbsoluteTime::Real(86_400)
        );
        // 00:00 PST is 08:00 UTC.
        assert_eq!(
            tm2abstime(&tm(1970, 1, 1, 0, 0, 0), 8 * 3600),
            AbsoluteTime::Real(28_800)
        );
    }

    #[test]
    fn field_validation() {
        assert_eq!(tm2abstime(&tm(1900, 6, 1, 0, 0, 0), 0), AbsoluteTime::Invalid);
        assert_eq!(tm2abstime(&tm(2039, 1, 1, 0, 0, 0), 0), AbsoluteTime::Invalid);
        assert_eq!(tm2abstime(&tm(1970, 13, 1, 0, 0, 0), 0), AbsoluteTime::Invalid);
        assert_eq!(tm2abstime(&tm(1970, 1, 1, 24, 0, 1), 0), AbsoluteTime::Invalid);
        assert_eq!(
            tm2abstime(&tm(1970, 1, 1, 24, 0, 0), 0),
            AbsoluteTime::Real(86_400)
        );
        assert_eq!(tm2abstime(&tm(1970, 1, 1, 0, 60, 0), 0), AbsoluteTime::Invalid);
    }

    #[test]
    fn range_edges_and_slop() {
        assert_eq!(
            tm2abstime(&tm(2038, 1, 18, 23, 59, 59), 0),
            AbsoluteTime::Real(2_147_471_999)
        );
        assert_eq!(tm2abstime(&tm(2038, 1, 19, 0, 0, 0), 0), AbsoluteTime::Invalid);
        // A west offset pushes the last day up to the largest real value...
        assert_eq!(
            tm2abstime(&tm(2038, 1, 18, 23, 14, 3), 4 * 3600),
            AbsoluteTime::Real(0x7FFF_FFFB)
        );
        // ...one more second lands on the "infinity" sentinel...
        assert_eq!(
            tm2abstime(&tm(2038, 1, 18, 23, 14, 4), 4 * 3600),
            AbsoluteTime::Invalid
        );
        // ...and a larger offset wraps past i32::MAX, caught by the sign check.
        assert_eq!(
            tm2abstime(&tm(2038, 1, 18, 23, 0, 0), 15 * 3600),
            AbsoluteTime::Invalid
        );
        assert_eq!(tm2abstime(&tm(1901, 12, 13, 20, 45, 52), 0), AbsoluteTime::Invalid);
        assert_eq!(
            tm2abstime(&tm(1901, 12, 13, 20, 45, 53), 0),
            AbsoluteTime::Real(i32::MIN + 1)
        );
        assert_eq!(tm2abstime(&tm(1901, 12, 12, 0, 0, 0), 0), AbsoluteTime::Invalid);
    }

    #[test]
    fn decompose_in_named_zone() {
        let zone = TimeZoneSetting::Named(Tz::America__Los_Angeles);
        let zoned = abstime2tm(0, &zone);
        assert_eq!(zoned.fields, tm(1969, 12, 31, 16, 0, 0));
        assert_eq!(zoned.tz, 8 * 3600);
        assert_eq!(zoned.zone.as_deref(), Some("PST"));
        assert_eq!(zoned.weekday, 3);
    }

    #[test]
    fn decompose_in_fixed_zone() {
        let zone = TimeZoneSetting::Fixed(FixedOffset::east_opt(5 * 3600 + 1800).unwrap());
        let zoned = abstime2tm(0, &zone);
        assert_eq!(zoned.fields, tm(1970, 1, 1, 5, 30, 0));
        assert_eq!(zoned.tz, -(5 * 3600 + 1800));
        assert!(zoned.zone.is_none());
    }

    #[test]
    fn determine_offset_handles_dst() {
        let zone = TimeZoneSetting::Named(Tz::America__New_York);
        assert_eq!(determine_offset(&tm(2000, 1, 15, 12, 0, 0), &zone), 5 * 3600);
        assert_eq!(determine_offset(&tm(2000, 7, 15, 12, 0, 0), &zone), 4 * 3600);
        // 2000-10-29 01:30 happens twice; the standard-time reading wins.
        assert_eq!(determine_offset(&tm(2000, 10, 29, 1, 30, 0), &zone), 5 * 3600);
        // 2000-04-02 02:30 never happens; the pre-transition offset applies.
        assert_eq!(determine_offset(&tm(2000, 4, 2, 2, 30, 0), &zone), 5 * 3600);
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2004, 2), 29);
        assert_eq!(days_in_month(1970, 4), 30);
        assert_eq!(days_in_month(1970, 13), 0);
    }
}
