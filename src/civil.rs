// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Proleptic Gregorian arithmetic on fixed day numbers.
//!
//! A *fixed date* is an `i64` counting days from R.D. 1 = Monday,
//! 1 January 1 (proleptic Gregorian). The astronomical code works on these
//! day numbers directly, so the conversions are closed-form integer
//! arithmetic on `i64` with no intermediate calendar type. Years are
//! astronomical: 1 BCE is year `0`.
//!
//! `chrono` is used at the edges: [`CivilDate`] converts to and from
//! [`NaiveDate`], and weekdays are reported as [`Weekday`].

use crate::error::{Error, Result};
use chrono::{Datelike, NaiveDate, Weekday};

/// Fixed date of 1 January 1 (proleptic Gregorian).
pub const GREGORIAN_EPOCH: i64 = 1;

/// `true` if `year` is a Gregorian leap year.
#[inline]
pub const fn is_gregorian_leap_year(year: i64) -> bool {
    year.rem_euclid(4) == 0 && !matches!(year.rem_euclid(400), 100 | 200 | 300)
}

/// Number of days in `month` of `year`, or `None` for an invalid month.
pub const fn days_in_month(year: i64, month: u8) -> Option<u8> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 if is_gregorian_leap_year(year) => Some(29),
        2 => Some(28),
        _ => None,
    }
}

/// Fixed date of a Gregorian `year`, `month`, `day`.
///
/// Fields are not validated; out-of-range days simply overflow into the
/// neighbouring month, which is occasionally useful (day 0 is the last day
/// of the previous month).
pub fn fixed_from_gregorian(year: i64, month: u8, day: u8) -> i64 {
    let month = i64::from(month);
    let correction = if month <= 2 {
        0
    } else if is_gregorian_leap_year(year) {
        -1
    } else {
        -2
    };
    let y = year - 1;
    GREGORIAN_EPOCH - 1
        + 365 * y
        + y.div_euclid(4)
        - y.div_euclid(100)
        + y.div_euclid(400)
        + (367 * month - 362).div_euclid(12)
        + i64::from(day)
        + correction
}

/// Fixed date of 1 January of `year`.
#[inline]
pub fn gregorian_new_year(year: i64) -> i64 {
    fixed_from_gregorian(year, 1, 1)
}

/// Fixed date of 31 December of `year`.
#[inline]
pub fn gregorian_year_end(year: i64) -> i64 {
    fixed_from_gregorian(year, 12, 31)
}

/// Gregorian year containing the fixed `date`.
pub fn gregorian_year_from_fixed(date: i64) -> i64 {
    let d0 = date - GREGORIAN_EPOCH;
    let n400 = d0.div_euclid(146_097);
    let d1 = d0.rem_euclid(146_097);
    let n100 = d1 / 36_524;
    let d2 = d1 % 36_524;
    let n4 = d2 / 1_461;
    let d3 = d2 % 1_461;
    let n1 = d3 / 365;
    let year = 400 * n400 + 100 * n100 + 4 * n4 + n1;
    if n100 == 4 || n1 == 4 {
        year
    } else {
        year + 1
    }
}

/// Gregorian date of the fixed `date`.
pub fn gregorian_from_fixed(date: i64) -> CivilDate {
    let year = gregorian_year_from_fixed(date);
    let prior_days = date - gregorian_new_year(year);
    let correction = if date < fixed_from_gregorian(year, 3, 1) {
        0
    } else if is_gregorian_leap_year(year) {
        1
    } else {
        2
    };
    // both casts are bounded: month is 1..=12 and day is 1..=31
    let month = ((12 * (prior_days + correction) + 373) / 367) as u8;
    let day = (1 + date - fixed_from_gregorian(year, month, 1)) as u8;
    CivilDate { year, month, day }
}

/// Days from `earlier` to `later` (negative if `later` comes first).
#[inline]
pub fn gregorian_date_difference(earlier: CivilDate, later: CivilDate) -> i64 {
    later.fixed() - earlier.fixed()
}

// ── weekdays ──────────────────────────────────────────────────────────────

/// Day of the week of a fixed date.
pub fn day_of_week_from_fixed(date: i64) -> Weekday {
    match date.rem_euclid(7) {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    }
}

#[inline]
fn sunday_index(k: Weekday) -> i64 {
    i64::from(k.num_days_from_sunday())
}

/// Latest `k` weekday on or before `date`.
pub fn kday_on_or_before(k: Weekday, date: i64) -> i64 {
    date - (date - sunday_index(k)).rem_euclid(7)
}

/// Earliest `k` weekday on or after `date`.
pub fn kday_on_or_after(k: Weekday, date: i64) -> i64 {
    kday_on_or_before(k, date + 6)
}

/// `k` weekday closest to `date`.
pub fn kday_nearest(k: Weekday, date: i64) -> i64 {
    kday_on_or_before(k, date + 3)
}

/// Latest `k` weekday strictly before `date`.
pub fn kday_before(k: Weekday, date: i64) -> i64 {
    kday_on_or_before(k, date - 1)
}

/// Earliest `k` weekday strictly after `date`.
pub fn kday_after(k: Weekday, date: i64) -> i64 {
    kday_on_or_before(k, date + 7)
}

/// The `n`-th `k` weekday on or after `date` when `n > 0`, or the `|n|`-th
/// one on or before it when `n < 0`. `n == 0` has no meaning and yields
/// `None`.
pub fn nth_kday(n: i64, k: Weekday, date: CivilDate) -> Option<i64> {
    let fixed = date.fixed();
    match n {
        0 => None,
        n if n > 0 => Some(7 * n + kday_before(k, fixed)),
        n => Some(7 * n + kday_after(k, fixed)),
    }
}

/// First `k` weekday on or after `date`.
pub fn first_kday(k: Weekday, date: CivilDate) -> i64 {
    7 + kday_before(k, date.fixed())
}

/// Last `k` weekday on or before `date`.
pub fn last_kday(k: Weekday, date: CivilDate) -> i64 {
    kday_after(k, date.fixed()) - 7
}

// ── CivilDate ─────────────────────────────────────────────────────────────

/// A validated proleptic Gregorian date.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CivilDate {
    year: i64,
    month: u8,
    day: u8,
}

impl CivilDate {
    /// Build a date, rejecting months outside `1..=12` and days past the end
    /// of the month.
    pub fn new(year: i64, month: u8, day: u8) -> Result<Self> {
        match days_in_month(year, month) {
            Some(last) if (1..=last).contains(&day) => Ok(Self { year, month, day }),
            _ => Err(Error::InvalidCivilDate { year, month, day }),
        }
    }

    /// Date of the fixed day number `date`.
    #[inline]
    pub fn from_fixed(date: i64) -> Self {
        gregorian_from_fixed(date)
    }

    /// Astronomical year (1 BCE is `0`).
    #[inline]
    pub const fn year(&self) -> i64 {
        self.year
    }

    /// Month, `1..=12`.
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Day of the month.
    #[inline]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Fixed day number of this date.
    #[inline]
    pub fn fixed(&self) -> i64 {
        fixed_from_gregorian(self.year, self.month, self.day)
    }

    /// Day of the week.
    #[inline]
    pub fn weekday(&self) -> Weekday {
        day_of_week_from_fixed(self.fixed())
    }

    /// The same day as a [`NaiveDate`], or `None` outside chrono's range.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        let days = i32::try_from(self.fixed()).ok()?;
        NaiveDate::from_num_days_from_ce_opt(days)
    }
}

impl From<NaiveDate> for CivilDate {
    fn from(date: NaiveDate) -> Self {
        gregorian_from_fixed(i64::from(date.num_days_from_ce()))
    }
}

impl std::fmt::Display for CivilDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}
