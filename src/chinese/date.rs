// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Chinese date values.

use crate::error::{Error, Result};
use crate::math::amod;
use std::fmt;

/// A month name within a sui: its number and whether it is the intercalary
/// repeat of that number.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChineseMonth {
    Common(u8),
    Leap(u8),
}

impl ChineseMonth {
    /// Month `number`, intercalary if `leap`.
    #[inline]
    pub const fn new(number: u8, leap: bool) -> Self {
        if leap {
            ChineseMonth::Leap(number)
        } else {
            ChineseMonth::Common(number)
        }
    }

    /// Month number, leap or not.
    #[inline]
    pub const fn number(self) -> u8 {
        match self {
            ChineseMonth::Common(n) | ChineseMonth::Leap(n) => n,
        }
    }

    /// `true` for the intercalary repeat of a month.
    #[inline]
    pub const fn is_leap(self) -> bool {
        matches!(self, ChineseMonth::Leap(_))
    }
}

impl fmt::Display for ChineseMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChineseMonth::Common(n) => write!(f, "{n}"),
            ChineseMonth::Leap(n) => write!(f, "{n}*"),
        }
    }
}

/// A date of the Chinese calendar: year `year` of sexagenary cycle `cycle`,
/// then month and day within that year.
///
/// Values are validated on construction and never mutated; the `with_*`
/// methods return modified copies.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChineseDate {
    cycle: i64,
    year: u8,
    month: u8,
    leap: bool,
    day: u8,
}

impl ChineseDate {
    /// Build a date, checking that every field is in range.
    ///
    /// Whether a leap month of that number actually exists in that year is
    /// only known to the calendar; [`fixed_from_chinese`](super::fixed_from_chinese)
    /// resolves it.
    pub fn new(cycle: i64, year: u8, month: u8, leap: bool, day: u8) -> Result<Self> {
        if cycle < 1 {
            return Err(Error::InvalidChineseDate("cycle must be at least 1"));
        }
        if !(1..=60).contains(&year) {
            return Err(Error::InvalidChineseDate("year must be within 1..=60"));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidChineseDate("month must be within 1..=12"));
        }
        if !(1..=30).contains(&day) {
            return Err(Error::InvalidChineseDate("day must be within 1..=30"));
        }
        Ok(Self {
            cycle,
            year,
            month,
            leap,
            day,
        })
    }

    /// Sexagenary cycle, counted from 1 at the calendar epoch.
    #[inline]
    pub const fn cycle(&self) -> i64 {
        self.cycle
    }

    /// Year within the sexagenary cycle, `1..=60`.
    #[inline]
    pub const fn year(&self) -> u8 {
        self.year
    }

    /// Month number, `1..=12`.
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// `true` if the date falls in a leap month.
    #[inline]
    pub const fn is_leap_month(&self) -> bool {
        self.leap
    }

    /// Month number and leap flag together.
    #[inline]
    pub const fn chinese_month(&self) -> ChineseMonth {
        ChineseMonth::new(self.month, self.leap)
    }

    /// Day of the month, `1..=30`.
    #[inline]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Years elapsed since the calendar epoch, counting the epoch year as 1.
    #[inline]
    pub const fn elapsed_years(&self) -> i64 {
        (self.cycle - 1) * 60 + self.year as i64
    }

    /// Celestial stem of the year, `1..=10` (1 = 甲).
    #[inline]
    pub fn stem(&self) -> u8 {
        amod(i64::from(self.year), 10) as u8
    }

    /// Terrestrial branch of the year, `1..=12` (1 = 子).
    #[inline]
    pub fn branch(&self) -> u8 {
        amod(i64::from(self.year), 12) as u8
    }

    /// Same month and day in another year.
    pub fn with_year(self, cycle: i64, year: u8) -> Result<Self> {
        Self::new(cycle, year, self.month, self.leap, self.day)
    }

    /// Same year and day in another month.
    ///
    /// ```rust
    /// use lunisolar::{ChineseDate, ChineseMonth};
    ///
    /// let date = ChineseDate::new(78, 40, 2, false, 15).unwrap();
    /// let leap = date.with_month(2, true).unwrap();
    /// assert_eq!(leap.chinese_month(), ChineseMonth::Leap(2));
    /// assert!(date.with_month(13, false).is_err());
    /// ```
    pub fn with_month(self, month: u8, leap: bool) -> Result<Self> {
        Self::new(self.cycle, self.year, month, leap, self.day)
    }

    /// Another day of the same month.
    pub fn with_day(self, day: u8) -> Result<Self> {
        Self::new(self.cycle, self.year, self.month, self.leap, day)
    }
}

impl fmt::Display for ChineseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{:02}-{}-{:02}",
            self.cycle,
            self.year,
            self.chinese_month(),
            self.day
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_fields() {
        assert!(ChineseDate::new(0, 1, 1, false, 1).is_err());
        assert!(ChineseDate::new(78, 0, 1, false, 1).is_err());
        assert!(ChineseDate::new(78, 61, 1, false, 1).is_err());
        assert!(ChineseDate::new(78, 41, 13, false, 1).is_err());
        assert!(ChineseDate::new(78, 41, 1, false, 31).is_err());
        assert_eq!(
            ChineseDate::new(78, 41, 1, false, 0),
            Err(Error::InvalidChineseDate("day must be within 1..=30"))
        );
    }

    #[test]
    fn stem_and_branch_of_the_dragon_year() {
        // 2024 is 甲辰: stem 1, branch 5
        let date = ChineseDate::new(78, 41, 1, false, 1).unwrap();
        assert_eq!(date.stem(), 1);
        assert_eq!(date.branch(), 5);
        assert_eq!(date.elapsed_years(), 4_661);
        // year 60 closes the cycle as 癸亥
        let last = date.with_year(78, 60).unwrap();
        assert_eq!((last.stem(), last.branch()), (10, 12));
    }

    #[test]
    fn builders_return_new_values() {
        let date = ChineseDate::new(78, 40, 2, false, 15).unwrap();
        let leap = date.with_month(2, true).unwrap();
        assert!(!date.is_leap_month());
        assert_eq!(leap.chinese_month(), ChineseMonth::Leap(2));
        assert_eq!(leap.with_day(1).unwrap().day(), 1);
        assert!(date.with_day(31).is_err());
        assert_eq!(leap.to_string(), "78-40-2*-15");
    }

    #[test]
    fn month_names() {
        assert_eq!(ChineseMonth::new(6, true), ChineseMonth::Leap(6));
        assert_eq!(ChineseMonth::Common(11).number(), 11);
        assert!(!ChineseMonth::Common(11).is_leap());
        assert_eq!(ChineseMonth::Common(11).to_string(), "11");
    }
}
