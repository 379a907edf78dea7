// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The sui: solstice-to-solstice framing of the Chinese year.

use super::{
    chinese_new_moon_before, chinese_new_moon_on_or_after, chinese_no_major_solar_term,
    chinese_winter_solstice_on_or_before, lunations_between, ChineseMonth,
};
use crate::error::Result;
use log::debug;

/// The anchors of the sui containing a date, as used by the decoder.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct SuiFrame {
    /// Winter solstice on or before the date.
    pub(crate) solstice: i64,
    /// The following winter solstice.
    pub(crate) next_solstice: i64,
    /// First new moon after the solstice: start of the twelfth month, or of
    /// a leap eleventh.
    pub(crate) m12: i64,
    /// Start of the eleventh month of the following sui.
    pub(crate) next_m11: i64,
    /// Thirteen months from `m12` to `next_m11`.
    pub(crate) leap: bool,
}

impl SuiFrame {
    pub(crate) fn at(date: i64) -> Result<Self> {
        let solstice = chinese_winter_solstice_on_or_before(date)?;
        let next_solstice = chinese_winter_solstice_on_or_before(solstice + 370)?;
        let m12 = chinese_new_moon_on_or_after(solstice + 1)?;
        let next_m11 = chinese_new_moon_before(next_solstice + 1)?;
        let leap = lunations_between(m12, next_m11) == 12;
        debug!(
            "sui of {date}: solstices {solstice}..{next_solstice}, m12 {m12}, next m11 {next_m11}, leap {leap}"
        );
        Ok(Self {
            solstice,
            next_solstice,
            m12,
            next_m11,
            leap,
        })
    }
}

/// First day of a month within a [`Sui`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonthStart {
    pub month: ChineseMonth,
    pub date: i64,
}

/// The months from one eleventh month (the one holding the winter solstice)
/// up to the next.
///
/// ```rust
/// use lunisolar::chinese::{ChineseMonth, Sui};
/// use lunisolar::civil::fixed_from_gregorian;
///
/// let sui = Sui::containing(fixed_from_gregorian(2023, 4, 20)).unwrap();
/// assert!(sui.has_leap_month());
/// assert_eq!(sui.leap_month(), Some(ChineseMonth::Leap(2)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sui {
    solstice: i64,
    next_solstice: i64,
    months: Vec<MonthStart>,
    end: i64,
}

impl Sui {
    /// The sui whose months span `date`.
    ///
    /// Days between the start of the next eleventh month and the next
    /// solstice belong to the following sui.
    pub fn containing(date: i64) -> Result<Self> {
        let frame = SuiFrame::at(date)?;
        if date >= frame.next_m11 {
            Self::from_frame(SuiFrame::at(frame.next_solstice)?)
        } else {
            Self::from_frame(frame)
        }
    }

    fn from_frame(frame: SuiFrame) -> Result<Self> {
        let m11 = chinese_new_moon_before(frame.solstice + 1)?;
        let mut months = vec![MonthStart {
            month: ChineseMonth::Common(11),
            date: m11,
        }];
        let mut number = 11u8;
        let mut needs_leap = frame.leap;
        let mut start = frame.m12;
        while start < frame.next_m11 {
            let month = if needs_leap && chinese_no_major_solar_term(start)? {
                needs_leap = false;
                ChineseMonth::Leap(number)
            } else {
                number = number % 12 + 1;
                ChineseMonth::Common(number)
            };
            months.push(MonthStart { month, date: start });
            start = chinese_new_moon_on_or_after(start + 1)?;
        }
        Ok(Self {
            solstice: frame.solstice,
            next_solstice: frame.next_solstice,
            months,
            end: frame.next_m11,
        })
    }

    /// Beijing date of the winter solstice opening the sui.
    #[inline]
    pub fn solstice(&self) -> i64 {
        self.solstice
    }

    /// Beijing date of the winter solstice closing the sui.
    #[inline]
    pub fn next_solstice(&self) -> i64 {
        self.next_solstice
    }

    /// Month starts in order, beginning with the eleventh month.
    #[inline]
    pub fn months(&self) -> &[MonthStart] {
        &self.months
    }

    /// First day of the next sui's eleventh month.
    #[inline]
    pub fn end(&self) -> i64 {
        self.end
    }

    /// `true` if `date` falls in one of this sui's months.
    #[inline]
    pub fn contains(&self, date: i64) -> bool {
        self.months.first().is_some_and(|m| m.date <= date) && date < self.end
    }

    /// `true` for a sui of thirteen months.
    pub fn has_leap_month(&self) -> bool {
        self.months.iter().any(|m| m.month.is_leap())
    }

    /// The intercalary month, if there is one.
    pub fn leap_month(&self) -> Option<ChineseMonth> {
        self.months.iter().map(|m| m.month).find(|m| m.is_leap())
    }

    /// Month holding `date`, and the day within it.
    pub fn month_for(&self, date: i64) -> Option<(ChineseMonth, u8)> {
        if !self.contains(date) {
            return None;
        }
        let start = self.months.iter().take_while(|m| m.date <= date).last()?;
        Some((start.month, (date - start.date + 1) as u8))
    }
}
