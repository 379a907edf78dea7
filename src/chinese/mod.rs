// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Chinese lunisolar calendar
//!
//! Months begin on the day (Beijing time) of a new moon; years are organised
//! around the **sui** (歲), the span between two consecutive winter
//! solstices. A sui holds twelve or thirteen months. When it holds thirteen,
//! the first month that contains no major solar term is intercalary and
//! repeats the number of the month before it.
//!
//! All dates in this module are fixed dates read in Beijing standard time.
//!
//! ```rust
//! use lunisolar::chinese::{chinese_from_fixed, fixed_from_chinese};
//! use lunisolar::civil::fixed_from_gregorian;
//!
//! let new_year = fixed_from_gregorian(2024, 2, 10);
//! let date = chinese_from_fixed(new_year).unwrap();
//! assert_eq!((date.cycle(), date.year(), date.month(), date.day()), (78, 41, 1, 1));
//! assert_eq!(fixed_from_chinese(&date).unwrap(), new_year);
//! ```

mod date;
mod sui;
mod terms;

pub use date::{ChineseDate, ChineseMonth};
pub use sui::{MonthStart, Sui};
pub use terms::{
    chinese_solar_longitude_on_or_after, current_major_solar_term, current_minor_solar_term,
    major_solar_term_on_or_after, minor_solar_term_on_or_after, solar_term_on_or_after,
    SolarTerm,
};

use crate::civil::{fixed_from_gregorian, gregorian_year_from_fixed};
use crate::error::{Error, Result};
use crate::frames::{Standard, Universal};
use crate::location::Location;
use crate::lunar::MEAN_SYNODIC_MONTH;
use crate::math::amod;
use crate::moon_phase::{new_moon_at_or_after, new_moon_before};
use crate::moment::Moment;
use crate::search::{forward_search, DEFAULT_SEARCH_LIMIT};
use crate::solar::{solar_longitude, MEAN_TROPICAL_YEAR};
use crate::solar_terms::estimate_prior_solar_longitude;
use qtty::{Days, Degrees, Meters};
use sui::SuiFrame;

/// Fixed date of the calendar epoch: 15 February −2636 (Gregorian), the
/// traditional first year of the first sexagenary cycle.
pub const CHINESE_EPOCH: i64 = -963_099;

/// Most new moons [`chinese_prior_leap_month`] will walk back over.
pub const PRIOR_LEAP_MONTH_STEPS: u32 = 16;

/// Beijing, on the local mean time of its meridian (before 1929).
const BEIJING_LOCAL_MEAN_TIME: Location = Location::new(
    Degrees::new(39.0 + 55.0 / 60.0),
    Degrees::new(116.0 + 25.0 / 60.0),
    Meters::new(43.5),
    Days::new(1_397.0 / 180.0 / 24.0),
);

/// Beijing, on UTC+8 (from 1929).
const BEIJING_UTC8: Location = Location::new(
    Degrees::new(39.0 + 55.0 / 60.0),
    Degrees::new(116.0 + 25.0 / 60.0),
    Meters::new(43.5),
    Days::new(8.0 / 24.0),
);

/// Reference location of the calendar for the year containing `date`.
///
/// Standard time switched from Beijing mean time to UTC+8 in 1929.
pub fn chinese_location(date: i64) -> Location {
    if gregorian_year_from_fixed(date) < 1929 {
        BEIJING_LOCAL_MEAN_TIME
    } else {
        BEIJING_UTC8
    }
}

/// Universal time of midnight starting `date` in Beijing.
pub fn midnight_in_china(date: i64) -> Moment<Universal> {
    Moment::<Standard>::from_fixed(date).to(&chinese_location(date))
}

/// Beijing standard time of a universal moment.
pub(crate) fn standard_in_china(t: Moment<Universal>) -> Moment<Standard> {
    t.to(&chinese_location(t.fixed()))
}

// ---------------------------------------------------------------------------
// Solstices, new moons and leap months
// ---------------------------------------------------------------------------

/// Fixed date, in Beijing, of the last winter solstice on or before `date`.
pub fn chinese_winter_solstice_on_or_before(date: i64) -> Result<i64> {
    let winter = Degrees::new(270.0);
    let approx = estimate_prior_solar_longitude(winter, midnight_in_china(date + 1));
    forward_search(
        approx.fixed() - 1,
        |day| winter < solar_longitude(midnight_in_china(day + 1)),
        DEFAULT_SEARCH_LIMIT,
    )
}

/// Fixed date, in Beijing, of the first new moon on or after `date`.
pub fn chinese_new_moon_on_or_after(date: i64) -> Result<i64> {
    let t = new_moon_at_or_after(midnight_in_china(date))?;
    Ok(standard_in_china(t).fixed())
}

/// Fixed date, in Beijing, of the last new moon before `date`.
pub fn chinese_new_moon_before(date: i64) -> Result<i64> {
    let t = new_moon_before(midnight_in_china(date))?;
    Ok(standard_in_china(t).fixed())
}

/// Whether the month beginning on `date` contains no major solar term.
pub fn chinese_no_major_solar_term(date: i64) -> Result<bool> {
    let next = chinese_new_moon_on_or_after(date + 1)?;
    Ok(current_major_solar_term(date) == current_major_solar_term(next))
}

/// Whether any month from the one starting on `m_prime` up to the one
/// starting on `m` lacks a major solar term.
pub fn chinese_prior_leap_month(m_prime: i64, m: i64) -> Result<bool> {
    let mut month = m;
    for _ in 0..PRIOR_LEAP_MONTH_STEPS {
        if month < m_prime {
            return Ok(false);
        }
        if chinese_no_major_solar_term(month)? {
            return Ok(true);
        }
        month = chinese_new_moon_before(month)?;
    }
    Err(Error::SearchLimitExceeded {
        limit: PRIOR_LEAP_MONTH_STEPS,
    })
}

/// Rounded number of mean lunations between two month starts.
#[inline]
fn lunations_between(from: i64, to: i64) -> i64 {
    ((to - from) as f64 / MEAN_SYNODIC_MONTH.value()).round() as i64
}

// ---------------------------------------------------------------------------
// New year
// ---------------------------------------------------------------------------

/// Fixed date of the Chinese New Year in the sui containing `date`.
///
/// Usually the second new moon after the winter solstice, the third when a
/// leap month falls in the eleventh or twelfth month.
pub fn chinese_new_year_in_sui(date: i64) -> Result<i64> {
    let frame = SuiFrame::at(date)?;
    let m13 = chinese_new_moon_on_or_after(frame.m12 + 1)?;
    if frame.leap
        && (chinese_no_major_solar_term(frame.m12)? || chinese_no_major_solar_term(m13)?)
    {
        chinese_new_moon_on_or_after(m13 + 1)
    } else {
        Ok(m13)
    }
}

/// Fixed date of the last Chinese New Year on or before `date`.
pub fn chinese_new_year_on_or_before(date: i64) -> Result<i64> {
    let new_year = chinese_new_year_in_sui(date)?;
    if date >= new_year {
        Ok(new_year)
    } else {
        chinese_new_year_in_sui(date - 180)
    }
}

/// Fixed date of the Chinese New Year falling in Gregorian year `year`.
pub fn chinese_new_year(year: i64) -> Result<i64> {
    chinese_new_year_on_or_before(fixed_from_gregorian(year, 7, 1))
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

/// Chinese date of the fixed date `date`.
pub fn chinese_from_fixed(date: i64) -> Result<ChineseDate> {
    let frame = SuiFrame::at(date)?;
    let m = chinese_new_moon_before(date + 1)?;

    let prior_leap = frame.leap && chinese_prior_leap_month(frame.m12, m)?;
    let month = amod(lunations_between(frame.m12, m) - i64::from(prior_leap), 12);
    let leap_month = frame.leap
        && chinese_no_major_solar_term(m)?
        && !chinese_prior_leap_month(frame.m12, chinese_new_moon_before(m)?)?;

    let elapsed_years = (1.5 - month as f64 / 12.0
        + (date - CHINESE_EPOCH) as f64 / MEAN_TROPICAL_YEAR.value())
    .floor() as i64;
    let cycle = (elapsed_years - 1).div_euclid(60) + 1;
    let year = amod(elapsed_years, 60);
    let day = date - m + 1;

    ChineseDate::new(cycle, year as u8, month as u8, leap_month, day as u8)
}

/// Fixed date of a Chinese date.
///
/// A leap flag on a month that has no leap counterpart that year resolves to
/// the month that follows.
pub fn fixed_from_chinese(date: &ChineseDate) -> Result<i64> {
    let years = (date.elapsed_years() - 1) as f64 + 0.5;
    let mid_year = (CHINESE_EPOCH as f64 + years * MEAN_TROPICAL_YEAR.value()).floor() as i64;
    let new_year = chinese_new_year_on_or_before(mid_year)?;
    let p = chinese_new_moon_on_or_after(new_year + (i64::from(date.month()) - 1) * 29)?;
    let d = chinese_from_fixed(p)?;
    let prior_new_moon = if d.month() == date.month() && d.is_leap_month() == date.is_leap_month()
    {
        p
    } else {
        chinese_new_moon_on_or_after(p + 1)?
    };
    Ok(prior_new_moon + i64::from(date.day()) - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::civil::gregorian_from_fixed;

    fn ymd(date: i64) -> (i64, u8, u8) {
        let g = gregorian_from_fixed(date);
        (g.year(), g.month(), g.day())
    }

    fn fields(d: &ChineseDate) -> (i64, u8, u8, bool, u8) {
        (d.cycle(), d.year(), d.month(), d.is_leap_month(), d.day())
    }

    #[test]
    fn epoch_is_february_15_of_2637_bce() {
        assert_eq!(CHINESE_EPOCH, fixed_from_gregorian(-2636, 2, 15));
    }

    #[test]
    fn zone_changes_in_1929() {
        let old = chinese_location(fixed_from_gregorian(1900, 1, 1));
        let new = chinese_location(fixed_from_gregorian(1929, 1, 1));
        assert!((old.zone().value() * 24.0 - 7.761_111).abs() < 1e-6);
        assert_eq!(new.zone(), Days::new(8.0 / 24.0));
    }

    #[test]
    fn winter_solstices_around_2024() {
        let s = chinese_winter_solstice_on_or_before(fixed_from_gregorian(2024, 1, 1)).unwrap();
        assert_eq!(ymd(s), (2023, 12, 22));
        let day_of = fixed_from_gregorian(2024, 12, 21);
        assert_eq!(chinese_winter_solstice_on_or_before(day_of).unwrap(), day_of);
        let s = chinese_winter_solstice_on_or_before(day_of - 1).unwrap();
        assert_eq!(ymd(s), (2023, 12, 22));
    }

    #[test]
    fn new_moons_in_beijing() {
        let new_year = fixed_from_gregorian(2024, 2, 10);
        assert_eq!(chinese_new_moon_on_or_after(new_year).unwrap(), new_year);
        assert_eq!(ymd(chinese_new_moon_on_or_after(new_year + 1).unwrap()), (2024, 3, 10));
        assert_eq!(ymd(chinese_new_moon_before(new_year).unwrap()), (2024, 1, 11));
    }

    #[test]
    fn new_years() {
        let expected = [
            (1900, (1900, 1, 31)),
            (1985, (1985, 2, 20)),
            (2023, (2023, 1, 22)),
            (2024, (2024, 2, 10)),
            (2025, (2025, 1, 29)),
            (2033, (2033, 1, 31)),
        ];
        for (year, date) in expected {
            assert_eq!(ymd(chinese_new_year(year).unwrap()), date, "{year}");
        }
    }

    #[test]
    fn new_year_on_or_before_steps_back_a_sui() {
        let day = fixed_from_gregorian(2024, 2, 9);
        assert_eq!(ymd(chinese_new_year_on_or_before(day).unwrap()), (2023, 1, 22));
        let day = fixed_from_gregorian(2024, 2, 10);
        assert_eq!(chinese_new_year_on_or_before(day).unwrap(), day);
    }

    #[test]
    fn chinese_new_year_2024_decodes_to_first_day() {
        let d = chinese_from_fixed(fixed_from_gregorian(2024, 2, 10)).unwrap();
        assert_eq!(fields(&d), (78, 41, 1, false, 1));
        assert_eq!((d.stem(), d.branch()), (1, 5));
    }

    #[test]
    fn leap_months_and_their_eves() {
        let cases = [
            ((2017, 7, 23), (78, 34, 6)),
            ((2020, 5, 23), (78, 37, 4)),
            ((2023, 3, 22), (78, 40, 2)),
            ((2033, 12, 22), (78, 50, 11)),
        ];
        for ((y, m, d), (cycle, year, month)) in cases {
            let start = fixed_from_gregorian(y, m, d);
            let leap = chinese_from_fixed(start).unwrap();
            assert_eq!(fields(&leap), (cycle, year, month, true, 1), "{y}-{m}-{d}");

            let eve = chinese_from_fixed(start - 1).unwrap();
            assert_eq!((eve.month(), eve.is_leap_month()), (month, false));
            assert!(eve.day() == 29 || eve.day() == 30);
        }
    }

    #[test]
    fn month_after_leap_month_resumes_numbering() {
        let after = chinese_from_fixed(fixed_from_gregorian(2023, 4, 20)).unwrap();
        assert_eq!(fields(&after), (78, 40, 3, false, 1));
        let after = chinese_from_fixed(fixed_from_gregorian(2034, 1, 20)).unwrap();
        assert_eq!(fields(&after), (78, 50, 12, false, 1));
        let next_year = chinese_from_fixed(fixed_from_gregorian(2034, 2, 19)).unwrap();
        assert_eq!(fields(&next_year), (78, 51, 1, false, 1));
    }

    #[test]
    fn no_major_term_marks_the_leap_month() {
        assert!(chinese_no_major_solar_term(fixed_from_gregorian(2023, 3, 22)).unwrap());
        assert!(!chinese_no_major_solar_term(fixed_from_gregorian(2023, 2, 20)).unwrap());
        let m12 = fixed_from_gregorian(2023, 1, 22);
        assert!(chinese_prior_leap_month(m12, fixed_from_gregorian(2023, 4, 20)).unwrap());
        assert!(!chinese_prior_leap_month(m12, fixed_from_gregorian(2023, 2, 20)).unwrap());
    }

    #[test]
    fn encoding_inverts_decoding() {
        let leap = ChineseDate::new(78, 40, 2, true, 15).unwrap();
        let fixed = fixed_from_chinese(&leap).unwrap();
        assert_eq!(fixed, fixed_from_gregorian(2023, 3, 22) + 14);
        assert_eq!(chinese_from_fixed(fixed).unwrap(), leap);

        let common = leap.with_month(2, false).unwrap();
        let fixed = fixed_from_chinese(&common).unwrap();
        assert!(fixed < fixed_from_gregorian(2023, 3, 22));
        assert_eq!(chinese_from_fixed(fixed).unwrap(), common);
    }

    #[test]
    fn dates_before_the_epoch_are_rejected() {
        assert!(matches!(
            chinese_from_fixed(CHINESE_EPOCH - 400),
            Err(Error::InvalidChineseDate(_))
        ));
    }
}
