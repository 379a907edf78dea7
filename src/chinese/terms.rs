// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The twenty-four solar terms as observed in China.
//!
//! Terms fall every 15° of solar longitude. The **major** terms (中氣) sit
//! on multiples of 30° and decide month numbering and leap months; the
//! **minor** terms (節氣) sit halfway between them.

use super::{midnight_in_china, standard_in_china};
use crate::error::Result;
use crate::frames::Standard;
use crate::math::amod;
use crate::moment::Moment;
use crate::solar::solar_longitude;
use crate::solar_terms::solar_longitude_after;
use qtty::Degrees;

/// One of the 24 solar terms, numbered from 1 (立春, 315°) to 24 (大寒,
/// 300°).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolarTerm(u8);

impl SolarTerm {
    /// Start of spring, the first term of the year.
    pub const LICHUN: SolarTerm = SolarTerm(1);
    /// Winter solstice.
    pub const DONGZHI: SolarTerm = SolarTerm(22);

    /// Term with the given index, if it is within `1..=24`.
    #[inline]
    pub const fn new(index: u8) -> Option<Self> {
        if index >= 1 && index <= 24 {
            Some(SolarTerm(index))
        } else {
            None
        }
    }

    /// The term whose 15° band contains `longitude`.
    pub fn from_longitude(longitude: Degrees) -> Self {
        let band = (longitude.value().rem_euclid(360.0) / 15.0).floor() as i64;
        SolarTerm(amod(4 + band, 24) as u8)
    }

    /// Position in the year, `1..=24`.
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Solar longitude at which the term begins.
    #[inline]
    pub fn longitude(self) -> Degrees {
        Degrees::new((315.0 + 15.0 * f64::from(self.0 - 1)).rem_euclid(360.0))
    }

    /// Major terms are the even-numbered ones, on multiples of 30°.
    #[inline]
    pub const fn is_major(self) -> bool {
        self.0 % 2 == 0
    }
}

/// Number (`1..=12`) of the last major solar term at or before midnight
/// starting `date`; major term 1 (雨水) is at 330°.
pub fn current_major_solar_term(date: i64) -> u8 {
    let s = solar_longitude(midnight_in_china(date)).value();
    amod(2 + (s / 30.0).floor() as i64, 12) as u8
}

/// Number (`1..=12`) of the last minor solar term at or before midnight
/// starting `date`; minor term 1 (立春) is at 315°.
pub fn current_minor_solar_term(date: i64) -> u8 {
    let s = solar_longitude(midnight_in_china(date)).value();
    amod(3 + ((s - 15.0) / 30.0).floor() as i64, 12) as u8
}

/// Beijing standard time of the first moment on or after midnight starting
/// `date` at which the solar longitude is `lambda`.
pub fn chinese_solar_longitude_on_or_after(lambda: Degrees, date: i64) -> Result<Moment<Standard>> {
    let t = solar_longitude_after(lambda, midnight_in_china(date))?;
    Ok(standard_in_china(t))
}

fn next_major_longitude(date: i64) -> Degrees {
    let s = solar_longitude(midnight_in_china(date)).value();
    Degrees::new((30.0 * (s / 30.0).ceil()).rem_euclid(360.0))
}

fn next_minor_longitude(date: i64) -> Degrees {
    let s = solar_longitude(midnight_in_china(date)).value();
    Degrees::new((30.0 * ((s - 15.0) / 30.0).ceil() + 15.0).rem_euclid(360.0))
}

/// Moment of the first major solar term on or after `date`.
pub fn major_solar_term_on_or_after(date: i64) -> Result<Moment<Standard>> {
    chinese_solar_longitude_on_or_after(next_major_longitude(date), date)
}

/// Moment of the first minor solar term on or after `date`.
pub fn minor_solar_term_on_or_after(date: i64) -> Result<Moment<Standard>> {
    chinese_solar_longitude_on_or_after(next_minor_longitude(date), date)
}

/// The first solar term of either kind on or after `date`, with its moment.
pub fn solar_term_on_or_after(date: i64) -> Result<(SolarTerm, Moment<Standard>)> {
    let major_longitude = next_major_longitude(date);
    let minor_longitude = next_minor_longitude(date);
    let major = chinese_solar_longitude_on_or_after(major_longitude, date)?;
    let minor = chinese_solar_longitude_on_or_after(minor_longitude, date)?;
    if major <= minor {
        Ok((SolarTerm::from_longitude(major_longitude), major))
    } else {
        Ok((SolarTerm::from_longitude(minor_longitude), minor))
    }
}
