// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Moments at which the Sun reaches a given ecliptic longitude.
//!
//! [`solar_longitude_after`] is exact to the bisection tolerance and drives
//! the solstice and solar-term finders. [`estimate_prior_solar_longitude`] is
//! a cheap two-step estimate used to seed integer searches over days.

use crate::civil::gregorian_new_year;
use crate::error::Result;
use crate::frames::{Standard, Universal};
use crate::location::Location;
use crate::moment::Moment;
use crate::search::angular_bisect;
use crate::solar::{solar_longitude, MEAN_TROPICAL_YEAR};
use qtty::{Days, Degrees};

/// Equinoxes and solstices, named for the northern-hemisphere season they
/// open.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Season {
    /// March equinox, 0°.
    Spring,
    /// June solstice, 90°.
    Summer,
    /// September equinox, 180°.
    Autumn,
    /// December solstice, 270°.
    Winter,
}

impl Season {
    /// The four seasons in calendar order.
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

    /// Solar longitude at which the season begins.
    #[inline]
    pub const fn longitude(self) -> Degrees {
        match self {
            Season::Spring => Degrees::new(0.0),
            Season::Summer => Degrees::new(90.0),
            Season::Autumn => Degrees::new(180.0),
            Season::Winter => Degrees::new(270.0),
        }
    }
}

/// Mean days per degree of solar longitude.
#[inline]
fn mean_rate() -> f64 {
    MEAN_TROPICAL_YEAR.value() / 360.0
}

/// First moment at or after `t` when the solar longitude is `lambda`.
///
/// The mean motion gives an estimate `τ`; the crossing is then bisected in
/// `[max(t, τ − 5), τ + 5]`.
pub fn solar_longitude_after(lambda: Degrees, t: Moment<Universal>) -> Result<Moment<Universal>> {
    let rate = mean_rate();
    let tau = t.value() + rate * (lambda - solar_longitude(t)).value().rem_euclid(360.0);
    let lo = t.value().max(tau - 5.0);
    let hi = tau + 5.0;
    angular_bisect(|x| solar_longitude(Moment::new(x)), lambda, lo, hi).map(Moment::new)
}

/// Approximate moment, at or before `t`, of the last time the solar
/// longitude was `lambda`.
///
/// Two mean-motion steps; accurate to a few minutes, never later than `t`.
pub fn estimate_prior_solar_longitude(lambda: Degrees, t: Moment<Universal>) -> Moment<Universal> {
    let rate = mean_rate();
    let tau = t - Days::new(rate * (solar_longitude(t) - lambda).value().rem_euclid(360.0));
    let delta = (solar_longitude(tau) - lambda).value() + 180.0;
    let delta = delta.rem_euclid(360.0) - 180.0;
    t.min(tau - Days::new(rate * delta))
}

/// Standard time at `location` of the given equinox or solstice in
/// Gregorian year `year`.
pub fn season_in_gregorian_year(
    season: Season,
    year: i64,
    location: &Location,
) -> Result<Moment<Standard>> {
    let new_year = Moment::<Universal>::from_fixed(gregorian_new_year(year));
    solar_longitude_after(season.longitude(), new_year).map(|t| t.to(location))
}
