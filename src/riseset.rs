// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Sunrise, sunset and twilight
//!
//! Events are defined by a **depression angle** `α`: the moment the Sun's
//! centre is `α` below the horizon (negative `α` means above it). The hour
//! angle is solved from the Sun's declination and refined by fixed-point
//! iteration until two estimates agree within thirty seconds.
//!
//! | Event | Depression |
//! |-------|------------|
//! | sunrise / sunset | 50′ + dip of the horizon + 19″·√h |
//! | [`Twilight::Civil`] | 6° |
//! | [`Twilight::Nautical`] | 12° |
//! | [`Twilight::Astronomical`] | 18° |
//!
//! When the Sun never reaches the requested depression (polar day or
//! night) the finders return [`Error::NoEventThisDay`].

use crate::error::{Error, Result};
use crate::frames::{Apparent, Local, Standard, Universal};
use crate::location::Location;
use crate::math::{acos_deg, asin_deg, atan2_deg, cos_deg, dms, sin_deg, tan_deg};
use crate::moment::Moment;
use crate::solar::{declination, midday, solar_longitude};
use log::{trace, warn};
use qtty::{Day, Days, Degrees, Seconds};

/// Upper bound on refinements performed by [`moment_of_depression`].
pub const MAX_DEPRESSION_ITERATIONS: u32 = 32;

/// Successive estimates closer than this are considered converged.
pub const DEPRESSION_TOLERANCE: Seconds = Seconds::new(30.0);

/// Equatorial radius used for the dip of the horizon, in metres.
const EARTH_RADIUS: f64 = 6_378_140.0;

/// Standard twilight depressions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Twilight {
    /// Sun centre 6° below the horizon.
    Civil,
    /// Sun centre 12° below the horizon.
    Nautical,
    /// Sun centre 18° below the horizon.
    Astronomical,
}

impl Twilight {
    /// Depression of the Sun's centre that ends or begins this twilight.
    #[inline]
    pub const fn depression(self) -> Degrees {
        match self {
            Twilight::Civil => Degrees::new(6.0),
            Twilight::Nautical => Degrees::new(12.0),
            Twilight::Astronomical => Degrees::new(18.0),
        }
    }
}

// ---------------------------------------------------------------------------
// Depression solver
// ---------------------------------------------------------------------------

/// Sine of the hour-angle offset from six o'clock at which the Sun stands
/// `alpha` below the horizon, using its declination at local time `t`.
///
/// Values outside `[-1, 1]` mean the depression is never reached.
pub fn sine_offset(t: Moment<Local>, location: &Location, alpha: Degrees) -> f64 {
    let phi = location.latitude().value();
    let universal: Moment<Universal> = t.to(location);
    let delta = declination(universal, Degrees::new(0.0), solar_longitude(universal)).value();
    tan_deg(phi) * tan_deg(delta) + sin_deg(alpha.value()) / (cos_deg(delta) * cos_deg(phi))
}

/// One step of the depression solver: the local moment on the day of `t`
/// at which the Sun is `alpha` below the horizon, in the morning if `early`.
///
/// If the declination at `t` gives no solution the equation is retried at
/// an alternate time (midnight for morning events, the following midnight
/// for evening events, noon when `alpha` is negative).
pub fn approx_moment_of_depression(
    t: Moment<Local>,
    location: &Location,
    alpha: Degrees,
    early: bool,
) -> Result<Moment<Local>> {
    let date = t.fixed();
    let first = sine_offset(t, location, alpha);
    let value = if first.abs() > 1.0 {
        let alternate = if alpha.value() >= 0.0 {
            if early {
                Moment::<Local>::from_fixed(date)
            } else {
                Moment::<Local>::from_fixed(date + 1)
            }
        } else {
            Moment::<Local>::from_fixed(date) + Days::new(0.5)
        };
        sine_offset(alternate, location, alpha)
    } else {
        first
    };

    if value.abs() > 1.0 {
        return Err(Error::NoEventThisDay);
    }

    let offset = (0.5 + asin_deg(value) / 360.0).rem_euclid(1.0) - 0.25;
    let sign = if early { -1.0 } else { 1.0 };
    let apparent = Moment::<Apparent>::new(date as f64 + 0.5 + sign * offset);
    Ok(apparent.to(location))
}

/// Local moment near `approx` at which the Sun is `alpha` below the
/// horizon, refined until successive estimates differ by less than
/// [`DEPRESSION_TOLERANCE`].
///
/// Returns [`Error::NoEventThisDay`] at the poles or when the depression is
/// not reached, and [`Error::SearchLimitExceeded`] if the iteration fails to
/// settle within [`MAX_DEPRESSION_ITERATIONS`] steps.
pub fn moment_of_depression(
    approx: Moment<Local>,
    location: &Location,
    alpha: Degrees,
    early: bool,
) -> Result<Moment<Local>> {
    if location.latitude().abs() >= Degrees::new(90.0) {
        return Err(Error::NoEventThisDay);
    }
    let tolerance = DEPRESSION_TOLERANCE.to::<Day>();
    let mut approx = approx;
    for step in 0..MAX_DEPRESSION_ITERATIONS {
        let t = approx_moment_of_depression(approx, location, alpha, early)?;
        if (approx - t).abs() < tolerance {
            trace!("depression {alpha} converged after {} steps", step + 1);
            return Ok(t);
        }
        approx = t;
    }
    warn!("depression {alpha} did not converge near {approx}");
    Err(Error::SearchLimitExceeded {
        limit: MAX_DEPRESSION_ITERATIONS,
    })
}

/// Standard time of the morning event on fixed date `date` when the Sun is
/// `alpha` below the horizon.
pub fn dawn(date: i64, location: &Location, alpha: Degrees) -> Result<Moment<Standard>> {
    let approx = Moment::<Local>::from_fixed(date) + Days::new(0.25);
    moment_of_depression(approx, location, alpha, true).map(|t| t.to(location))
}

/// Standard time of the evening event on fixed date `date` when the Sun is
/// `alpha` below the horizon.
pub fn dusk(date: i64, location: &Location, alpha: Degrees) -> Result<Moment<Standard>> {
    let approx = Moment::<Local>::from_fixed(date) + Days::new(0.75);
    moment_of_depression(approx, location, alpha, false).map(|t| t.to(location))
}

/// Depression of the Sun's centre at sunrise and sunset: refraction and
/// semi-diameter, the dip of the horizon seen from the observer's
/// elevation, and an empirical elevation term.
pub fn horizon_depression(location: &Location) -> Degrees {
    let h = location.elevation().value().max(0.0);
    let dip = acos_deg(EARTH_RADIUS / (EARTH_RADIUS + h));
    Degrees::new(dms(0.0, 50.0, 0.0) + dip + dms(0.0, 0.0, 19.0) * h.sqrt())
}

/// Standard time of sunrise on `date`, or [`Error::NoEventThisDay`] during
/// polar day or night.
///
/// ```rust
/// use lunisolar::civil::fixed_from_gregorian;
/// use lunisolar::{sunrise, Error, CFS_ALERT, URBANA};
///
/// let rise = sunrise(fixed_from_gregorian(2024, 2, 10), &URBANA).unwrap();
/// assert!((rise.time_of_day().value() * 24.0 - 6.822).abs() < 1e-3);
///
/// let polar_night = fixed_from_gregorian(2024, 12, 21);
/// assert_eq!(sunrise(polar_night, &CFS_ALERT), Err(Error::NoEventThisDay));
/// ```
pub fn sunrise(date: i64, location: &Location) -> Result<Moment<Standard>> {
    dawn(date, location, horizon_depression(location))
}

/// Standard time of sunset on `date`, or [`Error::NoEventThisDay`] during
/// polar day or night.
pub fn sunset(date: i64, location: &Location) -> Result<Moment<Standard>> {
    dusk(date, location, horizon_depression(location))
}

/// Start of morning twilight of the given kind.
pub fn twilight_dawn(date: i64, location: &Location, kind: Twilight) -> Result<Moment<Standard>> {
    dawn(date, location, kind.depression())
}

/// End of evening twilight of the given kind.
pub fn twilight_dusk(date: i64, location: &Location, kind: Twilight) -> Result<Moment<Standard>> {
    dusk(date, location, kind.depression())
}

// ---------------------------------------------------------------------------
// Temporal hours
// ---------------------------------------------------------------------------

/// One twelfth of the time from sunrise to sunset on `date`.
pub fn daytime_temporal_hour(date: i64, location: &Location) -> Result<Days> {
    let rise = sunrise(date, location)?;
    let set = sunset(date, location)?;
    Ok((set - rise) / 12.0)
}

/// One twelfth of the time from sunset on `date` to sunrise the next day.
pub fn nighttime_temporal_hour(date: i64, location: &Location) -> Result<Days> {
    let set = sunset(date, location)?;
    let rise = sunrise(date + 1, location)?;
    Ok((rise - set) / 12.0)
}

/// Standard time corresponding to a reading of a temporal-hour sundial.
///
/// The sundial divides daylight and darkness into twelve equal hours each:
/// its 6:00 is sunrise and its 18:00 sunset, whatever the season.
pub fn standard_from_sundial(t: Moment<Apparent>, location: &Location) -> Result<Moment<Standard>> {
    let date = t.fixed();
    let hour = t.time_of_day().value() * 24.0;
    if (6.0..=18.0).contains(&hour) {
        let h = daytime_temporal_hour(date, location)?;
        Ok(sunrise(date, location)? + h * (hour - 6.0))
    } else if hour < 6.0 {
        let h = nighttime_temporal_hour(date - 1, location)?;
        Ok(sunset(date - 1, location)? + h * (hour + 6.0))
    } else {
        let h = nighttime_temporal_hour(date, location)?;
        Ok(sunset(date, location)? + h * (hour - 18.0))
    }
}

/// Time of the afternoon (ʿaṣr) prayer: when an object's shadow exceeds its
/// noon shadow by twice the object's height (Ḥanafī reckoning).
pub fn asr(date: i64, location: &Location) -> Result<Moment<Standard>> {
    let noon: Moment<Universal> = midday(date, location).to(location);
    let phi = location.latitude().value();
    let delta = declination(noon, Degrees::new(0.0), solar_longitude(noon)).value();
    let altitude = delta - phi - 90.0;
    let h = atan2_deg(tan_deg(altitude), 2.0 * tan_deg(altitude) + 1.0);
    dusk(date, location, Degrees::new(-h))
}
