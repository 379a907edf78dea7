// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Solar position
//!
//! Apparent geocentric ecliptic longitude of the Sun from a 49-term periodic
//! series (Bretagnon & Simon), plus the small corrections and coordinate
//! transforms built on it.
//!
//! Every series is evaluated in Julian centuries of dynamical time since
//! J2000.0, but the public functions take [`Moment<Universal>`] and apply the
//! ephemeris correction internally. Sidereal time is the exception: it is a
//! measure of the Earth's rotation, so it uses the universal reading as is.
//!
//! | Function | Result |
//! |----------|--------|
//! | [`solar_longitude`] | apparent longitude, `[0, 360)` |
//! | [`nutation`] / [`aberration`] | longitude corrections |
//! | [`obliquity`] | mean obliquity of the ecliptic |
//! | [`equation_of_time`] | apparent minus mean solar time |
//! | [`declination`] / [`right_ascension`] | ecliptic → equatorial |
//! | [`sidereal_from_moment`] | mean sidereal time at Greenwich |
//! | [`midday`] / [`midnight`] | true solar noon / midnight in standard time |

use crate::frames::{Apparent, Standard, Universal};
use crate::location::Location;
use crate::math::{asin_deg, atan2_deg, cos_deg, dms, poly, sin_deg, tan_deg};
use crate::moment::Moment;
use qtty::{Days, Degrees};

/// Mean length of the tropical year.
pub const MEAN_TROPICAL_YEAR: Days = Days::new(365.242_189);

/// Mean length of the sidereal year.
pub const MEAN_SIDEREAL_YEAR: Days = Days::new(365.256_36);

/// `(amplitude, phase, rate)`: each row contributes
/// `amplitude · sin(phase + rate · c)`, amplitudes in units of 1e-7 rad.
#[rustfmt::skip]
static SOLAR_LONGITUDE_TABLE: [(f64, f64, f64); 49] = [
    (403406.0, 270.54861, 0.9287892),
    (195207.0, 340.19128, 35999.1376958),
    (119433.0, 63.91854, 35999.4089666),
    (112392.0, 331.26220, 35998.7287385),
    (3891.0, 317.843, 71998.20261),
    (2819.0, 86.631, 71998.4403),
    (1721.0, 240.052, 36000.35726),
    (660.0, 310.26, 71997.4812),
    (350.0, 247.23, 32964.4678),
    (334.0, 260.87, -19.4410),
    (314.0, 297.82, 445267.1117),
    (268.0, 343.14, 45036.8840),
    (242.0, 166.79, 3.1008),
    (234.0, 81.53, 22518.4434),
    (158.0, 3.50, -19.9739),
    (132.0, 132.75, 65928.9345),
    (129.0, 182.95, 9038.0293),
    (114.0, 162.03, 3034.7684),
    (99.0, 29.8, 33718.148),
    (93.0, 266.4, 3034.448),
    (86.0, 249.2, -2280.773),
    (78.0, 157.6, 29929.992),
    (72.0, 257.8, 31556.493),
    (68.0, 185.1, 149.588),
    (64.0, 69.9, 9037.750),
    (46.0, 8.0, 107997.405),
    (38.0, 197.1, -4444.176),
    (37.0, 250.4, 151.771),
    (32.0, 65.3, 67555.316),
    (29.0, 162.7, 31556.080),
    (28.0, 341.5, -4561.540),
    (27.0, 291.6, 107996.706),
    (27.0, 98.5, 1221.655),
    (25.0, 146.7, 62894.167),
    (24.0, 110.0, 31437.369),
    (21.0, 5.2, 14578.298),
    (21.0, 342.6, -31931.757),
    (20.0, 230.9, 34777.243),
    (18.0, 256.1, 1221.999),
    (17.0, 45.3, 62894.511),
    (14.0, 242.9, -4442.039),
    (13.0, 115.2, 107997.909),
    (13.0, 151.8, 119.066),
    (13.0, 285.3, 16859.071),
    (12.0, 53.3, -4.578),
    (10.0, 126.6, 26895.292),
    (10.0, 205.7, -39.127),
    (10.0, 85.9, 12297.536),
    (10.0, 146.1, 90073.778),
];

#[inline]
fn centuries(t: Moment<Universal>) -> f64 {
    t.julian_centuries().value()
}

/// Apparent ecliptic longitude of the Sun, in `[0, 360)`.
pub fn solar_longitude(t: Moment<Universal>) -> Degrees {
    let c = centuries(t);
    let sum: f64 = SOLAR_LONGITUDE_TABLE
        .iter()
        .map(|&(amplitude, phase, rate)| amplitude * sin_deg(phase + rate * c))
        .sum();
    // 1e-7 rad expressed in degrees
    let lambda = 282.777_183_4 + 36_000.769_537_44 * c + 0.000_005_729_577_951_308_232 * sum;
    Degrees::new((lambda + aberration(t).value() + nutation(t).value()).rem_euclid(360.0))
}

/// Nutation in longitude.
pub fn nutation(t: Moment<Universal>) -> Degrees {
    let c = centuries(t);
    let a = poly(c, &[124.90, -1_934.134, 0.002_063]);
    let b = poly(c, &[201.11, 72_001.537_7, 0.000_57]);
    Degrees::new(-0.004_778 * sin_deg(a) - 0.000_366_7 * sin_deg(b))
}

/// Annual aberration in longitude.
pub fn aberration(t: Moment<Universal>) -> Degrees {
    let c = centuries(t);
    Degrees::new(0.000_097_4 * cos_deg(177.63 + 35_999.018_48 * c) - 0.005_575)
}

/// Mean obliquity of the ecliptic.
pub fn obliquity(t: Moment<Universal>) -> Degrees {
    let c = centuries(t);
    let correction = poly(
        c,
        &[0.0, dms(0.0, 0.0, -46.815), dms(0.0, 0.0, -0.000_59), dms(0.0, 0.0, 0.001_813)],
    );
    Degrees::new(dms(23.0, 26.0, 21.448) + correction)
}

/// Equation of time: apparent solar time minus mean solar time, as a
/// fraction of a day.
///
/// The series is only meaningful near the present epoch; far outside it the
/// value is clamped to half a day.
pub fn equation_of_time(t: Moment<Universal>) -> Days {
    let c = centuries(t);
    let longitude = poly(c, &[280.466_45, 36_000.769_83, 0.000_303_2]);
    let anomaly = poly(c, &[357.529_10, 35_999.050_30, -0.000_155_9, -0.000_000_48]);
    let eccentricity = poly(c, &[0.016_708_617, -0.000_042_037, -0.000_000_123_6]);
    let y = tan_deg(obliquity(t).value() / 2.0).powi(2);

    let equation = (y * sin_deg(2.0 * longitude) - 2.0 * eccentricity * sin_deg(anomaly)
        + 4.0 * eccentricity * y * sin_deg(anomaly) * cos_deg(2.0 * longitude)
        - 0.5 * y * y * sin_deg(4.0 * longitude)
        - 1.25 * eccentricity * eccentricity * sin_deg(2.0 * anomaly))
        / std::f64::consts::TAU;

    Days::new(equation.clamp(-0.5, 0.5))
}

/// Declination of a body at ecliptic `latitude` and `longitude`.
pub fn declination(t: Moment<Universal>, latitude: Degrees, longitude: Degrees) -> Degrees {
    let epsilon = obliquity(t).value();
    let (beta, lambda) = (latitude.value(), longitude.value());
    Degrees::new(asin_deg(
        sin_deg(beta) * cos_deg(epsilon) + cos_deg(beta) * sin_deg(epsilon) * sin_deg(lambda),
    ))
}

/// Right ascension of a body at ecliptic `latitude` and `longitude`, in
/// `[0, 360)`.
pub fn right_ascension(t: Moment<Universal>, latitude: Degrees, longitude: Degrees) -> Degrees {
    let epsilon = obliquity(t).value();
    let (beta, lambda) = (latitude.value(), longitude.value());
    Degrees::new(atan2_deg(
        sin_deg(lambda) * cos_deg(epsilon) - tan_deg(beta) * sin_deg(epsilon),
        cos_deg(lambda),
    ))
}

/// Mean sidereal time at Greenwich, as an angle in `[0, 360)`.
pub fn sidereal_from_moment(t: Moment<Universal>) -> Degrees {
    let c = (t.value() - 730_120.5) / 36_525.0;
    let theta = poly(
        c,
        &[280.460_618_37, 36_525.0 * 360.985_647_366_29, 0.000_387_933, -1.0 / 38_710_000.0],
    );
    Degrees::new(theta.rem_euclid(360.0))
}

/// Standard time of true (apparent) noon on fixed date `date` at `location`.
pub fn midday(date: i64, location: &Location) -> Moment<Standard> {
    (Moment::<Apparent>::from_fixed(date) + Days::new(0.5)).to(location)
}

/// Standard time of true (apparent) midnight at the start of `date`.
pub fn midnight(date: i64, location: &Location) -> Moment<Standard> {
    Moment::<Apparent>::from_fixed(date).to(location)
}
