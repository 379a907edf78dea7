// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Lunar position and mean new moons
//!
//! Geocentric longitude, latitude and distance of the Moon from the
//! truncated ELP-2000/82 series in Meeus, *Astronomical Algorithms*, ch. 47,
//! and the instants of new moon from the analytic series of ch. 49.
//!
//! Each periodic term is an integer combination of four fundamental
//! arguments (mean elongation `D`, solar anomaly `M`, lunar anomaly `M′`,
//! moon's argument of latitude `F`), damped by `E^|m|` for the terms that
//! depend on the Earth's orbital eccentricity.

use crate::frames::{Dynamical, Universal};
use crate::location::Location;
use crate::math::{asin_deg, cos_deg, poly, sin_deg};
use crate::moment::Moment;
use crate::solar::{declination, nutation, right_ascension, sidereal_from_moment};
use qtty::{Days, Degrees, Meters, Simplify};

/// Mean time between two new moons.
pub const MEAN_SYNODIC_MONTH: Days = Days::new(29.530_588_853);

/// Mean synodic months in a Julian century.
const MONTHS_PER_CENTURY: f64 = 1_236.85;

/// Equatorial radius of the Earth used by the parallax formula.
const EARTH_RADIUS: Meters = Meters::new(6_378_140.0);

// ---------------------------------------------------------------------------
// Series tables
// ---------------------------------------------------------------------------

/// Periodic terms of the new-moon correction:
/// `(amplitude, E power, M, M′, F)` multipliers.
#[rustfmt::skip]
static NEW_MOON_CORRECTIONS: [(f64, i32, i32, i32, i32); 24] = [
    (-0.40720, 0, 0, 1, 0),
    (0.17241, 1, 1, 0, 0),
    (0.01608, 0, 0, 2, 0),
    (0.01039, 0, 0, 0, 2),
    (0.00739, 1, -1, 1, 0),
    (-0.00514, 1, 1, 1, 0),
    (0.00208, 2, 2, 0, 0),
    (-0.00111, 0, 0, 1, -2),
    (-0.00057, 0, 0, 1, 2),
    (0.00056, 1, 1, 2, 0),
    (-0.00042, 0, 0, 3, 0),
    (0.00042, 1, 1, 0, 2),
    (0.00038, 1, 1, 0, -2),
    (-0.00024, 1, -1, 2, 0),
    (-0.00007, 0, 2, 1, 0),
    (0.00004, 0, 0, 2, -2),
    (0.00004, 0, 3, 0, 0),
    (0.00003, 0, 1, 1, -2),
    (0.00003, 0, 0, 2, 2),
    (-0.00003, 0, 1, 1, 2),
    (0.00003, 0, -1, 1, 2),
    (-0.00002, 0, -1, 1, -2),
    (-0.00002, 0, 1, 3, 0),
    (0.00002, 0, 0, 4, 0),
];

/// Planetary arguments added to the new-moon instant:
/// `(phase, rate per lunation, amplitude)`.
#[rustfmt::skip]
static NEW_MOON_ADDITIONS: [(f64, f64, f64); 13] = [
    (251.88, 0.016321, 0.000165),
    (251.83, 26.641886, 0.000164),
    (349.42, 36.412478, 0.000126),
    (84.66, 18.206239, 0.000110),
    (141.74, 53.303771, 0.000062),
    (207.14, 2.453732, 0.000060),
    (154.84, 7.306860, 0.000056),
    (34.52, 27.261239, 0.000047),
    (207.19, 0.121824, 0.000042),
    (291.34, 1.844379, 0.000040),
    (161.72, 24.198154, 0.000037),
    (239.56, 25.513099, 0.000035),
    (331.55, 3.592518, 0.000023),
];

/// Longitude terms, amplitudes in 1e-6 degree: `(amplitude, D, M, M′, F)`.
#[rustfmt::skip]
static LONGITUDE_TERMS: [(f64, i32, i32, i32, i32); 58] = [
    (6288774.0, 0, 0, 1, 0),
    (1274027.0, 2, 0, -1, 0),
    (658314.0, 2, 0, 0, 0),
    (213618.0, 0, 0, 2, 0),
    (-185116.0, 0, 1, 0, 0),
    (-114332.0, 0, 0, 0, 2),
    (58793.0, 2, 0, -2, 0),
    (57006.0, 2, -1, -1, 0),
    (53322.0, 2, 0, 1, 0),
    (45758.0, 2, -1, 0, 0),
    (-40923.0, 0, 1, -1, 0),
    (-34720.0, 1, 0, 0, 0),
    (-30383.0, 0, 1, 1, 0),
    (15327.0, 2, 0, 0, -2),
    (-12528.0, 0, 0, 1, 2),
    (10980.0, 0, 0, 1, -2),
    (10675.0, 4, 0, -1, 0),
    (10034.0, 0, 0, 3, 0),
    (8548.0, 4, 0, -2, 0),
    (-7888.0, 2, 1, -1, 0),
    (-6766.0, 2, 1, 0, 0),
    (-5163.0, 1, 0, -1, 0),
    (4987.0, 1, 1, 0, 0),
    (4036.0, 2, -1, 1, 0),
    (3994.0, 2, 0, 2, 0),
    (3861.0, 4, 0, 0, 0),
    (3665.0, 2, 0, -3, 0),
    (-2689.0, 0, 1, -2, 0),
    (-2602.0, 2, 0, -1, 2),
    (2390.0, 2, -1, -2, 0),
    (-2348.0, 1, 0, 1, 0),
    (2236.0, 2, -2, 0, 0),
    (-2120.0, 0, 1, 2, 0),
    (-2069.0, 0, 2, 0, 0),
    (2048.0, 2, -2, -1, 0),
    (-1773.0, 2, 0, 1, -2),
    (-1595.0, 2, 0, 0, 2),
    (1215.0, 4, -1, -1, 0),
    (-1110.0, 0, 0, 2, 2),
    (-892.0, 3, 0, -1, 0),
    (-810.0, 2, 1, 1, 0),
    (759.0, 4, -1, -2, 0),
    (-713.0, 0, 2, -1, 0),
    (-700.0, 2, 2, -1, 0),
    (691.0, 2, 1, -2, 0),
    (596.0, 2, -1, 0, -2),
    (549.0, 4, 0, 1, 0),
    (537.0, 0, 0, 4, 0),
    (520.0, 4, -1, 0, 0),
    (-487.0, 1, 0, -2, 0),
    (-399.0, 2, 1, 0, -2),
    (351.0, 1, 1, 1, 0),
    (-340.0, 3, 0, -2, 0),
    (330.0, 4, 0, -3, 0),
    (327.0, 2, -1, 2, 0),
    (-323.0, 0, 2, 1, 0),
    (299.0, 1, 1, -1, 0),
    (294.0, 2, 0, 3, 0),
];

/// Latitude terms, amplitudes in 1e-6 degree: `(amplitude, D, M, M′, F)`.
#[rustfmt::skip]
static LATITUDE_TERMS: [(f64, i32, i32, i32, i32); 60] = [
    (5128122.0, 0, 0, 0, 1),
    (280602.0, 0, 0, 1, 1),
    (277693.0, 0, 0, 1, -1),
    (173237.0, 2, 0, 0, -1),
    (55413.0, 2, 0, -1, 1),
    (46271.0, 2, 0, -1, -1),
    (32573.0, 2, 0, 0, 1),
    (17198.0, 0, 0, 2, 1),
    (9266.0, 2, 0, 1, -1),
    (8822.0, 0, 0, 2, -1),
    (8216.0, 2, -1, 0, -1),
    (4324.0, 2, 0, -2, -1),
    (4200.0, 2, 0, 1, 1),
    (-3359.0, 2, 1, 0, -1),
    (2463.0, 2, -1, -1, 1),
    (2211.0, 2, -1, 0, 1),
    (2065.0, 2, -1, -1, -1),
    (-1870.0, 0, 1, -1, -1),
    (1828.0, 4, 0, -1, -1),
    (-1794.0, 0, 1, 0, 1),
    (-1749.0, 0, 0, 0, 3),
    (-1565.0, 0, 1, -1, 1),
    (-1491.0, 1, 0, 0, 1),
    (-1475.0, 0, 1, 1, 1),
    (-1410.0, 0, 1, 1, -1),
    (-1344.0, 0, 1, 0, -1),
    (-1335.0, 1, 0, 0, -1),
    (1107.0, 0, 0, 3, 1),
    (1021.0, 4, 0, 0, -1),
    (833.0, 4, 0, -1, 1),
    (777.0, 0, 0, 1, -3),
    (671.0, 4, 0, -2, 1),
    (607.0, 2, 0, 0, -3),
    (596.0, 2, 0, 2, -1),
    (491.0, 2, -1, 1, -1),
    (-451.0, 2, 0, -2, 1),
    (439.0, 0, 0, 3, -1),
    (422.0, 2, 0, 2, 1),
    (421.0, 2, 0, -3, -1),
    (-366.0, 2, 1, -1, 1),
    (-351.0, 2, 1, 0, 1),
    (331.0, 4, 0, 0, 1),
    (315.0, 2, -1, 1, 1),
    (302.0, 2, -2, 0, -1),
    (-283.0, 0, 0, 1, 3),
    (-229.0, 2, 1, 1, -1),
    (223.0, 1, 1, 0, -1),
    (223.0, 1, 1, 0, 1),
    (-220.0, 0, 1, -2, -1),
    (-220.0, 2, 1, -1, -1),
    (-185.0, 1, 0, 1, 1),
    (181.0, 2, -1, -2, -1),
    (-177.0, 0, 1, 2, 1),
    (176.0, 4, 0, -2, -1),
    (166.0, 4, -1, -1, -1),
    (-164.0, 1, 0, 1, -1),
    (132.0, 4, 0, 1, -1),
    (-119.0, 1, 0, -2, -1),
    (115.0, 4, -1, 0, -1),
    (107.0, 2, -2, 0, 1),
];

/// Distance terms, amplitudes in metres: `(amplitude, D, M, M′, F)`.
#[rustfmt::skip]
static DISTANCE_TERMS: [(f64, i32, i32, i32, i32); 60] = [
    (-20905355.0, 0, 0, 1, 0),
    (-3699111.0, 2, 0, -1, 0),
    (-2955968.0, 2, 0, 0, 0),
    (-569925.0, 0, 0, 2, 0),
    (48888.0, 0, 1, 0, 0),
    (-3149.0, 0, 0, 0, 2),
    (246158.0, 2, 0, -2, 0),
    (-152138.0, 2, -1, -1, 0),
    (-170733.0, 2, 0, 1, 0),
    (-204586.0, 2, -1, 0, 0),
    (-129620.0, 0, 1, -1, 0),
    (108743.0, 1, 0, 0, 0),
    (104755.0, 0, 1, 1, 0),
    (10321.0, 2, 0, 0, -2),
    (0.0, 0, 0, 1, 2),
    (79661.0, 0, 0, 1, -2),
    (-34782.0, 4, 0, -1, 0),
    (-23210.0, 0, 0, 3, 0),
    (-21636.0, 4, 0, -2, 0),
    (24208.0, 2, 1, -1, 0),
    (30824.0, 2, 1, 0, 0),
    (-8379.0, 1, 0, -1, 0),
    (-16675.0, 1, 1, 0, 0),
    (-12831.0, 2, -1, 1, 0),
    (-10445.0, 2, 0, 2, 0),
    (-11650.0, 4, 0, 0, 0),
    (14403.0, 2, 0, -3, 0),
    (-7003.0, 0, 1, -2, 0),
    (0.0, 2, 0, -1, 2),
    (10056.0, 2, -1, -2, 0),
    (6322.0, 1, 0, 1, 0),
    (-9884.0, 2, -2, 0, 0),
    (5751.0, 0, 1, 2, 0),
    (0.0, 0, 2, 0, 0),
    (-4950.0, 2, -2, -1, 0),
    (4130.0, 2, 0, 1, -2),
    (0.0, 2, 0, 0, 2),
    (-3958.0, 4, -1, -1, 0),
    (0.0, 0, 0, 2, 2),
    (3258.0, 3, 0, -1, 0),
    (2616.0, 2, 1, 1, 0),
    (-1897.0, 4, -1, -2, 0),
    (-2117.0, 0, 2, -1, 0),
    (2354.0, 2, 2, -1, 0),
    (0.0, 2, 1, -2, 0),
    (0.0, 2, -1, 0, -2),
    (-1423.0, 4, 0, 1, 0),
    (-1117.0, 0, 0, 4, 0),
    (-1571.0, 4, -1, 0, 0),
    (-1739.0, 1, 0, -2, 0),
    (0.0, 2, 1, 0, -2),
    (-4421.0, 0, 0, 2, -2),
    (0.0, 1, 1, 1, 0),
    (0.0, 3, 0, -2, 0),
    (0.0, 4, 0, -3, 0),
    (0.0, 2, -1, 2, 0),
    (1165.0, 0, 2, 1, 0),
    (0.0, 1, 1, -1, 0),
    (0.0, 2, 0, 3, 0),
    (8752.0, 2, 0, -1, -2),
];

// ---------------------------------------------------------------------------
// Fundamental arguments
// ---------------------------------------------------------------------------

/// The fundamental arguments at `c` Julian centuries from J2000.0.
struct Arguments {
    mean_longitude: f64,
    elongation: f64,
    solar_anomaly: f64,
    lunar_anomaly: f64,
    node: f64,
    eccentricity: f64,
}

impl Arguments {
    fn at(c: f64) -> Self {
        Self {
            mean_longitude: poly(
                c,
                &[218.316_447_7, 481_267.881_234_21, -0.001_578_6, 1.0 / 538_841.0, -1.0 / 65_194_000.0],
            ),
            elongation: poly(
                c,
                &[297.850_192_1, 445_267.111_403_4, -0.001_881_9, 1.0 / 545_868.0, -1.0 / 113_065_000.0],
            ),
            solar_anomaly: poly(c, &[357.529_109_2, 35_999.050_290_9, -0.000_153_6, 1.0 / 24_490_000.0]),
            lunar_anomaly: poly(
                c,
                &[134.963_396_4, 477_198.867_505_5, 0.008_741_4, 1.0 / 69_699.0, -1.0 / 14_712_000.0],
            ),
            node: poly(
                c,
                &[93.272_095_0, 483_202.017_523_3, -0.003_653_9, -1.0 / 3_526_000.0, 1.0 / 863_310_000.0],
            ),
            eccentricity: poly(c, &[1.0, -0.002_516, -0.000_007_4]),
        }
    }

    /// `Σ amplitude · E^|m| · trig(d·D + m·M + m′·M′ + f·F)` over `table`.
    fn sum(&self, table: &[(f64, i32, i32, i32, i32)], trig: fn(f64) -> f64) -> f64 {
        table
            .iter()
            .map(|&(amplitude, d, m, m_prime, f)| {
                let angle = f64::from(d) * self.elongation
                    + f64::from(m) * self.solar_anomaly
                    + f64::from(m_prime) * self.lunar_anomaly
                    + f64::from(f) * self.node;
                amplitude * self.eccentricity.powi(m.abs()) * trig(angle)
            })
            .sum()
    }
}

#[inline]
fn arguments(t: Moment<Universal>) -> (f64, Arguments) {
    let c = t.julian_centuries().value();
    (c, Arguments::at(c))
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Apparent geocentric ecliptic longitude of the Moon, in `[0, 360)`.
pub fn lunar_longitude(t: Moment<Universal>) -> Degrees {
    let (c, args) = arguments(t);
    let correction = 1e-6 * args.sum(&LONGITUDE_TERMS, sin_deg);
    let venus = 0.003_958 * sin_deg(119.75 + 131.849 * c);
    let jupiter = 0.000_318 * sin_deg(53.09 + 479_264.29 * c);
    let flat_earth = 0.001_962 * sin_deg(args.mean_longitude - args.node);
    let lambda =
        args.mean_longitude + correction + venus + jupiter + flat_earth + nutation(t).value();
    Degrees::new(lambda.rem_euclid(360.0))
}

/// Geocentric ecliptic latitude of the Moon.
pub fn lunar_latitude(t: Moment<Universal>) -> Degrees {
    let (c, args) = arguments(t);
    let l = args.mean_longitude;
    let beta = 1e-6 * args.sum(&LATITUDE_TERMS, sin_deg);
    let venus = 0.000_175
        * (sin_deg(119.75 + 131.849 * c + args.node) + sin_deg(119.75 + 131.849 * c - args.node));
    let flat_earth = -0.002_235 * sin_deg(l) + 0.000_127 * sin_deg(l - args.lunar_anomaly)
        - 0.000_115 * sin_deg(l + args.lunar_anomaly);
    let extra = 0.000_382 * sin_deg(313.45 + 481_266.484 * c);
    Degrees::new(beta + venus + flat_earth + extra)
}

/// Distance between the centres of the Earth and the Moon.
pub fn lunar_distance(t: Moment<Universal>) -> Meters {
    let (_, args) = arguments(t);
    Meters::new(385_000_560.0 + args.sum(&DISTANCE_TERMS, cos_deg))
}

/// Geocentric altitude of the Moon above the horizon at `location`, in
/// `[-180, 180)`.
pub fn lunar_altitude(t: Moment<Universal>, location: &Location) -> Degrees {
    let phi = location.latitude().value();
    let lambda = lunar_longitude(t);
    let beta = lunar_latitude(t);
    let alpha = right_ascension(t, beta, lambda).value();
    let delta = declination(t, beta, lambda).value();
    let theta = sidereal_from_moment(t).value();
    let hour_angle = (theta + location.longitude().value() - alpha).rem_euclid(360.0);
    let altitude = asin_deg(
        sin_deg(phi) * sin_deg(delta) + cos_deg(phi) * cos_deg(delta) * cos_deg(hour_angle),
    );
    Degrees::new((altitude + 180.0).rem_euclid(360.0) - 180.0)
}

/// Parallax in altitude: how much lower the Moon appears from the surface
/// than from the Earth's centre.
pub fn lunar_parallax(t: Moment<Universal>, location: &Location) -> Degrees {
    let geocentric = lunar_altitude(t, location).value();
    let ratio = (EARTH_RADIUS / lunar_distance(t)).simplify().value();
    Degrees::new(asin_deg(ratio * cos_deg(geocentric)))
}

/// Altitude of the Moon as seen by an observer at `location`.
pub fn topocentric_lunar_altitude(t: Moment<Universal>, location: &Location) -> Degrees {
    lunar_altitude(t, location) - lunar_parallax(t, location)
}

// ---------------------------------------------------------------------------
// New moons
// ---------------------------------------------------------------------------

/// Moment of the `n`-th new moon, counted from the new moon of
/// 6 January 2000 (`n = 0`); negative `n` reaches back in time.
pub fn nth_new_moon(n: i64) -> Moment<Universal> {
    let k = n as f64;
    let c = k / MONTHS_PER_CENTURY;

    let approx = poly(
        c,
        &[
            5.097_65,
            MEAN_SYNODIC_MONTH.value() * MONTHS_PER_CENTURY,
            0.000_133_7,
            -0.000_000_150,
            0.000_000_000_73,
        ],
    );
    let e = poly(c, &[1.0, -0.002_516, -0.000_007_4]);
    let solar_anomaly = poly(
        c,
        &[2.553_4, 29.105_356_69 * MONTHS_PER_CENTURY, -0.000_021_8, -0.000_000_11],
    );
    let lunar_anomaly = poly(
        c,
        &[
            201.564_3,
            385.816_935_28 * MONTHS_PER_CENTURY,
            0.010_743_8,
            0.000_012_39,
            -0.000_000_058,
        ],
    );
    let moon_argument = poly(
        c,
        &[
            160.710_8,
            390.670_502_74 * MONTHS_PER_CENTURY,
            -0.001_634_1,
            -0.000_002_27,
            0.000_000_011,
        ],
    );
    let omega = poly(
        c,
        &[124.774_6, -1.563_755_80 * MONTHS_PER_CENTURY, 0.002_069_1, 0.000_002_15],
    );

    let periodic: f64 = NEW_MOON_CORRECTIONS
        .iter()
        .map(|&(amplitude, e_power, m, m_prime, f)| {
            amplitude
                * e.powi(e_power)
                * sin_deg(
                    f64::from(m) * solar_anomaly
                        + f64::from(m_prime) * lunar_anomaly
                        + f64::from(f) * moon_argument,
                )
        })
        .sum();
    let correction = -0.000_17 * sin_deg(omega) + periodic;
    let extra = 0.000_325 * sin_deg(poly(c, &[299.77, 132.847_584_8, -0.009_173]));
    let additional: f64 = NEW_MOON_ADDITIONS
        .iter()
        .map(|&(phase, rate, amplitude)| amplitude * sin_deg(phase + rate * k))
        .sum();

    let dynamical =
        Moment::<Dynamical>::J2000 + Days::new(approx + correction + extra + additional);
    dynamical.to_universal()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::civil::{fixed_from_gregorian, gregorian_from_fixed};
    use crate::location::URBANA;
    use approx::assert_abs_diff_eq;

    const J2000_UT: Moment<Universal> = Moment::new(730_120.5);

    #[test]
    fn position_at_j2000() {
        assert_abs_diff_eq!(lunar_longitude(J2000_UT).value(), 223.324_566, epsilon = 1e-4);
        assert_abs_diff_eq!(lunar_latitude(J2000_UT).value(), 5.171_362, epsilon = 1e-4);
        assert_abs_diff_eq!(lunar_distance(J2000_UT).value(), 402_446_964.3, epsilon = 10.0);
    }

    #[test]
    fn distance_stays_between_perigee_and_apogee() {
        for i in 0..3_660 {
            let d = lunar_distance(J2000_UT + Days::new(0.5 * i as f64));
            assert!(
                d > Meters::new(356_000_000.0) && d < Meters::new(407_000_000.0),
                "step {i}: {d}"
            );
        }
    }

    #[test]
    fn new_moons_near_j2000() {
        assert_abs_diff_eq!(nth_new_moon(0).value(), 730_125.759_472, epsilon = 1e-5);
        assert_abs_diff_eq!(nth_new_moon(1).value(), 730_155.543_922, epsilon = 1e-5);
        assert_abs_diff_eq!(nth_new_moon(-1).value(), 730_095.938_625, epsilon = 1e-5);
        assert_eq!(nth_new_moon(0).fixed(), fixed_from_gregorian(2000, 1, 6));
    }

    #[test]
    fn new_moon_of_the_april_2023_eclipse() {
        let t = nth_new_moon(288);
        let date = gregorian_from_fixed(t.fixed());
        assert_eq!((date.year(), date.month(), date.day()), (2023, 4, 20));
        // conjunction at about 04:12 UT, the day of the hybrid eclipse
        assert_abs_diff_eq!(t.time_of_day().value() * 24.0, 4.19, epsilon = 0.05);
    }

    #[test]
    fn consecutive_new_moons_are_a_synodic_month_apart() {
        for n in -50..50 {
            let gap = nth_new_moon(n + 1) - nth_new_moon(n);
            assert!(gap > Days::new(29.2) && gap < Days::new(29.9), "n = {n}: {gap}");
        }
    }

    #[test]
    fn altitude_and_parallax_at_urbana() {
        let t = Moment::<Universal>::new(fixed_from_gregorian(2024, 2, 10) as f64 + 0.3);
        let geocentric = lunar_altitude(t, &URBANA);
        let parallax = lunar_parallax(t, &URBANA);
        assert_abs_diff_eq!(geocentric.value(), -64.927_547, epsilon = 1e-3);
        assert_abs_diff_eq!(parallax.value(), 0.432_198, epsilon = 1e-4);
        assert_abs_diff_eq!(
            topocentric_lunar_altitude(t, &URBANA).value(),
            -65.359_745,
            epsilon = 1e-3
        );
    }
}
