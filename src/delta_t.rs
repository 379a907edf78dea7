// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Ephemeris correction (ΔT): Universal ↔ Dynamical time
//!
//! The series in [`solar`](crate::solar) and [`lunar`](crate::lunar) are
//! written in uniform dynamical time, while calendars are kept in Universal
//! Time tied to the Earth's irregular rotation. The difference between the
//! two is modelled piecewise, keyed on the Gregorian year of the moment:
//!
//! | Years | Model |
//! |-------|-------|
//! | 1988–2019 | `(year − 1933)` seconds |
//! | 1900–1987 | degree-7 polynomial in centuries since 1900 |
//! | 1800–1899 | degree-10 polynomial in centuries since 1900 |
//! | 1700–1799 | cubic in years since 1700 (seconds) |
//! | 1620–1699 | quadratic in years since 1600 (seconds) |
//! | otherwise | long-run parabola in days since 1810 |
//!
//! Because the whole year shares one formula, converting to dynamical time
//! and back is an inverse whenever both ends land in the same year.
//!
//! ## Integration with time frames
//!
//! The correction is applied by the [`Dynamical`](crate::frames::Dynamical)
//! frame and by [`Moment::<Universal>::to_dynamical`](Moment::to_dynamical),
//! so callers rarely need [`ephemeris_correction`] directly.
//!
//! ```rust
//! use lunisolar::{Moment, Universal};
//!
//! let t = Moment::<Universal>::new(730_120.5); // 2000-01-01 noon
//! assert!((t.delta_t().value() - 67.0).abs() < 1e-6);
//! ```

use crate::civil::{fixed_from_gregorian, gregorian_year_from_fixed};
use crate::frames::Universal;
use crate::math::poly;
use crate::moment::{Moment, TimeFrame};
use qtty::{Day, Days, Second, Seconds};

// ------------------------------------------------------------------------------------
// ΔT by era
// ------------------------------------------------------------------------------------

/// Julian centuries from 1900-01-01 to 1 July of `year`.
#[inline]
fn centuries_since_1900(year: i64) -> f64 {
    (fixed_from_gregorian(year, 7, 1) - fixed_from_gregorian(1900, 1, 1)) as f64 / 36_525.0
}

/// **Years 1988–2019**: one second per year since 1933.
#[inline]
fn delta_t_modern(year: i64) -> Days {
    Seconds::new((year - 1933) as f64).to::<Day>()
}

/// **Years 1900–1987**
#[inline]
fn delta_t_twentieth_century(year: i64) -> Days {
    #[rustfmt::skip]
    const COEFFICIENTS: [f64; 8] = [
        -0.00002, 0.000297, 0.025184, -0.181133,
        0.553040, -0.861938, 0.677066, -0.212591,
    ];
    Days::new(poly(centuries_since_1900(year), &COEFFICIENTS))
}

/// **Years 1800–1899**
#[inline]
fn delta_t_nineteenth_century(year: i64) -> Days {
    #[rustfmt::skip]
    const COEFFICIENTS: [f64; 11] = [
        -0.000009, 0.003844, 0.083563, 0.865736,
        4.867575, 15.845535, 31.332267, 38.291999,
        28.316289, 11.636204, 2.043794,
    ];
    Days::new(poly(centuries_since_1900(year), &COEFFICIENTS))
}

/// **Years 1700–1799**, in seconds.
#[inline]
fn delta_t_eighteenth_century(year: i64) -> Days {
    const COEFFICIENTS: [f64; 4] = [8.118780842, -0.005092142, 0.003336121, -0.0000266484];
    Seconds::new(poly((year - 1700) as f64, &COEFFICIENTS)).to::<Day>()
}

/// **Years 1620–1699**, in seconds.
#[inline]
fn delta_t_seventeenth_century(year: i64) -> Days {
    const COEFFICIENTS: [f64; 3] = [196.58333, -4.0675, 0.0219167];
    Seconds::new(poly((year - 1600) as f64, &COEFFICIENTS)).to::<Day>()
}

/// **All other years**: parabola in days since 1810-01-01.
#[inline]
fn delta_t_extrapolated(year: i64) -> Days {
    const QUADRATIC_DIVISOR: f64 = 41_048_480.0;
    const OFFSET: Seconds = Seconds::new(-15.0);

    let x = 0.5 + (fixed_from_gregorian(year, 1, 1) - fixed_from_gregorian(1810, 1, 1)) as f64;
    (OFFSET + Seconds::new(x * x / QUADRATIC_DIVISOR)).to::<Day>()
}

/// ΔT for a raw day count on any frame; only its calendar year matters.
pub(crate) fn ephemeris_correction_days(t: Days) -> Days {
    let year = gregorian_year_from_fixed(t.value().floor() as i64);
    match year {
        1988..=2019 => delta_t_modern(year),
        1900..=1987 => delta_t_twentieth_century(year),
        1800..=1899 => delta_t_nineteenth_century(year),
        1700..=1799 => delta_t_eighteenth_century(year),
        1620..=1699 => delta_t_seventeenth_century(year),
        _ => delta_t_extrapolated(year),
    }
}

/// Dynamical minus Universal time for the calendar year containing `t`.
#[inline]
pub fn ephemeris_correction<F: TimeFrame>(t: Moment<F>) -> Days {
    ephemeris_correction_days(t.quantity())
}

// ── Moment<Universal> convenience method ─────────────────────────────────

impl Moment<Universal> {
    /// **ΔT = TD − UT** in seconds for this moment.
    #[inline]
    pub fn delta_t(&self) -> Seconds {
        ephemeris_correction(*self).to::<Second>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta_t_on(year: i64, month: u8, day: u8) -> Seconds {
        Moment::<Universal>::from_fixed(fixed_from_gregorian(year, month, day)).delta_t()
    }

    #[test]
    fn delta_t_modern_is_linear() {
        assert!((delta_t_on(2000, 1, 1) - Seconds::new(67.0)).abs() < Seconds::new(1e-6));
        assert!((delta_t_on(1988, 3, 1) - Seconds::new(55.0)).abs() < Seconds::new(1e-6));
        assert!((delta_t_on(2019, 12, 31) - Seconds::new(86.0)).abs() < Seconds::new(1e-6));
    }

    #[test]
    fn delta_t_twentieth_century_sample() {
        let dt = delta_t_on(1950, 6, 1);
        assert!((dt - Seconds::new(28.776)).abs() < Seconds::new(0.01), "ΔT = {dt}");
    }

    #[test]
    fn delta_t_nineteenth_century_sample() {
        let dt = delta_t_on(1850, 6, 1);
        assert!((dt - Seconds::new(7.311)).abs() < Seconds::new(0.01), "ΔT = {dt}");
    }

    #[test]
    fn delta_t_eighteenth_century_starts_at_constant_term() {
        let dt = delta_t_on(1700, 6, 1);
        assert!((dt - Seconds::new(8.118_780_842)).abs() < Seconds::new(1e-6));
        let dt = delta_t_on(1750, 1, 1);
        assert!((dt - Seconds::new(12.873)).abs() < Seconds::new(0.01));
    }

    #[test]
    fn delta_t_seventeenth_century_sample() {
        let dt = delta_t_on(1650, 1, 1);
        assert!((dt - Seconds::new(48.0)).abs() < Seconds::new(0.01));
        let dt = delta_t_on(1620, 3, 1);
        assert!((dt - Seconds::new(124.0)).abs() < Seconds::new(0.01));
    }

    #[test]
    fn delta_t_extrapolated_outside_tabulated_eras() {
        let dt = delta_t_on(1500, 6, 1);
        assert!((dt - Seconds::new(297.31)).abs() < Seconds::new(0.01), "ΔT = {dt}");
        let dt = delta_t_on(2024, 2, 10);
        assert!((dt - Seconds::new(133.83)).abs() < Seconds::new(0.01), "ΔT = {dt}");
    }

    #[test]
    fn correction_is_constant_within_a_year() {
        let jan = ephemeris_correction(Moment::<Universal>::from_fixed(fixed_from_gregorian(1955, 1, 1)));
        let dec = ephemeris_correction(Moment::<Universal>::new(
            fixed_from_gregorian(1955, 12, 31) as f64 + 0.99,
        ));
        assert_eq!(jan, dec);
    }
}
