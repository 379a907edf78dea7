// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Degree-based trigonometry and small numeric helpers shared by the
//! solar and lunar series.
//!
//! The series tables are written in degrees, so the models evaluate them with
//! plain `f64` and only wrap the final result in a [`qtty::Degrees`].

#[inline]
pub(crate) fn sin_deg(x: f64) -> f64 {
    x.to_radians().sin()
}

#[inline]
pub(crate) fn cos_deg(x: f64) -> f64 {
    x.to_radians().cos()
}

#[inline]
pub(crate) fn tan_deg(x: f64) -> f64 {
    x.to_radians().tan()
}

#[inline]
pub(crate) fn asin_deg(x: f64) -> f64 {
    x.asin().to_degrees()
}

#[inline]
pub(crate) fn acos_deg(x: f64) -> f64 {
    x.acos().to_degrees()
}

/// Quadrant-aware arctangent of `y / x`, in `[0, 360)`.
#[inline]
pub(crate) fn atan2_deg(y: f64, x: f64) -> f64 {
    y.atan2(x).to_degrees().rem_euclid(360.0)
}

/// Angle given in degrees, arcminutes and arcseconds, all sharing the sign
/// of `d`.
#[inline]
pub(crate) fn dms(d: f64, m: f64, s: f64) -> f64 {
    let magnitude = d.abs() + m / 60.0 + s / 3600.0;
    if d.is_sign_negative() {
        -magnitude
    } else {
        magnitude
    }
}

/// Adjusted remainder: like `x mod y` but returns `y` instead of zero.
#[inline]
pub(crate) fn amod(x: i64, y: i64) -> i64 {
    let r = x.rem_euclid(y);
    if r == 0 {
        y
    } else {
        r
    }
}

/// Horner evaluation of `coefficients[0] + coefficients[1]·x + …`.
#[inline]
pub(crate) fn poly(x: f64, coefficients: &[f64]) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn atan2_covers_all_quadrants() {
        assert_abs_diff_eq!(atan2_deg(1.0, 1.0), 45.0, epsilon = 1e-12);
        assert_abs_diff_eq!(atan2_deg(1.0, -1.0), 135.0, epsilon = 1e-12);
        assert_abs_diff_eq!(atan2_deg(-1.0, -1.0), 225.0, epsilon = 1e-12);
        assert_abs_diff_eq!(atan2_deg(-1.0, 1.0), 315.0, epsilon = 1e-12);
        assert_abs_diff_eq!(atan2_deg(1.0, 0.0), 90.0, epsilon = 1e-12);
    }

    #[test]
    fn amod_never_returns_zero() {
        assert_eq!(amod(12, 12), 12);
        assert_eq!(amod(13, 12), 1);
        assert_eq!(amod(0, 60), 60);
        assert_eq!(amod(-1, 60), 59);
    }

    #[test]
    fn dms_keeps_sign_of_degrees() {
        assert_abs_diff_eq!(dms(23.0, 26.0, 21.448), 23.439_291_111, epsilon = 1e-9);
        assert_abs_diff_eq!(dms(-62.0, 19.0, 0.0), -62.316_666_667, epsilon = 1e-9);
    }

    #[test]
    fn poly_matches_expanded_form() {
        let x = 0.37;
        let expected = 1.0 - 2.0 * x + 3.0 * x * x;
        assert_abs_diff_eq!(poly(x, &[1.0, -2.0, 3.0]), expected, epsilon = 1e-15);
    }
}
