// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Lunar phase and new-moon finders.
//!
//! The phase is the elongation of the Moon from the Sun in ecliptic
//! longitude. New moons are located on the integer lattice of
//! [`nth_new_moon`], so they are exact to the series rather than to a
//! bisection tolerance.

use crate::error::Result;
use crate::frames::Universal;
use crate::lunar::{lunar_longitude, nth_new_moon, MEAN_SYNODIC_MONTH};
use crate::moment::Moment;
use crate::search::{angular_bisect, backward_search, forward_search, DEFAULT_SEARCH_LIMIT};
use crate::solar::solar_longitude;
use qtty::Degrees;

/// The four principal phases.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoonPhase {
    New,
    FirstQuarter,
    Full,
    LastQuarter,
}

impl MoonPhase {
    /// Elongation of the Moon from the Sun at this phase.
    #[inline]
    pub const fn angle(self) -> Degrees {
        match self {
            MoonPhase::New => Degrees::new(0.0),
            MoonPhase::FirstQuarter => Degrees::new(90.0),
            MoonPhase::Full => Degrees::new(180.0),
            MoonPhase::LastQuarter => Degrees::new(270.0),
        }
    }
}

/// Index of the lattice new moon closest to `x` synodic months after the
/// zeroth one.
#[inline]
fn nearest_lunation(x: f64) -> i64 {
    x.round() as i64
}

/// Lunar phase at `t`, in `[0, 360)`.
///
/// The longitude difference can disagree with the new-moon lattice by a
/// full turn right around conjunction; when the two differ by more than
/// 180° the lattice value wins, so phase 0 coincides with [`nth_new_moon`].
pub fn lunar_phase(t: Moment<Universal>) -> Degrees {
    let phi = (lunar_longitude(t) - solar_longitude(t)).value().rem_euclid(360.0);
    let synodic = MEAN_SYNODIC_MONTH.value();
    let n = nearest_lunation((t - nth_new_moon(0)).value() / synodic);
    let lattice = 360.0 * ((t - nth_new_moon(n)).value() / synodic).rem_euclid(1.0);
    if (phi - lattice).abs() > 180.0 {
        Degrees::new(lattice)
    } else {
        Degrees::new(phi)
    }
}

/// Index of the new moon expected just before `t`, from the mean lunation.
fn estimated_lunation(t: Moment<Universal>) -> i64 {
    let months = (t - nth_new_moon(0)).value() / MEAN_SYNODIC_MONTH.value();
    nearest_lunation(months - lunar_phase(t).value() / 360.0)
}

/// Last new moon strictly before `t`.
pub fn new_moon_before(t: Moment<Universal>) -> Result<Moment<Universal>> {
    let n = estimated_lunation(t);
    let k = backward_search(n - 1, |k| nth_new_moon(k) < t, DEFAULT_SEARCH_LIMIT)?;
    Ok(nth_new_moon(k))
}

/// First new moon at or after `t`.
pub fn new_moon_at_or_after(t: Moment<Universal>) -> Result<Moment<Universal>> {
    let n = estimated_lunation(t);
    let k = forward_search(n, |k| nth_new_moon(k) >= t, DEFAULT_SEARCH_LIMIT)?;
    Ok(nth_new_moon(k))
}

#[inline]
fn days_per_degree() -> f64 {
    MEAN_SYNODIC_MONTH.value() / 360.0
}

/// Last moment at or before `t` with lunar phase `phi`.
pub fn lunar_phase_at_or_before(phi: Degrees, t: Moment<Universal>) -> Result<Moment<Universal>> {
    let tau =
        t.value() - days_per_degree() * (lunar_phase(t) - phi).value().rem_euclid(360.0);
    let lo = tau - 2.0;
    let hi = t.value().min(tau + 2.0);
    angular_bisect(|x| lunar_phase(Moment::new(x)), phi, lo, hi).map(Moment::new)
}

/// First moment at or after `t` with lunar phase `phi`.
pub fn lunar_phase_at_or_after(phi: Degrees, t: Moment<Universal>) -> Result<Moment<Universal>> {
    let tau =
        t.value() + days_per_degree() * (phi - lunar_phase(t)).value().rem_euclid(360.0);
    let lo = t.value().max(tau - 2.0);
    let hi = tau + 2.0;
    angular_bisect(|x| lunar_phase(Moment::new(x)), phi, lo, hi).map(Moment::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::civil::{fixed_from_gregorian, gregorian_from_fixed};
    use approx::assert_abs_diff_eq;
    use qtty::Days;

    const T: Moment<Universal> = Moment::new(738_886.0);

    #[test]
    fn new_moons_around_a_moment() {
        let after = new_moon_at_or_after(T).unwrap();
        let before = new_moon_before(T).unwrap();
        assert_abs_diff_eq!(after.value(), 738_896.497_42, epsilon = 1e-4);
        assert_abs_diff_eq!(before.value(), 738_866.979_82, epsilon = 1e-4);
        assert!(before < T && T <= after);
    }

    #[test]
    fn new_moon_at_or_after_is_inclusive() {
        let exact = nth_new_moon(5);
        assert_eq!(new_moon_at_or_after(exact).unwrap(), exact);
        assert_eq!(new_moon_before(exact).unwrap(), nth_new_moon(4));
    }

    #[test]
    fn phase_is_zero_at_new_moon() {
        let after = new_moon_at_or_after(T).unwrap();
        let phase = lunar_phase(after).value();
        // the new-moon series and the longitude series disagree by up to 0.003°
        assert!(phase.min(360.0 - phase) < 0.003, "phase {phase}");
        assert_abs_diff_eq!(lunar_phase(T).value(), 235.961_89, epsilon = 1e-3);
    }

    #[test]
    fn full_moon_of_january_2024() {
        let start = Moment::<Universal>::from_fixed(fixed_from_gregorian(2024, 1, 1));
        let full = lunar_phase_at_or_after(MoonPhase::Full.angle(), start).unwrap();
        let date = gregorian_from_fixed(full.fixed());
        assert_eq!((date.year(), date.month(), date.day()), (2024, 1, 25));
        assert_abs_diff_eq!(full.time_of_day().value() * 24.0, 17.88, epsilon = 0.01);
        assert_abs_diff_eq!(lunar_phase(full).value(), 180.0, epsilon = 1e-3);
    }

    #[test]
    fn phase_searches_bracket_the_start() {
        let next_full = lunar_phase_at_or_after(Degrees::new(180.0), T).unwrap();
        let last_full = lunar_phase_at_or_before(Degrees::new(180.0), T).unwrap();
        assert_abs_diff_eq!(next_full.value(), 738_910.745_09, epsilon = 1e-4);
        assert_abs_diff_eq!(last_full.value(), 738_881.022_31, epsilon = 1e-4);

        let quarter = lunar_phase_at_or_after(MoonPhase::FirstQuarter.angle(), T).unwrap();
        assert_abs_diff_eq!(quarter.value(), 738_903.160_78, epsilon = 1e-4);

        // the bisected new moon agrees with the lattice one
        let new = lunar_phase_at_or_before(MoonPhase::New.angle(), T).unwrap();
        let lattice = new_moon_before(T).unwrap();
        assert!((new - lattice).abs() < Days::new(1e-4));
    }
}
