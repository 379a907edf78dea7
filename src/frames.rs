// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time-frame marker types.
//!
//! Each zero-sized type identifies a clock and encodes how a day count read
//! on it relates to **Universal Time**.
//!
//! | Marker | Clock | Universal Time from a reading `t` |
//! |--------|-------|-----------------------------------|
//! | [`Universal`] | mean solar time at Greenwich | `t` |
//! | [`Local`] | mean solar time at the observer | `t − longitude/360` |
//! | [`Standard`] | civil zone time | `t − zone` |
//! | [`Apparent`] | sundial time at the observer | local time minus the equation of time |
//! | [`Dynamical`] | uniform ephemeris time | `t − ephemeris_correction(t)` |

use crate::delta_t::ephemeris_correction_days;
use crate::location::{zone_from_longitude, Location};
use crate::moment::{Moment, TimeFrame};
use crate::solar::equation_of_time;
use qtty::Days;

// ---------------------------------------------------------------------------
// Earth-rotation clocks
// ---------------------------------------------------------------------------

/// Universal Time, the identity frame.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Universal;

impl TimeFrame for Universal {
    const LABEL: &'static str = "UT";

    #[inline(always)]
    fn to_universal(value: Days, _location: &Location) -> Days {
        value
    }

    #[inline(always)]
    fn from_universal(universal: Days, _location: &Location) -> Days {
        universal
    }
}

/// Local mean time: Universal Time shifted by the observer's longitude.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Local;

impl TimeFrame for Local {
    const LABEL: &'static str = "LMT";

    #[inline]
    fn to_universal(value: Days, location: &Location) -> Days {
        value - zone_from_longitude(location.longitude())
    }

    #[inline]
    fn from_universal(universal: Days, location: &Location) -> Days {
        universal + zone_from_longitude(location.longitude())
    }
}

/// Standard (zone) time: Universal Time shifted by the location's zone.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Standard;

impl TimeFrame for Standard {
    const LABEL: &'static str = "STD";

    #[inline]
    fn to_universal(value: Days, location: &Location) -> Days {
        value - location.zone()
    }

    #[inline]
    fn from_universal(universal: Days, location: &Location) -> Days {
        universal + location.zone()
    }
}

/// Apparent (sundial) time: local mean time corrected by the equation of
/// time.
///
/// The equation of time is evaluated at the Universal Time obtained by
/// reading the apparent clock as if it were local mean time, so the two
/// directions are inverse only up to the equation's drift over a few
/// minutes.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Apparent;

impl TimeFrame for Apparent {
    const LABEL: &'static str = "LAT";

    fn to_universal(value: Days, location: &Location) -> Days {
        let offset = zone_from_longitude(location.longitude());
        let local = value - equation_of_time(Moment::from_days(value - offset));
        local - offset
    }

    fn from_universal(universal: Days, location: &Location) -> Days {
        let local = universal + zone_from_longitude(location.longitude());
        local + equation_of_time(Moment::from_days(universal))
    }
}

// ---------------------------------------------------------------------------
// Uniform time
// ---------------------------------------------------------------------------

/// Dynamical time, the uniform scale the ephemeris series are written in.
///
/// Differs from Universal Time by the year-keyed ephemeris correction
/// (ΔT), which is independent of the observer.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Dynamical;

impl TimeFrame for Dynamical {
    const LABEL: &'static str = "TD";

    #[inline]
    fn to_universal(value: Days, _location: &Location) -> Days {
        value - ephemeris_correction_days(value)
    }

    #[inline]
    fn from_universal(universal: Days, _location: &Location) -> Days {
        universal + ephemeris_correction_days(universal)
    }
}

// ---------------------------------------------------------------------------
// Zone helpers
// ---------------------------------------------------------------------------

/// Re-read a standard-time moment at `from` as standard time at `to`.
#[inline]
pub fn timezone_conversion(t: Moment<Standard>, from: &Location, to: &Location) -> Moment<Standard> {
    t.to::<Universal>(from).to::<Standard>(to)
}
