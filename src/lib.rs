// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Lunisolar
//!
//! Astronomical event search and the Chinese lunisolar calendar built on it.
//!
//! # Core types
//!
//! - [`Moment<F>`]: a real day count since R.D. 0, parameterised by a
//!   [`TimeFrame`] marker.
//! - [`Location`]: latitude, longitude, elevation and standard time zone of
//!   an observer.
//! - [`ChineseDate`](chinese::ChineseDate): cycle, year, month, leap flag
//!   and day of the Chinese calendar.
//! - [`Error`] / [`Result`]: failures of bounded searches, missing events and
//!   invalid dates.
//!
//! # Time frames
//!
//! | Marker | Clock |
//! |--------|-------|
//! | [`Universal`] | Universal Time |
//! | [`Local`] | local mean time at the observer |
//! | [`Standard`] | zone time at the observer |
//! | [`Apparent`] | sundial time at the observer |
//! | [`Dynamical`] | dynamical (ephemeris) time |
//!
//! # Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`civil`] | proleptic Gregorian fixed-date arithmetic, weekdays |
//! | [`search`] | bounded integer searches and bisection |
//! | [`solar`] | solar longitude, equation of time, sidereal time |
//! | [`lunar`] | lunar position, new-moon series |
//! | [`solar_terms`] | solstices, equinoxes, solar longitude crossings |
//! | [`moon_phase`] | lunar phase, new moons around a moment |
//! | [`riseset`] | sunrise, sunset, twilight, temporal hours |
//! | [`chinese`] | the Chinese calendar |
//!
//! # Example
//!
//! ```rust
//! use lunisolar::chinese::chinese_from_fixed;
//! use lunisolar::civil::fixed_from_gregorian;
//! use lunisolar::riseset::sunrise;
//! use lunisolar::URBANA;
//!
//! let date = fixed_from_gregorian(2024, 2, 10);
//! let chinese = chinese_from_fixed(date).unwrap();
//! assert_eq!((chinese.month(), chinese.day()), (1, 1));
//!
//! let rise = sunrise(date, &URBANA).unwrap();
//! assert_eq!(rise.fixed(), date);
//! ```

mod delta_t;
mod error;
mod frames;
mod julian_date_ext;
mod location;
pub(crate) mod math;
mod moment;

pub mod chinese;
pub mod civil;
pub mod lunar;
pub mod moon_phase;
pub mod riseset;
pub mod search;
pub mod solar;
pub mod solar_terms;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use delta_t::ephemeris_correction;
pub use error::{Error, Result};
pub use frames::{timezone_conversion, Apparent, Dynamical, Local, Standard, Universal};
pub use location::{
    zone_from_longitude, Location, CFS_ALERT, GREENWICH, HONG_KONG, JERUSALEM, MECCA, PALO_ALTO,
    SAN_FRANCISCO, URBANA,
};
pub use moment::{Moment, TimeFrame};

pub use chinese::{chinese_from_fixed, fixed_from_chinese, ChineseDate, ChineseMonth};
pub use civil::CivilDate;
pub use lunar::{lunar_longitude, nth_new_moon, MEAN_SYNODIC_MONTH};
pub use moon_phase::{lunar_phase, new_moon_at_or_after, new_moon_before, MoonPhase};
pub use riseset::{sunrise, sunset, Twilight};
pub use solar::{equation_of_time, solar_longitude, MEAN_TROPICAL_YEAR};
pub use solar_terms::{solar_longitude_after, Season};
