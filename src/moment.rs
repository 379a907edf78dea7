// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Frame-parameterised moments on the Rata Die day count.
//!
//! [`Moment<F>`] stores a real number of days since R.D. 0 (midnight at the
//! start of 31 December 0, proleptic Gregorian, so R.D. 1 is 1 January 1).
//! The integer part is a fixed date and the fractional part the time of day.
//! The compile-time marker `F: TimeFrame` says which clock the number is read
//! on: Universal, Local, Standard, Apparent or Dynamical time. Moments on
//! different frames cannot be mixed; crossing frames is an explicit
//! [`Moment::to`] that routes through Universal Time.
//!
//! Local, Standard and Apparent time depend on where the observer is, so every
//! cross-frame conversion takes a [`Location`]. Frames that ignore it
//! (Universal, Dynamical) also get location-free shortcuts, see
//! [`Moment::<Universal>::to_dynamical`](Moment::to_dynamical).

use crate::frames::{Dynamical, Universal};
use crate::location::Location;
use chrono::{DateTime, Utc};
use qtty::*;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ═══════════════════════════════════════════════════════════════════════════
// TimeFrame trait
// ═══════════════════════════════════════════════════════════════════════════

/// Marker trait for time frames.
///
/// A **time frame** defines:
///
/// 1. A human-readable **label** used when formatting moments.
/// 2. A pair of conversions between the frame's own day count and
///    **Universal Time**, the canonical internal representation.
///
/// Universal Time is the identity frame. Local and Standard time are
/// constant shifts for a given location; Apparent and Dynamical time add
/// slowly varying corrections (equation of time, ephemeris correction).
pub trait TimeFrame: Copy + Clone + std::fmt::Debug + PartialEq + PartialOrd + 'static {
    /// Display label used by [`Moment`] formatting.
    const LABEL: &'static str;

    /// Convert a day count on this frame to Universal Time.
    fn to_universal(value: Days, location: &Location) -> Days;

    /// Convert a Universal Time day count to this frame.
    fn from_universal(universal: Days, location: &Location) -> Days;
}

// ═══════════════════════════════════════════════════════════════════════════
// Moment<F>
// ═══════════════════════════════════════════════════════════════════════════

/// A point in time read on frame `F`.
///
/// `PhantomData` is zero-sized, so `Moment<F>` has the layout of a single
/// `f64`.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Moment<F: TimeFrame> {
    quantity: Days,
    _frame: PhantomData<F>,
}

impl<F: TimeFrame> Moment<F> {
    // ── constructors ──────────────────────────────────────────────────

    /// Create from a raw day count.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self {
            quantity: Days::new(value),
            _frame: PhantomData,
        }
    }

    /// Create from a [`Days`] quantity.
    #[inline]
    pub const fn from_days(days: Days) -> Self {
        Self {
            quantity: days,
            _frame: PhantomData,
        }
    }

    /// Midnight at the start of the fixed date `date`.
    #[inline]
    pub fn from_fixed(date: i64) -> Self {
        Self::new(date as f64)
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// The underlying quantity in days.
    #[inline]
    pub const fn quantity(&self) -> Days {
        self.quantity
    }

    /// The underlying scalar value in days.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.quantity.value()
    }

    /// Fixed date (calendar day) containing this moment.
    #[inline]
    pub fn fixed(&self) -> i64 {
        self.value().floor() as i64
    }

    /// Fraction of the day elapsed since midnight, in `[0, 1)`.
    #[inline]
    pub fn time_of_day(&self) -> Days {
        Days::new(self.value().rem_euclid(1.0))
    }

    // ── cross-frame conversion ────────────────────────────────────────

    /// Convert this moment to another frame as seen from `location`.
    ///
    /// ```text
    /// self → Universal → target
    /// ```
    #[inline]
    pub fn to<G: TimeFrame>(&self, location: &Location) -> Moment<G> {
        let universal = F::to_universal(self.quantity, location);
        Moment::<G>::from_days(G::from_universal(universal, location))
    }

    // ── min / max / mean ──────────────────────────────────────────────

    /// Earlier of two moments.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        if other.value() < self.value() {
            other
        } else {
            self
        }
    }

    /// Later of two moments.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        if other.value() > self.value() {
            other
        } else {
            self
        }
    }

    /// Midpoint between two moments on the same frame.
    #[inline]
    pub fn mean(self, other: Self) -> Self {
        Self::new((self.value() + other.value()) / 2.0)
    }
}

// ── Universal-only helpers ────────────────────────────────────────────────

/// Fixed date of 1970-01-01.
const UNIX_EPOCH_RD: f64 = 719_163.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

impl Moment<Universal> {
    /// Dynamical time of this moment; the ephemeris correction does not
    /// depend on the observer.
    #[inline]
    pub fn to_dynamical(&self) -> Moment<Dynamical> {
        Moment::from_days(self.quantity + crate::delta_t::ephemeris_correction(*self))
    }

    /// Convert to a `chrono::DateTime<Utc>`.
    ///
    /// UTC is taken to coincide with Universal Time (leap seconds ignored).
    /// Returns `None` outside chrono's representable range.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        let seconds = (self.value() - UNIX_EPOCH_RD) * SECONDS_PER_DAY;
        let secs = seconds.floor();
        if !secs.is_finite() || secs.abs() > i64::MAX as f64 {
            return None;
        }
        let nanos = ((seconds - secs) * 1e9).round().min(999_999_999.0) as u32;
        DateTime::<Utc>::from_timestamp(secs as i64, nanos)
    }

    /// Build a Universal Time moment from a `chrono::DateTime<Utc>`.
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        let seconds = Seconds::new(datetime.timestamp() as f64)
            + Seconds::new(f64::from(datetime.timestamp_subsec_nanos()) / 1e9);
        Self::from_days(Days::new(UNIX_EPOCH_RD) + seconds.to::<Day>())
    }
}

impl Moment<Dynamical> {
    /// Universal Time of this moment.
    ///
    /// The correction is evaluated at the dynamical moment itself, so the
    /// round trip through [`Moment::<Universal>::to_dynamical`] is an inverse
    /// (up to rounding) whenever both ends fall in the same calendar year.
    #[inline]
    pub fn to_universal(&self) -> Moment<Universal> {
        Moment::from_days(self.quantity - crate::delta_t::ephemeris_correction(*self))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Generic trait implementations
// ═══════════════════════════════════════════════════════════════════════════

// ── Display ───────────────────────────────────────────────────────────────

impl<F: TimeFrame> std::fmt::Display for Moment<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", F::LABEL, self.quantity)
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl<F: TimeFrame> Serialize for Moment<F> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.serialize_f64(self.value())
    }
}

#[cfg(feature = "serde")]
impl<'de, F: TimeFrame> Deserialize<'de> for Moment<F> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Ok(Self::new(v))
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl<F: TimeFrame> Add<Days> for Moment<F> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity + rhs)
    }
}

impl<F: TimeFrame> AddAssign<Days> for Moment<F> {
    #[inline]
    fn add_assign(&mut self, rhs: Days) {
        self.quantity = self.quantity + rhs;
    }
}

impl<F: TimeFrame> Sub<Days> for Moment<F> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity - rhs)
    }
}

impl<F: TimeFrame> SubAssign<Days> for Moment<F> {
    #[inline]
    fn sub_assign(&mut self, rhs: Days) {
        self.quantity = self.quantity - rhs;
    }
}

impl<F: TimeFrame> Sub for Moment<F> {
    type Output = Days;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.quantity - rhs.quantity
    }
}

// ── From/Into Days ────────────────────────────────────────────────────────

impl<F: TimeFrame> From<Days> for Moment<F> {
    #[inline]
    fn from(days: Days) -> Self {
        Self::from_days(days)
    }
}

impl<F: TimeFrame> From<Moment<F>> for Days {
    #[inline]
    fn from(moment: Moment<F>) -> Self {
        moment.quantity
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
