// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Julian epochs and day counts on [`Moment`].

use qtty::*;

use crate::frames::{Dynamical, Universal};
use crate::moment::{Moment, TimeFrame};

/// Moment (R.D.) of Julian Day 0: noon, 24 November −4713 (Gregorian).
const JD_EPOCH: Days = Days::new(-1_721_424.5);

/// Fixed date of Modified Julian Day 0 (17 November 1858).
const MJD_EPOCH: Days = Days::new(678_576.0);

impl Moment<Dynamical> {
    /// J2000.0 epoch: noon of 1 January 2000, dynamical time.
    pub const J2000: Self = Self::new(730_120.5);

    /// One Julian century expressed in days.
    pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

    /// Julian centuries since J2000.0.
    #[inline]
    pub fn julian_centuries(&self) -> Centuries {
        Centuries::new(
            ((*self - Self::J2000) / Self::JULIAN_CENTURY)
                .simplify()
                .value(),
        )
    }
}

impl Moment<Universal> {
    /// Julian centuries of **dynamical** time since J2000.0, the argument of
    /// every solar and lunar series.
    #[inline]
    pub fn julian_centuries(&self) -> Centuries {
        self.to_dynamical().julian_centuries()
    }
}

impl<F: TimeFrame> Moment<F> {
    /// Build a moment from a Julian Day number read on the same frame.
    #[inline]
    pub fn from_jd(jd: Days) -> Self {
        Self::from_days(jd + JD_EPOCH)
    }

    /// Julian Day number of this moment.
    #[inline]
    pub fn jd(&self) -> Days {
        self.quantity() - JD_EPOCH
    }

    /// Build a moment from a Modified Julian Day number.
    #[inline]
    pub fn from_mjd(mjd: Days) -> Self {
        Self::from_days(mjd + MJD_EPOCH)
    }

    /// Modified Julian Day number of this moment.
    #[inline]
    pub fn mjd(&self) -> Days {
        self.quantity() - MJD_EPOCH
    }
}
