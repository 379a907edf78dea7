// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types for calendar and event computations.

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by searches, event finders and date constructors.
///
/// Every computation is deterministic, so none of these are worth retrying
/// with the same inputs.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A bounded search ran out of probes before its predicate was satisfied.
    #[error("search exceeded its limit of {limit} iterations")]
    SearchLimitExceeded { limit: u32 },

    /// The requested solar event does not happen on this day (polar day or
    /// polar night).
    #[error("the sun does not reach the requested depression on this day")]
    NoEventThisDay,

    /// Chinese date fields are out of range.
    #[error("invalid Chinese date: {0}")]
    InvalidChineseDate(&'static str),

    /// Gregorian fields do not name a real day.
    #[error("invalid civil date {year}-{month:02}-{day:02}")]
    InvalidCivilDate { year: i64, month: u8, day: u8 },
}
