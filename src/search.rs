// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Bounded search primitives.
//!
//! Every event finder in the crate bottoms out in one of these routines:
//!
//! | Routine | Domain | Used for |
//! |---------|--------|----------|
//! | [`forward_search`] | integers | first new moon at/after a moment, first day after a solstice |
//! | [`backward_search`] | integers | last new moon before a moment |
//! | [`bisect`] | reals | generic monotone predicates |
//! | [`angular_bisect`] | reals → angle | solar longitude and lunar phase crossings |
//!
//! All of them terminate: integer searches stop after `limit` probes and
//! bisection stops after [`MAX_BISECTIONS`] halvings, returning
//! [`Error::SearchLimitExceeded`] instead of spinning on a predicate that can
//! never be satisfied (for instance one that evaluates to NaN).

use crate::error::{Error, Result};
use log::{trace, warn};
use qtty::Degrees;

/// Default probe budget for the integer searches.
pub const DEFAULT_SEARCH_LIMIT: u32 = 1_000_000;

/// Upper bound on halvings performed by [`bisect`].
pub const MAX_BISECTIONS: u32 = 128;

/// Interval width, in days, at which [`angular_bisect`] stops.
pub const ANGULAR_TOLERANCE: f64 = 1e-5;

/// Smallest `k >= start` for which `predicate(k)` holds.
pub fn forward_search<P>(start: i64, mut predicate: P, limit: u32) -> Result<i64>
where
    P: FnMut(i64) -> bool,
{
    let mut k = start;
    for _ in 0..limit {
        if predicate(k) {
            trace!("forward search from {start} settled on {k}");
            return Ok(k);
        }
        k += 1;
    }
    warn!("forward search from {start} gave up after {limit} probes");
    Err(Error::SearchLimitExceeded { limit })
}

/// Largest `k` for which `predicate(k)` holds, given that the predicate is
/// true from `start` up to some boundary and false afterwards.
///
/// Searches forward for the first failing `k` and steps back one, so if the
/// predicate is already false at `start` the result is `start - 1`.
pub fn backward_search<P>(start: i64, mut predicate: P, limit: u32) -> Result<i64>
where
    P: FnMut(i64) -> bool,
{
    forward_search(start, |k| !predicate(k), limit).map(|k| k - 1)
}

/// Bisection over `[lo, hi]`.
///
/// `stop(lo, hi)` ends the search and the current midpoint is returned;
/// otherwise `go_left(mid)` picks the half that keeps the answer.
pub fn bisect<S, G>(lo: f64, hi: f64, mut stop: S, mut go_left: G) -> Result<f64>
where
    S: FnMut(f64, f64) -> bool,
    G: FnMut(f64) -> bool,
{
    let (mut lo, mut hi) = (lo, hi);
    for _ in 0..MAX_BISECTIONS {
        let mid = (lo + hi) / 2.0;
        if stop(lo, hi) {
            return Ok(mid);
        }
        if go_left(mid) {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    warn!("bisection on [{lo}, {hi}] did not converge");
    Err(Error::SearchLimitExceeded {
        limit: MAX_BISECTIONS,
    })
}

/// Time in `[lo, hi]` at which the cyclic function `f` reaches `target`.
///
/// The comparison is circular: the search moves left whenever
/// `(f(mid) − target) mod 360 < 180`, so the crossing may straddle 0°.
pub fn angular_bisect<F>(mut f: F, target: Degrees, lo: f64, hi: f64) -> Result<f64>
where
    F: FnMut(f64) -> Degrees,
{
    let target = target.value();
    let found = bisect(
        lo,
        hi,
        |l, u| u - l < ANGULAR_TOLERANCE,
        |x| (f(x).value() - target).rem_euclid(360.0) < 180.0,
    )?;
    trace!("angular search for {target}° in [{lo}, {hi}] found {found}");
    Ok(found)
}
