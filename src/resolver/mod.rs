//! Conflict resolution
//!
//! Sums the matchers' votes per candidate struct and applies the binding
//! policy, in order:
//!
//! 1. no positive score → utility
//! 2. exactly one struct with the strictly highest total → bound
//! 3. tie at the top → ambiguous
//!
//! The tie check is deliberate fail-safe behavior: between equally-plausible
//! owners the engine refuses to guess, and the downstream generator keeps
//! such functions out of every struct's method list.
//!
//! Totals are compared in integer milliweights so that equal sums reached
//! through different float additions still compare equal.

use rustc_hash::FxHashMap;

use crate::matcher::BindingCandidate;

/// Where one function ends up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Bound to the struct at this catalog index
    Bound(usize),
    /// No positive signal toward any struct
    Utility,
    /// Top score shared by these struct indexes (ascending)
    Ambiguous(Vec<usize>),
}

/// Score granularity: weights are compared in units of 0.001
fn milliweight(weight: f64) -> i64 {
    (weight * 1000.0).round() as i64
}

/// Apply the binding policy to one function's gathered candidates
pub fn resolve(candidates: &[BindingCandidate]) -> Resolution {
    let mut totals: FxHashMap<usize, i64> = FxHashMap::default();
    for candidate in candidates {
        *totals.entry(candidate.struct_idx).or_insert(0) += milliweight(candidate.weight);
    }

    let best = totals.values().copied().max().unwrap_or(0);
    if best <= 0 {
        return Resolution::Utility;
    }

    let mut top: Vec<usize> = totals
        .iter()
        .filter(|(_, &total)| total == best)
        .map(|(&idx, _)| idx)
        .collect();
    top.sort_unstable();

    match top.as_slice() {
        [single] => Resolution::Bound(*single),
        _ => Resolution::Ambiguous(top),
    }
}
