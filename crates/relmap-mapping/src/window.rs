//! Combinatorial estimate and window planning.
//!
//! A source predicate of arity `k` can be left unmapped or mapped to any of
//! the `n_k` target predicates of arity `k`, so a slice of source predicates
//! has at most `∏ (n_k + 1)` assignments (inversions not counted). Windows
//! keep that estimate under a threshold.

use std::collections::BTreeMap;
use std::ops::Range;

use relmap_dsl::PredicateDecl;

pub const DEFAULT_WINDOW_THRESHOLD: u64 = 10_000_000;

/// Target predicate counts per arity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArityProfile(BTreeMap<usize, u64>);

impl ArityProfile {
    pub fn of(target: &[PredicateDecl]) -> Self {
        let mut counts = BTreeMap::new();
        for decl in target {
            *counts.entry(decl.arity()).or_insert(0u64) += 1;
        }
        Self(counts)
    }

    /// Estimate for `source`; arities absent from the target contribute 1.
    /// Saturates at `u64::MAX`.
    pub fn estimate(&self, source: &[PredicateDecl]) -> u64 {
        source
            .iter()
            .filter_map(|decl| self.0.get(&decl.arity()))
            .fold(1u64, |acc, &n| acc.saturating_mul(n + 1))
    }
}

/// Upper bound on the number of assignments of `source` against `target`.
pub fn max_mappings(source: &[PredicateDecl], target: &[PredicateDecl]) -> u64 {
    ArityProfile::of(target).estimate(source)
}

/// Split `source` into consecutive windows whose estimate stays within
/// `threshold`. A window always holds at least one predicate, even when that
/// predicate alone exceeds the threshold.
pub fn plan_windows(source: &[PredicateDecl], target: &[PredicateDecl], threshold: u64) -> Vec<Range<usize>> {
    let profile = ArityProfile::of(target);
    let mut windows = Vec::new();
    let mut start = 0;
    while start < source.len() {
        let mut end = source.len();
        while end > start + 1 && profile.estimate(&source[start..end]) > threshold {
            end -= 1;
        }
        windows.push(start..end);
        start = end;
    }
    windows
}
