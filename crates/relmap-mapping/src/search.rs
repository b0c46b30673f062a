//! Backtracking search over type-consistent predicate mappings.
//!
//! Each source predicate, in declaration order, is tried against:
//!
//! 1. nothing (skipped), except at position 0 under a forced head;
//! 2. every candidate target predicate, arguments in order;
//! 3. every binary candidate target predicate, arguments swapped.
//!
//! A branch is pruned when its argument types conflict with the type
//! constraints accumulated so far, or when the head predicate (position 0) is
//! already mapped to the same target predicate. The branch order fixes which
//! of several equally good mappings wins.
//!
//! [`find_best_mapping`] runs the search window by window (see
//! [`crate::window`]), seeding each window with the best state of the previous
//! one. This is greedy: a later window never revisits an earlier choice.

use std::ops::Range;

use relmap_dsl::{Background, PredicateDecl};
use relmap_graph::SentenceSet;
use serde::{Deserialize, Serialize};

use crate::assignment::MappingState;
use crate::score::score;
use crate::window::{max_mappings, plan_windows};

/// Restriction on the target of source position 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadRestriction<'a> {
    Unrestricted,
    Only(&'a PredicateDecl),
    /// A head was forced but the target schema does not declare it.
    Missing,
}

impl<'a> HeadRestriction<'a> {
    pub fn resolve(forced: Option<&str>, target: &'a Background) -> Self {
        match forced {
            None => HeadRestriction::Unrestricted,
            Some(name) => match target.get(name) {
                Some(decl) => HeadRestriction::Only(decl),
                None => HeadRestriction::Missing,
            },
        }
    }

    pub fn is_forced(&self) -> bool {
        !matches!(self, HeadRestriction::Unrestricted)
    }
}

/// How a new full assignment replaces the best one so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Replace when the score improves *or* more predicates are mapped.
    ///
    /// A larger mapping can displace a better-scoring one. This reproduces the
    /// established heuristic and is the default.
    #[default]
    MoreMapped,
    /// Replace when the score improves, or ties with more predicates mapped.
    Strict,
}

impl TieBreak {
    fn improves(self, score: f64, mapped: usize, best_score: f64, best_mapped: usize) -> bool {
        match self {
            TieBreak::MoreMapped => score > best_score || mapped > best_mapped,
            TieBreak::Strict => score > best_score || (score == best_score && mapped > best_mapped),
        }
    }
}

// ============================================================================
// Enumeration
// ============================================================================

pub struct MappingSearch<'a> {
    source: &'a [PredicateDecl],
    target: &'a [PredicateDecl],
    head: HeadRestriction<'a>,
}

struct Emitter<F> {
    visit: F,
    count: usize,
}

impl<'a> MappingSearch<'a> {
    pub fn new(source: &'a [PredicateDecl], target: &'a [PredicateDecl], head: HeadRestriction<'a>) -> Self {
        Self {
            source,
            target,
            head,
        }
    }

    /// Visit every full assignment of source positions `window` on top of
    /// `seed`, returning how many were visited.
    pub fn enumerate<F>(&self, window: Range<usize>, seed: &MappingState, visit: F) -> usize
    where
        F: FnMut(&MappingState),
    {
        let end = window.end.min(self.source.len());
        let mut state = seed.clone();
        let mut emitter = Emitter { visit, count: 0 };
        self.descend(window.start, end, &mut state, &mut emitter);
        emitter.count
    }

    /// Collect every full assignment of `window` (small searches only).
    pub fn assignments(&self, window: Range<usize>, seed: &MappingState) -> Vec<MappingState> {
        let mut out = Vec::new();
        self.enumerate(window, seed, |state| out.push(state.clone()));
        out
    }

    fn descend<F>(&self, i: usize, end: usize, state: &mut MappingState, emitter: &mut Emitter<F>)
    where
        F: FnMut(&MappingState),
    {
        if i >= end {
            emitter.count += 1;
            (emitter.visit)(state);
            return;
        }

        let source = &self.source[i];
        if i > 0 || !self.head.is_forced() {
            self.descend(i + 1, end, state, emitter);
        }

        for target in self.candidates(i) {
            if self.head_maps_to(state, &target.name) {
                continue;
            }
            self.branch(i, end, source, target, false, state, emitter);
            if target.arity() == 2 {
                self.branch(i, end, source, target, true, state, emitter);
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn branch<F>(
        &self,
        i: usize,
        end: usize,
        source: &PredicateDecl,
        target: &PredicateDecl,
        inverted: bool,
        state: &mut MappingState,
        emitter: &mut Emitter<F>,
    ) where
        F: FnMut(&MappingState),
    {
        let mark = state.checkpoint();
        if state.assign(source, target, inverted) {
            self.descend(i + 1, end, state, emitter);
        }
        state.rollback(mark);
    }

    fn candidates(&self, i: usize) -> &'a [PredicateDecl] {
        if i > 0 {
            return self.target;
        }
        match self.head {
            HeadRestriction::Unrestricted => self.target,
            HeadRestriction::Only(decl) => std::slice::from_ref(decl),
            HeadRestriction::Missing => &[],
        }
    }

    /// Whether the head predicate already maps to `target_name`, either way round.
    fn head_maps_to(&self, state: &MappingState, target_name: &str) -> bool {
        self.source
            .first()
            .and_then(|head| state.get(&head.name))
            .is_some_and(|mapped| mapped.name == target_name)
    }
}

// ============================================================================
// Windowed best-mapping search
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    pub window_threshold: u64,
    pub forced_head: Option<String>,
    pub tie_break: TieBreak,
}

/// Best mapping found plus per-window accounting.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// `None` when a window produced no assignment at all.
    pub best: Option<(MappingState, f64)>,
    pub max_mappings: u64,
    pub window_sizes: Vec<usize>,
    pub window_assignments: Vec<usize>,
}

struct Best {
    score: f64,
    mapped: usize,
    state: Option<MappingState>,
}

impl Best {
    fn offer(&mut self, tie_break: TieBreak, score: f64, state: &MappingState) {
        if tie_break.improves(score, state.len(), self.score, self.mapped) {
            self.score = score;
            self.mapped = state.len();
            self.state = Some(state.clone());
        }
    }
}

/// Search source → target mappings window by window, scoring each full
/// assignment against the sentence sets.
pub fn find_best_mapping(
    source: &Background,
    target: &Background,
    source_sentences: &SentenceSet,
    target_sentences: &SentenceSet,
    options: &SearchOptions,
) -> SearchOutcome {
    let head = HeadRestriction::resolve(options.forced_head.as_deref(), target);
    if head == HeadRestriction::Missing {
        tracing::debug!(
            forced_head = options.forced_head.as_deref().unwrap_or_default(),
            "forced head is not a target predicate"
        );
    }

    let search = MappingSearch::new(source.predicates(), target.predicates(), head);
    let windows = plan_windows(source.predicates(), target.predicates(), options.window_threshold);

    let mut outcome = SearchOutcome {
        best: None,
        max_mappings: max_mappings(source.predicates(), target.predicates()),
        window_sizes: Vec::with_capacity(windows.len()),
        window_assignments: Vec::with_capacity(windows.len()),
    };
    let mut best = Best {
        score: -1.0,
        mapped: 0,
        state: None,
    };

    for window in windows {
        let seed = best.state.clone().unwrap_or_default();
        outcome.window_sizes.push(window.len());
        let assignments = search.enumerate(window.clone(), &seed, |state| {
            let s = score(state, source_sentences, target_sentences);
            best.offer(options.tie_break, s, state);
        });
        outcome.window_assignments.push(assignments);
        tracing::debug!(
            start = window.start,
            end = window.end,
            assignments,
            best_score = best.score,
            "searched window"
        );

        if assignments == 0 {
            // Nothing to extend; later windows cannot recover a mapping.
            return outcome;
        }
    }

    outcome.best = best.state.map(|state| (state, best.score));
    outcome
}
