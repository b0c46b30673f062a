//! Source-type → target-type constraints accumulated while mapping predicates.
//!
//! Entries are only ever appended. The append order doubles as an undo log:
//! the search takes a [`TypeConstraints::checkpoint`] before trying a branch
//! and [`TypeConstraints::rollback`]s afterwards, so sibling branches never
//! observe each other's tentative constraints.

use relmap_dsl::Name;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeConstraints {
    pairs: Vec<(Name, Name)>,
}

impl TypeConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target type already bound to `source_type`.
    pub fn get(&self, source_type: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(s, _)| s == source_type)
            .map(|(_, t)| t.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(s, t)| (s.as_str(), t.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn checkpoint(&self) -> usize {
        self.pairs.len()
    }

    pub fn rollback(&mut self, checkpoint: usize) {
        self.pairs.truncate(checkpoint);
    }

    /// Bind `source[k] → target[k]` for every position.
    ///
    /// Returns `false` (leaving the table as it was) on an arity mismatch or
    /// when a source type is already bound to a different target type.
    pub fn try_extend<'t, I>(&mut self, source: &[Name], target: I) -> bool
    where
        I: ExactSizeIterator<Item = &'t Name>,
    {
        if source.len() != target.len() {
            return false;
        }

        let mark = self.checkpoint();
        for (s, t) in source.iter().zip(target) {
            match self.get(s) {
                Some(bound) if bound != t => {
                    self.rollback(mark);
                    return false;
                }
                Some(_) => {}
                None => self.pairs.push((s.clone(), t.clone())),
            }
        }
        true
    }
}

/// Result of [`is_compatible`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compatibility {
    pub compatible: bool,
    /// Extended table on success, an unmodified copy of the input otherwise.
    pub constraints: TypeConstraints,
}

/// Check whether `source_types` can map position-wise onto `target_types`
/// under `constraints`, without touching `constraints`.
pub fn is_compatible(source_types: &[Name], target_types: &[Name], constraints: &TypeConstraints) -> Compatibility {
    let mut extended = constraints.clone();
    let compatible = extended.try_extend(source_types, target_types.iter());
    Compatibility {
        compatible,
        constraints: extended,
    }
}
