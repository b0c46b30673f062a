use std::fmt;

use relmap_dsl::{Name, PredicateDecl};
use relmap_graph::INVERSE_MARKER;
use serde::{Deserialize, Serialize};

use crate::constraints::TypeConstraints;

/// Target predicate, optionally used with its arguments swapped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignedTarget {
    pub name: Name,
    pub inverted: bool,
}

impl SignedTarget {
    pub fn direct(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            inverted: false,
        }
    }

    pub fn inverted(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            inverted: true,
        }
    }

    /// The same target in the opposite direction.
    pub fn invert(&self) -> Self {
        Self {
            name: self.name.clone(),
            inverted: !self.inverted,
        }
    }
}

/// `name`, or `_name` when inverted (the edge-label spelling).
impl fmt::Display for SignedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inverted {
            write!(f, "{INVERSE_MARKER}{}", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// Partial predicate mapping plus the type constraints it implies.
///
/// Entries are kept in the order they were assigned, which is source
/// declaration order within a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingState {
    entries: Vec<(Name, SignedTarget)>,
    constraints: TypeConstraints,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Checkpoint {
    entries: usize,
    constraints: usize,
}

impl MappingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, source: &str) -> Option<&SignedTarget> {
        self.entries
            .iter()
            .find(|(s, _)| s == source)
            .map(|(_, t)| t)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &SignedTarget)> {
        self.entries.iter().map(|(s, t)| (s.as_str(), t))
    }

    pub fn constraints(&self) -> &TypeConstraints {
        &self.constraints
    }

    /// Number of mapped source predicates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Map `source` onto `target` (argument-swapped when `inverted`) if the
    /// argument types are compatible with the constraints so far.
    pub fn assign(&mut self, source: &PredicateDecl, target: &PredicateDecl, inverted: bool) -> bool {
        let compatible = if inverted {
            self.constraints.try_extend(&source.types, target.types.iter().rev())
        } else {
            self.constraints.try_extend(&source.types, target.types.iter())
        };
        if !compatible {
            return false;
        }
        let signed = SignedTarget {
            name: target.name.clone(),
            inverted,
        };
        self.entries.push((source.name.clone(), signed));
        true
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            entries: self.entries.len(),
            constraints: self.constraints.checkpoint(),
        }
    }

    pub(crate) fn rollback(&mut self, checkpoint: Checkpoint) {
        self.entries.truncate(checkpoint.entries);
        self.constraints.rollback(checkpoint.constraints);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_target_renders_as_edge_label() {
        assert_eq!(SignedTarget::direct("mother").to_string(), "mother");
        assert_eq!(SignedTarget::inverted("mother").to_string(), "_mother");
        assert_eq!(SignedTarget::inverted("mother").invert(), SignedTarget::direct("mother"));
    }

    #[test]
    fn inverted_assignment_swaps_target_types() {
        let teaches = PredicateDecl::new("teaches", ["professor", "course"]);
        let taught_by = PredicateDecl::new("taughtby", ["class", "teacher"]);

        let mut state = MappingState::new();
        assert!(state.assign(&teaches, &taught_by, true));
        assert_eq!(state.get("teaches"), Some(&SignedTarget::inverted("taughtby")));
        assert_eq!(state.constraints().get("professor"), Some("teacher"));
        assert_eq!(state.constraints().get("course"), Some("class"));
    }

    #[test]
    fn rollback_undoes_assignment() {
        let p = PredicateDecl::new("p", ["a", "b"]);
        let q = PredicateDecl::new("q", ["x", "y"]);
        let mut state = MappingState::new();
        let mark = state.checkpoint();
        assert!(state.assign(&p, &q, false));
        state.rollback(mark);
        assert!(state.is_empty());
        assert!(state.constraints().is_empty());
    }
}
