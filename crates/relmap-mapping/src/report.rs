use std::fmt;

use relmap_dsl::{Name, PredicateDecl};
use relmap_graph::GraphStats;
use serde::{Deserialize, Serialize};

use crate::assignment::MappingState;

/// One mapped predicate pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correspondence {
    pub source: Name,
    pub target: Name,
    pub arity: usize,
    /// Target arguments are swapped (binary predicates only).
    pub inverted: bool,
}

impl Correspondence {
    /// Correspondences of `state`, in `source` declaration order.
    pub fn collect(state: &MappingState, source: &[PredicateDecl]) -> Vec<Correspondence> {
        source
            .iter()
            .filter_map(|decl| {
                state.get(&decl.name).map(|target| Correspondence {
                    source: decl.name.clone(),
                    target: target.name.clone(),
                    arity: decl.arity(),
                    inverted: target.inverted,
                })
            })
            .collect()
    }
}

fn variables(arity: usize) -> Vec<String> {
    (0..arity)
        .map(|k| match u8::try_from(k) {
            Ok(k) if k < 26 => char::from(b'A' + k).to_string(),
            _ => format!("X{k}"),
        })
        .collect()
}

/// `src(A,B) -> tgt(A,B)`, or `src(A,B) -> tgt(B,A)` when inverted.
impl fmt::Display for Correspondence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vars = variables(self.arity);
        let mut target_vars = vars.clone();
        if self.inverted {
            target_vars.reverse();
        }
        write!(
            f,
            "{}({}) -> {}({})",
            self.source,
            vars.join(","),
            self.target,
            target_vars.join(",")
        )
    }
}

/// Timings and sizes of one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub compile_secs: f64,
    pub sampling_secs: f64,
    pub search_secs: f64,
    pub total_secs: f64,
    /// Estimated assignment count over the whole source schema
    pub max_mappings: u64,
    /// Source predicates per window
    pub window_sizes: Vec<usize>,
    /// Full assignments visited per window
    pub window_assignments: Vec<usize>,
    pub source_graph: GraphStats,
    pub target_graph: GraphStats,
    /// Distinct sentences per side
    pub source_sentences: usize,
    pub target_sentences: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingReport {
    pub correspondences: Vec<Correspondence>,
    pub best_score: f64,
    pub diagnostics: Diagnostics,
}

impl MappingReport {
    pub fn rendered(&self) -> Vec<String> {
        self.correspondences.iter().map(ToString::to_string).collect()
    }
}
