//! Random-walk sentence sampler.
//!
//! Each walk starts at a uniformly chosen node and takes at most
//! `max_depth - 1` steps. At every step up to `max_draws` outgoing edges are
//! drawn uniformly; the first one not yet used at this node is taken. Taking
//! `a --r--> b` marks it used at `a` and marks `b --_r--> a` used at `b`, so a
//! walk never immediately retraces its own edge. Nodes may be revisited.
//!
//! The dedup is soft: a node whose draws all collide ends the walk even if it
//! still has unused edges, which under-samples highly connected nodes.

use ahash::AHashMap;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::graph::{Edge, NodeId, RelationalGraph};
use crate::label::LabelId;
use crate::sentence::Sentence;

pub const DEFAULT_MAX_DEPTH: usize = 4;
pub const DEFAULT_N_SENTENCES: usize = 50_000;
pub const DEFAULT_MAX_DRAWS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Walk length bound; a walk takes at most `max_depth - 1` steps.
    pub max_depth: usize,
    /// Number of walks.
    pub n_sentences: usize,
    /// Edge draws per step before giving up on a node.
    pub max_draws: usize,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            n_sentences: DEFAULT_N_SENTENCES,
            max_draws: DEFAULT_MAX_DRAWS,
        }
    }
}

/// `(at, label, neighbor)` triples already used during one walk.
type UsedEdges = Vec<(NodeId, LabelId, NodeId)>;

/// Run `config.n_sentences` walks over `graph`.
///
/// An empty graph yields no sentences.
pub fn sample_sentences<R>(graph: &RelationalGraph, config: &WalkConfig, rng: &mut R) -> Vec<Sentence>
where
    R: Rng + ?Sized,
{
    if graph.node_count() == 0 {
        tracing::debug!("graph has no nodes; no sentences sampled");
        return Vec::new();
    }

    let mut used = UsedEdges::new();
    let mut out = Vec::with_capacity(config.n_sentences);
    for _ in 0..config.n_sentences {
        used.clear();
        out.push(walk(graph, config, rng, &mut used));
    }
    out
}

fn walk<R>(graph: &RelationalGraph, config: &WalkConfig, rng: &mut R, used: &mut UsedEdges) -> Sentence
where
    R: Rng + ?Sized,
{
    let labels = graph.labels();
    let mut node = NodeId::new(rng.gen_range(0..graph.node_count()) as u32);
    let mut sentence = Vec::new();

    for _ in 1..config.max_depth {
        let edges = graph.node(node).edges();
        if edges.is_empty() {
            break;
        }
        let Some(edge) = draw_unused(node, edges, config.max_draws, used, rng) else {
            break;
        };

        used.push((node, edge.label, edge.target));
        used.push((edge.target, labels.inverse(edge.label), node));
        sentence.push(labels.name(edge.label).to_string());
        node = edge.target;
    }

    Sentence::new(sentence)
}

fn draw_unused<R>(at: NodeId, edges: &[Edge], max_draws: usize, used: &UsedEdges, rng: &mut R) -> Option<Edge>
where
    R: Rng + ?Sized,
{
    for _ in 0..max_draws {
        let edge = edges[rng.gen_range(0..edges.len())];
        if !used.contains(&(at, edge.label, edge.target)) {
            return Some(edge);
        }
    }
    None
}

/// Count sentence occurrences, most frequent first (ties by sentence order).
pub fn sentence_frequencies(sentences: &[Sentence]) -> Vec<(Sentence, usize)> {
    let mut counts: AHashMap<&Sentence, usize> = AHashMap::new();
    for sentence in sentences {
        *counts.entry(sentence).or_insert(0) += 1;
    }
    let mut out: Vec<(Sentence, usize)> = counts
        .into_iter()
        .map(|(sentence, count)| (sentence.clone(), count))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphOptions;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use relmap_dsl::{parse_background, parse_facts};

    fn graph(background: &[&str], facts: &[&str], options: GraphOptions) -> RelationalGraph {
        let background = parse_background(background.iter().copied());
        let facts = parse_facts(facts.iter().copied());
        RelationalGraph::build(&background, &facts, options)
    }

    fn config(n_sentences: usize) -> WalkConfig {
        WalkConfig {
            n_sentences,
            ..WalkConfig::default()
        }
    }

    #[test]
    fn single_edge_walks_never_retrace() {
        let g = graph(&["parent(person,person)."], &["parent(ann,bob)."], GraphOptions::default());
        let mut rng = StdRng::seed_from_u64(7);
        let sentences = sample_sentences(&g, &config(500), &mut rng);

        assert_eq!(sentences.len(), 500);
        for s in &sentences {
            assert_eq!(s.len(), 1);
            assert!(s.to_string() == "parent" || s.to_string() == "_parent");
        }
    }

    #[test]
    fn walks_respect_depth_and_graph_labels() {
        let g = graph(
            &["parent(person,person).", "male(person)."],
            &[
                "parent(ann,bob).",
                "parent(bob,cid).",
                "parent(cid,dan).",
                "parent(ann,eve).",
                "male(bob).",
                "male(dan).",
            ],
            GraphOptions::default(),
        );
        let mut rng = StdRng::seed_from_u64(11);
        let sentences = sample_sentences(&g, &config(2_000), &mut rng);

        assert!(sentences.iter().all(|s| s.len() <= DEFAULT_MAX_DEPTH - 1));
        assert!(sentences.iter().any(|s| s.len() == DEFAULT_MAX_DEPTH - 1));
        for label in sentences.iter().flat_map(|s| s.labels()) {
            assert!(g.labels().id_of(label).is_some(), "unknown label {label}");
        }
    }

    #[test]
    fn same_seed_reproduces_sentences() {
        let g = graph(
            &["parent(person,person)."],
            &["parent(ann,bob).", "parent(bob,cid).", "parent(ann,dan)."],
            GraphOptions::default(),
        );
        let a = sample_sentences(&g, &config(300), &mut StdRng::seed_from_u64(3));
        let b = sample_sentences(&g, &config(300), &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn empty_graph_and_sinks_yield_empty_walks() {
        let empty = graph(&["parent(person,person)."], &[], GraphOptions::default());
        let mut rng = StdRng::seed_from_u64(1);
        assert!(sample_sentences(&empty, &config(10), &mut rng).is_empty());

        let asymmetric = graph(
            &["parent(person,person)."],
            &["parent(ann,bob)."],
            GraphOptions {
                inverse_edges: false,
            },
        );
        let sentences = sample_sentences(&asymmetric, &config(200), &mut rng);
        assert!(sentences.iter().any(Sentence::is_empty));
        assert!(sentences.iter().all(|s| s.len() <= 1));
    }

    #[test]
    fn zero_draws_stop_every_walk() {
        let g = graph(&["parent(person,person)."], &["parent(ann,bob)."], GraphOptions::default());
        let cfg = WalkConfig {
            max_draws: 0,
            ..config(20)
        };
        let sentences = sample_sentences(&g, &cfg, &mut StdRng::seed_from_u64(5));
        assert!(sentences.iter().all(Sentence::is_empty));
    }

    #[test]
    fn frequencies_sort_most_common_first() {
        let sentences = vec![
            Sentence::parse("a b"),
            Sentence::parse("c d"),
            Sentence::parse("a b"),
        ];
        let freq = sentence_frequencies(&sentences);
        assert_eq!(freq[0], (Sentence::parse("a b"), 2));
        assert_eq!(freq[1], (Sentence::parse("c d"), 1));
    }
}
