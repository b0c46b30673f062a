use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use relmap_dsl::{Background, Fact, PredicateDecl};
use relmap_graph::{invert, sample_sentences, GraphOptions, RelationalGraph, WalkConfig};

const PREDICATES: [&str; 3] = ["parent", "friend", "smokes"];

fn background() -> Background {
    [
        PredicateDecl::new("parent", ["person", "person"]),
        PredicateDecl::new("friend", ["person", "person"]),
        PredicateDecl::new("smokes", ["person"]),
    ]
    .into_iter()
    .collect()
}

fn fact_strategy() -> impl Strategy<Value = Fact> {
    (0usize..PREDICATES.len(), 0u8..8, 0u8..8).prop_map(|(p, a, b)| {
        let predicate = PREDICATES[p];
        if predicate == "smokes" {
            Fact::new(predicate, [format!("e{a}")])
        } else {
            Fact::new(predicate, [format!("e{a}"), format!("e{b}")])
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        failure_persistence: None,
        ..ProptestConfig::default()
    })]

    // Predicate names cannot start with the marker, so labels are a name
    // with at most one leading `_`.
    #[test]
    fn invert_is_involutive(label in "_?[a-zA-Z0-9][a-zA-Z0-9_]{0,11}") {
        prop_assert_eq!(invert(&invert(&label)), label.clone());
        prop_assert_ne!(invert(&label), label);
    }

    #[test]
    fn edge_count_follows_fact_arity(
        facts in proptest::collection::vec(fact_strategy(), 0..40),
        inverse_edges in any::<bool>(),
    ) {
        let graph = RelationalGraph::build(&background(), &facts, GraphOptions { inverse_edges });

        let expected: usize = facts
            .iter()
            .map(|f| if f.arity() == 2 && inverse_edges { 2 } else { 1 })
            .sum();
        prop_assert_eq!(graph.edge_count(), expected);
        prop_assert_eq!(graph.stats().accepted_facts, facts.len());
        let per_node: usize = graph.nodes().iter().map(|n| n.edge_count()).sum();
        prop_assert_eq!(per_node, expected);
    }

    #[test]
    fn walks_stay_within_depth(
        facts in proptest::collection::vec(fact_strategy(), 1..30),
        max_depth in 0usize..6,
        seed in any::<u64>(),
    ) {
        let graph = RelationalGraph::build(&background(), &facts, GraphOptions::default());
        let config = WalkConfig { max_depth, n_sentences: 50, ..WalkConfig::default() };
        let sentences = sample_sentences(&graph, &config, &mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(sentences.len(), 50);
        for sentence in &sentences {
            prop_assert!(sentence.len() < max_depth.max(1));
            for label in sentence.labels() {
                prop_assert!(graph.labels().id_of(label).is_some());
            }
        }
    }
}
