//! End-to-end mapping run: compile both domains, sample their sentences,
//! search for the best mapping.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use relmap_dsl::{parse_background, parse_facts, Background};
use relmap_graph::{sample_sentences, GraphStats, RelationalGraph, SentenceSet};

use crate::config::MappingConfig;
use crate::report::{Correspondence, Diagnostics, MappingReport};
use crate::search::find_best_mapping;

/// Raw schema and fact lines of one domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainText {
    pub background: Vec<String>,
    pub facts: Vec<String>,
}

impl DomainText {
    pub fn new<B, F>(background: B, facts: F) -> Self
    where
        B: IntoIterator,
        B::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        Self {
            background: background.into_iter().map(Into::into).collect(),
            facts: facts.into_iter().map(Into::into).collect(),
        }
    }

    /// Split two newline-separated texts into lines.
    pub fn from_text(background: &str, facts: &str) -> Self {
        Self::new(background.lines(), facts.lines())
    }
}

/// One compiled and sampled domain.
pub struct Domain {
    pub background: Background,
    pub graph: RelationalGraph,
}

impl Domain {
    pub fn compile(text: &DomainText, config: &MappingConfig) -> Self {
        let background = parse_background(&text.background);
        let facts = parse_facts(&text.facts);
        let graph = RelationalGraph::build(&background, &facts, config.graph);
        Self { background, graph }
    }

    pub fn sentences<R>(&self, config: &MappingConfig, rng: &mut R) -> SentenceSet
    where
        R: Rng + ?Sized,
    {
        SentenceSet::from_sentences(sample_sentences(&self.graph, &config.walk, rng))
    }

    pub fn stats(&self) -> GraphStats {
        self.graph.stats()
    }
}

/// Map `source` onto `target`, seeding the sampler from `config.seed` (or
/// entropy when unset).
///
/// Returns `None` when the search produced no assignment at all, e.g. when
/// the forced head is not a target predicate.
pub fn build_mapping(source: &DomainText, target: &DomainText, config: &MappingConfig) -> Option<MappingReport> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    build_mapping_with_rng(source, target, config, &mut rng)
}

pub fn build_mapping_with_rng<R>(
    source: &DomainText,
    target: &DomainText,
    config: &MappingConfig,
    rng: &mut R,
) -> Option<MappingReport>
where
    R: Rng + ?Sized,
{
    let total = Instant::now();

    let started = Instant::now();
    let src = Domain::compile(source, config);
    let tgt = Domain::compile(target, config);
    let compile_secs = started.elapsed().as_secs_f64();

    let started = Instant::now();
    let src_sentences = src.sentences(config, rng);
    let tgt_sentences = tgt.sentences(config, rng);
    let sampling_secs = started.elapsed().as_secs_f64();

    let started = Instant::now();
    let outcome = find_best_mapping(
        &src.background,
        &tgt.background,
        &src_sentences,
        &tgt_sentences,
        &config.search_options(),
    );
    let search_secs = started.elapsed().as_secs_f64();

    let diagnostics = Diagnostics {
        compile_secs,
        sampling_secs,
        search_secs,
        total_secs: total.elapsed().as_secs_f64(),
        max_mappings: outcome.max_mappings,
        window_sizes: outcome.window_sizes,
        window_assignments: outcome.window_assignments,
        source_graph: src.stats(),
        target_graph: tgt.stats(),
        source_sentences: src_sentences.len(),
        target_sentences: tgt_sentences.len(),
    };

    let Some((state, best_score)) = outcome.best else {
        tracing::info!(
            max_mappings = diagnostics.max_mappings,
            windows = diagnostics.window_sizes.len(),
            "no mapping found"
        );
        return None;
    };

    let correspondences = Correspondence::collect(&state, src.background.predicates());
    tracing::info!(
        mapped = correspondences.len(),
        best_score,
        max_mappings = diagnostics.max_mappings,
        source_sentences = diagnostics.source_sentences,
        target_sentences = diagnostics.target_sentences,
        total_secs = diagnostics.total_secs,
        "mapping complete"
    );

    Some(MappingReport {
        correspondences,
        best_score,
        diagnostics,
    })
}
