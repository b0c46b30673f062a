use anyhow::Result;
use clap::Args;
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use relmap_graph::{sample_sentences, sentence_frequencies, WalkConfig, MIN_SENTENCE_LEN};
use relmap_mapping::{Domain, MappingConfig};
use std::path::PathBuf;

use crate::read_domain;

#[derive(Args)]
pub(crate) struct InspectArgs {
    #[arg(long)]
    background: PathBuf,
    #[arg(long)]
    facts: PathBuf,
    /// Random walks to sample
    #[arg(long, default_value_t = 1_000)]
    samples: usize,
    #[arg(long)]
    seed: Option<u64>,
    /// Number of sentences to list
    #[arg(long, default_value_t = 10)]
    top: usize,
}

pub(crate) fn cmd_inspect(args: &InspectArgs) -> Result<()> {
    let text = read_domain(&args.background, &args.facts)?;
    let config = MappingConfig {
        walk: WalkConfig {
            n_sentences: args.samples,
            ..WalkConfig::default()
        },
        ..MappingConfig::default()
    };
    let domain = Domain::compile(&text, &config);

    println!("{}", "declarations".bold());
    for decl in domain.background.predicates() {
        println!("  {decl}");
    }
    if domain.background.skipped_lines() > 0 {
        println!(
            "  {} {} line(s) skipped",
            "warn:".yellow().bold(),
            domain.background.skipped_lines()
        );
    }
    let types: Vec<&str> = domain.background.types().iter().map(String::as_str).collect();
    println!("  types: {}", types.join(", "));

    let stats = domain.stats();
    println!("{}", "graph".bold());
    println!(
        "  nodes={} edges={} facts accepted={} rejected={}",
        stats.nodes, stats.edges, stats.accepted_facts, stats.rejected_facts
    );

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let sampled = sample_sentences(&domain.graph, &config.walk, &mut rng);
    let frequencies: Vec<_> = sentence_frequencies(&sampled)
        .into_iter()
        .filter(|(sentence, _)| sentence.len() >= MIN_SENTENCE_LEN)
        .collect();

    println!(
        "{} ({} distinct from {} walks)",
        "sentences".bold(),
        frequencies.len(),
        sampled.len()
    );
    for (sentence, count) in frequencies.iter().take(args.top) {
        println!("  {count:>6}  {sentence}");
    }
    Ok(())
}
