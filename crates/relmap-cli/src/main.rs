//! Relmap CLI
//!
//! - `relmap map`: find the best predicate mapping from a source domain to a
//!   target domain
//! - `relmap inspect`: show how one domain is parsed, compiled and sampled

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use relmap_mapping::{build_mapping, DomainText, MappingConfig, MappingReport, TieBreak};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;

mod inspect;

#[derive(Parser)]
#[command(name = "relmap")]
#[command(author, version, about = "Structural mapping between relational domains")]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Map source predicates onto target predicates.
    ///
    /// Prints one `src(A,B) -> tgt(A,B)` line per mapped predicate, in source
    /// declaration order. Exits with status 1 when no mapping is found.
    Map(MapArgs),

    /// Print the cleaned schema, graph statistics and frequent sentences of
    /// one domain.
    Inspect(inspect::InspectArgs),
}

#[derive(Args)]
struct MapArgs {
    /// Source schema (one `pred(type,...).` per line)
    #[arg(long)]
    source_background: PathBuf,
    /// Source facts (one `pred(entity,...).` per line)
    #[arg(long)]
    source_facts: PathBuf,
    #[arg(long)]
    target_background: PathBuf,
    #[arg(long)]
    target_facts: PathBuf,
    /// JSON `MappingConfig`; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    /// Random walks per domain
    #[arg(long)]
    samples: Option<usize>,
    #[arg(long)]
    max_depth: Option<usize>,
    /// Target predicate the first source predicate must map to
    #[arg(long)]
    force_head: Option<String>,
    /// Max estimated assignments per search window
    #[arg(long)]
    threshold: Option<u64>,
    #[arg(long)]
    seed: Option<u64>,
    /// Only let a larger mapping replace an equally scored one
    #[arg(long)]
    strict: bool,
    /// Do not add inverse edges for binary facts
    #[arg(long)]
    asymmetric: bool,
    /// Print the full report as JSON
    #[arg(long)]
    json: bool,
}

impl MapArgs {
    fn mapping_config(&self) -> Result<MappingConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = read_text(path)?;
                serde_json::from_str::<MappingConfig>(&text)
                    .with_context(|| format!("parse config {}", path.display()))?
            }
            None => MappingConfig::default(),
        };
        if let Some(samples) = self.samples {
            config.walk.n_sentences = samples;
        }
        if let Some(max_depth) = self.max_depth {
            config.walk.max_depth = max_depth;
        }
        if let Some(head) = &self.force_head {
            config.forced_head = Some(head.clone());
        }
        if let Some(threshold) = self.threshold {
            config.window_threshold = threshold;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if self.strict {
            config.tie_break = TieBreak::Strict;
        }
        if self.asymmetric {
            config.graph.inverse_edges = false;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Map(args) => cmd_map(&args),
        Commands::Inspect(args) => inspect::cmd_inspect(&args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub(crate) fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

pub(crate) fn read_domain(background: &Path, facts: &Path) -> Result<DomainText> {
    Ok(DomainText::from_text(&read_text(background)?, &read_text(facts)?))
}

fn cmd_map(args: &MapArgs) -> Result<()> {
    let config = args.mapping_config()?;
    let source = read_domain(&args.source_background, &args.source_facts)?;
    let target = read_domain(&args.target_background, &args.target_facts)?;

    let Some(report) = build_mapping(&source, &target, &config) else {
        match &config.forced_head {
            Some(head) => bail!("no mapping found (forced head `{head}`)"),
            None => bail!("no mapping found"),
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &MappingReport) {
    for line in report.rendered() {
        println!("{line}");
    }
    let d = &report.diagnostics;
    eprintln!(
        "{} mapped {} predicate(s), score {:.4} (max mappings {}, windows {:?}, {:.2}s)",
        "ok".green().bold(),
        report.correspondences.len(),
        report.best_score,
        d.max_mappings,
        d.window_sizes,
        d.total_secs
    );
}
