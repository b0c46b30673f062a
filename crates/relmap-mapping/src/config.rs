use relmap_graph::{GraphOptions, WalkConfig};
use serde::{Deserialize, Serialize};

use crate::search::{SearchOptions, TieBreak};
use crate::window::DEFAULT_WINDOW_THRESHOLD;

/// Everything that tunes one mapping run.
///
/// Loadable from JSON; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// Random-walk sampling, applied to both domains
    pub walk: WalkConfig,
    /// Graph construction, applied to both domains
    pub graph: GraphOptions,
    /// Upper bound on the estimated assignments per search window
    pub window_threshold: u64,
    /// Target predicate the first source predicate must map to
    pub forced_head: Option<String>,
    pub tie_break: TieBreak,
    /// Seed for the sampler; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            walk: WalkConfig::default(),
            graph: GraphOptions::default(),
            window_threshold: DEFAULT_WINDOW_THRESHOLD,
            forced_head: None,
            tie_break: TieBreak::default(),
            seed: None,
        }
    }
}

impl MappingConfig {
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            window_threshold: self.window_threshold,
            forced_head: self.forced_head.clone(),
            tie_break: self.tie_break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_sampler_and_search_constants() {
        let config = MappingConfig::default();
        assert_eq!(config.walk.max_depth, 4);
        assert_eq!(config.walk.n_sentences, 50_000);
        assert_eq!(config.window_threshold, 10_000_000);
        assert!(config.graph.inverse_edges);
        assert_eq!(config.tie_break, TieBreak::MoreMapped);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: MappingConfig = serde_json::from_str(
            r#"{ "walk": { "n_sentences": 200 }, "tie_break": "strict", "seed": 7 }"#,
        )
        .unwrap();
        assert_eq!(config.walk.n_sentences, 200);
        assert_eq!(config.walk.max_depth, 4);
        assert_eq!(config.tie_break, TieBreak::Strict);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.window_threshold, DEFAULT_WINDOW_THRESHOLD);
    }
}
