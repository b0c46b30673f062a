//! Structural mapping between two relational domains.
//!
//! A mapping sends source predicates to target predicates of the same arity,
//! binary ones possibly with their arguments swapped, such that argument types
//! map consistently. Candidates are scored by how many of the source domain's
//! sampled sentences, once rewritten into target labels, also occur among the
//! target domain's sentences (Jaccard similarity).
//!
//! ```text
//! DomainText ──compile──▶ RelationalGraph ──walk──▶ SentenceSet ─┐
//!                                                                 ├─▶ find_best_mapping ─▶ MappingReport
//! DomainText ──compile──▶ RelationalGraph ──walk──▶ SentenceSet ─┘
//! ```
//!
//! The search is exhaustive within a window of source predicates and greedy
//! across windows, so very large schemas trade optimality for bounded work.

pub mod assignment;
pub mod config;
pub mod constraints;
pub mod driver;
pub mod report;
pub mod score;
pub mod search;
pub mod window;

pub use assignment::{MappingState, SignedTarget};
pub use config::MappingConfig;
pub use constraints::{is_compatible, Compatibility, TypeConstraints};
pub use driver::{build_mapping, build_mapping_with_rng, Domain, DomainText};
pub use report::{Correspondence, Diagnostics, MappingReport};
pub use score::{jaccard, score, translate};
pub use search::{find_best_mapping, HeadRestriction, MappingSearch, SearchOptions, SearchOutcome, TieBreak};
pub use window::{max_mappings, plan_windows, ArityProfile, DEFAULT_WINDOW_THRESHOLD};
