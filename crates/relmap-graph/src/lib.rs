//! Relational graph compiled from ground facts, plus the random-walk sampler
//! that turns it into a structural signature.
//!
//! Key pieces:
//! 1. **Label interning**: edge labels are stored once and referenced by
//!    `LabelId`; every label is interned together with its inverse.
//! 2. **Node arena**: entities are namespaced by type (`type#raw`) and
//!    addressed by `NodeId`, the insertion index, so a uniform random node is
//!    one `gen_range` away.
//! 3. **Sentences**: label sequences read off bounded random walks. The set of
//!    distinct sentences of length ≥ 2 characterises the graph's local shape.

pub mod graph;
pub mod label;
pub mod sentence;
pub mod walk;

pub use graph::{Edge, FactRejection, GraphOptions, GraphStats, Node, NodeId, RelationalGraph};
pub use label::{base_name, invert, is_inverse, LabelId, LabelTable, INVERSE_MARKER};
pub use sentence::{Sentence, SentenceSet, MIN_SENTENCE_LEN};
pub use walk::{sample_sentences, sentence_frequencies, WalkConfig};
