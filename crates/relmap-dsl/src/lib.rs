//! Line-oriented relational DSL used by relmap.
//!
//! Two surface forms share one grammar, `identifier(arg, arg, ...).`:
//! - background declarations (`parent(+person,-person).`), where each argument
//!   names a type label and may carry mode decorations;
//! - ground facts (`parent(ann, bob).`), where each argument names an entity.
//!
//! Both bulk parsers are permissive: lines that do not match the grammar are
//! skipped. The single-line parsers report why a line was rejected.

mod atom;
pub mod background;
pub mod facts;

use thiserror::Error;

pub use background::{parse_background, parse_background_line, Background, PredicateDecl};
pub use facts::{parse_fact_line, parse_facts, Fact};

pub type Name = String;

/// Leading marker reserved for inverse edge labels; no predicate name may
/// start with it.
pub const INVERSE_MARKER: char = '_';

/// Why a single line was rejected by the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("expected `name(arg, ...).`, got `{line}`")]
    Syntax { line: String },
    #[error("empty argument in `{line}`")]
    EmptyArgument { line: String },
    #[error("predicate `{name}` starts with the reserved inverse marker `_` in `{line}`")]
    ReservedName { name: String, line: String },
}
