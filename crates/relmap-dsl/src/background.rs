//! Background declarations: predicate name → ordered argument type labels.
//!
//! Accepted form: `name(type1, type2, ...).`, where each argument may carry
//! mode decorations (`+`, `-`, `#`, backtick) that are stripped:
//!
//! ```text
//! parent(+person,-person).   =>  parent: [person, person]
//! smokes(`person).           =>  smokes: [person]
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::atom::{is_word_char, split_args, split_atom, DECORATIONS};
use crate::{LineError, Name};

// ============================================================================
// Declarations
// ============================================================================

/// A predicate with its ordered argument types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PredicateDecl {
    pub name: Name,
    pub types: Vec<Name>,
}

impl PredicateDecl {
    pub fn new(name: impl Into<Name>, types: impl IntoIterator<Item = impl Into<Name>>) -> Self {
        Self {
            name: name.into(),
            types: types.into_iter().map(Into::into).collect(),
        }
    }

    pub fn arity(&self) -> usize {
        self.types.len()
    }
}

/// Renders the cleaned declaration, e.g. `parent(person,person).`
impl fmt::Display for PredicateDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}).", self.name, self.types.join(","))
    }
}

// ============================================================================
// Background
// ============================================================================

/// Parsed background of one domain.
///
/// Declaration order is preserved: it is the order in which the mapping
/// search visits predicates. Redeclaring a name keeps its original position
/// but takes the later argument types.
///
/// Only built through [`Background::insert`], which keeps `index` in step
/// with `predicates`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Background {
    predicates: Vec<PredicateDecl>,
    index: HashMap<Name, usize>,
    types: BTreeSet<Name>,
    skipped_lines: usize,
}

impl Background {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration, overwriting an earlier one with the same name.
    pub fn insert(&mut self, decl: PredicateDecl) {
        self.types.extend(decl.types.iter().cloned());
        match self.index.get(&decl.name) {
            Some(&pos) => self.predicates[pos] = decl,
            None => {
                self.index.insert(decl.name.clone(), self.predicates.len());
                self.predicates.push(decl);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&PredicateDecl> {
        self.index.get(name).map(|&pos| &self.predicates[pos])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Declarations in declaration order.
    pub fn predicates(&self) -> &[PredicateDecl] {
        &self.predicates
    }

    /// Every type label referenced by any declaration line.
    pub fn types(&self) -> &BTreeSet<Name> {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Number of input lines dropped because they did not match the grammar.
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    /// Number of declared predicates per arity.
    pub fn arity_counts(&self) -> BTreeMap<usize, usize> {
        let mut out = BTreeMap::new();
        for decl in &self.predicates {
            *out.entry(decl.arity()).or_insert(0) += 1;
        }
        out
    }
}

impl FromIterator<PredicateDecl> for Background {
    fn from_iter<I: IntoIterator<Item = PredicateDecl>>(iter: I) -> Self {
        let mut background = Background::new();
        for decl in iter {
            background.insert(decl);
        }
        background
    }
}

// ============================================================================
// Parser
// ============================================================================

fn is_decl_arg_char(c: char) -> bool {
    is_word_char(c) || c == ',' || DECORATIONS.contains(&c)
}

/// Parse one declaration line.
pub fn parse_background_line(line: &str) -> Result<PredicateDecl, LineError> {
    let (name, raw_args) = split_atom(line, is_decl_arg_char)?;
    let types = split_args(line, raw_args, DECORATIONS)?;
    Ok(PredicateDecl {
        name: name.to_string(),
        types,
    })
}

/// Parse a sequence of declaration lines, skipping malformed ones.
pub fn parse_background<I, S>(lines: I) -> Background
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut background = Background::new();
    for line in lines {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }
        match parse_background_line(line) {
            Ok(decl) => background.insert(decl),
            Err(err) => {
                tracing::debug!(error = %err, "skipping background line");
                background.skipped_lines += 1;
            }
        }
    }
    background
}
