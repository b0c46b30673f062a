//! Edge labels and their inverses.
//!
//! A label is a predicate name; its inverse carries one leading `_`.
//! Predicate names never start with `_` (the parsers reject them and the
//! graph refuses them), so inverting toggles exactly one marker:
//! `invert(invert(l)) == l` and `__r` never arises.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

pub use relmap_dsl::INVERSE_MARKER;

/// Toggle the inverse marker.
pub fn invert(label: &str) -> String {
    match label.strip_prefix(INVERSE_MARKER) {
        Some(rest) => rest.to_string(),
        None => format!("{INVERSE_MARKER}{label}"),
    }
}

pub fn is_inverse(label: &str) -> bool {
    label.starts_with(INVERSE_MARKER)
}

/// The label without its inverse marker.
pub fn base_name(label: &str) -> &str {
    label.strip_prefix(INVERSE_MARKER).unwrap_or(label)
}

/// Interned label id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct LabelId(u32);

impl LabelId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Label interner that keeps every label paired with its inverse.
#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    names: Vec<String>,
    ids: AHashMap<String, LabelId>,
    inverse: Vec<LabelId>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a label (and its inverse), returning the label's id.
    pub fn intern(&mut self, label: &str) -> LabelId {
        if let Some(&id) = self.ids.get(label) {
            return id;
        }

        let id = self.push(label.to_string());
        let inverse_name = invert(label);
        let inverse = match self.ids.get(&inverse_name) {
            Some(&existing) => existing,
            None => self.push(inverse_name),
        };
        self.inverse[id.index()] = inverse;
        self.inverse[inverse.index()] = id;
        id
    }

    fn push(&mut self, name: String) -> LabelId {
        let id = LabelId(self.names.len() as u32);
        self.ids.insert(name.clone(), id);
        self.names.push(name);
        self.inverse.push(id);
        id
    }

    pub fn id_of(&self, label: &str) -> Option<LabelId> {
        self.ids.get(label).copied()
    }

    /// Label text. Panics on an id from another table.
    pub fn name(&self, id: LabelId) -> &str {
        &self.names[id.index()]
    }

    pub fn inverse(&self, id: LabelId) -> LabelId {
        self.inverse[id.index()]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
