//! Relational graph builder.
//!
//! Every accepted fact becomes edges between type-namespaced entity nodes:
//!
//! ```text
//! parent(person,person).  parent(ann,bob).
//!
//!   person#ann --parent--> person#bob
//!   person#bob --_parent--> person#ann      (unless built asymmetric)
//! ```
//!
//! Unary facts `smokes(ann)` become a single self edge
//! `person#ann --smokes--> person#ann` with no inverse.

use std::fmt;

use ahash::AHashMap;
use relmap_dsl::{Background, Fact};
use serde::{Deserialize, Serialize};

use crate::label::{is_inverse, LabelId, LabelTable, INVERSE_MARKER};

// ============================================================================
// Nodes and edges
// ============================================================================

/// Arena index of a node; ids are dense and follow insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub label: LabelId,
    pub target: NodeId,
}

/// One typed entity with its outgoing edges, in insertion order.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    edges: Vec<Edge>,
}

impl Node {
    /// Namespaced entity key, `type#raw`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

// ============================================================================
// Options / statistics
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    /// Insert `b --_r--> a` for every binary fact `r(a,b)`.
    pub inverse_edges: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            inverse_edges: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub accepted_facts: usize,
    pub rejected_facts: usize,
}

/// Why a fact did not make it into the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactRejection {
    UndeclaredPredicate,
    /// The predicate name collides with an inverse label.
    ReservedPredicate,
    ArityMismatch { declared: usize, supplied: usize },
}

impl fmt::Display for FactRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactRejection::UndeclaredPredicate => write!(f, "predicate is not declared"),
            FactRejection::ReservedPredicate => {
                write!(f, "predicate name starts with the inverse marker `{INVERSE_MARKER}`")
            }
            FactRejection::ArityMismatch { declared, supplied } => write!(
                f,
                "declared arity {declared} does not accept {supplied} argument(s)"
            ),
        }
    }
}

// ============================================================================
// Graph
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct RelationalGraph {
    options: GraphOptions,
    labels: LabelTable,
    nodes: Vec<Node>,
    registry: AHashMap<String, NodeId>,
    edge_count: usize,
    accepted_facts: usize,
    rejected_facts: usize,
}

/// Entity key namespaced by its type, so `person#ann` and `city#ann` differ.
pub fn entity_key(type_label: &str, raw: &str) -> String {
    format!("{type_label}#{raw}")
}

impl RelationalGraph {
    pub fn new(options: GraphOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Compile a background and its facts into a graph.
    pub fn build<'a, I>(background: &Background, facts: I, options: GraphOptions) -> Self
    where
        I: IntoIterator<Item = &'a Fact>,
    {
        let mut graph = Self::new(options);
        for fact in facts {
            // Rejections are counted inside `insert_fact`.
            let _ = graph.insert_fact(background, fact);
        }
        tracing::debug!(
            nodes = graph.nodes.len(),
            edges = graph.edge_count,
            accepted = graph.accepted_facts,
            rejected = graph.rejected_facts,
            "built relational graph"
        );
        graph
    }

    /// Insert one fact, returning the number of edges added.
    pub fn insert_fact(&mut self, background: &Background, fact: &Fact) -> Result<usize, FactRejection> {
        match self.endpoints(background, fact) {
            Ok((subject, object, with_inverse)) => {
                self.accepted_facts += 1;
                Ok(self.add_relation(&subject, &fact.predicate, &object, with_inverse))
            }
            Err(reason) => {
                tracing::trace!(fact = %fact, %reason, "dropping fact");
                self.rejected_facts += 1;
                Err(reason)
            }
        }
    }

    fn endpoints(&self, background: &Background, fact: &Fact) -> Result<(String, String, bool), FactRejection> {
        if is_inverse(&fact.predicate) {
            return Err(FactRejection::ReservedPredicate);
        }
        let decl = background
            .get(&fact.predicate)
            .ok_or(FactRejection::UndeclaredPredicate)?;

        match (decl.types.as_slice(), fact.args.as_slice()) {
            ([ty], [a]) => {
                let key = entity_key(ty, a);
                Ok((key.clone(), key, false))
            }
            ([t1, t2], [a, b]) => Ok((
                entity_key(t1, a),
                entity_key(t2, b),
                self.options.inverse_edges,
            )),
            // A binary predicate over one type may be written with a single
            // argument; it denotes the self pair.
            ([t1, t2], [a]) if t1 == t2 => {
                let key = entity_key(t1, a);
                Ok((key.clone(), key, false))
            }
            _ => Err(FactRejection::ArityMismatch {
                declared: decl.arity(),
                supplied: fact.arity(),
            }),
        }
    }

    /// Add `subject --label--> object` (and the inverse edge when asked).
    pub fn add_relation(&mut self, subject: &str, label: &str, object: &str, with_inverse: bool) -> usize {
        let from = self.node_or_insert(subject);
        let to = self.node_or_insert(object);
        let label = self.labels.intern(label);

        self.push_edge(from, label, to);
        if !with_inverse {
            return 1;
        }
        let inverse = self.labels.inverse(label);
        self.push_edge(to, inverse, from);
        2
    }

    fn push_edge(&mut self, from: NodeId, label: LabelId, to: NodeId) {
        self.nodes[from.index()].edges.push(Edge { label, target: to });
        self.edge_count += 1;
    }

    fn node_or_insert(&mut self, key: &str) -> NodeId {
        if let Some(&id) = self.registry.get(key) {
            return id;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            name: key.to_string(),
            edges: Vec::new(),
        });
        self.registry.insert(key.to_string(), id);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_id(&self, key: &str) -> Option<NodeId> {
        self.registry.get(key).copied()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    pub fn options(&self) -> GraphOptions {
        self.options
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            nodes: self.nodes.len(),
            edges: self.edge_count,
            accepted_facts: self.accepted_facts,
            rejected_facts: self.rejected_facts,
        }
    }
}
