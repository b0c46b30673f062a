//! Ground facts: `name(e1, e2).`
//!
//! Arguments are plain word identifiers; spaces are ignored. Whether a fact
//! fits the declared schema is decided by the graph builder, not here.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::atom::{is_word_char, split_args, split_atom};
use crate::{LineError, Name};

/// One ground fact over raw (not yet type-namespaced) entity ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fact {
    pub predicate: Name,
    pub args: Vec<Name>,
}

impl Fact {
    pub fn new(predicate: impl Into<Name>, args: impl IntoIterator<Item = impl Into<Name>>) -> Self {
        Self {
            predicate: predicate.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}).", self.predicate, self.args.join(","))
    }
}

fn is_fact_arg_char(c: char) -> bool {
    is_word_char(c) || c == ',' || c == ' '
}

/// Parse one fact line.
pub fn parse_fact_line(line: &str) -> Result<Fact, LineError> {
    let (name, raw_args) = split_atom(line, is_fact_arg_char)?;
    let args = split_args(line, raw_args, &[' '])?;
    Ok(Fact {
        predicate: name.to_string(),
        args,
    })
}

/// Parse a sequence of fact lines, skipping malformed ones.
pub fn parse_facts<I, S>(lines: I) -> Vec<Fact>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = Vec::new();
    let mut skipped = 0usize;
    for line in lines {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }
        match parse_fact_line(line) {
            Ok(fact) => out.push(fact),
            Err(err) => {
                tracing::debug!(error = %err, "skipping fact line");
                skipped += 1;
            }
        }
    }
    if skipped > 0 {
        tracing::debug!(parsed = out.len(), skipped, "parsed fact lines");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_binary_and_unary_facts() {
        assert_eq!(
            parse_fact_line("parent(ann, bob).").unwrap(),
            Fact::new("parent", ["ann", "bob"])
        );
        assert_eq!(parse_fact_line("  smokes(ann).  ").unwrap(), Fact::new("smokes", ["ann"]));
    }

    #[test]
    fn decorations_are_not_allowed_in_facts() {
        assert!(parse_fact_line("parent(+ann,bob).").is_err());
        assert!(parse_fact_line("parent(ann-1,bob).").is_err());
    }

    #[test]
    fn bulk_parse_drops_malformed_lines() {
        let facts = parse_facts([
            "parent(ann,bob).",
            "parent(ann,bob)",
            "% comment",
            "father(tom,bob).",
        ]);
        assert_eq!(facts.len(), 2);
        assert_eq!(facts[1].to_string(), "father(tom,bob).");
    }

    #[test]
    fn inverse_marked_predicates_are_rejected() {
        assert!(matches!(
            parse_fact_line("_parent(cid,dan)."),
            Err(LineError::ReservedName { name, .. }) if name == "_parent"
        ));
        // Entities are not labels and may start with `_`.
        assert_eq!(
            parse_fact_line("parent(_anon,bob).").unwrap(),
            Fact::new("parent", ["_anon", "bob"])
        );

        let facts = parse_facts(["parent(ann,bob).", "_parent(cid,dan)."]);
        assert_eq!(facts, vec![Fact::new("parent", ["ann", "bob"])]);
    }
}
