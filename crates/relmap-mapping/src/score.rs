//! Mapping score: Jaccard similarity between translated source sentences and
//! target sentences.

use ahash::AHashMap;
use relmap_graph::{base_name, is_inverse, Sentence, SentenceSet};

use crate::assignment::{MappingState, SignedTarget};

/// Rewrite source sentences into target vocabulary.
///
/// A label maps through the mapping directly, or through its inverse
/// (`_r` becomes the inverse of whatever `r` maps to). Translation of a
/// sentence stops at the first label that maps neither way; what was
/// translated up to that point is kept if it still forms a sentence.
pub fn translate(mapping: &MappingState, sentences: &SentenceSet) -> SentenceSet {
    let lookup: AHashMap<&str, &SignedTarget> = mapping.entries().collect();

    let mut out = SentenceSet::new();
    for sentence in sentences.iter() {
        let mut labels = Vec::with_capacity(sentence.len());
        for label in sentence.labels() {
            match translate_label(&lookup, label) {
                Some(translated) => labels.push(translated),
                None => break,
            }
        }
        out.insert(Sentence::new(labels));
    }
    out
}

fn translate_label(lookup: &AHashMap<&str, &SignedTarget>, label: &str) -> Option<String> {
    if let Some(target) = lookup.get(label) {
        return Some(target.to_string());
    }
    if is_inverse(label) {
        if let Some(target) = lookup.get(base_name(label)) {
            return Some(target.invert().to_string());
        }
    }
    None
}

/// `|a ∩ b| / |a ∪ b|`, defined as 0 when both sets are empty.
pub fn jaccard(a: &SentenceSet, b: &SentenceSet) -> f64 {
    let shared = a.intersection_len(b);
    let union = a.len() + b.len() - shared;
    if union == 0 {
        return 0.0;
    }
    shared as f64 / union as f64
}

/// Score a candidate mapping. Not symmetric in `source` / `target`.
pub fn score(mapping: &MappingState, source: &SentenceSet, target: &SentenceSet) -> f64 {
    jaccard(&translate(mapping, source), target)
}
