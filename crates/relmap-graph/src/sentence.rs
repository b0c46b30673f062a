use std::fmt;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// Sentences shorter than this carry no edge pair and are never compared.
pub const MIN_SENTENCE_LEN: usize = 2;

/// Label sequence read off one walk, rendered space-separated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Sentence(Vec<String>);

impl Sentence {
    pub fn new(labels: Vec<String>) -> Self {
        Self(labels)
    }

    /// Split a space-separated rendering back into labels.
    pub fn parse(text: &str) -> Self {
        Self(text.split_whitespace().map(str::to_string).collect())
    }

    pub fn labels(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

impl FromIterator<String> for Sentence {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Distinct sentences of length ≥ [`MIN_SENTENCE_LEN`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentenceSet(AHashSet<Sentence>);

impl SentenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sentences<I>(sentences: I) -> Self
    where
        I: IntoIterator<Item = Sentence>,
    {
        let mut set = Self::new();
        for sentence in sentences {
            set.insert(sentence);
        }
        set
    }

    /// Insert a sentence; short ones are ignored. Returns whether it was added.
    pub fn insert(&mut self, sentence: Sentence) -> bool {
        if sentence.len() < MIN_SENTENCE_LEN {
            return false;
        }
        self.0.insert(sentence)
    }

    pub fn contains(&self, sentence: &Sentence) -> bool {
        self.0.contains(sentence)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sentence> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `|self ∩ other|`
    pub fn intersection_len(&self, other: &SentenceSet) -> usize {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().filter(|s| large.contains(s)).count()
    }
}
