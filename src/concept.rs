//! Concepts: noun-phrase spans with a designated core word
//!
//! The extractor only needs a handful of services from whoever identifies
//! concepts, captured by the `ConceptService` trait. `NounChunker` is a
//! simple built-in implementation working straight off the dependency tree.

use crate::tree::{Tree, WordId};

/// A noun-phrase span and its core word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Concept {
    pub core: WordId,
    /// Words of the span in surface order
    pub span: Vec<WordId>,
}

impl Concept {
    pub fn new(core: WordId, span: Vec<WordId>) -> Self {
        Self { core, span }
    }
}

/// Concept identification and text utilities used by the extractor
pub trait ConceptService {
    /// Enumerate concepts of at least `min_size` words, in the order they
    /// should be reported
    fn concepts(&self, tree: &Tree, min_size: usize) -> Vec<Concept>;

    /// Surface text of a span
    fn join_text(&self, tree: &Tree, span: &[WordId]) -> String {
        let mut text = String::new();
        let mut words = span.iter().filter_map(|&id| tree.word(id)).peekable();
        while let Some(word) = words.next() {
            text.push_str(&word.form);
            if word.space_after && words.peek().is_some() {
                text.push(' ');
            }
        }
        text
    }

    /// Dependency label of a word, as a string
    fn dependency_label(&self, tree: &Tree, id: WordId) -> String {
        tree.word(id)
            .map(|word| word.deprel.to_string())
            .unwrap_or_default()
    }

    /// Lower-cased lemma text of a span
    ///
    /// With `lemmatize_verbs` off, verbs keep their (lower-cased) surface form.
    fn lemmatize(&self, tree: &Tree, span: &[WordId], lemmatize_verbs: bool) -> String {
        span.iter()
            .filter_map(|&id| tree.word(id))
            .map(|word| {
                if word.is_verb() && !lemmatize_verbs {
                    word.form.to_lowercase()
                } else {
                    word.lemma.to_lowercase()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

const NOMINAL_TAGS: &[&str] = &["NOUN", "PROPN", "PRON"];

const MODIFIER_LABELS: &[&str] = &[
    "det",
    "predet",
    "amod",
    "compound",
    "nn",
    "nummod",
    "num",
    "poss",
    "nmod:poss",
    "possessive",
    "case",
    "quantmod",
    "advmod",
];

/// Built-in concept service chunking noun phrases off nominal heads
///
/// Every NOUN, PROPN or PRON that is not itself a compound modifier heads
/// a concept. The span is the head plus the contiguous run of pre-modifier
/// subtrees (determiners, adjectives, compounds, numerals, possessives)
/// immediately to its left.
#[derive(Debug, Clone, Copy, Default)]
pub struct NounChunker;

impl NounChunker {
    fn is_nominal_head(tree: &Tree, id: WordId) -> bool {
        tree.word(id).is_some_and(|word| {
            NOMINAL_TAGS.contains(&word.upos.as_str())
                && !matches!(word.deprel.as_str(), "compound" | "nn")
        })
    }

    /// Leftmost word reachable through modifier children, staying contiguous
    fn chunk_start(tree: &Tree, head: WordId) -> WordId {
        let mut start = head;
        let Some(word) = tree.word(head) else {
            return start;
        };
        // Walk left-side children from nearest to farthest
        for &child in word.children.iter().rev().filter(|&&c| c < head) {
            let Some(child_word) = tree.word(child) else {
                break;
            };
            if !MODIFIER_LABELS.contains(&child_word.deprel.as_str()) {
                break;
            }
            let child_start = Self::subtree_start(tree, child);
            let child_end = Self::subtree_end(tree, child);
            if child_end + 1 != start {
                break;
            }
            start = child_start;
        }
        start
    }

    fn subtree_start(tree: &Tree, id: WordId) -> WordId {
        tree.word(id)
            .and_then(|w| w.children.first().copied())
            .filter(|&first| first < id)
            .map_or(id, |first| Self::subtree_start(tree, first))
    }

    fn subtree_end(tree: &Tree, id: WordId) -> WordId {
        tree.word(id)
            .and_then(|w| w.children.last().copied())
            .filter(|&last| last > id)
            .map_or(id, |last| Self::subtree_end(tree, last))
    }
}

impl ConceptService for NounChunker {
    fn concepts(&self, tree: &Tree, min_size: usize) -> Vec<Concept> {
        (0..tree.len())
            .filter(|&id| Self::is_nominal_head(tree, id))
            .map(|head| {
                let start = Self::chunk_start(tree, head);
                Concept::new(head, (start..=head).collect())
            })
            .filter(|concept| concept.span.len() >= min_size)
            .collect()
    }
}
