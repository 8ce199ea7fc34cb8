//! Pattern records joining a concept to its governing predicate

use crate::concept::{Concept, ConceptService};
use crate::predicate::{Predicate, build_predicate, is_passive};
use crate::tree::{Tree, WordId};
use serde::Serialize;

/// One concept occurrence together with the predicate that governs it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pattern {
    /// Surface text of the concept span
    pub concept: String,
    pub concept_span: Vec<WordId>,
    pub concept_core: WordId,
    pub concept_core_text: String,
    /// Character offset of the concept core in the sentence text
    pub concept_core_offset: usize,
    pub concept_lemma: String,
    /// Dependency label of the concept core
    pub dependency: String,
    pub is_passive: bool,
    /// The concept is a single word, its own core
    pub is_at_core: bool,
    pub predicate_core_text: String,
    pub predicate_core_offset: usize,
    #[serde(flatten)]
    pub predicate: Predicate,
}

impl Pattern {
    /// Stable identifier of this pattern, see [`pattern_key`]
    pub fn key(&self) -> String {
        pattern_key(self)
    }
}

/// Join a concept with the predicate governing its core
///
/// Returns None when the core has no governing verb, when the predicate
/// text comes out empty, or when the concept span is empty.
pub fn build_pattern<C>(tree: &Tree, concept: &Concept, concepts: &C) -> Option<Pattern>
where
    C: ConceptService + ?Sized,
{
    let predicate = build_predicate(tree, concept.core, concepts)?;
    if predicate.predicate.is_empty() || concept.span.is_empty() {
        return None;
    }

    let core = concept.core;
    let is_at_core = concept.span.len() == 1 && concept.span[0] == core;

    Some(Pattern {
        concept: concepts.join_text(tree, &concept.span),
        concept_span: concept.span.clone(),
        concept_core: core,
        concept_core_text: word_text(tree, core),
        concept_core_offset: tree.char_offset(core).unwrap_or_default(),
        concept_lemma: concepts.lemmatize(tree, &concept.span, false),
        dependency: concepts.dependency_label(tree, core),
        is_passive: is_passive(tree, &predicate.predicate_span),
        is_at_core,
        predicate_core_text: word_text(tree, predicate.predicate_core),
        predicate_core_offset: tree.char_offset(predicate.predicate_core).unwrap_or_default(),
        predicate,
    })
}

fn word_text(tree: &Tree, id: WordId) -> String {
    tree.word(id).map(|w| w.form.clone()).unwrap_or_default()
}

/// Identifier for grouping recurring patterns:
/// `{predicate core}.{offset}.{concept core}.{offset}`, offsets counted in
/// characters of the sentence text
pub fn pattern_key(pattern: &Pattern) -> String {
    format!(
        "{}.{}.{}.{}",
        pattern.predicate_core_text,
        pattern.predicate_core_offset,
        pattern.concept_core_text,
        pattern.concept_core_offset
    )
}
