//! Predicate location and assembly
//!
//! A predicate is centred on a verb (its core). The *composite* core adds
//! the particles and negation that belong to the verb's identity ("give
//! up", "did not go"); the full span further adds auxiliaries,
//! prepositions and agents.

use crate::concept::ConceptService;
use crate::deprel::DepRel;
use crate::tree::{Tree, WordId};
use serde::Serialize;

/// The verbal side of a pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Predicate {
    /// Surface text of `predicate_span`
    pub predicate: String,
    pub predicate_span: Vec<WordId>,
    pub predicate_core: WordId,
    pub composite_predicate_core: Vec<WordId>,
    pub composite_predicate_core_lemma: String,
}

/// Find the verb governing `id`: the word itself if it is a verb,
/// otherwise its nearest verbal ancestor
pub fn locate_predicate_core(tree: &Tree, id: WordId) -> Option<WordId> {
    let word = tree.word(id)?;
    if word.is_verb() {
        return Some(id);
    }
    tree.ancestors(id).find(|w| w.is_verb()).map(|w| w.id)
}

/// The predicate core of `id` plus its particle and negation children,
/// in surface order
pub fn composite_predicate_core(tree: &Tree, id: WordId) -> Option<Vec<WordId>> {
    let core = locate_predicate_core(tree, id)?;
    Some(gather_components(tree, core, DepRel::is_core_component))
}

/// Collect `core` and its direct children whose label passes `select`
fn gather_components(tree: &Tree, core: WordId, select: fn(&DepRel) -> bool) -> Vec<WordId> {
    let mut members: Vec<WordId> = tree
        .children(core)
        .filter(|child| select(&child.deprel))
        .map(|child| child.id)
        .collect();
    members.push(core);
    members.sort_unstable();
    members.dedup();
    members
}

/// Build the full predicate governing `id`
///
/// Returns None when no verb governs the word.
pub fn build_predicate<C>(tree: &Tree, id: WordId, concepts: &C) -> Option<Predicate>
where
    C: ConceptService + ?Sized,
{
    let predicate_core = locate_predicate_core(tree, id)?;
    let predicate_span = gather_components(tree, predicate_core, DepRel::is_fellow_component);
    let composite_predicate_core = composite_predicate_core(tree, predicate_core)?;
    let composite_predicate_core_lemma = concepts.lemmatize(tree, &composite_predicate_core, true);

    Some(Predicate {
        predicate: concepts.join_text(tree, &predicate_span),
        predicate_span,
        predicate_core,
        composite_predicate_core,
        composite_predicate_core_lemma,
    })
}

/// True if any word of the span carries the label `auxpass`
pub fn is_passive(tree: &Tree, span: &[WordId]) -> bool {
    span.iter()
        .filter_map(|&id| tree.word(id))
        .any(|word| word.deprel == DepRel::AuxPass)
}
