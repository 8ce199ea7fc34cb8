//! Predex: predicate-concept pattern extraction
//!
//! Given a dependency parse, finds the verb governing each noun-phrase
//! concept, assembles the full predicate around it (particles, negation,
//! auxiliaries, prepositions, agents), detects passive voice, and emits
//! one pattern record per concept occurrence.

pub mod concept; // Concept spans and the concept service contract
pub mod config;
pub mod conllu; // CoNLL-U parsing, the built-in parser
pub mod deprel; // Closed dependency-label vocabulary
pub mod error;
pub mod extractor; // Text -> patterns pipeline
pub mod iterators; // Corpus-level iteration
pub mod pattern; // Pattern records and keys
pub mod predicate; // Predicate location and assembly
pub mod tree; // Arena dependency trees

// Python bindings
#[cfg(feature = "pyo3")]
pub mod python;

// Re-exports for convenience
pub use concept::{Concept, ConceptService, NounChunker};
pub use config::{ConfigError, ExtractorConfig};
pub use conllu::{ConlluParser, ParseError, TreeIterator};
pub use deprel::{CORE_COMPONENTS, DepClass, DepRel, FELLOW_COMPONENTS};
pub use error::ExtractError;
pub use extractor::{Parse, PatternExtractor};
pub use iterators::{PatternSet, Treebank};
pub use pattern::{Pattern, build_pattern, pattern_key};
pub use predicate::{
    Predicate, build_predicate, composite_predicate_core, is_passive, locate_predicate_core,
};
pub use tree::{Tree, Word, WordId};
