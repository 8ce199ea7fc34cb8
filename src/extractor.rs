//! End-to-end extraction: text -> tree -> concepts -> patterns
//!
//! The extractor owns its collaborators:
//! 1. a parser turning input text into a dependency tree
//! 2. a concept service enumerating noun-phrase concepts
//!
//! and runs the pattern builder over every concept, keeping the ones that
//! resolve to a predicate.

use crate::concept::{ConceptService, NounChunker};
use crate::config::{ConfigError, ExtractorConfig};
use crate::conllu::{ConlluParser, ParseError};
use crate::error::ExtractError;
use crate::pattern::{Pattern, build_pattern};
use crate::tree::Tree;
use tracing::{debug, trace};

/// Anything that can turn text into a dependency tree
pub trait Parse {
    fn parse(&self, text: &str) -> Result<Tree, ParseError>;
}

/// Predicate-concept pattern extractor
#[derive(Debug, Clone)]
pub struct PatternExtractor<P = ConlluParser, C = NounChunker> {
    parser: P,
    concepts: C,
    config: ExtractorConfig,
}

impl PatternExtractor {
    /// Extractor reading CoNLL-U input and chunking noun phrases itself
    pub fn new(config: ExtractorConfig) -> Result<Self, ConfigError> {
        Self::with_collaborators(ConlluParser, NounChunker, config)
    }
}

impl Default for PatternExtractor {
    fn default() -> Self {
        Self {
            parser: ConlluParser,
            concepts: NounChunker,
            config: ExtractorConfig::default(),
        }
    }
}

impl<P: Parse, C: ConceptService> PatternExtractor<P, C> {
    pub fn with_collaborators(
        parser: P,
        concepts: C,
        config: ExtractorConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if let Some(model) = &config.model {
            debug!(model = %model, "parser model selected");
        }
        Ok(Self {
            parser,
            concepts,
            config,
        })
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn concept_service(&self) -> &C {
        &self.concepts
    }

    /// Parse `text` and return its patterns in concept order
    ///
    /// Only parser failures are reported as errors; an empty list is a
    /// normal result.
    pub fn get_pattern_list(&self, text: &str) -> Result<Vec<Pattern>, ExtractError> {
        let tree = self.parser.parse(text)?;
        Ok(self.patterns_for_tree(&tree))
    }

    /// Patterns of an already parsed tree
    pub fn patterns_for_tree(&self, tree: &Tree) -> Vec<Pattern> {
        let concepts = self.concepts.concepts(tree, self.config.min_concept_size);
        let patterns: Vec<Pattern> = concepts
            .iter()
            .filter_map(|concept| {
                let pattern = build_pattern(tree, concept, &self.concepts);
                if pattern.is_none() {
                    trace!(core = concept.core, "concept has no usable predicate");
                }
                pattern
            })
            .collect();

        debug!(
            words = tree.len(),
            concepts = concepts.len(),
            patterns = patterns.len(),
            "extracted patterns"
        );
        patterns
    }
}
