//! Python bindings for predex
//!
//! This module provides PyO3-based Python bindings for the Rust core.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::config::{ConfigError, ExtractorConfig};
use crate::error::ExtractError;
use crate::extractor::PatternExtractor as RustPatternExtractor;
use crate::pattern::Pattern;

/// Convert ExtractError to Python exception
impl From<ExtractError> for PyErr {
    fn from(err: ExtractError) -> PyErr {
        match err {
            ExtractError::Parse(e) => PyValueError::new_err(e.to_string()),
        }
    }
}

impl From<ConfigError> for PyErr {
    fn from(err: ConfigError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Extract predicate-concept patterns from CoNLL-U sentences.
///
/// Args:
///     min_concept_size: Minimum number of words in a concept (default 2)
///     model: Opaque parser model name, recorded but not interpreted
#[pyclass(name = "PatternExtractor")]
pub struct PyPatternExtractor {
    inner: RustPatternExtractor,
}

#[pymethods]
impl PyPatternExtractor {
    #[new]
    #[pyo3(signature = (min_concept_size=2, model=None))]
    fn new(min_concept_size: usize, model: Option<String>) -> PyResult<Self> {
        let config = ExtractorConfig {
            min_concept_size,
            model,
        };
        Ok(Self {
            inner: RustPatternExtractor::new(config)?,
        })
    }

    #[getter]
    fn min_concept_size(&self) -> usize {
        self.inner.config().min_concept_size
    }

    /// Patterns of one CoNLL-U sentence, as a list of dicts.
    ///
    /// Raises:
    ///     ValueError: If the sentence is malformed
    fn get_pattern_list<'py>(
        &self,
        py: Python<'py>,
        text: &str,
    ) -> PyResult<Vec<Bound<'py, PyDict>>> {
        let patterns = self.inner.get_pattern_list(text)?;
        patterns
            .iter()
            .map(|pattern| pattern_to_dict(py, pattern))
            .collect()
    }

    fn __repr__(&self) -> String {
        format!(
            "<PatternExtractor min_concept_size={}>",
            self.inner.config().min_concept_size
        )
    }
}

fn pattern_to_dict<'py>(py: Python<'py>, pattern: &Pattern) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("concept", &pattern.concept)?;
    dict.set_item("concept_span", &pattern.concept_span)?;
    dict.set_item("concept_core", pattern.concept_core)?;
    dict.set_item("concept_core_offset", pattern.concept_core_offset)?;
    dict.set_item("concept_lemma", &pattern.concept_lemma)?;
    dict.set_item("dependency", &pattern.dependency)?;
    dict.set_item("is_passive", pattern.is_passive)?;
    dict.set_item("is_at_core", pattern.is_at_core)?;

    let predicate = &pattern.predicate;
    dict.set_item("predicate", &predicate.predicate)?;
    dict.set_item("predicate_span", &predicate.predicate_span)?;
    dict.set_item("predicate_core", predicate.predicate_core)?;
    dict.set_item("predicate_core_offset", pattern.predicate_core_offset)?;
    dict.set_item(
        "composite_predicate_core",
        &predicate.composite_predicate_core,
    )?;
    dict.set_item(
        "composite_predicate_core_lemma",
        &predicate.composite_predicate_core_lemma,
    )?;
    dict.set_item("key", pattern.key())?;
    Ok(dict)
}

#[pyfunction]
fn __version__() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[pymodule]
fn predex(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyPatternExtractor>()?;
    m.add_function(wrap_pyfunction!(__version__, m)?)?;
    Ok(())
}
