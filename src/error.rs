//! Error types

use crate::conllu::ParseError;
use thiserror::Error;

/// Failure of a collaborator while extracting patterns
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Parse(#[from] ParseError),
}
