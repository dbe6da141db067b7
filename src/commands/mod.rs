//! Command handlers
//!
//! Each handler turns its arguments into a [`ResultSet`]; rendering and the
//! process exit code are derived from that set in one place.

pub mod cache;
pub mod languages;
pub mod translate;

use crate::cache::CacheError;
use crate::core::model::{LinguaError, ResultItem, ResultSet};
use crate::translate::TranslateError;

/// How a command ended, from the user's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Outcome {
    Success,
    /// No cached or remote translation was available
    Unavailable,
    /// The request itself was unusable (bad language, empty text)
    InvalidInput,
}

impl Outcome {
    /// Classify a result set by the most severe error it carries
    pub fn from_results(results: &ResultSet) -> Self {
        results
            .errors()
            .map(|e| {
                if e.invalid_input {
                    Outcome::InvalidInput
                } else {
                    Outcome::Unavailable
                }
            })
            .max()
            .unwrap_or(Outcome::Success)
    }

    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Success => 0,
            Outcome::Unavailable => 1,
            Outcome::InvalidInput => 2,
        }
    }
}

impl From<&TranslateError> for LinguaError {
    fn from(err: &TranslateError) -> Self {
        let error = LinguaError::new(err.code(), err.to_string());
        if err.is_input_error() {
            error.as_invalid_input()
        } else {
            error
        }
    }
}

impl From<&CacheError> for LinguaError {
    fn from(err: &CacheError) -> Self {
        let message = match err {
            CacheError::Load { .. } => format!(
                "{} (fix the file or run `linguaease cache clear`)",
                err
            ),
            CacheError::Persist { .. } => err.to_string(),
        };
        LinguaError::new(err.code(), message)
    }
}

/// A result set holding a single error
pub(crate) fn single_error(error: LinguaError) -> ResultSet {
    std::iter::once(ResultItem::error(error)).collect()
}
