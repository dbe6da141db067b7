//! Translation module - Cache-backed translation service
//!
//! Provides:
//! - The provider language catalogue (name <-> code)
//! - The provider trait and its HTTP implementation
//! - The cache-consulting facade
//! - A single-owner worker thread for non-blocking callers

pub mod facade;
pub mod http;
pub mod languages;
pub mod provider;
pub mod worker;

use thiserror::Error;

pub use facade::{Translation, TranslationRequest, Translator};
pub use http::HttpProvider;
pub use provider::{ProviderError, TranslationProvider};
pub use worker::TranslationWorker;

/// Errors surfaced by a translation request
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("nothing to translate: text is empty")]
    EmptyText,

    #[error("unsupported language: {0:?}")]
    InvalidLanguage(String),

    #[error("translation failed: {0}")]
    Failed(#[from] ProviderError),

    #[error("translation worker has stopped")]
    WorkerGone,
}

impl TranslateError {
    /// Stable code used in rendered output
    pub fn code(&self) -> &'static str {
        match self {
            TranslateError::EmptyText => "EMPTY_TEXT",
            TranslateError::InvalidLanguage(_) => "INVALID_LANGUAGE",
            TranslateError::Failed(_) => "TRANSLATION_FAILED",
            TranslateError::WorkerGone => "WORKER_GONE",
        }
    }

    /// Whether the request itself was unusable, as opposed to no translation
    /// being available
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            TranslateError::EmptyText | TranslateError::InvalidLanguage(_)
        )
    }
}
