//! Translation provider seam
//!
//! The facade only knows this trait. The HTTP implementation lives in
//! `translate::http`; tests plug in doubles.

use thiserror::Error;

/// Errors raised by an external translation provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("provider did not answer in time")]
    Timeout,

    #[error("provider rate limit reached")]
    RateLimited,

    #[error("provider returned HTTP {0}")]
    Status(u16),

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed provider response: {0}")]
    Malformed(String),
}

/// An external service that turns text in one language into another
pub trait TranslationProvider: Send {
    /// Short name used in logs and result metadata
    fn name(&self) -> &str;

    /// Translate `text` from `source` to `target` (provider language codes)
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, ProviderError>;
}

impl<P: TranslationProvider + ?Sized> TranslationProvider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, ProviderError> {
        (**self).translate(text, source, target)
    }
}
