//! Translation facade - Consults the cache before the provider
//!
//! A hit returns the stored value without touching the provider. A miss
//! calls the provider, writes the result through to the cache and returns
//! it. Provider failures cache nothing. A failed cache write does not fail
//! the translation; it is reported alongside the result.

use tracing::{debug, info, warn};

use crate::cache::{CacheError, CacheKey, CacheStore};
use crate::core::model::Origin;
use crate::translate::languages;
use crate::translate::provider::TranslationProvider;
use crate::translate::TranslateError;

/// One translation request, in provider language codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub source: String,
    pub target: String,
}

impl TranslationRequest {
    pub fn new(
        text: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
            target: target.into(),
        }
    }
}

/// A successful translation
#[derive(Debug)]
pub struct Translation {
    pub text: String,
    pub origin: Origin,
    /// Set when the result could not be written to the cache
    pub persist_warning: Option<CacheError>,
}

/// Cache-backed translation service
pub struct Translator<P> {
    store: CacheStore,
    provider: P,
}

impl<P: TranslationProvider> Translator<P> {
    pub fn new(store: CacheStore, provider: P) -> Self {
        Self { store, provider }
    }

    #[cfg(test)]
    pub(crate) fn cache(&self) -> &CacheStore {
        &self.store
    }

    /// Translate text between two provider language codes
    pub fn translate(
        &mut self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<Translation, TranslateError> {
        let key = cache_key(text, source, target)?;

        if let Some(cached) = self.store.get(&key) {
            debug!(from = source, to = target, "cache hit");
            return Ok(Translation {
                text: cached.to_string(),
                origin: Origin::Cache,
                persist_warning: None,
            });
        }

        debug!(
            from = source,
            to = target,
            provider = self.provider.name(),
            "cache miss"
        );
        let translated = self
            .provider
            .translate(&key.text, &key.source, &key.target)
            .map_err(|e| {
                warn!(from = source, to = target, error = %e, "provider call failed");
                TranslateError::from(e)
            })?;

        let persist_warning = match self.store.put(key, translated.clone()) {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, "translation kept in memory only");
                Some(e)
            }
        };

        info!(from = source, to = target, "translated via provider");
        Ok(Translation {
            text: translated,
            origin: Origin::Provider,
            persist_warning,
        })
    }

    /// Translate a prepared request
    pub fn translate_request(
        &mut self,
        request: &TranslationRequest,
    ) -> Result<Translation, TranslateError> {
        self.translate(&request.text, &request.source, &request.target)
    }
}

/// Validate a request and derive its cache key.
///
/// The text is trimmed; both codes must be in the provider catalogue.
pub fn cache_key(text: &str, source: &str, target: &str) -> Result<CacheKey, TranslateError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TranslateError::EmptyText);
    }
    for code in [source, target] {
        if !languages::is_supported(code) {
            return Err(TranslateError::InvalidLanguage(code.to_string()));
        }
    }
    Ok(CacheKey::new(text, source, target))
}
