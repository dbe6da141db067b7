//! Cache key - Structured (text, source, target) identity of a translation
//!
//! Keys are compared as a unit in memory. On disk they are written in the
//! `text_source_target` form so existing cache files stay readable. Decoding
//! splits on the last two underscores, which is unambiguous because language
//! codes never contain `_`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const SEPARATOR: char = '_';

/// Identity of one cached translation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    pub text: String,
    pub source: String,
    pub target: String,
}

/// A stored key that cannot be split back into its three parts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed cache key {0:?}: expected `text_source_target`")]
pub struct MalformedKey(pub String);

impl CacheKey {
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

    /// Encode as the on-disk key string
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.text,
            self.source,
            self.target,
            sep = SEPARATOR
        )
    }
}

impl FromStr for CacheKey {
    type Err = MalformedKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.rsplitn(3, SEPARATOR);
        let target = parts.next().unwrap_or_default();
        let source = parts.next();
        let text = parts.next();

        match (text, source) {
            (Some(text), Some(source)) if !source.is_empty() && !target.is_empty() => {
                Ok(CacheKey::new(text, source, target))
            }
            _ => Err(MalformedKey(s.to_string())),
        }
    }
}
