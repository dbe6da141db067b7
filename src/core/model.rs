//! Unified Result Model
//!
//! Every command maps its outcome to this model before rendering output.

use serde::{Deserialize, Serialize};

/// The kind of result item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Translation,
    Language,
    Entry,
    Stats,
    Error,
}

/// Where a translation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Cache,
    Provider,
}

/// Metadata for a result item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {
    /// Time spent producing this item in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,

    /// Provider that served a cache miss
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

/// Error or warning attached to a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinguaError {
    pub code: String,
    pub message: String,

    /// The request itself was unusable (as opposed to nothing being available)
    #[serde(skip)]
    pub invalid_input: bool,
}

impl LinguaError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            invalid_input: false,
        }
    }

    /// Mark this error as caused by the request itself
    pub fn as_invalid_input(mut self) -> Self {
        self.invalid_input = true;
        self
    }
}

/// The unified result item that all commands produce
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultItem {
    /// The kind of this result
    pub kind: Kind,

    /// Source text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Source language code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Target language code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Translated text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,

    /// Language code (for language items)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Language display name (for language items)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Where the translation came from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,

    /// Structured data payload (cache stats)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    /// Metadata
    #[serde(default)]
    pub meta: Meta,

    /// Non-fatal problems
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<LinguaError>,

    /// Errors (if any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<LinguaError>,
}

impl ResultItem {
    fn empty(kind: Kind) -> Self {
        Self {
            kind,
            text: None,
            source: None,
            target: None,
            translation: None,
            code: None,
            name: None,
            origin: None,
            data: None,
            meta: Meta::default(),
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Create a new translation result
    pub fn translation(
        text: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        translation: impl Into<String>,
        origin: Origin,
    ) -> Self {
        Self {
            text: Some(text.into()),
            source: Some(source.into()),
            target: Some(target.into()),
            translation: Some(translation.into()),
            origin: Some(origin),
            ..Self::empty(Kind::Translation)
        }
    }

    /// Create a new cache entry result
    pub fn entry(
        text: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        Self {
            text: Some(text.into()),
            source: Some(source.into()),
            target: Some(target.into()),
            translation: Some(translation.into()),
            origin: Some(Origin::Cache),
            ..Self::empty(Kind::Entry)
        }
    }

    /// Create a new language result
    pub fn language(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            name: Some(name.into()),
            ..Self::empty(Kind::Language)
        }
    }

    /// Create a new stats result
    pub fn stats(data: serde_json::Value) -> Self {
        Self {
            data: Some(data),
            ..Self::empty(Kind::Stats)
        }
    }

    /// Create a new error result
    pub fn error(error: LinguaError) -> Self {
        Self {
            errors: vec![error],
            ..Self::empty(Kind::Error)
        }
    }

    /// Attach the request that produced this item
    pub fn with_request(
        mut self,
        text: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        self.text = Some(text.into());
        self.source = Some(source.into());
        self.target = Some(target.into());
        self
    }

    /// Set metadata
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    /// Add a warning
    pub fn with_warning(mut self, warning: LinguaError) -> Self {
        self.warnings.push(warning);
        self
    }

    /// Whether this item reports a failure
    pub fn is_error(&self) -> bool {
        self.kind == Kind::Error
    }
}

/// Result set containing multiple result items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    pub items: Vec<ResultItem>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: ResultItem) {
        self.items.push(item);
    }

    /// All error entries across items
    pub fn errors(&self) -> impl Iterator<Item = &LinguaError> {
        self.items.iter().flat_map(|item| item.errors.iter())
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl IntoIterator for ResultSet {
    type Item = ResultItem;
    type IntoIter = std::vec::IntoIter<ResultItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl FromIterator<ResultItem> for ResultSet {
    fn from_iter<T: IntoIterator<Item = ResultItem>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
