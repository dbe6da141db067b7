//! Runtime settings resolved once from command-line flags and environment

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};

use crate::core::paths::resolve_cache_dir;
use crate::core::render::{OutputFormat, RenderConfig};

/// Everything a command needs to know about its environment
#[derive(Debug, Clone)]
pub struct Settings {
    /// Working root (absolute when it exists)
    pub root: PathBuf,

    /// Directory holding the cache document
    pub cache_dir: PathBuf,

    /// Translation provider base URL
    pub endpoint: String,

    /// Upper bound for a single provider call
    pub timeout: Duration,

    /// Output rendering
    pub render: RenderConfig,
}

impl Settings {
    pub fn new(
        root: PathBuf,
        cache_dir: Option<PathBuf>,
        endpoint: String,
        timeout_secs: u64,
        format: &str,
        pretty: bool,
    ) -> Result<Self> {
        let format: OutputFormat = format.parse().map_err(|e: String| anyhow!(e))?;
        let root = root.canonicalize().unwrap_or(root);
        let cache_dir = resolve_cache_dir(&root, cache_dir.as_deref());

        Ok(Self {
            root,
            cache_dir,
            endpoint,
            timeout: Duration::from_secs(timeout_secs),
            render: RenderConfig::with_pretty(format, pretty),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_cache_dir_under_root() {
        let temp = tempdir().unwrap();
        let settings = Settings::new(
            temp.path().to_path_buf(),
            None,
            "http://localhost".to_string(),
            10,
            "jsonl",
            false,
        )
        .unwrap();

        assert!(settings.cache_dir.ends_with("translation_cache"));
        assert!(settings.cache_dir.starts_with(&settings.root));
        assert_eq!(settings.timeout, Duration::from_secs(10));
        assert_eq!(settings.render.format, OutputFormat::Jsonl);
    }

    #[test]
    fn test_explicit_cache_dir() {
        let temp = tempdir().unwrap();
        let settings = Settings::new(
            temp.path().to_path_buf(),
            Some(PathBuf::from("state")),
            "http://localhost".to_string(),
            3,
            "md",
            true,
        )
        .unwrap();

        assert!(settings.cache_dir.ends_with("state"));
        assert_eq!(settings.render.format, OutputFormat::Markdown);
        assert!(settings.render.pretty);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let err = Settings::new(
            PathBuf::from("."),
            None,
            "http://localhost".to_string(),
            10,
            "yaml",
            false,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Unknown format"));
    }
}
