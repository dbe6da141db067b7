//! Cache inspection commands

use serde_json::json;

use crate::cache::CacheStore;
use crate::commands::single_error;
use crate::config::Settings;
use crate::core::model::{LinguaError, ResultItem, ResultSet};
use crate::core::paths::{cache_file, normalize_path};
use crate::core::util::{get_file_size, get_mtime_rfc3339};
use crate::translate::{facade, languages};

/// Look up one cached translation without contacting the provider
pub fn run_get(settings: &Settings, text: &str, from: &str, to: &str) -> ResultSet {
    let key = match languages::resolve(from)
        .and_then(|source| Ok((source, languages::resolve(to)?)))
        .and_then(|(source, target)| facade::cache_key(text, source, target))
    {
        Ok(key) => key,
        Err(e) => return single_error(LinguaError::from(&e)),
    };

    let store = match CacheStore::load(&settings.cache_dir) {
        Ok(store) => store,
        Err(e) => return single_error(LinguaError::from(&e)),
    };

    let item = match store.get(&key) {
        Some(translation) => ResultItem::entry(&key.text, &key.source, &key.target, translation),
        None => ResultItem::error(LinguaError::new(
            "NOT_CACHED",
            format!("no cached translation for {}", key),
        ))
        .with_request(&key.text, &key.source, &key.target),
    };
    std::iter::once(item).collect()
}

/// List every cached translation in key order
pub fn run_list(settings: &Settings) -> ResultSet {
    match CacheStore::load(&settings.cache_dir) {
        Ok(store) => store
            .entries()
            .into_iter()
            .map(|(key, translation)| {
                ResultItem::entry(&key.text, &key.source, &key.target, translation)
            })
            .collect(),
        Err(e) => single_error(LinguaError::from(&e)),
    }
}

/// Summarize the cache document
pub fn run_stats(settings: &Settings) -> ResultSet {
    let store = match CacheStore::load(&settings.cache_dir) {
        Ok(store) => store,
        Err(e) => return single_error(LinguaError::from(&e)),
    };

    let path = store.path();
    let exists = path.is_file();
    let data = json!({
        "path": normalize_path(path),
        "exists": exists,
        "entries": store.len(),
        "size_bytes": if exists { get_file_size(path).ok() } else { None },
        "modified": if exists { get_mtime_rfc3339(path).ok() } else { None },
    });
    std::iter::once(ResultItem::stats(data)).collect()
}

/// Discard every cached translation, including an unreadable document
pub fn run_clear(settings: &Settings) -> ResultSet {
    let path = cache_file(&settings.cache_dir);
    let previous = CacheStore::load(&settings.cache_dir).map(|s| s.len()).ok();

    match CacheStore::reset(&settings.cache_dir) {
        Ok(_) => {
            let data = json!({
                "path": normalize_path(&path),
                "cleared": true,
                "removed": previous,
                "entries": 0,
            });
            std::iter::once(ResultItem::stats(data)).collect()
        }
        Err(e) => single_error(LinguaError::from(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn settings(root: &Path) -> Settings {
        Settings::new(
            root.to_path_buf(),
            None,
            "http://127.0.0.1:9".to_string(),
            2,
            "jsonl",
            false,
        )
        .unwrap()
    }

    fn seed(root: &Path, document: &str) {
        let dir = root.join("translation_cache");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("translation_cache.json"), document).unwrap();
    }

    #[test]
    fn test_get_hit() {
        let temp = tempdir().unwrap();
        seed(temp.path(), r#"{"Hello_en_es": "Hola"}"#);

        let set = run_get(&settings(temp.path()), " Hello ", "english", "es");
        assert_eq!(set.len(), 1);
        assert_eq!(set.items[0].translation.as_deref(), Some("Hola"));
        assert_eq!(set.items[0].text.as_deref(), Some("Hello"));
    }

    #[test]
    fn test_get_miss_is_not_cached() {
        let temp = tempdir().unwrap();
        let set = run_get(&settings(temp.path()), "Hello", "en", "fr");
        assert_eq!(set.items[0].errors[0].code, "NOT_CACHED");
        assert_eq!(set.items[0].target.as_deref(), Some("fr"));
        // Looking up never creates the document
        assert!(!temp.path().join("translation_cache").exists());
    }

    #[test]
    fn test_get_invalid_language() {
        let temp = tempdir().unwrap();
        let set = run_get(&settings(temp.path()), "Hello", "en", "xx");
        assert_eq!(set.items[0].errors[0].code, "INVALID_LANGUAGE");
    }

    #[test]
    fn test_list_sorted() {
        let temp = tempdir().unwrap();
        seed(
            temp.path(),
            r#"{"b_en_fr": "b-fr", "a_en_fr": "a-fr", "a_en_de": "a-de"}"#,
        );

        let set = run_list(&settings(temp.path()));
        let keys: Vec<_> = set
            .items
            .iter()
            .map(|i| {
                format!(
                    "{}/{}",
                    i.text.as_deref().unwrap(),
                    i.target.as_deref().unwrap()
                )
            })
            .collect();
        assert_eq!(keys, vec!["a/de", "a/fr", "b/fr"]);
    }

    #[test]
    fn test_stats_missing_document() {
        let temp = tempdir().unwrap();
        let set = run_stats(&settings(temp.path()));
        let data = set.items[0].data.as_ref().unwrap();
        assert_eq!(data["exists"], false);
        assert_eq!(data["entries"], 0);
        assert!(data["size_bytes"].is_null());
    }

    #[test]
    fn test_stats_existing_document() {
        let temp = tempdir().unwrap();
        seed(temp.path(), r#"{"Hello_en_es": "Hola"}"#);
        let set = run_stats(&settings(temp.path()));
        let data = set.items[0].data.as_ref().unwrap();
        assert_eq!(data["exists"], true);
        assert_eq!(data["entries"], 1);
        assert!(data["size_bytes"].as_u64().unwrap() > 0);
        assert!(data["path"]
            .as_str()
            .unwrap()
            .ends_with("translation_cache/translation_cache.json"));
    }

    #[test]
    fn test_clear_recovers_corrupt_document() {
        let temp = tempdir().unwrap();
        seed(temp.path(), "{ not json");
        let settings = settings(temp.path());

        assert_eq!(run_list(&settings).items[0].errors[0].code, "CACHE_LOAD");

        let set = run_clear(&settings);
        let data = set.items[0].data.as_ref().unwrap();
        assert_eq!(data["cleared"], true);
        assert!(data["removed"].is_null());

        assert!(run_list(&settings).is_empty());
    }

    #[test]
    fn test_clear_reports_removed_count() {
        let temp = tempdir().unwrap();
        seed(temp.path(), r#"{"a_en_fr": "x", "b_en_fr": "y"}"#);
        let set = run_clear(&settings(temp.path()));
        assert_eq!(set.items[0].data.as_ref().unwrap()["removed"], 2);
    }
}
