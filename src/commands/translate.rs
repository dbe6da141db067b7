//! Translate command

use std::io::BufRead;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use crate::cache::CacheStore;
use crate::commands::single_error;
use crate::config::Settings;
use crate::core::model::{LinguaError, Meta, Origin, ResultItem, ResultSet};
use crate::core::util::elapsed_ms;
use crate::translate::languages;
use crate::translate::{
    HttpProvider, TranslateError, TranslationProvider, TranslationRequest, TranslationWorker,
    Translator,
};

/// Gather request texts from arguments and, optionally, stdin lines
pub fn collect_inputs<R: BufRead>(texts: &[String], stdin: Option<R>) -> Result<Vec<String>> {
    let mut inputs: Vec<String> = texts.to_vec();
    if let Some(reader) = stdin {
        for line in reader.lines() {
            let line = line.context("Failed to read stdin")?;
            if !line.trim().is_empty() {
                inputs.push(line);
            }
        }
    }
    Ok(inputs)
}

/// Run the translate command
pub fn run_translate(
    settings: &Settings,
    inputs: &[String],
    from: &str,
    to: &str,
) -> Result<ResultSet> {
    let (source, target) = match (languages::resolve(from), languages::resolve(to)) {
        (Ok(source), Ok(target)) => (source, target),
        (Err(e), _) | (_, Err(e)) => return Ok(single_error(LinguaError::from(&e))),
    };

    if inputs.is_empty() {
        return Ok(single_error(LinguaError::from(&TranslateError::EmptyText)));
    }

    let store = match CacheStore::load(&settings.cache_dir) {
        Ok(store) => store,
        Err(e) => return Ok(single_error(LinguaError::from(&e))),
    };

    let provider = HttpProvider::new(settings.endpoint.clone(), settings.timeout);
    let provider_name = provider.name().to_string();
    info!(endpoint = provider.endpoint(), timeout = ?settings.timeout, "provider ready");

    let worker = TranslationWorker::spawn(Translator::new(store, provider))
        .context("Failed to start translation worker")?;

    let pending: Vec<_> = inputs
        .iter()
        .map(|text| {
            let started = Instant::now();
            let receiver = worker.submit(TranslationRequest::new(text.as_str(), source, target));
            (text, started, receiver)
        })
        .collect();

    let mut result_set = ResultSet::new();
    for (text, started, receiver) in pending {
        let reply = receiver.recv().unwrap_or(Err(TranslateError::WorkerGone));
        let text = text.trim();

        let item = match reply {
            Ok(translation) => {
                let meta = Meta {
                    duration_ms: Some(elapsed_ms(started)),
                    provider: (translation.origin == Origin::Provider)
                        .then(|| provider_name.clone()),
                };
                let item = ResultItem::translation(
                    text,
                    source,
                    target,
                    translation.text,
                    translation.origin,
                )
                .with_meta(meta);
                match &translation.persist_warning {
                    Some(warning) => item.with_warning(LinguaError::from(warning)),
                    None => item,
                }
            }
            Err(e) => ResultItem::error(LinguaError::from(&e)).with_request(text, source, target),
        };
        result_set.push(item);
    }

    worker.shutdown();
    Ok(result_set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn settings(root: PathBuf) -> Settings {
        // Nothing listens on the discard port, so misses fail fast
        Settings::new(
            root,
            None,
            "http://127.0.0.1:9".to_string(),
            2,
            "jsonl",
            false,
        )
        .unwrap()
    }

    #[test]
    fn test_collect_inputs_args_only() {
        let inputs = collect_inputs::<Cursor<&[u8]>>(&["Hello".to_string()], None).unwrap();
        assert_eq!(inputs, vec!["Hello"]);
    }

    #[test]
    fn test_collect_inputs_skips_blank_stdin_lines() {
        let stdin = Cursor::new("one\n\n  \ntwo\n".as_bytes());
        let inputs = collect_inputs(&["zero".to_string()], Some(stdin)).unwrap();
        assert_eq!(inputs, vec!["zero", "one", "two"]);
    }

    #[test]
    fn test_invalid_language_reported_before_cache_load() {
        let temp = tempdir().unwrap();
        let cache = temp.path().join("translation_cache");
        std::fs::create_dir_all(&cache).unwrap();
        std::fs::write(cache.join("translation_cache.json"), "corrupt").unwrap();

        let set = run_translate(
            &settings(temp.path().to_path_buf()),
            &["Hello".to_string()],
            "english",
            "klingon",
        )
        .unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.items[0].errors[0].code, "INVALID_LANGUAGE");
    }

    #[test]
    fn test_no_inputs_is_empty_text() {
        let temp = tempdir().unwrap();
        let set = run_translate(&settings(temp.path().to_path_buf()), &[], "en", "es").unwrap();
        assert_eq!(set.items[0].errors[0].code, "EMPTY_TEXT");
    }

    #[test]
    fn test_corrupt_cache_is_reported() {
        let temp = tempdir().unwrap();
        let cache = temp.path().join("translation_cache");
        std::fs::create_dir_all(&cache).unwrap();
        std::fs::write(cache.join("translation_cache.json"), "[1, 2").unwrap();

        let set = run_translate(
            &settings(temp.path().to_path_buf()),
            &["Hello".to_string()],
            "en",
            "es",
        )
        .unwrap();

        assert_eq!(set.items[0].errors[0].code, "CACHE_LOAD");
    }

    #[test]
    fn test_cached_entries_are_served_offline() {
        let temp = tempdir().unwrap();
        let cache = temp.path().join("translation_cache");
        std::fs::create_dir_all(&cache).unwrap();
        std::fs::write(
            cache.join("translation_cache.json"),
            r#"{"Hello_en_es": "Hola"}"#,
        )
        .unwrap();

        let set = run_translate(
            &settings(temp.path().to_path_buf()),
            &["  Hello ".to_string(), "Goodbye".to_string()],
            "English",
            "spanish",
        )
        .unwrap();

        assert_eq!(set.len(), 2);
        let hit = &set.items[0];
        assert_eq!(hit.translation.as_deref(), Some("Hola"));
        assert_eq!(hit.origin, Some(Origin::Cache));
        assert_eq!(hit.text.as_deref(), Some("Hello"));
        assert!(hit.meta.provider.is_none());

        let miss = &set.items[1];
        assert!(miss.is_error());
        assert_eq!(miss.errors[0].code, "TRANSLATION_FAILED");
        assert_eq!(miss.text.as_deref(), Some("Goodbye"));
        assert_eq!(miss.target.as_deref(), Some("es"));
    }
}
