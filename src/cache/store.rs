//! Cache store - Read/write the translation cache document
//!
//! The whole mapping lives in memory and is written through to disk after
//! every insertion. Writers hold an advisory lock on a sibling lock file,
//! fold in whatever other processes persisted since this store was loaded,
//! then write a temporary file that is renamed over the document. A crash
//! mid-write leaves the previous snapshot intact, and concurrent runs never
//! drop each other's entries.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs4::fs_std::FileExt;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cache::key::CacheKey;
use crate::core::paths::{cache_file, lock_file};

/// Cache errors
#[derive(Debug, Error)]
pub enum CacheError {
    /// The document exists but could not be read or parsed
    #[error("cannot load translation cache {}: {}", .path.display(), .reason)]
    Load { path: PathBuf, reason: String },

    /// The document could not be written; the in-memory mapping is unaffected
    #[error("cannot persist translation cache {}: {}", .path.display(), .source)]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CacheError {
    /// Stable code used in rendered output
    pub fn code(&self) -> &'static str {
        match self {
            CacheError::Load { .. } => "CACHE_LOAD",
            CacheError::Persist { .. } => "CACHE_PERSIST",
        }
    }
}

/// Write-through key/value store backed by a single JSON document
#[derive(Debug)]
pub struct CacheStore {
    dir: PathBuf,
    path: PathBuf,
    entries: HashMap<CacheKey, String>,
    /// Keys written by this store and not yet on disk
    pending: HashSet<CacheKey>,
}

impl CacheStore {
    fn empty(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            path: cache_file(dir),
            entries: HashMap::new(),
            pending: HashSet::new(),
        }
    }

    /// Load the cache document from a cache directory.
    ///
    /// A missing document yields an empty store. A document that cannot be
    /// read, is not a flat object of strings, or holds a malformed key is an
    /// error: the file is left untouched for the user to inspect or clear.
    pub fn load(dir: &Path) -> Result<Self, CacheError> {
        let mut store = Self::empty(dir);
        match read_document(&store.path)? {
            Some(entries) => store.entries = entries,
            None => {
                debug!(path = %store.path.display(), "no cache file, starting empty");
                return Ok(store);
            }
        }

        info!(
            path = %store.path.display(),
            entries = store.entries.len(),
            "loaded translation cache"
        );
        Ok(store)
    }

    /// Replace whatever is on disk with an empty document, without reading it
    pub fn reset(dir: &Path) -> Result<Self, CacheError> {
        let store = Self::empty(dir);
        let _lock = lock_dir(&store.dir).map_err(|source| store.persist_error(source))?;
        write_atomic(&store.dir, &store.path, &store.to_document())
            .map_err(|source| store.persist_error(source))?;
        info!(path = %store.path.display(), "cleared translation cache");
        Ok(store)
    }

    /// Path of the backing document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a stored translation
    pub fn get(&self, key: &CacheKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Insert or overwrite an entry, then persist the full mapping.
    ///
    /// On a persistence failure the entry stays in memory and the error is
    /// returned so the caller can warn or retry with [`CacheStore::flush`].
    pub fn put(&mut self, key: CacheKey, value: String) -> Result<(), CacheError> {
        debug!(key = %key, "caching translation");
        self.pending.insert(key.clone());
        self.entries.insert(key, value);
        self.flush()
    }

    /// Merge with the current document and write the result to disk.
    ///
    /// Entries written by this store win over the document; everything else
    /// is taken from the document, so entries persisted by other processes
    /// are kept and picked up in memory.
    pub fn flush(&mut self) -> Result<(), CacheError> {
        let _lock = lock_dir(&self.dir).map_err(|source| self.persist_error(source))?;

        if let Some(mut on_disk) = read_document(&self.path)? {
            for key in &self.pending {
                if let Some(value) = self.entries.get(key) {
                    on_disk.insert(key.clone(), value.clone());
                }
            }
            self.entries = on_disk;
        }

        write_atomic(&self.dir, &self.path, &self.to_document())
            .map_err(|source| self.persist_error(source))?;
        self.pending.clear();
        Ok(())
    }

    /// All entries, ordered by text, then source, then target
    pub fn entries(&self) -> Vec<(&CacheKey, &str)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(key, value)| (key, value.as_str()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist_error(&self, source: io::Error) -> CacheError {
        warn!(path = %self.path.display(), error = %source, "cache write failed");
        CacheError::Persist {
            path: self.path.clone(),
            source,
        }
    }

    /// Serialize as a flat, key-sorted, two-space indented JSON object
    fn to_document(&self) -> String {
        let sorted: BTreeMap<String, &str> = self
            .entries
            .iter()
            .map(|(key, value)| (key.encode(), value.as_str()))
            .collect();
        // A map of strings always serializes
        let mut json = serde_json::to_string_pretty(&sorted).unwrap_or_else(|_| "{}".to_string());
        json.push('\n');
        json
    }
}

/// Parse the document at `path`; `None` when it does not exist
fn read_document(path: &Path) -> Result<Option<HashMap<CacheKey, String>>, CacheError> {
    let load_error = |reason: String| CacheError::Load {
        path: path.to_path_buf(),
        reason,
    };

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(load_error(e.to_string())),
    };

    let raw: HashMap<String, String> =
        serde_json::from_str(&content).map_err(|e| load_error(e.to_string()))?;

    let mut entries = HashMap::with_capacity(raw.len());
    for (encoded, value) in raw {
        let key = encoded
            .parse::<CacheKey>()
            .map_err(|e| load_error(e.to_string()))?;
        entries.insert(key, value);
    }
    Ok(Some(entries))
}

/// Take the exclusive writer lock for a cache directory, creating it if needed.
///
/// The lock is released when the returned file is dropped.
fn lock_dir(dir: &Path) -> io::Result<File> {
    fs::create_dir_all(dir)?;
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(lock_file(dir))?;
    FileExt::lock_exclusive(&file)?;
    Ok(file)
}

/// Replace `path` with `contents` via a rename from a temp file in `dir`
fn write_atomic(dir: &Path, path: &Path, contents: &str) -> io::Result<()> {
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
