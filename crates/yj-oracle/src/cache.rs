//! Process-wide key/value cache for provider replies.
//!
//! Values are serialized replies. Stores only need atomic single-key
//! get and set; a key always maps to interchangeable content, so the last
//! write wins.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use yj_core::{Casting, Hexagram};

use crate::error::CacheResult;

/// Prefix for divination interpretation keys.
pub const DIVINATION_KEY_PREFIX: &str = "iching_div_v1_";

/// Prefix for library commentary keys.
pub const LIBRARY_KEY_PREFIX: &str = "iching_lib_v1_";

/// A string key/value store.
pub trait CacheStore: Send + Sync {
    /// Read the value for `key`, if any.
    fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> CacheResult<()>;
}

/// Cache key for a divination.
///
/// Built from the primary number, the relating number (0 when absent), the
/// six sums bottom first, and the trimmed question.
pub fn divination_key(
    question: &str,
    primary: &Hexagram,
    relating: Option<&Hexagram>,
    casting: &Casting,
) -> String {
    format!(
        "{DIVINATION_KEY_PREFIX}{}-{}-{}-{}",
        primary.number,
        relating.map_or(0, |h| h.number),
        casting.sum_signature(),
        question.trim()
    )
}

/// Cache key for a hexagram's library commentary.
pub fn library_key(hexagram: &Hexagram) -> String {
    format!("{LIBRARY_KEY_PREFIX}{}", hexagram.number)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// An in-memory store, lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        lock(&self.entries).is_empty()
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(lock(&self.entries).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> CacheResult<()> {
        lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A store persisted as one JSON object in a file.
///
/// Entries are loaded once when the store is opened. Every `set` rewrites
/// the file through a temporary sibling and a rename.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> CacheResult<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => HashMap::new(),
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &HashMap<String, String>) -> CacheResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl CacheStore for FileStore {
    fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(lock(&self.entries).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> CacheResult<()> {
        let mut entries = lock(&self.entries);
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use yj_core::LineValue::{OldYang, OldYin, YoungYang, YoungYin};
    use yj_core::resolve;

    #[test]
    fn divination_key_format() {
        let casting =
            Casting::from_values([YoungYang, YoungYin, OldYang, YoungYang, YoungYin, OldYin]);
        let r = resolve(&casting);
        let key = divination_key("  will it rain?  ", &r.primary, r.relating.as_ref(), &casting);
        assert_eq!(key, "iching_div_v1_51-30-789786-will it rain?");
    }

    #[test]
    fn divination_key_without_relating_uses_zero() {
        let casting = Casting::from_values([YoungYang; 6]);
        let r = resolve(&casting);
        let key = divination_key("q", &r.primary, None, &casting);
        assert_eq!(key, "iching_div_v1_1-0-777777-q");
    }

    #[test]
    fn library_key_format() {
        let h = yj_core::by_number(11).unwrap();
        assert_eq!(library_key(&h), "iching_lib_v1_11");
    }

    #[test]
    fn memory_store_get_set() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("a").unwrap(), None);
        store.set("a", "1").unwrap();
        store.set("a", "2").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn file_store_persists_across_opens() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("cache.json");
        {
            let store = FileStore::open(&path).unwrap();
            assert_eq!(store.get("k").unwrap(), None);
            store.set("k", "v").unwrap();
        }
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some("v"));
        assert_eq!(reopened.path(), path.as_path());
    }

    #[test]
    fn file_store_rejects_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, "not json").unwrap();
        assert!(FileStore::open(&path).is_err());
    }

    #[test]
    fn file_store_treats_empty_file_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, "").unwrap();
        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}
