use crate::error::DatasetError;
use crate::loader::load_sales;
use core_types::PreparedSale;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

/// A prepared table is keyed by the source file and its modification time,
/// so editing the file invalidates the cached entry.
type CacheKey = (PathBuf, SystemTime);

/// Session cache for prepared tables.
///
/// The table for a given file is built once and shared; concurrent callers
/// serialize on the inner mutex, so the load runs at most once per key.
/// A stale entry (older mtime for the same path) is evicted on the next
/// lookup.
#[derive(Debug, Default)]
pub struct DatasetCache {
    inner: Mutex<HashMap<CacheKey, Arc<Vec<PreparedSale>>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the prepared table for `path`, loading it on first access or
    /// after the file has changed.
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<Vec<PreparedSale>>, DatasetError> {
        let modified = std::fs::metadata(path)
            .and_then(|m| m.modified())
            .map_err(|source| DatasetError::Io {
                path: path.display().to_string(),
                source,
            })?;
        let key = (path.to_path_buf(), modified);

        // The lock is held across the load on purpose: it is the
        // populate-once guard for concurrent sessions.
        let mut entries = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(table) = entries.get(&key) {
            return Ok(Arc::clone(table));
        }

        // Evict stale entries for the same path before inserting.
        entries.retain(|(cached_path, _), _| cached_path.as_path() != path);

        tracing::info!(path = %path.display(), "Loading sales dataset");
        let table = Arc::new(load_sales(path)?);
        entries.insert(key, Arc::clone(&table));
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE_CSV: &str = "\
order_id,order_date,customer,product,category,region,quantity,price,revenue,profit
ORD-001,2025-01-01,Cliente A,Produto X,Cat A,Norte,2,100.0,200.0,40.0
";

    #[test]
    fn second_lookup_hits_the_cache() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_CSV.as_bytes()).unwrap();

        let cache = DatasetCache::new();
        let first = cache.get_or_load(file.path()).unwrap();
        let second = cache.get_or_load(file.path()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn modified_file_is_reloaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_CSV.as_bytes()).unwrap();

        let cache = DatasetCache::new();
        let first = cache.get_or_load(file.path()).unwrap();
        assert_eq!(first.len(), 1);

        // Append a row and push the mtime forward so the key changes.
        file.write_all(
            b"ORD-002,2025-01-02,Cliente B,Produto Y,Cat B,Sul,1,200.0,200.0,50.0\n",
        )
        .unwrap();
        file.flush().unwrap();
        let later = SystemTime::now() + std::time::Duration::from_secs(2);
        file.as_file().set_modified(later).unwrap();

        let second = cache.get_or_load(file.path()).unwrap();
        assert_eq!(second.len(), 2);
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn missing_file_is_an_error() {
        let cache = DatasetCache::new();
        let err = cache.get_or_load(Path::new("nope.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }
}
