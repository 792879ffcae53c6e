use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use anyhow::{Context, Result};

use super::loader;
use super::model::LimitDataset;
use crate::config::ColumnConfig;

// ---------------------------------------------------------------------------
// Dataset cache
// ---------------------------------------------------------------------------

/// Caches the loaded limits table keyed by source path and modification time.
///
/// The table is loaded once per (path, mtime) and then treated as immutable:
/// every recomputation of the filter/aggregate pipeline reads the same
/// `Arc<LimitDataset>`.  A changed path or a touched file invalidates the
/// entry on the next access.
#[derive(Default)]
pub struct DatasetCache {
    entry: Option<CacheEntry>,
}

struct CacheEntry {
    path: PathBuf,
    mtime: SystemTime,
    dataset: Arc<LimitDataset>,
}

impl DatasetCache {
    /// Return the cached dataset for `path`, loading it if the cache is empty
    /// or stale.  Load failures leave the previous entry untouched.
    pub fn get_or_load(
        &mut self,
        path: &Path,
        columns: &ColumnConfig,
    ) -> Result<Arc<LimitDataset>> {
        let mtime = std::fs::metadata(path)
            .and_then(|m| m.modified())
            .with_context(|| format!("reading metadata of {}", path.display()))?;

        match &self.entry {
            Some(e) if e.path == path && e.mtime == mtime => {
                log::debug!("cache hit for {}", path.display());
                Ok(Arc::clone(&e.dataset))
            }
            _ => {
                let dataset = Arc::new(loader::load_file(path, columns)?);
                log::info!(
                    "loaded {} rows ({} bases, {} variables) from {}",
                    dataset.len(),
                    dataset.bases.len(),
                    dataset.variables.len(),
                    path.display()
                );
                self.entry = Some(CacheEntry {
                    path: path.to_path_buf(),
                    mtime,
                    dataset: Arc::clone(&dataset),
                });
                Ok(dataset)
            }
        }
    }

    /// Drop the cached entry; the next access re-reads from disk.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV: &str = "Base,Variable,LIC,LSC\nFVT1,p1,10.0,20.0\n";

    fn write_csv(path: &Path, content: &str) {
        let mut f = std::fs::File::create(path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn repeated_access_reuses_the_same_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("limits.csv");
        write_csv(&path, CSV);

        let mut cache = DatasetCache::default();
        let columns = ColumnConfig::default();
        let a = cache.get_or_load(&path, &columns).unwrap();
        let b = cache.get_or_load(&path, &columns).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn invalidate_forces_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("limits.csv");
        write_csv(&path, CSV);

        let mut cache = DatasetCache::default();
        let columns = ColumnConfig::default();
        let a = cache.get_or_load(&path, &columns).unwrap();
        cache.invalidate();
        let b = cache.get_or_load(&path, &columns).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a.len(), b.len());
    }

    #[test]
    fn changed_path_loads_the_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.csv");
        let second = dir.path().join("b.csv");
        write_csv(&first, CSV);
        write_csv(
            &second,
            "Base,Variable,LIC,LSC\nFVT1,p1,10.0,20.0\nFVT2,p2,11.0,21.0\n",
        );

        let mut cache = DatasetCache::default();
        let columns = ColumnConfig::default();
        assert_eq!(cache.get_or_load(&first, &columns).unwrap().len(), 1);
        assert_eq!(cache.get_or_load(&second, &columns).unwrap().len(), 2);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = DatasetCache::default();
        assert!(cache
            .get_or_load(&dir.path().join("absent.csv"), &ColumnConfig::default())
            .is_err());
    }
}
