//! times/store — FileTimes: упорядоченный набор записей, ключ — нормализованный путь.
//!
//! IndexMap даёт сразу две вещи: уникальность ключа (upsert перезаписывает запись
//! на её прежнем месте) и стабильный порядок вставки для вывода.

use indexmap::IndexMap;
use log::debug;
use std::path::{Path, PathBuf};

use crate::error::{FtError, FtResult};
use crate::gzenv;
use crate::metrics::record_update;
use crate::probe::{probe_exact, probe_following};
use crate::util::normalize_path;

use super::record::FileTime;

/// Normalized key; non-UTF-8 paths are refused before the store is touched,
/// since the JSON payload cannot carry them.
fn store_key(path: &Path) -> FtResult<PathBuf> {
    let key = normalize_path(path)?;
    if key.to_str().is_none() {
        return Err(FtError::NonUtf8Path(key));
    }
    Ok(key)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileTimes {
    list: IndexMap<PathBuf, FileTime>,
}

impl FileTimes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &FileTime> {
        self.list.values()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.list.keys().map(|p| p.as_path())
    }

    /// Lookup by (normalized) path.
    pub fn get(&self, path: &Path) -> FtResult<Option<&FileTime>> {
        let key = normalize_path(path)?;
        Ok(self.list.get(&key))
    }

    /// Record the live state of `path`.
    ///
    /// exists = присутствует хотя бы по одному из stat/lstat;
    /// modtime = новейшее из времён тех проб, что путь видят.
    pub fn update(&mut self, path: &Path) -> FtResult<()> {
        let key = store_key(path)?;
        let stat = probe_following(path)?;
        let lstat = probe_exact(path)?;

        let exists = stat.exists || lstat.exists;
        let modtime = [stat, lstat]
            .iter()
            .filter(|p| p.exists)
            .map(|p| p.mtime)
            .max()
            .unwrap_or(0);

        debug!(
            "Update: {}: modtime={} exists={} (stat: {}, lstat: {})",
            path.display(),
            modtime,
            exists,
            stat.mtime,
            lstat.mtime
        );
        record_update();
        self.insert(FileTime::new(key, modtime, exists));
        Ok(())
    }

    /// Upsert an already-computed state under the normalized form of `path`.
    pub fn new_time(&mut self, path: &Path, modtime: i64, exists: bool) -> FtResult<()> {
        let key = store_key(path)?;
        self.insert(FileTime::new(key, modtime, exists));
        Ok(())
    }

    fn insert(&mut self, rec: FileTime) {
        match self.list.get_mut(&rec.path) {
            Some(slot) => {
                slot.modtime = rec.modtime;
                slot.exists = rec.exists;
            }
            None => {
                self.list.insert(rec.path.clone(), rec);
            }
        }
    }

    /// Check every record; first failure wins. An empty set is itself stale.
    pub fn check(&self) -> FtResult<()> {
        if self.list.is_empty() {
            debug!("Check: times list is empty");
            return Err(FtError::EmptySnapshot);
        }
        for rec in self.list.values() {
            rec.check()?;
        }
        Ok(())
    }

    /// Check only the record for `path`.
    pub fn check_one(&self, path: &Path) -> FtResult<()> {
        let key = normalize_path(path)?;
        match self.list.get(&key) {
            Some(rec) => rec.check(),
            None => {
                debug!("CheckOne: {}: unknown", key.display());
                Err(FtError::UnknownPath(key))
            }
        }
    }

    pub fn marshal(&self) -> FtResult<String> {
        self.marshal_with_level(gzenv::DEFAULT_LEVEL)
    }

    pub fn marshal_with_level(&self, level: u32) -> FtResult<String> {
        let records: Vec<&FileTime> = self.list.values().collect();
        gzenv::marshal_with_level(&records, level)
    }

    /// Decode a marshaled snapshot. Duplicate paths collapse (last value wins).
    pub fn unmarshal(s: &str) -> FtResult<Self> {
        let records: Vec<FileTime> = gzenv::unmarshal(s)?;
        let mut times = Self::new();
        for rec in records {
            times.insert(rec);
        }
        Ok(times)
    }
}

impl<'a> IntoIterator for &'a FileTimes {
    type Item = &'a FileTime;
    type IntoIter = indexmap::map::Values<'a, PathBuf, FileTime>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.values()
    }
}
