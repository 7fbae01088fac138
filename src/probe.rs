//! probe — тонкая обёртка над stat/lstat.
//!
//! - probe_following(): stat, идёт по симлинкам до конечной цели;
//! - probe_exact(): lstat, смотрит на сам путь (терминальный симлинк не разыменовывается).
//!
//! NotFound — это не ошибка, а подтверждённое отсутствие (`Probe::absent()`).
//! Любая другая io::Error возвращается как есть.

use std::fs::{self, Metadata};
use std::io;
use std::path::Path;

use crate::util::unix_secs;

/// Result of one filesystem inspection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Probe {
    /// Modification time in Unix seconds (0 when absent).
    pub mtime: i64,
    pub exists: bool,
}

impl Probe {
    pub fn absent() -> Self {
        Self { mtime: 0, exists: false }
    }

    fn from_metadata(md: &Metadata) -> io::Result<Self> {
        Ok(Self {
            mtime: unix_secs(md.modified()?),
            exists: true,
        })
    }
}

fn probe_with(res: io::Result<Metadata>) -> io::Result<Probe> {
    match res {
        Ok(md) => Probe::from_metadata(&md),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Probe::absent()),
        Err(e) => Err(e),
    }
}

/// stat(2): follows symlinks.
pub fn probe_following(path: &Path) -> io::Result<Probe> {
    probe_with(fs::metadata(path))
}

/// lstat(2): inspects the link itself.
pub fn probe_exact(path: &Path) -> io::Result<Probe> {
    probe_with(fs::symlink_metadata(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_is_absent_not_error() {
        let p = std::env::temp_dir().join(format!(
            "ft-probe-missing-{}-{}",
            std::process::id(),
            line!()
        ));
        assert_eq!(probe_following(&p).unwrap(), Probe::absent());
        assert_eq!(probe_exact(&p).unwrap(), Probe::absent());
    }

    #[test]
    fn existing_dir_is_present() {
        let p = std::env::temp_dir();
        let a = probe_following(&p).unwrap();
        let b = probe_exact(&p).unwrap();
        assert!(a.exists && b.exists);
    }
}
