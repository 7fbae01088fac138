//! times/record — одна отслеживаемая запись (FileTime) и её проверка.
//!
//! Порядок проверки (первое сработавшее правило побеждает):
//! 1. lstat: отсутствует, а запись говорит exists      -> MissingExact
//! 2. stat: отсутствует, а запись говорит exists       -> MissingFollowing
//! 3. lstat/stat вернули иную ошибку                   -> Probe (как есть)
//! 4. запись !exists, а путь теперь есть               -> Appeared
//! 5. оба живых времени != записанного                 -> Changed
//! 6. иначе                                            -> свежо
//!
//! Правило 5 намеренно мягкое: совпадения любого из двух времён достаточно.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{FtError, FtResult};
use crate::metrics::{record_check, record_probe_error, record_stale};
use crate::probe::{probe_exact, probe_following, Probe};
use crate::util::{relative_to, render_unix_secs};

/// Placeholder when a modification time cannot be rendered.
pub const UNRENDERABLE_TIME: &str = "<<???>>";

/// Last-known state of one tracked path.
///
/// JSON field names follow the `DIRENV_WATCHES` payload format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTime {
    #[serde(rename = "Path")]
    pub path: PathBuf,
    #[serde(rename = "Modtime")]
    pub modtime: i64,
    #[serde(rename = "Exists")]
    pub exists: bool,
}

impl FileTime {
    pub fn new(path: PathBuf, modtime: i64, exists: bool) -> Self {
        Self { path, modtime, exists }
    }

    /// Check this record against the live filesystem.
    pub fn check(&self) -> FtResult<()> {
        record_check();
        let stat = probe_following(&self.path);
        let lstat = probe_exact(&self.path);
        let res = self.verdict(stat, lstat);
        match &res {
            Err(FtError::Probe(_)) => record_probe_error(),
            Err(e) if e.is_stale() => record_stale(),
            _ => {}
        }
        res
    }

    /// Pure decision over already-taken probes.
    pub(crate) fn verdict(
        &self,
        stat: io::Result<Probe>,
        lstat: io::Result<Probe>,
    ) -> FtResult<()> {
        let path = &self.path;

        if matches!(&lstat, Ok(p) if !p.exists) && self.exists {
            debug!("Lstat Check: {}: gone", path.display());
            return Err(FtError::MissingExact(path.clone()));
        }
        if matches!(&stat, Ok(p) if !p.exists) && self.exists {
            debug!("Stat Check: {}: gone", path.display());
            return Err(FtError::MissingFollowing(path.clone()));
        }

        let lstat = match lstat {
            Ok(p) => p,
            Err(e) => {
                debug!("Lstat Check: {}: ERR: {}", path.display(), e);
                return Err(FtError::Probe(e));
            }
        };
        let stat = match stat {
            Ok(p) => p,
            Err(e) => {
                debug!("Stat Check: {}: ERR: {}", path.display(), e);
                return Err(FtError::Probe(e));
            }
        };

        if !self.exists {
            if stat.exists || lstat.exists {
                debug!("Check: {}: appeared", path.display());
                return Err(FtError::Appeared(path.clone()));
            }
            debug!("Check: {}: still absent", path.display());
            return Ok(());
        }

        if stat.mtime != self.modtime && lstat.mtime != self.modtime {
            debug!(
                "Check: {}: stale (stat: {}, lstat: {}, lastcheck: {})",
                path.display(),
                stat.mtime,
                lstat.mtime,
                self.modtime
            );
            return Err(FtError::Changed(path.clone()));
        }

        debug!("Check: {}: up to date", path.display());
        Ok(())
    }

    /// Diagnostic rendering: `"<path relative to rel_dir>" - <RFC3339 mtime>`.
    pub fn formatted(&self, rel_dir: &Path) -> String {
        let time = render_unix_secs(self.modtime)
            .unwrap_or_else(|| UNRENDERABLE_TIME.to_string());
        let path = relative_to(&self.path, rel_dir).unwrap_or_else(|| self.path.clone());
        format!("{:?} - {}", path.display().to_string(), time)
    }
}

impl fmt::Display for FileTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (modtime={}, exists={})",
            self.path.display(),
            self.modtime,
            self.exists
        )
    }
}
