//! error — типизированные ошибки FileTimes.
//!
//! Четыре класса:
//! - staleness: MissingExact / MissingFollowing / Appeared / Changed / EmptySnapshot
//!   (ожидаемый сигнал "пересчитать производное состояние");
//! - UnknownPath: check_one() по пути, который никогда не записывался;
//! - Decode / Encode: битая или несовместимая сериализованная строка;
//! - Probe: ошибка ФС (права, I/O, ...) — io::Error отдаётся как есть.

use std::io;
use std::path::{Path, PathBuf};

pub type FtResult<T> = std::result::Result<T, FtError>;

#[derive(Debug, thiserror::Error)]
pub enum FtError {
    #[error("File {0:?} is missing (lstat)")]
    MissingExact(PathBuf),

    #[error("File {0:?} is missing (stat)")]
    MissingFollowing(PathBuf),

    #[error("File {0:?} newly created")]
    Appeared(PathBuf),

    #[error("File {0:?} has changed")]
    Changed(PathBuf),

    #[error("Times list is empty")]
    EmptySnapshot,

    #[error("File {0:?} is unknown")]
    UnknownPath(PathBuf),

    /// Путь не UTF-8: такую запись нельзя сериализовать.
    #[error("path {0:?} is not valid UTF-8")]
    NonUtf8Path(PathBuf),

    #[error("decode snapshot: {0}")]
    Decode(String),

    #[error("encode snapshot: {0}")]
    Encode(String),

    #[error(transparent)]
    Probe(#[from] io::Error),
}

impl FtError {
    /// True for verdicts meaning "the snapshot no longer matches the filesystem".
    pub fn is_stale(&self) -> bool {
        matches!(
            self,
            FtError::MissingExact(_)
                | FtError::MissingFollowing(_)
                | FtError::Appeared(_)
                | FtError::Changed(_)
                | FtError::EmptySnapshot
        )
    }

    /// Offending path, if the error carries one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            FtError::MissingExact(p)
            | FtError::MissingFollowing(p)
            | FtError::Appeared(p)
            | FtError::Changed(p)
            | FtError::UnknownPath(p)
            | FtError::NonUtf8Path(p) => Some(p.as_path()),
            _ => None,
        }
    }

    /// Short machine-friendly reason (used by `check --json`).
    pub fn reason(&self) -> &'static str {
        match self {
            FtError::MissingExact(_) | FtError::MissingFollowing(_) => "missing",
            FtError::Appeared(_) => "appeared",
            FtError::Changed(_) => "changed",
            FtError::EmptySnapshot => "empty",
            FtError::UnknownPath(_) => "unknown",
            FtError::NonUtf8Path(_) => "non-utf8",
            FtError::Decode(_) => "decode",
            FtError::Encode(_) => "encode",
            FtError::Probe(_) => "probe",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_classification() {
        let p = PathBuf::from("/tmp/x");
        assert!(FtError::MissingExact(p.clone()).is_stale());
        assert!(FtError::MissingFollowing(p.clone()).is_stale());
        assert!(FtError::Appeared(p.clone()).is_stale());
        assert!(FtError::Changed(p.clone()).is_stale());
        assert!(FtError::EmptySnapshot.is_stale());

        assert!(!FtError::UnknownPath(p.clone()).is_stale());
        assert!(!FtError::NonUtf8Path(p).is_stale());
        assert!(!FtError::Decode("bad".into()).is_stale());
        let io = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        assert!(!FtError::Probe(io).is_stale());
    }

    #[test]
    fn probe_error_is_transparent() {
        let io = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        let e: FtError = io.into();
        assert_eq!(e.to_string(), "nope");
        match e {
            FtError::Probe(inner) => assert_eq!(inner.kind(), io::ErrorKind::PermissionDenied),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn messages_carry_path() {
        let e = FtError::Changed(PathBuf::from("/tmp/a"));
        assert_eq!(e.to_string(), "File \"/tmp/a\" has changed");
        assert_eq!(e.path(), Some(Path::new("/tmp/a")));
        assert_eq!(e.reason(), "changed");
        assert!(FtError::EmptySnapshot.path().is_none());
    }
}
