//! util — общие хелперы путей и времени.
//!
//! Содержит:
//! - normalize_path(): абсолютный путь + лексическая чистка `.`/`..` (без resolve симлинков).
//! - relative_to(): путь относительно каталога (для диагностики).
//! - unix_secs(): SystemTime -> Unix-секунды (i64, floor для времени до эпохи).
//! - render_unix_secs(): RFC3339 в локальной зоне, None если время не представимо.

use chrono::{DateTime, Datelike, Local, SecondsFormat};
use std::io;
use std::path::{Component, Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Absolute, lexically cleaned form of `path`.
///
/// Relative paths are joined onto the current directory. Symlinks are NOT
/// resolved: `/a/link/..` becomes `/a`.
pub fn normalize_path(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(clean_path(path));
    }
    let cwd = std::env::current_dir()?;
    Ok(clean_path(&cwd.join(path)))
}

/// Лексическая чистка: выкидываем `.`, схлопываем `..` (выше корня не поднимаемся).
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `/..` == `/`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(comp),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().map(|c| c.as_os_str()).collect()
}

/// `path` relative to `base`; None if no relative form exists.
pub fn relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    let base = normalize_path(base).ok()?;
    let rel = pathdiff::diff_paths(path, &base)?;
    if rel.is_absolute() {
        return None;
    }
    if rel.as_os_str().is_empty() {
        return Some(PathBuf::from("."));
    }
    Some(rel)
}

/// Unix-время в секундах; для моментов до эпохи округляем вниз.
pub fn unix_secs(t: SystemTime) -> i64 {
    match t.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs().min(i64::MAX as u64) as i64,
        Err(e) => {
            let d = e.duration();
            let secs = d.as_secs().min(i64::MAX as u64) as i64;
            if d.subsec_nanos() > 0 {
                -secs - 1
            } else {
                -secs
            }
        }
    }
}

/// RFC3339 rendering in local time. Years outside 0..=9999 are not representable.
pub fn render_unix_secs(secs: i64) -> Option<String> {
    let utc = DateTime::from_timestamp(secs, 0)?;
    let local = utc.with_timezone(&Local);
    if !(0..=9999).contains(&local.year()) {
        return None;
    }
    Some(local.to_rfc3339_opts(SecondsFormat::Secs, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn clean_collapses_dots() {
        assert_eq!(clean_path(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(clean_path(Path::new("/../x")), PathBuf::from("/x"));
        assert_eq!(clean_path(Path::new("/a/b/")), PathBuf::from("/a/b"));
        assert_eq!(clean_path(Path::new("a/../..")), PathBuf::from(".."));
        assert_eq!(clean_path(Path::new("./")), PathBuf::from("."));
    }

    #[test]
    fn normalize_makes_absolute() {
        let cwd = std::env::current_dir().unwrap();
        let got = normalize_path(Path::new("x/../y")).unwrap();
        assert!(got.is_absolute());
        assert_eq!(got, clean_path(&cwd.join("y")));
    }

    #[test]
    fn relative_paths() {
        assert_eq!(
            relative_to(Path::new("/a/b/c.txt"), Path::new("/a")),
            Some(PathBuf::from("b/c.txt"))
        );
        assert_eq!(
            relative_to(Path::new("/a/c.txt"), Path::new("/a/b")),
            Some(PathBuf::from("../c.txt"))
        );
        assert_eq!(relative_to(Path::new("/a"), Path::new("/a")), Some(PathBuf::from(".")));
    }

    #[test]
    fn unix_secs_floor() {
        assert_eq!(unix_secs(UNIX_EPOCH + Duration::from_millis(1500)), 1);
        assert_eq!(unix_secs(UNIX_EPOCH - Duration::from_millis(1500)), -2);
        assert_eq!(unix_secs(UNIX_EPOCH - Duration::from_secs(3)), -3);
    }

    #[test]
    fn render_range() {
        assert!(render_unix_secs(0).is_some());
        assert!(render_unix_secs(1_700_000_000).is_some());
        assert!(render_unix_secs(i64::MAX).is_none());
    }
}
