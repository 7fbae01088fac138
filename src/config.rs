//! Centralized configuration and builder for FileTimes.
//!
//! Goals:
//! - Single place to collect tunables instead of scattering env lookups.
//! - FtConfig::from_env() reads FT_* variables; builder overrides on top.
//!
//! Variables:
//! - FT_WATCHES_VAR  — имя переменной окружения со снимком (default DIRENV_WATCHES)
//! - FT_COMPRESSION  — уровень zlib 0..=9 (default 6, больше 9 обрезается)
//! - FT_REL_DIR      — каталог, относительно которого печатаются пути в `list`

use std::fmt;
use std::path::PathBuf;

use crate::gzenv::DEFAULT_LEVEL;

pub const DEFAULT_WATCHES_VAR: &str = "DIRENV_WATCHES";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FtConfig {
    /// Env var holding the marshaled snapshot.
    /// Env: FT_WATCHES_VAR (default DIRENV_WATCHES)
    pub watches_var: String,

    /// zlib compression level for marshal.
    /// Env: FT_COMPRESSION (default 6)
    pub compression_level: u32,

    /// Reference directory for formatted output (None => current dir).
    /// Env: FT_REL_DIR
    pub rel_dir: Option<PathBuf>,
}

impl Default for FtConfig {
    fn default() -> Self {
        Self {
            watches_var: DEFAULT_WATCHES_VAR.to_string(),
            compression_level: DEFAULT_LEVEL,
            rel_dir: None,
        }
    }
}

impl FtConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("FT_WATCHES_VAR") {
            let s = v.trim();
            if !s.is_empty() {
                cfg.watches_var = s.to_string();
            }
        }

        if let Ok(v) = std::env::var("FT_COMPRESSION") {
            if let Ok(n) = v.trim().parse::<u32>() {
                cfg.compression_level = n.min(9);
            }
        }

        if let Ok(v) = std::env::var("FT_REL_DIR") {
            let s = v.trim();
            if !s.is_empty() {
                cfg.rel_dir = Some(PathBuf::from(s));
            }
        }

        cfg
    }

    pub fn with_watches_var<S: Into<String>>(mut self, name: S) -> Self {
        self.watches_var = name.into();
        self
    }

    pub fn with_compression_level(mut self, level: u32) -> Self {
        self.compression_level = level.min(9);
        self
    }

    pub fn with_rel_dir<P: Into<PathBuf>>(mut self, dir: Option<P>) -> Self {
        self.rel_dir = dir.map(Into::into);
        self
    }

    /// Marshaled snapshot currently stored in `watches_var`, if any.
    pub fn watches_from_env(&self) -> Option<String> {
        std::env::var(&self.watches_var)
            .ok()
            .filter(|s| !s.trim().is_empty())
    }

    /// Resolved reference directory for formatted output.
    pub fn rel_dir_or_cwd(&self) -> std::io::Result<PathBuf> {
        match &self.rel_dir {
            Some(p) => Ok(p.clone()),
            None => std::env::current_dir(),
        }
    }
}

impl fmt::Display for FtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FtConfig {{ watches_var: {}, compression_level: {}, rel_dir: {} }}",
            self.watches_var,
            self.compression_level,
            self.rel_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "default(cwd)".to_string()),
        )
    }
}

/// Builder that produces an FtConfig.
#[derive(Clone, Debug)]
pub struct FtConfigBuilder {
    cfg: FtConfig,
}

impl Default for FtConfigBuilder {
    fn default() -> Self {
        // Start from env, then allow overrides.
        Self {
            cfg: FtConfig::from_env(),
        }
    }
}

impl FtConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a clean default (without reading env).
    pub fn from_default() -> Self {
        Self {
            cfg: FtConfig::default(),
        }
    }

    pub fn watches_var<S: Into<String>>(mut self, name: S) -> Self {
        self.cfg.watches_var = name.into();
        self
    }

    pub fn compression_level(mut self, level: u32) -> Self {
        self.cfg.compression_level = level.min(9);
        self
    }

    pub fn rel_dir<P: Into<PathBuf>>(mut self, dir: Option<P>) -> Self {
        self.cfg.rel_dir = dir.map(Into::into);
        self
    }

    pub fn build(self) -> FtConfig {
        self.cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = FtConfigBuilder::from_default().build();
        assert_eq!(cfg.watches_var, "DIRENV_WATCHES");
        assert_eq!(cfg.compression_level, 6);
        assert!(cfg.rel_dir.is_none());
        assert!(cfg.to_string().contains("default(cwd)"));
    }

    #[test]
    fn builder_overrides_and_clamps() {
        let cfg = FtConfigBuilder::from_default()
            .watches_var("MY_WATCHES")
            .compression_level(42)
            .rel_dir(Some("/srv"))
            .build();
        assert_eq!(cfg.watches_var, "MY_WATCHES");
        assert_eq!(cfg.compression_level, 9);
        assert_eq!(cfg.rel_dir, Some(PathBuf::from("/srv")));

        let cfg2 = FtConfig::default()
            .with_watches_var("MY_WATCHES")
            .with_compression_level(42)
            .with_rel_dir(Some("/srv"));
        assert_eq!(cfg, cfg2);
    }
}
