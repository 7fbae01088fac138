//! cli — хост-команды поверх FileTimes.
//!
//! - watch: добавить/обновить пути в снимке и напечатать marshaled-строку;
//! - check: проверить весь снимок (или один путь), ненулевой код при "stale";
//! - list:  человекочитаемый (или JSON) список записей.
//!
//! Снимок берётся из --from, иначе из переменной окружения cfg.watches_var,
//! иначе считается пустым.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::FtConfig;
use crate::error::FtError;
use crate::metrics::{self, MetricsSnapshot};
use crate::times::{FileTime, FileTimes};

#[derive(Parser, Debug)]
#[command(
    name = "filewatches",
    version,
    about = "Snapshot path modification times and detect staleness",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Record the current state of PATHs and print the marshaled snapshot
    Watch {
        /// Marshaled snapshot to extend (default: value of the watches env var)
        #[arg(long)]
        from: Option<String>,
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Check whether anything in the snapshot changed
    Check {
        #[arg(long)]
        from: Option<String>,
        /// Check a single recorded path instead of the whole snapshot
        #[arg(long)]
        path: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Print recorded paths with their modification times
    List {
        #[arg(long)]
        from: Option<String>,
        /// Print paths relative to this directory (default: FT_REL_DIR or cwd)
        #[arg(long)]
        rel_dir: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
}

/// Outcome of `check`, as printed with `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub fresh: bool,
    pub reason: Option<String>,
    pub message: Option<String>,
    pub path: Option<PathBuf>,
    pub metrics: MetricsSnapshot,
}

impl CheckReport {
    fn fresh() -> Self {
        Self {
            fresh: true,
            reason: None,
            message: None,
            path: None,
            metrics: metrics::snapshot(),
        }
    }

    fn stale(e: &FtError) -> Self {
        Self {
            fresh: false,
            reason: Some(e.reason().to_string()),
            message: Some(e.to_string()),
            path: e.path().map(Path::to_path_buf),
            metrics: metrics::snapshot(),
        }
    }
}

/// Snapshot source: explicit string, then env var, then empty.
pub fn load_times(cfg: &FtConfig, from: Option<&str>) -> Result<FileTimes> {
    let raw = match from {
        Some(s) => Some(s.to_string()),
        None => cfg.watches_from_env(),
    };
    match raw {
        Some(s) => FileTimes::unmarshal(&s).context("load snapshot"),
        None => {
            debug!("no snapshot in --from or ${}, starting empty", cfg.watches_var);
            Ok(FileTimes::new())
        }
    }
}

pub fn cmd_watch(cfg: &FtConfig, from: Option<&str>, paths: &[PathBuf]) -> Result<String> {
    let mut times = load_times(cfg, from)?;
    for p in paths {
        times
            .update(p)
            .with_context(|| format!("watch {}", p.display()))?;
    }
    info!("watch: {} path(s) tracked", times.len());
    Ok(times.marshal_with_level(cfg.compression_level)?)
}

/// Staleness and unknown-path verdicts become a report; probe/decode errors stay errors.
pub fn cmd_check(cfg: &FtConfig, from: Option<&str>, path: Option<&Path>) -> Result<CheckReport> {
    let times = load_times(cfg, from)?;
    let res = match path {
        Some(p) => times.check_one(p),
        None => times.check(),
    };
    match res {
        Ok(()) => Ok(CheckReport::fresh()),
        Err(e) if e.is_stale() || matches!(e, FtError::UnknownPath(_)) => {
            debug!("check: {}", e);
            Ok(CheckReport::stale(&e))
        }
        Err(e) => Err(anyhow::Error::new(e).context("check snapshot")),
    }
}

pub fn cmd_list(
    cfg: &FtConfig,
    from: Option<&str>,
    rel_dir: Option<&Path>,
    json: bool,
) -> Result<String> {
    let times = load_times(cfg, from)?;
    if json {
        let recs: Vec<&FileTime> = times.iter().collect();
        return Ok(serde_json::to_string_pretty(&recs)?);
    }
    let base = match rel_dir {
        Some(d) => d.to_path_buf(),
        None => cfg.rel_dir_or_cwd().context("resolve reference directory")?,
    };
    let lines: Vec<String> = times.iter().map(|r| r.formatted(&base)).collect();
    Ok(lines.join("\n"))
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let cfg = FtConfig::from_env();
    debug!("{}", cfg);

    match cli.cmd {
        Cmd::Watch { from, paths } => {
            println!("{}", cmd_watch(&cfg, from.as_deref(), &paths)?);
        }
        Cmd::Check { from, path, json } => {
            let report = cmd_check(&cfg, from.as_deref(), path.as_deref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if report.fresh {
                println!("fresh");
            }
            if !report.fresh {
                return Err(anyhow!(
                    "{}",
                    report.message.unwrap_or_else(|| "stale".to_string())
                ));
            }
        }
        Cmd::List { from, rel_dir, json } => {
            let out = cmd_list(&cfg, from.as_deref(), rel_dir.as_deref(), json)?;
            if !out.is_empty() {
                println!("{}", out);
            }
        }
    }
    Ok(())
}
