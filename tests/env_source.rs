// tests/env_source.rs
//
// Снимок из переменной окружения. Отдельный тестовый бинарник с единственным
// тестом: set_var/remove_var не пересекаются с чтением env в других потоках.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;

use FileWatches::cli::{cmd_check, cmd_watch, load_times};
use FileWatches::config::FtConfigBuilder;

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let root = std::env::temp_dir().join(format!("fwtest-env-{prefix}-{pid}-{t}"));
    fs::create_dir_all(&root).unwrap();
    root
}

#[test]
fn snapshot_is_read_from_configured_env_var() -> Result<()> {
    let root = unique_root("watches");
    let a = root.join("a");
    fs::write(&a, b"1")?;
    let var = format!("FWTEST_WATCHES_{}", std::process::id());
    let cfg = FtConfigBuilder::from_default().watches_var(var.clone()).build();

    assert!(cfg.watches_from_env().is_none());
    assert!(load_times(&cfg, None)?.is_empty());

    let s = cmd_watch(&cfg, None, &[a.clone()])?;
    std::env::set_var(&var, format!("  {s}\n"));

    assert_eq!(cfg.watches_from_env().as_deref().map(str::trim), Some(s.as_str()));
    let times = load_times(&cfg, None)?;
    assert_eq!(times.len(), 1);
    assert!(cmd_check(&cfg, None, None)?.fresh);

    // пустое значение == снимка нет
    std::env::set_var(&var, "   ");
    assert!(cfg.watches_from_env().is_none());

    std::env::remove_var(&var);
    Ok(())
}
