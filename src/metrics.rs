//! Lightweight global metrics for FileTimes.
//!
//! Потокобезопасные атомарные счётчики:
//! - update (запись состояния пути)
//! - check (проверка одной записи)
//! - stale verdicts / probe errors

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

static UPDATES_TOTAL: AtomicU64 = AtomicU64::new(0);
static CHECKS_TOTAL: AtomicU64 = AtomicU64::new(0);
static STALE_TOTAL: AtomicU64 = AtomicU64::new(0);
static PROBE_ERRORS_TOTAL: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsSnapshot {
    pub updates_total: u64,
    pub checks_total: u64,
    pub stale_total: u64,
    pub probe_errors_total: u64,
}

impl MetricsSnapshot {
    /// Доля проверок, закончившихся вердиктом "stale".
    pub fn stale_ratio(&self) -> f64 {
        if self.checks_total == 0 {
            0.0
        } else {
            self.stale_total as f64 / self.checks_total as f64
        }
    }
}

#[inline]
pub fn record_update() {
    UPDATES_TOTAL.fetch_add(1, Ordering::Relaxed);
}

#[inline]
pub fn record_check() {
    CHECKS_TOTAL.fetch_add(1, Ordering::Relaxed);
}

#[inline]
pub fn record_stale() {
    STALE_TOTAL.fetch_add(1, Ordering::Relaxed);
}

#[inline]
pub fn record_probe_error() {
    PROBE_ERRORS_TOTAL.fetch_add(1, Ordering::Relaxed);
}

pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        updates_total: UPDATES_TOTAL.load(Ordering::Relaxed),
        checks_total: CHECKS_TOTAL.load(Ordering::Relaxed),
        stale_total: STALE_TOTAL.load(Ordering::Relaxed),
        probe_errors_total: PROBE_ERRORS_TOTAL.load(Ordering::Relaxed),
    }
}

pub fn reset() {
    UPDATES_TOTAL.store(0, Ordering::Relaxed);
    CHECKS_TOTAL.store(0, Ordering::Relaxed);
    STALE_TOTAL.store(0, Ordering::Relaxed);
    PROBE_ERRORS_TOTAL.store(0, Ordering::Relaxed);
}
