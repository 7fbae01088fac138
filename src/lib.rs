#![allow(non_snake_case)]

// Базовые модули
pub mod error;
pub mod config;
pub mod metrics;
pub mod util;   // src/util/mod.rs

// Пробы ФС и снимок
pub mod probe;
pub mod times;  // src/times/{mod,record,store}.rs

// Кодек строки снимка (json -> zlib -> base64)
pub mod gzenv;  // src/gzenv/mod.rs

// Хост-команды (watch / check / list)
pub mod cli;

// Удобные реэкспорты
pub use config::{FtConfig, FtConfigBuilder};
pub use error::{FtError, FtResult};
pub use probe::{probe_exact, probe_following, Probe};
pub use times::{FileTime, FileTimes};
