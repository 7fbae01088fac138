//! times — снимок состояния набора путей и проверка его актуальности.
//!
//! - record: FileTime (одна запись) + проверка + форматирование;
//! - store: FileTimes (upsert по пути, check/check_one, marshal/unmarshal).

pub mod record;
pub mod store;

pub use record::{FileTime, UNRENDERABLE_TIME};
pub use store::FileTimes;
