//! 进度领域模块：进度采样、节流与转发调度。

pub mod structs;
pub mod traits;
