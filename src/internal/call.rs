//! 挂起点领域模块：把回调式操作转换为一次 `.await`。

pub mod functions;
pub mod structs;
pub mod traits;
