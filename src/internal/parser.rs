//! 结果转换策略及内置解析器。

pub mod functions;
pub mod structs;
pub mod traits;
