//! 操作源领域模块：两种调用风格的契约与统一入口。

pub mod structs;
pub mod traits;
