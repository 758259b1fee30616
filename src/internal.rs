//! 内部实现：按领域划分模块，对外导出以 lib.rs 为准。

pub mod call;
pub mod download;
pub mod http;
pub mod parser;
pub mod progress;
pub mod source;
pub mod states;
