//! 内置的 reqwest 操作源。

pub mod structs;
