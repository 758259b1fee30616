//! 下载领域模块：带进度节流的下载等待。

pub mod structs;
