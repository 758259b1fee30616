pub mod await_source;

pub use await_source::{await_callback, await_source};
