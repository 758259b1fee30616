pub mod parser;

pub use parser::{FnParser, Parser};
