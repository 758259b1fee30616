pub mod download_parser;
pub mod response_parser;
pub mod simple_parser;
pub mod string_parser;

pub use download_parser::DownloadParser;
pub use response_parser::ResponseParser;
pub use simple_parser::{ListParser, MapParser, SimpleParser};
pub use string_parser::StringParser;
