pub mod parser;

pub use parser::{parse_event, try_parse_event};
