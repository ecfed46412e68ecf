//! Basic low-level byte parser functionality shared by the Newick and
//! Nexus readers, plus label escaping and error handling.

pub mod byte_parser;
pub mod parsing_error;
pub mod utils;

pub use byte_parser::ByteParser;
pub use parsing_error::{ParsingError, ParsingErrorType};
