//! Newick format parser and writer for phylogenetic trees.
//!
//! This module provides [`NewickParser`] to parse Newick format strings
//! into [`Tree`]s and [`to_newick`] / [`write_newick_file`] to write them.
//! The parser may be used directly or when parsing a Nexus file.
//!
//! # Quick API
//! * [`parse_file`] - parses a file with one or more trees
//! * [`parse_str`] - parses a single string
//!
//! # Format
//! The parser accepts the following grammar:
//! * `tree ::= vertex ';'`
//! * `vertex ::= '(' vertex (',' vertex)* ')' suffix | label suffix`
//! * `suffix ::= {comment} [label] {comment} [':' {comment} number {comment}]`
//!
//! Furthermore:
//! * Whitespace can occur between elements,
//!   just not within an unquoted label or a branch length
//! * Labels are either unquoted or single-quoted with `''` as escaped quote
//! * Comments are square brackets; those following a vertex are kept as
//!   its comment, e.g. `(A,B)[&sCF="43.44"]:6.7`

mod defs;
mod parser;
pub mod writer;

pub use self::parser::NewickParser;
pub use self::writer::{to_newick, write_newick, write_newick_file};

use crate::model::Tree;
use crate::parser::ParsingError;
use crate::parser::byte_parser::ByteParser;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a Newick file eagerly and returns all trees.
///
/// # Arguments
/// * `path` - Path to the file with a semicolon-separated list of Newick strings
///
/// # Errors
/// [`ParsingError`] if file reading fails or Newick format is invalid.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Tree>, ParsingError> {
    let path = path.as_ref();
    let byte_parser =
        ByteParser::from_file(path).map_err(|err| ParsingError::io_for_path(path, err))?;
    NewickParser::new().parse_all(byte_parser)
}

/// Parses a single Newick string.
///
/// # Example
/// ```
/// use cftools::newick::parse_str;
///
/// let tree = parse_str("(Fratercula_cirrhata,(Fratercula_arctica,Fratercula_corniculata));").unwrap();
/// assert_eq!(tree.num_leaves(), 3);
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParsingError> {
    let mut byte_parser = ByteParser::for_str(newick.as_ref());
    NewickParser::new().parse_str(&mut byte_parser)
}
