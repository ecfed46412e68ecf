//! NEXUS format parser for phylogenetic trees.
//!
//! This module provides a [`NexusParser`] for reading the trees of NEXUS
//! files, such as the concordance factor trees written by IQ-TREE. Comments
//! attached to vertices are kept, so annotations like
//! `[&label="100",sCF="43.44"]` can be inspected after parsing.
//!
//! # Quick API
//! - [`parse_file`] - parses a file, returns all [`Tree`]s
//! - [`read_tree`] - parses a file that must contain exactly one tree
//! - [`parse_str`] - parses Nexus content held in memory
//!
//! # Format
//! A NEXUS file typically contains:
//! - An optional TAXA block defining the species/labels
//! - A TREES block containing one or more phylogenetic trees
//! - An optional TRANSLATE command mapping short keys to full taxon labels
//!
//! See [`NexusParser`] for the exact assumptions.

mod defs;
mod parser;

pub use self::defs::NexusBlock;
pub use self::parser::NexusParser;

use crate::model::Tree;
use crate::parser::byte_parser::ByteParser;
use crate::parser::{ParsingError, ParsingErrorType};
use std::path::Path;

// ============================================================================
// QUICK PARSING API (public)
// ============================================================================
/// Parses a Nexus file eagerly and returns all trees, in file order.
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
///
/// # Errors
/// Returns an error if the file cannot be opened or parsed.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Tree>, ParsingError> {
    let path = path.as_ref();
    let byte_parser =
        ByteParser::from_file(path).map_err(|err| ParsingError::io_for_path(path, err))?;
    NexusParser::new(byte_parser).parse_all()
}

/// Parses Nexus content from a string and returns all trees.
pub fn parse_str<S: AsRef<str>>(nexus: S) -> Result<Vec<Tree>, ParsingError> {
    NexusParser::new(ByteParser::for_str(nexus.as_ref())).parse_all()
}

/// Parses a Nexus file that must contain exactly one tree and returns it.
///
/// # Errors
/// Besides all errors of [`parse_file`], returns
/// - [`NoTrees`](ParsingErrorType::NoTrees) if the TREES block is empty
/// - [`MultipleTrees`](ParsingErrorType::MultipleTrees) if there is more than one tree
pub fn read_tree<P: AsRef<Path>>(path: P) -> Result<Tree, ParsingError> {
    single_tree(parse_file(path)?)
}

/// Returns the only tree of `trees`, or an error if there is not exactly one.
pub(crate) fn single_tree(mut trees: Vec<Tree>) -> Result<Tree, ParsingError> {
    match trees.len() {
        1 => Ok(trees.remove(0)),
        0 => Err(ParsingError::without_context(ParsingErrorType::NoTrees)),
        n => Err(ParsingError::without_context(
            ParsingErrorType::MultipleTrees(n),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_tree() {
        let trees = parse_str("#NEXUS\nbegin trees; tree a = (A,B); tree b = (C,D); end;").unwrap();
        let err = single_tree(trees).unwrap_err();
        assert_eq!(err.kind(), &ParsingErrorType::MultipleTrees(2));

        let trees = parse_str("#NEXUS\nbegin trees; end;").unwrap();
        let err = single_tree(trees).unwrap_err();
        assert_eq!(err.kind(), &ParsingErrorType::NoTrees);
    }
}
