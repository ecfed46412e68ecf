//! Error types for Nexus and Newick parsing.
//!
//! This module provides [ParsingError] and [ParsingErrorType] for representing
//! and reporting errors that occur while reading tree files.

use crate::parser::byte_parser::ByteParser;
use std::error::Error;
use std::fmt;
use std::path::Path;

/// Default length of context provided by error from parser
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// PARSING ERROR TYPE
// =#========================================================================#=
/// Error types that can occur during Nexus and Newick parsing.
#[derive(PartialEq, Debug, Clone)]
pub enum ParsingErrorType {
    IoError(String),
    UnexpectedEOF,
    MissingNexusHeader,
    InvalidBlockName,
    InvalidTaxaBlock(String),
    InvalidTreesBlock(String),
    UnclosedComment,
    UnclosedQuote,
    InvalidNewickString(String),
    InvalidFormatting,
    MissingTreesBlock,
    NoTrees,
    MultipleTrees(usize),
}

// =#========================================================================#=
// PARSING ERROR
// =#========================================================================#=
/// Parsing error with contextual information (position and following bytes).
#[derive(Debug)]
pub struct ParsingError {
    kind: ParsingErrorType,
    position: usize,
    context: String,
}

impl ParsingError {
    /// Create a ParsingError from an error type and parser state
    pub fn from_parser(kind: ParsingErrorType, parser: &ByteParser) -> Self {
        Self {
            kind,
            position: parser.position(),
            context: parser.get_context_as_string(DEFAULT_CONTEXT_LENGTH),
        }
    }

    /// Convenience constructor for UnexpectedEOF
    pub fn unexpected_eof(parser: &ByteParser) -> Self {
        Self::from_parser(ParsingErrorType::UnexpectedEOF, parser)
    }

    /// Convenience constructor for MissingNexusHeader
    pub fn missing_nexus_header(parser: &ByteParser) -> Self {
        Self::from_parser(ParsingErrorType::MissingNexusHeader, parser)
    }

    /// Convenience constructor for InvalidBlockName
    pub fn invalid_block_name(parser: &ByteParser) -> Self {
        Self::from_parser(ParsingErrorType::InvalidBlockName, parser)
    }

    /// Convenience constructor for InvalidTaxaBlock
    pub fn invalid_taxa_block(parser: &ByteParser, msg: String) -> Self {
        Self::from_parser(ParsingErrorType::InvalidTaxaBlock(msg), parser)
    }

    /// Convenience constructor for InvalidTreesBlock
    pub fn invalid_trees_block(parser: &ByteParser, msg: String) -> Self {
        Self::from_parser(ParsingErrorType::InvalidTreesBlock(msg), parser)
    }

    /// Convenience constructor for UnclosedComment
    pub fn unclosed_comment(parser: &ByteParser) -> Self {
        Self::from_parser(ParsingErrorType::UnclosedComment, parser)
    }

    /// Convenience constructor for UnclosedQuote
    pub fn unclosed_quote(parser: &ByteParser) -> Self {
        Self::from_parser(ParsingErrorType::UnclosedQuote, parser)
    }

    /// Convenience constructor for InvalidNewickString
    pub fn invalid_newick_string(parser: &ByteParser, msg: String) -> Self {
        Self::from_parser(ParsingErrorType::InvalidNewickString(msg), parser)
    }

    /// Convenience constructor for InvalidFormatting
    pub fn invalid_formatting(parser: &ByteParser) -> Self {
        Self::from_parser(ParsingErrorType::InvalidFormatting, parser)
    }

    /// Create a ParsingError without parser context (e.g. for whole-file checks)
    pub fn without_context(kind: ParsingErrorType) -> Self {
        Self {
            kind,
            position: 0,
            context: String::new(),
        }
    }

    /// Create an IO error that names the file it occurred on
    pub fn io_for_path(path: &Path, err: std::io::Error) -> Self {
        Self::without_context(ParsingErrorType::IoError(format!(
            "{}: {}",
            path.display(),
            err
        )))
    }

    /// Get the error kind
    pub fn kind(&self) -> &ParsingErrorType {
        &self.kind
    }

    /// Get the position where the error occurred
    pub fn position(&self) -> usize {
        self.position
    }
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Main error message
        match &self.kind {
            ParsingErrorType::MissingNexusHeader => {
                write!(f, "File does not start with #NEXUS header")?
            }
            ParsingErrorType::InvalidTaxaBlock(msg) => {
                write!(f, "Invalid TAXA block format - {msg}")?
            }
            ParsingErrorType::InvalidTreesBlock(msg) => {
                write!(f, "Invalid TREES block format - {msg}")?
            }
            ParsingErrorType::UnclosedComment => write!(f, "Unclosed comment")?,
            ParsingErrorType::UnclosedQuote => write!(f, "Unclosed quoted label")?,
            ParsingErrorType::InvalidBlockName => write!(f, "Invalid block name")?,
            ParsingErrorType::InvalidNewickString(msg) => {
                write!(f, "Invalid newick string: {}", msg)?
            }
            ParsingErrorType::UnexpectedEOF => write!(f, "Unexpected end of file")?,
            ParsingErrorType::InvalidFormatting => write!(f, "Invalid formatting")?,
            ParsingErrorType::IoError(msg) => return write!(f, "IO error - {msg}"),
            ParsingErrorType::MissingTreesBlock => {
                return write!(f, "No TREES block found in Nexus file");
            }
            ParsingErrorType::NoTrees => return write!(f, "TREES block contains no tree"),
            ParsingErrorType::MultipleTrees(n) => {
                return write!(f, "Expected a single tree but found {n} trees");
            }
        }

        // Additional position information
        write!(f, " at position {}", self.position)?;

        // Additional context if available
        if !self.context.is_empty() {
            write!(
                f,
                "\n  Context (next {} bytes): {}",
                self.context.len(),
                self.context
            )?;
        }

        Ok(())
    }
}

impl Error for ParsingError {}

impl From<std::io::Error> for ParsingError {
    fn from(err: std::io::Error) -> Self {
        Self::without_context(ParsingErrorType::IoError(err.to_string()))
    }
}
