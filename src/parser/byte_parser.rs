//! Low-level byte-by-byte parser for ASCII text.
//!
//! This module provides [ByteParser] for parsing text-based file formats with support
//! for peeking, consuming, pattern matching, comment capture and quote-aware
//! label parsing. Used as the foundation for both Nexus and Newick parsers.

use crate::parser::parsing_error::ParsingError;
use std::fs;
use std::path::Path;

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// A byte-by-byte parser for ASCII text with support for peeking, consuming, and pattern matching.
///
/// The parser owns the complete input; tree files are read into memory
/// before parsing. [ByteParser] provides parsing operations for Newick and Nexus text.
/// Keyword matching is case-insensitive for ASCII characters.
///
/// # Features
/// - Whitespace and comment skipping
/// - Capturing the content of `[...]` comments
/// - Quote-aware label parsing (single quotes with `''` escaping)
/// - Context extraction for error reporting
///
/// # Example
/// ```
/// use cftools::parser::ByteParser;
///
/// let mut parser = ByteParser::for_str("BEGIN TREES;\n  TREE t1 = (A:1.0,B:1.0);");
///
/// parser.skip_whitespace();
/// assert!(parser.peek_is_sequence(b"begin"));
/// parser.consume_if_sequence(b"begin");
/// parser.skip_whitespace();
/// assert!(parser.peek_is_sequence(b"TREES"));
/// ```
#[derive(Debug, Clone)]
pub struct ByteParser {
    /// The owned input being parsed
    input: Vec<u8>,
    /// Current position in `input`
    pos: usize,
}

impl ByteParser {
    /// Creates a new [ByteParser] over the given bytes.
    pub fn new(input: Vec<u8>) -> Self {
        Self { input, pos: 0 }
    }

    /// Creates a new [ByteParser] from a string by copying it.
    pub fn for_str(input: &str) -> Self {
        Self::new(input.as_bytes().to_vec())
    }

    /// Creates a new [ByteParser] by reading the whole file into memory.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        Ok(Self::new(fs::read(path)?))
    }

    /// Peeks at the current byte without consuming it.
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Gets the current byte and advances the position (consumes it).
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    /// Returns up to `k` bytes from the current position without consuming them.
    #[inline(always)]
    fn peek_slice(&self, k: usize) -> &[u8] {
        let start = self.pos.min(self.input.len());
        let end = self.pos.saturating_add(k).min(self.input.len());
        &self.input[start..end]
    }

    /// Skips (consumes) all consecutive whitespace characters.
    ///
    /// Whitespace includes: space (' '), tab ('\t'), newline ('\n'), and carriage return ('\r').
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b == b' ' || b == b'\t' || b == b'\n' || b == b'\r' {
                self.next_byte();
            } else {
                break;
            }
        }
    }

    /// Skips (consumes) a Nexus-style comment `[...]` if present.
    ///
    /// # Returns
    /// * `Ok(true)` - A comment was found and consumed
    /// * `Ok(false)` - No comment at current position
    /// * `Err(ParsingError)` - Comment was opened but never closed
    pub fn skip_comment(&mut self) -> Result<bool, ParsingError> {
        Ok(self.parse_comment()?.is_some())
    }

    /// Parses a Nexus-style comment `[...]` if present and returns its
    /// content without the enclosing brackets.
    ///
    /// Nested brackets are not supported; the comment ends at the first `]`.
    ///
    /// # Returns
    /// * `Ok(Some(content))` - A comment was found and consumed
    /// * `Ok(None)` - No comment at current position
    /// * `Err(ParsingError)` - Comment was opened but never closed
    pub fn parse_comment(&mut self) -> Result<Option<String>, ParsingError> {
        if !self.consume_if(b'[') {
            return Ok(None);
        }

        let mut content = Vec::new();
        loop {
            match self.next_byte() {
                Some(b']') => break,
                Some(b) => content.push(b),
                None => return Err(ParsingError::unclosed_comment(self)),
            }
        }

        Ok(Some(String::from_utf8_lossy(&content).into_owned()))
    }

    /// Skips (consumes) all consecutive whitespace and Nexus comments.
    ///
    /// # Errors
    /// Returns an error if an unclosed comment is encountered.
    pub fn skip_comment_and_whitespace(&mut self) -> Result<(), ParsingError> {
        self.skip_whitespace();

        while self.skip_comment()? {
            self.skip_whitespace();
        }

        Ok(())
    }

    /// Skips whitespace and collects the content of all consecutive comments
    /// into `comments`.
    ///
    /// # Errors
    /// Returns an error if an unclosed comment is encountered.
    pub fn collect_comments(&mut self, comments: &mut Vec<String>) -> Result<(), ParsingError> {
        self.skip_whitespace();

        while let Some(comment) = self.parse_comment()? {
            comments.push(comment);
            self.skip_whitespace();
        }

        Ok(())
    }

    /// Checks if the current byte matches the target byte (case-insensitive for ASCII).
    pub fn peek_is(&self, ch: u8) -> bool {
        self.peek()
            .is_some_and(|b| b.eq_ignore_ascii_case(&ch))
    }

    /// Checks if the following bytes match the given byte sequence (case-insensitive).
    ///
    /// This is a peek operation - the parser position is not changed.
    #[inline]
    pub fn peek_is_sequence(&self, sequence: &[u8]) -> bool {
        let context = self.peek_slice(sequence.len());
        context.len() == sequence.len() && context.eq_ignore_ascii_case(sequence)
    }

    /// Consumes the current byte if it matches the target byte (case-insensitive).
    ///
    /// # Returns
    /// `true` if the byte was matched and consumed, `false` otherwise
    pub fn consume_if(&mut self, ch: u8) -> bool {
        if self.peek_is(ch) {
            self.next_byte();
            true
        } else {
            false
        }
    }

    /// Consumes the next bytes if they match the given byte sequence (case-insensitive).
    ///
    /// # Returns
    /// `true` if the sequence was matched and consumed, `false` otherwise
    pub fn consume_if_sequence(&mut self, sequence: &[u8]) -> bool {
        if !self.peek_is_sequence(sequence) {
            return false;
        }

        for _ in 0..sequence.len() {
            self.next_byte();
        }

        true
    }

    /// Returns whether the end of data (EOF) has been reached.
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Returns the current parser position in the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns a string from up to `k` bytes from the current position for error context.
    ///
    /// Invalid UTF-8 sequences are replaced with the Unicode replacement character.
    pub fn get_context_as_string(&self, k: usize) -> String {
        String::from_utf8_lossy(self.peek_slice(k)).into_owned()
    }

    /// Parses a label (quoted or unquoted) with the given delimiter set,
    /// skipping any leading whitespace and comments.
    ///
    /// # Errors
    /// Returns an error if a comment or a quoted label is not closed.
    pub fn parse_label(&mut self, delimiters: &[u8]) -> Result<String, ParsingError> {
        self.skip_comment_and_whitespace()?;

        if self.peek() == Some(b'\'') {
            self.parse_quoted_label()
        } else {
            self.parse_unquoted_label(delimiters)
        }
    }

    /// Parses a quoted label enclosed in single quotes with escape support.
    ///
    /// Assumes the opening quote has not been consumed yet. Single quotes within
    /// the label are escaped by doubling them (e.g., `'Wilson''s'` becomes `Wilson's`).
    ///
    /// # Errors
    /// Returns [UnclosedQuote](crate::parser::ParsingErrorType::UnclosedQuote)
    /// if EOF is reached before the closing quote.
    pub fn parse_quoted_label(&mut self) -> Result<String, ParsingError> {
        self.next_byte(); // consume opening '

        let mut label = Vec::new();
        loop {
            match self.next_byte() {
                Some(b'\'') => {
                    // Two single quotes in a row are an escaped quote
                    if self.peek() == Some(b'\'') {
                        label.push(b'\'');
                        self.next_byte();
                    } else {
                        break;
                    }
                }
                Some(b) => label.push(b),
                None => return Err(ParsingError::unclosed_quote(self)),
            }
        }

        Ok(String::from_utf8_lossy(&label).into_owned())
    }

    /// Parses an unquoted label until any of the given delimiters (or EOF) is encountered.
    ///
    /// Returns `Result` for API consistency with [parse_quoted_label](Self::parse_quoted_label).
    pub fn parse_unquoted_label(&mut self, delimiters: &[u8]) -> Result<String, ParsingError> {
        let mut label = Vec::new();

        while let Some(b) = self.peek() {
            if delimiters.contains(&b) {
                break;
            }
            label.push(b);
            self.next_byte();
        }

        Ok(String::from_utf8_lossy(&label).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParsingErrorType;

    #[test]
    fn test_parse_comment_returns_content() {
        let mut parser = ByteParser::for_str("[&label=\"100\",sCF=\"43.44\"]:0.1");
        let comment = parser.parse_comment().unwrap();
        assert_eq!(comment.as_deref(), Some("&label=\"100\",sCF=\"43.44\""));
        assert_eq!(parser.peek(), Some(b':'));
    }

    #[test]
    fn test_parse_comment_none_when_absent() {
        let mut parser = ByteParser::for_str("A:0.1");
        assert_eq!(parser.parse_comment().unwrap(), None);
        assert_eq!(parser.position(), 0);
    }

    #[test]
    fn test_unclosed_comment() {
        let mut parser = ByteParser::for_str("[never closed");
        let err = parser.skip_comment_and_whitespace().unwrap_err();
        assert_eq!(err.kind(), &ParsingErrorType::UnclosedComment);
    }

    #[test]
    fn test_collect_comments() {
        let mut parser = ByteParser::for_str("  [a] \n [b]x");
        let mut comments = Vec::new();
        parser.collect_comments(&mut comments).unwrap();
        assert_eq!(comments, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(parser.peek(), Some(b'x'));
    }

    #[test]
    fn test_quoted_label_with_escape() {
        let mut parser = ByteParser::for_str("'Wilson''s Storm-petrel':1.0");
        let label = parser.parse_label(b",:;)").unwrap();
        assert_eq!(label, "Wilson's Storm-petrel");
        assert_eq!(parser.peek(), Some(b':'));
    }

    #[test]
    fn test_unclosed_quoted_label() {
        let mut parser = ByteParser::for_str("'Pukeko");
        let err = parser.parse_quoted_label().unwrap_err();
        assert_eq!(err.kind(), &ParsingErrorType::UnclosedQuote);
    }

    #[test]
    fn test_case_insensitive_sequence() {
        let mut parser = ByteParser::for_str("bEgIn trees;");
        assert!(parser.consume_if_sequence(b"BEGIN"));
        assert!(!parser.consume_if_sequence(b"TREES"));
        parser.skip_whitespace();
        assert!(parser.consume_if_sequence(b"TREES;"));
        assert!(parser.is_eof());
    }

    #[test]
    fn test_context_stops_at_end_of_input() {
        let mut parser = ByteParser::for_str("(A,B);");
        parser.consume_if_sequence(b"(A,");
        assert_eq!(parser.get_context_as_string(50), "B);");
        assert_eq!(parser.position(), 3);
        assert!(!parser.peek_is_sequence(b"B);;"));
    }
}
