//! Constants and definitions for the Newick parser.

/// Newick label delimiters: parentheses, brackets, comma, colon, semicolon, whitespace
pub(crate) const NEWICK_LABEL_DELIMITERS: &[u8] = b"([,:; \n\t\r)]";

/// Separator used when several comments are attached to the same vertex
pub(crate) const COMMENT_SEPARATOR: &str = ",";
