//! Constants and definitions for the Nexus parser.

/// Nexus label parsing delimiters: whitespace, comma, semicolon, equals sign
pub(crate) const NEXUS_LABEL_DELIMITERS: &[u8] = b" ,;=\t\n\r[";

/// Delimiters of keywords (block names and command names)
pub(crate) const NEXUS_KEYWORD_DELIMITERS: &[u8] = b" ;=\t\n\r[";

pub(crate) const NEXUS_HEADER: &[u8] = b"#NEXUS";

pub(crate) const BLOCK_BEGIN: &[u8] = b"Begin";

pub(crate) const NTAX: &[u8] = b"ntax";

/// Rooting comments in front of a Newick string
pub(crate) const ROOTED_COMMENT: &str = "&R";
pub(crate) const UNROOTED_COMMENT: &str = "&U";

/// Nexus blocks, distinguished as far as needed for reading trees.
#[derive(Debug, PartialEq, Clone)]
pub enum NexusBlock {
    Taxa,
    Trees,
    UnknownBlock(String),
}

impl NexusBlock {
    /// Parse a block name (case-insensitive) into a NexusBlock variant
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "taxa" => NexusBlock::Taxa,
            "trees" => NexusBlock::Trees,
            _ => NexusBlock::UnknownBlock(name.to_string()),
        }
    }
}

/// Commands within a block, identified by their (case-insensitive) keyword.
#[derive(Debug, PartialEq, Clone)]
pub(crate) enum NexusCommand {
    Dimensions,
    TaxLabels,
    Translate,
    Tree,
    End,
    Other(String),
}

impl NexusCommand {
    pub(crate) fn from_keyword(keyword: &str) -> Self {
        match keyword.to_ascii_lowercase().as_str() {
            "dimensions" => NexusCommand::Dimensions,
            "taxlabels" => NexusCommand::TaxLabels,
            "translate" => NexusCommand::Translate,
            "tree" => NexusCommand::Tree,
            "end" | "endblock" => NexusCommand::End,
            _ => NexusCommand::Other(keyword.to_string()),
        }
    }
}
