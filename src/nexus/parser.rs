use crate::model::label_resolver::LabelResolver;
use crate::model::tree::Tree;
use crate::newick::NewickParser;
use crate::nexus::defs::*;
use crate::parser::byte_parser::ByteParser;
use crate::parser::parsing_error::{ParsingError, ParsingErrorType};
use log::debug;
use std::collections::HashMap;

// =#========================================================================#=
// NEXUS PARSER
// =#========================================================================#=
/// Parser for NEXUS phylogenetic tree files.
///
/// A NEXUS file as written by IQ-TREE, MrBayes, BEAST and friends contains
/// - the `#NEXUS` header,
/// - optionally a TAXA block defining the taxon labels,
/// - a TREES block with an optional TRANSLATE command mapping short keys to
///   taxon labels, followed by the `TREE` commands, and
/// - possibly other blocks, which are skipped.
///
/// # Example
/// ```
/// use cftools::nexus::NexusParser;
/// use cftools::parser::ByteParser;
///
/// let nexus = "#NEXUS\nbegin trees;\n  tree t1 = [&U] (A,B,(C,D)[&sCF=\"43.4\"]);\nend;\n";
/// let trees = NexusParser::new(ByteParser::for_str(nexus)).parse_all().unwrap();
///
/// assert_eq!(trees.len(), 1);
/// assert_eq!(trees[0].name(), Some("t1"));
/// assert_eq!(trees[0].rooted(), Some(false));
/// ```
///
/// # Assumptions
/// * Blocks have the form `BEGIN <name>; ... END;` (case-insensitive, `ENDBLOCK;` accepted)
/// * A TAXA block, if present, consists of `DIMENSIONS NTAX=<n>;` and
///   `TAXLABELS <label1> <label2> ...;` with exactly `n` labels
/// * A `TRANSLATE` command, if present, precedes the `TREE` commands it applies to:
///   - Command is a comma separated list of pairs `TRANSLATE <key1> <label1>, ...;`
///   - A label with a space or an apostrophe in it must be enclosed in single quotes,
///     with the apostrophe escaped by another one:
///     e.g. `Wilson's Storm-petrel` becomes `'Wilson''s Storm-petrel'`
///   - Comments are allowed between the pairs
/// * One tree command has the form `TREE [*] <name> = [&R|&U] <Newick string>;`
pub struct NexusParser {
    /// Accessor to the underlying bytes/file being parsed
    byte_parser: ByteParser,
    /// Labels of TAXA block, empty if there is none
    taxa: Vec<String>,
    /// Used to parse Newick strings, including resolving labels
    newick_parser: NewickParser,
}

// ============================================================================
// Parsing (pub)
// ============================================================================
impl NexusParser {
    /// Creates a new [NexusParser] on the given [ByteParser].
    pub fn new(byte_parser: ByteParser) -> Self {
        NexusParser {
            byte_parser,
            taxa: Vec::new(),
            newick_parser: NewickParser::new(),
        }
    }

    /// Parses the whole Nexus file and returns the trees of all TREES blocks,
    /// in file order.
    ///
    /// # Errors
    /// Returns a [ParsingError] if:
    /// - The file does not start with `#NEXUS`
    /// - There is no TREES block ([MissingTreesBlock](ParsingErrorType::MissingTreesBlock))
    /// - A block, command, comment or the Newick string is malformed
    pub fn parse_all(mut self) -> Result<Vec<Tree>, ParsingError> {
        self.parse_nexus_header()?;

        let mut trees_block_found = false;
        let mut trees = Vec::new();

        while let Some(block) = self.detect_next_block()? {
            match block {
                NexusBlock::Taxa => self.parse_taxa_block()?,
                NexusBlock::Trees => {
                    trees_block_found = true;
                    self.parse_trees_block(&mut trees)?;
                }
                NexusBlock::UnknownBlock(name) => {
                    debug!("Skipping Nexus block {name}");
                    self.skip_to_block_end()?;
                }
            }
        }

        if !trees_block_found {
            return Err(ParsingError::without_context(
                ParsingErrorType::MissingTreesBlock,
            ));
        }

        Ok(trees)
    }
}

// ============================================================================
// Parsing helpers (private)
// ============================================================================
impl NexusParser {
    /// Parses header `#NEXUS` at start of file or returns `ParsingError::MissingNexusHeader` otherwise.
    fn parse_nexus_header(&mut self) -> Result<(), ParsingError> {
        self.byte_parser.skip_comment_and_whitespace()?;

        if !self.byte_parser.consume_if_sequence(NEXUS_HEADER) {
            return Err(ParsingError::missing_nexus_header(&self.byte_parser));
        }

        Ok(())
    }

    /// Detects the next Nexus block, which must start with header `BEGIN <BlockType>;` (case-insensitive),
    /// consumes its header, and returns its type, or `None` at EOF.
    fn detect_next_block(&mut self) -> Result<Option<NexusBlock>, ParsingError> {
        self.byte_parser.skip_comment_and_whitespace()?;
        if self.byte_parser.is_eof() {
            return Ok(None);
        }

        if !self.byte_parser.consume_if_sequence(BLOCK_BEGIN) {
            return Err(ParsingError::invalid_formatting(&self.byte_parser));
        }

        let block_name = self.byte_parser.parse_label(NEXUS_KEYWORD_DELIMITERS)?;
        if block_name.is_empty() {
            return Err(ParsingError::invalid_block_name(&self.byte_parser));
        }
        self.expect_command_end()?;

        Ok(Some(NexusBlock::from_name(&block_name)))
    }

    /// Skips block, e.g. continuing until encountering `END;`.
    fn skip_to_block_end(&mut self) -> Result<(), ParsingError> {
        loop {
            match self.next_command()? {
                NexusCommand::End => return self.expect_command_end(),
                _ => self.skip_command()?,
            }
        }
    }

    /// Reads the keyword of the next command, skipping whitespace and comments.
    fn next_command(&mut self) -> Result<NexusCommand, ParsingError> {
        self.byte_parser.skip_comment_and_whitespace()?;
        if self.byte_parser.is_eof() {
            return Err(ParsingError::unexpected_eof(&self.byte_parser));
        }

        let keyword = self.byte_parser.parse_label(NEXUS_KEYWORD_DELIMITERS)?;
        Ok(NexusCommand::from_keyword(&keyword))
    }

    /// Skips the rest of the current command, including its `;`.
    fn skip_command(&mut self) -> Result<(), ParsingError> {
        loop {
            self.byte_parser.skip_comment_and_whitespace()?;
            match self.byte_parser.peek() {
                None => return Err(ParsingError::unexpected_eof(&self.byte_parser)),
                Some(b';') => {
                    self.byte_parser.next_byte();
                    return Ok(());
                }
                Some(b'\'') => {
                    self.byte_parser.parse_quoted_label()?;
                }
                Some(_) => {
                    self.byte_parser.next_byte();
                }
            }
        }
    }

    /// Expects optional whitespace/comments followed by the `;` ending a command.
    fn expect_command_end(&mut self) -> Result<(), ParsingError> {
        self.byte_parser.skip_comment_and_whitespace()?;
        match self.byte_parser.peek() {
            Some(b';') => {
                self.byte_parser.next_byte();
                Ok(())
            }
            None => Err(ParsingError::unexpected_eof(&self.byte_parser)),
            Some(_) => Err(ParsingError::invalid_formatting(&self.byte_parser)),
        }
    }

    /// Parses TAXA block extracting number of taxa from `NTAX` and the taxon list
    /// from the `TAXLABELS` command, skipping any other command and comments.
    ///
    /// # Errors
    /// Returns [InvalidTaxaBlock](ParsingErrorType::InvalidTaxaBlock) if a command
    /// is malformed or the number of labels does not match `NTAX`.
    fn parse_taxa_block(&mut self) -> Result<(), ParsingError> {
        let mut ntax = None;
        let mut labels = Vec::new();

        loop {
            match self.next_command()? {
                NexusCommand::Dimensions => ntax = Some(self.parse_taxa_block_ntax()?),
                NexusCommand::TaxLabels => labels = self.parse_taxa_block_labels()?,
                NexusCommand::End => {
                    self.expect_command_end()?;
                    break;
                }
                _ => self.skip_command()?,
            }
        }

        if let Some(ntax) = ntax
            && ntax != labels.len()
        {
            return Err(ParsingError::invalid_taxa_block(
                &self.byte_parser,
                format!(
                    "Number of parsed labels ({}) did not match ntax value ({}).",
                    labels.len(),
                    ntax
                ),
            ));
        }

        debug!("Parsed TAXA block with {} labels", labels.len());
        self.taxa = labels;
        Ok(())
    }

    /// Helps parsing TAXA block, responsible for the `DIMENSIONS NTAX=<n>;` command
    /// and returning the number of taxa.
    fn parse_taxa_block_ntax(&mut self) -> Result<usize, ParsingError> {
        self.byte_parser.skip_whitespace();
        if !self.byte_parser.consume_if_sequence(NTAX) {
            return Err(ParsingError::invalid_taxa_block(
                &self.byte_parser,
                String::from("Expected 'NTAX' in DIMENSIONS command."),
            ));
        }

        self.byte_parser.skip_whitespace();
        if !self.byte_parser.consume_if(b'=') {
            return Err(ParsingError::invalid_taxa_block(
                &self.byte_parser,
                String::from("Expected '=' after NTAX."),
            ));
        }

        let ntax_str = self.byte_parser.parse_label(NEXUS_LABEL_DELIMITERS)?;
        let ntax: usize = ntax_str.parse().map_err(|_| {
            ParsingError::invalid_taxa_block(
                &self.byte_parser,
                format!("Cannot parse NTAX value: {}", ntax_str),
            )
        })?;

        // Ignore anything else, such as NCHAR
        self.skip_command()?;
        Ok(ntax)
    }

    /// Helps parsing TAXA block, responsible for the `TAXLABELS` command.
    fn parse_taxa_block_labels(&mut self) -> Result<Vec<String>, ParsingError> {
        let mut labels = Vec::new();
        loop {
            self.byte_parser.skip_comment_and_whitespace()?;

            match self.byte_parser.peek() {
                None => return Err(ParsingError::unexpected_eof(&self.byte_parser)),
                Some(b';') => {
                    self.byte_parser.next_byte();
                    return Ok(labels);
                }
                Some(_) => {
                    let label = self.byte_parser.parse_label(NEXUS_LABEL_DELIMITERS)?;
                    if label.is_empty() {
                        return Err(ParsingError::invalid_taxa_block(
                            &self.byte_parser,
                            String::from("Unexpected character in TAXLABELS."),
                        ));
                    }
                    labels.push(label);
                }
            }
        }
    }

    /// Parses the TREES block, pushing all its trees into `trees`
    /// and consuming the closing `END;`.
    fn parse_trees_block(&mut self, trees: &mut Vec<Tree>) -> Result<(), ParsingError> {
        self.newick_parser = NewickParser::new()
            .with_resolver(LabelResolver::for_nexus(HashMap::new(), self.taxa.clone()));

        loop {
            match self.next_command()? {
                NexusCommand::Translate => {
                    let translation = self.parse_trees_block_translate()?;
                    debug!("Parsed TRANSLATE command with {} entries", translation.len());
                    self.newick_parser = NewickParser::new().with_resolver(
                        LabelResolver::for_nexus(translation, self.taxa.clone()),
                    );
                }
                NexusCommand::Tree => trees.push(self.parse_tree_command()?),
                NexusCommand::End => return self.expect_command_end(),
                NexusCommand::Other(keyword) if keyword.is_empty() => {
                    return Err(ParsingError::invalid_trees_block(
                        &self.byte_parser,
                        String::from("Expected 'TRANSLATE', 'TREE' or 'END' in TREES block."),
                    ));
                }
                _ => self.skip_command()?,
            }
        }
    }

    /// Helps parsing TREES block, responsible for parsing the `TRANSLATE` command
    /// (keyword already consumed) up to and including its semicolon.
    fn parse_trees_block_translate(&mut self) -> Result<HashMap<String, String>, ParsingError> {
        let mut map = HashMap::new();
        loop {
            // Read key (short label or id) and label; parse_label skips whitespace and comments
            let key = self.byte_parser.parse_label(NEXUS_LABEL_DELIMITERS)?;
            let label = self.byte_parser.parse_label(NEXUS_LABEL_DELIMITERS)?;
            if key.is_empty() || label.is_empty() {
                return Err(ParsingError::invalid_trees_block(
                    &self.byte_parser,
                    String::from("Expected '<key> <label>' pair in TRANSLATE."),
                ));
            }
            map.insert(key, label);

            self.byte_parser.skip_comment_and_whitespace()?;
            match self.byte_parser.next_byte() {
                // Continue if next is a comma
                Some(b',') => continue,
                // but stop if semicolon (end of "TRANSLATE" command)
                Some(b';') => return Ok(map),
                // and otherwise invalid
                Some(b) => {
                    return Err(ParsingError::invalid_trees_block(
                        &self.byte_parser,
                        format!("Unexpected char '{}' in TRANSLATE.", b as char),
                    ));
                }
                None => return Err(ParsingError::unexpected_eof(&self.byte_parser)),
            }
        }
    }

    /// Helps parsing TREES block, responsible for a single
    /// `TREE [*] <name> = [&R|&U] <newick>;` command (keyword already consumed).
    fn parse_tree_command(&mut self) -> Result<Tree, ParsingError> {
        self.byte_parser.skip_comment_and_whitespace()?;
        self.byte_parser.consume_if(b'*');

        // Parse tree name
        let name = self.byte_parser.parse_label(NEXUS_LABEL_DELIMITERS)?;

        // Expect "="
        self.byte_parser.skip_comment_and_whitespace()?;
        if !self.byte_parser.consume_if(b'=') {
            return Err(ParsingError::invalid_trees_block(
                &self.byte_parser,
                String::from("Expected '=' after tree name in tree command."),
            ));
        }

        // Optional "[&R]"/"[&U]" (rooted or unrooted tree); other comments are skipped
        let mut comments = Vec::new();
        self.byte_parser.collect_comments(&mut comments)?;
        let rooted = comments
            .iter()
            .rev()
            .find_map(|comment| rooting_from_comment(comment));

        let mut tree = self.newick_parser.parse_str(&mut self.byte_parser)?;
        if !name.is_empty() {
            tree.set_name(name);
        }
        tree.set_rooted(rooted);

        debug!(
            "Parsed tree {:?} with {} vertices",
            tree.name().unwrap_or_default(),
            tree.num_vertices()
        );
        Ok(tree)
    }
}

/// Interprets a `[&R]` / `[&U]` comment.
fn rooting_from_comment(comment: &str) -> Option<bool> {
    let comment = comment.trim();
    if comment.eq_ignore_ascii_case(ROOTED_COMMENT) {
        Some(true)
    } else if comment.eq_ignore_ascii_case(UNROOTED_COMMENT) {
        Some(false)
    } else {
        None
    }
}
