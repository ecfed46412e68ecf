use crate::model::label_resolver::LabelResolver;
use crate::model::tree::{Tree, VertexIndex};
use crate::model::vertex::{BranchLength, Vertex};
use crate::newick::defs::{COMMENT_SEPARATOR, NEWICK_LABEL_DELIMITERS};
use crate::parser::byte_parser::ByteParser;
use crate::parser::parsing_error::ParsingError;

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================#=
/// Parser (configuration) for Newick format phylogenetic [Tree]s.
///
/// Supports parsing single or multiple Newick trees of arbitrary degree.
/// Leaf labels are passed through a [LabelResolver]; a Nexus parser with a
/// `TRANSLATE` command provides the right one via
/// [with_resolver](Self::with_resolver). Labels of internal vertices are
/// kept verbatim.
///
/// Comments (`[...]`) following a vertex are captured as the comment of that
/// vertex, several comments joined by `,`. A comment in front of a vertex is
/// skipped.
///
/// # Example
/// ```
/// use cftools::newick::NewickParser;
/// use cftools::parser::ByteParser;
///
/// let mut byte_parser = ByteParser::for_str("(A:1.0,B:1.0,(C,D)[&label=\"97\"]:0.5);");
/// let tree = NewickParser::new().parse_str(&mut byte_parser).unwrap();
///
/// assert_eq!(tree.num_leaves(), 4);
/// let clade = tree.internal_vertices().find(|v| v.comment().is_some()).unwrap();
/// assert_eq!(clade.comment(), Some("&label=\"97\""));
/// ```
#[derive(Debug, Default)]
pub struct NewickParser {
    resolver: LabelResolver,
}

impl NewickParser {
    /// Creates a new [NewickParser] which keeps leaf labels verbatim.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a [LabelResolver] to resolve short/id keys of leaves in Newick
    /// strings to taxon labels.
    pub fn with_resolver(mut self, resolver: LabelResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Parses a single Newick tree, including its terminating `;`.
    ///
    /// # Arguments
    /// * `parser` - The byte parser positioned at the start of a Newick tree string
    ///
    /// # Returns
    /// * `Ok(Tree)` - The parsed phylogenetic tree
    /// * `Err(ParsingError)` - If the Newick format is invalid
    pub fn parse_str(
        &mut self,
        parser: &mut ByteParser,
    ) -> Result<Tree, ParsingError> {
        let mut tree = Tree::new();

        let root_index = self.parse_vertex(parser, &mut tree)?;
        tree.set_root(root_index);

        // Consume the terminating semicolon
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b';') {
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!(
                    "Expected ';' at end of tree but found {:?}",
                    parser.peek().map(|b| b as char)
                ),
            ));
        }

        Ok(tree)
    }

    /// Parses all semicolon-terminated Newick trees until EOF.
    pub fn parse_all(
        &mut self,
        mut parser: ByteParser,
    ) -> Result<Vec<Tree>, ParsingError> {
        let mut trees = Vec::new();

        loop {
            parser.skip_comment_and_whitespace()?;
            if parser.is_eof() {
                break;
            }
            trees.push(self.parse_str(&mut parser)?);
        }

        Ok(trees)
    }

    /// Parses a vertex (either internal vertex or leaf) with its suffix,
    /// adds it to the tree and returns its index:
    /// - Skips leading comments and whitespace
    /// - `(children)` for an internal vertex, a label for a leaf
    /// - `{comment} [label] {comment} [':' {comment} number {comment}]`
    fn parse_vertex(
        &mut self,
        parser: &mut ByteParser,
        tree: &mut Tree,
    ) -> Result<VertexIndex, ParsingError> {
        parser.skip_comment_and_whitespace()?;

        let mut comments = Vec::new();
        let (children, name) = if parser.peek_is(b'(') {
            let children = self.parse_children(parser, tree)?;
            parser.collect_comments(&mut comments)?;
            let label = parse_optional_label(parser)?;
            (children, label)
        } else {
            if parser.is_eof() {
                return Err(ParsingError::unexpected_eof(parser));
            }
            let label = parse_optional_label(parser)?;
            (Vec::new(), label.map(|l| self.resolver.resolve(&l)))
        };

        parser.collect_comments(&mut comments)?;
        let branch_length = parse_branch_length(parser, &mut comments)?;

        let comment = (!comments.is_empty()).then(|| comments.join(COMMENT_SEPARATOR));
        let vertex = Vertex::new(0, children)
            .with_name(name)
            .with_branch_length(branch_length)
            .with_comment(comment);

        Ok(tree.add_vertex(vertex))
    }

    /// Parses children `(vertex, vertex, ...)` and returns their indices:
    /// - Expects parser at opening `(`
    fn parse_children(
        &mut self,
        parser: &mut ByteParser,
        tree: &mut Tree,
    ) -> Result<Vec<VertexIndex>, ParsingError> {
        // Calling method has skipped comments and whitespace
        parser.consume_if(b'(');

        let mut children = vec![self.parse_vertex(parser, tree)?];
        loop {
            parser.skip_comment_and_whitespace()?;
            match parser.peek() {
                Some(b',') => {
                    parser.next_byte();
                    children.push(self.parse_vertex(parser, tree)?);
                }
                Some(b')') => {
                    parser.next_byte();
                    return Ok(children);
                }
                Some(b) => {
                    return Err(ParsingError::invalid_newick_string(
                        parser,
                        format!("Expected ',' or ')' after child but found {:?}", b as char),
                    ));
                }
                None => return Err(ParsingError::unexpected_eof(parser)),
            }
        }
    }
}

/// Parses a quoted or unquoted label at the current position, returning
/// `None` if no (or an empty) label is present.
fn parse_optional_label(
    parser: &mut ByteParser,
) -> Result<Option<String>, ParsingError> {
    let label = if parser.peek() == Some(b'\'') {
        parser.parse_quoted_label()?
    } else {
        parser.parse_unquoted_label(NEWICK_LABEL_DELIMITERS)?
    };

    Ok((!label.is_empty()).then_some(label))
}

/// Parses optional branch length `[:number]`:
/// - Collects comments before and after the number into `comments`
/// - Supports scientific notation (e.g., `1.5e-10`)
///
/// # Returns
/// - [BranchLength] if found branch length and was able to parse it
/// - `None` if found no branch length
/// - [ParsingError] if it couldn't parse branch length value
fn parse_branch_length(
    parser: &mut ByteParser,
    comments: &mut Vec<String>,
) -> Result<Option<BranchLength>, ParsingError> {
    if !parser.consume_if(b':') {
        return Ok(None);
    }
    parser.collect_comments(comments)?;

    let mut branch_length_str = String::new();
    while let Some(b) = parser.peek() {
        // Valid characters for a float: digits, '.', '-', '+', 'e', 'E'
        if b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E') {
            branch_length_str.push(b as char);
            parser.next_byte();
        } else {
            break;
        }
    }

    let branch_length = branch_length_str
        .parse::<f64>()
        .ok()
        .and_then(BranchLength::new)
        .ok_or_else(|| {
            ParsingError::invalid_newick_string(
                parser,
                format!("Invalid branch length: {:?}", branch_length_str),
            )
        })?;

    parser.collect_comments(comments)?;
    Ok(Some(branch_length))
}
