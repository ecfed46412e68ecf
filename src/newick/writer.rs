//! Newick format writing for [Tree]s.

use crate::model::tree::{Tree, VertexIndex};
use crate::model::vertex::BranchLength;
use crate::parser::utils::escape_label;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Extra buffer in Newick string length/capacity estimate
const BUFFER_CHARS: usize = 10;

/// Writes given list of trees to a file in Newick format, one tree per line.
///
/// Each tree is written as a complete Newick string followed by a newline.
/// The file is created (or truncated) first and flushed before returning.
///
/// # Errors
/// Returns an I/O error if creating or writing the file fails.
///
/// # Example
/// ```ignore
/// use cftools::newick::write_newick_file;
///
/// write_newick_file("relabeled.tre", &[tree])?;
/// ```
pub fn write_newick_file<P: AsRef<Path>>(path: P, trees: &[Tree]) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_newick(&mut writer, trees)?;
    writer.flush()
}

/// Writes given list of trees to a writer in Newick format, one tree per line.
pub fn write_newick<W: Write>(writer: &mut W, trees: &[Tree]) -> io::Result<()> {
    for tree in trees {
        writer.write_all(to_newick(tree).as_bytes())?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Returns the Newick representation of this tree with closing semicolon.
///
/// Internal vertices are written with their name (if any) after the closing
/// parenthesis, so relabeled concordance values end up as internal labels.
/// Comments are not written. A tree without root yields just `;`.
///
/// # Example
/// ```
/// use cftools::model::{BranchLength, Tree, Vertex};
/// use cftools::newick::to_newick;
///
/// let mut tree = Tree::new();
/// let a = tree.add_vertex(Vertex::new(0, vec![])
///     .with_name(Some("A".to_string()))
///     .with_branch_length(BranchLength::new(1.0)));
/// let b = tree.add_vertex(Vertex::new(0, vec![])
///     .with_name(Some("B".to_string()))
///     .with_branch_length(BranchLength::new(2.5)));
/// let root = tree.add_vertex(Vertex::new(0, vec![a, b]).with_name(Some("100".to_string())));
/// tree.set_root(root);
///
/// assert_eq!(to_newick(&tree), "(A:1,B:2.5)100;");
/// ```
pub fn to_newick(tree: &Tree) -> String {
    // Helper for adding name and branch length
    fn build_newick_suffix(newick: &mut String, name: Option<&str>, branch_length: Option<BranchLength>) {
        if let Some(name) = name {
            newick.push_str(&escape_label(name));
        }
        if let Some(branch_length) = branch_length {
            newick.push(':');
            newick.push_str(&branch_length.to_string());
        }
    }

    // Recursive helper for building the Newick string
    fn build_newick(tree: &Tree, newick: &mut String, index: VertexIndex) {
        let vertex = &tree[index];

        if vertex.is_internal() {
            newick.push('(');
            for (i, &child) in vertex.children().iter().enumerate() {
                if i > 0 {
                    newick.push(',');
                }
                build_newick(tree, newick, child);
            }
            newick.push(')');
        }

        build_newick_suffix(newick, vertex.name(), vertex.branch_length());
    }

    let mut newick = String::with_capacity(estimate_newick_len(tree));
    if let Some(root_index) = tree.root_index() {
        build_newick(tree, &mut newick, root_index);
    }
    newick.push(';');

    newick
}

/// Estimates the length of a Newick string for a given tree.
///
/// The estimate is used to pre-allocate string capacity.
pub(crate) fn estimate_newick_len(tree: &Tree) -> usize {
    // Each internal vertex: "()" plus one ',' per child
    const INTERNAL_VERTEX_CHARS: usize = 2;
    // Branch lengths: ~20 chars each (e.g., ":0.009529961339106089")
    const BRANCH_LENGTH_CHARS: usize = 20;

    let structure_capacity = tree.num_internal() * INTERNAL_VERTEX_CHARS + tree.num_vertices();

    let label_capacity: usize = tree
        .pre_order_iter()
        .filter_map(|v| v.name())
        .map(str::len)
        .sum();

    let branch_capacity = tree
        .pre_order_iter()
        .filter(|v| v.branch_length().is_some())
        .count()
        * BRANCH_LENGTH_CHARS;

    structure_capacity + label_capacity + branch_capacity + BUFFER_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Vertex;

    #[test]
    fn test_multifurcation_and_escaping() {
        let mut tree = Tree::new();
        let a = tree.add_leaf("Baillon's Crake");
        let b = tree.add_leaf("Spotless Crake");
        let c = tree.add_leaf("Pukeko");
        let root = tree.add_vertex(Vertex::new(0, vec![a, b, c]));
        tree.set_root(root);

        assert_eq!(to_newick(&tree), "('Baillon''s Crake',Spotless_Crake,Pukeko);");
    }

    #[test]
    fn test_root_branch_length_is_written() {
        let mut tree = Tree::new();
        let a = tree.add_leaf("A");
        let root = tree.add_vertex(
            Vertex::new(0, vec![a]).with_branch_length(BranchLength::new(0.25)),
        );
        tree.set_root(root);

        assert_eq!(to_newick(&tree), "(A):0.25;");
    }

    #[test]
    fn test_comments_are_not_written() {
        let mut tree = Tree::new();
        let a = tree.add_leaf("A");
        let b = tree.add_leaf("B");
        let root = tree.add_vertex(
            Vertex::new(0, vec![a, b]).with_comment(Some("&label=\"100\"".to_string())),
        );
        tree.set_root(root);

        assert_eq!(to_newick(&tree), "(A,B);");
    }

    #[test]
    fn test_write_newick_one_tree_per_line() {
        let mut tree = Tree::new();
        let a = tree.add_leaf("A");
        let b = tree.add_leaf("B");
        let root = tree.add_vertex(Vertex::new(0, vec![a, b]));
        tree.set_root(root);

        let mut out = Vec::new();
        write_newick(&mut out, &[tree.clone(), tree]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "(A,B);\n(A,B);\n");
    }

    #[test]
    fn test_quoted_name_survives_reparsing() {
        let mut tree = crate::newick::parse_str("((A,B)[&sCF/sDF1/sDF2=\"'x'\"],C);").unwrap();
        crate::concordance::relabel(&mut tree, "sCF/sDF1/sDF2");

        let newick = to_newick(&tree);
        assert_eq!(newick, "((A,B)'''x''',C);");

        let reparsed = crate::newick::parse_str(&newick).unwrap();
        let internal: Vec<_> = reparsed.internal_vertices().filter_map(|v| v.name()).collect();
        assert_eq!(internal, vec!["'x'"]);
    }
}
