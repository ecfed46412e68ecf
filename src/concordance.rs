//! Relabeling of internal vertices with concordance factors.
//!
//! IQ-TREE annotates every internal branch of a concordance factor tree with
//! comments such as
//! `[&label="100",sCF/sDF1/sDF2="43.44/42.83/13.73",gCF/gDF1/gDF2/gDFP="40/10/20/30"]`.
//! For each [ConcordanceField], [relabeled] produces an independent copy of
//! the tree whose internal vertices are named by that field's value, ready to
//! be written as plain Newick.

use crate::model::Tree;
use crate::model::annotation::find_value;
use std::path::{Path, PathBuf};

// =#========================================================================#=
// CONCORDANCE FIELD
// =#========================================================================#=
/// Concordance annotation written by IQ-TREE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConcordanceField {
    /// Site concordance: `sCF/sDF1/sDF2`
    Site,
    /// Gene concordance: `gCF/gDF1/gDF2/gDFP`
    Gene,
}

impl ConcordanceField {
    /// All fields, in output order.
    pub const ALL: [ConcordanceField; 2] = [ConcordanceField::Site, ConcordanceField::Gene];

    /// Annotation key of this field.
    pub fn key(&self) -> &'static str {
        match self {
            ConcordanceField::Site => "sCF/sDF1/sDF2",
            ConcordanceField::Gene => "gCF/gDF1/gDF2/gDFP",
        }
    }

    /// Suffix of the output file for this field.
    pub fn file_suffix(&self) -> &'static str {
        match self {
            ConcordanceField::Site => "scf",
            ConcordanceField::Gene => "gcf",
        }
    }

    /// Output path `<prefix>_<suffix>.tre`; the prefix may contain directories.
    ///
    /// # Example
    /// ```
    /// use cftools::concordance::ConcordanceField;
    /// use std::path::PathBuf;
    ///
    /// assert_eq!(ConcordanceField::Site.output_path("out/run1"), PathBuf::from("out/run1_scf.tre"));
    /// ```
    pub fn output_path<P: AsRef<Path>>(&self, prefix: P) -> PathBuf {
        let mut path = prefix.as_ref().as_os_str().to_os_string();
        path.push(format!("_{}.tre", self.file_suffix()));
        PathBuf::from(path)
    }
}

/// Names every internal vertex of `tree` (root included) whose comment has a
/// field with the given key by that field's value, without the enclosing
/// double quotes. Only the first matching field of a vertex is used; all
/// other vertices keep their names.
///
/// Returns the number of relabeled vertices.
///
/// # Example
/// ```
/// use cftools::concordance::relabel;
/// use cftools::newick::parse_str;
///
/// let mut tree = parse_str("(A,(B,C)90[&label=\"90\",sCF/sDF1/sDF2=\"43.44/42.83/13.73\"]);").unwrap();
/// assert_eq!(relabel(&mut tree, "sCF/sDF1/sDF2"), 1);
/// assert_eq!(tree.to_newick(), "(A,(B,C)43.44/42.83/13.73);");
/// ```
pub fn relabel(tree: &mut Tree, key: &str) -> usize {
    let mut count = 0;

    for vertex in tree.internal_vertices_mut() {
        let value = vertex
            .comment()
            .and_then(|comment| find_value(comment, key))
            .map(str::to_string);

        if let Some(value) = value {
            vertex.set_name(value);
            count += 1;
        }
    }

    count
}

/// Returns a relabeled copy of `tree` for the given field together with the
/// number of relabeled vertices, or `None` if no vertex carries the field.
///
/// The given tree is not modified, so the views for different fields are
/// independent of each other.
pub fn relabeled(tree: &Tree, field: ConcordanceField) -> Option<(Tree, usize)> {
    let mut view = tree.clone();
    let count = relabel(&mut view, field.key());

    (count > 0).then_some((view, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::newick::parse_str;

    const BOTH: &str = "((A:1,B:1)[&label=\"100\",sCF/sDF1/sDF2=\"43.44/42.83/13.73\",\
        gCF/gDF1/gDF2/gDFP=\"40/10/20/30\"]:0.5,(C:1,D:1)old:0.5,E:1);";

    #[test]
    fn test_views_are_independent() {
        let tree = parse_str(BOTH).unwrap();

        let (site, site_count) = relabeled(&tree, ConcordanceField::Site).unwrap();
        let (gene, gene_count) = relabeled(&tree, ConcordanceField::Gene).unwrap();

        assert_eq!((site_count, gene_count), (1, 1));
        assert_eq!(site.to_newick(), "((A:1,B:1)43.44/42.83/13.73:0.5,(C:1,D:1)old:0.5,E:1);");
        assert_eq!(gene.to_newick(), "((A:1,B:1)40/10/20/30:0.5,(C:1,D:1)old:0.5,E:1);");
        // Original tree untouched
        assert!(tree.internal_vertices().all(|v| v.name() != Some("43.44/42.83/13.73")));
    }

    #[test]
    fn test_no_annotation_yields_none() {
        let tree = parse_str("((A,B)[&label=\"100\"],C);").unwrap();
        assert!(relabeled(&tree, ConcordanceField::Site).is_none());
        assert!(relabeled(&tree, ConcordanceField::Gene).is_none());
    }

    #[test]
    fn test_leaves_are_never_relabeled() {
        let mut tree = parse_str("(A[&sCF/sDF1/sDF2=\"1/2/3\"],B)[&sCF/sDF1/sDF2=\"4/5/6\"];").unwrap();
        assert_eq!(relabel(&mut tree, "sCF/sDF1/sDF2"), 1);
        assert_eq!(tree.to_newick(), "(A,B)4/5/6;");
    }

    #[test]
    fn test_first_matching_field_wins() {
        let mut tree = parse_str("((A,B)[&gCF/gDF1/gDF2/gDFP=\"1\",gCF/gDF1/gDF2/gDFP=\"2\"],C);").unwrap();
        relabel(&mut tree, ConcordanceField::Gene.key());
        assert_eq!(tree.to_newick(), "((A,B)1,C);");
    }

    #[test]
    fn test_output_paths() {
        assert_eq!(ConcordanceField::Site.output_path("output"), PathBuf::from("output_scf.tre"));
        assert_eq!(ConcordanceField::Gene.output_path("output"), PathBuf::from("output_gcf.tre"));
    }
}
