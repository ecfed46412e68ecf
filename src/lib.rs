//! cftools is a small library with two command line tools for phylogenomic
//! pipelines.
//!
//! - `concord_to_newick` reads an IQ-TREE Nexus concordance factor tree and
//!   writes plain Newick trees whose internal vertices are labeled with the
//!   site (`sCF/sDF1/sDF2`) or gene (`gCF/gDF1/gDF2/gDFP`) concordance
//!   factors. See [crate::concordance].
//! - `collate_lengths` merges HybPiper length summary files into one
//!   samples × loci table. See [crate::collate].
//!
//! The tree side rests on a Nexus/Newick reader that keeps the comments
//! attached to vertices:
//! - Nexus: header, optional TAXA block, TREES block with optional TRANSLATE
//!   command; other blocks are skipped.
//! - Newick: trees of arbitrary degree with names, branch lengths and comments.
//! - Tree model: [Tree] stores its vertices in an arena and addresses them by
//!   index. See [crate::model] for more details.
//!
//! # Usage
//! Parse a Newick string and relabel it:
//! ```
//! use cftools::concordance::{relabeled, ConcordanceField};
//! use cftools::parse_newick_str;
//!
//! let tree = parse_newick_str("((A:0.1,B:0.2)[&gCF/gDF1/gDF2/gDFP=\"55.95/19.05/20.24/4.76\"]:0.3,C:0.4);").unwrap();
//! let (gene_view, count) = relabeled(&tree, ConcordanceField::Gene).unwrap();
//!
//! assert_eq!(count, 1);
//! assert_eq!(gene_view.to_newick(), "((A:0.1,B:0.2)55.95/19.05/20.24/4.76:0.3,C:0.4);");
//! ```
//!
//! Parse a Nexus file:
//! ```no_run
//! use cftools::parse_nexus_file;
//!
//! let trees = parse_nexus_file("concord.cf.tree.nex").unwrap();
//! println!("Loaded {} trees", trees.len());
//! ```

pub mod cli;
pub mod collate;
pub mod commands;
pub mod concordance;
pub mod error;
pub mod model;
pub mod newick;
pub mod nexus;
pub mod parser;

use crate::model::Tree;
use crate::parser::parsing_error::ParsingError;
use std::path::Path;

// ============================================================================
// Quick Nexus API
// ============================================================================
/// Parses a NEXUS file, returning all its trees.
///
/// See [`nexus::parse_file`] for full documentation.
pub fn parse_nexus_file<P: AsRef<Path>>(path: P) -> Result<Vec<Tree>, ParsingError> {
    nexus::parse_file(path)
}

// ============================================================================
// Quick Newick API
// ============================================================================
/// Parses a single Newick string.
///
/// See [`newick::parse_str`] for full documentation of this convenience function.
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParsingError> {
    newick::parse_str(newick)
}

/// Parses a file containing a semicolon-separated list of Newick strings.
///
/// See [`newick::parse_file`] for full documentation of this convenience function.
pub fn parse_newick_file<P: AsRef<Path>>(path: P) -> Result<Vec<Tree>, ParsingError> {
    newick::parse_file(path)
}
