//! Data structures for representing phylogenetic trees.
//!
//! - [Tree] owns its [Vertex]es in an arena, addressed by [VertexIndex]
//! - [AnnotationField] gives access to `key=value` annotation comments
//! - [LabelResolver] maps TRANSLATE keys and taxon indices to taxon names

pub mod annotation;
pub mod label_resolver;
pub mod tree;
pub mod vertex;

pub use annotation::AnnotationField;
pub use label_resolver::LabelResolver;
pub use tree::{Tree, VertexIndex};
pub use vertex::{BranchLength, Vertex};
