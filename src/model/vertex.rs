//! Vertex module for phylogenetic tree representation.

use crate::model::tree::VertexIndex;
use std::fmt;
use std::ops::Deref;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// Represents a vertex (node) in a rooted phylogenetic [Tree](crate::model::Tree).
///
/// A vertex is
/// - the **root** if it has no parent,
/// - a **leaf** (terminal) if it has no children, and
/// - **internal** (non-terminal) otherwise; the root counts as internal
///   as soon as it has children.
///
/// Besides structure, a vertex carries an optional name, an optional
/// [BranchLength] to its parent and an optional comment, which holds the
/// raw text of the `[...]` comments attached to it in the source file
/// (without brackets, several comments joined by `,`).
///
/// # Invariants
/// - `index` is the position of this vertex in the tree arena
/// - `parent` is `None` only for the root (and during construction)
/// - `children` are kept in source order
#[derive(PartialEq, Debug, Clone)]
pub struct Vertex {
    index: VertexIndex,
    parent: Option<VertexIndex>,
    children: Vec<VertexIndex>,
    name: Option<String>,
    branch_length: Option<BranchLength>,
    comment: Option<String>,
}

impl Vertex {
    /// Creates a new vertex without parent.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `children` - Indices of the children, empty for a leaf
    pub fn new(index: VertexIndex, children: Vec<VertexIndex>) -> Self {
        Vertex {
            index,
            parent: None,
            children,
            name: None,
            branch_length: None,
            comment: None,
        }
    }

    /// Sets the name of this vertex.
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    /// Sets the branch length of this vertex.
    pub fn with_branch_length(mut self, branch_length: Option<BranchLength>) -> Self {
        self.branch_length = branch_length;
        self
    }

    /// Sets the comment of this vertex.
    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> VertexIndex {
        self.index
    }

    /// Returns the index of the parent, or `None` for the root.
    pub fn parent(&self) -> Option<VertexIndex> {
        self.parent
    }

    pub(crate) fn set_index(&mut self, index: VertexIndex) {
        self.index = index;
    }

    pub(crate) fn set_parent(&mut self, parent: VertexIndex) {
        self.parent = Some(parent);
    }

    /// Returns the indices of the children (empty for a leaf).
    pub fn children(&self) -> &[VertexIndex] {
        &self.children
    }

    /// Returns the name of this vertex, if set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Overwrites the name of this vertex.
    pub fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    /// Returns the branch length to the parent, if set.
    pub fn branch_length(&self) -> Option<BranchLength> {
        self.branch_length
    }

    /// Returns the raw comment attached to this vertex, if any.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Returns `true` if this vertex has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if this vertex has at least one child (root included).
    pub fn is_internal(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns `true` if this vertex has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================#=
/// Branch length in a phylogenetic tree, enforced to be finite.
///
/// Represents the evolutionary distance between a vertex and its parent.
/// Displayed with the shortest representation that round-trips, so writing
/// the same tree twice yields identical text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchLength(f64);

impl BranchLength {
    /// Creates a new branch length, or `None` if `length` is not finite.
    pub fn new(length: f64) -> Option<Self> {
        length.is_finite().then_some(BranchLength(length))
    }
}

impl Deref for BranchLength {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl fmt::Display for BranchLength {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
