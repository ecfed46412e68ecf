//! Tree module for phylogenetic tree representation.
//!
//! This module provides [Tree], a rooted tree of arbitrary degree stored
//! with the arena pattern, and [VertexIndex] to address its vertices.

use crate::model::vertex::Vertex;
use crate::newick::writer;
use std::ops::Index;

/// Index of a vertex in a tree (arena).
pub type VertexIndex = usize;

// =#========================================================================#=
// TREE
// =#========================================================================#=
/// A rooted phylogenetic tree represented using the arena pattern on [Vertex].
///
/// Vertices are stored in a contiguous vector and referenced by [VertexIndex].
/// The tree owns all of its vertices; cloning a tree yields a fully
/// independent copy.
///
/// # Structure
/// - All vertices (root, internal, and leaves) are stored in the arena
/// - Index of root is maintained once set
/// - No assumption on order of indices (bottom-up construction puts
///   children before their parent)
/// - Vertices may have any number of children, so multifurcations such as
///   the trifurcating root of an unrooted tree are representable
///
/// # Construction
/// Add vertices bottom-up with [Tree::add_vertex], then mark the root with
/// [Tree::set_root]. Test validity with [Tree::is_valid].
///
/// # Example
/// ```
/// use cftools::model::{Tree, Vertex};
///
/// // Create a tree: (A,B,(C,D)X);
/// let mut tree = Tree::new();
/// let a = tree.add_leaf("A");
/// let b = tree.add_leaf("B");
/// let c = tree.add_leaf("C");
/// let d = tree.add_leaf("D");
/// let x = tree.add_vertex(Vertex::new(0, vec![c, d]).with_name(Some("X".to_string())));
/// let root = tree.add_vertex(Vertex::new(0, vec![a, b, x]));
/// tree.set_root(root);
///
/// assert!(tree.is_valid());
/// assert_eq!(tree.num_leaves(), 4);
/// assert_eq!(tree.num_internal(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Tree {
    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex>,

    /// Index of the root of this tree, once set
    root_index: Option<VertexIndex>,

    /// Name of tree; optional, e.g. when parsed from Nexus file
    name: Option<String>,

    /// Rooting as declared by a `[&R]` / `[&U]` comment, if any
    rooted: Option<bool>,
}

// ============================================================================
// Construction (pub)
// ============================================================================
impl Tree {
    /// Creates a new empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vertex to the tree, assigning it the next free index, which gets returned.
    ///
    /// The index stored in `vertex` is overwritten, and the parent of each of
    /// its children is set to the new vertex.
    ///
    /// # Panics
    /// Panics if a child index does not refer to a vertex added before.
    pub fn add_vertex(&mut self, mut vertex: Vertex) -> VertexIndex {
        let index = self.vertices.len();
        vertex.set_index(index);

        for &child in vertex.children() {
            self.vertices[child].set_parent(index);
        }
        self.vertices.push(vertex);

        index
    }

    /// Convenience method to add a named leaf without branch length.
    pub fn add_leaf(&mut self, name: &str) -> VertexIndex {
        self.add_vertex(Vertex::new(0, Vec::new()).with_name(Some(name.to_string())))
    }

    /// Marks the vertex at `index` as the root of this tree.
    pub fn set_root(&mut self, index: VertexIndex) {
        self.root_index = Some(index);
    }

    /// Attaches a name to this tree.
    pub fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    /// Sets the declared rooting of this tree.
    pub fn set_rooted(&mut self, rooted: Option<bool>) {
        self.rooted = rooted;
    }
}

// ============================================================================
// Getters / Accessors, etc. (pub)
// ============================================================================
impl Tree {
    /// Returns the name of this tree, or `None` if not set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the declared rooting: `Some(true)` for `[&R]`,
    /// `Some(false)` for `[&U]`, `None` if not declared.
    pub fn rooted(&self) -> Option<bool> {
        self.rooted
    }

    /// Returns the index of the root, or `None` if not set yet.
    pub fn root_index(&self) -> Option<VertexIndex> {
        self.root_index
    }

    /// Returns a reference to the root vertex, or `None` if not set yet.
    pub fn root(&self) -> Option<&Vertex> {
        self.root_index.map(|index| &self.vertices[index])
    }

    /// Returns a reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex(&self, index: VertexIndex) -> &Vertex {
        &self.vertices[index]
    }

    /// Returns the number of vertices in this tree.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_leaf()).count()
    }

    /// Returns the number of internal vertices (root included) in this tree.
    pub fn num_internal(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_internal()).count()
    }

    /// Returns an iterator over all leaves, in arena order.
    pub fn leaves(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter().filter(|v| v.is_leaf())
    }

    /// Returns a lazy iterator visiting every internal vertex (root
    /// included) exactly once, in arena order.
    pub fn internal_vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter().filter(|v| v.is_internal())
    }

    /// Mutable counterpart of [internal_vertices](Self::internal_vertices).
    pub fn internal_vertices_mut(&mut self) -> impl Iterator<Item = &mut Vertex> {
        self.vertices.iter_mut().filter(|v| v.is_internal())
    }

    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root index is set and in bounds, and the root has no parent
    /// - All vertex indices match their position in the arena
    /// - All child indices are valid and point back to correct parent
    /// - All non-root vertices have a parent that lists them as child
    /// - Every vertex is reachable from the root
    pub fn is_valid(&self) -> bool {
        let Some(root_index) = self.root_index else {
            return false;
        };
        if root_index >= self.vertices.len() || !self.vertices[root_index].is_root() {
            return false;
        }

        for (index, vertex) in self.vertices.iter().enumerate() {
            if vertex.index() != index {
                return false;
            }

            for &child in vertex.children() {
                if child >= self.vertices.len() || self.vertices[child].parent() != Some(index) {
                    return false;
                }
            }

            if index != root_index {
                match vertex.parent() {
                    None => return false,
                    Some(parent) => {
                        if parent >= self.vertices.len()
                            || !self.vertices[parent].children().contains(&index)
                        {
                            return false;
                        }
                    }
                }
            }
        }

        self.pre_order_iter().count() == self.vertices.len()
    }

    /// Returns the Newick representation of this tree with closing semicolon.
    ///
    /// See [to_newick](crate::newick::to_newick).
    pub fn to_newick(&self) -> String {
        writer::to_newick(self)
    }
}

impl Index<VertexIndex> for Tree {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
impl Tree {
    /// Returns an iterator over the tree in pre-order (parents before children,
    /// children in source order).
    ///
    /// Yields nothing if the root has not been set.
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
pub struct PreOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<VertexIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a Tree) -> Self {
        let stack = tree.root_index.into_iter().collect();
        PreOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let vertex = &self.tree[index];

        // Push children in reverse, so the first child is processed first
        self.stack.extend(vertex.children().iter().rev());

        Some(vertex)
    }
}
