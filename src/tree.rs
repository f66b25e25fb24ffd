//! Full binary trees
//!
//! A [`Tree`] is either [`Tree::Empty`] or a [`Tree::Node`] owning an ordered pair of
//! sub-trees. Nodes carry no labels: the shape itself is the value.
//!
//! Trees are never mutated once built. Parsing and decoding always build fresh values,
//! and every node exclusively owns its two children, so there is no sharing and no cycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A full binary tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tree {
    /// The leaf (zero) tree
    #[default]
    Empty,
    /// An ordered pair of sub-trees: left, then right
    Node(Box<Tree>, Box<Tree>),
}

impl Tree {
    /// Build a node from its left and right children
    pub fn node(left: Tree, right: Tree) -> Self {
        Tree::Node(Box::new(left), Box::new(right))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Tree::Empty)
    }

    /// The (left, right) children of a node, `None` for the empty tree
    pub fn children(&self) -> Option<(&Tree, &Tree)> {
        match self {
            Tree::Empty => None,
            Tree::Node(left, right) => Some((&**left, &**right)),
        }
    }

    /// Recursion depth needed to reach every `Empty`
    pub fn height(&self) -> usize {
        match self {
            Tree::Empty => 0,
            Tree::Node(left, right) => 1 + left.height().max(right.height()),
        }
    }

    /// Number of `Node`s in the tree
    pub fn node_count(&self) -> usize {
        match self {
            Tree::Empty => 0,
            Tree::Node(left, right) => 1 + left.node_count() + right.node_count(),
        }
    }
}

/// Moves the non-empty children of `tree` onto `pending`, leaving `Empty` behind.
fn detach_children(tree: &mut Tree, pending: &mut Vec<Tree>) {
    if let Tree::Node(left, right) = tree {
        for child in [left, right] {
            if !child.is_empty() {
                pending.push(std::mem::take(&mut **child));
            }
        }
    }
}

// Long prefix or bracket text, or trees built up in code, can nest far deeper than any decoded
// code ever does. The default drop glue would recurse once per level, so tear the tree down
// with an explicit stack instead.
impl Drop for Tree {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(self, &mut pending);
        while let Some(mut tree) = pending.pop() {
            detach_children(&mut tree, &mut pending);
        }
    }
}

/// Displays the prefix notation (`-` for empty, `+` followed by both children).
impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tree::Empty => f.write_str("-"),
            Tree::Node(left, right) => write!(f, "+{left}{right}"),
        }
    }
}
