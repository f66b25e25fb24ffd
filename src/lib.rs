//! # treenum
//!
//! Notations for full binary trees, and an exact bijection between those trees and the
//! non-negative integers.
//!
//! A tree can be written three equivalent ways, all accepted by [`parse`]:
//!
//!     prefix    `+--`     `+` left right, `-` for the empty tree
//!     bracket   `/\`      `/` left `\` right, nothing for the empty tree
//!     decimal   `1`       the tree's integer code
//!
//! Layout:
//!
//! - [`tree`]: the [`Tree`] value
//! - [`combinators`]: a small backtracking parser combinator engine
//! - [`grammar`]: the tree grammar built on it (and a chumsky reference twin)
//! - [`bijection`]: [`encode`] / [`decode`] and the exact integer square root
//! - [`formats`]: serializers behind a name-based registry
//! - [`settings`]: layered TOML configuration

pub mod bijection;
pub mod combinators;
pub mod formats;
pub mod grammar;
pub mod settings;
pub mod tree;

pub use bijection::{decode, encode, isqrt};
pub use grammar::{parse, ParseFailure, TreeGrammar};
pub use tree::Tree;
