//! Prefix notation
//!
//! `-` for the empty tree, `+` followed by the left and then the right child. Whitespace free.

use super::registry::{FormatError, Formatter};
use crate::tree::Tree;

pub fn to_prefix_str(tree: &Tree) -> String {
    tree.to_string()
}

pub struct PrefixFormatter;

impl Formatter for PrefixFormatter {
    fn name(&self) -> &'static str {
        "prefix"
    }

    fn render(&self, tree: &Tree) -> Result<String, FormatError> {
        Ok(to_prefix_str(tree))
    }

    fn summary(&self) -> &'static str {
        "Prefix notation: '+' left right, '-' for the empty tree"
    }

    fn round_trips(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix() {
        let leaf_pair = Tree::node(Tree::Empty, Tree::Empty);
        assert_eq!(to_prefix_str(&Tree::Empty), "-");
        assert_eq!(to_prefix_str(&leaf_pair), "+--");
        assert_eq!(
            to_prefix_str(&Tree::node(Tree::Empty, leaf_pair)),
            "+-+--"
        );
    }
}
