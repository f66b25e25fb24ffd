//! Bracket notation
//!
//! The empty tree is the empty string; a node is `/`, its left child, `\`, its right child.

use super::registry::{FormatError, Formatter};
use crate::tree::Tree;

pub fn to_bracket_str(tree: &Tree) -> String {
    let mut result = String::new();
    append_bracket(&mut result, tree);
    result
}

fn append_bracket(result: &mut String, tree: &Tree) {
    if let Some((left, right)) = tree.children() {
        result.push('/');
        append_bracket(result, left);
        result.push('\\');
        append_bracket(result, right);
    }
}

pub struct BracketFormatter;

impl Formatter for BracketFormatter {
    fn name(&self) -> &'static str {
        "bracket"
    }

    fn render(&self, tree: &Tree) -> Result<String, FormatError> {
        Ok(to_bracket_str(tree))
    }

    fn summary(&self) -> &'static str {
        "Bracket notation: '/' left '\\' right, nothing for the empty tree"
    }

    fn round_trips(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracket() {
        let leaf_pair = Tree::node(Tree::Empty, Tree::Empty);
        assert_eq!(to_bracket_str(&Tree::Empty), "");
        assert_eq!(to_bracket_str(&leaf_pair), "/\\");
        assert_eq!(
            to_bracket_str(&Tree::node(leaf_pair.clone(), leaf_pair)),
            "//\\\\/\\"
        );
    }
}
