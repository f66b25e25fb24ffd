//! Numeric notation: the decimal code of the tree under the bijection

use super::registry::{FormatError, Formatter};
use crate::bijection::encode;
use crate::tree::Tree;

pub fn to_decimal_str(tree: &Tree) -> String {
    encode(tree).to_string()
}

pub struct DecimalFormatter;

impl Formatter for DecimalFormatter {
    fn name(&self) -> &'static str {
        "decimal"
    }

    fn render(&self, tree: &Tree) -> Result<String, FormatError> {
        Ok(to_decimal_str(tree))
    }

    fn summary(&self) -> &'static str {
        "Decimal integer code of the tree"
    }

    fn round_trips(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal() {
        let leaf_pair = Tree::node(Tree::Empty, Tree::Empty);
        assert_eq!(to_decimal_str(&Tree::Empty), "0");
        assert_eq!(to_decimal_str(&leaf_pair), "1");
        assert_eq!(
            to_decimal_str(&Tree::node(leaf_pair.clone(), leaf_pair)),
            "3"
        );
    }
}
