//! Reference implementation of the tree grammar on chumsky
//!
//! The same five alternatives in the same order, expressed with chumsky combinators instead of
//! the in-crate engine. Both implementations are PEG-like (greedy repetition, first successful
//! alternative wins, no backtracking into a committed alternative), so they must accept exactly
//! the same inputs and build the same trees. The test suite checks that they do.

use chumsky::prelude::*;
use num_bigint::BigUint;

use super::ParseFailure;
use crate::bijection::decode;
use crate::tree::Tree;

/// Type alias for parser error
type ParserError = Simple<char>;

/// The lenient `tree` rule: it does not require the input to end
pub fn tree_parser() -> impl Parser<char, Tree, Error = ParserError> + Clone {
    recursive(|tree| {
        let bracket = just('/')
            .ignore_then(text::whitespace())
            .ignore_then(tree.clone())
            .then_ignore(text::whitespace())
            .then_ignore(just('\\'))
            .then_ignore(text::whitespace())
            .then(tree.clone())
            .map(|(left, right)| Tree::node(left, right));

        let prefix = just('+')
            .ignore_then(text::whitespace())
            .ignore_then(tree.clone())
            .then_ignore(text::whitespace())
            .then(tree)
            .map(|(left, right)| Tree::node(left, right));

        let number = text::digits::<char, ParserError>(10).try_map(|digits: String, span| {
            BigUint::parse_bytes(digits.as_bytes(), 10)
                .map(|magnitude| decode(&magnitude))
                .ok_or_else(|| Simple::custom(span, "invalid magnitude"))
        });

        let dash = just('-').to(Tree::Empty);

        bracket
            .or(prefix)
            .or(number)
            .or(dash)
            .or(empty().to(Tree::Empty))
    })
}

/// Parse `text` with the reference grammar, requiring the whole input to be consumed
pub fn parse(text: &str) -> Result<Tree, ParseFailure> {
    tree_parser()
        .then_ignore(end())
        .parse(text)
        .map_err(|_| ParseFailure)
}
