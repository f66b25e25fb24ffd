//! Tree grammar
//!
//! A single rule, `tree`, tried as an ordered choice:
//!
//!     1. `/ tree \ tree`   bracket notation
//!     2. `+ tree tree`     prefix notation
//!     3. `[0-9]+`          numeric notation, decoded through the bijection
//!     4. `-`               the empty tree
//!     5. (nothing)         the empty tree
//!
//! Whitespace between tokens is skipped in the first two alternatives only.
//!
//! Validation happens in two layers. The `tree` rule is lenient: in a recursive position it
//! may stop early (the last alternative always matches), which is what lets `/\` and `+12`
//! parse at all. Only [`TreeGrammar::parse`] insists that the whole input was consumed and
//! that exactly one tree came out; anything else is a [`ParseFailure`]. Full consumption is not
//! pushed down into the rule, since that would change which alternative wins in recursive
//! positions.

pub mod reference;

use num_bigint::BigUint;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use tracing::{debug, trace};

use crate::bijection::decode;
use crate::combinators::{
    anchored, choice, discard, epsilon, literal, map, pattern, recursive, sequence, try_map,
    ParseNode, Recursive, Rule,
};
use crate::tree::Tree;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| anchored(r"\s*").unwrap());
static DIGITS: Lazy<Regex> = Lazy::new(|| anchored("[0-9]+").unwrap());

/// The input does not describe exactly one complete tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseFailure;

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("parse failed")
    }
}

impl std::error::Error for ParseFailure {}

/// The built rule set
///
/// Building is cheap, but callers parsing many strings can keep one grammar around.
#[derive(Debug)]
pub struct TreeGrammar {
    tree: Recursive<Tree>,
}

impl TreeGrammar {
    pub fn new() -> Self {
        let tree = recursive(|tree| {
            choice([
                try_map(
                    sequence([
                        literal("/"),
                        whitespace(),
                        tree.clone(),
                        whitespace(),
                        literal("\\"),
                        whitespace(),
                        tree.clone(),
                    ]),
                    node_from_children,
                ),
                try_map(
                    sequence([literal("+"), whitespace(), tree.clone(), whitespace(), tree]),
                    node_from_children,
                ),
                try_map(pattern(&DIGITS), decode_digits),
                map(literal("-"), |_| Tree::Empty),
                map(epsilon(), |_| Tree::Empty),
            ])
        });
        TreeGrammar { tree }
    }

    /// Parse `text`, which must be entirely consumed
    ///
    /// Known limit: every level of nesting costs a couple of dozen stack frames (the choice, the
    /// sequence folds, the reduction and the recursive reference). On a 2 MiB thread in a debug
    /// build, prefix input nested somewhere between 400 and 500 levels deep overflows the stack.
    pub fn parse(&self, text: &str) -> Result<Tree, ParseFailure> {
        let Some(state) = self.tree.run(text) else {
            debug!("no alternative matched");
            return Err(ParseFailure);
        };
        if !state.rest.is_empty() {
            debug!(
                consumed = text.len() - state.rest.len(),
                remaining = state.rest.len(),
                "input not fully consumed"
            );
            return Err(ParseFailure);
        }
        let mut done = state.done.into_iter();
        match (done.next(), done.next()) {
            (Some(ParseNode::Data(tree)), None) => Ok(tree),
            _ => {
                debug!("parse did not reduce to a single tree");
                Err(ParseFailure)
            }
        }
    }
}

impl Default for TreeGrammar {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse any supported notation into a tree
pub fn parse(text: &str) -> Result<Tree, ParseFailure> {
    TreeGrammar::new().parse(text)
}

fn whitespace() -> Rule<Tree> {
    discard(pattern(&WHITESPACE))
}

fn node_from_children(nodes: Vec<ParseNode<'_, Tree>>) -> Option<Tree> {
    let mut children = nodes.into_iter().filter_map(ParseNode::into_data);
    let left = children.next()?;
    let right = children.next()?;
    Some(Tree::node(left, right))
}

fn decode_digits(nodes: Vec<ParseNode<'_, Tree>>) -> Option<Tree> {
    let digits = nodes.first()?.as_terminal()?;
    let magnitude = BigUint::parse_bytes(digits.as_bytes(), 10)?;
    trace!(digits = digits.len(), "decoding numeric notation");
    Some(decode(&magnitude))
}
