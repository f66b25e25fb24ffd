//! Treeviz formatter for trees
//!
//! Treeviz draws the tree one line per node, which makes the shape easy to scan. Nesting is
//! shown with connectors and two characters of indentation per level:
//!
//! <prefix><connector><space><label>
//!
//! Example (the tree with code 8, every node filled):
//!
//!   ● 8
//!   ├─ ● 2
//!   │ ├─ ∅
//!   │ └─ ● 1
//!   │   ├─ ∅
//!   │   └─ ∅
//!   └─ ● 1
//!     ├─ ∅
//!     └─ ∅
//!
//! Labels
//!     Node: fill glyph followed by the node's own code
//!         ●  filled under the configured fill mode
//!         ○  not filled
//!     Empty: ∅
//!
//! The left child is always listed before the right one.

use super::registry::{FormatError, Formatter};
use crate::bijection::pair;
use crate::settings::FillMode;
use crate::tree::Tree;
use num_bigint::BigUint;
use num_traits::Zero;

type Codes = std::vec::IntoIter<BigUint>;

pub fn to_treeviz_str(tree: &Tree, fill: FillMode) -> String {
    let mut codes = Vec::new();
    collect_codes(tree, &mut codes);
    let mut codes = codes.into_iter();

    let mut result = String::new();
    result.push_str(&label(tree, fill, &mut codes));
    result.push('\n');
    append_children(&mut result, tree, "", fill, &mut codes);
    result
}

/// Pushes the code of every subtree in pre-order (the order lines are written), building each
/// node's code from its children's so no subtree is encoded twice.
fn collect_codes(tree: &Tree, codes: &mut Vec<BigUint>) -> BigUint {
    let slot = codes.len();
    codes.push(BigUint::zero());
    if let Some((left, right)) = tree.children() {
        let x = collect_codes(left, codes);
        let y = collect_codes(right, codes);
        codes[slot] = pair(&x, &y);
    }
    codes[slot].clone()
}

fn label(tree: &Tree, fill: FillMode, codes: &mut Codes) -> String {
    let code = codes.next().unwrap_or_default();
    if tree.is_empty() {
        return "∅".to_string();
    }
    let glyph = if fill.fills(tree) { "●" } else { "○" };
    format!("{} {}", glyph, code)
}

fn append_children(
    result: &mut String,
    tree: &Tree,
    prefix: &str,
    fill: FillMode,
    codes: &mut Codes,
) {
    if let Some((left, right)) = tree.children() {
        append_node(result, left, prefix, false, fill, codes);
        append_node(result, right, prefix, true, fill, codes);
    }
}

fn append_node(
    result: &mut String,
    tree: &Tree,
    prefix: &str,
    is_last: bool,
    fill: FillMode,
    codes: &mut Codes,
) {
    let connector = if is_last { "└─" } else { "├─" };

    result.push_str(&format!(
        "{}{} {}\n",
        prefix,
        connector,
        label(tree, fill, codes)
    ));

    let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    append_children(result, tree, &new_prefix, fill, codes);
}

#[derive(Debug, Default)]
pub struct TreevizFormatter {
    fill: FillMode,
}

impl TreevizFormatter {
    pub fn new(fill: FillMode) -> Self {
        TreevizFormatter { fill }
    }
}

impl Formatter for TreevizFormatter {
    fn name(&self) -> &'static str {
        "treeviz"
    }

    fn render(&self, tree: &Tree) -> Result<String, FormatError> {
        Ok(to_treeviz_str(tree, self.fill))
    }

    fn summary(&self) -> &'static str {
        "One line per node, with fill markers and node codes"
    }
}
