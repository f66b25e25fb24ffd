//! Bijection between non-negative integers and full binary trees
//!
//! `encode(Empty) = 0`. A node whose children encode to `x` (left) and `y` (right) encodes to
//! `hi² − lo + 2x + 1` with `lo = min(x, y)` and `hi = max(x, y)`. The min/max symmetrization
//! is what keeps `(x, y)` and `(y, x)` apart: every `n ≥ 1` is hit by exactly one ordered pair.
//!
//! Decoding inverts this with integer arithmetic only. Codes grow doubly exponentially with the
//! height of the tree, so all arithmetic is on [`BigUint`] and the square root is an exact
//! integer Newton iteration rather than a floating point one.
//!
//! These functions recurse (or iterate) over arbitrarily large values; the only limit is the
//! native stack depth, which grows with the height of the tree.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::tree::Tree;

/// The integer code of `tree`
pub fn encode(tree: &Tree) -> BigUint {
    let Some((left, right)) = tree.children() else {
        return BigUint::zero();
    };
    pair(&encode(left), &encode(right))
}

/// The code of a node whose children have codes `x` (left) and `y` (right)
pub fn pair(x: &BigUint, y: &BigUint) -> BigUint {
    let (lo, hi) = if x <= y { (x, y) } else { (y, x) };
    // hi² ≥ lo always holds, but subtract last so the intermediate never goes negative
    hi * hi + x * 2u32 + 1u32 - lo
}

/// The tree whose code is `n`
pub fn decode(n: &BigUint) -> Tree {
    if n.is_zero() {
        return Tree::Empty;
    }
    let offset = n - 1u32;
    let a = isqrt(&offset);
    let b = &offset - &a * &a;
    let (lo, hi) = if a <= b { (&a, &b) } else { (&b, &a) };
    let y = &a * 2u32 - hi;
    Tree::node(decode(lo), decode(&y))
}

/// Floor square root: the largest `r` with `r² ≤ v`
///
/// Newton's method from above. The seed `2^⌈bits/2⌉` is already at least `√v`, which saves the
/// long halving phase a seed of `v` itself would need on large inputs. Each step strictly
/// decreases until the floor root is reached; the first non-decreasing step marks the answer.
pub fn isqrt(v: &BigUint) -> BigUint {
    if *v < BigUint::from(2u32) {
        return v.clone();
    }
    let mut current = BigUint::one() << v.bits().div_ceil(2);
    loop {
        let next = (v / &current + &current) >> 1;
        if next >= current {
            return current;
        }
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    fn leaf_pair() -> Tree {
        Tree::node(Tree::Empty, Tree::Empty)
    }

    #[test]
    fn test_encode_small_trees() {
        assert_eq!(encode(&Tree::Empty), big(0));
        assert_eq!(encode(&leaf_pair()), big(1));
        assert_eq!(encode(&Tree::node(Tree::Empty, leaf_pair())), big(2));
        assert_eq!(encode(&Tree::node(leaf_pair(), leaf_pair())), big(3));
        assert_eq!(encode(&Tree::node(leaf_pair(), Tree::Empty)), big(4));
    }

    #[test]
    fn test_pair_keeps_order_apart() {
        assert_eq!(pair(&big(0), &big(0)), big(1));
        assert_eq!(pair(&big(0), &big(1)), big(2));
        assert_eq!(pair(&big(1), &big(0)), big(4));
        assert_eq!(
            decode(&pair(&big(2), &big(5))),
            Tree::node(decode(&big(2)), decode(&big(5)))
        );
    }

    #[test]
    fn test_decode_small_codes() {
        assert_eq!(decode(&big(0)), Tree::Empty);
        assert_eq!(decode(&big(1)), leaf_pair());
        assert_eq!(decode(&big(3)), Tree::node(leaf_pair(), leaf_pair()));
        assert_eq!(
            decode(&big(5)),
            Tree::node(Tree::Empty, Tree::node(Tree::Empty, leaf_pair()))
        );
        assert_eq!(
            decode(&big(8)),
            Tree::node(Tree::node(Tree::Empty, leaf_pair()), leaf_pair())
        );
    }

    #[test]
    fn test_mirrored_children_get_distinct_codes() {
        let left_heavy = Tree::node(leaf_pair(), Tree::Empty);
        let right_heavy = Tree::node(Tree::Empty, leaf_pair());
        assert_ne!(encode(&left_heavy), encode(&right_heavy));
    }

    #[test]
    fn test_isqrt_boundaries() {
        for root in 0u64..200 {
            let square = root * root;
            assert_eq!(isqrt(&big(square)), big(root));
            assert_eq!(isqrt(&big(square + 2 * root)), big(root));
            if root > 0 {
                assert_eq!(isqrt(&big(square - 1)), big(root - 1));
            }
        }
    }

    #[test]
    fn test_isqrt_large_perfect_square() {
        let root = BigUint::from(10u32).pow(120) + 7u32;
        let square = &root * &root;
        assert_eq!(isqrt(&square), root);
        assert_eq!(isqrt(&(&square - 1u32)), &root - 1u32);
        assert_eq!(isqrt(&(&square + &root * 2u32)), root);
    }

    #[test]
    fn test_roundtrip_beyond_u64() {
        let n = BigUint::from(u64::MAX) * BigUint::from(u64::MAX) + 12_345u32;
        assert_eq!(encode(&decode(&n)), n);
    }
}
