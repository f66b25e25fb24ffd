//! Backtracking parser combinators over string slices
//!
//! A [`Rule`] is a function from a [`ParseState`] (remaining input plus the nodes produced so
//! far) to a new state, or to failure. Failure carries no cause. Nothing is shared or mutated
//! between attempts: an ordered choice re-runs each alternative from the same input slice.
//!
//! Primitives:
//!     - [`literal`]: an exact prefix, produces a terminal node
//!     - [`pattern`]: a regex match at the start of the input, produces a terminal node
//!     - [`epsilon`]: always succeeds, consumes and produces nothing
//!     - [`never`]: always fails
//!
//! Combinators:
//!     - [`sequence`] / [`Rule::then`]: run rules one after another
//!     - [`choice`] / [`Rule::or`]: first successful alternative wins (no longest match)
//!     - [`map`] / [`try_map`]: reduce the nodes a rule produced into one data node
//!     - [`discard`]: advance past a match but drop what it produced
//!     - [`Recursive`]: declare a rule first, refer to it, define it afterwards
//!
//! Ordered choice without memoization can take exponential time on grammars with long shared
//! prefixes. The grammars built here are small and do not hit that case.

use once_cell::unsync::OnceCell;
use regex::Regex;
use std::fmt;
use std::rc::Rc;

/// One intermediate result produced while parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseNode<'i, T> {
    /// Text matched by a literal or a pattern
    Terminal(&'i str),
    /// A value reduced by [`map`] or [`try_map`]
    Data(T),
}

impl<'i, T> ParseNode<'i, T> {
    pub fn into_data(self) -> Option<T> {
        match self {
            ParseNode::Data(data) => Some(data),
            ParseNode::Terminal(_) => None,
        }
    }

    pub fn as_terminal(&self) -> Option<&'i str> {
        match self {
            ParseNode::Terminal(text) => Some(*text),
            ParseNode::Data(_) => None,
        }
    }
}

/// Remaining input and the nodes produced so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseState<'i, T> {
    pub rest: &'i str,
    pub done: Vec<ParseNode<'i, T>>,
}

impl<'i, T> ParseState<'i, T> {
    /// A state positioned at the start of `input` with nothing produced yet
    pub fn start(input: &'i str) -> Self {
        ParseState {
            rest: input,
            done: Vec::new(),
        }
    }

    /// Continue with the outcome of a sub-parse that started at `self.rest`
    fn absorb(mut self, produced: ParseState<'i, T>) -> Self {
        if self.done.is_empty() {
            return produced;
        }
        self.done.extend(produced.done);
        self.rest = produced.rest;
        self
    }

    fn push(mut self, rest: &'i str, node: ParseNode<'i, T>) -> Self {
        self.done.push(node);
        self.rest = rest;
        self
    }
}

/// `None` is a parse failure
pub type ParseResult<'i, T> = Option<ParseState<'i, T>>;

type ParseFn<T> = dyn for<'i> Fn(ParseState<'i, T>) -> ParseResult<'i, T>;

/// A parser producing nodes of type `T`
///
/// Cloning a rule is cheap; clones share the same underlying parser.
pub struct Rule<T> {
    parse: Rc<ParseFn<T>>,
}

impl<T> Clone for Rule<T> {
    fn clone(&self) -> Self {
        Rule {
            parse: Rc::clone(&self.parse),
        }
    }
}

impl<T> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").finish_non_exhaustive()
    }
}

impl<T: 'static> Rule<T> {
    pub fn new<F>(parse: F) -> Self
    where
        F: for<'i> Fn(ParseState<'i, T>) -> ParseResult<'i, T> + 'static,
    {
        Rule {
            parse: Rc::new(parse),
        }
    }

    /// Apply the rule to a state
    pub fn parse<'i>(&self, state: ParseState<'i, T>) -> ParseResult<'i, T> {
        (self.parse)(state)
    }

    /// Apply the rule to a fresh state over `input`
    pub fn run<'i>(&self, input: &'i str) -> ParseResult<'i, T> {
        self.parse(ParseState::start(input))
    }

    /// Sequential composition: `self`, then `next` on what remains
    pub fn then(self, next: Rule<T>) -> Rule<T> {
        let first = self;
        Rule::new(move |state| next.parse(first.parse(state)?))
    }

    /// Ordered alternation: `self`, or `other` from the same position if `self` fails
    pub fn or(self, other: Rule<T>) -> Rule<T> {
        let first = self;
        Rule::new(move |state| {
            let rest = state.rest;
            let produced = first.run(rest).or_else(|| other.run(rest))?;
            Some(state.absorb(produced))
        })
    }
}

/// Matches `expected` exactly
pub fn literal<T: 'static>(expected: &str) -> Rule<T> {
    let expected = expected.to_owned();
    Rule::new(move |state| {
        let input = state.rest;
        let rest = input.strip_prefix(expected.as_str())?;
        let matched = &input[..expected.len()];
        Some(state.push(rest, ParseNode::Terminal(matched)))
    })
}

/// Matches `regex` at the start of the remaining input
///
/// Compile the regex with [`anchored`] so a failed match does not scan the whole input.
pub fn pattern<T: 'static>(regex: &Regex) -> Rule<T> {
    let regex = regex.clone();
    Rule::new(move |state| {
        let input = state.rest;
        let found = regex.find(input).filter(|found| found.start() == 0)?;
        Some(state.push(&input[found.end()..], ParseNode::Terminal(found.as_str())))
    })
}

/// Compile `expr` so that it only matches at the start of the haystack
pub fn anchored(expr: &str) -> Result<Regex, regex::Error> {
    if expr.starts_with('^') {
        Regex::new(expr)
    } else {
        Regex::new(&format!("^(?:{expr})"))
    }
}

/// Always succeeds without consuming input; the identity of [`sequence`]
pub fn epsilon<T: 'static>() -> Rule<T> {
    Rule::new(|state| Some(state))
}

/// Always fails; the identity of [`choice`]
pub fn never<T: 'static>() -> Rule<T> {
    Rule::new(|_| None)
}

/// Runs every rule in order, failing as soon as one fails
pub fn sequence<T: 'static>(rules: impl IntoIterator<Item = Rule<T>>) -> Rule<T> {
    rules.into_iter().fold(epsilon(), Rule::then)
}

/// Tries every rule in order from the same position; the first success wins
pub fn choice<T: 'static>(rules: impl IntoIterator<Item = Rule<T>>) -> Rule<T> {
    rules.into_iter().fold(never(), Rule::or)
}

/// Runs `rule` on a fresh state and replaces what it produced with `reduce(nodes)`
pub fn map<T, F>(rule: Rule<T>, reduce: F) -> Rule<T>
where
    T: 'static,
    F: for<'i> Fn(Vec<ParseNode<'i, T>>) -> T + 'static,
{
    Rule::new(move |state| {
        let produced = rule.run(state.rest)?;
        let value = reduce(produced.done);
        Some(state.push(produced.rest, ParseNode::Data(value)))
    })
}

/// Like [`map`], but the rule fails when `reduce` returns `None`
pub fn try_map<T, F>(rule: Rule<T>, reduce: F) -> Rule<T>
where
    T: 'static,
    F: for<'i> Fn(Vec<ParseNode<'i, T>>) -> Option<T> + 'static,
{
    Rule::new(move |state| {
        let produced = rule.run(state.rest)?;
        let value = reduce(produced.done)?;
        Some(state.push(produced.rest, ParseNode::Data(value)))
    })
}

/// Runs `rule` and keeps its progress through the input, but none of its nodes
pub fn discard<T: 'static>(rule: Rule<T>) -> Rule<T> {
    Rule::new(move |state| {
        let produced = rule.run(state.rest)?;
        Some(ParseState {
            rest: produced.rest,
            done: state.done,
        })
    })
}

/// A rule that can be referred to before it is defined
///
/// References handed out by [`Recursive::reference`] look the rule up each time they run, so a
/// rule may contain references to itself. They hold a weak link to the declaration: the
/// `Recursive` value owns the rule, and a reference fails once it has been dropped (or while
/// the rule is still undefined).
pub struct Recursive<T> {
    slot: Rc<OnceCell<Rule<T>>>,
}

impl<T: 'static> Recursive<T> {
    pub fn declare() -> Self {
        Recursive {
            slot: Rc::new(OnceCell::new()),
        }
    }

    pub fn reference(&self) -> Rule<T> {
        let slot = Rc::downgrade(&self.slot);
        Rule::new(move |state| slot.upgrade()?.get()?.parse(state))
    }

    /// Bind the rule. A second definition is refused and handed back.
    pub fn define(&self, rule: Rule<T>) -> Result<(), Rule<T>> {
        self.slot.set(rule)
    }

    pub fn is_defined(&self) -> bool {
        self.slot.get().is_some()
    }

    pub fn parse<'i>(&self, state: ParseState<'i, T>) -> ParseResult<'i, T> {
        self.slot.get()?.parse(state)
    }

    pub fn run<'i>(&self, input: &'i str) -> ParseResult<'i, T> {
        self.parse(ParseState::start(input))
    }
}

impl<T> fmt::Debug for Recursive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recursive")
            .field("defined", &self.slot.get().is_some())
            .finish()
    }
}

/// Declare a rule and define it from a reference to itself
pub fn recursive<T, F>(build: F) -> Recursive<T>
where
    T: 'static,
    F: FnOnce(Rule<T>) -> Rule<T>,
{
    let declared = Recursive::declare();
    let rule = build(declared.reference());
    // A fresh declaration is always undefined, so this cannot be refused.
    let _ = declared.define(rule);
    declared
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits() -> Rule<u64> {
        pattern(&anchored("[0-9]+").unwrap())
    }

    fn terminals<T>(state: &ParseState<'_, T>) -> Vec<String> {
        state
            .done
            .iter()
            .filter_map(|node| node.as_terminal())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_literal_consumes_prefix() {
        let state = literal::<u64>("ab").run("abc").unwrap();
        assert_eq!(state.rest, "c");
        assert_eq!(state.done, vec![ParseNode::Terminal("ab")]);
    }

    #[test]
    fn test_literal_fails_without_prefix() {
        assert!(literal::<u64>("ab").run("ba").is_none());
        assert!(literal::<u64>("ab").run("a").is_none());
    }

    #[test]
    fn test_pattern_only_matches_at_start() {
        let state = digits().run("42x").unwrap();
        assert_eq!(state.rest, "x");
        assert_eq!(terminals(&state), vec!["42"]);

        assert!(digits().run("x42").is_none());
        // Unanchored regexes are still held to the start of the input
        assert!(pattern::<u64>(&Regex::new("[0-9]+").unwrap())
            .run("x42")
            .is_none());
    }

    #[test]
    fn test_anchored_wraps_alternation() {
        let regex = anchored("a|b").unwrap();
        assert!(!regex.is_match("cb"));
        assert!(regex.is_match("bc"));
        assert_eq!(anchored("^x").unwrap().as_str(), "^x");
    }

    #[test]
    fn test_epsilon_and_never() {
        let state = epsilon::<u64>().run("abc").unwrap();
        assert_eq!(state, ParseState::start("abc"));
        assert!(never::<u64>().run("abc").is_none());
        assert!(never::<u64>().run("").is_none());
    }

    #[test]
    fn test_empty_sequence_is_epsilon_and_empty_choice_is_never() {
        assert_eq!(
            sequence::<u64>(Vec::new()).run("abc"),
            Some(ParseState::start("abc"))
        );
        assert!(choice::<u64>(Vec::new()).run("abc").is_none());
    }

    #[test]
    fn test_sequence_threads_input() {
        let rule = sequence([literal::<u64>("a"), digits(), literal("b")]);
        let state = rule.run("a12bc").unwrap();
        assert_eq!(state.rest, "c");
        assert_eq!(terminals(&state), vec!["a", "12", "b"]);
    }

    #[test]
    fn test_sequence_short_circuits() {
        let rule = sequence([literal::<u64>("a"), digits(), literal("b")]);
        assert!(rule.run("a12c").is_none());
        assert!(rule.run("ab").is_none());
    }

    #[test]
    fn test_sequence_is_associative() {
        let grouped_left = sequence([
            sequence([literal::<u64>("a"), literal("b")]),
            literal("c"),
        ]);
        let grouped_right = sequence([
            literal::<u64>("a"),
            sequence([literal("b"), literal("c")]),
        ]);
        assert_eq!(grouped_left.run("abcd"), grouped_right.run("abcd"));
    }

    #[test]
    fn test_choice_takes_first_success_not_longest() {
        let rule = choice([literal::<u64>("a"), literal("ab")]);
        assert_eq!(rule.run("ab").unwrap().rest, "b");
    }

    #[test]
    fn test_choice_retries_from_original_position() {
        let rule = choice([
            sequence([literal::<u64>("a"), literal("x")]),
            literal("ab"),
        ]);
        let state = rule.run("ab").unwrap();
        assert_eq!(state.rest, "");
        assert_eq!(terminals(&state), vec!["ab"]);
    }

    #[test]
    fn test_choice_keeps_earlier_nodes() {
        let rule = sequence([
            literal::<u64>("<"),
            choice([literal("x"), literal("y")]),
            literal(">"),
        ]);
        let state = rule.run("<y>").unwrap();
        assert_eq!(terminals(&state), vec!["<", "y", ">"]);
    }

    #[test]
    fn test_map_reduces_to_one_data_node() {
        let number = map(digits(), |nodes| {
            nodes[0]
                .as_terminal()
                .and_then(|text| text.parse().ok())
                .unwrap_or_default()
        });
        let rule = sequence([literal("#"), number]);
        let state = rule.run("#17;").unwrap();
        assert_eq!(state.rest, ";");
        assert_eq!(
            state.done,
            vec![ParseNode::Terminal("#"), ParseNode::Data(17)]
        );
    }

    #[test]
    fn test_try_map_fails_on_rejected_reduction() {
        let small = try_map(digits(), |nodes| {
            nodes[0]
                .as_terminal()
                .and_then(|text| text.parse::<u64>().ok())
                .filter(|value| *value < 100)
        });
        assert_eq!(
            small.run("42").unwrap().done,
            vec![ParseNode::Data(42)]
        );
        assert!(small.run("420").is_none());
    }

    #[test]
    fn test_discard_advances_without_nodes() {
        let whitespace = discard(pattern::<u64>(&anchored(r"\s*").unwrap()));
        let rule = sequence([literal("a"), whitespace, literal("b")]);
        let state = rule.run("a   b").unwrap();
        assert_eq!(state.rest, "");
        assert_eq!(terminals(&state), vec!["a", "b"]);
    }

    fn nesting_depth() -> Recursive<u64> {
        recursive(|depth| {
            choice([
                map(
                    sequence([literal("("), depth, literal(")")]),
                    |nodes| {
                        1 + nodes
                            .into_iter()
                            .filter_map(ParseNode::into_data)
                            .sum::<u64>()
                    },
                ),
                map(epsilon(), |_| 0),
            ])
        })
    }

    #[test]
    fn test_recursive_rule_refers_to_itself() {
        let depth = nesting_depth();
        assert!(depth.is_defined());
        let state = depth.run("((()))").unwrap();
        assert_eq!(state.rest, "");
        assert_eq!(state.done, vec![ParseNode::Data(3)]);

        let state = depth.run("(()").unwrap();
        assert_eq!(state.rest, "(()");
        assert_eq!(state.done, vec![ParseNode::Data(0)]);
    }

    #[test]
    fn test_reference_fails_before_definition_and_after_drop() {
        let declared = Recursive::<u64>::declare();
        let reference = declared.reference();
        assert!(reference.run("").is_none());

        declared.define(epsilon()).unwrap();
        assert!(reference.run("").is_some());
        assert!(declared.define(never()).is_err());

        drop(declared);
        assert!(reference.run("").is_none());
    }
}
