//! The backtracking match engine.
//!
//! [`advance_one`] is the single dispatch point: given a pattern and a
//! partial match, it lazily produces every valid continuation. Ordering is
//! part of the contract: first-result matchers select a branch by the order
//! continuations are discovered, so "first-yielded wins" is the engine's
//! greediness policy.

use std::iter;
use std::rc::Rc;

use crate::matching::Match;
use crate::pattern::{Matches, Outcome, Pattern};

/// Expand `pattern` against `m`, yielding every valid continuation.
///
/// - `Literal`: at most one continuation, consuming one equal item.
/// - `Leaf`: the function's [`Outcome`], with an over-long `Advance`
///   absorbed as failure (the "no more items" convention; leaves need not
///   bounds-check).
/// - `Seq`: depth-first expansion of the sub-patterns; each step fans out
///   over the previous step's candidates, and a step with no candidates
///   prunes that branch.
pub fn advance_one<'a, T: PartialEq>(pattern: &Pattern<T>, m: Match<'a, T>) -> Matches<'a, T> {
    match pattern {
        Pattern::Literal(item) => {
            if m.next() == Some(item) {
                Box::new(iter::once(m.advance(1)))
            } else {
                Box::new(iter::empty())
            }
        }
        Pattern::Leaf(f) => match f(m) {
            Outcome::Fail => Box::new(iter::empty()),
            Outcome::Advance(n) if n <= m.n_remaining() => Box::new(iter::once(m.advance(n))),
            Outcome::Advance(_) => Box::new(iter::empty()),
            Outcome::Branches(branches) => branches,
        },
        Pattern::Seq(parts) => advance_sequence(Rc::clone(parts), m),
    }
}

/// Expand an ordered sequence of sub-patterns against `m`.
///
/// Equivalent to folding a working set of candidates through the
/// sub-patterns, but evaluated depth-first so only the consumed prefix of
/// the candidate stream is ever materialized. An empty sequence yields the
/// seed match once.
pub fn advance_sequence<'a, T: PartialEq>(
    parts: Rc<[Pattern<T>]>,
    m: Match<'a, T>,
) -> Matches<'a, T> {
    match parts.first() {
        None => Box::new(iter::once(m)),
        Some(first) => {
            let stack = vec![advance_one(first, m)];
            Box::new(SeqMatches { parts, stack })
        }
    }
}

/// Depth-first backtracking iterator over a sequence pattern.
///
/// `stack[d]` holds the continuation stream produced by `parts[d]`; a match
/// drawn from the final depth is a result, a match drawn earlier opens the
/// next depth, and an exhausted stream backtracks.
struct SeqMatches<'a, T> {
    parts: Rc<[Pattern<T>]>,
    stack: Vec<Matches<'a, T>>,
}

impl<'a, T: PartialEq> Iterator for SeqMatches<'a, T> {
    type Item = Match<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let depth = self.stack.len();
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(m) if depth == self.parts.len() => return Some(m),
                Some(m) => self.stack.push(advance_one(&self.parts[depth], m)),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
