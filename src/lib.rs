//! Regex-style pattern matching over sequences of arbitrary items.
//!
//! Patterns are built from values, predicates, and combinators instead of a
//! textual regex syntax, then run against any slice of equality-comparable
//! items: characters, tokens, records, numbers.
//!
//! # Example
//!
//! ```rust
//! use seqpat::{Pattern, either, find_all, search};
//!
//! // Literal sequences match like a regex over arbitrary items.
//! let items = [0, 1, 2, 1, 2, 3];
//! let pat = Pattern::seq([Pattern::lit(1), Pattern::lit(2)]);
//! let m = search(&pat, &items).unwrap();
//! assert_eq!(m.start(), 1);
//! assert_eq!(m.matched(), &[1, 2]);
//!
//! // Predicates stand in for character classes.
//! let small = Pattern::pred(|&x: &i32| x < 10);
//! let pair = Pattern::seq([small.clone(), small]);
//! assert!(seqpat::full_match(&pair, &[3, 4]).is_some());
//!
//! // Combinators add alternation, repetition, lookahead, anchors, ...
//! let ones_or_twos = either([Pattern::lit(1), Pattern::lit(2)]);
//! let found: Vec<_> = find_all(&ones_or_twos, &items[..3]).collect();
//! assert_eq!(found, vec![&[1][..], &[2][..]]);
//! ```
//!
//! # Ordering contract
//!
//! The engine yields candidate parses lazily, and the order they are
//! discovered in is the selection policy: matchers that take a single result
//! ([`match_start`], [`search`]) take the *first* candidate. [`either`]
//! branches in argument order, [`optional`] offers the skip first,
//! [`repeat`] yields repetition counts ascending, [`both`] yields shared
//! end offsets ascending. "First-yielded wins" uniformly; callers wanting
//! the longest parse enumerate via [`advance_one`] or intersect with
//! [`both`].

mod combinators;
mod engine;
mod matchers;
mod matching;
mod pattern;

pub use combinators::{
    any, backreference, both, either, end, lookahead, matching_pair, negate, one_or_more,
    optional, repeat, start, zero_or_more,
};
pub use engine::{advance_one, advance_sequence};
pub use matchers::{
    Scan, SearchAll, find_all, full_match, match_start, scan, search, search_all, search_from,
    split, sub, subn, subn_with,
};
pub use matching::Match;
pub use pattern::{LeafFn, Matches, Outcome, Pattern};
