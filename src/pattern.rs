//! The [`Pattern`] sum type and the [`Outcome`] a leaf reports to the engine.

use std::fmt;
use std::rc::Rc;

use crate::matching::Match;

/// A lazy stream of candidate continuation matches.
///
/// Consumers pull as many candidates as they need; branches never asked for
/// are never computed.
pub type Matches<'a, T> = Box<dyn Iterator<Item = Match<'a, T>> + 'a>;

/// A leaf function: inspects a partial match and reports an [`Outcome`].
pub type LeafFn<T> = dyn for<'a> Fn(Match<'a, T>) -> Outcome<'a, T>;

/// What a leaf function reports for one partial match.
pub enum Outcome<'a, T> {
    /// The pattern does not apply here. Not an error: failure propagates
    /// structurally as an empty candidate stream.
    Fail,
    /// Succeed, consuming `n` items. `Advance(0)` is a zero-width success
    /// (anchors, lookahead), distinct from `Fail`. Advancing past the end of
    /// the sequence is absorbed by the engine as `Fail`, so leaves may report
    /// an advance without a bounds check.
    Advance(usize),
    /// Zero, one, or many continuations, yielded lazily. Combinators use
    /// this to fan out; discovery order is the selection policy for
    /// first-result matchers.
    Branches(Matches<'a, T>),
}

/// A composable specification of what may be matched next.
///
/// The three variants are closed: every combinator and matcher consumes
/// exactly these. A sequence-shaped value meant as a literal item (matching,
/// say, literal tuples) is expressed with [`Pattern::lit`]; the caller's
/// intent lives in the variant tag, never in the shape of the value.
pub enum Pattern<T> {
    /// Matches one item equal to the given value.
    Literal(T),
    /// A predicate or generator function over the partial match.
    Leaf(Rc<LeafFn<T>>),
    /// Sub-patterns applied in order, each step fanning out over the
    /// previous step's candidates.
    Seq(Rc<[Pattern<T>]>),
}

// Manual impl: `Leaf`/`Seq` clone by bumping the shared count, only
// `Literal` needs `T: Clone`.
impl<T: Clone> Clone for Pattern<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Literal(item) => Self::Literal(item.clone()),
            Self::Leaf(f) => Self::Leaf(Rc::clone(f)),
            Self::Seq(parts) => Self::Seq(Rc::clone(parts)),
        }
    }
}

impl<T> Pattern<T> {
    /// A pattern matching one item equal to `item`.
    pub fn lit(item: T) -> Self {
        Self::Literal(item)
    }

    /// An ordered sequence of sub-patterns.
    pub fn seq(parts: impl IntoIterator<Item = Pattern<T>>) -> Self {
        Self::Seq(parts.into_iter().collect())
    }

    /// A pattern matching one item satisfying `pred`.
    ///
    /// Fails at the end of the sequence; the predicate is only called when an
    /// item is available.
    pub fn pred<F>(pred: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        Self::Leaf(leaf_rc(move |m| match m.next() {
            Some(item) if pred(item) => Outcome::Advance(1),
            _ => Outcome::Fail,
        }))
    }

    /// A pattern testing the whole partial match, consuming one item on
    /// success.
    ///
    /// The test sees everything matched so far ([`Match::nth`]) as well as
    /// the upcoming items ([`Match::next`], [`Match::rest`]), so it can
    /// relate the next item to earlier ones.
    pub fn test<F>(test: F) -> Self
    where
        F: for<'a> Fn(&Match<'a, T>) -> bool + 'static,
    {
        Self::Leaf(leaf_rc(move |m| {
            if test(&m) {
                Outcome::Advance(1)
            } else {
                Outcome::Fail
            }
        }))
    }

    /// A fully general leaf reporting any [`Outcome`], including lazy
    /// branch fan-out.
    pub fn leaf<F>(f: F) -> Self
    where
        F: for<'a> Fn(Match<'a, T>) -> Outcome<'a, T> + 'static,
    {
        Self::Leaf(leaf_rc(f))
    }
}

/// Coercion helper: guides closure inference to the higher-ranked leaf
/// signature before erasing to `Rc<LeafFn<T>>`.
pub(crate) fn leaf_rc<T, F>(f: F) -> Rc<LeafFn<T>>
where
    F: for<'a> Fn(Match<'a, T>) -> Outcome<'a, T> + 'static,
{
    Rc::new(f)
}

impl<T: fmt::Debug> fmt::Debug for Pattern<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(item) => f.debug_tuple("Literal").field(item).finish(),
            Self::Leaf(_) => f.write_str("Leaf(..)"),
            Self::Seq(parts) => f.debug_list().entries(parts.iter()).finish(),
        }
    }
}
