//! The [`Match`] view: a candidate parse of a sub-run of items.
//!
//! All positions are indices into the item slice supplied by the caller.

use std::fmt;

/// A view over `items[start..end]` describing one candidate parse.
///
/// Matches are immutable and `Copy`: extending a match with [`Match::advance`]
/// produces a new value, so the engine can branch from a partial match as
/// many times as it likes. The invariant `start <= end <= items.len()` holds
/// for every `Match` the engine produces.
pub struct Match<'a, T> {
    items: &'a [T],
    start: usize,
    end: usize,
}

// Manual impls: the derives would require `T: Clone`/`T: Copy`, but only the
// slice reference is copied.
impl<T> Clone for Match<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Match<'_, T> {}

impl<'a, T> Match<'a, T> {
    /// Create a match over `items[start..end]`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end` or `end > items.len()`. Constructing an
    /// out-of-range match is a programming error, reported fail-fast.
    pub fn new(items: &'a [T], start: usize, end: usize) -> Self {
        assert!(
            start <= end && end <= items.len(),
            "match bounds {start}..{end} out of range for {} items",
            items.len()
        );
        Self { items, start, end }
    }

    /// Create a zero-length match at `pos`, the seed for engine expansion.
    pub fn at(items: &'a [T], pos: usize) -> Self {
        Self::new(items, pos, pos)
    }

    /// The full item sequence this match views into.
    pub fn items(&self) -> &'a [T] {
        self.items
    }

    /// Index of the first matched item.
    pub fn start(&self) -> usize {
        self.start
    }

    /// One past the index of the last matched item.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of matched items.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether no items have been matched (zero-width match).
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The matched items, `items[start..end]`. May be empty.
    pub fn matched(&self) -> &'a [T] {
        &self.items[self.start..self.end]
    }

    /// All items after the matched ones.
    pub fn rest(&self) -> &'a [T] {
        &self.items[self.end..]
    }

    /// The `n`-th matched item, or `None` if fewer than `n + 1` items have
    /// been matched so far.
    pub fn nth(&self, n: usize) -> Option<&'a T> {
        if n < self.len() {
            Some(&self.items[self.start + n])
        } else {
            None
        }
    }

    /// The next unconsumed item, or `None` at the end of the sequence.
    ///
    /// Leaf functions may call this unconditionally: an over-advance caused
    /// by a missing item is absorbed at the engine boundary as a plain match
    /// failure, never an error.
    pub fn next(&self) -> Option<&'a T> {
        self.items.get(self.end)
    }

    /// Whether there are unconsumed items after the match.
    pub fn has_next(&self) -> bool {
        self.end < self.items.len()
    }

    /// Number of unconsumed items after the match.
    pub fn n_remaining(&self) -> usize {
        self.items.len() - self.end
    }

    /// A new match with the same `start` and `n` more items consumed.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `n` items remain. The engine checks bounds before
    /// advancing; callers constructing continuations directly must do the
    /// same.
    pub fn advance(&self, n: usize) -> Self {
        Self::new(self.items, self.start, self.end + n)
    }
}

impl<T: PartialEq> PartialEq for Match<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end && self.items == other.items
    }
}

impl<T: Eq> Eq for Match<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Match<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Match({:?} @ {}..{})", self.matched(), self.start, self.end)
    }
}
