//! Matchers: sequential drivers that run the engine at different offsets
//! and fold or collect the results.
//!
//! Each driver consumes only as much of the engine's candidate stream as it
//! needs: `search` takes the first candidate at the first matching offset,
//! `full_match` scans candidates until one reaches the end, `search_all`
//! restarts after every hit.

use itertools::Itertools;

use crate::engine::advance_one;
use crate::matching::Match;
use crate::pattern::Pattern;

/// The first candidate the engine yields at offset 0, if any.
///
/// "First" is the branch-ordering policy, not a longest-match guarantee;
/// combine with [`crate::both`] when the longest shared parse is wanted.
pub fn match_start<'a, T: PartialEq>(pattern: &Pattern<T>, items: &'a [T]) -> Option<Match<'a, T>> {
    advance_one(pattern, Match::at(items, 0)).next()
}

/// The first candidate at offset 0 that consumes the whole sequence.
pub fn full_match<'a, T: PartialEq>(pattern: &Pattern<T>, items: &'a [T]) -> Option<Match<'a, T>> {
    advance_one(pattern, Match::at(items, 0)).find(|m| !m.has_next())
}

/// The first match anywhere in `items`.
pub fn search<'a, T: PartialEq>(pattern: &Pattern<T>, items: &'a [T]) -> Option<Match<'a, T>> {
    search_from(pattern, items, 0)
}

/// The first match at or after offset `start`.
///
/// Offsets are tried in order; the first offset with any candidate wins and
/// later offsets are not consulted.
pub fn search_from<'a, T: PartialEq>(
    pattern: &Pattern<T>,
    items: &'a [T],
    start: usize,
) -> Option<Match<'a, T>> {
    (start..items.len()).find_map(|i| advance_one(pattern, Match::at(items, i)).next())
}

/// Lazily yields every non-overlapping match, leftmost first.
pub fn search_all<'p, 'a, T: PartialEq>(
    pattern: &'p Pattern<T>,
    items: &'a [T],
) -> SearchAll<'p, 'a, T> {
    SearchAll { pattern, items, pos: 0 }
}

/// Iterator over non-overlapping matches; see [`search_all`].
pub struct SearchAll<'p, 'a, T> {
    pattern: &'p Pattern<T>,
    items: &'a [T],
    pos: usize,
}

impl<'a, T: PartialEq> Iterator for SearchAll<'_, 'a, T> {
    type Item = Match<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let m = search_from(self.pattern, self.items, self.pos)?;
        // A zero-width match must still move the scan position forward.
        self.pos = m.end().max(m.start() + 1);
        Some(m)
    }
}

/// The matched slices of every non-overlapping match, leftmost first.
pub fn find_all<'p, 'a, T: PartialEq>(
    pattern: &'p Pattern<T>,
    items: &'a [T],
) -> impl Iterator<Item = &'a [T]> {
    search_all(pattern, items).map(|m| m.matched())
}

/// Tokenize `items` against an ordered list of named patterns.
///
/// At each position the names are tried in list order and the first name
/// whose pattern yields any candidate wins, taking that pattern's first
/// candidate as the token. Scanning stops silently at the first position
/// where no pattern matches (or where the winning token is zero-width),
/// even if items remain.
pub fn scan<'p, 'a, K, T>(patterns: &'p [(K, Pattern<T>)], items: &'a [T]) -> Scan<'p, 'a, K, T>
where
    K: Clone,
    T: PartialEq,
{
    Scan { patterns, items, pos: 0 }
}

/// Iterator of `(name, token)` pairs; see [`scan`].
pub struct Scan<'p, 'a, K, T> {
    patterns: &'p [(K, Pattern<T>)],
    items: &'a [T],
    pos: usize,
}

impl<'a, K: Clone, T: PartialEq> Iterator for Scan<'_, 'a, K, T> {
    type Item = (K, Match<'a, T>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.items.len() {
            return None;
        }
        let seed = Match::at(self.items, self.pos);
        let (name, token) = self.patterns.iter().find_map(|(name, pattern)| {
            advance_one(pattern, seed).next().map(|m| (name.clone(), m))
        })?;
        if token.end() == self.pos {
            // Zero-width token: no progress, treat the position as dead.
            return None;
        }
        self.pos = token.end();
        Some((name, token))
    }
}

/// Replace every non-overlapping match with `replacement`, up to `count`
/// times (`count == 0` replaces all). Returns the rewritten sequence.
pub fn sub<T>(pattern: &Pattern<T>, replacement: &[T], items: &[T], count: usize) -> Vec<T>
where
    T: Clone + PartialEq,
{
    subn(pattern, replacement, items, count).0
}

/// Like [`sub`], also returning the number of replacements made.
pub fn subn<T>(
    pattern: &Pattern<T>,
    replacement: &[T],
    items: &[T],
    count: usize,
) -> (Vec<T>, usize)
where
    T: Clone + PartialEq,
{
    subn_with(pattern, |_| replacement.to_vec(), items, count)
}

/// Replace every non-overlapping match with the result of `replacement`,
/// up to `count` times (`count == 0` replaces all).
///
/// The input is cloned first and splices are applied back-to-front so
/// earlier offsets stay valid; the caller's sequence is untouched.
pub fn subn_with<T, F>(
    pattern: &Pattern<T>,
    mut replacement: F,
    items: &[T],
    count: usize,
) -> (Vec<T>, usize)
where
    T: Clone + PartialEq,
    F: FnMut(&Match<T>) -> Vec<T>,
{
    let mut matches = search_all(pattern, items).collect_vec();
    if count > 0 {
        matches.truncate(count);
    }
    let mut result = items.to_vec();
    for m in matches.iter().rev() {
        result.splice(m.start()..m.end(), replacement(m));
    }
    (result, matches.len())
}

/// The slices of `items` strictly between consecutive matches, including
/// the lead and the trailing remainder. Splits at most `maxsplit` times
/// unless `maxsplit == 0`.
pub fn split<'a, T: PartialEq>(
    pattern: &Pattern<T>,
    items: &'a [T],
    maxsplit: usize,
) -> Vec<&'a [T]> {
    let mut matches = search_all(pattern, items).collect_vec();
    if maxsplit > 0 {
        matches.truncate(maxsplit);
    }
    let mut parts = Vec::with_capacity(matches.len() + 1);
    let mut last_end = 0;
    for m in &matches {
        parts.push(&items[last_end..m.start()]);
        last_end = m.end();
    }
    parts.push(&items[last_end..]);
    parts
}
