//! Combinators: functions that build new leaf patterns out of existing
//! patterns.
//!
//! Every combinator is a pure value constructor; the returned pattern closes
//! over its sub-patterns (shared via `Rc`) and holds no other state. Branch
//! discovery order is part of each contract, because first-result matchers
//! pick "the" match by that order.

use std::collections::{BTreeSet, VecDeque};
use std::iter;
use std::rc::Rc;

use crate::engine::advance_one;
use crate::matching::Match;
use crate::pattern::{Outcome, Pattern};

/// Matches any single item.
pub fn any<T: 'static>() -> Pattern<T> {
    Pattern::leaf(|_| Outcome::Advance(1))
}

/// Zero-width anchor: succeeds only at the start of the item sequence.
pub fn start<T: 'static>() -> Pattern<T> {
    Pattern::leaf(|m| {
        if m.end() == 0 {
            Outcome::Advance(0)
        } else {
            Outcome::Fail
        }
    })
}

/// Zero-width anchor: succeeds only at the end of the item sequence.
pub fn end<T: 'static>() -> Pattern<T> {
    Pattern::leaf(|m| {
        if m.has_next() {
            Outcome::Fail
        } else {
            Outcome::Advance(0)
        }
    })
}

/// Yields every continuation of every option, in argument order.
///
/// First-result matchers therefore pick the first option that matches at
/// all; exhaustive consumers see every branch.
pub fn either<T>(options: impl IntoIterator<Item = Pattern<T>>) -> Pattern<T>
where
    T: PartialEq + 'static,
{
    let options: Rc<[Pattern<T>]> = options.into_iter().collect();
    Pattern::leaf(move |m| {
        let options = Rc::clone(&options);
        Outcome::Branches(Box::new(
            (0..options.len()).flat_map(move |i| advance_one(&options[i], m)),
        ))
    })
}

/// Succeeds only at end offsets reachable by every pattern, yielding one
/// match per shared offset in ascending order.
///
/// An empty pattern list fails.
pub fn both<T>(patterns: impl IntoIterator<Item = Pattern<T>>) -> Pattern<T>
where
    T: PartialEq + 'static,
{
    let patterns: Rc<[Pattern<T>]> = patterns.into_iter().collect();
    Pattern::leaf(move |m| {
        let mut shared: Option<BTreeSet<usize>> = None;
        for pattern in patterns.iter() {
            let reachable: BTreeSet<usize> = advance_one(pattern, m).map(|c| c.end()).collect();
            let common = match shared.take() {
                None => reachable,
                Some(prev) => prev.intersection(&reachable).copied().collect(),
            };
            if common.is_empty() {
                return Outcome::Fail;
            }
            shared = Some(common);
        }
        match shared {
            None => Outcome::Fail,
            Some(ends) => {
                let (items, start) = (m.items(), m.start());
                Outcome::Branches(Box::new(
                    ends.into_iter().map(move |end| Match::new(items, start, end)),
                ))
            }
        }
    })
}

/// Zero-width assertion: succeeds without consuming anything if `pattern`
/// matches here.
pub fn lookahead<T>(pattern: Pattern<T>) -> Pattern<T>
where
    T: PartialEq + 'static,
{
    Pattern::leaf(move |m| {
        if advance_one(&pattern, m).next().is_some() {
            Outcome::Advance(0)
        } else {
            Outcome::Fail
        }
    })
}

/// Matches zero occurrences or the sub-pattern, in that branch order.
///
/// The unmodified match is always the first candidate, so first-result
/// matchers prefer skipping; exhaustive consumers still see the sub-pattern
/// continuations.
pub fn optional<T>(pattern: Pattern<T>) -> Pattern<T>
where
    T: PartialEq + 'static,
{
    Pattern::leaf(move |m| {
        Outcome::Branches(Box::new(iter::once(m).chain(advance_one(&pattern, m))))
    })
}

/// Bounded repetition: yields every repetition count `k` with
/// `min_n <= k <= max_n`, ascending.
///
/// `max_n = None` bounds the expansion by the number of remaining items,
/// recomputed from the incoming match on every invocation, so the same
/// pattern value may be reused across sequences of different lengths.
/// Generation `k` is built from generation `k - 1` by one more application
/// of `pattern`; expansion stops as soon as a generation has no survivors.
///
/// # Panics
///
/// Panics if `min_n > max_n`; inverted bounds are an invalid pattern,
/// reported fail-fast at construction.
pub fn repeat<T>(pattern: Pattern<T>, min_n: usize, max_n: Option<usize>) -> Pattern<T>
where
    T: PartialEq + 'static,
{
    if let Some(max) = max_n {
        assert!(min_n <= max, "repeat bounds {min_n}..={max} are inverted");
    }
    let pattern = Rc::new(pattern);
    Pattern::leaf(move |m| {
        let max_n = max_n.unwrap_or_else(|| m.n_remaining());
        let pending = if min_n == 0 { vec![m] } else { Vec::new() };
        Outcome::Branches(Box::new(Repeats {
            pattern: Rc::clone(&pattern),
            generation: vec![m],
            count: 0,
            min_n,
            max_n,
            pending: pending.into_iter(),
        }))
    })
}

/// Matches `pattern` one or more times.
pub fn one_or_more<T>(pattern: Pattern<T>) -> Pattern<T>
where
    T: PartialEq + 'static,
{
    repeat(pattern, 1, None)
}

/// Matches `pattern` zero or more times.
pub fn zero_or_more<T>(pattern: Pattern<T>) -> Pattern<T>
where
    T: PartialEq + 'static,
{
    repeat(pattern, 0, None)
}

/// Matches any single item except one that would match `pattern`.
pub fn negate<T>(pattern: Pattern<T>) -> Pattern<T>
where
    T: PartialEq + 'static,
{
    Pattern::leaf(move |m| {
        if advance_one(&pattern, m).next().is_some() {
            Outcome::Fail
        } else {
            Outcome::Advance(1)
        }
    })
}

/// Matches from an `open` to its balanced `close`, tracking nesting depth.
///
/// After the initial `open`, every further `open` deepens and every `close`
/// shallows; the match ends at the `close` that returns the depth to zero.
/// Items matching neither side are skipped one at a time. Running out of
/// items before the depth closes kills that branch. This is the one
/// non-regular construct in the engine; it carries an explicit worklist
/// instead of the purely structural expansion every other combinator uses.
pub fn matching_pair<T>(open: Pattern<T>, close: Pattern<T>) -> Pattern<T>
where
    T: PartialEq + 'static,
{
    let open = Rc::new(open);
    let close = Rc::new(close);
    Pattern::leaf(move |m| {
        let worklist: Vec<_> = advance_one(&open, m).map(|c| (c, 1usize)).collect();
        if worklist.is_empty() {
            return Outcome::Fail;
        }
        Outcome::Branches(Box::new(PairMatches {
            open: Rc::clone(&open),
            close: Rc::clone(&close),
            worklist,
            ready: VecDeque::new(),
        }))
    })
}

/// Matches an item equal to the `n`-th already-matched item of the current
/// match (not the whole sequence). Fails if either side is missing.
pub fn backreference<T>(n: usize) -> Pattern<T>
where
    T: PartialEq + 'static,
{
    Pattern::test(move |m| match (m.nth(n), m.next()) {
        (Some(seen), Some(next)) => seen == next,
        _ => false,
    })
}

/// Generation-by-generation expansion for [`repeat`].
///
/// `generation` holds the survivors after `count` applications; eligible
/// generations are queued in `pending` and drained before expanding again.
struct Repeats<'a, T> {
    pattern: Rc<Pattern<T>>,
    generation: Vec<Match<'a, T>>,
    count: usize,
    min_n: usize,
    max_n: usize,
    pending: std::vec::IntoIter<Match<'a, T>>,
}

impl<'a, T: PartialEq> Iterator for Repeats<'a, T> {
    type Item = Match<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(m) = self.pending.next() {
                return Some(m);
            }
            if self.count >= self.max_n || self.generation.is_empty() {
                return None;
            }
            let next: Vec<_> = self
                .generation
                .iter()
                .flat_map(|g| advance_one(&self.pattern, *g))
                .collect();
            self.generation = next;
            self.count += 1;
            if self.count >= self.min_n {
                self.pending = self.generation.clone().into_iter();
            }
        }
    }
}

/// Worklist scanner for [`matching_pair`].
struct PairMatches<'a, T> {
    open: Rc<Pattern<T>>,
    close: Rc<Pattern<T>>,
    worklist: Vec<(Match<'a, T>, usize)>,
    ready: VecDeque<Match<'a, T>>,
}

impl<'a, T: PartialEq> Iterator for PairMatches<'a, T> {
    type Item = Match<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(m) = self.ready.pop_front() {
                return Some(m);
            }
            let (m, depth) = self.worklist.pop()?;

            let opens: Vec<_> = advance_one(&self.open, m).collect();
            if !opens.is_empty() {
                self.worklist
                    .extend(opens.into_iter().map(|c| (c, depth + 1)));
                continue;
            }

            let closes: Vec<_> = advance_one(&self.close, m).collect();
            if !closes.is_empty() {
                if depth == 1 {
                    self.ready.extend(closes);
                } else {
                    self.worklist
                        .extend(closes.into_iter().map(|c| (c, depth - 1)));
                }
                continue;
            }

            if m.has_next() {
                self.worklist.push((m.advance(1), depth));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::{find_all, full_match, search};

    fn lit_seq(items: &[i32]) -> Pattern<i32> {
        Pattern::seq(items.iter().map(|&x| Pattern::lit(x)))
    }

    fn all_ends<T: PartialEq>(pattern: &Pattern<T>, items: &[T]) -> Vec<usize> {
        advance_one(pattern, Match::at(items, 0)).map(|m| m.end()).collect()
    }

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    // --- any / anchors ---

    #[test]
    fn any_matches_one_item_of_any_value() {
        assert!(full_match(&Pattern::seq([Pattern::lit(1), any(), Pattern::lit(3)]), &[1, 2, 3]).is_some());
        let empty: [i32; 0] = [];
        assert!(full_match(&any(), &empty).is_none());
    }

    #[test]
    fn anchors_are_zero_width() {
        let p = Pattern::seq([start(), Pattern::lit(1), Pattern::lit(2), end()]);
        let items = [1, 2];
        let m = full_match(&p, &items).unwrap();
        assert_eq!(m.matched(), &[1, 2]);
    }

    #[test]
    fn start_fails_away_from_offset_zero() {
        assert!(search(&Pattern::seq([start(), Pattern::lit(2)]), &[1, 2]).is_none());
    }

    #[test]
    fn end_anchored_search() {
        let items = [1, 2];
        let m = search(&Pattern::seq([Pattern::lit(2), end()]), &items).unwrap();
        assert_eq!(m.matched(), &[2]);
    }

    // --- either / both ---

    #[test]
    fn either_finds_non_overlapping_alternatives() {
        let p = either([Pattern::lit(1), Pattern::lit(2)]);
        let items = [1, 2, 3];
        let found: Vec<_> = find_all(&p, &items).collect();
        assert_eq!(found, vec![&[1][..], &[2][..]]);
    }

    #[test]
    fn either_branch_order_is_argument_order() {
        let short_first = either([lit_seq(&[1]), lit_seq(&[1, 2])]);
        assert_eq!(all_ends(&short_first, &[1, 2]), vec![1, 2]);
        let long_first = either([lit_seq(&[1, 2]), lit_seq(&[1])]);
        assert_eq!(all_ends(&long_first, &[1, 2]), vec![2, 1]);
    }

    #[test]
    fn both_yields_shared_offsets_ascending() {
        // Offsets reachable by each side: {1, 2} and {2}; intersection {2}.
        let p = both([either([lit_seq(&[5]), lit_seq(&[5, 5])]), lit_seq(&[5, 5])]);
        assert_eq!(all_ends(&p, &[5, 5, 5]), vec![2]);
    }

    #[test]
    fn both_with_no_shared_offset_fails() {
        let p = both([lit_seq(&[1]), lit_seq(&[1, 2])]);
        assert!(search(&p, &[1, 2]).is_none());
    }

    #[test]
    fn both_selects_common_parse() {
        // Over "aabbc" the only span both sides agree on is "bb".
        let items = chars("aabbc");
        let p = both([
            either([Pattern::lit('a'), one_or_more(Pattern::lit('b'))]),
            either([
                Pattern::seq([Pattern::lit('b'), Pattern::lit('b')]),
                Pattern::lit('c'),
            ]),
        ]);
        let m = search(&p, &items).unwrap();
        assert_eq!(m.matched(), &['b', 'b']);
    }

    // --- lookahead / optional ---

    #[test]
    fn lookahead_does_not_consume() {
        let items = [1, 2, 3];
        let p = Pattern::seq([Pattern::lit(1), lookahead(Pattern::lit(2))]);
        let m = search(&p, &items).unwrap();
        assert_eq!(m.matched(), &[1]);
    }

    #[test]
    fn lookahead_failure_kills_the_branch() {
        let p = Pattern::seq([Pattern::lit(1), lookahead(Pattern::lit(9))]);
        assert!(search(&p, &[1, 2, 3]).is_none());
    }

    #[test]
    fn optional_yields_skip_first() {
        assert_eq!(all_ends(&optional(Pattern::lit(1)), &[1]), vec![0, 1]);
        // At a non-matching position only the skip survives.
        assert_eq!(all_ends(&optional(Pattern::lit(9)), &[1]), vec![0]);
    }

    #[test]
    fn optional_lets_a_sequence_fit() {
        let p = Pattern::seq([
            Pattern::lit(1),
            Pattern::lit(2),
            optional(Pattern::lit(2)),
            Pattern::lit(3),
        ]);
        assert!(full_match(&p, &[1, 2, 3]).is_some());
        assert!(full_match(&p, &[1, 2, 2, 3]).is_some());
    }

    // --- repeat ---

    #[test]
    fn repeat_yields_generations_ascending() {
        let p = one_or_more(Pattern::lit(5));
        assert_eq!(all_ends(&p, &[5, 5, 5, 1]), vec![1, 2, 3]);
    }

    #[test]
    fn repeat_respects_bounds() {
        let p = repeat(Pattern::lit(5), 2, Some(3));
        assert_eq!(all_ends(&p, &[5, 5, 5, 5]), vec![2, 3]);
        assert_eq!(all_ends(&p, &[5, 1]), Vec::<usize>::new());
    }

    #[test]
    fn zero_or_more_yields_zero_width_first() {
        assert_eq!(all_ends(&zero_or_more(Pattern::lit(9)), &[1]), vec![0]);
        assert_eq!(all_ends(&zero_or_more(Pattern::lit(9)), &[9, 1]), vec![0, 1]);
    }

    #[test]
    fn repeat_backtracks_inside_a_sequence() {
        // The repetition must give back one item for the trailing literal.
        let p = Pattern::seq([Pattern::lit(1), one_or_more(Pattern::lit(1)), Pattern::lit(1)]);
        assert!(full_match(&p, &[1, 1, 1, 1]).is_some());
    }

    #[test]
    fn repeat_enumerates_nested_optionals() {
        // repeat([2, optional(3)]) reaches [2, 3, 2] through the long branch.
        let items = [0, 1, 2, 3, 2, 4];
        let p = Pattern::seq([
            Pattern::lit(1),
            one_or_more(Pattern::seq([Pattern::lit(2), optional(Pattern::lit(3))])),
        ]);
        let longest = advance_one(&p, Match::at(&items, 1)).last().unwrap();
        assert_eq!(longest.matched(), &[1, 2, 3, 2]);
    }

    #[test]
    fn repeat_default_bound_tracks_the_invocation() {
        // Reusing one pattern value across sequences of different lengths
        // must not pin the bound computed on first use.
        let p = zero_or_more(any());
        assert_eq!(all_ends(&p, &[1, 2, 3]), vec![0, 1, 2, 3]);
        assert_eq!(all_ends(&p, &[1]), vec![0, 1]);
    }

    #[test]
    #[should_panic(expected = "inverted")]
    fn repeat_rejects_inverted_bounds() {
        let _ = repeat(any::<i32>(), 3, Some(2));
    }

    // --- negate ---

    #[test]
    fn negate_matches_everything_else() {
        let items = [1, 1, 2];
        let m = search(&negate(Pattern::lit(1)), &items).unwrap();
        assert_eq!(m.matched(), &[2]);
        assert_eq!(m.start(), 2);
    }

    #[test]
    fn negate_needs_an_item() {
        assert!(full_match(&Pattern::seq([Pattern::lit(1), negate(Pattern::lit(2))]), &[1]).is_none());
    }

    // --- matching_pair ---

    #[test]
    fn matching_pair_finds_balanced_run() {
        let items = chars("ab(c(d()e)f)");
        let p = matching_pair(Pattern::lit('('), Pattern::lit(')'));
        let m = search(&p, &items).unwrap();
        assert_eq!(m.matched().iter().collect::<String>(), "(c(d()e)f)");
    }

    #[test]
    fn matching_pair_falls_back_to_inner_balance() {
        let items = chars("ab(c(d()e)f");
        let p = matching_pair(Pattern::lit('('), Pattern::lit(')'));
        let m = search(&p, &items).unwrap();
        assert_eq!(m.matched().iter().collect::<String>(), "(d()e)");
    }

    #[test]
    fn matching_pair_without_close_fails() {
        let items = chars("ab(c(d(ef");
        let p = matching_pair(Pattern::lit('('), Pattern::lit(')'));
        assert!(search(&p, &items).is_none());
    }

    // --- backreference ---

    #[test]
    fn backreference_compares_against_matched_item() {
        let p = Pattern::seq([
            Pattern::pred(|&x: &i32| x % 2 == 0),
            any(),
            backreference(0),
        ]);
        assert!(full_match(&p, &[4, 1, 4]).is_some());
        assert!(full_match(&p, &[4, 1, 5]).is_none());
    }

    #[test]
    fn backreference_fails_without_next_item() {
        let p = Pattern::seq([Pattern::lit(4), backreference(0)]);
        assert!(full_match(&p, &[4]).is_none());
    }

    // --- predicates through the combinators ---

    #[test]
    fn predicate_run_takes_shortest_first() {
        let items = [0, 1, 2, 3];
        let p = one_or_more(Pattern::pred(|&x: &i32| 0 < x && x < 3));
        let m = search(&p, &items).unwrap();
        assert_eq!(m.matched(), &[1]);
        // The full run is still enumerable.
        let longest = advance_one(&p, Match::at(&items, 1)).last().unwrap();
        assert_eq!(longest.matched(), &[1, 2]);
    }

    #[test]
    fn test_leaf_relates_next_to_earlier_items() {
        // One item, then more items until one repeats the first value.
        let p = Pattern::seq([
            any(),
            one_or_more(Pattern::test(|m| m.nth(0) != m.next())),
            backreference(0),
        ]);
        assert!(full_match(&p, &[7, 3, 5, 7]).is_some());
        assert!(full_match(&p, &[7, 3, 5, 8]).is_none());
    }
}
