//! Property-based tests for the engine's algebraic invariants.

use proptest::prelude::*;

use seqpat::{Match, Pattern, search_all, split, subn};

fn small_items() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..4, 0..24)
}

fn pair_pattern(a: u8, b: u8) -> Pattern<u8> {
    Pattern::seq([Pattern::lit(a), Pattern::lit(b)])
}

proptest! {
    #[test]
    fn advance_is_position_arithmetic(items in small_items(), a in 0usize..8, b in 0usize..8) {
        prop_assume!(a + b <= items.len());
        let m = Match::at(&items, 0);
        prop_assert_eq!(m.advance(a).advance(b), m.advance(a + b));
        prop_assert_eq!(m.advance(a).advance(b).end(), a + b);
    }

    #[test]
    fn zero_length_matches_are_empty(items in small_items(), pos in 0usize..24) {
        prop_assume!(pos <= items.len());
        let m = Match::at(&items, pos);
        prop_assert!(m.matched().is_empty());
        prop_assert_eq!(m.has_next(), pos < items.len());
    }

    #[test]
    fn search_all_is_ordered_and_non_overlapping(items in small_items(), a in 0u8..4, b in 0u8..4) {
        let pat = pair_pattern(a, b);
        let mut prev_end = 0;
        for m in search_all(&pat, &items) {
            prop_assert!(m.start() >= prev_end);
            prop_assert_eq!(m.matched(), &[a, b]);
            prev_end = m.end();
        }
    }

    #[test]
    fn split_reconstructs_the_input(items in small_items(), sep in 0u8..4, maxsplit in 0usize..4) {
        let pat = Pattern::lit(sep);
        let parts = split(&pat, &items, maxsplit);
        let mut matches: Vec<_> = search_all(&pat, &items).collect();
        if maxsplit > 0 {
            matches.truncate(maxsplit);
        }
        prop_assert_eq!(parts.len(), matches.len() + 1);

        let mut rebuilt: Vec<u8> = parts[0].to_vec();
        for (m, part) in matches.iter().zip(&parts[1..]) {
            rebuilt.extend_from_slice(m.matched());
            rebuilt.extend_from_slice(part);
        }
        prop_assert_eq!(rebuilt, items);
    }

    #[test]
    fn subn_count_caps_replacements(items in small_items(), a in 0u8..4, b in 0u8..4, count in 0usize..4) {
        let pat = pair_pattern(a, b);
        let total = search_all(&pat, &items).count();
        let (result, n) = subn(&pat, &[], &items, count);
        let expected = if count > 0 { total.min(count) } else { total };
        prop_assert_eq!(n, expected);
        prop_assert_eq!(result.len(), items.len() - 2 * n);
    }
}
