//! Ranking laws: identity, cap enforcement, determinism of the comparators.

use proptest::prelude::*;

use khoj::rank::word::{compare_add_outside, compare_full};
use khoj::rank::{RankContext, RankQuery};
use khoj::{Lexicon, SearchConfig};

/// Devanagari word material (no spaces).
fn word_char() -> impl Strategy<Value = char> {
    prop::sample::select(vec![
        'क', 'ख', 'ग', 'घ', 'ज', 'ड', 'त', 'थ', 'द', 'ध', 'न', 'प', 'ब', 'भ', 'म', 'य', 'र',
        'ल', 'व', 'श', 'स', 'ह', 'ा', 'ि', 'ी', 'ु', 'े', 'ो', 'ं', '्',
    ])
}

fn word() -> impl Strategy<Value = String> {
    prop::collection::vec(word_char(), 1..10).prop_map(|v| v.into_iter().collect())
}

proptest! {
    #[test]
    fn full_comparison_of_a_word_with_itself_is_clean(w in word()) {
        let lex = Lexicon::new();
        let cfg = SearchConfig::default();
        let Some(q) = RankQuery::prepare(&lex, &w) else { return Ok(()) };
        prop_assume!(q.len() == 1);
        let mut cx = RankContext::new(&lex, &cfg);

        let cmp = compare_full(&mut cx, &q.words[0], &q.words[0].strict, true)
            .expect("identity comparison must pass");
        prop_assert_eq!(cmp.con, 0);
        prop_assert_eq!(cmp.matra, 0);
        prop_assert_eq!(cmp.bucket, 0);
    }

    #[test]
    fn add_outside_identity_law(w in word()) {
        let lex = Lexicon::new();
        let cfg = SearchConfig::default();
        let Some(q) = RankQuery::prepare(&lex, &w) else { return Ok(()) };
        prop_assume!(q.len() == 1);
        let mut cx = RankContext::new(&lex, &cfg);

        let cmp = compare_add_outside(&mut cx, &q.words[0], &q.words[0].strict, None)
            .expect("identity comparison must pass");
        prop_assert_eq!(cmp.additions, 0);
        prop_assert_eq!(cmp.outside, 0);
        prop_assert_eq!(cmp.bucket, 0);
    }

    #[test]
    fn full_comparison_respects_the_consonant_cap(a in word(), b in word()) {
        let lex = Lexicon::new();
        let cfg = SearchConfig::default();
        let Some(q) = RankQuery::prepare(&lex, &a) else { return Ok(()) };
        prop_assume!(q.len() == 1);
        let mut cx = RankContext::new(&lex, &cfg);

        if let Some(cmp) = compare_full(&mut cx, &q.words[0], &b, true) {
            prop_assert!(cmp.con <= cfg.max_con_per_word);
            prop_assert!(cmp.bucket <= 4);
        }
    }

    #[test]
    fn comparators_are_deterministic(a in word(), b in word()) {
        let lex = Lexicon::new();
        let cfg = SearchConfig::default();
        let Some(q) = RankQuery::prepare(&lex, &a) else { return Ok(()) };
        prop_assume!(q.len() == 1);
        let mut cx = RankContext::new(&lex, &cfg);

        let first = compare_full(&mut cx, &q.words[0], &b, true);
        let second = compare_full(&mut cx, &q.words[0], &b, true);
        prop_assert_eq!(first, second);

        let first = compare_add_outside(&mut cx, &q.words[0], &b, Some(2));
        let second = compare_add_outside(&mut cx, &q.words[0], &b, Some(2));
        prop_assert_eq!(first, second);
    }
}
