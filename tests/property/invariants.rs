//! Normalizer and segmenter invariants that must hold for any input.

use proptest::prelude::*;

use khoj::{norm_exact, norm_loose, norm_strict, strip_marks, Lexicon};

/// Characters that actually occur in roll data: consonants, matras, marks,
/// independent vowels, digits, spaces, and some damage (Latin, punctuation).
fn roll_char() -> impl Strategy<Value = char> {
    prop::sample::select(vec![
        'क', 'ख', 'ग', 'घ', 'च', 'ज', 'ट', 'ड', 'त', 'थ', 'द', 'ध', 'न', 'प', 'ब', 'भ', 'म',
        'य', 'र', 'ल', 'व', 'श', 'ष', 'स', 'ह', 'ा', 'ि', 'ी', 'ु', 'ू', 'े', 'ै', 'ो', 'ौ',
        'ृ', 'ं', 'ँ', 'ः', '़', '्', 'अ', 'आ', 'इ', 'ई', 'उ', 'ए', 'ओ', '०', '१', '९', ' ',
        ' ', '\u{00A0}', '.', '-', ',', 'a', 'z',
    ])
}

fn roll_string() -> impl Strategy<Value = String> {
    prop::collection::vec(roll_char(), 0..32).prop_map(|v| v.into_iter().collect())
}

proptest! {
    #[test]
    fn norm_strict_is_idempotent(s in roll_string()) {
        let once = norm_strict(&s);
        prop_assert_eq!(norm_strict(&once), once);
    }

    #[test]
    fn norm_exact_is_idempotent(s in roll_string()) {
        let once = norm_exact(&s);
        prop_assert_eq!(norm_exact(&once), once);
    }

    #[test]
    fn norm_loose_is_idempotent(s in roll_string()) {
        let once = norm_loose(&s);
        prop_assert_eq!(norm_loose(&once), once);
    }

    #[test]
    fn strip_marks_removes_no_base_letters(s in roll_string()) {
        let stripped = strip_marks(&s);
        // stripping again changes nothing
        prop_assert_eq!(strip_marks(&stripped), stripped.clone());
        // and the stripped form never grows
        prop_assert!(stripped.chars().count() <= norm_strict(&s).chars().count());
    }

    #[test]
    fn segmentation_is_total(s in roll_string()) {
        let lex = Lexicon::new();
        let stripped = strip_marks(&s);
        let ents = lex.segment(&stripped);
        let joined: String = ents.iter().map(|e| e.text(&stripped)).collect();
        prop_assert_eq!(joined, stripped);
    }

    #[test]
    fn segmentation_covers_without_overlap(s in roll_string()) {
        let lex = Lexicon::new();
        let stripped = strip_marks(&s);
        let ents = lex.segment(&stripped);
        let mut pos = 0u32;
        for e in &ents {
            prop_assert_eq!(e.start, pos);
            prop_assert!(e.end > e.start);
            pos = e.end;
        }
        prop_assert_eq!(pos as usize, stripped.len());
    }
}
