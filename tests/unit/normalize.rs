//! Normal-form edge cases beyond the in-module tests.

use khoj::{count_marks, norm_exact, norm_loose, norm_strict, strip_marks};

#[test]
fn nbsp_and_mixed_whitespace_collapse() {
    assert_eq!(norm_strict("राम\u{00A0}\u{00A0}कुमार"), "राम कुमार");
    assert_eq!(norm_strict("\tराम\nकुमार "), "राम कुमार");
}

#[test]
fn punctuation_between_letters_splits_tokens() {
    assert_eq!(norm_strict("राम.कुमार"), "राम कुमार");
    assert_eq!(norm_strict("राम-कुमार(सिंह)"), "राम कुमार सिंह");
}

#[test]
fn digits_and_latin_pass_through_strict() {
    assert_eq!(norm_strict("राम 2 x"), "राम 2 x");
}

#[test]
fn precomposed_and_decomposed_nukta_agree() {
    // क़ precomposed vs क + nukta: strict form unifies via NFC, and both
    // strip to the bare consonant
    assert_eq!(norm_strict("\u{0958}"), norm_strict("क\u{093C}"));
    assert_eq!(strip_marks("\u{0958}"), strip_marks("क\u{093C}"));
    assert_eq!(count_marks("\u{0958}"), count_marks("क\u{093C}"));
}

#[test]
fn exact_form_distinguishes_vowel_buckets() {
    // different buckets stay distinct
    assert_ne!(norm_exact("राम"), norm_exact("रीम"));
    // same bucket collapses
    assert_eq!(norm_exact("रिम"), norm_exact("रीम"));
}

#[test]
fn loose_form_is_coarser_than_exact() {
    // exact distinguishes ब/व, loose does not
    assert_ne!(norm_exact("बाला"), norm_exact("वाला"));
    assert_eq!(norm_loose("बाला"), norm_loose("वाला"));
}

#[test]
fn empty_and_whitespace_inputs() {
    for f in [norm_strict as fn(&str) -> String, strip_marks, norm_exact, norm_loose] {
        assert_eq!(f(""), "");
        assert_eq!(f("   "), "");
    }
    assert_eq!(count_marks(""), 0);
}
