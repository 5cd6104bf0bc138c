//! The canonical ranking scenarios, end to end.

use crate::common::{key_of, roster_engine, run};
use khoj::{BlobEncoding, MatchField, RowId, Scope};

#[test]
fn bare_name_outranks_name_with_suffix_words() {
    let engine = roster_engine(BlobEncoding::PackedU32);
    let res = run(&engine, "राम", Scope::Voter, false);
    let ids: Vec<u64> = res.hits.iter().map(|h| h.row_id.0).collect();
    // "राम" (row 2) before "राम कुमार" (row 1) before "राम कुमार सिंह"
    // (row 6) before the fuzzy "रामलाल शर्मा" (row 3)
    assert_eq!(ids, vec![2, 1, 6, 3]);
}

#[test]
fn two_word_query_with_suffix_beats_every_fuzzy_family() {
    let engine = roster_engine(BlobEncoding::PackedU32);
    let res = run(&engine, "राम कुमार", Scope::Voter, false);
    assert_eq!(res.hits[0].row_id, RowId(1));
    assert!(res.hits[0].key.is_exact());
    assert_eq!(res.hits[1].row_id, RowId(6));
    assert!(res.hits[1].key.is_exact());
    for h in &res.hits[2..] {
        assert!(!h.key.is_exact());
    }
}

#[test]
fn longer_query_matches_its_own_row_exactly_first() {
    let engine = roster_engine(BlobEncoding::PackedU32);
    let res = run(&engine, "रामलाल", Scope::Voter, false);
    // "रामलाल शर्मा" matches the leading token exactly; the shorter "राम"
    // rows can only match fuzzily (or not at all) and never outrank it
    assert_eq!(res.hits[0].row_id, RowId(3));
    assert!(res.hits[0].key.is_exact());
    assert!(!res.hits.iter().any(|h| h.row_id == RowId(2)));
}

#[test]
fn truncated_word_query_finds_the_long_form() {
    let engine = roster_engine(BlobEncoding::PackedU32);
    let res = run(&engine, "ईसिडोर ति", Scope::Voter, false);
    assert_eq!(res.hits.len(), 1);
    assert_eq!(res.hits[0].row_id, RowId(5));
    let key = key_of(&res, 5).unwrap();
    assert_eq!(key[0], 1, "fuzzy mode");
    assert_eq!(key[1], 2, "add/outside family");
}

#[test]
fn phonetic_b_v_swap_matches_with_one_consonant_mismatch() {
    let engine = roster_engine(BlobEncoding::PackedU32);
    let res = run(&engine, "बाला", Scope::Voter, false);
    // voter scope: only "वाला देवी" can match, through the loose index
    assert_eq!(res.hits.len(), 1);
    assert_eq!(res.hits[0].row_id, RowId(4));
    let key = key_of(&res, 4).unwrap();
    assert_eq!(key[1], 0, "whole-word family");
    assert_eq!(key[3], 1_000_000, "one consonant mismatch, clean bucket");
}

#[test]
fn visual_swap_pair_lands_in_a_visual_bucket() {
    let engine = roster_engine(BlobEncoding::PackedU32);
    let res = run(&engine, "कमल", Scope::Anywhere, false);
    // row 7: voter "कमल किशोर" matches exactly; its relative "कलम सिंह"
    // is two VisualP0 swaps away and loses to the exact voter field
    assert_eq!(res.hits[0].row_id, RowId(7));
    assert_eq!(res.hits[0].field, MatchField::Voter);
    assert!(res.hits[0].key.is_exact());
}

#[test]
fn exact_only_drops_fuzzy_rows_entirely() {
    let engine = roster_engine(BlobEncoding::PackedU32);
    let fuzzy = run(&engine, "राम", Scope::Voter, false);
    let exact = run(&engine, "राम", Scope::Voter, true);
    assert!(fuzzy.hits.iter().any(|h| h.row_id == RowId(3)));
    assert!(!exact.hits.iter().any(|h| h.row_id == RowId(3)));
    // surviving hits keep their relative order
    let exact_ids: Vec<u64> = exact.hits.iter().map(|h| h.row_id.0).collect();
    assert_eq!(exact_ids, vec![2, 1, 6]);
}

#[test]
fn candidate_meta_reports_which_indexes_hit() {
    let engine = roster_engine(BlobEncoding::PackedU32);
    let res = run(&engine, "राम", Scope::Voter, false);
    let hit = res.hits.iter().find(|h| h.row_id == RowId(2)).unwrap();
    let strict_slot = khoj::IndexFamily::StrictVoter.slot();
    assert!(hit.meta.hits[strict_slot] > 0);
    assert!(hit.meta.and_hit[strict_slot]);
    let rel_slot = khoj::IndexFamily::StrictRelative.slot();
    assert_eq!(hit.meta.hits[rel_slot], 0, "relative families not queried");
}
