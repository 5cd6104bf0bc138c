//! All four blob encodings must surface identical candidate sets.

use khoj::{decode_row_ids, AcId, BlobEncoding, CandidateSet, KeyPlan, LooseFold, RowId, Scope,
    SearchConfig};
use khoj::testing::{sample_roster, stores_with_rows};

fn candidates_under(encoding: BlobEncoding, query: &str) -> CandidateSet {
    let cfg = SearchConfig::default();
    let (index, _rows) = stores_with_rows(&sample_roster(), &cfg, encoding);
    let plan = KeyPlan::build(query, &cfg, &LooseFold::default());
    khoj::generate(&index, AcId(1), &plan, Scope::Anywhere, false, &cfg).unwrap()
}

#[test]
fn encodings_agree_on_the_candidate_set() {
    let reference = candidates_under(BlobEncoding::PackedU32, "राम");
    assert!(!reference.is_empty());
    for encoding in [
        BlobEncoding::PackedU64,
        BlobEncoding::Varint,
        BlobEncoding::DeltaVarint,
    ] {
        let got = candidates_under(encoding, "राम");
        assert_eq!(got.sorted_ids(), reference.sorted_ids(), "{:?}", encoding);
        for (id, meta) in &got.rows {
            assert_eq!(meta, &reference.rows[id], "{:?} meta for {:?}", encoding, id);
        }
    }
}

#[test]
fn large_row_ids_survive_every_encoding() {
    // ids above u32 range force the u64 and varint paths
    let big = (1u64 << 40) + 17;
    let mut blob = Vec::new();
    for id in [big, big + 5] {
        blob.extend_from_slice(&id.to_le_bytes());
    }
    assert_eq!(decode_row_ids(&blob, 2).unwrap(), vec![big, big + 5]);
}

#[test]
fn delta_streams_reconstruct_sorted_ids() {
    let cfg = SearchConfig::default();
    let (index, _rows) = stores_with_rows(&sample_roster(), &cfg, BlobEncoding::DeltaVarint);
    let plan = KeyPlan::build("राम", &cfg, &LooseFold::default());
    let set = khoj::generate(&index, AcId(1), &plan, Scope::Anywhere, false, &cfg).unwrap();
    // the roster has rows 1,2,3 matching "राम" in the voter field of AC 1
    for id in [1u64, 2, 3] {
        assert!(set.rows.contains_key(&RowId(id)), "missing row {}", id);
    }
}
