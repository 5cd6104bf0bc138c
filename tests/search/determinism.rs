//! Output order must be bit-identical across runs and blob encodings.

use crate::common::{roster_engine, run, shape};
use khoj::{BlobEncoding, Scope};

const QUERIES: &[&str] = &["राम", "राम कुमार", "बाला", "ईसिडोर ति", "कमल", "देवी"];

#[test]
fn repeated_runs_are_bit_identical() {
    let engine = roster_engine(BlobEncoding::PackedU32);
    for query in QUERIES {
        for scope in [Scope::Voter, Scope::Relative, Scope::Anywhere] {
            let first = shape(&run(&engine, query, scope, false));
            for _ in 0..5 {
                let again = shape(&run(&engine, query, scope, false));
                assert_eq!(again, first, "query {:?} scope {:?}", query, scope);
            }
        }
    }
}

#[test]
fn fresh_engines_agree() {
    for query in QUERIES {
        let a = shape(&run(
            &roster_engine(BlobEncoding::PackedU32),
            query,
            Scope::Anywhere,
            false,
        ));
        let b = shape(&run(
            &roster_engine(BlobEncoding::PackedU32),
            query,
            Scope::Anywhere,
            false,
        ));
        assert_eq!(a, b, "query {:?}", query);
    }
}

#[test]
fn blob_encoding_is_invisible_to_results() {
    let reference = roster_engine(BlobEncoding::PackedU32);
    for encoding in [
        BlobEncoding::PackedU64,
        BlobEncoding::Varint,
        BlobEncoding::DeltaVarint,
    ] {
        let engine = roster_engine(encoding);
        for query in QUERIES {
            let expected = shape(&run(&reference, query, Scope::Anywhere, false));
            let got = shape(&run(&engine, query, Scope::Anywhere, false));
            assert_eq!(got, expected, "query {:?} encoding {:?}", query, encoding);
        }
    }
}

#[test]
fn hits_are_sorted_by_key_then_ac_then_row() {
    let engine = roster_engine(BlobEncoding::PackedU32);
    for query in QUERIES {
        let res = run(&engine, query, Scope::Anywhere, false);
        for pair in res.hits.windows(2) {
            let a = (pair[0].key.as_slice(), pair[0].ac, pair[0].row_id);
            let b = (pair[1].key.as_slice(), pair[1].ac, pair[1].row_id);
            assert!(a <= b, "unsorted pair for query {:?}", query);
        }
    }
}
