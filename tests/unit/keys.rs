//! Key-builder geometry: the exact variant set matters because the posting
//! lists were built against it.

use khoj::{KeyPlan, LooseFold, SearchConfig};

fn plan(q: &str) -> KeyPlan {
    let cfg = SearchConfig::default();
    KeyPlan::build(q, &cfg, &LooseFold::default())
}

#[test]
fn three_token_query_emits_pair_merges_and_full_concat() {
    // tokens न, र, श (all single-codepoint so merges show up in prefixes)
    let keys = plan("न र श").strict;
    assert!(keys.contains(&"न".to_string()));
    assert!(keys.contains(&"र".to_string()));
    assert!(keys.contains(&"श".to_string()));
    // the three-codepoint prefix of merge variants keeps the space
    assert!(keys.contains(&"नर ".to_string())); // merge of tokens 0,1
    assert!(keys.contains(&"न र".to_string())); // merge of tokens 1,2
    assert!(keys.contains(&"नरश".to_string())); // full concatenation
}

#[test]
fn no_intermediate_span_variants_for_three_tokens() {
    // below four tokens there are no collapsed pair variants: the prefix of
    // "नर श" keeps its space
    let keys = plan("न र श");
    assert!(!keys.strict.contains(&"नरश ".to_string()));
    // and the only spaceless key is the full concatenation
    let spaceless: Vec<_> = keys
        .strict
        .iter()
        .filter(|k| !k.contains(' ') && k.chars().count() > 1)
        .collect();
    assert_eq!(spaceless, vec!["नरश"]);
}

#[test]
fn four_token_queries_also_collapse_pair_merges() {
    let keys = plan("न र श द").strict;
    // collapsed merge of tokens 0,1 plus following tokens: नरशद → नरश
    assert!(keys.contains(&"नरश".to_string()));
    // spaced variant of the same merge survives alongside
    assert!(keys.contains(&"नर ".to_string()));
}

#[test]
fn families_have_their_own_resolution() {
    let plan = plan("कुमार सिंह");
    for k in &plan.strict {
        assert!(k.chars().count() <= 3);
    }
    for k in plan.exact.iter().chain(plan.loose.iter()) {
        assert!(k.chars().count() <= 2);
    }
}

#[test]
fn query_and_index_sides_agree() {
    // a name indexed under its own keys is always reachable by the same
    // string as a query
    let cfg = SearchConfig::default();
    let fold = LooseFold::default();
    for name in ["राम कुमार", "ईसिडोर तिर्की", "वाला देवी"] {
        let query_keys = KeyPlan::build(name, &cfg, &fold);
        for family in khoj::ALL_FAMILIES {
            let index_keys = KeyPlan::for_family(name, family, &cfg, &fold);
            let q = query_keys.for_form(family.form());
            assert!(
                q.iter().any(|k| index_keys.contains(k)),
                "no overlap for {:?} of {}",
                family,
                name
            );
        }
    }
}
