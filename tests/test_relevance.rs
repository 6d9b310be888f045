//! Relevance scoring: weights, position boost, determinism.

use rummage::query::relevance::{
    score, POSITION_BOOST_WINDOW, W_DESCRIPTION_CONTAINS, W_NAME_CONTAINS, W_NAME_PREFIX,
    W_VARIANT_CONTAINS,
};
use rummage::query::text::SubstringMatcher;

mod common;
use common::{engine, ids, params, product, seeded_catalog, variant, ProductSpec};

#[test]
fn name_prefix_outranks_description_mention() {
    let matcher = SubstringMatcher;
    let named = product(ProductSpec {
        id: "a",
        name: "Nike Air Max",
        brand: "Generic",
        ..Default::default()
    });
    let mentioned = product(ProductSpec {
        id: "b",
        name: "Trail Runner",
        brand: "Generic",
        description: "a budget alternative to nike flagships",
        ..Default::default()
    });

    let named_score = score(&named, "nike", &matcher);
    let mentioned_score = score(&mentioned, "nike", &matcher);

    // prefix(100) + contains(60) + position boost(100) vs description(20)
    assert_eq!(
        named_score,
        W_NAME_PREFIX + W_NAME_CONTAINS + POSITION_BOOST_WINDOW as f64
    );
    assert_eq!(mentioned_score, W_DESCRIPTION_CONTAINS);
    assert!(named_score > mentioned_score);
}

#[test]
fn signals_are_additive_and_independent() {
    let matcher = SubstringMatcher;
    let p = product(ProductSpec {
        id: "a",
        name: "Storm Jacket",
        brand: "Storm",
        description: "the storm jacket for storms",
        variants: vec![variant("M", "Storm Grey", "ST-01")],
        ..Default::default()
    });
    // name prefix 100 + brand prefix 80 + name contains 60 + brand contains 50
    // + variant 40 + description 20 + position boost (index 0 -> 100)
    assert_eq!(
        score(&p, "storm", &matcher),
        100.0 + 80.0 + 60.0 + 50.0 + 40.0 + 20.0 + 100.0
    );
}

#[test]
fn position_boost_decays_with_index_and_caps_at_window() {
    let matcher = SubstringMatcher;
    let early = product(ProductSpec {
        id: "a",
        name: "Alpha Boot",
        ..Default::default()
    });
    let late = product(ProductSpec {
        id: "b",
        name: "Winter Alpha Boot",
        ..Default::default()
    });
    // Both get contains(60); prefix/boost differ.
    let early_score = score(&early, "alpha", &matcher);
    let late_score = score(&late, "alpha", &matcher);
    assert!(early_score > late_score);
    // "alpha" at index 7 -> boost 93
    assert_eq!(late_score, W_NAME_CONTAINS + 93.0);
}

#[test]
fn no_boost_beyond_first_hundred_chars() {
    let matcher = SubstringMatcher;
    let long_prefix = "x".repeat(120);
    let name = format!("{} alpha", long_prefix);
    let p = rummage::types::Product {
        name,
        ..product(ProductSpec {
            id: "a",
            ..Default::default()
        })
    };
    assert_eq!(score(&p, "alpha", &matcher), W_NAME_CONTAINS);
}

#[test]
fn variant_fields_contribute_once() {
    let matcher = SubstringMatcher;
    let p = product(ProductSpec {
        id: "a",
        name: "Court Shoe",
        variants: vec![
            variant("42", "Volt", "V-1"),
            variant("43", "Volt", "V-2"),
            variant("44", "Volt", "V-3"),
        ],
        ..Default::default()
    });
    assert_eq!(score(&p, "volt", &matcher), W_VARIANT_CONTAINS);
}

#[test]
fn scoring_is_deterministic() {
    let matcher = SubstringMatcher;
    let p = product(ProductSpec {
        id: "a",
        name: "Nike Air Max",
        brand: "Nike",
        description: "nike nike nike",
        ..Default::default()
    });
    let first = score(&p, "nike", &matcher);
    for _ in 0..10 {
        assert_eq!(score(&p, "nike", &matcher), first);
    }
}

#[tokio::test]
async fn relevance_ranking_end_to_end() {
    let catalog = seeded_catalog();
    let engine = engine(catalog);

    let mut p = params();
    p.q = Some("nike".to_string());
    let page = engine.search(&p).await.unwrap();

    // p1 "Nike Air Max" (name prefix) first, p3 "Nike Dri-FIT Tee" next,
    // p2 only mentions nike in its description.
    assert_eq!(ids(&page), vec!["p1", "p3", "p2"]);
}

#[tokio::test]
async fn relevance_ties_break_newest_first() {
    let catalog = seeded_catalog();
    let engine = engine(catalog);

    // Both Adidas products match "adidas" identically at the brand/name
    // level except name content; use a query hitting both equally.
    let mut p = params();
    p.q = Some("training".to_string());
    let page = engine.search(&p).await.unwrap();
    // p3 (day 8) and p5 (day 1) both say "training" only in the
    // description; newer first.
    assert_eq!(ids(&page), vec!["p3", "p5"]);
}
