use std::path::PathBuf;

use fontpick_core::catalog::Catalog;
use fontpick_core::descriptor::FontDescriptor;
use fontpick_core::matching::{find_all, find_best, score};
use fontpick_core::query::FaceQuery;
use proptest::prelude::*;

fn arb_face(index: usize) -> impl Strategy<Value = FontDescriptor> {
    (
        prop_oneof![
            Just("Alpha".to_string()),
            Just("Beta".to_string()),
            Just("Gamma Mono".to_string())
        ],
        (1u16..=9).prop_map(|w| w * 100),
        1u8..=9,
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            move |(family, weight, width, italic, monospace)| FontDescriptor {
                path: PathBuf::from(format!("/fonts/face-{index}.ttf")),
                postscript_name: format!("Face-{index}"),
                family,
                style: "Regular".to_string(),
                weight,
                width,
                italic,
                monospace,
            },
        )
}

fn arb_catalog() -> impl Strategy<Value = Catalog> {
    prop::collection::vec(Just(()), 1..12).prop_flat_map(|slots| {
        slots
            .into_iter()
            .enumerate()
            .map(|(i, _)| arb_face(i))
            .collect::<Vec<_>>()
            .prop_map(Catalog::new)
    })
}

fn arb_query() -> impl Strategy<Value = FaceQuery> {
    (
        prop::option::of(prop_oneof![
            Just("Alpha".to_string()),
            Just("Beta".to_string()),
            Just("Delta".to_string())
        ]),
        prop::option::of((1u16..=9).prop_map(|w| w * 100)),
        prop::option::of(1u8..=9),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(family, weight, width, italic, monospace)| FaceQuery {
            family,
            weight,
            width,
            italic,
            monospace,
            ..FaceQuery::default()
        })
}

proptest! {
    /// The central contract: any non-empty catalog yields a best match for
    /// any query, and that match is a member of the catalog.
    #[test]
    fn find_best_never_comes_back_empty(catalog in arb_catalog(), query in arb_query()) {
        let found = find_best(&catalog, &query).expect("non-empty catalog");
        prop_assert!(catalog.faces().contains(&found));
    }

    /// Determinism: repeated calls over one snapshot agree.
    #[test]
    fn find_best_is_deterministic(catalog in arb_catalog(), query in arb_query()) {
        let first = find_best(&catalog, &query);
        let second = find_best(&catalog, &query);
        prop_assert_eq!(first, second);
    }

    /// When exact matches exist, the winner is one of them and no exact
    /// match scores lower.
    #[test]
    fn best_is_lowest_scoring_exact_match(catalog in arb_catalog(), query in arb_query()) {
        let exact = find_all(&catalog, &query);
        prop_assume!(!exact.is_empty());

        let found = find_best(&catalog, &query).expect("non-empty catalog");
        prop_assert!(exact.contains(&found));

        let best_score = score(&found, &query);
        for candidate in &exact {
            prop_assert!(score(candidate, &query) >= best_score);
        }
    }

    /// find_all results are always a prefix-ordered subset of the catalog.
    #[test]
    fn find_all_preserves_catalog_order(catalog in arb_catalog(), query in arb_query()) {
        let found = find_all(&catalog, &query);
        let mut walk = catalog.faces().iter();
        for face in &found {
            prop_assert!(walk.any(|f| f == face));
        }
    }
}
