use proptest::prelude::*;

use rgm_match::{calculate_name_similarity, normalize_author_name};

fn name_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-z]{1,8}",
            Just("j".to_string()),
            Just("bill".to_string()),
            Just("william".to_string()),
            Just("smith".to_string()),
            Just("jean-paul".to_string()),
        ],
        0..5,
    )
    .prop_map(|tokens| tokens.join(" "))
}

proptest! {
    #[test]
    fn score_is_symmetric(a in name_strategy(), b in name_strategy()) {
        prop_assert_eq!(
            calculate_name_similarity(&a, &b),
            calculate_name_similarity(&b, &a)
        );
    }

    #[test]
    fn score_is_bounded(a in name_strategy(), b in name_strategy()) {
        let score = calculate_name_similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn identical_names_score_one(a in "[a-z]{1,8}( [a-z]{1,8}){0,3}") {
        prop_assert_eq!(calculate_name_similarity(&a, &a), 1.0);
    }

    #[test]
    fn empty_scores_zero(a in name_strategy()) {
        prop_assert_eq!(calculate_name_similarity("", &a), 0.0);
        prop_assert_eq!(calculate_name_similarity(&a, ""), 0.0);
    }

    #[test]
    fn normalized_names_are_lowercase_and_collapsed(raw in "[A-Za-z .,'-]{0,30}") {
        let normalized = normalize_author_name(&raw);
        prop_assert_eq!(normalized.clone(), normalized.to_lowercase());
        prop_assert!(!normalized.contains("  "));
        prop_assert!(!normalized.contains(['.', ',', '\'']));
        prop_assert_eq!(normalized.trim(), normalized.as_str());
    }
}
