use crate::training::scoring::explain::{self, SortOrder, RANKED_LIST_LEN, TOP_DRIVER_COUNT};
use crate::training::scoring::{Explanation, ScoreDelta, SubscoreKey, BASELINE_RULE_ID};

fn entry(rule_id: &str, exposure: f64) -> Explanation {
    Explanation {
        rule_id: rule_id.to_string(),
        delta: ScoreDelta::new().with(SubscoreKey::Exposure, exposure),
        explain: format!("explanation for {rule_id}"),
    }
}

/// Baseline plus totals +12, -15, +3, and an exact zero.
fn fixture() -> Vec<Explanation> {
    vec![
        entry(BASELINE_RULE_ID, 30.0),
        entry("increase_large", 12.0),
        entry("reduction_large", -15.0),
        entry("increase_small", 3.0),
        entry("noop", 0.0),
    ]
}

fn ids(entries: &[&Explanation]) -> Vec<String> {
    entries.iter().map(|entry| entry.rule_id.clone()).collect()
}

#[test]
fn absolute_impact_order_ignores_sign() {
    let explanations = fixture();

    let ranked = explain::ranked(
        &explanations,
        SortOrder::LargestAbsoluteImpactFirst,
        RANKED_LIST_LEN,
    );

    assert_eq!(
        ids(&ranked),
        vec!["reduction_large", "increase_large", "increase_small"]
    );
}

#[test]
fn increase_order_puts_risk_raisers_first() {
    let explanations = fixture();

    let ranked = explain::ranked(
        &explanations,
        SortOrder::LargestIncreaseFirst,
        RANKED_LIST_LEN,
    );

    assert_eq!(
        ids(&ranked),
        vec!["increase_large", "increase_small", "reduction_large"]
    );
}

#[test]
fn reduction_order_puts_risk_reducers_first() {
    let explanations = fixture();

    let ranked = explain::ranked(
        &explanations,
        SortOrder::LargestReductionFirst,
        RANKED_LIST_LEN,
    );

    assert_eq!(
        ids(&ranked),
        vec!["reduction_large", "increase_small", "increase_large"]
    );
}

#[test]
fn baseline_and_zero_totals_never_rank() {
    let explanations = fixture();

    for order in [
        SortOrder::LargestAbsoluteImpactFirst,
        SortOrder::LargestIncreaseFirst,
        SortOrder::LargestReductionFirst,
    ] {
        let ranked = explain::ranked(&explanations, order, RANKED_LIST_LEN);
        assert!(ranked
            .iter()
            .all(|entry| entry.rule_id != BASELINE_RULE_ID && entry.rule_id != "noop"));
    }
}

#[test]
fn ties_preserve_evaluation_order() {
    let explanations = vec![entry("first", 5.0), entry("second", 5.0), entry("third", -5.0)];

    let ranked = explain::ranked(
        &explanations,
        SortOrder::LargestAbsoluteImpactFirst,
        RANKED_LIST_LEN,
    );

    assert_eq!(ids(&ranked), vec!["first", "second", "third"]);
}

#[test]
fn top_drivers_truncates_to_count() {
    let explanations = fixture();

    let drivers = explain::top_drivers(&explanations, TOP_DRIVER_COUNT);
    assert_eq!(drivers.len(), 3);

    let one = explain::top_drivers(&explanations, 1);
    assert_eq!(ids(&one), vec!["reduction_large"]);
}

#[test]
fn subscore_totals_aggregate_across_all_entries() {
    let explanations = vec![
        entry(BASELINE_RULE_ID, 30.0),
        entry("up", 5.0),
        Explanation {
            rule_id: "down".to_string(),
            delta: ScoreDelta::new().with(SubscoreKey::CredentialAccount, -10.0),
            explain: "credential win".to_string(),
        },
    ];

    let totals = explain::subscore_totals(&explanations);

    assert_eq!(totals.get(SubscoreKey::Exposure), 35.0);
    assert_eq!(totals.get(SubscoreKey::CredentialAccount), -10.0);
    assert_eq!(totals.get(SubscoreKey::Hygiene), 0.0);
}
