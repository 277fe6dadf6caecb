//! The scoring pass: rule evaluation in a fixed order, accumulation,
//! clamping, and the weighted total.

use std::collections::{BTreeMap, BTreeSet};

use super::rules::ScoringRules;
use super::score::{SubscoreKey, Subscores};
use super::{Explanation, ScoreResult};
use crate::training::scenario::{Controls, Device, DeviceId, ZoneId};

/// Rule id of the synthetic seed explanation. The baseline entry survives
/// filtering even when its delta is all zeros, so the audit trail always
/// starts from the same anchor.
pub const BASELINE_RULE_ID: &str = "baseline";

const BASELINE_EXPLAIN: &str = "Starting risk posture before any adjustments";

// Fallback weights when the score model leaves one out. Documented defaults,
// not an error condition.
const DEFAULT_EXPOSURE_WEIGHT: f64 = 0.5;
const DEFAULT_CREDENTIAL_ACCOUNT_WEIGHT: f64 = 0.3;
const DEFAULT_HYGIENE_WEIGHT: f64 = 0.2;

const fn default_weight(key: SubscoreKey) -> f64 {
    match key {
        SubscoreKey::Exposure => DEFAULT_EXPOSURE_WEIGHT,
        SubscoreKey::CredentialAccount => DEFAULT_CREDENTIAL_ACCOUNT_WEIGHT,
        SubscoreKey::Hygiene => DEFAULT_HYGIENE_WEIGHT,
    }
}

/// Evaluate the rule set against a scenario snapshot. Pure and deterministic:
/// identical inputs yield identical subscores, total, and explanation order.
///
/// Evaluation order is fixed: baseline seed, control rules, zone rules per
/// device (devices in roster order, rules in declared order), then synergy
/// rules. Subscores are clamped to their caps before the weighted total is
/// computed and clamped in turn.
pub fn calculate_score(
    rules: &ScoringRules,
    devices: &[Device],
    device_zones: &BTreeMap<DeviceId, ZoneId>,
    controls: &Controls,
    flagged_devices: &BTreeSet<DeviceId>,
) -> ScoreResult {
    let mut subscores = Subscores::default();
    let mut explanations = Vec::new();

    let baseline = rules.defaults.baseline.clone();
    subscores.apply(&baseline);
    explanations.push(Explanation {
        rule_id: BASELINE_RULE_ID.to_string(),
        delta: baseline,
        explain: BASELINE_EXPLAIN.to_string(),
    });

    for rule in &rules.control_rules {
        if rule.when.matches(controls) {
            subscores.apply(&rule.add);
            explanations.push(Explanation {
                rule_id: rule.id.clone(),
                delta: rule.add.clone(),
                explain: rule.explain.clone(),
            });
        }
    }

    for device in devices {
        let current_zone = device.current_zone(device_zones);
        let flagged = flagged_devices.contains(&device.id);
        for rule in &rules.zone_rules {
            if rule.when.matches(device, current_zone, flagged) {
                subscores.apply(&rule.add);
                explanations.push(Explanation {
                    rule_id: format!("{}_{}", rule.id, device.id.0),
                    delta: rule.add.clone(),
                    explain: format!("{}: {}", device.label, rule.explain),
                });
            }
        }
    }

    for rule in &rules.synergy_rules {
        if rule
            .when
            .holds(devices, device_zones, controls, flagged_devices)
        {
            tracing::debug!(rule = %rule.id, "synergy rule matched");
            subscores.apply(&rule.add);
            explanations.push(Explanation {
                rule_id: rule.id.clone(),
                delta: rule.add.clone(),
                explain: rule.explain.clone(),
            });
        }
    }

    subscores.clamp_to(&rules.score_model.caps);

    let mut total = 0.0;
    for key in SubscoreKey::ALL {
        let weight = rules
            .score_model
            .weight(key)
            .unwrap_or_else(|| default_weight(key));
        total += subscores.get(key) * weight;
    }
    let total = rules.score_model.caps.for_total().clamp(total);

    // Entries that moved nothing are noise in the audit trail; the baseline
    // anchor is the one exception.
    explanations.retain(|entry| entry.rule_id == BASELINE_RULE_ID || entry.delta.total() != 0.0);

    ScoreResult {
        subscores,
        total,
        explanations,
    }
}
