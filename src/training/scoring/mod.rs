//! The risk scoring core: declarative rule set, condition evaluators, the
//! deterministic scoring pass, and explanation ranking.

mod conditions;
mod engine;
pub mod explain;
mod rules;
mod score;

#[cfg(test)]
mod tests;

pub use conditions::{
    ControlCondition, FlagCount, FlagZoneCount, FlagZonePct, SynergyAtom, SynergyCondition,
    ZoneCondition,
};
pub use engine::{calculate_score, BASELINE_RULE_ID};
pub use explain::SortOrder;
pub use rules::{
    CapRange, ControlRule, RuleDefaults, ScoreCaps, ScoreModel, ScoringRules, SynergyRule,
    ZoneRule,
};
pub use score::{ScoreDelta, SubscoreKey, Subscores};

use serde::{Deserialize, Serialize};

use crate::training::scenario::ScenarioState;

/// Stateless evaluator binding a rule set to scenario snapshots.
pub struct RiskEngine {
    rules: ScoringRules,
}

impl RiskEngine {
    pub fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    pub fn score(&self, scenario: &ScenarioState) -> ScoreResult {
        calculate_score(
            &self.rules,
            &scenario.devices,
            &scenario.device_zones,
            &scenario.controls,
            &scenario.flagged_devices,
        )
    }
}

/// One contributing factor in an evaluation, allowing transparent audits.
/// Zone-rule entries are device-attributed: their id is
/// `"{ruleId}_{deviceId}"` and their text leads with the device label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub rule_id: String,
    pub delta: ScoreDelta,
    pub explain: String,
}

impl Explanation {
    /// Signed sum of this entry's delta across all subscores.
    pub fn total_delta(&self) -> f64 {
        self.delta.total()
    }

    pub fn is_baseline(&self) -> bool {
        self.rule_id == BASELINE_RULE_ID
    }
}

/// Output of one scoring pass. A pure computation record: built fresh on
/// every call and never mutated after return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub subscores: Subscores,
    pub total: f64,
    pub explanations: Vec<Explanation>,
}
