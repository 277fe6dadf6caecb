//! Versioned scoring-rules document: the declarative configuration the
//! engine evaluates. The serde shape mirrors the JSON content files exactly;
//! the three rule arrays are required, so a structurally truncated document
//! fails at parse time instead of silently scoring on nothing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::conditions::{ControlCondition, SynergyCondition, ZoneCondition};
use super::score::{ScoreDelta, SubscoreKey};

/// Inclusive clamp range for one subscore or for the weighted total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapRange {
    pub min: f64,
    pub max: f64,
}

impl CapRange {
    pub const UNBOUNDED: CapRange = CapRange {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    /// Clamp without assuming `min <= max`; a malformed range degrades
    /// instead of panicking.
    pub fn clamp(self, value: f64) -> f64 {
        value.min(self.max).max(self.min)
    }
}

const TOTAL_CAP_KEY: &str = "total";

/// Clamp ranges keyed by subscore name, plus the special `total` entry.
/// Missing entries leave that value unclamped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreCaps(pub BTreeMap<String, CapRange>);

impl ScoreCaps {
    pub fn for_subscore(&self, key: SubscoreKey) -> CapRange {
        self.0
            .get(key.as_str())
            .copied()
            .unwrap_or(CapRange::UNBOUNDED)
    }

    pub fn for_total(&self) -> CapRange {
        self.0
            .get(TOTAL_CAP_KEY)
            .copied()
            .unwrap_or(CapRange::UNBOUNDED)
    }
}

/// Declares the subscore categories, their weights in the total, and caps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreModel {
    pub subscores: Vec<String>,
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
    #[serde(default)]
    pub caps: ScoreCaps,
}

impl ScoreModel {
    pub fn weight(&self, key: SubscoreKey) -> Option<f64> {
        self.weights.get(key.as_str()).copied()
    }
}

/// Unconditional seed applied at the start of every evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleDefaults {
    #[serde(default)]
    pub baseline: ScoreDelta,
}

/// Per-device rule: condition over one device's zone and review state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRule {
    pub id: String,
    pub when: ZoneCondition,
    pub add: ScoreDelta,
    pub explain: String,
}

/// Rule keyed to a single control's current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlRule {
    pub id: String,
    pub when: ControlCondition,
    pub add: ScoreDelta,
    pub explain: String,
}

/// Cross-cutting rule mixing control state and device-population aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynergyRule {
    pub id: String,
    pub when: SynergyCondition,
    pub add: ScoreDelta,
    pub explain: String,
}

/// The full versioned rule set. Treated as configuration data supplied by
/// the content layer, never hand-written per scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringRules {
    pub version: u32,
    pub score_model: ScoreModel,
    #[serde(default)]
    pub defaults: RuleDefaults,
    pub zone_rules: Vec<ZoneRule>,
    pub control_rules: Vec<ControlRule>,
    pub synergy_rules: Vec<SynergyRule>,
}
