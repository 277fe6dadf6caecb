//! Training simulation domain: scenario state, the scoring core, and
//! report rendering.

pub mod report;
pub mod scenario;
pub mod scoring;

pub use report::{RiskLevel, RiskReport};
pub use scenario::{
    sample_home_network, ControlValue, Controls, Device, DeviceId, DeviceType, RiskFlag,
    ScenarioState, ZoneId,
};
pub use scoring::{
    calculate_score, Explanation, RiskEngine, ScoreDelta, ScoreResult, ScoringRules, SortOrder,
    SubscoreKey, Subscores, BASELINE_RULE_ID,
};
