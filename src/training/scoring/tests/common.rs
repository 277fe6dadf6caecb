use crate::training::scenario::{
    control, Device, DeviceType, RiskFlag, ScenarioState, ZoneId,
};
use crate::training::scoring::{RuleDefaults, ScoreDelta, ScoreModel, ScoringRules, SubscoreKey};

pub(crate) fn bundled_rules() -> ScoringRules {
    crate::content::default_rules().expect("bundled rule set parses")
}

/// Rule set with nothing but a baseline, for exercising the arithmetic
/// steps in isolation.
pub(crate) fn baseline_only_rules(baseline: ScoreDelta) -> ScoringRules {
    ScoringRules {
        version: 1,
        score_model: ScoreModel::default(),
        defaults: RuleDefaults { baseline },
        zone_rules: Vec::new(),
        control_rules: Vec::new(),
        synergy_rules: Vec::new(),
    }
}

pub(crate) fn delta(exposure: f64, credential_account: f64, hygiene: f64) -> ScoreDelta {
    ScoreDelta::new()
        .with(SubscoreKey::Exposure, exposure)
        .with(SubscoreKey::CredentialAccount, credential_account)
        .with(SubscoreKey::Hygiene, hygiene)
}

pub(crate) fn flagged_device(id: &str, label: &str, flag: RiskFlag) -> Device {
    Device::new(id, DeviceType::Smartphone, label, ZoneId::Main).with_flag(flag)
}

/// Scenario with `count` IoT devices on the main network and the dedicated
/// IoT network switched on, ready for synergy-threshold tests.
pub(crate) fn iot_fleet(count: usize) -> ScenarioState {
    let devices = (0..count)
        .map(|index| {
            Device::new(
                format!("iot-{index}").as_str(),
                DeviceType::SmartSpeaker,
                format!("Speaker {index}"),
                ZoneId::Main,
            )
            .with_flag(RiskFlag::IotDevice)
        })
        .collect();

    let mut scenario = ScenarioState::new(devices);
    scenario
        .controls
        .set_enabled(control::IOT_NETWORK_ENABLED, true);
    scenario
}

/// Scenario with no devices and a single control set.
pub(crate) fn controls_only(name: &str, enabled: bool) -> ScenarioState {
    let mut scenario = ScenarioState::new(Vec::new());
    scenario.controls.set_enabled(name, enabled);
    scenario
}

pub(crate) fn wifi_scenario(security: &str) -> ScenarioState {
    let mut scenario = ScenarioState::new(Vec::new());
    scenario.controls.set_choice(control::WIFI_SECURITY, security);
    scenario
}
