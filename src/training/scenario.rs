use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Identifier wrapper for simulated devices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeviceId(pub String);

impl From<&str> for DeviceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// The eleven device categories a scenario can place on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    Laptop,
    Desktop,
    Smartphone,
    Tablet,
    Printer,
    SmartTv,
    SmartSpeaker,
    SecurityCamera,
    SmartThermostat,
    GameConsole,
    NetworkStorage,
}

/// Risk markers carried by a device. A device may hold several at once;
/// they are scenario metadata, not a user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFlag {
    UnknownDevice,
    IotDevice,
    VisitorDevice,
    TrustedWorkDevice,
}

/// Trust zones a device can be assigned to. `Investigate` is a holding pen
/// for suspicious devices rather than a real network; every behavioral
/// difference between zones lives in the scoring rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneId {
    Main,
    Guest,
    Iot,
    Investigate,
}

impl ZoneId {
    pub const fn label(self) -> &'static str {
        match self {
            ZoneId::Main => "Main network",
            ZoneId::Guest => "Guest network",
            ZoneId::Iot => "IoT network",
            ZoneId::Investigate => "Under investigation",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            ZoneId::Main => "Trusted segment for the household's own computers and phones",
            ZoneId::Guest => "Isolated segment for visitors with internet-only access",
            ZoneId::Iot => "Dedicated segment keeping smart devices away from trusted machines",
            ZoneId::Investigate => "Quarantine shelf for devices that need a closer look",
        }
    }
}

/// A simulated network device. Immutable during scoring; the current zone
/// assignment is tracked separately so the same device can be evaluated
/// under many hypothetical placements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: DeviceId,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub label: String,
    /// Home zone; doubles as the current zone until a placement overrides it.
    pub network_id: ZoneId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_id: Option<String>,
    #[serde(default)]
    pub risk_flags: BTreeSet<RiskFlag>,
}

impl Device {
    pub fn new(
        id: impl Into<DeviceId>,
        device_type: DeviceType,
        label: impl Into<String>,
        network_id: ZoneId,
    ) -> Self {
        Self {
            id: id.into(),
            device_type,
            label: label.into(),
            network_id,
            ip: None,
            local_id: None,
            risk_flags: BTreeSet::new(),
        }
    }

    pub fn with_flag(mut self, flag: RiskFlag) -> Self {
        self.risk_flags.insert(flag);
        self
    }

    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    pub fn with_local_id(mut self, local_id: impl Into<String>) -> Self {
        self.local_id = Some(local_id.into());
        self
    }

    pub fn has_flag(&self, flag: RiskFlag) -> bool {
        self.risk_flags.contains(&flag)
    }

    /// Zone the device currently sits in: the placement override if one
    /// exists, otherwise its home zone.
    pub fn current_zone(&self, placements: &BTreeMap<DeviceId, ZoneId>) -> ZoneId {
        placements.get(&self.id).copied().unwrap_or(self.network_id)
    }
}

/// Current value of a security control: a plain on/off toggle or one pick
/// from a closed set of choices (e.g. `wifiSecurity` = `WPA2`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ControlValue {
    Enabled(bool),
    Choice(String),
}

/// Names of the controls referenced by the bundled rule set. A scenario may
/// support any subset; rules naming an absent control simply never match.
pub mod control {
    pub const WIFI_SECURITY: &str = "wifiSecurity";
    pub const MFA_ENABLED: &str = "mfaEnabled";
    pub const AUTO_UPDATES_ENABLED: &str = "autoUpdatesEnabled";
    pub const ROUTER_PASSWORD_CHANGED: &str = "routerPasswordChanged";
    pub const GUEST_NETWORK_ENABLED: &str = "guestNetworkEnabled";
    pub const IOT_NETWORK_ENABLED: &str = "iotNetworkEnabled";
}

/// Flat record of named security toggles. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls(BTreeMap<String, ControlValue>);

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&ControlValue> {
        self.0.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: ControlValue) {
        self.0.insert(name.into(), value);
    }

    pub fn set_enabled(&mut self, name: impl Into<String>, enabled: bool) {
        self.set(name, ControlValue::Enabled(enabled));
    }

    pub fn set_choice(&mut self, name: impl Into<String>, choice: impl Into<String>) {
        self.set(name, ControlValue::Choice(choice.into()));
    }
}

/// Everything the scoring engine needs about the user's current board:
/// the device roster, placement overrides, control toggles, and the set of
/// devices the user marked for investigation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioState {
    pub devices: Vec<Device>,
    #[serde(default)]
    pub device_zones: BTreeMap<DeviceId, ZoneId>,
    #[serde(default)]
    pub controls: Controls,
    #[serde(default)]
    pub flagged_devices: BTreeSet<DeviceId>,
}

impl ScenarioState {
    pub fn new(devices: Vec<Device>) -> Self {
        Self {
            devices,
            device_zones: BTreeMap::new(),
            controls: Controls::new(),
            flagged_devices: BTreeSet::new(),
        }
    }

    /// Drag-and-drop analogue: move a device to a zone.
    pub fn place_device(&mut self, id: impl Into<DeviceId>, zone: ZoneId) {
        self.device_zones.insert(id.into(), zone);
    }

    pub fn set_control(&mut self, name: impl Into<String>, value: ControlValue) {
        self.controls.set(name, value);
    }

    /// Mark a device for investigation. Independent of its risk flags.
    pub fn flag_for_review(&mut self, id: impl Into<DeviceId>) {
        self.flagged_devices.insert(id.into());
    }

    pub fn clear_review_flag(&mut self, id: &DeviceId) {
        self.flagged_devices.remove(id);
    }

    pub fn is_flagged(&self, id: &DeviceId) -> bool {
        self.flagged_devices.contains(id)
    }
}

/// The demo household used by the CLI and the workflow tests: a handful of
/// trusted machines, three smart devices, a visitor, and one device nobody
/// recognizes, all parked on the main network with middling controls.
pub fn sample_home_network() -> ScenarioState {
    let devices = vec![
        Device::new("dev-laptop", DeviceType::Laptop, "Work Laptop", ZoneId::Main)
            .with_flag(RiskFlag::TrustedWorkDevice)
            .with_ip("192.168.1.10"),
        Device::new("dev-phone", DeviceType::Smartphone, "Family Phone", ZoneId::Main)
            .with_ip("192.168.1.11"),
        Device::new("dev-tv", DeviceType::SmartTv, "Smart TV", ZoneId::Main)
            .with_flag(RiskFlag::IotDevice)
            .with_local_id("living-room"),
        Device::new(
            "dev-speaker",
            DeviceType::SmartSpeaker,
            "Kitchen Speaker",
            ZoneId::Main,
        )
        .with_flag(RiskFlag::IotDevice),
        Device::new(
            "dev-cam",
            DeviceType::SecurityCamera,
            "Doorbell Camera",
            ZoneId::Main,
        )
        .with_flag(RiskFlag::IotDevice),
        Device::new(
            "dev-visitor",
            DeviceType::Smartphone,
            "Visitor Phone",
            ZoneId::Main,
        )
        .with_flag(RiskFlag::VisitorDevice),
        Device::new(
            "dev-mystery",
            DeviceType::Smartphone,
            "Unfamiliar Device",
            ZoneId::Main,
        )
        .with_flag(RiskFlag::UnknownDevice),
    ];

    let mut scenario = ScenarioState::new(devices);
    scenario
        .controls
        .set_choice(control::WIFI_SECURITY, "WPA2");
    scenario.controls.set_enabled(control::MFA_ENABLED, false);
    scenario
        .controls
        .set_enabled(control::AUTO_UPDATES_ENABLED, false);
    scenario
        .controls
        .set_enabled(control::ROUTER_PASSWORD_CHANGED, false);
    scenario
        .controls
        .set_enabled(control::GUEST_NETWORK_ENABLED, true);
    scenario
        .controls
        .set_enabled(control::IOT_NETWORK_ENABLED, true);
    scenario
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_overrides_home_zone() {
        let device = Device::new("d1", DeviceType::Laptop, "Laptop", ZoneId::Main);
        let mut placements = BTreeMap::new();
        assert_eq!(device.current_zone(&placements), ZoneId::Main);

        placements.insert(DeviceId::from("d1"), ZoneId::Guest);
        assert_eq!(device.current_zone(&placements), ZoneId::Guest);
    }

    #[test]
    fn control_toggles_round_trip() {
        let mut scenario = ScenarioState::new(Vec::new());
        scenario.set_control(control::MFA_ENABLED, ControlValue::Enabled(true));
        assert_eq!(
            scenario.controls.get(control::MFA_ENABLED),
            Some(&ControlValue::Enabled(true))
        );
    }

    #[test]
    fn review_flags_track_user_actions() {
        let mut scenario = ScenarioState::new(vec![Device::new(
            "d1",
            DeviceType::Smartphone,
            "Phone",
            ZoneId::Main,
        )]);
        let id = DeviceId::from("d1");

        assert!(!scenario.is_flagged(&id));
        scenario.flag_for_review("d1");
        assert!(scenario.is_flagged(&id));
        scenario.clear_review_flag(&id);
        assert!(!scenario.is_flagged(&id));
    }
}
