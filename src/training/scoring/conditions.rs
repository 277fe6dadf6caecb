//! Rule condition grammar and its evaluators.
//!
//! Each rule category gets its own condition type with an explicit, side
//! effect free evaluator, so the grammar is checked at compile time while the
//! serialized shape stays identical to the JSON content files.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::training::scenario::{
    ControlValue, Controls, Device, DeviceId, DeviceType, RiskFlag, ZoneId,
};

/// Condition over a single device, its current zone, and its review state.
/// Atoms combine with an implicit AND; an absent atom is vacuously true.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ZoneCondition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_has_flag: Option<RiskFlag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_type_is: Option<DeviceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_is: Option<ZoneId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_not: Option<ZoneId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_in: Option<Vec<ZoneId>>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub flagged_for_investigation: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub not_flagged_for_investigation: bool,
}

impl ZoneCondition {
    pub fn matches(&self, device: &Device, current_zone: ZoneId, flagged: bool) -> bool {
        if let Some(flag) = self.device_has_flag {
            if !device.has_flag(flag) {
                return false;
            }
        }
        if let Some(device_type) = self.device_type_is {
            if device.device_type != device_type {
                return false;
            }
        }
        if let Some(zone) = self.zone_is {
            if current_zone != zone {
                return false;
            }
        }
        if let Some(zone) = self.zone_not {
            if current_zone == zone {
                return false;
            }
        }
        if let Some(zones) = &self.zone_in {
            if !zones.contains(&current_zone) {
                return false;
            }
        }
        if self.flagged_for_investigation && !flagged {
            return false;
        }
        if self.not_flagged_for_investigation && flagged {
            return false;
        }
        true
    }
}

/// Exact-equality check of one control's current value. No partial or range
/// matching; a control the scenario does not carry never matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlCondition {
    pub control: String,
    pub equals: ControlValue,
}

impl ControlCondition {
    pub fn matches(&self, controls: &Controls) -> bool {
        controls.get(&self.control) == Some(&self.equals)
    }
}

/// Share-of-population threshold: of all devices carrying `flag`, the
/// fraction currently in `zone` must be at least `pct`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagZonePct {
    pub flag: RiskFlag,
    pub zone: ZoneId,
    pub pct: f64,
}

/// Absolute-count threshold scoped to one zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagZoneCount {
    pub flag: RiskFlag,
    pub zone: ZoneId,
    pub count: usize,
}

/// Population-wide count threshold, ignoring zones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagCount {
    pub flag: RiskFlag,
    pub count: usize,
}

/// One entry of a synergy rule's `all[]` list. The serialized shape keys each
/// variant by its wrapper field, matching the content files; anything we do
/// not recognize falls through to [`SynergyAtom::Unrecognized`], which always
/// holds. Content-time linting, not the engine, owns rejecting such entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SynergyAtom {
    Control(ControlCondition),
    PctInZone {
        #[serde(rename = "pctOfDevicesWithFlagInZoneAtLeast")]
        threshold: FlagZonePct,
    },
    CountInZone {
        #[serde(rename = "countDevicesWithFlagInZoneAtLeast")]
        threshold: FlagZoneCount,
    },
    CountAnywhere {
        #[serde(rename = "countDevicesWithFlagAtLeast")]
        threshold: FlagCount,
    },
    CountUnreviewed {
        #[serde(rename = "countUnflaggedDevicesWithFlag")]
        threshold: FlagCount,
    },
    Unrecognized(serde_json::Value),
}

impl SynergyAtom {
    pub fn holds(
        &self,
        devices: &[Device],
        device_zones: &BTreeMap<DeviceId, ZoneId>,
        controls: &Controls,
        flagged_devices: &BTreeSet<DeviceId>,
    ) -> bool {
        match self {
            SynergyAtom::Control(condition) => condition.matches(controls),
            SynergyAtom::PctInZone { threshold } => {
                let carriers = devices
                    .iter()
                    .filter(|device| device.has_flag(threshold.flag))
                    .count();
                if carriers == 0 {
                    // No carriers means the share is undefined, not satisfied.
                    return false;
                }
                let in_zone = devices
                    .iter()
                    .filter(|device| {
                        device.has_flag(threshold.flag)
                            && device.current_zone(device_zones) == threshold.zone
                    })
                    .count();
                in_zone as f64 / carriers as f64 >= threshold.pct
            }
            SynergyAtom::CountInZone { threshold } => {
                devices
                    .iter()
                    .filter(|device| {
                        device.has_flag(threshold.flag)
                            && device.current_zone(device_zones) == threshold.zone
                    })
                    .count()
                    >= threshold.count
            }
            SynergyAtom::CountAnywhere { threshold } => {
                devices
                    .iter()
                    .filter(|device| device.has_flag(threshold.flag))
                    .count()
                    >= threshold.count
            }
            SynergyAtom::CountUnreviewed { threshold } => {
                devices
                    .iter()
                    .filter(|device| {
                        device.has_flag(threshold.flag) && !flagged_devices.contains(&device.id)
                    })
                    .count()
                    >= threshold.count
            }
            SynergyAtom::Unrecognized(_) => true,
        }
    }
}

/// Conjunctive condition over the whole device population plus controls.
/// An empty `all[]` is vacuously true.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynergyCondition {
    #[serde(default)]
    pub all: Vec<SynergyAtom>,
}

impl SynergyCondition {
    pub fn holds(
        &self,
        devices: &[Device],
        device_zones: &BTreeMap<DeviceId, ZoneId>,
        controls: &Controls,
        flagged_devices: &BTreeSet<DeviceId>,
    ) -> bool {
        self.all
            .iter()
            .all(|atom| atom.holds(devices, device_zones, controls, flagged_devices))
    }
}
