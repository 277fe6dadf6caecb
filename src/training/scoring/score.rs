use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::de::{Deserializer, Error as _};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use super::rules::ScoreCaps;

/// The three subscore categories every rule delta and result is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubscoreKey {
    Exposure,
    CredentialAccount,
    Hygiene,
}

impl SubscoreKey {
    pub const ALL: [SubscoreKey; 3] = [
        SubscoreKey::Exposure,
        SubscoreKey::CredentialAccount,
        SubscoreKey::Hygiene,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            SubscoreKey::Exposure => "exposure",
            SubscoreKey::CredentialAccount => "credentialAccount",
            SubscoreKey::Hygiene => "hygiene",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }
}

/// Partial subscore vector carried by a rule's `add` clause and by every
/// explanation. Content files may name subscores this build does not know
/// about; those keys are dropped at parse time rather than rejected, so a
/// newer rule document still scores on the categories it shares with us.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreDelta(BTreeMap<SubscoreKey, f64>);

impl ScoreDelta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: SubscoreKey, value: f64) -> Self {
        self.0.insert(key, value);
        self
    }

    pub fn get(&self, key: SubscoreKey) -> f64 {
        self.0.get(&key).copied().unwrap_or(0.0)
    }

    pub fn add(&mut self, key: SubscoreKey, value: f64) {
        *self.0.entry(key).or_insert(0.0) += value;
    }

    pub fn iter(&self) -> btree_map::Iter<'_, SubscoreKey, f64> {
        self.0.iter()
    }

    /// Signed sum across all subscore keys. Negative means risk reduction.
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }
}

impl Serialize for ScoreDelta {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key.as_str(), value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ScoreDelta {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        let mut entries = BTreeMap::new();
        for (name, value) in raw {
            let Some(key) = SubscoreKey::parse(&name) else {
                // Unknown subscore names are ignored by contract.
                continue;
            };
            let value = value
                .as_f64()
                .ok_or_else(|| D::Error::custom(format!("subscore '{name}' must be a number")))?;
            entries.insert(key, value);
        }
        Ok(Self(entries))
    }
}

/// Accumulated subscores for one evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscores {
    pub exposure: f64,
    pub credential_account: f64,
    pub hygiene: f64,
}

impl Subscores {
    pub fn get(&self, key: SubscoreKey) -> f64 {
        match key {
            SubscoreKey::Exposure => self.exposure,
            SubscoreKey::CredentialAccount => self.credential_account,
            SubscoreKey::Hygiene => self.hygiene,
        }
    }

    fn get_mut(&mut self, key: SubscoreKey) -> &mut f64 {
        match key {
            SubscoreKey::Exposure => &mut self.exposure,
            SubscoreKey::CredentialAccount => &mut self.credential_account,
            SubscoreKey::Hygiene => &mut self.hygiene,
        }
    }

    pub fn apply(&mut self, delta: &ScoreDelta) {
        for (key, value) in delta.iter() {
            *self.get_mut(*key) += value;
        }
    }

    pub fn clamp_to(&mut self, caps: &ScoreCaps) {
        for key in SubscoreKey::ALL {
            let slot = self.get_mut(key);
            *slot = caps.for_subscore(key).clamp(*slot);
        }
    }
}
