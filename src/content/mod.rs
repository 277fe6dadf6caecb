//! Loading and validation of scoring-rules documents.
//!
//! The engine itself never validates content; this layer is where a
//! malformed or unsupported document becomes a hard error before it can
//! reach a scoring call.

use std::fs;
use std::path::{Path, PathBuf};

use crate::training::scoring::ScoringRules;

/// Rule document version this build understands.
pub const SUPPORTED_RULES_VERSION: u32 = 1;

const DEFAULT_RULES_JSON: &str = include_str!("default_rules.json");

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("unable to read rules document {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("rules document is not valid: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unsupported rules version {found}, this build supports {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}

/// Parse a rules document from JSON text and check its version.
pub fn parse_rules(json: &str) -> Result<ScoringRules, ContentError> {
    let rules: ScoringRules = serde_json::from_str(json)?;
    if rules.version != SUPPORTED_RULES_VERSION {
        return Err(ContentError::UnsupportedVersion {
            found: rules.version,
            supported: SUPPORTED_RULES_VERSION,
        });
    }
    Ok(rules)
}

/// Load a rules document from disk.
pub fn load_rules(path: &Path) -> Result<ScoringRules, ContentError> {
    let json = fs::read_to_string(path).map_err(|source| ContentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let rules = parse_rules(&json)?;
    tracing::debug!(
        path = %path.display(),
        zone_rules = rules.zone_rules.len(),
        control_rules = rules.control_rules.len(),
        synergy_rules = rules.synergy_rules.len(),
        "loaded scoring rules"
    );
    Ok(rules)
}

/// The rule set bundled with the trainer.
pub fn default_rules() -> Result<ScoringRules, ContentError> {
    parse_rules(DEFAULT_RULES_JSON)
}
