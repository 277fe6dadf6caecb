//! Plain-text risk report rendered from a score result. Consumers pass the
//! reporting date in, keeping generation as pure as the engine itself.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::scoring::{explain, ScoreResult, SortOrder, SubscoreKey};

/// Coarse banding of the weighted total for headlines and badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Guarded,
    Elevated,
    Critical,
}

impl RiskLevel {
    pub fn from_total(total: f64) -> Self {
        if total < 25.0 {
            RiskLevel::Low
        } else if total < 50.0 {
            RiskLevel::Guarded
        } else if total < 75.0 {
            RiskLevel::Elevated
        } else {
            RiskLevel::Critical
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Guarded => "guarded",
            RiskLevel::Elevated => "elevated",
            RiskLevel::Critical => "critical",
        }
    }
}

/// Rendered report: headline, per-subscore breakdown, and ranked drivers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub generated_on: NaiveDate,
    pub total: f64,
    pub level: RiskLevel,
    pub subscore_lines: Vec<String>,
    pub driver_lines: Vec<String>,
}

impl RiskReport {
    pub fn generate(
        result: &ScoreResult,
        order: SortOrder,
        driver_count: usize,
        generated_on: NaiveDate,
    ) -> Self {
        let level = RiskLevel::from_total(result.total);

        let net = explain::subscore_totals(&result.explanations);
        let subscore_lines = SubscoreKey::ALL
            .into_iter()
            .map(|key| {
                format!(
                    "{}: {:.1} (net rule effect {:+.1})",
                    key.as_str(),
                    result.subscores.get(key),
                    net.get(key)
                )
            })
            .collect();

        let driver_lines = explain::ranked(&result.explanations, order, driver_count)
            .into_iter()
            .map(|entry| format!("- {} ({:+.1})", entry.explain, entry.total_delta()))
            .collect();

        Self {
            generated_on,
            total: result.total,
            level,
            subscore_lines,
            driver_lines,
        }
    }

    pub fn to_text(&self) -> String {
        let mut lines = Vec::with_capacity(self.subscore_lines.len() + self.driver_lines.len() + 3);
        lines.push(format!(
            "Risk report for {}: total {:.1} ({})",
            self.generated_on,
            self.total,
            self.level.label()
        ));
        lines.extend(self.subscore_lines.iter().cloned());
        if !self.driver_lines.is_empty() {
            lines.push("What mattered most:".to_string());
            lines.extend(self.driver_lines.iter().cloned());
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::scoring::{Explanation, ScoreDelta, Subscores};

    fn result_with(total: f64, explanations: Vec<Explanation>) -> ScoreResult {
        ScoreResult {
            subscores: Subscores {
                exposure: total,
                credential_account: total,
                hygiene: total,
            },
            total,
            explanations,
        }
    }

    #[test]
    fn level_banding_follows_total() {
        assert_eq!(RiskLevel::from_total(10.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_total(25.0), RiskLevel::Guarded);
        assert_eq!(RiskLevel::from_total(60.0), RiskLevel::Elevated);
        assert_eq!(RiskLevel::from_total(90.0), RiskLevel::Critical);
    }

    #[test]
    fn report_renders_headline_and_drivers() {
        let explanations = vec![
            Explanation {
                rule_id: "baseline".to_string(),
                delta: ScoreDelta::new().with(SubscoreKey::Exposure, 30.0),
                explain: "Starting risk posture before any adjustments".to_string(),
            },
            Explanation {
                rule_id: "wifi_open".to_string(),
                delta: ScoreDelta::new().with(SubscoreKey::Exposure, 25.0),
                explain: "The Wi-Fi has no encryption".to_string(),
            },
        ];
        let report = RiskReport::generate(
            &result_with(80.0, explanations),
            SortOrder::default(),
            3,
            NaiveDate::from_ymd_opt(2026, 8, 26).expect("valid date"),
        );

        let text = report.to_text();
        assert!(text.contains("total 80.0 (critical)"));
        assert!(text.contains("The Wi-Fi has no encryption (+25.0)"));
        assert_eq!(report.driver_lines.len(), 1);
    }
}
