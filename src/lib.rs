//! Risk scoring core for the NetGuard security-awareness trainer.
//!
//! Users arrange simulated devices into trust zones and toggle security
//! controls; a declarative rule set is evaluated deterministically to
//! produce a weighted, capped risk score with an auditable explanation
//! trail. All scenario data is synthetic; nothing here assesses a real
//! network.

pub mod config;
pub mod content;
pub mod error;
pub mod telemetry;
pub mod training;
