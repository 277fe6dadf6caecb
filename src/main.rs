use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use netguard_trainer::config::AppConfig;
use netguard_trainer::content;
use netguard_trainer::error::AppError;
use netguard_trainer::telemetry;
use netguard_trainer::training::report::RiskReport;
use netguard_trainer::training::scenario::{
    control, sample_home_network, DeviceId, RiskFlag, ScenarioState, ZoneId,
};
use netguard_trainer::training::scoring::{RiskEngine, SortOrder};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "NetGuard Trainer",
    about = "Score simulated home-network scenarios from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score the built-in demo scenario before and after hardening (default)
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
struct DemoArgs {
    /// Path to a scoring-rules JSON document (defaults to the bundled set)
    #[arg(long)]
    rules: Option<PathBuf>,
    /// Driver ordering: abs, increase, or reduction
    #[arg(long, default_value = "abs", value_parser = parse_sort_order)]
    sort: SortOrder,
    /// Number of top drivers to print (defaults to the configured count)
    #[arg(long)]
    top: Option<usize>,
    /// Report date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,
    /// Only score the starting layout, skipping the hardening pass
    #[arg(long)]
    skip_hardening: bool,
}

fn main() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Demo(args) => run_demo(args, &config),
    }
}

fn run_demo(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    let rules_path = args.rules.or_else(|| config.content.rules_path.clone());
    let rules = match &rules_path {
        Some(path) => content::load_rules(path)?,
        None => content::default_rules()?,
    };
    info!(
        source = %rules_path
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "bundled".to_string()),
        version = rules.version,
        "scoring rules ready"
    );

    let engine = RiskEngine::new(rules);
    let driver_count = args.top.unwrap_or(config.report.top_drivers);
    let date = args
        .date
        .unwrap_or_else(|| Local::now().date_naive());

    let mut scenario = sample_home_network();

    println!("Zones:");
    for zone in [ZoneId::Main, ZoneId::Guest, ZoneId::Iot, ZoneId::Investigate] {
        println!("- {}: {}", zone.label(), zone.description());
    }
    println!();
    println!("Devices:");
    for device in &scenario.devices {
        let zone = device.current_zone(&scenario.device_zones);
        println!("- {} on {}", device.label, zone.label());
    }
    println!();

    let before = engine.score(&scenario);
    println!("== Starting layout ==");
    println!(
        "{}",
        RiskReport::generate(&before, args.sort, driver_count, date).to_text()
    );

    if args.skip_hardening {
        return Ok(());
    }

    harden(&mut scenario);
    let after = engine.score(&scenario);
    println!();
    println!("== After hardening ==");
    println!(
        "{}",
        RiskReport::generate(&after, args.sort, driver_count, date).to_text()
    );
    println!();
    println!(
        "Total risk moved from {:.1} to {:.1} ({:+.1})",
        before.total,
        after.total,
        after.total - before.total
    );
    Ok(())
}

/// Apply the moves the tutorial teaches: isolate smart devices, sandbox the
/// visitor, quarantine the unknown device, and turn on the strong controls.
fn harden(scenario: &mut ScenarioState) {
    let placements: Vec<(DeviceId, ZoneId)> = scenario
        .devices
        .iter()
        .filter_map(|device| {
            if device.has_flag(RiskFlag::IotDevice) {
                Some((device.id.clone(), ZoneId::Iot))
            } else if device.has_flag(RiskFlag::VisitorDevice) {
                Some((device.id.clone(), ZoneId::Guest))
            } else if device.has_flag(RiskFlag::UnknownDevice) {
                Some((device.id.clone(), ZoneId::Investigate))
            } else {
                None
            }
        })
        .collect();

    for (id, zone) in placements {
        if zone == ZoneId::Investigate {
            scenario.flag_for_review(id.clone());
        }
        scenario.place_device(id, zone);
    }

    scenario.controls.set_choice(control::WIFI_SECURITY, "WPA3");
    scenario.controls.set_enabled(control::MFA_ENABLED, true);
    scenario
        .controls
        .set_enabled(control::AUTO_UPDATES_ENABLED, true);
    scenario
        .controls
        .set_enabled(control::ROUTER_PASSWORD_CHANGED, true);
}

fn parse_sort_order(value: &str) -> Result<SortOrder, String> {
    match value {
        "abs" => Ok(SortOrder::LargestAbsoluteImpactFirst),
        "increase" => Ok(SortOrder::LargestIncreaseFirst),
        "reduction" => Ok(SortOrder::LargestReductionFirst),
        other => Err(format!(
            "unknown sort order '{other}', expected abs, increase, or reduction"
        )),
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| format!("invalid date '{value}': {err}"))
}
