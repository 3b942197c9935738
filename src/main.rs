// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/hearthguard

//! HearthGuard - Home Security Controller
//!
//! Runs a scripted scenario (or the built-in demo) against the alarm
//! decision engine, logging every status change along the way.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use hearthguard::core::{drain_alarm_count, LoggingListener};
use hearthguard::image::ImageAnalyzer;
use hearthguard::scenario::{Scenario, ScenarioRunner};
use hearthguard::{Config, EventBus, SecurityService, NAME, VERSION};

const EVENT_BUS_MIN_CAPACITY: usize = 256;

/// HearthGuard - Home Security Controller
#[derive(Parser, Debug)]
#[command(name = "hearthguard")]
#[command(author = "HearthGuard Project")]
#[command(version = VERSION)]
#[command(about = "Alarm decision engine for door, window, motion and camera events")]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scenario file to run
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Run the built-in demo scenario
    #[arg(long)]
    demo: bool,

    /// Seed for the random camera analyzer
    #[arg(long)]
    seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable trace-level logging
    #[arg(long)]
    trace: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_create(&config_path)?;

    // Initialize logging
    let log_level = if args.trace {
        Level::TRACE
    } else if args.debug {
        Level::DEBUG
    } else {
        config.log_level.parse().unwrap_or(Level::INFO)
    };

    // RUST_LOG wins over the flags and the config file
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(args.debug)
        .with_line_number(args.debug)
        .with_ansi(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("🏠 {} v{} - Home Security Controller", NAME, VERSION);
    info!("Configuration loaded from {:?}", config_path);

    // Override with command line args
    if args.demo {
        config.demo_mode = true;
    }
    if let Some(seed) = args.seed {
        config.analyzer.seed = Some(seed);
    }

    let scenario = match (&args.scenario, config.demo_mode) {
        (Some(path), _) => Scenario::load(path)?,
        (None, true) => Scenario::demo(),
        (None, false) => bail!("No scenario given. Pass --scenario <file> or --demo"),
    };

    let analyzer: Box<dyn ImageAnalyzer> = match scenario.camera() {
        Some(scripted) => Box::new(scripted),
        None => config.analyzer.build(),
    };

    let service = SecurityService::from_boxed(Box::new(config.build_repository()), analyzer);
    info!(
        "System starts {} / {} with {} sensor(s)",
        service.arming_status(),
        service.alarm_status(),
        service.sensors().len()
    );

    // Each step publishes at most two events
    let bus = Arc::new(EventBus::new((scenario.steps.len() * 2).max(EVENT_BUS_MIN_CAPACITY)));
    let mut events = bus.subscribe();
    service.add_status_listener(Arc::new(LoggingListener));
    service.add_status_listener(bus.clone());

    let result = ScenarioRunner::new(&service).run(&scenario);

    let alarms = drain_alarm_count(&mut events);
    info!("{} status event(s) published, {} full alarm(s)", bus.published(), alarms);

    match result {
        Ok(report) => {
            info!(
                "Scenario {:?} finished: {} step(s), {} expectation(s) met",
                report.name, report.steps_run, report.expectations_met
            );
            println!("{}", serde_json::to_string_pretty(&report.final_state)?);
            Ok(())
        }
        Err(e) => {
            error!("Scenario failed: {}", e);
            println!("{}", serde_json::to_string_pretty(&service.snapshot())?);
            Err(e.into())
        }
    }
}
