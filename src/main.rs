use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::fs;
use std::path::PathBuf;

use uanbridge::bridge::Bridge;
use uanbridge::config::Config;
use uanbridge::config_loader;
use uanbridge::scenario::{generate_traffic, run_scenario, Report, TrafficReport};
use uanbridge::translator::AddressTranslator;

/// Replay address translation scenarios for tap-bridged acoustic networks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the scenario configuration YAML file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the JSON report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the traffic generator seed
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => config_loader::load_config(path)?,
        None => Config::default(),
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(config.log_level())).init();

    info!("Starting uanbridge");
    if let Some(path) = &args.config {
        info!("Configuration file: {:?}", path);
    }

    if let Some(seed) = args.seed {
        if let Some(traffic) = config.traffic.as_mut() {
            traffic.seed = seed;
        }
    }

    let report = run(&config)?;

    let json = serde_json::to_string_pretty(&report).wrap_err("Failed to serialize report")?;
    match &args.output {
        Some(path) => {
            fs::write(path, json)
                .wrap_err_with(|| format!("Failed to write report '{}'", path.display()))?;
            info!("Report written to: {:?}", path);
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn run(config: &Config) -> Result<Report> {
    let mut translator = AddressTranslator::with_config(&config.translator)?;
    let steps = run_scenario(&mut translator, &config.steps);
    info!("Replayed {} steps, {} records live", steps.len(), translator.len());

    let traffic = match &config.traffic {
        Some(traffic_config) => {
            let mut bridge = Bridge::new(AddressTranslator::with_config(&config.translator)?);
            let stats = generate_traffic(&mut bridge, traffic_config);
            Some(TrafficReport {
                stats,
                records: bridge.translator().records().collect(),
            })
        }
        None => None,
    };

    Ok(Report {
        steps,
        records: translator.records().collect(),
        traffic,
    })
}
