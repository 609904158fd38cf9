use std::path::PathBuf;

use clap::{Parser, Subcommand};
use proforma::commands::{self, ScenarioArgs};
use proforma::init_logging;

#[derive(Parser, Debug)]
#[command(name = "proforma")]
#[command(about = "Scenario modeling for an automotive pro-forma P&L")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Path to the data directory (default: ~/.proforma/)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the lever registry
    Levers {
        #[arg(long)]
        json: bool,
    },
    /// List the scenario presets
    Presets {
        #[arg(long)]
        json: bool,
    },
    /// Compute the pro-forma P&L impact of a scenario
    Impact {
        #[command(flatten)]
        scenario: ScenarioArgs,
        #[arg(long)]
        json: bool,
    },
    /// Parse a free-text scenario description into lever adjustments
    Parse {
        /// Scenario description, e.g. "tariffs increase by 25%"
        text: String,
        #[arg(long)]
        json: bool,
    },
    /// Run a Monte Carlo simulation over a scenario
    Simulate {
        #[command(flatten)]
        scenario: ScenarioArgs,
        /// Number of iterations
        #[arg(long, default_value_t = 10_000)]
        iterations: usize,
        /// Fixed RNG seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        json: bool,
    },
    /// Goal-seek lever settings for a target metric value
    Optimize {
        #[command(flatten)]
        scenario: ScenarioArgs,
        /// Metric to drive (ebit or revenue)
        #[arg(long, default_value = "ebit")]
        metric: String,
        /// Target impact in USD millions
        #[arg(long)]
        target: f64,
        #[arg(long)]
        json: bool,
    },
    /// Interactive scenario chat
    Chat,
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".proforma")
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);

    init_logging(&data_dir, &args.log_level)?;

    match args.command {
        Command::Levers { json } => commands::show_levers(json)?,
        Command::Presets { json } => commands::show_presets(json)?,
        Command::Impact { scenario, json } => commands::show_impact(&scenario, json)?,
        Command::Parse { text, json } => commands::parse_text(&text, json)?,
        Command::Simulate {
            scenario,
            iterations,
            seed,
            json,
        } => commands::simulate(&scenario, iterations, seed, json)?,
        Command::Optimize {
            scenario,
            metric,
            target,
            json,
        } => commands::optimize(&scenario, &metric, target, json)?,
        Command::Chat => commands::chat()?,
    }

    tracing::info!("Command complete");
    Ok(())
}
