//! CLI command implementations and the interactive chat loop.
//!
//! One-shot commands build a scenario from `--preset`/`--set` arguments, run
//! the engine inline and print either a text table or pretty JSON. The chat
//! loop keeps a [`ScenarioSession`] and hands long-running jobs to the
//! background [`EngineWorker`].

use std::fmt;
use std::io::{self, BufRead, Write};

use clap::Args;
use color_eyre::Result;
use proforma_core::{
    LeverId, LeverValues, LookupError, OptimizationTarget, SimulationConfig, compute_impact,
    find_preset, levers, parse_scenario, presets, run_optimization, run_simulation,
};

use crate::report;
use crate::session::{Role, ScenarioSession};
use crate::worker::{EngineRequest, EngineResponse, EngineWorker};

/// Errors from scenario CLI arguments
#[derive(Debug)]
pub enum ArgumentError {
    /// A --set value that is not in LEVER=VALUE form
    MalformedAssignment(String),
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentError::MalformedAssignment(raw) => {
                write!(f, "expected LEVER=VALUE, got '{raw}'")
            }
        }
    }
}

impl std::error::Error for ArgumentError {}

/// Scenario selection shared by the impact, simulate and optimize commands.
#[derive(Args, Debug, Clone)]
pub struct ScenarioArgs {
    /// Start from a preset bundle (see the presets command)
    #[arg(long)]
    pub preset: Option<String>,

    /// Set an individual lever, e.g. --set tariffs=25 (repeatable)
    #[arg(long = "set", value_name = "LEVER=VALUE")]
    pub set: Vec<String>,
}

impl ScenarioArgs {
    /// Build the lever mapping: preset first, then explicit assignments on top.
    pub fn build_levers(&self) -> Result<LeverValues> {
        let mut values = LeverValues::new();
        if let Some(name) = &self.preset {
            let preset =
                find_preset(name).ok_or_else(|| LookupError::PresetNotFound(name.clone()))?;
            values.apply_preset(preset);
        }
        for raw in &self.set {
            let (id, value) = parse_assignment(raw)?;
            values.set(id, value);
        }
        Ok(values)
    }
}

fn parse_assignment(raw: &str) -> Result<(LeverId, f64)> {
    let (id, value) = raw
        .split_once('=')
        .ok_or_else(|| ArgumentError::MalformedAssignment(raw.to_string()))?;
    Ok((id.trim().parse()?, value.trim().parse()?))
}

/// Print the lever registry.
pub fn show_levers(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(levers())?);
    } else {
        print!("{}", report::render_levers());
    }
    Ok(())
}

/// Print the preset catalog.
pub fn show_presets(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(presets())?);
    } else {
        print!("{}", report::render_presets(presets()));
    }
    Ok(())
}

/// Compute and print the pro-forma P&L for a scenario.
pub fn show_impact(args: &ScenarioArgs, json: bool) -> Result<()> {
    let values = args.build_levers()?;
    let statement = compute_impact(&values);
    if json {
        println!("{}", serde_json::to_string_pretty(&statement)?);
    } else {
        println!("Scenario:");
        print!("{}", report::render_lever_values(&values));
        println!();
        print!("{}", report::render_statement(&statement));
    }
    Ok(())
}

/// Parse a free-text scenario description and show the resulting P&L.
pub fn parse_text(text: &str, json: bool) -> Result<()> {
    let parsed = parse_scenario(text);
    let statement = compute_impact(&parsed.levers);
    if json {
        let combined = serde_json::json!({
            "parsed": parsed,
            "statement": statement,
        });
        println!("{}", serde_json::to_string_pretty(&combined)?);
    } else {
        print!("{}", report::render_parsed(&parsed));
        if !parsed.levers.is_empty() {
            println!();
            print!("{}", report::render_statement(&statement));
        }
    }
    Ok(())
}

/// Run a Monte Carlo simulation inline and print the summary.
pub fn simulate(args: &ScenarioArgs, iterations: usize, seed: Option<u64>, json: bool) -> Result<()> {
    let values = args.build_levers()?;
    let config = SimulationConfig { iterations, seed };
    let summary = run_simulation(&values, &config, None)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", report::render_summary(&summary));
    }
    Ok(())
}

/// Goal-seek lever settings for a target metric value.
pub fn optimize(args: &ScenarioArgs, metric: &str, target: f64, json: bool) -> Result<()> {
    let values = args.build_levers()?;
    let target = OptimizationTarget {
        metric: metric.parse()?,
        value: target,
    };
    let outcome = run_optimization(&values, &target);
    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!("{}", report::render_outcome(&outcome));
    }
    Ok(())
}

/// Interactive scenario chat. Free text is parsed into lever adjustments;
/// `:`-prefixed commands drive the engine directly.
pub fn chat() -> Result<()> {
    let worker = EngineWorker::new();
    let mut session = ScenarioSession::new();
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut input = String::new();

    println!("Scenario modeling chat. Describe a scenario in plain English, or :help for commands.");
    loop {
        drain_responses(&worker, &mut session);

        print!("> ");
        io::stdout().flush()?;
        input.clear();
        if reader.read_line(&mut input)? == 0 {
            break;
        }
        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix(':') {
            if !handle_command(command.trim(), &worker, &mut session) {
                break;
            }
        } else {
            handle_free_text(line, &mut session);
        }
    }
    Ok(())
}

/// Collect any finished background jobs into the session.
fn drain_responses(worker: &EngineWorker, session: &mut ScenarioSession) {
    while let Some(response) = worker.try_recv() {
        match response {
            EngineResponse::SimulationComplete(summary) => {
                print!("{}", report::render_summary(&summary));
                session.set_simulation(*summary);
                session.finish_run();
            }
            EngineResponse::OptimizationComplete(outcome) => {
                print!("{}", report::render_outcome(&outcome));
                session.set_optimization(*outcome);
                session.finish_run();
            }
            EngineResponse::Cancelled => {
                println!("Run cancelled.");
                session.finish_run();
            }
            EngineResponse::Error(message) => {
                println!("Engine error: {message}");
                session.finish_run();
            }
        }
    }
}

/// Dispatch a `:command`. Returns false when the loop should exit.
fn handle_command(command: &str, worker: &EngineWorker, session: &mut ScenarioSession) -> bool {
    let (name, rest) = command.split_once(' ').unwrap_or((command, ""));
    let rest = rest.trim();

    match name {
        "help" => print_help(),
        "quit" | "exit" | "q" => return false,

        "levers" => {
            print!("{}", report::render_levers());
            println!("Current settings:");
            print!("{}", report::render_lever_values(session.levers()));
        }

        "preset" => {
            if rest.is_empty() {
                print!("{}", report::render_presets(presets()));
            } else if let Some(preset) = find_preset(rest) {
                session.apply_preset(preset);
                println!("Applied preset: {}", preset.name);
                print!("{}", report::render_lever_values(session.levers()));
            } else {
                println!("preset '{rest}' not found (:preset lists them)");
            }
        }

        "set" => match parse_assignment(rest) {
            Ok((id, value)) => {
                let stored = session.set_lever(id, value);
                println!("{id} = {stored:+.2}%");
            }
            Err(e) => println!("{e}"),
        },

        "impact" => {
            print!("{}", report::render_statement(&compute_impact(session.levers())));
        }

        "reset" => {
            session.reset_levers();
            println!("All levers reset to 0.");
        }

        "simulate" => {
            let iterations = if rest.is_empty() {
                SimulationConfig::default().iterations
            } else {
                match rest.parse() {
                    Ok(n) => n,
                    Err(_) => {
                        println!("expected an iteration count, got '{rest}'");
                        return true;
                    }
                }
            };
            if !session.begin_run() {
                println!("A run is already in flight (:status to check, :cancel to stop it).");
                return true;
            }
            let request = EngineRequest::Simulate {
                levers: session.levers().clone(),
                config: SimulationConfig {
                    iterations,
                    seed: None,
                },
            };
            if worker.send(request) {
                println!("Simulating {iterations} iterations in the background (:status to check).");
            } else {
                session.finish_run();
                println!("Engine worker is unavailable.");
            }
        }

        "optimize" => {
            let mut parts = rest.split_whitespace();
            let (metric, value) = match (parts.next(), parts.next()) {
                (Some(metric), Some(value)) => (metric, value),
                _ => {
                    println!("usage: :optimize METRIC VALUE (metric: ebit, revenue)");
                    return true;
                }
            };
            let metric = match metric.parse() {
                Ok(metric) => metric,
                Err(e) => {
                    println!("{e}");
                    return true;
                }
            };
            let value = match value.parse() {
                Ok(value) => value,
                Err(_) => {
                    println!("expected a numeric target, got '{value}'");
                    return true;
                }
            };
            if !session.begin_run() {
                println!("A run is already in flight (:status to check, :cancel to stop it).");
                return true;
            }
            let request = EngineRequest::Optimize {
                levers: session.levers().clone(),
                target: OptimizationTarget { metric, value },
            };
            if worker.send(request) {
                println!("Optimizing in the background (:status to check).");
            } else {
                session.finish_run();
                println!("Engine worker is unavailable.");
            }
        }

        "status" => {
            if session.is_busy() {
                let (completed, total) = worker.progress();
                if worker.is_cancelled() {
                    println!("Cancelling ({completed}/{total} iterations done).");
                } else if total > 0 {
                    println!("Running: {completed}/{total} iterations.");
                } else {
                    println!("Running.");
                }
            } else {
                println!("Idle.");
                if let Some(summary) = session.last_simulation() {
                    print!("{}", report::render_summary(summary));
                }
                if let Some(outcome) = session.last_optimization() {
                    print!("{}", report::render_outcome(outcome));
                }
            }
        }

        "cancel" => {
            if session.is_busy() {
                worker.cancel();
                println!("Cancellation requested.");
            } else {
                println!("Nothing is running.");
            }
        }

        "history" => {
            for message in session.messages() {
                let who = match message.role {
                    Role::User => "you",
                    Role::Assistant => "engine",
                };
                println!(
                    "[{}] {who}: {}",
                    message.timestamp.strftime("%H:%M:%S"),
                    message.content
                );
            }
        }

        other => println!("unknown command ':{other}' (:help lists commands)"),
    }
    true
}

/// Parse free text into lever adjustments and fold them into the session.
fn handle_free_text(text: &str, session: &mut ScenarioSession) {
    session.push_user(text);
    let parsed = parse_scenario(text);

    let reply = if parsed.levers.is_empty() {
        parsed.explanation.clone()
    } else {
        session.merge(&parsed.levers);
        let statement = compute_impact(session.levers());
        format!(
            "{} EBIT impact {:+.0} $M, net income impact {:+.0} $M.",
            parsed.explanation, statement.ebit.impact, statement.net_income.impact
        )
    };

    println!("{reply}");
    session.push_assistant(&reply);
}

fn print_help() {
    println!("Commands:");
    println!("  :levers                   lever catalog and current settings");
    println!("  :preset [ID]              list presets, or apply one");
    println!("  :set LEVER=VALUE          set a lever directly");
    println!("  :impact                   pro-forma P&L for the current scenario");
    println!("  :simulate [N]             run a Monte Carlo simulation in the background");
    println!("  :optimize METRIC VALUE    goal-seek lever settings (metric: ebit, revenue)");
    println!("  :status                   progress of the running job, or last results");
    println!("  :cancel                   cancel the running simulation");
    println!("  :history                  show the conversation transcript");
    println!("  :reset                    clear all levers");
    println!("  :quit                     exit");
    println!("Anything else is parsed as a scenario description.");
}
