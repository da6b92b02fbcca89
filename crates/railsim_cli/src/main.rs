//! Command-line front end: load a scenario, run it, print the results.
//!
//! Usage: `railsim_cli [--json] [scenario.json]`. Without a path the
//! built-in reference scenario runs. `RUST_LOG=debug` shows per-trial
//! search progress.

mod scenario;

use anyhow::{bail, Context, Result};
use log::info;
use railsim_core::integrator::{simulate, simulate_sampled, RunTrace};
use railsim_core::search::{find_minimum_current, SearchSettings};
use scenario::Scenario;
use std::fs;

fn main() -> Result<()> {
    env_logger::init();

    let mut json_output = false;
    let mut path: Option<String> = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json_output = true,
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            _ if arg.starts_with('-') => bail!("Unknown flag {arg}; try --help."),
            _ => {
                if path.is_some() {
                    bail!("Expected at most one scenario path.");
                }
                path = Some(arg);
            }
        }
    }

    let scenario = match &path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read scenario file {path}."))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse scenario file {path}."))?
        }
        None => {
            info!("no scenario file given, running the built-in reference scenario");
            Scenario::reference()
        }
    };

    run_scenario(&scenario, json_output)
}

fn run_scenario(scenario: &Scenario, json_output: bool) -> Result<()> {
    if scenario.drive_current.is_none() && scenario.search.is_none() {
        bail!("Scenario has neither a drive_current nor a search section; nothing to do.");
    }

    if let Some(drive_current) = scenario.drive_current {
        match scenario.sample_stride {
            Some(stride) => {
                let trace = simulate_sampled(
                    &scenario.railgun,
                    &scenario.euler,
                    drive_current,
                    scenario.model,
                    stride,
                )
                .with_context(|| format!("Single shot at {drive_current} A failed."))?;
                if json_output {
                    println!("{}", serde_json::to_string_pretty(&trace)?);
                } else {
                    print_trace(&trace);
                }
            }
            None => {
                let result = simulate(
                    &scenario.railgun,
                    &scenario.euler,
                    drive_current,
                    scenario.model,
                )
                .with_context(|| format!("Single shot at {drive_current} A failed."))?;
                if json_output {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                } else {
                    println!(
                        "shot at {drive_current} A: exits at {:.3} m/s after {:.6} s \
                         ({} steps), {:.1} A left in the loop",
                        result.exit_velocity, result.elapsed_time, result.steps, result.exit_current
                    );
                }
            }
        }
    }

    if let Some(section) = scenario.search {
        let settings = SearchSettings::from(section);
        let result = find_minimum_current(
            &scenario.railgun,
            &scenario.euler,
            &settings,
            scenario.model,
        )
        .context("Current search failed.")?;
        info!("search finished after {} trials", result.trials);
        if json_output {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!(
                "minimum drive current {:.0} A reaches {:.3} m/s \
                 (target {} m/s, {} trials, {:.6} s of flight)",
                result.required_current,
                result.achieved_velocity,
                settings.target_velocity,
                result.trials,
                result.elapsed_time
            );
        }
    }

    Ok(())
}

fn print_trace(trace: &RunTrace) {
    println!("      t (s)       x (m)     v (m/s)       I (A)");
    for i in 0..trace.times.len() {
        println!(
            "{:>11.6} {:>11.6} {:>11.4} {:>11.1}",
            trace.times[i], trace.positions[i], trace.velocities[i], trace.currents[i]
        );
    }
    println!(
        "exit at {:.3} m/s after {} steps",
        trace.result.exit_velocity, trace.result.steps
    );
}

fn print_usage() {
    println!("railsim_cli [--json] [scenario.json]");
    println!();
    println!("Runs the single shot and/or current search described by the");
    println!("scenario file, or the built-in reference scenario when no path");
    println!("is given. --json prints raw result structs instead of prose.");
}
