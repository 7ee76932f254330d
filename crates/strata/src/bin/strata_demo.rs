//! # Strata Demo
//!
//! Runs the smoke-test scenario and prints the region chain after each
//! phase.
//!
//! Usage: `strata_demo [CONFIG.toml]`
//!
//! Without a config file the arena uses 400-byte regions.

use std::process::ExitCode;

use strata::demo;
use strata::ArenaConfig;

/// Region capacity used when no config file is given.
const DEMO_REGION_CAPACITY: usize = 400;

fn main() -> ExitCode {
    let config = match std::env::args().nth(1) {
        Some(path) => match ArenaConfig::from_toml_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("strata_demo: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => ArenaConfig::with_region_capacity(DEMO_REGION_CAPACITY),
    };

    let phases = match demo::run(config) {
        Ok(phases) => phases,
        Err(e) => {
            eprintln!("strata_demo: {e}");
            return ExitCode::FAILURE;
        }
    };

    for (i, phase) in phases.iter().enumerate() {
        if i > 0 {
            println!("\n=========================================================\n");
        }
        println!("------ {} ------", phase.name);
        print!("{}", phase.dump);
    }

    ExitCode::SUCCESS
}
