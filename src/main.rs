//! Group Stable Match - Test Campaign Entry Point
//!
//! ```bash
//! group-stable-match [A|B|C] [seed]
//! ```
//!
//! Runs the full campaign for the chosen variant and exits non-zero if any
//! instance failed. Set `RUST_LOG=debug` for per-run engine counters.

use std::process::ExitCode;

use log::error;

use group_stable_match::harness::{HarnessConfig, Suite};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match HarnessConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            eprintln!("usage: group-stable-match [A|B|C] [seed]");
            return ExitCode::from(2);
        }
    };

    println!("===========================================");
    println!("  Group Stable Match - suite {}", config.variant);
    println!("===========================================");
    println!();

    let variant = config.variant;
    let report = Suite::new(config).run();

    println!();
    println!(
        "Done test suite {}. In total, {} success(es) and {} failure(s).",
        variant, report.successes, report.failures
    );

    if report.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
