//! IRC daemon bootstrap.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌───────────────────────────────────────────────────┐
//!                 │                    BOOTSTRAP                      │
//!   CLI flags     │  ┌─────────┐   ┌──────────┐   ┌───────────────┐   │
//!   ──────────────┼─▶│ startup │──▶│ locator  │──▶│ document      │   │
//!                 │  └─────────┘   └──────────┘   │ (XML → node)  │   │
//!                 │                               └───────┬───────┘   │
//!                 │                                       ▼           │
//!                 │  ┌─────────────┐   ┌────────────┐   ┌──────────┐  │
//!                 │  │ accumulator │◀──│ validation │◀──│ loader   │◀─┼── <import>
//!                 │  └──────┬──────┘   └────────────┘   └──────────┘  │
//!                 │         ▼                                         │
//!   Settings      │  ┌─────────────┐   ┌──────┐                       │
//!   ◀─────────────┼──│  finish()   │──▶│ MOTD │                       │
//!                 │  └─────────────┘   └──────┘                       │
//!                 └───────────────────────────────────────────────────┘
//! ```
//!
//! The protocol engine that consumes the resolved settings lives outside
//! this crate. Without `--dump` the process exits after a successful check.

use std::process::ExitCode;

use clap::Parser;

use ircd::config::SearchPath;
use ircd::lifecycle::{bootstrap, StartupOptions};
use ircd::observability::logging::{self, LogOptions, FATAL_TARGET};

#[derive(Parser)]
#[command(name = "ircd")]
#[command(version, about = "IRC daemon configuration bootstrap", long_about = None)]
struct Cli {
    /// Configuration file (searched in ., the install dir and config/)
    #[arg(short = 'f', long = "config", value_name = "FILE")]
    config: Option<String>,

    /// Trace every file and block that is loaded
    #[arg(short, long)]
    verbose: bool,

    /// Suppress warnings
    #[arg(short, long)]
    quiet: bool,

    /// Print the resolved settings as JSON
    #[arg(long)]
    dump: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init(LogOptions {
        verbose: cli.verbose,
        warnings: !cli.quiet,
    });

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(target: FATAL_TARGET, "{}", e);
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let locator = SearchPath::from_env()?;
    let options = StartupOptions {
        config_file: cli.config.clone(),
    };

    let startup = bootstrap(&options, &locator)?;

    if cli.dump {
        let dump = serde_json::json!({
            "settings": startup.settings,
            "motd": startup.motd,
            "warnings": startup.warnings.iter().map(|w| w.to_string()).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&dump)?);
    }

    Ok(())
}
