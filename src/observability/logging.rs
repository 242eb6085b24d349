//! Structured logging.
//!
//! # Responsibilities
//! - Name the diagnostic channels used across the crate
//! - Build the subscriber filter from the CLI toggles
//! - Install the global subscriber (binary only)
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Verbose and warning channels are separate targets so each toggle
//!   enables exactly one of them
//! - Fatal messages are always on
//! - `RUST_LOG`, when set, replaces the computed filter except for the
//!   fatal channel

use tracing_subscriber::filter::Directive;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Informational trace of what was loaded.
pub const VERBOSE_TARGET: &str = "ircd::verbose";
/// Recoverable conditions that were replaced by a default.
pub const WARNING_TARGET: &str = "ircd::warning";
/// Errors that stop the process.
pub const FATAL_TARGET: &str = "ircd::fatal";

/// Which diagnostic channels are enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOptions {
    pub verbose: bool,
    pub warnings: bool,
}

/// Filter directives for the given toggles.
pub fn directives(options: LogOptions) -> String {
    format!(
        "off,{}={},{}={},{}=error",
        VERBOSE_TARGET,
        if options.verbose { "debug" } else { "off" },
        WARNING_TARGET,
        if options.warnings { "warn" } else { "off" },
        FATAL_TARGET,
    )
}

/// Re-enable the fatal channel on a filter taken from the environment.
pub fn with_fatal(filter: EnvFilter) -> EnvFilter {
    match format!("{}=error", FATAL_TARGET).parse::<Directive>() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Install the global subscriber, writing to stderr.
pub fn init(options: LogOptions) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => with_fatal(filter),
        Err(_) => EnvFilter::new(directives(options)),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
