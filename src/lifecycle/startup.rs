//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve the configuration tree
//! - Load the MOTD named by the resolved settings
//! - Hand everything the runtime needs over as one value

use crate::config::error::ConfigError;
use crate::config::locator::FileLocator;
use crate::config::{load_config, Settings, Warning};
use crate::lifecycle::motd::load_motd;
use crate::observability::logging::VERBOSE_TARGET;

/// Options coming from the command line.
#[derive(Debug, Clone, Default)]
pub struct StartupOptions {
    /// Logical name of the top-level configuration file.
    pub config_file: Option<String>,
}

/// Everything the server runtime is started with.
#[derive(Debug, Clone)]
pub struct Bootstrap {
    pub settings: Settings,
    pub motd: Vec<String>,
    pub warnings: Vec<Warning>,
}

/// Resolve configuration and auxiliary files.
pub fn bootstrap(
    options: &StartupOptions,
    locator: &dyn FileLocator,
) -> Result<Bootstrap, ConfigError> {
    let resolved = load_config(options.config_file.as_deref(), locator)?;
    let mut warnings = resolved.warnings;
    let settings = resolved.settings;

    let motd = load_motd(&settings.server.motd, locator, &mut warnings)?;

    tracing::info!(
        target: VERBOSE_TARGET,
        server = %settings.server.name,
        network = %settings.server.network,
        ports = ?settings.ports,
        auth_rules = settings.auth.len(),
        operators = settings.operators.len(),
        imported = settings.imported_files.len(),
        operserv = settings.operserv.enabled,
        "Configuration resolved"
    );

    Ok(Bootstrap {
        settings,
        motd,
        warnings,
    })
}
