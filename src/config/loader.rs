//! Configuration loading from disk.
//!
//! Resolution walks `<import>` directives depth first. Each imported file is
//! merged completely before the importing file's own blocks are applied, so
//! local singletons override imported ones and imported list entries come
//! before local ones.

use std::path::{Path, PathBuf};

use crate::config::accumulator::Accumulator;
use crate::config::document::{self, RawNode, Value};
use crate::config::error::{ConfigError, Warning};
use crate::config::locator::FileLocator;
use crate::config::schema::Settings;
use crate::config::validation;
use crate::observability::logging::VERBOSE_TARGET;

/// Logical name of the top-level configuration file.
pub const DEFAULT_CONFIG_NAME: &str = "ircd.xml";

/// Outcome of a successful load.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub settings: Settings,
    pub warnings: Vec<Warning>,
}

/// State for one top-level resolution.
pub struct ResolutionContext<'a> {
    locator: &'a dyn FileLocator,
    acc: Accumulator,
    /// Files currently being resolved, outermost first.
    active: Vec<PathBuf>,
}

impl<'a> ResolutionContext<'a> {
    pub fn new(locator: &'a dyn FileLocator) -> Self {
        Self {
            locator,
            acc: Accumulator::new(),
            active: Vec::new(),
        }
    }

    pub fn accumulator_mut(&mut self) -> &mut Accumulator {
        &mut self.acc
    }

    /// Merge `path` and everything it imports into the accumulator.
    pub fn resolve_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        if self.active.iter().any(|p| p == path) {
            let mut chain = self.active.clone();
            chain.push(path.to_path_buf());
            return Err(ConfigError::ImportCycle {
                file: path.to_path_buf(),
                chain,
            });
        }

        let node = document::parse_file(path)?;
        if node.is_empty() {
            tracing::info!(
                target: VERBOSE_TARGET,
                file = %path.display(),
                "Empty configuration file"
            );
            return Ok(());
        }

        self.active.push(path.to_path_buf());
        let result = self.resolve_node(path, &node);
        self.active.pop();
        result
    }

    fn resolve_node(&mut self, path: &Path, node: &RawNode) -> Result<(), ConfigError> {
        for value in node.field("import").values() {
            let name = match value {
                Value::Text(name) => name.trim(),
                Value::Node(_) => {
                    return Err(ConfigError::ExpectedText {
                        file: path.to_path_buf(),
                        element: "ircd",
                        field: "import",
                    })
                }
            };

            let resolved = self.locator.find(name).ok_or_else(|| ConfigError::ImportNotFound {
                file: path.to_path_buf(),
                name: name.to_string(),
            })?;

            tracing::info!(
                target: VERBOSE_TARGET,
                file = %path.display(),
                import = %resolved.display(),
                "Importing"
            );
            self.resolve_file(&resolved)?;
            self.acc.push_imported(resolved);
        }

        for value in node.field("operator").values() {
            validation::apply_operator(path, value, &mut self.acc)?;
        }
        for value in node.field("auth").values() {
            validation::apply_auth(path, value, &mut self.acc)?;
        }
        for value in node.field("operserv").values() {
            validation::apply_operserv(path, value, &mut self.acc)?;
        }
        for value in node.field("config").values() {
            validation::apply_config(path, value, &mut self.acc)?;
        }

        for unknown in node.names().filter(|name| !TOP_LEVEL.contains(name)) {
            tracing::debug!(
                target: VERBOSE_TARGET,
                file = %path.display(),
                element = unknown,
                "Ignoring unknown element"
            );
        }

        tracing::info!(target: VERBOSE_TARGET, file = %path.display(), "Loaded configuration file");
        Ok(())
    }

    /// Apply post-load defaults and freeze the result.
    pub fn finish(self) -> Resolved {
        let (settings, warnings) = self.acc.finish();
        Resolved { settings, warnings }
    }
}

const TOP_LEVEL: &[&str] = &["import", "operator", "auth", "operserv", "config"];

/// Load configuration starting from the logical name `requested`, or
/// [`DEFAULT_CONFIG_NAME`] when none was given.
///
/// A missing top-level file is not an error: built-in defaults are used and a
/// warning is recorded.
pub fn load_config(
    requested: Option<&str>,
    locator: &dyn FileLocator,
) -> Result<Resolved, ConfigError> {
    let name = requested.unwrap_or(DEFAULT_CONFIG_NAME);
    let mut ctx = ResolutionContext::new(locator);

    match locator.find(name) {
        Some(path) => {
            tracing::info!(target: VERBOSE_TARGET, file = %path.display(), "Reading configuration");
            ctx.resolve_file(&path)?;
        }
        None => ctx.accumulator_mut().warn(Warning::ConfigNotFound {
            name: name.to_string(),
        }),
    }

    Ok(ctx.finish())
}
