//! Errors and warnings produced while resolving configuration.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::observability::logging::WARNING_TARGET;

/// A fatal resolution failure. Resolution is all-or-nothing: the first error
/// aborts the whole load and is handed back to the caller.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{}: cannot read file: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: parse error: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("{}: imported file `{name}` not found", file.display())]
    ImportNotFound { file: PathBuf, name: String },

    #[error("{}: import cycle detected ({})", file.display(), format_chain(chain))]
    ImportCycle { file: PathBuf, chain: Vec<PathBuf> },

    #[error("{}: <{element}> is missing required field <{field}>", file.display())]
    MissingField {
        file: PathBuf,
        element: &'static str,
        field: &'static str,
    },

    #[error("{}: <{field}> may only be given once per <{element}>", file.display())]
    RepeatedField {
        file: PathBuf,
        element: &'static str,
        field: &'static str,
    },

    #[error("{}: <{field}> in <{element}> must be plain text", file.display())]
    ExpectedText {
        file: PathBuf,
        element: &'static str,
        field: &'static str,
    },

    #[error("{}: <{element}> must contain fields, found text `{value}`", file.display())]
    ExpectedBlock {
        file: PathBuf,
        element: &'static str,
        value: String,
    },

    #[error("{}: <{field}> in <{element}> is not 0 or 1: `{value}`", file.display())]
    InvalidBoolean {
        file: PathBuf,
        element: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("{}: <{field}> in <{element}> is not a valid number: `{value}`", file.display())]
    InvalidNumber {
        file: PathBuf,
        element: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("{}: only one <operserv> block is allowed", file.display())]
    DuplicateOperServ { file: PathBuf },

    #[error("{}: MOTD file cannot be read: {source}", path.display())]
    MotdUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn format_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// A recoverable condition. A default was substituted and loading continued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    ConfigNotFound { name: String },
    NoAccessRules,
    NoOperators,
    NoPorts { default: u16 },
    AdminTruncated { found: usize },
    MotdNotFound { name: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::ConfigNotFound { name } => {
                write!(f, "configuration file `{}` not found, using defaults", name)
            }
            Warning::NoAccessRules => {
                write!(f, "no <auth> entries defined, allowing connections from anywhere")
            }
            Warning::NoOperators => write!(f, "no <operator> entries defined"),
            Warning::NoPorts { default } => {
                write!(f, "no <port> defined, listening on default port {}", default)
            }
            Warning::AdminTruncated { found } => {
                write!(f, "{} <admin> lines given, only the first 3 are used", found)
            }
            Warning::MotdNotFound { name } => write!(f, "MOTD file `{}` not found", name),
        }
    }
}

/// Report a warning on the warning channel and keep it for the caller.
pub fn record(warnings: &mut Vec<Warning>, warning: Warning) {
    tracing::warn!(target: WARNING_TARGET, "{}", warning);
    warnings.push(warning);
}
