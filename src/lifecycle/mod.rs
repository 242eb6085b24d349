//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     CLI options → resolve config tree → load MOTD → Bootstrap
//!
//! MOTD (motd.rs):
//!     settings.server.motd → locator → lines (or placeholder)
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then files the config names
//! - Nothing here exits the process; `main` decides

pub mod motd;
pub mod startup;

pub use startup::{bootstrap, Bootstrap, StartupOptions};
