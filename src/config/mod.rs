//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! logical file name
//!     → locator.rs (search path lookup)
//!     → document.rs (XML → RawNode)
//!     → loader.rs (imports, depth first, cycle check)
//!     → validation.rs (arity and type checks per block)
//!     → accumulator.rs (ordered lists + singleton slots)
//!     → Settings (normalized, immutable)
//!     → handed by value to the server runtime
//! ```
//!
//! # Design Decisions
//! - Config is resolved once at startup and never reloaded
//! - Imports merge before the importing file's own blocks
//! - First violation aborts; the caller decides how to exit

pub mod accumulator;
pub mod document;
pub mod error;
pub mod loader;
pub mod locator;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, Warning};
pub use loader::{load_config, ResolutionContext, Resolved, DEFAULT_CONFIG_NAME};
pub use locator::{FileLocator, SearchPath};
pub use schema::{AccessRule, OperServSettings, OperatorAccount, ServerSettings, Settings};
