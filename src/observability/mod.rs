//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config resolver, MOTD reader, startup:
//!     → ircd::verbose  (what was loaded, -v)
//!     → ircd::warning  (defaults substituted, silenced by -q)
//!     → ircd::fatal    (always printed, process exits 1)
//!
//! Consumer:
//!     → logging.rs subscriber on stderr
//! ```

pub mod logging;
