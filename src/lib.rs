//! IRC daemon bootstrap and configuration library.

pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::schema::Settings;
pub use lifecycle::Bootstrap;
