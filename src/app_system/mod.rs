//! System orchestration, configuration, startup, and shutdown logic.

pub mod config;
pub mod storefront;
pub mod tracing;

pub use config::*;
pub use storefront::*;
pub use self::tracing::*;
