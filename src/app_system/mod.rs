//! System orchestration: configuration, startup, shutdown and tracing.

pub mod config;
pub mod dashboard_system;
pub mod tracing;

pub use config::*;
pub use dashboard_system::*;
pub use self::tracing::*;
