//! System orchestration, startup, and shutdown logic.

pub mod association;
pub mod association_system;
pub mod telemetry;

pub use association::*;
pub use association_system::*;
pub use telemetry::*;
