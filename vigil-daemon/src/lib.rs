//! Vigil daemon: owns the knowledge base and runs the daily task loop.

pub mod cli;
pub mod daily;
pub mod error;
pub mod scheduler;
pub mod state;

pub use error::DaemonError;
pub use state::AppState;
