//! CallMate Server
//!
//! HTTP boundary around the assistant pipeline, plus the `callmate` CLI.

pub mod cli;
pub mod config;
pub mod server;
pub mod simulate;
pub mod state;

pub use config::CallmateConfig;
pub use state::AppState;
