//! OCPD rating command line interface
//!
//! Library half of the `ocpd-quote` binary: configuration loading,
//! logging setup and the JSON-in/JSON-out command handlers. Keeping the
//! handlers here lets them be tested without spawning a process.

pub mod commands;
pub mod config;
pub mod telemetry;

pub use commands::{RatingContext, TableKind};
pub use config::{CliConfig, LogFormat};
