//! Command-line interface for dorkscan.

mod commands;
mod helpers;
mod progress;

pub use commands::{exit_status, is_verbose, run, RunError};
