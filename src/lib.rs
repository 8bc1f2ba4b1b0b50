//! Gateway Studio Library
//!
//! Headless command-line front end for the gateway application console.
//! Commands run against the project's application and route stores and
//! report results as NDJSON events on stdout.

pub mod commands;
pub mod headless;

pub use commands::Command;
pub use headless::runner::run_command;
pub use headless::HeadlessEvent;
