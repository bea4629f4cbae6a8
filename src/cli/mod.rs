//! CLI module
//!
//! Command-line interface over the client.
//!
//! # Commands
//!
//! - `auth login|logout|status` - Manage the stored API key
//! - `objects`, `objects-last-position` - List objects
//! - `object-groups`, `object-group <id>` - Object groups
//! - `coordinates <object-id>` - Coordinate history
//! - `trips <object-id>` - Trips
//! - `fuel-events` - Refuel and drain events
//! - `drivers` - Drivers
//!
//! List commands follow continuation tokens to the end and print one JSON
//! record per line on stdout.

mod commands;
mod runner;

pub use commands::{parse_time, AuthCommand, Cli, Commands, TimeRange};
pub use runner::Runner;
