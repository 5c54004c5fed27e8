//! Day layout CLI library.
//!
//! This crate provides the CLI interface for laying out events in a day column.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
