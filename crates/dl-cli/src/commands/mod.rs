//! CLI subcommand implementations.

pub mod layout;
pub mod util;
