//! CLI subcommands.

pub mod browse;
pub mod bulk;
pub mod list;
pub mod stats;
