//! CLI errors.

use order_desk_admin::{BulkActionError, ConfigError, FetchError, ViewError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Bulk(#[from] BulkActionError),

    #[error(transparent)]
    View(#[from] ViewError),

    /// The background view task stopped unexpectedly.
    #[error("Order list view stopped")]
    ViewStopped,
}
