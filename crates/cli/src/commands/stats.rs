//! Order statistics.

use std::io::Write;
use std::sync::Arc;

use order_desk_admin::OrderBackend;
use order_desk_admin::orders::{StatsAggregator, stat_cards};

use crate::display;
use crate::error::CliError;

/// Compute and print the stats snapshot.
///
/// # Errors
///
/// Returns `CliError::Fetch` if the sample could not be read.
pub async fn run(backend: Arc<dyn OrderBackend>, out: &mut impl Write) -> Result<(), CliError> {
    let stats = StatsAggregator::new(backend).compute_stats().await?;
    display::render_stats(&stat_cards(&stats), out)?;
    Ok(())
}
