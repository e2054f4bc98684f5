//! Summary statistics from a bounded order sample.

use std::sync::Arc;

use order_desk_core::{PageSize, StatsSnapshot};
use tracing::{error, info, instrument};

use crate::backend::{ListQuery, OrderBackend};
use crate::error::FetchError;

/// Derives [`StatsSnapshot`]s from one bulk read of up to `sample` orders.
///
/// Stores holding more orders than the sample size are undercounted.
#[derive(Clone)]
pub struct StatsAggregator {
    backend: Arc<dyn OrderBackend>,
    sample: PageSize,
}

impl std::fmt::Debug for StatsAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsAggregator")
            .field("sample", &self.sample)
            .finish_non_exhaustive()
    }
}

impl StatsAggregator {
    /// Aggregator sampling [`PageSize::STATS_SAMPLE`] orders.
    #[must_use]
    pub fn new(backend: Arc<dyn OrderBackend>) -> Self {
        Self::with_sample(backend, PageSize::STATS_SAMPLE)
    }

    #[must_use]
    pub fn with_sample(backend: Arc<dyn OrderBackend>, sample: PageSize) -> Self {
        Self { backend, sample }
    }

    /// Fetch the sample and classify it by status.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the sample cannot be read.
    #[instrument(skip(self), fields(sample = %self.sample))]
    pub async fn compute_stats(&self) -> Result<StatsSnapshot, FetchError> {
        let response = self
            .backend
            .list_orders(&ListQuery::sample(self.sample))
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to fetch stats sample");
                e
            })?;

        let limit = usize::try_from(self.sample.get()).unwrap_or(usize::MAX);
        let sample = response.orders.get(..limit).unwrap_or(&response.orders);
        let stats = StatsSnapshot::from_sample(sample);

        info!(
            total = stats.total,
            pending = stats.pending,
            shipped = stats.shipped,
            refunded = stats.refunded,
            "Order stats computed"
        );

        Ok(stats)
    }
}
