//! Page retrieval.

use std::sync::Arc;

use order_desk_core::{OrderPage, OrderStatus, PageNumber, PageSize};
use tracing::{debug, error, instrument};

use crate::backend::{ListQuery, OrderBackend};
use crate::error::FetchError;

/// Fetches one page of orders at a time. No caching, no retry.
#[derive(Clone)]
pub struct PageFetcher {
    backend: Arc<dyn OrderBackend>,
}

impl std::fmt::Debug for PageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageFetcher").finish_non_exhaustive()
    }
}

impl PageFetcher {
    #[must_use]
    pub fn new(backend: Arc<dyn OrderBackend>) -> Self {
        Self { backend }
    }

    /// Fetch `page` of `size` rows, optionally restricted to one status.
    ///
    /// Requests `offset = (page - 1) * size`. The returned page is truncated to
    /// `size` rows if the store sends more.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` on transport, status or decode failure.
    #[instrument(skip(self), fields(page = %page, size = %size))]
    pub async fn fetch_page(
        &self,
        page: PageNumber,
        size: PageSize,
        status: Option<OrderStatus>,
    ) -> Result<OrderPage, FetchError> {
        let query = ListQuery::page(size, page.offset(size), status);

        let response = self.backend.list_orders(&query).await.map_err(|e| {
            error!(error = %e, "Failed to fetch orders page");
            e
        })?;

        let mut orders = response.orders;
        orders.truncate(usize::try_from(size.get()).unwrap_or(usize::MAX));

        debug!(rows = orders.len(), total = ?response.total, "Orders page fetched");

        Ok(OrderPage {
            number: page,
            size,
            orders,
            total: response.total,
        })
    }
}
