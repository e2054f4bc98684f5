//! HTTP client for the order store API.

use async_trait::async_trait;
use order_desk_core::{OrderId, OrderStatus};
use reqwest::{Client, Response};
use tracing::{debug, error, instrument};
use url::Url;

use super::{BulkIds, BulkReceipt, BulkStatus, ListQuery, ListResponse, OrderBackend};
use crate::config::{ConfigError, OrderDeskConfig};
use crate::error::{BulkActionError, FetchError};

/// Order store client speaking the `/orders` JSON API.
#[derive(Debug, Clone)]
pub struct HttpOrderBackend {
    /// HTTP client.
    client: Client,
    /// Base URL, ending in `/`.
    base: Url,
}

impl HttpOrderBackend {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::HttpClient` if the HTTP client cannot be built.
    pub fn new(config: &OrderDeskConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self::with_client(client, config.api_base.clone()))
    }

    /// Create a client around an existing `reqwest::Client`.
    #[must_use]
    pub const fn with_client(client: Client, base: Url) -> Self {
        Self { client, base }
    }

    fn endpoint(&self, path: &str) -> Result<Url, String> {
        self.base.join(path).map_err(|e| e.to_string())
    }

    fn list_url(&self, query: &ListQuery) -> Result<Url, String> {
        let mut url = self.endpoint("orders")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("limit", &query.limit.to_string());
            if let Some(offset) = query.offset {
                pairs.append_pair("offset", &offset.to_string());
            }
            if let Some(status) = &query.status {
                pairs.append_pair("status", status.label());
            }
        }
        Ok(url)
    }

    async fn bulk_outcome(response: Response) -> Result<BulkReceipt, BulkActionError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BulkActionError::Request(e.to_string()))?;

        if !status.is_success() {
            error!(status = %status, body = %body, "Order store rejected bulk request");
            return Err(BulkActionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(BulkReceipt::from_body(&body))
    }
}

#[async_trait]
impl OrderBackend for HttpOrderBackend {
    #[instrument(skip(self), fields(limit = %query.limit, offset = ?query.offset))]
    async fn list_orders(&self, query: &ListQuery) -> Result<ListResponse, FetchError> {
        let url = self.list_url(query).map_err(FetchError::Request)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        if !status.is_success() {
            error!(status = %status, body = %body, "Order store list request failed");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let list: ListResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

        debug!(rows = list.orders.len(), total = ?list.total, "Orders fetched");

        Ok(list)
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn delete_orders(&self, ids: &[OrderId]) -> Result<BulkReceipt, BulkActionError> {
        let url = self
            .endpoint("orders/bulk")
            .map_err(BulkActionError::Request)?;

        let response = self
            .client
            .delete(url)
            .json(&BulkIds { ids })
            .send()
            .await
            .map_err(|e| BulkActionError::Request(e.to_string()))?;

        Self::bulk_outcome(response).await
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn duplicate_orders(&self, ids: &[OrderId]) -> Result<BulkReceipt, BulkActionError> {
        let url = self
            .endpoint("orders/bulk/duplicate")
            .map_err(BulkActionError::Request)?;

        let response = self
            .client
            .post(url)
            .json(&BulkIds { ids })
            .send()
            .await
            .map_err(|e| BulkActionError::Request(e.to_string()))?;

        Self::bulk_outcome(response).await
    }

    #[instrument(skip(self, ids), fields(count = ids.len(), status = %status))]
    async fn update_order_status(
        &self,
        ids: &[OrderId],
        status: &OrderStatus,
    ) -> Result<BulkReceipt, BulkActionError> {
        let url = self
            .endpoint("orders/bulk/status")
            .map_err(BulkActionError::Request)?;

        let response = self
            .client
            .put(url)
            .json(&BulkStatus { ids, status })
            .send()
            .await
            .map_err(|e| BulkActionError::Request(e.to_string()))?;

        Self::bulk_outcome(response).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use order_desk_core::PageSize;

    use super::*;
    use crate::config::parse_api_base;

    fn backend(base: &str) -> HttpOrderBackend {
        HttpOrderBackend::with_client(Client::new(), parse_api_base(base).unwrap())
    }

    #[test]
    fn test_page_query_url() {
        let url = backend("http://localhost:8000")
            .list_url(&ListQuery::page(PageSize::ORDER_LIST, 20, None))
            .unwrap();

        assert_eq!(url.as_str(), "http://localhost:8000/orders?limit=10&offset=20");
    }

    #[test]
    fn test_sample_query_omits_offset() {
        let url = backend("http://localhost:8000")
            .list_url(&ListQuery::sample(PageSize::STATS_SAMPLE))
            .unwrap();

        assert_eq!(url.as_str(), "http://localhost:8000/orders?limit=1000");
    }

    #[test]
    fn test_status_filter_is_encoded() {
        let query = ListQuery::page(
            PageSize::ORDER_LIST,
            0,
            Some(OrderStatus::Other("On Hold".to_string())),
        );
        let url = backend("http://localhost:8000/api").list_url(&query).unwrap();

        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/orders?limit=10&offset=0&status=On+Hold"
        );
    }

    #[test]
    fn test_bulk_endpoints_join_under_prefix() {
        let backend = backend("https://store.example.com/v2");
        assert_eq!(
            backend.endpoint("orders/bulk/duplicate").unwrap().as_str(),
            "https://store.example.com/v2/orders/bulk/duplicate"
        );
    }
}
