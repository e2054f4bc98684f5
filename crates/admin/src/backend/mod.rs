//! Order store access.
//!
//! The order list talks to the store only through [`OrderBackend`]. The
//! production implementation is [`HttpOrderBackend`]; [`InMemoryOrderBackend`]
//! backs demos and tests.

mod http;
mod memory;

pub use http::HttpOrderBackend;
pub use memory::{InMemoryOrderBackend, sample_orders};

use async_trait::async_trait;
use order_desk_core::{OrderId, OrderRecord, OrderStatus, PageSize};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::{BulkActionError, FetchError};

/// Parameters of one list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Maximum rows to return.
    pub limit: PageSize,
    /// Zero-based offset; omitted from the request when `None`.
    pub offset: Option<u64>,
    /// Only return orders with this status.
    pub status: Option<OrderStatus>,
}

impl ListQuery {
    /// Query for one page of the order list.
    #[must_use]
    pub const fn page(limit: PageSize, offset: u64, status: Option<OrderStatus>) -> Self {
        Self {
            limit,
            offset: Some(offset),
            status,
        }
    }

    /// Query for the statistics sample.
    #[must_use]
    pub const fn sample(limit: PageSize) -> Self {
        Self {
            limit,
            offset: None,
            status: None,
        }
    }
}

/// Body of `GET /orders`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse {
    /// Orders in backend order; absent or `null` decodes as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub orders: Vec<OrderRecord>,
    /// Number of rows in this response, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    /// Total rows matching the query, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<OrderRecord>, D::Error> {
    Ok(Option::<Vec<OrderRecord>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Success body of a bulk request.
///
/// Each endpoint fills in its own field; an empty body decodes to the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkReceipt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicated_ids: Option<Vec<OrderId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<u64>,
}

impl BulkReceipt {
    /// Decode a success body, tolerating empty or unrecognized content.
    #[must_use]
    pub fn from_body(body: &str) -> Self {
        if body.trim().is_empty() {
            return Self::default();
        }
        serde_json::from_str(body).unwrap_or_else(|e| {
            debug!(error = %e, "Unrecognized bulk response body");
            Self::default()
        })
    }
}

/// Request body shared by the bulk endpoints.
#[derive(Debug, Serialize)]
pub(crate) struct BulkIds<'a> {
    pub ids: &'a [OrderId],
}

/// Request body of `PUT /orders/bulk/status`.
#[derive(Debug, Serialize)]
pub(crate) struct BulkStatus<'a> {
    pub ids: &'a [OrderId],
    pub status: &'a OrderStatus,
}

/// Read and write access to the order store.
#[async_trait]
pub trait OrderBackend: Send + Sync {
    /// Fetch a slice of orders.
    async fn list_orders(&self, query: &ListQuery) -> Result<ListResponse, FetchError>;

    /// Delete every order in `ids`.
    async fn delete_orders(&self, ids: &[OrderId]) -> Result<BulkReceipt, BulkActionError>;

    /// Duplicate every order in `ids`.
    async fn duplicate_orders(&self, ids: &[OrderId]) -> Result<BulkReceipt, BulkActionError>;

    /// Set the status of every order in `ids`.
    async fn update_order_status(
        &self,
        ids: &[OrderId],
        status: &OrderStatus,
    ) -> Result<BulkReceipt, BulkActionError>;
}
