//! Bulk actions over the selected orders.

use core::fmt;
use std::sync::Arc;

use order_desk_core::{OrderId, OrderStatus};
use tracing::{info, instrument, warn};

use crate::backend::{BulkReceipt, OrderBackend};
use crate::error::BulkActionError;

/// An operation applied to every selected order in one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkAction {
    Delete,
    Duplicate,
    UpdateStatus(OrderStatus),
}

impl BulkAction {
    /// Stable key for logs and command names.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::Duplicate => "duplicate",
            Self::UpdateStatus(_) => "update_status",
        }
    }
}

impl fmt::Display for BulkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delete => f.write_str("Delete"),
            Self::Duplicate => f.write_str("Duplicate"),
            Self::UpdateStatus(status) => write!(f, "Mark as {status}"),
        }
    }
}

/// A bulk action bound to a non-empty, sorted set of ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkRequest {
    action: BulkAction,
    ids: Vec<OrderId>,
}

impl BulkRequest {
    /// Returns `None` when `ids` is empty, since there is nothing to send.
    #[must_use]
    pub fn new(action: BulkAction, mut ids: Vec<OrderId>) -> Option<Self> {
        if ids.is_empty() {
            return None;
        }
        ids.sort_unstable();
        ids.dedup();
        Some(Self { action, ids })
    }

    #[must_use]
    pub const fn action(&self) -> &BulkAction {
        &self.action
    }

    #[must_use]
    pub fn ids(&self) -> &[OrderId] {
        &self.ids
    }
}

/// Sends bulk requests to the order store. Never retries.
#[derive(Clone)]
pub struct BulkActionExecutor {
    backend: Arc<dyn OrderBackend>,
}

impl fmt::Debug for BulkActionExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BulkActionExecutor").finish_non_exhaustive()
    }
}

impl BulkActionExecutor {
    #[must_use]
    pub fn new(backend: Arc<dyn OrderBackend>) -> Self {
        Self { backend }
    }

    /// Run `request` against the store.
    ///
    /// # Errors
    ///
    /// Returns `BulkActionError` if the request fails or is rejected.
    #[instrument(skip(self, request), fields(action = request.action.key(), count = request.ids.len()))]
    pub async fn execute(&self, request: &BulkRequest) -> Result<BulkReceipt, BulkActionError> {
        let ids = request.ids();
        let result = match request.action() {
            BulkAction::Delete => self.backend.delete_orders(ids).await,
            BulkAction::Duplicate => self.backend.duplicate_orders(ids).await,
            BulkAction::UpdateStatus(status) => {
                self.backend.update_order_status(ids, status).await
            }
        };

        match &result {
            Ok(receipt) => info!(
                deleted = ?receipt.deleted,
                duplicated = ?receipt.duplicated_ids.as_ref().map(Vec::len),
                updated = ?receipt.updated,
                "Bulk {} completed",
                request.action.key()
            ),
            Err(e) => warn!(error = %e, "Bulk {} failed", request.action.key()),
        }

        result
    }
}
