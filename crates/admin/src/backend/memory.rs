//! In-memory order store.
//!
//! Serves the same contract as the HTTP API from a `Vec` behind a lock. Used by
//! the `--demo` console and by tests that need a store with real behavior
//! (deletes shrink the list, duplicates append `-COPY` rows).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use order_desk_core::{OrderId, OrderRecord, OrderStatus};
use tokio::sync::RwLock;

use super::{BulkReceipt, ListQuery, ListResponse, OrderBackend};
use crate::error::{BulkActionError, FetchError};

const SAMPLE_ORDERS: &str = r#"[
    {"id": 1, "order_number": "ORD-1001", "customer_name": "Alice Johnson", "customer_avatar": "",
     "order_date": "2026-01-10T10:00:00", "status": "Pending", "total_amount": 120.50, "payment_status": "Unpaid"},
    {"id": 2, "order_number": "ORD-1002", "customer_name": "Bob Smith", "customer_avatar": "",
     "order_date": "2026-01-12T14:30:00", "status": "Completed", "total_amount": 45.00, "payment_status": "Paid"},
    {"id": 3, "order_number": "ORD-1003", "customer_name": "Cara Lee", "customer_avatar": "",
     "order_date": "2026-01-15T09:15:00", "status": "Refunded", "total_amount": 78.99, "payment_status": "Paid"},
    {"id": 4, "order_number": "ORD-1004", "customer_name": "David Kim", "customer_avatar": "",
     "order_date": "2026-02-01T11:20:00", "status": "Pending", "total_amount": 34.20, "payment_status": "Unpaid"}
]"#;

/// The four orders a fresh store is seeded with.
#[must_use]
pub fn sample_orders() -> Vec<OrderRecord> {
    serde_json::from_str(SAMPLE_ORDERS).unwrap_or_default()
}

#[derive(Debug, Default)]
struct Store {
    /// Rows in ascending id order.
    orders: Vec<OrderRecord>,
    next_id: i64,
}

/// Order store held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderBackend {
    store: Arc<RwLock<Store>>,
    list_calls: Arc<AtomicUsize>,
    fail_lists: Arc<AtomicBool>,
    fail_bulk: Arc<AtomicBool>,
}

impl InMemoryOrderBackend {
    /// Create a store holding `orders`.
    #[must_use]
    pub fn new(mut orders: Vec<OrderRecord>) -> Self {
        orders.sort_by_key(|order| order.id);
        let next_id = orders.last().map_or(1, |order| order.id.as_i64() + 1);

        Self {
            store: Arc::new(RwLock::new(Store { orders, next_id })),
            ..Self::default()
        }
    }

    /// Create a store seeded with [`sample_orders`].
    #[must_use]
    pub fn with_sample_orders() -> Self {
        Self::new(sample_orders())
    }

    /// Number of list requests served so far.
    #[must_use]
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Make list requests fail until reset.
    pub fn set_fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    /// Make bulk requests fail until reset.
    pub fn set_fail_bulk(&self, fail: bool) {
        self.fail_bulk.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of every stored order.
    pub async fn orders(&self) -> Vec<OrderRecord> {
        self.store.read().await.orders.clone()
    }

    fn check_bulk(&self) -> Result<(), BulkActionError> {
        if self.fail_bulk.load(Ordering::SeqCst) {
            return Err(BulkActionError::Status {
                status: 500,
                body: "Database error: store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl OrderBackend for InMemoryOrderBackend {
    async fn list_orders(&self, query: &ListQuery) -> Result<ListResponse, FetchError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(FetchError::Status {
                status: 500,
                body: "Database error: store unavailable".to_string(),
            });
        }

        let store = self.store.read().await;
        let matching: Vec<&OrderRecord> = store
            .orders
            .iter()
            .filter(|order| query.status.as_ref().is_none_or(|s| &order.status == s))
            .collect();

        let offset = usize::try_from(query.offset.unwrap_or(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit.get()).unwrap_or(usize::MAX);

        let orders: Vec<OrderRecord> = matching
            .iter()
            .skip(offset)
            .take(limit)
            .map(|order| (*order).clone())
            .collect();

        Ok(ListResponse {
            count: Some(orders.len() as u64),
            total: Some(matching.len() as u64),
            orders,
        })
    }

    async fn delete_orders(&self, ids: &[OrderId]) -> Result<BulkReceipt, BulkActionError> {
        self.check_bulk()?;

        let mut store = self.store.write().await;
        let before = store.orders.len();
        store.orders.retain(|order| !ids.contains(&order.id));

        Ok(BulkReceipt {
            deleted: Some((before - store.orders.len()) as u64),
            ..BulkReceipt::default()
        })
    }

    async fn duplicate_orders(&self, ids: &[OrderId]) -> Result<BulkReceipt, BulkActionError> {
        self.check_bulk()?;

        let mut store = self.store.write().await;
        let mut duplicated_ids = Vec::with_capacity(ids.len());

        for id in ids {
            let Some(original) = store.orders.iter().find(|order| order.id == *id).cloned() else {
                continue;
            };

            let new_id = OrderId::new(store.next_id);
            store.next_id += 1;
            store.orders.push(OrderRecord {
                id: new_id,
                order_number: format!("{}-COPY", original.order_number),
                ..original
            });
            duplicated_ids.push(new_id);
        }

        Ok(BulkReceipt {
            duplicated_ids: Some(duplicated_ids),
            ..BulkReceipt::default()
        })
    }

    async fn update_order_status(
        &self,
        ids: &[OrderId],
        status: &OrderStatus,
    ) -> Result<BulkReceipt, BulkActionError> {
        self.check_bulk()?;

        let mut store = self.store.write().await;
        let mut updated = 0;
        for order in store.orders.iter_mut().filter(|order| ids.contains(&order.id)) {
            order.status = status.clone();
            updated += 1;
        }

        Ok(BulkReceipt {
            updated: Some(updated),
            ..BulkReceipt::default()
        })
    }
}
