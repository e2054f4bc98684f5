//! Integration tests for Order Desk.
//!
//! # Running Tests
//!
//! ```bash
//! # Mocked order store (no external services needed)
//! cargo test -p order-desk-integration-tests
//!
//! # Also run against a live store
//! ORDER_DESK_API_BASE=http://localhost:8000 cargo test -p order-desk-integration-tests -- --ignored
//! ```
//!
//! The helpers here build order store payloads and point an
//! [`HttpOrderBackend`] at a `wiremock` server.

use std::sync::Arc;

use order_desk_admin::{HttpOrderBackend, OrderBackend, OrderDeskConfig};
use serde_json::{Value, json};
use wiremock::MockServer;

/// One order row as the store serializes it.
#[must_use]
pub fn order_json(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "order_number": format!("ORD-{}", 1000 + id),
        "customer_name": format!("Customer {id}"),
        "customer_avatar": null,
        "order_date": "2026-01-10T10:00:00",
        "status": status,
        "total_amount": 120.5,
        "payment_status": "Paid"
    })
}

/// A `GET /orders` body holding `ids`, all Pending.
#[must_use]
pub fn page_json(ids: impl IntoIterator<Item = i64>) -> Value {
    let orders: Vec<Value> = ids.into_iter().map(|id| order_json(id, "Pending")).collect();
    json!({ "count": orders.len(), "orders": orders })
}

/// A `GET /orders` body with the given statuses, ids starting at 1.
#[must_use]
pub fn sample_json(statuses: &[&str]) -> Value {
    let orders: Vec<Value> = (1_i64..)
        .zip(statuses)
        .map(|(id, status)| order_json(id, status))
        .collect();
    json!({ "count": orders.len(), "orders": orders })
}

/// HTTP backend talking to `server`.
///
/// # Panics
///
/// Panics if the mock server URI is not a valid base URL.
#[must_use]
#[allow(clippy::expect_used)]
pub fn backend_for(server: &MockServer) -> Arc<dyn OrderBackend> {
    let config = OrderDeskConfig::default()
        .with_api_base(&server.uri())
        .expect("mock server URI is a valid base URL");
    Arc::new(HttpOrderBackend::new(&config).expect("Failed to create HTTP client"))
}

/// Base URL of a live order store, if one is configured.
#[must_use]
pub fn live_api_base() -> Option<String> {
    std::env::var("ORDER_DESK_API_BASE").ok()
}
