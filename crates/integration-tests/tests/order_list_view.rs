//! End-to-end tests of the order list view against a mocked order store.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use order_desk_admin::orders::{Action, LoadStatus, OrderListView, OrderTableView};
use order_desk_admin::{BulkActionError, FetchError, ViewError};
use order_desk_core::{OrderId, PageNumber, StatsSnapshot};
use order_desk_integration_tests::{backend_for, page_json, sample_json};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mount the stats sample endpoint, expected once per view.
async fn mock_stats(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/orders"))
        .and(query_param("limit", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_json(&[
            "Pending",
            "Completed",
            "Refunded",
            "Pending",
        ])))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_mount_loads_first_page_and_stats() {
    let server = MockServer::start().await;
    mock_stats(&server).await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(1..=10)))
        .expect(1)
        .mount(&server)
        .await;

    let mut view = OrderListView::new(backend_for(&server));
    let state = view.apply(Action::Mount).await;

    assert_eq!(state.orders().len(), 10);
    assert_eq!(state.page_status(), LoadStatus::Loaded);
    assert_eq!(
        state.stats(),
        Some(&StatsSnapshot {
            total: 4,
            pending: 2,
            shipped: 1,
            refunded: 1,
        })
    );

    // A second mount is a no-op.
    view.apply(Action::Mount).await;
}

#[tokio::test]
async fn test_next_page_requests_offset_ten() {
    let server = MockServer::start().await;
    mock_stats(&server).await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(1..=10)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .and(query_param("offset", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(11..=14)))
        .expect(1)
        .mount(&server)
        .await;

    let mut view = OrderListView::new(backend_for(&server));
    view.apply(Action::Mount).await;
    view.apply(Action::Toggle(OrderId::new(3))).await;
    let state = view.apply(Action::NextPage).await;

    assert_eq!(state.current_page(), PageNumber::new(2).unwrap());
    assert_eq!(state.orders()[0].id, OrderId::new(11));
    assert!(state.selection().is_empty());

    let table = OrderTableView::from_state(state);
    assert_eq!(table.summary, "Showing 11-14 of 4");
    assert!(table.has_prev);
}

#[tokio::test]
async fn test_duplicate_clears_selection_and_refetches_once() {
    let server = MockServer::start().await;
    mock_stats(&server).await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(1..=10)))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/orders/bulk/duplicate"))
        .and(body_json(json!({ "ids": [3, 7] })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "duplicated_ids": [41, 42] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut view = OrderListView::new(backend_for(&server));
    view.apply(Action::Mount).await;
    view.apply(Action::Toggle(OrderId::new(7))).await;
    view.apply(Action::Toggle(OrderId::new(3))).await;
    let state = view.apply(Action::DuplicateSelected).await;

    assert!(state.selection().is_empty());
    assert!(state.bulk_in_flight().is_none());
    assert_eq!(
        state.last_bulk().map(ToString::to_string).as_deref(),
        Some("Duplicated 2 orders")
    );
    assert!(state.error().is_none());
}

#[tokio::test]
async fn test_delete_refetches_current_page() {
    let server = MockServer::start().await;
    mock_stats(&server).await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(1..=3)))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json([1])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/orders/bulk"))
        .and(body_json(json!({ "ids": [2, 3] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "deleted": 2 })))
        .expect(1)
        .mount(&server)
        .await;

    let mut view = OrderListView::new(backend_for(&server));
    view.apply(Action::Mount).await;
    view.apply(Action::Toggle(OrderId::new(2))).await;
    view.apply(Action::Toggle(OrderId::new(3))).await;
    let state = view.apply(Action::DeleteSelected).await;

    assert_eq!(state.visible_ids(), vec![OrderId::new(1)]);
    assert!(state.selection().is_empty());
}

#[tokio::test]
async fn test_failed_bulk_keeps_selection() {
    let server = MockServer::start().await;
    mock_stats(&server).await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(1..=5)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/orders/bulk/status"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&server)
        .await;

    let mut view = OrderListView::new(backend_for(&server));
    view.apply(Action::Mount).await;
    view.apply(Action::ToggleAll).await;
    let state = view
        .apply(Action::UpdateStatusSelected(
            order_desk_core::OrderStatus::Completed,
        ))
        .await;

    assert_eq!(state.selection().size(), 5);
    assert!(state.bulk_in_flight().is_none());
    assert_eq!(
        state.error(),
        Some(&ViewError::BulkAction {
            action: "Mark as Completed".to_string(),
            count: 5,
            source: BulkActionError::Status {
                status: 503,
                body: "maintenance".to_string(),
            },
        })
    );
    assert!(!state.can_retry());
}

#[tokio::test]
async fn test_page_outage_shows_banner_then_retry_recovers() {
    let server = MockServer::start().await;
    mock_stats(&server).await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Database error"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(1..=2)))
        .expect(1)
        .mount(&server)
        .await;

    let mut view = OrderListView::new(backend_for(&server));
    let state = view.apply(Action::Mount).await;

    assert!(state.orders().is_empty());
    assert!(state.can_retry());
    assert_eq!(
        state.error(),
        Some(&ViewError::PageFetch {
            page: PageNumber::FIRST,
            source: FetchError::Status {
                status: 500,
                body: "Database error".to_string(),
            },
        })
    );
    assert_eq!(
        OrderTableView::from_state(state).banner.as_deref(),
        Some("Could not load page 1: Order store returned 500: Database error")
    );

    let state = view.apply(Action::Retry).await;

    assert_eq!(state.orders().len(), 2);
    assert!(state.error().is_none());
    assert!(!state.can_retry());
}

#[tokio::test]
async fn test_spawned_view_filters_by_status() {
    let server = MockServer::start().await;
    mock_stats(&server).await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .and(query_param("limit", "10"))
        .and(query_param("status", "Refunded"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json([3])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(1..=4)))
        .expect(1)
        .mount(&server)
        .await;

    let mut handle = OrderListView::new(backend_for(&server)).spawn();
    let mounted = handle.apply(Action::Mount).await.unwrap();
    assert_eq!(mounted.orders().len(), 4);

    let filtered = handle
        .apply(Action::SetStatusFilter(Some(
            order_desk_core::OrderStatus::Refunded,
        )))
        .await
        .unwrap();

    assert_eq!(filtered.visible_ids(), vec![OrderId::new(3)]);
    assert_eq!(
        filtered.status_filter(),
        Some(&order_desk_core::OrderStatus::Refunded)
    );

    let last = handle.shutdown().await.unwrap();
    assert_eq!(last, filtered);
}
