//! Order Desk admin library.
//!
//! Headless implementation of the administrative order list: an order store
//! client, the order-list state machine and the async view that drives it.
//! Front ends (the `order-desk` CLI) render [`orders::OrderTableView`]s and feed
//! user input back as [`orders::Action`]s.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod config;
pub mod error;
pub mod orders;

pub use backend::{HttpOrderBackend, InMemoryOrderBackend, OrderBackend};
pub use config::{ConfigError, LogFormat, OrderDeskConfig, SentryConfig};
pub use error::{BulkActionError, FetchError, ViewError};
pub use orders::{Action, OrderListHandle, OrderListState, OrderListView, OrderTableView};
