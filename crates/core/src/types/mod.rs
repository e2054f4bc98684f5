//! Core types for Order Desk.
//!
//! This module provides type-safe wrappers for the order list domain.

pub mod id;
pub mod order;
pub mod page;
pub mod price;
pub mod stats;
pub mod status;
pub mod timestamp;

pub use id::*;
pub use order::OrderRecord;
pub use page::{OrderPage, PageNumber, PageSize};
pub use price::Price;
pub use stats::StatsSnapshot;
pub use status::OrderStatus;
pub use timestamp::{OrderTimestamp, TimestampError};
