//! Order Desk Core - Shared types library.
//!
//! This crate provides the types shared by every Order Desk component:
//! - `admin` - Order list state machine and backend client
//! - `cli` - Command-line front end for browsing and bulk-editing orders
//!
//! # Architecture
//!
//! Everything here is plain data plus parsing and formatting. Fetching,
//! state and rendering live in `admin` and `cli`.
//!
//! # Modules
//!
//! - [`types`] - Order records, type-safe IDs, statuses, prices, pages and stats

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
