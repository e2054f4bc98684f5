//! Error types for the order list.
//!
//! Transport-level failures are reported as [`FetchError`] (reads) and
//! [`BulkActionError`] (writes). Neither is fatal: the state machine turns them
//! into a [`ViewError`] banner and keeps the view interactive.

use order_desk_core::PageNumber;
use thiserror::Error;

/// A read from the order store failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// HTTP request failed before a response arrived.
    #[error("Order store request failed: {0}")]
    Request(String),

    /// The order store answered with a non-success status.
    #[error("Order store returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The response body could not be decoded.
    #[error("Order store response error: {0}")]
    Decode(String),
}

/// A bulk write (delete, duplicate, status update) failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BulkActionError {
    /// HTTP request failed before a response arrived.
    #[error("Bulk request failed: {0}")]
    Request(String),

    /// The order store answered with a non-success status.
    #[error("Bulk request returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },
}

/// Error banner shown by the order list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// The current page could not be loaded; an empty page is shown instead.
    #[error("Could not load page {page}: {source}")]
    PageFetch {
        page: PageNumber,
        source: FetchError,
    },

    /// The statistics sample could not be loaded.
    #[error("Could not load order statistics: {source}")]
    StatsFetch { source: FetchError },

    /// A bulk action failed; the selection was kept.
    #[error("{action} failed for {count} orders: {source}")]
    BulkAction {
        /// Display label of the action.
        action: String,
        /// Number of orders in the request.
        count: usize,
        source: BulkActionError,
    },
}

impl ViewError {
    /// Whether the Retry action can recover from this error.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::PageFetch { .. } | Self::StatsFetch { .. })
    }
}
