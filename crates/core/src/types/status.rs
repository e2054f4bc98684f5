//! Order status labels.
//!
//! The backend stores status as a free-form label. The three labels the order
//! list reasons about get their own variants; everything else is carried
//! verbatim so it can be displayed and written back unchanged.

use core::fmt;
use core::str::FromStr;
use std::convert::Infallible;

use serde::{Deserialize, Serialize};

/// Order fulfillment status.
///
/// Serialized as the backend's label (`"Pending"`, `"Completed"`, ...).
/// Matching is exact, so `"pending"` is an [`OrderStatus::Other`] on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Completed,
    Refunded,
    /// Any other fulfillment state reported by the backend.
    Other(String),
}

impl OrderStatus {
    /// The backend label for this status.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
            Self::Refunded => "Refunded",
            Self::Other(label) => label,
        }
    }

    /// Parse a user-supplied label, matching the known statuses case-insensitively.
    ///
    /// Unknown labels are kept as typed.
    #[must_use]
    pub fn from_user_input(input: &str) -> Self {
        let trimmed = input.trim();
        [Self::Pending, Self::Completed, Self::Refunded]
            .into_iter()
            .find(|known| known.label().eq_ignore_ascii_case(trimmed))
            .unwrap_or_else(|| Self::Other(trimmed.to_string()))
    }
}

impl From<String> for OrderStatus {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Pending" => Self::Pending,
            "Completed" => Self::Completed,
            "Refunded" => Self::Refunded,
            _ => Self::Other(label),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrderStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_user_input(s))
    }
}
