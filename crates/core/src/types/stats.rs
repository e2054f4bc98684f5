//! Summary counts shown above the order list.

use serde::{Deserialize, Serialize};

use super::order::OrderRecord;
use super::status::OrderStatus;

/// Approximate, point-in-time counts derived from a bounded sample of orders.
///
/// `shipped` is not a real shipped-state filter: it is everything that is
/// neither pending nor refunded, so `shipped == total - pending - refunded`
/// always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Size of the sample, not the store's true order count.
    pub total: u64,
    pub pending: u64,
    pub shipped: u64,
    pub refunded: u64,
}

impl StatsSnapshot {
    /// Classify every order in the sample by status.
    #[must_use]
    pub fn from_sample(sample: &[OrderRecord]) -> Self {
        Self::from_statuses(sample.iter().map(|order| &order.status))
    }

    /// Classify a sequence of statuses.
    #[must_use]
    pub fn from_statuses<'a>(statuses: impl IntoIterator<Item = &'a OrderStatus>) -> Self {
        let (total, pending, refunded) =
            statuses
                .into_iter()
                .fold((0_u64, 0_u64, 0_u64), |(total, pending, refunded), status| {
                    match status {
                        OrderStatus::Pending => (total + 1, pending + 1, refunded),
                        OrderStatus::Refunded => (total + 1, pending, refunded + 1),
                        OrderStatus::Completed | OrderStatus::Other(_) => {
                            (total + 1, pending, refunded)
                        }
                    }
                });

        Self {
            total,
            pending,
            shipped: total - pending - refunded,
            refunded,
        }
    }
}
