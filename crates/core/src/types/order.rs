//! Order records as served by the order store.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::id::OrderId;
use super::price::Price;
use super::status::OrderStatus;
use super::timestamp::OrderTimestamp;

/// Immutable snapshot of one order.
///
/// Records are created by deserializing a list response and are replaced, never
/// mutated, on the next fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Stable backend identifier, never reused.
    pub id: OrderId,
    /// Human-facing order number (e.g., "ORD-1001"), unique.
    pub order_number: String,
    pub customer_name: String,
    /// Avatar URL; the store returns `null` or `""` when there is none.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub customer_avatar: Option<String>,
    pub order_date: OrderTimestamp,
    pub status: OrderStatus,
    /// Order total in the store currency.
    #[serde(
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "non_negative_amount"
    )]
    pub total_amount: Decimal,
    /// Payment label (e.g., "Paid", "Unpaid"), independent of `status`.
    pub payment_status: String,
}

impl OrderRecord {
    /// The order total as a displayable price.
    #[must_use]
    pub const fn total(&self) -> Price {
        Price::usd(self.total_amount)
    }
}

fn empty_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn non_negative_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    let amount = rust_decimal::serde::float::deserialize(deserializer)?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(serde::de::Error::custom(format!(
            "total_amount must be non-negative, got {amount}"
        )));
    }
    Ok(amount)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample() -> serde_json::Value {
        json!({
            "id": 1,
            "order_number": "ORD-1001",
            "customer_name": "Alice Johnson",
            "customer_avatar": "",
            "order_date": "2026-01-10T10:00:00",
            "status": "Pending",
            "total_amount": 120.5,
            "payment_status": "Unpaid"
        })
    }

    #[test]
    fn test_deserializes_store_row() {
        let order: OrderRecord = serde_json::from_value(sample()).unwrap();

        assert_eq!(order.id, OrderId::new(1));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.customer_avatar, None);
        assert_eq!(order.total_amount, Decimal::new(1205, 1));
        assert_eq!(order.total().display(), "$120.50");
    }

    #[test]
    fn test_missing_avatar_defaults_to_none() {
        let mut value = sample();
        value.as_object_mut().unwrap().remove("customer_avatar");

        let order: OrderRecord = serde_json::from_value(value).unwrap();
        assert_eq!(order.customer_avatar, None);
    }

    #[test]
    fn test_integer_amount_is_accepted() {
        let mut value = sample();
        value["total_amount"] = json!(45);

        let order: OrderRecord = serde_json::from_value(value).unwrap();
        assert_eq!(order.total_amount, Decimal::new(45, 0));
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let mut value = sample();
        value["total_amount"] = json!(-1.5);

        let result: Result<OrderRecord, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }

    #[test]
    fn test_serializes_amount_as_number() {
        let order: OrderRecord = serde_json::from_value(sample()).unwrap();
        let value = serde_json::to_value(&order).unwrap();

        assert!(value["total_amount"].is_number());
        assert_eq!(value["status"], "Pending");
    }
}
