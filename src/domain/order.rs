use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::errors::DomainError;
use super::product::Product;

/// Lifecycle status of an order.
///
/// `Accepted` and `Rejected` come out of submission; `Cancelled` is only
/// reachable from `Accepted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Accepted,
    Rejected,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Accepted => "ACCEPTED",
            OrderStatus::Rejected => "REJECTED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// Target status of a cancellation, or `None` when the order cannot be
    /// cancelled from its current status.
    pub fn cancel(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Accepted => Some(OrderStatus::Cancelled),
            OrderStatus::Rejected | OrderStatus::Cancelled => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACCEPTED" => Ok(OrderStatus::Accepted),
            "REJECTED" => Ok(OrderStatus::Rejected),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            other => Err(DomainError::Internal(format!("unknown order status '{other}'"))),
        }
    }
}

/// An order that has not been persisted yet: no id, dates or version.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub product_id: String,
    pub product_name: Option<String>,
    pub product_price: Option<f64>,
    pub quantity: i32,
    pub status: OrderStatus,
}

impl NewOrder {
    /// Accepted order carrying a snapshot of the product's name and price.
    pub fn accepted(product: &Product, quantity: i32) -> Self {
        Self {
            product_id: product.id.clone(),
            product_name: Some(product.name.clone()),
            product_price: Some(product.price),
            quantity,
            status: OrderStatus::Accepted,
        }
    }

    pub fn rejected(product_id: impl Into<String>, quantity: i32) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: None,
            product_price: None,
            quantity,
            status: OrderStatus::Rejected,
        }
    }
}

/// A persisted order as stored and returned by the datastore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub product_id: String,
    pub product_name: Option<String>,
    pub product_price: Option<f64>,
    pub quantity: i32,
    pub status: OrderStatus,
    pub created_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
    pub version: i32,
}

impl Order {
    /// Copy of this order with status `CANCELLED`. Id, dates and version are
    /// kept as read so the datastore can guard the update on `version`.
    pub fn cancelled(&self) -> Result<Order, DomainError> {
        let status = self
            .status
            .cancel()
            .ok_or_else(|| DomainError::InvalidTransition {
                id: self.id.clone(),
                from: self.status,
            })?;

        Ok(Order {
            status,
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Product {
        Product {
            id: "p1".to_string(),
            name: "Widget".to_string(),
            price: 9.99,
            available_units: 5,
        }
    }

    fn stored(status: OrderStatus) -> Order {
        let now = Utc::now();
        Order {
            id: "o1".to_string(),
            product_id: "p1".to_string(),
            product_name: Some("Widget".to_string()),
            product_price: Some(9.99),
            quantity: 1,
            status,
            created_date: now,
            last_modified_date: now,
            version: 2,
        }
    }

    #[test]
    fn accepted_copies_product_snapshot() {
        let order = NewOrder::accepted(&widget(), 3);
        assert_eq!(order.status, OrderStatus::Accepted);
        assert_eq!(order.product_id, "p1");
        assert_eq!(order.product_name.as_deref(), Some("Widget"));
        assert_eq!(order.product_price, Some(9.99));
        assert_eq!(order.quantity, 3);
    }

    #[test]
    fn rejected_has_no_product_snapshot() {
        let order = NewOrder::rejected("p1", 10);
        assert_eq!(order.status, OrderStatus::Rejected);
        assert!(order.product_name.is_none());
        assert!(order.product_price.is_none());
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            OrderStatus::Accepted,
            OrderStatus::Rejected,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("PENDING".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn cancelling_accepted_keeps_everything_but_status() {
        let order = stored(OrderStatus::Accepted);
        let cancelled = order.cancelled().unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        assert_eq!(cancelled.id, order.id);
        assert_eq!(cancelled.version, order.version);
        assert_eq!(cancelled.created_date, order.created_date);
        assert_eq!(cancelled.product_name, order.product_name);
    }

    #[test]
    fn cancelling_rejected_or_cancelled_is_refused() {
        for status in [OrderStatus::Rejected, OrderStatus::Cancelled] {
            let err = stored(status).cancelled().unwrap_err();
            assert!(matches!(err, DomainError::InvalidTransition { from, .. } if from == status));
        }
    }

    #[test]
    fn serializes_with_camel_case_field_names() {
        let json = serde_json::to_value(stored(OrderStatus::Accepted)).unwrap();
        for field in [
            "id",
            "productId",
            "productName",
            "productPrice",
            "quantity",
            "status",
            "createdDate",
            "lastModifiedDate",
            "version",
        ] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }
        assert_eq!(json["status"], "ACCEPTED");
    }

    #[test]
    fn rejected_serializes_null_product_fields() {
        let mut order = stored(OrderStatus::Rejected);
        order.product_name = None;
        order.product_price = None;
        let json = serde_json::to_value(order).unwrap();
        assert!(json["productName"].is_null());
        assert!(json["productPrice"].is_null());
    }
}
