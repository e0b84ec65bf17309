use std::sync::Arc;

use async_trait::async_trait;

use super::errors::DomainError;
use super::order::{NewOrder, Order};
use super::product::Product;

/// Persistence for orders with version-based optimistic concurrency.
#[async_trait]
pub trait OrderRepository: Send + Sync + 'static {
    /// Inserts a new order, assigning its id, dates and `version = 0`.
    async fn insert(&self, order: NewOrder) -> Result<Order, DomainError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, DomainError>;

    async fn find_all(&self) -> Result<Vec<Order>, DomainError>;

    /// Writes `order` if the stored version still equals `order.version`,
    /// returning the stored row with the version incremented by one.
    /// Fails with `Conflict` on a version mismatch and `OrderNotFound` when
    /// the row is gone.
    async fn update(&self, order: &Order) -> Result<Order, DomainError>;
}

/// Looks up products in the catalog. Absence covers every failure mode.
#[async_trait]
pub trait ProductCatalog: Send + Sync + 'static {
    async fn lookup(&self, product_id: &str) -> Option<Product>;
}

#[async_trait]
impl<T: OrderRepository + ?Sized> OrderRepository for Arc<T> {
    async fn insert(&self, order: NewOrder) -> Result<Order, DomainError> {
        (**self).insert(order).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, DomainError> {
        (**self).find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<Order>, DomainError> {
        (**self).find_all().await
    }

    async fn update(&self, order: &Order) -> Result<Order, DomainError> {
        (**self).update(order).await
    }
}

#[async_trait]
impl<T: ProductCatalog + ?Sized> ProductCatalog for Arc<T> {
    async fn lookup(&self, product_id: &str) -> Option<Product> {
        (**self).lookup(product_id).await
    }
}
