use futures::stream::{self, Stream, StreamExt};

use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, Order};
use crate::domain::ports::{OrderRepository, ProductCatalog};
use crate::domain::product::Product;

pub struct OrderService<R, C> {
    repo: R,
    catalog: C,
}

impl<R: OrderRepository, C: ProductCatalog> OrderService<R, C> {
    pub fn new(repo: R, catalog: C) -> Self {
        Self { repo, catalog }
    }

    pub fn build_accepted_order(product: &Product, quantity: i32) -> NewOrder {
        NewOrder::accepted(product, quantity)
    }

    pub fn build_rejected_order(product_id: &str, quantity: i32) -> NewOrder {
        NewOrder::rejected(product_id, quantity)
    }

    /// Every order in the store. Nothing is read until the stream is polled,
    /// and calling again starts a fresh read.
    pub fn find_all_orders(&self) -> impl Stream<Item = Result<Order, DomainError>> + Send + '_ {
        stream::once(self.repo.find_all())
            .map(|result| match result {
                Ok(orders) => stream::iter(orders.into_iter().map(Ok)).left_stream(),
                Err(e) => stream::iter(std::iter::once(Err(e))).right_stream(),
            })
            .flatten()
    }

    pub async fn find_by_order_id(&self, order_id: &str) -> Result<Order, DomainError> {
        self.repo
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| DomainError::OrderNotFound(order_id.to_string()))
    }

    /// Accepts the order when the catalog has the product with enough units,
    /// rejects it otherwise. Either way the order is persisted.
    pub async fn submit_order(&self, product_id: &str, quantity: i32) -> Result<Order, DomainError> {
        let order = match self.catalog.lookup(product_id).await {
            Some(product) if product.can_fulfil(quantity) => {
                Self::build_accepted_order(&product, quantity)
            }
            _ => Self::build_rejected_order(product_id, quantity),
        };

        let saved = self.repo.insert(order).await?;
        log::info!(
            "Order {} for product '{}' x{} {}",
            saved.id,
            saved.product_id,
            saved.quantity,
            saved.status
        );
        Ok(saved)
    }

    /// Moves an accepted order to `CANCELLED`. The write is guarded on the
    /// version read here, so a concurrent change surfaces as `Conflict`.
    pub async fn cancel_order(&self, order_id: &str) -> Result<Order, DomainError> {
        let existing = self.find_by_order_id(order_id).await?;
        let cancelled = existing.cancelled()?;
        let saved = self.repo.update(&cancelled).await?;
        log::info!("Order {} cancelled (version {})", saved.id, saved.version);
        Ok(saved)
    }
}
