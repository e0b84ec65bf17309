use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, Order};
use crate::domain::ports::OrderRepository;

/// In-memory order store with the same version checks as the diesel store.
///
/// Listing returns orders in creation order.
#[derive(Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<String, Order>>>,
    insertion_order: Arc<RwLock<Vec<String>>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }

    /// Removes every order. Test helper.
    pub async fn delete_all(&self) {
        let mut orders = self.orders.write().await;
        let mut ids = self.insertion_order.write().await;
        orders.clear();
        ids.clear();
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn insert(&self, order: NewOrder) -> Result<Order, DomainError> {
        let now = Utc::now();
        let stored = Order {
            id: Uuid::new_v4().to_string(),
            product_id: order.product_id,
            product_name: order.product_name,
            product_price: order.product_price,
            quantity: order.quantity,
            status: order.status,
            created_date: now,
            last_modified_date: now,
            version: 0,
        };

        let mut orders = self.orders.write().await;
        let mut ids = self.insertion_order.write().await;
        ids.push(stored.id.clone());
        orders.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, DomainError> {
        Ok(self.orders.read().await.get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Order>, DomainError> {
        let orders = self.orders.read().await;
        let ids = self.insertion_order.read().await;
        Ok(ids.iter().filter_map(|id| orders.get(id).cloned()).collect())
    }

    async fn update(&self, order: &Order) -> Result<Order, DomainError> {
        let mut orders = self.orders.write().await;
        let current = orders
            .get_mut(&order.id)
            .ok_or_else(|| DomainError::OrderNotFound(order.id.clone()))?;

        if current.version != order.version {
            return Err(DomainError::Conflict {
                id: order.id.clone(),
                expected_version: order.version,
            });
        }

        current.product_name = order.product_name.clone();
        current.product_price = order.product_price;
        current.quantity = order.quantity;
        current.status = order.status;
        current.last_modified_date = Utc::now();
        current.version += 1;
        Ok(current.clone())
    }
}
