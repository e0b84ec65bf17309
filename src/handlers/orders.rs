use std::sync::Arc;

use actix_web::{web, HttpResponse};
use futures::TryStreamExt;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::application::order_service::OrderService;
use crate::domain::order::Order;
use crate::domain::ports::{OrderRepository, ProductCatalog};
use crate::errors::AppError;

pub type AppOrderService = OrderService<Arc<dyn OrderRepository>, Arc<dyn ProductCatalog>>;

const MIN_QUANTITY: i32 = 1;
const MAX_QUANTITY: i32 = 100;

// ── Request DTOs ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub product_id: Option<String>,
    /// Between 1 and 100 items.
    pub quantity: Option<i32>,
}

impl OrderRequest {
    /// Checks field shape and hands back the validated pair.
    pub fn validate(&self) -> Result<(&str, i32), AppError> {
        let product_id = self
            .product_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| AppError::Validation("Product ID must be defined.".to_string()))?;

        let quantity = self
            .quantity
            .ok_or_else(|| AppError::Validation("Product quantity must be defined.".to_string()))?;
        if quantity < MIN_QUANTITY {
            return Err(AppError::Validation(
                "You must order at least 1 item.".to_string(),
            ));
        }
        if quantity > MAX_QUANTITY {
            return Err(AppError::Validation(
                "You cannot order more than 100 items.".to_string(),
            ));
        }

        Ok((product_id, quantity))
    }
}

// ── Routing ──────────────────────────────────────────────────────────────────

pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| AppError::Validation(err.to_string()).into());

    cfg.service(
        web::scope("/orders")
            .app_data(json_config)
            .route("", web::get().to(get_orders))
            .route("", web::post().to(submit_order))
            .route("/{id}", web::get().to(get_order))
            .route("/{id}", web::put().to(cancel_order)),
    );
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /orders
///
/// Returns every stored order.
#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "All orders", body = [Order]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_orders(service: web::Data<AppOrderService>) -> Result<HttpResponse, AppError> {
    let orders: Vec<Order> = service.find_all_orders().try_collect().await?;
    Ok(HttpResponse::Ok().json(orders))
}

/// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = String, Path, description = "Order id"),
    ),
    responses(
        (status = 200, description = "Order found", body = Order),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: web::Data<AppOrderService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order = service.find_by_order_id(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(order))
}

/// POST /orders
///
/// Submits an order. Availability is checked against the catalog; an order
/// that cannot be fulfilled is still stored, with status `REJECTED`.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = OrderRequest,
    responses(
        (status = 200, description = "Order accepted or rejected", body = Order),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn submit_order(
    service: web::Data<AppOrderService>,
    body: web::Json<OrderRequest>,
) -> Result<HttpResponse, AppError> {
    let (product_id, quantity) = body.validate()?;
    let order = service.submit_order(product_id, quantity).await?;
    Ok(HttpResponse::Ok().json(order))
}

/// PUT /orders/{id}
///
/// Cancels an accepted order.
#[utoipa::path(
    put,
    path = "/orders/{id}",
    params(
        ("id" = String, Path, description = "Order id"),
    ),
    responses(
        (status = 200, description = "Order cancelled", body = Order),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order changed concurrently or cannot be cancelled"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn cancel_order(
    service: web::Data<AppOrderService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order = service.cancel_order(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(order))
}
