pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use config::Config;
pub use db::{create_pool, DbPool};
pub use handlers::orders::AppOrderService;

use application::order_service::OrderService;
use domain::ports::{OrderRepository, ProductCatalog};
use infrastructure::order_repo::DieselOrderRepository;
use infrastructure::product_client::HttpProductClient;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::orders::get_orders,
        handlers::orders::get_order,
        handlers::orders::submit_order,
        handlers::orders::cancel_order,
    ),
    components(schemas(
        domain::order::Order,
        domain::order::OrderStatus,
        handlers::orders::OrderRequest,
    )),
    tags((name = "orders", description = "Order submission and cancellation"))
)]
pub struct ApiDoc;

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), BoxError> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    log::info!("Applied {} migration(s)", applied.len());
    Ok(())
}

/// Wire the diesel store and the HTTP catalog client into an order service.
pub fn build_order_service(pool: DbPool, config: &Config) -> AppOrderService {
    let repo: Arc<dyn OrderRepository> = Arc::new(DieselOrderRepository::new(pool));
    let catalog: Arc<dyn ProductCatalog> = Arc::new(HttpProductClient::new(
        config.catalog_service_uri.clone(),
        config.catalog_retry,
    ));
    OrderService::new(repo, catalog)
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    service: AppOrderService,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let service = web::Data::new(service);
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(Logger::default())
            .configure(handlers::orders::configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
