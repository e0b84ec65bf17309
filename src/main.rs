use dotenvy::dotenv;
use order_service::{build_order_service, build_server, create_pool, run_migrations, Config};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(std::io::Error::other)?;

    let pool = create_pool(&config.database_url).map_err(std::io::Error::other)?;
    run_migrations(&pool).map_err(std::io::Error::other)?;

    log::info!(
        "Starting server at http://{}:{} (catalog at {})",
        config.host,
        config.port,
        config.catalog_service_uri
    );

    let service = build_order_service(pool, &config);
    build_server(service, &config.host, config.port)?.await
}
