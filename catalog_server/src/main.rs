//! Beer catalog server.
//!
//! Run from repo root: `cargo run -p catalog-server`

use beer_catalog::{
    app, ensure_catalog_tables, ensure_database_exists, init_tracing, ready_route, AppState, PgCatalog,
    Settings,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing();

    let settings = Settings::from_env()?;
    if settings.create_database {
        ensure_database_exists(&settings.database_url).await?;
    }
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.database_url)
        .await?;
    ensure_catalog_tables(&pool).await?;

    let state = AppState::new(PgCatalog::new(pool.clone()));
    let router = app(state).merge(ready_route(pool));

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("beer catalog listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown requested");
    }
}
