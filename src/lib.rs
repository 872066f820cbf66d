//! Beer catalog: REST API over beers, breweries, categories and styles.

pub mod error;
pub mod handlers;
pub mod model;
pub mod openapi;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod settings;
pub mod state;
pub mod store;
pub mod telemetry;

pub use error::{AppError, ConfigError};
pub use openapi::ApiDoc;
pub use repository::{Catalog, MemoryCatalog, PgCatalog};
pub use routes::{app, catalog_routes, common_routes, ready_route, API_PREFIX};
pub use settings::Settings;
pub use state::AppState;
pub use store::{ensure_catalog_tables, ensure_database_exists};
pub use telemetry::init_tracing;
