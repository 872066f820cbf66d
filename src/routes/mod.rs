//! Router assembly.

mod catalog;
mod common;

pub use catalog::catalog_routes;
pub use common::{common_routes, ready_route};

use crate::openapi::openapi_routes;
use crate::state::AppState;
use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

/// Path prefix of the catalog resources.
pub const API_PREFIX: &str = "/api";

const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Full application: common routes, OpenAPI document, and the catalog under `/api`.
/// Any origin may call the API.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(common_routes())
        .merge(openapi_routes())
        .nest(API_PREFIX, catalog_routes(state))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
