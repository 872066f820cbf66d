//! Generated OpenAPI document, served at `/api-docs/openapi.json`.

use crate::error::{ErrorBody, ErrorDetail};
use crate::handlers::{beer, brewery, category, style};
use crate::model::{Beer, BeerDraft, Brewery, Category, RelationRef, Style};
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Beer Catalog API",
        version = "1.0.0",
        description = "Beers, breweries, categories and styles. Beers are writable; the other resources are read-only."
    ),
    paths(
        beer::list_beers,
        beer::get_beer,
        beer::create_beer,
        beer::replace_beer,
        beer::patch_beer,
        beer::delete_beer,
        brewery::list_breweries,
        brewery::get_brewery,
        category::list_categories,
        category::get_category,
        style::list_styles,
        style::get_style,
    ),
    components(schemas(Beer, BeerDraft, RelationRef, Brewery, Category, Style, ErrorBody, ErrorDetail)),
    tags(
        (name = "Beers", description = "Beer lifecycle"),
        (name = "Breweries", description = "Brewery lookup"),
        (name = "Categories", description = "Category lookup"),
        (name = "Styles", description = "Style lookup")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn openapi_routes() -> Router {
    Router::new().route(OPENAPI_PATH, get(openapi_json))
}
