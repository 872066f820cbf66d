//! Catalog routes, mounted under `/api`. Singular paths keep the legacy
//! spelling (`/brewerie/:id`, `/categorie/:id`).

use crate::handlers::beer::{create_beer, delete_beer, get_beer, list_beers, patch_beer, replace_beer};
use crate::handlers::brewery::{get_brewery, list_breweries};
use crate::handlers::category::{get_category, list_categories};
use crate::handlers::style::{get_style, list_styles};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn catalog_routes(state: AppState) -> Router {
    Router::new()
        .route("/beers", get(list_beers))
        .route("/beer", post(create_beer))
        .route(
            "/beer/:id",
            get(get_beer).put(replace_beer).patch(patch_beer).delete(delete_beer),
        )
        .route("/breweries", get(list_breweries))
        .route("/brewerie/:id", get(get_brewery))
        .route("/categories", get(list_categories))
        .route("/categorie/:id", get(get_category))
        .route("/styles", get(list_styles))
        .route("/style/:id", get(get_style))
        .with_state(state)
}
