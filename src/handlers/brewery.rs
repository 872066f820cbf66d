//! Brewery handlers (read-only).

use crate::error::{AppError, ErrorBody};
use crate::model::{Brewery, BreweryFilter};
use crate::response::ok;
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

#[utoipa::path(
    get,
    path = "/api/breweries",
    tag = "Breweries",
    params(BreweryFilter),
    responses(
        (status = 200, description = "Breweries ordered by id", body = Vec<Brewery>),
        (status = 400, description = "Malformed query parameter", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn list_breweries(
    State(state): State<AppState>,
    query: Result<Query<BreweryFilter>, QueryRejection>,
) -> Result<(StatusCode, Json<Vec<Brewery>>), AppError> {
    let Query(filter) = query?;
    Ok(ok(state.breweries.list(&filter).await?))
}

#[utoipa::path(
    get,
    path = "/api/brewerie/{id}",
    tag = "Breweries",
    params(("id" = i32, Path, description = "Brewery id")),
    responses(
        (status = 200, description = "Brewery found", body = Brewery),
        (status = 404, description = "No row with this id", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn get_brewery(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<(StatusCode, Json<Brewery>), AppError> {
    let Path(id) = id?;
    Ok(ok(state.breweries.get(id).await?))
}
