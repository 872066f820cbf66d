//! Beer handlers: the only resource with a write surface.

use crate::error::{AppError, ErrorBody};
use crate::model::{Beer, BeerDraft, BeerFilter};
use crate::response::{created, no_content, ok};
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

#[utoipa::path(
    get,
    path = "/api/beers",
    tag = "Beers",
    params(BeerFilter),
    responses(
        (status = 200, description = "Beers with brewery, category and style embedded", body = Vec<Beer>),
        (status = 400, description = "Malformed query parameter", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn list_beers(
    State(state): State<AppState>,
    query: Result<Query<BeerFilter>, QueryRejection>,
) -> Result<(StatusCode, Json<Vec<Beer>>), AppError> {
    let Query(filter) = query?;
    Ok(ok(state.beers.list(&filter).await?))
}

#[utoipa::path(
    get,
    path = "/api/beer/{id}",
    tag = "Beers",
    params(("id" = i32, Path, description = "Beer id")),
    responses(
        (status = 200, description = "Beer found", body = Beer),
        (status = 404, description = "No beer with this id", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn get_beer(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<(StatusCode, Json<Beer>), AppError> {
    let Path(id) = id?;
    Ok(ok(state.beers.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/beer",
    tag = "Beers",
    request_body = BeerDraft,
    responses(
        (status = 201, description = "Beer created", body = Beer),
        (status = 400, description = "Invalid body or missing reference", body = ErrorBody),
        (status = 404, description = "Referenced brewery, category or style not found", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn create_beer(
    State(state): State<AppState>,
    body: Result<Json<BeerDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Beer>), AppError> {
    let Json(draft) = body?;
    Ok(created(state.beers.create(&draft).await?))
}

#[utoipa::path(
    put,
    path = "/api/beer/{id}",
    tag = "Beers",
    params(("id" = i32, Path, description = "Beer id")),
    request_body = BeerDraft,
    responses(
        (status = 200, description = "Beer replaced", body = Beer),
        (status = 400, description = "Invalid body or missing reference", body = ErrorBody),
        (status = 404, description = "Beer or referenced row not found", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn replace_beer(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<BeerDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Beer>), AppError> {
    let Path(id) = id?;
    let Json(draft) = body?;
    Ok(ok(state.beers.replace(id, &draft).await?))
}

#[utoipa::path(
    patch,
    path = "/api/beer/{id}",
    tag = "Beers",
    params(("id" = i32, Path, description = "Beer id")),
    request_body(content = BeerDraft, description = "Only the fields present are applied"),
    responses(
        (status = 200, description = "Beer updated", body = Beer),
        (status = 400, description = "Invalid field value", body = ErrorBody),
        (status = 404, description = "Beer or referenced row not found", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn patch_beer(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<BeerDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Beer>), AppError> {
    let Path(id) = id?;
    let Json(draft) = body?;
    Ok(ok(state.beers.merge_partial(id, &draft).await?))
}

#[utoipa::path(
    delete,
    path = "/api/beer/{id}",
    tag = "Beers",
    params(("id" = i32, Path, description = "Beer id")),
    responses(
        (status = 204, description = "Beer deleted"),
        (status = 404, description = "No beer with this id", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn delete_beer(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    state.beers.delete(id).await?;
    Ok(no_content())
}
