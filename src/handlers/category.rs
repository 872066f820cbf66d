//! Category handlers.

use crate::error::{AppError, ErrorBody};
use crate::model::{Category, CategoryFilter};
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
    path = "/api/categories",
    tag = "Categories",
    params(CategoryFilter),
    responses(
        (status = 200, description = "All matching rows", body = Vec<Category>),
        (status = 400, description = "Malformed query parameter", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn list_categories(
    State(state): State<AppState>,
    query: Result<Query<CategoryFilter>, QueryRejection>,
) -> Result<(StatusCode, Json<Vec<Category>>), AppError> {
    let Query(filter) = query?;
    Ok(ok(state.categories.list(&filter).await?))
}

#[utoipa::path(
    get,
    path = "/api/categorie/{id}",
    tag = "Categories",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 404, description = "No row with this id", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn get_category(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let Path(id) = id?;
    Ok(ok(state.categories.get(id).await?))
}
