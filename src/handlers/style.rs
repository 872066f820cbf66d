//! Style handlers (read-only). A style's `catId` is reported as stored; it is not
//! checked against `categories`.

use crate::error::{AppError, ErrorBody};
use crate::model::{Style, StyleFilter};
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
    path = "/api/styles",
    tag = "Styles",
    params(StyleFilter),
    responses(
        (status = 200, description = "All matching rows", body = Vec<Style>),
        (status = 400, description = "Malformed query parameter", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn list_styles(
    State(state): State<AppState>,
    query: Result<Query<StyleFilter>, QueryRejection>,
) -> Result<(StatusCode, Json<Vec<Style>>), AppError> {
    let Query(filter) = query?;
    Ok(ok(state.styles.list(&filter).await?))
}

#[utoipa::path(
    get,
    path = "/api/style/{id}",
    tag = "Styles",
    params(("id" = i32, Path, description = "Style id")),
    responses(
        (status = 200, description = "Style found", body = Style),
        (status = 404, description = "No row with this id", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn get_style(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<(StatusCode, Json<Style>), AppError> {
    let Path(id) = id?;
    Ok(ok(state.styles.get(id).await?))
}
