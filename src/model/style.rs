use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Row of `styles`. `cat_id` is a bare column, not linked to `categories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub id: i32,
    pub cat_id: i32,
    pub style_name: String,
    pub last_mod: NaiveDateTime,
}
