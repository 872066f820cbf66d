use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Row of `breweries`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Brewery {
    pub id: i32,
    pub name: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    /// Region or state.
    pub state: String,
    /// Postal code.
    pub code: String,
    pub country: String,
    pub phone: String,
    pub website: String,
    pub filepath: String,
    pub descript: String,
    pub add_user: i32,
    pub last_mod: NaiveDateTime,
}
