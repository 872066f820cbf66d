//! Optional list filters, read from the query string. Name filters are case-insensitive
//! substring matches; the others are exact.

use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct BeerFilter {
    /// Substring of the beer name.
    pub name: Option<String>,
    pub brewery_id: Option<i32>,
    pub category_id: Option<i32>,
    pub style_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct BreweryFilter {
    /// Substring of the brewery name.
    pub name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct CategoryFilter {
    /// Substring of the category name.
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct StyleFilter {
    /// Substring of the style name.
    pub name: Option<String>,
    pub category_id: Option<i32>,
}

/// Case-insensitive substring test shared by the in-memory store.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
