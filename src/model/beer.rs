use crate::error::AppError;
use crate::model::{Brewery, Category, Style};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A beer with its brewery, category and style embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Beer {
    pub id: i32,
    pub brewery: Brewery,
    pub name: String,
    pub category: Category,
    pub style: Style,
    pub abv: f32,
    pub ibu: f32,
    pub srm: f32,
    pub upc: i32,
    pub filepath: String,
    pub descript: String,
    pub add_user: i32,
    pub last_mod: NaiveDateTime,
}

/// Reference to a related row inside a beer body. Only `id` is read; an embedded
/// full object is accepted and its other fields ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RelationRef {
    pub id: Option<i32>,
}

impl RelationRef {
    pub fn to(id: i32) -> Self {
        RelationRef { id: Some(id) }
    }
}

/// Request body for beer writes. Every field is optional at the type level; create and
/// replace require the full set, patch applies whatever is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BeerDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brewery: Option<RelationRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<RelationRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<RelationRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abv: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ibu: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub srm: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upc: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filepath: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descript: Option<String>,
    /// Only honoured on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_user: Option<i32>,
}

/// Ids of the three rows a beer points at, already checked to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationIds {
    pub brewery_id: i32,
    pub category_id: i32,
    pub style_id: i32,
}

/// Writable columns of a `beers` row. Id and `last_mod` are owned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct BeerRecord {
    pub brewery_id: i32,
    pub category_id: i32,
    pub style_id: i32,
    pub name: String,
    pub abv: f32,
    pub ibu: f32,
    pub srm: f32,
    pub upc: i32,
    pub filepath: String,
    pub descript: String,
    pub add_user: i32,
}

fn required<T: Clone>(field: &str, value: &Option<T>) -> Result<T, AppError> {
    value
        .clone()
        .ok_or_else(|| AppError::Validation(format!("{} is required", field)))
}

impl BeerRecord {
    /// Full column set for create and replace.
    pub fn from_draft(draft: &BeerDraft, relations: RelationIds, add_user: i32) -> Result<Self, AppError> {
        Ok(BeerRecord {
            brewery_id: relations.brewery_id,
            category_id: relations.category_id,
            style_id: relations.style_id,
            name: required("name", &draft.name)?,
            abv: required("abv", &draft.abv)?,
            ibu: required("ibu", &draft.ibu)?,
            srm: required("srm", &draft.srm)?,
            upc: required("upc", &draft.upc)?,
            filepath: draft.filepath.clone().unwrap_or_default(),
            descript: draft.descript.clone().unwrap_or_default(),
            add_user,
        })
    }

    /// Overwrite the scalar fields present in `draft`. Relations are handled by the caller
    /// since each one needs an existence check first.
    pub fn merge_scalars(&mut self, draft: &BeerDraft) {
        if let Some(name) = &draft.name {
            self.name = name.clone();
        }
        if let Some(abv) = draft.abv {
            self.abv = abv;
        }
        if let Some(ibu) = draft.ibu {
            self.ibu = ibu;
        }
        if let Some(srm) = draft.srm {
            self.srm = srm;
        }
        if let Some(upc) = draft.upc {
            self.upc = upc;
        }
        if let Some(filepath) = &draft.filepath {
            self.filepath = filepath.clone();
        }
        if let Some(descript) = &draft.descript {
            self.descript = descript.clone();
        }
    }
}

impl From<&Beer> for BeerRecord {
    fn from(beer: &Beer) -> Self {
        BeerRecord {
            brewery_id: beer.brewery.id,
            category_id: beer.category.id,
            style_id: beer.style.id,
            name: beer.name.clone(),
            abv: beer.abv,
            ibu: beer.ibu,
            srm: beer.srm,
            upc: beer.upc,
            filepath: beer.filepath.clone(),
            descript: beer.descript.clone(),
            add_user: beer.add_user,
        }
    }
}
