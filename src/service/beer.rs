//! Beer lifecycle: list, get, create, replace, partial merge, delete.

use crate::error::AppError;
use crate::model::{Beer, BeerDraft, BeerFilter, BeerRecord, RelationIds, RelationRef};
use crate::repository::{BeerRepository, BreweryRepository, CategoryRepository, StyleRepository};
use crate::service::BeerValidator;
use std::sync::Arc;

pub struct BeerService {
    beers: Arc<dyn BeerRepository>,
    breweries: Arc<dyn BreweryRepository>,
    categories: Arc<dyn CategoryRepository>,
    styles: Arc<dyn StyleRepository>,
}

fn beer_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("beer {}", id))
}

/// Id of a relation that a full write requires. A missing object or id is a bad request.
fn required_relation(kind: &str, relation: Option<RelationRef>) -> Result<i32, AppError> {
    relation
        .and_then(|r| r.id)
        .ok_or_else(|| AppError::BadRequest(format!("beer must reference a {}", kind)))
}

impl BeerService {
    pub fn new(
        beers: Arc<dyn BeerRepository>,
        breweries: Arc<dyn BreweryRepository>,
        categories: Arc<dyn CategoryRepository>,
        styles: Arc<dyn StyleRepository>,
    ) -> Self {
        BeerService {
            beers,
            breweries,
            categories,
            styles,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self, filter: &BeerFilter) -> Result<Vec<Beer>, AppError> {
        self.beers.find(filter).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Beer, AppError> {
        self.beers
            .find_by_id(id)
            .await?
            .ok_or_else(|| beer_not_found(id))
    }

    #[tracing::instrument(skip(self, draft))]
    pub async fn create(&self, draft: &BeerDraft) -> Result<Beer, AppError> {
        BeerValidator::validate(draft)?;
        let relations = self.resolve_relations(draft).await?;
        let record = BeerRecord::from_draft(draft, relations, draft.add_user.unwrap_or(0))?;
        self.beers.insert(&record).await
    }

    /// Overwrite every mutable field. All three relations are checked again even when
    /// they match the stored ones.
    #[tracing::instrument(skip(self, draft))]
    pub async fn replace(&self, id: i32, draft: &BeerDraft) -> Result<Beer, AppError> {
        BeerValidator::validate(draft)?;
        let existing = self.get(id).await?;
        let relations = self.resolve_relations(draft).await?;
        let record = BeerRecord::from_draft(draft, relations, existing.add_user)?;
        self.beers
            .update(id, &record)
            .await?
            .ok_or_else(|| beer_not_found(id))
    }

    /// Apply the fields present in `draft`; absent fields keep their stored values.
    #[tracing::instrument(skip(self, draft))]
    pub async fn merge_partial(&self, id: i32, draft: &BeerDraft) -> Result<Beer, AppError> {
        let existing = self.get(id).await?;
        BeerValidator::validate_partial(draft)?;

        let mut record = BeerRecord::from(&existing);
        record.merge_scalars(draft);
        if let Some(brewery) = draft.brewery {
            record.brewery_id = self.ensure_brewery(required_relation("brewery", Some(brewery))?).await?;
        }
        if let Some(category) = draft.category {
            record.category_id = self.ensure_category(required_relation("category", Some(category))?).await?;
        }
        if let Some(style) = draft.style {
            record.style_id = self.ensure_style(required_relation("style", Some(style))?).await?;
        }

        self.beers
            .update(id, &record)
            .await?
            .ok_or_else(|| beer_not_found(id))
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.get(id).await?;
        if !self.beers.delete(id).await? {
            return Err(beer_not_found(id));
        }
        Ok(())
    }

    /// All three relations present, then each one existing, in brewery, category, style order.
    async fn resolve_relations(&self, draft: &BeerDraft) -> Result<RelationIds, AppError> {
        let brewery_id = required_relation("brewery", draft.brewery)?;
        let category_id = required_relation("category", draft.category)?;
        let style_id = required_relation("style", draft.style)?;
        Ok(RelationIds {
            brewery_id: self.ensure_brewery(brewery_id).await?,
            category_id: self.ensure_category(category_id).await?,
            style_id: self.ensure_style(style_id).await?,
        })
    }

    async fn ensure_brewery(&self, id: i32) -> Result<i32, AppError> {
        self.breweries
            .find_by_id(id)
            .await?
            .map(|b| b.id)
            .ok_or_else(|| AppError::NotFound(format!("brewery {}", id)))
    }

    async fn ensure_category(&self, id: i32) -> Result<i32, AppError> {
        self.categories
            .find_by_id(id)
            .await?
            .map(|c| c.id)
            .ok_or_else(|| AppError::NotFound(format!("category {}", id)))
    }

    async fn ensure_style(&self, id: i32) -> Result<i32, AppError> {
        self.styles
            .find_by_id(id)
            .await?
            .map(|s| s.id)
            .ok_or_else(|| AppError::NotFound(format!("style {}", id)))
    }
}
