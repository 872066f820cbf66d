//! In-process catalog. Mirrors the PostgreSQL behaviour that services rely on: ids are
//! assigned on insert, `last_mod` is refreshed on every write, beers are returned with
//! their relations embedded, and a beer pointing at a missing row is rejected the way the
//! foreign keys reject it.

use super::{BeerRepository, BreweryRepository, CategoryRepository, StyleRepository};
use crate::error::AppError;
use crate::model::{
    contains_ignore_case, Beer, BeerFilter, BeerRecord, Brewery, BreweryFilter, Category,
    CategoryFilter, Style, StyleFilter,
};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

struct StoredBeer {
    record: BeerRecord,
    last_mod: NaiveDateTime,
}

#[derive(Default)]
struct Tables {
    beers: BTreeMap<i32, StoredBeer>,
    breweries: BTreeMap<i32, Brewery>,
    categories: BTreeMap<i32, Category>,
    styles: BTreeMap<i32, Style>,
    last_beer_id: i32,
}

impl Tables {
    fn check_references(&self, record: &BeerRecord) -> Result<(), AppError> {
        if !self.breweries.contains_key(&record.brewery_id) {
            return Err(AppError::BadRequest(format!(
                "referenced row does not exist: brewery {}",
                record.brewery_id
            )));
        }
        if !self.categories.contains_key(&record.category_id) {
            return Err(AppError::BadRequest(format!(
                "referenced row does not exist: category {}",
                record.category_id
            )));
        }
        if !self.styles.contains_key(&record.style_id) {
            return Err(AppError::BadRequest(format!(
                "referenced row does not exist: style {}",
                record.style_id
            )));
        }
        Ok(())
    }

    fn embed(&self, id: i32, stored: &StoredBeer) -> Result<Beer, AppError> {
        let record = &stored.record;
        let missing = |kind: &str, rid: i32| AppError::Internal(format!("beer {} points at missing {} {}", id, kind, rid));
        Ok(Beer {
            id,
            brewery: self
                .breweries
                .get(&record.brewery_id)
                .cloned()
                .ok_or_else(|| missing("brewery", record.brewery_id))?,
            name: record.name.clone(),
            category: self
                .categories
                .get(&record.category_id)
                .cloned()
                .ok_or_else(|| missing("category", record.category_id))?,
            style: self
                .styles
                .get(&record.style_id)
                .cloned()
                .ok_or_else(|| missing("style", record.style_id))?,
            abv: record.abv,
            ibu: record.ibu,
            srm: record.srm,
            upc: record.upc,
            filepath: record.filepath.clone(),
            descript: record.descript.clone(),
            add_user: record.add_user,
            last_mod: stored.last_mod,
        })
    }
}

/// Thread-safe, cloneable handle; clones share the same tables.
#[derive(Clone, Default)]
pub struct MemoryCatalog {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, AppError> {
        self.tables
            .read()
            .map_err(|_| AppError::Internal("catalog lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, AppError> {
        self.tables
            .write()
            .map_err(|_| AppError::Internal("catalog lock poisoned".into()))
    }

    /// Load a brewery row as-is, replacing any row with the same id.
    pub fn put_brewery(&self, brewery: Brewery) -> Result<(), AppError> {
        self.write()?.breweries.insert(brewery.id, brewery);
        Ok(())
    }

    pub fn put_category(&self, category: Category) -> Result<(), AppError> {
        self.write()?.categories.insert(category.id, category);
        Ok(())
    }

    pub fn put_style(&self, style: Style) -> Result<(), AppError> {
        self.write()?.styles.insert(style.id, style);
        Ok(())
    }

    /// Number of stored beers.
    pub fn beer_count(&self) -> Result<usize, AppError> {
        Ok(self.read()?.beers.len())
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

#[async_trait]
impl BeerRepository for MemoryCatalog {
    async fn find(&self, filter: &BeerFilter) -> Result<Vec<Beer>, AppError> {
        let tables = self.read()?;
        tables
            .beers
            .iter()
            .filter(|(_, stored)| {
                let r = &stored.record;
                filter.name.as_deref().map_or(true, |n| contains_ignore_case(&r.name, n))
                    && filter.brewery_id.map_or(true, |id| r.brewery_id == id)
                    && filter.category_id.map_or(true, |id| r.category_id == id)
                    && filter.style_id.map_or(true, |id| r.style_id == id)
            })
            .map(|(id, stored)| tables.embed(*id, stored))
            .collect()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Beer>, AppError> {
        let tables = self.read()?;
        tables
            .beers
            .get(&id)
            .map(|stored| tables.embed(id, stored))
            .transpose()
    }

    async fn insert(&self, record: &BeerRecord) -> Result<Beer, AppError> {
        let mut tables = self.write()?;
        tables.check_references(record)?;
        tables.last_beer_id += 1;
        let id = tables.last_beer_id;
        let stored = StoredBeer {
            record: record.clone(),
            last_mod: now(),
        };
        let beer = tables.embed(id, &stored)?;
        tables.beers.insert(id, stored);
        tracing::info!(beer_id = id, "beer created");
        Ok(beer)
    }

    async fn update(&self, id: i32, record: &BeerRecord) -> Result<Option<Beer>, AppError> {
        let mut tables = self.write()?;
        if !tables.beers.contains_key(&id) {
            return Ok(None);
        }
        tables.check_references(record)?;
        let stored = StoredBeer {
            record: record.clone(),
            last_mod: now(),
        };
        let beer = tables.embed(id, &stored)?;
        tables.beers.insert(id, stored);
        tracing::info!(beer_id = id, "beer updated");
        Ok(Some(beer))
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let removed = self.write()?.beers.remove(&id).is_some();
        if removed {
            tracing::info!(beer_id = id, "beer deleted");
        }
        Ok(removed)
    }
}

#[async_trait]
impl BreweryRepository for MemoryCatalog {
    async fn find(&self, filter: &BreweryFilter) -> Result<Vec<Brewery>, AppError> {
        Ok(self
            .read()?
            .breweries
            .values()
            .filter(|b| {
                filter.name.as_deref().map_or(true, |n| contains_ignore_case(&b.name, n))
                    && filter.city.as_deref().map_or(true, |c| b.city == c)
                    && filter.country.as_deref().map_or(true, |c| b.country == c)
            })
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Brewery>, AppError> {
        Ok(self.read()?.breweries.get(&id).cloned())
    }
}

#[async_trait]
impl CategoryRepository for MemoryCatalog {
    async fn find(&self, filter: &CategoryFilter) -> Result<Vec<Category>, AppError> {
        Ok(self
            .read()?
            .categories
            .values()
            .filter(|c| filter.name.as_deref().map_or(true, |n| contains_ignore_case(&c.cat_name, n)))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, AppError> {
        Ok(self.read()?.categories.get(&id).cloned())
    }
}

#[async_trait]
impl StyleRepository for MemoryCatalog {
    async fn find(&self, filter: &StyleFilter) -> Result<Vec<Style>, AppError> {
        Ok(self
            .read()?
            .styles
            .values()
            .filter(|s| {
                filter.name.as_deref().map_or(true, |n| contains_ignore_case(&s.style_name, n))
                    && filter.category_id.map_or(true, |id| s.cat_id == id)
            })
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Style>, AppError> {
        Ok(self.read()?.styles.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_at() -> NaiveDateTime {
        chrono::DateTime::from_timestamp(1_279_828_820, 0)
            .map(|dt| dt.naive_utc())
            .unwrap()
    }

    fn catalog() -> MemoryCatalog {
        let catalog = MemoryCatalog::new();
        catalog
            .put_category(Category {
                id: 1,
                cat_name: "British Ale".into(),
                last_mod: seeded_at(),
            })
            .unwrap();
        catalog
            .put_style(Style {
                id: 1,
                cat_id: 1,
                style_name: "Porter".into(),
                last_mod: seeded_at(),
            })
            .unwrap();
        catalog
    }

    fn record(brewery_id: i32) -> BeerRecord {
        BeerRecord {
            brewery_id,
            category_id: 1,
            style_id: 1,
            name: "Dark Porter".into(),
            abv: 5.0,
            ibu: 25.0,
            srm: 30.0,
            upc: 0,
            filepath: String::new(),
            descript: String::new(),
            add_user: 0,
        }
    }

    #[tokio::test]
    async fn insert_with_missing_reference_is_a_bad_request() {
        let catalog = catalog();

        let err = catalog.insert(&record(42)).await.unwrap_err();

        assert!(matches!(
            err,
            AppError::BadRequest(ref m) if m == "referenced row does not exist: brewery 42"
        ));
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(catalog.beer_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn update_with_missing_reference_keeps_the_stored_row() {
        let catalog = catalog();
        catalog
            .put_brewery(Brewery {
                id: 1,
                name: "Harbour Brewing".into(),
                address1: String::new(),
                address2: String::new(),
                city: String::new(),
                state: String::new(),
                code: String::new(),
                country: String::new(),
                phone: String::new(),
                website: String::new(),
                filepath: String::new(),
                descript: String::new(),
                add_user: 0,
                last_mod: seeded_at(),
            })
            .unwrap();
        let beer = catalog.insert(&record(1)).await.unwrap();

        let err = catalog.update(beer.id, &record(42)).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let stored = BeerRepository::find_by_id(&catalog, beer.id).await.unwrap();
        assert_eq!(stored.map(|b| b.brewery.id), Some(1));
        assert!(catalog.update(99, &record(1)).await.unwrap().is_none());
    }
}
