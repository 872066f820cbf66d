//! Data access seams. Services hold these as `Arc<dyn ...>`; `PgCatalog` and
//! `MemoryCatalog` each implement all four.

mod memory;
mod postgres;

pub use memory::MemoryCatalog;
pub use postgres::PgCatalog;

use crate::error::AppError;
use crate::model::{
    Beer, BeerFilter, BeerRecord, Brewery, BreweryFilter, Category, CategoryFilter, Style, StyleFilter,
};
use async_trait::async_trait;

#[async_trait]
pub trait BeerRepository: Send + Sync {
    /// Beers matching `filter`, ordered by id, relations embedded.
    async fn find(&self, filter: &BeerFilter) -> Result<Vec<Beer>, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Beer>, AppError>;

    /// Insert a row; the store assigns id and `last_mod`.
    async fn insert(&self, record: &BeerRecord) -> Result<Beer, AppError>;

    /// Overwrite every writable column of `id` and refresh `last_mod`. `None` when the row is gone.
    async fn update(&self, id: i32, record: &BeerRecord) -> Result<Option<Beer>, AppError>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: i32) -> Result<bool, AppError>;
}

#[async_trait]
pub trait BreweryRepository: Send + Sync {
    async fn find(&self, filter: &BreweryFilter) -> Result<Vec<Brewery>, AppError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Brewery>, AppError>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find(&self, filter: &CategoryFilter) -> Result<Vec<Category>, AppError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, AppError>;
}

#[async_trait]
pub trait StyleRepository: Send + Sync {
    async fn find(&self, filter: &StyleFilter) -> Result<Vec<Style>, AppError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Style>, AppError>;
}

/// A store that serves the whole catalog.
pub trait Catalog: BeerRepository + BreweryRepository + CategoryRepository + StyleRepository {}

impl<T> Catalog for T where T: BeerRepository + BreweryRepository + CategoryRepository + StyleRepository {}
