//! Shared application state for all routes. Services are built once and shared by `Arc`.

use crate::repository::Catalog;
use crate::service::{BeerService, BreweryService, CategoryService, StyleService};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub beers: Arc<BeerService>,
    pub breweries: Arc<BreweryService>,
    pub categories: Arc<CategoryService>,
    pub styles: Arc<StyleService>,
}

impl AppState {
    /// Wire every service to the same catalog store.
    pub fn new<C>(catalog: C) -> Self
    where
        C: Catalog + 'static,
    {
        let catalog = Arc::new(catalog);
        AppState {
            beers: Arc::new(BeerService::new(
                catalog.clone(),
                catalog.clone(),
                catalog.clone(),
                catalog.clone(),
            )),
            breweries: Arc::new(BreweryService::new(catalog.clone())),
            categories: Arc::new(CategoryService::new(catalog.clone())),
            styles: Arc::new(StyleService::new(catalog)),
        }
    }
}
