//! Read-only services for breweries, categories and styles.

use crate::error::AppError;
use crate::model::{Brewery, BreweryFilter, Category, CategoryFilter, Style, StyleFilter};
use crate::repository::{BreweryRepository, CategoryRepository, StyleRepository};
use std::sync::Arc;

pub struct BreweryService {
    repo: Arc<dyn BreweryRepository>,
}

impl BreweryService {
    pub fn new(repo: Arc<dyn BreweryRepository>) -> Self {
        BreweryService { repo }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self, filter: &BreweryFilter) -> Result<Vec<Brewery>, AppError> {
        self.repo.find(filter).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Brewery, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("brewery {}", id)))
    }
}

pub struct CategoryService {
    repo: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        CategoryService { repo }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self, filter: &CategoryFilter) -> Result<Vec<Category>, AppError> {
        self.repo.find(filter).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Category, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("category {}", id)))
    }
}

pub struct StyleService {
    repo: Arc<dyn StyleRepository>,
}

impl StyleService {
    pub fn new(repo: Arc<dyn StyleRepository>) -> Self {
        StyleService { repo }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self, filter: &StyleFilter) -> Result<Vec<Style>, AppError> {
        self.repo.find(filter).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Style, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("style {}", id)))
    }
}
