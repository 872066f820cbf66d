//! Shared fixtures for integration tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use beer_catalog::model::{BeerDraft, Brewery, Category, RelationRef, Style};
use beer_catalog::{app, AppState, MemoryCatalog};
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use tower::ServiceExt;

pub fn seeded_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2010, 7, 22)
        .and_then(|d| d.and_hms_opt(20, 0, 20))
        .unwrap()
}

pub fn brewery(id: i32, name: &str, city: &str, country: &str) -> Brewery {
    Brewery {
        id,
        name: name.to_string(),
        address1: "1 Main Street".to_string(),
        address2: String::new(),
        city: city.to_string(),
        state: String::new(),
        code: "1000".to_string(),
        country: country.to_string(),
        phone: String::new(),
        website: String::new(),
        filepath: String::new(),
        descript: String::new(),
        add_user: 0,
        last_mod: seeded_at(),
    }
}

pub fn category(id: i32, name: &str) -> Category {
    Category {
        id,
        cat_name: name.to_string(),
        last_mod: seeded_at(),
    }
}

pub fn style(id: i32, cat_id: i32, name: &str) -> Style {
    Style {
        id,
        cat_id,
        style_name: name.to_string(),
        last_mod: seeded_at(),
    }
}

/// Two breweries, two categories and three styles. Style 3 points at category 99,
/// which does not exist.
pub fn seeded_catalog() -> MemoryCatalog {
    let catalog = MemoryCatalog::new();
    catalog.put_brewery(brewery(1, "Test Brewery", "Gent", "Belgium")).unwrap();
    catalog.put_brewery(brewery(2, "Other Brewery", "Plzen", "Czech Republic")).unwrap();
    catalog.put_category(category(1, "Test Category")).unwrap();
    catalog.put_category(category(2, "German Lager")).unwrap();
    catalog.put_style(style(1, 1, "Test Style")).unwrap();
    catalog.put_style(style(2, 2, "German Pilsener")).unwrap();
    catalog.put_style(style(3, 99, "Orphan Style")).unwrap();
    catalog
}

pub fn test_beer_draft() -> BeerDraft {
    BeerDraft {
        name: Some("Test Beer".into()),
        brewery: Some(RelationRef::to(1)),
        category: Some(RelationRef::to(1)),
        style: Some(RelationRef::to(1)),
        abv: Some(5.5),
        ibu: Some(30.0),
        srm: Some(15.0),
        upc: Some(123456),
        filepath: Some("/path/to/beer.jpg".into()),
        descript: Some("Test Description".into()),
        add_user: None,
    }
}

pub fn test_app(catalog: MemoryCatalog) -> Router {
    app(AppState::new(catalog))
}

/// Send one request through the router and decode the JSON body (`Null` when empty).
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
