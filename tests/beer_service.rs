//! BeerService behaviour against the in-memory catalog.

mod common;

use beer_catalog::model::{BeerDraft, BeerFilter, RelationRef, StyleFilter};
use beer_catalog::{AppError, AppState};
use common::{brewery, category, seeded_catalog, style, test_beer_draft};

#[tokio::test]
async fn create_assigns_id_and_embeds_referenced_rows() {
    let state = AppState::new(seeded_catalog());

    let beer = state.beers.create(&test_beer_draft()).await.unwrap();

    assert_eq!(beer.id, 1);
    assert_eq!(beer.name, "Test Beer");
    assert_eq!(beer.brewery, brewery(1, "Test Brewery", "Gent", "Belgium"));
    assert_eq!(beer.category, category(1, "Test Category"));
    assert_eq!(beer.style, style(1, 1, "Test Style"));
    assert_eq!(beer.upc, 123456);
    assert_eq!(beer.add_user, 0);

    let second = state.beers.create(&test_beer_draft()).await.unwrap();
    assert_eq!(second.id, 2);
}

#[tokio::test]
async fn create_with_unknown_reference_is_not_found_and_writes_nothing() {
    let catalog = seeded_catalog();
    let state = AppState::new(catalog.clone());

    for (draft, expected) in [
        (
            BeerDraft {
                brewery: Some(RelationRef::to(42)),
                ..test_beer_draft()
            },
            "brewery 42",
        ),
        (
            BeerDraft {
                category: Some(RelationRef::to(42)),
                ..test_beer_draft()
            },
            "category 42",
        ),
        (
            BeerDraft {
                style: Some(RelationRef::to(42)),
                ..test_beer_draft()
            },
            "style 42",
        ),
    ] {
        let err = state.beers.create(&draft).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == expected), "{:?}", err);
    }
    assert_eq!(catalog.beer_count().unwrap(), 0);
}

#[tokio::test]
async fn create_without_reference_object_is_a_bad_request() {
    let catalog = seeded_catalog();
    let state = AppState::new(catalog.clone());

    let draft = BeerDraft {
        category: None,
        ..test_beer_draft()
    };
    let err = state.beers.create(&draft).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref m) if m == "beer must reference a category"));

    let draft = BeerDraft {
        brewery: Some(RelationRef { id: None }),
        ..test_beer_draft()
    };
    assert!(matches!(
        state.beers.create(&draft).await,
        Err(AppError::BadRequest(_))
    ));
    assert_eq!(catalog.beer_count().unwrap(), 0);
}

#[tokio::test]
async fn field_validation_runs_before_reference_checks() {
    let catalog = seeded_catalog();
    let state = AppState::new(catalog.clone());

    let draft = BeerDraft {
        abv: Some(140.0),
        brewery: Some(RelationRef::to(42)),
        ..test_beer_draft()
    };
    let err = state.beers.create(&draft).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(ref m) if m == "abv must be at most 100"));
    assert_eq!(catalog.beer_count().unwrap(), 0);
}

#[tokio::test]
async fn unknown_ids_are_not_found_for_every_operation() {
    let state = AppState::new(seeded_catalog());

    assert!(matches!(state.beers.get(7).await, Err(AppError::NotFound(_))));
    assert!(matches!(
        state.beers.replace(7, &test_beer_draft()).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        state.beers.merge_partial(7, &BeerDraft::default()).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(state.beers.delete(7).await, Err(AppError::NotFound(_))));
    assert!(matches!(state.breweries.get(7).await, Err(AppError::NotFound(_))));
    assert!(matches!(state.categories.get(7).await, Err(AppError::NotFound(_))));
    assert!(matches!(state.styles.get(7).await, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn merge_with_name_only_changes_the_name() {
    let state = AppState::new(seeded_catalog());
    let original = state.beers.create(&test_beer_draft()).await.unwrap();

    let patch = BeerDraft {
        name: Some("X".into()),
        ..BeerDraft::default()
    };
    let merged = state.beers.merge_partial(original.id, &patch).await.unwrap();

    assert_eq!(merged.name, "X");
    assert!(merged.last_mod >= original.last_mod);
    let mut expected = original.clone();
    expected.name = "X".into();
    expected.last_mod = merged.last_mod;
    assert_eq!(merged, expected);
    assert_eq!(state.beers.get(original.id).await.unwrap(), merged);
}

#[tokio::test]
async fn merge_revalidates_supplied_relations_only() {
    let state = AppState::new(seeded_catalog());
    let original = state.beers.create(&test_beer_draft()).await.unwrap();

    let patch = BeerDraft {
        brewery: Some(RelationRef::to(2)),
        ..BeerDraft::default()
    };
    let merged = state.beers.merge_partial(original.id, &patch).await.unwrap();
    assert_eq!(merged.brewery.name, "Other Brewery");
    assert_eq!(merged.category, original.category);
    assert_eq!(merged.style, original.style);

    let missing = BeerDraft {
        style: Some(RelationRef::to(77)),
        ..BeerDraft::default()
    };
    let err = state.beers.merge_partial(original.id, &missing).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref m) if m == "style 77"));

    let without_id = BeerDraft {
        category: Some(RelationRef { id: None }),
        ..BeerDraft::default()
    };
    assert!(matches!(
        state.beers.merge_partial(original.id, &without_id).await,
        Err(AppError::BadRequest(_))
    ));

    assert_eq!(state.beers.get(original.id).await.unwrap().style.id, 1);
}

#[tokio::test]
async fn merge_rejects_out_of_range_values() {
    let state = AppState::new(seeded_catalog());
    let original = state.beers.create(&test_beer_draft()).await.unwrap();

    let patch = BeerDraft {
        srm: Some(-2.0),
        ..BeerDraft::default()
    };
    assert!(matches!(
        state.beers.merge_partial(original.id, &patch).await,
        Err(AppError::Validation(_))
    ));
    assert_eq!(state.beers.get(original.id).await.unwrap().srm, 15.0);
}

#[tokio::test]
async fn replace_overwrites_every_mutable_field() {
    let state = AppState::new(seeded_catalog());
    let original = state
        .beers
        .create(&BeerDraft {
            add_user: Some(4),
            ..test_beer_draft()
        })
        .await
        .unwrap();

    let full = BeerDraft {
        name: Some("Updated Beer".into()),
        brewery: Some(RelationRef::to(2)),
        category: Some(RelationRef::to(2)),
        style: Some(RelationRef::to(2)),
        abv: Some(4.8),
        ibu: Some(40.0),
        srm: Some(3.5),
        upc: Some(0),
        filepath: None,
        descript: Some("Crisp".into()),
        add_user: Some(9),
    };
    let replaced = state.beers.replace(original.id, &full).await.unwrap();

    assert_eq!(replaced.id, original.id);
    assert_eq!(replaced.name, "Updated Beer");
    assert_eq!(replaced.brewery.id, 2);
    assert_eq!(replaced.category.cat_name, "German Lager");
    assert_eq!(replaced.style.style_name, "German Pilsener");
    assert_eq!(replaced.abv, 4.8);
    assert_eq!(replaced.ibu, 40.0);
    assert_eq!(replaced.srm, 3.5);
    assert_eq!(replaced.upc, 0);
    assert_eq!(replaced.filepath, "");
    assert_eq!(replaced.descript, "Crisp");
    assert_eq!(replaced.add_user, 4);
}

#[tokio::test]
async fn replace_checks_references_even_when_unchanged() {
    let state = AppState::new(seeded_catalog());
    let original = state.beers.create(&test_beer_draft()).await.unwrap();

    let draft = BeerDraft {
        style: Some(RelationRef::to(500)),
        ..test_beer_draft()
    };
    assert!(matches!(
        state.beers.replace(original.id, &draft).await,
        Err(AppError::NotFound(ref m)) if m == "style 500"
    ));

    let draft = BeerDraft {
        brewery: None,
        ..test_beer_draft()
    };
    assert!(matches!(
        state.beers.replace(original.id, &draft).await,
        Err(AppError::BadRequest(_))
    ));
    assert_eq!(state.beers.get(original.id).await.unwrap(), original);
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let catalog = seeded_catalog();
    let state = AppState::new(catalog.clone());
    let beer = state.beers.create(&test_beer_draft()).await.unwrap();

    state.beers.delete(beer.id).await.unwrap();

    assert!(matches!(state.beers.get(beer.id).await, Err(AppError::NotFound(_))));
    assert_eq!(catalog.beer_count().unwrap(), 0);
}

#[tokio::test]
async fn list_filters_by_name_and_relations() {
    let state = AppState::new(seeded_catalog());
    state.beers.create(&test_beer_draft()).await.unwrap();
    state
        .beers
        .create(&BeerDraft {
            name: Some("Pilsner Urquell".into()),
            brewery: Some(RelationRef::to(2)),
            category: Some(RelationRef::to(2)),
            style: Some(RelationRef::to(2)),
            ..test_beer_draft()
        })
        .await
        .unwrap();

    assert_eq!(state.beers.list(&BeerFilter::default()).await.unwrap().len(), 2);

    let by_name = state
        .beers
        .list(&BeerFilter {
            name: Some("urquell".into()),
            ..BeerFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].brewery.id, 2);

    let by_brewery = state
        .beers
        .list(&BeerFilter {
            brewery_id: Some(1),
            ..BeerFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(by_brewery.len(), 1);
    assert_eq!(by_brewery[0].name, "Test Beer");
}

#[tokio::test]
async fn style_category_link_is_not_enforced() {
    let state = AppState::new(seeded_catalog());

    let orphans = state
        .styles
        .list(&StyleFilter {
            category_id: Some(99),
            ..StyleFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(orphans.len(), 1);

    let beer = state
        .beers
        .create(&BeerDraft {
            style: Some(RelationRef::to(3)),
            ..test_beer_draft()
        })
        .await
        .unwrap();
    assert_eq!(beer.style.cat_id, 99);
    assert_eq!(beer.category.id, 1);
}
