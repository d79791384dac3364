use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::NaiveDate;
use sea_orm::{EntityTrait, PaginatorTrait};

use firstaid_stock::{
    db::{establish_connection, run_migrations, DbPool},
    entities::first_aid_check,
    errors::ServiceError,
    reconcile::ReconciledItem,
    repositories::check_repository::{CheckDraft, CheckRepository},
};

async fn setup(db_name: &str) -> (Arc<DbPool>, CheckRepository) {
    let url = format!("sqlite:file:{}?mode=memory&cache=shared", db_name);
    let db_pool = Arc::new(
        establish_connection(&url)
            .await
            .expect("Failed to create DB pool"),
    );
    run_migrations(db_pool.as_ref())
        .await
        .expect("Failed to run migrations");
    let repository = CheckRepository::new(db_pool.clone());
    (db_pool, repository)
}

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("bad test date")
}

fn item(name: &str, standard: i32, current: i32) -> ReconciledItem {
    ReconciledItem {
        item_name: name.to_string(),
        standard_quantity: standard,
        current_quantity: current,
        expiry_date: None,
        item_notes: String::new(),
    }
}

#[tokio::test]
async fn test_failed_item_insert_rolls_back_check_update() {
    let (_db, repository) = setup("atomic_update").await;

    let seeded = vec![
        item("Assorted Sterile Plasters", 20, 18),
        item("Safety Pins", 6, 6),
    ];
    let check_id = repository
        .save(
            &CheckDraft {
                id: None,
                box_name: "Cafe".to_string(),
                check_date: date("2025-05-01"),
                general_notes: "initial".to_string(),
            },
            &seeded,
        )
        .await
        .expect("Failed to seed check");

    // The second row violates the non-negative quantity constraint, so the
    // item-insert phase of the save fails after the check row update and the
    // old-row delete have already executed inside the transaction.
    let poisoned = vec![item("Safety Pins", 6, 4), item("Assorted Sterile Plasters", 20, -1)];
    let result = repository
        .save(
            &CheckDraft {
                id: Some(check_id),
                box_name: "Upstairs".to_string(),
                check_date: date("2025-06-01"),
                general_notes: "changed".to_string(),
            },
            &poisoned,
        )
        .await;
    assert_matches!(result, Err(ServiceError::SaveFailed(_)));

    // Everything rolled back to the pre-call state.
    let (check, items) = repository.load(check_id).await.expect("Failed to load");
    assert_eq!(check.box_name, "Cafe");
    assert_eq!(check.check_date, "2025-05-01");
    assert_eq!(check.general_notes.as_deref(), Some("initial"));

    assert_eq!(items.len(), 2);
    let plasters = &items[0];
    assert_eq!(plasters.item_name, "Assorted Sterile Plasters");
    assert_eq!(plasters.current_quantity, 18);
    let pins = &items[1];
    assert_eq!(pins.item_name, "Safety Pins");
    assert_eq!(pins.current_quantity, 6);
}

#[tokio::test]
async fn test_failed_item_insert_rolls_back_new_check() {
    let (db, repository) = setup("atomic_insert").await;

    let result = repository
        .save(
            &CheckDraft {
                id: None,
                box_name: "Cafe".to_string(),
                check_date: date("2025-05-01"),
                general_notes: String::new(),
            },
            &[item("Safety Pins", 6, -3)],
        )
        .await;
    assert_matches!(result, Err(ServiceError::SaveFailed(_)));

    // No orphaned check row survives the rollback.
    let check_count = first_aid_check::Entity::find()
        .count(db.as_ref())
        .await
        .expect("Failed to count checks");
    assert_eq!(check_count, 0);
}

#[tokio::test]
async fn test_updating_a_missing_check_reports_not_found() {
    let (_db, repository) = setup("atomic_missing").await;

    let result = repository
        .save(
            &CheckDraft {
                id: Some(42),
                box_name: "Cafe".to_string(),
                check_date: date("2025-05-01"),
                general_notes: String::new(),
            },
            &[item("Safety Pins", 6, 6)],
        )
        .await;
    assert_matches!(result, Err(ServiceError::NotFound(42)));
}

#[tokio::test]
async fn test_empty_item_set_is_permitted() {
    let (_db, repository) = setup("atomic_empty").await;

    let check_id = repository
        .save(
            &CheckDraft {
                id: None,
                box_name: "Back Kitchen".to_string(),
                check_date: date("2025-05-01"),
                general_notes: String::new(),
            },
            &[],
        )
        .await
        .expect("Failed to save empty check");

    let (check, items) = repository.load(check_id).await.expect("Failed to load");
    assert_eq!(check.box_name, "Back Kitchen");
    assert!(items.is_empty());
}
