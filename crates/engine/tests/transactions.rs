use chrono::Utc;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, EntityTrait};

use engine::{
    Engine, EngineError, TransactionDetails, TransactionDraft, TransactionPatch, UserRef, users,
};
use migration::MigratorTrait;
use uuid::Uuid;

async fn engine_with_db() -> (Engine, DatabaseConnection, String) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let alice = users::new_user("alice", "password", Some("Alice".to_string()), None, 4)
        .unwrap()
        .insert(&db)
        .await
        .unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db, alice.id)
}

fn draft(user: &str, name: &str, kind: &str, status: &str) -> TransactionDraft {
    TransactionDraft {
        user: Some(user.to_string()),
        name: Some(name.to_string()),
        kind: Some(kind.to_string()),
        status: Some(status.to_string()),
        create_date: Some(Utc::now()),
        details: TransactionDetails::default(),
    }
}

#[tokio::test]
async fn create_assigns_fresh_ids_and_dates() {
    let (engine, _db, alice) = engine_with_db().await;

    let first = engine
        .create_transaction(draft(&alice, "123 Main St Listing", "sale", "active"))
        .await
        .unwrap();
    let second = engine
        .create_transaction(draft(&alice, "9 Elm Rd", "lease", "pending"))
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(first.name, "123 Main St Listing");
    assert_eq!(first.kind, "sale");
    assert_eq!(first.status, "active");
    assert_eq!(first.user, Some(UserRef::Id(alice)));
    assert!(first.create_date.is_some());
    assert!(first.update_date.is_some());
}

#[tokio::test]
async fn update_date_starts_at_the_creation_time() {
    let (engine, _db, alice) = engine_with_db().await;

    let stamped = engine
        .create_transaction(draft(&alice, "Lot 1", "sale", "active"))
        .await
        .unwrap();
    assert_eq!(stamped.create_date, stamped.update_date);

    let mut unstamped = draft(&alice, "Lot 2", "sale", "active");
    unstamped.create_date = None;
    let unstamped = engine.create_transaction(unstamped).await.unwrap();
    assert!(unstamped.create_date.is_some());
    assert_eq!(unstamped.create_date, unstamped.update_date);

    let fetched = engine.transaction(unstamped.id).await.unwrap();
    assert_eq!(fetched.create_date, fetched.update_date);
}

#[tokio::test]
async fn invalid_create_persists_nothing() {
    let (engine, _db, alice) = engine_with_db().await;

    let mut bad = draft(&alice, "x", "sale", "active");
    bad.status = None;
    let err = engine.create_transaction(bad).await.unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));

    assert!(engine.list_transactions().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_and_get_expand_the_owner() {
    let (engine, _db, alice) = engine_with_db().await;
    for i in 0..3 {
        engine
            .create_transaction(draft(&alice, &format!("Lot {i}"), "sale", "active"))
            .await
            .unwrap();
    }

    let all = engine.list_transactions().await.unwrap();
    assert_eq!(all.len(), 3);
    for tx in &all {
        match &tx.user {
            Some(UserRef::Expanded(user)) => assert_eq!(user.username, "alice"),
            other => panic!("expected expanded owner, got {other:?}"),
        }
    }

    let one = engine.transaction(all[1].id).await.unwrap();
    assert_eq!(one.id, all[1].id);
}

#[tokio::test]
async fn dangling_owner_stays_a_raw_id() {
    let (engine, db, alice) = engine_with_db().await;
    let tx = engine
        .create_transaction(draft(&alice, "Lot 1", "sale", "active"))
        .await
        .unwrap();

    users::Entity::delete_by_id(alice.clone())
        .exec(&db)
        .await
        .unwrap();

    let fetched = engine.transaction(tx.id).await.unwrap();
    assert_eq!(fetched.user, Some(UserRef::Id(alice)));
}

#[tokio::test]
async fn details_are_persisted() {
    let (engine, _db, alice) = engine_with_db().await;
    let mut d = draft(&alice, "Lot 1", "sale", "active");
    d.details = TransactionDetails {
        purchase_price: Some(410_000.0),
        address_line1: Some("1 Harbor Way".to_string()),
        tax_id: Some("TX-991".to_string()),
        ..TransactionDetails::default()
    };

    let tx = engine.create_transaction(d).await.unwrap();
    let fetched = engine.transaction(tx.id).await.unwrap();
    assert_eq!(fetched.details.purchase_price, Some(410_000.0));
    assert_eq!(fetched.details.address_line1.as_deref(), Some("1 Harbor Way"));
    assert_eq!(fetched.details.tax_id.as_deref(), Some("TX-991"));
}

#[tokio::test]
async fn get_unknown_id_is_not_found() {
    let (engine, _db, _alice) = engine_with_db().await;
    let id = Uuid::new_v4();
    let err = engine.transaction(id).await.unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound(id.to_string()));
}

#[tokio::test]
async fn update_changes_only_name_and_type() {
    let (engine, _db, alice) = engine_with_db().await;
    let tx = engine
        .create_transaction(draft(&alice, "Lot 1", "sale", "active"))
        .await
        .unwrap();

    engine
        .update_transaction(
            tx.id,
            TransactionPatch {
                name: Some("Lot 1 (reduced)".to_string()),
                kind: Some("auction".to_string()),
            },
        )
        .await
        .unwrap();

    let fetched = engine.transaction(tx.id).await.unwrap();
    assert_eq!(fetched.name, "Lot 1 (reduced)");
    assert_eq!(fetched.kind, "auction");
    assert_eq!(fetched.status, "active");
    assert_eq!(fetched.create_date, tx.create_date);
    assert_eq!(fetched.update_date, tx.update_date);
}

#[tokio::test]
async fn partial_update_keeps_the_other_field() {
    let (engine, _db, alice) = engine_with_db().await;
    let tx = engine
        .create_transaction(draft(&alice, "Lot 1", "sale", "active"))
        .await
        .unwrap();

    engine
        .update_transaction(
            tx.id,
            TransactionPatch {
                name: None,
                kind: Some("lease".to_string()),
            },
        )
        .await
        .unwrap();

    let fetched = engine.transaction(tx.id).await.unwrap();
    assert_eq!(fetched.name, "Lot 1");
    assert_eq!(fetched.kind, "lease");
}

#[tokio::test]
async fn update_rejects_blank_values() {
    let (engine, _db, alice) = engine_with_db().await;
    let tx = engine
        .create_transaction(draft(&alice, "Lot 1", "sale", "active"))
        .await
        .unwrap();

    let err = engine
        .update_transaction(
            tx.id,
            TransactionPatch {
                name: Some(" ".to_string()),
                kind: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
    assert_eq!(engine.transaction(tx.id).await.unwrap().name, "Lot 1");
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let (engine, _db, _alice) = engine_with_db().await;
    let id = Uuid::new_v4();
    let err = engine
        .update_transaction(
            id,
            TransactionPatch {
                name: Some("n".to_string()),
                kind: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound(id.to_string()));
}

#[tokio::test]
async fn delete_removes_the_record() {
    let (engine, _db, alice) = engine_with_db().await;
    let tx = engine
        .create_transaction(draft(&alice, "Lot 1", "sale", "active"))
        .await
        .unwrap();

    engine.delete_transaction(tx.id).await.unwrap();

    assert!(matches!(
        engine.transaction(tx.id).await,
        Err(EngineError::KeyNotFound(_))
    ));
    assert!(matches!(
        engine.delete_transaction(tx.id).await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn builder_without_store_fails() {
    assert!(matches!(
        Engine::builder().build().await,
        Err(EngineError::MissingStore)
    ));
}
