//! PostgreSQL-backed record store tests
//!
//! Run against a scratch database:
//! `DATABASE_URL=postgres://... cargo test -p dataset-service -- --ignored`

use dataset_service::db::{PgRecordStore, RecordStore, RepoError};
use dataset_service::models::FullDataset;
use db_pool::{create_pool, DbConfig};
use serial_test::serial;
use sqlx::{Executor, PgPool};

async fn fresh_pool() -> PgPool {
    let config = DbConfig::from_env("dataset-service-tests").expect("DATABASE_URL must be set");
    let pool = create_pool(config).await.expect("connect postgres");

    pool.execute(include_str!("../sql/pokemon.sql"))
        .await
        .expect("create pokemon table");
    pool.execute("TRUNCATE pokemon").await.expect("truncate");
    pool
}

fn record(id: i64, name: &str, generation: i64) -> FullDataset {
    FullDataset {
        id,
        name: name.to_string(),
        type_1: "Water".to_string(),
        type_2: None,
        total: 314,
        hp: 44,
        attack: 48,
        defense: 65,
        sp_atk: 50,
        sp_def: 64,
        speed: 43,
        generation,
        legendary: false,
    }
}

#[tokio::test]
#[serial]
#[ignore = "Requires PostgreSQL database"]
async fn insert_then_page_and_count() {
    let store = PgRecordStore::new(fresh_pool().await);

    for (id, name) in [(7, "Squirtle"), (8, "Wartortle"), (9, "Blastoise")] {
        store.insert_record(&record(id, name, 1)).await.unwrap();
    }

    assert_eq!(store.count_records().await.unwrap(), 3);

    let page = store.fetch_page(2, 0).await.unwrap();
    assert_eq!(page.len(), 2);
    assert!(page.iter().all(|row| row.type_2.is_none()));

    let beyond = store.fetch_page(10, 3).await.unwrap();
    assert!(beyond.is_empty());
}

#[tokio::test]
#[serial]
#[ignore = "Requires PostgreSQL database"]
async fn duplicate_primary_key_is_classified() {
    let store = PgRecordStore::new(fresh_pool().await);

    store.insert_record(&record(7, "Squirtle", 1)).await.unwrap();
    let err = store
        .insert_record(&record(7, "Squirtle", 1))
        .await
        .unwrap_err();

    assert!(matches!(err, RepoError::Duplicate(_)), "{:?}", err);
}

#[tokio::test]
#[serial]
#[ignore = "Requires PostgreSQL database"]
async fn out_of_range_integer_is_invalid_data() {
    let store = PgRecordStore::new(fresh_pool().await);

    let mut oversized = record(7, "Squirtle", 1);
    oversized.hp = 5_000_000_000;
    let err = store.insert_record(&oversized).await.unwrap_err();

    assert!(matches!(err, RepoError::InvalidData(_)), "{:?}", err);
    assert_eq!(store.count_records().await.unwrap(), 0);
}

#[tokio::test]
#[serial]
#[ignore = "Requires PostgreSQL database"]
async fn page_decodes_bigint_generation_column() {
    let pool = fresh_pool().await;
    let store = PgRecordStore::new(pool.clone());
    store.insert_record(&record(7, "Squirtle", 1)).await.unwrap();

    pool.execute("ALTER TABLE pokemon ALTER COLUMN generation TYPE BIGINT")
        .await
        .expect("widen generation");
    let page = store.fetch_page(1, 0).await;
    pool.execute("ALTER TABLE pokemon ALTER COLUMN generation TYPE INTEGER")
        .await
        .expect("restore generation");

    let page = page.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].generation, 1);
}

#[tokio::test]
#[serial]
#[ignore = "Requires PostgreSQL database"]
async fn ping_succeeds_on_live_pool() {
    let store = PgRecordStore::new(fresh_pool().await);
    store.ping().await.unwrap();
}
