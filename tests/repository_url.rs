//! PostgreSQL repository tests.
//!
//! Run with `DATABASE_URL` set and `cargo test -- --ignored`.

use snaplink::domain::entities::NewUrlMapping;
use snaplink::domain::repositories::UrlRepository;
use snaplink::infrastructure::persistence::PgUrlRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn repo(pool: PgPool) -> PgUrlRepository {
    PgUrlRepository::new(Arc::new(pool))
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_insert_and_find(pool: PgPool) {
    let repo = repo(pool);

    let inserted = repo
        .insert_if_absent(NewUrlMapping::new("abc123", "https://example.com/"))
        .await
        .unwrap()
        .expect("first insert should win");

    assert_eq!(inserted.short_code, "abc123");
    assert_eq!(inserted.long_url, "https://example.com/");

    let found = repo.find_by_code("abc123").await.unwrap().unwrap();
    assert_eq!(found, inserted);
    assert_eq!(
        repo.find_long_url("abc123").await.unwrap().as_deref(),
        Some("https://example.com/")
    );
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_insert_conflict_keeps_existing(pool: PgPool) {
    let repo = repo(pool);

    repo.insert_if_absent(NewUrlMapping::new("abc123", "https://first.example/"))
        .await
        .unwrap();
    let second = repo
        .insert_if_absent(NewUrlMapping::new("abc123", "https://second.example/"))
        .await
        .unwrap();

    assert!(second.is_none());
    assert_eq!(
        repo.find_long_url("abc123").await.unwrap().as_deref(),
        Some("https://first.example/")
    );
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_exists_is_case_sensitive(pool: PgPool) {
    let repo = repo(pool);

    repo.insert_if_absent(NewUrlMapping::new("AbC", "https://example.com/"))
        .await
        .unwrap();

    assert!(repo.exists("AbC").await.unwrap());
    assert!(!repo.exists("abc").await.unwrap());
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_find_missing(pool: PgPool) {
    let repo = repo(pool);

    assert!(repo.find_long_url("missing").await.unwrap().is_none());
    assert!(repo.find_by_code("missing").await.unwrap().is_none());
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_concurrent_inserts_single_winner(pool: PgPool) {
    let repo = Arc::new(repo(pool));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let repo = repo.clone();
            tokio::spawn(async move {
                repo.insert_if_absent(NewUrlMapping::new(
                    "race01",
                    format!("https://example.com/{i}"),
                ))
                .await
                .unwrap()
            })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap().is_some() {
            winners += 1;
        }
    }

    assert_eq!(winners, 1);
    assert_eq!(repo.count().await.unwrap(), 1);
}
