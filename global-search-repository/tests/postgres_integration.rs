//! Integration tests for the PostgreSQL implementations.
//!
//! These tests require a real PostgreSQL database, so they are ignored by
//! default. Run with:
//! `DATABASE_URL=postgres://... cargo test --test postgres_integration -- --ignored`

use chrono::Utc;
use global_search_repository::{
    EntityMetadata, EntityRepository, PgEntityRepository, PostgresIndexingStrategy,
    SearchIndexingStrategy,
};
use global_search_shared::{IndexItemType, SearchIndexItem};

async fn create_product_table(pool: &sqlx::PgPool) {
    sqlx::query(
        "CREATE TABLE product (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            slug TEXT,
            description TEXT,
            enabled BOOLEAN NOT NULL DEFAULT true,
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )",
    )
    .execute(pool)
    .await
    .unwrap();

    for i in 0..5 {
        sqlx::query("INSERT INTO product (name, slug) VALUES ($1, $2)")
            .bind(format!("Product {}", i))
            .bind(format!("product-{}", i))
            .execute(pool)
            .await
            .unwrap();
    }
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_count_and_pagination(pool: sqlx::PgPool) {
    create_product_table(&pool).await;

    let repository =
        PgEntityRepository::new(pool, EntityMetadata::new("Product", "product")).unwrap();

    assert_eq!(repository.count().await.unwrap(), 5);

    let page = repository.find_page(1, 2).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].entity_name, "Product");
    assert_eq!(page[0].string_field("name"), Some("Product 1"));
    assert_eq!(page[1].string_field("name"), Some("Product 2"));
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_find_by_id(pool: sqlx::PgPool) {
    create_product_table(&pool).await;

    let repository =
        PgEntityRepository::new(pool, EntityMetadata::new("Product", "product")).unwrap();

    let found = repository.find_by_id("1").await.unwrap();
    assert!(found.is_some());
    assert_eq!(found.unwrap().id, "1");

    let missing = repository.find_by_id("9999").await.unwrap();
    assert!(missing.is_none());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_persist_upsert_and_remove(pool: sqlx::PgPool) {
    let strategy = PostgresIndexingStrategy::new(pool.clone());
    strategy.ensure_table_exists().await.unwrap();

    let mut item = SearchIndexItem::for_entity(
        "Product",
        "1",
        "First title",
        IndexItemType::Entity,
        Utc::now(),
    );
    strategy.persist(std::slice::from_ref(&item)).await.unwrap();

    // Re-persisting the same logical key updates in place.
    item.title = "Updated title".to_string();
    strategy.persist(std::slice::from_ref(&item)).await.unwrap();

    let (count, title): (i64, String) = sqlx::query_as(
        "SELECT COUNT(*) OVER (), title FROM search_index_items WHERE document_id = $1",
    )
    .bind("entity_Product_1")
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count, 1);
    assert_eq!(title, "Updated title");

    strategy.remove("entity_Product_1").await.unwrap();
    // Removing an absent key is not an error.
    strategy.remove("entity_Product_1").await.unwrap();

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM search_index_items")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}
