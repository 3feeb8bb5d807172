//! Integration tests against the real catalog.
//!
//! These tests need an API key and are ignored by default. To run them,
//! create a `.env` file in the catalog-lib directory with:
//!
//! ```env
//! OMDB_API_KEY=your-key
//! ```
//!
//! Then run: `cargo test -p catalog-lib -- --ignored`

use std::env;

use catalog_lib::CatalogClient;
use catalog_lib::model::ItemKind;

fn live_client() -> Option<CatalogClient> {
    let _ = dotenvy::dotenv();
    let api_key = env::var("OMDB_API_KEY").ok()?;
    CatalogClient::builder().api_key(api_key).build().ok()
}

#[tokio::test]
#[ignore = "requires OMDB_API_KEY in .env file"]
async fn test_search_and_details() {
    let client = live_client().expect("Missing OMDB_API_KEY. See module docs.");

    let page = client
        .search("Batman")
        .kind(ItemKind::Movie)
        .await
        .expect("search failed");
    assert!(!page.is_empty());
    assert!(page.total_count() >= page.len());

    let first = &page.items()[0];
    let details = client.details(first.id.clone()).await.expect("details failed");
    assert_eq!(details.id, first.id);

    assert_eq!(client.cache_stats().await.count, 2);
}

#[tokio::test]
#[ignore = "requires OMDB_API_KEY in .env file"]
async fn test_unknown_title_is_not_found() {
    let client = live_client().expect("Missing OMDB_API_KEY. See module docs.");

    let err = client.search("qqqqzzzzxxxx").await.unwrap_err();
    assert!(err.is_not_found(), "unexpected error: {}", err);
}
