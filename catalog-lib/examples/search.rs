//! Searches the catalog from the command line.
//!
//! ```sh
//! OMDB_API_KEY=your-key cargo run -p catalog-lib --example search -- Batman
//! ```
//!
//! Prints the first two pages, the details of the first hit, and toggles it
//! in a favorites database next to the working directory.

use std::env;
use std::io;

use catalog_lib::CatalogClient;
use catalog_lib::favorites::Favorites;
use catalog_lib::favorites::SqliteBackend;
use catalog_lib::model::SearchFilters;
use catalog_lib::paging::SearchSession;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    WriteLogger::init(LevelFilter::Debug, Config::default(), io::stderr())?;
    let _ = dotenvy::dotenv();

    let api_key = env::var("OMDB_API_KEY")?;
    let query = env::args().skip(1).collect::<Vec<_>>().join(" ");

    let client = CatalogClient::builder().api_key(api_key).build()?;
    let sweeper = client.spawn_sweeper();

    println!("suggestions: {:?}", client.suggest(query.clone()).limit(5).await);

    let session = SearchSession::new(client.clone());
    session.submit(&query, SearchFilters::new()).await;
    session.load_more().await;
    for item in session.items().await {
        println!("{}  {} ({})", item.id, item.title, item.year);
    }

    let Some(first) = session.items().await.into_iter().next() else {
        println!("nothing found for {:?}", query);
        return Ok(());
    };

    let details = client.details(first.id.clone()).await?;
    println!("{}: {}", details.title, details.plot);

    let favorites = Favorites::load(SqliteBackend::open("favorites.db").await?).await;
    let now_favorite = favorites.toggle(first).await;
    println!("favorite: {} ({} saved)", now_favorite, favorites.len().await);

    println!("cache: {:?}", client.cache_stats().await);
    sweeper.shutdown().await;
    Ok(())
}
