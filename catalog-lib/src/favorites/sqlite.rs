//! SQLite store backend.

use std::path::Path;

use async_sqlite::Client;
use async_sqlite::ClientBuilder;
use async_sqlite::JournalMode;
use async_sqlite::rusqlite;
use async_trait::async_trait;

use super::StoreBackend;
use crate::error::StoreError;

/// SQLite-backed key-value storage.
///
/// # Example
///
/// ```ignore
/// use catalog_lib::favorites::{Favorites, SqliteBackend};
///
/// let backend = SqliteBackend::open("favorites.db").await?;
/// let favorites = Favorites::load(backend).await;
/// ```
pub struct SqliteBackend {
    client: Client,
}

impl SqliteBackend {
    /// Opens (or creates) the database at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let client = ClientBuilder::new()
            .path(path)
            .journal_mode(JournalMode::Wal)
            .open()
            .await?;

        Self::init_schema(&client).await?;
        Ok(Self { client })
    }

    /// Opens an in-memory database. Data is lost when the backend is dropped.
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        let client = ClientBuilder::new().path(":memory:").open().await?;

        Self::init_schema(&client).await?;
        Ok(Self { client })
    }

    async fn init_schema(client: &Client) -> Result<(), StoreError> {
        client
            .conn(|conn| {
                conn.execute(
                    "CREATE TABLE IF NOT EXISTS store (
                        key TEXT PRIMARY KEY,
                        value BLOB NOT NULL
                    )",
                    [],
                )
            })
            .await?;
        Ok(())
    }
}

#[async_trait]
impl StoreBackend for SqliteBackend {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let key = key.to_string();
        let value = self
            .client
            .conn(move |conn| {
                let mut stmt = conn.prepare("SELECT value FROM store WHERE key = ?")?;
                let mut rows = stmt.query([&key])?;
                match rows.next()? {
                    Some(row) => Ok(Some(row.get::<_, Vec<u8>>(0)?)),
                    None => Ok(None),
                }
            })
            .await?;
        Ok(value)
    }

    async fn write(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        let key = key.to_string();
        self.client
            .conn(move |conn| {
                conn.execute(
                    "INSERT INTO store (key, value) VALUES (?, ?)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                    rusqlite::params![&key, &value],
                )
            })
            .await?;
        Ok(())
    }
}
