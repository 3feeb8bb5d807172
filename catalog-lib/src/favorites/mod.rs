//! Persisted favorites.
//!
//! A small ordered set of [`Item`]s keyed by id. Every change rewrites the
//! whole list under [`FAVORITES_KEY`]; the list is small and there is a
//! single writer, so no finer-grained storage is needed.

mod backend;
mod sqlite;

pub use backend::*;
pub use sqlite::*;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::model::Item;

/// Storage key the favorites list is kept under.
pub const FAVORITES_KEY: &str = "frenzy_favorites";

/// The user's saved items.
///
/// Storage problems never surface to callers: an unreadable or corrupt
/// list loads as empty, and a failed write is logged while the in-memory
/// set keeps the change for the rest of the session.
pub struct Favorites {
    backend: Arc<dyn StoreBackend>,
    state: Mutex<FavoritesState>,
}

#[derive(Default)]
struct FavoritesState {
    items: Vec<Item>,
    /// Id and position of the most recent removal. Toggling that id back on
    /// puts it where it was, so a toggle undone by a toggle leaves the
    /// order untouched.
    last_removed: Option<(String, usize)>,
}

impl FavoritesState {
    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|fav| fav.id == id)
    }

    fn append(&mut self, item: Item) {
        self.last_removed = None;
        self.items.push(item);
    }

    /// Puts `item` back where it was if it is the one just removed,
    /// otherwise appends it.
    fn reinsert(&mut self, item: Item) {
        let index = match self.last_removed.take() {
            Some((id, index)) if id == item.id => index.min(self.items.len()),
            _ => self.items.len(),
        };
        self.items.insert(index, item);
    }

    fn remove_at(&mut self, index: usize) {
        let removed = self.items.remove(index);
        self.last_removed = Some((removed.id, index));
    }
}

impl Favorites {
    /// Loads the saved list from `backend`.
    pub async fn load(backend: impl StoreBackend + 'static) -> Self {
        Self::load_shared(Arc::new(backend)).await
    }

    /// Loads the saved list from a shared backend.
    pub async fn load_shared(backend: Arc<dyn StoreBackend>) -> Self {
        let items = match read_items(backend.as_ref()).await {
            Ok(items) => items,
            Err(e) => {
                log::warn!("could not load favorites, starting empty: {}", e);
                Vec::new()
            }
        };

        Self {
            backend,
            state: Mutex::new(FavoritesState {
                items,
                last_removed: None,
            }),
        }
    }

    /// Adds `item` unless an item with the same id is already saved.
    ///
    /// Returns `true` if the item was added.
    pub async fn add(&self, item: Item) -> bool {
        let mut state = self.state.lock().await;
        if state.position(&item.id).is_some() {
            return false;
        }
        state.append(item);
        self.persist(&state.items).await;
        true
    }

    /// Removes the item with `id`, if saved.
    ///
    /// Returns `true` if something was removed.
    pub async fn remove(&self, id: &str) -> bool {
        let mut state = self.state.lock().await;
        let Some(index) = state.position(id) else {
            return false;
        };
        state.remove_at(index);
        self.persist(&state.items).await;
        true
    }

    /// Removes `item` if saved, adds it otherwise.
    ///
    /// Returns `true` if the item is saved afterwards.
    pub async fn toggle(&self, item: Item) -> bool {
        let mut state = self.state.lock().await;
        let saved = match state.position(&item.id) {
            Some(index) => {
                state.remove_at(index);
                false
            }
            None => {
                state.reinsert(item);
                true
            }
        };
        self.persist(&state.items).await;
        saved
    }

    /// Returns `true` if an item with `id` is saved.
    pub async fn contains(&self, id: &str) -> bool {
        self.state.lock().await.position(id).is_some()
    }

    /// Returns the saved items in list order.
    pub async fn items(&self) -> Vec<Item> {
        self.state.lock().await.items.clone()
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.items.is_empty()
    }

    async fn persist(&self, items: &[Item]) {
        if let Err(e) = write_items(self.backend.as_ref(), items).await {
            log::error!("could not save favorites: {}", e);
        }
    }
}

async fn read_items(backend: &dyn StoreBackend) -> Result<Vec<Item>, StoreError> {
    let Some(bytes) = backend.read(FAVORITES_KEY).await? else {
        return Ok(Vec::new());
    };
    let mut items: Vec<Item> =
        bincode::deserialize(&bytes).map_err(StoreError::Deserialization)?;

    let mut seen = std::collections::HashSet::new();
    items.retain(|item| seen.insert(item.id.clone()));
    Ok(items)
}

async fn write_items(backend: &dyn StoreBackend, items: &[Item]) -> Result<(), StoreError> {
    let bytes = bincode::serialize(items).map_err(StoreError::Serialization)?;
    backend.write(FAVORITES_KEY, bytes).await
}
