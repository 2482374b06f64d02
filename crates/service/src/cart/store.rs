use std::collections::HashSet;
use std::sync::Arc;

use models::{LineItem, Product};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use super::command::CartCommand;
use crate::errors::CartError;
use crate::storage::KeyValueStorage;

/// The cart's line items plus their durable copy under one storage key.
///
/// Mutations go through a single commit gate: each one reads the latest
/// committed list, computes the next list, swaps it into memory and then
/// writes it to storage before the gate is released. Readers only touch the
/// in-memory list and never wait on storage.
pub struct CartStore {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    items: RwLock<Vec<LineItem>>,
    commit: Mutex<()>,
}

impl CartStore {
    /// Empty store; call `load` to rehydrate from storage.
    pub fn new(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self { storage, key: key.into(), items: RwLock::new(Vec::new()), commit: Mutex::new(()) }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace the in-memory list with the persisted one. A missing, empty,
    /// unreadable or malformed durable copy leaves the cart empty.
    pub async fn load(&self) {
        let _gate = self.commit.lock().await;
        let loaded = match self.storage.get(&self.key).await {
            Ok(Some(raw)) if !raw.trim().is_empty() => match serde_json::from_str::<Vec<LineItem>>(&raw) {
                Ok(items) => sanitize(items),
                Err(e) => {
                    warn!(key = %self.key, error = %e, "stored cart is malformed; starting empty");
                    Vec::new()
                }
            },
            Ok(_) => Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "cannot read stored cart; starting empty");
                Vec::new()
            }
        };
        debug!(key = %self.key, items = loaded.len(), "cart loaded");
        *self.items.write().await = loaded;
    }

    /// Snapshot of the current line items.
    pub async fn products(&self) -> Vec<LineItem> {
        self.items.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<LineItem> {
        self.items.read().await.iter().find(|item| item.id == id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    /// Add one unit of `product`, creating the line item when it is new.
    pub async fn add_to_cart(&self, product: Product) -> Result<(), CartError> {
        product.validate()?;
        self.dispatch(CartCommand::Add(product)).await
    }

    /// Add one unit of an item already in the cart. Absent ids are ignored.
    pub async fn increment(&self, id: &str) -> Result<(), CartError> {
        self.dispatch(CartCommand::Increment(id.to_string())).await
    }

    /// Remove one unit; the line item disappears when its last unit goes.
    /// Absent ids are ignored.
    pub async fn decrement(&self, id: &str) -> Result<(), CartError> {
        self.dispatch(CartCommand::Decrement(id.to_string())).await
    }

    async fn dispatch(&self, command: CartCommand) -> Result<(), CartError> {
        let _gate = self.commit.lock().await;
        let id = command.id().to_string();

        let next = {
            let current = self.items.read().await;
            match command.apply(&current) {
                Some(next) => next,
                None => {
                    debug!(%id, "cart item not found; nothing to do");
                    return Ok(());
                }
            }
        };

        let payload = serde_json::to_string(&next).map_err(|e| CartError::Serialization(e.to_string()))?;
        let quantity = next.iter().find(|item| item.id == id).map_or(0, |item| item.quantity);
        *self.items.write().await = next;
        debug!(%id, quantity, "cart updated");

        // memory keeps the update even if the write fails
        if let Err(e) = self.storage.set(&self.key, payload).await {
            warn!(key = %self.key, %id, error = %e, "failed to persist cart");
            return Err(e.into());
        }
        Ok(())
    }
}

/// Drop zero-quantity entries and repeated ids from a persisted list.
fn sanitize(items: Vec<LineItem>) -> Vec<LineItem> {
    let mut seen = HashSet::new();
    let total = items.len();
    let kept: Vec<LineItem> = items
        .into_iter()
        .filter(|item| item.quantity > 0 && seen.insert(item.id.clone()))
        .collect();
    if kept.len() != total {
        warn!(dropped = total - kept.len(), "stored cart had empty or duplicate entries");
    }
    kept
}
