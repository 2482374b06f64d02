use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tracing::info;

use super::store::CartStore;
use crate::errors::CartError;
use crate::storage::KeyValueStorage;

/// Process-wide holder of the mounted cart.
///
/// Consumers receive the context explicitly and call `use_cart`; nothing is
/// looked up ambiently. The context starts unmounted, and asking it for the
/// cart before `mount` (or after `unmount`) is a wiring error.
#[derive(Default)]
pub struct CartContext {
    slot: ArcSwapOption<CartStore>,
}

impl CartContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store over `storage`, rehydrate it, and make it the mounted cart.
    ///
    /// Only one store may be mounted at a time: a second store over the same
    /// key would persist through its own commit gate, racing the first one.
    /// `unmount` before mounting again; consumers then call `use_cart` anew.
    pub async fn mount(&self, storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Result<Arc<CartStore>, CartError> {
        if self.is_mounted() {
            return Err(CartError::AlreadyMounted);
        }
        let store = Arc::new(CartStore::new(storage, key));
        store.load().await;

        let empty: Option<Arc<CartStore>> = None;
        let previous = self.slot.compare_and_swap(&empty, Some(Arc::clone(&store)));
        if previous.is_some() {
            return Err(CartError::AlreadyMounted);
        }
        let items = store.len().await;
        info!(key = %store.key(), items, "cart mounted");
        Ok(store)
    }

    /// The mounted cart.
    pub fn use_cart(&self) -> Result<Arc<CartStore>, CartError> {
        self.slot.load_full().ok_or(CartError::ProviderMissing)
    }

    /// Detach the mounted cart, returning it if there was one.
    pub fn unmount(&self) -> Option<Arc<CartStore>> {
        let previous = self.slot.swap(None);
        if previous.is_some() {
            info!("cart unmounted");
        }
        previous
    }

    pub fn is_mounted(&self) -> bool {
        self.slot.load().is_some()
    }
}
