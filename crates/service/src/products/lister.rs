use std::sync::Arc;

use models::Product;
use tracing::{debug, warn};

use super::http::HttpApi;

pub const DEFAULT_PRODUCTS_PATH: &str = "/products";

/// Fetches the catalog snapshot. Failures degrade to an empty list.
#[derive(Clone)]
pub struct ProductLister {
    api: Arc<dyn HttpApi>,
    path: String,
}

impl ProductLister {
    pub fn new(api: Arc<dyn HttpApi>) -> Self {
        Self::with_path(api, DEFAULT_PRODUCTS_PATH)
    }

    pub fn with_path(api: Arc<dyn HttpApi>, path: impl Into<String>) -> Self {
        Self { api, path: path.into() }
    }

    /// One fresh read of the product collection, returned as received.
    pub async fn list(&self) -> Vec<Product> {
        let body = match self.api.get(&self.path).await {
            Ok(body) => body,
            Err(e) => {
                warn!(path = %self.path, error = %e, "product listing failed");
                return Vec::new();
            }
        };
        match serde_json::from_value::<Vec<Product>>(body) {
            Ok(products) => {
                debug!(path = %self.path, count = products.len(), "products listed");
                products
            }
            Err(e) => {
                warn!(path = %self.path, error = %e, "product listing has unexpected shape");
                Vec::new()
            }
        }
    }
}
