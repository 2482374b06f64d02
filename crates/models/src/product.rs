use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// One catalog entry, exactly as returned by the product collection endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub price: f64,
}

impl Product {
    pub fn new(id: impl Into<String>, title: impl Into<String>, image_url: impl Into<String>, price: f64) -> Self {
        Self { id: id.into(), title: title.into(), image_url: image_url.into(), price }
    }

    /// Reject negative or non-finite prices. Ids are opaque catalog strings.
    pub fn validate(&self) -> Result<(), ModelError> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ModelError::Validation(format!("invalid price {} for product {}", self.price, self.id)));
        }
        Ok(())
    }
}
