use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum CartError {
    #[error("use_cart must be used within a mounted CartContext")]
    ProviderMissing,
    #[error("a cart is already mounted; unmount it first")]
    AlreadyMounted,
    #[error("invalid product: {0}")]
    InvalidProduct(#[from] models::errors::ModelError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl CartError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            CartError::ProviderMissing => 2001,
            CartError::AlreadyMounted => 2003,
            CartError::InvalidProduct(_) => 2002,
            CartError::Storage(_) => 2101,
            CartError::Serialization(_) => 2102,
        }
    }
}
