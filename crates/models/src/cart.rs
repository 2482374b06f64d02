use serde::{Deserialize, Serialize};

use crate::product::Product;

/// A product held in the cart with its quantity. Quantity is always >= 1
/// while the item is part of a cart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub price: f64,
    pub quantity: u32,
}

impl LineItem {
    /// First unit of a product entering the cart.
    pub fn from_product(product: Product) -> Self {
        let Product { id, title, image_url, price } = product;
        Self { id, title, image_url, price, quantity: 1 }
    }
}
