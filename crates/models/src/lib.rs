//! Plain data types shared by the cart and catalog layers.
//! - `Product` mirrors one catalog entry as served by the remote API.
//! - `LineItem` is a product plus the quantity held in the cart.

pub mod errors;
pub mod product;
pub mod cart;

pub use cart::LineItem;
pub use product::Product;
