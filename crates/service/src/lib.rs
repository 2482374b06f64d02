//! Service layer for the storefront client.
//! - `cart`: line-item state, its durable copy, and the provider context.
//! - `products`: catalog listing over an HTTP seam.
//! - `storage`: key-value backends the cart persists through.

pub mod errors;
pub mod cart;
pub mod products;
pub mod runtime;
pub mod storage;
#[cfg(test)]
pub mod test_support;

pub use cart::{CartContext, CartStore};
pub use errors::CartError;
pub use products::ProductLister;
