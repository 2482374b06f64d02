//! Cart module: pure commands, the persisted store, and the provider context.
//!
//! Every mutation is expressed as a `CartCommand` applied to the latest
//! committed list; `CartStore` serialises those applications and keeps the
//! durable copy in step; `CartContext` hands the mounted store to consumers.

pub mod command;
pub mod context;
pub mod store;

pub use command::CartCommand;
pub use context::CartContext;
pub use store::CartStore;
