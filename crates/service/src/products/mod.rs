//! Catalog access: a minimal HTTP seam and the product lister built on it.

pub mod http;
pub mod lister;

pub use http::{ApiClient, HttpApi, HttpError};
pub use lister::ProductLister;
