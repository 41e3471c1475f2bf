//! Product catalog client library
//!
//! An async client for read-only product catalog endpoints that return a JSON
//! array of products (for example `https://fakestoreapi.com/products`).

pub mod error;
pub mod model;

mod client;

pub use client::*;
pub use error::ApiError;
pub use error::Error;
pub use model::Product;
pub use model::ProductId;
