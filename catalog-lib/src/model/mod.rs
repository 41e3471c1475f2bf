//! Catalog data types

mod product;

pub use product::*;
