//! Cache types for marketplace API responses.

use crate::marketplace::types::{Product, ProductPage};

/// Cache key for catalog reads.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(i64),
    Products {
        page: u32,
        query: Option<String>,
        category: Option<String>,
    },
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(ProductPage),
}
