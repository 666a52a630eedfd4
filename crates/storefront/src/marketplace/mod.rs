//! Marketplace API client.
//!
//! The upstream marketplace API is the source of truth for catalog, orders,
//! users and wishlist likes. This module wraps it in a typed `reqwest`
//! client with in-memory caching via `moka` for catalog reads (5-minute
//! TTL). Authenticated calls carry the session's bearer token.

mod cache;
mod client;
pub mod types;

pub use client::{MarketplaceClient, ProductQuery};
pub use types::*;

use thiserror::Error;

/// Errors that can occur when calling the marketplace API.
#[derive(Debug, Error)]
pub enum MarketplaceError {
    /// HTTP request failed (connect, timeout, protocol).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The bearer token was missing, expired or rejected.
    #[error("Unauthenticated")]
    Unauthenticated,

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse a response body.
    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marketplace_error_display() {
        let err = MarketplaceError::NotFound("product 123".to_string());
        assert_eq!(err.to_string(), "Not found: product 123");

        let err = MarketplaceError::Api {
            status: 503,
            message: "maintenance".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 503 - maintenance");
    }
}
