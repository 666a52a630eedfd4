//! Wishlist state.
//!
//! A deduplicated set of product records keyed by product ID. Local
//! mutations live here; the remote like/unlike composition sits in the
//! wishlist routes, which await the marketplace call before touching this
//! state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use velour_core::ProductId;

/// A wishlisted product record.
///
/// The full record is denormalized into the session so the wishlist can be
/// shown without a catalog round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    pub product_id: ProductId,
    pub title: String,
    pub price: Decimal,
    pub image: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub seller: Option<String>,
}

/// Wishlist state, persisted under its own session key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Wishlist {
    entries: Vec<WishlistEntry>,
}

impl Wishlist {
    /// The wishlisted products, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[WishlistEntry] {
        &self.entries
    }

    /// Membership test by product ID. O(n) scan.
    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.product_id == product_id)
    }

    /// Add a product record.
    ///
    /// Inserts only if the product is not already present; a duplicate add is
    /// a no-op. Returns whether the entry was inserted.
    pub fn add(&mut self, entry: WishlistEntry) -> bool {
        if self.contains(entry.product_id) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Remove a product by ID. No-op when absent.
    pub fn remove(&mut self, product_id: ProductId) {
        self.entries.retain(|entry| entry.product_id != product_id);
    }
}
