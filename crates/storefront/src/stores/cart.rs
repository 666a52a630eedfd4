//! Cart state and mutation rules.
//!
//! The cart is an ordered list of line items keyed by product ID. At most
//! one item exists per product; re-adding a product increments its quantity
//! and preserves the attributes of the existing entry. Quantities never go
//! below 1; removal is always explicit.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use velour_core::ProductId;

/// A cart line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product identifier, unique within the cart.
    pub product_id: ProductId,
    pub title: String,
    /// Unit price at the time the item was added.
    pub price: Decimal,
    pub image: Option<String>,
    /// Always >= 1.
    pub quantity: u32,
    /// Selected size variant, if the product has sizes.
    pub size: Option<String>,
    /// Selected color variant, if the product has colors.
    pub color: Option<String>,
    // Denormalized for display; the marketplace API owns these.
    pub brand: Option<String>,
    pub category: Option<String>,
    pub seller: Option<String>,
}

/// A line item draft, as submitted by an add-to-cart action.
///
/// Carries no quantity; the cart decides whether this becomes a new entry
/// (quantity 1) or an increment of an existing one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    pub product_id: ProductId,
    pub title: String,
    pub price: Decimal,
    pub image: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub seller: Option<String>,
}

impl From<NewCartItem> for CartItem {
    fn from(draft: NewCartItem) -> Self {
        Self {
            product_id: draft.product_id,
            title: draft.title,
            price: draft.price,
            image: draft.image,
            quantity: 1,
            size: draft.size,
            color: draft.color,
            brand: draft.brand,
            category: draft.category,
            seller: draft.seller,
        }
    }
}

/// Cart state, persisted under its own session key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// The line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Add a product to the cart.
    ///
    /// If an item with the same product ID already exists, its quantity is
    /// incremented by 1 and the draft's attributes (size, color, price) are
    /// ignored - the existing entry wins. Otherwise the draft is inserted
    /// with quantity 1. Quantity has no upper bound at this layer.
    pub fn add_item(&mut self, draft: NewCartItem) {
        match self
            .items
            .iter_mut()
            .find(|item| item.product_id == draft.product_id)
        {
            Some(existing) => existing.quantity += 1,
            None => self.items.push(draft.into()),
        }
    }

    /// Remove the item for a product. No-op when the product is not in the cart.
    pub fn remove_item(&mut self, product_id: ProductId) {
        self.items.retain(|item| item.product_id != product_id);
    }

    /// Replace the quantity of an existing item.
    ///
    /// Quantities below 1 are rejected as a no-op (removal is explicit, never
    /// implied by a zero quantity). Unknown product IDs are a no-op.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if quantity < 1 {
            return;
        }
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product_id == product_id)
        {
            item.quantity = quantity;
        }
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total unit count across all items. Derived on each call.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Total price across all items (unit price x quantity). Derived on each call.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items
            .iter()
            .map(|item| item.price * Decimal::from(item.quantity))
            .sum()
    }
}
