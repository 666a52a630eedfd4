//! Marketplace API wire types.
//!
//! The upstream API speaks camelCase JSON; everything here mirrors its
//! response shapes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use velour_core::{Email, OrderStatus, OrderId, ProductId, Role, UserId};

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub seller: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A page of catalog products.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub page: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

/// One line of an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub title: String,
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// An order, as returned by the marketplace API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub recipient_name: String,
    pub shipping_address: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The authenticated account as the API reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUser {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub role: Role,
}

/// Response of a successful login: the account plus a bearer token for
/// subsequent authenticated calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub token: String,
    pub user: AccountUser,
}

/// Aggregate counters for the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub user_count: u64,
    pub product_count: u64,
    pub order_count: u64,
    pub revenue: Decimal,
}

/// A user row in the admin user list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserializes_camel_case() {
        let json = r#"{
            "id": 12,
            "title": "Wool Coat",
            "price": "1250000",
            "images": ["https://cdn.velour.shop/p/12.jpg"],
            "brand": "Maison V",
            "createdAt": "2026-01-15T08:30:00Z"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(12));
        assert_eq!(product.price, Decimal::from(1_250_000));
        assert!(product.sizes.is_empty());
        assert!(product.created_at.is_some());
    }

    #[test]
    fn test_order_status_wire_format() {
        let json = r#"{
            "id": 7,
            "status": "SHIPPING",
            "items": [],
            "total": "0",
            "recipientName": "Lan",
            "shippingAddress": "12 Hang Bac, Hanoi",
            "createdAt": "2026-02-01T10:00:00Z"
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::Shipping);
    }
}
