//! Cart route handlers.
//!
//! The cart lives in the session; every handler loads it, applies one pure
//! mutation, writes it back best-effort, and returns the resulting summary.
//! Cart routes work for anonymous sessions - the cart survives login.

use axum::{Json, response::IntoResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use velour_core::ProductId;

use crate::stores::{CART_STATE, Cart, CartItem, NewCartItem};

/// Cart summary returned by every cart endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub total_items: u64,
    pub total_price: Decimal,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().to_vec(),
            total_items: cart.total_items(),
            total_price: cart.total_price(),
        }
    }
}

/// Quantity update payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Item removal payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
}

/// Item count badge payload.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u64,
}

/// Show the cart.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let cart = CART_STATE.load(&session).await;
    Json(CartView::from(&cart))
}

/// Add a product to the cart.
///
/// Re-adding a product increments its quantity; the stored entry's
/// attributes win over whatever the client sent this time.
#[instrument(skip(session, draft))]
pub async fn add(session: Session, Json(draft): Json<NewCartItem>) -> impl IntoResponse {
    let mut cart = CART_STATE.load(&session).await;
    cart.add_item(draft);
    CART_STATE.save(&session, &cart).await;

    Json(CartView::from(&cart))
}

/// Replace an item's quantity.
///
/// Quantities below 1 and unknown products are no-ops; the response is the
/// (possibly unchanged) cart either way.
#[instrument(skip(session))]
pub async fn update(session: Session, Json(form): Json<UpdateCartForm>) -> impl IntoResponse {
    let mut cart = CART_STATE.load(&session).await;
    cart.update_quantity(form.product_id, form.quantity);
    CART_STATE.save(&session, &cart).await;

    Json(CartView::from(&cart))
}

/// Remove an item from the cart. No-op when absent.
#[instrument(skip(session))]
pub async fn remove(session: Session, Json(form): Json<RemoveFromCartForm>) -> impl IntoResponse {
    let mut cart = CART_STATE.load(&session).await;
    cart.remove_item(form.product_id);
    CART_STATE.save(&session, &cart).await;

    Json(CartView::from(&cart))
}

/// Empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> impl IntoResponse {
    let mut cart = CART_STATE.load(&session).await;
    cart.clear();
    CART_STATE.save(&session, &cart).await;

    Json(CartView::from(&cart))
}

/// Item count badge.
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let cart = CART_STATE.load(&session).await;
    Json(CartCount {
        count: cart.total_items(),
    })
}
