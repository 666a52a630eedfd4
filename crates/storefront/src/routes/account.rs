//! Account route handlers.
//!
//! These routes require authentication; the guard redirects logged-out
//! visitors to the login page before any handler here runs.

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use velour_core::OrderId;

use crate::error::Result;
use crate::marketplace::Order;
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::routes::session_bearer;
use crate::state::AppState;
use crate::stores::{CART_STATE, WISHLIST_STATE};

/// Profile overview payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub user: CurrentUser,
    pub cart_items: u64,
    pub wishlist_items: usize,
}

/// Account overview.
#[instrument(skip(session, user))]
pub async fn index(RequireAuth(user): RequireAuth, session: Session) -> impl IntoResponse {
    let cart = CART_STATE.load(&session).await;
    let wishlist = WISHLIST_STATE.load(&session).await;

    Json(AccountView {
        user,
        cart_items: cart.total_items(),
        wishlist_items: wishlist.entries().len(),
    })
}

/// Order history, newest first.
#[instrument(skip(state, session))]
pub async fn orders(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<Order>>> {
    let token = session_bearer(&session).await?;
    let orders = state.marketplace().orders_for_user(&token).await?;
    Ok(Json(orders))
}

/// One order, scoped to the logged-in user by the upstream API.
#[instrument(skip(state, session))]
pub async fn order_detail(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Json<Order>> {
    let token = session_bearer(&session).await?;
    let order = state
        .marketplace()
        .get_order(&token, OrderId::new(id))
        .await?;
    Ok(Json(order))
}
