//! Shipper workflow route handlers.
//!
//! Shippers see the orders assigned to them and close them out: an order in
//! transit either gets delivered or comes back cancelled. The role check
//! sits on top of `RequireAuth` and redirects other roles home, mirroring
//! the admin arm of the guard.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use velour_core::{OrderId, OrderStatus};

use crate::error::AppError;
use crate::marketplace::Order;
use crate::middleware::{RequireAuth, require_shipper};
use crate::routes::session_bearer;
use crate::state::AppState;

/// Status update payload.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusForm {
    pub status: OrderStatus,
}

/// The statuses a shipper may set.
///
/// A shipper only ever closes out an in-transit order; every other
/// transition belongs to the marketplace back office.
const fn shipper_may_set(status: OrderStatus) -> bool {
    matches!(status, OrderStatus::Delivered | OrderStatus::Cancelled)
}

/// Orders assigned to the current shipper.
#[instrument(skip(state, session, user))]
pub async fn orders(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    if let Err(redirect) = require_shipper(&user) {
        return Ok(redirect);
    }

    let token = session_bearer(&session).await?;
    let orders: Vec<Order> = state.marketplace().shipper_orders(&token).await?;
    Ok(Json(orders).into_response())
}

/// Close out an order: delivered or cancelled.
#[instrument(skip(state, session, user))]
pub async fn update_status(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
    Json(form): Json<UpdateStatusForm>,
) -> Result<Response, AppError> {
    if let Err(redirect) = require_shipper(&user) {
        return Ok(redirect);
    }

    if !shipper_may_set(form.status) {
        return Err(AppError::BadRequest(format!(
            "shippers cannot set order status {}",
            form.status
        )));
    }

    let token = session_bearer(&session).await?;
    let order = state
        .marketplace()
        .update_order_status(&token, OrderId::new(id), form.status)
        .await?;
    Ok(Json(order).into_response())
}
