//! Wishlist route handlers.
//!
//! Local mutations (add/remove/contains) touch only the session. The
//! like/unlike pair additionally syncs the marketplace API: the remote call
//! is awaited first, and local state is mutated only on success, so a
//! failed sync leaves the wishlist exactly as it was and surfaces the
//! upstream error to the caller.

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use velour_core::ProductId;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::routes::session_bearer;
use crate::state::AppState;
use crate::stores::{WISHLIST_STATE, Wishlist, WishlistEntry};

/// Wishlist contents returned by every wishlist endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistView {
    pub entries: Vec<WishlistEntry>,
}

impl From<&Wishlist> for WishlistView {
    fn from(wishlist: &Wishlist) -> Self {
        Self {
            entries: wishlist.entries().to_vec(),
        }
    }
}

/// Entry removal payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromWishlistForm {
    pub product_id: ProductId,
}

/// Membership test response.
#[derive(Debug, Serialize)]
pub struct ContainsView {
    pub contains: bool,
}

/// Show the wishlist.
#[instrument(skip(session))]
pub async fn show(RequireAuth(_user): RequireAuth, session: Session) -> impl IntoResponse {
    let wishlist = WISHLIST_STATE.load(&session).await;
    Json(WishlistView::from(&wishlist))
}

/// Add a product record locally. Duplicate adds are no-ops.
#[instrument(skip(session, entry))]
pub async fn add(
    RequireAuth(_user): RequireAuth,
    session: Session,
    Json(entry): Json<WishlistEntry>,
) -> impl IntoResponse {
    let mut wishlist = WISHLIST_STATE.load(&session).await;
    wishlist.add(entry);
    WISHLIST_STATE.save(&session, &wishlist).await;

    Json(WishlistView::from(&wishlist))
}

/// Remove a product locally. No-op when absent.
#[instrument(skip(session))]
pub async fn remove(
    RequireAuth(_user): RequireAuth,
    session: Session,
    Json(form): Json<RemoveFromWishlistForm>,
) -> impl IntoResponse {
    let mut wishlist = WISHLIST_STATE.load(&session).await;
    wishlist.remove(form.product_id);
    WISHLIST_STATE.save(&session, &wishlist).await;

    Json(WishlistView::from(&wishlist))
}

/// Membership test by product ID.
#[instrument(skip(session))]
pub async fn contains(
    RequireAuth(_user): RequireAuth,
    session: Session,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    let wishlist = WISHLIST_STATE.load(&session).await;
    Json(ContainsView {
        contains: wishlist.contains(ProductId::new(id)),
    })
}

/// Like a product: remote first, then local.
///
/// The marketplace call must succeed before the entry is added; on failure
/// the local wishlist is untouched and the error propagates so the UI can
/// show feedback. Concurrent likes for the same product are not coalesced.
#[instrument(skip(state, session, entry))]
pub async fn like(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Json(entry): Json<WishlistEntry>,
) -> Result<Json<WishlistView>> {
    let token = session_bearer(&session).await?;
    state
        .marketplace()
        .like_product(&token, entry.product_id)
        .await?;

    let mut wishlist = WISHLIST_STATE.load(&session).await;
    wishlist.add(entry);
    WISHLIST_STATE.save(&session, &wishlist).await;

    Ok(Json(WishlistView::from(&wishlist)))
}

/// Unlike a product: remote first, then local.
///
/// Same ordering contract as [`like`].
#[instrument(skip(state, session))]
pub async fn unlike(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<RemoveFromWishlistForm>,
) -> Result<Json<WishlistView>> {
    let token = session_bearer(&session).await?;
    state
        .marketplace()
        .unlike_product(&token, form.product_id)
        .await?;

    let mut wishlist = WISHLIST_STATE.load(&session).await;
    wishlist.remove(form.product_id);
    WISHLIST_STATE.save(&session, &wishlist).await;

    Ok(Json(WishlistView::from(&wishlist)))
}
