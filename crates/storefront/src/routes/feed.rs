//! Feed proxy route handler.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::services::FeedItem;
use crate::state::AppState;

/// The aggregated fashion-news feed, newest first.
///
/// Failed sources are skipped upstream, so this always answers with
/// whatever is available (possibly an empty list).
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<Vec<FeedItem>> {
    let items = state.feed().aggregate().await;
    Json(items.as_ref().clone())
}
