//! Home route handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::marketplace::{ProductPage, ProductQuery};
use crate::middleware::OptionalAuth;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Home payload: the first catalog page plus whoever is logged in.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    pub user: Option<CurrentUser>,
    pub featured: ProductPage,
}

/// Home page data.
#[instrument(skip(state, user))]
pub async fn home(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
) -> Result<Json<HomeView>> {
    let featured = state
        .marketplace()
        .list_products(&ProductQuery {
            page: 1,
            ..ProductQuery::default()
        })
        .await?;

    Ok(Json(HomeView { user, featured }))
}
