//! Admin dashboard route handlers.
//!
//! Guarded by `RequireAdmin`: logged-out visitors are redirected to login,
//! logged-in non-admins are redirected home.

use axum::{Json, extract::State};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::marketplace::{AdminStats, UserSummary};
use crate::middleware::RequireAdmin;
use crate::models::CurrentUser;
use crate::routes::session_bearer;
use crate::state::AppState;

/// Dashboard payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub admin: CurrentUser,
    pub stats: AdminStats,
}

/// Aggregate marketplace stats.
#[instrument(skip(state, session, admin))]
pub async fn dashboard(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<DashboardView>> {
    let token = session_bearer(&session).await?;
    let stats = state.marketplace().admin_stats(&token).await?;
    Ok(Json(DashboardView { admin, stats }))
}

/// Registered users table.
#[instrument(skip(state, session))]
pub async fn users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<UserSummary>>> {
    let token = session_bearer(&session).await?;
    let users = state.marketplace().admin_list_users(&token).await?;
    Ok(Json(users))
}
