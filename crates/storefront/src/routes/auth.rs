//! Authentication route handlers.
//!
//! Credential validation is delegated to the marketplace API; the storefront
//! only stores the resulting identity and bearer token in the session.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{
    RequireAuth, clear_api_token, clear_current_user, set_api_token, set_current_user,
};
use crate::models::CurrentUser;
use crate::state::AppState;
use crate::stores::{CART_STATE, WISHLIST_STATE};

/// Login payload.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Handle login.
///
/// On success the session is rotated (fixation defense), and the identity
/// plus bearer token are stored for later guard evaluations and
/// authenticated upstream calls.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> Result<Json<CurrentUser>> {
    let auth = state
        .marketplace()
        .login(&form.email, &form.password)
        .await?;

    let user = CurrentUser {
        id: auth.user.id,
        email: auth.user.email,
        name: auth.user.name,
        role: auth.user.role,
    };

    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(format!("failed to rotate session: {e}")))?;
    set_current_user(&session, &user)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store user in session: {e}")))?;
    set_api_token(&session, &auth.token)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store token in session: {e}")))?;

    set_sentry_user(&user.id, Some(user.email.as_str()));
    tracing::info!(user_id = %user.id, "user logged in");

    Ok(Json(user))
}

/// Handle logout.
///
/// Clears the identity, bearer token and both commerce stores; each key is
/// its own envelope, so they are cleared individually.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> impl IntoResponse {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("failed to clear user on logout: {e}");
    }
    if let Err(e) = clear_api_token(&session).await {
        tracing::error!("failed to clear token on logout: {e}");
    }
    CART_STATE.clear(&session).await;
    WISHLIST_STATE.clear(&session).await;

    clear_sentry_user();

    StatusCode::NO_CONTENT
}

/// Current session identity, for client bootstrapping.
///
/// Lives under `/api/`, so a logged-out caller gets 401 rather than a
/// redirect.
#[instrument(skip(user))]
pub async fn session(RequireAuth(user): RequireAuth) -> impl IntoResponse {
    Json(user)
}
