//! Authentication extractors built on the route guard.
//!
//! Provides extractors for requiring authentication (and roles) in route
//! handlers. Each extractor resolves the session fresh, feeds the result
//! through [`guard::decide`], and maps the outcome to a response: redirects
//! for page routes, bare status codes for `/api/` routes.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::middleware::guard::{self, Access, GuardConfig, GuardState};
use crate::models::{CurrentUser, session_keys};

/// Resolve the current session to a guard state.
///
/// Reads the stored user on every call (nothing is cached across guard
/// evaluations). Backend errors and corrupt values normalize to
/// [`GuardState::Unauthorized`]; resolution never fails the request.
pub async fn resolve_session(session: &Session) -> GuardState {
    match session.get::<CurrentUser>(session_keys::CURRENT_USER).await {
        Ok(Some(user)) => GuardState::Authorized(user),
        Ok(None) => GuardState::Unauthorized,
        Err(e) => {
            tracing::warn!("session resolution failed, treating as unauthenticated: {e}");
            GuardState::Unauthorized
        }
    }
}

/// Rejection issued when a guard denies access.
#[derive(Debug)]
pub enum GuardRejection {
    /// Redirect (for page requests).
    Redirect(String),
    /// Bare status code (for API requests).
    Status(StatusCode),
}

impl IntoResponse for GuardRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect(destination) => Redirect::to(&destination).into_response(),
            Self::Status(status) => status.into_response(),
        }
    }
}

/// Evaluate `config` against the request, yielding the authorized user.
async fn evaluate(parts: &mut Parts, config: &GuardConfig) -> Result<CurrentUser, GuardRejection> {
    // Session is set by SessionManagerLayer; absence means no layer at all.
    let Some(session) = parts.extensions.get::<Session>() else {
        return Err(GuardRejection::Status(StatusCode::UNAUTHORIZED));
    };

    let state = resolve_session(session).await;
    let is_api = parts.uri.path().starts_with("/api/");

    match guard::decide(config, &state) {
        Access::Render => match state {
            GuardState::Authorized(user) => Ok(user),
            // decide() only renders an unauthenticated state when the route
            // does not require auth; those routes use OptionalAuth instead.
            GuardState::Loading | GuardState::Unauthorized => {
                Err(GuardRejection::Status(StatusCode::UNAUTHORIZED))
            }
        },
        Access::Unauthorized { redirect_to } => {
            if is_api {
                Err(GuardRejection::Status(StatusCode::UNAUTHORIZED))
            } else {
                Err(GuardRejection::Redirect(redirect_to))
            }
        }
        Access::Forbidden { redirect_to } => {
            if is_api {
                Err(GuardRejection::Status(StatusCode::FORBIDDEN))
            } else {
                Err(GuardRejection::Redirect(redirect_to))
            }
        }
        // Pending never escapes: from_request_parts only runs once the
        // session has been resolved above.
        Access::Pending => Err(GuardRejection::Status(StatusCode::UNAUTHORIZED)),
    }
}

/// Extractor that requires a logged-in user.
///
/// If nobody is logged in, page requests get a redirect to the login page
/// and `/api/` requests get 401.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = GuardRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = evaluate(parts, &GuardConfig::default()).await?;
        Ok(Self(user))
    }
}

/// Extractor that requires a logged-in admin.
///
/// Logged-out users are sent to login; logged-in non-admins are sent home
/// (403 on `/api/` paths).
pub struct RequireAdmin(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = GuardRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = evaluate(parts, &GuardConfig::admin_only()).await?;
        Ok(Self(user))
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike `RequireAuth`, this never rejects the request.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(
///     OptionalAuth(user): OptionalAuth,
/// ) -> impl IntoResponse {
///     match user {
///         Some(u) => format!("Hello, {}!", u.name),
///         None => "Hello, guest!".to_string(),
///     }
/// }
/// ```
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => match resolve_session(session).await {
                GuardState::Authorized(user) => Some(user),
                GuardState::Loading | GuardState::Unauthorized => None,
            },
            None => None,
        };

        Ok(Self(user))
    }
}

/// Check that a user holds the shipper role.
///
/// Shipper routes layer this on top of `RequireAuth`, mirroring the admin
/// arm of the guard: wrong role redirects home.
///
/// # Errors
///
/// Returns `Err(Response)` with a redirect to the home page when the user is
/// not a shipper.
pub fn require_shipper(user: &CurrentUser) -> Result<(), Response> {
    if user.is_shipper() {
        Ok(())
    } else {
        Err(Redirect::to(guard::HOME_PATH).into_response())
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Store the logged-in user in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Clear the logged-in user from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    Ok(())
}

/// Store the marketplace API bearer token for the current session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_api_token(
    session: &Session,
    token: &str,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::API_TOKEN, token).await
}

/// Get the marketplace API bearer token, if one is stored.
pub async fn api_token(session: &Session) -> Option<String> {
    session
        .get::<String>(session_keys::API_TOKEN)
        .await
        .ok()
        .flatten()
}

/// Clear the marketplace API bearer token (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_api_token(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<String>(session_keys::API_TOKEN).await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::{MemoryStore, Session};
    use velour_core::{Email, Role, UserId};

    use super::*;

    fn test_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn user() -> CurrentUser {
        CurrentUser {
            id: UserId::new(9),
            email: Email::parse("mai@example.com").unwrap(),
            name: "Mai".to_string(),
            role: Role::User,
        }
    }

    #[tokio::test]
    async fn test_resolve_session_empty_is_unauthorized() {
        let session = test_session();
        assert!(matches!(
            resolve_session(&session).await,
            GuardState::Unauthorized
        ));
    }

    #[tokio::test]
    async fn test_resolve_session_after_login() {
        let session = test_session();
        set_current_user(&session, &user()).await.unwrap();

        match resolve_session(&session).await {
            GuardState::Authorized(current) => assert_eq!(current.id, UserId::new(9)),
            other => panic!("expected authorized state, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resolve_session_corrupt_user_is_unauthorized() {
        let session = test_session();
        // Wrong shape under the user key.
        session
            .insert(session_keys::CURRENT_USER, vec![1, 2, 3])
            .await
            .unwrap();

        assert!(matches!(
            resolve_session(&session).await,
            GuardState::Unauthorized
        ));
    }

    #[tokio::test]
    async fn test_clear_current_user_logs_out() {
        let session = test_session();
        set_current_user(&session, &user()).await.unwrap();
        clear_current_user(&session).await.unwrap();

        assert!(matches!(
            resolve_session(&session).await,
            GuardState::Unauthorized
        ));
    }

    #[tokio::test]
    async fn test_api_token_roundtrip() {
        let session = test_session();
        assert!(api_token(&session).await.is_none());

        set_api_token(&session, "tok-123").await.unwrap();
        assert_eq!(api_token(&session).await.as_deref(), Some("tok-123"));

        clear_api_token(&session).await.unwrap();
        assert!(api_token(&session).await.is_none());
    }

    #[test]
    fn test_require_shipper_rejects_other_roles() {
        let mut shipper = user();
        shipper.role = Role::Shipper;
        assert!(require_shipper(&shipper).is_ok());

        assert!(require_shipper(&user()).is_err());
    }
}
