//! Route guard decision logic.
//!
//! The guard is an explicit state machine, decoupled from request handling:
//! a session resolves to a [`GuardState`], and [`decide`] maps that state
//! plus a [`GuardConfig`] to an [`Access`] outcome. `decide` is a pure
//! function, so every redirect decision is deterministic in
//! (state, config) and unit-testable without a router.
//!
//! The extractors in [`crate::middleware::auth`] are a thin shell around
//! this module: they resolve the session, call `decide`, and turn the
//! outcome into a response. Because that happens in `from_request_parts`,
//! the redirect is always issued before any handler output exists.

use velour_core::Role;

use crate::models::CurrentUser;

/// Destination for forbidden (insufficient-role) redirects.
pub const HOME_PATH: &str = "/";

/// Default destination for unauthenticated redirects.
pub const LOGIN_PATH: &str = "/auth/login";

/// What a route requires of the session.
#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// Require a logged-in session. Defaults to true.
    pub require_auth: bool,
    /// Require the admin role on top of authentication. Defaults to false.
    pub require_admin: bool,
    /// Where unauthenticated sessions are sent. Defaults to the login page.
    pub redirect_to: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            require_auth: true,
            require_admin: false,
            redirect_to: LOGIN_PATH.to_string(),
        }
    }
}

impl GuardConfig {
    /// Config for routes anyone may view.
    #[must_use]
    pub fn allow_anonymous() -> Self {
        Self {
            require_auth: false,
            ..Self::default()
        }
    }

    /// Config for admin-only routes.
    #[must_use]
    pub fn admin_only() -> Self {
        Self {
            require_admin: true,
            ..Self::default()
        }
    }

    /// Override the unauthenticated redirect destination.
    #[must_use]
    pub fn with_redirect_to(mut self, destination: impl Into<String>) -> Self {
        self.redirect_to = destination.into();
        self
    }
}

/// Where session resolution stands for a request.
#[derive(Debug, Clone)]
pub enum GuardState {
    /// The session has not been resolved yet.
    Loading,
    /// A logged-in user with a known role.
    Authorized(CurrentUser),
    /// No session, an expired session, or a resolution failure.
    ///
    /// Every failure mode normalizes here; resolution is never fatal.
    Unauthorized,
}

impl GuardState {
    const fn role(&self) -> Option<Role> {
        match self {
            Self::Authorized(user) => Some(user.role),
            Self::Loading | Self::Unauthorized => None,
        }
    }
}

/// Outcome of evaluating a [`GuardConfig`] against a [`GuardState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Still resolving; render a placeholder, no content and no redirect.
    Pending,
    /// Render the protected content.
    Render,
    /// Not authenticated; redirect to the configured login destination.
    Unauthorized { redirect_to: String },
    /// Authenticated (or anonymous) but lacking the required role;
    /// redirect home.
    Forbidden { redirect_to: String },
}

/// Evaluate a guard configuration against a resolved state.
///
/// Evaluation order matters and runs only once the state has left
/// `Loading`: the authentication requirement is checked before the role
/// requirement, so an unauthenticated session on an admin route is sent to
/// login, not home (unless the route somehow allows anonymous access, in
/// which case the missing role forbids it).
#[must_use]
pub fn decide(config: &GuardConfig, state: &GuardState) -> Access {
    if matches!(state, GuardState::Loading) {
        return Access::Pending;
    }

    if config.require_auth && matches!(state, GuardState::Unauthorized) {
        return Access::Unauthorized {
            redirect_to: config.redirect_to.clone(),
        };
    }

    if config.require_admin && state.role() != Some(Role::Admin) {
        return Access::Forbidden {
            redirect_to: HOME_PATH.to_string(),
        };
    }

    Access::Render
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use velour_core::{Email, UserId};

    use super::*;

    fn user(role: Role) -> CurrentUser {
        CurrentUser {
            id: UserId::new(1),
            email: Email::parse("lan@example.com").unwrap(),
            name: "Lan".to_string(),
            role,
        }
    }

    #[test]
    fn test_loading_is_pending() {
        let access = decide(&GuardConfig::default(), &GuardState::Loading);
        assert_eq!(access, Access::Pending);

        // Even admin routes stay pending while loading; no early redirect.
        let access = decide(&GuardConfig::admin_only(), &GuardState::Loading);
        assert_eq!(access, Access::Pending);
    }

    #[test]
    fn test_unauthenticated_redirects_to_login() {
        let access = decide(&GuardConfig::default(), &GuardState::Unauthorized);
        assert_eq!(
            access,
            Access::Unauthorized {
                redirect_to: LOGIN_PATH.to_string()
            }
        );
    }

    #[test]
    fn test_unauthenticated_redirect_destination_is_configurable() {
        let config = GuardConfig::default().with_redirect_to("/auth/login?next=/account");
        let access = decide(&config, &GuardState::Unauthorized);
        assert_eq!(
            access,
            Access::Unauthorized {
                redirect_to: "/auth/login?next=/account".to_string()
            }
        );
    }

    #[test]
    fn test_authenticated_user_renders() {
        let access = decide(
            &GuardConfig::default(),
            &GuardState::Authorized(user(Role::User)),
        );
        assert_eq!(access, Access::Render);
    }

    #[test]
    fn test_no_requirements_renders_for_everyone() {
        let config = GuardConfig::allow_anonymous();

        let access = decide(&config, &GuardState::Unauthorized);
        assert_eq!(access, Access::Render);

        let access = decide(&config, &GuardState::Authorized(user(Role::User)));
        assert_eq!(access, Access::Render);
    }

    #[test]
    fn test_non_admin_role_is_forbidden_home() {
        let access = decide(
            &GuardConfig::admin_only(),
            &GuardState::Authorized(user(Role::User)),
        );
        assert_eq!(
            access,
            Access::Forbidden {
                redirect_to: HOME_PATH.to_string()
            }
        );

        let access = decide(
            &GuardConfig::admin_only(),
            &GuardState::Authorized(user(Role::Shipper)),
        );
        assert_eq!(
            access,
            Access::Forbidden {
                redirect_to: HOME_PATH.to_string()
            }
        );
    }

    #[test]
    fn test_admin_role_renders_admin_routes() {
        let access = decide(
            &GuardConfig::admin_only(),
            &GuardState::Authorized(user(Role::Admin)),
        );
        assert_eq!(access, Access::Render);
    }

    #[test]
    fn test_admin_route_unauthenticated_goes_to_login_first() {
        // The auth check runs before the role check.
        let access = decide(&GuardConfig::admin_only(), &GuardState::Unauthorized);
        assert_eq!(
            access,
            Access::Unauthorized {
                redirect_to: LOGIN_PATH.to_string()
            }
        );
    }

    #[test]
    fn test_anonymous_admin_route_is_forbidden() {
        // require_admin without require_auth: no resolved role, so forbidden.
        let config = GuardConfig {
            require_auth: false,
            require_admin: true,
            ..GuardConfig::default()
        };
        let access = decide(&config, &GuardState::Unauthorized);
        assert_eq!(
            access,
            Access::Forbidden {
                redirect_to: HOME_PATH.to_string()
            }
        );
    }

    #[test]
    fn test_decision_is_deterministic() {
        // Same (config, state) tuple, same outcome.
        let config = GuardConfig::admin_only();
        let state = GuardState::Authorized(user(Role::User));
        assert_eq!(decide(&config, &state), decide(&config, &state));
    }
}
