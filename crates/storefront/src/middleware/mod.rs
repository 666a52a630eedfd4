//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with `PostgreSQL` store)
//! 4. Route guard extractors (per-handler)
//! 5. Rate limiting on auth routes (governor)

pub mod auth;
pub mod guard;
pub mod rate_limit;
pub mod session;

pub use auth::{
    OptionalAuth, RequireAdmin, RequireAuth, api_token, clear_api_token, clear_current_user,
    require_shipper, resolve_session, set_api_token, set_current_user,
};
pub use guard::{Access, GuardConfig, GuardState, HOME_PATH, LOGIN_PATH, decide};
pub use rate_limit::auth_rate_limiter;
pub use session::{SESSION_COOKIE_NAME, create_session_layer, create_session_store};
