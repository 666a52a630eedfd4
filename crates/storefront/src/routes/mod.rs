//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home (featured products, current user)
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products               - Product listing (page, q, category)
//! GET  /products/{id}          - Product detail
//!
//! # Cart (session-persisted)
//! GET  /cart                   - Cart contents and totals
//! POST /cart/add               - Add a product (quantity accumulates)
//! POST /cart/update            - Replace an item's quantity
//! POST /cart/remove            - Remove an item
//! POST /cart/clear             - Empty the cart
//! GET  /cart/count             - Item count badge
//!
//! # Wishlist (session-persisted, requires auth)
//! GET  /wishlist               - Wishlist contents
//! POST /wishlist/add           - Add locally (deduplicated)
//! POST /wishlist/remove        - Remove locally
//! GET  /wishlist/contains/{id} - Membership test
//! POST /wishlist/like          - Remote like, then local add
//! POST /wishlist/unlike        - Remote unlike, then local remove
//!
//! # Auth
//! POST /auth/login             - Login via the marketplace API
//! POST /auth/logout            - Logout (clears session state)
//! GET  /api/auth/session       - Current user (401 when logged out)
//!
//! # Account (requires auth)
//! GET  /account                - Profile overview
//! GET  /account/orders         - Order history
//! GET  /account/orders/{id}    - Order detail
//!
//! # Shipper (requires auth + shipper role)
//! GET  /shipper/orders             - Assigned orders
//! POST /shipper/orders/{id}/status - Mark delivered / cancelled
//!
//! # Admin (requires auth + admin role)
//! GET  /admin/dashboard        - Aggregate stats
//! GET  /admin/users            - User table
//!
//! # Feed
//! GET  /feed                   - Aggregated fashion-news feed
//! ```

pub mod account;
pub mod admin;
pub mod auth;
pub mod cart;
pub mod feed;
pub mod home;
pub mod products;
pub mod shipper;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};
use tower_sessions::Session;

use crate::error::AppError;
use crate::middleware::api_token;
use crate::state::AppState;

/// Get the session's marketplace bearer token, or fail as unauthorized.
///
/// Authenticated upstream calls need the token stored at login; a session
/// that lost it (expiry, store failure) reads as logged out.
pub(crate) async fn session_bearer(session: &Session) -> Result<String, AppError> {
    api_token(session)
        .await
        .ok_or_else(|| AppError::Unauthorized("no marketplace token in session".to_string()))
}

/// Create the auth routes router.
///
/// Login is credential-bearing, so the whole group sits behind the strict
/// per-IP rate limiter.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route_layer(crate::middleware::auth_rate_limiter())
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/add", post(wishlist::add))
        .route("/remove", post(wishlist::remove))
        .route("/contains/{id}", get(wishlist::contains))
        .route("/like", post(wishlist::like))
        .route("/unlike", post(wishlist::unlike))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(account::index))
        .route("/orders", get(account::orders))
        .route("/orders/{id}", get(account::order_detail))
}

/// Create the shipper routes router.
pub fn shipper_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(shipper::orders))
        .route("/orders/{id}/status", post(shipper::update_status))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(admin::dashboard))
        .route("/users", get(admin::users))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product routes
        .nest("/products", product_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Wishlist routes
        .nest("/wishlist", wishlist_routes())
        // Account routes
        .nest("/account", account_routes())
        // Shipper workflow
        .nest("/shipper", shipper_routes())
        // Admin dashboard
        .nest("/admin", admin_routes())
        // Auth routes
        .nest("/auth", auth_routes())
        .route("/api/auth/session", get(auth::session))
        // Feed proxy
        .route("/feed", get(feed::index))
}
