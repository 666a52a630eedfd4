//! Database access for the storefront `PostgreSQL` instance.
//!
//! # Database: `velour_storefront`
//!
//! The database holds session state only; the marketplace API is the source
//! of truth for products, orders and users.
//!
//! ## Tables
//!
//! - `session` - tower-sessions storage (created by the session store's
//!   migrator at startup)

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
