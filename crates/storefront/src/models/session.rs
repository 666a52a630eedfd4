//! Session-related types.
//!
//! Types stored in the session for authentication and commerce state.

use serde::{Deserialize, Serialize};

use velour_core::{Email, Role, UserId};

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
/// Re-read from the session store on every guard evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's marketplace ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Role as classified by the marketplace API.
    pub role: Role,
}

impl CurrentUser {
    /// Whether this user may access the admin dashboard.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Whether this user may access the shipper workflow.
    #[must_use]
    pub fn is_shipper(&self) -> bool {
        self.role == Role::Shipper
    }
}

/// Session keys for authentication and commerce state.
///
/// Each persisted store owns exactly one namespaced key; the envelopes are
/// logically independent of each other.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "velour.user";

    /// Key for the marketplace API bearer token of the current user.
    pub const API_TOKEN: &str = "velour.token";

    /// Key for the persisted cart state.
    pub const CART: &str = "velour.cart";

    /// Key for the persisted wishlist state.
    pub const WISHLIST: &str = "velour.wishlist";
}
