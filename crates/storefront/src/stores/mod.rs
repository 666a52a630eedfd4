//! Session-persisted commerce state.
//!
//! Cart and wishlist state live in the session under distinct namespaced
//! keys. Every mutation follows the same protocol: load the state from the
//! session (falling back to empty on absent or corrupt data), mutate it in
//! memory, then write it back best-effort. The in-memory mutation is the
//! visible effect; a failed write never surfaces to the caller.

pub mod cart;
pub mod persisted;
pub mod wishlist;

pub use cart::{Cart, CartItem, NewCartItem};
pub use persisted::PersistedState;
pub use wishlist::{Wishlist, WishlistEntry};

use crate::models::session_keys;

/// Handle for the session-persisted cart.
pub const CART_STATE: PersistedState<Cart> = PersistedState::new(session_keys::CART);

/// Handle for the session-persisted wishlist.
pub const WISHLIST_STATE: PersistedState<Wishlist> = PersistedState::new(session_keys::WISHLIST);
