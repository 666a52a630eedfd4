//! Generic session-persisted state handle.
//!
//! Wraps a single namespaced session key with a fail-soft load and a
//! best-effort save. Instantiated once per store (cart, wishlist); the
//! handles are plain values, so ownership is explicit rather than ambient.

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tower_sessions::Session;

/// A typed handle to one namespaced slot of the session store.
///
/// `load` never fails: absent or corrupt data falls back to `T::default()`.
/// `save` never fails the caller: persistence errors are logged and dropped.
pub struct PersistedState<T> {
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> PersistedState<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Create a handle bound to a namespaced session key.
    #[must_use]
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            _marker: PhantomData,
        }
    }

    /// The namespaced session key this handle owns.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// Load the state from the session.
    ///
    /// Falls back to `T::default()` when the key is absent, the stored value
    /// does not deserialize, or the session backend errors. Rehydration is
    /// never an error for the caller.
    pub async fn load(&self, session: &Session) -> T {
        match session.get::<T>(self.key).await {
            Ok(Some(state)) => state,
            Ok(None) => T::default(),
            Err(e) => {
                tracing::warn!(key = self.key, "discarding unreadable persisted state: {e}");
                T::default()
            }
        }
    }

    /// Write the state back to the session, best-effort.
    ///
    /// A persistence failure is logged and swallowed; the in-memory state the
    /// caller already holds is the visible effect of the mutation.
    pub async fn save(&self, session: &Session, state: &T) {
        if let Err(e) = session.insert(self.key, state).await {
            tracing::error!(key = self.key, "failed to persist state: {e}");
        }
    }

    /// Remove the persisted state entirely (e.g. on logout).
    pub async fn clear(&self, session: &Session) {
        if let Err(e) = session.remove::<serde_json::Value>(self.key).await {
            tracing::error!(key = self.key, "failed to clear persisted state: {e}");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::{MemoryStore, Session};

    use super::*;
    use crate::stores::cart::{Cart, NewCartItem};

    fn test_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn shirt() -> NewCartItem {
        NewCartItem {
            product_id: velour_core::ProductId::new(1),
            title: "Linen Shirt".to_string(),
            price: rust_decimal::Decimal::from(100_000),
            image: None,
            size: None,
            color: None,
            brand: None,
            category: None,
            seller: None,
        }
    }

    #[tokio::test]
    async fn test_load_absent_key_returns_default() {
        let session = test_session();
        let handle: PersistedState<Cart> = PersistedState::new("test.cart");

        let cart = handle.load(&session).await;
        assert!(cart.items().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_roundtrip() {
        let session = test_session();
        let handle: PersistedState<Cart> = PersistedState::new("test.cart");

        let mut cart = Cart::default();
        cart.add_item(shirt());
        handle.save(&session, &cart).await;

        let loaded = handle.load(&session).await;
        assert_eq!(loaded.total_items(), 1);
    }

    #[tokio::test]
    async fn test_load_corrupt_value_falls_back_to_default() {
        let session = test_session();
        let handle: PersistedState<Cart> = PersistedState::new("test.cart");

        // Something that is not a Cart under the cart key.
        session.insert("test.cart", "not-a-cart").await.unwrap();

        let cart = handle.load(&session).await;
        assert!(cart.items().is_empty());
    }

    #[tokio::test]
    async fn test_clear_removes_state() {
        let session = test_session();
        let handle: PersistedState<Cart> = PersistedState::new("test.cart");

        let mut cart = Cart::default();
        cart.add_item(shirt());
        handle.save(&session, &cart).await;
        handle.clear(&session).await;

        let loaded = handle.load(&session).await;
        assert!(loaded.items().is_empty());
    }
}
