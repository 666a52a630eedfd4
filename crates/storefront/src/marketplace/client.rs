//! Marketplace API client implementation.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use velour_core::{OrderId, OrderStatus, ProductId};

use crate::config::MarketplaceConfig;
use crate::marketplace::MarketplaceError;
use crate::marketplace::cache::{CacheKey, CacheValue};
use crate::marketplace::types::{
    AccountUser, AdminStats, AuthSession, Order, Product, ProductPage, UserSummary,
};

/// Catalog listing filters.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    /// 1-based page number; 0 is treated as 1 by the API.
    pub page: u32,
    /// Free-text search.
    pub q: Option<String>,
    /// Category slug filter.
    pub category: Option<String>,
}

/// Client for the upstream marketplace API.
///
/// Catalog reads are cached for 5 minutes; everything else goes straight
/// through. Cloning is cheap.
#[derive(Clone)]
pub struct MarketplaceClient {
    inner: Arc<MarketplaceClientInner>,
}

struct MarketplaceClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<CacheKey, CacheValue>,
}

impl MarketplaceClient {
    /// Create a new marketplace API client.
    #[must_use]
    pub fn new(config: &MarketplaceConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(MarketplaceClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                cache,
            }),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Map a non-success response to a [`MarketplaceError`].
    async fn error_for(response: reqwest::Response) -> MarketplaceError {
        let status = response.status();
        let message = response.text().await.unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED => MarketplaceError::Unauthenticated,
            StatusCode::NOT_FOUND => MarketplaceError::NotFound(message),
            _ => MarketplaceError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Issue a GET and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, MarketplaceError> {
        let mut request = self.inner.client.get(self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| MarketplaceError::Parse(e.to_string()))
    }

    /// Issue a POST with a JSON body and decode the JSON response.
    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, MarketplaceError> {
        let mut request = self.inner.client.post(self.url(path)).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| MarketplaceError::Parse(e.to_string()))
    }

    /// Issue a POST where only the status matters.
    async fn post_unit<B: Serialize + Sync>(
        &self,
        path: &str,
        token: &str,
        body: &B,
    ) -> Result<(), MarketplaceError> {
        let response = self
            .inner
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }
        Ok(())
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Exchange credentials for a bearer token and the account record.
    ///
    /// # Errors
    ///
    /// Returns `MarketplaceError::Unauthenticated` on bad credentials.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, MarketplaceError> {
        self.post_json(
            "/auth/login",
            None,
            &serde_json::json!({ "email": email, "password": password }),
        )
        .await
    }

    /// Fetch the account behind a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `MarketplaceError::Unauthenticated` when the token is expired
    /// or rejected.
    #[instrument(skip(self, token))]
    pub async fn current_user(&self, token: &str) -> Result<AccountUser, MarketplaceError> {
        self.get_json("/auth/me", Some(token)).await
    }

    // =========================================================================
    // Wishlist sync
    // =========================================================================

    /// Associate a product with the current account ("like").
    ///
    /// # Errors
    ///
    /// Returns the upstream failure unchanged; callers must not mutate local
    /// state unless this succeeds.
    #[instrument(skip(self, token))]
    pub async fn like_product(
        &self,
        token: &str,
        product_id: ProductId,
    ) -> Result<(), MarketplaceError> {
        self.post_unit(
            &format!("/products/{product_id}/like"),
            token,
            &serde_json::json!({}),
        )
        .await
    }

    /// Disassociate a product from the current account ("unlike").
    ///
    /// # Errors
    ///
    /// Returns the upstream failure unchanged; callers must not mutate local
    /// state unless this succeeds.
    #[instrument(skip(self, token))]
    pub async fn unlike_product(
        &self,
        token: &str,
        product_id: ProductId,
    ) -> Result<(), MarketplaceError> {
        self.post_unit(
            &format!("/products/{product_id}/unlike"),
            token,
            &serde_json::json!({}),
        )
        .await
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// List products, cached per (page, query, category) for 5 minutes.
    ///
    /// # Errors
    ///
    /// Returns `MarketplaceError` if the API call fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: &ProductQuery) -> Result<ProductPage, MarketplaceError> {
        let key = CacheKey::Products {
            page: query.page.max(1),
            query: query.q.clone(),
            category: query.category.clone(),
        };

        if let Some(CacheValue::Products(page)) = self.inner.cache.get(&key).await {
            debug!("catalog page served from cache");
            return Ok(page);
        }

        let mut path = format!("/products?page={}", query.page.max(1));
        if let Some(q) = &query.q {
            path.push_str(&format!("&q={}", urlencoding::encode(q)));
        }
        if let Some(category) = &query.category {
            path.push_str(&format!("&category={}", urlencoding::encode(category)));
        }

        let page: ProductPage = self.get_json(&path, None).await?;
        self.inner
            .cache
            .insert(key, CacheValue::Products(page.clone()))
            .await;
        Ok(page)
    }

    /// Fetch one product, cached for 5 minutes.
    ///
    /// # Errors
    ///
    /// Returns `MarketplaceError::NotFound` for unknown IDs.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, MarketplaceError> {
        let key = CacheKey::Product(id.as_i64());

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&key).await {
            debug!("product served from cache");
            return Ok(*product);
        }

        let product: Product = self.get_json(&format!("/products/{id}"), None).await?;
        self.inner
            .cache
            .insert(key, CacheValue::Product(Box::new(product.clone())))
            .await;
        Ok(product)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Orders placed by the current account, newest first.
    ///
    /// # Errors
    ///
    /// Returns `MarketplaceError` if the API call fails.
    #[instrument(skip(self, token))]
    pub async fn orders_for_user(&self, token: &str) -> Result<Vec<Order>, MarketplaceError> {
        self.get_json("/orders", Some(token)).await
    }

    /// One order, scoped to the current account.
    ///
    /// # Errors
    ///
    /// Returns `MarketplaceError::NotFound` for unknown or foreign orders.
    #[instrument(skip(self, token))]
    pub async fn get_order(&self, token: &str, id: OrderId) -> Result<Order, MarketplaceError> {
        self.get_json(&format!("/orders/{id}"), Some(token)).await
    }

    /// Orders assigned to the current shipper account.
    ///
    /// # Errors
    ///
    /// Returns `MarketplaceError` if the API call fails.
    #[instrument(skip(self, token))]
    pub async fn shipper_orders(&self, token: &str) -> Result<Vec<Order>, MarketplaceError> {
        self.get_json("/shipper/orders", Some(token)).await
    }

    /// Update an order's status (shipper workflow).
    ///
    /// # Errors
    ///
    /// Returns `MarketplaceError` if the API rejects the transition.
    #[instrument(skip(self, token))]
    pub async fn update_order_status(
        &self,
        token: &str,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, MarketplaceError> {
        self.post_json(
            &format!("/shipper/orders/{id}/status"),
            Some(token),
            &serde_json::json!({ "status": status }),
        )
        .await
    }

    // =========================================================================
    // Admin
    // =========================================================================

    /// Aggregate counters for the admin dashboard.
    ///
    /// # Errors
    ///
    /// Returns `MarketplaceError` if the API call fails.
    #[instrument(skip(self, token))]
    pub async fn admin_stats(&self, token: &str) -> Result<AdminStats, MarketplaceError> {
        self.get_json("/admin/stats", Some(token)).await
    }

    /// All registered users, for the admin user table.
    ///
    /// # Errors
    ///
    /// Returns `MarketplaceError` if the API call fails.
    #[instrument(skip(self, token))]
    pub async fn admin_list_users(&self, token: &str) -> Result<Vec<UserSummary>, MarketplaceError> {
        self.get_json("/admin/users", Some(token)).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_client_url_joins_base() {
        let client = MarketplaceClient::new(&crate::config::MarketplaceConfig {
            base_url: "http://localhost:8080".to_string(),
        });
        assert_eq!(client.url("/products/1"), "http://localhost:8080/products/1");
    }
}
