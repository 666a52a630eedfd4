//! Product browsing route handlers.
//!
//! Thin pass-throughs to the marketplace catalog; responses are cached in
//! the client layer for 5 minutes.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use velour_core::ProductId;

use crate::error::Result;
use crate::marketplace::{Product, ProductPage, ProductQuery};
use crate::state::AppState;

/// Listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    pub page: Option<u32>,
    pub q: Option<String>,
    pub category: Option<String>,
}

/// Product listing with optional search and category filters.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<ProductPage>> {
    let page = state
        .marketplace()
        .list_products(&ProductQuery {
            page: query.page.unwrap_or(1),
            q: query.q,
            category: query.category,
        })
        .await?;

    Ok(Json(page))
}

/// Product detail.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Product>> {
    let product = state.marketplace().get_product(ProductId::new(id)).await?;
    Ok(Json(product))
}
