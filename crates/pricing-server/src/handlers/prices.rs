//! Price lookup handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use pricing_core::Price;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;

/// Precio de un item.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResponse {
    pub item_code: String,
    pub price: Price,
}

/// Precios de varios items, en el orden pedido.
#[derive(Debug, Serialize)]
pub struct PricesResponse {
    pub prices: Vec<PriceResponse>,
}

/// Query params de GET /prices.
#[derive(Debug, Deserialize)]
pub struct PricesQuery {
    /// Item codes separados por coma.
    pub items: Option<String>,
}

/// GET /prices/{item_code}
#[instrument(skip_all, fields(item_code = %item_code))]
pub async fn get_price(
    State(state): State<AppState>,
    Path(item_code): Path<String>,
) -> Result<Json<PriceResponse>, AppError> {
    let price = state.cache().get_price_for(&item_code).await?;

    Ok(Json(PriceResponse { item_code, price }))
}

/// GET /prices?items=p1,p2
#[instrument(skip_all, fields(items = query.items.as_deref().unwrap_or("")))]
pub async fn get_prices(
    State(state): State<AppState>,
    Query(query): Query<PricesQuery>,
) -> Result<Json<PricesResponse>, AppError> {
    let item_codes = parse_item_codes(query.items.as_deref())?;

    let prices = state.cache().get_prices_for(item_codes.clone()).await?;

    tracing::debug!(count = prices.len(), "Batch lookup completed");

    Ok(Json(PricesResponse {
        prices: item_codes
            .into_iter()
            .zip(prices)
            .map(|(item_code, price)| PriceResponse { item_code, price })
            .collect(),
    }))
}

/// Splits a comma separated list, dropping blanks. Duplicates are kept.
fn parse_item_codes(items: Option<&str>) -> Result<Vec<String>, AppError> {
    let codes: Vec<String> = items
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    if codes.is_empty() {
        return Err(AppError::BadRequest(
            "Query parameter 'items' must list at least one item code".to_string(),
        ));
    }

    Ok(codes)
}
