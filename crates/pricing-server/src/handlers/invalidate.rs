//! Cache invalidation endpoint handlers.

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Serialize;
use tracing::instrument;

use crate::state::AppState;

/// Response para operaciones de invalidación.
#[derive(Debug, Serialize)]
pub struct InvalidateResponse {
    /// Número de entries invalidadas.
    pub invalidated: usize,
    /// Mensaje descriptivo.
    pub message: String,
}

/// DELETE /prices
/// Invalida toda la cache.
#[instrument(skip_all)]
pub async fn invalidate_all(State(state): State<AppState>) -> Json<InvalidateResponse> {
    let count = state.cache().invalidate_all();

    tracing::info!(count = count, "All cached prices invalidated");

    Json(InvalidateResponse {
        invalidated: count,
        message: format!("Invalidated all {} cached prices", count),
    })
}

/// DELETE /prices/{item_code}
/// Invalida el precio de un item. No es error si no estaba en cache.
#[instrument(skip_all, fields(item_code = %item_code))]
pub async fn invalidate_price(
    State(state): State<AppState>,
    Path(item_code): Path<String>,
) -> Json<InvalidateResponse> {
    let removed = state.cache().invalidate(&item_code);

    tracing::info!(item_code = %item_code, removed, "Cached price invalidated");

    let (invalidated, message) = if removed {
        (1, format!("Invalidated cached price for '{}'", item_code))
    } else {
        (0, format!("No cached price for '{}'", item_code))
    };

    Json(InvalidateResponse {
        invalidated,
        message,
    })
}
