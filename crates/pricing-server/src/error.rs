use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pricing_cache::CacheError;
use serde::Serialize;

#[derive(Debug)]
pub enum AppError {
    /// El servicio no conoce el item
    NotFound { item_code: String },

    /// Parametros invalidos
    BadRequest(String),

    /// El servicio de precios fallo
    Upstream(String),

    /// Error interno
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl From<CacheError> for AppError {
    fn from(err: CacheError) -> Self {
        match &err {
            CacheError::Service { item_code, .. } if err.is_not_found() => AppError::NotFound {
                item_code: item_code.clone(),
            },
            CacheError::Service { .. } => AppError::Upstream(err.to_string()),
            CacheError::Incomplete { .. } => AppError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            AppError::NotFound { item_code } => (
                StatusCode::NOT_FOUND,
                "Not Found",
                format!("No price found for item '{}'", item_code),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad Request", msg),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, "Bad Gateway", msg),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                msg,
            ),
        };

        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), message = %message, "Request failed");
        }

        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
