//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("unauthorized")]
  Unauthorized,

  #[error("forbidden")]
  Forbidden,

  #[error("not found: {0}")]
  NotFound(String),

  /// A write rejected by the insert guard (e.g. negative price).
  #[error("validation failed: {0}")]
  Validation(String),

  /// A write refused by a referential constraint.
  #[error("conflict: {0}")]
  Conflict(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    if matches!(self, ApiError::Unauthorized) {
      let mut res = (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "unauthorized" })),
      )
        .into_response();
      res.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        HeaderValue::from_static("Basic realm=\"till\""),
      );
      return res;
    }

    let (status, message) = match &self {
      ApiError::Unauthorized => unreachable!(),
      ApiError::Forbidden => (StatusCode::FORBIDDEN, self.to_string()),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Validation(m) => (StatusCode::UNPROCESSABLE_ENTITY, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}

impl From<till_store_sqlite::Error> for ApiError {
  fn from(err: till_store_sqlite::Error) -> Self {
    use till_core::Error as Core;

    match err {
      till_store_sqlite::Error::Core(core) => match core {
        Core::NegativePrice { .. } => ApiError::Validation(core.to_string()),
        Core::ProductNotFound(_)
        | Core::CustomerNotFound(_)
        | Core::SupplierNotFound(_) => ApiError::NotFound(core.to_string()),
        Core::ProductInUse(_)
        | Core::InvalidSaleReference { .. }
        | Core::MissingReference(_) => ApiError::Conflict(core.to_string()),
      },
      other => ApiError::Store(Box::new(other)),
    }
  }
}
