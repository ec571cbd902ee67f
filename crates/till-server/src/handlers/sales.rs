//! Handlers for `/sales` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/sales` | Records a sale; appends one ledger row |
//! | `GET`  | `/sales/log` | Optional `?transaction_id=<id>` |

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use till_core::{
  audit::SalesLogEntry,
  sales::NewSale,
  store::RetailStore,
};

use crate::{AppState, auth::Authenticated, error::ApiError};

/// `POST /sales` — body: `{"product_id":1,"employee_id":2,"quantity":3}`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  _auth: Authenticated,
  Json(body): Json<NewSale>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RetailStore + Clone + Send + Sync + 'static,
  S::Error: Into<ApiError>,
{
  let sale = state.store.record_sale(body).await.map_err(Into::into)?;
  Ok((StatusCode::CREATED, Json(sale)))
}

#[derive(Debug, Deserialize)]
pub struct LogParams {
  pub transaction_id: Option<i64>,
}

/// `GET /sales/log[?transaction_id=<id>]`
pub async fn log<S>(
  State(state): State<AppState<S>>,
  _auth: Authenticated,
  Query(params): Query<LogParams>,
) -> Result<Json<Vec<SalesLogEntry>>, ApiError>
where
  S: RetailStore + Clone + Send + Sync + 'static,
  S::Error: Into<ApiError>,
{
  let entries = state
    .store
    .sales_log(params.transaction_id)
    .await
    .map_err(Into::into)?;
  Ok(Json(entries))
}
