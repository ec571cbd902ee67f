//! Handlers for the read-only `/reports` views.
//!
//! All three are pure projections over the base tables; none has side
//! effects.

use axum::{Json, extract::State};
use till_core::{
  product::Product,
  store::RetailStore,
  views::{DirectoryEntry, SaleOverviewRow},
};

use crate::{AppState, auth::Authenticated, error::ApiError};

/// `GET /reports/sales-overview` — the join view.
pub async fn sales_overview<S>(
  State(state): State<AppState<S>>,
  _auth: Authenticated,
) -> Result<Json<Vec<SaleOverviewRow>>, ApiError>
where
  S: RetailStore + Clone + Send + Sync + 'static,
  S::Error: Into<ApiError>,
{
  let rows = state.store.sales_overview().await.map_err(Into::into)?;
  Ok(Json(rows))
}

/// `GET /reports/contact-directory` — the union view.
pub async fn contact_directory<S>(
  State(state): State<AppState<S>>,
  _auth: Authenticated,
) -> Result<Json<Vec<DirectoryEntry>>, ApiError>
where
  S: RetailStore + Clone + Send + Sync + 'static,
  S::Error: Into<ApiError>,
{
  let rows = state.store.contact_directory().await.map_err(Into::into)?;
  Ok(Json(rows))
}

/// `GET /reports/catalog` — the pass-through view.
pub async fn catalog<S>(
  State(state): State<AppState<S>>,
  _auth: Authenticated,
) -> Result<Json<Vec<Product>>, ApiError>
where
  S: RetailStore + Clone + Send + Sync + 'static,
  S::Error: Into<ApiError>,
{
  let rows = state.store.product_catalog().await.map_err(Into::into)?;
  Ok(Json(rows))
}
