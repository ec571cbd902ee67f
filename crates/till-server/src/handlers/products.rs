//! Handlers for `/products` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/products` | Optional `?above_price=<cents>` (strict `>`) |
//! | `POST`   | `/products` | Single product; guarded |
//! | `POST`   | `/products/batch` | All-or-nothing batch; guarded |
//! | `GET`    | `/products/:id` | 404 if not found |
//! | `DELETE` | `/products/:id` | 409 while referenced by sales |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use till_core::{
  product::{NewProduct, Product},
  store::RetailStore,
};

use crate::{AppState, auth::Authenticated, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub above_price: Option<i64>,
}

/// `GET /products[?above_price=<cents>]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  _auth: Authenticated,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Product>>, ApiError>
where
  S: RetailStore + Clone + Send + Sync + 'static,
  S::Error: Into<ApiError>,
{
  let products = match params.above_price {
    Some(min) => state.store.products_above_price(min).await,
    None => state.store.product_catalog().await,
  }
  .map_err(Into::into)?;
  Ok(Json(products))
}

/// `POST /products` — body: `{"name":"beans","price_cents":1250}`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  _auth: Authenticated,
  Json(body): Json<NewProduct>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RetailStore + Clone + Send + Sync + 'static,
  S::Error: Into<ApiError>,
{
  let product = state.store.add_product(body).await.map_err(Into::into)?;
  Ok((StatusCode::CREATED, Json(product)))
}

/// `POST /products/batch` — body: an array of products, all-or-nothing.
pub async fn create_batch<S>(
  State(state): State<AppState<S>>,
  _auth: Authenticated,
  Json(body): Json<Vec<NewProduct>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RetailStore + Clone + Send + Sync + 'static,
  S::Error: Into<ApiError>,
{
  let products = state.store.add_products(body).await.map_err(Into::into)?;
  Ok((StatusCode::CREATED, Json(products)))
}

/// `GET /products/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  _auth: Authenticated,
  Path(id): Path<i64>,
) -> Result<Json<Product>, ApiError>
where
  S: RetailStore + Clone + Send + Sync + 'static,
  S::Error: Into<ApiError>,
{
  let product = state
    .store
    .get_product(id)
    .await
    .map_err(Into::into)?
    .ok_or_else(|| ApiError::NotFound(format!("product {id} not found")))?;
  Ok(Json(product))
}

/// `DELETE /products/:id` — refused with 409 while any sale references it.
pub async fn delete_one<S>(
  State(state): State<AppState<S>>,
  _auth: Authenticated,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
  S: RetailStore + Clone + Send + Sync + 'static,
  S::Error: Into<ApiError>,
{
  state.store.delete_product(id).await.map_err(Into::into)?;
  Ok(StatusCode::NO_CONTENT)
}
