//! Handlers for `/customers` and `/feedback` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/customers` | |
//! | `PUT`  | `/customers/:id/contact` | Overwrites contact info |
//! | `POST` | `/feedback` | Customer id must resolve |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use till_core::{
  customer::{Customer, NewCustomer, NewFeedback},
  store::RetailStore,
};

use crate::{AppState, auth::Authenticated, error::ApiError};

/// `POST /customers`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  _auth: Authenticated,
  Json(body): Json<NewCustomer>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RetailStore + Clone + Send + Sync + 'static,
  S::Error: Into<ApiError>,
{
  let customer = state.store.add_customer(body).await.map_err(Into::into)?;
  Ok((StatusCode::CREATED, Json(customer)))
}

#[derive(Debug, Deserialize)]
pub struct ContactBody {
  pub contact_info: String,
}

/// `PUT /customers/:id/contact` — body: `{"contact_info":"..."}`
pub async fn update_contact<S>(
  State(state): State<AppState<S>>,
  _auth: Authenticated,
  Path(id): Path<i64>,
  Json(body): Json<ContactBody>,
) -> Result<Json<Customer>, ApiError>
where
  S: RetailStore + Clone + Send + Sync + 'static,
  S::Error: Into<ApiError>,
{
  let customer = state
    .store
    .update_customer_contact(id, body.contact_info)
    .await
    .map_err(Into::into)?;
  Ok(Json(customer))
}

/// `POST /feedback`
pub async fn create_feedback<S>(
  State(state): State<AppState<S>>,
  _auth: Authenticated,
  Json(body): Json<NewFeedback>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RetailStore + Clone + Send + Sync + 'static,
  S::Error: Into<ApiError>,
{
  let feedback = state
    .store
    .record_feedback(body)
    .await
    .map_err(Into::into)?;
  Ok((StatusCode::CREATED, Json(feedback)))
}
