//! Handlers for `/suppliers` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/suppliers` | |
//! | `PUT`  | `/suppliers/:id` | Partial update; contact changes are ledgered |
//! | `GET`  | `/suppliers/:id/contact-history` | Oldest first |
//! | `POST` | `/products/:id/suppliers` | Link a supplier to a product |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use till_core::{
  audit::ContactChange,
  store::RetailStore,
  supplier::{NewSupplier, Supplier, SupplierUpdate},
};

use crate::{AppState, auth::Authenticated, error::ApiError};

/// `POST /suppliers`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  _auth: Authenticated,
  Json(body): Json<NewSupplier>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RetailStore + Clone + Send + Sync + 'static,
  S::Error: Into<ApiError>,
{
  let supplier = state.store.add_supplier(body).await.map_err(Into::into)?;
  Ok((StatusCode::CREATED, Json(supplier)))
}

/// `PUT /suppliers/:id` — body: `{"name":...,"contact_info":...}`, both
/// optional. A contact change appends one history row.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  _auth: Authenticated,
  Path(id): Path<i64>,
  Json(body): Json<SupplierUpdate>,
) -> Result<Json<Supplier>, ApiError>
where
  S: RetailStore + Clone + Send + Sync + 'static,
  S::Error: Into<ApiError>,
{
  let supplier = state
    .store
    .update_supplier(id, body)
    .await
    .map_err(Into::into)?;
  Ok(Json(supplier))
}

/// `GET /suppliers/:id/contact-history`
pub async fn contact_history<S>(
  State(state): State<AppState<S>>,
  _auth: Authenticated,
  Path(id): Path<i64>,
) -> Result<Json<Vec<ContactChange>>, ApiError>
where
  S: RetailStore + Clone + Send + Sync + 'static,
  S::Error: Into<ApiError>,
{
  let history = state.store.contact_history(id).await.map_err(Into::into)?;
  Ok(Json(history))
}

#[derive(Debug, Deserialize)]
pub struct LinkBody {
  pub supplier_id: i64,
}

/// `POST /products/:id/suppliers` — body: `{"supplier_id":<id>}`
pub async fn link_product<S>(
  State(state): State<AppState<S>>,
  _auth: Authenticated,
  Path(product_id): Path<i64>,
  Json(body): Json<LinkBody>,
) -> Result<StatusCode, ApiError>
where
  S: RetailStore + Clone + Send + Sync + 'static,
  S::Error: Into<ApiError>,
{
  state
    .store
    .link_supplier(product_id, body.supplier_id)
    .await
    .map_err(Into::into)?;
  Ok(StatusCode::NO_CONTENT)
}
