//! Handlers for `/employees` and `/locations` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/employees` | |
//! | `POST` | `/locations` | |
//! | `POST` | `/locations/:id/employees` | Assign an employee |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use till_core::{
  employee::{NewEmployee, NewStoreLocation},
  store::RetailStore,
};

use crate::{AppState, auth::Authenticated, error::ApiError};

/// `POST /employees`
pub async fn create_employee<S>(
  State(state): State<AppState<S>>,
  _auth: Authenticated,
  Json(body): Json<NewEmployee>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RetailStore + Clone + Send + Sync + 'static,
  S::Error: Into<ApiError>,
{
  let employee = state.store.add_employee(body).await.map_err(Into::into)?;
  Ok((StatusCode::CREATED, Json(employee)))
}

/// `POST /locations`
pub async fn create_location<S>(
  State(state): State<AppState<S>>,
  _auth: Authenticated,
  Json(body): Json<NewStoreLocation>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RetailStore + Clone + Send + Sync + 'static,
  S::Error: Into<ApiError>,
{
  let location = state.store.add_location(body).await.map_err(Into::into)?;
  Ok((StatusCode::CREATED, Json(location)))
}

#[derive(Debug, Deserialize)]
pub struct AssignBody {
  pub employee_id: i64,
}

/// `POST /locations/:id/employees` — body: `{"employee_id":<id>}`
pub async fn assign_employee<S>(
  State(state): State<AppState<S>>,
  _auth: Authenticated,
  Path(location_id): Path<i64>,
  Json(body): Json<AssignBody>,
) -> Result<StatusCode, ApiError>
where
  S: RetailStore + Clone + Send + Sync + 'static,
  S::Error: Into<ApiError>,
{
  state
    .store
    .assign_employee(body.employee_id, location_id)
    .await
    .map_err(Into::into)?;
  Ok(StatusCode::NO_CONTENT)
}
