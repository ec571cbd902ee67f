//! Administrative endpoints. All require the admin principal.

use std::path::PathBuf;

use axum::{Json, extract::State};
use serde::Serialize;
use till_core::store::RetailStore;

use crate::{AppState, auth::AdminOnly, error::ApiError};

#[derive(Debug, Serialize)]
pub struct BackupResponse {
  pub path: PathBuf,
}

/// `POST /admin/backup` — snapshot the database into the configured
/// directory, rotating out the oldest artifact once the window is full.
pub async fn backup<S>(
  State(state): State<AppState<S>>,
  _admin: AdminOnly,
) -> Result<Json<BackupResponse>, ApiError>
where
  S: RetailStore + Clone + Send + Sync + 'static,
  S::Error: Into<ApiError>,
{
  let path = state
    .store
    .backup(
      state.config.backup.directory.clone(),
      state.config.backup.retain,
    )
    .await
    .map_err(Into::into)?;

  Ok(Json(BackupResponse { path }))
}
