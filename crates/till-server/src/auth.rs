//! HTTP Basic-auth verification and role extractors.
//!
//! Two principals are provisioned from configuration: a read/write account
//! for day-to-day operations and an administrator for backups.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};
use till_core::store::RetailStore;

/// What a principal is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  /// Day-to-day reads and writes.
  ReadWrite,
  /// Everything, including backups.
  Admin,
}

/// One account accepted by this server instance.
#[derive(Clone)]
pub struct Principal {
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
  pub role:          Role,
}

/// Credentials accepted as valid for this server instance.
#[derive(Clone)]
pub struct AuthConfig {
  pub principals: Vec<Principal>,
}

/// Verify credentials directly from headers and return the caller's role.
pub fn verify_auth(headers: &HeaderMap, config: &AuthConfig) -> Result<Role, ApiError> {
  let header_val = headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(ApiError::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| ApiError::Unauthorized)?;
  let creds   = std::str::from_utf8(&decoded).map_err(|_| ApiError::Unauthorized)?;

  let (username, password) = creds.split_once(':').ok_or(ApiError::Unauthorized)?;

  let principal = config
    .principals
    .iter()
    .find(|p| p.username == username)
    .ok_or(ApiError::Unauthorized)?;

  let parsed_hash = PasswordHash::new(&principal.password_hash)
    .map_err(|_| ApiError::Unauthorized)?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| ApiError::Unauthorized)?;

  Ok(principal.role)
}

/// Present in a handler means the request carried valid credentials.
/// Wraps the caller's role.
pub struct Authenticated(pub Role);

/// Like [`Authenticated`], but rejects non-admin principals with 403.
pub struct AdminOnly;

impl<S> FromRequestParts<AppState<S>> for Authenticated
where
  S: RetailStore + Clone + Send + Sync + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    Ok(Authenticated(verify_auth(&parts.headers, &state.auth)?))
  }
}

impl<S> FromRequestParts<AppState<S>> for AdminOnly
where
  S: RetailStore + Clone + Send + Sync + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    match verify_auth(&parts.headers, &state.auth)? {
      Role::Admin => Ok(AdminOnly),
      Role::ReadWrite => Err(ApiError::Forbidden),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
  use axum::http::header;
  use rand_core::OsRng;

  fn hash(password: &str) -> String {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .unwrap()
      .to_string()
  }

  fn config() -> AuthConfig {
    AuthConfig {
      principals: vec![
        Principal {
          username:      "clerk".into(),
          password_hash: hash("counter"),
          role:          Role::ReadWrite,
        },
        Principal {
          username:      "boss".into(),
          password_hash: hash("keys"),
          role:          Role::Admin,
        },
      ],
    }
  }

  fn headers_with(user: &str, pass: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let value = format!("Basic {}", B64.encode(format!("{user}:{pass}")));
    headers.insert(header::AUTHORIZATION, value.parse().unwrap());
    headers
  }

  #[test]
  fn correct_credentials_return_role() {
    let cfg = config();
    assert_eq!(
      verify_auth(&headers_with("clerk", "counter"), &cfg).unwrap(),
      Role::ReadWrite
    );
    assert_eq!(
      verify_auth(&headers_with("boss", "keys"), &cfg).unwrap(),
      Role::Admin
    );
  }

  #[test]
  fn wrong_password_is_rejected() {
    let cfg = config();
    assert!(matches!(
      verify_auth(&headers_with("clerk", "wrong"), &cfg),
      Err(ApiError::Unauthorized)
    ));
  }

  #[test]
  fn unknown_user_is_rejected() {
    let cfg = config();
    assert!(matches!(
      verify_auth(&headers_with("ghost", "counter"), &cfg),
      Err(ApiError::Unauthorized)
    ));
  }

  #[test]
  fn missing_header_is_rejected() {
    let cfg = config();
    assert!(matches!(
      verify_auth(&HeaderMap::new(), &cfg),
      Err(ApiError::Unauthorized)
    ));
  }

  #[test]
  fn invalid_base64_is_rejected() {
    let cfg = config();
    let mut headers = HeaderMap::new();
    headers.insert(
      header::AUTHORIZATION,
      "Basic !!!not-base64!!!".parse().unwrap(),
    );
    assert!(matches!(
      verify_auth(&headers, &cfg),
      Err(ApiError::Unauthorized)
    ));
  }
}
