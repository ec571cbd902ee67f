//! HTTP surface for the till retail store.
//!
//! Exposes an axum [`Router`] backed by any [`RetailStore`]. Requests are
//! authenticated with HTTP Basic against two configured principals: a
//! read/write account and an administrator (backups).

pub mod auth;
pub mod error;
pub mod handlers;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post, put},
};
use serde::Deserialize;
use till_core::store::{DEFAULT_BACKUP_RETAIN, RetailStore};
use tower_http::trace::TraceLayer;

use auth::{AuthConfig, Principal, Role};

// ─── Configuration ────────────────────────────────────────────────────────────

/// One account as it appears in `config.toml`.
#[derive(Deserialize, Clone)]
pub struct PrincipalConfig {
  pub username:      String,
  pub password_hash: String,
}

/// Backup settings. The directory is always explicit — the server never
/// infers a default path.
#[derive(Deserialize, Clone)]
pub struct BackupConfig {
  pub directory: PathBuf,
  #[serde(default = "default_backup_retain")]
  pub retain:    usize,
}

fn default_backup_retain() -> usize { DEFAULT_BACKUP_RETAIN }

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  pub backup:     BackupConfig,
  pub readwrite:  PrincipalConfig,
  pub admin:      PrincipalConfig,
}

impl ServerConfig {
  /// The two provisioned principals as an [`AuthConfig`].
  pub fn auth_config(&self) -> AuthConfig {
    AuthConfig {
      principals: vec![
        Principal {
          username:      self.readwrite.username.clone(),
          password_hash: self.readwrite.password_hash.clone(),
          role:          Role::ReadWrite,
        },
        Principal {
          username:      self.admin.username.clone(),
          password_hash: self.admin.password_hash.clone(),
          role:          Role::Admin,
        },
      ],
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: RetailStore> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
  pub auth:   Arc<AuthConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the till server.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: RetailStore + Clone + Send + Sync + 'static,
  S::Error: Into<ApiError> + Send + Sync + 'static,
{
  use handlers::{admin, customers, products, reports, sales, staff, suppliers};

  Router::new()
    // Products
    .route(
      "/products",
      get(products::list::<S>).post(products::create::<S>),
    )
    .route("/products/batch", post(products::create_batch::<S>))
    .route(
      "/products/{id}",
      get(products::get_one::<S>).delete(products::delete_one::<S>),
    )
    .route("/products/{id}/suppliers", post(suppliers::link_product::<S>))
    // Staff and locations
    .route("/employees", post(staff::create_employee::<S>))
    .route("/locations", post(staff::create_location::<S>))
    .route("/locations/{id}/employees", post(staff::assign_employee::<S>))
    // Customers
    .route("/customers", post(customers::create::<S>))
    .route("/customers/{id}/contact", put(customers::update_contact::<S>))
    .route("/feedback", post(customers::create_feedback::<S>))
    // Suppliers
    .route("/suppliers", post(suppliers::create::<S>))
    .route("/suppliers/{id}", put(suppliers::update::<S>))
    .route(
      "/suppliers/{id}/contact-history",
      get(suppliers::contact_history::<S>),
    )
    // Sales
    .route("/sales", post(sales::create::<S>))
    .route("/sales/log", get(sales::log::<S>))
    // Reports
    .route("/reports/sales-overview", get(reports::sales_overview::<S>))
    .route(
      "/reports/contact-directory",
      get(reports::contact_directory::<S>),
    )
    .route("/reports/catalog", get(reports::catalog::<S>))
    // Admin
    .route("/admin/backup", post(admin::backup::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use base64::Engine as _;
  use base64::engine::general_purpose::STANDARD as B64;
  use rand_core::OsRng;
  use till_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  struct TestServer {
    state:       AppState<SqliteStore>,
    // Held so the backup directory outlives the test.
    _backup_dir: tempfile::TempDir,
  }

  async fn make_server() -> TestServer {
    let store      = SqliteStore::open_in_memory().await.unwrap();
    let backup_dir = tempfile::tempdir().unwrap();

    let hash = |password: &str| {
      let salt = SaltString::generate(&mut OsRng);
      Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .unwrap()
        .to_string()
    };

    let config = ServerConfig {
      host:       "127.0.0.1".to_string(),
      port:       8080,
      store_path: PathBuf::from(":memory:"),
      backup:     BackupConfig {
        directory: backup_dir.path().to_path_buf(),
        retain:    30,
      },
      readwrite:  PrincipalConfig {
        username:      "clerk".to_string(),
        password_hash: hash("counter"),
      },
      admin:      PrincipalConfig {
        username:      "boss".to_string(),
        password_hash: hash("keys"),
      },
    };

    let auth  = config.auth_config();
    let state = AppState {
      store:  Arc::new(store),
      config: Arc::new(config),
      auth:   Arc::new(auth),
    };

    TestServer { state, _backup_dir: backup_dir }
  }

  fn basic(user: &str, pass: &str) -> String {
    format!("Basic {}", B64.encode(format!("{user}:{pass}")))
  }

  async fn request(
    state:  AppState<SqliteStore>,
    method: &str,
    uri:    &str,
    auth:   Option<(&str, &str)>,
    body:   Option<serde_json::Value>,
  ) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((user, pass)) = auth {
      builder = builder.header(header::AUTHORIZATION, basic(user, pass));
    }
    let req = match body {
      Some(json) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    router(state).oneshot(req).await.unwrap()
  }

  async fn json_body(resp: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  const RW: Option<(&str, &str)>    = Some(("clerk", "counter"));
  const ADMIN: Option<(&str, &str)> = Some(("boss", "keys"));

  // ── Auth ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn unauthenticated_request_returns_401() {
    let server = make_server().await;
    let resp = request(server.state.clone(), "GET", "/products", None, None).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));
  }

  #[tokio::test]
  async fn backup_requires_admin_role() {
    let server = make_server().await;

    let denied =
      request(server.state.clone(), "POST", "/admin/backup", RW, None).await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);

    let allowed =
      request(server.state.clone(), "POST", "/admin/backup", ADMIN, None).await;
    assert_eq!(allowed.status(), StatusCode::OK);

    let body = json_body(allowed).await;
    let path = PathBuf::from(body["path"].as_str().unwrap());
    assert!(path.exists());
  }

  // ── Products ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_and_fetch_product() {
    let server = make_server().await;

    let created = request(
      server.state.clone(),
      "POST",
      "/products",
      RW,
      Some(serde_json::json!({ "name": "beans", "price_cents": 1250 })),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let id = json_body(created).await["product_id"].as_i64().unwrap();

    let fetched = request(
      server.state.clone(),
      "GET",
      &format!("/products/{id}"),
      RW,
      None,
    )
    .await;
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(json_body(fetched).await["name"], "beans");
  }

  #[tokio::test]
  async fn negative_price_returns_422() {
    let server = make_server().await;

    let resp = request(
      server.state.clone(),
      "POST",
      "/products",
      RW,
      Some(serde_json::json!({ "name": "broken", "price_cents": -1 })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Nothing was admitted.
    let list = request(server.state.clone(), "GET", "/products", RW, None).await;
    assert_eq!(json_body(list).await.as_array().unwrap().len(), 0);
  }

  #[tokio::test]
  async fn above_price_filter_is_strict() {
    let server = make_server().await;

    request(
      server.state.clone(),
      "POST",
      "/products/batch",
      RW,
      Some(serde_json::json!([
        { "name": "cheap", "price_cents": 500 },
        { "name": "edge",  "price_cents": 1000 },
        { "name": "dear",  "price_cents": 1500 },
      ])),
    )
    .await;

    let resp = request(
      server.state.clone(),
      "GET",
      "/products?above_price=1000",
      RW,
      None,
    )
    .await;
    let body = json_body(resp).await;
    let names: Vec<_> = body
      .as_array()
      .unwrap()
      .iter()
      .map(|p| p["name"].as_str().unwrap())
      .collect();
    assert_eq!(names, vec!["dear"]);
  }

  #[tokio::test]
  async fn unknown_product_returns_404() {
    let server = make_server().await;
    let resp =
      request(server.state.clone(), "GET", "/products/99", RW, None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Sales and the ledger ────────────────────────────────────────────────────

  async fn seed_sale_refs(state: &AppState<SqliteStore>) -> (i64, i64) {
    let product = request(
      state.clone(),
      "POST",
      "/products",
      RW,
      Some(serde_json::json!({ "name": "espresso", "price_cents": 250 })),
    )
    .await;
    let product_id = json_body(product).await["product_id"].as_i64().unwrap();

    let employee = request(
      state.clone(),
      "POST",
      "/employees",
      RW,
      Some(serde_json::json!({ "name": "Alice", "position": "cashier" })),
    )
    .await;
    let employee_id = json_body(employee).await["employee_id"].as_i64().unwrap();

    (product_id, employee_id)
  }

  #[tokio::test]
  async fn sale_appends_one_ledger_row() {
    let server = make_server().await;
    let (product_id, employee_id) = seed_sale_refs(&server.state).await;

    let sale = request(
      server.state.clone(),
      "POST",
      "/sales",
      RW,
      Some(serde_json::json!({
        "product_id":  product_id,
        "employee_id": employee_id,
        "quantity":    2,
      })),
    )
    .await;
    assert_eq!(sale.status(), StatusCode::CREATED);
    let transaction_id = json_body(sale).await["transaction_id"].as_i64().unwrap();

    let log = request(
      server.state.clone(),
      "GET",
      &format!("/sales/log?transaction_id={transaction_id}"),
      RW,
      None,
    )
    .await;
    let entries = json_body(log).await;
    assert_eq!(entries.as_array().unwrap().len(), 1);
    assert_eq!(entries[0]["quantity"], 2);
  }

  #[tokio::test]
  async fn delete_referenced_product_returns_409() {
    let server = make_server().await;
    let (product_id, employee_id) = seed_sale_refs(&server.state).await;

    request(
      server.state.clone(),
      "POST",
      "/sales",
      RW,
      Some(serde_json::json!({
        "product_id":  product_id,
        "employee_id": employee_id,
        "quantity":    1,
      })),
    )
    .await;

    let resp = request(
      server.state.clone(),
      "DELETE",
      &format!("/products/{product_id}"),
      RW,
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
  }

  // ── Suppliers ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn contact_change_shows_in_history() {
    let server = make_server().await;

    let created = request(
      server.state.clone(),
      "POST",
      "/suppliers",
      RW,
      Some(serde_json::json!({ "name": "Acme", "contact_info": "A" })),
    )
    .await;
    let id = json_body(created).await["supplier_id"].as_i64().unwrap();

    request(
      server.state.clone(),
      "PUT",
      &format!("/suppliers/{id}"),
      RW,
      Some(serde_json::json!({ "contact_info": "B" })),
    )
    .await;

    let history = request(
      server.state.clone(),
      "GET",
      &format!("/suppliers/{id}/contact-history"),
      RW,
      None,
    )
    .await;
    let rows = json_body(history).await;
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["old_contact_info"], "A");
    assert_eq!(rows[0]["new_contact_info"], "B");
  }

  // ── Reports ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn sales_overview_includes_names() {
    let server = make_server().await;
    let (product_id, employee_id) = seed_sale_refs(&server.state).await;

    request(
      server.state.clone(),
      "POST",
      "/sales",
      RW,
      Some(serde_json::json!({
        "product_id":  product_id,
        "employee_id": employee_id,
        "quantity":    3,
      })),
    )
    .await;

    let resp = request(
      server.state.clone(),
      "GET",
      "/reports/sales-overview",
      RW,
      None,
    )
    .await;
    let rows = json_body(resp).await;
    assert_eq!(rows[0]["product_name"], "espresso");
    assert_eq!(rows[0]["employee_name"], "Alice");
  }
}
