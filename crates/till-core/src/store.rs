//! The `RetailStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `till-store-sqlite`).
//! Higher layers (`till-server`) depend on this abstraction, not on any
//! concrete backend.

use std::{future::Future, path::PathBuf};

use crate::{
  audit::{ContactChange, SalesLogEntry},
  customer::{Customer, CustomerFeedback, NewCustomer, NewFeedback},
  employee::{Employee, NewEmployee, NewStoreLocation, StoreLocation},
  product::{NewProduct, Product},
  sales::{NewSale, SalesTransaction},
  supplier::{NewSupplier, Supplier, SupplierUpdate},
  views::{DirectoryEntry, SaleOverviewRow},
};

/// Rotation window for [`RetailStore::backup`]: at most this many backup
/// artifacts are retained.
pub const DEFAULT_BACKUP_RETAIN: usize = 30;

/// Abstraction over a till storage backend.
///
/// Writes to base tables may carry audit side effects: recording a sale
/// appends one sales-log row, and a supplier update that changes
/// `contact_info` appends one contact-history row. Both ledgers are
/// append-only; no operation ever mutates or deletes their rows. All side
/// effects happen in the same transaction as the triggering write.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait RetailStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Products ──────────────────────────────────────────────────────────

  /// Insert a single product. Rejected with a validation error if the
  /// price is negative; nothing is written in that case.
  fn add_product(
    &self,
    input: NewProduct,
  ) -> impl Future<Output = Result<Product, Self::Error>> + Send + '_;

  /// Insert a batch of products, all-or-nothing: one negative price
  /// rejects the entire batch before any row is written.
  fn add_products(
    &self,
    batch: Vec<NewProduct>,
  ) -> impl Future<Output = Result<Vec<Product>, Self::Error>> + Send + '_;

  /// Retrieve a product by id. Returns `None` if not found.
  fn get_product(
    &self,
    product_id: i64,
  ) -> impl Future<Output = Result<Option<Product>, Self::Error>> + Send + '_;

  /// All products with `price_cents` strictly above `min_price_cents`.
  fn products_above_price(
    &self,
    min_price_cents: i64,
  ) -> impl Future<Output = Result<Vec<Product>, Self::Error>> + Send + '_;

  /// Delete a product by id.
  ///
  /// Fails with a referential error if any sale, log row, or supplier
  /// link still references the product; the deletion is refused, not
  /// silently ignored.
  fn delete_product(
    &self,
    product_id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Staff and locations ───────────────────────────────────────────────

  fn add_employee(
    &self,
    input: NewEmployee,
  ) -> impl Future<Output = Result<Employee, Self::Error>> + Send + '_;

  fn add_location(
    &self,
    input: NewStoreLocation,
  ) -> impl Future<Output = Result<StoreLocation, Self::Error>> + Send + '_;

  /// Assign an employee to a store location. Both ids must resolve.
  fn assign_employee(
    &self,
    employee_id: i64,
    location_id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Customers ─────────────────────────────────────────────────────────

  fn add_customer(
    &self,
    input: NewCustomer,
  ) -> impl Future<Output = Result<Customer, Self::Error>> + Send + '_;

  /// Overwrite a customer's contact info by id.
  fn update_customer_contact(
    &self,
    customer_id: i64,
    contact_info: String,
  ) -> impl Future<Output = Result<Customer, Self::Error>> + Send + '_;

  fn record_feedback(
    &self,
    input: NewFeedback,
  ) -> impl Future<Output = Result<CustomerFeedback, Self::Error>> + Send + '_;

  // ── Suppliers ─────────────────────────────────────────────────────────

  fn add_supplier(
    &self,
    input: NewSupplier,
  ) -> impl Future<Output = Result<Supplier, Self::Error>> + Send + '_;

  /// Apply a partial update to a supplier. If the update changes
  /// `contact_info`, exactly one contact-history row is appended in the
  /// same transaction; otherwise none is.
  fn update_supplier(
    &self,
    supplier_id: i64,
    update: SupplierUpdate,
  ) -> impl Future<Output = Result<Supplier, Self::Error>> + Send + '_;

  /// The append-only contact-history ledger for one supplier, oldest
  /// first.
  fn contact_history(
    &self,
    supplier_id: i64,
  ) -> impl Future<Output = Result<Vec<ContactChange>, Self::Error>> + Send + '_;

  /// Link a product to a supplier. Both ids must resolve.
  fn link_supplier(
    &self,
    product_id: i64,
    supplier_id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Sales ─────────────────────────────────────────────────────────────

  /// Record a sale. Appends exactly one sales-log row in the same
  /// transaction; the log append is unconditional and never rejects the
  /// sale.
  fn record_sale(
    &self,
    input: NewSale,
  ) -> impl Future<Output = Result<SalesTransaction, Self::Error>> + Send + '_;

  /// The append-only sales ledger, oldest first, optionally filtered to
  /// one transaction.
  fn sales_log(
    &self,
    transaction_id: Option<i64>,
  ) -> impl Future<Output = Result<Vec<SalesLogEntry>, Self::Error>> + Send + '_;

  // ── Views ─────────────────────────────────────────────────────────────

  /// The join view: every sale with its product and employee names.
  fn sales_overview(
    &self,
  ) -> impl Future<Output = Result<Vec<SaleOverviewRow>, Self::Error>> + Send + '_;

  /// The union view: customer and supplier contacts in one listing.
  fn contact_directory(
    &self,
  ) -> impl Future<Output = Result<Vec<DirectoryEntry>, Self::Error>> + Send + '_;

  /// The pass-through view of the product catalog.
  fn product_catalog(
    &self,
  ) -> impl Future<Output = Result<Vec<Product>, Self::Error>> + Send + '_;

  // ── Operational ───────────────────────────────────────────────────────

  /// Snapshot the backing database into `directory` and return the path
  /// of the new artifact. If `retain` or more backups already exist, the
  /// single oldest is evicted first (best-effort: a failed eviction must
  /// not block the new backup).
  fn backup(
    &self,
    directory: PathBuf,
    retain: usize,
  ) -> impl Future<Output = Result<PathBuf, Self::Error>> + Send + '_;
}
