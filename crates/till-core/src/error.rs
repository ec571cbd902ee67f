//! Error types for `till-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("product {name:?} has a negative price ({price_cents} cents)")]
  NegativePrice { name: String, price_cents: i64 },

  #[error("product not found: {0}")]
  ProductNotFound(i64),

  #[error("customer not found: {0}")]
  CustomerNotFound(i64),

  #[error("supplier not found: {0}")]
  SupplierNotFound(i64),

  #[error("product {0} is referenced by recorded sales")]
  ProductInUse(i64),

  #[error(
    "sale references a missing row (product {product_id}, employee {employee_id})"
  )]
  InvalidSaleReference { product_id: i64, employee_id: i64 },

  #[error("insert into {0} references a missing row")]
  MissingReference(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
