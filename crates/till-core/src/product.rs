//! Product catalog types.
//!
//! Prices are integer cents. The "never negative" invariant is enforced by
//! the insert guard in [`crate::audit`], not by the schema, so a failed
//! batch surfaces as an error before any row is written.

use serde::{Deserialize, Serialize};

/// A row in the product catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
  pub product_id:  i64,
  pub name:        String,
  pub price_cents: i64,
}

/// Input for a product insert; the store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
  pub name:        String,
  pub price_cents: i64,
}
