//! Row types for the read-only reporting views.
//!
//! All three are pure projections with no side effects: a join view over
//! sales, a union view over customer and supplier contacts, and a
//! pass-through view of the catalog (which reuses
//! [`Product`](crate::product::Product) directly).

use serde::{Deserialize, Serialize};

/// One row of the `sales_overview` join view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleOverviewRow {
  pub transaction_id: i64,
  pub product_name:   String,
  pub price_cents:    i64,
  pub employee_name:  String,
  pub quantity:       i64,
}

/// Which base table a directory entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyKind {
  Customer,
  Supplier,
}

/// One row of the `contact_directory` union view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryEntry {
  pub name:         String,
  pub contact_info: String,
  pub kind:         PartyKind,
}
