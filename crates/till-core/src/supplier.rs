//! Suppliers.
//!
//! Supplier rows are mutable, but every change to `contact_info` leaves a
//! row in the contact-history ledger (see [`crate::audit`]).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
  pub supplier_id:  i64,
  pub name:         String,
  pub contact_info: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSupplier {
  pub name:         String,
  pub contact_info: String,
}

/// Partial update applied to a supplier row. `None` fields are left as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupplierUpdate {
  pub name:         Option<String>,
  pub contact_info: Option<String>,
}
