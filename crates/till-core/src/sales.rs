//! Sales transactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded sale. Sales are insert-only: no update or delete operation
/// exists for this entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesTransaction {
  pub transaction_id: i64,
  pub product_id:     i64,
  pub employee_id:    i64,
  pub quantity:       i64,
  pub sold_at:        DateTime<Utc>,
}

/// Input for [`crate::store::RetailStore::record_sale`]. Both references
/// must resolve to existing rows or the sale is rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSale {
  pub product_id:  i64,
  pub employee_id: i64,
  pub quantity:    i64,
}
