//! The audit layer: ledger row types and the observers that produce them.
//!
//! The original system expressed these rules as database triggers. Here each
//! is a pure function over the before/after images of a write, invoked by
//! the storage backend on its write path, inside the same transaction as
//! the triggering statement. A validation failure surfaces as an `Err`
//! before any row is written; there is no ambient rollback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  error::{Error, Result},
  product::NewProduct,
  sales::SalesTransaction,
  supplier::Supplier,
};

// ─── Ledger rows ─────────────────────────────────────────────────────────────

/// One `sales_log` row. Appended exactly once per recorded sale; never
/// updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesLogEntry {
  pub log_id:         i64,
  pub transaction_id: i64,
  pub product_id:     i64,
  pub employee_id:    i64,
  pub quantity:       i64,
  pub logged_at:      DateTime<Utc>,
}

/// A [`SalesLogEntry`] before the store has assigned its `log_id`.
#[derive(Debug, Clone)]
pub struct NewSalesLogEntry {
  pub transaction_id: i64,
  pub product_id:     i64,
  pub employee_id:    i64,
  pub quantity:       i64,
  pub logged_at:      DateTime<Utc>,
}

/// One `supplier_contact_history` row. Appended once per contact-info
/// change; never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactChange {
  pub history_id:       i64,
  pub supplier_id:      i64,
  pub old_contact_info: String,
  pub new_contact_info: String,
  pub changed_at:       DateTime<Utc>,
}

/// A [`ContactChange`] before the store has assigned its `history_id`.
#[derive(Debug, Clone)]
pub struct NewContactChange {
  pub supplier_id:      i64,
  pub old_contact_info: String,
  pub new_contact_info: String,
  pub changed_at:       DateTime<Utc>,
}

// ─── Observers ───────────────────────────────────────────────────────────────

/// Insert guard for products: all-or-nothing over the whole candidate
/// batch. Any negative price rejects the batch before a single row is
/// admitted; a price of zero is valid.
pub fn check_prices(batch: &[NewProduct]) -> Result<()> {
  for product in batch {
    if product.price_cents < 0 {
      return Err(Error::NegativePrice {
        name:        product.name.clone(),
        price_cents: product.price_cents,
      });
    }
  }
  Ok(())
}

/// Ledger entry for a recorded sale. Unconditional: every sale produces
/// exactly one entry carrying the same references and quantity, with the
/// timestamp captured at append time.
pub fn log_sale(sale: &SalesTransaction, at: DateTime<Utc>) -> NewSalesLogEntry {
  NewSalesLogEntry {
    transaction_id: sale.transaction_id,
    product_id:     sale.product_id,
    employee_id:    sale.employee_id,
    quantity:       sale.quantity,
    logged_at:      at,
  }
}

/// Contact-change observer. Emits a history row only when `contact_info`
/// differs between the before- and after-image of a supplier update; a
/// name-only change produces nothing. Images are matched by supplier id.
pub fn diff_contact(
  before: &Supplier,
  after:  &Supplier,
  at:     DateTime<Utc>,
) -> Option<NewContactChange> {
  debug_assert_eq!(before.supplier_id, after.supplier_id);

  if before.contact_info == after.contact_info {
    return None;
  }

  Some(NewContactChange {
    supplier_id:      after.supplier_id,
    old_contact_info: before.contact_info.clone(),
    new_contact_info: after.contact_info.clone(),
    changed_at:       at,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn product(name: &str, price_cents: i64) -> NewProduct {
    NewProduct { name: name.into(), price_cents }
  }

  #[test]
  fn guard_accepts_zero_price() {
    assert!(check_prices(&[product("gratis sample", 0)]).is_ok());
  }

  #[test]
  fn guard_rejects_whole_batch_on_one_negative() {
    let batch = [product("ok", 100), product("bad", -1), product("fine", 5)];
    let err = check_prices(&batch).unwrap_err();
    assert!(
      matches!(err, Error::NegativePrice { ref name, price_cents: -1 } if name == "bad")
    );
  }

  #[test]
  fn guard_accepts_empty_batch() {
    assert!(check_prices(&[]).is_ok());
  }

  #[test]
  fn log_sale_copies_all_references() {
    let sale = SalesTransaction {
      transaction_id: 7,
      product_id:     3,
      employee_id:    2,
      quantity:       4,
      sold_at:        Utc::now(),
    };
    let at = Utc::now();

    let entry = log_sale(&sale, at);
    assert_eq!(entry.transaction_id, 7);
    assert_eq!(entry.product_id, 3);
    assert_eq!(entry.employee_id, 2);
    assert_eq!(entry.quantity, 4);
    assert_eq!(entry.logged_at, at);
  }

  fn supplier(id: i64, name: &str, contact: &str) -> Supplier {
    Supplier {
      supplier_id:  id,
      name:         name.into(),
      contact_info: contact.into(),
    }
  }

  #[test]
  fn contact_change_recorded() {
    let before = supplier(1, "Acme", "a@acme.example");
    let after  = supplier(1, "Acme", "b@acme.example");

    let change = diff_contact(&before, &after, Utc::now()).unwrap();
    assert_eq!(change.supplier_id, 1);
    assert_eq!(change.old_contact_info, "a@acme.example");
    assert_eq!(change.new_contact_info, "b@acme.example");
  }

  #[test]
  fn name_only_change_is_ignored() {
    let before = supplier(1, "Acme", "a@acme.example");
    let after  = supplier(1, "Acme Ltd", "a@acme.example");
    assert!(diff_contact(&before, &after, Utc::now()).is_none());
  }
}
