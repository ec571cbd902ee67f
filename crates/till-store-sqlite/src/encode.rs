//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Ids are SQLite integer
//! row ids and need no conversion.

use chrono::{DateTime, Utc};
use till_core::{
  audit::{ContactChange, SalesLogEntry},
  customer::CustomerFeedback,
  sales::SalesTransaction,
  views::PartyKind,
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── PartyKind ───────────────────────────────────────────────────────────────

pub fn decode_party(s: &str) -> Result<PartyKind> {
  match s {
    "customer" => Ok(PartyKind::Customer),
    "supplier" => Ok(PartyKind::Supplier),
    other => Err(Error::DateParse(format!("unknown party kind: {other:?}"))),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw columns of a `sales_transactions` row.
pub struct RawSale {
  pub transaction_id: i64,
  pub product_id:     i64,
  pub employee_id:    i64,
  pub quantity:       i64,
  pub sold_at:        String,
}

impl RawSale {
  pub fn into_sale(self) -> Result<SalesTransaction> {
    Ok(SalesTransaction {
      transaction_id: self.transaction_id,
      product_id:     self.product_id,
      employee_id:    self.employee_id,
      quantity:       self.quantity,
      sold_at:        decode_dt(&self.sold_at)?,
    })
  }
}

/// Raw columns of a `sales_log` row.
pub struct RawLogEntry {
  pub log_id:         i64,
  pub transaction_id: i64,
  pub product_id:     i64,
  pub employee_id:    i64,
  pub quantity:       i64,
  pub logged_at:      String,
}

impl RawLogEntry {
  pub fn into_entry(self) -> Result<SalesLogEntry> {
    Ok(SalesLogEntry {
      log_id:         self.log_id,
      transaction_id: self.transaction_id,
      product_id:     self.product_id,
      employee_id:    self.employee_id,
      quantity:       self.quantity,
      logged_at:      decode_dt(&self.logged_at)?,
    })
  }
}

/// Raw columns of a `supplier_contact_history` row.
pub struct RawContactChange {
  pub history_id:       i64,
  pub supplier_id:      i64,
  pub old_contact_info: String,
  pub new_contact_info: String,
  pub changed_at:       String,
}

impl RawContactChange {
  pub fn into_change(self) -> Result<ContactChange> {
    Ok(ContactChange {
      history_id:       self.history_id,
      supplier_id:      self.supplier_id,
      old_contact_info: self.old_contact_info,
      new_contact_info: self.new_contact_info,
      changed_at:       decode_dt(&self.changed_at)?,
    })
  }
}

/// Raw columns of a `customer_feedback` row.
pub struct RawFeedback {
  pub feedback_id:  i64,
  pub customer_id:  i64,
  pub product_id:   Option<i64>,
  pub comments:     String,
  pub submitted_at: String,
}

impl RawFeedback {
  pub fn into_feedback(self) -> Result<CustomerFeedback> {
    Ok(CustomerFeedback {
      feedback_id:  self.feedback_id,
      customer_id:  self.customer_id,
      product_id:   self.product_id,
      comments:     self.comments,
      submitted_at: decode_dt(&self.submitted_at)?,
    })
  }
}
