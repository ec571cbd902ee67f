//! Customers and their feedback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
  pub customer_id:  i64,
  pub name:         String,
  pub contact_info: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCustomer {
  pub name:         String,
  pub contact_info: String,
}

/// Feedback left by a customer, optionally about a specific product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerFeedback {
  pub feedback_id:  i64,
  pub customer_id:  i64,
  pub product_id:   Option<i64>,
  pub comments:     String,
  pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFeedback {
  pub customer_id: i64,
  pub product_id:  Option<i64>,
  pub comments:    String,
}
