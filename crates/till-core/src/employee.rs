//! Employees and the store locations they are assigned to.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
  pub employee_id: i64,
  pub name:        String,
  pub position:    String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmployee {
  pub name:     String,
  pub position: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreLocation {
  pub location_id: i64,
  pub name:        String,
  pub address:     String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStoreLocation {
  pub name:    String,
  pub address: String,
}
