//! JSON endpoint handlers, one module per resource.

pub mod admin;
pub mod customers;
pub mod products;
pub mod reports;
pub mod sales;
pub mod staff;
pub mod suppliers;
