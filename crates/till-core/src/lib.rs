//! Core types and trait definitions for the till retail store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod audit;
pub mod customer;
pub mod employee;
pub mod error;
pub mod product;
pub mod sales;
pub mod store;
pub mod supplier;
pub mod views;

pub use error::{Error, Result};
