//! [`SqliteStore`] — the SQLite implementation of [`RetailStore`].

use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use till_core::{
  audit::{self, ContactChange, SalesLogEntry},
  customer::{Customer, CustomerFeedback, NewCustomer, NewFeedback},
  employee::{Employee, NewEmployee, NewStoreLocation, StoreLocation},
  product::{NewProduct, Product},
  sales::{NewSale, SalesTransaction},
  store::RetailStore,
  supplier::{NewSupplier, Supplier, SupplierUpdate},
  views::{DirectoryEntry, SaleOverviewRow},
};

use crate::{
  encode::{
    decode_party, encode_dt, RawContactChange, RawFeedback, RawLogEntry,
    RawSale,
  },
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A till retail store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Whether `err` is the engine rejecting a write over a constraint
/// (foreign key, primary key, NOT NULL).
fn is_constraint_violation(err: &tokio_rusqlite::Error) -> bool {
  matches!(
    err,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(code, _))
      if code.code == rusqlite::ErrorCode::ConstraintViolation
  )
}

// ─── RetailStore impl ────────────────────────────────────────────────────────

impl RetailStore for SqliteStore {
  type Error = Error;

  // ── Products ──────────────────────────────────────────────────────────────

  async fn add_product(&self, input: NewProduct) -> Result<Product> {
    let mut products = self.add_products(vec![input]).await?;
    // add_products returns exactly as many rows as it was given.
    Ok(products.remove(0))
  }

  async fn add_products(&self, batch: Vec<NewProduct>) -> Result<Vec<Product>> {
    // The guard sees the whole batch before anything touches the database:
    // one bad price and no row is written.
    audit::check_prices(&batch)?;

    let products = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut inserted = Vec::with_capacity(batch.len());
        for product in batch {
          tx.execute(
            "INSERT INTO products (name, price_cents) VALUES (?1, ?2)",
            rusqlite::params![product.name, product.price_cents],
          )?;
          inserted.push(Product {
            product_id:  tx.last_insert_rowid(),
            name:        product.name,
            price_cents: product.price_cents,
          });
        }
        tx.commit()?;
        Ok(inserted)
      })
      .await?;

    Ok(products)
  }

  async fn get_product(&self, product_id: i64) -> Result<Option<Product>> {
    let product = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT product_id, name, price_cents FROM products
               WHERE product_id = ?1",
              rusqlite::params![product_id],
              |row| {
                Ok(Product {
                  product_id:  row.get(0)?,
                  name:        row.get(1)?,
                  price_cents: row.get(2)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    Ok(product)
  }

  async fn products_above_price(&self, min_price_cents: i64) -> Result<Vec<Product>> {
    let products = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT product_id, name, price_cents FROM products
           WHERE price_cents > ?1
           ORDER BY product_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![min_price_cents], |row| {
            Ok(Product {
              product_id:  row.get(0)?,
              name:        row.get(1)?,
              price_cents: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(products)
  }

  async fn delete_product(&self, product_id: i64) -> Result<()> {
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM products WHERE product_id = ?1",
          rusqlite::params![product_id],
        )?)
      })
      .await
      .map_err(|e| {
        if is_constraint_violation(&e) {
          till_core::Error::ProductInUse(product_id).into()
        } else {
          Error::Database(e)
        }
      })?;

    if affected == 0 {
      return Err(till_core::Error::ProductNotFound(product_id).into());
    }
    Ok(())
  }

  // ── Staff and locations ───────────────────────────────────────────────────

  async fn add_employee(&self, input: NewEmployee) -> Result<Employee> {
    let employee = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO employees (name, position) VALUES (?1, ?2)",
          rusqlite::params![input.name, input.position],
        )?;
        Ok(Employee {
          employee_id: conn.last_insert_rowid(),
          name:        input.name,
          position:    input.position,
        })
      })
      .await?;

    Ok(employee)
  }

  async fn add_location(&self, input: NewStoreLocation) -> Result<StoreLocation> {
    let location = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO store_locations (name, address) VALUES (?1, ?2)",
          rusqlite::params![input.name, input.address],
        )?;
        Ok(StoreLocation {
          location_id: conn.last_insert_rowid(),
          name:        input.name,
          address:     input.address,
        })
      })
      .await?;

    Ok(location)
  }

  async fn assign_employee(&self, employee_id: i64, location_id: i64) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO employee_locations (employee_id, location_id)
           VALUES (?1, ?2)",
          rusqlite::params![employee_id, location_id],
        )?;
        Ok(())
      })
      .await
      .map_err(|e| {
        if is_constraint_violation(&e) {
          till_core::Error::MissingReference("employee_locations").into()
        } else {
          Error::Database(e)
        }
      })
  }

  // ── Customers ─────────────────────────────────────────────────────────────

  async fn add_customer(&self, input: NewCustomer) -> Result<Customer> {
    let customer = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO customers (name, contact_info) VALUES (?1, ?2)",
          rusqlite::params![input.name, input.contact_info],
        )?;
        Ok(Customer {
          customer_id:  conn.last_insert_rowid(),
          name:         input.name,
          contact_info: input.contact_info,
        })
      })
      .await?;

    Ok(customer)
  }

  async fn update_customer_contact(
    &self,
    customer_id: i64,
    contact_info: String,
  ) -> Result<Customer> {
    let updated: Option<Customer> = self
      .conn
      .call(move |conn| {
        let affected = conn.execute(
          "UPDATE customers SET contact_info = ?2 WHERE customer_id = ?1",
          rusqlite::params![customer_id, contact_info],
        )?;
        if affected == 0 {
          return Ok(None);
        }
        let customer = conn.query_row(
          "SELECT customer_id, name, contact_info FROM customers
           WHERE customer_id = ?1",
          rusqlite::params![customer_id],
          |row| {
            Ok(Customer {
              customer_id:  row.get(0)?,
              name:         row.get(1)?,
              contact_info: row.get(2)?,
            })
          },
        )?;
        Ok(Some(customer))
      })
      .await?;

    updated.ok_or_else(|| till_core::Error::CustomerNotFound(customer_id).into())
  }

  async fn record_feedback(&self, input: NewFeedback) -> Result<CustomerFeedback> {
    let submitted_at = Utc::now();
    let at_str       = encode_dt(submitted_at);

    let feedback = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO customer_feedback (customer_id, product_id, comments, submitted_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![input.customer_id, input.product_id, input.comments, at_str],
        )?;
        Ok(CustomerFeedback {
          feedback_id: conn.last_insert_rowid(),
          customer_id: input.customer_id,
          product_id:  input.product_id,
          comments:    input.comments,
          submitted_at,
        })
      })
      .await
      .map_err(|e| {
        if is_constraint_violation(&e) {
          till_core::Error::MissingReference("customer_feedback").into()
        } else {
          Error::Database(e)
        }
      })?;

    Ok(feedback)
  }

  // ── Suppliers ─────────────────────────────────────────────────────────────

  async fn add_supplier(&self, input: NewSupplier) -> Result<Supplier> {
    let supplier = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO suppliers (name, contact_info) VALUES (?1, ?2)",
          rusqlite::params![input.name, input.contact_info],
        )?;
        Ok(Supplier {
          supplier_id:  conn.last_insert_rowid(),
          name:         input.name,
          contact_info: input.contact_info,
        })
      })
      .await?;

    Ok(supplier)
  }

  async fn update_supplier(
    &self,
    supplier_id: i64,
    update: SupplierUpdate,
  ) -> Result<Supplier> {
    let changed_at = Utc::now();

    let updated: Option<Supplier> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        // Before-image; matched to the after-image by supplier_id.
        let before: Option<Supplier> = tx
          .query_row(
            "SELECT supplier_id, name, contact_info FROM suppliers
             WHERE supplier_id = ?1",
            rusqlite::params![supplier_id],
            |row| {
              Ok(Supplier {
                supplier_id:  row.get(0)?,
                name:         row.get(1)?,
                contact_info: row.get(2)?,
              })
            },
          )
          .optional()?;

        let Some(before) = before else {
          return Ok(None);
        };

        let after = Supplier {
          supplier_id,
          name:         update.name.unwrap_or_else(|| before.name.clone()),
          contact_info: update
            .contact_info
            .unwrap_or_else(|| before.contact_info.clone()),
        };

        tx.execute(
          "UPDATE suppliers SET name = ?2, contact_info = ?3
           WHERE supplier_id = ?1",
          rusqlite::params![supplier_id, after.name, after.contact_info],
        )?;

        // History row only when contact_info actually changed.
        if let Some(change) = audit::diff_contact(&before, &after, changed_at) {
          tx.execute(
            "INSERT INTO supplier_contact_history
               (supplier_id, old_contact_info, new_contact_info, changed_at)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
              change.supplier_id,
              change.old_contact_info,
              change.new_contact_info,
              encode_dt(change.changed_at),
            ],
          )?;
        }

        tx.commit()?;
        Ok(Some(after))
      })
      .await?;

    updated.ok_or_else(|| till_core::Error::SupplierNotFound(supplier_id).into())
  }

  async fn contact_history(&self, supplier_id: i64) -> Result<Vec<ContactChange>> {
    let raws: Vec<RawContactChange> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT history_id, supplier_id, old_contact_info, new_contact_info, changed_at
           FROM supplier_contact_history
           WHERE supplier_id = ?1
           ORDER BY history_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![supplier_id], |row| {
            Ok(RawContactChange {
              history_id:       row.get(0)?,
              supplier_id:      row.get(1)?,
              old_contact_info: row.get(2)?,
              new_contact_info: row.get(3)?,
              changed_at:       row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContactChange::into_change).collect()
  }

  async fn link_supplier(&self, product_id: i64, supplier_id: i64) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO product_suppliers (product_id, supplier_id)
           VALUES (?1, ?2)",
          rusqlite::params![product_id, supplier_id],
        )?;
        Ok(())
      })
      .await
      .map_err(|e| {
        if is_constraint_violation(&e) {
          till_core::Error::MissingReference("product_suppliers").into()
        } else {
          Error::Database(e)
        }
      })
  }

  // ── Sales ─────────────────────────────────────────────────────────────────

  async fn record_sale(&self, input: NewSale) -> Result<SalesTransaction> {
    let sold_at     = Utc::now();
    let product_id  = input.product_id;
    let employee_id = input.employee_id;

    let sale = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        tx.execute(
          "INSERT INTO sales_transactions (product_id, employee_id, quantity, sold_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![
            input.product_id,
            input.employee_id,
            input.quantity,
            encode_dt(sold_at),
          ],
        )?;

        let sale = SalesTransaction {
          transaction_id: tx.last_insert_rowid(),
          product_id:     input.product_id,
          employee_id:    input.employee_id,
          quantity:       input.quantity,
          sold_at,
        };

        // Ledger append: unconditional, same transaction, timestamp
        // captured at append time.
        let entry = audit::log_sale(&sale, sold_at);
        tx.execute(
          "INSERT INTO sales_log (transaction_id, product_id, employee_id, quantity, logged_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            entry.transaction_id,
            entry.product_id,
            entry.employee_id,
            entry.quantity,
            encode_dt(entry.logged_at),
          ],
        )?;

        tx.commit()?;
        Ok(sale)
      })
      .await
      .map_err(|e| {
        if is_constraint_violation(&e) {
          till_core::Error::InvalidSaleReference { product_id, employee_id }.into()
        } else {
          Error::Database(e)
        }
      })?;

    Ok(sale)
  }

  async fn sales_log(&self, transaction_id: Option<i64>) -> Result<Vec<SalesLogEntry>> {
    let raws: Vec<RawLogEntry> = self
      .conn
      .call(move |conn| {
        let map_row = |row: &rusqlite::Row<'_>| {
          Ok(RawLogEntry {
            log_id:         row.get(0)?,
            transaction_id: row.get(1)?,
            product_id:     row.get(2)?,
            employee_id:    row.get(3)?,
            quantity:       row.get(4)?,
            logged_at:      row.get(5)?,
          })
        };

        let rows = if let Some(id) = transaction_id {
          let mut stmt = conn.prepare(
            "SELECT log_id, transaction_id, product_id, employee_id, quantity, logged_at
             FROM sales_log WHERE transaction_id = ?1 ORDER BY log_id",
          )?;
          stmt
            .query_map(rusqlite::params![id], map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(
            "SELECT log_id, transaction_id, product_id, employee_id, quantity, logged_at
             FROM sales_log ORDER BY log_id",
          )?;
          stmt
            .query_map([], map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLogEntry::into_entry).collect()
  }

  // ── Views ─────────────────────────────────────────────────────────────────

  async fn sales_overview(&self) -> Result<Vec<SaleOverviewRow>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT transaction_id, product_name, price_cents, employee_name, quantity
           FROM sales_overview ORDER BY transaction_id",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(SaleOverviewRow {
              transaction_id: row.get(0)?,
              product_name:   row.get(1)?,
              price_cents:    row.get(2)?,
              employee_name:  row.get(3)?,
              quantity:       row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(rows)
  }

  async fn contact_directory(&self) -> Result<Vec<DirectoryEntry>> {
    let raws: Vec<(String, String, String)> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT name, contact_info, party FROM contact_directory ORDER BY party, name",
        )?;
        let rows = stmt
          .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(|(name, contact_info, party)| {
        Ok(DirectoryEntry {
          name,
          contact_info,
          kind: decode_party(&party)?,
        })
      })
      .collect()
  }

  async fn product_catalog(&self) -> Result<Vec<Product>> {
    let products = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT product_id, name, price_cents FROM product_catalog
           ORDER BY product_id",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(Product {
              product_id:  row.get(0)?,
              name:        row.get(1)?,
              price_cents: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(products)
  }

  // ── Operational ───────────────────────────────────────────────────────────

  async fn backup(&self, directory: PathBuf, retain: usize) -> Result<PathBuf> {
    self.snapshot(&directory, retain).await
  }
}

// Single-row reads over the base tables.
impl SqliteStore {
  /// Fetch one sale by id.
  pub async fn get_sale(&self, transaction_id: i64) -> Result<Option<SalesTransaction>> {
    let raw: Option<RawSale> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT transaction_id, product_id, employee_id, quantity, sold_at
               FROM sales_transactions WHERE transaction_id = ?1",
              rusqlite::params![transaction_id],
              |row| {
                Ok(RawSale {
                  transaction_id: row.get(0)?,
                  product_id:     row.get(1)?,
                  employee_id:    row.get(2)?,
                  quantity:       row.get(3)?,
                  sold_at:        row.get(4)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawSale::into_sale).transpose()
  }

  /// Fetch one feedback row by id.
  pub async fn get_feedback(&self, feedback_id: i64) -> Result<Option<CustomerFeedback>> {
    let raw: Option<RawFeedback> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT feedback_id, customer_id, product_id, comments, submitted_at
               FROM customer_feedback WHERE feedback_id = ?1",
              rusqlite::params![feedback_id],
              |row| {
                Ok(RawFeedback {
                  feedback_id:  row.get(0)?,
                  customer_id:  row.get(1)?,
                  product_id:   row.get(2)?,
                  comments:     row.get(3)?,
                  submitted_at: row.get(4)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawFeedback::into_feedback).transpose()
  }
}
