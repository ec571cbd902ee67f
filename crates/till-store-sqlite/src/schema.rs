//! SQL schema for the till SQLite store.
//!
//! Executed once at connection startup. `PRAGMA foreign_keys = ON` makes
//! the engine reject any write whose references do not resolve, including
//! deletes of rows that other tables still point at.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS products (
    product_id  INTEGER PRIMARY KEY,
    name        TEXT NOT NULL,
    price_cents INTEGER NOT NULL   -- never negative; enforced by the insert guard
);

CREATE TABLE IF NOT EXISTS employees (
    employee_id INTEGER PRIMARY KEY,
    name        TEXT NOT NULL,
    position    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS customers (
    customer_id  INTEGER PRIMARY KEY,
    name         TEXT NOT NULL,
    contact_info TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS suppliers (
    supplier_id  INTEGER PRIMARY KEY,
    name         TEXT NOT NULL,
    contact_info TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS store_locations (
    location_id INTEGER PRIMARY KEY,
    name        TEXT NOT NULL,
    address     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS sales_transactions (
    transaction_id INTEGER PRIMARY KEY,
    product_id     INTEGER NOT NULL REFERENCES products(product_id),
    employee_id    INTEGER NOT NULL REFERENCES employees(employee_id),
    quantity       INTEGER NOT NULL,
    sold_at        TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

CREATE TABLE IF NOT EXISTS product_suppliers (
    product_id  INTEGER NOT NULL REFERENCES products(product_id),
    supplier_id INTEGER NOT NULL REFERENCES suppliers(supplier_id),
    PRIMARY KEY (product_id, supplier_id)
);

CREATE TABLE IF NOT EXISTS employee_locations (
    employee_id INTEGER NOT NULL REFERENCES employees(employee_id),
    location_id INTEGER NOT NULL REFERENCES store_locations(location_id),
    PRIMARY KEY (employee_id, location_id)
);

CREATE TABLE IF NOT EXISTS customer_feedback (
    feedback_id  INTEGER PRIMARY KEY,
    customer_id  INTEGER NOT NULL REFERENCES customers(customer_id),
    product_id   INTEGER REFERENCES products(product_id),
    comments     TEXT NOT NULL,
    submitted_at TEXT NOT NULL
);

-- The sales ledger is strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS sales_log (
    log_id         INTEGER PRIMARY KEY,
    transaction_id INTEGER NOT NULL REFERENCES sales_transactions(transaction_id),
    product_id     INTEGER NOT NULL REFERENCES products(product_id),
    employee_id    INTEGER NOT NULL REFERENCES employees(employee_id),
    quantity       INTEGER NOT NULL,
    logged_at      TEXT NOT NULL
);

-- Contact-history ledger; append-only like sales_log.
CREATE TABLE IF NOT EXISTS supplier_contact_history (
    history_id       INTEGER PRIMARY KEY,
    supplier_id      INTEGER NOT NULL REFERENCES suppliers(supplier_id),
    old_contact_info TEXT NOT NULL,
    new_contact_info TEXT NOT NULL,
    changed_at       TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS sales_product_idx   ON sales_transactions(product_id);
CREATE INDEX IF NOT EXISTS sales_employee_idx  ON sales_transactions(employee_id);
CREATE INDEX IF NOT EXISTS log_transaction_idx ON sales_log(transaction_id);
CREATE INDEX IF NOT EXISTS history_supplier_idx ON supplier_contact_history(supplier_id);
CREATE INDEX IF NOT EXISTS products_price_idx  ON products(price_cents);

CREATE VIEW IF NOT EXISTS sales_overview AS
    SELECT t.transaction_id,
           p.name AS product_name,
           p.price_cents,
           e.name AS employee_name,
           t.quantity
    FROM sales_transactions t
    JOIN products  p ON p.product_id  = t.product_id
    JOIN employees e ON e.employee_id = t.employee_id;

CREATE VIEW IF NOT EXISTS contact_directory AS
    SELECT name, contact_info, 'customer' AS party FROM customers
    UNION ALL
    SELECT name, contact_info, 'supplier' AS party FROM suppliers;

CREATE VIEW IF NOT EXISTS product_catalog AS
    SELECT product_id, name, price_cents FROM products;

PRAGMA user_version = 1;
";
