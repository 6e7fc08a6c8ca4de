//! Postgres-backed store implementations.
//!
//! The store traits are synchronous; these implementations bridge onto the
//! ambient tokio runtime (`block_in_place` + `block_on`, multi-thread runtime
//! required), keeping domain and service code free of async plumbing. Every
//! record column is typed; a `position` sequence preserves insertion order
//! for deterministic listing ties.

use std::future::Future;
use std::sync::Arc;

use sqlx::{PgPool, Row};
use tokio::runtime::Handle;

use stockbook_catalog::Item;
use stockbook_core::{ItemId, TransactionId};
use stockbook_ledger::{MovementKind, Transaction};

use super::{CatalogStore, LedgerStore, StoreError};

/// Create both collections when absent. Not a migration facility; the schema
/// is a fixed pair of tables.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS items (
            id        UUID PRIMARY KEY,
            name      TEXT NOT NULL,
            unit      TEXT NOT NULL,
            alt_unit  TEXT NOT NULL,
            factor    TEXT NOT NULL,
            alert_qty DOUBLE PRECISION NOT NULL,
            position  BIGSERIAL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(backend)?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS transactions (
            id           UUID PRIMARY KEY,
            date         DATE NOT NULL,
            kind         TEXT NOT NULL,
            item_name    TEXT NOT NULL,
            quantity     DOUBLE PRECISION NOT NULL,
            alt_quantity DOUBLE PRECISION NOT NULL,
            unit         TEXT NOT NULL,
            alt_unit     TEXT NOT NULL,
            rate         DOUBLE PRECISION NOT NULL,
            remarks      TEXT NOT NULL,
            position     BIGSERIAL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(backend)?;

    sqlx::query("CREATE INDEX IF NOT EXISTS transactions_item_name ON transactions (item_name)")
        .execute(pool)
        .await
        .map_err(backend)?;

    Ok(())
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

/// Drive a store future to completion from a synchronous trait method.
fn run<F, T>(future: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    let handle = Handle::try_current().map_err(|e| StoreError::Backend(e.to_string()))?;
    tokio::task::block_in_place(|| handle.block_on(future))
}

/// Postgres catalog collection.
pub struct PostgresCatalogStore {
    pool: Arc<PgPool>,
}

impl PostgresCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

fn item_from_row(row: &sqlx::postgres::PgRow) -> Result<Item, StoreError> {
    Ok(Item {
        id: ItemId::from_uuid(row.try_get("id").map_err(backend)?),
        name: row.try_get("name").map_err(backend)?,
        unit: row.try_get("unit").map_err(backend)?,
        alt_unit: row.try_get("alt_unit").map_err(backend)?,
        factor: row.try_get("factor").map_err(backend)?,
        alert_qty: row.try_get("alert_qty").map_err(backend)?,
    })
}

impl CatalogStore for PostgresCatalogStore {
    fn insert(&self, item: Item) -> Result<(), StoreError> {
        let pool = self.pool.clone();
        run(async move {
            sqlx::query(
                "INSERT INTO items (id, name, unit, alt_unit, factor, alert_qty) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(item.id.as_uuid())
            .bind(&item.name)
            .bind(&item.unit)
            .bind(&item.alt_unit)
            .bind(&item.factor)
            .bind(item.alert_qty)
            .execute(&*pool)
            .await
            .map_err(backend)?;
            Ok(())
        })
    }

    fn get(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        let pool = self.pool.clone();
        run(async move {
            let row = sqlx::query("SELECT * FROM items WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&*pool)
                .await
                .map_err(backend)?;
            row.as_ref().map(item_from_row).transpose()
        })
    }

    fn update(&self, item: Item) -> Result<bool, StoreError> {
        let pool = self.pool.clone();
        run(async move {
            let result = sqlx::query(
                "UPDATE items SET name = $2, unit = $3, alt_unit = $4, factor = $5, \
                 alert_qty = $6 WHERE id = $1",
            )
            .bind(item.id.as_uuid())
            .bind(&item.name)
            .bind(&item.unit)
            .bind(&item.alt_unit)
            .bind(&item.factor)
            .bind(item.alert_qty)
            .execute(&*pool)
            .await
            .map_err(backend)?;
            Ok(result.rows_affected() > 0)
        })
    }

    fn remove(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        let pool = self.pool.clone();
        run(async move {
            let row = sqlx::query("DELETE FROM items WHERE id = $1 RETURNING *")
                .bind(id.as_uuid())
                .fetch_optional(&*pool)
                .await
                .map_err(backend)?;
            row.as_ref().map(item_from_row).transpose()
        })
    }

    fn list(&self) -> Result<Vec<Item>, StoreError> {
        let pool = self.pool.clone();
        run(async move {
            let rows = sqlx::query("SELECT * FROM items ORDER BY position")
                .fetch_all(&*pool)
                .await
                .map_err(backend)?;
            rows.iter().map(item_from_row).collect()
        })
    }
}

/// Postgres ledger collection.
pub struct PostgresLedgerStore {
    pool: Arc<PgPool>,
}

impl PostgresLedgerStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

fn transaction_from_row(row: &sqlx::postgres::PgRow) -> Result<Transaction, StoreError> {
    let kind: String = row.try_get("kind").map_err(backend)?;
    Ok(Transaction {
        id: TransactionId::from_uuid(row.try_get("id").map_err(backend)?),
        date: row.try_get("date").map_err(backend)?,
        kind: MovementKind::parse(Some(&kind)),
        item_name: row.try_get("item_name").map_err(backend)?,
        quantity: row.try_get("quantity").map_err(backend)?,
        alt_quantity: row.try_get("alt_quantity").map_err(backend)?,
        unit: row.try_get("unit").map_err(backend)?,
        alt_unit: row.try_get("alt_unit").map_err(backend)?,
        rate: row.try_get("rate").map_err(backend)?,
        remarks: row.try_get("remarks").map_err(backend)?,
    })
}

impl LedgerStore for PostgresLedgerStore {
    fn insert(&self, transaction: Transaction) -> Result<(), StoreError> {
        let pool = self.pool.clone();
        run(async move {
            sqlx::query(
                "INSERT INTO transactions \
                 (id, date, kind, item_name, quantity, alt_quantity, unit, alt_unit, rate, remarks) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
            )
            .bind(transaction.id.as_uuid())
            .bind(transaction.date)
            .bind(transaction.kind.as_str())
            .bind(&transaction.item_name)
            .bind(transaction.quantity)
            .bind(transaction.alt_quantity)
            .bind(&transaction.unit)
            .bind(&transaction.alt_unit)
            .bind(transaction.rate)
            .bind(&transaction.remarks)
            .execute(&*pool)
            .await
            .map_err(backend)?;
            Ok(())
        })
    }

    fn get(&self, id: TransactionId) -> Result<Option<Transaction>, StoreError> {
        let pool = self.pool.clone();
        run(async move {
            let row = sqlx::query("SELECT * FROM transactions WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&*pool)
                .await
                .map_err(backend)?;
            row.as_ref().map(transaction_from_row).transpose()
        })
    }

    fn update(&self, transaction: Transaction) -> Result<bool, StoreError> {
        let pool = self.pool.clone();
        run(async move {
            let result = sqlx::query(
                "UPDATE transactions SET date = $2, kind = $3, item_name = $4, quantity = $5, \
                 alt_quantity = $6, unit = $7, alt_unit = $8, rate = $9, remarks = $10 \
                 WHERE id = $1",
            )
            .bind(transaction.id.as_uuid())
            .bind(transaction.date)
            .bind(transaction.kind.as_str())
            .bind(&transaction.item_name)
            .bind(transaction.quantity)
            .bind(transaction.alt_quantity)
            .bind(&transaction.unit)
            .bind(&transaction.alt_unit)
            .bind(transaction.rate)
            .bind(&transaction.remarks)
            .execute(&*pool)
            .await
            .map_err(backend)?;
            Ok(result.rows_affected() > 0)
        })
    }

    fn remove(&self, id: TransactionId) -> Result<bool, StoreError> {
        let pool = self.pool.clone();
        run(async move {
            let result = sqlx::query("DELETE FROM transactions WHERE id = $1")
                .bind(id.as_uuid())
                .execute(&*pool)
                .await
                .map_err(backend)?;
            Ok(result.rows_affected() > 0)
        })
    }

    fn list(&self) -> Result<Vec<Transaction>, StoreError> {
        let pool = self.pool.clone();
        run(async move {
            let rows = sqlx::query("SELECT * FROM transactions ORDER BY position")
                .fetch_all(&*pool)
                .await
                .map_err(backend)?;
            rows.iter().map(transaction_from_row).collect()
        })
    }

    fn rewrite_item_name(&self, old_name: &str, new_name: &str) -> Result<u64, StoreError> {
        let pool = self.pool.clone();
        let old_name = old_name.to_string();
        let new_name = new_name.to_string();
        run(async move {
            let result = sqlx::query("UPDATE transactions SET item_name = $2 WHERE item_name = $1")
                .bind(&old_name)
                .bind(&new_name)
                .execute(&*pool)
                .await
                .map_err(backend)?;
            Ok(result.rows_affected())
        })
    }

    fn remove_by_item_name(&self, item_name: &str) -> Result<u64, StoreError> {
        let pool = self.pool.clone();
        let item_name = item_name.to_string();
        run(async move {
            let result = sqlx::query("DELETE FROM transactions WHERE item_name = $1")
                .bind(&item_name)
                .execute(&*pool)
                .await
                .map_err(backend)?;
            Ok(result.rows_affected())
        })
    }
}
