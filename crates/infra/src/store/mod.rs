//! Store-of-record abstraction.
//!
//! Two independent collections (items, transactions) behind small synchronous
//! traits. No storage assumptions: in-memory implementations serve tests and
//! dev, Postgres implementations serve deployment, and the service layer holds
//! explicit `Arc<dyn …>` handles rather than a hidden singleton.
//!
//! Transactions reference items only through the `item_name` text field, so
//! the ledger trait carries the two bulk operations the consistency maintainer
//! needs: exact-name rewrite and exact-name delete.

mod in_memory;
mod postgres;

use std::sync::Arc;

use thiserror::Error;

use stockbook_catalog::Item;
use stockbook_core::{ItemId, TransactionId};
use stockbook_ledger::Transaction;

pub use in_memory::{InMemoryCatalogStore, InMemoryLedgerStore};
pub use postgres::{ensure_schema, PostgresCatalogStore, PostgresLedgerStore};

/// Store operation error (infrastructure-level, not domain-level).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),

    #[error("store lock poisoned")]
    Poisoned,
}

/// Catalog collection: items keyed by id.
pub trait CatalogStore: Send + Sync {
    fn insert(&self, item: Item) -> Result<(), StoreError>;

    fn get(&self, id: ItemId) -> Result<Option<Item>, StoreError>;

    /// Replace the record with the same id. Returns `false` when absent.
    fn update(&self, item: Item) -> Result<bool, StoreError>;

    /// Remove by id, returning the removed record when present.
    fn remove(&self, id: ItemId) -> Result<Option<Item>, StoreError>;

    /// All items, in insertion order.
    fn list(&self) -> Result<Vec<Item>, StoreError>;
}

/// Ledger collection: transactions keyed by id, bulk-addressable by the
/// denormalized `item_name` text.
pub trait LedgerStore: Send + Sync {
    fn insert(&self, transaction: Transaction) -> Result<(), StoreError>;

    fn get(&self, id: TransactionId) -> Result<Option<Transaction>, StoreError>;

    /// Replace the record with the same id. Returns `false` when absent.
    fn update(&self, transaction: Transaction) -> Result<bool, StoreError>;

    /// Remove by id. Returns `false` when absent.
    fn remove(&self, id: TransactionId) -> Result<bool, StoreError>;

    /// All transactions, in insertion order (the deterministic tie-break for
    /// date-ordered listings).
    fn list(&self) -> Result<Vec<Transaction>, StoreError>;

    /// Rewrite `item_name` on every transaction whose stored name equals
    /// `old_name` exactly. Returns the number of rewritten records. Idempotent.
    fn rewrite_item_name(&self, old_name: &str, new_name: &str) -> Result<u64, StoreError>;

    /// Delete every transaction whose stored name equals `item_name` exactly.
    /// Returns the number of deleted records. Idempotent.
    fn remove_by_item_name(&self, item_name: &str) -> Result<u64, StoreError>;
}

impl<S> CatalogStore for Arc<S>
where
    S: CatalogStore + ?Sized,
{
    fn insert(&self, item: Item) -> Result<(), StoreError> {
        (**self).insert(item)
    }

    fn get(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        (**self).get(id)
    }

    fn update(&self, item: Item) -> Result<bool, StoreError> {
        (**self).update(item)
    }

    fn remove(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        (**self).remove(id)
    }

    fn list(&self) -> Result<Vec<Item>, StoreError> {
        (**self).list()
    }
}

impl<S> LedgerStore for Arc<S>
where
    S: LedgerStore + ?Sized,
{
    fn insert(&self, transaction: Transaction) -> Result<(), StoreError> {
        (**self).insert(transaction)
    }

    fn get(&self, id: TransactionId) -> Result<Option<Transaction>, StoreError> {
        (**self).get(id)
    }

    fn update(&self, transaction: Transaction) -> Result<bool, StoreError> {
        (**self).update(transaction)
    }

    fn remove(&self, id: TransactionId) -> Result<bool, StoreError> {
        (**self).remove(id)
    }

    fn list(&self) -> Result<Vec<Transaction>, StoreError> {
        (**self).list()
    }

    fn rewrite_item_name(&self, old_name: &str, new_name: &str) -> Result<u64, StoreError> {
        (**self).rewrite_item_name(old_name, new_name)
    }

    fn remove_by_item_name(&self, item_name: &str) -> Result<u64, StoreError> {
        (**self).remove_by_item_name(item_name)
    }
}
