use std::sync::RwLock;

use stockbook_catalog::Item;
use stockbook_core::{ItemId, TransactionId};
use stockbook_ledger::Transaction;

use super::{CatalogStore, LedgerStore, StoreError};

/// In-memory catalog collection.
///
/// Intended for tests/dev. Vec-backed so listing order is insertion order.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    items: RwLock<Vec<Item>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn insert(&self, item: Item) -> Result<(), StoreError> {
        let mut items = self.items.write().map_err(|_| StoreError::Poisoned)?;
        items.push(item);
        Ok(())
    }

    fn get(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        let items = self.items.read().map_err(|_| StoreError::Poisoned)?;
        Ok(items.iter().find(|i| i.id == id).cloned())
    }

    fn update(&self, item: Item) -> Result<bool, StoreError> {
        let mut items = self.items.write().map_err(|_| StoreError::Poisoned)?;
        match items.iter_mut().find(|i| i.id == item.id) {
            Some(slot) => {
                *slot = item;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        let mut items = self.items.write().map_err(|_| StoreError::Poisoned)?;
        match items.iter().position(|i| i.id == id) {
            Some(pos) => Ok(Some(items.remove(pos))),
            None => Ok(None),
        }
    }

    fn list(&self) -> Result<Vec<Item>, StoreError> {
        let items = self.items.read().map_err(|_| StoreError::Poisoned)?;
        Ok(items.clone())
    }
}

/// In-memory ledger collection.
///
/// Vec-backed: insertion order is preserved, which makes date-tie ordering in
/// listings deterministic.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    entries: RwLock<Vec<Transaction>>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn insert(&self, transaction: Transaction) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        entries.push(transaction);
        Ok(())
    }

    fn get(&self, id: TransactionId) -> Result<Option<Transaction>, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.iter().find(|t| t.id == id).cloned())
    }

    fn update(&self, transaction: Transaction) -> Result<bool, StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        match entries.iter_mut().find(|t| t.id == transaction.id) {
            Some(slot) => {
                *slot = transaction;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove(&self, id: TransactionId) -> Result<bool, StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        match entries.iter().position(|t| t.id == id) {
            Some(pos) => {
                entries.remove(pos);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn list(&self) -> Result<Vec<Transaction>, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.clone())
    }

    fn rewrite_item_name(&self, old_name: &str, new_name: &str) -> Result<u64, StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        let mut rewritten = 0u64;
        for entry in entries.iter_mut() {
            if entry.item_name == old_name {
                entry.item_name = new_name.to_string();
                rewritten += 1;
            }
        }
        Ok(rewritten)
    }

    fn remove_by_item_name(&self, item_name: &str) -> Result<u64, StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        let before = entries.len();
        entries.retain(|t| t.item_name != item_name);
        Ok((before - entries.len()) as u64)
    }
}
