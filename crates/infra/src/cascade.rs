//! Consistency maintainer for the name-keyed item↔transaction link.
//!
//! The ledger references catalog items by name, so catalog renames and
//! deletions must be propagated as bulk operations over the ledger. The
//! catalog write and the propagation are two separate store operations with
//! no rollback: a failure here leaves the catalog change committed and the
//! ledger stale (tolerated), and both operations are idempotent so a caller
//! retry completes the cascade.

use thiserror::Error;

use crate::store::{LedgerStore, StoreError};

/// The second step of a rename/delete cascade failed after the catalog-side
/// change was already committed.
#[derive(Debug, Error)]
pub enum CascadeError {
    #[error("ledger cascade incomplete (catalog change already committed): {0}")]
    Incomplete(#[from] StoreError),
}

/// Propagates catalog-level renames and deletions into the ledger.
#[derive(Debug)]
pub struct NameCascade<L> {
    ledger: L,
}

impl<L> NameCascade<L> {
    pub fn new(ledger: L) -> Self {
        Self { ledger }
    }
}

impl<L: LedgerStore> NameCascade<L> {
    /// Reassign every transaction stored under `old_name` (exact match against
    /// the pre-change stored bytes, not the fuzzy read-side policy) to
    /// `new_name`. Returns the number of rewritten transactions.
    pub fn propagate_rename(&self, old_name: &str, new_name: &str) -> Result<u64, CascadeError> {
        if old_name == new_name {
            return Ok(0);
        }
        let rewritten = self.ledger.rewrite_item_name(old_name, new_name)?;
        tracing::debug!(old_name, new_name, rewritten, "propagated item rename into ledger");
        Ok(rewritten)
    }

    /// Delete every transaction stored under `item_name` (exact match).
    /// Returns the number of deleted transactions.
    pub fn propagate_delete(&self, item_name: &str) -> Result<u64, CascadeError> {
        let deleted = self.ledger.remove_by_item_name(item_name)?;
        tracing::debug!(item_name, deleted, "propagated item delete into ledger");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryLedgerStore;
    use std::sync::Arc;
    use stockbook_core::TransactionId;
    use stockbook_ledger::{MovementKind, Transaction};

    fn tx(item_name: &str) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            date: "2024-01-01".parse().unwrap(),
            kind: MovementKind::In,
            item_name: item_name.to_string(),
            quantity: 2.0,
            alt_quantity: 0.0,
            unit: String::new(),
            alt_unit: String::new(),
            rate: 0.0,
            remarks: String::new(),
        }
    }

    fn ledger_with(names: &[&str]) -> Arc<InMemoryLedgerStore> {
        let store = Arc::new(InMemoryLedgerStore::new());
        for name in names {
            store.insert(tx(name)).unwrap();
        }
        store
    }

    #[test]
    fn rename_rewrites_exact_matches_only() {
        let store = ledger_with(&["Salt", "Salt", "salt ", "Sea Salt"]);
        let cascade = NameCascade::new(store.clone());

        let rewritten = cascade.propagate_rename("Salt", "Sea Salt").unwrap();
        assert_eq!(rewritten, 2);

        let names: Vec<_> = store.list().unwrap().into_iter().map(|t| t.item_name).collect();
        // The cascade matches stored bytes exactly; "salt " is untouched (it
        // was already a fuzzy-read artifact, not the stored catalog name).
        assert_eq!(names, vec!["Sea Salt", "Sea Salt", "salt ", "Sea Salt"]);
    }

    #[test]
    fn rename_is_idempotent() {
        let store = ledger_with(&["Salt"]);
        let cascade = NameCascade::new(store.clone());

        assert_eq!(cascade.propagate_rename("Salt", "Sea Salt").unwrap(), 1);
        assert_eq!(cascade.propagate_rename("Salt", "Sea Salt").unwrap(), 0);
    }

    #[test]
    fn rename_to_same_name_is_a_no_op() {
        let store = ledger_with(&["Salt"]);
        let cascade = NameCascade::new(store);
        assert_eq!(cascade.propagate_rename("Salt", "Salt").unwrap(), 0);
    }

    #[test]
    fn delete_removes_exact_matches_only() {
        let store = ledger_with(&["Sugar", "Sugar", "Brown Sugar"]);
        let cascade = NameCascade::new(store.clone());

        assert_eq!(cascade.propagate_delete("Sugar").unwrap(), 2);

        let names: Vec<_> = store.list().unwrap().into_iter().map(|t| t.item_name).collect();
        assert_eq!(names, vec!["Brown Sugar"]);

        // Retry after completion deletes nothing further.
        assert_eq!(cascade.propagate_delete("Sugar").unwrap(), 0);
    }
}
