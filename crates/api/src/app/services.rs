//! Store wiring and the operations exposed to the HTTP handlers.
//!
//! If you're new to Rust, this folder is structured like:
//! - `services.rs`: store wiring + the application operations
//! - `routes/`: HTTP routes + handlers (one file per collection)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use thiserror::Error;

use stockbook_catalog::{Item, ItemDraft};
use stockbook_core::{DomainError, ItemId, TransactionId};
use stockbook_infra::{
    cascade::{CascadeError, NameCascade},
    store::{
        ensure_schema, CatalogStore, InMemoryCatalogStore, InMemoryLedgerStore, LedgerStore,
        PostgresCatalogStore, PostgresLedgerStore, StoreError,
    },
};
use stockbook_ledger::{sort_newest_first, Transaction, TransactionDraft};
use stockbook_recon::{fill_alt_quantity, reconcile, resolve_item, LedgerIndex, StockLevel};

use crate::config::AppConfig;

/// Application-level operation error, mapped to HTTP statuses in `errors.rs`.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The catalog-side change is committed; only the ledger cascade failed.
    /// Retrying the request completes it (both cascades are idempotent).
    #[error(transparent)]
    CascadeIncomplete(#[from] CascadeError),
}

impl From<DomainError> for ServiceError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) => ServiceError::Validation(msg),
            DomainError::InvalidId(msg) => ServiceError::Validation(msg),
            DomainError::NotFound => ServiceError::NotFound,
        }
    }
}

/// A catalog item together with its derived stock level.
#[derive(Debug, Clone)]
pub struct ItemWithStock {
    pub item: Item,
    pub stock: StockLevel,
}

/// Shared application services: explicit store handles, never a hidden
/// singleton. Cheap to clone behind `Arc` in the router.
pub struct AppServices {
    catalog: Arc<dyn CatalogStore>,
    ledger: Arc<dyn LedgerStore>,
    cascade: NameCascade<Arc<dyn LedgerStore>>,
}

/// Wire stores according to configuration (in-memory by default, Postgres
/// when `USE_PERSISTENT_STORE=true`).
pub async fn build_services(config: &AppConfig) -> AppServices {
    if config.use_persistent_store {
        let database_url = config
            .database_url
            .as_deref()
            .expect("DATABASE_URL must be set when USE_PERSISTENT_STORE=true");

        let pool = sqlx::PgPool::connect(database_url)
            .await
            .expect("failed to connect to Postgres");
        ensure_schema(&pool)
            .await
            .expect("failed to prepare Postgres schema");

        AppServices::new(
            Arc::new(PostgresCatalogStore::new(pool.clone())),
            Arc::new(PostgresLedgerStore::new(pool)),
        )
    } else {
        AppServices::new(
            Arc::new(InMemoryCatalogStore::new()),
            Arc::new(InMemoryLedgerStore::new()),
        )
    }
}

impl AppServices {
    pub fn new(catalog: Arc<dyn CatalogStore>, ledger: Arc<dyn LedgerStore>) -> Self {
        let cascade = NameCascade::new(ledger.clone());
        Self {
            catalog,
            ledger,
            cascade,
        }
    }

    /// Items with derived quantities, in catalog listing order.
    ///
    /// One ledger snapshot and one normalized-name index serve every item in
    /// the listing; the per-item fold is read-only over that snapshot.
    pub fn list_items(&self) -> Result<Vec<ItemWithStock>, ServiceError> {
        let items = self.catalog.list()?;
        let transactions = self.ledger.list()?;
        let index = LedgerIndex::build(&transactions);

        Ok(items
            .into_iter()
            .map(|item| {
                let stock = reconcile(&item, index.matched(&item.name));
                ItemWithStock { item, stock }
            })
            .collect())
    }

    /// Create a catalog item. Never touches the ledger.
    pub fn create_item(&self, draft: ItemDraft) -> Result<Item, ServiceError> {
        let item = draft.into_item(ItemId::new())?;
        self.catalog.insert(item.clone())?;
        Ok(item)
    }

    /// Update a catalog item; a name change triggers the rename cascade.
    ///
    /// Returns the updated item and the number of ledger entries rewritten.
    /// The catalog update commits first: a cascade failure surfaces as
    /// [`ServiceError::CascadeIncomplete`] with the catalog change retained.
    pub fn update_item(&self, id: ItemId, draft: ItemDraft) -> Result<(Item, u64), ServiceError> {
        let existing = self.catalog.get(id)?.ok_or(ServiceError::NotFound)?;
        let updated = draft.into_item(existing.id)?;

        if !self.catalog.update(updated.clone())? {
            return Err(ServiceError::NotFound);
        }

        let rewritten = self
            .cascade
            .propagate_rename(&existing.name, &updated.name)
            .inspect_err(|e| {
                tracing::warn!(item = %updated.name, error = %e, "rename cascade incomplete");
            })?;

        Ok((updated, rewritten))
    }

    /// Delete a catalog item and its ledger history.
    ///
    /// Returns the number of ledger entries deleted. Same partial-failure
    /// semantics as [`AppServices::update_item`].
    pub fn delete_item(&self, id: ItemId) -> Result<u64, ServiceError> {
        let removed = self.catalog.remove(id)?.ok_or(ServiceError::NotFound)?;

        let deleted = self
            .cascade
            .propagate_delete(&removed.name)
            .inspect_err(|e| {
                tracing::warn!(item = %removed.name, error = %e, "delete cascade incomplete");
            })?;

        Ok(deleted)
    }

    /// All transactions, newest first (date ties keep storage order).
    pub fn list_transactions(&self) -> Result<Vec<Transaction>, ServiceError> {
        let mut transactions = self.ledger.list()?;
        sort_newest_first(&mut transactions);
        Ok(transactions)
    }

    /// Record a movement. The named item need not exist (orphans are accepted
    /// records); the alternate-quantity fill runs before persisting.
    pub fn create_transaction(&self, draft: TransactionDraft) -> Result<Transaction, ServiceError> {
        let transaction = self.filled(draft.into_transaction(TransactionId::new())?)?;
        self.ledger.insert(transaction.clone())?;
        Ok(transaction)
    }

    /// Edit a movement; validation and the alternate-quantity fill re-apply
    /// over the submitted fields.
    pub fn update_transaction(
        &self,
        id: TransactionId,
        draft: TransactionDraft,
    ) -> Result<Transaction, ServiceError> {
        if self.ledger.get(id)?.is_none() {
            return Err(ServiceError::NotFound);
        }

        let transaction = self.filled(draft.into_transaction(id)?)?;
        if !self.ledger.update(transaction.clone())? {
            return Err(ServiceError::NotFound);
        }
        Ok(transaction)
    }

    /// Remove a movement by id. No cascading effect on the catalog.
    pub fn delete_transaction(&self, id: TransactionId) -> Result<(), ServiceError> {
        if !self.ledger.remove(id)? {
            return Err(ServiceError::NotFound);
        }
        Ok(())
    }

    fn filled(&self, mut transaction: Transaction) -> Result<Transaction, ServiceError> {
        let items = self.catalog.list()?;
        transaction.alt_quantity = fill_alt_quantity(
            transaction.alt_quantity,
            transaction.quantity,
            resolve_item(&items, &transaction.item_name),
        );
        Ok(transaction)
    }
}
