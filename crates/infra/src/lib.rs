//! Infrastructure: the store of record and the consistency maintainer.
//!
//! Persistence is specified at its interface boundary: two independent record
//! collections behind the [`store::CatalogStore`] and [`store::LedgerStore`]
//! traits, with in-memory implementations for dev/test and Postgres-backed
//! ones for deployment. The [`cascade::NameCascade`] keeps the ledger's
//! name-keyed references valid across catalog renames and deletions.

pub mod cascade;
pub mod store;


pub use cascade::{CascadeError, NameCascade};
pub use store::{
    CatalogStore, InMemoryCatalogStore, InMemoryLedgerStore, LedgerStore, PostgresCatalogStore,
    PostgresLedgerStore, StoreError,
};
