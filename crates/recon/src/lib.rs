//! Stock reconciliation: name matching and quantity derivation.
//!
//! The ledger links transactions to items by free-text name, and stock levels
//! are never stored — they are derived here by folding an item's matched
//! transactions. Both halves are pure domain logic over slices; the store
//! handles live in the infra crate.

pub mod engine;
pub mod matcher;

pub use engine::{fill_alt_quantity, reconcile, StockLevel};
pub use matcher::{resolve_item, LedgerIndex, NameKey};
