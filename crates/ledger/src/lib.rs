//! Transaction ledger domain module.
//!
//! The ledger is the system of record for stock: an append-only history of
//! movements, keyed by item *name* rather than a stable identifier. Current
//! quantities are derived by folding it (see the recon crate).

pub mod movement;

pub use movement::{sort_newest_first, MovementKind, Transaction, TransactionDraft};
