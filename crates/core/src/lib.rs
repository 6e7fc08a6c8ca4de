//! `stockbook-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the error taxonomy, strongly-typed identifiers, and the lenient numeric
//! coercion policy shared by the catalog and the ledger.

pub mod error;
pub mod id;
pub mod numeric;

pub use error::{DomainError, DomainResult};
pub use id::{ItemId, TransactionId};
pub use numeric::{coerce_f64, lenient_f64};
