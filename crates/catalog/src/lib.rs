//! Item catalog domain module.
//!
//! This crate contains the catalog's business rules, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod item;

pub use item::{ConversionFactor, Item, ItemDraft, MANUAL_FACTOR, NO_ALT_UNIT, NO_FACTOR};
