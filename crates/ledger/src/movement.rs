use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockbook_core::{DomainError, DomainResult, TransactionId};

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementKind {
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "OUT")]
    Out,
}

impl MovementKind {
    /// Normalize a submitted movement type.
    ///
    /// Case- and whitespace-insensitive; absent or unrecognized values default
    /// to `In`.
    pub fn parse(text: Option<&str>) -> Self {
        match text {
            Some(t) if t.trim().eq_ignore_ascii_case("out") => MovementKind::Out,
            _ => MovementKind::In,
        }
    }

    pub fn sign(self) -> f64 {
        match self {
            MovementKind::In => 1.0,
            MovementKind::Out => -1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MovementKind::In => "IN",
            MovementKind::Out => "OUT",
        }
    }
}

/// One recorded stock movement.
///
/// `item_name` is a denormalized reference to a catalog item's name as it was
/// submitted (stored verbatim, matched leniently at read time). A transaction
/// whose name matches no current item is an orphan: retained, inert, and
/// contributing to no item's aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    /// Used only for ordering.
    pub date: NaiveDate,
    pub kind: MovementKind,
    pub item_name: String,
    /// Non-negative magnitude in the item's primary unit; sign comes from `kind`.
    pub quantity: f64,
    /// Amount in the alternate unit; materialized at write time when omitted.
    pub alt_quantity: f64,
    pub unit: String,
    pub alt_unit: String,
    pub rate: f64,
    pub remarks: String,
}

impl Transaction {
    pub fn signed_quantity(&self) -> f64 {
        self.kind.sign() * self.quantity
    }

    pub fn signed_alt_quantity(&self) -> f64 {
        self.kind.sign() * self.alt_quantity
    }
}

/// Unvalidated movement fields as submitted by a client.
///
/// Numeric fields are coerced at the API boundary before the draft is built;
/// the draft validates what coercion cannot repair (missing date, empty name,
/// negative magnitude).
#[derive(Debug, Clone, Default)]
pub struct TransactionDraft {
    pub date: Option<String>,
    pub kind: Option<String>,
    pub item_name: Option<String>,
    pub quantity: f64,
    pub alt_quantity: f64,
    pub unit: Option<String>,
    pub alt_unit: Option<String>,
    pub rate: f64,
    pub remarks: Option<String>,
}

impl TransactionDraft {
    pub fn into_transaction(self, id: TransactionId) -> DomainResult<Transaction> {
        let date = self
            .date
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| DomainError::validation("date is required"))?
            .parse::<NaiveDate>()
            .map_err(|_| DomainError::validation("date must be a calendar date (YYYY-MM-DD)"))?;

        // Stored verbatim: the matcher normalizes at read time, and the rename
        // cascade matches the stored bytes exactly.
        let item_name = self
            .item_name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| DomainError::validation("itemName cannot be empty"))?;

        if self.quantity < 0.0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }

        Ok(Transaction {
            id,
            date,
            kind: MovementKind::parse(self.kind.as_deref()),
            item_name,
            quantity: self.quantity,
            alt_quantity: self.alt_quantity,
            unit: self.unit.unwrap_or_default(),
            alt_unit: self.alt_unit.unwrap_or_default(),
            rate: self.rate,
            remarks: self.remarks.unwrap_or_default(),
        })
    }
}

/// Order transactions by date descending; ties keep their current (storage)
/// order, so listings are deterministic for a fixed input set.
pub fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
}
