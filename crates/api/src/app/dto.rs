use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use stockbook_catalog::ItemDraft;
use stockbook_core::coerce_f64;
use stockbook_ledger::{Transaction, TransactionDraft};

use crate::app::services::ItemWithStock;

// -------------------------
// Request DTOs
// -------------------------
//
// Every field is optional at the wire level: required-field and format
// checking belongs to the domain drafts so that a missing field is a 400
// validation error, not a deserialization rejection. Numeric fields accept
// numbers or decorated text and coerce leniently.

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemRequest {
    pub name: Option<String>,
    pub unit: Option<String>,
    pub alt_unit: Option<String>,
    pub factor: Option<String>,
    pub alert_qty: Option<JsonValue>,
}

impl ItemRequest {
    pub fn into_draft(self) -> ItemDraft {
        ItemDraft {
            name: self.name,
            unit: self.unit,
            alt_unit: self.alt_unit,
            factor: self.factor,
            alert_qty: self.alert_qty.as_ref().map(coerce_f64).unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionRequest {
    pub date: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub item_name: Option<String>,
    pub quantity: Option<JsonValue>,
    pub alt_qty: Option<JsonValue>,
    pub unit: Option<String>,
    pub alt_unit: Option<String>,
    pub rate: Option<JsonValue>,
    pub remarks: Option<String>,
}

impl TransactionRequest {
    pub fn into_draft(self) -> TransactionDraft {
        TransactionDraft {
            date: self.date,
            kind: self.kind,
            item_name: self.item_name,
            quantity: self.quantity.as_ref().map(coerce_f64).unwrap_or(0.0),
            alt_quantity: self.alt_qty.as_ref().map(coerce_f64).unwrap_or(0.0),
            unit: self.unit,
            alt_unit: self.alt_unit,
            rate: self.rate.as_ref().map(coerce_f64).unwrap_or(0.0),
            remarks: self.remarks,
        }
    }
}

// -------------------------
// Response mapping
// -------------------------

/// Catalog record alone (write-path responses; quantities come from listing).
pub fn catalog_item_to_json(item: &stockbook_catalog::Item) -> JsonValue {
    json!({
        "id": item.id.to_string(),
        "name": item.name,
        "unit": item.unit,
        "altUnit": item.alt_unit,
        "factor": item.factor,
        "alertQty": item.alert_qty,
    })
}

pub fn item_to_json(entry: &ItemWithStock) -> JsonValue {
    json!({
        "id": entry.item.id.to_string(),
        "name": entry.item.name,
        "unit": entry.item.unit,
        "altUnit": entry.item.alt_unit,
        "factor": entry.item.factor,
        "alertQty": entry.item.alert_qty,
        "quantity": entry.stock.quantity,
        "altQuantity": entry.stock.alt_quantity,
    })
}

pub fn transaction_to_json(tx: &Transaction) -> JsonValue {
    json!({
        "id": tx.id.to_string(),
        "date": tx.date.to_string(),
        "type": tx.kind.as_str(),
        "itemName": tx.item_name,
        "quantity": tx.quantity,
        "altQty": tx.alt_quantity,
        "unit": tx.unit,
        "altUnit": tx.alt_unit,
        "rate": tx.rate,
        "remarks": tx.remarks,
    })
}
