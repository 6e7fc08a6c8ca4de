use serde::{Deserialize, Serialize};

use stockbook_core::{lenient_f64, DomainError, DomainResult, ItemId};

/// Sentinel for "no alternate unit".
pub const NO_ALT_UNIT: &str = "-";

/// Sentinel for "no fixed conversion ratio; alternate stock is entered by hand".
pub const MANUAL_FACTOR: &str = "Manual";

/// Sentinel for "no conversion at all".
pub const NO_FACTOR: &str = "-";

/// A catalog entry describing a stock-keeping unit and its unit-conversion
/// metadata.
///
/// `name` is the business key: the ledger references items by this text, so
/// renaming an item requires a cascade over the ledger (see the consistency
/// maintainer in the infra crate). `id` is storage identity only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub unit: String,
    pub alt_unit: String,
    /// Text-encoded ratio, `"Manual"`, or `"-"`. Parsed via [`Item::conversion_factor`].
    pub factor: String,
    pub alert_qty: f64,
}

impl Item {
    pub fn conversion_factor(&self) -> ConversionFactor {
        ConversionFactor::parse(&self.factor)
    }

    pub fn has_alt_unit(&self) -> bool {
        let trimmed = self.alt_unit.trim();
        !trimmed.is_empty() && trimmed != NO_ALT_UNIT
    }
}

/// Parsed view of an item's `factor` field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConversionFactor {
    /// alternate = primary × ratio.
    Ratio(f64),
    /// Alternate stock has no fixed ratio; it must come from summed ledger entries.
    Manual,
    /// No conversion.
    None,
}

impl ConversionFactor {
    /// Parse the text form of a factor.
    ///
    /// `"-"` and empty mean no conversion; `"Manual"` (any case) means manual;
    /// anything else goes through the lenient numeric coercion, and a value
    /// with no leading number behaves as no conversion.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed == NO_FACTOR {
            return ConversionFactor::None;
        }
        if trimmed.eq_ignore_ascii_case(MANUAL_FACTOR) {
            return ConversionFactor::Manual;
        }
        match lenient_f64(trimmed) {
            Some(ratio) => ConversionFactor::Ratio(ratio),
            None => ConversionFactor::None,
        }
    }

    pub fn as_ratio(self) -> Option<f64> {
        match self {
            ConversionFactor::Ratio(r) => Some(r),
            _ => None,
        }
    }
}

/// Unvalidated catalog fields as submitted by a client.
#[derive(Debug, Clone, Default)]
pub struct ItemDraft {
    pub name: Option<String>,
    pub unit: Option<String>,
    pub alt_unit: Option<String>,
    pub factor: Option<String>,
    pub alert_qty: f64,
}

impl ItemDraft {
    /// Validate the draft into an [`Item`] with the given identity.
    ///
    /// The name is stored trimmed (it is the business key); unit labels and the
    /// factor default to their sentinels when absent.
    pub fn into_item(self, id: ItemId) -> DomainResult<Item> {
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| DomainError::validation("name cannot be empty"))?
            .to_string();

        let unit = self
            .unit
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| DomainError::validation("unit cannot be empty"))?
            .to_string();

        Ok(Item {
            id,
            name,
            unit,
            alt_unit: self
                .alt_unit
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| NO_ALT_UNIT.to_string()),
            factor: self
                .factor
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty())
                .unwrap_or_else(|| NO_FACTOR.to_string()),
            alert_qty: self.alert_qty,
        })
    }
}
