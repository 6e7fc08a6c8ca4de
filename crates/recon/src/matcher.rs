use std::collections::HashMap;

use stockbook_catalog::Item;
use stockbook_ledger::Transaction;

/// Normalized form of an item or transaction name.
///
/// Matching is whole-key equality over this form: trimmed, Unicode-lowercased.
/// Equality is literal, so names containing characters that would be special
/// to a pattern engine need no escaping, and substring matches ("Rice" vs
/// "Basmati Rice") are impossible by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameKey(String);

impl NameKey {
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Precomputed grouping of a ledger snapshot by normalized item name.
///
/// Built once per aggregation request instead of scanning (or regex-matching)
/// the ledger per item. Two catalog items whose names normalize identically
/// both observe the same group — an accepted data-quality hazard.
#[derive(Debug, Default)]
pub struct LedgerIndex<'a> {
    groups: HashMap<NameKey, Vec<&'a Transaction>>,
}

impl<'a> LedgerIndex<'a> {
    pub fn build(transactions: &'a [Transaction]) -> Self {
        let mut groups: HashMap<NameKey, Vec<&'a Transaction>> = HashMap::new();
        for tx in transactions {
            groups.entry(NameKey::new(&tx.item_name)).or_default().push(tx);
        }
        Self { groups }
    }

    /// Transactions considered to belong to the named item.
    ///
    /// No matches is a valid, non-error outcome (empty slice).
    pub fn matched(&self, item_name: &str) -> &[&'a Transaction] {
        self.groups
            .get(&NameKey::new(item_name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Resolve a transaction's free-text item name to a catalog entry under the
/// same normalization policy. First match in catalog listing order wins when
/// duplicate names exist.
pub fn resolve_item<'a>(items: &'a [Item], item_name: &str) -> Option<&'a Item> {
    let key = NameKey::new(item_name);
    items.iter().find(|item| NameKey::new(&item.name) == key)
}
