use serde::Serialize;

use stockbook_catalog::{ConversionFactor, Item};
use stockbook_ledger::Transaction;

/// Derived stock of one item, in its primary and alternate units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StockLevel {
    pub quantity: f64,
    pub alt_quantity: f64,
}

/// Fold an item's matched transactions into its current stock level.
///
/// Primary quantity is the signed sum of magnitudes (`In` adds, `Out`
/// subtracts); the fold is order-independent and may go negative — oversold
/// stock is reported, not rejected.
///
/// Alternate quantity uses the hybrid fallback strategy: sum the recorded
/// per-transaction alternate quantities the same way, and only when that sum
/// is exactly zero against a non-zero primary quantity — the signature of
/// history that never recorded alternate amounts — substitute the
/// factor-derived value, when the item has a numeric factor. Manually entered
/// alternate figures therefore always win over the ratio.
pub fn reconcile(item: &Item, matched: &[&Transaction]) -> StockLevel {
    let quantity: f64 = matched.iter().map(|tx| tx.signed_quantity()).sum();
    let summed_alt: f64 = matched.iter().map(|tx| tx.signed_alt_quantity()).sum();

    let alt_quantity = if summed_alt == 0.0 && quantity != 0.0 {
        match item.conversion_factor() {
            ConversionFactor::Ratio(factor) => quantity * factor,
            ConversionFactor::Manual | ConversionFactor::None => summed_alt,
        }
    } else {
        summed_alt
    };

    StockLevel {
        quantity,
        alt_quantity,
    }
}

/// Materialize the alternate quantity to persist with a new or edited
/// transaction.
///
/// A submitted non-zero value is kept verbatim. Otherwise the named item's
/// factor decides: a numeric factor yields `quantity × factor`; a manual or
/// absent factor — or an unresolved item name — yields zero. Filling at write
/// time keeps summed-history reads able to produce non-zero results even when
/// clients omit the field.
pub fn fill_alt_quantity(submitted: f64, quantity: f64, item: Option<&Item>) -> f64 {
    if submitted != 0.0 {
        return submitted;
    }
    match item.map(Item::conversion_factor) {
        Some(ConversionFactor::Ratio(factor)) => quantity * factor,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use stockbook_catalog::ItemDraft;
    use stockbook_core::{ItemId, TransactionId};
    use stockbook_ledger::MovementKind;

    fn item_with_factor(factor: &str) -> Item {
        ItemDraft {
            name: Some("Oil".to_string()),
            unit: Some("ltr".to_string()),
            alt_unit: Some("can".to_string()),
            factor: Some(factor.to_string()),
            ..ItemDraft::default()
        }
        .into_item(ItemId::new())
        .unwrap()
    }

    fn tx(kind: MovementKind, quantity: f64, alt_quantity: f64) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            date: "2024-01-01".parse().unwrap(),
            kind,
            item_name: "Oil".to_string(),
            quantity,
            alt_quantity,
            unit: String::new(),
            alt_unit: String::new(),
            rate: 0.0,
            remarks: String::new(),
        }
    }

    fn reconcile_owned(item: &Item, txs: &[Transaction]) -> StockLevel {
        let refs: Vec<&Transaction> = txs.iter().collect();
        reconcile(item, &refs)
    }

    #[test]
    fn empty_history_is_zero() {
        let level = reconcile(&item_with_factor("5"), &[]);
        assert_eq!(level, StockLevel::default());
    }

    #[test]
    fn primary_quantity_is_signed_sum() {
        let txs = vec![
            tx(MovementKind::In, 10.0, 0.0),
            tx(MovementKind::Out, 4.0, 0.0),
        ];
        let level = reconcile_owned(&item_with_factor("-"), &txs);
        assert_eq!(level.quantity, 6.0);
    }

    #[test]
    fn oversold_stock_goes_negative() {
        let txs = vec![tx(MovementKind::Out, 3.0, 0.0)];
        let level = reconcile_owned(&item_with_factor("-"), &txs);
        assert_eq!(level.quantity, -3.0);
    }

    #[test]
    fn zero_alt_history_falls_back_to_factor() {
        let txs = vec![
            tx(MovementKind::In, 10.0, 0.0),
            tx(MovementKind::Out, 4.0, 0.0),
        ];
        let level = reconcile_owned(&item_with_factor("5"), &txs);
        assert_eq!(level.quantity, 6.0);
        assert_eq!(level.alt_quantity, 30.0);
    }

    #[test]
    fn recorded_alt_history_wins_over_factor() {
        // Inconsistent with the factor on purpose: summed history is honored.
        let txs = vec![
            tx(MovementKind::In, 10.0, 100.0),
            tx(MovementKind::Out, 4.0, 20.0),
        ];
        let level = reconcile_owned(&item_with_factor("5"), &txs);
        assert_eq!(level.quantity, 6.0);
        assert_eq!(level.alt_quantity, 80.0);
    }

    #[test]
    fn consistent_alt_history_coincides_with_factor() {
        let txs = vec![
            tx(MovementKind::In, 10.0, 50.0),
            tx(MovementKind::Out, 4.0, 20.0),
        ];
        let level = reconcile_owned(&item_with_factor("5"), &txs);
        assert_eq!(level.alt_quantity, 30.0);
    }

    #[test]
    fn manual_factor_never_derives() {
        let txs = vec![tx(MovementKind::In, 10.0, 0.0)];
        let level = reconcile_owned(&item_with_factor("Manual"), &txs);
        assert_eq!(level.quantity, 10.0);
        assert_eq!(level.alt_quantity, 0.0);
    }

    #[test]
    fn zero_primary_keeps_zero_alt() {
        // In and Out cancel: nothing to derive from the factor.
        let txs = vec![
            tx(MovementKind::In, 5.0, 0.0),
            tx(MovementKind::Out, 5.0, 0.0),
        ];
        let level = reconcile_owned(&item_with_factor("5"), &txs);
        assert_eq!(level.quantity, 0.0);
        assert_eq!(level.alt_quantity, 0.0);
    }

    #[test]
    fn fill_keeps_explicit_value_verbatim() {
        let item = item_with_factor("5");
        assert_eq!(fill_alt_quantity(7.0, 10.0, Some(&item)), 7.0);
    }

    #[test]
    fn fill_derives_from_numeric_factor() {
        let item = item_with_factor("5");
        assert_eq!(fill_alt_quantity(0.0, 10.0, Some(&item)), 50.0);
    }

    #[test]
    fn fill_defaults_to_zero_without_ratio() {
        assert_eq!(fill_alt_quantity(0.0, 10.0, Some(&item_with_factor("Manual"))), 0.0);
        assert_eq!(fill_alt_quantity(0.0, 10.0, Some(&item_with_factor("-"))), 0.0);
        assert_eq!(fill_alt_quantity(0.0, 10.0, None), 0.0);
    }

    proptest! {
        #[test]
        fn fold_is_order_invariant(moves in proptest::collection::vec((any::<bool>(), 0u32..10_000, 0u32..10_000), 0..32)) {
            let item = item_with_factor("3");
            let txs: Vec<Transaction> = moves
                .iter()
                .map(|(incoming, qty, alt)| {
                    tx(
                        if *incoming { MovementKind::In } else { MovementKind::Out },
                        f64::from(*qty),
                        f64::from(*alt),
                    )
                })
                .collect();

            let mut reversed = txs.clone();
            reversed.reverse();

            // Integral magnitudes keep the float sums exact in either order.
            prop_assert_eq!(reconcile_owned(&item, &txs), reconcile_owned(&item, &reversed));
        }
    }
}
