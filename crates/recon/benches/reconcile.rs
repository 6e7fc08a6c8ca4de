use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use stockbook_catalog::ItemDraft;
use stockbook_core::{ItemId, TransactionId};
use stockbook_ledger::{MovementKind, Transaction};
use stockbook_recon::{reconcile, LedgerIndex};

fn ledger(size: usize) -> Vec<Transaction> {
    (0..size)
        .map(|i| Transaction {
            id: TransactionId::new(),
            date: "2024-01-01".parse().unwrap(),
            kind: if i % 3 == 0 { MovementKind::Out } else { MovementKind::In },
            item_name: format!("Item {}", i % 50),
            quantity: (i % 17) as f64,
            alt_quantity: 0.0,
            unit: String::new(),
            alt_unit: String::new(),
            rate: 0.0,
            remarks: String::new(),
        })
        .collect()
}

fn bench_reconcile(c: &mut Criterion) {
    let item = ItemDraft {
        name: Some("Item 7".to_string()),
        unit: Some("kg".to_string()),
        alt_unit: Some("box".to_string()),
        factor: Some("5".to_string()),
        ..ItemDraft::default()
    }
    .into_item(ItemId::new())
    .unwrap();

    let mut group = c.benchmark_group("reconcile");
    for size in [1_000usize, 10_000, 100_000] {
        let txs = ledger(size);
        group.bench_with_input(BenchmarkId::new("index_and_fold", size), &txs, |b, txs| {
            b.iter(|| {
                let index = LedgerIndex::build(txs);
                reconcile(&item, index.matched(&item.name))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_reconcile);
criterion_main!(benches);
