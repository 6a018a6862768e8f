// Atomic group benchmarks.
//
// Measures group id computation and assignment across group sizes up to
// the protocol maximum.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use algotx_protocol::config::MAX_TX_GROUP_SIZE;
use algotx_protocol::crypto::Keypair;
use algotx_protocol::transaction::{
    assign_group_id, compute_group_id, PaymentBuilder, SuggestedParams, Transaction,
};

fn payments(count: usize) -> Vec<Transaction> {
    let from = Keypair::from_seed(&[1u8; 32]).address().to_string();
    let to = Keypair::from_seed(&[2u8; 32]).address().to_string();
    (0..count as u64)
        .map(|i| {
            PaymentBuilder::new(
                &from,
                &to,
                i + 1,
                SuggestedParams::new(1, 1_000, 2_000, "testnet-v1.0", [9u8; 32]),
            )
            .build()
            .unwrap()
        })
        .collect()
}

fn bench_compute_group_id(c: &mut Criterion) {
    let mut group = c.benchmark_group("group/compute_id");

    for size in [2, 4, 8, MAX_TX_GROUP_SIZE] {
        let txns = payments(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txns, |b, txns| {
            b.iter(|| compute_group_id(txns).unwrap());
        });
    }

    group.finish();
}

fn bench_assign_group_id(c: &mut Criterion) {
    let txns = payments(MAX_TX_GROUP_SIZE);
    let sender = Keypair::from_seed(&[1u8; 32]).address().to_string();

    c.bench_function("group/assign_all", |b| {
        b.iter(|| assign_group_id(&txns, "").unwrap());
    });
    c.bench_function("group/assign_filtered", |b| {
        b.iter(|| assign_group_id(&txns, &sender).unwrap());
    });
}

criterion_group!(benches, bench_compute_group_id, bench_assign_group_id);
criterion_main!(benches);
