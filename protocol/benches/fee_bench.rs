// Fee settlement benchmarks.
//
// Covers the throwaway-key size estimate on its own, and full builds of a
// payment and an asset creation (decode, validate, estimate, clamp).

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use algotx_protocol::crypto::Keypair;
use algotx_protocol::transaction::{
    estimate_size, AssetCreateBuilder, PaymentBuilder, SuggestedParams,
};

fn params() -> SuggestedParams {
    SuggestedParams::new(10, 1_000, 2_000, "testnet-v1.0", [9u8; 32])
}

fn addresses() -> (String, String) {
    (
        Keypair::from_seed(&[1u8; 32]).address().to_string(),
        Keypair::from_seed(&[2u8; 32]).address().to_string(),
    )
}

fn bench_estimate_size(c: &mut Criterion) {
    let (from, to) = addresses();
    let tx = PaymentBuilder::new(&from, &to, 5_000_000, params())
        .build()
        .unwrap();

    c.bench_function("fee/estimate_size", |b| {
        b.iter(|| estimate_size(&tx).unwrap());
    });
}

fn bench_build_payment(c: &mut Criterion) {
    let (from, to) = addresses();

    c.bench_function("fee/build_payment", |b| {
        b.iter(|| {
            PaymentBuilder::new(&from, &to, 5_000_000, params())
                .build()
                .unwrap()
        });
    });
}

fn bench_build_asset_create(c: &mut Criterion) {
    let (creator, manager) = addresses();

    c.bench_function("fee/build_asset_create", |b| {
        b.iter(|| {
            AssetCreateBuilder::new(&creator, 1_000_000, params())
                .unit_name("GLD")
                .asset_name("Gold")
                .manager(&manager)
                .reserve(&manager)
                .build()
                .unwrap()
        });
    });
}

fn bench_note_sizes(c: &mut Criterion) {
    let (from, to) = addresses();
    let mut group = c.benchmark_group("fee/build_payment_with_note");

    for size in [0usize, 64, 256, 1024] {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                PaymentBuilder::new(&from, &to, 1, params())
                    .note(vec![0xAB; size])
                    .build()
                    .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_estimate_size,
    bench_build_payment,
    bench_build_asset_create,
    bench_note_sizes,
);
criterion_main!(benches);
