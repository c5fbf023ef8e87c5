//! Performance benchmarks for the claim orchestrator.
//!
//! Run with: cargo bench

use alloy::primitives::{Address, U256};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use zk_claim_orchestrator::crypto::{bind, bind_address, encode};
use zk_claim_orchestrator::domain::{FieldElement, GeneratedProof, RawProof};

fn sample_proof(signals: usize) -> GeneratedProof {
    let fe = |v: u64| FieldElement(U256::from(v) << 200usize);
    GeneratedProof {
        proof: RawProof {
            pi_a: [fe(1), fe(2), fe(1)],
            pi_b: [[fe(3), fe(4)], [fe(5), fe(6)], [fe(1), fe(0)]],
            pi_c: [fe(7), fe(8), fe(1)],
            protocol: Some("groth16".to_string()),
            curve: Some("bn128".to_string()),
        },
        pub_signals: (0..signals as u64).map(fe).collect(),
    }
}

/// Benchmark challenge binding
fn bench_challenge(c: &mut Criterion) {
    let address = Address::repeat_byte(0xAB);
    let bytes = address.to_vec();

    let mut group = c.benchmark_group("challenge");
    group.bench_function("bind_address", |b| {
        b.iter(|| bind_address(black_box(address)))
    });
    group.bench_function("bind_slice", |b| b.iter(|| bind(black_box(&bytes))));
    group.finish();
}

/// Benchmark proof calldata encoding
fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for signals in [11usize, 22, 64] {
        let proof = sample_proof(signals);
        group.throughput(Throughput::Elements(signals as u64));
        group.bench_with_input(BenchmarkId::from_parameter(signals), &proof, |b, proof| {
            b.iter(|| encode(black_box(proof)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_challenge, bench_encode);
criterion_main!(benches);
