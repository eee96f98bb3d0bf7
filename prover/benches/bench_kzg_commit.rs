use ark_bls12_381::Fr;
use ark_ff::UniformRand;
use criterion::{criterion_group, criterion_main, Criterion};
use rust_kzg_bls12381_primitives::{
    blob::Blob, consts::FIELD_ELEMENTS_PER_BLOB, polynomial::PolynomialEvalForm,
    setup::TrustedSetup,
};
use rust_kzg_bls12381_prover::kzg::{blob_to_kzg_commitment, commit_eval_form};
use std::time::Duration;

fn bench_kzg_commit(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let setup = TrustedSetup::insecure_dev(Fr::from(1927409816240961209u64)).unwrap();

    let evaluations: Vec<Fr> = (0..FIELD_ELEMENTS_PER_BLOB)
        .map(|_| Fr::rand(&mut rng))
        .collect();
    let polynomial = PolynomialEvalForm::new(evaluations).unwrap();
    let blob = Blob::from_polynomial(&polynomial);

    c.bench_function("bench_commit_eval_form", |b| {
        b.iter(|| commit_eval_form(&polynomial, &setup).unwrap());
    });

    c.bench_function("bench_blob_to_kzg_commitment", |b| {
        b.iter(|| blob_to_kzg_commitment(&blob, &setup).unwrap());
    });
}

fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(Duration::from_secs(5))
        .measurement_time(Duration::from_secs(10))
        .sample_size(10)
}

criterion_group!(
    name = benches;
    config = criterion_config();
    targets = bench_kzg_commit
);
criterion_main!(benches);
