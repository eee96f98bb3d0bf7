use ark_bls12_381::Fr;
use ark_ff::UniformRand;
use criterion::{criterion_group, criterion_main, Criterion};
use rust_kzg_bls12381_primitives::{
    blob::Blob, consts::FIELD_ELEMENTS_PER_BLOB, helpers, polynomial::PolynomialEvalForm,
    setup::TrustedSetup,
};
use rust_kzg_bls12381_prover::kzg::{
    commit_eval_form, compute_aggregate_kzg_proof, compute_kzg_proof,
};
use rust_kzg_bls12381_verifier::{
    aggregate::verify_aggregate_kzg_proof, verify::verify_kzg_proof_points,
};
use std::time::Duration;

fn bench_kzg_verify(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let setup = TrustedSetup::insecure_dev(Fr::from(1927409816240961209u64)).unwrap();

    let random_polynomial = |rng: &mut rand::rngs::ThreadRng| {
        let evaluations: Vec<Fr> = (0..FIELD_ELEMENTS_PER_BLOB).map(|_| Fr::rand(rng)).collect();
        PolynomialEvalForm::new(evaluations).unwrap()
    };

    let polynomial = random_polynomial(&mut rng);
    let z = Fr::rand(&mut rng);
    let commitment = commit_eval_form(&polynomial, &setup).unwrap();
    let y = helpers::evaluate_polynomial_in_evaluation_form(&polynomial, &z);
    let proof = compute_kzg_proof(&polynomial, &z, &setup).unwrap();

    c.bench_function("bench_verify_kzg_proof", |b| {
        b.iter(|| assert!(verify_kzg_proof_points(&commitment, &z, &y, &proof, &setup)));
    });

    let blobs: Vec<Blob> = (0..2)
        .map(|_| Blob::from_polynomial(&random_polynomial(&mut rng)))
        .collect();
    let (aggregated_proof, commitments) = compute_aggregate_kzg_proof(&blobs, &setup).unwrap();

    c.bench_function("bench_verify_aggregate_kzg_proof_2_blobs", |b| {
        b.iter(|| {
            assert!(verify_aggregate_kzg_proof(
                &blobs,
                &commitments,
                &aggregated_proof,
                &setup
            )
            .unwrap())
        });
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
    targets = bench_kzg_verify
);
criterion_main!(benches);
