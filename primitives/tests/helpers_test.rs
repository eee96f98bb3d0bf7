use ark_bls12_381::{Fr, G1Affine};
use ark_ec::AffineRepr;
use ark_ff::{BigInteger, PrimeField, UniformRand};
use ark_std::{One, Zero};
use rand::Rng;
use sha2::{Digest, Sha256};

use rust_kzg_bls12381_primitives::{
    consts::{FIELD_ELEMENTS_PER_BLOB, VERSIONED_HASH_VERSION_KZG},
    domain,
    errors::KzgError,
    helpers::{
        compute_aggregation_challenge, compute_powers, evaluate_polynomial_in_evaluation_form,
        fr_to_bytes_be, fr_to_bytes_le, hash_to_field_element, kzg_to_versioned_hash,
        set_bytes_canonical_be, set_bytes_canonical_le,
    },
    points::KzgCommitment,
    polynomial::PolynomialEvalForm,
};

fn random_polynomial(rng: &mut impl Rng) -> PolynomialEvalForm {
    let evaluations: Vec<Fr> = (0..FIELD_ELEMENTS_PER_BLOB).map(|_| Fr::rand(rng)).collect();
    PolynomialEvalForm::new(evaluations).unwrap()
}

#[test]
fn test_compute_powers() {
    let mut rng = rand::thread_rng();
    let base = Fr::rand(&mut rng);

    let powers = compute_powers(&base, 5);
    assert_eq!(powers.len(), 5);
    assert!(powers[0].is_one());
    assert_eq!(powers[1], base);
    assert_eq!(powers[4], base * base * base * base);

    assert!(compute_powers(&base, 0).is_empty());
}

#[test]
fn test_scalar_byte_round_trips() {
    let mut rng = rand::thread_rng();
    for _ in 0..32 {
        let value = Fr::rand(&mut rng);
        assert_eq!(set_bytes_canonical_le(&fr_to_bytes_le(&value)).unwrap(), value);
        assert_eq!(set_bytes_canonical_be(&fr_to_bytes_be(&value)).unwrap(), value);
    }
}

#[test]
fn test_canonical_decoders_accept_q_minus_one() {
    let q_minus_one = -Fr::one();
    assert_eq!(
        set_bytes_canonical_le(&fr_to_bytes_le(&q_minus_one)).unwrap(),
        q_minus_one
    );
    assert_eq!(
        set_bytes_canonical_be(&fr_to_bytes_be(&q_minus_one)).unwrap(),
        q_minus_one
    );
}

#[test]
fn test_canonical_decoders_reject_modulus_and_above() {
    let modulus_le = Fr::MODULUS.to_bytes_le();
    assert!(matches!(
        set_bytes_canonical_le(&modulus_le),
        Err(KzgError::BadField(_))
    ));

    let modulus_be = Fr::MODULUS.to_bytes_be();
    assert!(matches!(
        set_bytes_canonical_be(&modulus_be),
        Err(KzgError::BadField(_))
    ));

    assert!(set_bytes_canonical_le(&[0xff; 32]).is_err());
    assert!(set_bytes_canonical_be(&[0xff; 32]).is_err());
}

#[test]
fn test_canonical_decoders_reject_wrong_length() {
    assert!(matches!(
        set_bytes_canonical_le(&[0u8; 31]),
        Err(KzgError::BadLength { .. })
    ));
    assert!(matches!(
        set_bytes_canonical_be(&[0u8; 33]),
        Err(KzgError::BadLength { .. })
    ));
}

#[test]
fn test_hash_to_field_element_matches_be_reduction() {
    let msg = b"some transcript bytes";
    let digest = Sha256::digest(msg);
    assert_eq!(
        hash_to_field_element(msg),
        Fr::from_be_bytes_mod_order(&digest)
    );
    // Deterministic, and sensitive to the input.
    assert_eq!(hash_to_field_element(msg), hash_to_field_element(msg));
    assert_ne!(hash_to_field_element(msg), hash_to_field_element(b"other"));
}

#[test]
fn test_versioned_hash_linkage() {
    let commitment = KzgCommitment::from_point(&G1Affine::generator());
    let versioned_hash = kzg_to_versioned_hash(&commitment);

    assert_eq!(versioned_hash[0], VERSIONED_HASH_VERSION_KZG);
    let plain: [u8; 32] = Sha256::digest(commitment.as_bytes()).into();
    assert_eq!(versioned_hash[1..], plain[1..]);
}

#[test]
fn test_aggregation_challenge_is_order_sensitive() {
    let mut rng = rand::thread_rng();
    let poly_a = random_polynomial(&mut rng);
    let poly_b = random_polynomial(&mut rng);
    let commitment_a = KzgCommitment::from_point(&G1Affine::generator());
    let commitment_b = KzgCommitment::from_point(&G1Affine::zero());

    let forward = compute_aggregation_challenge(
        &[poly_a.clone(), poly_b.clone()],
        &[commitment_a, commitment_b],
    )
    .unwrap();
    let reversed = compute_aggregation_challenge(
        &[poly_b.clone(), poly_a.clone()],
        &[commitment_b, commitment_a],
    )
    .unwrap();
    assert_ne!(forward, reversed);

    // Same transcript, same challenge.
    let again = compute_aggregation_challenge(
        &[poly_a.clone(), poly_b.clone()],
        &[commitment_a, commitment_b],
    )
    .unwrap();
    assert_eq!(forward, again);

    // Any commitment byte flips the challenge.
    let mut tampered = commitment_a;
    tampered.0[10] ^= 0x01;
    let with_tamper =
        compute_aggregation_challenge(&[poly_a, poly_b], &[tampered, commitment_b]).unwrap();
    assert_ne!(forward, with_tamper);
}

#[test]
fn test_evaluate_at_domain_points_returns_stored_values() {
    let mut rng = rand::thread_rng();
    let polynomial = random_polynomial(&mut rng);
    let roots_of_unity = domain::roots_of_unity();

    for _ in 0..8 {
        let index = rng.gen_range(0..FIELD_ELEMENTS_PER_BLOB);
        assert_eq!(
            evaluate_polynomial_in_evaluation_form(&polynomial, &roots_of_unity[index]),
            polynomial.evaluations()[index]
        );
    }
    // domain[0] = 1 is also a node.
    assert_eq!(
        evaluate_polynomial_in_evaluation_form(&polynomial, &Fr::one()),
        polynomial.evaluations()[0]
    );
}

#[test]
fn test_evaluate_indicator_polynomial() {
    // poly[0] = 1, everything else 0.
    let mut evaluations = vec![Fr::zero(); FIELD_ELEMENTS_PER_BLOB];
    evaluations[0] = Fr::one();
    let polynomial = PolynomialEvalForm::new(evaluations).unwrap();
    let roots_of_unity = domain::roots_of_unity();

    assert_eq!(
        evaluate_polynomial_in_evaluation_form(&polynomial, &Fr::one()),
        Fr::one()
    );
    assert_eq!(
        evaluate_polynomial_in_evaluation_form(&polynomial, &roots_of_unity[1]),
        Fr::zero()
    );
}

#[test]
fn test_evaluate_constant_polynomial_off_domain() {
    let constant = Fr::from(99u64);
    let polynomial =
        PolynomialEvalForm::new(vec![constant; FIELD_ELEMENTS_PER_BLOB]).unwrap();

    // Σ lagrange_i(z) = 1 for any z, so a constant polynomial evaluates to
    // its constant everywhere, on or off the domain.
    assert_eq!(
        evaluate_polynomial_in_evaluation_form(&polynomial, &Fr::from(2u64)),
        constant
    );
}

#[test]
fn test_evaluate_is_linear() {
    let mut rng = rand::thread_rng();
    let poly_p = random_polynomial(&mut rng);
    let poly_q = random_polynomial(&mut rng);
    let a = Fr::rand(&mut rng);
    let b = Fr::rand(&mut rng);
    let z = Fr::rand(&mut rng);

    let combined =
        PolynomialEvalForm::lincomb(&[poly_p.clone(), poly_q.clone()], &[a, b]).unwrap();

    assert_eq!(
        evaluate_polynomial_in_evaluation_form(&combined, &z),
        a * evaluate_polynomial_in_evaluation_form(&poly_p, &z)
            + b * evaluate_polynomial_in_evaluation_form(&poly_q, &z)
    );
}
