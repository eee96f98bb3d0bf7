use ark_bls12_381::{Bls12_381, Fr, G1Affine, G1Projective, G2Affine};
use ark_ec::{pairing::Pairing, CurveGroup, VariableBaseMSM};
use ark_ff::{BigInteger, Field, PrimeField};
use ark_serialize::CanonicalDeserialize;
use ark_std::{One, Zero};
use sha2::{Digest, Sha256};

use crate::{
    consts::{
        BYTES_PER_FIELD_ELEMENT, FIAT_SHAMIR_PROTOCOL_DOMAIN, FIELD_ELEMENTS_PER_BLOB,
        SIZE_OF_G1_AFFINE_COMPRESSED, VERSIONED_HASH_VERSION_KZG,
    },
    domain,
    errors::KzgError,
    points::KzgCommitment,
    polynomial::PolynomialEvalForm,
};

/// Decodes a 32-byte little-endian chunk as a canonical scalar.
///
/// Deserialization rejects any value at or above the field modulus, so this
/// doubles as the canonicity check for blob chunks.
pub fn set_bytes_canonical_le(data: &[u8]) -> Result<Fr, KzgError> {
    if data.len() != BYTES_PER_FIELD_ELEMENT {
        return Err(KzgError::BadLength {
            expected: BYTES_PER_FIELD_ELEMENT,
            actual: data.len(),
        });
    }
    Fr::deserialize_uncompressed(data)
        .map_err(|_| KzgError::BadField("value is not below the field modulus".to_string()))
}

/// Decodes a 32-byte big-endian chunk as a canonical scalar. The wire form of
/// the point-evaluation interface.
pub fn set_bytes_canonical_be(data: &[u8]) -> Result<Fr, KzgError> {
    if data.len() != BYTES_PER_FIELD_ELEMENT {
        return Err(KzgError::BadLength {
            expected: BYTES_PER_FIELD_ELEMENT,
            actual: data.len(),
        });
    }
    let mut le_bytes = [0u8; BYTES_PER_FIELD_ELEMENT];
    le_bytes.copy_from_slice(data);
    le_bytes.reverse();
    Fr::deserialize_uncompressed(&le_bytes[..])
        .map_err(|_| KzgError::BadField("value is not below the field modulus".to_string()))
}

/// Canonical 32-byte little-endian encoding of a scalar.
pub fn fr_to_bytes_le(value: &Fr) -> [u8; BYTES_PER_FIELD_ELEMENT] {
    let mut out = [0u8; BYTES_PER_FIELD_ELEMENT];
    out.copy_from_slice(&value.into_bigint().to_bytes_le());
    out
}

/// Canonical 32-byte big-endian encoding of a scalar.
pub fn fr_to_bytes_be(value: &Fr) -> [u8; BYTES_PER_FIELD_ELEMENT] {
    let mut out = fr_to_bytes_le(value);
    out.reverse();
    out
}

/// Maps a byte string to a scalar: SHA-256, with the digest interpreted as a
/// big-endian integer and reduced modulo the field order.
pub fn hash_to_field_element(msg: &[u8]) -> Fr {
    let msg_digest = Sha256::digest(msg);
    Fr::from_be_bytes_mod_order(msg_digest.as_slice())
}

/// Computes powers of a field element: `[1, base, base², ..., base^(count-1)]`.
/// Ref: https://github.com/ethereum/consensus-specs/blob/dev/specs/deneb/polynomial-commitments.md#compute_powers
pub fn compute_powers(base: &Fr, count: usize) -> Vec<Fr> {
    let mut powers = Vec::with_capacity(count);
    let mut current = Fr::one();
    for _ in 0..count {
        powers.push(current);
        current *= base;
    }
    powers
}

/// Computes a linear combination of G1 points weighted by scalar coefficients,
/// as a single multi-scalar multiplication.
pub fn g1_lincomb(points: &[G1Affine], scalars: &[Fr]) -> Result<G1Affine, KzgError> {
    let lincomb =
        G1Projective::msm(points, scalars).map_err(|_| KzgError::Commit(format!(
            "MSM length mismatch: {} points, {} scalars",
            points.len(),
            scalars.len()
        )))?;
    Ok(lincomb.into_affine())
}

/// Checks `e(a1, a2) == e(b1, b2)` with one Miller loop and one final
/// exponentiation, by testing `e(a1, a2) · e(-b1, b2) == 1`.
pub fn pairings_verify(a1: G1Affine, a2: G2Affine, b1: G1Affine, b2: G2Affine) -> bool {
    let neg_b1 = -b1;
    let p = [a1, neg_b1];
    let q = [a2, b2];
    let result = Bls12_381::multi_pairing(p, q);
    result.is_zero()
}

/// Computes the versioned hash of a commitment, per EIP-4844: SHA-256 of the
/// compressed commitment with the first byte replaced by the version tag.
pub fn kzg_to_versioned_hash(commitment: &KzgCommitment) -> [u8; 32] {
    let mut hash: [u8; 32] = Sha256::digest(commitment.as_bytes()).into();
    hash[0] = VERSIONED_HASH_VERSION_KZG;
    hash
}

/// Evaluates a polynomial given in evaluation form at an arbitrary point,
/// using the barycentric formula
/// `f(z) = ((z^width - 1) / width) · Σ_i evaluations[i] · domain[i] / (z - domain[i])`.
///
/// If `z` coincides with a domain point the formula would divide by zero; the
/// value there is simply the stored evaluation, which is returned directly.
/// Ref: https://github.com/ethereum/consensus-specs/blob/dev/specs/deneb/polynomial-commitments.md#evaluate_polynomial_in_evaluation_form
pub fn evaluate_polynomial_in_evaluation_form(polynomial: &PolynomialEvalForm, z: &Fr) -> Fr {
    let roots_of_unity = domain::roots_of_unity();

    if let Some(index) = roots_of_unity.iter().position(|root| root == z) {
        return polynomial.evaluations()[index];
    }

    // All denominators are nonzero now that z is known to be off-domain, so
    // one batched inversion covers the whole sum.
    let mut denominators: Vec<Fr> = roots_of_unity.iter().map(|root| *z - root).collect();
    ark_ff::batch_inversion(&mut denominators);

    let mut sum = Fr::zero();
    for ((evaluation, root), inverse) in polynomial
        .evaluations()
        .iter()
        .zip(roots_of_unity)
        .zip(&denominators)
    {
        sum += *evaluation * root * inverse;
    }

    let width_term = z.pow([FIELD_ELEMENTS_PER_BLOB as u64]) - Fr::one();
    sum * width_term * domain::inverse_width()
}

/// Derives the Fiat-Shamir aggregation scalar `r` from the full transcript of
/// polynomials and commitments.
///
/// The hashed byte string is, exactly and in order: the ASCII domain tag, the
/// blob width and the blob count as little-endian u64, every polynomial as
/// 32-byte little-endian field elements, and every commitment in compressed
/// form. This layout is consensus-critical; implementations that disagree on
/// a single byte derive different challenges and cannot interoperate.
/// Ref: https://github.com/ethereum/consensus-specs/blob/dev/specs/deneb/polynomial-commitments.md#hash_to_bls_field
pub fn compute_aggregation_challenge(
    polys: &[PolynomialEvalForm],
    commitments: &[KzgCommitment],
) -> Result<Fr, KzgError> {
    let challenge_input_size = FIAT_SHAMIR_PROTOCOL_DOMAIN.len()
        + 8
        + 8
        + polys.len() * FIELD_ELEMENTS_PER_BLOB * BYTES_PER_FIELD_ELEMENT
        + commitments.len() * SIZE_OF_G1_AFFINE_COMPRESSED;

    let mut digest_bytes = Vec::with_capacity(challenge_input_size);
    digest_bytes.extend_from_slice(FIAT_SHAMIR_PROTOCOL_DOMAIN);
    digest_bytes.extend_from_slice(&(FIELD_ELEMENTS_PER_BLOB as u64).to_le_bytes());
    digest_bytes.extend_from_slice(&(polys.len() as u64).to_le_bytes());

    for poly in polys {
        for evaluation in poly.evaluations() {
            digest_bytes.extend_from_slice(&fr_to_bytes_le(evaluation));
        }
    }
    for commitment in commitments {
        digest_bytes.extend_from_slice(commitment.as_bytes());
    }

    // Catch any drift between the layout above and the size computation.
    if digest_bytes.len() != challenge_input_size {
        return Err(KzgError::BadLength {
            expected: challenge_input_size,
            actual: digest_bytes.len(),
        });
    }

    Ok(hash_to_field_element(&digest_bytes))
}

/// Combines `k` polynomials and their commitments into the aggregated
/// polynomial, the aggregated commitment, and the evaluation challenge
/// `z = r^k`, shared by aggregate proof generation and verification.
///
/// The aggregated commitment is an MSM over the *provided* commitments, never
/// recomputed from the aggregated polynomial, so that a mismatched claim is
/// caught by the pairing.
/// Ref: https://github.com/ethereum/consensus-specs/blob/dev/specs/eip4844/polynomial-commitments.md#compute_aggregated_poly_and_commitment
pub fn compute_aggregated_poly_and_commitment(
    polys: &[PolynomialEvalForm],
    commitments: &[KzgCommitment],
) -> Result<(PolynomialEvalForm, G1Affine, Fr), KzgError> {
    if polys.is_empty() {
        return Err(KzgError::EmptyAggregate);
    }
    if polys.len() != commitments.len() {
        return Err(KzgError::BadLength {
            expected: polys.len(),
            actual: commitments.len(),
        });
    }

    let r = compute_aggregation_challenge(polys, commitments)?;
    let powers = compute_powers(&r, polys.len());
    let evaluation_challenge = r * powers[powers.len() - 1];

    let aggregated_poly = PolynomialEvalForm::lincomb(polys, &powers)?;

    let commitment_points = commitments
        .iter()
        .map(|commitment| commitment.to_point())
        .collect::<Result<Vec<G1Affine>, KzgError>>()?;
    let aggregated_commitment = g1_lincomb(&commitment_points, &powers)?;

    Ok((aggregated_poly, aggregated_commitment, evaluation_challenge))
}
