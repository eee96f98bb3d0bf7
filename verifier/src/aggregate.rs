use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use rust_kzg_bls12381_primitives::{
    blob::Blob,
    errors::KzgError,
    helpers,
    points::{KzgCommitment, KzgProof},
    polynomial::PolynomialEvalForm,
    setup::TrustedSetup,
};

use crate::verify::verify_kzg_proof_points;

/// Verifies one aggregated proof against a batch of blobs and their claimed
/// commitments.
///
/// The verifier re-derives the Fiat-Shamir scalar and the aggregated
/// polynomial from the blobs, but the aggregated commitment from the
/// *provided* commitments, so any mismatch between a blob and its claimed
/// commitment is caught by the pairing.
///
/// Zero blobs are a degenerate case that never reaches the chain (blob
/// transactions require at least one blob): only the distinguished empty
/// proof is accepted, and the zero bytes are never fed to the pairing.
/// Ref: https://github.com/ethereum/consensus-specs/blob/dev/specs/eip4844/polynomial-commitments.md#verify_aggregate_kzg_proof
pub fn verify_aggregate_kzg_proof(
    blobs: &[Blob],
    expected_commitments: &[KzgCommitment],
    aggregated_proof: &KzgProof,
    setup: &TrustedSetup,
) -> Result<bool, KzgError> {
    if blobs.len() != expected_commitments.len() {
        return Err(KzgError::BadLength {
            expected: blobs.len(),
            actual: expected_commitments.len(),
        });
    }
    if blobs.is_empty() {
        return Ok(*aggregated_proof == KzgProof::empty());
    }

    let polys: Vec<PolynomialEvalForm> = blobs
        .par_iter()
        .map(|blob| blob.to_polynomial())
        .collect::<Result<_, _>>()?;

    let (aggregated_poly, aggregated_commitment, evaluation_challenge) =
        helpers::compute_aggregated_poly_and_commitment(&polys, expected_commitments)?;

    let y = helpers::evaluate_polynomial_in_evaluation_form(&aggregated_poly, &evaluation_challenge);
    let proof_point = aggregated_proof.to_point()?;

    Ok(verify_kzg_proof_points(
        &aggregated_commitment,
        &evaluation_challenge,
        &y,
        &proof_point,
        setup,
    ))
}
