use ark_bls12_381::{Fr, G1Affine};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use rust_kzg_bls12381_primitives::{
    blob::Blob,
    domain,
    errors::KzgError,
    helpers,
    points::{KzgCommitment, KzgProof},
    polynomial::{PolynomialCoeffForm, PolynomialEvalForm},
    setup::TrustedSetup,
};

/// Commits to a polynomial in evaluation form: `Σ_i evaluations[i] · L_i`
/// where `L_i` is the Lagrange setup point for the `i`-th root of unity.
///
/// Because the Lagrange table was bit-reversed once at load and the
/// evaluations are in natural domain order, the MSM is simply element-wise.
/// Ref: https://github.com/ethereum/consensus-specs/blob/dev/specs/deneb/polynomial-commitments.md#blob_to_kzg_commitment
pub fn commit_eval_form(
    polynomial: &PolynomialEvalForm,
    setup: &TrustedSetup,
) -> Result<G1Affine, KzgError> {
    helpers::g1_lincomb(setup.g1_lagrange(), polynomial.evaluations())
}

/// Commits to a polynomial in coefficient form against the monomial setup.
///
/// Equivalent to [commit_eval_form] after an FFT; retained for test fixtures
/// and callers that already hold coefficients.
pub fn commit_coeff_form(
    polynomial: &PolynomialCoeffForm,
    setup: &TrustedSetup,
) -> Result<G1Affine, KzgError> {
    helpers::g1_lincomb(setup.g1_monomial(), polynomial.coeffs())
}

/// Parses a blob and commits to it, returning the 48-byte wire form.
pub fn blob_to_kzg_commitment(blob: &Blob, setup: &TrustedSetup) -> Result<KzgCommitment, KzgError> {
    let polynomial = blob.to_polynomial()?;
    let commitment = commit_eval_form(&polynomial, setup)?;
    Ok(KzgCommitment::from_point(&commitment))
}

/// Computes a KZG opening proof for `polynomial` at the point `z`.
///
/// The quotient `(P(X) - y) / (X - z)` is formed point-wise on the domain,
/// which is exact as long as `z` is not itself a domain point; a domain `z`
/// is rejected as `InvalidChallenge`. Fiat-Shamir challenges make that case
/// overwhelmingly improbable, but it is a defined error rather than UB.
/// Ref: https://github.com/ethereum/consensus-specs/blob/dev/specs/eip4844/polynomial-commitments.md#compute_kzg_proof
pub fn compute_kzg_proof(
    polynomial: &PolynomialEvalForm,
    z: &Fr,
    setup: &TrustedSetup,
) -> Result<G1Affine, KzgError> {
    let roots_of_unity = domain::roots_of_unity();
    if roots_of_unity.iter().any(|root| root == z) {
        return Err(KzgError::InvalidChallenge);
    }

    let y = helpers::evaluate_polynomial_in_evaluation_form(polynomial, z);

    // Denominators (root - z) are all nonzero here, so invert them in one batch.
    let mut denominators: Vec<Fr> = roots_of_unity.iter().map(|root| *root - z).collect();
    ark_ff::batch_inversion(&mut denominators);

    let quotient: Vec<Fr> = polynomial
        .evaluations()
        .iter()
        .zip(&denominators)
        .map(|(evaluation, inverse)| (*evaluation - y) * inverse)
        .collect();

    helpers::g1_lincomb(setup.g1_lagrange(), &quotient)
}

/// Computes a single aggregated proof for a batch of blobs, together with the
/// per-blob commitments it attests to.
///
/// The batch is folded with powers of the Fiat-Shamir scalar `r` derived from
/// the full transcript, and opened once at `z = r^k`. Zero blobs yield the
/// distinguished empty proof and no commitments; the pairing is never invoked
/// for that case.
/// Ref: https://github.com/ethereum/consensus-specs/blob/dev/specs/eip4844/polynomial-commitments.md#compute_aggregate_kzg_proof
pub fn compute_aggregate_kzg_proof(
    blobs: &[Blob],
    setup: &TrustedSetup,
) -> Result<(KzgProof, Vec<KzgCommitment>), KzgError> {
    if blobs.is_empty() {
        return Ok((KzgProof::empty(), Vec::new()));
    }

    let polys: Vec<PolynomialEvalForm> = blobs
        .par_iter()
        .map(|blob| blob.to_polynomial())
        .collect::<Result<_, _>>()?;

    let commitments: Vec<KzgCommitment> = polys
        .iter()
        .map(|poly| commit_eval_form(poly, setup).map(|point| KzgCommitment::from_point(&point)))
        .collect::<Result<_, _>>()?;

    let (aggregated_poly, _aggregated_commitment, evaluation_challenge) =
        helpers::compute_aggregated_poly_and_commitment(&polys, &commitments)?;

    let proof = compute_kzg_proof(&aggregated_poly, &evaluation_challenge, setup)?;
    Ok((KzgProof::from_point(&proof), commitments))
}
