use ark_bls12_381::{Fr, G1Affine, G2Affine};
use ark_ec::{AffineRepr, CurveGroup};
use rust_kzg_bls12381_primitives::{
    consts::BYTES_PER_FIELD_ELEMENT,
    errors::KzgError,
    helpers,
    points::{KzgCommitment, KzgProof},
    setup::TrustedSetup,
};

/// Verifies a KZG opening: that the polynomial behind `commitment` evaluates
/// to `y` at `z`.
///
/// Accepts iff `e(C - y·G1, G2) == e(proof, s·G2 - z·G2)`, checked as a
/// two-term multi-pairing against one. Subgroup membership of `commitment`
/// and `proof` is the caller's responsibility and is guaranteed by the
/// compressed decoder upstream.
/// Ref: https://github.com/ethereum/consensus-specs/blob/dev/specs/deneb/polynomial-commitments.md#verify_kzg_proof
pub fn verify_kzg_proof_points(
    commitment: &G1Affine,
    z: &Fr,
    y: &Fr,
    proof: &G1Affine,
    setup: &TrustedSetup,
) -> bool {
    // [z]*G2 and [y]*G1 encode the claimed opening as curve points.
    let z_g2 = G2Affine::generator() * z;
    let y_g1 = G1Affine::generator() * y;

    // [s - z]*G2 represents (X - z) evaluated at the setup secret.
    let x_minus_z = (setup.g2_tau().into_group() - z_g2).into_affine();
    // [C - y*G1] must equal proof * (s - z) for a valid opening.
    let commitment_minus_y = (commitment.into_group() - y_g1).into_affine();

    helpers::pairings_verify(
        commitment_minus_y,
        G2Affine::generator(),
        *proof,
        x_minus_z,
    )
}

/// Byte-level wrapper over [verify_kzg_proof_points]: decodes the compressed
/// commitment and proof (with subgroup checks) and the big-endian scalars
/// (rejecting non-canonical values) before running the pairing check.
pub fn verify_kzg_proof(
    commitment: &KzgCommitment,
    z_bytes: &[u8; BYTES_PER_FIELD_ELEMENT],
    y_bytes: &[u8; BYTES_PER_FIELD_ELEMENT],
    proof: &KzgProof,
    setup: &TrustedSetup,
) -> Result<bool, KzgError> {
    let z = helpers::set_bytes_canonical_be(z_bytes)?;
    let y = helpers::set_bytes_canonical_be(y_bytes)?;
    let commitment_point = commitment.to_point()?;
    let proof_point = proof.to_point()?;

    Ok(verify_kzg_proof_points(
        &commitment_point,
        &z,
        &y,
        &proof_point,
        setup,
    ))
}
