//! The EIP-4844 point-evaluation precompile.
//!
//! A fixed 192-byte input, an empty byte string on success, and a distinct
//! error for every failure class so the EVM dispatcher (out of scope here)
//! can account for them however it chooses.

use rust_kzg_bls12381_primitives::{
    consts::{BYTES_PER_POINT_EVALUATION_INPUT, SIZE_OF_G1_AFFINE_COMPRESSED},
    errors::KzgError,
    helpers,
    points::{KzgCommitment, KzgProof},
    setup::TrustedSetup,
};

use crate::verify::verify_kzg_proof_points;

/// Verifies a single-point opening from its precompile wire form.
///
/// Input layout:
///
/// | offset | length | field |
/// |--------|--------|-------|
/// | 0      | 32     | claimed versioned hash |
/// | 32     | 32     | evaluation point `z` (big-endian) |
/// | 64     | 32     | claimed value `y` (big-endian) |
/// | 96     | 48     | commitment (compressed G1) |
/// | 144    | 48     | proof (compressed G1) |
///
/// Ref: https://eips.ethereum.org/EIPS/eip-4844#point-evaluation-precompile
pub fn point_evaluation(input: &[u8], setup: &TrustedSetup) -> Result<Vec<u8>, KzgError> {
    if input.len() != BYTES_PER_POINT_EVALUATION_INPUT {
        return Err(KzgError::BadLength {
            expected: BYTES_PER_POINT_EVALUATION_INPUT,
            actual: input.len(),
        });
    }

    // Decoding z and y checks they are below the field modulus, per EIP-4844.
    let z = helpers::set_bytes_canonical_be(&input[32..64])?;
    let y = helpers::set_bytes_canonical_be(&input[64..96])?;

    let mut commitment_bytes = [0u8; SIZE_OF_G1_AFFINE_COMPRESSED];
    commitment_bytes.copy_from_slice(&input[96..144]);
    let commitment = KzgCommitment(commitment_bytes);

    // The versioned hash binds the 48-byte commitment to the 32-byte handle
    // the EVM carries; check it before paying for any curve work.
    if helpers::kzg_to_versioned_hash(&commitment)[..] != input[..32] {
        return Err(KzgError::VersionedHashMismatch);
    }

    let mut proof_bytes = [0u8; SIZE_OF_G1_AFFINE_COMPRESSED];
    proof_bytes.copy_from_slice(&input[144..192]);

    let commitment_point = commitment.to_point()?;
    let proof_point = KzgProof(proof_bytes).to_point()?;

    if !verify_kzg_proof_points(&commitment_point, &z, &y, &proof_point, setup) {
        return Err(KzgError::ProofRejected);
    }
    Ok(Vec::new())
}
