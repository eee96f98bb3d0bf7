//! Compressed wire encodings for BLS12-381 curve points.
//!
//! Commitments and proofs travel as the 48-byte (G1) and 96-byte (G2)
//! compressed encodings mandated by BLS12-381: big-endian x-coordinate with
//! three flag bits folded into the most significant byte. This differs from
//! the arkworks-native little-endian serialization, so the codec is spelled
//! out here. Decoding always subgroup-checks; every `G1Affine`/`G2Affine`
//! reaching the rest of the crate is either a checked decode or the result of
//! arithmetic on checked points.

use ark_bls12_381::{Fq, Fq2, G1Affine, G2Affine};
use ark_ec::AffineRepr;
use ark_ff::{BigInt, BigInteger, Field, PrimeField};
use ark_std::Zero;
use core::fmt;

use crate::consts::{SIZE_OF_G1_AFFINE_COMPRESSED, SIZE_OF_G2_AFFINE_COMPRESSED};
use crate::errors::KzgError;

// Flag bits of the leading byte, per the BLS12-381 point-serialization
// convention (zcash / IETF ciphersuite ordering).
const COMPRESSION_FLAG: u8 = 0b1000_0000;
const INFINITY_FLAG: u8 = 0b0100_0000;
const SIGN_FLAG: u8 = 0b0010_0000;
const FLAGS_MASK: u8 = COMPRESSION_FLAG | INFINITY_FLAG | SIGN_FLAG;

/// A KZG commitment in wire form: a compressed G1 point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KzgCommitment(pub [u8; SIZE_OF_G1_AFFINE_COMPRESSED]);

/// A KZG proof in wire form: a compressed G1 point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KzgProof(pub [u8; SIZE_OF_G1_AFFINE_COMPRESSED]);

impl KzgCommitment {
    pub fn from_point(point: &G1Affine) -> Self {
        Self(write_g1_point_compressed(point))
    }

    /// Decompresses and subgroup-checks the commitment.
    pub fn to_point(&self) -> Result<G1Affine, KzgError> {
        read_g1_point_compressed(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8; SIZE_OF_G1_AFFINE_COMPRESSED] {
        &self.0
    }
}

impl KzgProof {
    pub fn from_point(point: &G1Affine) -> Self {
        Self(write_g1_point_compressed(point))
    }

    /// Decompresses and subgroup-checks the proof.
    pub fn to_point(&self) -> Result<G1Affine, KzgError> {
        read_g1_point_compressed(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8; SIZE_OF_G1_AFFINE_COMPRESSED] {
        &self.0
    }

    /// The all-zero sentinel returned for an aggregate over zero blobs.
    ///
    /// Not a valid point encoding; it is never fed to the pairing.
    pub fn empty() -> Self {
        Self([0u8; SIZE_OF_G1_AFFINE_COMPRESSED])
    }
}

impl fmt::Display for KzgCommitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in self.0.iter() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Display for KzgProof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in self.0.iter() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

pub fn is_zeroed(first_byte: u8, buf: &[u8]) -> bool {
    first_byte == 0 && buf.iter().all(|&byte| byte == 0)
}

/// Whether `y` is the lexicographically larger of the two square roots,
/// i.e. `y > (q - 1) / 2` in the canonical representation.
fn lexicographically_largest(y: &Fq) -> bool {
    *y > -*y
}

/// Same ordering lifted to Fq2: the c1 component decides, c0 breaks ties.
fn lexicographically_largest_fq2(y: &Fq2) -> bool {
    if y.c1.is_zero() {
        y.c0 > -y.c0
    } else {
        y.c1 > -y.c1
    }
}

fn fq_from_be_bytes(bytes: &[u8; 48]) -> Option<Fq> {
    let mut limbs = [0u64; 6];
    for (i, chunk) in bytes.chunks(8).enumerate() {
        limbs[5 - i] = u64::from_be_bytes(chunk.try_into().expect("chunk is 8 bytes"));
    }
    // from_bigint rejects values >= the base-field modulus.
    Fq::from_bigint(BigInt::new(limbs))
}

fn fq_to_be_bytes(value: &Fq) -> [u8; 48] {
    let mut out = [0u8; 48];
    out.copy_from_slice(&value.into_bigint().to_bytes_be());
    out
}

/// Decodes a compressed G1 point, including the subgroup check.
pub fn read_g1_point_compressed(bytes: &[u8]) -> Result<G1Affine, KzgError> {
    if bytes.len() != SIZE_OF_G1_AFFINE_COMPRESSED {
        return Err(KzgError::BadLength {
            expected: SIZE_OF_G1_AFFINE_COMPRESSED,
            actual: bytes.len(),
        });
    }

    let flags = bytes[0] & FLAGS_MASK;
    if flags & COMPRESSION_FLAG == 0 {
        return Err(KzgError::BadPoint(
            "compression flag unset on a 48-byte G1 encoding".to_string(),
        ));
    }

    if flags & INFINITY_FLAG != 0 {
        if flags & SIGN_FLAG != 0 || !is_zeroed(bytes[0] & !FLAGS_MASK, &bytes[1..]) {
            return Err(KzgError::BadPoint(
                "point at infinity not coded properly for G1".to_string(),
            ));
        }
        return Ok(G1Affine::zero());
    }

    let mut x_bytes = [0u8; SIZE_OF_G1_AFFINE_COMPRESSED];
    x_bytes.copy_from_slice(bytes);
    x_bytes[0] &= !FLAGS_MASK;
    let x = fq_from_be_bytes(&x_bytes)
        .ok_or_else(|| KzgError::BadPoint("G1 x-coordinate is not canonical".to_string()))?;

    // y^2 = x^3 + 4 on the BLS12-381 G1 curve.
    let y_squared = x * x * x + Fq::from(4u64);
    let mut y = y_squared
        .sqrt()
        .ok_or_else(|| KzgError::BadPoint("G1 point not on curve".to_string()))?;

    if lexicographically_largest(&y) != (flags & SIGN_FLAG != 0) {
        y = -y;
    }

    let point = G1Affine::new_unchecked(x, y);
    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(KzgError::BadPoint(
            "G1 point not in the correct subgroup".to_string(),
        ));
    }
    Ok(point)
}

/// Compresses a G1 point to its 48-byte wire form.
pub fn write_g1_point_compressed(point: &G1Affine) -> [u8; SIZE_OF_G1_AFFINE_COMPRESSED] {
    let mut out = [0u8; SIZE_OF_G1_AFFINE_COMPRESSED];
    if point.is_zero() {
        out[0] = COMPRESSION_FLAG | INFINITY_FLAG;
        return out;
    }

    out.copy_from_slice(&fq_to_be_bytes(&point.x));
    out[0] |= COMPRESSION_FLAG;
    if lexicographically_largest(&point.y) {
        out[0] |= SIGN_FLAG;
    }
    out
}

/// Decodes a compressed G2 point, including the subgroup check.
///
/// The x-coordinate is laid out as `c1 || c0`, each 48 bytes big-endian.
pub fn read_g2_point_compressed(bytes: &[u8]) -> Result<G2Affine, KzgError> {
    if bytes.len() != SIZE_OF_G2_AFFINE_COMPRESSED {
        return Err(KzgError::BadLength {
            expected: SIZE_OF_G2_AFFINE_COMPRESSED,
            actual: bytes.len(),
        });
    }

    let flags = bytes[0] & FLAGS_MASK;
    if flags & COMPRESSION_FLAG == 0 {
        return Err(KzgError::BadPoint(
            "compression flag unset on a 96-byte G2 encoding".to_string(),
        ));
    }

    if flags & INFINITY_FLAG != 0 {
        if flags & SIGN_FLAG != 0 || !is_zeroed(bytes[0] & !FLAGS_MASK, &bytes[1..]) {
            return Err(KzgError::BadPoint(
                "point at infinity not coded properly for G2".to_string(),
            ));
        }
        return Ok(G2Affine::zero());
    }

    let mut c1_bytes = [0u8; 48];
    c1_bytes.copy_from_slice(&bytes[..48]);
    c1_bytes[0] &= !FLAGS_MASK;
    let mut c0_bytes = [0u8; 48];
    c0_bytes.copy_from_slice(&bytes[48..]);

    let x_c1 = fq_from_be_bytes(&c1_bytes)
        .ok_or_else(|| KzgError::BadPoint("G2 x.c1 coordinate is not canonical".to_string()))?;
    let x_c0 = fq_from_be_bytes(&c0_bytes)
        .ok_or_else(|| KzgError::BadPoint("G2 x.c0 coordinate is not canonical".to_string()))?;
    let x = Fq2::new(x_c0, x_c1);

    // y^2 = x^3 + 4(u + 1) on the twist.
    let b_twist = Fq2::new(Fq::from(4u64), Fq::from(4u64));
    let y_squared = x * x * x + b_twist;
    let mut y = y_squared
        .sqrt()
        .ok_or_else(|| KzgError::BadPoint("G2 point not on curve".to_string()))?;

    if lexicographically_largest_fq2(&y) != (flags & SIGN_FLAG != 0) {
        y = -y;
    }

    let point = G2Affine::new_unchecked(x, y);
    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(KzgError::BadPoint(
            "G2 point not in the correct subgroup".to_string(),
        ));
    }
    Ok(point)
}

/// Compresses a G2 point to its 96-byte wire form.
pub fn write_g2_point_compressed(point: &G2Affine) -> [u8; SIZE_OF_G2_AFFINE_COMPRESSED] {
    let mut out = [0u8; SIZE_OF_G2_AFFINE_COMPRESSED];
    if point.is_zero() {
        out[0] = COMPRESSION_FLAG | INFINITY_FLAG;
        return out;
    }

    out[..48].copy_from_slice(&fq_to_be_bytes(&point.x.c1));
    out[48..].copy_from_slice(&fq_to_be_bytes(&point.x.c0));
    out[0] |= COMPRESSION_FLAG;
    if lexicographically_largest_fq2(&point.y) {
        out[0] |= SIGN_FLAG;
    }
    out
}
