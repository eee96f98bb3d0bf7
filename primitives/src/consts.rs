/// Number of field elements in a blob, fixed by the protocol.
/// Ref: https://github.com/ethereum/consensus-specs/blob/dev/specs/deneb/polynomial-commitments.md#blob
pub const FIELD_ELEMENTS_PER_BLOB: usize = 4096;

pub const BYTES_PER_FIELD_ELEMENT: usize = 32;

/// Wire size of a blob: 4096 field elements of 32 bytes each.
pub const BYTES_PER_BLOB: usize = FIELD_ELEMENTS_PER_BLOB * BYTES_PER_FIELD_ELEMENT;

pub const SIZE_OF_G1_AFFINE_COMPRESSED: usize = 48; // in bytes
pub const SIZE_OF_G2_AFFINE_COMPRESSED: usize = 96; // in bytes

/// Domain separation tag for the aggregation transcript.
/// Ref: https://github.com/ethereum/consensus-specs/blob/dev/specs/deneb/polynomial-commitments.md#blob
pub const FIAT_SHAMIR_PROTOCOL_DOMAIN: &[u8] = b"FSBLOBVERIFY_V1_";

/// First byte of every versioned hash, per EIP-4844.
pub const VERSIONED_HASH_VERSION_KZG: u8 = 0x01;

/// Fixed input length of the point-evaluation precompile:
/// versioned hash (32) || z (32) || y (32) || commitment (48) || proof (48).
pub const BYTES_PER_POINT_EVALUATION_INPUT: usize = 192;
