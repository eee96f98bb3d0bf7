use thiserror::Error;

/// Errors related to polynomial operations.
///
/// The `PolynomialError` enum encapsulates the errors that can occur while
/// assembling or transforming the fixed-width evaluation-form polynomials,
/// such as FFT failures and width mismatches.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum PolynomialError {
    /// The polynomial does not have exactly `FIELD_ELEMENTS_PER_BLOB` entries.
    #[error("polynomial has {actual} evaluations, the blob width is {expected}")]
    Length { expected: usize, actual: usize },

    /// Error related to Fast Fourier Transform (FFT) operations with a descriptive message.
    #[error("FFT error: {0}")]
    Fft(String),
}

/// Errors related to KZG operations.
///
/// The `KzgError` enum encapsulates all possible errors that can occur during
/// KZG-related operations, including those from `PolynomialError`. Each
/// consensus-relevant failure class gets its own variant so callers can map
/// them to distinct precompile outcomes.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum KzgError {
    /// Wraps errors originating from polynomial operations.
    #[error("polynomial error: {0}")]
    Polynomial(#[from] PolynomialError),

    /// An input byte string has the wrong length.
    #[error("invalid input length: expected {expected} bytes, got {actual}")]
    BadLength { expected: usize, actual: usize },

    /// A 32-byte chunk decodes to an integer that is not a canonical field element.
    #[error("invalid field element: {0}")]
    BadField(String),

    /// A compressed G1/G2 encoding fails to decompress or subgroup-check.
    #[error("invalid curve point: {0}")]
    BadPoint(String),

    /// The versioned hash supplied to the precompile does not match the commitment.
    #[error("versioned hash does not match the commitment")]
    VersionedHashMismatch,

    /// Proof generation was asked to open at a point of the evaluation domain.
    #[error("invalid z challenge: evaluation point lies on the domain")]
    InvalidChallenge,

    /// An aggregate was requested over zero blobs.
    #[error("aggregate proof requested over zero blobs")]
    EmptyAggregate,

    /// The pairing equation does not hold.
    #[error("KZG proof rejected by the pairing check")]
    ProofRejected,

    /// Error produced by the multi-scalar multiplication backend.
    #[error("commit error: {0}")]
    Commit(String),

    /// The trusted setup could not be read or fails validation. Fatal at startup.
    #[error("trusted setup error: {0}")]
    Setup(String),
}
