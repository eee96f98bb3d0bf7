use crate::{
    consts::{BYTES_PER_BLOB, BYTES_PER_FIELD_ELEMENT},
    errors::KzgError,
    helpers,
    polynomial::PolynomialEvalForm,
};

use serde::{Deserialize, Serialize};

/// A blob aligned with the EIP-4844 consensus spec: exactly
/// `FIELD_ELEMENTS_PER_BLOB` 32-byte chunks, each the little-endian encoding
/// of a canonical BLS12-381 scalar.
///
/// Canonicity is *not* enforced at construction; it is checked when the blob
/// is parsed into a polynomial, so that a malformed blob surfaces as
/// `BadField` at the crypto boundary rather than silently reducing mod q.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
    /// The binary data contained within the blob.
    blob_data: Vec<u8>,
}

impl Blob {
    /// Creates a new `Blob` from the given bytes, which must have the exact
    /// wire length of `FIELD_ELEMENTS_PER_BLOB * 32`.
    pub fn new(blob_data: &[u8]) -> Result<Self, KzgError> {
        if blob_data.len() != BYTES_PER_BLOB {
            return Err(KzgError::BadLength {
                expected: BYTES_PER_BLOB,
                actual: blob_data.len(),
            });
        }
        Ok(Blob {
            blob_data: blob_data.to_vec(),
        })
    }

    /// Serializes an evaluation-form polynomial back into blob bytes
    /// (32-byte little-endian chunks).
    pub fn from_polynomial(polynomial: &PolynomialEvalForm) -> Self {
        let mut blob_data = Vec::with_capacity(BYTES_PER_BLOB);
        for evaluation in polynomial.evaluations() {
            blob_data.extend_from_slice(&helpers::fr_to_bytes_le(evaluation));
        }
        Blob { blob_data }
    }

    /// Returns the blob data.
    pub fn data(&self) -> &[u8] {
        &self.blob_data
    }

    /// Returns the length of the blob data in bytes.
    pub fn len(&self) -> usize {
        self.blob_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blob_data.is_empty()
    }

    /// Parses the blob into an evaluation-form polynomial: chunk `i` becomes
    /// the polynomial's value at the `i`-th root of unity.
    ///
    /// Fails with `BadField` on the first chunk whose integer value is not
    /// below the scalar-field modulus.
    pub fn to_polynomial(&self) -> Result<PolynomialEvalForm, KzgError> {
        let mut evaluations = Vec::with_capacity(self.blob_data.len() / BYTES_PER_FIELD_ELEMENT);
        for (i, chunk) in self.blob_data.chunks(BYTES_PER_FIELD_ELEMENT).enumerate() {
            let evaluation = helpers::set_bytes_canonical_le(chunk).map_err(|_| {
                KzgError::BadField(format!("field element at position {} is not canonical", i))
            })?;
            evaluations.push(evaluation);
        }
        Ok(PolynomialEvalForm::new(evaluations)?)
    }
}

impl TryFrom<Vec<u8>> for Blob {
    type Error = KzgError;

    fn try_from(blob_data: Vec<u8>) -> Result<Self, Self::Error> {
        Blob::new(&blob_data)
    }
}

impl From<Blob> for Vec<u8> {
    fn from(blob: Blob) -> Self {
        blob.blob_data
    }
}
