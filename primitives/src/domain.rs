//! The evaluation domain: the `FIELD_ELEMENTS_PER_BLOB`-th roots of unity.
//!
//! Blobs are interpreted as polynomials in evaluation form over this domain,
//! in natural (not bit-reversed) order: `domain[i] = ω^i` where `ω` is the
//! primitive root `7^((q-1)/FIELD_ELEMENTS_PER_BLOB)`. The bit-reversal
//! permutation applied to the Lagrange setup at load time never touches this
//! table; every call site indexes it naturally.

use ark_bls12_381::Fr;
use ark_ff::{FftField, Field};
use ark_std::One;
use std::sync::OnceLock;

use crate::consts::FIELD_ELEMENTS_PER_BLOB;
use crate::errors::KzgError;

static ROOTS_OF_UNITY: OnceLock<Vec<Fr>> = OnceLock::new();
static INVERSE_WIDTH: OnceLock<Fr> = OnceLock::new();

/// Returns the `FIELD_ELEMENTS_PER_BLOB` roots of unity in natural order,
/// computed once per process.
pub fn roots_of_unity() -> &'static [Fr] {
    ROOTS_OF_UNITY.get_or_init(|| {
        // Arkworks derives this from the field generator 7, so the value is
        // exactly 7^((q-1)/FIELD_ELEMENTS_PER_BLOB).
        let root_of_unity = Fr::get_root_of_unity(FIELD_ELEMENTS_PER_BLOB as u64)
            .expect("blob width divides the two-adic subgroup order");
        expand_root_of_unity(&root_of_unity)
    })
}

/// `1 / FIELD_ELEMENTS_PER_BLOB` in the scalar field, used by the barycentric formula.
pub(crate) fn inverse_width() -> &'static Fr {
    INVERSE_WIDTH.get_or_init(|| {
        Fr::from(FIELD_ELEMENTS_PER_BLOB as u64)
            .inverse()
            .expect("blob width is nonzero in the scalar field")
    })
}

/// Expands a primitive root of unity into the full cyclic subgroup
/// `[1, ω, ω², ...]`, stopping when the powers cycle back to one.
fn expand_root_of_unity(root_of_unity: &Fr) -> Vec<Fr> {
    let mut roots = vec![Fr::one()];
    roots.push(*root_of_unity);

    let mut i = 1;
    while !roots[i].is_one() && i < FIELD_ELEMENTS_PER_BLOB {
        let this = &roots[i];
        i += 1;
        roots.push(this * root_of_unity);
    }

    // The root has exact order FIELD_ELEMENTS_PER_BLOB, so the loop closes the
    // cycle by appending a trailing 1 that duplicates roots[0].
    roots.truncate(roots.len() - 1);
    roots
}

/// Reverses the lowest `log2(order)` bits of `n`. `order` must be a power of two.
pub fn reverse_bits(n: usize, order: usize) -> usize {
    debug_assert!(order.is_power_of_two());
    let bits = order.trailing_zeros();
    if bits == 0 {
        n
    } else {
        n.reverse_bits() >> (usize::BITS - bits)
    }
}

/// Returns a copy of the input slice permuted by bit-reversing the indexes.
///
/// The trusted-setup loader applies this exactly once to the Lagrange table;
/// deviating (re-permuting, or skipping it) yields wrong commitments for all
/// inputs.
pub fn bit_reversal_permutation<T: Copy>(l: &[T]) -> Result<Vec<T>, KzgError> {
    if !l.len().is_power_of_two() {
        return Err(KzgError::Setup(format!(
            "bit-reversal permutation needs a power-of-two length, got {}",
            l.len()
        )));
    }

    Ok((0..l.len()).map(|i| l[reverse_bits(i, l.len())]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_std::Zero;

    #[test]
    fn test_roots_of_unity_structure() {
        let roots = roots_of_unity();
        assert_eq!(roots.len(), FIELD_ELEMENTS_PER_BLOB);
        assert!(roots[0].is_one());

        let omega = roots[1];
        // Primitive: ω^(N/2) = -1, ω^N = 1.
        assert_eq!(
            omega.pow([(FIELD_ELEMENTS_PER_BLOB / 2) as u64]),
            -Fr::one()
        );
        assert!(omega.pow([FIELD_ELEMENTS_PER_BLOB as u64]).is_one());

        // Natural ordering: roots[i] = ω^i.
        assert_eq!(roots[5], omega.pow([5u64]));
    }

    #[test]
    fn test_roots_of_unity_no_zero_entries() {
        assert!(!roots_of_unity().iter().any(|root| root.is_zero()));
    }

    #[test]
    fn test_reverse_bits_known_values() {
        assert_eq!(reverse_bits(0, 8), 0);
        assert_eq!(reverse_bits(1, 8), 4);
        assert_eq!(reverse_bits(3, 8), 6);
        assert_eq!(reverse_bits(5, 8), 5);
        assert_eq!(reverse_bits(0, 1), 0);
    }

    #[test]
    fn test_bit_reversal_permutation_small() {
        let input: Vec<usize> = (0..8).collect();
        let permuted = bit_reversal_permutation(&input).unwrap();
        assert_eq!(permuted, vec![0, 4, 2, 6, 1, 5, 3, 7]);
    }

    #[test]
    fn test_bit_reversal_permutation_is_involution() {
        let input: Vec<usize> = (0..64).collect();
        let once = bit_reversal_permutation(&input).unwrap();
        let twice = bit_reversal_permutation(&once).unwrap();
        assert_eq!(twice, input);
    }

    #[test]
    fn test_bit_reversal_permutation_rejects_non_power_of_two() {
        let input: Vec<usize> = (0..6).collect();
        assert!(bit_reversal_permutation(&input).is_err());
    }
}
