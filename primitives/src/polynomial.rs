use ark_bls12_381::Fr;
use ark_poly::{EvaluationDomain, GeneralEvaluationDomain};
use ark_std::Zero;

use crate::{consts::FIELD_ELEMENTS_PER_BLOB, errors::PolynomialError};

/// A polynomial represented by its values over the roots-of-unity domain, in
/// natural order: `evaluations[i]` is the value at `domain[i]`.
///
/// The width is fixed at `FIELD_ELEMENTS_PER_BLOB`; there is no padding and
/// no variable degree. Polynomials are the objects that get committed, and
/// every commitment, proof, and aggregation path relies on this exact width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolynomialEvalForm {
    evaluations: Vec<Fr>,
}

impl PolynomialEvalForm {
    /// Wraps the given evaluations. Fails unless there are exactly
    /// `FIELD_ELEMENTS_PER_BLOB` of them.
    pub fn new(evaluations: Vec<Fr>) -> Result<Self, PolynomialError> {
        if evaluations.len() != FIELD_ELEMENTS_PER_BLOB {
            return Err(PolynomialError::Length {
                expected: FIELD_ELEMENTS_PER_BLOB,
                actual: evaluations.len(),
            });
        }
        Ok(Self { evaluations })
    }

    /// The zero polynomial.
    pub fn zero() -> Self {
        Self {
            evaluations: vec![Fr::zero(); FIELD_ELEMENTS_PER_BLOB],
        }
    }

    pub fn evaluations(&self) -> &[Fr] {
        &self.evaluations
    }

    /// Always `FIELD_ELEMENTS_PER_BLOB`.
    pub fn len(&self) -> usize {
        self.evaluations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evaluations.is_empty()
    }

    /// Retrieves a reference to the evaluation at the specified index.
    pub fn get_evaluation(&self, i: usize) -> Option<&Fr> {
        self.evaluations.get(i)
    }

    /// Computes `Σ_j scalars[j] · polys[j]` coordinate-wise.
    ///
    /// Exact in evaluation form because all inputs share the same fixed
    /// domain. An empty input yields the zero polynomial.
    pub fn lincomb(
        polys: &[PolynomialEvalForm],
        scalars: &[Fr],
    ) -> Result<PolynomialEvalForm, PolynomialError> {
        if polys.len() != scalars.len() {
            return Err(PolynomialError::Length {
                expected: polys.len(),
                actual: scalars.len(),
            });
        }

        let mut combined = vec![Fr::zero(); FIELD_ELEMENTS_PER_BLOB];
        for (poly, scalar) in polys.iter().zip(scalars) {
            for (acc, evaluation) in combined.iter_mut().zip(poly.evaluations()) {
                *acc += *evaluation * scalar;
            }
        }
        Ok(PolynomialEvalForm {
            evaluations: combined,
        })
    }

    /// Converts the polynomial to coefficient form by an IFFT over the domain.
    pub fn to_coeff_form(&self) -> Result<PolynomialCoeffForm, PolynomialError> {
        let coeffs = GeneralEvaluationDomain::<Fr>::new(self.len())
            .ok_or_else(|| {
                PolynomialError::Fft("failed to construct domain for IFFT".to_string())
            })?
            .ifft(&self.evaluations);
        PolynomialCoeffForm::new(coeffs)
    }
}

/// The same polynomial family in coefficient form. Only the monomial
/// commitment path and test fixtures consume this; all consensus operations
/// work in evaluation form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolynomialCoeffForm {
    coeffs: Vec<Fr>,
}

impl PolynomialCoeffForm {
    pub fn new(coeffs: Vec<Fr>) -> Result<Self, PolynomialError> {
        if coeffs.len() != FIELD_ELEMENTS_PER_BLOB {
            return Err(PolynomialError::Length {
                expected: FIELD_ELEMENTS_PER_BLOB,
                actual: coeffs.len(),
            });
        }
        Ok(Self { coeffs })
    }

    pub fn coeffs(&self) -> &[Fr] {
        &self.coeffs
    }

    /// Converts back to evaluation form by an FFT over the domain.
    pub fn to_eval_form(&self) -> Result<PolynomialEvalForm, PolynomialError> {
        let evals = GeneralEvaluationDomain::<Fr>::new(self.coeffs.len())
            .ok_or_else(|| PolynomialError::Fft("failed to construct domain for FFT".to_string()))?
            .fft(&self.coeffs);
        PolynomialEvalForm::new(evals)
    }
}
