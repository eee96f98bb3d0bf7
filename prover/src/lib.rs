//! Proof generation for EIP-4844 blob KZG commitments.
//!
//! Commitments are multi-scalar multiplications of evaluation-form
//! polynomials against the (already bit-reversed) Lagrange setup; single
//! openings divide out `(X - z)` point-wise on the domain; aggregated proofs
//! fold a whole batch of blobs into one opening at a Fiat-Shamir-derived
//! challenge.

pub mod kzg;
