//! Core types and helpers for EIP-4844 blob KZG commitments on BLS12-381.
//!
//! The main data pipeline goes:
//! > blob bytes -> [blob::Blob] -> [polynomial::PolynomialEvalForm] ->
//! > KZG commitment / proof (in the prover and verifier crates)
//!
//! - Blob: `FIELD_ELEMENTS_PER_BLOB` 32-byte little-endian field elements,
//!   exactly as they appear in a blob transaction.
//! - Polynomial: the same data interpreted as values over the roots-of-unity
//!   domain ([domain]), which is the form every consensus operation works in.
//! - [setup::TrustedSetup]: the ceremony output, loaded once at startup with
//!   the Lagrange table bit-reversed exactly once.
//! - [points]: the compressed wire encodings for commitments and proofs,
//!   subgroup-checked on decode.
//!
//! Everything here is synchronous and CPU-bound; the setup tables are the
//! only shared state and they are immutable after load, so all operations are
//! safe to call concurrently.

pub mod blob;
pub mod consts;
pub mod domain;
pub mod errors;
pub mod helpers;
pub mod points;
pub mod polynomial;
pub mod setup;
