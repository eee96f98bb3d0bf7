//! Verification side of EIP-4844 blob KZG commitments.
//!
//! Every accept/reject decision here is consensus-critical: verifiers across
//! the network must produce bit-identical outcomes on identical inputs. The
//! three surfaces are the single-opening pairing check ([verify]), aggregated
//! batch verification ([aggregate]), and the byte-in/byte-out
//! point-evaluation interface the EVM invokes ([precompile]).

pub mod aggregate;
pub mod precompile;
pub mod verify;
