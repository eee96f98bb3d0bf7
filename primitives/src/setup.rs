//! Trusted-setup loading and validation.
//!
//! The setup is consumed once at process start and is immutable afterwards;
//! every prover and verifier operation borrows it read-only, so concurrent
//! use needs no locking. Three tables are carried: the G1 monomial powers
//! (`s^i · G1`, used by the coefficient-form commitment path), the G1
//! Lagrange basis over the evaluation domain (used by every consensus
//! operation), and the G2 powers of which only indices 0 and 1 participate in
//! verification.
//!
//! Setup files store the Lagrange table in the bit-reversed order an FFT
//! emits. The loader applies the bit-reversal permutation exactly once, here,
//! so that downstream code indexes the table naturally.

use ark_bls12_381::{Fr, G1Affine, G1Projective, G2Affine, G2Projective};
use ark_ec::{AffineRepr, CurveGroup};
use ark_poly::{EvaluationDomain, GeneralEvaluationDomain};
use crossbeam_channel::{bounded, Receiver, Sender};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::consts::{
    FIELD_ELEMENTS_PER_BLOB, SIZE_OF_G1_AFFINE_COMPRESSED, SIZE_OF_G2_AFFINE_COMPRESSED,
};
use crate::domain::bit_reversal_permutation;
use crate::errors::KzgError;
use crate::helpers::compute_powers;
use crate::points::{read_g1_point_compressed, read_g2_point_compressed};

/// The immutable trusted-setup tables.
#[derive(Debug, Clone, PartialEq)]
pub struct TrustedSetup {
    /// `s^i · G1` in monomial order.
    g1_monomial: Vec<G1Affine>,
    /// The Lagrange basis over the evaluation domain, already bit-reversed.
    g1_lagrange: Vec<G1Affine>,
    /// `s^i · G2`; only indices 0 and 1 are read.
    g2: Vec<G2Affine>,
}

impl TrustedSetup {
    /// Builds a setup from point tables as they appear in a setup document:
    /// the Lagrange table in FFT (bit-reversed) order. Cardinalities are
    /// validated and the Lagrange permutation is applied here, once.
    pub fn from_points(
        g1_monomial: Vec<G1Affine>,
        g1_lagrange: Vec<G1Affine>,
        g2: Vec<G2Affine>,
    ) -> Result<Self, KzgError> {
        if !g1_lagrange.len().is_power_of_two() {
            return Err(KzgError::Setup(format!(
                "Lagrange table length {} is not a power of two",
                g1_lagrange.len()
            )));
        }
        if g1_lagrange.len() != FIELD_ELEMENTS_PER_BLOB {
            return Err(KzgError::Setup(format!(
                "expected {} Lagrange points, got {}",
                FIELD_ELEMENTS_PER_BLOB,
                g1_lagrange.len()
            )));
        }
        if g1_monomial.len() != FIELD_ELEMENTS_PER_BLOB {
            return Err(KzgError::Setup(format!(
                "expected {} monomial G1 points, got {}",
                FIELD_ELEMENTS_PER_BLOB,
                g1_monomial.len()
            )));
        }
        if g2.len() < 2 {
            return Err(KzgError::Setup(format!(
                "expected at least 2 G2 points, got {}",
                g2.len()
            )));
        }

        let g1_lagrange = bit_reversal_permutation(&g1_lagrange)?;

        Ok(Self {
            g1_monomial,
            g1_lagrange,
            g2,
        })
    }

    /// Initializes the setup by loading compressed points from three binary
    /// files: the G1 monomial table, the G1 Lagrange table (bit-reversed
    /// order, as ceremony tooling emits it), and the G2 table.
    ///
    /// Any malformed point or wrong cardinality is fatal.
    pub fn load<P: AsRef<Path>>(
        g1_monomial_path: P,
        g1_lagrange_path: P,
        g2_path: P,
    ) -> Result<Self, KzgError> {
        let g1_monomial = parallel_read_points(
            g1_monomial_path.as_ref(),
            SIZE_OF_G1_AFFINE_COMPRESSED,
            read_g1_point_compressed,
        )?;
        let g1_lagrange = parallel_read_points(
            g1_lagrange_path.as_ref(),
            SIZE_OF_G1_AFFINE_COMPRESSED,
            read_g1_point_compressed,
        )?;
        let g2 = parallel_read_points(
            g2_path.as_ref(),
            SIZE_OF_G2_AFFINE_COMPRESSED,
            read_g2_point_compressed,
        )?;

        Self::from_points(g1_monomial, g1_lagrange, g2)
    }

    /// Generates a deterministic setup from a known secret, for tests and
    /// benchmarks only. A public `tau` breaks every security property of the
    /// commitment scheme.
    ///
    /// The Lagrange table is derived from the monomial powers by an IFFT over
    /// G1 and emitted in bit-reversed order, exactly like a real setup
    /// document, so this exercises the same load path.
    pub fn insecure_dev(tau: Fr) -> Result<Self, KzgError> {
        let powers = compute_powers(&tau, FIELD_ELEMENTS_PER_BLOB);

        let g1_generator = G1Projective::from(G1Affine::generator());
        let monomial_projective: Vec<G1Projective> =
            powers.par_iter().map(|power| g1_generator * power).collect();
        let g1_monomial = G1Projective::normalize_batch(&monomial_projective);

        let domain = GeneralEvaluationDomain::<Fr>::new(FIELD_ELEMENTS_PER_BLOB).ok_or_else(
            || KzgError::Setup("failed to construct domain for the G1 IFFT".to_string()),
        )?;
        let lagrange_projective = domain.ifft(&monomial_projective);
        let g1_lagrange = G1Projective::normalize_batch(&lagrange_projective);
        let g1_lagrange_file_order = bit_reversal_permutation(&g1_lagrange)?;

        let g2_generator = G2Projective::from(G2Affine::generator());
        let g2 = vec![
            G2Affine::generator(),
            (g2_generator * tau).into_affine(),
        ];

        Self::from_points(g1_monomial, g1_lagrange_file_order, g2)
    }

    /// The G1 monomial table, in monomial order.
    pub fn g1_monomial(&self) -> &[G1Affine] {
        &self.g1_monomial
    }

    /// The G1 Lagrange table, bit-reversed once at load; index `i` pairs with
    /// the polynomial value at the `i`-th root of unity.
    pub fn g1_lagrange(&self) -> &[G1Affine] {
        &self.g1_lagrange
    }

    /// The G2 table.
    pub fn g2(&self) -> &[G2Affine] {
        &self.g2
    }

    /// `s · G2`, the only secret-dependent point verification needs.
    pub fn g2_tau(&self) -> &G2Affine {
        &self.g2[1]
    }
}

/// Reads fixed-size compressed points from a file: one reader thread streams
/// chunks into a bounded channel, one worker per CPU parses them, and the
/// results are stitched back together in file order.
fn parallel_read_points<T: Send + 'static>(
    file_path: &Path,
    point_size: usize,
    read_fn: fn(&[u8]) -> Result<T, KzgError>,
) -> Result<Vec<T>, KzgError> {
    let (sender, receiver) = bounded::<(Vec<u8>, usize)>(1000);

    let path_buf = file_path.to_path_buf();
    let reader_thread = std::thread::spawn(move || -> io::Result<()> {
        read_file_chunks(&path_buf, sender, point_size)
    });

    let num_workers = num_cpus::get();
    let workers: Vec<_> = (0..num_workers)
        .map(|_| {
            let receiver = receiver.clone();
            std::thread::spawn(move || process_chunks(receiver, read_fn))
        })
        .collect();

    match reader_thread.join() {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            return Err(KzgError::Setup(format!(
                "failed to read setup file {}: {}",
                file_path.display(),
                e
            )))
        }
        Err(_) => return Err(KzgError::Setup("setup reader thread panicked".to_string())),
    }

    let mut all_points = Vec::new();
    for worker in workers {
        let points = worker
            .join()
            .map_err(|_| KzgError::Setup("setup worker thread panicked".to_string()))??;
        all_points.extend(points);
    }

    // Sort by original position to restore file order.
    all_points.sort_by_key(|&(_, position)| position);
    Ok(all_points.into_iter().map(|(point, _)| point).collect())
}

fn process_chunks<T>(
    receiver: Receiver<(Vec<u8>, usize)>,
    read_fn: fn(&[u8]) -> Result<T, KzgError>,
) -> Result<Vec<(T, usize)>, KzgError> {
    receiver
        .iter()
        .map(|(chunk, position)| read_fn(&chunk).map(|point| (point, position)))
        .collect()
}

fn read_file_chunks(
    file_path: &Path,
    sender: Sender<(Vec<u8>, usize)>,
    point_size: usize,
) -> io::Result<()> {
    let file = File::open(file_path)?;
    let mut reader = BufReader::new(file);
    let mut position = 0;
    let mut buffer = vec![0u8; point_size];

    loop {
        let mut filled = 0;
        while filled < point_size {
            let bytes_read = reader.read(&mut buffer[filled..])?;
            if bytes_read == 0 {
                break;
            }
            filled += bytes_read;
        }
        if filled == 0 {
            break;
        }
        if filled != point_size {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "setup file is truncated mid-point",
            ));
        }
        sender
            .send((buffer.clone(), position))
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "setup workers hung up"))?;
        position += 1;
    }

    Ok(())
}
