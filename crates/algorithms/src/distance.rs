//! Bounded minimum-distance search
//!
//! Self-contained replacement for the external distance helper some
//! historical builds shelled out to. For small dimensions the codeword
//! space is enumerated exactly; above [`EXHAUSTIVE_LIMIT`] the search
//! samples random messages for a caller-supplied budget and reports the
//! best upper bound it saw. No optimality is claimed for the sampled path.

use rand::RngCore;

use crate::error::{Error, Result};
use crate::matrix::{hamming_weight, BitMatrix};

/// Largest dimension k for which all 2^k - 1 nonzero messages are tried
pub const EXHAUSTIVE_LIMIT: usize = 16;

/// Outcome of a minimum-distance search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceBound {
    /// Smallest nonzero codeword weight found
    pub weight: usize,
    /// True when every nonzero message was enumerated (the bound is exact)
    pub exhaustive: bool,
}

fn encode_message(gen: &BitMatrix, msg: u64) -> Vec<u8> {
    let mut cw = vec![0u8; gen.cols()];
    for i in 0..gen.rows() {
        if (msg >> i) & 1 == 1 {
            for (j, c) in cw.iter_mut().enumerate() {
                *c ^= gen.row(i)[j];
            }
        }
    }
    cw
}

/// Search for the minimum distance of the code spanned by `gen`.
///
/// `budget` bounds the number of random messages tried on the sampled
/// path; it is ignored when the dimension admits exhaustive enumeration.
/// Zero codewords produced by linearly dependent rows are skipped.
pub fn min_distance_bounded<R: RngCore>(
    gen: &BitMatrix,
    budget: usize,
    rng: &mut R,
) -> Result<DistanceBound> {
    let k = gen.rows();
    if k == 0 {
        return Err(Error::Parameter {
            name: "generator",
            reason: "matrix has no rows",
        });
    }
    if k > 64 {
        return Err(Error::Parameter {
            name: "generator",
            reason: "dimension above the 64-row sampling limit",
        });
    }

    if k <= EXHAUSTIVE_LIMIT {
        let mut best = usize::MAX;
        for msg in 1u64..(1u64 << k) {
            let w = hamming_weight(&encode_message(gen, msg));
            if w > 0 && w < best {
                best = w;
            }
        }
        // All-zero span only happens for an all-zero generator
        let weight = if best == usize::MAX { 0 } else { best };
        return Ok(DistanceBound {
            weight,
            exhaustive: true,
        });
    }

    let mut best = usize::MAX;
    let mask = if k == 64 { u64::MAX } else { (1u64 << k) - 1 };
    let mut tried = 0usize;
    while tried < budget {
        let msg = rng.next_u64() & mask;
        if msg == 0 {
            continue;
        }
        tried += 1;
        let w = hamming_weight(&encode_message(gen, msg));
        if w > 0 && w < best {
            best = w;
        }
    }
    let weight = if best == usize::MAX { 0 } else { best };
    Ok(DistanceBound {
        weight,
        exhaustive: false,
    })
}
