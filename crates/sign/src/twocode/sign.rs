//! Signature generation
//!
//! The signer runs a fixed pipeline: draw a random column partition,
//! interleave the component generators into the combined matrix G*,
//! derive the public check matrix F = H_A * G*^T, then rejection-sample
//! salted hashes of the message until the signature row clears the weight
//! threshold. The loop is bounded by the configured attempt budget; the
//! infeasible case (threshold beyond the block length) is rejected before
//! the loop is entered.

use rand::seq::SliceRandom;
use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};

use codesig_algorithms::BitMatrix;
use codesig_params::SchemeConfig;

use crate::error::{Error, Result};

use super::{TwoCodeSecretKey, TwoCodeSignature};

/// Draw the column partition J: a strictly increasing sequence of `size`
/// distinct indices from [0, n_a).
///
/// Fisher-Yates shuffle of the full index range, truncate, sort. Distinct
/// and increasing by construction; no resampling needed.
pub fn build_partition<R: RngCore>(n_a: usize, size: usize, rng: &mut R) -> Vec<usize> {
    debug_assert!(size <= n_a);
    let mut indices: Vec<usize> = (0..n_a).collect();
    indices.shuffle(rng);
    indices.truncate(size);
    indices.sort_unstable();
    indices
}

/// Interleave columns of G1 and G2 into the combined generator G*.
///
/// Column i of the result is the next unused column of G1 when i is in the
/// partition, otherwise the next unused column of G2. Only the first
/// `rows` rows of each generator participate.
pub fn combine_generators(
    g1: &BitMatrix,
    g2: &BitMatrix,
    rows: usize,
    partition: &[usize],
) -> Result<BitMatrix> {
    if g1.rows() < rows {
        return Err(Error::DimensionMismatch {
            context: "G1 row count",
            expected: rows,
            actual: g1.rows(),
        });
    }
    if g2.rows() < rows {
        return Err(Error::DimensionMismatch {
            context: "G2 row count",
            expected: rows,
            actual: g2.rows(),
        });
    }
    if partition.len() != g1.cols() {
        return Err(Error::DimensionMismatch {
            context: "partition size",
            expected: g1.cols(),
            actual: partition.len(),
        });
    }

    let n_a = g1.cols() + g2.cols();
    let mut g_star = BitMatrix::zero(rows, n_a);
    let mut g1_index = 0usize;
    let mut g2_index = 0usize;
    for i in 0..n_a {
        if g1_index < partition.len() && partition[g1_index] == i {
            for row in 0..rows {
                g_star.set(row, i, g1.get(row, g1_index));
            }
            g1_index += 1;
        } else {
            if g2_index >= g2.cols() {
                return Err(Error::DimensionMismatch {
                    context: "G2 column count",
                    expected: n_a - g1.cols(),
                    actual: g2.cols(),
                });
            }
            for row in 0..rows {
                g_star.set(row, i, g2.get(row, g2_index));
            }
            g2_index += 1;
        }
    }
    Ok(g_star)
}

/// Public check matrix F = H_A * G*^T
pub fn derive_check_matrix(h_a: &BitMatrix, g_star: &BitMatrix) -> Result<BitMatrix> {
    Ok(h_a.mul(&g_star.transpose())?)
}

/// Salted message digest reduced to a 1 x message-length bit row: SHA-256
/// over message || salt, each digest byte taken mod 2, cycling the digest
/// when the message is longer than it.
pub fn binarize_digest(message: &[u8], salt: &[u8]) -> BitMatrix {
    let mut hasher = Sha256::new();
    hasher.update(message);
    hasher.update(salt);
    let digest = hasher.finalize();

    let mut bin_hash = BitMatrix::zero(1, message.len());
    for i in 0..message.len() {
        bin_hash.set(0, i, digest[i % digest.len()] % 2);
    }
    bin_hash
}

/// Sign `message` with the given secret key material.
///
/// The message length must equal the signer dimension (the configured k of
/// the component codes): the binarized hash is multiplied against G*
/// directly, so its length is pinned by the combined generator's row
/// count.
pub fn generate_signature<R: CryptoRng + RngCore>(
    config: &SchemeConfig,
    secret: &TwoCodeSecretKey,
    message: &[u8],
    rng: &mut R,
) -> Result<TwoCodeSignature> {
    let k1 = config.code1.k;
    let n_a = config.code_a.n;

    if message.len() != k1 {
        return Err(Error::DimensionMismatch {
            context: "message length",
            expected: k1,
            actual: message.len(),
        });
    }
    if secret.h_a.cols() != n_a {
        return Err(Error::DimensionMismatch {
            context: "H_A column count",
            expected: n_a,
            actual: secret.h_a.cols(),
        });
    }
    if secret.g1.cols() + secret.g2.cols() != n_a {
        return Err(Error::DimensionMismatch {
            context: "combined generator width",
            expected: n_a,
            actual: secret.g1.cols() + secret.g2.cols(),
        });
    }

    let required = config.threshold.required_weight(&config.code_a);
    if required > n_a {
        return Err(Error::InfeasibleDistance { required, n: n_a });
    }

    let partition = build_partition(n_a, secret.g1.cols(), rng);
    let g_star = combine_generators(&secret.g1, &secret.g2, k1, &partition)?;
    let check_matrix = derive_check_matrix(&secret.h_a, &g_star)?;

    for _attempt in 0..config.max_sign_attempts {
        let mut salt = vec![0u8; message.len()];
        rng.fill_bytes(&mut salt);
        let bin_hash = binarize_digest(message, &salt);
        let signature = bin_hash.mul(&g_star)?;
        if signature.row_weight(0) >= required {
            return Ok(TwoCodeSignature {
                check_matrix,
                row: signature,
                bin_hash,
                salt,
            });
        }
    }

    Err(Error::ExceededAttempts {
        attempts: config.max_sign_attempts,
    })
}
