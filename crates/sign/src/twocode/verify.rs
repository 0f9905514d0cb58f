//! Signature verification
//!
//! Pure and deterministic: rebuild the binarized hash exactly as the
//! signer does, then check the linear identity
//! `F * bin_hash^T == H_A * signature^T`. The two sides are compared in
//! constant time.

use subtle::ConstantTimeEq;

use codesig_algorithms::BitMatrix;
use codesig_params::CodeParams;

use crate::error::{Error, Result};

use super::sign::binarize_digest;

/// Recompute the binarized salted hash for `message` and `salt`
pub fn recompute_bin_hash(message: &[u8], salt: &[u8]) -> BitMatrix {
    binarize_digest(message, salt)
}

/// Check the verification identity against the given hash bit row.
///
/// Dimension contracts are enforced up front: `bin_hash` is 1 x L with
/// L = F's column count, `signature` is 1 x n_A, `F` and `H_A` share their
/// row count, and `H_A` is (n_A - k_A) x n_A per the code descriptor.
pub fn verify_signature(
    bin_hash: &BitMatrix,
    signature: &BitMatrix,
    f: &BitMatrix,
    h_a: &BitMatrix,
    code_a: &CodeParams,
) -> Result<bool> {
    if bin_hash.rows() != 1 {
        return Err(Error::DimensionMismatch {
            context: "hash row count",
            expected: 1,
            actual: bin_hash.rows(),
        });
    }
    if signature.rows() != 1 {
        return Err(Error::DimensionMismatch {
            context: "signature row count",
            expected: 1,
            actual: signature.rows(),
        });
    }
    if signature.cols() != code_a.n {
        return Err(Error::DimensionMismatch {
            context: "signature length",
            expected: code_a.n,
            actual: signature.cols(),
        });
    }
    if h_a.rows() != code_a.redundancy() || h_a.cols() != code_a.n {
        return Err(Error::DimensionMismatch {
            context: "H_A shape",
            expected: code_a.redundancy(),
            actual: h_a.rows(),
        });
    }
    if f.rows() != h_a.rows() {
        return Err(Error::DimensionMismatch {
            context: "check matrix row count",
            expected: h_a.rows(),
            actual: f.rows(),
        });
    }
    if f.cols() != bin_hash.cols() {
        return Err(Error::DimensionMismatch {
            context: "hash length",
            expected: f.cols(),
            actual: bin_hash.cols(),
        });
    }

    let left = f.mul(&bin_hash.transpose())?;
    let right = h_a.mul(&signature.transpose())?;
    Ok(left.as_bytes().ct_eq(right.as_bytes()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hand-built instance where the identity holds by construction:
    /// signature = bin_hash * G, F = H * G^T
    fn fixture() -> (BitMatrix, BitMatrix, BitMatrix, BitMatrix, CodeParams) {
        let code_a = CodeParams::new(4, 2, 1);
        let h_a = BitMatrix::from_rows(&[vec![1, 0, 1, 1], vec![0, 1, 1, 0]]).unwrap();
        let g_star = BitMatrix::from_rows(&[vec![1, 1, 0, 0], vec![0, 1, 1, 1]]).unwrap();
        let bin_hash = BitMatrix::from_rows(&[vec![1, 1]]).unwrap();
        let signature = bin_hash.mul(&g_star).unwrap();
        let f = h_a.mul(&g_star.transpose()).unwrap();
        (bin_hash, signature, f, h_a, code_a)
    }

    #[test]
    fn identity_holds_for_honest_signature() {
        let (bin_hash, signature, f, h_a, code_a) = fixture();
        assert!(verify_signature(&bin_hash, &signature, &f, &h_a, &code_a).unwrap());
    }

    #[test]
    fn flipped_signature_bit_breaks_identity() {
        let (bin_hash, mut signature, f, h_a, code_a) = fixture();
        signature.set(0, 2, signature.get(0, 2) ^ 1);
        assert!(!verify_signature(&bin_hash, &signature, &f, &h_a, &code_a).unwrap());
    }

    #[test]
    fn rejects_wrong_signature_length() {
        let (bin_hash, _, f, h_a, code_a) = fixture();
        let short = BitMatrix::zero(1, 3);
        assert!(matches!(
            verify_signature(&bin_hash, &short, &f, &h_a, &code_a).unwrap_err(),
            Error::DimensionMismatch { context: "signature length", .. }
        ));
    }

    #[test]
    fn rejects_wrong_hash_length() {
        let (_, signature, f, h_a, code_a) = fixture();
        let wide = BitMatrix::zero(1, 5);
        assert!(matches!(
            verify_signature(&wide, &signature, &f, &h_a, &code_a).unwrap_err(),
            Error::DimensionMismatch { context: "hash length", .. }
        ));
    }
}
