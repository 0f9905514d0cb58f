//! Two-component code signature scheme
//!
//! The secret is a pair of component generator matrices (G1, G2); the
//! public side is the master parity-check matrix H_A. Each signature
//! carries the check matrix F derived from that signature's random column
//! partition, the salt that produced the accepted hash, and the signature
//! row itself. Verification recomputes the salted hash and checks
//! `F * hash^T == H_A * signature^T`.
//!
//! Submodules:
//! - `keygen.rs`: direct and seed-derived construction of H_A, G1, G2
//! - `store.rs`: the on-disk key store collaborator
//! - `sign.rs`: partition, combine, check-matrix derivation, rejection loop
//! - `verify.rs`: the linear-identity verifier

use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use codesig_algorithms::BitMatrix;
use codesig_api::{Result as ApiResult, SignatureScheme};
use codesig_params::{CodeParams, SchemeConfig, SEED_SIZE};

pub mod keygen;
pub mod sign;
pub mod store;
pub mod verify;

use store::KeyStore;

/// Public key: the master code descriptor and its parity-check matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwoCodePublicKey {
    /// Master code C_A
    pub code_a: CodeParams,
    /// Parity-check matrix H_A, (n_A - k_A) x n_A
    pub h_a: BitMatrix,
}

/// The three seeds of a seed-derived key, 32 bytes each
#[derive(Debug, Clone, PartialEq, Eq, Zeroize)]
pub struct KeySeeds {
    /// Seed for H_A
    pub h_a: [u8; SEED_SIZE],
    /// Seed for G1
    pub g1: [u8; SEED_SIZE],
    /// Seed for G2
    pub g2: [u8; SEED_SIZE],
}

/// Secret key material; zeroized on drop
#[derive(Debug, Clone, Zeroize, ZeroizeOnDrop)]
pub struct TwoCodeSecretKey {
    #[zeroize(skip)]
    pub(crate) code_a: CodeParams,
    #[zeroize(skip)]
    pub(crate) code1: CodeParams,
    #[zeroize(skip)]
    pub(crate) code2: CodeParams,
    pub(crate) h_a: BitMatrix,
    pub(crate) g1: BitMatrix,
    pub(crate) g2: BitMatrix,
    pub(crate) seeds: Option<KeySeeds>,
}

impl TwoCodeSecretKey {
    /// Number of message bytes a signature covers: the configured
    /// dimension of the component codes
    pub fn signer_dimension(&self) -> usize {
        self.code1.k
    }

    /// Seeds the key material can be re-derived from, if it was built in
    /// seed-derived mode
    pub fn seeds(&self) -> Option<&KeySeeds> {
        self.seeds.as_ref()
    }

    /// Component generator matrices (G1, G2)
    pub fn generators(&self) -> (&BitMatrix, &BitMatrix) {
        (&self.g1, &self.g2)
    }
}

/// A signature with everything the verifier needs besides H_A
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwoCodeSignature {
    /// Check matrix F = H_A * G*^T for this signature's partition
    pub check_matrix: BitMatrix,
    /// The signature row, 1 x n_A
    pub row: BitMatrix,
    /// The accepted binarized hash (informational; verification
    /// recomputes it from message and salt)
    pub bin_hash: BitMatrix,
    /// Salt that produced the accepted hash
    pub salt: Vec<u8>,
}

/// The scheme, configured at construction and stateless afterwards
#[derive(Debug, Clone)]
pub struct TwoCodeScheme {
    config: SchemeConfig,
}

impl TwoCodeScheme {
    /// Create a scheme instance for the given configuration
    pub fn new(config: SchemeConfig) -> Self {
        Self { config }
    }

    /// The configuration this instance was built with
    pub fn config(&self) -> &SchemeConfig {
        &self.config
    }

    /// Key generation with an explicit key store.
    ///
    /// With `regenerate` false, previously persisted seeds or matrices are
    /// reused; corrupt cache entries are rebuilt silently.
    pub fn keypair_with_store<R: CryptoRng + RngCore>(
        &self,
        store: Option<&dyn KeyStore>,
        regenerate: bool,
        rng: &mut R,
    ) -> ApiResult<(TwoCodePublicKey, TwoCodeSecretKey)> {
        keygen::generate_keys(&self.config, store, regenerate, rng).map_err(Into::into)
    }
}

impl SignatureScheme for TwoCodeScheme {
    type PublicKey = TwoCodePublicKey;
    type SecretKey = TwoCodeSecretKey;
    type SignatureData = TwoCodeSignature;

    fn name(&self) -> &'static str {
        "TwoCode"
    }

    fn keypair<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
    ) -> ApiResult<(Self::PublicKey, Self::SecretKey)> {
        self.keypair_with_store(None, false, rng)
    }

    fn sign<R: CryptoRng + RngCore>(
        &self,
        message: &[u8],
        secret_key: &Self::SecretKey,
        rng: &mut R,
    ) -> ApiResult<Self::SignatureData> {
        sign::generate_signature(&self.config, secret_key, message, rng).map_err(Into::into)
    }

    fn verify(
        &self,
        message: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> ApiResult<bool> {
        let bin_hash = verify::recompute_bin_hash(message, &signature.salt);
        verify::verify_signature(
            &bin_hash,
            &signature.row,
            &signature.check_matrix,
            &public_key.h_a,
            &public_key.code_a,
        )
        .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests;
