//! Digital signature trait for codesig
//!
//! Schemes in this workspace are configured at runtime (code lengths and
//! weight thresholds are chosen by the caller, not fixed security levels),
//! so the trait methods take `&self` and signing takes an explicit RNG:
//! signature generation is randomized by construction (salt rejection
//! sampling), and threading the RNG keeps it reproducible under test.

use crate::Result;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

/// Core trait for a runtime-configured signature scheme
pub trait SignatureScheme {
    /// Public key type for this scheme
    type PublicKey: Clone;

    /// Secret key type - must be zeroizable
    ///
    /// # Security Note
    ///
    /// This type should not implement `AsMut<[u8]>` to prevent corruption
    /// of key material.
    type SecretKey: Zeroize;

    /// Signature data type
    type SignatureData: Clone;

    /// Returns the name of this signature scheme
    fn name(&self) -> &'static str;

    /// Generate a new key pair using the provided RNG
    ///
    /// # Security Requirements
    ///
    /// Implementations must use the provided cryptographically secure RNG
    /// for all random number generation.
    fn keypair<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
    ) -> Result<(Self::PublicKey, Self::SecretKey)>;

    /// Sign a message with the given secret key
    ///
    /// The RNG drives every random choice made while signing (column
    /// partition, salts); two calls with identical RNG state produce
    /// identical signatures.
    fn sign<R: CryptoRng + RngCore>(
        &self,
        message: &[u8],
        secret_key: &Self::SecretKey,
        rng: &mut R,
    ) -> Result<Self::SignatureData>;

    /// Verify a signature against a message and public key
    ///
    /// Returns `Ok(true)` when the signature is valid, `Ok(false)` when it
    /// is well-formed but does not verify, and `Err` only for malformed
    /// inputs (dimension contract violations).
    fn verify(
        &self,
        message: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> Result<bool>;
}
