//! # codesig
//!
//! A code-based digital signature scheme over GF(2).
//!
//! A secret linear error-correcting code is split into two public component
//! codes. Signing draws a random column partition, interleaves the component
//! generator matrices into a combined generator, derives a public check
//! matrix from it, and rejection-samples a salted message hash until the
//! resulting signature vector clears a minimum-weight threshold.
//! Verification recomputes the salted hash and checks the linear identity
//! `F * hash^T == H_A * signature^T`.
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several
//! sub-crates:
//!
//! - [`codesig_api`]: Error types and the `SignatureScheme` trait
//! - [`codesig_params`]: Code descriptors and scheme configuration
//! - [`codesig_algorithms`]: GF(2^m) fields, BCH generator polynomials,
//!   and the dense GF(2) matrix engine
//! - [`codesig_sign`]: Key generation, signing, verification, key storage

pub use codesig_api as api;
pub use codesig_params as params;
pub use codesig_algorithms as algorithms;
pub use codesig_sign as sign;

/// Common imports for codesig users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, Result};

    // Re-export core traits
    pub use crate::api::SignatureScheme;

    // Re-export configuration types
    pub use crate::params::{
        BchCodeSpec, CodeParams, KeyStrategy, SchemeConfig, WeightThreshold,
    };

    // Re-export the concrete scheme
    pub use crate::sign::twocode::{
        TwoCodePublicKey, TwoCodeScheme, TwoCodeSecretKey, TwoCodeSignature,
    };
}
