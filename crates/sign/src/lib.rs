//! Two-component code-based digital signatures
//!
//! This crate implements the scheme end to end: key generation (direct or
//! seed-derived), the partition/combine/reject signing pipeline, the
//! linear-identity verifier, and the on-disk key store the key builder
//! persists through.

pub mod error;
pub mod twocode;

pub use error::Error;
pub use twocode::{
    TwoCodePublicKey, TwoCodeScheme, TwoCodeSecretKey, TwoCodeSignature,
};
