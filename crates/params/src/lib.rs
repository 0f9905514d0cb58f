//! Parameter definitions for the codesig library
//!
//! Code descriptors, BCH parameter derivation, the primitive-polynomial
//! table, and the scheme configuration struct. Everything a caller chooses
//! lives here explicitly; no module in the workspace reads ambient state.

pub mod bch;
pub mod code;

pub use bch::{binary_entropy, BchCodeSpec, MAX_FIELD_DEGREE, PRIMITIVE_POLY};
pub use code::{
    CodeParams, KeyStrategy, SchemeConfig, WeightThreshold, DEFAULT_MAX_SIGN_ATTEMPTS,
};

/// Size in bytes of the seeds that deterministically re-derive key matrices
pub const SEED_SIZE: usize = 32;
