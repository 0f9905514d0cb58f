//! Trait definitions for the codesig API

pub mod signature;

pub use signature::SignatureScheme;
