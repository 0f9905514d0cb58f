//! Mathematical engines for the codesig library
//!
//! Three tightly coupled pieces: finite-field arithmetic over GF(2^m)
//! ([`field`]), BCH generator-polynomial construction on top of it
//! ([`bch`]), and a dense GF(2) bit-matrix engine ([`matrix`]) providing
//! systematic-form reduction, multiplication, transpose, and span queries.
//! [`distance`] adds a bounded minimum-distance search used when screening
//! generator matrices.

pub mod bch;
pub mod distance;
pub mod error;
pub mod field;
pub mod matrix;

pub use bch::GenPoly;
pub use distance::{min_distance_bounded, DistanceBound};
pub use error::{Error, Result};
pub use field::GfField;
pub use matrix::{BitMatrix, Reduction};
