//! BCH generator-polynomial construction
//!
//! A narrow-sense binary BCH code with designed distance 2t + 1 has
//! generator polynomial g(x) = lcm of the minimal polynomials of
//! alpha^1 .. alpha^2t. Conjugate roots share one minimal polynomial, so
//! the exponents are grouped into cyclotomic cosets (orbits under doubling
//! mod n) and each coset contributes its minimal polynomial exactly once.
//!
//! Polynomials over GF(2) are bit vectors with the constant term at
//! index 0; the most-significant term is kept trailing-zero trimmed.

use crate::error::{Error, Result};
use crate::field::GfField;
use crate::matrix::BitMatrix;

/// A generator polynomial over GF(2), LSB = constant term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenPoly {
    coeffs: Vec<u8>,
}

impl GenPoly {
    /// Build from raw coefficients, trimming trailing zero terms
    pub fn from_coeffs(mut coeffs: Vec<u8>) -> Self {
        while coeffs.len() > 1 && coeffs.last() == Some(&0) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    /// Degree of the polynomial
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Coefficients, constant term first
    pub fn coeffs(&self) -> &[u8] {
        &self.coeffs
    }
}

/// Cyclotomic coset of `a` modulo `n`: {a, 2a, 4a, ...} closed under doubling
pub fn cyclotomic_coset(n: u32, a: u32) -> Vec<u32> {
    let start = a % n;
    let mut coset = Vec::new();
    let mut cur = start;
    loop {
        coset.push(cur);
        cur = (cur * 2) % n;
        if cur == start {
            break;
        }
    }
    coset
}

/// Convolution of two polynomials with GF(2^m) coefficients
fn poly_mul_field(gf: &GfField, a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut r = vec![0u32; a.len() + b.len() - 1];
    for (i, &ai) in a.iter().enumerate() {
        if ai == 0 {
            continue;
        }
        for (j, &bj) in b.iter().enumerate() {
            if bj == 0 {
                continue;
            }
            r[i + j] ^= gf.mul(ai, bj);
        }
    }
    r
}

/// Minimal polynomial of the coset's roots: product of (x + alpha^p) over
/// the coset, collapsed to GF(2) coefficients.
///
/// The product is invariant under the Frobenius map, so every coefficient
/// lands in the base field {0, 1}.
fn minimal_polynomial(gf: &GfField, coset: &[u32]) -> Vec<u8> {
    let mut poly: Vec<u32> = vec![1];
    for &p in coset {
        let root = gf.alpha_pow(p);
        poly = poly_mul_field(gf, &poly, &[root, 1]);
    }
    poly.iter().map(|&c| u8::from(c != 0)).collect()
}

/// Convolution of two GF(2) bit polynomials
pub fn poly_mul_gf2(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut r = vec![0u8; a.len() + b.len() - 1];
    for (i, &ai) in a.iter().enumerate() {
        if ai == 0 {
            continue;
        }
        for (j, &bj) in b.iter().enumerate() {
            if bj != 0 {
                r[i + j] ^= 1;
            }
        }
    }
    r
}

/// Remainder of GF(2) polynomial division
pub fn poly_rem_gf2(num: &[u8], den: &[u8]) -> Vec<u8> {
    let den_deg = match den.iter().rposition(|&c| c != 0) {
        Some(d) => d,
        None => return num.to_vec(),
    };
    let mut rem = num.to_vec();
    loop {
        let rem_deg = match rem.iter().rposition(|&c| c != 0) {
            Some(d) => d,
            None => break,
        };
        if rem_deg < den_deg {
            break;
        }
        let shift = rem_deg - den_deg;
        for (j, &dj) in den.iter().enumerate().take(den_deg + 1) {
            if dj != 0 {
                rem[shift + j] ^= 1;
            }
        }
    }
    rem.truncate(den_deg.max(1));
    rem
}

/// Generator polynomial of the narrow-sense BCH code over GF(2^m) with
/// designed distance 2t + 1
pub fn genpoly(m: usize, t: usize) -> Result<GenPoly> {
    if t < 1 {
        return Err(Error::InvalidDistance { t });
    }
    let gf = GfField::new(m)?;
    let n = gf.group_order() as usize;

    let max_req = 2 * t;
    if max_req >= n {
        return Err(Error::DegreeTooLarge { degree: max_req, n });
    }

    let mut covered = vec![false; n];
    let mut g: Vec<u8> = vec![1];
    let mut deg = 0usize;

    for a in 1..=max_req {
        let power = (a % n) as u32;
        if covered[power as usize] {
            continue;
        }
        let coset = cyclotomic_coset(n as u32, power);
        for &p in &coset {
            covered[p as usize] = true;
        }

        let minpoly = minimal_polynomial(&gf, &coset);
        deg += minpoly.len() - 1;
        if deg >= n {
            return Err(Error::DegreeTooLarge { degree: deg, n });
        }
        g = poly_mul_gf2(&g, &minpoly);
    }

    Ok(GenPoly::from_coeffs(g))
}

/// Generator matrix of the cyclic code generated by `gpoly`.
///
/// Row i holds the coefficients of x^i * g(x); column 0 corresponds to the
/// highest-order term (col = n - 1 - power), so an identity-adjacent block
/// appears without a separate reduction pass. Returns the matrix and the
/// code dimension k = n - deg g.
pub fn generator_matrix(gpoly: &GenPoly, n: usize) -> Result<(BitMatrix, usize)> {
    let r = gpoly.degree();
    if r >= n {
        return Err(Error::DegreeTooLarge { degree: r, n });
    }
    let k = n - r;
    let mut m = BitMatrix::zero(k, n);
    for i in 0..k {
        for (j, &c) in gpoly.coeffs().iter().enumerate() {
            if c == 0 {
                continue;
            }
            let power = i + j;
            if power >= n {
                continue;
            }
            m.set(i, n - 1 - power, 1);
        }
    }
    Ok((m, k))
}
