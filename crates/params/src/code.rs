//! Code descriptors and scheme configuration

use crate::bch::{binary_entropy, BchCodeSpec};

/// Default bound on the signing rejection loop.
///
/// Each attempt succeeds independently with probability given by the
/// binomial tail above the weight threshold; for sane parameter choices the
/// per-attempt success probability is well above 1/2, so this bound is
/// astronomically unlikely to be hit before a signature is found.
pub const DEFAULT_MAX_SIGN_ATTEMPTS: usize = 4096;

/// Descriptor of a linear code: block length, dimension, minimum distance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeParams {
    /// Block length
    pub n: usize,
    /// Dimension
    pub k: usize,
    /// Designed minimum distance
    pub d: usize,
}

impl CodeParams {
    /// Create a new code descriptor
    pub fn new(n: usize, k: usize, d: usize) -> Self {
        Self { n, k, d }
    }

    /// Number of redundancy rows r = n - k
    pub fn redundancy(&self) -> usize {
        self.n - self.k
    }

    /// A descriptor is feasible when n > k and n > d
    pub fn is_feasible(&self) -> bool {
        self.n > self.k && self.n > self.d
    }
}

/// How key matrices are constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStrategy {
    /// Parity-bit pattern for H_A, BCH generator polynomials for G1/G2
    Direct,
    /// Every matrix expanded from a 32-byte seed via a keyed byte stream
    SeedDerived,
}

/// Which minimum-weight threshold the signing rejection loop enforces.
///
/// Historical variants of the scheme disagree on the canonical value, so it
/// is an explicit configuration choice rather than a hard-coded rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightThreshold {
    /// The master code's designed distance d_A
    CodeDistance,
    /// The BCH designed distance 2t + 1
    Designed {
        /// Error-correction capability of the underlying BCH code
        t: u32,
    },
    /// A caller-supplied weight
    Explicit(usize),
}

impl WeightThreshold {
    /// Resolve the threshold against the master code descriptor
    pub fn required_weight(&self, code_a: &CodeParams) -> usize {
        match self {
            WeightThreshold::CodeDistance => code_a.d,
            WeightThreshold::Designed { t } => 2 * *t as usize + 1,
            WeightThreshold::Explicit(w) => *w,
        }
    }
}

/// Complete configuration for one instance of the scheme.
///
/// Threaded explicitly through key generation, signing, and verification;
/// nothing reads it from ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemeConfig {
    /// Master code C_A (its parity-check matrix H_A is public)
    pub code_a: CodeParams,
    /// First component code C1
    pub code1: CodeParams,
    /// Second component code C2
    pub code2: CodeParams,
    /// Key-construction strategy
    pub strategy: KeyStrategy,
    /// Weight threshold for the signing rejection loop
    pub threshold: WeightThreshold,
    /// Hard bound on rejection-loop iterations
    pub max_sign_attempts: usize,
}

impl SchemeConfig {
    /// Configuration from explicit component and master descriptors
    pub fn new(code_a: CodeParams, code1: CodeParams, code2: CodeParams) -> Self {
        Self {
            code_a,
            code1,
            code2,
            strategy: KeyStrategy::Direct,
            threshold: WeightThreshold::CodeDistance,
            max_sign_attempts: DEFAULT_MAX_SIGN_ATTEMPTS,
        }
    }

    /// Configuration using the same BCH code for both components.
    ///
    /// The master code is derived the way the parameter prompt of the
    /// reference flow does it: n_A = n1 + n2, d_A = d1 + d2 + 1, and
    /// k_A from the entropy estimate n * (1 - H2(d/n)).
    pub fn bch_pair(spec: BchCodeSpec) -> Self {
        let component = spec.component_code();
        Self::new(Self::derive_master(&component, &component), component, component)
    }

    /// Master-code descriptor from two component descriptors
    pub fn derive_master(code1: &CodeParams, code2: &CodeParams) -> CodeParams {
        let n = code1.n + code2.n;
        let d = code1.d + code2.d + 1;
        let k = (n as f64 * (1.0 - binary_entropy(d as f64 / n as f64))) as usize;
        CodeParams { n, k, d }
    }

    /// Override the key-construction strategy
    pub fn with_strategy(mut self, strategy: KeyStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Override the rejection-loop weight threshold
    pub fn with_threshold(mut self, threshold: WeightThreshold) -> Self {
        self.threshold = threshold;
        self
    }

    /// Override the rejection-loop attempt bound
    pub fn with_max_sign_attempts(mut self, attempts: usize) -> Self {
        self.max_sign_attempts = attempts;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feasibility() {
        assert!(CodeParams::new(15, 11, 4).is_feasible());
        assert!(!CodeParams::new(15, 15, 4).is_feasible());
        assert!(!CodeParams::new(15, 11, 15).is_feasible());
    }

    #[test]
    fn threshold_resolution() {
        let code_a = CodeParams::new(30, 10, 7);
        assert_eq!(WeightThreshold::CodeDistance.required_weight(&code_a), 7);
        assert_eq!(
            WeightThreshold::Designed { t: 4 }.required_weight(&code_a),
            9
        );
        assert_eq!(WeightThreshold::Explicit(12).required_weight(&code_a), 12);
    }

    #[test]
    fn bch_pair_master_derivation() {
        let config = SchemeConfig::bch_pair(BchCodeSpec::new(3, 1));
        assert_eq!(config.code1, CodeParams::new(7, 3, 3));
        assert_eq!(config.code2, config.code1);
        assert_eq!(config.code_a.n, 14);
        assert_eq!(config.code_a.d, 7);
        // d/n = 1/2 makes the entropy estimate collapse to zero
        assert_eq!(config.code_a.k, 0);
    }
}
