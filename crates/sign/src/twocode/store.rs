//! On-disk persistence for key material
//!
//! The key builder talks to storage through the [`KeyStore`] trait;
//! [`DirStore`] is the filesystem implementation. File formats:
//!
//! - seed files: a raw 32-byte blob, no header;
//! - matrix cache files: a text header line `"<rows> <cols>"` followed by
//!   one line per row of space-separated 0/1 entries;
//! - the parameter file: line-oriented `key value` pairs for the nine
//!   integers `H_A_n .. G2_d`.
//!
//! Every load method treats a malformed file as a cache miss (`None`),
//! never as a fatal error. Concurrent processes racing on one store
//! directory are a caller responsibility; no locking is attempted here.

use std::fs;
use std::path::{Path, PathBuf};

use codesig_algorithms::BitMatrix;
use codesig_params::{CodeParams, SEED_SIZE};

use crate::error::{Error, Result};

/// Name of the parameter persistence file inside a store directory
pub const PARAMS_FILE: &str = "params.txt";

/// Order of the parameter-file keys: master code, then the two components
const PARAM_KEYS: [[&str; 3]; 3] = [
    ["H_A_n", "H_A_k", "H_A_d"],
    ["G1_n", "G1_k", "G1_d"],
    ["G2_n", "G2_k", "G2_d"],
];

/// Cache file name for a matrix, one per (prefix, n, k, d) combination
pub fn matrix_file_name(prefix: &str, code: &CodeParams) -> String {
    format!("{}_{}_{}_{}.txt", prefix, code.n, code.k, code.d)
}

/// File name for a seed, one per (prefix, n, k, d) combination
pub fn seed_file_name(prefix: &str, code: &CodeParams) -> String {
    format!("{}_{}_{}_{}.seed", prefix, code.n, code.k, code.d)
}

/// Storage collaborator used by the key builder
pub trait KeyStore {
    /// Load a cached matrix; `None` on absence or any parse failure
    fn load_matrix(&self, name: &str) -> Option<BitMatrix>;

    /// Persist a matrix under `name`
    fn store_matrix(&self, name: &str, matrix: &BitMatrix) -> Result<()>;

    /// Load a seed; `None` on absence or wrong length
    fn load_seed(&self, name: &str) -> Option<[u8; SEED_SIZE]>;

    /// Persist a seed under `name`
    fn store_seed(&self, name: &str, seed: &[u8; SEED_SIZE]) -> Result<()>;

    /// Load the persisted code descriptors `[H_A, G1, G2]`
    fn load_params(&self) -> Option<[CodeParams; 3]>;

    /// Persist the code descriptors `[H_A, G1, G2]`
    fn store_params(&self, codes: &[CodeParams; 3]) -> Result<()>;
}

/// Filesystem-backed key store rooted at one directory
#[derive(Debug, Clone)]
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    /// Create a store rooted at `dir`; the directory is created lazily on
    /// the first write
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory of this store
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn ensure_dir(&self, operation: &'static str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| Error::Store {
            operation,
            details: e.to_string(),
        })
    }
}

fn parse_matrix(text: &str) -> Option<BitMatrix> {
    let mut lines = text.lines();
    let mut header = lines.next()?.split_whitespace();
    let rows: usize = header.next()?.parse().ok()?;
    let cols: usize = header.next()?.parse().ok()?;
    if rows == 0 || cols == 0 || header.next().is_some() {
        return None;
    }

    let mut parsed = Vec::with_capacity(rows);
    for _ in 0..rows {
        let line = lines.next()?;
        let row: Vec<u8> = line
            .split_whitespace()
            .map(|tok| tok.parse::<u8>().ok())
            .collect::<Option<Vec<u8>>>()?;
        if row.len() != cols {
            return None;
        }
        parsed.push(row);
    }
    BitMatrix::from_rows(&parsed).ok()
}

impl KeyStore for DirStore {
    fn load_matrix(&self, name: &str) -> Option<BitMatrix> {
        let text = fs::read_to_string(self.path(name)).ok()?;
        parse_matrix(&text)
    }

    fn store_matrix(&self, name: &str, matrix: &BitMatrix) -> Result<()> {
        self.ensure_dir("matrix write")?;
        let mut out = format!("{} {}\n", matrix.rows(), matrix.cols());
        for i in 0..matrix.rows() {
            let line: Vec<String> = matrix.row(i).iter().map(|v| v.to_string()).collect();
            out.push_str(&line.join(" "));
            out.push('\n');
        }
        fs::write(self.path(name), out).map_err(|e| Error::Store {
            operation: "matrix write",
            details: e.to_string(),
        })
    }

    fn load_seed(&self, name: &str) -> Option<[u8; SEED_SIZE]> {
        let bytes = fs::read(self.path(name)).ok()?;
        let arr: [u8; SEED_SIZE] = bytes.try_into().ok()?;
        Some(arr)
    }

    fn store_seed(&self, name: &str, seed: &[u8; SEED_SIZE]) -> Result<()> {
        self.ensure_dir("seed write")?;
        fs::write(self.path(name), seed).map_err(|e| Error::Store {
            operation: "seed write",
            details: e.to_string(),
        })
    }

    fn load_params(&self) -> Option<[CodeParams; 3]> {
        let text = fs::read_to_string(self.path(PARAMS_FILE)).ok()?;
        let mut values = std::collections::HashMap::new();
        for line in text.lines() {
            let mut parts = line.split_whitespace();
            let key = parts.next()?;
            let value: usize = parts.next()?.parse().ok()?;
            if parts.next().is_some() {
                return None;
            }
            values.insert(key.to_string(), value);
        }
        let mut codes = [CodeParams::new(0, 0, 0); 3];
        for (i, keys) in PARAM_KEYS.iter().enumerate() {
            codes[i] = CodeParams::new(
                *values.get(keys[0])?,
                *values.get(keys[1])?,
                *values.get(keys[2])?,
            );
        }
        Some(codes)
    }

    fn store_params(&self, codes: &[CodeParams; 3]) -> Result<()> {
        self.ensure_dir("params write")?;
        let mut out = String::new();
        for (keys, code) in PARAM_KEYS.iter().zip(codes.iter()) {
            out.push_str(&format!("{} {}\n", keys[0], code.n));
            out.push_str(&format!("{} {}\n", keys[1], code.k));
            out.push_str(&format!("{} {}\n", keys[2], code.d));
        }
        fs::write(self.path(PARAMS_FILE), out).map_err(|e| Error::Store {
            operation: "params write",
            details: e.to_string(),
        })
    }
}
