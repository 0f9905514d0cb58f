//! Dense GF(2) bit matrices
//!
//! One owned row-major representation with index-checked accessors; every
//! arithmetic operation is modulo 2 (XOR for addition, AND for the product
//! terms). This is the single matrix type the whole workspace converges on.

use core::fmt;

use zeroize::Zeroize;

use crate::error::{Error, Result};

/// Which systematic-form reduction the caller wants.
///
/// Both strategies expose an explicit identity block in the trailing
/// redundancy columns; they differ in how they get there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    /// Column permutation only: unit columns are swapped into place.
    /// Cheap, but requires the matrix to already contain r distinct unit
    /// columns (true for the parity-bit pattern).
    ColumnSwap,
    /// Gauss-Jordan elimination on the trailing columns with row pivot
    /// search. Tolerant of arbitrary column content.
    Elimination,
}

/// A rows x cols matrix over GF(2), one byte per entry
#[derive(Debug, Clone, PartialEq, Eq, Zeroize)]
pub struct BitMatrix {
    rows: usize,
    cols: usize,
    data: Vec<u8>,
}

/// Hamming weight of a bit vector
pub fn hamming_weight(v: &[u8]) -> usize {
    v.iter().filter(|&&b| b == 1).count()
}

/// True iff `v` lies strictly inside the Hamming ball of radius `d` around
/// zero, i.e. weight(v) < d. Used to reject candidate rows too close to
/// the zero word when screening hand-built generator matrices.
pub fn is_within_ball(v: &[u8], d: usize) -> bool {
    hamming_weight(v) < d
}

impl BitMatrix {
    /// All-zero matrix
    pub fn zero(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0u8; rows * cols],
        }
    }

    /// Identity matrix
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zero(n, n);
        for i in 0..n {
            m.set(i, i, 1);
        }
        m
    }

    /// Build from explicit rows; every entry must be 0 or 1
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.len());
        let mut m = Self::zero(nrows, ncols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != ncols {
                return Err(Error::Parameter {
                    name: "rows",
                    reason: "ragged row lengths",
                });
            }
            for (j, &v) in row.iter().enumerate() {
                if v > 1 {
                    return Err(Error::Parameter {
                        name: "rows",
                        reason: "entry outside {0, 1}",
                    });
                }
                m.set(i, j, v);
            }
        }
        Ok(m)
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Entry at (r, c); panics on out-of-range indices
    #[inline]
    pub fn get(&self, r: usize, c: usize) -> u8 {
        assert!(r < self.rows && c < self.cols, "index out of range");
        self.data[r * self.cols + c]
    }

    /// Set entry at (r, c) to `v & 1`; panics on out-of-range indices
    #[inline]
    pub fn set(&mut self, r: usize, c: usize, v: u8) {
        assert!(r < self.rows && c < self.cols, "index out of range");
        self.data[r * self.cols + c] = v & 1;
    }

    /// Row-major view of every entry; one byte per bit
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Borrow row `r` as a slice
    pub fn row(&self, r: usize) -> &[u8] {
        assert!(r < self.rows, "row index out of range");
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// Hamming weight of row `r`
    pub fn row_weight(&self, r: usize) -> usize {
        hamming_weight(self.row(r))
    }

    /// Total number of 1-entries
    pub fn weight(&self) -> usize {
        hamming_weight(&self.data)
    }

    /// Swap two rows in place
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        assert!(a < self.rows && b < self.rows, "row index out of range");
        if a == b {
            return;
        }
        for j in 0..self.cols {
            self.data.swap(a * self.cols + j, b * self.cols + j);
        }
    }

    /// Swap two columns in place
    pub fn swap_columns(&mut self, a: usize, b: usize) {
        assert!(a < self.cols && b < self.cols, "column index out of range");
        if a == b {
            return;
        }
        for i in 0..self.rows {
            self.data.swap(i * self.cols + a, i * self.cols + b);
        }
    }

    /// XOR row `src` into row `dst`
    fn xor_row_into(&mut self, dst: usize, src: usize) {
        debug_assert!(dst != src);
        for j in 0..self.cols {
            let v = self.data[src * self.cols + j];
            self.data[dst * self.cols + j] ^= v;
        }
    }

    /// Matrix product with entries reduced mod 2
    pub fn mul(&self, rhs: &BitMatrix) -> Result<BitMatrix> {
        if self.cols != rhs.rows {
            return Err(Error::DimensionMismatch {
                operation: "matrix multiply",
                left: (self.rows, self.cols),
                right: (rhs.rows, rhs.cols),
            });
        }
        let mut out = BitMatrix::zero(self.rows, rhs.cols);
        for i in 0..self.rows {
            for j in 0..rhs.cols {
                let mut acc = 0u8;
                for l in 0..self.cols {
                    acc ^= self.get(i, l) & rhs.get(l, j);
                }
                out.set(i, j, acc);
            }
        }
        Ok(out)
    }

    /// Transposed copy
    pub fn transpose(&self) -> BitMatrix {
        let mut out = BitMatrix::zero(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.set(j, i, self.get(i, j));
            }
        }
        out
    }

    /// GF(2) rank
    pub fn rank(&self) -> usize {
        let mut work = self.clone();
        let mut pivot_row = 0usize;
        for col in 0..work.cols {
            if pivot_row == work.rows {
                break;
            }
            let found = (pivot_row..work.rows).find(|&r| work.get(r, col) == 1);
            let r = match found {
                Some(r) => r,
                None => continue,
            };
            work.swap_rows(pivot_row, r);
            for other in 0..work.rows {
                if other != pivot_row && work.get(other, col) == 1 {
                    work.xor_row_into(other, pivot_row);
                }
            }
            pivot_row += 1;
        }
        pivot_row
    }

    /// Drive this parity-check matrix toward `[A | I]` form so that the
    /// trailing `rows` columns are an explicit identity block.
    ///
    /// On `SingularPivot` the matrix is left in its partially reduced
    /// state; the caller is expected to rebuild with fresh randomness, not
    /// to keep using it.
    pub fn systematic_form(&mut self, strategy: Reduction) -> Result<()> {
        if self.cols < self.rows {
            return Err(Error::DimensionMismatch {
                operation: "systematic form",
                left: (self.rows, self.cols),
                right: (self.rows, self.rows),
            });
        }
        match strategy {
            Reduction::ColumnSwap => self.systematic_by_column_swap(),
            Reduction::Elimination => self.systematic_by_elimination(),
        }
    }

    /// Scan columns left to right; a unit column on a not-yet-pivoted row
    /// is swapped into its slot in the trailing identity block.
    fn systematic_by_column_swap(&mut self) -> Result<()> {
        let r = self.rows;
        let k = self.cols - r;
        let mut pivoted = vec![false; r];
        let mut count = 0usize;

        for col in 0..self.cols {
            let mut ones = 0usize;
            let mut position = 0usize;
            for row in 0..r {
                if self.get(row, col) == 1 {
                    position = row;
                    ones += 1;
                }
            }
            if ones == 1 && !pivoted[position] {
                self.swap_columns(col, k + position);
                pivoted[position] = true;
                count += 1;
                if count == r {
                    break;
                }
            }
        }

        if count < r {
            let missing = pivoted.iter().position(|&p| !p).unwrap_or(0);
            return Err(Error::SingularPivot { column: k + missing });
        }
        Ok(())
    }

    /// Gauss-Jordan on the trailing `rows` columns: row pivot search plus
    /// forward/back XOR elimination per column.
    fn systematic_by_elimination(&mut self) -> Result<()> {
        let r = self.rows;
        let k = self.cols - r;
        for p in 0..r {
            let col = k + p;
            if self.get(p, col) == 0 {
                if let Some(q) = (p + 1..r).find(|&q| self.get(q, col) == 1) {
                    self.swap_rows(p, q);
                }
            }
            if self.get(p, col) == 0 {
                return Err(Error::SingularPivot { column: col });
            }
            for q in 0..r {
                if q != p && self.get(q, col) == 1 {
                    self.xor_row_into(q, p);
                }
            }
        }
        Ok(())
    }

    /// Generator matrix `G = [I_k | P^T]` read off a parity-check matrix
    /// already in systematic form (identity in the trailing r columns,
    /// parity block P in the leading k columns).
    pub fn generator_from_parity(&self) -> Result<BitMatrix> {
        let r = self.rows;
        let k = self.cols - r;
        for i in 0..r {
            if self.get(i, k + i) != 1 {
                return Err(Error::SingularPivot { column: k + i });
            }
        }
        let mut g = BitMatrix::zero(k, self.cols);
        for j in 0..k {
            g.set(j, j, 1);
            for i in 0..r {
                g.set(j, k + i, self.get(i, j));
            }
        }
        Ok(g)
    }

    /// Does `A x = b` have a solution over GF(2)?
    ///
    /// `b` must have one entry per row of the matrix.
    pub fn in_span(&self, b: &[u8]) -> Result<bool> {
        if b.len() != self.rows {
            return Err(Error::DimensionMismatch {
                operation: "span membership",
                left: (self.rows, self.cols),
                right: (b.len(), 1),
            });
        }
        // Eliminate on the augmented system [A | b]
        let mut aug = BitMatrix::zero(self.rows, self.cols + 1);
        for i in 0..self.rows {
            for j in 0..self.cols {
                aug.set(i, j, self.get(i, j));
            }
            aug.set(i, self.cols, b[i] & 1);
        }
        let mut pivot_row = 0usize;
        for col in 0..self.cols {
            if pivot_row == aug.rows {
                break;
            }
            let found = (pivot_row..aug.rows).find(|&r| aug.get(r, col) == 1);
            let r = match found {
                Some(r) => r,
                None => continue,
            };
            aug.swap_rows(pivot_row, r);
            for other in 0..aug.rows {
                if other != pivot_row && aug.get(other, col) == 1 {
                    aug.xor_row_into(other, pivot_row);
                }
            }
            pivot_row += 1;
        }
        // Inconsistent iff some row reduced to [0 .. 0 | 1]
        for i in 0..aug.rows {
            let coeffs_zero = (0..self.cols).all(|j| aug.get(i, j) == 0);
            if coeffs_zero && aug.get(i, self.cols) == 1 {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl fmt::Display for BitMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            for j in 0..self.cols {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.get(i, j))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
