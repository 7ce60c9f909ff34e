//! Sparse matrix representation and solver interface.
//!
//! Provides a CSR (Compressed Sparse Row) matrix, a triplet builder that
//! scatters 3×3 blocks into a `3N × 3N` system, and the trait every linear
//! solver in the engine implements.

use glam::DMat3;
use serde::{Deserialize, Serialize};

use elastica_types::ElasticaResult;

/// Compressed Sparse Row (CSR) matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsrMatrix {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Row pointer array (length = rows + 1).
    /// `row_ptr[i]..row_ptr[i+1]` are the indices into `col_idx` and `values`
    /// for non-zeros in row `i`.
    pub row_ptr: Vec<usize>,
    /// Column indices of non-zero entries.
    pub col_idx: Vec<usize>,
    /// Non-zero values.
    pub values: Vec<f64>,
}

impl CsrMatrix {
    /// Creates an empty CSR matrix with the given dimensions.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            row_ptr: vec![0; rows + 1],
            col_idx: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Returns the number of non-zero entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Creates a CSR matrix from triplets (row, col, value).
    ///
    /// Duplicate entries are summed.
    pub fn from_triplets(rows: usize, cols: usize, triplets: &[(usize, usize, f64)]) -> Self {
        let mut row_counts = vec![0usize; rows];
        for &(r, _, _) in triplets {
            row_counts[r] += 1;
        }

        let mut row_start = vec![0usize; rows + 1];
        for i in 0..rows {
            row_start[i + 1] = row_start[i] + row_counts[i];
        }

        let mut scratch: Vec<(usize, f64)> = vec![(0, 0.0); row_start[rows]];
        let mut cursor = row_start[..rows].to_vec();
        for &(r, c, v) in triplets {
            scratch[cursor[r]] = (c, v);
            cursor[r] += 1;
        }

        // Sort each row by column, then merge duplicates.
        let mut row_ptr = vec![0usize; rows + 1];
        let mut col_idx = Vec::with_capacity(scratch.len());
        let mut values = Vec::with_capacity(scratch.len());
        for i in 0..rows {
            let row = &mut scratch[row_start[i]..row_start[i + 1]];
            row.sort_unstable_by_key(|&(c, _)| c);
            for &(c, v) in row.iter() {
                if col_idx.len() > row_ptr[i] && col_idx.last() == Some(&c) {
                    if let Some(last) = values.last_mut() {
                        *last += v;
                    }
                } else {
                    col_idx.push(c);
                    values.push(v);
                }
            }
            row_ptr[i + 1] = col_idx.len();
        }

        Self {
            rows,
            cols,
            row_ptr,
            col_idx,
            values,
        }
    }

    /// Computes `y = A · x`.
    pub fn mul_vec(&self, x: &[f64], y: &mut [f64]) {
        debug_assert_eq!(x.len(), self.cols);
        debug_assert_eq!(y.len(), self.rows);
        for (row, out) in y.iter_mut().enumerate() {
            let mut acc = 0.0;
            for idx in self.row_ptr[row]..self.row_ptr[row + 1] {
                acc += self.values[idx] * x[self.col_idx[idx]];
            }
            *out = acc;
        }
    }

    /// Returns the diagonal entries (zero where no entry is stored).
    pub fn diagonal(&self) -> Vec<f64> {
        let n = self.rows.min(self.cols);
        let mut diag = vec![0.0; n];
        for (row, d) in diag.iter_mut().enumerate() {
            for idx in self.row_ptr[row]..self.row_ptr[row + 1] {
                if self.col_idx[idx] == row {
                    *d = self.values[idx];
                }
            }
        }
        diag
    }

    /// Returns the stored value at `(row, col)`, or zero.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        let cols = &self.col_idx[self.row_ptr[row]..self.row_ptr[row + 1]];
        match cols.binary_search(&col) {
            Ok(pos) => self.values[self.row_ptr[row] + pos],
            Err(_) => 0.0,
        }
    }
}

/// Triplet accumulator for block-structured `3N × 3N` systems.
///
/// Each unknown block is one particle's 3D velocity. Blocks are scattered
/// as nine scalar triplets; duplicates are summed when converted to CSR.
#[derive(Debug, Clone, Default)]
pub struct BlockTriplets {
    blocks: usize,
    triplets: Vec<(usize, usize, f64)>,
}

impl BlockTriplets {
    /// Creates an accumulator for `blocks` 3×3 block rows/cols.
    pub fn new(blocks: usize) -> Self {
        Self {
            blocks,
            triplets: Vec::new(),
        }
    }

    /// Creates an accumulator with room for `capacity` blocks.
    pub fn with_capacity(blocks: usize, capacity: usize) -> Self {
        Self {
            blocks,
            triplets: Vec::with_capacity(capacity * 9),
        }
    }

    /// Number of block rows.
    pub fn blocks(&self) -> usize {
        self.blocks
    }

    /// Scalar dimension (`3 * blocks`).
    pub fn dim(&self) -> usize {
        self.blocks * 3
    }

    /// Adds `scale · m` to block `(row, col)`.
    pub fn add_block(&mut self, row: usize, col: usize, m: &DMat3, scale: f64) {
        debug_assert!(row < self.blocks && col < self.blocks);
        for c in 0..3 {
            let column = m.col(c);
            for r in 0..3 {
                let v = column[r] * scale;
                if v != 0.0 {
                    self.triplets.push((row * 3 + r, col * 3 + c, v));
                }
            }
        }
    }

    /// Adds `value` to scalar diagonal entry `i`.
    pub fn add_diagonal(&mut self, i: usize, value: f64) {
        self.triplets.push((i, i, value));
    }

    /// Appends every entry of `other` scaled by `scale`.
    pub fn extend_scaled(&mut self, other: &BlockTriplets, scale: f64) {
        debug_assert_eq!(self.blocks, other.blocks);
        self.triplets
            .extend(other.triplets.iter().map(|&(r, c, v)| (r, c, v * scale)));
    }

    /// Raw triplets.
    pub fn triplets(&self) -> &[(usize, usize, f64)] {
        &self.triplets
    }

    /// Converts to a square CSR matrix, summing duplicates.
    pub fn to_csr(&self) -> CsrMatrix {
        let n = self.dim();
        CsrMatrix::from_triplets(n, n, &self.triplets)
    }
}

/// Outcome of a single linear solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveReport {
    /// Iterations performed (1 for direct solvers).
    pub iterations: u32,
    /// Final relative residual `|b - Ax| / |b|`.
    pub residual: f64,
    /// Whether the residual reached tolerance.
    pub converged: bool,
}

/// Trait for sparse symmetric linear solvers.
///
/// Implementations: [`ConjugateGradient`](crate::cg::ConjugateGradient),
/// [`FaerSolver`](crate::faer_solver::FaerSolver).
pub trait SparseSolver {
    /// Prepare for solves against `matrix` (factorize, or cache for iteration).
    fn factorize(&mut self, matrix: &CsrMatrix) -> ElasticaResult<()>;

    /// Solve `A x = b`. `solution` holds the initial guess on entry for
    /// iterative solvers and the result on exit.
    fn solve(&self, rhs: &[f64], solution: &mut [f64]) -> ElasticaResult<SolveReport>;

    /// Returns true if `factorize` has succeeded.
    fn is_factorized(&self) -> bool;

    /// Returns the solver's name.
    fn name(&self) -> &str;
}
