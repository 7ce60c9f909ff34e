//! Sparse Cholesky solver backed by `faer`.
//!
//! Implements the [`SparseSolver`] trait using faer's supernodal LLᵀ
//! factorization. Only usable when the implicit system is positive
//! definite; callers fall back to conjugate gradient when `factorize` fails.

use faer::Side;
use faer::linalg::solvers::Solve;
use faer::sparse::SparseColMat;
use faer::sparse::Triplet;
use faer::sparse::linalg::solvers::{Llt, SymbolicLlt};

use elastica_types::{ElasticaError, ElasticaResult};

use crate::sparse::{CsrMatrix, SolveReport, SparseSolver};

/// Sparse Cholesky (LLᵀ) solver using `faer`.
pub struct FaerSolver {
    /// Cached LLᵀ factorization.
    factorization: Option<Llt<usize, f64>>,
    /// Matrix dimension (N×N).
    dimension: usize,
}

impl FaerSolver {
    /// Creates a new solver (unfactorized).
    pub fn new() -> Self {
        Self {
            factorization: None,
            dimension: 0,
        }
    }

    /// Convert our CSR matrix to faer's CSC matrix.
    fn csr_to_csc(matrix: &CsrMatrix) -> ElasticaResult<SparseColMat<usize, f64>> {
        let mut triplets: Vec<Triplet<usize, usize, f64>> =
            Vec::with_capacity(matrix.values.len());
        for row in 0..matrix.rows {
            for idx in matrix.row_ptr[row]..matrix.row_ptr[row + 1] {
                let col = matrix.col_idx[idx];
                let val = matrix.values[idx];
                triplets.push(Triplet { row, col, val });
            }
        }

        SparseColMat::try_new_from_triplets(matrix.rows, matrix.cols, &triplets).map_err(|e| {
            ElasticaError::LinearSolver(format!("Failed to construct faer CSC matrix: {e:?}"))
        })
    }
}

impl Default for FaerSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SparseSolver for FaerSolver {
    fn factorize(&mut self, matrix: &CsrMatrix) -> ElasticaResult<()> {
        self.factorization = None;
        if matrix.rows != matrix.cols {
            return Err(ElasticaError::LinearSolver(format!(
                "Matrix must be square, got {}×{}",
                matrix.rows, matrix.cols
            )));
        }
        if matrix.rows == 0 {
            return Err(ElasticaError::LinearSolver("Cannot factorize empty matrix".into()));
        }

        self.dimension = matrix.rows;
        let csc = Self::csr_to_csc(matrix)?;

        let symbolic = SymbolicLlt::try_new(csc.symbolic().as_ref(), Side::Upper)
            .map_err(|e| ElasticaError::LinearSolver(format!("Symbolic analysis failed: {e:?}")))?;

        let llt = Llt::try_new_with_symbolic(symbolic, csc.as_ref(), Side::Upper).map_err(|e| {
            ElasticaError::LinearSolver(format!("Cholesky factorization failed: {e:?}"))
        })?;

        self.factorization = Some(llt);
        Ok(())
    }

    fn solve(&self, rhs: &[f64], solution: &mut [f64]) -> ElasticaResult<SolveReport> {
        let llt = self.factorization.as_ref().ok_or_else(|| {
            ElasticaError::LinearSolver("Solver not factorized. Call factorize() first.".into())
        })?;

        if rhs.len() != self.dimension || solution.len() != self.dimension {
            return Err(ElasticaError::LinearSolver(format!(
                "Dimension mismatch: matrix {}, rhs {}, solution {}",
                self.dimension,
                rhs.len(),
                solution.len()
            )));
        }

        let rhs_mat: faer::Mat<f64> = faer::Mat::from_fn(self.dimension, 1, |i, _| rhs[i]);
        let sol = llt.solve(&rhs_mat);

        for (i, x) in solution.iter_mut().enumerate() {
            *x = sol[(i, 0)];
        }

        Ok(SolveReport {
            iterations: 1,
            residual: 0.0,
            converged: true,
        })
    }

    fn is_factorized(&self) -> bool {
        self.factorization.is_some()
    }

    fn name(&self) -> &str {
        "faer_cholesky"
    }
}
