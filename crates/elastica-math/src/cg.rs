//! Jacobi-preconditioned conjugate gradient.
//!
//! The implicit step's system matrix is symmetric but not guaranteed to be
//! positive definite (springs under compression contribute indefinite
//! blocks). The solver therefore never fails on non-convergence: it stops
//! at the iteration cap, or as soon as a search direction loses positive
//! curvature, and hands back the best iterate it has.

use tracing::debug;

use elastica_types::{ElasticaError, ElasticaResult};

use crate::sparse::{CsrMatrix, SolveReport, SparseSolver};

/// Conjugate gradient solver with a diagonal (Jacobi) preconditioner.
pub struct ConjugateGradient {
    /// Cached system matrix.
    matrix: Option<CsrMatrix>,
    /// Inverse diagonal used as preconditioner.
    inv_diag: Vec<f64>,
    /// Iteration cap.
    pub max_iterations: u32,
    /// Relative residual tolerance.
    pub tolerance: f64,
}

impl ConjugateGradient {
    /// Creates a solver with the given iteration cap and tolerance.
    pub fn new(max_iterations: u32, tolerance: f64) -> Self {
        Self {
            matrix: None,
            inv_diag: Vec::new(),
            max_iterations,
            tolerance,
        }
    }
}

impl Default for ConjugateGradient {
    fn default() -> Self {
        Self::new(
            elastica_types::constants::DEFAULT_CG_ITERATIONS,
            elastica_types::constants::DEFAULT_CG_TOLERANCE,
        )
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

impl SparseSolver for ConjugateGradient {
    fn factorize(&mut self, matrix: &CsrMatrix) -> ElasticaResult<()> {
        if matrix.rows != matrix.cols {
            return Err(ElasticaError::LinearSolver(format!(
                "Matrix must be square, got {}×{}",
                matrix.rows, matrix.cols
            )));
        }
        self.inv_diag = matrix
            .diagonal()
            .into_iter()
            .map(|d| if d.abs() > f64::MIN_POSITIVE { 1.0 / d } else { 1.0 })
            .collect();
        self.matrix = Some(matrix.clone());
        Ok(())
    }

    fn solve(&self, rhs: &[f64], solution: &mut [f64]) -> ElasticaResult<SolveReport> {
        let a = self.matrix.as_ref().ok_or_else(|| {
            ElasticaError::LinearSolver("Solver not factorized. Call factorize() first.".into())
        })?;
        let n = a.rows;
        if rhs.len() != n || solution.len() != n {
            return Err(ElasticaError::LinearSolver(format!(
                "Dimension mismatch: matrix {n}, rhs {}, solution {}",
                rhs.len(),
                solution.len()
            )));
        }

        let rhs_norm = dot(rhs, rhs).sqrt();
        if rhs_norm == 0.0 {
            solution.iter_mut().for_each(|x| *x = 0.0);
            return Ok(SolveReport {
                iterations: 0,
                residual: 0.0,
                converged: true,
            });
        }

        // r = b - A x0
        let mut r = vec![0.0; n];
        a.mul_vec(solution, &mut r);
        for (ri, bi) in r.iter_mut().zip(rhs) {
            *ri = bi - *ri;
        }

        let mut z: Vec<f64> = r.iter().zip(&self.inv_diag).map(|(ri, di)| ri * di).collect();
        let mut p = z.clone();
        let mut ap = vec![0.0; n];
        let mut rz = dot(&r, &z);
        let mut residual = dot(&r, &r).sqrt() / rhs_norm;
        let mut iterations = 0;

        while iterations < self.max_iterations && residual > self.tolerance {
            // An indefinite preconditioner can cancel r·z exactly.
            if rz.abs() < f64::MIN_POSITIVE || !rz.is_finite() {
                debug!(iterations, rz, "cg: preconditioned residual vanished, keeping current iterate");
                break;
            }
            a.mul_vec(&p, &mut ap);
            let curvature = dot(&p, &ap);
            if curvature <= 0.0 || !curvature.is_finite() {
                debug!(iterations, curvature, "cg: lost positive curvature, keeping current iterate");
                break;
            }
            let alpha = rz / curvature;
            for i in 0..n {
                solution[i] += alpha * p[i];
                r[i] -= alpha * ap[i];
            }
            iterations += 1;

            residual = dot(&r, &r).sqrt() / rhs_norm;
            if residual <= self.tolerance {
                break;
            }

            for i in 0..n {
                z[i] = r[i] * self.inv_diag[i];
            }
            let rz_next = dot(&r, &z);
            let beta = rz_next / rz;
            rz = rz_next;
            for i in 0..n {
                p[i] = z[i] + beta * p[i];
            }
        }

        Ok(SolveReport {
            iterations,
            residual,
            converged: residual <= self.tolerance,
        })
    }

    fn is_factorized(&self) -> bool {
        self.matrix.is_some()
    }

    fn name(&self) -> &str {
        "conjugate_gradient"
    }
}
