/////////////////////////////////////////////////////////////////////////////////////////////
//
// Wraps the dense factorisations used to solve RBF interpolation systems.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! # linalg
//!
//! Dense factorisations for RBF systems. Strictly positive definite kernel
//! matrices are factorised with Cholesky (LLᵀ); saddle-point systems that
//! carry a polynomial drift are indefinite and use partial pivot LU.

use faer::{
    linalg::solvers::{Llt, PartialPivLu, Solve},
    Mat, MatRef, Side,
};
use std::fmt;

pub enum SystemSolver {
    Llt(Llt<f64>),
    Lu(PartialPivLu<f64>),
}

impl SystemSolver {
    /// Try LLᵀ first. If it fails (matrix not SPD / numerically indefinite),
    /// fall back to partial pivot LU.
    pub fn new_spd(a: MatRef<'_, f64>) -> Self {
        match a.llt(Side::Lower) {
            Ok(llt) => SystemSolver::Llt(llt),
            Err(_) => SystemSolver::Lu(a.partial_piv_lu()),
        }
    }

    /// Partial pivot LU for general (indefinite) systems.
    pub fn new_indefinite(a: MatRef<'_, f64>) -> Self {
        SystemSolver::Lu(a.partial_piv_lu())
    }

    pub fn solve(&self, rhs: &Mat<f64>) -> Mat<f64> {
        match self {
            SystemSolver::Llt(s) => s.solve(rhs),
            SystemSolver::Lu(s) => s.solve(rhs),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SystemSolver::Llt(_) => "llt",
            SystemSolver::Lu(_) => "lu",
        }
    }
}

impl fmt::Debug for SystemSolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SystemSolver({})", self.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use equator::assert;
    use faer::utils::approx::*;

    /// Deterministic SPD matrix: A = M M^T + alpha I.
    fn make_spd(n: usize, alpha: f64) -> Mat<f64> {
        let m = Mat::<f64>::from_fn(n, n, |i, j| {
            let x = (i as f64 + 1.0) * (j as f64 + 2.0);
            (x.sin() + 2.0 * x.cos()) / (1.0 + (i + j + 1) as f64)
        });
        let mut a = &m * m.transpose();
        for i in 0..n {
            a[(i, i)] += alpha;
        }
        a
    }

    #[test]
    fn spd_matrix_uses_cholesky() {
        let n = 6usize;
        let a = make_spd(n, 1e-2);
        let b = Mat::<f64>::from_fn(n, 2, |i, j| (i + 1 + 3 * j) as f64 / (1.0 + i as f64));

        let solver = SystemSolver::new_spd(a.as_ref());
        assert!(solver.kind() == "llt");

        let x = solver.solve(&b);

        let approx_eq = CwiseMat(ApproxEq::eps() * 1024.0 * (n as f64));
        assert!(&a * &x ~ b);
    }

    #[test]
    fn indefinite_matrix_falls_back_to_lu() {
        // Saddle point system [[A, P], [P^T, 0]].
        let a = faer::mat![
            [0.0, 1.0, 1.0, 0.0],
            [1.0, 0.0, 1.0, 1.0],
            [1.0, 1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
        ];
        let b = Mat::<f64>::from_fn(4, 1, |i, _| i as f64 + 1.0);

        let solver = SystemSolver::new_spd(a.as_ref());
        assert!(solver.kind() == "lu");

        let x = solver.solve(&b);

        let approx_eq = CwiseMat(ApproxEq::eps() * 1024.0);
        assert!(&a * &x ~ b);
    }
}
