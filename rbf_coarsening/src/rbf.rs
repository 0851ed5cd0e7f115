/////////////////////////////////////////////////////////////////////////////////////////////
//
// Implements dense RBF system assembly, factorisation, fitting and precomputed interpolation operators.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! Dense RBF interpolation engine.
//!
//! Every system is solved directly. For a set of `n` centres and `m`
//! unisolvent monomials the interpolation conditions are
//!
//! ```text
//! [ A   P ] [ λ ]   [ f ]
//! [ Pᵀ  0 ] [ c ] = [ 0 ]
//! ```
//!
//! where `A` is the kernel matrix of the centres (plus nugget), `P` holds the
//! drift monomials evaluated at the centres, `λ` are the point coefficients
//! and `c` the polynomial coefficients.

use crate::{
    common,
    errors::{CoarseningError, CoarseningResult},
    interpolant_config::InterpolantSettings,
    linalg::SystemSolver,
    polynomials,
};
use faer::Mat;
use rbf_coarsening_utils::{get_a_matrix, get_a_matrix_symmetric, RadialBasisFunction};
use std::sync::Arc;

/// Coefficients of a solved RBF system.
#[derive(Debug, Clone)]
pub struct Coefficients {
    /// Coefficients associated with the RBF centres.
    pub point_coefficients: Mat<f64>,

    /// Coefficients associated with the polynomial drift term, if present.
    ///
    /// `None` when no polynomial component was included in the system.
    pub poly_coefficients: Option<Mat<f64>>,
}

impl Coefficients {
    pub(crate) fn new(point_coefficients: Mat<f64>, poly_coefficients: Option<Mat<f64>>) -> Self {
        Self {
            point_coefficients,
            poly_coefficients,
        }
    }
}

/// A factorised RBF system over a fixed set of centres.
///
/// The factorisation is independent of the values, so a single system can be
/// solved for many right hand sides or turned into an evaluation matrix.
#[derive(Debug)]
pub struct RbfSystem {
    kernel: Arc<dyn RadialBasisFunction>,
    centres: Mat<f64>,
    polynomial_degree: i32,
    translation_factor: Vec<f64>,
    scale_factor: Vec<f64>,
    poly_columns: Vec<usize>,
    solver: SystemSolver,
}

impl RbfSystem {
    /// Assembles and factorises the interpolation system over `centres`.
    ///
    /// Monomials that are linearly dependent on `centres` are dropped, so
    /// one centre, or centres on a line or plane, still yield a solvable
    /// system with a reduced drift.
    pub fn factorise(
        kernel: Arc<dyn RadialBasisFunction>,
        settings: &InterpolantSettings,
        centres: Mat<f64>,
    ) -> CoarseningResult<Self> {
        let n = centres.nrows();
        if n == 0 {
            return Err(CoarseningError::EmptyPositions);
        }

        let polynomial_degree = settings.polynomial_degree(kernel.as_ref())?;

        let a_matrix = get_a_matrix_symmetric(&centres, kernel.as_ref(), settings.nugget);

        let (translation_factor, scale_factor) = common::get_cheb_cube_scaling_factors(&centres);

        let monomials = polynomials::evaluate_monomials(
            &centres,
            polynomial_degree,
            &translation_factor,
            &scale_factor,
        );
        let poly_columns = polynomials::unisolvent_columns(&monomials);
        let m = poly_columns.len();

        let solver = match m {
            0 => SystemSolver::new_spd(a_matrix.as_ref()),
            _ => {
                let p_matrix = common::select_mat_cols(&monomials, &poly_columns);
                let lhs = Mat::<f64>::from_fn(n + m, n + m, |i, j| match (i < n, j < n) {
                    (true, true) => a_matrix[(i, j)],
                    (true, false) => p_matrix[(i, j - n)],
                    (false, true) => p_matrix[(j, i - n)],
                    (false, false) => 0.0,
                });
                SystemSolver::new_indefinite(lhs.as_ref())
            }
        };

        Ok(Self {
            kernel,
            centres,
            polynomial_degree,
            translation_factor,
            scale_factor,
            poly_columns,
            solver,
        })
    }

    pub fn num_centres(&self) -> usize {
        self.centres.nrows()
    }

    pub fn centres(&self) -> &Mat<f64> {
        &self.centres
    }

    /// Number of drift monomials kept after the unisolvency check.
    pub fn num_poly_terms(&self) -> usize {
        self.poly_columns.len()
    }

    /// Factorisation in use, `"llt"` or `"lu"`.
    pub fn solver_kind(&self) -> &'static str {
        self.solver.kind()
    }

    /// Solves for the coefficients reproducing `values` at the centres.
    pub fn solve(&self, values: &Mat<f64>) -> CoarseningResult<Coefficients> {
        let n = self.num_centres();
        let m = self.num_poly_terms();

        if values.nrows() != n {
            return Err(CoarseningError::ValueRowMismatch {
                expected: n,
                found: values.nrows(),
            });
        }

        let rhs = Mat::<f64>::from_fn(n + m, values.ncols(), |i, j| match i < n {
            true => values[(i, j)],
            false => 0.0,
        });

        let solution = self.solver.solve(&rhs);

        if !common::all_finite(&solution) {
            return Err(CoarseningError::SingularSystem { centres: n });
        }

        let point_coefficients = solution.subrows(0, n).to_owned();
        let poly_coefficients = match m {
            0 => None,
            _ => Some(solution.subrows(n, m).to_owned()),
        };

        Ok(Coefficients::new(point_coefficients, poly_coefficients))
    }

    /// Evaluates the interpolant described by `coefficients` at `targets`.
    pub fn evaluate(&self, coefficients: &Coefficients, targets: &Mat<f64>) -> CoarseningResult<Mat<f64>> {
        let (kernel_block, poly_block) = self.target_blocks(targets)?;

        let values = &kernel_block * &coefficients.point_coefficients;

        match (poly_block, &coefficients.poly_coefficients) {
            (Some(poly_block), Some(poly_coefficients)) => {
                Ok(&values + &(&poly_block * poly_coefficients))
            }
            _ => Ok(values),
        }
    }

    /// Builds the `(targets x centres)` matrix `H` mapping values at the
    /// centres to interpolated values at `targets`.
    ///
    /// `H = [K_tc  P_t] · S⁻¹ · [I; 0]`, where `S` is the system matrix.
    pub fn evaluation_matrix(&self, targets: &Mat<f64>) -> CoarseningResult<Mat<f64>> {
        let n = self.num_centres();
        let m = self.num_poly_terms();

        let (kernel_block, poly_block) = self.target_blocks(targets)?;

        let selector = Mat::<f64>::from_fn(n + m, n, |i, j| match i == j {
            true => 1.0,
            false => 0.0,
        });
        let cardinal = self.solver.solve(&selector);

        if !common::all_finite(&cardinal) {
            return Err(CoarseningError::SingularSystem { centres: n });
        }

        let h_matrix = &kernel_block * &cardinal.subrows(0, n).to_owned();

        match poly_block {
            Some(poly_block) => Ok(&h_matrix + &(&poly_block * &cardinal.subrows(n, m).to_owned())),
            None => Ok(h_matrix),
        }
    }

    /// Kernel matrix between `targets` and the centres, and the kept drift
    /// monomials at `targets`.
    fn target_blocks(&self, targets: &Mat<f64>) -> CoarseningResult<(Mat<f64>, Option<Mat<f64>>)> {
        if targets.ncols() != self.centres.ncols() {
            return Err(CoarseningError::DimensionMismatch {
                positions: self.centres.ncols(),
                interpolation: targets.ncols(),
            });
        }

        let kernel_block = get_a_matrix(targets, &self.centres, self.kernel.as_ref());

        let poly_block = match self.poly_columns.is_empty() {
            true => None,
            false => {
                let monomials = polynomials::evaluate_monomials(
                    targets,
                    self.polynomial_degree,
                    &self.translation_factor,
                    &self.scale_factor,
                );
                Some(common::select_mat_cols(&monomials, &self.poly_columns))
            }
        };

        Ok((kernel_block, poly_block))
    }
}

/// An RBF interpolant fitted to values at a set of centres.
#[derive(Debug)]
pub struct RBFInterpolant {
    system: RbfSystem,
    pub coefficients: Coefficients,
}

impl RBFInterpolant {
    /// Fits an interpolant through `values` at `points`.
    pub fn fit(
        kernel: Arc<dyn RadialBasisFunction>,
        settings: &InterpolantSettings,
        points: Mat<f64>,
        values: &Mat<f64>,
    ) -> CoarseningResult<Self> {
        if values.nrows() != points.nrows() {
            return Err(CoarseningError::ValueRowMismatch {
                expected: points.nrows(),
                found: values.nrows(),
            });
        }

        let system = RbfSystem::factorise(kernel, settings, points)?;
        let coefficients = system.solve(values)?;

        Ok(Self {
            system,
            coefficients,
        })
    }

    /// Evaluates the interpolant at `targets`.
    pub fn evaluate(&self, targets: &Mat<f64>) -> CoarseningResult<Mat<f64>> {
        self.system.evaluate(&self.coefficients, targets)
    }

    pub fn system(&self) -> &RbfSystem {
        &self.system
    }
}

/// A precomputed linear map from values at a set of centres to interpolated
/// values at a fixed set of targets.
///
/// Building the operator costs one factorisation and one multi-RHS solve.
/// Applying it is a single matrix product, which makes it cheap to reuse for
/// many value fields over the same centres and targets.
#[derive(Debug, Clone)]
pub struct InterpolationOperator {
    h_matrix: Mat<f64>,
}

impl InterpolationOperator {
    pub fn new(
        kernel: Arc<dyn RadialBasisFunction>,
        settings: &InterpolantSettings,
        centres: Mat<f64>,
        targets: &Mat<f64>,
    ) -> CoarseningResult<Self> {
        let system = RbfSystem::factorise(kernel, settings, centres)?;
        let h_matrix = system.evaluation_matrix(targets)?;
        Ok(Self { h_matrix })
    }

    /// Maps `values` (one row per centre) to the targets.
    pub fn interpolate(&self, values: &Mat<f64>) -> CoarseningResult<Mat<f64>> {
        if values.nrows() != self.num_centres() {
            return Err(CoarseningError::ValueRowMismatch {
                expected: self.num_centres(),
                found: values.nrows(),
            });
        }
        Ok(&self.h_matrix * values)
    }

    pub fn num_centres(&self) -> usize {
        self.h_matrix.ncols()
    }

    pub fn num_targets(&self) -> usize {
        self.h_matrix.nrows()
    }

    /// The `(targets x centres)` operator matrix.
    pub fn matrix(&self) -> &Mat<f64> {
        &self.h_matrix
    }
}
