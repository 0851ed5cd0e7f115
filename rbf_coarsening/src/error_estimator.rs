/////////////////////////////////////////////////////////////////////////////////////////////
//
// Measures how well a coarse interpolant reproduces a field at every source point.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::{
    common,
    config::FittingAccuracyType,
    errors::{CoarseningError, CoarseningResult},
    rbf::InterpolationOperator,
};
use faer::Mat;
use rayon::prelude::*;
use rbf_coarsening_utils::argmax;

/// Worst source point of a coarse interpolant and its error there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorEstimate {
    /// Row in `positions` with the largest residual. Ties resolve to the
    /// lowest index.
    pub index: usize,

    /// Residual norm at `index`, divided by the largest value norm when the
    /// error is relative.
    pub error: f64,
}

/// Evaluates the coarse interpolant at every source point and returns the
/// point where it deviates most from `values`.
///
/// `coarse_operator` maps values at the selected points onto all source
/// points, and `values_at_selection` are the rows of `values` at the
/// selection, in selection order. The residual at a point is the Euclidean
/// norm over the value components; the error is its maximum over all
/// points.
pub fn compute_error(
    coarse_operator: &InterpolationOperator,
    values: &Mat<f64>,
    values_at_selection: &Mat<f64>,
    accuracy: FittingAccuracyType,
) -> CoarseningResult<ErrorEstimate> {
    let errors = point_errors(coarse_operator, values, values_at_selection, accuracy)?;

    let (index, error) = argmax(&errors).ok_or(CoarseningError::SingularSystem {
        centres: coarse_operator.num_centres(),
    })?;

    Ok(ErrorEstimate { index, error })
}

/// Error of the coarse interpolant at each source point, measured as in
/// [`compute_error`].
pub(crate) fn point_errors(
    coarse_operator: &InterpolationOperator,
    values: &Mat<f64>,
    values_at_selection: &Mat<f64>,
    accuracy: FittingAccuracyType,
) -> CoarseningResult<Vec<f64>> {
    let n = coarse_operator.num_targets();

    if values.nrows() != n {
        return Err(CoarseningError::ValueRowMismatch {
            expected: n,
            found: values.nrows(),
        });
    }

    let approximated = coarse_operator.interpolate(values_at_selection)?;

    if !common::all_finite(&approximated) {
        return Err(CoarseningError::SingularSystem {
            centres: coarse_operator.num_centres(),
        });
    }

    let scale = error_scale(values, accuracy);

    let errors: Vec<f64> = (0..n)
        .into_par_iter()
        .map(|i| {
            let residual = (0..values.ncols())
                .map(|j| {
                    let diff = values[(i, j)] - approximated[(i, j)];
                    diff * diff
                })
                .sum::<f64>()
                .sqrt();
            residual / scale
        })
        .collect();

    Ok(errors)
}

/// Divisor turning an absolute residual into the requested error measure.
fn error_scale(values: &Mat<f64>, accuracy: FittingAccuracyType) -> f64 {
    match accuracy {
        FittingAccuracyType::Absolute => 1.0,
        FittingAccuracyType::Relative => {
            let max_norm = common::row_norms(values)
                .into_iter()
                .fold(0.0_f64, f64::max);
            // An all-zero field falls back to the absolute residual.
            match max_norm > 0.0 && max_norm.is_finite() {
                true => max_norm,
                false => 1.0,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolant_config::InterpolantSettings;
    use equator::assert;
    use rbf_coarsening_utils::{kernels::CubicRbfKernel, select_mat_rows};
    use std::sync::Arc;

    fn line(n: usize) -> Mat<f64> {
        Mat::from_fn(n, 1, |i, _| i as f64 / (n - 1) as f64)
    }

    fn coarse_operator(positions: &Mat<f64>, selection: &[usize]) -> InterpolationOperator {
        InterpolationOperator::new(
            Arc::new(CubicRbfKernel),
            &InterpolantSettings::default(),
            select_mat_rows(positions, selection),
            positions,
        )
        .unwrap()
    }

    #[test]
    fn field_in_drift_space_has_no_error() {
        let positions = line(9);
        let values = Mat::from_fn(9, 1, |i, _| 2.0 * positions[(i, 0)] + 1.0);
        let selection = [0, 8];

        let estimate = compute_error(
            &coarse_operator(&positions, &selection),
            &values,
            &select_mat_rows(&values, &selection),
            FittingAccuracyType::Absolute,
        )
        .unwrap();

        assert!(estimate.error < 1e-12);
    }

    #[test]
    fn reports_worst_point_and_normalises_relative_error() {
        // Linear through the end points of 3x^2 leaves 3(x - x^2), largest at x = 0.5.
        let positions = line(11);
        let values = Mat::from_fn(11, 1, |i, _| 3.0 * positions[(i, 0)].powi(2));
        let selection = [0, 10];
        let operator = coarse_operator(&positions, &selection);
        let at_selection = select_mat_rows(&values, &selection);

        let absolute =
            compute_error(&operator, &values, &at_selection, FittingAccuracyType::Absolute)
                .unwrap();
        let relative =
            compute_error(&operator, &values, &at_selection, FittingAccuracyType::Relative)
                .unwrap();

        assert!(absolute.index == 5);
        assert!((absolute.error - 0.75).abs() < 1e-10);
        assert!(relative.index == 5);
        assert!((relative.error - 0.25).abs() < 1e-10);
    }

    #[test]
    fn zero_field_uses_absolute_error() {
        let positions = line(5);
        let values = Mat::<f64>::zeros(5, 2);
        let selection = [0, 4];

        let estimate = compute_error(
            &coarse_operator(&positions, &selection),
            &values,
            &select_mat_rows(&values, &selection),
            FittingAccuracyType::Relative,
        )
        .unwrap();

        assert!(estimate.error == 0.0);
        assert!(estimate.index == 0);
    }

    #[test]
    fn rejects_value_row_mismatch() {
        let positions = line(5);
        let selection = [0, 4];

        let result = compute_error(
            &coarse_operator(&positions, &selection),
            &Mat::<f64>::zeros(4, 1),
            &Mat::<f64>::zeros(2, 1),
            FittingAccuracyType::Relative,
        );

        assert!(matches!(result, Err(CoarseningError::ValueRowMismatch { expected: 5, found: 4 })));
    }
}
