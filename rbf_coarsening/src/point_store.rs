/////////////////////////////////////////////////////////////////////////////////////////////
//
// Holds the source and target point sets and the kernel of one coarsening session.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::errors::{CoarseningError, CoarseningResult};
use faer::Mat;
use rbf_coarsening_utils::{select_mat_rows, RadialBasisFunction};
use std::sync::Arc;

/// Point sets and kernel shared by every selection of a coarsening session.
///
/// `positions` are the source points values are supplied at and from which
/// the coarse basis is drawn. `positions_interpolation` are the targets the
/// accepted interpolant maps onto. Both are immutable for the session.
#[derive(Debug, Clone)]
pub struct PointStore {
    rbf_function: Arc<dyn RadialBasisFunction>,
    positions: Mat<f64>,
    positions_interpolation: Mat<f64>,
}

impl PointStore {
    pub fn new(
        rbf_function: Arc<dyn RadialBasisFunction>,
        positions: Mat<f64>,
        positions_interpolation: Mat<f64>,
    ) -> CoarseningResult<Self> {
        if positions.ncols() != positions_interpolation.ncols() {
            return Err(CoarseningError::DimensionMismatch {
                positions: positions.ncols(),
                interpolation: positions_interpolation.ncols(),
            });
        }

        if !(1..=3).contains(&positions.ncols()) {
            return Err(CoarseningError::UnsupportedDimensions(positions.ncols()));
        }

        Ok(Self {
            rbf_function,
            positions,
            positions_interpolation,
        })
    }

    pub fn positions(&self) -> &Mat<f64> {
        &self.positions
    }

    pub fn positions_interpolation(&self) -> &Mat<f64> {
        &self.positions_interpolation
    }

    pub fn rbf_function(&self) -> Arc<dyn RadialBasisFunction> {
        Arc::clone(&self.rbf_function)
    }

    pub fn num_points(&self) -> usize {
        self.positions.nrows()
    }

    pub fn num_targets(&self) -> usize {
        self.positions_interpolation.nrows()
    }

    pub fn dimensions(&self) -> usize {
        self.positions.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.nrows() == 0
    }

    /// Copies the source points at `selection`, in selection order.
    pub fn select_positions(&self, selection: &[usize]) -> Mat<f64> {
        select_mat_rows(&self.positions, selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use equator::assert;
    use faer::mat;
    use rbf_coarsening_utils::kernels::CubicRbfKernel;

    #[test]
    fn stores_points_and_selects_rows() {
        let store = PointStore::new(
            Arc::new(CubicRbfKernel),
            mat![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0f64]],
            mat![[0.5, 0.5f64]],
        )
        .unwrap();

        assert!(store.num_points() == 3);
        assert!(store.num_targets() == 1);
        assert!(store.dimensions() == 2);
        assert!(store.select_positions(&[2, 0]) == mat![[0.0, 1.0], [0.0, 0.0f64]]);
    }

    #[test]
    fn rejects_mismatched_dimensions() {
        let result = PointStore::new(
            Arc::new(CubicRbfKernel),
            mat![[0.0, 0.0f64]],
            mat![[0.0, 0.0, 0.0f64]],
        );
        assert!(matches!(
            result,
            Err(CoarseningError::DimensionMismatch { positions: 2, interpolation: 3 })
        ));
    }

    #[test]
    fn rejects_unsupported_dimensions() {
        let result = PointStore::new(
            Arc::new(CubicRbfKernel),
            Mat::<f64>::zeros(2, 4),
            Mat::<f64>::zeros(2, 4),
        );
        assert!(matches!(result, Err(CoarseningError::UnsupportedDimensions(4))));
    }

    #[test]
    fn empty_positions_are_accepted() {
        let store = PointStore::new(
            Arc::new(CubicRbfKernel),
            Mat::<f64>::zeros(0, 3),
            Mat::<f64>::zeros(5, 3),
        )
        .unwrap();
        assert!(store.is_empty());
    }
}
