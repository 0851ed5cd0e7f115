/////////////////////////////////////////////////////////////////////////////////////////////
//
// Grows a coarse RBF basis one worst-approximated point at a time until it meets the tolerance.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! # Greedy basis selection
//!
//! Starting from a small seed, the selector repeatedly builds an interpolant
//! on the current basis, evaluates it at every source point and adds the
//! point with the largest error. It stops once the error is within the
//! tolerance, or once the basis reaches its maximum size.
//!
//! The max-norm error is not guaranteed to decrease at every step. Adding a
//! point removes the error there but can raise it slightly elsewhere, so the
//! per-step errors are kept in [`SelectionReport::error_history`].
//!
//! Points closer to a selected point than [`duplicate_cutoff_distance`] are
//! never added to the basis. Coincident centres make the interpolation
//! system singular, and shared nodes between surface patches are common in
//! coupled meshes. When only such points remain the selection stops with the
//! basis it has.

use crate::{
    config::CoarseningParams,
    error_estimator::{self, ErrorEstimate},
    errors::{CoarseningError, CoarseningResult},
    interpolant_config::InterpolantSettings,
    point_store::PointStore,
    progress::{self, ProgressMsg, ProgressSink},
    rbf::InterpolationOperator,
};
use faer::Mat;
use rbf_coarsening_utils::{
    argmax, get_distance, get_pointarray_extents, select_mat_rows, RadialBasisFunction,
};
use std::sync::Arc;

/// Outcome of a greedy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStatus {
    /// The basis reproduces the field within the tolerance, or holds every
    /// source point.
    Converged,

    /// The basis reached `max_points` with the error still above the
    /// tolerance. The basis is usable, but less accurate than requested.
    AccuracyNotMet,
}

/// Summary of a greedy selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionReport {
    pub status: SelectionStatus,

    /// Error of the final basis.
    pub error: f64,

    /// Source point with the largest error for the final basis.
    pub worst_index: usize,

    pub basis_size: usize,

    /// Number of interpolants built, one per basis size visited.
    pub iterations: usize,

    /// Error after each iteration, in order.
    ///
    /// The sequence is not monotone in general: the max-norm error of an RBF
    /// interpolant can rise when a point is added. Only the final entry is
    /// guaranteed to be within the tolerance when the status is
    /// [`SelectionStatus::Converged`].
    pub error_history: Vec<f64>,
}

/// Result of a selection: the report and the coarse operator of the final
/// basis, mapping values at the basis onto every source point.
pub(crate) struct Selection {
    pub report: SelectionReport,
    pub coarse_operator: InterpolationOperator,
}

pub(crate) struct GreedySelector<'a> {
    store: &'a PointStore,
    params: &'a CoarseningParams,
    settings: &'a InterpolantSettings,
    progress_callback: Option<&'a Arc<dyn ProgressSink>>,
}

impl<'a> GreedySelector<'a> {
    pub fn new(
        store: &'a PointStore,
        params: &'a CoarseningParams,
        settings: &'a InterpolantSettings,
        progress_callback: Option<&'a Arc<dyn ProgressSink>>,
    ) -> Self {
        Self {
            store,
            params,
            settings,
            progress_callback,
        }
    }

    /// Basis size bounds clamped to the number of source points.
    pub fn bounds(&self) -> (usize, usize) {
        let n = self.store.num_points();
        let min_points = self.params.min_points.clamp(1, n.max(1));
        let max_points = self.params.max_points.min(n).max(min_points);
        (min_points, max_points)
    }

    /// Builds the coarse operator of `selection` and measures its error on
    /// `values`, without changing the selection.
    pub fn evaluate(
        &self,
        values: &Mat<f64>,
        selection: &[usize],
    ) -> CoarseningResult<(InterpolationOperator, Vec<f64>)> {
        let coarse_operator = InterpolationOperator::new(
            self.store.rbf_function(),
            self.settings,
            self.store.select_positions(selection),
            self.store.positions(),
        )?;

        let errors = error_estimator::point_errors(
            &coarse_operator,
            values,
            &select_mat_rows(values, selection),
            self.params.tolerance.tolerance_type,
        )?;

        Ok((coarse_operator, errors))
    }

    /// Grows `selection` until the basis meets the tolerance or reaches
    /// `max_points`. An empty selection is seeded first.
    pub fn select(&self, values: &Mat<f64>, selection: &mut Vec<usize>) -> CoarseningResult<Selection> {
        let n = self.store.num_points();

        if n == 0 {
            return Err(CoarseningError::EmptyPositions);
        }
        if values.nrows() != n {
            return Err(CoarseningError::ValueRowMismatch {
                expected: n,
                found: values.nrows(),
            });
        }

        let (min_points, max_points) = self.bounds();
        let tolerance = self.params.tolerance.tolerance;

        let positions = self.store.positions();
        let cutoff = duplicate_cutoff_distance(
            self.store.rbf_function().as_ref(),
            max_extent_length(positions),
        );

        if selection.is_empty() {
            *selection = seed_selection(positions, min_points, cutoff);
        }

        let mut excluded = vec![false; n];
        for &index in selection.iter() {
            exclude_near(positions, index, cutoff, &mut excluded);
        }

        let mut error_history = Vec::new();
        let mut iter = 0usize;

        loop {
            iter += 1;

            let (coarse_operator, mut errors) = self.evaluate(values, selection)?;

            let worst = argmax(&errors)
                .map(|(index, error)| ErrorEstimate { index, error })
                .ok_or(CoarseningError::SingularSystem {
                    centres: selection.len(),
                })?;

            let basis_size = selection.len();
            error_history.push(worst.error);

            progress::emit(
                self.progress_callback,
                ProgressMsg::SelectionIteration {
                    iter,
                    basis_size,
                    error: worst.error,
                },
            );

            // Selected points and their duplicates are never candidates, even
            // when a smoothing nugget leaves a residual there.
            for (error, &skip) in errors.iter_mut().zip(excluded.iter()) {
                if skip {
                    *error = f64::NAN;
                }
            }

            let next = argmax(&errors).map(|(index, _)| index);
            let exhausted = next.is_none();

            if exhausted && basis_size < n {
                progress::emit(
                    self.progress_callback,
                    ProgressMsg::DuplicatesSkipped {
                        num_duplicates: n - basis_size,
                    },
                );
            }

            let converged = (worst.error <= tolerance && (basis_size >= min_points || exhausted))
                || basis_size >= n;

            let status = match (converged, basis_size >= max_points || exhausted) {
                (true, _) => Some(SelectionStatus::Converged),
                (false, true) => Some(SelectionStatus::AccuracyNotMet),
                (false, false) => None,
            };

            if let Some(status) = status {
                let msg = match status {
                    SelectionStatus::Converged => ProgressMsg::BasisSelected {
                        basis_size,
                        error: worst.error,
                        iterations: iter,
                    },
                    SelectionStatus::AccuracyNotMet => ProgressMsg::AccuracyNotMet {
                        basis_size,
                        error: worst.error,
                        tolerance,
                    },
                };
                progress::emit(self.progress_callback, msg);

                return Ok(Selection {
                    report: SelectionReport {
                        status,
                        error: worst.error,
                        worst_index: worst.index,
                        basis_size,
                        iterations: iter,
                        error_history,
                    },
                    coarse_operator,
                });
            }

            let next = next.ok_or(CoarseningError::SingularSystem { centres: basis_size })?;
            exclude_near(positions, next, cutoff, &mut excluded);
            selection.push(next);
        }
    }
}

/// Picks up to `count` well-spread starting points.
///
/// The first point is the one farthest from the centroid. Every further
/// point maximises its distance to the points already picked. Ties resolve
/// to the lowest index, so the seed is deterministic. Points within `cutoff`
/// of a picked point are skipped, so the seed is shorter than `count` when
/// the cloud has fewer distinct points.
pub(crate) fn seed_selection(positions: &Mat<f64>, count: usize, cutoff: f64) -> Vec<usize> {
    let n = positions.nrows();
    let count = count.min(n);

    if count == 0 {
        return Vec::new();
    }

    let centroid = Mat::<f64>::from_fn(1, positions.ncols(), |_, j| {
        (0..n).map(|i| positions[(i, j)]).sum::<f64>() / n as f64
    });

    let from_centroid: Vec<f64> = (0..n)
        .map(|i| get_distance(positions.row(i), centroid.row(0)))
        .collect();

    let first = argmax(&from_centroid).map_or(0, |(index, _)| index);

    let mut selection = Vec::with_capacity(count);
    let mut nearest = vec![f64::INFINITY; n];
    let mut next = Some(first);

    while let Some(index) = next {
        selection.push(index);
        if selection.len() == count {
            break;
        }

        nearest[index] = f64::NAN;
        for (i, dist) in nearest.iter_mut().enumerate() {
            if !dist.is_nan() {
                *dist = dist.min(get_distance(positions.row(i), positions.row(index)));
                if *dist <= cutoff {
                    *dist = f64::NAN;
                }
            }
        }

        next = argmax(&nearest).map(|(index, _)| index);
    }

    selection
}

/// Marks every point within `cutoff` of `positions[index]`, including the
/// point itself.
fn exclude_near(positions: &Mat<f64>, index: usize, cutoff: f64, excluded: &mut [bool]) {
    excluded[index] = true;
    for (i, skip) in excluded.iter_mut().enumerate() {
        if !*skip && get_distance(positions.row(i), positions.row(index)) <= cutoff {
            *skip = true;
        }
    }
}

/// Largest side of the bounding box of `positions`.
fn max_extent_length(positions: &Mat<f64>) -> f64 {
    let dims = positions.ncols();
    let extents = get_pointarray_extents(positions);

    extents[..dims]
        .iter()
        .zip(extents[dims..].iter())
        .map(|(min, max)| (max - min).abs())
        .filter(|length| length.is_finite())
        .fold(0.0, f64::max)
}

/// Estimate the distance below which two centres are indistinguishable to
/// the kernel.
///
/// Probes the kernel near r = 0 and returns the radius at which
/// |φ(r) - φ(0)| rises above machine epsilon relative to |φ(h_ref) - φ(0)|.
/// Centres closer than this give numerically identical rows in the
/// interpolation system.
///
/// Returns: cutoff distance in [0, h_ref]. Zero when the kernel is flat over
/// `h_ref` or the root search fails, so only coincident points are skipped.
pub(crate) fn duplicate_cutoff_distance(kernel: &dyn RadialBasisFunction, h_ref: f64) -> f64 {
    let phi0 = kernel.phi(0.0);
    let target = f64::EPSILON * (kernel.phi(h_ref) - phi0).abs();

    if !(h_ref > 0.0 && target > 0.0 && target.is_finite()) {
        return 0.0;
    }

    // Searched over t with r = h_ref * 10^t, which keeps the residual well
    // scaled across the sixteen decades below h_ref.
    let resid = |t: f64| {
        let rise = (kernel.phi(h_ref * 10f64.powf(t)) - phi0).abs();
        (rise.max(f64::MIN_POSITIVE) / target).log10()
    };

    let mut rtol = 1E-12;

    match roots::find_root_inverse_quadratic(-16.0, 0.0, resid, &mut rtol) {
        Ok(t) => (h_ref * 10f64.powf(t)).min(h_ref),
        _ => 0.0,
    }
}
