/////////////////////////////////////////////////////////////////////////////////////////////
//
// Implements the adaptive coarsening controller and its uncoarsened counterpart.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! Coarsening controllers.
//!
//! A controller owns one session: the source and target point sets supplied
//! by [`Coarsener::compute`], the coarse basis selected from the sources and
//! the interpolation operators built on that basis. Each call to
//! [`Coarsener::interpolate`] maps a field given at the sources onto the
//! targets.

use crate::{
    config::CoarseningParams,
    error_estimator,
    errors::{CoarseningError, CoarseningResult},
    greedy::{GreedySelector, SelectionReport, SelectionStatus},
    interpolant_config::InterpolantSettings,
    point_store::PointStore,
    progress::{self, ProgressMsg, ProgressSink},
    rbf::InterpolationOperator,
};
use faer::Mat;
use rbf_coarsening_utils::{select_mat_rows, RadialBasisFunction};
use std::sync::Arc;

/// Lifecycle of a coarsening session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoarseningState {
    /// No point sets have been supplied.
    Empty,

    /// Point sets are loaded but no basis has been selected for them yet.
    PointsLoaded,

    /// A basis is selected and its operators can be reused.
    BasisSelected,
}

/// Common interface of the coarsening controllers.
pub trait Coarsener {
    /// Starts a new session on the given point sets, discarding any basis
    /// and operators of the previous one.
    fn compute(
        &mut self,
        rbf_function: Arc<dyn RadialBasisFunction>,
        positions: Mat<f64>,
        positions_interpolation: Mat<f64>,
    ) -> CoarseningResult<()>;

    /// Whether the session has operators ready to interpolate with.
    fn initialized(&self) -> bool;

    /// Maps `values` (one row per source point) onto the interpolation
    /// positions.
    fn interpolate(&mut self, values: &Mat<f64>) -> CoarseningResult<Mat<f64>>;
}

/// Interpolates with a greedily selected subset of the source points.
///
/// The basis is selected on the first call to [`interpolate`](Coarsener::interpolate)
/// and reused for later fields as long as it still reproduces them within
/// the reselection tolerance. Otherwise it is selected again from scratch.
///
/// # Example
/// ```
/// use rbf_coarsening::{
///     AdaptiveCoarsening, Coarsener, CoarseningTestFunctions, SelectionStatus,
///     config::CoarseningParams, create_evaluation_grid,
///     kernels::CubicRbfKernel,
/// };
/// use std::sync::Arc;
///
/// let positions = create_evaluation_grid(&[(0.0, 1.0)], &[100]);
/// let targets = create_evaluation_grid(&[(0.0, 1.0)], &[37]);
/// let values = CoarseningTestFunctions::sine_wave(&positions, 1.0);
///
/// let params = CoarseningParams::builder().tolerance(1e-3).min_points(2).build();
/// let mut coarsening = AdaptiveCoarsening::new(params)?;
///
/// coarsening.compute(Arc::new(CubicRbfKernel), positions, targets)?;
/// let mapped = coarsening.interpolate(&values)?;
///
/// assert_eq!(mapped.nrows(), 37);
/// assert_eq!(coarsening.status(), Some(SelectionStatus::Converged));
/// assert!(coarsening.selection().len() < 100);
/// # Ok::<(), rbf_coarsening::CoarseningError>(())
/// ```
#[derive(Debug)]
pub struct AdaptiveCoarsening {
    params: CoarseningParams,
    rbf_settings: InterpolantSettings,
    progress_callback: Option<Arc<dyn ProgressSink>>,
    store: Option<PointStore>,
    selection: Vec<usize>,
    rbf_coarse: Option<InterpolationOperator>,
    rbf: Option<InterpolationOperator>,
    last_report: Option<SelectionReport>,
    reselection_count: usize,
}

impl AdaptiveCoarsening {
    /// Creates a controller after validating `params`.
    pub fn new(params: CoarseningParams) -> CoarseningResult<Self> {
        params.validate()?;

        Ok(Self {
            params,
            rbf_settings: InterpolantSettings::default(),
            progress_callback: None,
            store: None,
            selection: Vec::new(),
            rbf_coarse: None,
            rbf: None,
            last_report: None,
            reselection_count: 0,
        })
    }

    /// Sets the drift and nugget of the interpolants built on the basis.
    pub fn rbf_settings(mut self, rbf_settings: InterpolantSettings) -> Self {
        self.rbf_settings = rbf_settings;
        self
    }

    /// Reports selection progress to `progress_callback`.
    pub fn progress_callback(mut self, progress_callback: Arc<dyn ProgressSink>) -> Self {
        self.progress_callback = Some(progress_callback);
        self
    }

    pub fn params(&self) -> &CoarseningParams {
        &self.params
    }

    /// Indices into the source positions of the current basis, in the order
    /// they were selected. Empty until a basis has been selected.
    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    /// Source positions of the current basis.
    pub fn selected_positions(&self) -> Option<Mat<f64>> {
        match (&self.store, self.selection.is_empty()) {
            (Some(store), false) => Some(store.select_positions(&self.selection)),
            _ => None,
        }
    }

    pub fn point_store(&self) -> Option<&PointStore> {
        self.store.as_ref()
    }

    pub fn state(&self) -> CoarseningState {
        match (&self.store, &self.rbf_coarse) {
            (None, _) => CoarseningState::Empty,
            (Some(_), None) => CoarseningState::PointsLoaded,
            (Some(_), Some(_)) => CoarseningState::BasisSelected,
        }
    }

    /// Report of the most recent greedy selection in this session.
    pub fn last_report(&self) -> Option<&SelectionReport> {
        self.last_report.as_ref()
    }

    pub fn status(&self) -> Option<SelectionStatus> {
        self.last_report.as_ref().map(|report| report.status)
    }

    /// Number of times a basis was discarded and selected again because it
    /// no longer fit the supplied values. Counted over the controller's
    /// lifetime.
    pub fn reselection_count(&self) -> usize {
        self.reselection_count
    }

    /// Selects a new basis for `values` from scratch, replacing the current
    /// one. On error the controller is left without a basis or report.
    ///
    /// Stopping at `max_points` above the tolerance is not an error: the
    /// report carries [`SelectionStatus::AccuracyNotMet`] and the basis is
    /// used as is.
    pub fn greedy_selection(&mut self, values: &Mat<f64>) -> CoarseningResult<SelectionReport> {
        let store = self.store.as_ref().ok_or(CoarseningError::NotComputed)?;

        self.selection.clear();
        self.rbf_coarse = None;
        self.rbf = None;
        self.last_report = None;

        let selector = GreedySelector::new(
            store,
            &self.params,
            &self.rbf_settings,
            self.progress_callback.as_ref(),
        );

        let result = selector.select(values, &mut self.selection);

        let selection = match result {
            Ok(selection) => selection,
            Err(e) => {
                self.selection.clear();
                return Err(e);
            }
        };

        self.rbf_coarse = Some(selection.coarse_operator);
        self.last_report = Some(selection.report.clone());

        Ok(selection.report)
    }

    /// Error of the current basis on `values`, or `None` if no basis has
    /// been selected.
    fn current_error(&self, values: &Mat<f64>) -> CoarseningResult<Option<f64>> {
        match &self.rbf_coarse {
            Some(rbf_coarse) => {
                let estimate = error_estimator::compute_error(
                    rbf_coarse,
                    values,
                    &select_mat_rows(values, &self.selection),
                    self.params.tolerance.tolerance_type,
                )?;
                Ok(Some(estimate.error))
            }
            None => Ok(None),
        }
    }
}

impl Coarsener for AdaptiveCoarsening {
    fn compute(
        &mut self,
        rbf_function: Arc<dyn RadialBasisFunction>,
        positions: Mat<f64>,
        positions_interpolation: Mat<f64>,
    ) -> CoarseningResult<()> {
        let store = PointStore::new(rbf_function, positions, positions_interpolation)?;

        progress::emit(
            self.progress_callback.as_ref(),
            ProgressMsg::Message {
                message: format!(
                    "Coarsening session with {} source and {} target points",
                    store.num_points(),
                    store.num_targets()
                ),
            },
        );

        self.store = Some(store);
        self.selection.clear();
        self.rbf_coarse = None;
        self.rbf = None;
        self.last_report = None;

        Ok(())
    }

    fn initialized(&self) -> bool {
        self.rbf_coarse.is_some()
    }

    fn interpolate(&mut self, values: &Mat<f64>) -> CoarseningResult<Mat<f64>> {
        let store = self.store.as_ref().ok_or(CoarseningError::NotComputed)?;

        if store.is_empty() {
            return Err(CoarseningError::EmptyPositions);
        }
        if values.nrows() != store.num_points() {
            return Err(CoarseningError::ValueRowMismatch {
                expected: store.num_points(),
                found: values.nrows(),
            });
        }

        match self.current_error(values)? {
            None => {
                self.greedy_selection(values)?;
            }
            Some(error) if error > self.params.reselection_tolerance => {
                self.reselection_count += 1;
                progress::emit(
                    self.progress_callback.as_ref(),
                    ProgressMsg::Reselection {
                        error,
                        reselection_tolerance: self.params.reselection_tolerance,
                        count: self.reselection_count,
                    },
                );
                self.greedy_selection(values)?;
            }
            Some(_) => {}
        }

        if self.rbf.is_none() {
            let store = self.store.as_ref().ok_or(CoarseningError::NotComputed)?;
            self.rbf = Some(InterpolationOperator::new(
                store.rbf_function(),
                &self.rbf_settings,
                store.select_positions(&self.selection),
                store.positions_interpolation(),
            )?);
        }

        let rbf = self.rbf.as_ref().ok_or(CoarseningError::NotComputed)?;
        rbf.interpolate(&select_mat_rows(values, &self.selection))
    }
}

/// Interpolates with every source point as a centre.
#[derive(Debug, Default)]
pub struct NoCoarsening {
    rbf_settings: InterpolantSettings,
    store: Option<PointStore>,
    rbf: Option<InterpolationOperator>,
}

impl NoCoarsening {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the drift and nugget of the interpolant.
    pub fn rbf_settings(mut self, rbf_settings: InterpolantSettings) -> Self {
        self.rbf_settings = rbf_settings;
        self
    }
}

impl Coarsener for NoCoarsening {
    fn compute(
        &mut self,
        rbf_function: Arc<dyn RadialBasisFunction>,
        positions: Mat<f64>,
        positions_interpolation: Mat<f64>,
    ) -> CoarseningResult<()> {
        self.store = Some(PointStore::new(rbf_function, positions, positions_interpolation)?);
        self.rbf = None;
        Ok(())
    }

    fn initialized(&self) -> bool {
        self.rbf.is_some()
    }

    fn interpolate(&mut self, values: &Mat<f64>) -> CoarseningResult<Mat<f64>> {
        let store = self.store.as_ref().ok_or(CoarseningError::NotComputed)?;

        if store.is_empty() {
            return Err(CoarseningError::EmptyPositions);
        }

        let rbf = match self.rbf.take() {
            Some(rbf) => rbf,
            None => InterpolationOperator::new(
                store.rbf_function(),
                &self.rbf_settings,
                store.positions().clone(),
                store.positions_interpolation(),
            )?,
        };

        let result = rbf.interpolate(values);
        self.rbf = Some(rbf);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::{create_evaluation_grid, generate_random_points},
        config::FittingAccuracyType,
        progress::closure_sink,
        rbf::RBFInterpolant,
        rbf_test_functions::CoarseningTestFunctions,
    };
    use equator::assert;
    use faer::utils::approx::*;
    use rbf_coarsening_utils::kernels::CubicRbfKernel;
    use std::sync::Mutex;

    fn max_abs_diff(a: &Mat<f64>, b: &Mat<f64>) -> f64 {
        (0..a.nrows())
            .flat_map(|i| (0..a.ncols()).map(move |j| (i, j)))
            .fold(0.0, |acc, (i, j)| acc.max((a[(i, j)] - b[(i, j)]).abs()))
    }

    fn sine_session(params: CoarseningParams) -> (AdaptiveCoarsening, Mat<f64>, Mat<f64>) {
        let positions = create_evaluation_grid(&[(0.0, 1.0)], &[100]);
        let targets = create_evaluation_grid(&[(0.0, 1.0)], &[50]);

        let mut coarsening = AdaptiveCoarsening::new(params).unwrap();
        coarsening
            .compute(Arc::new(CubicRbfKernel), positions.clone(), targets.clone())
            .unwrap();

        (coarsening, positions, targets)
    }

    #[test]
    fn smooth_sine_is_reproduced_with_a_small_basis() {
        let params = CoarseningParams::builder()
            .tolerance(1e-3)
            .min_points(2)
            .max_points(20)
            .build();
        let (mut coarsening, positions, targets) = sine_session(params);
        let values = CoarseningTestFunctions::sine_wave(&positions, 1.0);

        assert!(!coarsening.initialized());
        assert!(coarsening.state() == CoarseningState::PointsLoaded);

        let mapped = coarsening.interpolate(&values).unwrap();
        let report = coarsening.last_report().unwrap().clone();

        assert!(coarsening.initialized());
        assert!(coarsening.state() == CoarseningState::BasisSelected);
        assert!(report.status == SelectionStatus::Converged);
        assert!(report.error <= 1e-3);
        assert!(report.basis_size <= 20);
        assert!(report.iterations <= 20 - 2 + 1);
        assert!(report.error_history.len() == report.iterations);
        assert!(*report.error_history.last().unwrap() <= 1e-3);
        assert!(report.error <= report.error_history[0]);

        let exact = CoarseningTestFunctions::sine_wave(&targets, 1.0);
        assert!(mapped.ncols() == 1);
        assert!(max_abs_diff(&mapped, &exact) <= 2e-3);
    }

    #[test]
    fn repeated_interpolation_reuses_the_basis() {
        let params = CoarseningParams::builder().tolerance(1e-3).min_points(2).build();
        let (mut coarsening, positions, _) = sine_session(params);
        let values = CoarseningTestFunctions::sine_wave(&positions, 1.0);

        let first = coarsening.interpolate(&values).unwrap();
        let selection = coarsening.selection().to_vec();
        let second = coarsening.interpolate(&values).unwrap();

        assert!(first == second);
        assert!(coarsening.selection() == selection.as_slice());
        assert!(coarsening.reselection_count() == 0);
    }

    #[test]
    fn changed_field_triggers_reselection() {
        let params = CoarseningParams::builder()
            .tolerance(1e-2)
            .reselection_tolerance(5e-2)
            .min_points(2)
            .max_points(50)
            .build();
        let (mut coarsening, positions, targets) = sine_session(params);

        let field_a = CoarseningTestFunctions::sine_wave(&positions, 1.0);
        let field_b = CoarseningTestFunctions::sine_wave(&positions, 3.0);

        coarsening.interpolate(&field_a).unwrap();
        let basis_a = coarsening.selection().to_vec();

        let mapped = coarsening.interpolate(&field_b).unwrap();
        let report = coarsening.last_report().unwrap();

        assert!(coarsening.reselection_count() == 1);
        assert!(coarsening.selection() != basis_a.as_slice());
        assert!(coarsening.selection().len() > basis_a.len());
        assert!(report.status == SelectionStatus::Converged);
        assert!(report.error <= 1e-2);

        let exact = CoarseningTestFunctions::sine_wave(&targets, 3.0);
        assert!(max_abs_diff(&mapped, &exact) <= 2e-2);
    }

    #[test]
    fn small_changes_keep_the_basis() {
        let params = CoarseningParams::builder()
            .tolerance(1e-3)
            .reselection_tolerance(1e-1)
            .min_points(2)
            .build();
        let (mut coarsening, positions, _) = sine_session(params);
        let values = CoarseningTestFunctions::sine_wave(&positions, 1.0);

        coarsening.interpolate(&values).unwrap();
        let selection = coarsening.selection().to_vec();

        let scaled = Mat::from_fn(values.nrows(), 1, |i, _| 1.5 * values[(i, 0)]);
        coarsening.interpolate(&scaled).unwrap();

        assert!(coarsening.reselection_count() == 0);
        assert!(coarsening.selection() == selection.as_slice());
    }

    #[test]
    fn noise_stops_at_max_points_and_reports_it() {
        let params = CoarseningParams::builder()
            .tolerance(1e-4)
            .min_points(3)
            .max_points(6)
            .build();

        let messages = Arc::new(Mutex::new(Vec::new()));
        let messages_clone = Arc::clone(&messages);
        let (sink, handle) = closure_sink(256, move |msg| {
            messages_clone.lock().unwrap().push(msg);
        });

        let mut coarsening = AdaptiveCoarsening::new(params).unwrap().progress_callback(sink);
        let positions = generate_random_points(60, 2, Some(5));
        let targets = generate_random_points(10, 2, Some(6));
        coarsening
            .compute(Arc::new(CubicRbfKernel), positions, targets)
            .unwrap();

        let values = CoarseningTestFunctions::seeded_noise(60, 1, 17);
        let mapped = coarsening.interpolate(&values).unwrap();

        assert!(mapped.nrows() == 10);
        assert!(coarsening.status() == Some(SelectionStatus::AccuracyNotMet));
        assert!(coarsening.selection().len() == 6);
        assert!(coarsening.last_report().unwrap().iterations == 4);

        drop(coarsening);
        handle.join().unwrap();

        let messages = messages.lock().unwrap();
        let iterations = messages
            .iter()
            .filter(|msg| matches!(msg, ProgressMsg::SelectionIteration { .. }))
            .count();
        assert!(iterations == 4);
        assert!(messages
            .iter()
            .any(|msg| matches!(msg, ProgressMsg::AccuracyNotMet { basis_size: 6, .. })));
    }

    #[test]
    fn basis_size_stays_within_bounds() {
        let positions = generate_random_points(80, 2, Some(21));
        let values = CoarseningTestFunctions::franke_2d(&positions);

        for (min_points, max_points) in [(1, 5), (4, 4), (10, 30)] {
            let params = CoarseningParams::builder()
                .tolerance(1e-3)
                .min_points(min_points)
                .max_points(max_points)
                .build();
            let mut coarsening = AdaptiveCoarsening::new(params).unwrap();
            coarsening
                .compute(Arc::new(CubicRbfKernel), positions.clone(), positions.clone())
                .unwrap();
            coarsening.interpolate(&values).unwrap();

            let size = coarsening.selection().len();
            assert!(size >= min_points);
            assert!(size <= max_points);
            assert!(coarsening.last_report().unwrap().iterations <= max_points - min_points + 1);
        }
    }

    #[test]
    fn all_points_selected_when_min_points_covers_them() {
        let positions = generate_random_points(6, 2, Some(2));
        let targets = generate_random_points(9, 2, Some(3));
        let values = CoarseningTestFunctions::seeded_noise(6, 2, 4);

        let params = CoarseningParams::builder().min_points(6).max_points(10).build();
        let mut coarsening = AdaptiveCoarsening::new(params).unwrap();
        coarsening
            .compute(Arc::new(CubicRbfKernel), positions.clone(), targets.clone())
            .unwrap();
        let mapped = coarsening.interpolate(&values).unwrap();

        assert!(coarsening.status() == Some(SelectionStatus::Converged));
        assert!(coarsening.last_report().unwrap().error < 1e-10);
        assert!(coarsening.selection().len() == 6);

        let full = RBFInterpolant::fit(
            Arc::new(CubicRbfKernel),
            &InterpolantSettings::default(),
            positions,
            &values,
        )
        .unwrap()
        .evaluate(&targets)
        .unwrap();

        let approx_eq = CwiseMat(ApproxEq::eps() * 1.0E7);
        assert!(mapped ~ full);
    }

    #[test]
    fn rigid_motion_needs_only_a_simplex() {
        let positions = generate_random_points(150, 3, Some(8));
        let targets = generate_random_points(40, 3, Some(9));
        let translation = [0.1, -0.2, 0.05];
        let values = CoarseningTestFunctions::rigid_rotation_3d(&positions, 0.3, translation);

        let params = CoarseningParams::builder()
            .tolerance(1e-6)
            .tolerance_type(FittingAccuracyType::Absolute)
            .build();
        let mut coarsening = AdaptiveCoarsening::new(params).unwrap();
        coarsening
            .compute(Arc::new(CubicRbfKernel), positions, targets.clone())
            .unwrap();
        let mapped = coarsening.interpolate(&values).unwrap();

        assert!(coarsening.status() == Some(SelectionStatus::Converged));
        assert!(coarsening.selection().len() <= 5);

        let exact = CoarseningTestFunctions::rigid_rotation_3d(&targets, 0.3, translation);
        assert!(max_abs_diff(&mapped, &exact) < 1e-8);
    }

    #[test]
    fn explicit_selection_replaces_the_basis() {
        let params = CoarseningParams::builder().tolerance(1e-3).min_points(2).build();
        let (mut coarsening, positions, _) = sine_session(params);

        let report = coarsening
            .greedy_selection(&CoarseningTestFunctions::sine_wave(&positions, 1.0))
            .unwrap();
        assert!(report.basis_size == coarsening.selection().len());
        assert!(coarsening.initialized());
        assert!(coarsening.selected_positions().unwrap().nrows() == report.basis_size);
    }

    #[test]
    fn failed_selection_leaves_no_stale_report() {
        let params = CoarseningParams::builder().tolerance(1e-3).min_points(2).build();
        let (mut coarsening, positions, _) = sine_session(params);
        let values = CoarseningTestFunctions::sine_wave(&positions, 1.0);

        coarsening.interpolate(&values).unwrap();
        assert!(coarsening.status() == Some(SelectionStatus::Converged));

        let result = coarsening.greedy_selection(&Mat::<f64>::zeros(3, 1));
        assert!(matches!(result, Err(CoarseningError::ValueRowMismatch { expected: 100, found: 3 })));

        assert!(!coarsening.initialized());
        assert!(coarsening.state() == CoarseningState::PointsLoaded);
        assert!(coarsening.selection().is_empty());
        assert!(coarsening.last_report().is_none());
        assert!(coarsening.status().is_none());

        coarsening.interpolate(&values).unwrap();
        assert!(coarsening.status() == Some(SelectionStatus::Converged));
    }

    #[test]
    fn duplicated_source_points_are_interpolated() {
        let distinct = generate_random_points(30, 2, Some(5));
        let positions = Mat::from_fn(60, 2, |i, j| distinct[(i % 30, j)]);
        let targets = generate_random_points(15, 2, Some(6));
        let values = CoarseningTestFunctions::franke_2d(&positions);

        let params = CoarseningParams::builder().min_points(40).build();
        let mut coarsening = AdaptiveCoarsening::new(params).unwrap();
        coarsening
            .compute(Arc::new(CubicRbfKernel), positions, targets.clone())
            .unwrap();
        let mapped = coarsening.interpolate(&values).unwrap();

        assert!(coarsening.initialized());
        assert!(coarsening.status() == Some(SelectionStatus::Converged));
        assert!(coarsening.selection().len() == 30);

        let full = RBFInterpolant::fit(
            Arc::new(CubicRbfKernel),
            &InterpolantSettings::default(),
            distinct.clone(),
            &CoarseningTestFunctions::franke_2d(&distinct),
        )
        .unwrap()
        .evaluate(&targets)
        .unwrap();

        assert!(max_abs_diff(&mapped, &full) < 1e-8);
    }

    #[test]
    fn compute_starts_a_new_session() {
        let params = CoarseningParams::builder().min_points(2).build();
        let (mut coarsening, positions, targets) = sine_session(params);
        coarsening
            .interpolate(&CoarseningTestFunctions::sine_wave(&positions, 1.0))
            .unwrap();

        coarsening
            .compute(Arc::new(CubicRbfKernel), positions, targets)
            .unwrap();

        assert!(!coarsening.initialized());
        assert!(coarsening.selection().is_empty());
        assert!(coarsening.last_report().is_none());
        assert!(coarsening.selected_positions().is_none());
    }

    #[test]
    fn precondition_violations_are_errors() {
        let mut coarsening = AdaptiveCoarsening::new(CoarseningParams::default()).unwrap();
        assert!(coarsening.state() == CoarseningState::Empty);
        assert!(matches!(
            coarsening.interpolate(&Mat::<f64>::zeros(3, 1)),
            Err(CoarseningError::NotComputed)
        ));

        coarsening
            .compute(Arc::new(CubicRbfKernel), Mat::zeros(0, 2), Mat::zeros(4, 2))
            .unwrap();
        assert!(!coarsening.initialized());
        assert!(matches!(
            coarsening.interpolate(&Mat::<f64>::zeros(0, 1)),
            Err(CoarseningError::EmptyPositions)
        ));

        let result = coarsening.compute(Arc::new(CubicRbfKernel), Mat::zeros(3, 2), Mat::zeros(4, 3));
        assert!(matches!(result, Err(CoarseningError::DimensionMismatch { .. })));

        let invalid = CoarseningParams::builder().min_points(5).max_points(2).build();
        assert!(matches!(
            AdaptiveCoarsening::new(invalid),
            Err(CoarseningError::InvalidParams(_))
        ));
    }

    #[test]
    fn no_coarsening_matches_full_interpolant() {
        let positions = generate_random_points(30, 2, Some(12));
        let targets = generate_random_points(12, 2, Some(13));
        let values = CoarseningTestFunctions::franke_2d(&positions);

        let mut coarsening = NoCoarsening::new();
        coarsening
            .compute(Arc::new(CubicRbfKernel), positions.clone(), targets.clone())
            .unwrap();
        assert!(!coarsening.initialized());

        let mapped = coarsening.interpolate(&values).unwrap();
        assert!(coarsening.initialized());

        let full = RBFInterpolant::fit(
            Arc::new(CubicRbfKernel),
            &InterpolantSettings::default(),
            positions,
            &values,
        )
        .unwrap()
        .evaluate(&targets)
        .unwrap();

        let approx_eq = CwiseMat(ApproxEq::eps() * 1.0E7);
        assert!(mapped ~ full);
    }
}
