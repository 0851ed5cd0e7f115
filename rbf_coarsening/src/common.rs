/////////////////////////////////////////////////////////////////////////////////////////////
//
// Defines shared helpers for random point generation, evaluation grids, and scaling utilities.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use faer::Mat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generate a matrix of random points in the unit hypercube.
///
/// # Parameters
/// - `n`: Number of points to generate (rows in the output matrix).
/// - `d`: Number of spatial dimensions per point (columns in the output matrix).
/// - `seed`: Optional random seed. `Some(seed)` gives a reproducible cloud,
///   `None` seeds from the operating system.
///
/// # Example
/// ```
/// use rbf_coarsening::generate_random_points;
///
/// let pts = generate_random_points(100, 3, Some(42));
/// assert_eq!(pts.ncols(), 3);
/// ```
pub fn generate_random_points(n: usize, d: usize, seed: Option<u64>) -> Mat<f64> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    Mat::from_fn(n, d, |_, _| rng.random_range(0.0..1.0))
}

/// Create a regular evaluation grid from per-dimension ranges and sample counts.
///
/// # Arguments
/// * `ranges` - Inclusive `(min, max)` range for each dimension.
/// * `counts` - Number of grid samples per range; must match `ranges.len()`.
///
/// # Returns
/// A `Mat<f64>` with one row per grid point and one column per dimension.
///
/// # Example
/// ```
/// use rbf_coarsening::create_evaluation_grid;
///
/// // 100 points on the unit interval, including both end points.
/// let line = create_evaluation_grid(&[(0.0, 1.0)], &[100]);
/// assert_eq!(line.nrows(), 100);
/// assert_eq!(line[(99, 0)], 1.0);
/// ```
pub fn create_evaluation_grid(ranges: &[(f64, f64)], counts: &[usize]) -> Mat<f64> {
    assert_eq!(ranges.len(), counts.len());

    let total_points: usize = counts.iter().product();

    Mat::from_fn(total_points, ranges.len(), |row_idx, col_idx| {
        let dim_points = counts[col_idx];
        let (start, end) = ranges[col_idx];

        if dim_points < 2 {
            return start;
        }

        let step = (end - start) / (dim_points as f64 - 1.0);
        let stride: usize = counts[..col_idx].iter().product();
        let index_in_dim = (row_idx / stride) % dim_points;

        start + step * index_in_dim as f64
    })
}

/// Returns the per-dimension translation and scale factors that map the
/// bounding box of `point_locations` onto the `[-1, 1]^d` cube.
///
/// Degenerate (flat) dimensions get a unit scale factor.
pub(crate) fn get_cheb_cube_scaling_factors(point_locations: &Mat<f64>) -> (Vec<f64>, Vec<f64>) {
    let dimensions = point_locations.ncols();
    let extents = rbf_coarsening_utils::get_pointarray_extents(point_locations);

    (0..dimensions)
        .map(|d| {
            let min_coord = extents[d];
            let max_coord = extents[d + dimensions];
            let half_width = (max_coord - min_coord) / 2.0;
            let scale = match half_width > 0.0 && half_width.is_finite() {
                true => half_width,
                false => 1.0,
            };
            ((max_coord + min_coord) / 2.0, scale)
        })
        .unzip()
}

/// Apply translation and scaling to map points into a normalized cube.
///
/// For each coordinate `x`, applies `(x - translation_factor[d]) / scale_factor[d]`.
pub(crate) fn scale_points(points: &mut Mat<f64>, translation_factor: &[f64], scale_factor: &[f64]) {
    points.row_iter_mut().for_each(|row| {
        row.iter_mut().enumerate().for_each(|(col_idx, element)| {
            *element = (*element - translation_factor[col_idx]) / scale_factor[col_idx];
        });
    });
}

/// Euclidean norm of every row of `values`.
pub(crate) fn row_norms(values: &Mat<f64>) -> Vec<f64> {
    values
        .row_iter()
        .map(|row| row.iter().map(|v| v * v).sum::<f64>().sqrt())
        .collect()
}

/// Returns `true` if every entry of `mat` is finite.
pub(crate) fn all_finite(mat: &Mat<f64>) -> bool {
    (0..mat.ncols()).all(|j| (0..mat.nrows()).all(|i| mat[(i, j)].is_finite()))
}

/// Copies the given columns of `mat` into a new matrix, in order.
pub(crate) fn select_mat_cols(mat: &Mat<f64>, col_indices: &[usize]) -> Mat<f64> {
    Mat::from_fn(mat.nrows(), col_indices.len(), |i, j| mat[(i, col_indices[j])])
}

#[cfg(test)]
mod tests {
    use super::*;
    use equator::assert;
    use faer::mat;

    #[test]
    fn scaling_maps_extents_to_unit_cube() {
        let mut points = mat![[2.0, 5.0], [4.0, 5.0], [3.0, 5.0f64]];
        let (translation, scale) = get_cheb_cube_scaling_factors(&points);

        assert!(translation == vec![3.0, 5.0]);
        assert!(scale == vec![1.0, 1.0]);

        scale_points(&mut points, &translation, &scale);
        assert!(points[(0, 0)] == -1.0);
        assert!(points[(1, 0)] == 1.0);
        assert!(points[(2, 1)] == 0.0);
    }

    #[test]
    fn grid_enumerates_first_dimension_fastest() {
        let grid = create_evaluation_grid(&[(0.0, 1.0), (10.0, 20.0)], &[2, 3]);
        assert!(grid.nrows() == 6);
        assert!(grid[(1, 0)] == 1.0);
        assert!(grid[(1, 1)] == 10.0);
        assert!(grid[(2, 1)] == 15.0);
        assert!(grid[(5, 1)] == 20.0);
    }

    #[test]
    fn random_points_are_reproducible() {
        let a = generate_random_points(20, 2, Some(7));
        let b = generate_random_points(20, 2, Some(7));
        assert!(a == b);
        assert!(a.col_iter().all(|c| c.iter().all(|v| (0.0..1.0).contains(v))));
    }

    #[test]
    fn column_selection_and_finiteness() {
        let mut values = mat![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0f64]];
        let picked = select_mat_cols(&values, &[2, 0]);
        assert!(picked == mat![[3.0, 1.0], [6.0, 4.0f64]]);

        assert!(all_finite(&values));
        values[(1, 1)] = f64::NAN;
        assert!(!all_finite(&values));
    }

    #[test]
    fn row_norms_are_euclidean() {
        let values = mat![[3.0, 4.0], [0.0, -2.0f64]];
        assert!(row_norms(&values) == vec![5.0, 2.0]);
    }
}
