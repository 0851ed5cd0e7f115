/////////////////////////////////////////////////////////////////////////////////////////////
//
// Supplies general-purpose utilities for matrices, distances, kernel matrices, and the kernel registry.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::{KernelFromParams, KernelFunction, KernelParams, RadialBasisFunction};
use faer::{Mat, RowRef};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Returns an owned `Mat<T>` from a subset of row indices.
///
/// # Examples
///
/// ```
/// use faer::mat;
/// use rbf_coarsening_utils::select_mat_rows;
///
/// let matrix = mat![
///     [0.0, 1.0],
///     [1.0, 1.0],
///     [2.0, 2.0],
///     [3.0, 3.0f64],
/// ];
///
/// let sub_matrix = select_mat_rows(&matrix, &[3, 0]);
///
/// assert_eq!(
///     sub_matrix,
///     mat![
///         [3.0, 3.0],
///         [0.0, 1.0f64],
///     ]
/// );
/// ```
#[inline(always)]
pub fn select_mat_rows<T>(existing_mat: &Mat<T>, row_indices: &[usize]) -> Mat<T>
where
    T: Clone,
{
    Mat::from_fn(row_indices.len(), existing_mat.ncols(), |i, j| {
        existing_mat.get(row_indices[i], j).clone()
    })
}

/// Returns the index and value of the largest entry of `data`.
///
/// Ties resolve to the lowest index and `NaN` entries are never selected.
/// Returns `None` for an empty slice or one containing only `NaN`.
///
/// # Examples
///
/// ```
/// use rbf_coarsening_utils::argmax;
///
/// assert_eq!(argmax(&[0.5, 2.0, -1.0, 2.0]), Some((1, 2.0)));
/// assert_eq!(argmax(&[]), None);
/// ```
#[inline(always)]
pub fn argmax(data: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;

    for (idx, &value) in data.iter().enumerate() {
        if value.is_nan() {
            continue;
        }
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((idx, value)),
        }
    }

    best
}

/// Computes the axis aligned bounding box (AABB) extents of a matrix of points.
///
/// The result is arranged as `[min_0, ..., min_n, max_0, ..., max_n]`
/// where `n` is the number of columns in the matrix.
///
/// # Examples
///
/// ```
/// use faer::mat;
/// use rbf_coarsening_utils::get_pointarray_extents;
///
/// let points = mat![
///     [1.0, 2.0],
///     [3.0, -1.0],
///     [0.5, 4.0f64]
/// ];
/// let extents = get_pointarray_extents(&points);
/// assert_eq!(extents, vec![0.5, -1.0, 3.0, 4.0]);
/// ```
#[inline(always)]
pub fn get_pointarray_extents(points: &Mat<f64>) -> Vec<f64> {
    let ncols = points.ncols();

    let mut extents = vec![f64::INFINITY; ncols];
    extents.extend(std::iter::repeat(f64::NEG_INFINITY).take(ncols));

    for row in points.row_iter() {
        for (col, item) in row.iter().enumerate() {
            extents[col] = extents[col].min(*item);
            extents[col + ncols] = extents[col + ncols].max(*item);
        }
    }

    extents
}

/// Calculates the euclidean distance between two points.
///
/// # Examples
///
/// ```
/// use faer::mat;
/// use rbf_coarsening_utils::get_distance;
///
/// let points = mat![
///     [1.0, 2.0],
///     [4.0, 6.0],
/// ];
///
/// assert_eq!(get_distance(points.row(0), points.row(1)), 5.0);
/// ```
#[inline(always)]
pub fn get_distance(target: RowRef<f64>, source: RowRef<f64>) -> f64 {
    let mut dist = 0.0;
    for (t, s) in target.iter().zip(source.iter()) {
        let diff = t - s;
        dist += diff * diff;
    }
    dist.sqrt()
}

/// Builds a dense `(targets x sources)` kernel matrix.
///
/// Columns are assembled in parallel.
pub fn get_a_matrix<K>(
    target_points: &Mat<f64>,
    source_points: &Mat<f64>,
    kernel_function: &K,
) -> Mat<f64>
where
    K: KernelFunction + Sync + ?Sized,
{
    let m = target_points.nrows();
    let n = source_points.nrows();

    let columns: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|j| {
            let source = source_points.row(j);
            (0..m)
                .map(|i| kernel_function.evaluate(target_points.row(i), source))
                .collect()
        })
        .collect();

    Mat::from_fn(m, n, |i, j| columns[j][i])
}

/// Builds the symmetric `(n x n)` kernel matrix of a point set with itself,
/// adding a nugget on the diagonal.
///
/// Only the lower triangle is evaluated; it is mirrored into the upper one.
pub fn get_a_matrix_symmetric<K>(points: &Mat<f64>, kernel_function: &K, nugget: f64) -> Mat<f64>
where
    K: KernelFunction + Sync + ?Sized,
{
    let n = points.nrows();

    let lower_columns: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|j| {
            let source = points.row(j);
            (j..n)
                .map(|i| kernel_function.evaluate(points.row(i), source))
                .collect()
        })
        .collect();

    let mut a_matrix = Mat::<f64>::zeros(n, n);

    for (j, column) in lower_columns.iter().enumerate() {
        for (offset, k_val) in column.iter().enumerate() {
            let i = j + offset;
            a_matrix[(i, j)] = *k_val;
            a_matrix[(j, i)] = *k_val;
        }
        a_matrix[(j, j)] += nugget;
    }

    a_matrix
}

// K-free dispatcher generated from the kernel registry below.
// Assumes each kernel type implements `KernelFromParams::from_params(&KernelParams) -> K`.
macro_rules! for_each_kernel {
    ( registry = [ $( ($V:ident, $Kty:path) ),* $(,)? ] ) => {

        /// Runtime kernel selector built from the kernel registry
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum KernelType {
            $( $V, )*
        }

        /// Instantiates the kernel selected by `params` as a shareable
        /// [`RadialBasisFunction`] capability.
        #[inline]
        pub fn build_kernel(params: &KernelParams) -> Arc<dyn RadialBasisFunction> {
            match params.kernel_type {
                $(
                    KernelType::$V => {
                        Arc::new(<$Kty as KernelFromParams>::from_params(params))
                    }
                ),*
            }
        }

        /// Evaluates the selected kernel function at distance `r`.
        #[inline(always)]
        pub fn kernel_phi(r: f64, params: &KernelParams) -> f64 {
            match params.kernel_type {
                $(
                    KernelType::$V => {
                        let k = <$Kty as KernelFromParams>::from_params(params);
                        k.phi(r)
                    }
                ),*
            }
        }
    };
}

for_each_kernel! {
    registry = [
        (LinearRbf,          crate::kernels::LinearRbfKernel),
        (ThinPlateSplineRbf, crate::kernels::ThinPlateSplineRbfKernel),
        (CubicRbf,           crate::kernels::CubicRbfKernel),
        (GaussianRbf,        crate::kernels::GaussianRbfKernel),
        (WendlandC0Rbf,      crate::kernels::WendlandC0RbfKernel),
        (WendlandC2Rbf,      crate::kernels::WendlandC2RbfKernel),
        (WendlandC4Rbf,      crate::kernels::WendlandC4RbfKernel),
        (WendlandC6Rbf,      crate::kernels::WendlandC6RbfKernel),
    ]
}
