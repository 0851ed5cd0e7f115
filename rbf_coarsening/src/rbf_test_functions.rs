/////////////////////////////////////////////////////////////////////////////////////////////
//
// Provides test fields for validating and demonstrating adaptive coarsening.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use faer::Mat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

/// Struct that implements scalar and vector fields used to exercise the
/// coarsening on smooth, localised, rough and rigid-body data.
pub struct CoarseningTestFunctions;

impl CoarseningTestFunctions {
    /// Sine wave along the first coordinate:
    /// $$ f(x) = \sin(2 \pi k x) $$
    /// where `k` is `frequency`.
    pub fn sine_wave(points: &Mat<f64>, frequency: f64) -> Mat<f64> {
        Mat::from_fn(points.nrows(), 1, |i, _| {
            (2.0 * PI * frequency * points[(i, 0)]).sin()
        })
    }

    /// Gaussian bump of the given `width` centred at `centre`:
    /// $$ f(\mathbf{x}) = \exp\left(-\frac{\lVert \mathbf{x} - \mathbf{c} \rVert^2}{w^2}\right) $$
    ///
    /// A small width gives a field that is flat almost everywhere, which a
    /// good basis resolves by clustering points around the bump.
    pub fn narrow_bump(points: &Mat<f64>, centre: &[f64], width: f64) -> Mat<f64> {
        assert_eq!(points.ncols(), centre.len());

        Mat::from_fn(points.nrows(), 1, |i, _| {
            let r2: f64 = centre
                .iter()
                .enumerate()
                .map(|(j, c)| (points[(i, j)] - c).powi(2))
                .sum();
            (-r2 / (width * width)).exp()
        })
    }

    /// Reproducible uniform noise in `[-1, 1)` with `components` columns.
    pub fn seeded_noise(n: usize, components: usize, seed: u64) -> Mat<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        Mat::from_fn(n, components, |_, _| rng.random_range(-1.0..1.0))
    }

    /// Franke's two-dimensional test function:
    /// <div>
    /// $$
    /// \begin{aligned}
    /// F(x,y) &=
    /// \tfrac{3}{4}\exp\!\left[-\frac{(9x-2)^2 + (9y-2)^2}{4}\right]
    /// + \tfrac{3}{4}\exp\!\left[-\frac{(9x+1)^2}{49} - \frac{(9y+1)^2}{10}\right] \\[6pt]
    /// &\quad+ \tfrac{1}{2}\exp\!\left[-\frac{(9x-7)^2 + (9y-3)^2}{4}\right]
    /// - \tfrac{1}{5}\exp\!\left[-(9x-4)^2 - (9y-7)^2\right]
    /// \end{aligned}
    /// $$
    /// </div>
    pub fn franke_2d(points: &Mat<f64>) -> Mat<f64> {
        assert_eq!(points.ncols(), 2);

        Mat::from_fn(points.nrows(), 1, |i, _| {
            let nx = 9.0 * points[(i, 0)];
            let ny = 9.0 * points[(i, 1)];

            let term1 = 0.75 * (-((nx - 2.0).powi(2) + (ny - 2.0).powi(2)) / 4.0).exp();
            let term2 = 0.75 * (-(nx + 1.0).powi(2) / 49.0 - (ny + 1.0).powi(2) / 10.0).exp();
            let term3 = 0.5 * (-((nx - 7.0).powi(2) + (ny - 3.0).powi(2)) / 4.0).exp();
            let term4 = -0.2 * (-(nx - 4.0).powi(2) - (ny - 7.0).powi(2)).exp();

            term1 + term2 + term3 + term4
        })
    }

    /// Displacement of a rigid body motion: a rotation by `angle` radians
    /// about the z axis through the origin, followed by `translation`.
    ///
    /// Returns one row `(dx, dy, dz)` per point.
    pub fn rigid_rotation_3d(points: &Mat<f64>, angle: f64, translation: [f64; 3]) -> Mat<f64> {
        assert_eq!(points.ncols(), 3);

        let (sin, cos) = angle.sin_cos();

        Mat::from_fn(points.nrows(), 3, |i, j| {
            let x = points[(i, 0)];
            let y = points[(i, 1)];
            let moved = match j {
                0 => cos * x - sin * y,
                1 => sin * x + cos * y,
                _ => points[(i, 2)],
            };
            moved - points[(i, j)] + translation[j]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use equator::assert;
    use faer::mat;

    #[test]
    fn franke_matches_reference_value() {
        let value = CoarseningTestFunctions::franke_2d(&mat![[0.5, 0.5f64]]);
        assert!((value[(0, 0)] - 0.1120115992).abs() < 1e-9);
    }

    #[test]
    fn rotation_keeps_distance_to_axis() {
        let points = mat![[1.0, 0.0, 2.0], [0.0, 3.0, -1.0f64]];
        let disp = CoarseningTestFunctions::rigid_rotation_3d(&points, PI / 2.0, [0.0; 3]);

        assert!((disp[(0, 0)] + 1.0).abs() < 1e-12);
        assert!((disp[(0, 1)] - 1.0).abs() < 1e-12);
        assert!(disp[(0, 2)] == 0.0);
        assert!((disp[(1, 0)] + 3.0).abs() < 1e-12);
        assert!((disp[(1, 1)] + 3.0).abs() < 1e-12);
    }

    #[test]
    fn noise_is_reproducible_and_bounded() {
        let a = CoarseningTestFunctions::seeded_noise(50, 2, 11);
        let b = CoarseningTestFunctions::seeded_noise(50, 2, 11);
        assert!(a == b);
        assert!((0..50).all(|i| (-1.0..1.0).contains(&a[(i, 1)])));
    }

    #[test]
    fn bump_peaks_at_centre() {
        let points = mat![[0.5, 0.5], [0.9, 0.1f64]];
        let values = CoarseningTestFunctions::narrow_bump(&points, &[0.5, 0.5], 0.05);
        assert!(values[(0, 0)] == 1.0);
        assert!(values[(1, 0)] < 1e-20);
    }
}
