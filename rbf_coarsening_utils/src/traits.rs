/////////////////////////////////////////////////////////////////////////////////////////////
//
// Declares the radial basis function capability and the kernel evaluation traits.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::kernel_helpers::KernelParams;
use faer::RowRef;
use std::fmt::Debug;

/// A radial basis function `phi(r)`, mapping a distance to a weight.
///
/// This is the kernel capability handed to the coarsening controller. The
/// controller never inspects it; it is only passed through to the
/// interpolation engine, which is why it is shared as
/// `Arc<dyn RadialBasisFunction>`.
pub trait RadialBasisFunction: Debug + Send + Sync {
    /// Evaluates the kernel at distance `r >= 0`.
    fn phi(&self, r: f64) -> f64;

    /// Lowest polynomial drift degree for which the augmented RBF system is
    /// uniquely solvable. `-1` means the kernel is strictly positive definite
    /// and needs no polynomial.
    fn min_polynomial_degree(&self) -> i32 {
        -1
    }
}

/// Evaluates a kernel function between a target and source point.
///
/// Every [`RadialBasisFunction`] is a [`KernelFunction`] through the
/// Euclidean distance between the two rows.
pub trait KernelFunction {
    fn evaluate(&self, target: RowRef<f64>, source: RowRef<f64>) -> f64;
}

impl<T: RadialBasisFunction + ?Sized> KernelFunction for T {
    #[inline(always)]
    fn evaluate(&self, target: RowRef<f64>, source: RowRef<f64>) -> f64 {
        self.phi(crate::get_distance(target, source))
    }
}

/// Converts a shared [`KernelParams`] configuration into a concrete kernel type.
pub trait KernelFromParams: Sized {
    /// Constructs `Self` from a set of uniform kernel parameters.
    fn from_params(p: &KernelParams) -> Self;
}
