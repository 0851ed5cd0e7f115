/////////////////////////////////////////////////////////////////////////////////////////////
//
// Implements the concrete radial basis functions used for mesh motion interpolation.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::{KernelFromParams, KernelParams, RadialBasisFunction};
use std::fmt::Debug;

/// Linear RBF kernel with `phi(r) = -r`.
#[derive(Clone, Debug, Copy)]
pub struct LinearRbfKernel;

impl RadialBasisFunction for LinearRbfKernel {
    #[inline(always)]
    fn phi(&self, r: f64) -> f64 {
        -r
    }

    fn min_polynomial_degree(&self) -> i32 {
        0
    }
}

impl KernelFromParams for LinearRbfKernel {
    #[inline(always)]
    fn from_params(_: &KernelParams) -> Self {
        LinearRbfKernel
    }
}

/// Thin plate spline RBF kernel with `phi(r) = r^2 log r`.
#[derive(Clone, Debug, Copy)]
pub struct ThinPlateSplineRbfKernel;

impl RadialBasisFunction for ThinPlateSplineRbfKernel {
    #[inline(always)]
    fn phi(&self, r: f64) -> f64 {
        match r.abs() < f64::EPSILON {
            true => 0.0,
            false => r.powi(2) * r.ln(),
        }
    }

    fn min_polynomial_degree(&self) -> i32 {
        1
    }
}

impl KernelFromParams for ThinPlateSplineRbfKernel {
    #[inline(always)]
    fn from_params(_: &KernelParams) -> Self {
        ThinPlateSplineRbfKernel
    }
}

/// Cubic RBF kernel with `phi(r) = r^3`.
#[derive(Clone, Debug, Copy)]
pub struct CubicRbfKernel;

impl RadialBasisFunction for CubicRbfKernel {
    #[inline(always)]
    fn phi(&self, r: f64) -> f64 {
        r.powi(3)
    }

    fn min_polynomial_degree(&self) -> i32 {
        1
    }
}

impl KernelFromParams for CubicRbfKernel {
    #[inline(always)]
    fn from_params(_: &KernelParams) -> Self {
        CubicRbfKernel
    }
}

/// Gaussian RBF kernel with `phi(r) = exp(-(eps r)^2)`.
#[derive(Clone, Debug, Copy)]
pub struct GaussianRbfKernel {
    pub shape_parameter: f64,
}

impl RadialBasisFunction for GaussianRbfKernel {
    #[inline(always)]
    fn phi(&self, r: f64) -> f64 {
        let er = self.shape_parameter * r;
        (-er * er).exp()
    }
}

impl KernelFromParams for GaussianRbfKernel {
    #[inline(always)]
    fn from_params(p: &KernelParams) -> Self {
        GaussianRbfKernel {
            shape_parameter: p.shape_parameter,
        }
    }
}

/// Compile-time smoothness of a Wendland compactly supported kernel.
pub trait WendlandSmoothness {
    /// Evaluates the kernel on the normalised distance `xi = r / radius`, `0 <= xi < 1`.
    fn eval_normalised(xi: f64) -> f64;
}

#[doc(hidden)]
#[derive(Copy, Clone, Debug)]
pub struct C0;

#[doc(hidden)]
#[derive(Copy, Clone, Debug)]
pub struct C2;

#[doc(hidden)]
#[derive(Copy, Clone, Debug)]
pub struct C4;

#[doc(hidden)]
#[derive(Copy, Clone, Debug)]
pub struct C6;

impl WendlandSmoothness for C0 {
    #[inline(always)]
    fn eval_normalised(xi: f64) -> f64 {
        (1.0 - xi).powi(2)
    }
}

impl WendlandSmoothness for C2 {
    #[inline(always)]
    fn eval_normalised(xi: f64) -> f64 {
        (1.0 - xi).powi(4) * (4.0 * xi + 1.0)
    }
}

impl WendlandSmoothness for C4 {
    #[inline(always)]
    fn eval_normalised(xi: f64) -> f64 {
        (1.0 - xi).powi(6) * (35.0 / 3.0 * xi * xi + 6.0 * xi + 1.0)
    }
}

impl WendlandSmoothness for C6 {
    #[inline(always)]
    fn eval_normalised(xi: f64) -> f64 {
        (1.0 - xi).powi(8) * (32.0 * xi.powi(3) + 25.0 * xi * xi + 8.0 * xi + 1.0)
    }
}

/// Wendland compactly supported RBF kernel, zero beyond `support_radius`.
///
/// Strictly positive definite in up to three dimensions, so the resulting
/// systems need no polynomial drift and are sparse for small radii.
#[derive(Clone, Debug, Copy)]
pub struct WendlandRbfKernel<S: WendlandSmoothness> {
    pub support_radius: f64,
    inv_radius: f64,
    _smoothness: core::marker::PhantomData<S>,
}

impl<S: WendlandSmoothness> WendlandRbfKernel<S> {
    #[inline(always)]
    pub fn new(support_radius: f64) -> Self {
        Self {
            support_radius,
            inv_radius: 1.0 / support_radius,
            _smoothness: core::marker::PhantomData,
        }
    }
}

impl<S: WendlandSmoothness + Debug + Send + Sync> RadialBasisFunction for WendlandRbfKernel<S> {
    #[inline(always)]
    fn phi(&self, r: f64) -> f64 {
        let xi = r * self.inv_radius;
        match xi >= 1.0 {
            true => 0.0,
            false => S::eval_normalised(xi),
        }
    }
}

impl<S: WendlandSmoothness> KernelFromParams for WendlandRbfKernel<S> {
    #[inline(always)]
    fn from_params(p: &KernelParams) -> Self {
        Self::new(p.support_radius)
    }
}

/// Wendland C0 kernel type alias.
pub type WendlandC0RbfKernel = WendlandRbfKernel<C0>;
/// Wendland C2 kernel type alias.
pub type WendlandC2RbfKernel = WendlandRbfKernel<C2>;
/// Wendland C4 kernel type alias.
pub type WendlandC4RbfKernel = WendlandRbfKernel<C4>;
/// Wendland C6 kernel type alias.
pub type WendlandC6RbfKernel = WendlandRbfKernel<C6>;
