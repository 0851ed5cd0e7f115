/////////////////////////////////////////////////////////////////////////////////////////////
//
// Specifies drift and smoothing options for configuring the RBF interpolation engine.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! Specifies drift and smoothing options for configuring the RBF interpolation engine.
use crate::errors::{CoarseningError, CoarseningResult};
use rbf_coarsening_utils::RadialBasisFunction;
use serde::{Deserialize, Serialize};

/// Polynomial drift term appended to the RBF system.
///
/// Conditionally positive definite kernels (linear, thin plate spline,
/// cubic) need at least a constant or linear drift for the system to be
/// uniquely solvable. A linear drift also lets the interpolant reproduce
/// rigid translations and rotations exactly, which is usually wanted for
/// mesh motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Drift {
    /// Use the lowest degree the kernel requires.
    Auto,
    None,
    Constant,
    Linear,
    Quadratic,
}

impl Drift {
    fn degree(&self) -> Option<i32> {
        match self {
            Drift::Auto => None,
            Drift::None => Some(-1),
            Drift::Constant => Some(0),
            Drift::Linear => Some(1),
            Drift::Quadratic => Some(2),
        }
    }
}

/// A convenience builder for constructing an [`InterpolantSettings`] instance.
///
/// The builder should be called via the [`InterpolantSettings::builder`] method.
#[derive(Debug, Clone, Copy)]
pub struct InterpolantSettingsBuilder {
    pub drift: Drift,
    pub nugget: f64,
}

impl InterpolantSettingsBuilder {
    fn new() -> Self {
        Self {
            drift: Drift::Auto,
            nugget: 0.0,
        }
    }

    /// Sets the drift term.
    pub fn drift(mut self, drift: Drift) -> Self {
        self.drift = drift;
        self
    }

    /// Sets the nugget (smoothing) value.
    pub fn nugget(mut self, nugget: f64) -> Self {
        self.nugget = nugget;
        self
    }

    /// Builds and returns an instance of [`InterpolantSettings`].
    pub fn build(self) -> InterpolantSettings {
        InterpolantSettings {
            drift: self.drift,
            nugget: self.nugget,
        }
    }
}

/// Settings of the interpolation engine that are independent of the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterpolantSettings {
    /// The polynomial drift term added to the RBF system.
    pub drift: Drift,

    /// Optional smoothing parameter. A value of `0.0` (default) enforces an exact
    /// fit at the centres. Larger values soften the fit.
    pub nugget: f64,
}

impl Default for InterpolantSettings {
    fn default() -> Self {
        InterpolantSettingsBuilder::new().build()
    }
}

impl InterpolantSettings {
    /// Returns a new [`InterpolantSettingsBuilder`].
    pub fn builder() -> InterpolantSettingsBuilder {
        InterpolantSettingsBuilder::new()
    }

    /// Resolves the polynomial degree used with `kernel`.
    ///
    /// Returns `-1` for no polynomial. Fails if an explicit drift is below
    /// the minimum degree the kernel needs, or the nugget is negative.
    pub fn polynomial_degree(&self, kernel: &dyn RadialBasisFunction) -> CoarseningResult<i32> {
        if !(self.nugget >= 0.0) || !self.nugget.is_finite() {
            return Err(CoarseningError::InvalidSettings(format!(
                "nugget must be finite and non-negative, got {}",
                self.nugget
            )));
        }

        let min_degree = kernel.min_polynomial_degree();

        match self.drift.degree() {
            None => Ok(min_degree),
            Some(degree) if degree >= min_degree => Ok(degree),
            Some(degree) => Err(CoarseningError::InvalidSettings(format!(
                "drift degree {} is below the minimum degree {} required by kernel {:?}",
                degree, min_degree, kernel
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use equator::assert;
    use rbf_coarsening_utils::kernels::{CubicRbfKernel, LinearRbfKernel, WendlandC2RbfKernel};

    #[test]
    fn auto_drift_follows_kernel_minimum() {
        let settings = InterpolantSettings::default();
        assert!(settings.polynomial_degree(&CubicRbfKernel).ok() == Some(1));
        assert!(settings.polynomial_degree(&LinearRbfKernel).ok() == Some(0));
        assert!(settings.polynomial_degree(&WendlandC2RbfKernel::new(1.0)).ok() == Some(-1));
    }

    #[test]
    fn explicit_drift_above_minimum_is_kept() {
        let settings = InterpolantSettings::builder().drift(Drift::Linear).build();
        assert!(settings.polynomial_degree(&WendlandC2RbfKernel::new(1.0)).ok() == Some(1));
    }

    #[test]
    fn drift_below_minimum_is_rejected() {
        let settings = InterpolantSettings::builder().drift(Drift::None).build();
        assert!(matches!(
            settings.polynomial_degree(&CubicRbfKernel),
            Err(CoarseningError::InvalidSettings(_))
        ));
    }

    #[test]
    fn negative_nugget_is_rejected() {
        let settings = InterpolantSettings::builder().nugget(-1.0).build();
        assert!(settings.polynomial_degree(&CubicRbfKernel).is_err());
    }
}
