/////////////////////////////////////////////////////////////////////////////////////////////
//
// Provides parameter and builder types for configuring RBF kernels.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use serde::{Deserialize, Serialize};
use crate::utils::KernelType;

/// Defines the [`KernelType`] to use, along with parameter values for the
/// kernels that need them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KernelParams {
    /// KernelType enum variant to use.
    pub kernel_type: KernelType,

    /// Radius beyond which a compactly supported kernel is zero.
    ///
    /// Typically a few times the largest expected displacement, or the
    /// diameter of the moving boundary.
    /// Only used in Wendland kernels.
    pub support_radius: f64,

    /// Controls how quickly the kernel decays with distance. Larger values
    /// give more local influence and better conditioned systems.
    /// Only used in the Gaussian kernel.
    pub shape_parameter: f64,
}

impl KernelParams {
    /// Begins building a [`KernelParams`] instance for the given kernel type.
    pub fn builder(kernel_type: KernelType) -> KernelParamsBuilder {
        KernelParamsBuilder {
            kernel_type,
            support_radius: 1.0,
            shape_parameter: 1.0,
        }
    }
}

/// Builder for [`KernelParams`] that provides sensible defaults.
#[derive(Debug, Clone, Copy)]
pub struct KernelParamsBuilder {
    kernel_type: KernelType,
    support_radius: f64,
    shape_parameter: f64,
}

impl KernelParamsBuilder {
    /// Sets the `support_radius` parameter on the builder.
    pub fn support_radius(mut self, v: f64) -> Self {
        self.support_radius = v;
        self
    }

    /// Sets the `shape_parameter` parameter on the builder.
    pub fn shape_parameter(mut self, v: f64) -> Self {
        self.shape_parameter = v;
        self
    }

    /// Finalises the builder into a [`KernelParams`] value.
    ///
    /// # Panics
    /// If `support_radius` or `shape_parameter` is not strictly positive.
    pub fn build(self) -> KernelParams {
        assert!(self.support_radius > 0.0, "support_radius must be positive");
        assert!(self.shape_parameter > 0.0, "shape_parameter must be positive");
        KernelParams {
            kernel_type: self.kernel_type,
            support_radius: self.support_radius,
            shape_parameter: self.shape_parameter,
        }
    }
}
