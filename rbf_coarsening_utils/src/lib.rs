/////////////////////////////////////////////////////////////////////////////////////////////
//
// Re-exports kernel functions, kernel parameters, and matrix helpers used by rbf_coarsening.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! # Kernel utilities for the [`rbf_coarsening`] crate
//!
//! Provides the pluggable radial basis function capability
//! ([`RadialBasisFunction`]), the concrete kernels, a runtime kernel registry
//! ([`KernelType`] / [`KernelParams`]) and the dense kernel matrix assembly
//! routines consumed by the interpolation engine.
mod rbf_kernels;
mod traits;
mod utils;
mod kernel_helpers;

/// Implemented kernels for use in the [`rbf_coarsening`] crate.
pub mod kernels {
    pub use super::rbf_kernels::*;
}

pub use {
    kernel_helpers::{KernelParams, KernelParamsBuilder},
    traits::{KernelFromParams, KernelFunction, RadialBasisFunction},
    utils::{
        KernelType, argmax, build_kernel, get_a_matrix, get_a_matrix_symmetric,
        get_distance, get_pointarray_extents, kernel_phi, select_mat_rows,
    },
};
