/////////////////////////////////////////////////////////////////////////////////////////////
//
// Exposes the public API and high-level documentation for adaptive RBF coarsening.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! # Adaptive coarsening of Radial Basis Function (RBF) interpolation.
//!
//! RBF interpolation transfers data between non-matching point clouds, for
//! example displacements from a fluid-structure interface onto a volume mesh
//! or loads between two coupled solvers. A dense RBF system over `N` source
//! points costs **O(N³)** to factorise and **O(N·M)** to evaluate at `M`
//! targets, which quickly becomes the bottleneck of a coupled simulation.
//!
//! Most fields that are transferred are smooth, and can be reproduced
//! accurately from a small subset of the source points. This crate selects
//! that subset greedily (following `1`):
//!
//! 1. Start from a few well-spread seed points.
//! 2. Build an interpolant on the current subset and evaluate it at every
//!    source point.
//! 3. If the largest error is within the tolerance, stop. Otherwise add the
//!    worst point and repeat, up to a maximum subset size.
//!
//! The interpolant on the accepted subset then maps the field onto the
//! targets. The subset is reused for later fields over the same points, and
//! selected again only when it no longer fits them.
//!
//! # Features
//! - Supports 1D, 2D, and 3D point clouds
//! - Scalar and vector valued fields
//! - Relative or absolute max-norm error control
//! - Polynomial drift with automatic rank reduction for degenerate subsets
//! - Coincident source points are kept out of the subset
//! - Built on [`faer`](https://docs.rs/faer/latest/faer/) for linear algebra
//!
//! # Examples
//!
//! ```
//! use rbf_coarsening::{
//!     AdaptiveCoarsening, Coarsener, CoarseningTestFunctions,
//!     config::{CoarseningParams, FittingAccuracyType},
//!     generate_random_points,
//!     kernels::CubicRbfKernel,
//! };
//! use std::sync::Arc;
//!
//! // Source and target clouds in the unit square
//! let source_points = generate_random_points(400, 2, Some(42));
//! let target_points = generate_random_points(50, 2, Some(7));
//!
//! // Assign some values to the source points using Franke's function
//! let source_values = CoarseningTestFunctions::franke_2d(&source_points);
//!
//! let params = CoarseningParams::builder()
//!     .tolerance(1e-3)
//!     .tolerance_type(FittingAccuracyType::Absolute)
//!     .max_points(200)
//!     .build();
//!
//! let mut coarsening = AdaptiveCoarsening::new(params)?;
//! coarsening.compute(Arc::new(CubicRbfKernel), source_points, target_points)?;
//!
//! let target_values = coarsening.interpolate(&source_values)?;
//! assert_eq!(target_values.nrows(), 50);
//!
//! let report = coarsening.last_report().unwrap();
//! println!("{} of 400 points selected, error {:.2e}", report.basis_size, report.error);
//! # Ok::<(), rbf_coarsening::CoarseningError>(())
//! ```
//!
//! # References
//! 1.  T. C. S. Rendall and C. B. Allen. Reduced surface point selection options for
//!     efficient mesh deformation using radial basis functions. Journal of
//!     Computational Physics, 229(8):2810–2820, 2010.
//! 2.  Fasshauer, G., 2007. Meshfree Approximation Methods with Matlab. World Scientific Publishing Co.
pub mod interpolant_config;

mod common;

mod rbf;

mod polynomials;

mod linalg;

mod point_store;

mod error_estimator;

mod greedy;

mod coarsening;

mod errors;

pub mod progress;

pub mod config;

mod rbf_test_functions;

pub use rbf_coarsening_utils::kernels;

pub use {
    coarsening::{AdaptiveCoarsening, Coarsener, CoarseningState, NoCoarsening},
    common::{create_evaluation_grid, generate_random_points},
    error_estimator::{compute_error, ErrorEstimate},
    errors::{CoarseningError, CoarseningResult, ParamsIOError},
    greedy::{SelectionReport, SelectionStatus},
    point_store::PointStore,
    rbf::{Coefficients, InterpolationOperator, RBFInterpolant, RbfSystem},
    rbf_coarsening_utils::{build_kernel, KernelParams, KernelType, RadialBasisFunction},
    rbf_test_functions::CoarseningTestFunctions,
};
