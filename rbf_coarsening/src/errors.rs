/////////////////////////////////////////////////////////////////////////////////////////////
//
// Defines the error types returned by the coarsening controllers and the interpolation engine.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! Error types for coarsening and interpolation.
//!
//! Only precondition violations and numerical breakdowns are errors. A
//! greedy selection that stops at `max_points` without reaching the
//! tolerance is a normal outcome, reported through
//! [`SelectionStatus::AccuracyNotMet`](crate::SelectionStatus::AccuracyNotMet).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for coarsening operations.
pub type CoarseningResult<T> = Result<T, CoarseningError>;

/// Errors raised by the coarsening controllers and the interpolation engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoarseningError {
    /// Field values were supplied but the session holds no source points.
    #[error("no source positions have been supplied to the coarsening session")]
    EmptyPositions,

    /// `interpolate` or `greedy_selection` was called before `compute`.
    #[error("coarsening session has not been computed; call compute first")]
    NotComputed,

    /// Source and target point sets have a different number of coordinates.
    #[error("dimension mismatch: positions have {positions} columns, interpolation positions have {interpolation}")]
    DimensionMismatch { positions: usize, interpolation: usize },

    /// Point sets must have 1, 2 or 3 coordinates.
    #[error("unsupported number of dimensions: {0}")]
    UnsupportedDimensions(usize),

    /// The number of value rows does not match the number of points.
    #[error("value row mismatch: expected {expected} rows, found {found}")]
    ValueRowMismatch { expected: usize, found: usize },

    /// Rejected coarsening parameters.
    #[error("invalid coarsening parameters: {0}")]
    InvalidParams(String),

    /// Rejected interpolation settings.
    #[error("invalid interpolant settings: {0}")]
    InvalidSettings(String),

    /// The RBF system over the given centres could not be solved.
    #[error("RBF system over {centres} centres is singular or numerically ill-conditioned")]
    SingularSystem { centres: usize },
}

/// Errors that can occur when saving or loading [`CoarseningParams`](crate::config::CoarseningParams).
#[derive(Debug, Error)]
pub enum ParamsIOError {
    /// Failed to create the target file before writing.
    #[error("creating {}: {source}", path.display())]
    Create { path: PathBuf, source: io::Error },

    /// Failed to open an existing parameters file.
    #[error("opening {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    /// Failed to flush buffered output when finishing a write.
    #[error("flushing {}: {source}", path.display())]
    Flush { path: PathBuf, source: io::Error },

    /// Error serializing the parameters to JSON.
    #[error("serializing JSON to {}: {source}", path.display())]
    Serialize { path: PathBuf, source: serde_json::Error },

    /// Error parsing JSON when reading parameters.
    #[error("parsing JSON in {}: {source}", path.display())]
    Parse { path: PathBuf, source: serde_json::Error },

    /// The JSON `format` field does not match the expected format.
    #[error("unsupported format {found:?} (expected {expected:?}) in {}", path.display())]
    FormatMismatch { path: PathBuf, found: String, expected: &'static str },

    /// The JSON `version` field does not match the supported version.
    #[error("unsupported version {found} (expected {expected}) in {}", path.display())]
    VersionMismatch { path: PathBuf, found: u32, expected: u32 },

    /// The loaded parameters failed validation.
    #[error("invalid parameters in {}: {source}", path.display())]
    Invalid { path: PathBuf, source: CoarseningError },
}
