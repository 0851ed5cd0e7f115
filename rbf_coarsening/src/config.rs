/////////////////////////////////////////////////////////////////////////////////////////////
//
// Declares the tolerance and basis-size configuration for adaptive coarsening.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! Declares the tolerance and basis-size configuration for adaptive coarsening.
use crate::errors::{CoarseningError, CoarseningResult, ParamsIOError};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

/// Defines whether the coarsening error is measured relative to the field
/// magnitude or in absolute units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FittingAccuracyType {
    /// The worst residual is divided by the largest value norm of the field.
    Relative,

    /// The worst residual must be less than this fixed amount in the same
    /// units as the field values.
    Absolute,
}

/// Defines how closely the coarse interpolant must reproduce the field at
/// every source point.
///
/// The error is the maximum over all source points of the Euclidean norm of
/// the residual row, so the bound holds uniformly rather than on average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FittingAccuracy {
    pub tolerance: f64,
    pub tolerance_type: FittingAccuracyType,
}

impl Default for FittingAccuracy {
    fn default() -> Self {
        FittingAccuracy {
            tolerance: 1E-3,
            tolerance_type: FittingAccuracyType::Relative,
        }
    }
}

/// Parameters controlling the greedy selection of a coarse RBF basis.
///
/// A basis is accepted once its error is within `tolerance` and it holds at
/// least `min_points` points. Selection stops early, without meeting the
/// tolerance, once the basis reaches `max_points`. Both bounds are clamped to
/// the number of available source points.
///
/// When a previously selected basis is reused for new values and its error
/// exceeds `reselection_tolerance`, the basis is discarded and selected again
/// from scratch.
///
/// # Defaults
/// | Field                   | Default             |
/// |-------------------------|---------------------|
/// | `tolerance`             | `1e-3`, relative    |
/// | `reselection_tolerance` | `1e-1`              |
/// | `min_points`            | `1`                 |
/// | `max_points`            | `1000`              |
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoarseningParams {
    /// Target accuracy of an acceptable coarse basis.
    pub tolerance: FittingAccuracy,

    /// Error of an existing basis on new values above which the basis is
    /// discarded and selected again from scratch. Measured with the same
    /// [`FittingAccuracyType`] as `tolerance`.
    pub reselection_tolerance: f64,

    /// Minimum number of points in the basis.
    pub min_points: usize,

    /// Maximum number of points in the basis.
    pub max_points: usize,
}

impl Default for CoarseningParams {
    fn default() -> Self {
        CoarseningParamsBuilder::new().build()
    }
}

impl CoarseningParams {
    /// Returns a new [`CoarseningParamsBuilder`] populated with defaults.
    pub fn builder() -> CoarseningParamsBuilder {
        CoarseningParamsBuilder::new()
    }

    /// Checks the parameters for consistency.
    pub fn validate(&self) -> CoarseningResult<()> {
        let tol = self.tolerance.tolerance;

        if !(tol.is_finite() && tol > 0.0) {
            return Err(CoarseningError::InvalidParams(format!(
                "tolerance must be finite and positive, got {}",
                tol
            )));
        }
        if !self.reselection_tolerance.is_finite() || self.reselection_tolerance < tol {
            return Err(CoarseningError::InvalidParams(format!(
                "reselection tolerance {} must be finite and at least the tolerance {}",
                self.reselection_tolerance, tol
            )));
        }
        if self.min_points == 0 {
            return Err(CoarseningError::InvalidParams(
                "min_points must be at least 1".to_string(),
            ));
        }
        if self.max_points < self.min_points {
            return Err(CoarseningError::InvalidParams(format!(
                "max_points {} is smaller than min_points {}",
                self.max_points, self.min_points
            )));
        }

        Ok(())
    }

    /// Save the parameters to a versioned **JSON envelope** `{ format, version, ... }`.
    ///
    /// ### Example
    /// ```no_run
    /// # use rbf_coarsening::config::CoarseningParams;
    /// let params = CoarseningParams::builder().tolerance(1e-4).build();
    /// params.save_json("coarsening.json")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), ParamsIOError> {
        let path_ref = path.as_ref();
        let file = File::create(path_ref).map_err(|e| ParamsIOError::Create {
            path: path_ref.to_path_buf(),
            source: e,
        })?;
        let mut w = BufWriter::new(file);

        let env = JsonEnvelopeRef {
            format: JSON_FORMAT_NAME,
            version: JSON_VERSION,
            params: self,
        };

        serde_json::to_writer_pretty(&mut w, &env).map_err(|e| ParamsIOError::Serialize {
            path: path_ref.to_path_buf(),
            source: e,
        })?;
        w.flush().map_err(|e| ParamsIOError::Flush {
            path: path_ref.to_path_buf(),
            source: e,
        })?;
        Ok(())
    }

    /// Load parameters from a versioned **JSON envelope**, validating format,
    /// version and the parameters themselves.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, ParamsIOError> {
        let path_ref = path.as_ref();

        let file = File::open(path_ref).map_err(|e| ParamsIOError::Open {
            path: path_ref.to_path_buf(),
            source: e,
        })?;
        let reader = BufReader::new(file);

        let env: JsonEnvelopeOwned =
            serde_json::from_reader(reader).map_err(|e| ParamsIOError::Parse {
                path: path_ref.to_path_buf(),
                source: e,
            })?;

        if env.format != JSON_FORMAT_NAME {
            return Err(ParamsIOError::FormatMismatch {
                path: path_ref.to_path_buf(),
                found: env.format,
                expected: JSON_FORMAT_NAME,
            });
        }

        if env.version != JSON_VERSION {
            return Err(ParamsIOError::VersionMismatch {
                path: path_ref.to_path_buf(),
                found: env.version,
                expected: JSON_VERSION,
            });
        }

        env.params.validate().map_err(|e| ParamsIOError::Invalid {
            path: path_ref.to_path_buf(),
            source: e,
        })?;

        Ok(env.params)
    }
}

/// A convenience builder for constructing a [`CoarseningParams`] instance.
///
/// The builder should be called via the [`CoarseningParams::builder`] method.
///
/// See [`CoarseningParams`] for details on each field.
#[derive(Debug, Clone, Copy)]
pub struct CoarseningParamsBuilder {
    pub tolerance: FittingAccuracy,
    pub reselection_tolerance: f64,
    pub min_points: usize,
    pub max_points: usize,
}

impl CoarseningParamsBuilder {
    fn new() -> Self {
        Self {
            tolerance: FittingAccuracy::default(),
            reselection_tolerance: 1E-1,
            min_points: 1,
            max_points: 1000,
        }
    }

    /// Sets the target tolerance, keeping the tolerance type.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance.tolerance = tolerance;
        self
    }

    /// Sets whether errors are measured relative to the field or absolutely.
    pub fn tolerance_type(mut self, tolerance_type: FittingAccuracyType) -> Self {
        self.tolerance.tolerance_type = tolerance_type;
        self
    }

    /// Sets the reselection trigger threshold.
    pub fn reselection_tolerance(mut self, reselection_tolerance: f64) -> Self {
        self.reselection_tolerance = reselection_tolerance;
        self
    }

    /// Sets the minimum basis size.
    pub fn min_points(mut self, min_points: usize) -> Self {
        self.min_points = min_points;
        self
    }

    /// Sets the maximum basis size.
    pub fn max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points;
        self
    }

    /// Builds and returns a [`CoarseningParams`] instance. Validation happens
    /// when the parameters are handed to a controller.
    pub fn build(self) -> CoarseningParams {
        CoarseningParams {
            tolerance: self.tolerance,
            reselection_tolerance: self.reselection_tolerance,
            min_points: self.min_points,
            max_points: self.max_points,
        }
    }
}

const JSON_FORMAT_NAME: &str = "rbf_coarsening.params.json";
const JSON_VERSION: u32 = 1;

/// Borrowing envelope for SAVE.
#[derive(Serialize)]
struct JsonEnvelopeRef<'a> {
    format: &'static str,
    version: u32,
    #[serde(flatten)]
    params: &'a CoarseningParams,
}

/// Owning envelope for LOAD.
#[derive(Deserialize)]
struct JsonEnvelopeOwned {
    format: String,
    version: u32,
    #[serde(flatten)]
    params: CoarseningParams,
}

#[cfg(test)]
mod tests {
    use super::*;
    use equator::assert;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("rbf_coarsening_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn defaults_are_valid() {
        let params = CoarseningParams::default();
        assert!(params.validate().is_ok());
        assert!(params.tolerance.tolerance_type == FittingAccuracyType::Relative);
    }

    #[test]
    fn rejects_reselection_tolerance_below_tolerance() {
        let params = CoarseningParams::builder()
            .tolerance(1e-2)
            .reselection_tolerance(1e-3)
            .build();
        assert!(matches!(params.validate(), Err(CoarseningError::InvalidParams(_))));
    }

    #[test]
    fn rejects_inverted_point_bounds() {
        let params = CoarseningParams::builder().min_points(10).max_points(5).build();
        assert!(params.validate().is_err());

        let params = CoarseningParams::builder().min_points(0).build();
        assert!(params.validate().is_err());
    }

    #[test]
    fn rejects_non_positive_tolerance() {
        assert!(CoarseningParams::builder().tolerance(0.0).build().validate().is_err());
        assert!(CoarseningParams::builder().tolerance(f64::NAN).build().validate().is_err());
    }

    #[test]
    fn json_envelope_roundtrip() {
        let path = temp_path("roundtrip");
        let params = CoarseningParams::builder()
            .tolerance(5e-4)
            .tolerance_type(FittingAccuracyType::Absolute)
            .reselection_tolerance(1e-2)
            .min_points(3)
            .max_points(40)
            .build();

        params.save_json(&path).unwrap();
        let loaded = CoarseningParams::load_json(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert!(loaded == params);
    }

    #[test]
    fn json_with_wrong_format_is_rejected() {
        let path = temp_path("wrong_format");
        std::fs::write(
            &path,
            r#"{"format":"something.else","version":1,
                "tolerance":{"tolerance":0.001,"tolerance_type":"Relative"},
                "reselection_tolerance":0.1,"min_points":1,"max_points":10}"#,
        )
        .unwrap();

        let result = CoarseningParams::load_json(&path);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(result, Err(ParamsIOError::FormatMismatch { .. })));
    }

    #[test]
    fn json_with_invalid_params_is_rejected() {
        let path = temp_path("invalid");
        std::fs::write(
            &path,
            r#"{"format":"rbf_coarsening.params.json","version":1,
                "tolerance":{"tolerance":0.001,"tolerance_type":"Relative"},
                "reselection_tolerance":0.1,"min_points":12,"max_points":10}"#,
        )
        .unwrap();

        let result = CoarseningParams::load_json(&path);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(result, Err(ParamsIOError::Invalid { .. })));
    }
}
