/////////////////////////////////////////////////////////////////////////////////////////////
//
// Evaluates the polynomial drift basis and selects its unisolvent columns for a centre set.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::common;
use faer::{unzip, zip, Mat};

/// Relative threshold below which a pivoted `R` diagonal entry counts as zero.
const RANK_TOLERANCE: f64 = 1E-10;

/// Number of monomials of total degree `<= degree` in `dimensions` variables.
pub(crate) fn basis_size(degree: i32, dimensions: usize) -> usize {
    if degree < 0 {
        return 0;
    }
    let k = degree as usize + 1;
    match dimensions {
        1 => k,
        2 => k * (k + 1) / 2,
        _ => k * (k + 1) * (k + 2) / 6,
    }
}

/// Evaluates the monomials `[1, x, y, z, x^2, xy, ...]` of total degree
/// `<= degree` at `points`, after mapping them with the given scaling.
pub(crate) fn evaluate_monomials(
    points: &Mat<f64>,
    degree: i32,
    translation_factor: &[f64],
    scale_factor: &[f64],
) -> Mat<f64> {
    let mut scaled_points = points.clone();

    common::scale_points(&mut scaled_points, translation_factor, scale_factor);

    let (n, d) = scaled_points.shape();
    let mut monomials = Mat::<f64>::zeros(n, basis_size(degree, d));

    if degree < 0 {
        return monomials;
    }

    // constant column
    monomials.col_mut(0).fill(1.0);

    // linear columns
    if degree >= 1 {
        monomials
            .subcols_mut(1, d)
            .copy_from(&scaled_points.as_ref());
    }

    // quadratic columns
    if degree == 2 {
        let start = 1 + d;
        let mut k = 0usize;

        for i in 0..d {
            let xi = scaled_points.col(i);
            for j in i..d {
                let xj = scaled_points.col(j);
                let mut dst = monomials.col_mut(start + k);

                zip!(&mut dst, &xi, &xj).for_each(|unzip!(dst, xi, xj)| {
                    *dst = xi * xj;
                });

                k += 1;
            }
        }
    }

    monomials
}

/// Returns the sorted indices of a maximal linearly independent subset of
/// the monomial columns.
///
/// Too few centres, or centres on a line (2D) or plane (3D), make the full
/// monomial basis rank deficient; dropping the dependent columns keeps the
/// augmented RBF system non-singular.
pub(crate) fn unisolvent_columns(monomials: &Mat<f64>) -> Vec<usize> {
    if monomials.ncols() == 0 || monomials.nrows() == 0 {
        return Vec::new();
    }

    // QR with column pivoting to identify linearly independent monomials.
    let qrc = monomials.col_piv_qr();
    let rc = qrc.thin_R();
    let (piv_fwd, _) = qrc.P().arrays();

    let thresh = RANK_TOLERANCE * rc.get(0, 0).abs();

    let rank = rc
        .diagonal()
        .column_vector()
        .iter()
        .filter(|val| val.abs() > thresh)
        .count();

    let mut columns: Vec<usize> = piv_fwd[..rank].to_vec();
    columns.sort();
    columns
}
