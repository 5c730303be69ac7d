//! The Jacobian of the isoparametric map from reference to physical coordinates,
//! its determinant and its inverse.
//!
//! The routines here operate on an already assembled Jacobian matrix.
//! Most users will want the methods on
//! [`TensorProductBasis`][crate::TensorProductBasis] instead,
//! which assemble the matrix from basis gradients and physical vertices.

use itertools::izip;
use nalgebra as na;

use crate::FieldScalar;

/// Default relative tolerance for detecting degenerate Jacobians.
///
/// See [`check_determinant`] for how it is applied.
pub const DEFAULT_DEGENERACY_TOLERANCE: f64 = 1e-12;

/// Error in evaluating the inverse Jacobian of an element.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum JacobianError {
    /// The Jacobian determinant is too close to zero to invert,
    /// meaning the element is collapsed to a lower-dimensional shape
    /// (or numerically indistinguishable from one).
    #[error("Degenerate element geometry: |det J| = {magnitude:e} is below the threshold {threshold:e}")]
    Degenerate {
        /// Magnitude of the determinant.
        magnitude: f64,
        /// Threshold the magnitude was compared against,
        /// i.e. the degeneracy tolerance scaled by the column norms of the Jacobian.
        threshold: f64,
    },
}

/// Assemble `J[a][b] = Σ_e v_e[a] * ∂φ_e/∂X_b`
/// from basis gradients and the matching physical vertex positions.
pub fn assemble<T: FieldScalar, const D: usize>(
    grads: &[na::SVector<T, D>],
    vertices: &[na::SVector<T, D>],
) -> na::SMatrix<T, D, D> {
    assert_eq!(
        grads.len(),
        vertices.len(),
        "Mismatched number of vertices and basis functions"
    );
    let mut jac = na::SMatrix::<T, D, D>::zeros();
    for (grad, vert) in izip!(grads, vertices) {
        jac += vert * grad.transpose();
    }
    jac
}

/// Determinant by cofactor expansion for dimensions up to 3,
/// LU decomposition for anything larger.
pub fn determinant<T: FieldScalar, const D: usize>(m: &na::SMatrix<T, D, D>) -> T {
    match D {
        0 => T::one(),
        1 => m[(0, 0)],
        2 => m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)],
        3 => {
            m[(0, 0)] * (m[(1, 1)] * m[(2, 2)] - m[(1, 2)] * m[(2, 1)])
                - m[(0, 1)] * (m[(1, 0)] * m[(2, 2)] - m[(1, 2)] * m[(2, 0)])
                + m[(0, 2)] * (m[(1, 0)] * m[(2, 1)] - m[(1, 1)] * m[(2, 0)])
        }
        _ => na::DMatrix::from_iterator(D, D, m.iter().copied()).determinant(),
    }
}

/// Check that a determinant is safely away from zero.
///
/// The determinant is compared against `tolerance` times the product of the column norms
/// of the Jacobian. By Hadamard's inequality that product bounds `|det J|` from above,
/// so the test measures how close to linearly dependent the columns are
/// independently of the physical size of the element.
/// NaN determinants are also reported as degenerate.
pub fn check_determinant<T: FieldScalar, const D: usize>(
    jac: &na::SMatrix<T, D, D>,
    det: T,
    tolerance: T::RealField,
) -> Result<T, JacobianError> {
    let scale = jac
        .column_iter()
        .fold(na::one::<T::RealField>(), |acc, col| acc * col.norm());
    let threshold = tolerance * scale;
    let magnitude = det.modulus();

    // written as a negated comparison so that NaN also counts as degenerate
    if !(magnitude > threshold) {
        let err = JacobianError::Degenerate {
            magnitude: na::try_convert(magnitude).unwrap_or(f64::NAN),
            threshold: na::try_convert(threshold).unwrap_or(f64::NAN),
        };
        log::debug!("{err}");
        return Err(err);
    }

    Ok(det)
}

/// Inverse of a Jacobian with a known nonzero determinant, computed as adjugate / determinant
/// for dimensions up to 3 and by LU decomposition for anything larger.
///
/// The determinant should be checked with [`check_determinant`] first.
/// Returns `None` if the general-dimension decomposition finds the matrix singular.
pub fn inverse<T: FieldScalar, const D: usize>(
    m: &na::SMatrix<T, D, D>,
    det: T,
) -> Option<na::SMatrix<T, D, D>> {
    match D {
        0 => Some(*m),
        1 => Some(na::SMatrix::<T, D, D>::from_element(T::one() / det)),
        2 => {
            #[rustfmt::skip]
            let adj = [
                [m[(1, 1)], -m[(0, 1)]],
                [-m[(1, 0)], m[(0, 0)]],
            ];
            Some(na::SMatrix::from_fn(|r, c| adj[r][c] / det))
        }
        3 => {
            let cof = |r0: usize, r1: usize, c0: usize, c1: usize| {
                m[(r0, c0)] * m[(r1, c1)] - m[(r0, c1)] * m[(r1, c0)]
            };
            // transposed cofactor matrix
            let adj = [
                [cof(1, 2, 1, 2), -cof(0, 2, 1, 2), cof(0, 1, 1, 2)],
                [-cof(1, 2, 0, 2), cof(0, 2, 0, 2), -cof(0, 1, 0, 2)],
                [cof(1, 2, 0, 1), -cof(0, 2, 0, 1), cof(0, 1, 0, 1)],
            ];
            Some(na::SMatrix::from_fn(|r, c| adj[r][c] / det))
        }
        _ => {
            let inv = na::DMatrix::from_iterator(D, D, m.iter().copied()).try_inverse()?;
            Some(na::SMatrix::from_iterator(inv.iter().copied()))
        }
    }
}

/// Check the determinant of a Jacobian and invert it if it isn't degenerate.
pub fn checked_inverse<T: FieldScalar, const D: usize>(
    jac: &na::SMatrix<T, D, D>,
    tolerance: T::RealField,
) -> Result<na::SMatrix<T, D, D>, JacobianError> {
    let det = check_determinant(jac, determinant(jac), tolerance)?;
    inverse(jac, det).ok_or(JacobianError::Degenerate {
        magnitude: na::try_convert(det.modulus()).unwrap_or(f64::NAN),
        threshold: f64::NAN,
    })
}

//
// tests
//
