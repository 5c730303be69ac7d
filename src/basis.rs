//! The [`TensorProductBasis`] trait, which provides field interpolation
//! and isoparametric Jacobians on top of per-basis-function evaluation.

use nalgebra as na;

use crate::{jacobian, FieldScalar, JacobianError};

/// A set of basis functions on a `D`-dimensional reference element.
///
/// Implementors provide evaluation of individual basis functions and their gradients;
/// everything built from those (interpolants, the geometric map and its Jacobian)
/// comes as provided methods.
///
/// All methods take `&self` and only write to values they return,
/// so one basis can be shared between threads and evaluated concurrently.
pub trait TensorProductBasis<T: FieldScalar, const D: usize> {
    /// Number of basis functions.
    fn num_basis(&self) -> usize;

    /// Evaluate basis function `e` at reference coordinates `x`.
    fn eval_basis(&self, e: usize, x: &na::SVector<T, D>) -> T;

    /// Evaluate the gradient of basis function `e`
    /// with respect to the reference coordinates at `x`.
    fn eval_grad_basis(&self, e: usize, x: &na::SVector<T, D>) -> na::SVector<T, D>;

    /// Relative tolerance used to detect degenerate Jacobians.
    /// See [`jacobian::check_determinant`].
    fn degeneracy_tolerance(&self) -> T::RealField {
        na::convert(jacobian::DEFAULT_DEGENERACY_TOLERANCE)
    }

    /// Evaluate every basis function at `x`, in basis index order.
    fn eval_basis_all(&self, x: &na::SVector<T, D>) -> Vec<T> {
        (0..self.num_basis()).map(|e| self.eval_basis(e, x)).collect()
    }

    /// Evaluate the gradient of every basis function at `x`, in basis index order.
    fn eval_grad_basis_all(&self, x: &na::SVector<T, D>) -> Vec<na::SVector<T, D>> {
        (0..self.num_basis())
            .map(|e| self.eval_grad_basis(e, x))
            .collect()
    }

    /// Evaluate the interpolant `Σ_e c[e] φ_e(x)` of the nodal coefficients `coefs`.
    ///
    /// Panics if `coefs` doesn't have one value per basis function.
    fn eval_approx(&self, coefs: &[T], x: &na::SVector<T, D>) -> T {
        assert_eq!(
            coefs.len(),
            self.num_basis(),
            "Mismatched number of coefficients and basis functions"
        );
        coefs
            .iter()
            .zip(self.eval_basis_all(x))
            .fold(T::zero(), |acc, (&c, phi)| acc + c * phi)
    }

    /// Evaluate the gradient `Σ_e c[e] ∇φ_e(x)` of the interpolant
    /// with respect to the reference coordinates.
    ///
    /// Panics if `coefs` doesn't have one value per basis function.
    fn eval_grad_approx(&self, coefs: &[T], x: &na::SVector<T, D>) -> na::SVector<T, D> {
        assert_eq!(
            coefs.len(),
            self.num_basis(),
            "Mismatched number of coefficients and basis functions"
        );
        coefs
            .iter()
            .zip(self.eval_grad_basis_all(x))
            .fold(na::SVector::zeros(), |acc, (&c, grad)| acc + grad * c)
    }

    /// Map reference coordinates `x` to physical space,
    /// `Σ_e vertices[e] φ_e(x)`.
    ///
    /// `vertices` holds the physical position of the node of each basis function,
    /// ordered by basis index.
    fn eval_physical_position(
        &self,
        x: &na::SVector<T, D>,
        vertices: &[na::SVector<T, D>],
    ) -> na::SVector<T, D> {
        assert_eq!(
            vertices.len(),
            self.num_basis(),
            "Mismatched number of vertices and basis functions"
        );
        vertices
            .iter()
            .zip(self.eval_basis_all(x))
            .fold(na::SVector::zeros(), |acc, (v, phi)| acc + v * phi)
    }

    /// Evaluate the Jacobian `J[a][b] = ∂x_a / ∂X_b` of the isoparametric map at `x`.
    ///
    /// `vertices` is ordered as in
    /// [`eval_physical_position`][Self::eval_physical_position].
    fn eval_jac(
        &self,
        x: &na::SVector<T, D>,
        vertices: &[na::SVector<T, D>],
    ) -> na::SMatrix<T, D, D> {
        assert_eq!(
            vertices.len(),
            self.num_basis(),
            "Mismatched number of vertices and basis functions"
        );
        jacobian::assemble(&self.eval_grad_basis_all(x), vertices)
    }

    /// Evaluate the determinant of the Jacobian at `x`.
    ///
    /// This is the raw determinant with no degeneracy check,
    /// use [`check_jacobian`][Self::check_jacobian] to have one.
    fn eval_det_jac(&self, x: &na::SVector<T, D>, vertices: &[na::SVector<T, D>]) -> T {
        jacobian::determinant(&self.eval_jac(x, vertices))
    }

    /// Evaluate the Jacobian and its determinant at `x`,
    /// failing if the determinant is too close to zero.
    fn check_jacobian(
        &self,
        x: &na::SVector<T, D>,
        vertices: &[na::SVector<T, D>],
    ) -> Result<(na::SMatrix<T, D, D>, T), JacobianError> {
        let jac = self.eval_jac(x, vertices);
        let det = jacobian::check_determinant(
            &jac,
            jacobian::determinant(&jac),
            self.degeneracy_tolerance(),
        )?;
        Ok((jac, det))
    }

    /// Evaluate the inverse of the Jacobian at `x`.
    ///
    /// Fails with [`JacobianError::Degenerate`] instead of returning
    /// non-finite values when the element geometry is degenerate at `x`.
    fn eval_inv_jac(
        &self,
        x: &na::SVector<T, D>,
        vertices: &[na::SVector<T, D>],
    ) -> Result<na::SMatrix<T, D, D>, JacobianError> {
        jacobian::checked_inverse(&self.eval_jac(x, vertices), self.degeneracy_tolerance())
    }
}
