//! One-dimensional Lagrange basis functions in barycentric form.
//!
//! The second (true) barycentric form of the Lagrange basis function `L_i` is
//!
//! ```text
//!          w_i / (x - x_i)
//! L_i(x) = ------------------------
//!          Σ_j w_j / (x - x_j)
//! ```
//!
//! which is singular (0/0 in the limit) exactly at the nodes.
//! The singularity is removable, so at a node we return the analytic limit
//! instead of evaluating the quotient.
//!
//! Everything here is generic over [`ComplexField`][nalgebra::ComplexField]
//! so that the same code runs on real and complex scalars.
//! The only comparison made between scalars is the exact equality test
//! used to detect node coincidence.

use itertools::izip;

use crate::{BarycentricWeights, FieldScalar, NodeSet};

/// Evaluate the `i`th 1D Lagrange basis function at `x`.
pub fn eval_1d<T: FieldScalar>(
    i: usize,
    x: T,
    nodes: &NodeSet<T>,
    weights: &BarycentricWeights<T>,
) -> T {
    if let Some(k) = nodes.coincident_node(x) {
        return if k == i { T::one() } else { T::zero() };
    }

    let points = nodes.as_slice();
    let w = weights.as_slice();
    let denom = izip!(points, w).fold(T::zero(), |acc, (&xj, &wj)| acc + wj / (x - xj));

    (w[i] / (x - points[i])) / denom
}

/// Evaluate the derivative of the `i`th 1D Lagrange basis function at `x`.
pub fn eval_derivative_1d<T: FieldScalar>(
    i: usize,
    x: T,
    nodes: &NodeSet<T>,
    weights: &BarycentricWeights<T>,
) -> T {
    let points = nodes.as_slice();
    let w = weights.as_slice();

    match nodes.coincident_node(x) {
        // diagonal of the differentiation matrix
        Some(k) if k == i => points
            .iter()
            .zip(w)
            .enumerate()
            .filter(|(j, _)| *j != i)
            .fold(T::zero(), |acc, (_, (&xj, &wj))| {
                acc - (wj / w[i]) / (points[i] - xj)
            }),
        // off-diagonal: L_i'(x_k) = (w_i / w_k) / (x_k - x_i)
        Some(k) => (w[i] / w[k]) / (points[k] - points[i]),
        None => {
            // with r_j = 1 / (x - x_j) and b = Σ_j w_j r_j,
            // L_i'(x) = L_i(x) (Σ_j (w_j r_j / b) r_j - r_i).
            // The ratios w_j r_j / b stay bounded as x approaches a node,
            // so no r_j is ever squared.
            let b = izip!(points, w).fold(T::zero(), |acc, (&xj, &wj)| acc + wj / (x - xj));
            let sum = izip!(points, w).fold(T::zero(), |acc, (&xj, &wj)| {
                let r = T::one() / (x - xj);
                acc + (wj * r / b) * r
            });
            let r_i = T::one() / (x - points[i]);
            let l_i = w[i] * r_i / b;

            l_i * (sum - r_i)
        }
    }
}

//
// tests
//
