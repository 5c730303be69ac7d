//! Arbitrary-order Lagrange tensor-product elements.

use nalgebra as na;

use crate::{
    barycentric::{eval_1d, eval_derivative_1d},
    multi_index::{multi_indices, MultiIndex},
    BarycentricWeights, FieldScalar, NodeSet, TensorProductBasis,
};

/// A `D`-dimensional tensor-product element
/// whose basis functions are products of 1D Lagrange polynomials.
///
/// The element has `order + 1` nodes per dimension,
/// giving `(order + 1)^D` basis functions, one per node of the tensor grid.
/// Basis functions are indexed as described in [`multi_index`][crate::multi_index].
///
/// The element is immutable after construction.
/// Evaluation methods (see [`TensorProductBasis`]) only read it,
/// so a single element can be shared by reference between threads.
///
/// ```
/// # use barylag::{LagrangeElement, NodeSet, TensorProductBasis};
/// # use nalgebra as na;
/// let nodes = NodeSet::new(vec![-1.0, 0.0, 1.0]);
/// let elem = LagrangeElement::<f64, 2>::new(nodes);
/// assert_eq!(elem.num_basis(), 9);
///
/// // interpolate f(x, y) = x * y, which the quadratic basis reproduces exactly
/// let coefs: Vec<f64> = (0..elem.num_basis())
///     .map(|e| {
///         let p = elem.node_point(e);
///         p.x * p.y
///     })
///     .collect();
/// let x = na::Vector2::new(0.5, -0.25);
/// assert!((elem.eval_approx(&coefs, &x) - (-0.125)).abs() < 1e-15);
/// ```
#[derive(Clone, Debug)]
pub struct LagrangeElement<T: FieldScalar, const D: usize> {
    order: usize,
    nodes: NodeSet<T>,
    weights: BarycentricWeights<T>,
    num_basis: usize,
    degeneracy_tolerance: T::RealField,
}

impl<T: FieldScalar, const D: usize> LagrangeElement<T, D> {
    /// Construct an element interpolating at the given nodes in every dimension.
    ///
    /// The polynomial order of the element is `nodes.len() - 1`.
    /// Barycentric weights are computed here once.
    pub fn new(nodes: NodeSet<T>) -> Self {
        assert!(D > 0, "Cannot create an element of dimension 0");

        let order = nodes.order();
        let weights = BarycentricWeights::new(&nodes);
        let num_basis = nodes.len().pow(D as u32);
        log::debug!(
            "Constructed order {order} Lagrange element in {D} dimensions with {num_basis} basis functions"
        );

        Self {
            order,
            nodes,
            weights,
            num_basis,
            degeneracy_tolerance: na::convert(crate::DEFAULT_DEGENERACY_TOLERANCE),
        }
    }

    /// Set the relative tolerance used to detect degenerate Jacobians.
    ///
    /// See [`check_determinant`][crate::jacobian::check_determinant]
    /// for how the tolerance is applied.
    pub fn with_degeneracy_tolerance(mut self, tolerance: T::RealField) -> Self {
        self.degeneracy_tolerance = tolerance;
        self
    }

    /// Polynomial order of the basis functions in each dimension.
    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    /// The 1D interpolation nodes.
    #[inline]
    pub fn nodes(&self) -> &NodeSet<T> {
        &self.nodes
    }

    /// Barycentric weights of the 1D nodes.
    #[inline]
    pub fn weights(&self) -> &BarycentricWeights<T> {
        &self.weights
    }

    /// Per-dimension node indices of basis function `e`.
    #[inline]
    pub fn multi_index(&self, e: usize) -> MultiIndex<D> {
        MultiIndex::from_flat(e, self.order + 1)
    }

    /// Reference coordinates of the node where basis function `e` equals one.
    pub fn node_point(&self, e: usize) -> na::SVector<T, D> {
        let idx = self.multi_index(e);
        na::SVector::from_fn(|d, _| self.nodes[idx[d]])
    }

    /// Tabulate every 1D basis function along each coordinate of `x`,
    /// `values[d][i] = L_i(x_d)`.
    fn value_table(&self, x: &na::SVector<T, D>) -> [Vec<T>; D] {
        std::array::from_fn(|d| {
            (0..=self.order)
                .map(|i| eval_1d(i, x[d], &self.nodes, &self.weights))
                .collect()
        })
    }

    /// Tabulate every 1D basis function derivative along each coordinate of `x`,
    /// `derivatives[d][i] = L_i'(x_d)`.
    fn derivative_table(&self, x: &na::SVector<T, D>) -> [Vec<T>; D] {
        std::array::from_fn(|d| {
            (0..=self.order)
                .map(|i| eval_derivative_1d(i, x[d], &self.nodes, &self.weights))
                .collect()
        })
    }
}

/// Product of per-dimension factors, taken in dimension order.
/// Every evaluation path goes through this so they all round identically.
#[inline]
fn tensor_product<T: FieldScalar, const D: usize>(factor: impl Fn(usize) -> T) -> T {
    (0..D).fold(T::one(), |acc, d| acc * factor(d))
}

impl<T: FieldScalar, const D: usize> TensorProductBasis<T, D> for LagrangeElement<T, D> {
    #[inline]
    fn num_basis(&self) -> usize {
        self.num_basis
    }

    fn degeneracy_tolerance(&self) -> T::RealField {
        self.degeneracy_tolerance.clone()
    }

    fn eval_basis(&self, e: usize, x: &na::SVector<T, D>) -> T {
        let idx = self.multi_index(e);
        tensor_product::<T, D>(|d| eval_1d(idx[d], x[d], &self.nodes, &self.weights))
    }

    fn eval_grad_basis(&self, e: usize, x: &na::SVector<T, D>) -> na::SVector<T, D> {
        let idx = self.multi_index(e);
        // compute each 1D factor once and reuse it across the gradient components
        let values: [T; D] =
            std::array::from_fn(|d| eval_1d(idx[d], x[d], &self.nodes, &self.weights));
        let derivatives: [T; D] =
            std::array::from_fn(|d| eval_derivative_1d(idx[d], x[d], &self.nodes, &self.weights));

        na::SVector::from_fn(|b, _| {
            tensor_product::<T, D>(|d| if d == b { derivatives[d] } else { values[d] })
        })
    }

    fn eval_basis_all(&self, x: &na::SVector<T, D>) -> Vec<T> {
        let values = self.value_table(x);
        multi_indices::<D>(self.order)
            .map(|idx| tensor_product::<T, D>(|d| values[d][idx[d]]))
            .collect()
    }

    fn eval_grad_basis_all(&self, x: &na::SVector<T, D>) -> Vec<na::SVector<T, D>> {
        let values = self.value_table(x);
        let derivatives = self.derivative_table(x);
        multi_indices::<D>(self.order)
            .map(|idx| {
                na::SVector::from_fn(|b, _| {
                    tensor_product::<T, D>(|d| {
                        if d == b {
                            derivatives[d][idx[d]]
                        } else {
                            values[d][idx[d]]
                        }
                    })
                })
            })
            .collect()
    }
}

//
// tests
//
