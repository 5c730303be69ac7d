//! Interpolation nodes and the barycentric weights derived from them.

use nalgebra as na;

use crate::FieldScalar;

/// An ordered set of distinct 1D reference coordinates
/// that the Lagrange basis functions interpolate at.
///
/// A node set of `order + 1` points defines basis functions of degree `order`.
/// The nodes are conventionally placed in the interval `[-1, 1]`,
/// but any interval works as long as the points are distinct.
///
/// Distinctness is a caller contract and is not checked here.
/// Duplicate nodes lead to divisions by zero in [`BarycentricWeights::new`]
/// and consequently to infinities or NaNs in every evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSet<T> {
    points: Vec<T>,
}

impl<T: FieldScalar> NodeSet<T> {
    /// Create a node set from a sequence of distinct, monotonically ordered points.
    ///
    /// Panics if `points` is empty.
    pub fn new(points: Vec<T>) -> Self {
        assert!(!points.is_empty(), "A node set needs at least one point");
        Self { points }
    }

    /// Create a node set from real-valued points,
    /// converting them into the scalar type `T`.
    ///
    /// This is mostly useful for constructing complex-valued elements
    /// from the same nodes as a real-valued one.
    pub fn from_real(points: &[f64]) -> Self {
        Self::new(points.iter().map(|&p| na::convert(p)).collect())
    }

    /// Number of points in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false, node sets are never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Polynomial degree of the basis functions defined by this set.
    #[inline]
    pub fn order(&self) -> usize {
        self.points.len() - 1
    }

    /// The points as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.points
    }

    /// Index of the node exactly equal to `x`, if there is one.
    ///
    /// This is an exact floating point comparison on purpose:
    /// points merely close to a node are handled by the general barycentric formula.
    #[inline]
    pub fn coincident_node(&self, x: T) -> Option<usize> {
        self.points.iter().position(|&p| p == x)
    }
}

impl<T> std::ops::Index<usize> for NodeSet<T> {
    type Output = T;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.points[idx]
    }
}

/// Barycentric weights `w_i = 1 / Π_{j≠i} (x_i - x_j)` of a [`NodeSet`].
///
/// These only depend on the nodes,
/// so they are computed once when an element is constructed
/// and never modified afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct BarycentricWeights<T> {
    weights: Vec<T>,
}

impl<T: FieldScalar> BarycentricWeights<T> {
    /// Compute the weights for a node set. This is O(N²) in the number of nodes.
    pub fn new(nodes: &NodeSet<T>) -> Self {
        let points = nodes.as_slice();
        let weights = points
            .iter()
            .enumerate()
            .map(|(i, &xi)| {
                let denom = points
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .fold(T::one(), |acc, (_, &xj)| acc * (xi - xj));
                T::one() / denom
            })
            .collect();

        Self { weights }
    }

    /// Number of weights, equal to the number of nodes they were computed from.
    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Always false, weights are never computed from an empty node set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// The weights as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.weights
    }
}

impl<T> std::ops::Index<usize> for BarycentricWeights<T> {
    type Output = T;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.weights[idx]
    }
}

//
// tests
//
