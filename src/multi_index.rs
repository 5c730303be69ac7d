//! Mapping between flat basis function indices
//! and per-dimension node indices of a tensor-product element.
//!
//! A `D`-dimensional element with `n = order + 1` nodes per dimension
//! has `n^D` basis functions. Basis function `e` corresponds to the multi-index
//! `(i_0, ..., i_{D-1})` given by the base-`n` digits of `e`,
//! least significant digit first, i.e. dimension 0 varies fastest:
//!
//! ```text
//! e = i_0 + n * i_1 + n² * i_2 + ...
//! ```
//!
//! Vertex arrays passed to the Jacobian routines must follow the same ordering.

/// Per-dimension node indices of one tensor-product basis function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MultiIndex<const D: usize>(pub [usize; D]);

impl<const D: usize> MultiIndex<D> {
    /// Decompose a flat index into its multi-index for `nodes_per_dim` nodes per dimension.
    ///
    /// Panics if `flat` is not smaller than `nodes_per_dim^D`.
    #[inline]
    pub fn from_flat(flat: usize, nodes_per_dim: usize) -> Self {
        assert!(
            flat < nodes_per_dim.pow(D as u32),
            "Basis index {flat} out of range for {D}-dimensional element \
             with {nodes_per_dim} nodes per dimension"
        );
        let mut rest = flat;
        Self(std::array::from_fn(|_| {
            let digit = rest % nodes_per_dim;
            rest /= nodes_per_dim;
            digit
        }))
    }

    /// Recompose the flat index. Inverse of [`from_flat`][Self::from_flat].
    #[inline]
    pub fn to_flat(&self, nodes_per_dim: usize) -> usize {
        self.0
            .iter()
            .rev()
            .fold(0, |acc, &digit| acc * nodes_per_dim + digit)
    }

    /// The node index along dimension `dim`.
    #[inline]
    pub fn get(&self, dim: usize) -> usize {
        self.0[dim]
    }
}

impl<const D: usize> std::ops::Index<usize> for MultiIndex<D> {
    type Output = usize;

    fn index(&self, dim: usize) -> &Self::Output {
        &self.0[dim]
    }
}

/// Multi-index of basis function `e` of an element of polynomial degree `order`.
#[inline]
pub fn flat_to_multi<const D: usize>(e: usize, order: usize) -> MultiIndex<D> {
    MultiIndex::from_flat(e, order + 1)
}

/// Flat basis function index of a multi-index for an element of polynomial degree `order`.
#[inline]
pub fn multi_to_flat<const D: usize>(idx: &MultiIndex<D>, order: usize) -> usize {
    idx.to_flat(order + 1)
}

/// Iterate over every multi-index of an element in flat index order.
pub fn multi_indices<const D: usize>(order: usize) -> MultiIndexIter<D> {
    let nodes_per_dim = order + 1;
    MultiIndexIter {
        nodes_per_dim,
        next: 0,
        len: nodes_per_dim.pow(D as u32),
    }
}

/// Iterator returned by [`multi_indices`].
#[derive(Clone, Debug)]
pub struct MultiIndexIter<const D: usize> {
    nodes_per_dim: usize,
    next: usize,
    len: usize,
}

impl<const D: usize> Iterator for MultiIndexIter<D> {
    type Item = MultiIndex<D>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.len {
            return None;
        }
        let idx = MultiIndex::from_flat(self.next, self.nodes_per_dim);
        self.next += 1;
        Some(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.next;
        (remaining, Some(remaining))
    }
}

impl<const D: usize> ExactSizeIterator for MultiIndexIter<D> {}

//
// tests
//

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn dimension_zero_varies_fastest() {
        let order = 2;
        assert_eq!(flat_to_multi::<3>(0, order), MultiIndex([0, 0, 0]));
        assert_eq!(flat_to_multi::<3>(1, order), MultiIndex([1, 0, 0]));
        assert_eq!(flat_to_multi::<3>(3, order), MultiIndex([0, 1, 0]));
        assert_eq!(flat_to_multi::<3>(9, order), MultiIndex([0, 0, 1]));
        assert_eq!(flat_to_multi::<3>(26, order), MultiIndex([2, 2, 2]));
        assert_eq!(flat_to_multi::<3>(14, order), MultiIndex([2, 1, 1]));
    }

    #[test]
    fn mapping_is_bijective() {
        for order in 0..5 {
            let n = order + 1;
            let all: Vec<MultiIndex<3>> = (0..n * n * n).map(|e| flat_to_multi(e, order)).collect();
            assert!(all.iter().all_unique(), "duplicate multi-index for order {order}");
            for (e, idx) in all.iter().enumerate() {
                assert_eq!(multi_to_flat(idx, order), e);
                assert!(idx.0.iter().all(|&i| i < n));
            }
        }
    }

    /// The iterator visits the same multi-indices as a cartesian product
    /// with the last dimension as the outermost loop.
    #[test]
    fn iterator_matches_cartesian_product() {
        let order = 3;
        let from_iter: Vec<MultiIndex<2>> = multi_indices(order).collect();
        let from_product: Vec<MultiIndex<2>> = (0..=order)
            .cartesian_product(0..=order)
            .map(|(j, i)| MultiIndex([i, j]))
            .collect();
        assert_eq!(from_iter, from_product);
        assert_eq!(multi_indices::<4>(2).len(), 81);
    }

    #[test]
    #[should_panic]
    fn out_of_range_panics() {
        let _ = flat_to_multi::<2>(9, 2);
    }
}
