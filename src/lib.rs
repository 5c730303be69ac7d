//! Arbitrary-order Lagrange basis functions on tensor-product reference elements.
//!
//! The building block is the 1D Lagrange polynomial in barycentric form
//! (see [`barycentric`]), evaluated on a set of interpolation nodes
//! ([`NodeSet`]) with precomputed [`BarycentricWeights`].
//! A [`LagrangeElement`] takes products of these along each dimension
//! to get the basis functions of a `D`-dimensional line/quadrilateral/hexahedron element,
//! and the [`TensorProductBasis`] trait builds field interpolation
//! and the Jacobian of the isoparametric map on top of that.
//!
//! Node distributions and quadrature rules are not part of this crate;
//! bring your own points in whatever interval you like.
//!
//! # Scalar types
//!
//! Everything is generic over a [`FieldScalar`],
//! which is any [`nalgebra::ComplexField`] that is also `Copy`
//! (in practice `f32`, `f64` and their complex counterparts).
//! Complex scalars allow computing derivatives with the complex step method:
//!
//! ```
//! # use barylag::{LagrangeElement, NodeSet, TensorProductBasis};
//! use nalgebra::{Complex, Vector2};
//! let nodes = NodeSet::<Complex<f64>>::from_real(&[-1.0, -0.2, 0.5, 1.0]);
//! let elem = LagrangeElement::<Complex<f64>, 2>::new(nodes);
//!
//! let h = 1e-30;
//! let x = Vector2::new(Complex::new(0.3, 0.0), Complex::new(-0.6, 0.0));
//! let x_stepped = Vector2::new(Complex::new(0.3, h), Complex::new(-0.6, 0.0));
//!
//! let step = elem.eval_basis(5, &x_stepped).im / h;
//! let exact = elem.eval_grad_basis(5, &x)[0].re;
//! assert!((step - exact).abs() < 1e-12);
//! ```
//!
//! # Geometry
//!
//! Physical vertex positions are passed to the Jacobian routines as a slice
//! with one vertex per basis function, in basis index order.
//! Inverting the Jacobian of a degenerate (zero-volume) element
//! gives a [`JacobianError`] rather than infinities:
//!
//! ```
//! # use barylag::{LagrangeElement, NodeSet, TensorProductBasis, JacobianError};
//! use nalgebra::Vector2;
//! let elem = LagrangeElement::<f64, 2>::new(NodeSet::new(vec![-1.0, 1.0]));
//! // a square collapsed onto a line
//! let verts = [
//!     Vector2::new(0.0, 0.0),
//!     Vector2::new(1.0, 1.0),
//!     Vector2::new(2.0, 2.0),
//!     Vector2::new(3.0, 3.0),
//! ];
//! let x = Vector2::new(0.1, 0.2);
//! assert!(matches!(
//!     elem.eval_inv_jac(&x, &verts),
//!     Err(JacobianError::Degenerate { .. })
//! ));
//! ```

#![warn(missing_docs)]

pub mod nodes;
#[doc(inline)]
pub use nodes::{BarycentricWeights, NodeSet};

pub mod barycentric;

pub mod multi_index;
#[doc(inline)]
pub use multi_index::MultiIndex;

pub mod basis;
#[doc(inline)]
pub use basis::TensorProductBasis;

pub mod element;
#[doc(inline)]
pub use element::LagrangeElement;

pub mod jacobian;
#[doc(inline)]
pub use jacobian::{JacobianError, DEFAULT_DEGENERACY_TOLERANCE};

// nalgebra re-export for convenience

pub use nalgebra as na;

/// Scalar types the basis functions can be evaluated with.
///
/// This is a shorthand for [`ComplexField`][na::ComplexField] + `Copy`
/// and is implemented automatically for every such type.
pub trait FieldScalar: na::ComplexField + Copy {}
impl<T: na::ComplexField + Copy> FieldScalar for T {}
