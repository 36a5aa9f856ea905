//! Index sets, Cartesian products and subscripts
//!
//! These types form the addressing layer under every tensor: a [`Subscript`]
//! maps multi-indices to flat row-major offsets and drives the gather/scatter
//! used by resizing, reductions and views.

mod cartesian_product;
mod index_set;
mod subscript;

pub use cartesian_product::CartesianProduct;
pub use index_set::IndexSet;
pub use subscript::Subscript;
