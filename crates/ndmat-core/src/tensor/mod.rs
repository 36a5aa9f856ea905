//! Dense tensor implementation
//!
//! [`Tensor<T>`] is split across several modules by capability:
//!
//! - `types`: struct definition, constructors, accessors, ndarray interop
//! - `indexing`: element access by multi-index
//! - `manipulation`: initialize, resize, map/reduce, permute, squeeze
//! - `arithmetic`: element-wise arithmetic and sum/product/min/max
//! - `statistics`: mean, variance, standard deviation, conjugation
//! - `interpolation`: multi-axis interpolation for real tensors
//! - `display`: text rendering

mod arithmetic;
mod display;
mod indexing;
mod interpolation;
mod manipulation;
mod statistics;
mod types;

pub use interpolation::linear_interpolator;
pub use types::Tensor;
