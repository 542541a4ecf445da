#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! A [`Tensor`] owns a contiguous, row-major buffer together with its `shape` and
//! `strides`. The dimensionality is a const generic, so a sampling map is a
//! [`Tensor2`] and an interleaved image buffer is a [`Tensor3`].
//!
//! ```rust
//! use panocube_tensor::Tensor2;
//!
//! let map = Tensor2::from_shape_fn([2, 3], |[r, c]| (r * 3 + c) as f32).unwrap();
//!
//! assert_eq!(map.get([0, 0]), Some(&0.0));
//! assert_eq!(map.get([1, 2]), Some(&5.0));
//! assert_eq!(map.get([2, 0]), None);
//! ```

/// Tensor module containing the main tensor implementation and error types.
pub mod tensor;

pub use crate::tensor::{get_strides_from_shape, Tensor, TensorError};

/// Type alias for a 2-dimensional tensor.
pub type Tensor2<T> = Tensor<T, 2>;

/// Type alias for a 3-dimensional tensor.
pub type Tensor3<T> = Tensor<T, 3>;
