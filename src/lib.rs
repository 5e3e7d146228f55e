//! Provides a dynamically-typed n-dimensional [`Array`] backed by an ArrayFire native array,
//! with hardware acceleration on systems which support CUDA or OpenCL.
//!
//! Every `Array` carries a runtime [`Dtype`] from a closed set (`bool`, signed and unsigned
//! integers of 8 to 64 bits, `float16`, `float32`, `float64`, `complex64`, `complex128`) and a
//! [`Shape`] of one to four axes. Binary operations broadcast their operands (aligned on the
//! right) and follow a strict same-kind promotion lattice: mixing integers with floating-point
//! numbers, or `bool` with numbers, requires an explicit [`Array::astype`].
//!
//! Every operation is fallible and returns a [`Result`]. The `std::ops` traits are implemented
//! for `&Array` with `Output = Result<Array>`.
//!
//! Example usage:
//! ```no_run
//! # use afnd::{Array, Scalar};
//! let a = Array::from_vec(vec![1i32, 2, 3])?;
//! let b = Array::from_vec(vec![4i32, 5, 6])?;
//!
//! let sum = (&a + &b)?;
//! assert_eq!(sum.to_vec::<i32>()?, vec![5, 7, 9]);
//! assert_eq!(afnd::sum_all(&sum)?, Scalar::Int(21));
//! # Ok::<(), afnd::ArrayError>(())
//! ```
//!
//! The [`array_api`] module provides a stricter adapter which conforms to the Array API
//! standard (2022.12).
//!
//! This crate depends on ArrayFire version 3.8 or later. You will have to install ArrayFire
//! separately by following the instructions at
//! [https://arrayfire.org/docs/installing.htm](https://arrayfire.org/docs/installing.htm)
//! in order to build this crate.

use thiserror::Error;

pub use array::*;
pub use arith::*;
pub use config::*;
pub use data::*;
pub use device::*;
pub use dtype::*;
pub use image::*;
pub use index::*;
pub use linalg::*;
pub use ops::*;
pub use promote::*;
pub use random::*;
pub use reduce::*;
pub use scalar::*;
pub use shape::*;
pub use signal::*;

pub mod array_api;

mod arith;
mod array;
mod config;
mod data;
mod device;
mod dtype;
mod ffi;
mod handle;
mod image;
mod index;
mod linalg;
mod native;
mod ops;
mod promote;
mod random;
mod reduce;
mod scalar;
mod shape;
mod signal;

/// A complex number (an alias for [`num_complex::Complex`]).
pub type Complex<T> = num_complex::Complex<T>;

/// The error type used for `Array` operations which may fail recoverably.
#[derive(Debug, Error)]
pub enum ArrayError {
    #[error("unsupported dtype: {0}")]
    UnsupportedDtype(String),

    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    #[error("`{0}` and `{1}` cannot be type promoted together")]
    PromotionFailure(Dtype, Dtype),

    #[error("cannot perform in-place operation with dtypes `{0}` and `{1}`")]
    InPlacePromotionFailure(Dtype, Dtype),

    #[error("{value} is out of bounds for dtype `{dtype}`")]
    Overflow { value: String, dtype: Dtype },

    #[error("shape error: {0}")]
    Shape(String),

    #[error("index error: {0}")]
    Index(String),

    #[error("device error: {0}")]
    Device(String),

    #[error("native operation {op} failed with code {code}: {message}")]
    Native {
        op: &'static str,
        code: i32,
        message: String,
    },
}

/// The result of an `Array` operation which may fail recoverably.
pub type Result<T> = std::result::Result<T, ArrayError>;
