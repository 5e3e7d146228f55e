//! An adapter conforming to the Python Array API standard, version 2022.12.
//!
//! [`Array`] here wraps a [`crate::Array`] and enforces the stricter rules of the standard:
//! every operator checks the dtype category of both operands before any promotion, `float16`
//! arrays cannot be constructed, and arrays can only be obtained from [`asarray`] or one of the
//! other creation functions.
//!
//! ```no_run
//! # use afnd::array_api as xp;
//! # use afnd::{Dtype, Scalar, Shape};
//! let x = xp::asarray(&[Scalar::Int(1), Scalar::Int(2)], None, Some(Dtype::Int32))?;
//! let y = xp::ones(&Shape::vector(2), Some(Dtype::Int32))?;
//! assert!(xp::divide(&x, &y).is_err()); // division requires a floating-point dtype
//! # Ok::<(), afnd::ArrayError>(())
//! ```

pub use array::*;
pub use creation::*;
pub use device::*;
pub use dtypes::*;
pub use elementwise::*;
pub use functions::*;

mod array;
mod creation;
mod device;
mod dtypes;
mod elementwise;
mod functions;

use super::{ArrayError, Result};

/// The version of the Array API standard implemented by this module.
pub const API_VERSION: &str = "2022.12";

/// The earliest version of the standard which this module accepts a request for.
const MIN_API_YEAR: u32 = 2021;

/// A handle to this namespace, as returned by [`array_namespace`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Namespace;

impl Namespace {
    pub fn version(&self) -> &'static str {
        API_VERSION
    }
}

/// Resolve the namespace for the requested `api_version`, which must have the form
/// `YYYY.MM` with a year no earlier than 2021. `None` requests the latest version.
pub fn array_namespace(api_version: Option<&str>) -> Result<Namespace> {
    let version = match api_version {
        None => return Ok(Namespace),
        Some(version) => version,
    };

    let year = version
        .split_once('.')
        .filter(|(year, _)| year.len() == 4)
        .and_then(|(year, _)| year.parse::<u32>().ok());

    match year {
        Some(year) if year >= MIN_API_YEAR => Ok(Namespace),
        _ => Err(ArrayError::TypeMismatch(format!(
            "unsupported API version {}, expected {} or later",
            version, MIN_API_YEAR
        ))),
    }
}
