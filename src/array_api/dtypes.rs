//! Data type functions.

use crate::ops::gate;
use crate::{ArrayError, Category, Dtype, FInfo, IInfo, Result};

use super::Array;

/// The dtypes defined by the standard, in registry order.
pub fn dtypes() -> Vec<Dtype> {
    Dtype::ALL
        .iter()
        .copied()
        .filter(|dtype| *dtype != Dtype::Float16)
        .collect()
}

/// Reject a dtype which the standard does not define.
pub fn check_dtype(dtype: Dtype) -> Result<()> {
    if dtype == Dtype::Float16 {
        Err(ArrayError::UnsupportedDtype(format!(
            "{} is not an Array API dtype",
            dtype
        )))
    } else {
        Ok(())
    }
}

/// Reject an operand whose dtype is outside the category `op` admits.
pub fn check_allowed(op: &str, category: Category, x: &Array) -> Result<()> {
    gate(op, category, x.dtype())
}

/// The default floating-point dtype of this namespace.
pub const DEFAULT_FLOAT: Dtype = Dtype::Float32;

/// The default integer dtype of this namespace.
pub const DEFAULT_INT: Dtype = Dtype::Int64;

/// Copy `x` to a new array of the given `dtype`.
///
/// If `copy` is false and `x` already has the requested dtype, the result shares its storage.
pub fn astype(x: &Array, dtype: Dtype, copy: bool) -> Result<Array> {
    check_dtype(dtype)?;

    let inner = if dtype == x.dtype() && !copy {
        x.as_facade().retain()?
    } else {
        x.as_facade().astype(dtype)?
    };

    Ok(Array::new(inner))
}

/// The dtype which results from promoting the given arrays and dtypes together.
pub fn result_type(dtypes: &[Dtype]) -> Result<Dtype> {
    for dtype in dtypes {
        check_dtype(*dtype)?;
    }

    crate::result_type(dtypes)
}

/// Return `true` if `from` can be promoted to `to` without a change of kind.
pub fn can_cast(from: Dtype, to: Dtype) -> bool {
    check_dtype(from).is_ok() && check_dtype(to).is_ok() && crate::can_cast(from, to)
}

/// Return `true` if `dtype` belongs to the given `kind`.
pub fn isdtype(dtype: Dtype, kind: Category) -> bool {
    check_dtype(dtype).is_ok() && dtype.is(kind)
}

/// Machine limits of a floating-point dtype.
pub fn finfo(dtype: Dtype) -> Result<FInfo> {
    check_dtype(dtype)?;
    crate::finfo(dtype)
}

/// Machine limits of an integer dtype.
pub fn iinfo(dtype: Dtype) -> Result<IInfo> {
    check_dtype(dtype)?;
    crate::iinfo(dtype)
}
