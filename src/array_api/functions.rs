//! Statistical, utility, searching, sorting, set and linear algebra functions.
//!
//! A reduction with `axis: None` reduces every element, producing an array with one element
//! (or, with `keepdims`, one element along each of the input's axes).

use crate::ops::Mode;
use crate::{ArrayError, Category, Dtype, Operator, Result, Shape, VarianceBias};

use super::array::binary;
use super::{check_allowed, empty, Array};

fn reduce_axes<F>(
    x: &crate::Array,
    axis: Option<i64>,
    keepdims: bool,
    f: F,
) -> Result<crate::Array>
where
    F: FnOnce(&crate::Array, i64, bool) -> Result<crate::Array>,
{
    match axis {
        Some(axis) => f(x, axis, keepdims),
        None => {
            let reduced = f(&x.flat()?, 0, false)?;
            if keepdims {
                reduced.reshape(&Shape::new(&vec![1; x.ndim()])?)
            } else {
                Ok(reduced)
            }
        }
    }
}

/// Integers are summed in the widest integer dtype of the same signedness.
fn accumulate(x: &Array) -> Result<crate::Array> {
    let dtype = x.dtype();
    if dtype.is(Category::SignedInteger) && dtype != Dtype::Int64 {
        x.as_facade().astype(Dtype::Int64)
    } else if dtype.is(Category::UnsignedInteger) && dtype != Dtype::UInt64 {
        x.as_facade().astype(Dtype::UInt64)
    } else {
        x.as_facade().retain()
    }
}

pub fn sum(x: &Array, axis: Option<i64>, keepdims: bool) -> Result<Array> {
    check_allowed("sum", Category::Numeric, x)?;
    reduce_axes(&accumulate(x)?, axis, keepdims, crate::sum).map(Array::new)
}

pub fn prod(x: &Array, axis: Option<i64>, keepdims: bool) -> Result<Array> {
    check_allowed("prod", Category::Numeric, x)?;
    reduce_axes(&accumulate(x)?, axis, keepdims, crate::product).map(Array::new)
}

pub fn max(x: &Array, axis: Option<i64>, keepdims: bool) -> Result<Array> {
    check_allowed("max", Category::RealNumeric, x)?;
    reduce_axes(x.as_facade(), axis, keepdims, crate::max).map(Array::new)
}

pub fn min(x: &Array, axis: Option<i64>, keepdims: bool) -> Result<Array> {
    check_allowed("min", Category::RealNumeric, x)?;
    reduce_axes(x.as_facade(), axis, keepdims, crate::min).map(Array::new)
}

pub fn mean(x: &Array, axis: Option<i64>, keepdims: bool) -> Result<Array> {
    check_allowed("mean", Category::RealFloating, x)?;
    reduce_axes(x.as_facade(), axis, keepdims, crate::mean).map(Array::new)
}

fn bias(correction: f64) -> Result<VarianceBias> {
    if correction == 0. {
        Ok(VarianceBias::Population)
    } else if correction == 1. {
        Ok(VarianceBias::Sample)
    } else {
        Err(ArrayError::TypeMismatch(format!(
            "unsupported degrees of freedom correction {}",
            correction
        )))
    }
}

/// The variance along `axis`, with `correction` 0 (population) or 1 (sample).
pub fn var(x: &Array, axis: Option<i64>, correction: f64, keepdims: bool) -> Result<Array> {
    check_allowed("var", Category::RealFloating, x)?;
    let bias = bias(correction)?;
    reduce_axes(x.as_facade(), axis, keepdims, |x, axis, keepdims| {
        crate::var(x, axis, keepdims, bias)
    })
    .map(Array::new)
}

/// The standard deviation along `axis`, with `correction` 0 (population) or 1 (sample).
pub fn std(x: &Array, axis: Option<i64>, correction: f64, keepdims: bool) -> Result<Array> {
    check_allowed("std", Category::RealFloating, x)?;
    let bias = bias(correction)?;
    reduce_axes(x.as_facade(), axis, keepdims, |x, axis, keepdims| {
        crate::stdev(x, axis, keepdims, bias)
    })
    .map(Array::new)
}

pub fn all(x: &Array, axis: Option<i64>, keepdims: bool) -> Result<Array> {
    reduce_axes(x.as_facade(), axis, keepdims, crate::all_true).map(Array::new)
}

pub fn any(x: &Array, axis: Option<i64>, keepdims: bool) -> Result<Array> {
    reduce_axes(x.as_facade(), axis, keepdims, crate::any_true).map(Array::new)
}

fn indexed<F>(name: &str, x: &Array, axis: Option<i64>, keepdims: bool, f: F) -> Result<Array>
where
    F: Fn(&crate::Array, i64, bool) -> Result<(crate::Array, crate::Array)>,
{
    check_allowed(name, Category::RealNumeric, x)?;

    if x.size() == 0 {
        return Err(ArrayError::Shape(format!(
            "{} of an empty array is undefined",
            name
        )));
    }

    let indices = reduce_axes(x.as_facade(), axis, keepdims, |x, axis, keepdims| {
        f(x, axis, keepdims).map(|(_, indices)| indices)
    })?;

    indices.astype(Dtype::Int64).map(Array::new)
}

/// The offsets of the maximum elements along `axis`, or of the whole (flattened) array.
pub fn argmax(x: &Array, axis: Option<i64>, keepdims: bool) -> Result<Array> {
    indexed("argmax", x, axis, keepdims, crate::imax)
}

/// The offsets of the minimum elements along `axis`, or of the whole (flattened) array.
pub fn argmin(x: &Array, axis: Option<i64>, keepdims: bool) -> Result<Array> {
    indexed("argmin", x, axis, keepdims, crate::imin)
}

/// The coordinates of the non-zero elements of `x`, one `int64` array per axis.
pub fn nonzero(x: &Array) -> Result<Vec<Array>> {
    let offsets = crate::where_(x.as_facade())?.astype(Dtype::Int64)?;

    let dims = x.shape().dims();
    if offsets.size() == 0 {
        return dims
            .iter()
            .map(|_| empty(&Shape::vector(0), Some(Dtype::Int64)))
            .collect();
    }

    let mut stride = 1i64;
    let mut coordinates = Vec::with_capacity(dims.len());
    for dim in dims {
        let coordinate = offsets.floordiv(stride)?.modulo(*dim as i64)?;
        coordinates.push(Array::new(coordinate));
        stride *= *dim as i64;
    }

    Ok(coordinates)
}

/// Choose elements from `x1` where `condition` is true and from `x2` elsewhere.
pub fn where_(condition: &Array, x1: &Array, x2: &Array) -> Result<Array> {
    check_allowed("where", Category::Boolean, condition)?;
    crate::select(condition.as_facade(), x1.as_facade(), x2.as_facade()).map(Array::new)
}

pub fn sort(x: &Array, axis: i64, descending: bool) -> Result<Array> {
    check_allowed("sort", Category::RealNumeric, x)?;
    crate::sort(x.as_facade(), axis, !descending).map(Array::new)
}

/// The offsets which would sort `x` along `axis`.
pub fn argsort(x: &Array, axis: i64, descending: bool) -> Result<Array> {
    check_allowed("argsort", Category::RealNumeric, x)?;
    let (_, indices) = crate::sort_index(x.as_facade(), axis, !descending)?;
    indices.astype(Dtype::Int64).map(Array::new)
}

/// The unique elements of `x`, flattened and in ascending order.
pub fn unique_values(x: &Array) -> Result<Array> {
    crate::set_unique(&x.as_facade().flat()?, false).map(Array::new)
}

pub fn matmul(x1: &Array, x2: &Array) -> Result<Array> {
    binary(Operator::MatMul, x1, x2.into(), Mode::Binary)
}

/// Transpose each matrix in a stack of matrices.
pub fn matrix_transpose(x: &Array) -> Result<Array> {
    x.mT()
}

/// The dot product of `x1` and `x2` along `axis`, conjugating `x1` if complex.
pub fn vecdot(x1: &Array, x2: &Array, axis: i64) -> Result<Array> {
    check_allowed("vecdot", Category::Numeric, x1)?;
    check_allowed("vecdot", Category::Numeric, x2)?;

    let product = if x1.dtype().is(Category::ComplexFloating) {
        crate::conjg(x1.as_facade())?.mul(x2.as_facade())?
    } else {
        x1.as_facade().mul(x2.as_facade())?
    };

    crate::sum(&product, axis, false).map(Array::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array_api::{asarray, full};
    use crate::Scalar;

    fn matrix() -> Array {
        // [[1, 2, 3], [4, 5, 6]]
        let values: Vec<Scalar> = [1, 4, 2, 5, 3, 6].iter().map(|i| Scalar::Int(*i)).collect();
        let shape = Shape::new(&[2, 3]).unwrap();
        asarray(&values, Some(&shape), Some(Dtype::Int32)).unwrap()
    }

    fn floats(values: &[f64]) -> Array {
        let values: Vec<Scalar> = values.iter().copied().map(Scalar::Float).collect();
        asarray(&values, None, Some(Dtype::Float64)).unwrap()
    }

    #[test]
    fn test_sum() {
        let x = matrix();

        let total = sum(&x, None, false).unwrap();
        assert_eq!(total.dtype(), Dtype::Int64);
        assert_eq!(total.shape().dims(), &[1]);
        assert_eq!(total.as_facade().to_vec::<i64>().unwrap(), vec![21]);

        let kept = sum(&x, None, true).unwrap();
        assert_eq!(kept.shape().dims(), &[1, 1]);

        let columns = sum(&x, Some(0), false).unwrap();
        assert_eq!(columns.as_facade().to_vec::<i64>().unwrap(), vec![5, 7, 9]);

        let rows = prod(&x, Some(1), true).unwrap();
        assert_eq!(rows.shape().dims(), &[2, 1]);
        assert_eq!(rows.as_facade().to_vec::<i64>().unwrap(), vec![6, 120]);

        let mask = full(&Shape::vector(2), true, None).unwrap();
        assert!(sum(&mask, None, false).is_err());
    }

    #[test]
    fn test_statistics() {
        let x = floats(&[1.0, 2.0, 3.0, 4.0]);

        assert_eq!(mean(&x, None, false).unwrap().to_float().unwrap(), 2.5);
        assert_eq!(var(&x, None, 0., false).unwrap().to_float().unwrap(), 1.25);

        let sample = var(&x, None, 1., false).unwrap().to_float().unwrap();
        assert!((sample - 5.0 / 3.0).abs() < 1e-12);

        let deviation = std(&x, Some(0), 0., false).unwrap().to_float().unwrap();
        assert!((deviation - 1.25f64.sqrt()).abs() < 1e-12);

        assert!(var(&x, None, 2., false).is_err());
        assert!(mean(&matrix(), None, false).is_err());

        assert_eq!(max(&matrix(), None, false).unwrap().to_int().unwrap(), 6);
        let smallest = min(&matrix(), Some(1), false).unwrap();
        assert_eq!(smallest.as_facade().to_vec::<i32>().unwrap(), vec![1, 4]);
    }

    #[test]
    fn test_utility() {
        let x = matrix();
        assert!(all(&x, None, false).unwrap().to_bool().unwrap());

        let zero = full(&Shape::vector(3), 0, Some(Dtype::Int32)).unwrap();
        assert!(!any(&zero, None, false).unwrap().to_bool().unwrap());
    }

    #[test]
    fn test_searching() {
        let x = matrix();

        let flat = argmax(&x, None, false).unwrap();
        assert_eq!(flat.dtype(), Dtype::Int64);
        assert_eq!(flat.to_int().unwrap(), 5);

        let per_row = argmin(&x, Some(1), false).unwrap();
        assert_eq!(per_row.as_facade().to_vec::<i64>().unwrap(), vec![0, 0]);

        let mask = x.gt(3i32).unwrap();
        let coordinates = nonzero(&mask).unwrap();
        assert_eq!(coordinates.len(), 2);
        assert_eq!(coordinates[0].as_facade().to_vec::<i64>().unwrap(), vec![1, 1, 1]);
        assert_eq!(coordinates[1].as_facade().to_vec::<i64>().unwrap(), vec![0, 1, 2]);

        let zero = full(&Shape::vector(1), 0, Some(Dtype::Int32)).unwrap();
        let chosen = where_(&mask, &x, &zero).unwrap();
        assert_eq!(chosen.as_facade().to_vec::<i32>().unwrap(), vec![0, 4, 0, 5, 0, 6]);

        assert!(where_(&x, &x, &x).is_err());
    }

    #[test]
    fn test_sorting() {
        let x = floats(&[3.0, 1.0, 2.0]);

        let ascending = sort(&x, 0, false).unwrap();
        assert_eq!(ascending.as_facade().to_vec::<f64>().unwrap(), vec![1.0, 2.0, 3.0]);

        let order = argsort(&x, 0, true).unwrap();
        assert_eq!(order.as_facade().to_vec::<i64>().unwrap(), vec![0, 2, 1]);

        let repeated = floats(&[2.0, 1.0, 2.0, 1.0]);
        let unique = unique_values(&repeated).unwrap();
        assert_eq!(unique.as_facade().to_vec::<f64>().unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_linalg() {
        let x = matrix();
        let transposed = matrix_transpose(&x).unwrap();
        assert_eq!(transposed.shape().dims(), &[3, 2]);

        let product = matmul(&x, &transposed).unwrap();
        assert_eq!(product.shape().dims(), &[2, 2]);
        // [[14, 32], [32, 77]]
        assert_eq!(product.as_facade().to_vec::<i32>().unwrap(), vec![14, 32, 32, 77]);

        let v = floats(&[1.0, 2.0, 3.0]);
        let dot = vecdot(&v, &v, 0).unwrap();
        assert_eq!(dot.to_float().unwrap(), 14.0);
    }
}
