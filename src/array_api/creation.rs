//! Creation functions.

use crate::{constant, flip, range, select, ArrayError, Category, Dtype, Result, Scalar, Shape};

use super::{check_allowed, check_dtype, Array, DEFAULT_FLOAT, DEFAULT_INT};

/// Construct an array from a sequence of host scalars.
///
/// With no `shape`, the result is one-dimensional. With no `dtype`, the dtype is inferred from
/// the values: `bool`, then `int64`, then `complex64` if any value is complex, else `float32`.
pub fn asarray(values: &[Scalar], shape: Option<&Shape>, dtype: Option<Dtype>) -> Result<Array> {
    if let Some(dtype) = dtype {
        check_dtype(dtype)?;
    }

    crate::Array::from_scalars(values, shape, dtype).map(Array::new)
}

fn real(name: &str, value: Scalar) -> Result<f64> {
    value.as_f64().ok_or_else(|| {
        ArrayError::TypeMismatch(format!("{} requires a real number, not {}", name, value))
    })
}

/// Evenly spaced values within the half-open interval `[start, stop)`.
///
/// With no `stop`, the interval is `[0, start)`. With no `dtype`, the result is `int64` if every
/// argument is an integer, else `float32`.
pub fn arange<S: Into<Scalar>>(
    start: S,
    stop: Option<S>,
    step: S,
    dtype: Option<Dtype>,
) -> Result<Array> {
    let (start, stop, step) = match stop {
        Some(stop) => (start.into(), stop.into(), step.into()),
        None => (Scalar::Int(0), start.into(), step.into()),
    };

    let dtype = match dtype {
        Some(dtype) => dtype,
        None if [start, stop, step].iter().all(|s| matches!(s, Scalar::Int(_))) => DEFAULT_INT,
        None => DEFAULT_FLOAT,
    };

    check_dtype(dtype)?;
    if !dtype.is(Category::RealNumeric) {
        return Err(ArrayError::TypeMismatch(format!(
            "arange requires a real numeric dtype, not {}",
            dtype
        )));
    }

    if let (Scalar::Int(start), Scalar::Int(stop), Scalar::Int(step)) = (start, stop, step) {
        if dtype.is(Category::Integer) {
            return integer_range(start, stop, step, dtype);
        }
    }

    let (start, stop, step) = (
        real("arange", start)?,
        real("arange", stop)?,
        real("arange", step)?,
    );

    if step == 0. || !step.is_finite() {
        return Err(ArrayError::TypeMismatch(format!(
            "invalid arange step {}",
            step
        )));
    }

    let len = ((stop - start) / step).ceil();
    if !(len > 0.) {
        return empty(&Shape::vector(0), Some(dtype));
    }

    sequence(len as u64, start, step, dtype)
}

/// An integer `arange`, computed exactly in 64-bit integers.
fn integer_range(start: i128, stop: i128, step: i128, dtype: Dtype) -> Result<Array> {
    let overflow = |value: i128| ArrayError::Overflow {
        value: value.to_string(),
        dtype,
    };

    if step == 0 {
        return Err(ArrayError::TypeMismatch("invalid arange step 0".to_string()));
    }

    let distance = if step > 0 {
        stop.checked_sub(start)
    } else {
        start.checked_sub(stop)
    };

    let distance = distance.ok_or_else(|| overflow(stop))?;
    if distance <= 0 {
        return empty(&Shape::vector(0), Some(dtype));
    }

    let stride = step.unsigned_abs();
    let len = (distance as u128 - 1) / stride + 1;
    let len = u64::try_from(len).map_err(|_| overflow(stop))?;

    // the distance between the first and last values, less than `distance`
    let span = stride * (len as u128 - 1);
    let (low, high) = if step > 0 {
        (start, start + span as i128)
    } else {
        (start - span as i128, start)
    };

    let (min, max) = dtype.int_bounds().ok_or_else(|| overflow(start))?;
    if low < min {
        return Err(overflow(low));
    } else if high > max {
        return Err(overflow(high));
    }

    let stride = if len > 1 { stride } else { 0 };
    let stride = u64::try_from(stride).map_err(|_| overflow(step))?;
    let offsets = Shape::vector(len);
    let ascending = if low >= 0 {
        range(&offsets, 0, Dtype::UInt64)?
            .mul(stride)?
            .add(Scalar::Int(low))?
    } else {
        // int64 arithmetic wraps, and every value of the sequence is in range
        range(&offsets, 0, Dtype::Int64)?
            .mul(stride as i64)?
            .add(Scalar::Int(low))?
    };

    let values = if step < 0 {
        flip(&ascending, 0)?
    } else {
        ascending
    };

    values.astype(dtype).map(Array::new)
}

/// `start + step * i` for `i` in `0..len`, computed in `float64`.
fn sequence(len: u64, start: f64, step: f64, dtype: Dtype) -> Result<Array> {
    let offsets = range(&Shape::vector(len), 0, Dtype::Float64)?;
    offsets
        .mul(step)?
        .add(start)?
        .astype(dtype)
        .map(Array::new)
}

/// An array of the given `shape` whose contents are undefined.
pub fn empty(shape: &Shape, dtype: Option<Dtype>) -> Result<Array> {
    let dtype = dtype.unwrap_or(DEFAULT_FLOAT);
    check_dtype(dtype)?;
    crate::Array::empty(shape, dtype).map(Array::new)
}

pub fn empty_like(x: &Array, dtype: Option<Dtype>) -> Result<Array> {
    empty(x.shape(), Some(dtype.unwrap_or_else(|| x.dtype())))
}

/// A two-dimensional array with ones on its `k`th diagonal and zeros elsewhere.
pub fn eye(n_rows: u64, n_cols: Option<u64>, k: i64, dtype: Option<Dtype>) -> Result<Array> {
    let dtype = dtype.unwrap_or(DEFAULT_FLOAT);
    check_dtype(dtype)?;

    let shape = Shape::new(&[n_rows, n_cols.unwrap_or(n_rows)])?;
    let offset = diagonal_offset(&shape)?;
    offset.eq(k)?.astype(dtype).map(Array::new)
}

/// The signed diagonal of each position of a matrix: `column - row`.
fn diagonal_offset(shape: &Shape) -> Result<crate::Array> {
    let rows = range(shape, 0, Dtype::Int64)?;
    let cols = range(shape, 1, Dtype::Int64)?;
    cols.sub(&rows)
}

/// An array of the given `shape` filled with `value`.
///
/// With no `dtype`, the dtype is inferred from `value`: `bool`, `int64`, `float32` or
/// `complex64`.
pub fn full<S: Into<Scalar>>(shape: &Shape, value: S, dtype: Option<Dtype>) -> Result<Array> {
    let value = value.into();
    let dtype = match dtype {
        Some(dtype) => dtype,
        None => value.dtype()?,
    };

    check_dtype(dtype)?;
    constant(value, shape, Some(dtype)).map(Array::new)
}

pub fn full_like<S: Into<Scalar>>(x: &Array, value: S, dtype: Option<Dtype>) -> Result<Array> {
    full(x.shape(), value, Some(dtype.unwrap_or_else(|| x.dtype())))
}

/// `num` evenly spaced values over `[start, stop]`, or `[start, stop)` if not `endpoint`.
pub fn linspace(
    start: f64,
    stop: f64,
    num: u64,
    dtype: Option<Dtype>,
    endpoint: bool,
) -> Result<Array> {
    let dtype = dtype.unwrap_or(DEFAULT_FLOAT);
    check_dtype(dtype)?;

    if !dtype.is(Category::RealFloating) {
        return Err(ArrayError::TypeMismatch(format!(
            "linspace requires a real floating-point dtype, not {}",
            dtype
        )));
    }

    if num == 0 {
        return empty(&Shape::vector(0), Some(dtype));
    }

    let intervals = if endpoint { num - 1 } else { num };
    let step = if intervals == 0 {
        0.
    } else {
        (stop - start) / intervals as f64
    };

    sequence(num, start, step, dtype)
}

pub fn ones(shape: &Shape, dtype: Option<Dtype>) -> Result<Array> {
    let dtype = dtype.unwrap_or(DEFAULT_FLOAT);
    let one = if dtype == Dtype::Bool {
        Scalar::Bool(true)
    } else {
        Scalar::Int(1)
    };

    full(shape, one, Some(dtype))
}

pub fn ones_like(x: &Array, dtype: Option<Dtype>) -> Result<Array> {
    ones(x.shape(), Some(dtype.unwrap_or_else(|| x.dtype())))
}

pub fn zeros(shape: &Shape, dtype: Option<Dtype>) -> Result<Array> {
    let dtype = dtype.unwrap_or(DEFAULT_FLOAT);
    let zero = if dtype == Dtype::Bool {
        Scalar::Bool(false)
    } else {
        Scalar::Int(0)
    };

    full(shape, zero, Some(dtype))
}

pub fn zeros_like(x: &Array, dtype: Option<Dtype>) -> Result<Array> {
    zeros(x.shape(), Some(dtype.unwrap_or_else(|| x.dtype())))
}

fn triangle<F>(name: &str, x: &Array, keep: F) -> Result<Array>
where
    F: FnOnce(&crate::Array) -> Result<crate::Array>,
{
    check_allowed(name, Category::All, x)?;

    if x.ndim() < 2 {
        return Err(ArrayError::Shape(format!(
            "{} requires at least 2 dimensions, not shape {}",
            name,
            x.shape()
        )));
    }

    let mask = keep(&diagonal_offset(x.shape())?)?;
    let zeros = zeros_like(x, None)?;
    select(&mask, x.as_facade(), zeros.as_facade()).map(Array::new)
}

/// The lower triangle of a matrix (or stack of matrices), on and below the `k`th diagonal.
pub fn tril(x: &Array, k: i64) -> Result<Array> {
    triangle("tril", x, |offset| offset.le(k))
}

/// The upper triangle of a matrix (or stack of matrices), on and above the `k`th diagonal.
pub fn triu(x: &Array, k: i64) -> Result<Array> {
    triangle("triu", x, |offset| offset.ge(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<T: crate::Element>(x: &Array) -> Vec<T> {
        x.as_facade().to_vec().unwrap()
    }

    #[test]
    fn test_asarray() {
        let x = asarray(&[Scalar::Int(1), Scalar::Int(2)], None, None).unwrap();
        assert_eq!(x.dtype(), Dtype::Int64);
        assert_eq!(x.shape().dims(), &[2]);

        assert!(asarray(&[Scalar::Float(1.)], None, Some(Dtype::Float16)).is_err());
        assert!(matches!(
            asarray(&[Scalar::Int(1 << 100)], None, None),
            Err(ArrayError::Overflow { .. })
        ));
    }

    #[test]
    fn test_arange() {
        let x = arange(5, None, 1, None).unwrap();
        assert_eq!(x.dtype(), Dtype::Int64);
        assert_eq!(values::<i64>(&x), vec![0, 1, 2, 3, 4]);

        let y = arange(1.0, Some(2.0), 0.25, None).unwrap();
        assert_eq!(y.dtype(), Dtype::Float32);
        assert_eq!(values::<f32>(&y), vec![1.0, 1.25, 1.5, 1.75]);

        let down = arange(3, Some(0), -1, Some(Dtype::Int32)).unwrap();
        assert_eq!(values::<i32>(&down), vec![3, 2, 1]);

        assert_eq!(arange(3, Some(0), 1, None).unwrap().size(), 0);
        assert!(arange(0, Some(3), 0, None).is_err());
    }

    #[test]
    fn test_integer_arange() {
        let base = 1i64 << 60;
        let x = arange(base, Some(base + 3), 1, None).unwrap();
        assert_eq!(values::<i64>(&x), vec![base, base + 1, base + 2]);

        let down = arange(3, Some(0), -1, Some(Dtype::UInt8)).unwrap();
        assert_eq!(values::<u8>(&down), vec![3, 2, 1]);

        let wide = arange(-128, Some(128), 200, Some(Dtype::Int8)).unwrap();
        assert_eq!(values::<i8>(&wide), vec![-128, 72]);

        assert!(matches!(
            arange(-3, Some(3), 2, Some(Dtype::UInt8)),
            Err(ArrayError::Overflow { .. })
        ));
        assert!(matches!(
            arange(250, Some(260), 1, Some(Dtype::UInt8)),
            Err(ArrayError::Overflow { .. })
        ));
    }

    #[test]
    fn test_linspace() {
        let x = linspace(0.0, 1.0, 5, None, true).unwrap();
        assert_eq!(values::<f32>(&x), vec![0.0, 0.25, 0.5, 0.75, 1.0]);

        let y = linspace(0.0, 1.0, 4, Some(Dtype::Float64), false).unwrap();
        assert_eq!(values::<f64>(&y), vec![0.0, 0.25, 0.5, 0.75]);

        assert!(linspace(0.0, 1.0, 4, Some(Dtype::Int32), true).is_err());
    }

    #[test]
    fn test_fill() {
        let shape = Shape::new(&[2, 3]).unwrap();

        let x = full(&shape, 7, None).unwrap();
        assert_eq!(x.dtype(), Dtype::Int64);
        assert_eq!(values::<i64>(&x), vec![7; 6]);

        assert_eq!(values::<f32>(&ones(&shape, None).unwrap()), vec![1.0; 6]);
        assert_eq!(values::<bool>(&ones(&shape, Some(Dtype::Bool)).unwrap()), vec![true; 6]);
        assert_eq!(values::<bool>(&zeros(&shape, Some(Dtype::Bool)).unwrap()), vec![false; 6]);

        let like = zeros_like(&x, None).unwrap();
        assert_eq!(like.dtype(), Dtype::Int64);
        assert_eq!(like.shape(), &shape);

        assert_eq!(empty_like(&x, Some(Dtype::UInt8)).unwrap().dtype(), Dtype::UInt8);
        assert_eq!(full_like(&x, 2, None).unwrap().dtype(), Dtype::Int64);
    }

    #[test]
    fn test_eye() {
        let x = eye(2, Some(3), 1, Some(Dtype::Int32)).unwrap();
        assert_eq!(x.shape().dims(), &[2, 3]);
        // column-major
        assert_eq!(values::<i32>(&x), vec![0, 0, 1, 0, 0, 1]);

        let square = eye(3, None, 0, None).unwrap();
        assert_eq!(values::<f32>(&square)[..4], [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_triangles() {
        let x = full(&Shape::new(&[3, 3]).unwrap(), 1, Some(Dtype::Int32)).unwrap();

        let lower = tril(&x, 0).unwrap();
        assert_eq!(values::<i32>(&lower), vec![1, 1, 1, 0, 1, 1, 0, 0, 1]);

        let upper = triu(&x, 1).unwrap();
        assert_eq!(values::<i32>(&upper), vec![0, 0, 0, 1, 0, 0, 1, 1, 0]);

        assert!(tril(&ones(&Shape::vector(3), None).unwrap(), 0).is_err());
    }
}
