//! Reductions, scans, sorting and set operations.
//!
//! Each reduction over an axis has an `*_all` counterpart which reduces every element of the
//! array to a host [`Scalar`].

use std::os::raw::{c_double, c_int, c_uint};

use super::ffi::{self, dim_t, IndexedAllFn, IndexedFn, ReduceFn, ReduceNanAllFn, ReduceNanFn};
use super::ffi::{AF_BINARY_ADD, AF_BINARY_MAX, AF_BINARY_MIN, AF_BINARY_MUL};
use super::ffi::{AF_VARIANCE_POPULATION, AF_VARIANCE_SAMPLE};
use super::handle::{Handle, ReduceOp};
use super::native::{self, af_call};
use super::ops::gate;
use super::{Array, ArrayError, Category, Complex, Dtype, Result, Scalar, Shape};

fn reduced_shape(shape: &Shape, axis: usize, keepdims: bool) -> Shape {
    if keepdims {
        shape.with_axis(axis, 1)
    } else {
        shape.remove_axis(axis)
    }
}

/// Wrap the output of a native reduction, whose reduced axis has length 1.
fn wrap_reduced(handle: Handle, shape: &Shape, axis: usize, keepdims: bool) -> Result<Array> {
    let shape = reduced_shape(shape, axis, keepdims);
    let handle = handle.moddims(shape.dims4())?;
    Array::from_handle_with_shape(handle, shape)
}

/// Convert the (real, imaginary) output of a native reduction to a host scalar of `dtype`'s kind.
fn host_scalar(dtype: Dtype, (real, imag): (f64, f64)) -> Scalar {
    if dtype == Dtype::Bool {
        Scalar::Bool(real != 0.)
    } else if dtype.is(Category::Integer) {
        Scalar::Int(real as i128)
    } else if dtype.is(Category::ComplexFloating) {
        Scalar::Complex(Complex::new(real, imag))
    } else {
        Scalar::Float(real)
    }
}

fn reduce(op: ReduceOp, array: &Array, axis: i64, keepdims: bool) -> Result<Array> {
    let axis = array.shape().axis(axis)?;
    let handle = array.handle().reduce(op, axis)?;
    wrap_reduced(handle, array.shape(), axis, keepdims)
}

fn reduce_all(op: ReduceOp, array: &Array, dtype: Dtype) -> Result<Scalar> {
    array
        .handle()
        .reduce_all(op)
        .map(|result| host_scalar(dtype, result))
}

/// The kind of the sum or product of elements of `dtype`; booleans are counted.
fn accumulator(dtype: Dtype) -> Dtype {
    if dtype == Dtype::Bool {
        Dtype::UInt32
    } else {
        dtype
    }
}

macro_rules! reductions {
    ($($(#[$meta:meta])* $name:ident, $name_all:ident => $op:ident, $kind:expr;)*) => {
        $(
            $(#[$meta])*
            pub fn $name(array: &Array, axis: i64, keepdims: bool) -> Result<Array> {
                reduce(ReduceOp::$op, array, axis, keepdims)
            }

            $(#[$meta])*
            pub fn $name_all(array: &Array) -> Result<Scalar> {
                let kind: fn(Dtype) -> Dtype = $kind;
                reduce_all(ReduceOp::$op, array, kind(array.dtype()))
            }
        )*
    };
}

reductions! {
    /// The sum of the elements of an array.
    sum, sum_all => Sum, accumulator;
    /// The product of the elements of an array.
    product, product_all => Product, accumulator;
    /// The minimum element of an array.
    min, min_all => Min, |dtype| dtype;
    /// The maximum element of an array.
    max, max_all => Max, |dtype| dtype;
    /// Return `true` if any element of an array is non-zero.
    any_true, any_true_all => AnyTrue, |_| Dtype::Bool;
    /// Return `true` if every element of an array is non-zero.
    all_true, all_true_all => AllTrue, |_| Dtype::Bool;
    /// The number of non-zero elements of an array.
    count, count_all => Count, |_| Dtype::UInt32;
}

#[derive(Clone, Copy)]
enum NanOp {
    Sum,
    Product,
}

impl NanOp {
    fn symbols(self) -> ((&'static str, ReduceNanFn), (&'static str, ReduceNanAllFn)) {
        match self {
            Self::Sum => (
                ("af_sum_nan", ffi::af_sum_nan),
                ("af_sum_nan_all", ffi::af_sum_nan_all),
            ),
            Self::Product => (
                ("af_product_nan", ffi::af_product_nan),
                ("af_product_nan_all", ffi::af_product_nan_all),
            ),
        }
    }
}

fn reduce_nan(op: NanOp, array: &Array, axis: i64, keepdims: bool, nan: f64) -> Result<Array> {
    gate(nan_name(op), Category::Floating, array.dtype())?;

    let axis = array.shape().axis(axis)?;
    let ((name, f), _) = op.symbols();
    let handle = Handle::create(|out| {
        native::check(name, unsafe {
            f(out, array.handle().get(), axis as c_int, nan as c_double)
        })
    })?;

    wrap_reduced(handle, array.shape(), axis, keepdims)
}

fn reduce_nan_all(op: NanOp, array: &Array, nan: f64) -> Result<Scalar> {
    gate(nan_name(op), Category::Floating, array.dtype())?;

    let (_, (name, f)) = op.symbols();
    let (mut real, mut imag) = (0., 0.);
    native::check(name, unsafe {
        f(&mut real, &mut imag, array.handle().get(), nan as c_double)
    })?;

    Ok(host_scalar(array.dtype(), (real, imag)))
}

fn nan_name(op: NanOp) -> &'static str {
    match op {
        NanOp::Sum => "sum_nan",
        NanOp::Product => "product_nan",
    }
}

/// The sum of the elements of an array, with NaN elements replaced by `nan_value`.
pub fn sum_nan(array: &Array, axis: i64, keepdims: bool, nan_value: f64) -> Result<Array> {
    reduce_nan(NanOp::Sum, array, axis, keepdims, nan_value)
}

pub fn sum_nan_all(array: &Array, nan_value: f64) -> Result<Scalar> {
    reduce_nan_all(NanOp::Sum, array, nan_value)
}

/// The product of the elements of an array, with NaN elements replaced by `nan_value`.
pub fn product_nan(array: &Array, axis: i64, keepdims: bool, nan_value: f64) -> Result<Array> {
    reduce_nan(NanOp::Product, array, axis, keepdims, nan_value)
}

pub fn product_nan_all(array: &Array, nan_value: f64) -> Result<Scalar> {
    reduce_nan_all(NanOp::Product, array, nan_value)
}

fn indexed(
    (name, f): (&'static str, IndexedFn),
    array: &Array,
    axis: i64,
    keepdims: bool,
) -> Result<(Array, Array)> {
    let axis = array.shape().axis(axis)?;
    let (values, indices) = Handle::create2(|out, idx| {
        native::check(name, unsafe { f(out, idx, array.handle().get(), axis as c_int) })
    })?;

    Ok((
        wrap_reduced(values, array.shape(), axis, keepdims)?,
        wrap_reduced(indices, array.shape(), axis, keepdims)?,
    ))
}

fn indexed_all((name, f): (&'static str, IndexedAllFn), array: &Array) -> Result<(Scalar, u64)> {
    if array.is_empty() {
        return Err(ArrayError::Shape(format!(
            "{} of an empty array is undefined",
            name
        )));
    }

    let (mut real, mut imag, mut index): (f64, f64, c_uint) = (0., 0., 0);
    native::check(name, unsafe {
        f(&mut real, &mut imag, &mut index, array.handle().get())
    })?;

    Ok((host_scalar(array.dtype(), (real, imag)), index as u64))
}

/// The minimum elements of an array along `axis`, and their offsets along `axis`.
pub fn imin(array: &Array, axis: i64, keepdims: bool) -> Result<(Array, Array)> {
    indexed(("af_imin", ffi::af_imin), array, axis, keepdims)
}

/// The maximum elements of an array along `axis`, and their offsets along `axis`.
pub fn imax(array: &Array, axis: i64, keepdims: bool) -> Result<(Array, Array)> {
    indexed(("af_imax", ffi::af_imax), array, axis, keepdims)
}

/// The minimum element of an array and its linear (column-major) offset.
pub fn imin_all(array: &Array) -> Result<(Scalar, u64)> {
    indexed_all(("af_imin_all", ffi::af_imin_all), array)
}

/// The maximum element of an array and its linear (column-major) offset.
pub fn imax_all(array: &Array) -> Result<(Scalar, u64)> {
    indexed_all(("af_imax_all", ffi::af_imax_all), array)
}

/// Whether a variance is computed for a sample or for a whole population.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VarianceBias {
    /// Divide by `n - 1`.
    Sample,
    /// Divide by `n`.
    Population,
}

impl VarianceBias {
    fn code(self) -> c_int {
        match self {
            Self::Sample => AF_VARIANCE_SAMPLE,
            Self::Population => AF_VARIANCE_POPULATION,
        }
    }
}

/// The kind of a statistic of elements of `dtype`.
fn statistic(dtype: Dtype) -> Dtype {
    if dtype.is(Category::ComplexFloating) {
        dtype
    } else {
        Dtype::Float64
    }
}

pub fn mean(array: &Array, axis: i64, keepdims: bool) -> Result<Array> {
    gate("mean", Category::Numeric, array.dtype())?;

    let axis = array.shape().axis(axis)?;
    let handle =
        Handle::create(|out| af_call!(af_mean(out, array.handle().get(), axis as dim_t)))?;

    wrap_reduced(handle, array.shape(), axis, keepdims)
}

pub fn mean_all(array: &Array) -> Result<Scalar> {
    gate("mean", Category::Numeric, array.dtype())?;

    let (mut real, mut imag) = (0., 0.);
    af_call!(af_mean_all(&mut real, &mut imag, array.handle().get()))?;
    Ok(host_scalar(statistic(array.dtype()), (real, imag)))
}

pub fn var(array: &Array, axis: i64, keepdims: bool, bias: VarianceBias) -> Result<Array> {
    gate("var", Category::Numeric, array.dtype())?;

    let axis = array.shape().axis(axis)?;
    let handle = Handle::create(|out| {
        af_call!(af_var_v2(
            out,
            array.handle().get(),
            bias.code(),
            axis as dim_t
        ))
    })?;

    wrap_reduced(handle, array.shape(), axis, keepdims)
}

pub fn var_all(array: &Array, bias: VarianceBias) -> Result<Scalar> {
    gate("var", Category::Numeric, array.dtype())?;

    let (mut real, mut imag) = (0., 0.);
    af_call!(af_var_all_v2(
        &mut real,
        &mut imag,
        array.handle().get(),
        bias.code()
    ))?;

    Ok(host_scalar(statistic(array.dtype()), (real, imag)))
}

/// The standard deviation of the elements of an array along `axis`.
pub fn stdev(array: &Array, axis: i64, keepdims: bool, bias: VarianceBias) -> Result<Array> {
    gate("stdev", Category::Numeric, array.dtype())?;

    let axis = array.shape().axis(axis)?;
    let handle = Handle::create(|out| {
        af_call!(af_stdev_v2(
            out,
            array.handle().get(),
            bias.code(),
            axis as dim_t
        ))
    })?;

    wrap_reduced(handle, array.shape(), axis, keepdims)
}

pub fn stdev_all(array: &Array, bias: VarianceBias) -> Result<Scalar> {
    gate("stdev", Category::Numeric, array.dtype())?;

    let (mut real, mut imag) = (0., 0.);
    af_call!(af_stdev_all_v2(
        &mut real,
        &mut imag,
        array.handle().get(),
        bias.code()
    ))?;

    Ok(host_scalar(statistic(array.dtype()), (real, imag)))
}

/// The inclusive cumulative sum of an array along `axis`.
pub fn accum(array: &Array, axis: i64) -> Result<Array> {
    let axis = array.shape().axis(axis)?;
    let handle =
        Handle::create(|out| af_call!(af_accum(out, array.handle().get(), axis as c_int)))?;

    Array::from_handle_with_shape(handle, *array.shape())
}

/// The binary operator of a scan.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScanOp {
    Add,
    Mul,
    Min,
    Max,
}

impl ScanOp {
    fn code(self) -> c_int {
        match self {
            Self::Add => AF_BINARY_ADD,
            Self::Mul => AF_BINARY_MUL,
            Self::Min => AF_BINARY_MIN,
            Self::Max => AF_BINARY_MAX,
        }
    }
}

/// Scan an array along `axis` with the given operator.
pub fn scan(array: &Array, axis: i64, op: ScanOp, inclusive: bool) -> Result<Array> {
    let axis = array.shape().axis(axis)?;
    let handle = Handle::create(|out| {
        af_call!(af_scan(
            out,
            array.handle().get(),
            axis as c_int,
            op.code(),
            inclusive
        ))
    })?;

    Array::from_handle_with_shape(handle, *array.shape())
}

/// Scan an array along `axis`, restarting wherever the value of `keys` changes.
pub fn scan_by_key(
    keys: &Array,
    array: &Array,
    axis: i64,
    op: ScanOp,
    inclusive: bool,
) -> Result<Array> {
    gate("scan_by_key", Category::Integer, keys.dtype())?;

    if keys.shape() != array.shape() {
        return Err(ArrayError::Shape(format!(
            "scan keys with shape {} do not match values with shape {}",
            keys.shape(),
            array.shape()
        )));
    }

    let axis = array.shape().axis(axis)?;
    let handle = Handle::create(|out| {
        af_call!(af_scan_by_key(
            out,
            keys.handle().get(),
            array.handle().get(),
            axis as c_int,
            op.code(),
            inclusive
        ))
    })?;

    Array::from_handle_with_shape(handle, *array.shape())
}

/// The linear (column-major) offsets of the non-zero elements of an array, as `uint32`.
pub fn where_(array: &Array) -> Result<Array> {
    let handle = Handle::create(|idx| af_call!(af_where(idx, array.handle().get())))?;
    let len = handle.size()?;
    Array::from_handle_with_shape(handle, Shape::vector(len))
}

fn difference(
    (name, f): (&'static str, ReduceFn),
    order: u64,
    array: &Array,
    axis: i64,
) -> Result<Array> {
    let axis = array.shape().axis(axis)?;
    let len = array.shape().dims4()[axis];
    if len <= order {
        return Err(ArrayError::Shape(format!(
            "{} requires more than {} elements along axis {} of shape {}",
            name,
            order,
            axis,
            array.shape()
        )));
    }

    let handle = Handle::create(|out| {
        native::check(name, unsafe { f(out, array.handle().get(), axis as c_int) })
    })?;

    Array::from_handle_with_shape(handle, array.shape().with_axis(axis, len - order))
}

/// The first-order difference of an array along `axis`.
pub fn diff1(array: &Array, axis: i64) -> Result<Array> {
    difference(("af_diff1", ffi::af_diff1), 1, array, axis)
}

/// The second-order difference of an array along `axis`.
pub fn diff2(array: &Array, axis: i64) -> Result<Array> {
    difference(("af_diff2", ffi::af_diff2), 2, array, axis)
}

fn wrap_vector(handle: Handle) -> Result<Array> {
    let len = handle.size()?;
    let handle = handle.moddims([len, 1, 1, 1])?;
    Array::from_handle_with_shape(handle, Shape::vector(len))
}

/// The unique elements of an array, in ascending order.
pub fn set_unique(array: &Array, is_sorted: bool) -> Result<Array> {
    let handle =
        Handle::create(|out| af_call!(af_set_unique(out, array.handle().get(), is_sorted)))?;

    wrap_vector(handle)
}

/// The unique elements of two arrays.
pub fn set_union(first: &Array, second: &Array, is_unique: bool) -> Result<Array> {
    require_same_dtype("set_union", first, second)?;

    let handle = Handle::create(|out| {
        af_call!(af_set_union(
            out,
            first.handle().get(),
            second.handle().get(),
            is_unique
        ))
    })?;

    wrap_vector(handle)
}

/// The unique elements present in both of two arrays.
pub fn set_intersect(first: &Array, second: &Array, is_unique: bool) -> Result<Array> {
    require_same_dtype("set_intersect", first, second)?;

    let handle = Handle::create(|out| {
        af_call!(af_set_intersect(
            out,
            first.handle().get(),
            second.handle().get(),
            is_unique
        ))
    })?;

    wrap_vector(handle)
}

fn require_same_dtype(name: &str, first: &Array, second: &Array) -> Result<()> {
    if first.dtype() == second.dtype() {
        Ok(())
    } else {
        Err(ArrayError::TypeMismatch(format!(
            "{} requires arrays of the same dtype, not {} and {}",
            name,
            first.dtype(),
            second.dtype()
        )))
    }
}

pub fn sort(array: &Array, axis: i64, is_ascending: bool) -> Result<Array> {
    let axis = array.shape().axis(axis)?;
    let handle = Handle::create(|out| {
        af_call!(af_sort(
            out,
            array.handle().get(),
            axis as c_uint,
            is_ascending
        ))
    })?;

    Array::from_handle_with_shape(handle, *array.shape())
}

/// Sort an array along `axis`, returning the sorted values and their original offsets.
pub fn sort_index(array: &Array, axis: i64, is_ascending: bool) -> Result<(Array, Array)> {
    let axis = array.shape().axis(axis)?;
    let (values, indices) = Handle::create2(|out, idx| {
        af_call!(af_sort_index(
            out,
            idx,
            array.handle().get(),
            axis as c_uint,
            is_ascending
        ))
    })?;

    Ok((
        Array::from_handle_with_shape(values, *array.shape())?,
        Array::from_handle_with_shape(indices, *array.shape())?,
    ))
}

/// Sort `values` along `axis` in the order of `keys`, returning the sorted keys and values.
pub fn sort_by_key(
    keys: &Array,
    values: &Array,
    axis: i64,
    is_ascending: bool,
) -> Result<(Array, Array)> {
    if keys.shape() != values.shape() {
        return Err(ArrayError::Shape(format!(
            "sort keys with shape {} do not match values with shape {}",
            keys.shape(),
            values.shape()
        )));
    }

    let axis = values.shape().axis(axis)?;
    let (sorted_keys, sorted_values) = Handle::create2(|out_keys, out_values| {
        af_call!(af_sort_by_key(
            out_keys,
            out_values,
            keys.handle().get(),
            values.handle().get(),
            axis as c_uint,
            is_ascending
        ))
    })?;

    Ok((
        Array::from_handle_with_shape(sorted_keys, *keys.shape())?,
        Array::from_handle_with_shape(sorted_values, *values.shape())?,
    ))
}

/// Options for [`sort_by`].
#[derive(Clone, Copy)]
pub struct SortOptions<'a> {
    pub axis: i64,
    pub is_ascending: bool,
    /// Sort in the order of these keys instead of the values themselves.
    pub keys: Option<&'a Array>,
    /// Return the offsets which would sort the array instead of the sorted values.
    pub is_index_array: bool,
}

impl<'a> Default for SortOptions<'a> {
    fn default() -> Self {
        Self {
            axis: 0,
            is_ascending: true,
            keys: None,
            is_index_array: false,
        }
    }
}

/// Sort an array according to the given `options`.
pub fn sort_by(array: &Array, options: &SortOptions) -> Result<Array> {
    match (options.keys, options.is_index_array) {
        (Some(_), true) => Err(ArrayError::TypeMismatch(
            "keys and is_index_array are mutually exclusive".to_string(),
        )),
        (Some(keys), false) => {
            sort_by_key(keys, array, options.axis, options.is_ascending).map(|(_, values)| values)
        }
        (None, true) => {
            sort_index(array, options.axis, options.is_ascending).map(|(_, indices)| indices)
        }
        (None, false) => sort(array, options.axis, options.is_ascending),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> Array {
        // [[1, 2, 3], [4, 5, 6]]
        Array::from_slice(&[1i32, 4, 2, 5, 3, 6], &Shape::new(&[2, 3]).unwrap()).unwrap()
    }

    #[test]
    fn test_sum() {
        let a = Array::from_vec(vec![1i32, 2, 3, 4]).unwrap();
        assert_eq!(sum_all(&a).unwrap(), Scalar::Int(10));

        let m = matrix();
        let rows = sum(&m, 1, false).unwrap();
        assert_eq!(rows.shape().dims(), &[2]);
        assert_eq!(rows.to_vec::<i32>().unwrap(), vec![6, 15]);

        let cols = sum(&m, 0, true).unwrap();
        assert_eq!(cols.shape().dims(), &[1, 3]);
        assert_eq!(cols.to_vec::<i32>().unwrap(), vec![5, 7, 9]);

        assert!(sum(&m, 2, false).is_err());
    }

    #[test]
    fn test_min_max() {
        let m = matrix();
        assert_eq!(min_all(&m).unwrap(), Scalar::Int(1));
        assert_eq!(max_all(&m).unwrap(), Scalar::Int(6));
        assert_eq!(max(&m, -1, false).unwrap().to_vec::<i32>().unwrap(), vec![3, 6]);

        let (values, indices) = imax(&m, 0, false).unwrap();
        assert_eq!(values.to_vec::<i32>().unwrap(), vec![4, 5, 6]);
        assert_eq!(indices.to_vec::<u32>().unwrap(), vec![1, 1, 1]);

        assert_eq!(imin_all(&m).unwrap(), (Scalar::Int(1), 0));
    }

    #[test]
    fn test_any_all_count() {
        let ones = crate::constant(1, &Shape::new(&[2, 2]).unwrap(), Some(Dtype::Int32)).unwrap();
        assert_eq!(all_true_all(&ones).unwrap(), Scalar::Bool(true));

        let zeros = crate::constant(0, &Shape::new(&[2, 2]).unwrap(), Some(Dtype::Int32)).unwrap();
        assert_eq!(any_true_all(&zeros).unwrap(), Scalar::Bool(false));

        let mask = Array::from_vec(vec![true, false, true]).unwrap();
        assert_eq!(count_all(&mask).unwrap(), Scalar::Int(2));
        assert_eq!(sum_all(&mask).unwrap(), Scalar::Int(2));
    }

    #[test]
    fn test_nan_reductions() {
        let a = Array::from_vec(vec![1.0f64, f64::NAN, 2.0]).unwrap();
        assert_eq!(sum_nan_all(&a, 0.).unwrap(), Scalar::Float(3.0));
        assert_eq!(product_nan_all(&a, 1.).unwrap(), Scalar::Float(2.0));
        assert_eq!(sum_nan(&a, 0, false, 10.).unwrap().to_vec::<f64>().unwrap(), vec![13.0]);

        let ints = Array::from_vec(vec![1i32]).unwrap();
        assert!(sum_nan_all(&ints, 0.).is_err());
    }

    #[test]
    fn test_statistics() {
        let a = Array::from_vec(vec![1.0f32, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(mean_all(&a).unwrap(), Scalar::Float(2.5));
        assert_eq!(var_all(&a, VarianceBias::Population).unwrap(), Scalar::Float(1.25));

        let sample = var_all(&a, VarianceBias::Sample).unwrap().as_f64().unwrap();
        assert!((sample - 5. / 3.).abs() < 1e-6);

        let m = matrix().astype(Dtype::Float32).unwrap();
        let means = mean(&m, 0, false).unwrap();
        assert_eq!(means.to_vec::<f32>().unwrap(), vec![2.5, 3.5, 4.5]);
    }

    #[test]
    fn test_scan() {
        let a = Array::from_vec(vec![1i32, 2, 3]).unwrap();
        assert_eq!(accum(&a, 0).unwrap().to_vec::<i32>().unwrap(), vec![1, 3, 6]);
        assert_eq!(
            scan(&a, 0, ScanOp::Mul, true).unwrap().to_vec::<i32>().unwrap(),
            vec![1, 2, 6]
        );
        assert_eq!(
            scan(&a, 0, ScanOp::Add, false).unwrap().to_vec::<i32>().unwrap(),
            vec![0, 1, 3]
        );

        let keys = Array::from_vec(vec![0i32, 0, 1]).unwrap();
        assert_eq!(
            scan_by_key(&keys, &a, 0, ScanOp::Add, true).unwrap().to_vec::<i32>().unwrap(),
            vec![1, 3, 3]
        );
    }

    #[test]
    fn test_where_and_diff() {
        let a = Array::from_vec(vec![0i32, 3, 0, 5]).unwrap();
        assert_eq!(where_(&a).unwrap().to_vec::<u32>().unwrap(), vec![1, 3]);

        let zeros = Array::from_vec(vec![0i32, 0]).unwrap();
        assert!(where_(&zeros).unwrap().is_empty());

        let b = Array::from_vec(vec![1i32, 4, 9, 16]).unwrap();
        assert_eq!(diff1(&b, 0).unwrap().to_vec::<i32>().unwrap(), vec![3, 5, 7]);
        assert_eq!(diff2(&b, 0).unwrap().to_vec::<i32>().unwrap(), vec![2, 2]);
        assert!(diff2(&Array::from_vec(vec![1i32, 2]).unwrap(), 0).is_err());
    }

    #[test]
    fn test_sets() {
        let a = Array::from_vec(vec![3i32, 1, 3, 2]).unwrap();
        let b = Array::from_vec(vec![2i32, 5]).unwrap();
        assert_eq!(set_unique(&a, false).unwrap().to_vec::<i32>().unwrap(), vec![1, 2, 3]);
        assert_eq!(set_union(&a, &b, false).unwrap().to_vec::<i32>().unwrap(), vec![1, 2, 3, 5]);
        assert_eq!(set_intersect(&a, &b, false).unwrap().to_vec::<i32>().unwrap(), vec![2]);
    }

    #[test]
    fn test_sort() {
        let a = Array::from_vec(vec![3i32, 1, 2]).unwrap();
        assert_eq!(sort(&a, 0, true).unwrap().to_vec::<i32>().unwrap(), vec![1, 2, 3]);
        assert_eq!(sort(&a, 0, false).unwrap().to_vec::<i32>().unwrap(), vec![3, 2, 1]);

        let options = SortOptions {
            is_index_array: true,
            ..Default::default()
        };
        assert_eq!(sort_by(&a, &options).unwrap().to_vec::<u32>().unwrap(), vec![1, 2, 0]);

        let keys = Array::from_vec(vec![2i32, 0, 1]).unwrap();
        let options = SortOptions {
            keys: Some(&keys),
            ..Default::default()
        };
        assert_eq!(sort_by(&a, &options).unwrap().to_vec::<i32>().unwrap(), vec![1, 2, 3]);

        let options = SortOptions {
            keys: Some(&keys),
            is_index_array: true,
            ..Default::default()
        };
        assert!(matches!(sort_by(&a, &options), Err(ArrayError::TypeMismatch(_))));
    }
}
