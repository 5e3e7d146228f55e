//! Array construction and data movement: constants, sequences, joins, tiling, reordering.

use std::os::raw::{c_int, c_uint};

use log::trace;

use super::handle::{native_dims, Handle};
use super::native::af_call;
use super::{
    broadcast_shapes, check_values, promote, Array, ArrayError, Category, Dtype, Result, Scalar,
    Shape, MAX_DIMS,
};

/// Construct an array of the given `shape` with every element set to `value`.
///
/// If no `dtype` is given, the dtype of `value` is used.
pub fn constant<S: Into<Scalar>>(value: S, shape: &Shape, dtype: Option<Dtype>) -> Result<Array> {
    let value = value.into();
    let dtype = match dtype {
        Some(dtype) => {
            check_values(&[value], dtype)?;
            dtype
        }
        None => value.dtype()?,
    };

    let dims = native_dims(shape.dims4());
    let ndims = MAX_DIMS as c_uint;

    let handle = match (dtype, value) {
        (Dtype::Int64, Scalar::Int(i)) => Handle::create(|out| {
            af_call!(af_constant_long(out, i as i64, ndims, dims.as_ptr()))
        })?,
        (Dtype::UInt64, Scalar::Int(i)) => Handle::create(|out| {
            af_call!(af_constant_ulong(out, i as u64, ndims, dims.as_ptr()))
        })?,
        (dtype, value) if dtype.is(Category::ComplexFloating) => {
            let c = value.as_complex();
            Handle::create(|out| {
                af_call!(af_constant_complex(
                    out,
                    c.re,
                    c.im,
                    ndims,
                    dims.as_ptr(),
                    dtype.wire_code()
                ))
            })?
        }
        (dtype, value) => {
            let real = value.as_complex().re;
            Handle::create(|out| {
                af_call!(af_constant(out, real, ndims, dims.as_ptr(), dtype.wire_code()))
            })?
        }
    };

    Array::from_handle_with_shape(handle, *shape)
}

/// Construct an identity matrix (or batch of identity matrices) with the given `shape`.
pub fn identity(shape: &Shape, dtype: Dtype) -> Result<Array> {
    let dims = native_dims(shape.dims4());
    let handle = Handle::create(|out| {
        af_call!(af_identity(out, MAX_DIMS as c_uint, dims.as_ptr(), dtype.wire_code()))
    })?;

    Array::from_handle_with_shape(handle, *shape)
}

/// Construct an array whose elements are their own offset along `axis`.
pub fn range(shape: &Shape, axis: usize, dtype: Dtype) -> Result<Array> {
    let axis = shape.axis(axis as i64)?;
    let dims = native_dims(shape.dims4());
    let handle = Handle::create(|out| {
        af_call!(af_range(
            out,
            MAX_DIMS as c_uint,
            dims.as_ptr(),
            axis as c_int,
            dtype.wire_code()
        ))
    })?;

    Array::from_handle_with_shape(handle, *shape)
}

/// Construct an array of the given `shape` counting up from zero in column-major order, then
/// tile it `tile` times along each axis.
pub fn iota(shape: &Shape, tile: &[u64], dtype: Dtype) -> Result<Array> {
    let reps = tile_counts(tile)?;
    let dims = native_dims(shape.dims4());
    let tdims = native_dims(reps);

    let handle = Handle::create(|out| {
        af_call!(af_iota(
            out,
            MAX_DIMS as c_uint,
            dims.as_ptr(),
            MAX_DIMS as c_uint,
            tdims.as_ptr(),
            dtype.wire_code()
        ))
    })?;

    let shape = tiled_shape(shape, tile.len(), reps)?;
    Array::from_handle_with_shape(handle, shape)
}

/// Construct a square matrix with the given vector on its `k`th diagonal.
pub fn diag_create(vector: &Array, k: i32) -> Result<Array> {
    if vector.ndim() != 1 {
        return Err(ArrayError::Shape(format!(
            "diag_create requires a vector, not shape {}",
            vector.shape()
        )));
    }

    let handle =
        Handle::create(|out| af_call!(af_diag_create(out, vector.handle().get(), k as c_int)))?;

    Array::from_handle_with_ndim(handle, 2)
}

/// Extract the `k`th diagonal of a matrix.
pub fn diag_extract(matrix: &Array, k: i32) -> Result<Array> {
    require_matrix("diag_extract", matrix)?;

    let handle =
        Handle::create(|out| af_call!(af_diag_extract(out, matrix.handle().get(), k as c_int)))?;

    Array::from_handle_with_ndim(handle, 1)
}

/// The lower triangle of a matrix.
pub fn lower(matrix: &Array, is_unit_diag: bool) -> Result<Array> {
    require_matrix("lower", matrix)?;
    let handle = Handle::create(|out| af_call!(af_lower(out, matrix.handle().get(), is_unit_diag)))?;
    Array::from_handle_with_shape(handle, *matrix.shape())
}

/// The upper triangle of a matrix.
pub fn upper(matrix: &Array, is_unit_diag: bool) -> Result<Array> {
    require_matrix("upper", matrix)?;
    let handle = Handle::create(|out| af_call!(af_upper(out, matrix.handle().get(), is_unit_diag)))?;
    Array::from_handle_with_shape(handle, *matrix.shape())
}

/// Join two arrays of the same dtype along the given `axis`.
///
/// Every other axis must have the same length in both arrays.
pub fn join(axis: i64, first: &Array, second: &Array) -> Result<Array> {
    if first.dtype() != second.dtype() {
        return Err(ArrayError::TypeMismatch(format!(
            "cannot join arrays of dtype {} and {}",
            first.dtype(),
            second.dtype()
        )));
    }

    let ndim = Ord::max(first.ndim(), second.ndim());
    let axis = Shape::new(&vec![1; ndim])?.axis(axis)?;

    let (l, r) = (first.shape().dims4(), second.shape().dims4());
    for i in (0..MAX_DIMS).filter(|i| *i != axis) {
        if l[i] != r[i] {
            return Err(ArrayError::Shape(format!(
                "cannot join arrays of shape {} and {} along axis {}",
                first.shape(),
                second.shape(),
                axis
            )));
        }
    }

    trace!("join {} and {} along axis {}", first.shape(), second.shape(), axis);

    let handle = Handle::create(|out| {
        af_call!(af_join(
            out,
            axis as c_int,
            first.handle().get(),
            second.handle().get()
        ))
    })?;

    let mut dims = l;
    dims[axis] = l[axis] + r[axis];
    Array::from_handle_with_shape(handle, Shape::new(&dims[..ndim])?)
}

/// Repeat an array `reps[i]` times along each axis `i`.
pub fn tile(array: &Array, reps: &[u64]) -> Result<Array> {
    let counts = tile_counts(reps)?;
    let handle = tile_handle(array.handle(), counts)?;
    let shape = tiled_shape(array.shape(), reps.len(), counts)?;
    Array::from_handle_with_shape(handle, shape)
}

fn tile_counts(reps: &[u64]) -> Result<[u64; MAX_DIMS]> {
    if reps.len() > MAX_DIMS {
        return Err(ArrayError::Shape(format!(
            "at most {} repetitions may be given, not {}",
            MAX_DIMS,
            reps.len()
        )));
    }

    let mut counts = [1; MAX_DIMS];
    counts[..reps.len()].copy_from_slice(reps);
    Ok(counts)
}

fn tiled_shape(shape: &Shape, nreps: usize, counts: [u64; MAX_DIMS]) -> Result<Shape> {
    let ndim = Ord::max(shape.ndim(), nreps);
    let dims: Vec<u64> = shape.dims4()[..ndim]
        .iter()
        .zip(counts)
        .map(|(dim, count)| dim * count)
        .collect();

    Shape::new(&dims)
}

fn tile_handle(handle: &Handle, [x, y, z, w]: [u64; MAX_DIMS]) -> Result<Handle> {
    Handle::create(|out| {
        af_call!(af_tile(
            out,
            handle.get(),
            x as c_uint,
            y as c_uint,
            z as c_uint,
            w as c_uint
        ))
    })
}

/// Broadcast an array to the given `shape`, copying it as needed.
pub fn broadcast_to(array: &Array, shape: &Shape) -> Result<Array> {
    let broadcast = broadcast_shapes(array.shape(), shape)?;
    if &broadcast != shape {
        return Err(ArrayError::Shape(format!(
            "cannot broadcast an array of shape {} to shape {}",
            array.shape(),
            shape
        )));
    }

    let handle = broadcast_handle(array, shape)?;
    Array::from_handle_with_shape(handle, *shape)
}

pub(crate) fn broadcast_handle(array: &Array, shape: &Shape) -> Result<Handle> {
    let aligned = array.shape().aligned(shape.ndim());
    let target = shape.dims4();

    let mut counts = [1; MAX_DIMS];
    for axis in 0..MAX_DIMS {
        if aligned[axis] != target[axis] {
            counts[axis] = target[axis];
        }
    }

    let handle = if aligned == array.shape().dims4() {
        array.handle().retain()?
    } else {
        array.handle().moddims(aligned)?
    };

    if counts == [1; MAX_DIMS] {
        Ok(handle)
    } else {
        tile_handle(&handle, counts)
    }
}

/// Permute the axes of an array: axis `i` of the result is axis `axes[i]` of the input.
pub fn reorder(array: &Array, axes: &[usize]) -> Result<Array> {
    let ndim = array.ndim();
    let mut seen = [false; MAX_DIMS];
    if axes.len() != ndim || axes.iter().any(|axis| *axis >= ndim) {
        return Err(ArrayError::Shape(format!(
            "{:?} is not a permutation of the axes of shape {}",
            axes,
            array.shape()
        )));
    }

    for axis in axes {
        if seen[*axis] {
            return Err(ArrayError::Shape(format!("repeated axis {} in {:?}", axis, axes)));
        }

        seen[*axis] = true;
    }

    let mut order = [0, 1, 2, 3];
    order[..ndim].copy_from_slice(axes);
    let [x, y, z, w] = order;

    let handle = Handle::create(|out| {
        af_call!(af_reorder(
            out,
            array.handle().get(),
            x as c_uint,
            y as c_uint,
            z as c_uint,
            w as c_uint
        ))
    })?;

    let source = array.shape().dims4();
    let dims: Vec<u64> = axes.iter().map(|axis| source[*axis]).collect();
    Array::from_handle_with_shape(handle, Shape::new(&dims)?)
}

/// Circularly shift the elements of an array by `shifts[i]` along each axis `i`.
pub fn shift(array: &Array, shifts: &[i64]) -> Result<Array> {
    if shifts.len() > MAX_DIMS {
        return Err(ArrayError::Shape(format!(
            "at most {} shifts may be given, not {}",
            MAX_DIMS,
            shifts.len()
        )));
    }

    let mut padded = [0; MAX_DIMS];
    padded[..shifts.len()].copy_from_slice(shifts);
    let [x, y, z, w] = padded;

    let handle = Handle::create(|out| {
        af_call!(af_shift(
            out,
            array.handle().get(),
            x as c_int,
            y as c_int,
            z as c_int,
            w as c_int
        ))
    })?;

    Array::from_handle_with_shape(handle, *array.shape())
}

/// Reinterpret the shape of an array without moving its data.
pub fn moddims(array: &Array, shape: &Shape) -> Result<Array> {
    array.reshape(shape)
}

/// Flatten an array into one dimension.
pub fn flat(array: &Array) -> Result<Array> {
    let handle = Handle::create(|out| af_call!(af_flat(out, array.handle().get())))?;
    Array::from_handle_with_shape(handle, Shape::vector(array.size()))
}

/// Reverse the order of the elements of an array along `axis`.
pub fn flip(array: &Array, axis: i64) -> Result<Array> {
    let axis = array.shape().axis(axis)?;
    let handle =
        Handle::create(|out| af_call!(af_flip(out, array.handle().get(), axis as c_uint)))?;

    Array::from_handle_with_shape(handle, *array.shape())
}

/// Choose elements from `a` where `cond` is true and from `b` elsewhere.
///
/// The three arrays are broadcast together and `a` and `b` are promoted to a common dtype.
pub fn select(cond: &Array, a: &Array, b: &Array) -> Result<Array> {
    if cond.dtype() != Dtype::Bool {
        return Err(ArrayError::TypeMismatch(format!(
            "select requires a bool condition, not {}",
            cond.dtype()
        )));
    }

    let dtype = promote(a.dtype(), b.dtype())?;
    let shape = broadcast_shapes(&broadcast_shapes(cond.shape(), a.shape())?, b.shape())?;

    let cond = broadcast_handle(cond, &shape)?;
    let a = broadcast_handle(&a.astype(dtype)?, &shape)?;
    let b = broadcast_handle(&b.astype(dtype)?, &shape)?;

    let handle = Handle::create(|out| af_call!(af_select(out, cond.get(), a.get(), b.get())))?;
    Array::from_handle_with_shape(handle, shape)
}

/// Swap the two leading axes of an array, conjugating complex elements if `conjugate` is set.
pub fn transpose(array: &Array, conjugate: bool) -> Result<Array> {
    let mut dims = array.shape().dims4();
    dims.swap(0, 1);
    let ndim = Ord::max(array.ndim(), 2);

    let handle =
        Handle::create(|out| af_call!(af_transpose(out, array.handle().get(), conjugate)))?;

    Array::from_handle_with_shape(handle, Shape::new(&dims[..ndim])?)
}

/// Gather the elements of an array at the given integer `indices` along `axis`.
pub fn lookup(array: &Array, indices: &Array, axis: i64) -> Result<Array> {
    if !indices.dtype().is(Category::Integer) {
        return Err(ArrayError::TypeMismatch(format!(
            "lookup requires integer indices, not {}",
            indices.dtype()
        )));
    }

    let axis = array.shape().axis(axis)?;
    let handle = Handle::create(|out| {
        af_call!(af_lookup(
            out,
            array.handle().get(),
            indices.handle().get(),
            axis as c_uint
        ))
    })?;

    Array::from_handle_with_shape(handle, array.shape().with_axis(axis, indices.size()))
}

fn require_matrix(op: &str, array: &Array) -> Result<()> {
    if array.ndim() == 2 {
        Ok(())
    } else {
        Err(ArrayError::Shape(format!(
            "{} requires a matrix, not shape {}",
            op,
            array.shape()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(dims: &[u64]) -> Shape {
        Shape::new(dims).unwrap()
    }

    #[test]
    fn test_constant() {
        let ones = constant(1, &shape(&[2, 3]), Some(Dtype::Float32)).unwrap();
        assert_eq!(ones.dtype(), Dtype::Float32);
        assert_eq!(ones.shape().dims(), &[2, 3]);
        assert_eq!(ones.to_vec::<f32>().unwrap(), vec![1.0; 6]);

        let big = constant(u64::MAX, &shape(&[2]), Some(Dtype::UInt64)).unwrap();
        assert_eq!(big.to_vec::<u64>().unwrap(), vec![u64::MAX; 2]);

        let flags = constant(true, &shape(&[3]), None).unwrap();
        assert_eq!(flags.dtype(), Dtype::Bool);
        assert_eq!(flags.to_vec::<bool>().unwrap(), vec![true; 3]);

        let err = constant(300, &shape(&[1]), Some(Dtype::UInt8)).unwrap_err();
        assert!(matches!(err, ArrayError::Overflow { .. }));
    }

    #[test]
    fn test_range() {
        let r = range(&shape(&[3, 2]), 0, Dtype::Int32).unwrap();
        assert_eq!(r.to_vec::<i32>().unwrap(), vec![0, 1, 2, 0, 1, 2]);

        let r = range(&shape(&[3, 2]), 1, Dtype::Int32).unwrap();
        assert_eq!(r.to_vec::<i32>().unwrap(), vec![0, 0, 0, 1, 1, 1]);

        assert!(range(&shape(&[3]), 1, Dtype::Int32).is_err());
    }

    #[test]
    fn test_iota() {
        let i = iota(&shape(&[3]), &[2], Dtype::Int32).unwrap();
        assert_eq!(i.shape().dims(), &[6]);
        assert_eq!(i.to_vec::<i32>().unwrap(), vec![0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn test_identity_and_diag() {
        let eye = identity(&shape(&[2, 2]), Dtype::Float64).unwrap();
        assert_eq!(eye.to_vec::<f64>().unwrap(), vec![1., 0., 0., 1.]);

        let d = diag_extract(&eye, 0).unwrap();
        assert_eq!(d.to_vec::<f64>().unwrap(), vec![1., 1.]);

        let v = Array::from_vec(vec![1i32, 2]).unwrap();
        let m = diag_create(&v, 0).unwrap();
        assert_eq!(m.shape().dims(), &[2, 2]);
        assert_eq!(m.to_vec::<i32>().unwrap(), vec![1, 0, 0, 2]);

        let one = Array::from_vec(vec![5i32]).unwrap();
        let m = diag_create(&one, 0).unwrap();
        assert_eq!(m.shape().dims(), &[1, 1]);
        assert_eq!(diag_extract(&m, 0).unwrap().shape().dims(), &[1]);
    }

    #[test]
    fn test_lower_upper() {
        let m = Array::from_slice(&[1i32, 2, 3, 4], &shape(&[2, 2])).unwrap();
        assert_eq!(lower(&m, false).unwrap().to_vec::<i32>().unwrap(), vec![1, 2, 0, 4]);
        assert_eq!(upper(&m, false).unwrap().to_vec::<i32>().unwrap(), vec![1, 0, 3, 4]);
        assert!(lower(&Array::from_vec(vec![1i32]).unwrap(), false).is_err());
    }

    #[test]
    fn test_join() {
        let a = Array::from_vec(vec![1i32, 2]).unwrap();
        let b = Array::from_vec(vec![3i32]).unwrap();
        let joined = join(0, &a, &b).unwrap();
        assert_eq!(joined.shape().dims(), &[3]);
        assert_eq!(joined.to_vec::<i32>().unwrap(), vec![1, 2, 3]);

        let m = Array::from_slice(&[1i32, 2, 3, 4], &shape(&[2, 2])).unwrap();
        assert_eq!(join(1, &m, &m).unwrap().shape().dims(), &[2, 4]);
        assert_eq!(join(-2, &m, &m).unwrap().shape().dims(), &[4, 2]);

        let f = Array::from_vec(vec![1.0f32]).unwrap();
        assert!(matches!(join(0, &a, &f), Err(ArrayError::TypeMismatch(_))));
        assert!(matches!(join(1, &m, &a), Err(ArrayError::Shape(_))));
    }

    #[test]
    fn test_tile() {
        let a = Array::from_vec(vec![1i32, 2]).unwrap();
        let tiled = tile(&a, &[2, 2]).unwrap();
        assert_eq!(tiled.shape().dims(), &[4, 2]);
        assert_eq!(tiled.to_vec::<i32>().unwrap(), vec![1, 2, 1, 2, 1, 2, 1, 2]);
    }

    #[test]
    fn test_broadcast_to() {
        let row = Array::from_vec(vec![1i32, 2, 3]).unwrap();
        let matrix = broadcast_to(&row, &shape(&[2, 3])).unwrap();
        assert_eq!(matrix.shape().dims(), &[2, 3]);
        assert_eq!(matrix.to_vec::<i32>().unwrap(), vec![1, 1, 2, 2, 3, 3]);

        assert!(broadcast_to(&row, &shape(&[3, 2])).is_err());
    }

    #[test]
    fn test_reorder() {
        let m = Array::from_slice(&[1i32, 2, 3, 4, 5, 6], &shape(&[2, 3])).unwrap();
        let t = reorder(&m, &[1, 0]).unwrap();
        assert_eq!(t.shape().dims(), &[3, 2]);
        assert_eq!(t.to_vec::<i32>().unwrap(), vec![1, 3, 5, 2, 4, 6]);

        assert!(reorder(&m, &[0, 0]).is_err());
        assert!(reorder(&m, &[0]).is_err());
    }

    #[test]
    fn test_shift_and_flip() {
        let a = Array::from_vec(vec![1i32, 2, 3]).unwrap();
        assert_eq!(shift(&a, &[1]).unwrap().to_vec::<i32>().unwrap(), vec![3, 1, 2]);
        assert_eq!(flip(&a, 0).unwrap().to_vec::<i32>().unwrap(), vec![3, 2, 1]);
        assert_eq!(flat(&a).unwrap().shape().dims(), &[3]);
    }

    #[test]
    fn test_select() {
        let cond = Array::from_vec(vec![true, false, true]).unwrap();
        let a = Array::from_vec(vec![1i32, 2, 3]).unwrap();
        let b = Array::from_scalar(0, Some(Dtype::Int32)).unwrap();
        let selected = select(&cond, &a, &b).unwrap();
        assert_eq!(selected.to_vec::<i32>().unwrap(), vec![1, 0, 3]);

        assert!(select(&a, &a, &b).is_err());
    }

    #[test]
    fn test_lookup() {
        let a = Array::from_vec(vec![10i32, 20, 30]).unwrap();
        let idx = Array::from_vec(vec![2u32, 0]).unwrap();
        assert_eq!(lookup(&a, &idx, 0).unwrap().to_vec::<i32>().unwrap(), vec![30, 10]);

        let float_idx = Array::from_vec(vec![0.0f32]).unwrap();
        assert!(lookup(&a, &float_idx, 0).is_err());
    }

    #[test]
    fn test_transpose() {
        let m = Array::from_slice(&[1i32, 2, 3, 4, 5, 6], &shape(&[2, 3])).unwrap();
        let t = transpose(&m, false).unwrap();
        assert_eq!(t.shape().dims(), &[3, 2]);
        assert_eq!(t.to_vec::<i32>().unwrap(), vec![1, 3, 5, 2, 4, 6]);
    }
}
