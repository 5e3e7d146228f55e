use std::fmt;
use std::os::raw::{c_uint, c_void};

use get_size::GetSize;

use super::handle::{write_scalar, Handle, Source};
use super::native::af_call;
use super::{
    check_values, infer_dtype, ArrayError, Backend, Dtype, Element, Result, Scalar, Shape,
    MAX_DIMS,
};

/// A host-side listing of the elements of an [`Array`].
#[derive(Clone, Debug, PartialEq)]
pub enum HostList {
    Scalar(Scalar),
    List(Vec<HostList>),
}

impl HostList {
    /// Flatten this listing in iteration order.
    pub fn flatten(&self) -> Vec<Scalar> {
        match self {
            Self::Scalar(scalar) => vec![*scalar],
            Self::List(items) => items.iter().flat_map(|item| item.flatten()).collect(),
        }
    }
}

/// An n-dimensional array of one [`Dtype`], resident on the active ArrayFire device.
pub struct Array {
    handle: Handle,
    dtype: Dtype,
    shape: Shape,
}

impl Array {
    /// Wrap a native array whose result has at least `ndim` axes, counting trailing unit axes.
    pub(crate) fn from_handle_with_ndim(handle: Handle, ndim: usize) -> Result<Self> {
        let dims = handle.dims()?;
        let ndim = ndim.max(Shape::from_dims(dims).ndim());
        let shape = Shape::new(&dims[..ndim])?;
        Self::from_handle_with_shape(handle, shape)
    }

    /// Wrap a native array whose significant axes are known to the caller.
    pub(crate) fn from_handle_with_shape(handle: Handle, shape: Shape) -> Result<Self> {
        let native = handle.dims()?;
        if native != shape.dims4() {
            return Err(ArrayError::Shape(format!(
                "a native array with dims {:?} does not have shape {}",
                native, shape
            )));
        }

        let dtype = handle.dtype()?;
        Ok(Self {
            handle,
            dtype,
            shape,
        })
    }

    #[inline]
    pub(crate) fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Replace the contents of this array, e.g. after an in-place operation.
    pub(crate) fn replace(&mut self, other: Array) {
        *self = other;
    }

    /// Allocate a new array with uninitialized contents.
    pub fn empty(shape: &Shape, dtype: Dtype) -> Result<Self> {
        Handle::empty(shape, dtype).and_then(|handle| Self::from_handle_with_shape(handle, *shape))
    }

    /// Copy a host buffer, in column-major order, into a new array with the given `shape`.
    pub fn from_slice<T: Element>(data: &[T], shape: &Shape) -> Result<Self> {
        Handle::from_host(data, shape).and_then(|handle| Self::from_handle_with_shape(handle, *shape))
    }

    /// Copy a host vector into a new one-dimensional array.
    pub fn from_vec<T: Element>(data: Vec<T>) -> Result<Self> {
        Self::from_slice(&data, &Shape::vector(data.len() as u64))
    }

    /// Copy a raw host buffer of elements of `dtype` into a new array.
    pub fn from_bytes(bytes: &[u8], shape: &Shape, dtype: Dtype) -> Result<Self> {
        Handle::from_bytes(bytes, shape, dtype)
            .and_then(|handle| Self::from_handle_with_shape(handle, *shape))
    }

    /// Construct a new array from a sequence of host scalars.
    ///
    /// If no `dtype` is given it is inferred from the values; otherwise every value must be
    /// storable as `dtype`. If no `shape` is given the array is one-dimensional.
    pub fn from_scalars(values: &[Scalar], shape: Option<&Shape>, dtype: Option<Dtype>) -> Result<Self> {
        let dtype = match dtype {
            Some(dtype) => {
                check_values(values, dtype)?;
                dtype
            }
            None => infer_dtype(values)?,
        };

        let shape = match shape {
            Some(shape) => *shape,
            None => Shape::vector(values.len() as u64),
        };

        let bytes: Vec<u8> = values
            .iter()
            .flat_map(|value| write_scalar(dtype, value))
            .collect();

        Self::from_bytes(&bytes, &shape, dtype)
    }

    /// Construct a one-element array from a host scalar.
    pub fn from_scalar<S: Into<Scalar>>(value: S, dtype: Option<Dtype>) -> Result<Self> {
        let value = value.into();
        let dtype = match dtype {
            Some(dtype) => dtype,
            None => value.dtype()?,
        };

        Self::from_scalars(&[value], None, Some(dtype))
    }

    /// Take ownership of a device allocation without copying it.
    ///
    /// # Safety
    /// `data` must be an allocation of at least `shape.size()` elements of `dtype` on the
    /// active device, and the caller must not free it.
    pub unsafe fn from_device_ptr(data: *mut c_void, shape: &Shape, dtype: Dtype) -> Result<Self> {
        Handle::from_device_ptr(data, shape, dtype)
            .and_then(|handle| Self::from_handle_with_shape(handle, *shape))
    }

    /// Wrap a host or device buffer with an explicit layout.
    ///
    /// Missing strides default to column-major; fewer than four are padded by repeating the last.
    ///
    /// # Safety
    /// `data` must address every element reachable through `offset` and the strides.
    pub unsafe fn from_strided(
        data: *const c_void,
        shape: &Shape,
        dtype: Dtype,
        offset: u64,
        strides: Option<&[u64]>,
        source: Source,
    ) -> Result<Self> {
        let strides = shape.strides(strides)?;
        Handle::strided(data, shape, dtype, offset, strides, source)
            .and_then(|handle| Self::from_handle_with_shape(handle, *shape))
    }

    /// Construct a new `Array` which shares storage with this one.
    ///
    /// Any later write to either array (an in-place operator or an indexed assignment) gives the
    /// written array its own storage, so the sharing is never observable.
    pub fn retain(&self) -> Result<Self> {
        Ok(Self {
            handle: self.handle.retain()?,
            dtype: self.dtype,
            shape: self.shape,
        })
    }

    /// Construct a deep copy of this array.
    pub fn copy(&self) -> Result<Self> {
        Ok(Self {
            handle: self.handle.copy()?,
            dtype: self.dtype,
            shape: self.shape,
        })
    }

    /// Construct a new array by joining `left` and `right` along their first axis.
    pub fn concatenate(left: &Array, right: &Array) -> Result<Array> {
        if left.dtype != right.dtype {
            return Err(ArrayError::TypeMismatch(format!(
                "cannot concatenate arrays with different data types: {}, {}",
                left.dtype, right.dtype
            )));
        }

        super::join(0, left, right)
    }

    #[inline]
    pub fn dtype(&self) -> Dtype {
        self.dtype
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.shape.size()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shape.is_empty()
    }

    pub fn strides(&self) -> Result<[u64; MAX_DIMS]> {
        self.handle.strides()
    }

    pub fn offset(&self) -> Result<u64> {
        self.handle.offset()
    }

    /// Return `true` if the elements of this array are contiguous in memory.
    pub fn is_linear(&self) -> Result<bool> {
        self.handle.is_linear()
    }

    /// Return `true` if this array owns its storage (i.e. is not a view of another array).
    pub fn is_owner(&self) -> Result<bool> {
        self.handle.is_owner()
    }

    /// The id of the device where this array is resident.
    pub fn device_id(&self) -> Result<i32> {
        self.handle.device_id()
    }

    /// The backend which allocated this array.
    pub fn backend(&self) -> Result<Backend> {
        self.handle.backend_id().and_then(Backend::from_id)
    }

    /// The transpose of this matrix.
    #[allow(non_snake_case)]
    pub fn T(&self) -> Result<Array> {
        let shape = self.shape.transpose()?;
        let handle = Handle::create(|out| af_call!(af_transpose(out, self.handle.get(), false)))?;
        Self::from_handle_with_shape(handle, shape)
    }

    /// Transpose the two leading axes of this (batch of) matrices.
    #[allow(non_snake_case)]
    pub fn mT(&self) -> Result<Array> {
        if self.ndim() < 2 {
            return Err(ArrayError::Shape(format!(
                "mT requires at least 2 dimensions, not shape {}",
                self.shape
            )));
        }

        let dims = self.shape.dims();
        let mut transposed = dims.to_vec();
        transposed.swap(0, 1);
        let shape = Shape::new(&transposed)?;

        let handle = Handle::create(|out| af_call!(af_transpose(out, self.handle.get(), false)))?;
        Self::from_handle_with_shape(handle, shape)
    }

    /// Cast this array to the given `dtype`.
    pub fn astype(&self, dtype: Dtype) -> Result<Array> {
        if dtype == self.dtype {
            self.copy()
        } else {
            let handle = self.handle.cast(dtype)?;
            Self::from_handle_with_shape(handle, self.shape)
        }
    }

    /// Construct a view of this array with a new shape of the same size.
    pub fn reshape(&self, shape: &Shape) -> Result<Array> {
        if shape.size() != self.size() {
            return Err(ArrayError::Shape(format!(
                "cannot reshape an array of shape {} into shape {}",
                self.shape, shape
            )));
        }

        let handle = self.handle.moddims(shape.dims4())?;
        Self::from_handle_with_shape(handle, *shape)
    }

    /// Flatten this array into one dimension, in column-major order.
    pub fn flat(&self) -> Result<Array> {
        self.reshape(&Shape::vector(self.size()))
    }

    /// Force the evaluation of any deferred computation of this array.
    pub fn eval(&self) -> Result<()> {
        self.handle.eval()
    }

    /// The first element of this array, or `None` if it is empty.
    pub fn scalar(&self) -> Result<Option<Scalar>> {
        if self.is_empty() {
            Ok(None)
        } else {
            self.handle.scalar().map(Some)
        }
    }

    /// Copy the elements of this array into a host vector, in column-major order.
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>> {
        self.handle.to_host()
    }

    /// Copy the elements of this array to the host as tagged scalars, in column-major order.
    pub fn to_scalars(&self) -> Result<Vec<Scalar>> {
        self.handle.to_scalars()
    }

    /// Copy the elements of this array into a nested host listing.
    ///
    /// A one-dimensional array produces a flat list. Otherwise, the outermost list iterates
    /// over the last axis and the innermost lists are contiguous along the first axis
    /// (column-major), unless `row_major` is set, in which case the outermost list iterates over
    /// the first axis.
    pub fn to_host_list(&self, row_major: bool) -> Result<HostList> {
        if self.is_empty() {
            return Ok(HostList::List(vec![]));
        }

        if row_major && self.ndim() > 1 {
            let ndim = self.ndim();
            let mut permutation = [0, 1, 2, 3];
            for (axis, dim) in permutation.iter_mut().enumerate().take(ndim) {
                *dim = (ndim - 1 - axis) as c_uint;
            }

            let [x, y, z, w] = permutation;
            let handle = Handle::create(|out| {
                af_call!(af_reorder(out, self.handle.get(), x, y, z, w))
            })?;

            let reversed: Vec<u64> = self.shape.dims().iter().rev().copied().collect();
            Ok(nest(&handle.to_scalars()?, &reversed))
        } else {
            Ok(nest(&self.to_scalars()?, self.shape.dims()))
        }
    }

    /// Read the element at the given offset of this array, in column-major order.
    pub fn get_value(&self, offset: u64) -> Result<Scalar> {
        if offset >= self.size() {
            return Err(ArrayError::Index(format!(
                "offset {} is out of bounds for an array of size {}",
                offset,
                self.size()
            )));
        }

        let flat = self.flat()?;
        flat.get(&[(offset as i64).into()])?
            .scalar()?
            .ok_or_else(|| ArrayError::Index(format!("no value at {}", offset)))
    }

    /// Write the element at the given offset of this array, in column-major order.
    pub fn set_value<S: Into<Scalar>>(&mut self, offset: u64, value: S) -> Result<()> {
        if offset >= self.size() {
            return Err(ArrayError::Index(format!(
                "offset {} is out of bounds for an array of size {}",
                offset,
                self.size()
            )));
        }

        let shape = self.shape;
        let mut flat = self.flat()?;
        flat.set(&[(offset as i64).into()], value.into())?;
        self.replace(flat.reshape(&shape)?);
        Ok(())
    }
}

fn nest(data: &[Scalar], dims: &[u64]) -> HostList {
    match dims.split_last() {
        Some((&len, inner)) if !inner.is_empty() => {
            let chunk = inner.iter().product::<u64>() as usize;
            HostList::List(
                data.chunks(chunk)
                    .take(len as usize)
                    .map(|chunk| nest(chunk, inner))
                    .collect(),
            )
        }
        _ => HostList::List(data.iter().copied().map(HostList::Scalar).collect()),
    }
}

impl GetSize for Array {
    fn get_heap_size(&self) -> usize {
        self.size() as usize * self.dtype.size()
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Array<{}>{}", self.dtype, self.shape)
    }
}

impl fmt::Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Array(dtype={}, shape={}, size={})",
            self.dtype,
            self.shape,
            self.size()
        )?;

        match self.handle.dump("", 4) {
            Ok(dump) => f.write_str(&dump),
            Err(cause) => write!(f, "<{}>", cause),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Complex;

    #[test]
    fn test_metadata() {
        let arr = Array::from_slice(&[1i32, 2, 3, 4, 5, 6], &Shape::new(&[2, 3]).unwrap()).unwrap();
        assert_eq!(arr.dtype(), Dtype::Int32);
        assert_eq!(arr.ndim(), 2);
        assert_eq!(arr.shape().dims(), &[2, 3]);
        assert_eq!(arr.size(), 6);
        assert_eq!(arr.size(), arr.shape().dims().iter().product::<u64>());
        assert_eq!(arr.get_size(), std::mem::size_of::<Array>() + 24);
    }

    #[test]
    fn test_from_scalars() {
        let arr = Array::from_scalars(&[1.into(), 2.into(), 3.into()], None, None).unwrap();
        assert_eq!(arr.dtype(), Dtype::Int64);
        assert_eq!(arr.to_vec::<i64>().unwrap(), vec![1, 2, 3]);

        let arr = Array::from_scalars(&[1.into(), 2.5.into()], None, None).unwrap();
        assert_eq!(arr.dtype(), Dtype::Float32);

        let arr = Array::from_scalars(&[1.into(), 2.into()], None, Some(Dtype::Float64)).unwrap();
        assert_eq!(arr.to_vec::<f64>().unwrap(), vec![1., 2.]);

        let err = Array::from_scalars(&[1.5.into()], None, Some(Dtype::Int32)).unwrap_err();
        assert!(matches!(err, ArrayError::TypeMismatch(_)));

        let err = Array::from_scalars(&[300.into()], None, Some(Dtype::UInt8)).unwrap_err();
        assert!(matches!(err, ArrayError::Overflow { .. }));
    }

    #[test]
    fn test_overflow_literal() {
        let err = Array::from_scalar(Scalar::Int(1 << 100), None).unwrap_err();
        assert!(matches!(err, ArrayError::Overflow { .. }));
    }

    #[test]
    fn test_scalar() {
        let arr = Array::from_scalar(Complex::new(1f32, 2f32), None).unwrap();
        assert_eq!(arr.dtype(), Dtype::Complex64);
        assert_eq!(
            arr.scalar().unwrap(),
            Some(Scalar::Complex(Complex::new(1., 2.)))
        );

        let empty = Array::empty(&Shape::vector(0), Dtype::Float32).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.scalar().unwrap(), None);
        assert_eq!(empty.to_host_list(false).unwrap(), HostList::List(vec![]));
    }

    #[test]
    fn test_transpose() {
        let arr = Array::from_slice(&[1u8, 2, 3, 4, 5, 6], &Shape::new(&[2, 3]).unwrap()).unwrap();
        let t = arr.T().unwrap();
        assert_eq!(t.shape().dims(), &[3, 2]);
        assert_eq!(t.to_vec::<u8>().unwrap(), vec![1, 3, 5, 2, 4, 6]);
        assert_eq!(t.T().unwrap().to_vec::<u8>().unwrap(), arr.to_vec::<u8>().unwrap());

        let vector = Array::from_vec(vec![1u8, 2, 3]).unwrap();
        let err = vector.T().unwrap_err();
        assert!(err.to_string().contains("T requires 2 dimensions"));

        let cube = Array::empty(&Shape::new(&[2, 2, 2]).unwrap(), Dtype::UInt8).unwrap();
        assert!(matches!(cube.T(), Err(ArrayError::Shape(_))));
        assert_eq!(cube.mT().unwrap().shape().dims(), &[2, 2, 2]);
    }

    #[test]
    fn test_copy() {
        let arr = Array::from_vec(vec![1.5f64, 2.5]).unwrap();
        let copy = arr.copy().unwrap();
        assert!(!std::ptr::eq(&arr, &copy));
        assert_eq!(
            copy.to_host_list(false).unwrap(),
            arr.to_host_list(false).unwrap()
        );
    }

    #[test]
    fn test_retain_then_write() {
        let arr = Array::from_vec(vec![1i32, 2, 3]).unwrap();
        let mut shared = arr.retain().unwrap();
        shared.set_value(0, 9).unwrap();

        assert_eq!(shared.to_vec::<i32>().unwrap(), vec![9, 2, 3]);
        assert_eq!(arr.to_vec::<i32>().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_host_list() {
        let arr = Array::from_slice(&[1i16, 2, 3, 4, 5, 6], &Shape::new(&[2, 3]).unwrap()).unwrap();
        let int = |i: i128| HostList::Scalar(Scalar::Int(i));

        assert_eq!(
            arr.to_host_list(false).unwrap(),
            HostList::List(vec![
                HostList::List(vec![int(1), int(2)]),
                HostList::List(vec![int(3), int(4)]),
                HostList::List(vec![int(5), int(6)]),
            ])
        );

        assert_eq!(
            arr.to_host_list(true).unwrap(),
            HostList::List(vec![
                HostList::List(vec![int(1), int(3), int(5)]),
                HostList::List(vec![int(2), int(4), int(6)]),
            ])
        );
    }

    #[test]
    fn test_get_value() {
        let arr = Array::from_vec(vec![1, 2, 3]).unwrap();
        assert_eq!(arr.get_value(1).unwrap(), Scalar::Int(2));
        assert!(arr.get_value(3).is_err());
    }

    #[test]
    fn test_set_value() {
        let mut arr = Array::from_vec(vec![1.0f32, 2.0, 3.0]).unwrap();
        arr.set_value(2, 0.5).unwrap();
        assert_eq!(arr.to_vec::<f32>().unwrap(), vec![1.0, 2.0, 0.5]);
        assert!(arr.set_value(0, true).is_err());
    }

    #[test]
    fn test_reshape() {
        let arr = Array::from_vec((0..6).collect::<Vec<u32>>()).unwrap();
        let matrix = arr.reshape(&Shape::new(&[3, 2]).unwrap()).unwrap();
        assert_eq!(matrix.shape().dims(), &[3, 2]);
        assert_eq!(matrix.flat().unwrap().shape().dims(), &[6]);
        assert!(arr.reshape(&Shape::new(&[4, 2]).unwrap()).is_err());
    }

    #[test]
    fn test_concatenate() {
        let left = Array::from_vec(vec![1u64, 2]).unwrap();
        let right = Array::from_vec(vec![3u64]).unwrap();
        let joined = Array::concatenate(&left, &right).unwrap();
        assert_eq!(joined.to_vec::<u64>().unwrap(), vec![1, 2, 3]);

        let other = Array::from_vec(vec![3i64]).unwrap();
        assert!(Array::concatenate(&left, &other).is_err());
    }
}
