//! Indexing and indexed assignment.

use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo};

use super::ffi::{af_index_t, af_index_union, af_seq, dim_t, AF_SPAN};
use super::handle::{BinaryOp, Handle, ReduceOp};
use super::native::af_call;
use super::{
    implicit_scalar_dtype, Array, ArrayError, Category, Dtype, Operand, Result, Scalar, Shape,
    MAX_DIMS,
};

/// A Python-style slice of one axis. Missing bounds default to the whole axis.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Slice {
    pub start: Option<i64>,
    pub stop: Option<i64>,
    pub step: i64,
}

impl Slice {
    pub fn new(start: Option<i64>, stop: Option<i64>, step: i64) -> Self {
        Self { start, stop, step }
    }

    /// Resolve this slice against an axis of length `len`, returning the first index, the step
    /// and the number of indices selected.
    pub fn resolve(&self, len: u64) -> Result<(i64, i64, u64)> {
        let len = len as i64;
        let step = self.step;

        let (start, count) = if step > 0 {
            let start = self.start.map(|i| bound(i, len, 0, len)).unwrap_or(0);
            let stop = self.stop.map(|i| bound(i, len, 0, len)).unwrap_or(len);
            let count = if stop > start {
                (stop - start - 1) as u64 / step as u64 + 1
            } else {
                0
            };
            (start, count)
        } else if step < 0 {
            let start = self.start.map(|i| bound(i, len, -1, len - 1)).unwrap_or(len - 1);
            let stop = self.stop.map(|i| bound(i, len, -1, len - 1)).unwrap_or(-1);
            let count = if start > stop {
                (start - stop - 1) as u64 / step.unsigned_abs() + 1
            } else {
                0
            };
            (start, count)
        } else {
            return Err(ArrayError::Index("slice step cannot be zero".to_string()));
        };

        Ok((start, step, count))
    }
}

fn bound(i: i64, len: i64, min: i64, max: i64) -> i64 {
    let i = if i < 0 { i + len } else { i };
    i.clamp(min, max)
}

impl From<Range<i64>> for Slice {
    fn from(range: Range<i64>) -> Self {
        Self::new(Some(range.start), Some(range.end), 1)
    }
}

impl From<RangeInclusive<i64>> for Slice {
    fn from(range: RangeInclusive<i64>) -> Self {
        let end = *range.end();
        Self::new(Some(*range.start()), if end == -1 { None } else { Some(end + 1) }, 1)
    }
}

impl From<RangeFrom<i64>> for Slice {
    fn from(range: RangeFrom<i64>) -> Self {
        Self::new(Some(range.start), None, 1)
    }
}

impl From<RangeTo<i64>> for Slice {
    fn from(range: RangeTo<i64>) -> Self {
        Self::new(None, Some(range.end), 1)
    }
}

/// One key of an indexing expression.
pub enum Index<'a> {
    /// A single position; the axis is dropped from the result.
    At(i64),
    /// A slice of the axis.
    Slice(Slice),
    /// The whole axis.
    Span,
    /// An array of positions, or a boolean mask.
    Array(&'a Array),
}

impl<'a> From<i64> for Index<'a> {
    fn from(i: i64) -> Self {
        Self::At(i)
    }
}

impl<'a> From<Slice> for Index<'a> {
    fn from(slice: Slice) -> Self {
        Self::Slice(slice)
    }
}

impl<'a> From<Range<i64>> for Index<'a> {
    fn from(range: Range<i64>) -> Self {
        Self::Slice(range.into())
    }
}

impl<'a> From<RangeInclusive<i64>> for Index<'a> {
    fn from(range: RangeInclusive<i64>) -> Self {
        Self::Slice(range.into())
    }
}

impl<'a> From<RangeFrom<i64>> for Index<'a> {
    fn from(range: RangeFrom<i64>) -> Self {
        Self::Slice(range.into())
    }
}

impl<'a> From<RangeTo<i64>> for Index<'a> {
    fn from(range: RangeTo<i64>) -> Self {
        Self::Slice(range.into())
    }
}

impl<'a> From<RangeFull> for Index<'a> {
    fn from(_: RangeFull) -> Self {
        Self::Span
    }
}

impl<'a> From<&'a Array> for Index<'a> {
    fn from(array: &'a Array) -> Self {
        Self::Array(array)
    }
}

/// An indexing expression lowered to the native index structs.
struct Lowered {
    indices: [af_index_t; MAX_DIMS],
    // the index arrays referenced by `indices`
    _keepalive: Vec<Handle>,
    // the extent of the selected region along each axis
    region: [u64; MAX_DIMS],
    // whether each axis survives in the result
    kept: [bool; MAX_DIMS],
}

impl Lowered {
    fn result_shape(&self, ndim: usize) -> Result<Shape> {
        let dims: Vec<u64> = (0..ndim)
            .filter(|axis| self.kept[*axis])
            .map(|axis| self.region[axis])
            .collect();

        if dims.is_empty() {
            Ok(Shape::vector(1))
        } else {
            Shape::new(&dims)
        }
    }
}

fn span() -> af_index_t {
    af_index_t {
        idx: af_index_union { seq: AF_SPAN },
        is_seq: true,
        is_batch: false,
    }
}

fn seq(begin: i64, end: i64, step: i64) -> af_index_t {
    af_index_t {
        idx: af_index_union {
            seq: af_seq {
                begin: begin as f64,
                end: end as f64,
                step: step as f64,
            },
        },
        is_seq: true,
        is_batch: false,
    }
}

fn lower(keys: &[Index], shape: &Shape) -> Result<Lowered> {
    if keys.len() > shape.ndim() {
        return Err(ArrayError::Index(format!(
            "too many indices ({}) for an array with shape {}",
            keys.len(),
            shape
        )));
    }

    let dims = shape.dims4();
    let mut lowered = Lowered {
        indices: [span(); MAX_DIMS],
        _keepalive: Vec::with_capacity(keys.len()),
        region: dims,
        kept: [true; MAX_DIMS],
    };

    for (axis, key) in keys.iter().enumerate() {
        let len = dims[axis];

        match key {
            Index::At(i) => {
                let resolved = if *i < 0 { *i + len as i64 } else { *i };
                if resolved < 0 || resolved >= len as i64 {
                    return Err(ArrayError::Index(format!(
                        "index {} is out of bounds for axis {} with length {}",
                        i, axis, len
                    )));
                }

                lowered.indices[axis] = seq(resolved, resolved, 1);
                lowered.region[axis] = 1;
                lowered.kept[axis] = false;
            }
            Index::Slice(slice) => {
                let (start, step, count) = slice.resolve(len)?;
                if count == 0 {
                    return Err(ArrayError::Index(format!(
                        "slice {:?} selects nothing from axis {} with length {}",
                        slice, axis, len
                    )));
                }

                let end = start + (count as i64 - 1) * step;
                lowered.indices[axis] = seq(start, end, step);
                lowered.region[axis] = count;
            }
            Index::Span => {}
            Index::Array(array) => {
                let (handle, count) = index_array(array, len)?;
                lowered.indices[axis] = af_index_t {
                    idx: af_index_union { arr: handle.get() },
                    is_seq: false,
                    is_batch: false,
                };
                lowered.region[axis] = count;
                lowered._keepalive.push(handle);
            }
        }
    }

    Ok(lowered)
}

/// Convert an index array (or a boolean mask) into non-negative positions along an axis.
fn index_array(array: &Array, len: u64) -> Result<(Handle, u64)> {
    if array.ndim() != 1 {
        return Err(ArrayError::Index(format!(
            "an index array must have one dimension, not shape {}",
            array.shape()
        )));
    }

    if array.dtype() == Dtype::Bool {
        if array.size() != len {
            return Err(ArrayError::Index(format!(
                "a boolean mask of shape {} does not match an axis of length {}",
                array.shape(),
                len
            )));
        }

        let positions = Handle::create(|out| af_call!(af_where(out, array.handle().get())))?;
        let count = positions.size()?;
        if count == 0 {
            return Err(ArrayError::Index(
                "a boolean mask with no true elements selects nothing".to_string(),
            ));
        }

        return Ok((positions, count));
    }

    if !array.dtype().is(Category::Integer) {
        return Err(ArrayError::Index(format!(
            "an index array must have an integer or boolean dtype, not {}",
            array.dtype()
        )));
    }

    if array.is_empty() {
        return Err(ArrayError::Index("an empty index array selects nothing".to_string()));
    }

    let handle = array.handle();
    let (min, _) = handle.reduce_all(ReduceOp::Min)?;
    let (max, _) = handle.reduce_all(ReduceOp::Max)?;
    if min < -(len as f64) || max >= len as f64 {
        return Err(ArrayError::Index(format!(
            "an index array with range [{}, {}] is out of bounds for an axis of length {}",
            min, max, len
        )));
    }

    let positions = if min < 0. {
        // wrap negative positions in int64, which holds any axis length
        let positions = handle.cast(Dtype::Int64)?;
        let len = Array::from_scalar(Scalar::Int(len as i128), Some(Dtype::Int64))?;
        let zero = Array::from_scalar(Scalar::Int(0), Some(Dtype::Int64))?;
        let negative = positions.binary(BinaryOp::Lt, zero.handle(), true)?;
        let wrapped = positions.binary(BinaryOp::Add, len.handle(), true)?;
        Handle::create(|out| {
            af_call!(af_select(out, negative.get(), wrapped.get(), positions.get()))
        })?
    } else {
        handle.retain()?
    };

    Ok((positions, array.size()))
}

impl Array {
    /// Select a region of this array.
    ///
    /// Axes indexed by a single position are dropped from the result; axes without a key are
    /// selected whole. A single boolean mask with the same shape as this array selects the
    /// flattened elements where the mask is `true`.
    pub fn get(&self, keys: &[Index]) -> Result<Array> {
        if let [Index::Array(mask)] = keys {
            if mask.dtype() == Dtype::Bool && self.ndim() > 1 && mask.shape() == self.shape() {
                return self.flat()?.get(&[Index::Array(&mask.flat()?)]);
            }
        }

        let lowered = lower(keys, self.shape())?;
        let handle = Handle::create(|out| {
            af_call!(af_index_gen(
                out,
                self.handle().get(),
                MAX_DIMS as dim_t,
                lowered.indices.as_ptr()
            ))
        })?;

        let shape = lowered.result_shape(self.ndim())?;
        let handle = handle.moddims(shape.dims4())?;
        Array::from_handle_with_shape(handle, shape)
    }

    /// Assign `value` to a region of this array.
    ///
    /// A scalar value is lifted to this array's dtype; an array value must have this array's
    /// dtype and either one element or exactly as many elements as the selected region.
    pub fn set<'a, O: Into<Operand<'a>>>(&mut self, keys: &[Index], value: O) -> Result<()> {
        if let [Index::Array(mask)] = keys {
            if mask.dtype() == Dtype::Bool && self.ndim() > 1 && mask.shape() == self.shape() {
                let shape = *self.shape();
                let mut flat = self.flat()?;
                flat.set(&[Index::Array(&mask.flat()?)], value)?;
                self.replace(flat.reshape(&shape)?);
                return Ok(());
            }
        }

        let lowered = lower(keys, self.shape())?;
        let region = lowered.region;
        let region_size: u64 = region.iter().product();

        let lifted;
        let value = match value.into() {
            Operand::Scalar(scalar) => {
                let dtype = implicit_scalar_dtype(&scalar, self.dtype())?;
                lifted = Array::from_scalar(scalar, Some(dtype))?;
                &lifted
            }
            Operand::Array(array) => {
                if array.dtype() != self.dtype() {
                    return Err(ArrayError::TypeMismatch(format!(
                        "cannot assign an array of {} to an array of {}",
                        array.dtype(),
                        self.dtype()
                    )));
                }

                array
            }
        };

        let rhs = if value.size() == region_size {
            value.handle().moddims(region)?
        } else if value.size() == 1 {
            let [x, y, z, w] = region.map(|dim| dim as std::os::raw::c_uint);
            Handle::create(|out| af_call!(af_tile(out, value.handle().get(), x, y, z, w)))?
        } else {
            return Err(ArrayError::Shape(format!(
                "cannot assign an array of shape {} to a region of shape {}",
                value.shape(),
                lowered.result_shape(self.ndim())?
            )));
        };

        let handle = Handle::create(|out| {
            af_call!(af_assign_gen(
                out,
                self.handle().get(),
                MAX_DIMS as dim_t,
                lowered.indices.as_ptr(),
                rhs.get()
            ))
        })?;

        let shape = *self.shape();
        self.replace(Array::from_handle_with_shape(handle, shape)?);
        Ok(())
    }
}
