//! The shape model: at most four axes, stored padded to four for the native boundary.

use std::fmt;

use super::{ArrayError, Result};

/// The maximum number of axes of a native array.
pub const MAX_DIMS: usize = 4;

/// The shape of an [`crate::Array`]: between one and four axis lengths.
///
/// Axes past `ndim` are implicitly 1.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct Shape {
    dims: [u64; MAX_DIMS],
    ndim: usize,
}

impl Shape {
    /// Construct a new `Shape` with exactly the given axes.
    pub fn new(dims: &[u64]) -> Result<Self> {
        if dims.is_empty() || dims.len() > MAX_DIMS {
            return Err(ArrayError::Shape(format!(
                "an array must have between 1 and {} dimensions, not {}",
                MAX_DIMS,
                dims.len()
            )));
        }

        let mut padded = [1; MAX_DIMS];
        padded[..dims.len()].copy_from_slice(dims);

        Ok(Self {
            dims: padded,
            ndim: dims.len(),
        })
    }

    /// Construct the `Shape` reported by a native array with the given (padded) dims.
    ///
    /// Trailing unit axes are not significant, so `[3, 1, 1, 1]` has one dimension.
    pub fn from_dims(dims: [u64; MAX_DIMS]) -> Self {
        let ndim = dims
            .iter()
            .rposition(|dim| *dim != 1)
            .map(|axis| axis + 1)
            .unwrap_or(1);

        Self { dims, ndim }
    }

    /// Construct a one-dimensional `Shape`.
    pub fn vector(len: u64) -> Self {
        Self {
            dims: [len, 1, 1, 1],
            ndim: 1,
        }
    }

    /// The number of significant axes.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.ndim
    }

    /// The significant axis lengths.
    #[inline]
    pub fn dims(&self) -> &[u64] {
        &self.dims[..self.ndim]
    }

    /// All four axis lengths, padded with 1s.
    #[inline]
    pub fn dims4(&self) -> [u64; MAX_DIMS] {
        self.dims
    }

    /// The total number of elements.
    pub fn size(&self) -> u64 {
        self.dims.iter().product()
    }

    /// Return `true` if this shape has no elements.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Resolve a possibly-negative axis index against this shape.
    pub fn axis(&self, axis: i64) -> Result<usize> {
        let ndim = self.ndim as i64;
        let resolved = if axis < 0 { ndim + axis } else { axis };

        if resolved >= 0 && resolved < ndim {
            Ok(resolved as usize)
        } else {
            Err(ArrayError::Shape(format!(
                "axis {} is out of bounds for an array with shape {}",
                axis, self
            )))
        }
    }

    /// The shape with the two axes of a matrix exchanged.
    pub fn transpose(&self) -> Result<Self> {
        if self.ndim == 2 {
            Self::new(&[self.dims[1], self.dims[0]])
        } else {
            Err(ArrayError::Shape(format!(
                "T requires 2 dimensions, not shape {}",
                self
            )))
        }
    }

    /// The shape with the given axis removed; a vector reduces to a single element.
    pub fn remove_axis(&self, axis: usize) -> Self {
        let mut dims: Vec<u64> = self.dims().to_vec();
        if axis < dims.len() {
            dims.remove(axis);
        }

        if dims.is_empty() {
            Self::vector(1)
        } else {
            let mut padded = [1; MAX_DIMS];
            padded[..dims.len()].copy_from_slice(&dims);
            Self {
                dims: padded,
                ndim: dims.len(),
            }
        }
    }

    /// The shape with the given axis set to `len`.
    pub fn with_axis(&self, axis: usize, len: u64) -> Self {
        let mut dims = self.dims;
        dims[axis] = len;
        Self {
            dims,
            ndim: Ord::max(self.ndim, axis + 1),
        }
    }

    /// The padded native dims of this shape right-aligned to `ndim` axes, i.e. with unit axes
    /// prepended so that this shape's last axis lands on axis `ndim - 1`.
    pub fn aligned(&self, ndim: usize) -> [u64; MAX_DIMS] {
        debug_assert!(ndim >= self.ndim && ndim <= MAX_DIMS);

        let offset = ndim - self.ndim;
        let mut dims = [1; MAX_DIMS];
        dims[offset..ndim].copy_from_slice(self.dims());
        dims
    }

    /// The default (column-major) strides of this shape.
    pub fn default_strides(&self) -> [u64; MAX_DIMS] {
        let [d0, d1, d2, _] = self.dims;
        [1, d0, d0 * d1, d0 * d1 * d2]
    }

    /// Resolve user-supplied strides: none means column-major, and fewer than four are padded
    /// by repeating the last.
    pub fn strides(&self, strides: Option<&[u64]>) -> Result<[u64; MAX_DIMS]> {
        match strides {
            None | Some([]) => Ok(self.default_strides()),
            Some(strides) if strides.len() > MAX_DIMS => Err(ArrayError::Shape(format!(
                "at most {} strides may be given, not {}",
                MAX_DIMS,
                strides.len()
            ))),
            Some(strides) => {
                let last = strides[strides.len() - 1];
                let mut padded = [last; MAX_DIMS];
                padded[..strides.len()].copy_from_slice(strides);
                Ok(padded)
            }
        }
    }
}

/// Compute the shape of the result of an elementwise operation between arrays with shapes `a`
/// and `b`: axes are aligned on the right, and each pair must be equal or include a 1.
pub fn broadcast_shapes(a: &Shape, b: &Shape) -> Result<Shape> {
    let ndim = Ord::max(a.ndim(), b.ndim());
    let (left, right) = (a.aligned(ndim), b.aligned(ndim));

    let mut dims = [1; MAX_DIMS];
    for axis in 0..ndim {
        dims[axis] = match (left[axis], right[axis]) {
            (l, r) if l == r => l,
            (1, r) => r,
            (l, 1) => l,
            _ => {
                return Err(ArrayError::Shape(format!(
                    "shapes {} and {} cannot be broadcast together",
                    a, b
                )))
            }
        };
    }

    Ok(Shape { dims, ndim })
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.dims() {
            [len] => write!(f, "({},)", len),
            dims => {
                let dims: Vec<String> = dims.iter().map(|dim| dim.to_string()).collect();
                write!(f, "({})", dims.join(", "))
            }
        }
    }
}

impl From<u64> for Shape {
    fn from(len: u64) -> Self {
        Self::vector(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dims() {
        let shape = Shape::from_dims([3, 1, 1, 1]);
        assert_eq!(shape.ndim(), 1);
        assert_eq!(shape.dims(), &[3]);

        let shape = Shape::from_dims([3, 1, 2, 1]);
        assert_eq!(shape.dims(), &[3, 1, 2]);
        assert_eq!(shape.size(), 6);

        let shape = Shape::from_dims([1, 1, 1, 1]);
        assert_eq!(shape.dims(), &[1]);

        let shape = Shape::from_dims([0, 1, 1, 1]);
        assert_eq!(shape.dims(), &[0]);
        assert!(shape.is_empty());
    }

    #[test]
    fn test_size_and_ndim() {
        for dims in [&[2u64][..], &[2, 3], &[2, 3, 4], &[2, 3, 4, 5]] {
            let shape = Shape::new(dims).unwrap();
            assert_eq!(shape.ndim(), dims.len());
            assert_eq!(shape.size(), dims.iter().product::<u64>());
        }

        assert!(Shape::new(&[]).is_err());
        assert!(Shape::new(&[1, 2, 3, 4, 5]).is_err());
    }

    #[test]
    fn test_strides() {
        let shape = Shape::new(&[2, 3, 4]).unwrap();
        assert_eq!(shape.strides(None).unwrap(), [1, 2, 6, 24]);
        assert_eq!(shape.strides(Some(&[1, 4])).unwrap(), [1, 4, 4, 4]);
        assert!(shape.strides(Some(&[1, 1, 1, 1, 1])).is_err());
    }

    #[test]
    fn test_broadcast() {
        let a = Shape::new(&[3, 4]).unwrap();
        let b = Shape::new(&[4]).unwrap();
        assert_eq!(broadcast_shapes(&a, &b).unwrap().dims(), &[3, 4]);
        assert_eq!(broadcast_shapes(&b, &a).unwrap().dims(), &[3, 4]);

        let c = Shape::new(&[3, 1]).unwrap();
        assert_eq!(broadcast_shapes(&a, &c).unwrap().dims(), &[3, 4]);

        let d = Shape::new(&[3]).unwrap();
        let err = broadcast_shapes(&a, &d).unwrap_err();
        assert!(matches!(err, ArrayError::Shape(_)));
        assert!(err.to_string().contains("(3, 4) and (3,)"));
    }

    #[test]
    fn test_aligned() {
        let b = Shape::new(&[4]).unwrap();
        assert_eq!(b.aligned(2), [1, 4, 1, 1]);
        assert_eq!(b.aligned(1), [4, 1, 1, 1]);
    }

    #[test]
    fn test_transpose() {
        let shape = Shape::new(&[2, 5]).unwrap();
        assert_eq!(shape.transpose().unwrap().dims(), &[5, 2]);

        let err = Shape::vector(3).transpose().unwrap_err();
        assert!(err.to_string().contains("T requires 2 dimensions"));
        assert!(Shape::new(&[2, 2, 2]).unwrap().transpose().is_err());
    }

    #[test]
    fn test_remove_axis() {
        let shape = Shape::new(&[2, 3, 4]).unwrap();
        assert_eq!(shape.remove_axis(1).dims(), &[2, 4]);
        assert_eq!(Shape::vector(5).remove_axis(0).dims(), &[1]);
        assert_eq!(shape.axis(-1).unwrap(), 2);
        assert!(shape.axis(3).is_err());
    }
}
