//! Linear algebra.

use std::os::raw::{c_double, c_int, c_uint};

use super::ffi::{AF_MAT_CTRANS, AF_MAT_LOWER, AF_MAT_NONE, AF_MAT_TRANS, AF_MAT_UPPER};
use super::handle::Handle;
use super::native::af_call;
use super::ops::gate;
use super::{Array, ArrayError, Category, Complex, Result, Scalar, Shape};

/// A property of a matrix operand.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatProp {
    None,
    Trans,
    CTrans,
    Upper,
    Lower,
}

impl MatProp {
    fn code(self) -> c_int {
        match self {
            Self::None => AF_MAT_NONE,
            Self::Trans => AF_MAT_TRANS,
            Self::CTrans => AF_MAT_CTRANS,
            Self::Upper => AF_MAT_UPPER,
            Self::Lower => AF_MAT_LOWER,
        }
    }
}

/// The kind of norm computed by [`norm`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(i32)]
pub enum NormType {
    Vector1 = 0,
    VectorInf = 1,
    Vector2 = 2,
    VectorP = 3,
    Matrix1 = 4,
    MatrixInf = 5,
    Matrix2 = 6,
    MatrixLpq = 7,
}

fn require_floating(name: &'static str, array: &Array) -> Result<()> {
    gate(name, Category::Floating, array.dtype())
}

fn require_matrix(name: &str, array: &Array) -> Result<()> {
    if array.ndim() <= 2 {
        Ok(())
    } else {
        Err(ArrayError::Shape(format!(
            "{} requires a matrix, not shape {}",
            name,
            array.shape()
        )))
    }
}

fn require_square(name: &str, array: &Array) -> Result<()> {
    require_matrix(name, array)?;

    let [rows, cols, ..] = array.shape().dims4();
    if rows == cols {
        Ok(())
    } else {
        Err(ArrayError::Shape(format!(
            "{} requires a square matrix, not shape {}",
            name,
            array.shape()
        )))
    }
}

fn require_same_dtype(name: &str, left: &Array, right: &Array) -> Result<()> {
    if left.dtype() == right.dtype() {
        Ok(())
    } else {
        Err(ArrayError::TypeMismatch(format!(
            "{} requires operands of the same dtype, not {} and {}",
            name,
            left.dtype(),
            right.dtype()
        )))
    }
}

/// Multiply two matrices, optionally (conjugate-)transposing either one first.
pub fn matmul(lhs: &Array, rhs: &Array, opt_lhs: MatProp, opt_rhs: MatProp) -> Result<Array> {
    require_floating("matmul", lhs)?;
    require_same_dtype("matmul", lhs, rhs)?;

    let [l_rows, l_cols, ..] = lhs.shape().dims4();
    let [r_rows, r_cols, ..] = rhs.shape().dims4();
    let (rows, inner) = match opt_lhs {
        MatProp::Trans | MatProp::CTrans => (l_cols, l_rows),
        _ => (l_rows, l_cols),
    };
    let (r_inner, cols) = match opt_rhs {
        MatProp::Trans | MatProp::CTrans => (r_cols, r_rows),
        _ => (r_rows, r_cols),
    };

    if inner != r_inner {
        return Err(ArrayError::Shape(format!(
            "matmul: shapes {} and {} are not aligned",
            lhs.shape(),
            rhs.shape()
        )));
    }

    let handle = Handle::create(|out| {
        af_call!(af_matmul(
            out,
            lhs.handle().get(),
            rhs.handle().get(),
            opt_lhs.code(),
            opt_rhs.code()
        ))
    })?;

    let handle = handle.moddims([rows, cols, 1, 1])?;
    Array::from_handle_with_shape(handle, Shape::new(&[rows, cols])?)
}

/// The dot product of two vectors.
pub fn dot(lhs: &Array, rhs: &Array) -> Result<Array> {
    require_floating("dot", lhs)?;
    require_same_dtype("dot", lhs, rhs)?;

    if lhs.ndim() != 1 || rhs.shape() != lhs.shape() {
        return Err(ArrayError::Shape(format!(
            "dot requires two vectors of the same length, not shapes {} and {}",
            lhs.shape(),
            rhs.shape()
        )));
    }

    let handle = Handle::create(|out| {
        af_call!(af_dot(
            out,
            lhs.handle().get(),
            rhs.handle().get(),
            AF_MAT_NONE,
            AF_MAT_NONE
        ))
    })?;

    Array::from_handle_with_shape(handle, Shape::vector(1))
}

/// The determinant of a square matrix.
pub fn det(array: &Array) -> Result<Scalar> {
    require_floating("det", array)?;
    require_square("det", array)?;

    let (mut real, mut imag) = (0., 0.);
    af_call!(af_det(&mut real, &mut imag, array.handle().get()))?;

    if array.dtype().is(Category::ComplexFloating) {
        Ok(Scalar::Complex(Complex::new(real, imag)))
    } else {
        Ok(Scalar::Float(real))
    }
}

pub fn inverse(array: &Array) -> Result<Array> {
    require_floating("inverse", array)?;
    require_square("inverse", array)?;

    let handle = Handle::create(|out| {
        af_call!(af_inverse(out, array.handle().get(), AF_MAT_NONE))
    })?;

    Array::from_handle_with_shape(handle, *array.shape())
}

/// The Moore-Penrose pseudo-inverse of a matrix.
pub fn pinverse(array: &Array, tolerance: f64) -> Result<Array> {
    require_floating("pinverse", array)?;
    require_matrix("pinverse", array)?;

    let handle = Handle::create(|out| {
        af_call!(af_pinverse(
            out,
            array.handle().get(),
            tolerance as c_double,
            AF_MAT_NONE
        ))
    })?;

    let [rows, cols, ..] = array.shape().dims4();
    let handle = handle.moddims([cols, rows, 1, 1])?;
    Array::from_handle_with_shape(handle, Shape::new(&[cols, rows])?)
}

pub fn rank(array: &Array, tolerance: f64) -> Result<u32> {
    require_floating("rank", array)?;
    require_matrix("rank", array)?;

    let mut rank: c_uint = 0;
    af_call!(af_rank(&mut rank, array.handle().get(), tolerance as c_double))?;
    Ok(rank as u32)
}

/// The norm of a vector or matrix; `p` and `q` are only used by `VectorP` and `MatrixLpq`.
pub fn norm(array: &Array, norm_type: NormType, p: f64, q: f64) -> Result<f64> {
    require_floating("norm", array)?;
    require_matrix("norm", array)?;

    let mut norm: c_double = 0.;
    af_call!(af_norm(
        &mut norm,
        array.handle().get(),
        norm_type as c_int,
        p,
        q
    ))?;

    Ok(norm)
}

/// Solve the system of linear equations `a x = b` for `x`.
pub fn solve(a: &Array, b: &Array, options: MatProp) -> Result<Array> {
    require_floating("solve", a)?;
    require_same_dtype("solve", a, b)?;
    require_matrix("solve", a)?;

    let [rows, cols, ..] = a.shape().dims4();
    let [b_rows, b_cols, ..] = b.shape().dims4();
    if rows != b_rows {
        return Err(ArrayError::Shape(format!(
            "solve: shapes {} and {} are not aligned",
            a.shape(),
            b.shape()
        )));
    }

    let handle = Handle::create(|x| {
        af_call!(af_solve(
            x,
            a.handle().get(),
            b.handle().get(),
            options.code()
        ))
    })?;

    let shape = if b.ndim() == 1 {
        Shape::vector(cols)
    } else {
        Shape::new(&[cols, b_cols])?
    };

    let handle = handle.moddims(shape.dims4())?;
    Array::from_handle_with_shape(handle, shape)
}

/// The LU decomposition of a matrix: the lower and upper triangles and the row pivots.
pub fn lu(array: &Array) -> Result<(Array, Array, Array)> {
    require_floating("lu", array)?;
    require_matrix("lu", array)?;

    let (lower, upper, pivot) = Handle::create3(|lower, upper, pivot| {
        af_call!(af_lu(lower, upper, pivot, array.handle().get()))
    })?;

    Ok((
        Array::from_handle_with_ndim(lower, 2)?,
        Array::from_handle_with_ndim(upper, 2)?,
        Array::from_handle_with_ndim(pivot, 1)?,
    ))
}

/// The QR decomposition of a matrix: `q`, `r`, and the elementary reflector scalars `tau`.
pub fn qr(array: &Array) -> Result<(Array, Array, Array)> {
    require_floating("qr", array)?;
    require_matrix("qr", array)?;

    let (q, r, tau) =
        Handle::create3(|q, r, tau| af_call!(af_qr(q, r, tau, array.handle().get())))?;

    Ok((
        Array::from_handle_with_ndim(q, 2)?,
        Array::from_handle_with_ndim(r, 2)?,
        Array::from_handle_with_ndim(tau, 1)?,
    ))
}

/// The Cholesky factor of a positive-definite matrix.
///
/// Also returns the native status: 0 on success, otherwise the rank at which the
/// decomposition failed.
pub fn cholesky(array: &Array, is_upper: bool) -> Result<(Array, i32)> {
    require_floating("cholesky", array)?;
    require_square("cholesky", array)?;

    let mut info: c_int = 0;
    let handle = Handle::create(|out| {
        af_call!(af_cholesky(
            out,
            &mut info,
            array.handle().get(),
            is_upper
        ))
    })?;

    Ok((Array::from_handle_with_shape(handle, *array.shape())?, info))
}

/// The singular value decomposition of a matrix: `u`, the singular values, and `v` transposed.
pub fn svd(array: &Array) -> Result<(Array, Array, Array)> {
    require_floating("svd", array)?;
    require_matrix("svd", array)?;

    let (u, s, vt) = Handle::create3(|u, s, vt| af_call!(af_svd(u, s, vt, array.handle().get())))?;

    let [rows, cols, ..] = array.shape().dims4();
    let u = u.moddims([rows, rows, 1, 1])?;
    let vt = vt.moddims([cols, cols, 1, 1])?;
    let len = s.size()?;

    Ok((
        Array::from_handle_with_shape(u, Shape::new(&[rows, rows])?)?,
        Array::from_handle_with_shape(s, Shape::vector(len))?,
        Array::from_handle_with_shape(vt, Shape::new(&[cols, cols])?)?,
    ))
}
