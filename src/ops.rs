//! Operator dispatch: category gates, scalar lifting, promotion, broadcasting.

use std::fmt;
use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Rem, Shl, Shr, Sub};

use half::f16;

use super::ffi::AF_MAT_NONE;
use super::handle::{write_scalar, BinaryOp, Handle, UnaryOp};
use super::native::af_call;
use super::{
    broadcast_shapes, implicit_scalar_dtype, promote, Array, ArrayError, Category, Complex, Dtype,
    Result, Scalar, Shape,
};

const BATCH: bool = true;

/// An operator of the `Array` type.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    TrueDiv,
    FloorDiv,
    Mod,
    Pow,
    MatMul,
    And,
    Or,
    Xor,
    LShift,
    RShift,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    Neg,
    Pos,
    Abs,
    Invert,
}

impl Operator {
    /// The category of dtypes this operator admits.
    ///
    /// `TrueDiv` admits every numeric dtype here; integer operands produce `float32`.
    pub fn category(self) -> Category {
        use Operator::*;
        match self {
            Add | Sub | Mul | Pow | MatMul | Neg | Pos | Abs | TrueDiv => Category::Numeric,
            FloorDiv | Mod | Lt | Le | Gt | Ge => Category::RealNumeric,
            And | Or | Xor | Invert => Category::IntegerOrBoolean,
            LShift | RShift => Category::Integer,
            Eq | Ne => Category::All,
        }
    }

    /// Return `true` if this operator produces a boolean array.
    pub fn is_comparison(self) -> bool {
        use Operator::*;
        matches!(self, Lt | Le | Gt | Ge | Eq | Ne)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Operator::*;
        let name = match self {
            Add => "add",
            Sub => "sub",
            Mul => "mul",
            TrueDiv => "truediv",
            FloorDiv => "floordiv",
            Mod => "mod",
            Pow => "pow",
            MatMul => "matmul",
            And => "and",
            Or => "or",
            Xor => "xor",
            LShift => "lshift",
            RShift => "rshift",
            Lt => "lt",
            Le => "le",
            Gt => "gt",
            Ge => "ge",
            Eq => "eq",
            Ne => "ne",
            Neg => "neg",
            Pos => "pos",
            Abs => "abs",
            Invert => "invert",
        };

        f.write_str(name)
    }
}

/// The right-hand side of a binary operator: an array or a host scalar.
pub enum Operand<'a> {
    Array(&'a Array),
    Scalar(Scalar),
}

impl<'a> From<&'a Array> for Operand<'a> {
    fn from(array: &'a Array) -> Self {
        Self::Array(array)
    }
}

impl<'a> From<Scalar> for Operand<'a> {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

macro_rules! operand_from {
    ($($t:ty),*) => {
        $(
            impl<'a> From<$t> for Operand<'a> {
                fn from(value: $t) -> Self {
                    Self::Scalar(Scalar::from(value))
                }
            }
        )*
    };
}

operand_from!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f16, f32, f64, Complex<f32>, Complex<f64>);

/// How the operands of a binary operator are combined.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Mode {
    Binary,
    Reflected,
    InPlace,
}

/// Reject a dtype outside the category an operator admits.
pub(crate) fn gate<N: fmt::Display>(op: N, category: Category, dtype: Dtype) -> Result<()> {
    if dtype.is(category) {
        Ok(())
    } else {
        Err(ArrayError::TypeMismatch(format!(
            "{} requires a {} dtype, not {}",
            op, category, dtype
        )))
    }
}

/// Lift a scalar operand to a one-element array with the dtype of `array`.
pub(crate) fn lift(scalar: &Scalar, array: &Array) -> Result<Array> {
    let dtype = implicit_scalar_dtype(scalar, array.dtype())?;
    Array::from_scalar(*scalar, Some(dtype))
}

/// Gate both operands of a binary function, lift a scalar right-hand side, and call `f`.
pub(crate) fn with_operands<N, T, F>(
    name: N,
    category: Category,
    lhs: &Array,
    rhs: Operand,
    f: F,
) -> Result<T>
where
    N: fmt::Display + Copy,
    F: FnOnce(&Array, &Array) -> Result<T>,
{
    gate(name, category, lhs.dtype())?;

    match rhs {
        Operand::Scalar(scalar) => {
            let lifted = lift(&scalar, lhs)?;
            f(lhs, &lifted)
        }
        Operand::Array(array) => {
            gate(name, category, array.dtype())?;
            f(lhs, array)
        }
    }
}

/// The single entry point of every binary operator.
pub(crate) fn dispatch(
    op: Operator,
    category: Category,
    lhs: &Array,
    rhs: Operand,
    mode: Mode,
) -> Result<Array> {
    with_operands(op, category, lhs, rhs, |lhs, rhs| {
        let dtype = promote(lhs.dtype(), rhs.dtype())?;

        if mode == Mode::InPlace && dtype != lhs.dtype() {
            return Err(ArrayError::InPlacePromotionFailure(lhs.dtype(), rhs.dtype()));
        }

        match mode {
            Mode::Reflected => apply(op, rhs, lhs, dtype),
            Mode::Binary | Mode::InPlace => apply(op, lhs, rhs, dtype),
        }
    })
}

/// Broadcast two arrays of the same `dtype` together and call a native binary operator.
pub(crate) fn broadcast_native(
    op: BinaryOp,
    left: &Array,
    right: &Array,
    dtype: Dtype,
) -> Result<Array> {
    let shape = broadcast_shapes(left.shape(), right.shape())?;
    let l = aligned(left, dtype, shape.ndim())?;
    let r = aligned(right, dtype, shape.ndim())?;
    let handle = l.binary(op, &r, BATCH)?;
    Array::from_handle_with_shape(handle, shape)
}

fn apply(op: Operator, left: &Array, right: &Array, dtype: Dtype) -> Result<Array> {
    if op == Operator::MatMul {
        return matmul(left, right, dtype);
    }

    let shape = broadcast_shapes(left.shape(), right.shape())?;
    let l = aligned(left, dtype, shape.ndim())?;
    let r = aligned(right, dtype, shape.ndim())?;
    let handle = elementwise(op, &l, &r, dtype)?;
    Array::from_handle_with_shape(handle, shape)
}

/// Cast `array` to `dtype` and prepend unit axes so that it has `ndim` significant axes.
pub(crate) fn aligned(array: &Array, dtype: Dtype, ndim: usize) -> Result<Handle> {
    let handle = if array.dtype() == dtype {
        array.handle().retain()?
    } else {
        array.handle().cast(dtype)?
    };

    if array.ndim() == ndim {
        Ok(handle)
    } else {
        handle.moddims(array.shape().aligned(ndim))
    }
}

fn constant(value: i128, dtype: Dtype) -> Result<Handle> {
    Handle::from_bytes(
        &write_scalar(dtype, &Scalar::Int(value)),
        &Shape::vector(1),
        dtype,
    )
}

fn elementwise(op: Operator, l: &Handle, r: &Handle, dtype: Dtype) -> Result<Handle> {
    use Operator::*;
    match op {
        Add => l.binary(BinaryOp::Add, r, BATCH),
        Sub => l.binary(BinaryOp::Sub, r, BATCH),
        Mul => l.binary(BinaryOp::Mul, r, BATCH),
        Pow => l.binary(BinaryOp::Pow, r, BATCH),
        TrueDiv if dtype.is(Category::Floating) => l.binary(BinaryOp::Div, r, BATCH),
        TrueDiv => {
            let l = l.cast(Dtype::Float32)?;
            let r = r.cast(Dtype::Float32)?;
            l.binary(BinaryOp::Div, &r, BATCH)
        }
        FloorDiv => floor_divide(l, r, dtype),
        Mod => {
            let quotient = floor_divide(l, r, dtype)?;
            let product = r.binary(BinaryOp::Mul, &quotient, BATCH)?;
            l.binary(BinaryOp::Sub, &product, BATCH)
        }
        And if dtype == Dtype::Bool => l.binary(BinaryOp::And, r, BATCH),
        And => l.binary(BinaryOp::BitAnd, r, BATCH),
        Or if dtype == Dtype::Bool => l.binary(BinaryOp::Or, r, BATCH),
        Or => l.binary(BinaryOp::BitOr, r, BATCH),
        Xor if dtype == Dtype::Bool => l.binary(BinaryOp::Neq, r, BATCH),
        Xor => l.binary(BinaryOp::BitXor, r, BATCH),
        LShift => l.binary(BinaryOp::BitShiftL, r, BATCH),
        RShift => l.binary(BinaryOp::BitShiftR, r, BATCH),
        Lt => l.binary(BinaryOp::Lt, r, BATCH),
        Le => l.binary(BinaryOp::Le, r, BATCH),
        Gt => l.binary(BinaryOp::Gt, r, BATCH),
        Ge => l.binary(BinaryOp::Ge, r, BATCH),
        Eq => l.binary(BinaryOp::Eq, r, BATCH),
        Ne => l.binary(BinaryOp::Neq, r, BATCH),
        MatMul | Neg | Pos | Abs | Invert => Err(ArrayError::TypeMismatch(format!(
            "{} is not an elementwise binary operator",
            op
        ))),
    }
}

/// Divide, rounding toward negative infinity.
fn floor_divide(l: &Handle, r: &Handle, dtype: Dtype) -> Result<Handle> {
    let quotient = l.binary(BinaryOp::Div, r, BATCH)?;

    if dtype.is(Category::Floating) {
        quotient.unary(UnaryOp::Floor)
    } else if dtype.is(Category::UnsignedInteger) {
        Ok(quotient)
    } else {
        // integer division truncates toward zero
        let zero = constant(0, dtype)?;
        let remainder = l.binary(BinaryOp::Mod, r, BATCH)?;
        let inexact = remainder.binary(BinaryOp::Neq, &zero, BATCH)?;
        let remainder_negative = remainder.binary(BinaryOp::Lt, &zero, BATCH)?;
        let divisor_negative = r.binary(BinaryOp::Lt, &zero, BATCH)?;
        let signs_differ = remainder_negative.binary(BinaryOp::Neq, &divisor_negative, BATCH)?;
        let adjust = inexact.binary(BinaryOp::And, &signs_differ, BATCH)?.cast(dtype)?;
        quotient.binary(BinaryOp::Sub, &adjust, BATCH)
    }
}

fn matmul(left: &Array, right: &Array, dtype: Dtype) -> Result<Array> {
    let not_aligned = || {
        ArrayError::Shape(format!(
            "matmul: shapes {} and {} are not aligned",
            left.shape(),
            right.shape()
        ))
    };

    let (l_dims, r_dims) = (left.shape().dims4(), right.shape().dims4());

    // (rows of the left operand, inner length, columns of the right operand)
    let (l_native, rows, inner, cols) = match (left.ndim(), right.ndim()) {
        (1, 1) => {
            let [len, ..] = l_dims;
            (None, 1, len, 1)
        }
        (1, _) => {
            let [len, ..] = l_dims;
            (Some([1, len, 1, 1]), 1, len, r_dims[1])
        }
        _ => (None, l_dims[0], l_dims[1], r_dims[1]),
    };

    let ndim = Ord::max(left.ndim(), right.ndim());
    if inner != r_dims[0] || (ndim > 2 && l_dims[2..] != r_dims[2..]) {
        return Err(not_aligned());
    }

    let compute = if dtype.is(Category::Floating) {
        dtype
    } else {
        Dtype::Float64
    };

    let l = left.handle().cast(compute)?;
    let l = match l_native {
        Some(dims) => l.moddims(dims)?,
        None => l,
    };
    let r = right.handle().cast(compute)?;

    let handle = if left.ndim() == 1 && right.ndim() == 1 {
        Handle::create(|out| af_call!(af_dot(out, l.get(), r.get(), AF_MAT_NONE, AF_MAT_NONE)))?
    } else {
        Handle::create(|out| {
            af_call!(af_matmul(out, l.get(), r.get(), AF_MAT_NONE, AF_MAT_NONE))
        })?
    };

    let handle = if compute == dtype {
        handle
    } else {
        handle.cast(dtype)?
    };

    let shape = match (left.ndim(), right.ndim()) {
        (1, 1) => Shape::vector(1),
        (1, _) => Shape::vector(cols),
        (_, 1) => Shape::vector(rows),
        _ => {
            let dims = [rows, cols, l_dims[2], l_dims[3]];
            Shape::new(&dims[..ndim])?
        }
    };

    let handle = handle.moddims(shape.dims4())?;
    Array::from_handle_with_shape(handle, shape)
}

/// The single entry point of every unary operator.
pub(crate) fn unary(op: Operator, array: &Array) -> Result<Array> {
    gate(op, op.category(), array.dtype())?;

    let dtype = array.dtype();
    let handle = array.handle();

    let result = match op {
        Operator::Pos => handle.copy()?,
        Operator::Neg => {
            let zero = constant(0, dtype)?;
            zero.binary(BinaryOp::Sub, handle, BATCH)?
        }
        Operator::Abs if dtype.is(Category::ComplexFloating) => handle.unary(UnaryOp::Abs)?,
        Operator::Abs => {
            let abs = handle.unary(UnaryOp::Abs)?;
            if abs.dtype()? == dtype {
                abs
            } else {
                abs.cast(dtype)?
            }
        }
        Operator::Invert if dtype == Dtype::Bool => handle.unary(UnaryOp::Not)?,
        Operator::Invert => handle.unary(UnaryOp::BitNot)?,
        other => {
            return Err(ArrayError::TypeMismatch(format!(
                "{} is not a unary operator",
                other
            )))
        }
    };

    let result = if result.dims()? == array.shape().dims4() {
        result
    } else {
        result.moddims(array.shape().dims4())?
    };

    Array::from_handle_with_shape(result, *array.shape())
}

macro_rules! binary_methods {
    ($($op:ident: $name:ident, $rname:ident, $iname:ident;)*) => {
        impl Array {
            $(
                pub fn $name<'a, O: Into<Operand<'a>>>(&self, other: O) -> Result<Array> {
                    let op = Operator::$op;
                    dispatch(op, op.category(), self, other.into(), Mode::Binary)
                }

                pub fn $rname<'a, O: Into<Operand<'a>>>(&self, other: O) -> Result<Array> {
                    let op = Operator::$op;
                    dispatch(op, op.category(), self, other.into(), Mode::Reflected)
                }

                pub fn $iname<'a, O: Into<Operand<'a>>>(&mut self, other: O) -> Result<()> {
                    let op = Operator::$op;
                    let result = dispatch(op, op.category(), self, other.into(), Mode::InPlace)?;
                    self.assign_result(result)
                }
            )*
        }
    };
}

binary_methods! {
    Add: add, radd, iadd;
    Sub: sub, rsub, isub;
    Mul: mul, rmul, imul;
    TrueDiv: truediv, rtruediv, itruediv;
    FloorDiv: floordiv, rfloordiv, ifloordiv;
    Mod: modulo, rmodulo, imodulo;
    Pow: pow, rpow, ipow;
    MatMul: matmul, rmatmul, imatmul;
    And: bitand, rbitand, ibitand;
    Or: bitor, rbitor, ibitor;
    Xor: bitxor, rbitxor, ibitxor;
    LShift: lshift, rlshift, ilshift;
    RShift: rshift, rrshift, irshift;
}

macro_rules! comparison_methods {
    ($($op:ident: $name:ident;)*) => {
        impl Array {
            $(
                pub fn $name<'a, O: Into<Operand<'a>>>(&self, other: O) -> Result<Array> {
                    let op = Operator::$op;
                    dispatch(op, op.category(), self, other.into(), Mode::Binary)
                }
            )*
        }
    };
}

comparison_methods! {
    Lt: lt;
    Le: le;
    Gt: gt;
    Ge: ge;
    Eq: eq;
    Ne: ne;
}

impl Array {
    pub fn neg(&self) -> Result<Array> {
        unary(Operator::Neg, self)
    }

    pub fn pos(&self) -> Result<Array> {
        unary(Operator::Pos, self)
    }

    /// The absolute value of each element; complex elements produce their magnitude.
    pub fn abs(&self) -> Result<Array> {
        unary(Operator::Abs, self)
    }

    pub fn invert(&self) -> Result<Array> {
        unary(Operator::Invert, self)
    }

    fn assign_result(&mut self, result: Array) -> Result<()> {
        if result.shape() == self.shape() {
            self.replace(result);
            Ok(())
        } else {
            Err(ArrayError::Shape(format!(
                "an in-place operation cannot change shape {} to the broadcast shape {}",
                self.shape(),
                result.shape()
            )))
        }
    }
}

macro_rules! std_binary {
    ($($trait:ident, $method:ident, $call:ident;)*) => {
        $(
            impl<'a> $trait<&'a Array> for &Array {
                type Output = Result<Array>;

                fn $method(self, other: &'a Array) -> Self::Output {
                    Array::$call(self, other)
                }
            }

            impl $trait<Scalar> for &Array {
                type Output = Result<Array>;

                fn $method(self, other: Scalar) -> Self::Output {
                    Array::$call(self, other)
                }
            }
        )*
    };
}

std_binary! {
    Add, add, add;
    Sub, sub, sub;
    Mul, mul, mul;
    Div, div, truediv;
    Rem, rem, modulo;
    BitAnd, bitand, bitand;
    BitOr, bitor, bitor;
    BitXor, bitxor, bitxor;
    Shl, shl, lshift;
    Shr, shr, rshift;
}

impl Neg for &Array {
    type Output = Result<Array>;

    fn neg(self) -> Self::Output {
        Array::neg(self)
    }
}

impl Not for &Array {
    type Output = Result<Array>;

    fn not(self) -> Self::Output {
        Array::invert(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Index;

    fn vector<T: crate::Element>(data: Vec<T>) -> Array {
        Array::from_vec(data).unwrap()
    }

    #[test]
    fn test_add() {
        let sum = (&vector(vec![1, 2, 3]) + &vector(vec![4, 5, 6])).unwrap();
        assert_eq!(sum.dtype(), Dtype::Int32);
        assert_eq!(sum.shape().dims(), &[3]);
        assert_eq!(sum.to_vec::<i32>().unwrap(), vec![5, 7, 9]);
    }

    #[test]
    fn test_mul_scalar() {
        let a = vector(vec![1i64, 2, 3]);
        let product = a.mul(2).unwrap();
        assert_eq!(product.dtype(), a.dtype());
        assert_eq!(product.to_vec::<i64>().unwrap(), vec![2, 4, 6]);

        let a = vector(vec![1.5f32, 2.5]);
        let product = (&a * Scalar::Float(2.)).unwrap();
        assert_eq!(product.dtype(), Dtype::Float32);
        assert_eq!(product.to_vec::<f32>().unwrap(), vec![3.0, 5.0]);
    }

    #[test]
    fn test_truediv() {
        let quotient = vector(vec![1, 2, 3]).truediv(&vector(vec![4, 5, 6])).unwrap();
        assert!(quotient.dtype().is(Category::Floating));

        let expected = [0.25f32, 0.4, 0.5];
        for (actual, expected) in quotient.to_vec::<f32>().unwrap().into_iter().zip(expected) {
            assert!((actual - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_floordiv_and_mod() {
        let a = vector(vec![7i32, -7, 7, -7]);
        let b = vector(vec![2i32, 2, -2, -2]);

        assert_eq!(a.floordiv(&b).unwrap().to_vec::<i32>().unwrap(), vec![3, -4, -4, 3]);
        assert_eq!(a.modulo(&b).unwrap().to_vec::<i32>().unwrap(), vec![1, 1, -1, -1]);

        let a = vector(vec![7.5f64, -7.5]);
        assert_eq!(a.floordiv(2.0).unwrap().to_vec::<f64>().unwrap(), vec![3., -4.]);
        assert_eq!(a.modulo(2.0).unwrap().to_vec::<f64>().unwrap(), vec![1.5, 0.5]);
    }

    #[test]
    fn test_bitand() {
        let a = vector(vec![1, 2, 3]);
        let b = vector(vec![4, 5, 6]);
        assert_eq!((&a & &b).unwrap().to_vec::<i32>().unwrap(), vec![0, 0, 2]);

        let a = vector(vec![true, true, false]);
        let b = vector(vec![true, false, false]);
        assert_eq!(a.bitand(&b).unwrap().to_vec::<bool>().unwrap(), vec![true, false, false]);
        assert_eq!(a.bitxor(&b).unwrap().to_vec::<bool>().unwrap(), vec![false, true, false]);
        assert_eq!((!&a).unwrap().to_vec::<bool>().unwrap(), vec![false, false, true]);

        let err = vector(vec![1.0f32]).bitand(&vector(vec![1.0f32])).unwrap_err();
        assert!(matches!(err, ArrayError::TypeMismatch(_)));
    }

    #[test]
    fn test_eq() {
        let eq = vector(vec![1, 2, 3]).eq(&vector(vec![1, 0, 3])).unwrap();
        assert_eq!(eq.dtype(), Dtype::Bool);
        assert_eq!(eq.to_vec::<bool>().unwrap(), vec![true, false, true]);
    }

    #[test]
    fn test_promotion() {
        let a = vector(vec![1i8, 2]);
        let b = vector(vec![1u8, 2]);
        assert_eq!(a.add(&b).unwrap().dtype(), Dtype::Int16);

        let f = vector(vec![1.0f32, 2.0]);
        let err = a.add(&f).unwrap_err();
        assert!(matches!(err, ArrayError::PromotionFailure(Dtype::Int8, Dtype::Float32)));
    }

    #[test]
    fn test_scalar_lifting() {
        let a = vector(vec![1u8, 2]);
        assert!(matches!(a.add(256), Err(ArrayError::Overflow { .. })));
        assert_eq!(a.add(255).unwrap().dtype(), Dtype::UInt8);
        assert!(matches!(a.add(1.5), Err(ArrayError::TypeMismatch(_))));
        assert!(matches!(a.add(true), Err(ArrayError::TypeMismatch(_))));

        let f = vector(vec![1.0f32]);
        assert_eq!(f.add(1).unwrap().dtype(), Dtype::Float32);
        assert!(matches!(f.add(Complex::new(1.0f64, 1.0)), Err(ArrayError::TypeMismatch(_))));
    }

    #[test]
    fn test_in_place() {
        let mut a = vector(vec![1i16, 2]);
        let b = vector(vec![1i32, 2]);
        let err = a.iadd(&b).unwrap_err();
        assert!(matches!(err, ArrayError::InPlacePromotionFailure(Dtype::Int16, Dtype::Int32)));

        let mut b = b;
        b.iadd(&a).unwrap();
        assert_eq!(b.dtype(), Dtype::Int32);
        assert_eq!(b.to_vec::<i32>().unwrap(), vec![2, 4]);

        b.imul(3).unwrap();
        assert_eq!(b.to_vec::<i32>().unwrap(), vec![6, 12]);
    }

    #[test]
    fn test_reflected() {
        let a = vector(vec![1.0f64, 2.0]);
        assert_eq!(a.rsub(10.0).unwrap().to_vec::<f64>().unwrap(), vec![9.0, 8.0]);
        assert_eq!(a.rtruediv(1.0).unwrap().to_vec::<f64>().unwrap(), vec![1.0, 0.5]);
        assert_eq!(a.rpow(2.0).unwrap().to_vec::<f64>().unwrap(), vec![2.0, 4.0]);
    }

    #[test]
    fn test_broadcast() {
        let matrix = Array::from_slice(&[1i32; 12], &Shape::new(&[3, 4]).unwrap()).unwrap();
        let row = vector(vec![1i32, 2, 3, 4]);
        let sum = matrix.add(&row).unwrap();
        assert_eq!(sum.shape().dims(), &[3, 4]);
        assert_eq!(
            sum.get(&[Index::At(0)]).unwrap().to_vec::<i32>().unwrap(),
            vec![2, 3, 4, 5]
        );

        let column = vector(vec![1i32, 2, 3]);
        let err = matrix.add(&column).unwrap_err();
        assert!(matches!(err, ArrayError::Shape(_)));
    }

    #[test]
    fn test_unary() {
        let a = vector(vec![-1i32, 2, -3]);
        assert_eq!(a.neg().unwrap().to_vec::<i32>().unwrap(), vec![1, -2, 3]);
        assert_eq!(a.abs().unwrap().to_vec::<i32>().unwrap(), vec![1, 2, 3]);
        assert_eq!(a.pos().unwrap().to_vec::<i32>().unwrap(), vec![-1, 2, -3]);
        assert_eq!(a.invert().unwrap().to_vec::<i32>().unwrap(), vec![0, -3, 2]);

        let c = vector(vec![Complex::new(3.0f32, 4.0)]);
        let abs = c.abs().unwrap();
        assert_eq!(abs.dtype(), Dtype::Float32);
        assert_eq!(abs.to_vec::<f32>().unwrap(), vec![5.0]);

        assert!(vector(vec![true]).neg().is_err());
    }

    #[test]
    fn test_shift() {
        let a = vector(vec![1u32, 2, 4]);
        assert_eq!((&a << Scalar::Int(2)).unwrap().to_vec::<u32>().unwrap(), vec![4, 8, 16]);
        assert_eq!(a.rshift(1).unwrap().to_vec::<u32>().unwrap(), vec![0, 1, 2]);
        assert!(vector(vec![true]).lshift(true).is_err());
    }

    #[test]
    fn test_matmul() {
        let a = Array::from_slice(&[1.0f32, 3.0, 2.0, 4.0], &Shape::new(&[2, 2]).unwrap()).unwrap();
        let identity = Array::from_slice(&[1.0f32, 0.0, 0.0, 1.0], &Shape::new(&[2, 2]).unwrap()).unwrap();
        let product = a.matmul(&identity).unwrap();
        assert_eq!(product.shape().dims(), &[2, 2]);
        assert_eq!(product.to_vec::<f32>().unwrap(), a.to_vec::<f32>().unwrap());

        let v = vector(vec![1.0f32, 1.0]);
        assert_eq!(a.matmul(&v).unwrap().to_vec::<f32>().unwrap(), vec![3.0, 7.0]);
        assert_eq!(v.matmul(&a).unwrap().to_vec::<f32>().unwrap(), vec![4.0, 6.0]);
        assert_eq!(v.matmul(&v).unwrap().to_vec::<f32>().unwrap(), vec![2.0]);

        let ints = vector(vec![1i32, 2]);
        assert_eq!(ints.matmul(&ints).unwrap().to_vec::<i32>().unwrap(), vec![5]);

        let wrong = vector(vec![1.0f32, 1.0, 1.0]);
        assert!(matches!(a.matmul(&wrong), Err(ArrayError::Shape(_))));
    }
}
