//! Elementwise functions.
//!
//! The binary operators are also available as methods of [`Array`]; the free functions here
//! follow the same category gates, scalar lifting, promotion and broadcasting rules.

use std::fmt;

use super::handle::{BinaryOp, Handle, UnaryOp};
use super::ops::{broadcast_native, dispatch, gate, with_operands, Mode};
use super::{promote, Array, Category, Dtype, Operand, Operator, Result, Scalar};

macro_rules! binary_functions {
    ($($name:ident => $op:ident;)*) => {
        $(
            pub fn $name<'a, O: Into<Operand<'a>>>(left: &Array, right: O) -> Result<Array> {
                let op = Operator::$op;
                dispatch(op, op.category(), left, right.into(), Mode::Binary)
            }
        )*
    };
}

binary_functions! {
    add => Add;
    sub => Sub;
    mul => Mul;
    div => TrueDiv;
    floor_div => FloorDiv;
    modulo => Mod;
    pow => Pow;
    bitand => And;
    bitor => Or;
    bitxor => Xor;
    lshift => LShift;
    rshift => RShift;
    lt => Lt;
    le => Le;
    gt => Gt;
    ge => Ge;
    eq => Eq;
    ne => Ne;
}

/// Elementwise logical conjunction of two boolean arrays.
pub fn logical_and<'a, O: Into<Operand<'a>>>(left: &Array, right: O) -> Result<Array> {
    dispatch(Operator::And, Category::Boolean, left, right.into(), Mode::Binary)
}

/// Elementwise logical disjunction of two boolean arrays.
pub fn logical_or<'a, O: Into<Operand<'a>>>(left: &Array, right: O) -> Result<Array> {
    dispatch(Operator::Or, Category::Boolean, left, right.into(), Mode::Binary)
}

/// Elementwise exclusive disjunction of two boolean arrays.
pub fn logical_xor<'a, O: Into<Operand<'a>>>(left: &Array, right: O) -> Result<Array> {
    dispatch(Operator::Xor, Category::Boolean, left, right.into(), Mode::Binary)
}

/// Elementwise logical negation of a boolean array.
pub fn logical_not(array: &Array) -> Result<Array> {
    gate("logical_not", Category::Boolean, array.dtype())?;
    array.invert()
}

/// A native binary function outside the operator table.
#[derive(Clone, Copy)]
struct Function {
    name: &'static str,
    op: BinaryOp,
    category: Category,
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name)
    }
}

fn binary_function(function: Function, left: &Array, right: Operand) -> Result<Array> {
    with_operands(function, function.category, left, right, |l, r| {
        let dtype = promote(l.dtype(), r.dtype())?;
        broadcast_native(function.op, l, r, dtype)
    })
}

macro_rules! native_binary_functions {
    ($($(#[$meta:meta])* $name:ident => $op:ident, $category:ident;)*) => {
        $(
            $(#[$meta])*
            pub fn $name<'a, O: Into<Operand<'a>>>(left: &Array, right: O) -> Result<Array> {
                let function = Function {
                    name: stringify!($name),
                    op: BinaryOp::$op,
                    category: Category::$category,
                };

                binary_function(function, left, right.into())
            }
        )*
    };
}

native_binary_functions! {
    /// The four-quadrant arctangent of `left / right`.
    atan2 => Atan2, RealFloating;
    /// The length of the hypotenuse of a right triangle with legs `left` and `right`.
    hypot => Hypot, RealFloating;
    /// The elementwise maximum of two arrays.
    maxof => MaxOf, RealNumeric;
    /// The elementwise minimum of two arrays.
    minof => MinOf, RealNumeric;
    /// The remainder of division, with the sign of the dividend.
    rem => Rem, RealNumeric;
    /// The `left`th root of `right`.
    root => Root, RealFloating;
    /// Construct complex numbers from their real and imaginary components.
    cplx2 => Cplx2, RealFloating;
}

/// Cast an array to the given `dtype`.
pub fn cast(array: &Array, dtype: Dtype) -> Result<Array> {
    array.astype(dtype)
}

/// Wrap the result of a native unary function, which has the same dims as `array`.
fn wrap(handle: Handle, array: &Array) -> Result<Array> {
    Array::from_handle_with_shape(handle, *array.shape())
}

/// The dtype used to evaluate a floating-point function of `dtype`: integers compute in
/// `float32`.
fn compute_dtype(dtype: Dtype) -> Dtype {
    if dtype.is(Category::Floating) {
        dtype
    } else {
        Dtype::Float32
    }
}

fn floating(name: &'static str, op: UnaryOp, category: Category, array: &Array) -> Result<Array> {
    gate(name, category, array.dtype())?;

    let dtype = compute_dtype(array.dtype());
    let handle = if dtype == array.dtype() {
        array.handle().unary(op)?
    } else {
        array.handle().cast(dtype)?.unary(op)?
    };

    wrap(handle, array)
}

macro_rules! floating_functions {
    ($category:ident: $($(#[$meta:meta])* $name:ident => $op:ident;)*) => {
        $(
            $(#[$meta])*
            pub fn $name(array: &Array) -> Result<Array> {
                floating(stringify!($name), UnaryOp::$op, Category::$category, array)
            }
        )*
    };
}

floating_functions! { Numeric:
    sin => Sin;
    cos => Cos;
    tan => Tan;
    asin => Asin;
    acos => Acos;
    atan => Atan;
    sinh => Sinh;
    cosh => Cosh;
    tanh => Tanh;
    asinh => Asinh;
    acosh => Acosh;
    atanh => Atanh;
    exp => Exp;
    log => Log;
    sqrt => Sqrt;
}

floating_functions! { RealNumeric:
    /// `exp(x) - 1`, accurate for small `x`.
    expm1 => Expm1;
    /// `log(1 + x)`, accurate for small `x`.
    log1p => Log1p;
    log2 => Log2;
    log10 => Log10;
    /// The reciprocal of the square root.
    rsqrt => Rsqrt;
    cbrt => Cbrt;
    /// Two raised to the power of each element.
    pow2 => Pow2;
    /// The logistic function `1 / (1 + exp(-x))`.
    sigmoid => Sigmoid;
    erf => Erf;
    erfc => Erfc;
    factorial => Factorial;
    tgamma => Tgamma;
    lgamma => Lgamma;
}

fn rounding(name: &'static str, op: UnaryOp, array: &Array) -> Result<Array> {
    gate(name, Category::RealNumeric, array.dtype())?;

    if array.dtype().is(Category::Integer) {
        array.copy()
    } else {
        wrap(array.handle().unary(op)?, array)
    }
}

/// Round each element to the nearest integer, keeping the dtype.
pub fn round(array: &Array) -> Result<Array> {
    rounding("round", UnaryOp::Round, array)
}

/// Round each element toward zero.
pub fn trunc(array: &Array) -> Result<Array> {
    rounding("trunc", UnaryOp::Trunc, array)
}

pub fn floor(array: &Array) -> Result<Array> {
    rounding("floor", UnaryOp::Floor, array)
}

pub fn ceil(array: &Array) -> Result<Array> {
    rounding("ceil", UnaryOp::Ceil, array)
}

/// `-1`, `0` or `1` according to the sign of each element, in the input dtype.
pub fn sign(array: &Array) -> Result<Array> {
    gate("sign", Category::RealNumeric, array.dtype())?;

    let dtype = array.dtype();
    let zero = Array::from_scalar(Scalar::Int(0), Some(dtype))?;
    let positive = array.gt(&zero)?.astype(dtype)?;
    let negative = array.lt(&zero)?.astype(dtype)?;
    broadcast_native(BinaryOp::Sub, &positive, &negative, dtype)
}

/// `true` where the sign bit of an element is set.
pub fn signbit(array: &Array) -> Result<Array> {
    gate("signbit", Category::RealNumeric, array.dtype())?;

    let dtype = compute_dtype(array.dtype());
    let handle = array.handle().cast(dtype)?.unary(UnaryOp::Sign)?;
    wrap(handle.cast(Dtype::Bool)?, array)
}

/// The phase angle of each (complex) element.
pub fn arg(array: &Array) -> Result<Array> {
    gate("arg", Category::Floating, array.dtype())?;
    wrap(array.handle().unary(UnaryOp::Arg)?, array)
}

fn classify(name: &'static str, op: UnaryOp, array: &Array) -> Result<Array> {
    gate(name, Category::Numeric, array.dtype())?;

    if array.dtype().is(Category::Floating) {
        wrap(array.handle().unary(op)?, array)
    } else {
        super::constant(false, array.shape(), Some(Dtype::Bool))
    }
}

/// `true` where an element is NaN.
pub fn isnan(array: &Array) -> Result<Array> {
    classify("isnan", UnaryOp::IsNan, array)
}

/// `true` where an element is positive or negative infinity.
pub fn isinf(array: &Array) -> Result<Array> {
    classify("isinf", UnaryOp::IsInf, array)
}

/// `true` where an element is neither infinite nor NaN.
pub fn isfinite(array: &Array) -> Result<Array> {
    let nan = isnan(array)?;
    let inf = isinf(array)?;
    logical_or(&nan, &inf)?.invert()
}

/// `true` where an element is zero.
pub fn iszero(array: &Array) -> Result<Array> {
    gate("iszero", Category::Numeric, array.dtype())?;
    wrap(array.handle().unary(UnaryOp::IsZero)?, array)
}

/// The real component of each element.
pub fn real(array: &Array) -> Result<Array> {
    gate("real", Category::Numeric, array.dtype())?;

    if array.dtype().is(Category::ComplexFloating) {
        wrap(array.handle().unary(UnaryOp::Real)?, array)
    } else {
        array.copy()
    }
}

/// The imaginary component of each element; zero for a real array.
pub fn imag(array: &Array) -> Result<Array> {
    gate("imag", Category::Numeric, array.dtype())?;

    if array.dtype().is(Category::ComplexFloating) {
        wrap(array.handle().unary(UnaryOp::Imag)?, array)
    } else {
        super::constant(0, array.shape(), Some(array.dtype()))
    }
}

/// The complex conjugate of each element.
pub fn conjg(array: &Array) -> Result<Array> {
    gate("conjg", Category::Numeric, array.dtype())?;

    if array.dtype().is(Category::ComplexFloating) {
        wrap(array.handle().unary(UnaryOp::Conjg)?, array)
    } else {
        array.copy()
    }
}

/// Promote a real floating-point array to the complex dtype of the same precision.
pub fn cplx(array: &Array) -> Result<Array> {
    gate("cplx", Category::RealFloating, array.dtype())?;

    let dtype = array.dtype().complex()?;
    let handle = if array.dtype() == Dtype::Float16 {
        array.handle().cast(dtype)?
    } else {
        array.handle().unary(UnaryOp::Cplx)?
    };

    wrap(handle, array)
}

/// Raise each element to the power of two.
pub fn square(array: &Array) -> Result<Array> {
    array.mul(array)
}

/// `log(exp(left) + exp(right))`, computed without overflow.
pub fn logaddexp<'a, O: Into<Operand<'a>>>(left: &Array, right: O) -> Result<Array> {
    let function = Function {
        name: "logaddexp",
        op: BinaryOp::MaxOf,
        category: Category::RealFloating,
    };

    with_operands(function, function.category, left, right.into(), |l, r| {
        let dtype = promote(l.dtype(), r.dtype())?;
        let max = broadcast_native(BinaryOp::MaxOf, l, r, dtype)?;
        let min = broadcast_native(BinaryOp::MinOf, l, r, dtype)?;
        let diff = min.sub(&max)?;
        let tail = log1p(&exp(&diff)?)?;
        let sum = max.add(&tail)?;

        // inf - inf is NaN, but logaddexp(inf, inf) is inf
        let infinite = max.eq(&Array::from_scalar(f64::INFINITY, Some(dtype))?)?;
        super::select(&infinite, &max, &sum)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArrayError;

    fn assert_close(actual: Vec<f32>, expected: &[f32]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-5, "{} != {}", a, e);
        }
    }

    #[test]
    fn test_binary_functions() {
        let a = Array::from_vec(vec![1, 2, 3]).unwrap();
        let b = Array::from_vec(vec![4, 5, 6]).unwrap();

        assert_eq!(bitand(&a, &b).unwrap().to_vec::<i32>().unwrap(), vec![0, 0, 2]);
        assert_eq!(add(&a, 1).unwrap().to_vec::<i32>().unwrap(), vec![2, 3, 4]);

        let eq = eq(&a, &Array::from_vec(vec![1, 0, 3]).unwrap()).unwrap();
        assert_eq!(eq.dtype(), Dtype::Bool);
        assert_eq!(eq.to_vec::<bool>().unwrap(), vec![true, false, true]);
    }

    #[test]
    fn test_logical() {
        let a = Array::from_vec(vec![true, false]).unwrap();
        let b = Array::from_vec(vec![true, true]).unwrap();
        assert_eq!(logical_and(&a, &b).unwrap().to_vec::<bool>().unwrap(), vec![true, false]);
        assert_eq!(logical_or(&a, false).unwrap().to_vec::<bool>().unwrap(), vec![true, false]);
        assert_eq!(logical_not(&a).unwrap().to_vec::<bool>().unwrap(), vec![false, true]);

        let ints = Array::from_vec(vec![1u8]).unwrap();
        assert!(matches!(logical_and(&ints, &ints), Err(ArrayError::TypeMismatch(_))));
    }

    #[test]
    fn test_native_binary() {
        let a = Array::from_vec(vec![3.0f32, -1.0]).unwrap();
        let b = Array::from_vec(vec![4.0f32, 2.0]).unwrap();
        assert_close(hypot(&a, &b).unwrap().to_vec().unwrap(), &[5.0, 5f32.sqrt()]);
        assert_close(maxof(&a, &b).unwrap().to_vec().unwrap(), &[4.0, 2.0]);
        assert_close(minof(&a, 0.0).unwrap().to_vec().unwrap(), &[0.0, -1.0]);

        let c = cplx2(&a, &b).unwrap();
        assert_eq!(c.dtype(), Dtype::Complex64);

        let ints = Array::from_vec(vec![1i32]).unwrap();
        assert!(matches!(atan2(&ints, &ints), Err(ArrayError::TypeMismatch(_))));
    }

    #[test]
    fn test_floating() {
        let a = Array::from_vec(vec![0.0f32, 1.0]).unwrap();
        assert_close(exp(&a).unwrap().to_vec().unwrap(), &[1.0, std::f32::consts::E]);
        assert_close(sqrt(&a).unwrap().to_vec().unwrap(), &[0.0, 1.0]);

        let ints = Array::from_vec(vec![4i32, 9]).unwrap();
        let roots = sqrt(&ints).unwrap();
        assert_eq!(roots.dtype(), Dtype::Float32);
        assert_close(roots.to_vec().unwrap(), &[2.0, 3.0]);

        assert!(sin(&Array::from_vec(vec![true]).unwrap()).is_err());
    }

    #[test]
    fn test_rounding() {
        let a = Array::from_vec(vec![-1.5f32, 0.4, 2.6]).unwrap();
        assert_close(floor(&a).unwrap().to_vec().unwrap(), &[-2.0, 0.0, 2.0]);
        assert_close(ceil(&a).unwrap().to_vec().unwrap(), &[-1.0, 1.0, 3.0]);
        assert_close(trunc(&a).unwrap().to_vec().unwrap(), &[-1.0, 0.0, 2.0]);

        let ints = Array::from_vec(vec![-3i16, 0, 5]).unwrap();
        assert_eq!(round(&ints).unwrap().to_vec::<i16>().unwrap(), vec![-3, 0, 5]);
        assert_eq!(sign(&ints).unwrap().to_vec::<i16>().unwrap(), vec![-1, 0, 1]);
        assert_eq!(signbit(&ints).unwrap().to_vec::<bool>().unwrap(), vec![true, false, false]);
    }

    #[test]
    fn test_classify() {
        let a = Array::from_vec(vec![f64::NAN, f64::INFINITY, 1.0]).unwrap();
        assert_eq!(isnan(&a).unwrap().to_vec::<bool>().unwrap(), vec![true, false, false]);
        assert_eq!(isinf(&a).unwrap().to_vec::<bool>().unwrap(), vec![false, true, false]);
        assert_eq!(isfinite(&a).unwrap().to_vec::<bool>().unwrap(), vec![false, false, true]);

        let ints = Array::from_vec(vec![0i32, 1]).unwrap();
        assert_eq!(isnan(&ints).unwrap().to_vec::<bool>().unwrap(), vec![false, false]);
        assert_eq!(iszero(&ints).unwrap().to_vec::<bool>().unwrap(), vec![true, false]);
    }

    #[test]
    fn test_complex_parts() {
        let c = Array::from_vec(vec![crate::Complex::new(1.0f32, -2.0)]).unwrap();
        assert_eq!(real(&c).unwrap().to_vec::<f32>().unwrap(), vec![1.0]);
        assert_eq!(imag(&c).unwrap().to_vec::<f32>().unwrap(), vec![-2.0]);
        assert_eq!(
            conjg(&c).unwrap().to_vec::<crate::Complex<f32>>().unwrap(),
            vec![crate::Complex::new(1.0, 2.0)]
        );

        let r = Array::from_vec(vec![3.0f64]).unwrap();
        let c = cplx(&r).unwrap();
        assert_eq!(c.dtype(), Dtype::Complex128);
        assert_eq!(imag(&r).unwrap().to_vec::<f64>().unwrap(), vec![0.0]);
    }

    #[test]
    fn test_logaddexp() {
        let a = Array::from_vec(vec![0.0f32, f32::INFINITY]).unwrap();
        let b = Array::from_vec(vec![0.0f32, f32::INFINITY]).unwrap();
        let result = logaddexp(&a, &b).unwrap().to_vec::<f32>().unwrap();
        assert!((result[0] - 2f32.ln()).abs() < 1e-6);
        assert_eq!(result[1], f32::INFINITY);
    }
}
