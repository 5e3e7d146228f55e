//! Element-wise functions, each gated on the dtype categories the standard admits.

use crate::ops::{with_operands, Mode};
use crate::{Category, Operator, Result};

use super::array::binary;
use super::{check_allowed, Array, Operand};

macro_rules! operator_functions {
    ($($name:ident => $op:ident;)*) => {
        $(
            pub fn $name<'a, O: Into<Operand<'a>>>(x1: &Array, x2: O) -> Result<Array> {
                binary(Operator::$op, x1, x2.into(), Mode::Binary)
            }
        )*
    };
}

operator_functions! {
    add => Add;
    subtract => Sub;
    multiply => Mul;
    divide => TrueDiv;
    floor_divide => FloorDiv;
    remainder => Mod;
    pow => Pow;
    bitwise_and => And;
    bitwise_or => Or;
    bitwise_xor => Xor;
    bitwise_left_shift => LShift;
    bitwise_right_shift => RShift;
    less => Lt;
    less_equal => Le;
    greater => Gt;
    greater_equal => Ge;
    equal => Eq;
    not_equal => Ne;
}

macro_rules! binary_functions {
    ($($name:ident => $category:ident, $f:path;)*) => {
        $(
            pub fn $name<'a, O: Into<Operand<'a>>>(x1: &Array, x2: O) -> Result<Array> {
                let name = stringify!($name);
                let x2 = crate::Operand::from(x2.into());
                with_operands(name, Category::$category, x1.as_facade(), x2, |l, r| {
                    $f(l, r)
                })
                .map(Array::new)
            }
        )*
    };
}

binary_functions! {
    atan2 => RealFloating, crate::atan2;
    hypot => RealFloating, crate::hypot;
    logaddexp => RealFloating, crate::logaddexp;
    logical_and => Boolean, crate::logical_and;
    logical_or => Boolean, crate::logical_or;
    logical_xor => Boolean, crate::logical_xor;
}

macro_rules! unary_functions {
    ($($name:ident => $category:ident, $f:path;)*) => {
        $(
            pub fn $name(x: &Array) -> Result<Array> {
                check_allowed(stringify!($name), Category::$category, x)?;
                $f(x.as_facade()).map(Array::new)
            }
        )*
    };
}

unary_functions! {
    acos => Floating, crate::acos;
    acosh => Floating, crate::acosh;
    asin => Floating, crate::asin;
    asinh => Floating, crate::asinh;
    atan => Floating, crate::atan;
    atanh => Floating, crate::atanh;
    ceil => RealNumeric, crate::ceil;
    conj => ComplexFloating, crate::conjg;
    cos => Floating, crate::cos;
    cosh => Floating, crate::cosh;
    exp => Floating, crate::exp;
    expm1 => RealFloating, crate::expm1;
    floor => RealNumeric, crate::floor;
    imag => ComplexFloating, crate::imag;
    isfinite => Numeric, crate::isfinite;
    isinf => Numeric, crate::isinf;
    isnan => Numeric, crate::isnan;
    log => Floating, crate::log;
    log1p => RealFloating, crate::log1p;
    log2 => RealFloating, crate::log2;
    log10 => RealFloating, crate::log10;
    logical_not => Boolean, crate::logical_not;
    real => ComplexFloating, crate::real;
    round => RealNumeric, crate::round;
    sign => RealNumeric, crate::sign;
    sin => Floating, crate::sin;
    sinh => Floating, crate::sinh;
    sqrt => Floating, crate::sqrt;
    square => Numeric, crate::square;
    tan => Floating, crate::tan;
    tanh => Floating, crate::tanh;
    trunc => RealNumeric, crate::trunc;
}

pub fn abs(x: &Array) -> Result<Array> {
    x.abs()
}

pub fn negative(x: &Array) -> Result<Array> {
    x.neg()
}

pub fn positive(x: &Array) -> Result<Array> {
    x.pos()
}

pub fn bitwise_invert(x: &Array) -> Result<Array> {
    x.invert()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array_api::{asarray, full};
    use crate::{ArrayError, Dtype, Scalar, Shape};

    fn floats(values: &[f64]) -> Array {
        let values: Vec<Scalar> = values.iter().copied().map(Scalar::Float).collect();
        asarray(&values, None, Some(Dtype::Float32)).unwrap()
    }

    fn ints(values: &[i128]) -> Array {
        let values: Vec<Scalar> = values.iter().copied().map(Scalar::Int).collect();
        asarray(&values, None, Some(Dtype::Int32)).unwrap()
    }

    #[test]
    fn test_operator_functions() {
        let x = ints(&[1, 2, 3]);
        let y = ints(&[4, 5, 6]);

        let sum = add(&x, &y).unwrap();
        assert_eq!(sum.as_facade().to_vec::<i32>().unwrap(), vec![5, 7, 9]);

        let product = multiply(&x, 2i32).unwrap();
        assert_eq!(product.as_facade().to_vec::<i32>().unwrap(), vec![2, 4, 6]);

        let masked = bitwise_and(&x, &y).unwrap();
        assert_eq!(masked.as_facade().to_vec::<i32>().unwrap(), vec![0, 0, 2]);

        let same = equal(&x, &ints(&[1, 0, 3])).unwrap();
        assert_eq!(same.as_facade().to_vec::<bool>().unwrap(), vec![true, false, true]);

        assert!(matches!(divide(&x, &y), Err(ArrayError::TypeMismatch(_))));
        let quotient = divide(&floats(&[1.0, 2.0]), &floats(&[4.0, 5.0])).unwrap();
        assert_eq!(quotient.as_facade().to_vec::<f32>().unwrap(), vec![0.25, 0.4]);
    }

    #[test]
    fn test_unary_gates() {
        let x = ints(&[1, 4, 9]);
        assert!(sqrt(&x).is_err());
        assert!(exp(&x).is_err());

        let roots = sqrt(&floats(&[1.0, 4.0, 9.0])).unwrap();
        assert_eq!(roots.as_facade().to_vec::<f32>().unwrap(), vec![1.0, 2.0, 3.0]);

        assert_eq!(square(&x).unwrap().as_facade().to_vec::<i32>().unwrap(), vec![1, 16, 81]);
        assert_eq!(floor(&x).unwrap().dtype(), Dtype::Int32);
        assert!(real(&floats(&[1.0])).is_err());
    }

    #[test]
    fn test_sign_flip() {
        let x = ints(&[1, -2, 3]);
        let flipped = negative(&x).unwrap();
        assert_eq!(flipped.as_facade().to_vec::<i32>().unwrap(), vec![-1, 2, -3]);

        let same = positive(&x).unwrap();
        assert_eq!(same.as_facade().to_vec::<i32>().unwrap(), vec![1, -2, 3]);

        assert_eq!(abs(&x).unwrap().as_facade().to_vec::<i32>().unwrap(), vec![1, 2, 3]);
        assert_eq!(
            bitwise_invert(&x).unwrap().as_facade().to_vec::<i32>().unwrap(),
            vec![-2, 1, -4]
        );
    }

    #[test]
    fn test_logical() {
        let t = full(&Shape::vector(2), true, None).unwrap();
        let f = full(&Shape::vector(2), false, None).unwrap();

        let either = logical_or(&t, &f).unwrap();
        assert_eq!(either.as_facade().to_vec::<bool>().unwrap(), vec![true, true]);
        assert_eq!(
            logical_not(&t).unwrap().as_facade().to_vec::<bool>().unwrap(),
            vec![false, false]
        );

        assert!(logical_and(&ints(&[1, 0]), &ints(&[1, 1])).is_err());
    }

    #[test]
    fn test_atan2() {
        let angle = atan2(&floats(&[1.0]), &floats(&[1.0])).unwrap();
        let value = angle.as_facade().to_vec::<f32>().unwrap()[0];
        assert!((value - std::f32::consts::FRAC_PI_4).abs() < 1e-6);

        assert!(atan2(&ints(&[1]), &ints(&[1])).is_err());
    }
}
