//! Host scalars, and the rules for lifting them into arrays.

use std::fmt;

use half::f16;
use num_traits::NumCast;
use safecast::TryCastFrom;

use super::{ArrayError, Category, Complex, Dtype, Result};

/// A host scalar, tagged by kind.
///
/// `Int` is wide enough to hold any value of any integer dtype, so that a literal outside a
/// dtype's range can be detected and reported instead of silently wrapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i128),
    Float(f64),
    Complex(Complex<f64>),
}

impl Scalar {
    /// The name of this scalar's kind, as used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Complex(_) => "complex",
        }
    }

    /// Infer the dtype of an array constructed from this scalar alone.
    pub fn dtype(&self) -> Result<Dtype> {
        match self {
            Self::Bool(_) => Ok(Dtype::Bool),
            Self::Int(i) => infer_int(*i),
            Self::Float(_) => Ok(Dtype::Float32),
            Self::Complex(_) => Ok(Dtype::Complex64),
        }
    }

    /// Return `true` if this scalar can be stored in an array of the given `dtype` without
    /// changing its kind or overflowing.
    pub fn fits(&self, dtype: Dtype) -> bool {
        implicit_scalar_dtype(self, dtype).is_ok()
    }

    /// The real value of this scalar, if it has no imaginary component.
    pub fn as_f64(&self) -> Option<f64> {
        f64::opt_cast_from(*self)
    }

    /// This scalar as a complex number.
    pub fn as_complex(&self) -> Complex<f64> {
        match self {
            Self::Bool(b) => Complex::new(if *b { 1. } else { 0. }, 0.),
            Self::Int(i) => Complex::new(*i as f64, 0.),
            Self::Float(f) => Complex::new(*f, 0.),
            Self::Complex(c) => *c,
        }
    }

    /// Return `true` if this scalar is zero (or `false`).
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Bool(b) => !b,
            Self::Int(i) => *i == 0,
            Self::Float(f) => *f == 0.,
            Self::Complex(c) => c.re == 0. && c.im == 0.,
        }
    }
}

fn infer_int(i: i128) -> Result<Dtype> {
    if i64::try_from(i).is_ok() {
        Ok(Dtype::Int64)
    } else if u64::try_from(i).is_ok() {
        Ok(Dtype::UInt64)
    } else {
        Err(ArrayError::Overflow {
            value: i.to_string(),
            dtype: Dtype::Int64,
        })
    }
}

/// Select the dtype of a scalar lifted to operate with an array of dtype `array_dtype`.
///
/// The lifted scalar always takes the array's dtype, so this only decides whether the
/// combination is admissible:
///  - a bool scalar requires a bool array
///  - an int scalar requires an integer or floating-point array, and must fit an integer dtype
///  - a float scalar requires a floating-point array (and is narrowed to single precision
///    when the array is single precision)
///  - a complex scalar requires a complex array
pub fn implicit_scalar_dtype(scalar: &Scalar, array_dtype: Dtype) -> Result<Dtype> {
    match scalar {
        Scalar::Bool(_) if array_dtype != Dtype::Bool => Err(ArrayError::TypeMismatch(format!(
            "bool cannot promote with non-bool dtype {}",
            array_dtype
        ))),
        Scalar::Bool(_) => Ok(array_dtype),
        Scalar::Int(_) if array_dtype == Dtype::Bool => Err(ArrayError::TypeMismatch(
            "an int scalar cannot promote with dtype bool".to_string(),
        )),
        Scalar::Int(i) => match array_dtype.int_bounds() {
            Some((min, max)) if *i < min || *i > max => Err(ArrayError::Overflow {
                value: i.to_string(),
                dtype: array_dtype,
            }),
            _ => Ok(array_dtype),
        },
        Scalar::Float(_) if !array_dtype.is(Category::Floating) => {
            Err(ArrayError::TypeMismatch(format!(
                "a float scalar cannot promote with non-floating-point dtype {}",
                array_dtype
            )))
        }
        Scalar::Complex(_) if !array_dtype.is(Category::ComplexFloating) => {
            Err(ArrayError::TypeMismatch(format!(
                "a complex scalar cannot promote with non-complex dtype {}",
                array_dtype
            )))
        }
        Scalar::Float(_) | Scalar::Complex(_) => Ok(array_dtype),
    }
}

/// Infer the dtype of an array constructed from a sequence of scalars.
///
/// An empty sequence, or one which mixes ints and floats, is floating-point by default.
pub fn infer_dtype(values: &[Scalar]) -> Result<Dtype> {
    if values.is_empty() {
        return Ok(Dtype::Float32);
    }

    let bools = values.iter().filter(|v| matches!(v, Scalar::Bool(_))).count();
    if bools == values.len() {
        return Ok(Dtype::Bool);
    } else if bools > 0 {
        return Err(ArrayError::TypeMismatch(
            "cannot infer a dtype for a sequence which mixes bool with numbers".to_string(),
        ));
    }

    if values.iter().any(|v| matches!(v, Scalar::Complex(_))) {
        Ok(Dtype::Complex64)
    } else if values.iter().any(|v| matches!(v, Scalar::Float(_))) {
        Ok(Dtype::Float32)
    } else {
        values.iter().try_fold(Dtype::Int64, |dtype, value| match value {
            Scalar::Int(i) => match infer_int(*i)? {
                Dtype::UInt64 if values.iter().any(|v| matches!(v, Scalar::Int(i) if *i < 0)) => {
                    Err(ArrayError::Overflow {
                        value: i.to_string(),
                        dtype: Dtype::Int64,
                    })
                }
                Dtype::UInt64 => Ok(Dtype::UInt64),
                _ => Ok(dtype),
            },
            _ => Ok(dtype),
        })
    }
}

/// Check that every value in `values` can be stored as `dtype`.
pub fn check_values(values: &[Scalar], dtype: Dtype) -> Result<()> {
    values
        .iter()
        .try_for_each(|value| implicit_scalar_dtype(value, dtype).map(|_| ()))
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Bool(b) => fmt::Display::fmt(b, f),
            Self::Int(i) => fmt::Display::fmt(i, f),
            Self::Float(x) => fmt::Display::fmt(x, f),
            Self::Complex(c) => write!(f, "({}{:+}j)", c.re, c.im),
        }
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

macro_rules! scalar_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Scalar {
                fn from(i: $t) -> Self {
                    Self::Int(i as i128)
                }
            }
        )*
    };
}

scalar_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl From<f16> for Scalar {
    fn from(f: f16) -> Self {
        Self::Float(f.to_f64())
    }
}

impl From<f32> for Scalar {
    fn from(f: f32) -> Self {
        Self::Float(f as f64)
    }
}

impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<Complex<f32>> for Scalar {
    fn from(c: Complex<f32>) -> Self {
        Self::Complex(Complex::new(c.re as f64, c.im as f64))
    }
}

impl From<Complex<f64>> for Scalar {
    fn from(c: Complex<f64>) -> Self {
        Self::Complex(c)
    }
}

macro_rules! try_cast_int {
    ($($t:ty),*) => {
        $(
            impl TryCastFrom<Scalar> for $t {
                fn can_cast_from(scalar: &Scalar) -> bool {
                    match scalar {
                        Scalar::Bool(_) => true,
                        Scalar::Int(i) => <$t as NumCast>::from(*i).is_some(),
                        _ => false,
                    }
                }

                fn opt_cast_from(scalar: Scalar) -> Option<Self> {
                    match scalar {
                        Scalar::Bool(b) => Some(if b { 1 } else { 0 }),
                        Scalar::Int(i) => <$t as NumCast>::from(i),
                        _ => None,
                    }
                }
            }
        )*
    };
}

try_cast_int!(i8, i16, i32, i64, u8, u16, u32, u64);

impl TryCastFrom<Scalar> for bool {
    fn can_cast_from(scalar: &Scalar) -> bool {
        matches!(scalar, Scalar::Bool(_))
    }

    fn opt_cast_from(scalar: Scalar) -> Option<Self> {
        match scalar {
            Scalar::Bool(b) => Some(b),
            _ => None,
        }
    }
}

impl TryCastFrom<Scalar> for f64 {
    fn can_cast_from(scalar: &Scalar) -> bool {
        !matches!(scalar, Scalar::Complex(_))
    }

    fn opt_cast_from(scalar: Scalar) -> Option<Self> {
        match scalar {
            Scalar::Bool(b) => Some(if b { 1. } else { 0. }),
            Scalar::Int(i) => Some(i as f64),
            Scalar::Float(f) => Some(f),
            Scalar::Complex(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_scalar() {
        assert_eq!(
            implicit_scalar_dtype(&Scalar::Bool(true), Dtype::Bool).unwrap(),
            Dtype::Bool
        );

        let err = implicit_scalar_dtype(&Scalar::Bool(true), Dtype::Int32).unwrap_err();
        assert!(matches!(err, ArrayError::TypeMismatch(_)));
        assert!(err.to_string().contains("bool cannot promote with non-bool"));
    }

    #[test]
    fn test_int_scalar() {
        assert!(implicit_scalar_dtype(&Scalar::Int(1), Dtype::Bool).is_err());
        assert_eq!(
            implicit_scalar_dtype(&Scalar::Int(3), Dtype::Float32).unwrap(),
            Dtype::Float32
        );
        assert_eq!(
            implicit_scalar_dtype(&Scalar::Int(3), Dtype::Complex128).unwrap(),
            Dtype::Complex128
        );
    }

    #[test]
    fn test_int_bounds() {
        for dtype in Category::Integer.dtypes() {
            let (min, max) = dtype.int_bounds().unwrap();
            assert!(implicit_scalar_dtype(&Scalar::Int(min), dtype).is_ok());
            assert!(implicit_scalar_dtype(&Scalar::Int(max), dtype).is_ok());

            let err = implicit_scalar_dtype(&Scalar::Int(min - 1), dtype).unwrap_err();
            assert!(matches!(err, ArrayError::Overflow { .. }), "{}", dtype);

            let err = implicit_scalar_dtype(&Scalar::Int(max + 1), dtype).unwrap_err();
            assert!(matches!(err, ArrayError::Overflow { .. }), "{}", dtype);
        }
    }

    #[test]
    fn test_float_scalar() {
        assert!(implicit_scalar_dtype(&Scalar::Float(1.5), Dtype::Int32).is_err());
        assert!(implicit_scalar_dtype(&Scalar::Float(1.5), Dtype::Bool).is_err());

        // single precision is preserved
        assert_eq!(
            implicit_scalar_dtype(&Scalar::Float(1.5), Dtype::Float32).unwrap(),
            Dtype::Float32
        );
        assert_eq!(
            implicit_scalar_dtype(&Scalar::Float(1.5), Dtype::Complex64).unwrap(),
            Dtype::Complex64
        );
    }

    #[test]
    fn test_complex_scalar() {
        let c = Scalar::Complex(Complex::new(1., 2.));
        assert!(implicit_scalar_dtype(&c, Dtype::Float64).is_err());
        assert_eq!(
            implicit_scalar_dtype(&c, Dtype::Complex64).unwrap(),
            Dtype::Complex64
        );
    }

    #[test]
    fn test_infer_dtype() {
        assert_eq!(infer_dtype(&[]).unwrap(), Dtype::Float32);
        assert_eq!(
            infer_dtype(&[true.into(), false.into()]).unwrap(),
            Dtype::Bool
        );
        assert_eq!(infer_dtype(&[1.into(), 2.into()]).unwrap(), Dtype::Int64);
        assert_eq!(infer_dtype(&[1.into(), 2.5.into()]).unwrap(), Dtype::Float32);
        assert_eq!(
            infer_dtype(&[1.into(), Complex::new(0., 1.).into()]).unwrap(),
            Dtype::Complex64
        );
        assert_eq!(
            infer_dtype(&[Scalar::Int(u64::MAX as i128)]).unwrap(),
            Dtype::UInt64
        );
        assert!(infer_dtype(&[true.into(), 1.into()]).is_err());
    }

    #[test]
    fn test_overflow_literal() {
        let err = Scalar::Int(1 << 100).dtype().unwrap_err();
        assert!(matches!(err, ArrayError::Overflow { .. }));

        let err = infer_dtype(&[Scalar::Int(-1), Scalar::Int(u64::MAX as i128)]).unwrap_err();
        assert!(matches!(err, ArrayError::Overflow { .. }));
    }

    #[test]
    fn test_try_cast() {
        assert_eq!(i8::opt_cast_from(Scalar::Int(127)), Some(127));
        assert_eq!(i8::opt_cast_from(Scalar::Int(128)), None);
        assert!(u64::can_cast_from(&Scalar::Int(u64::MAX as i128)));
        assert!(!u64::can_cast_from(&Scalar::Int(-1)));
        assert_eq!(f64::opt_cast_from(Scalar::Int(3)), Some(3.));
        assert_eq!(Scalar::Complex(Complex::new(1., 1.)).as_f64(), None);
    }
}
