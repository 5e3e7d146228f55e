use std::convert::TryFrom;
use std::fmt;

use crate::ops::{dispatch, Mode};
use crate::{ArrayError, Category, Complex, Dtype, Index, Operator, Result, Scalar, Shape};

use super::{array_namespace, check_allowed, check_dtype, Namespace};

/// An n-dimensional array conforming to the Array API standard.
pub struct Array {
    inner: crate::Array,
}

impl Array {
    pub(super) fn new(inner: crate::Array) -> Self {
        Self { inner }
    }

    /// Borrow the [`crate::Array`] behind this array.
    pub fn as_facade(&self) -> &crate::Array {
        &self.inner
    }

    pub fn into_facade(self) -> crate::Array {
        self.inner
    }

    pub fn dtype(&self) -> Dtype {
        self.inner.dtype()
    }

    pub fn ndim(&self) -> usize {
        self.inner.ndim()
    }

    pub fn shape(&self) -> &Shape {
        self.inner.shape()
    }

    pub fn size(&self) -> u64 {
        self.inner.size()
    }

    /// The transpose of this matrix.
    #[allow(non_snake_case)]
    pub fn T(&self) -> Result<Array> {
        self.inner.T().map(Self::new)
    }

    /// The transpose of each matrix in this stack of matrices.
    #[allow(non_snake_case)]
    pub fn mT(&self) -> Result<Array> {
        self.inner.mT().map(Self::new)
    }

    /// The namespace which implements the functions of this array.
    pub fn array_namespace(&self, api_version: Option<&str>) -> Result<Namespace> {
        array_namespace(api_version)
    }

    /// Index this array.
    pub fn get(&self, keys: &[Index]) -> Result<Array> {
        self.inner.get(keys).map(Self::new)
    }

    /// Assign `value` to the elements of this array selected by `keys`.
    pub fn set<'a, O: Into<Operand<'a>>>(&mut self, keys: &[Index], value: O) -> Result<()> {
        self.inner.set(keys, crate::Operand::from(value.into()))
    }

    fn single(&self, conversion: &str) -> Result<Scalar> {
        if self.size() != 1 {
            return Err(ArrayError::Shape(format!(
                "{} requires an array with one element, not shape {}",
                conversion,
                self.shape()
            )));
        }

        self.inner.get_value(0)
    }

    pub fn to_bool(&self) -> Result<bool> {
        match self.single("bool")? {
            Scalar::Bool(value) => Ok(value),
            other => Ok(!other.is_zero()),
        }
    }

    /// Convert a one-element array to an integer, truncating a floating-point value.
    pub fn to_int(&self) -> Result<i64> {
        let value = match self.single("int")? {
            Scalar::Bool(value) => value as i128,
            Scalar::Int(value) => value,
            Scalar::Float(value) if value.is_finite() => value.trunc() as i128,
            other => {
                return Err(ArrayError::TypeMismatch(format!(
                    "cannot convert {} to an integer",
                    other
                )))
            }
        };

        i64::try_from(value).map_err(|_| ArrayError::Overflow {
            value: value.to_string(),
            dtype: Dtype::Int64,
        })
    }

    pub fn to_float(&self) -> Result<f64> {
        let scalar = self.single("float")?;
        scalar.as_f64().ok_or_else(|| {
            ArrayError::TypeMismatch(format!("cannot convert {} to a real number", scalar))
        })
    }

    pub fn to_complex(&self) -> Result<Complex<f64>> {
        self.single("complex").map(|scalar| scalar.as_complex())
    }
}

impl TryFrom<crate::Array> for Array {
    type Error = ArrayError;

    fn try_from(inner: crate::Array) -> Result<Self> {
        check_dtype(inner.dtype())?;
        Ok(Self::new(inner))
    }
}

/// The right-hand side of an operator of this namespace: an array of this namespace or a host
/// scalar. A [`crate::Array`] must pass through [`Array::try_from`] first.
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

operand_from!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, Complex<f32>, Complex<f64>);

impl<'a> From<Operand<'a>> for crate::Operand<'a> {
    fn from(operand: Operand<'a>) -> Self {
        match operand {
            Operand::Array(array) => Self::Array(&array.inner),
            Operand::Scalar(scalar) => Self::Scalar(scalar),
        }
    }
}

/// The category an operator of this namespace admits, which is stricter than the facade's for
/// true division.
pub(super) fn category(op: Operator) -> Category {
    match op {
        Operator::TrueDiv => Category::Floating,
        other => other.category(),
    }
}

pub(super) fn binary<'a>(op: Operator, x1: &Array, x2: Operand<'a>, mode: Mode) -> Result<Array> {
    check_allowed(&op.to_string(), category(op), x1)?;
    dispatch(op, category(op), &x1.inner, x2.into(), mode).map(Array::new)
}

macro_rules! binary_methods {
    ($($op:ident: $name:ident, $rname:ident, $iname:ident;)*) => {
        impl Array {
            $(
                pub fn $name<'a, O: Into<Operand<'a>>>(&self, other: O) -> Result<Array> {
                    binary(Operator::$op, self, other.into(), Mode::Binary)
                }

                pub fn $rname<'a, O: Into<Operand<'a>>>(&self, other: O) -> Result<Array> {
                    binary(Operator::$op, self, other.into(), Mode::Reflected)
                }

                pub fn $iname<'a, O: Into<Operand<'a>>>(&mut self, other: O) -> Result<()> {
                    let result = binary(Operator::$op, self, other.into(), Mode::InPlace)?;
                    self.assign(result)
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
                    binary(Operator::$op, self, other.into(), Mode::Binary)
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
        check_allowed("neg", Category::Numeric, self)?;
        self.inner.neg().map(Self::new)
    }

    pub fn pos(&self) -> Result<Array> {
        check_allowed("pos", Category::Numeric, self)?;
        self.inner.pos().map(Self::new)
    }

    pub fn abs(&self) -> Result<Array> {
        check_allowed("abs", Category::Numeric, self)?;
        self.inner.abs().map(Self::new)
    }

    pub fn invert(&self) -> Result<Array> {
        check_allowed("invert", Category::IntegerOrBoolean, self)?;
        self.inner.invert().map(Self::new)
    }

    fn assign(&mut self, result: Array) -> Result<()> {
        if result.shape() == self.shape() {
            self.inner = result.inner;
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

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Array API array of {} with shape {}", self.dtype(), self.shape())
    }
}

impl fmt::Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array_api::{asarray, ones};

    fn ints(values: &[i128]) -> Array {
        let values: Vec<Scalar> = values.iter().copied().map(Scalar::Int).collect();
        asarray(&values, None, Some(Dtype::Int32)).unwrap()
    }

    #[test]
    fn test_strict_truediv() {
        let x = ints(&[1, 2, 3]);
        let y = ints(&[4, 5, 6]);

        assert!(matches!(x.truediv(&y), Err(ArrayError::TypeMismatch(_))));
        assert_eq!(x.as_facade().truediv(y.as_facade()).unwrap().dtype(), Dtype::Float32);

        let a = ones(&Shape::vector(2), Some(Dtype::Float32)).unwrap();
        let b = a.truediv(2.0f64).unwrap();
        assert_eq!(b.dtype(), Dtype::Float32);
        assert_eq!(b.as_facade().to_vec::<f32>().unwrap(), vec![0.5, 0.5]);
    }

    #[test]
    fn test_operators() {
        let x = ints(&[1, 2, 3]);
        let y = ints(&[4, 5, 6]);

        let sum = x.add(&y).unwrap();
        assert_eq!(sum.as_facade().to_vec::<i32>().unwrap(), vec![5, 7, 9]);

        let diff = x.rsub(10i32).unwrap();
        assert_eq!(diff.as_facade().to_vec::<i32>().unwrap(), vec![9, 8, 7]);

        let mask = x.lt(&y).unwrap();
        assert_eq!(mask.dtype(), Dtype::Bool);
        assert!(mask.bitand(1i32).is_err());
        assert!(mask.neg().is_err());

        assert!(matches!(x.add(1i64 << 40), Err(ArrayError::Overflow { .. })));
        assert!(x.add(1.5f64).is_err());
    }

    #[test]
    fn test_in_place() {
        let mut x = ints(&[1, 2, 3]);
        x.imul(2i32).unwrap();
        assert_eq!(x.as_facade().to_vec::<i32>().unwrap(), vec![2, 4, 6]);

        let wide = x.as_facade().astype(Dtype::Int64).unwrap();
        assert!(matches!(
            x.iadd(&Array::try_from(wide).unwrap()),
            Err(ArrayError::InPlacePromotionFailure(_, _))
        ));
    }

    #[test]
    fn test_operands() {
        let x = ones(&Shape::vector(2), Some(Dtype::Float32)).unwrap();
        let y = x.add(1.0f32).unwrap();
        assert_eq!(y.as_facade().to_vec::<f32>().unwrap(), vec![2.0, 2.0]);

        let mut z = ints(&[1, 2]);
        z.set(&[Index::At(0)], 5i32).unwrap();
        assert_eq!(z.as_facade().to_vec::<i32>().unwrap(), vec![5, 2]);
        assert!(z.set(&[Index::At(0)], 0.5f64).is_err());
    }

    #[test]
    fn test_conversions() {
        let one = ints(&[7]);
        assert_eq!(one.to_int().unwrap(), 7);
        assert_eq!(one.to_float().unwrap(), 7.0);
        assert!(one.to_bool().unwrap());
        assert_eq!(one.to_complex().unwrap(), Complex::new(7.0, 0.0));

        assert!(ints(&[1, 2]).to_int().is_err());
    }

    #[test]
    fn test_try_from() {
        let half = crate::Array::from_vec(vec![half::f16::ONE]).unwrap();
        assert!(Array::try_from(half).is_err());

        let single = crate::Array::from_vec(vec![1.0f32]).unwrap();
        assert_eq!(Array::try_from(single).unwrap().dtype(), Dtype::Float32);
    }
}
