//! The closed set of element types an [`crate::Array`] may hold, and the categories used to
//! admit or reject operator calls.

use std::fmt;
use std::str::FromStr;

use half::f16;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::{ArrayError, Complex, Result, Scalar};

/// The host C scalar kind used to exchange one element with the native library.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CKind {
    Bool,
    Char,
    Short,
    Int,
    LongLong,
    UChar,
    UShort,
    UInt,
    ULongLong,
    Half,
    Float,
    Double,
    FloatComplex,
    DoubleComplex,
}

impl CKind {
    /// The size of this C scalar kind in bytes.
    pub fn size(self) -> usize {
        use CKind::*;
        match self {
            Bool | Char | UChar => 1,
            Short | UShort | Half => 2,
            Int | UInt | Float => 4,
            LongLong | ULongLong | Double | FloatComplex => 8,
            DoubleComplex => 16,
        }
    }
}

impl fmt::Display for CKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use CKind::*;
        let name = match self {
            Bool => "c_bool",
            Char => "c_char",
            Short => "c_short",
            Int => "c_int",
            LongLong => "c_longlong",
            UChar => "c_uchar",
            UShort => "c_ushort",
            UInt => "c_uint",
            ULongLong => "c_ulonglong",
            Half => "c_ushort",
            Float => "c_float",
            Double => "c_double",
            FloatComplex => "c_float_complex",
            DoubleComplex => "c_double_complex",
        };

        f.write_str(name)
    }
}

/// A named subset of the dtype set.
///
/// Each category is a single bit; [`Dtype::mask`] reports every category a dtype belongs to,
/// so a category gate is one bitwise test.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(u16)]
pub enum Category {
    Boolean = 1 << 0,
    SignedInteger = 1 << 1,
    UnsignedInteger = 1 << 2,
    Integer = 1 << 3,
    RealFloating = 1 << 4,
    ComplexFloating = 1 << 5,
    Floating = 1 << 6,
    RealNumeric = 1 << 7,
    Numeric = 1 << 8,
    IntegerOrBoolean = 1 << 9,
    All = 1 << 10,
}

impl Category {
    /// Every dtype in this category, in registry order.
    pub fn dtypes(self) -> Vec<Dtype> {
        Dtype::ALL.iter().copied().filter(|dtype| dtype.is(self)).collect()
    }

    /// Return `true` if `dtype` belongs to this category.
    #[inline]
    pub fn contains(self, dtype: Dtype) -> bool {
        dtype.is(self)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Category::*;
        let name = match self {
            Boolean => "boolean",
            SignedInteger => "signed integer",
            UnsignedInteger => "unsigned integer",
            Integer => "integer",
            RealFloating => "real floating-point",
            ComplexFloating => "complex floating-point",
            Floating => "floating-point",
            RealNumeric => "real numeric",
            Numeric => "numeric",
            IntegerOrBoolean => "integer or boolean",
            All => "any",
        };

        f.write_str(name)
    }
}

const BOOL: u16 = Category::Boolean as u16 | Category::IntegerOrBoolean as u16 | Category::All as u16;

const SIGNED: u16 = Category::SignedInteger as u16
    | Category::Integer as u16
    | Category::RealNumeric as u16
    | Category::Numeric as u16
    | Category::IntegerOrBoolean as u16
    | Category::All as u16;

const UNSIGNED: u16 = Category::UnsignedInteger as u16
    | Category::Integer as u16
    | Category::RealNumeric as u16
    | Category::Numeric as u16
    | Category::IntegerOrBoolean as u16
    | Category::All as u16;

const REAL_FLOAT: u16 = Category::RealFloating as u16
    | Category::Floating as u16
    | Category::RealNumeric as u16
    | Category::Numeric as u16
    | Category::All as u16;

const COMPLEX_FLOAT: u16 = Category::ComplexFloating as u16
    | Category::Floating as u16
    | Category::Numeric as u16
    | Category::All as u16;

/// The element type of an [`crate::Array`].
///
/// The discriminant of each variant is its native wire code (`af_dtype`).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, FromPrimitive, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u32)]
pub enum Dtype {
    Float32 = 0,
    Complex64 = 1,
    Float64 = 2,
    Complex128 = 3,
    Bool = 4,
    Int32 = 5,
    UInt32 = 6,
    UInt8 = 7,
    Int64 = 8,
    UInt64 = 9,
    Int16 = 10,
    UInt16 = 11,
    Float16 = 12,
    Int8 = 13,
}

impl Dtype {
    /// The complete dtype set, in the dense order used to index the promotion table.
    pub const ALL: [Dtype; 14] = [
        Dtype::Bool,
        Dtype::Int8,
        Dtype::Int16,
        Dtype::Int32,
        Dtype::Int64,
        Dtype::UInt8,
        Dtype::UInt16,
        Dtype::UInt32,
        Dtype::UInt64,
        Dtype::Float16,
        Dtype::Float32,
        Dtype::Float64,
        Dtype::Complex64,
        Dtype::Complex128,
    ];

    /// The position of this dtype in [`Dtype::ALL`].
    pub fn index(self) -> usize {
        use Dtype::*;
        match self {
            Bool => 0,
            Int8 => 1,
            Int16 => 2,
            Int32 => 3,
            Int64 => 4,
            UInt8 => 5,
            UInt16 => 6,
            UInt32 => 7,
            UInt64 => 8,
            Float16 => 9,
            Float32 => 10,
            Float64 => 11,
            Complex64 => 12,
            Complex128 => 13,
        }
    }

    /// Resolve a textual name (e.g. "float32") or a typecode (e.g. "f").
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|dtype| dtype.typename() == name || dtype.typecode() == name)
            .ok_or_else(|| ArrayError::UnsupportedDtype(name.to_string()))
    }

    /// Resolve a native wire code.
    pub fn from_wire_code(code: u32) -> Result<Self> {
        Self::from_u32(code)
            .ok_or_else(|| ArrayError::UnsupportedDtype(format!("native dtype code {}", code)))
    }

    /// The `af_dtype` code passed across the native boundary.
    #[inline]
    pub fn wire_code(self) -> u32 {
        self as u32
    }

    /// The single-character typecode of this dtype.
    pub fn typecode(self) -> &'static str {
        use Dtype::*;
        match self {
            Bool => "?",
            Int8 => "b",
            Int16 => "h",
            Int32 => "i",
            Int64 => "l",
            UInt8 => "B",
            UInt16 => "H",
            UInt32 => "I",
            UInt64 => "L",
            Float16 => "e",
            Float32 => "f",
            Float64 => "d",
            Complex64 => "F",
            Complex128 => "D",
        }
    }

    /// The human-readable name of this dtype, as used in error messages.
    pub fn typename(self) -> &'static str {
        use Dtype::*;
        match self {
            Bool => "bool",
            Int8 => "int8",
            Int16 => "int16",
            Int32 => "int32",
            Int64 => "int64",
            UInt8 => "uint8",
            UInt16 => "uint16",
            UInt32 => "uint32",
            UInt64 => "uint64",
            Float16 => "float16",
            Float32 => "float32",
            Float64 => "float64",
            Complex64 => "complex64",
            Complex128 => "complex128",
        }
    }

    /// The host C scalar kind of one element.
    pub fn c_kind(self) -> CKind {
        use Dtype::*;
        match self {
            Bool => CKind::Bool,
            Int8 => CKind::Char,
            Int16 => CKind::Short,
            Int32 => CKind::Int,
            Int64 => CKind::LongLong,
            UInt8 => CKind::UChar,
            UInt16 => CKind::UShort,
            UInt32 => CKind::UInt,
            UInt64 => CKind::ULongLong,
            Float16 => CKind::Half,
            Float32 => CKind::Float,
            Float64 => CKind::Double,
            Complex64 => CKind::FloatComplex,
            Complex128 => CKind::DoubleComplex,
        }
    }

    /// The size of one element in bytes.
    #[inline]
    pub fn size(self) -> usize {
        self.c_kind().size()
    }

    /// The bitmask of every [`Category`] this dtype belongs to.
    pub fn mask(self) -> u16 {
        use Dtype::*;
        match self {
            Bool => BOOL,
            Int8 | Int16 | Int32 | Int64 => SIGNED,
            UInt8 | UInt16 | UInt32 | UInt64 => UNSIGNED,
            Float16 | Float32 | Float64 => REAL_FLOAT,
            Complex64 | Complex128 => COMPLEX_FLOAT,
        }
    }

    /// Return `true` if this dtype belongs to the given `category`.
    #[inline]
    pub fn is(self, category: Category) -> bool {
        self.mask() & category as u16 != 0
    }

    /// The inclusive `(min, max)` range of an integer or boolean dtype.
    pub fn int_bounds(self) -> Option<(i128, i128)> {
        use Dtype::*;
        match self {
            Bool => Some((0, 1)),
            Int8 => Some((i8::MIN as i128, i8::MAX as i128)),
            Int16 => Some((i16::MIN as i128, i16::MAX as i128)),
            Int32 => Some((i32::MIN as i128, i32::MAX as i128)),
            Int64 => Some((i64::MIN as i128, i64::MAX as i128)),
            UInt8 => Some((0, u8::MAX as i128)),
            UInt16 => Some((0, u16::MAX as i128)),
            UInt32 => Some((0, u32::MAX as i128)),
            UInt64 => Some((0, u64::MAX as i128)),
            _ => None,
        }
    }

    /// The real component dtype of a complex dtype, or this dtype itself.
    pub fn real(self) -> Dtype {
        match self {
            Dtype::Complex64 => Dtype::Float32,
            Dtype::Complex128 => Dtype::Float64,
            other => other,
        }
    }

    /// The complex dtype whose components have this dtype's precision.
    pub fn complex(self) -> Result<Dtype> {
        match self {
            Dtype::Float16 | Dtype::Float32 | Dtype::Complex64 => Ok(Dtype::Complex64),
            Dtype::Float64 | Dtype::Complex128 => Ok(Dtype::Complex128),
            other => Err(ArrayError::TypeMismatch(format!(
                "{} has no complex counterpart",
                other
            ))),
        }
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.typename())
    }
}

impl FromStr for Dtype {
    type Err = ArrayError;

    fn from_str(name: &str) -> Result<Self> {
        Self::from_name(name)
    }
}

/// Machine limits of a floating-point dtype.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FInfo {
    pub bits: u32,
    pub eps: f64,
    pub max: f64,
    pub min: f64,
    pub smallest_normal: f64,
    pub dtype: Dtype,
}

/// Machine limits of an integer dtype.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IInfo {
    pub bits: u32,
    pub max: i128,
    pub min: i128,
    pub dtype: Dtype,
}

/// Machine limits of a floating-point dtype; complex dtypes report their real component.
pub fn finfo(dtype: Dtype) -> Result<FInfo> {
    match dtype.real() {
        Dtype::Float16 => Ok(FInfo {
            bits: 16,
            eps: f64::from(f16::EPSILON),
            max: f64::from(f16::MAX),
            min: f64::from(f16::MIN),
            smallest_normal: f64::from(f16::MIN_POSITIVE),
            dtype: Dtype::Float16,
        }),
        Dtype::Float32 => Ok(FInfo {
            bits: 32,
            eps: f32::EPSILON as f64,
            max: f32::MAX as f64,
            min: f32::MIN as f64,
            smallest_normal: f32::MIN_POSITIVE as f64,
            dtype: Dtype::Float32,
        }),
        Dtype::Float64 => Ok(FInfo {
            bits: 64,
            eps: f64::EPSILON,
            max: f64::MAX,
            min: f64::MIN,
            smallest_normal: f64::MIN_POSITIVE,
            dtype: Dtype::Float64,
        }),
        _ => Err(ArrayError::TypeMismatch(format!(
            "finfo requires a floating-point dtype, not {}",
            dtype
        ))),
    }
}

/// Machine limits of an integer dtype.
pub fn iinfo(dtype: Dtype) -> Result<IInfo> {
    match (dtype.is(Category::Integer), dtype.int_bounds()) {
        (true, Some((min, max))) => Ok(IInfo {
            bits: dtype.size() as u32 * 8,
            max,
            min,
            dtype,
        }),
        _ => Err(ArrayError::TypeMismatch(format!(
            "iinfo requires an integer dtype, not {}",
            dtype
        ))),
    }
}

/// A host type which can be copied into or out of a native array element-for-element.
pub trait Element: Copy + Default + Send + 'static {
    /// The dtype of a native array holding elements of this type.
    const DTYPE: Dtype;

    /// Lift this value into a tagged [`Scalar`].
    fn into_scalar(self) -> Scalar;
}

macro_rules! element_int {
    ($t:ty, $dtype:expr) => {
        impl Element for $t {
            const DTYPE: Dtype = $dtype;

            fn into_scalar(self) -> Scalar {
                Scalar::Int(self as i128)
            }
        }
    };
}

element_int!(i8, Dtype::Int8);
element_int!(i16, Dtype::Int16);
element_int!(i32, Dtype::Int32);
element_int!(i64, Dtype::Int64);
element_int!(u8, Dtype::UInt8);
element_int!(u16, Dtype::UInt16);
element_int!(u32, Dtype::UInt32);
element_int!(u64, Dtype::UInt64);

impl Element for bool {
    const DTYPE: Dtype = Dtype::Bool;

    fn into_scalar(self) -> Scalar {
        Scalar::Bool(self)
    }
}

impl Element for f16 {
    const DTYPE: Dtype = Dtype::Float16;

    fn into_scalar(self) -> Scalar {
        Scalar::Float(self.to_f64())
    }
}

impl Element for f32 {
    const DTYPE: Dtype = Dtype::Float32;

    fn into_scalar(self) -> Scalar {
        Scalar::Float(self as f64)
    }
}

impl Element for f64 {
    const DTYPE: Dtype = Dtype::Float64;

    fn into_scalar(self) -> Scalar {
        Scalar::Float(self)
    }
}

impl Element for Complex<f32> {
    const DTYPE: Dtype = Dtype::Complex64;

    fn into_scalar(self) -> Scalar {
        Scalar::Complex(Complex::new(self.re as f64, self.im as f64))
    }
}

impl Element for Complex<f64> {
    const DTYPE: Dtype = Dtype::Complex128;

    fn into_scalar(self) -> Scalar {
        Scalar::Complex(self)
    }
}
