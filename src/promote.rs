//! Type promotion between dtypes.
//!
//! Only same-kind promotion is implicit: integers promote with integers (signed with unsigned
//! widening to a signed dtype), floating-point numbers with floating-point numbers (real with
//! complex widening to a complex dtype wide enough for both), and bool with bool. Every other
//! pair is absent from the table and must be cast explicitly.

use super::{ArrayError, Dtype, Result};

const N: Option<Dtype> = None;
const B: Option<Dtype> = Some(Dtype::Bool);
const I8: Option<Dtype> = Some(Dtype::Int8);
const I16: Option<Dtype> = Some(Dtype::Int16);
const I32: Option<Dtype> = Some(Dtype::Int32);
const I64: Option<Dtype> = Some(Dtype::Int64);
const U8: Option<Dtype> = Some(Dtype::UInt8);
const U16: Option<Dtype> = Some(Dtype::UInt16);
const U32: Option<Dtype> = Some(Dtype::UInt32);
const U64: Option<Dtype> = Some(Dtype::UInt64);
const F16: Option<Dtype> = Some(Dtype::Float16);
const F32: Option<Dtype> = Some(Dtype::Float32);
const F64: Option<Dtype> = Some(Dtype::Float64);
const C64: Option<Dtype> = Some(Dtype::Complex64);
const C128: Option<Dtype> = Some(Dtype::Complex128);

/// The promotion lattice, indexed by [`Dtype::index`] on both axes.
#[rustfmt::skip]
const TABLE: [[Option<Dtype>; 14]; 14] = [
    //  bool i8   i16  i32  i64  u8   u16  u32  u64  f16   f32   f64   c64   c128
    [B,  N,   N,   N,   N,   N,   N,   N,   N,   N,    N,    N,    N,    N   ], // bool
    [N,  I8,  I16, I32, I64, I16, I32, I64, N,   N,    N,    N,    N,    N   ], // i8
    [N,  I16, I16, I32, I64, I16, I32, I64, N,   N,    N,    N,    N,    N   ], // i16
    [N,  I32, I32, I32, I64, I32, I32, I64, N,   N,    N,    N,    N,    N   ], // i32
    [N,  I64, I64, I64, I64, I64, I64, I64, N,   N,    N,    N,    N,    N   ], // i64
    [N,  I16, I16, I32, I64, U8,  U16, U32, U64, N,    N,    N,    N,    N   ], // u8
    [N,  I32, I32, I32, I64, U16, U16, U32, U64, N,    N,    N,    N,    N   ], // u16
    [N,  I64, I64, I64, I64, U32, U32, U32, U64, N,    N,    N,    N,    N   ], // u32
    [N,  N,   N,   N,   N,   U64, U64, U64, U64, N,    N,    N,    N,    N   ], // u64
    [N,  N,   N,   N,   N,   N,   N,   N,   N,   F16,  F32,  F64,  C64,  C128], // f16
    [N,  N,   N,   N,   N,   N,   N,   N,   N,   F32,  F32,  F64,  C64,  C128], // f32
    [N,  N,   N,   N,   N,   N,   N,   N,   N,   F64,  F64,  F64,  C128, C128], // f64
    [N,  N,   N,   N,   N,   N,   N,   N,   N,   C64,  C64,  C128, C64,  C128], // c64
    [N,  N,   N,   N,   N,   N,   N,   N,   N,   C128, C128, C128, C128, C128], // c128
];

/// Compute the dtype of the result of a binary operation between dtypes `a` and `b`.
pub fn promote(a: Dtype, b: Dtype) -> Result<Dtype> {
    TABLE[a.index()][b.index()].ok_or(ArrayError::PromotionFailure(a, b))
}

/// Fold [`promote`] over one or more dtypes.
pub fn result_type(dtypes: &[Dtype]) -> Result<Dtype> {
    let (first, rest) = dtypes.split_first().ok_or_else(|| {
        ArrayError::TypeMismatch("at least one dtype is required".to_string())
    })?;

    rest.iter()
        .try_fold(*first, |promoted, dtype| promote(promoted, *dtype))
}

/// Return `true` if `from` may be implicitly promoted to `to`.
pub fn can_cast(from: Dtype, to: Dtype) -> bool {
    matches!(promote(from, to), Ok(dtype) if dtype == to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;

    #[test]
    fn test_commutative() {
        for a in Dtype::ALL {
            for b in Dtype::ALL {
                assert_eq!(
                    TABLE[a.index()][b.index()],
                    TABLE[b.index()][a.index()],
                    "{} and {}",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn test_idempotent() {
        for dtype in Dtype::ALL {
            assert_eq!(promote(dtype, dtype).unwrap(), dtype);
        }
    }

    #[test]
    fn test_same_kind_only() {
        for a in Dtype::ALL {
            for b in Dtype::ALL {
                let cross_kind = (a.is(Category::Boolean) != b.is(Category::Boolean))
                    || (a.is(Category::Integer) != b.is(Category::Integer))
                    || (a.is(Category::Floating) != b.is(Category::Floating));

                if cross_kind {
                    assert!(promote(a, b).is_err(), "{} and {}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_promote() {
        assert_eq!(
            promote(Dtype::Float32, Dtype::Complex64).unwrap(),
            Dtype::Complex64
        );
        assert_eq!(
            promote(Dtype::Float64, Dtype::Complex64).unwrap(),
            Dtype::Complex128
        );
        assert_eq!(promote(Dtype::Int8, Dtype::UInt8).unwrap(), Dtype::Int16);
        assert_eq!(promote(Dtype::Int32, Dtype::UInt32).unwrap(), Dtype::Int64);
        assert_eq!(promote(Dtype::UInt8, Dtype::UInt64).unwrap(), Dtype::UInt64);
        assert_eq!(promote(Dtype::Float16, Dtype::Float32).unwrap(), Dtype::Float32);
    }

    #[test]
    fn test_promotion_failure() {
        let err = promote(Dtype::Int64, Dtype::UInt64).unwrap_err();
        assert!(matches!(
            err,
            ArrayError::PromotionFailure(Dtype::Int64, Dtype::UInt64)
        ));

        let err = promote(Dtype::Int32, Dtype::Float32).unwrap_err();
        assert_eq!(
            err.to_string(),
            "`int32` and `float32` cannot be type promoted together"
        );

        assert!(promote(Dtype::Bool, Dtype::Int8).is_err());
    }

    #[test]
    fn test_result_type() {
        assert_eq!(
            result_type(&[Dtype::UInt8, Dtype::Int8, Dtype::Int32]).unwrap(),
            Dtype::Int32
        );
        assert!(result_type(&[]).is_err());
        assert!(result_type(&[Dtype::Float32, Dtype::Int8]).is_err());
    }

    #[test]
    fn test_can_cast() {
        assert!(can_cast(Dtype::Int8, Dtype::Int64));
        assert!(can_cast(Dtype::Float32, Dtype::Complex64));
        assert!(!can_cast(Dtype::Int64, Dtype::Int8));
        assert!(!can_cast(Dtype::Int32, Dtype::Float64));
    }
}
