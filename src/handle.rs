use std::ffi::CString;
use std::os::raw::{c_char, c_int, c_uint, c_void};
use std::ptr;

use half::f16;
use log::{trace, warn};

use super::ffi::{self, af_array, dim_t, BinaryFn, ReduceAllFn, ReduceFn, UnaryFn};
use super::native::{self, af_call};
use super::{ArrayError, Complex, Dtype, Element, Result, Scalar, Shape, MAX_DIMS};

/// Where the memory behind a strided buffer lives.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Source {
    Device,
    Host,
}

impl Source {
    fn code(self) -> c_int {
        match self {
            Self::Device => ffi::AF_DEVICE,
            Self::Host => ffi::AF_HOST,
        }
    }
}

/// Convert padded axis lengths to the native dimension type.
pub(crate) fn native_dims(dims: [u64; MAX_DIMS]) -> [dim_t; MAX_DIMS] {
    dims.map(|dim| dim as dim_t)
}

/// An owned reference to one native array, released when dropped.
pub(crate) struct Handle {
    raw: af_array,
}

// the native library serializes access to its array table
unsafe impl Send for Handle {}

impl Handle {
    fn null() -> Self {
        Self {
            raw: ptr::null_mut(),
        }
    }

    /// Wrap the output of a native call which allocates one array.
    pub fn create<F: FnOnce(*mut af_array) -> Result<()>>(f: F) -> Result<Self> {
        let mut handle = Self::null();
        f(ptr::addr_of_mut!(handle.raw))?;
        trace!("created native array {:p}", handle.raw);
        Ok(handle)
    }

    /// Wrap the outputs of a native call which allocates two arrays.
    pub fn create2<F>(f: F) -> Result<(Self, Self)>
    where
        F: FnOnce(*mut af_array, *mut af_array) -> Result<()>,
    {
        let (mut first, mut second) = (Self::null(), Self::null());
        f(ptr::addr_of_mut!(first.raw), ptr::addr_of_mut!(second.raw))?;
        Ok((first, second))
    }

    /// Wrap the outputs of a native call which allocates three arrays.
    pub fn create3<F>(f: F) -> Result<(Self, Self, Self)>
    where
        F: FnOnce(*mut af_array, *mut af_array, *mut af_array) -> Result<()>,
    {
        let (mut first, mut second, mut third) = (Self::null(), Self::null(), Self::null());
        f(
            ptr::addr_of_mut!(first.raw),
            ptr::addr_of_mut!(second.raw),
            ptr::addr_of_mut!(third.raw),
        )?;
        Ok((first, second, third))
    }

    /// Allocate an uninitialized array.
    pub fn empty(shape: &Shape, dtype: Dtype) -> Result<Self> {
        let dims = native_dims(shape.dims4());
        Self::create(|out| {
            af_call!(af_create_handle(
                out,
                MAX_DIMS as c_uint,
                dims.as_ptr(),
                dtype.wire_code()
            ))
        })
    }

    /// Copy a typed host buffer into a new native array.
    pub fn from_host<T: Element>(data: &[T], shape: &Shape) -> Result<Self> {
        check_len(data.len(), shape)?;

        let dims = native_dims(shape.dims4());
        Self::create(|out| {
            af_call!(af_create_array(
                out,
                data.as_ptr() as *const c_void,
                MAX_DIMS as c_uint,
                dims.as_ptr(),
                T::DTYPE.wire_code()
            ))
        })
    }

    /// Copy a raw host buffer, laid out as elements of `dtype`, into a new native array.
    pub fn from_bytes(bytes: &[u8], shape: &Shape, dtype: Dtype) -> Result<Self> {
        if bytes.len() as u64 != shape.size() * dtype.size() as u64 {
            return Err(ArrayError::Shape(format!(
                "a buffer of {} bytes cannot hold an array of {} with shape {}",
                bytes.len(),
                dtype,
                shape
            )));
        }

        let dims = native_dims(shape.dims4());
        Self::create(|out| {
            af_call!(af_create_array(
                out,
                bytes.as_ptr() as *const c_void,
                MAX_DIMS as c_uint,
                dims.as_ptr(),
                dtype.wire_code()
            ))
        })
    }

    /// Take ownership of a device allocation without copying it.
    ///
    /// # Safety
    /// `data` must be a device allocation of at least `shape.size()` elements of `dtype`, made
    /// on the active device, and must not be freed by the caller.
    pub unsafe fn from_device_ptr(data: *mut c_void, shape: &Shape, dtype: Dtype) -> Result<Self> {
        let dims = native_dims(shape.dims4());
        Self::create(|out| {
            af_call!(af_device_array(
                out,
                data,
                MAX_DIMS as c_uint,
                dims.as_ptr(),
                dtype.wire_code()
            ))
        })
    }

    /// Wrap a buffer with an explicit offset and strides.
    ///
    /// # Safety
    /// `data` must address every element reachable through `offset` and `strides`.
    pub unsafe fn strided(
        data: *const c_void,
        shape: &Shape,
        dtype: Dtype,
        offset: u64,
        strides: [u64; MAX_DIMS],
        source: Source,
    ) -> Result<Self> {
        let dims = native_dims(shape.dims4());
        let strides = native_dims(strides);
        Self::create(|out| {
            af_call!(af_create_strided_array(
                out,
                data,
                offset as dim_t,
                MAX_DIMS as c_uint,
                dims.as_ptr(),
                strides.as_ptr(),
                dtype.wire_code(),
                source.code()
            ))
        })
    }

    #[inline]
    pub fn get(&self) -> af_array {
        self.raw
    }

    /// Produce an independently releasable handle to the same storage.
    pub fn retain(&self) -> Result<Self> {
        Self::create(|out| af_call!(af_retain_array(out, self.raw)))
    }

    /// Deep-copy this array.
    pub fn copy(&self) -> Result<Self> {
        Self::create(|out| af_call!(af_copy_array(out, self.raw)))
    }

    /// Release this handle early. Releasing twice is a no-op.
    pub fn release(&mut self) -> Result<()> {
        if self.raw.is_null() {
            return Ok(());
        }

        let raw = std::mem::replace(&mut self.raw, ptr::null_mut());
        trace!("release native array {:p}", raw);
        af_call!(af_release_array(raw))
    }

    pub fn dtype(&self) -> Result<Dtype> {
        let mut code = 0;
        af_call!(af_get_type(&mut code, self.raw))?;
        Dtype::from_wire_code(code)
    }

    pub fn dims(&self) -> Result<[u64; MAX_DIMS]> {
        let mut dims: [dim_t; MAX_DIMS] = [0; MAX_DIMS];
        let [d0, d1, d2, d3] = &mut dims;
        af_call!(af_get_dims(d0, d1, d2, d3, self.raw))?;
        Ok(dims.map(|dim| dim as u64))
    }

    pub fn strides(&self) -> Result<[u64; MAX_DIMS]> {
        let mut strides: [dim_t; MAX_DIMS] = [0; MAX_DIMS];
        let [s0, s1, s2, s3] = &mut strides;
        af_call!(af_get_strides(s0, s1, s2, s3, self.raw))?;
        Ok(strides.map(|stride| stride as u64))
    }

    pub fn offset(&self) -> Result<u64> {
        let mut offset: dim_t = 0;
        af_call!(af_get_offset(&mut offset, self.raw))?;
        Ok(offset as u64)
    }

    pub fn size(&self) -> Result<u64> {
        let mut size: dim_t = 0;
        af_call!(af_get_elements(&mut size, self.raw))?;
        Ok(size as u64)
    }

    pub fn is_linear(&self) -> Result<bool> {
        let mut linear = false;
        af_call!(af_is_linear(&mut linear, self.raw))?;
        Ok(linear)
    }

    pub fn is_owner(&self) -> Result<bool> {
        let mut owner = false;
        af_call!(af_is_owner(&mut owner, self.raw))?;
        Ok(owner)
    }

    pub fn backend_id(&self) -> Result<i32> {
        let mut backend: c_int = 0;
        af_call!(af_get_backend_id(&mut backend, self.raw))?;
        Ok(backend)
    }

    pub fn device_id(&self) -> Result<i32> {
        let mut device: c_int = 0;
        af_call!(af_get_device_id(&mut device, self.raw))?;
        Ok(device)
    }

    /// Read the first element of this array.
    pub fn scalar(&self) -> Result<Scalar> {
        let dtype = self.dtype()?;
        let mut bytes = [0u8; 16];
        af_call!(af_get_scalar(
            bytes.as_mut_ptr() as *mut c_void,
            self.raw
        ))?;

        Ok(read_scalar(dtype, &bytes[..dtype.size()]))
    }

    /// Copy this array to a typed host buffer, in column-major order.
    pub fn to_host<T: Element>(&self) -> Result<Vec<T>> {
        let dtype = self.dtype()?;
        if dtype != T::DTYPE {
            return Err(ArrayError::TypeMismatch(format!(
                "cannot copy an array of {} into a host buffer of {}",
                dtype,
                T::DTYPE
            )));
        }

        let mut data = vec![T::default(); self.size()? as usize];
        if !data.is_empty() {
            af_call!(af_get_data_ptr(
                data.as_mut_ptr() as *mut c_void,
                self.raw
            ))?;
        }

        Ok(data)
    }

    /// Copy this array to the host as tagged scalars, in column-major order.
    pub fn to_scalars(&self) -> Result<Vec<Scalar>> {
        let dtype = self.dtype()?;
        let size = self.size()? as usize;
        if size == 0 {
            return Ok(vec![]);
        }

        let mut bytes = vec![0u8; size * dtype.size()];
        af_call!(af_get_data_ptr(
            bytes.as_mut_ptr() as *mut c_void,
            self.raw
        ))?;

        Ok(bytes
            .chunks_exact(dtype.size())
            .map(|chunk| read_scalar(dtype, chunk))
            .collect())
    }

    /// The native textual dump of this array.
    pub fn dump(&self, name: &str, precision: i32) -> Result<String> {
        let name = CString::new(name)
            .map_err(|cause| ArrayError::TypeMismatch(format!("invalid array name: {}", cause)))?;

        let mut output: *mut c_char = ptr::null_mut();
        af_call!(af_array_to_string(
            &mut output,
            name.as_ptr(),
            self.raw,
            precision,
            true
        ))?;

        Ok(native::take_host_string(output))
    }

    pub fn eval(&self) -> Result<()> {
        af_call!(af_eval(self.raw))
    }

    pub fn cast(&self, dtype: Dtype) -> Result<Self> {
        Self::create(|out| af_call!(af_cast(out, self.raw, dtype.wire_code())))
    }

    /// Change the axis lengths of this array without moving its data.
    pub fn moddims(&self, dims: [u64; MAX_DIMS]) -> Result<Self> {
        let dims = native_dims(dims);
        Self::create(|out| {
            af_call!(af_moddims(
                out,
                self.raw,
                MAX_DIMS as c_uint,
                dims.as_ptr()
            ))
        })
    }

    pub fn binary(&self, op: BinaryOp, other: &Self, batch: bool) -> Result<Self> {
        let (name, f) = op.symbol();
        Self::create(|out| native::check(name, unsafe { f(out, self.raw, other.raw, batch) }))
    }

    pub fn unary(&self, op: UnaryOp) -> Result<Self> {
        let (name, f) = op.symbol();
        Self::create(|out| native::check(name, unsafe { f(out, self.raw) }))
    }

    pub fn reduce(&self, op: ReduceOp, axis: usize) -> Result<Self> {
        let (name, f, _) = op.symbols();
        Self::create(|out| native::check(name, unsafe { f(out, self.raw, axis as c_int) }))
    }

    /// Reduce every element of this array, returning the real and imaginary components.
    pub fn reduce_all(&self, op: ReduceOp) -> Result<(f64, f64)> {
        let (_, _, (name, f)) = op.symbols();
        let (mut real, mut imag) = (0., 0.);
        native::check(name, unsafe { f(&mut real, &mut imag, self.raw) })?;
        Ok((real, imag))
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        if let Err(cause) = self.release() {
            warn!("failed to release a native array: {}", cause);
        }
    }
}

fn check_len(len: usize, shape: &Shape) -> Result<()> {
    if len as u64 == shape.size() {
        Ok(())
    } else {
        Err(ArrayError::Shape(format!(
            "{} elements cannot fill an array with shape {}",
            len, shape
        )))
    }
}

/// Decode one native element of the given `dtype`.
pub(crate) fn read_scalar(dtype: Dtype, bytes: &[u8]) -> Scalar {
    fn array<const N: usize>(bytes: &[u8]) -> [u8; N] {
        let mut array = [0u8; N];
        array.copy_from_slice(&bytes[..N]);
        array
    }

    use Dtype::*;
    match dtype {
        Bool => Scalar::Bool(bytes[0] != 0),
        Int8 => i8::from_ne_bytes(array(bytes)).into_scalar(),
        Int16 => i16::from_ne_bytes(array(bytes)).into_scalar(),
        Int32 => i32::from_ne_bytes(array(bytes)).into_scalar(),
        Int64 => i64::from_ne_bytes(array(bytes)).into_scalar(),
        UInt8 => bytes[0].into_scalar(),
        UInt16 => u16::from_ne_bytes(array(bytes)).into_scalar(),
        UInt32 => u32::from_ne_bytes(array(bytes)).into_scalar(),
        UInt64 => u64::from_ne_bytes(array(bytes)).into_scalar(),
        Float16 => f16::from_bits(u16::from_ne_bytes(array(bytes))).into_scalar(),
        Float32 => f32::from_ne_bytes(array(bytes)).into_scalar(),
        Float64 => f64::from_ne_bytes(array(bytes)).into_scalar(),
        Complex64 => Complex::new(
            f32::from_ne_bytes(array(&bytes[..4])),
            f32::from_ne_bytes(array(&bytes[4..8])),
        )
        .into_scalar(),
        Complex128 => Complex::new(
            f64::from_ne_bytes(array(&bytes[..8])),
            f64::from_ne_bytes(array(&bytes[8..16])),
        )
        .into_scalar(),
    }
}

/// Encode one native element of the given `dtype`. The scalar must fit `dtype`.
pub(crate) fn write_scalar(dtype: Dtype, scalar: &Scalar) -> Vec<u8> {
    let int = match scalar {
        Scalar::Bool(b) => *b as i128,
        Scalar::Int(i) => *i,
        Scalar::Float(f) => *f as i128,
        Scalar::Complex(c) => c.re as i128,
    };

    let c = scalar.as_complex();

    use Dtype::*;
    match dtype {
        Bool => vec![(!scalar.is_zero()) as u8],
        Int8 => (int as i8).to_ne_bytes().to_vec(),
        Int16 => (int as i16).to_ne_bytes().to_vec(),
        Int32 => (int as i32).to_ne_bytes().to_vec(),
        Int64 => (int as i64).to_ne_bytes().to_vec(),
        UInt8 => (int as u8).to_ne_bytes().to_vec(),
        UInt16 => (int as u16).to_ne_bytes().to_vec(),
        UInt32 => (int as u32).to_ne_bytes().to_vec(),
        UInt64 => (int as u64).to_ne_bytes().to_vec(),
        Float16 => f16::from_f64(c.re).to_bits().to_ne_bytes().to_vec(),
        Float32 => (c.re as f32).to_ne_bytes().to_vec(),
        Float64 => c.re.to_ne_bytes().to_vec(),
        Complex64 => [(c.re as f32).to_ne_bytes(), (c.im as f32).to_ne_bytes()].concat(),
        Complex128 => [c.re.to_ne_bytes(), c.im.to_ne_bytes()].concat(),
    }
}

/// An elementwise binary native operator.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    BitAnd,
    BitOr,
    BitXor,
    BitShiftL,
    BitShiftR,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Neq,
    And,
    Or,
    Atan2,
    Hypot,
    MaxOf,
    MinOf,
    Rem,
    Root,
    Cplx2,
}

impl BinaryOp {
    fn symbol(self) -> (&'static str, BinaryFn) {
        use BinaryOp::*;
        match self {
            Add => ("af_add", ffi::af_add),
            Sub => ("af_sub", ffi::af_sub),
            Mul => ("af_mul", ffi::af_mul),
            Div => ("af_div", ffi::af_div),
            Mod => ("af_mod", ffi::af_mod),
            Pow => ("af_pow", ffi::af_pow),
            BitAnd => ("af_bitand", ffi::af_bitand),
            BitOr => ("af_bitor", ffi::af_bitor),
            BitXor => ("af_bitxor", ffi::af_bitxor),
            BitShiftL => ("af_bitshiftl", ffi::af_bitshiftl),
            BitShiftR => ("af_bitshiftr", ffi::af_bitshiftr),
            Lt => ("af_lt", ffi::af_lt),
            Le => ("af_le", ffi::af_le),
            Gt => ("af_gt", ffi::af_gt),
            Ge => ("af_ge", ffi::af_ge),
            Eq => ("af_eq", ffi::af_eq),
            Neq => ("af_neq", ffi::af_neq),
            And => ("af_and", ffi::af_and),
            Or => ("af_or", ffi::af_or),
            Atan2 => ("af_atan2", ffi::af_atan2),
            Hypot => ("af_hypot", ffi::af_hypot),
            MaxOf => ("af_maxof", ffi::af_maxof),
            MinOf => ("af_minof", ffi::af_minof),
            Rem => ("af_rem", ffi::af_rem),
            Root => ("af_root", ffi::af_root),
            Cplx2 => ("af_cplx2", ffi::af_cplx2),
        }
    }
}

/// An elementwise unary native operator.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum UnaryOp {
    Abs,
    Arg,
    Sign,
    Round,
    Trunc,
    Floor,
    Ceil,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
    Exp,
    Expm1,
    Log,
    Log1p,
    Log2,
    Log10,
    Sqrt,
    Rsqrt,
    Cbrt,
    Pow2,
    Sigmoid,
    Erf,
    Erfc,
    Factorial,
    Tgamma,
    Lgamma,
    IsZero,
    IsInf,
    IsNan,
    BitNot,
    Not,
    Real,
    Imag,
    Conjg,
    Cplx,
}

impl UnaryOp {
    fn symbol(self) -> (&'static str, UnaryFn) {
        use UnaryOp::*;
        match self {
            Abs => ("af_abs", ffi::af_abs),
            Arg => ("af_arg", ffi::af_arg),
            Sign => ("af_sign", ffi::af_sign),
            Round => ("af_round", ffi::af_round),
            Trunc => ("af_trunc", ffi::af_trunc),
            Floor => ("af_floor", ffi::af_floor),
            Ceil => ("af_ceil", ffi::af_ceil),
            Sin => ("af_sin", ffi::af_sin),
            Cos => ("af_cos", ffi::af_cos),
            Tan => ("af_tan", ffi::af_tan),
            Asin => ("af_asin", ffi::af_asin),
            Acos => ("af_acos", ffi::af_acos),
            Atan => ("af_atan", ffi::af_atan),
            Sinh => ("af_sinh", ffi::af_sinh),
            Cosh => ("af_cosh", ffi::af_cosh),
            Tanh => ("af_tanh", ffi::af_tanh),
            Asinh => ("af_asinh", ffi::af_asinh),
            Acosh => ("af_acosh", ffi::af_acosh),
            Atanh => ("af_atanh", ffi::af_atanh),
            Exp => ("af_exp", ffi::af_exp),
            Expm1 => ("af_expm1", ffi::af_expm1),
            Log => ("af_log", ffi::af_log),
            Log1p => ("af_log1p", ffi::af_log1p),
            Log2 => ("af_log2", ffi::af_log2),
            Log10 => ("af_log10", ffi::af_log10),
            Sqrt => ("af_sqrt", ffi::af_sqrt),
            Rsqrt => ("af_rsqrt", ffi::af_rsqrt),
            Cbrt => ("af_cbrt", ffi::af_cbrt),
            Pow2 => ("af_pow2", ffi::af_pow2),
            Sigmoid => ("af_sigmoid", ffi::af_sigmoid),
            Erf => ("af_erf", ffi::af_erf),
            Erfc => ("af_erfc", ffi::af_erfc),
            Factorial => ("af_factorial", ffi::af_factorial),
            Tgamma => ("af_tgamma", ffi::af_tgamma),
            Lgamma => ("af_lgamma", ffi::af_lgamma),
            IsZero => ("af_iszero", ffi::af_iszero),
            IsInf => ("af_isinf", ffi::af_isinf),
            IsNan => ("af_isnan", ffi::af_isnan),
            BitNot => ("af_bitnot", ffi::af_bitnot),
            Not => ("af_not", ffi::af_not),
            Real => ("af_real", ffi::af_real),
            Imag => ("af_imag", ffi::af_imag),
            Conjg => ("af_conjg", ffi::af_conjg),
            Cplx => ("af_cplx", ffi::af_cplx),
        }
    }
}

/// A native reduction, available both along one axis and over a whole array.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ReduceOp {
    Sum,
    Product,
    Min,
    Max,
    AnyTrue,
    AllTrue,
    Count,
}

impl ReduceOp {
    #[allow(clippy::type_complexity)]
    fn symbols(self) -> (&'static str, ReduceFn, (&'static str, ReduceAllFn)) {
        use ReduceOp::*;
        match self {
            Sum => ("af_sum", ffi::af_sum, ("af_sum_all", ffi::af_sum_all)),
            Product => (
                "af_product",
                ffi::af_product,
                ("af_product_all", ffi::af_product_all),
            ),
            Min => ("af_min", ffi::af_min, ("af_min_all", ffi::af_min_all)),
            Max => ("af_max", ffi::af_max, ("af_max_all", ffi::af_max_all)),
            AnyTrue => (
                "af_any_true",
                ffi::af_any_true,
                ("af_any_true_all", ffi::af_any_true_all),
            ),
            AllTrue => (
                "af_all_true",
                ffi::af_all_true,
                ("af_all_true_all", ffi::af_all_true_all),
            ),
            Count => (
                "af_count",
                ffi::af_count,
                ("af_count_all", ffi::af_count_all),
            ),
        }
    }
}
