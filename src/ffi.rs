//! Raw ArrayFire C symbols consumed by the handle layer.
//!
//! The library itself is linked by the `arrayfire` crate's build script.

#![allow(non_camel_case_types)]

use std::os::raw::{c_char, c_double, c_float, c_int, c_longlong, c_uint, c_ulonglong, c_void};

pub type af_array = *mut c_void;
pub type af_features = *mut c_void;
pub type af_random_engine = *mut c_void;
pub type af_err = c_int;
pub type af_dtype = c_uint;

#[cfg(target_pointer_width = "32")]
pub type dim_t = c_int;

#[cfg(not(target_pointer_width = "32"))]
pub type dim_t = c_longlong;

pub const AF_SUCCESS: af_err = 0;

pub const AF_DEVICE: c_int = 0;
pub const AF_HOST: c_int = 1;

pub const AF_BINARY_ADD: c_int = 0;
pub const AF_BINARY_MUL: c_int = 1;
pub const AF_BINARY_MIN: c_int = 2;
pub const AF_BINARY_MAX: c_int = 3;

pub const AF_MAT_NONE: c_int = 0;
pub const AF_MAT_TRANS: c_int = 1;
pub const AF_MAT_CTRANS: c_int = 2;
pub const AF_MAT_UPPER: c_int = 32;
pub const AF_MAT_LOWER: c_int = 64;

pub const AF_VARIANCE_SAMPLE: c_int = 1;
pub const AF_VARIANCE_POPULATION: c_int = 2;

pub const AF_BACKEND_DEFAULT: c_int = 0;
pub const AF_BACKEND_CPU: c_int = 1;
pub const AF_BACKEND_CUDA: c_int = 2;
pub const AF_BACKEND_OPENCL: c_int = 4;

/// A range of indices along one axis; `begin` and `end` are inclusive.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct af_seq {
    pub begin: c_double,
    pub end: c_double,
    pub step: c_double,
}

/// The whole of one axis.
pub const AF_SPAN: af_seq = af_seq {
    begin: 1.,
    end: 1.,
    step: 0.,
};

#[repr(C)]
#[derive(Clone, Copy)]
pub union af_index_union {
    pub arr: af_array,
    pub seq: af_seq,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct af_index_t {
    pub idx: af_index_union,
    pub is_seq: bool,
    pub is_batch: bool,
}

pub type BinaryFn = unsafe extern "C" fn(*mut af_array, af_array, af_array, bool) -> af_err;
pub type UnaryFn = unsafe extern "C" fn(*mut af_array, af_array) -> af_err;
pub type ReduceFn = unsafe extern "C" fn(*mut af_array, af_array, c_int) -> af_err;
pub type ReduceAllFn = unsafe extern "C" fn(*mut c_double, *mut c_double, af_array) -> af_err;
pub type ReduceNanFn = unsafe extern "C" fn(*mut af_array, af_array, c_int, c_double) -> af_err;
pub type ReduceNanAllFn =
    unsafe extern "C" fn(*mut c_double, *mut c_double, af_array, c_double) -> af_err;
pub type IndexedFn = unsafe extern "C" fn(*mut af_array, *mut af_array, af_array, c_int) -> af_err;
pub type IndexedAllFn =
    unsafe extern "C" fn(*mut c_double, *mut c_double, *mut c_uint, af_array) -> af_err;

extern "C" {
    // errors
    pub fn af_get_last_error(msg: *mut *mut c_char, len: *mut dim_t);
    pub fn af_err_to_string(err: af_err) -> *const c_char;
    pub fn af_free_host(ptr: *mut c_void) -> af_err;

    // lifecycle
    pub fn af_create_array(
        arr: *mut af_array,
        data: *const c_void,
        ndims: c_uint,
        dims: *const dim_t,
        dtype: af_dtype,
    ) -> af_err;
    pub fn af_create_handle(
        arr: *mut af_array,
        ndims: c_uint,
        dims: *const dim_t,
        dtype: af_dtype,
    ) -> af_err;
    pub fn af_device_array(
        arr: *mut af_array,
        data: *mut c_void,
        ndims: c_uint,
        dims: *const dim_t,
        dtype: af_dtype,
    ) -> af_err;
    pub fn af_create_strided_array(
        arr: *mut af_array,
        data: *const c_void,
        offset: dim_t,
        ndims: c_uint,
        dims: *const dim_t,
        strides: *const dim_t,
        dtype: af_dtype,
        location: c_int,
    ) -> af_err;
    pub fn af_retain_array(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_release_array(arr: af_array) -> af_err;
    pub fn af_copy_array(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_cast(out: *mut af_array, arr: af_array, dtype: af_dtype) -> af_err;
    pub fn af_eval(arr: af_array) -> af_err;
    pub fn af_eval_multiple(num: c_int, arrays: *mut af_array) -> af_err;
    pub fn af_sync(device: c_int) -> af_err;

    // queries
    pub fn af_get_type(dtype: *mut af_dtype, arr: af_array) -> af_err;
    pub fn af_get_dims(
        d0: *mut dim_t,
        d1: *mut dim_t,
        d2: *mut dim_t,
        d3: *mut dim_t,
        arr: af_array,
    ) -> af_err;
    pub fn af_get_strides(
        s0: *mut dim_t,
        s1: *mut dim_t,
        s2: *mut dim_t,
        s3: *mut dim_t,
        arr: af_array,
    ) -> af_err;
    pub fn af_get_offset(offset: *mut dim_t, arr: af_array) -> af_err;
    pub fn af_get_elements(elements: *mut dim_t, arr: af_array) -> af_err;
    pub fn af_is_linear(result: *mut bool, arr: af_array) -> af_err;
    pub fn af_is_owner(result: *mut bool, arr: af_array) -> af_err;
    pub fn af_get_scalar(value: *mut c_void, arr: af_array) -> af_err;
    pub fn af_get_data_ptr(data: *mut c_void, arr: af_array) -> af_err;
    pub fn af_get_backend_id(backend: *mut c_int, arr: af_array) -> af_err;
    pub fn af_get_device_id(device: *mut c_int, arr: af_array) -> af_err;
    pub fn af_array_to_string(
        output: *mut *mut c_char,
        name: *const c_char,
        arr: af_array,
        precision: c_int,
        transpose: bool,
    ) -> af_err;

    // elementwise binary
    pub fn af_add(out: *mut af_array, lhs: af_array, rhs: af_array, batch: bool) -> af_err;
    pub fn af_sub(out: *mut af_array, lhs: af_array, rhs: af_array, batch: bool) -> af_err;
    pub fn af_mul(out: *mut af_array, lhs: af_array, rhs: af_array, batch: bool) -> af_err;
    pub fn af_div(out: *mut af_array, lhs: af_array, rhs: af_array, batch: bool) -> af_err;
    pub fn af_mod(out: *mut af_array, lhs: af_array, rhs: af_array, batch: bool) -> af_err;
    pub fn af_pow(out: *mut af_array, lhs: af_array, rhs: af_array, batch: bool) -> af_err;
    pub fn af_bitand(out: *mut af_array, lhs: af_array, rhs: af_array, batch: bool) -> af_err;
    pub fn af_bitor(out: *mut af_array, lhs: af_array, rhs: af_array, batch: bool) -> af_err;
    pub fn af_bitxor(out: *mut af_array, lhs: af_array, rhs: af_array, batch: bool) -> af_err;
    pub fn af_bitshiftl(out: *mut af_array, lhs: af_array, rhs: af_array, batch: bool) -> af_err;
    pub fn af_bitshiftr(out: *mut af_array, lhs: af_array, rhs: af_array, batch: bool) -> af_err;
    pub fn af_lt(out: *mut af_array, lhs: af_array, rhs: af_array, batch: bool) -> af_err;
    pub fn af_le(out: *mut af_array, lhs: af_array, rhs: af_array, batch: bool) -> af_err;
    pub fn af_gt(out: *mut af_array, lhs: af_array, rhs: af_array, batch: bool) -> af_err;
    pub fn af_ge(out: *mut af_array, lhs: af_array, rhs: af_array, batch: bool) -> af_err;
    pub fn af_eq(out: *mut af_array, lhs: af_array, rhs: af_array, batch: bool) -> af_err;
    pub fn af_neq(out: *mut af_array, lhs: af_array, rhs: af_array, batch: bool) -> af_err;
    pub fn af_and(out: *mut af_array, lhs: af_array, rhs: af_array, batch: bool) -> af_err;
    pub fn af_or(out: *mut af_array, lhs: af_array, rhs: af_array, batch: bool) -> af_err;
    pub fn af_atan2(out: *mut af_array, lhs: af_array, rhs: af_array, batch: bool) -> af_err;
    pub fn af_hypot(out: *mut af_array, lhs: af_array, rhs: af_array, batch: bool) -> af_err;
    pub fn af_maxof(out: *mut af_array, lhs: af_array, rhs: af_array, batch: bool) -> af_err;
    pub fn af_minof(out: *mut af_array, lhs: af_array, rhs: af_array, batch: bool) -> af_err;
    pub fn af_rem(out: *mut af_array, lhs: af_array, rhs: af_array, batch: bool) -> af_err;
    pub fn af_root(out: *mut af_array, lhs: af_array, rhs: af_array, batch: bool) -> af_err;
    pub fn af_cplx2(out: *mut af_array, lhs: af_array, rhs: af_array, batch: bool) -> af_err;

    // elementwise unary
    pub fn af_abs(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_arg(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_sign(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_round(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_trunc(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_floor(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_ceil(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_sin(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_cos(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_tan(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_asin(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_acos(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_atan(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_sinh(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_cosh(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_tanh(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_asinh(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_acosh(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_atanh(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_exp(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_expm1(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_log(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_log1p(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_log2(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_log10(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_sqrt(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_rsqrt(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_cbrt(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_pow2(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_sigmoid(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_erf(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_erfc(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_factorial(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_tgamma(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_lgamma(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_iszero(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_isinf(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_isnan(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_bitnot(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_not(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_real(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_imag(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_conjg(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_cplx(out: *mut af_array, arr: af_array) -> af_err;

    // reductions and scans
    pub fn af_sum(out: *mut af_array, arr: af_array, dim: c_int) -> af_err;
    pub fn af_product(out: *mut af_array, arr: af_array, dim: c_int) -> af_err;
    pub fn af_min(out: *mut af_array, arr: af_array, dim: c_int) -> af_err;
    pub fn af_max(out: *mut af_array, arr: af_array, dim: c_int) -> af_err;
    pub fn af_any_true(out: *mut af_array, arr: af_array, dim: c_int) -> af_err;
    pub fn af_all_true(out: *mut af_array, arr: af_array, dim: c_int) -> af_err;
    pub fn af_count(out: *mut af_array, arr: af_array, dim: c_int) -> af_err;
    pub fn af_sum_nan(out: *mut af_array, arr: af_array, dim: c_int, nanval: c_double) -> af_err;
    pub fn af_product_nan(
        out: *mut af_array,
        arr: af_array,
        dim: c_int,
        nanval: c_double,
    ) -> af_err;
    pub fn af_sum_all(real: *mut c_double, imag: *mut c_double, arr: af_array) -> af_err;
    pub fn af_product_all(real: *mut c_double, imag: *mut c_double, arr: af_array) -> af_err;
    pub fn af_min_all(real: *mut c_double, imag: *mut c_double, arr: af_array) -> af_err;
    pub fn af_max_all(real: *mut c_double, imag: *mut c_double, arr: af_array) -> af_err;
    pub fn af_any_true_all(real: *mut c_double, imag: *mut c_double, arr: af_array) -> af_err;
    pub fn af_all_true_all(real: *mut c_double, imag: *mut c_double, arr: af_array) -> af_err;
    pub fn af_count_all(real: *mut c_double, imag: *mut c_double, arr: af_array) -> af_err;
    pub fn af_sum_nan_all(
        real: *mut c_double,
        imag: *mut c_double,
        arr: af_array,
        nanval: c_double,
    ) -> af_err;
    pub fn af_product_nan_all(
        real: *mut c_double,
        imag: *mut c_double,
        arr: af_array,
        nanval: c_double,
    ) -> af_err;
    pub fn af_imin(out: *mut af_array, idx: *mut af_array, arr: af_array, dim: c_int) -> af_err;
    pub fn af_imax(out: *mut af_array, idx: *mut af_array, arr: af_array, dim: c_int) -> af_err;
    pub fn af_imin_all(
        real: *mut c_double,
        imag: *mut c_double,
        idx: *mut c_uint,
        arr: af_array,
    ) -> af_err;
    pub fn af_imax_all(
        real: *mut c_double,
        imag: *mut c_double,
        idx: *mut c_uint,
        arr: af_array,
    ) -> af_err;
    pub fn af_mean(out: *mut af_array, arr: af_array, dim: dim_t) -> af_err;
    pub fn af_mean_all(real: *mut c_double, imag: *mut c_double, arr: af_array) -> af_err;
    pub fn af_var_v2(out: *mut af_array, arr: af_array, bias: c_int, dim: dim_t) -> af_err;
    pub fn af_var_all_v2(
        real: *mut c_double,
        imag: *mut c_double,
        arr: af_array,
        bias: c_int,
    ) -> af_err;
    pub fn af_stdev_v2(out: *mut af_array, arr: af_array, bias: c_int, dim: dim_t) -> af_err;
    pub fn af_stdev_all_v2(
        real: *mut c_double,
        imag: *mut c_double,
        arr: af_array,
        bias: c_int,
    ) -> af_err;
    pub fn af_accum(out: *mut af_array, arr: af_array, dim: c_int) -> af_err;
    pub fn af_scan(
        out: *mut af_array,
        arr: af_array,
        dim: c_int,
        op: c_int,
        inclusive: bool,
    ) -> af_err;
    pub fn af_scan_by_key(
        out: *mut af_array,
        key: af_array,
        arr: af_array,
        dim: c_int,
        op: c_int,
        inclusive: bool,
    ) -> af_err;
    pub fn af_where(idx: *mut af_array, arr: af_array) -> af_err;
    pub fn af_diff1(out: *mut af_array, arr: af_array, dim: c_int) -> af_err;
    pub fn af_diff2(out: *mut af_array, arr: af_array, dim: c_int) -> af_err;

    // sets and sorting
    pub fn af_set_unique(out: *mut af_array, arr: af_array, is_sorted: bool) -> af_err;
    pub fn af_set_union(
        out: *mut af_array,
        first: af_array,
        second: af_array,
        is_unique: bool,
    ) -> af_err;
    pub fn af_set_intersect(
        out: *mut af_array,
        first: af_array,
        second: af_array,
        is_unique: bool,
    ) -> af_err;
    pub fn af_sort(out: *mut af_array, arr: af_array, dim: c_uint, ascending: bool) -> af_err;
    pub fn af_sort_index(
        out: *mut af_array,
        indices: *mut af_array,
        arr: af_array,
        dim: c_uint,
        ascending: bool,
    ) -> af_err;
    pub fn af_sort_by_key(
        out_keys: *mut af_array,
        out_values: *mut af_array,
        keys: af_array,
        values: af_array,
        dim: c_uint,
        ascending: bool,
    ) -> af_err;

    // creation and data movement
    pub fn af_constant(
        arr: *mut af_array,
        value: c_double,
        ndims: c_uint,
        dims: *const dim_t,
        dtype: af_dtype,
    ) -> af_err;
    pub fn af_constant_complex(
        arr: *mut af_array,
        real: c_double,
        imag: c_double,
        ndims: c_uint,
        dims: *const dim_t,
        dtype: af_dtype,
    ) -> af_err;
    pub fn af_constant_long(
        arr: *mut af_array,
        value: c_longlong,
        ndims: c_uint,
        dims: *const dim_t,
    ) -> af_err;
    pub fn af_constant_ulong(
        arr: *mut af_array,
        value: c_ulonglong,
        ndims: c_uint,
        dims: *const dim_t,
    ) -> af_err;
    pub fn af_range(
        out: *mut af_array,
        ndims: c_uint,
        dims: *const dim_t,
        seq_dim: c_int,
        dtype: af_dtype,
    ) -> af_err;
    pub fn af_iota(
        out: *mut af_array,
        ndims: c_uint,
        dims: *const dim_t,
        t_ndims: c_uint,
        tdims: *const dim_t,
        dtype: af_dtype,
    ) -> af_err;
    pub fn af_identity(
        out: *mut af_array,
        ndims: c_uint,
        dims: *const dim_t,
        dtype: af_dtype,
    ) -> af_err;
    pub fn af_diag_create(out: *mut af_array, arr: af_array, num: c_int) -> af_err;
    pub fn af_diag_extract(out: *mut af_array, arr: af_array, num: c_int) -> af_err;
    pub fn af_lower(out: *mut af_array, arr: af_array, is_unit_diag: bool) -> af_err;
    pub fn af_upper(out: *mut af_array, arr: af_array, is_unit_diag: bool) -> af_err;
    pub fn af_join(out: *mut af_array, dim: c_int, first: af_array, second: af_array) -> af_err;
    pub fn af_tile(
        out: *mut af_array,
        arr: af_array,
        x: c_uint,
        y: c_uint,
        z: c_uint,
        w: c_uint,
    ) -> af_err;
    pub fn af_reorder(
        out: *mut af_array,
        arr: af_array,
        x: c_uint,
        y: c_uint,
        z: c_uint,
        w: c_uint,
    ) -> af_err;
    pub fn af_shift(
        out: *mut af_array,
        arr: af_array,
        x: c_int,
        y: c_int,
        z: c_int,
        w: c_int,
    ) -> af_err;
    pub fn af_moddims(
        out: *mut af_array,
        arr: af_array,
        ndims: c_uint,
        dims: *const dim_t,
    ) -> af_err;
    pub fn af_flat(out: *mut af_array, arr: af_array) -> af_err;
    pub fn af_flip(out: *mut af_array, arr: af_array, dim: c_uint) -> af_err;
    pub fn af_select(out: *mut af_array, cond: af_array, a: af_array, b: af_array) -> af_err;
    pub fn af_transpose(out: *mut af_array, arr: af_array, conjugate: bool) -> af_err;
    pub fn af_lookup(out: *mut af_array, arr: af_array, indices: af_array, dim: c_uint)
        -> af_err;

    // indexing
    pub fn af_index_gen(
        out: *mut af_array,
        arr: af_array,
        ndims: dim_t,
        indices: *const af_index_t,
    ) -> af_err;
    pub fn af_assign_gen(
        out: *mut af_array,
        lhs: af_array,
        ndims: dim_t,
        indices: *const af_index_t,
        rhs: af_array,
    ) -> af_err;

    // linear algebra
    pub fn af_matmul(
        out: *mut af_array,
        lhs: af_array,
        rhs: af_array,
        opt_lhs: c_int,
        opt_rhs: c_int,
    ) -> af_err;
    pub fn af_dot(
        out: *mut af_array,
        lhs: af_array,
        rhs: af_array,
        opt_lhs: c_int,
        opt_rhs: c_int,
    ) -> af_err;
    pub fn af_det(real: *mut c_double, imag: *mut c_double, arr: af_array) -> af_err;
    pub fn af_inverse(out: *mut af_array, arr: af_array, options: c_int) -> af_err;
    pub fn af_pinverse(out: *mut af_array, arr: af_array, tol: c_double, options: c_int)
        -> af_err;
    pub fn af_rank(rank: *mut c_uint, arr: af_array, tol: c_double) -> af_err;
    pub fn af_norm(
        out: *mut c_double,
        arr: af_array,
        norm_type: c_int,
        p: c_double,
        q: c_double,
    ) -> af_err;
    pub fn af_solve(x: *mut af_array, a: af_array, b: af_array, options: c_int) -> af_err;
    pub fn af_lu(
        lower: *mut af_array,
        upper: *mut af_array,
        pivot: *mut af_array,
        arr: af_array,
    ) -> af_err;
    pub fn af_qr(q: *mut af_array, r: *mut af_array, tau: *mut af_array, arr: af_array)
        -> af_err;
    pub fn af_cholesky(out: *mut af_array, info: *mut c_int, arr: af_array, is_upper: bool)
        -> af_err;
    pub fn af_svd(u: *mut af_array, s: *mut af_array, vt: *mut af_array, arr: af_array)
        -> af_err;

    // signal processing
    pub fn af_fft(out: *mut af_array, arr: af_array, norm: c_double, odim0: dim_t) -> af_err;
    pub fn af_ifft(out: *mut af_array, arr: af_array, norm: c_double, odim0: dim_t) -> af_err;
    pub fn af_fft2(
        out: *mut af_array,
        arr: af_array,
        norm: c_double,
        odim0: dim_t,
        odim1: dim_t,
    ) -> af_err;
    pub fn af_ifft2(
        out: *mut af_array,
        arr: af_array,
        norm: c_double,
        odim0: dim_t,
        odim1: dim_t,
    ) -> af_err;
    pub fn af_fft3(
        out: *mut af_array,
        arr: af_array,
        norm: c_double,
        odim0: dim_t,
        odim1: dim_t,
        odim2: dim_t,
    ) -> af_err;
    pub fn af_ifft3(
        out: *mut af_array,
        arr: af_array,
        norm: c_double,
        odim0: dim_t,
        odim1: dim_t,
        odim2: dim_t,
    ) -> af_err;
    pub fn af_fft_r2c(out: *mut af_array, arr: af_array, norm: c_double, pad0: dim_t) -> af_err;
    pub fn af_fft_c2r(out: *mut af_array, arr: af_array, norm: c_double, is_odd: bool) -> af_err;
    pub fn af_convolve1(
        out: *mut af_array,
        signal: af_array,
        filter: af_array,
        mode: c_int,
        domain: c_int,
    ) -> af_err;
    pub fn af_convolve2(
        out: *mut af_array,
        signal: af_array,
        filter: af_array,
        mode: c_int,
        domain: c_int,
    ) -> af_err;
    pub fn af_convolve3(
        out: *mut af_array,
        signal: af_array,
        filter: af_array,
        mode: c_int,
        domain: c_int,
    ) -> af_err;
    pub fn af_fir(y: *mut af_array, b: af_array, x: af_array) -> af_err;
    pub fn af_iir(y: *mut af_array, b: af_array, a: af_array, x: af_array) -> af_err;
    pub fn af_approx1(
        out: *mut af_array,
        arr: af_array,
        pos: af_array,
        method: c_int,
        off_grid: c_float,
    ) -> af_err;
    pub fn af_medfilt1(out: *mut af_array, arr: af_array, width: dim_t, edge_pad: c_int)
        -> af_err;

    // image processing
    pub fn af_resize(
        out: *mut af_array,
        arr: af_array,
        odim0: dim_t,
        odim1: dim_t,
        method: c_int,
    ) -> af_err;
    pub fn af_rotate(
        out: *mut af_array,
        arr: af_array,
        theta: c_float,
        crop: bool,
        method: c_int,
    ) -> af_err;
    pub fn af_histogram(
        out: *mut af_array,
        arr: af_array,
        nbins: c_uint,
        minval: c_double,
        maxval: c_double,
    ) -> af_err;
    pub fn af_gaussian_kernel(
        out: *mut af_array,
        rows: c_int,
        cols: c_int,
        sigma_r: c_double,
        sigma_c: c_double,
    ) -> af_err;
    pub fn af_rgb2gray(
        out: *mut af_array,
        arr: af_array,
        r: c_float,
        g: c_float,
        b: c_float,
    ) -> af_err;
    pub fn af_gray2rgb(
        out: *mut af_array,
        arr: af_array,
        r: c_float,
        g: c_float,
        b: c_float,
    ) -> af_err;
    pub fn af_sobel_operator(
        dx: *mut af_array,
        dy: *mut af_array,
        img: af_array,
        ker_size: c_uint,
    ) -> af_err;
    pub fn af_medfilt2(
        out: *mut af_array,
        arr: af_array,
        wind_length: dim_t,
        wind_width: dim_t,
        edge_pad: c_int,
    ) -> af_err;
    pub fn af_fast(
        out: *mut af_features,
        arr: af_array,
        thr: c_float,
        arc_length: c_uint,
        non_max: bool,
        feature_ratio: c_float,
        edge: c_uint,
    ) -> af_err;
    pub fn af_harris(
        out: *mut af_features,
        arr: af_array,
        max_corners: c_uint,
        min_response: c_float,
        sigma: c_float,
        block_size: c_uint,
        k_thr: c_float,
    ) -> af_err;
    pub fn af_get_features_num(num: *mut dim_t, feat: af_features) -> af_err;
    pub fn af_get_features_xpos(out: *mut af_array, feat: af_features) -> af_err;
    pub fn af_get_features_ypos(out: *mut af_array, feat: af_features) -> af_err;
    pub fn af_get_features_score(out: *mut af_array, feat: af_features) -> af_err;
    pub fn af_get_features_orientation(out: *mut af_array, feat: af_features) -> af_err;
    pub fn af_get_features_size(out: *mut af_array, feat: af_features) -> af_err;
    pub fn af_release_features(feat: af_features) -> af_err;

    // random numbers
    pub fn af_create_random_engine(
        engine: *mut af_random_engine,
        rtype: c_int,
        seed: c_ulonglong,
    ) -> af_err;
    pub fn af_random_engine_set_type(engine: *mut af_random_engine, rtype: c_int) -> af_err;
    pub fn af_random_engine_get_type(rtype: *mut c_int, engine: af_random_engine) -> af_err;
    pub fn af_random_engine_set_seed(engine: *mut af_random_engine, seed: c_ulonglong) -> af_err;
    pub fn af_random_engine_get_seed(seed: *mut c_ulonglong, engine: af_random_engine) -> af_err;
    pub fn af_release_random_engine(engine: af_random_engine) -> af_err;
    pub fn af_get_default_random_engine(engine: *mut af_random_engine) -> af_err;
    pub fn af_set_default_random_engine_type(rtype: c_int) -> af_err;
    pub fn af_random_uniform(
        out: *mut af_array,
        ndims: c_uint,
        dims: *const dim_t,
        dtype: af_dtype,
        engine: af_random_engine,
    ) -> af_err;
    pub fn af_random_normal(
        out: *mut af_array,
        ndims: c_uint,
        dims: *const dim_t,
        dtype: af_dtype,
        engine: af_random_engine,
    ) -> af_err;
    pub fn af_set_seed(seed: c_ulonglong) -> af_err;
    pub fn af_get_seed(seed: *mut c_ulonglong) -> af_err;
}
