//! Signal processing: Fourier transforms, convolution, filtering and interpolation.

use std::os::raw::{c_double, c_float, c_int};

use super::ffi::dim_t;
use super::handle::Handle;
use super::native::af_call;
use super::ops::gate;
use super::{Array, ArrayError, Category, Result, Shape};

/// Whether a convolution produces an output of the same size as the signal, or expanded to
/// include every partial overlap.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(i32)]
pub enum ConvMode {
    Default = 0,
    Expand = 1,
}

/// Where a convolution is computed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(i32)]
pub enum ConvDomain {
    Auto = 0,
    Spatial = 1,
    Freq = 2,
}

/// An interpolation method.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(i32)]
pub enum InterpType {
    Nearest = 0,
    Linear = 1,
    Bilinear = 2,
    Cubic = 3,
    LowerNearest = 4,
    LinearCosine = 5,
    BilinearCosine = 6,
    Bicubic = 7,
    CubicSpline = 8,
    BicubicSpline = 9,
}

/// How a filter treats the elements past the border of its input.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(i32)]
pub enum BorderType {
    Zero = 0,
    Symmetric = 1,
    ClampToEdge = 2,
    Periodic = 3,
}

fn require_rank(name: &str, array: &Array, rank: usize) -> Result<()> {
    if array.ndim() >= rank {
        Ok(())
    } else {
        Err(ArrayError::Shape(format!(
            "{} requires at least {} dimensions, not shape {}",
            name,
            rank,
            array.shape()
        )))
    }
}

/// The shape of a transform of `shape` with the given output lengths, where 0 means unchanged.
fn transformed(shape: &Shape, lengths: &[u64]) -> Shape {
    lengths
        .iter()
        .enumerate()
        .filter(|(_, len)| **len > 0)
        .fold(*shape, |shape, (axis, len)| shape.with_axis(axis, *len))
}

pub fn fft(array: &Array, norm: f64, odim0: u64) -> Result<Array> {
    gate("fft", Category::Floating, array.dtype())?;

    let handle = Handle::create(|out| {
        af_call!(af_fft(
            out,
            array.handle().get(),
            norm as c_double,
            odim0 as dim_t
        ))
    })?;

    Array::from_handle_with_shape(handle, transformed(array.shape(), &[odim0]))
}

pub fn ifft(array: &Array, norm: f64, odim0: u64) -> Result<Array> {
    gate("ifft", Category::ComplexFloating, array.dtype())?;

    let handle = Handle::create(|out| {
        af_call!(af_ifft(
            out,
            array.handle().get(),
            norm as c_double,
            odim0 as dim_t
        ))
    })?;

    Array::from_handle_with_shape(handle, transformed(array.shape(), &[odim0]))
}

pub fn fft2(array: &Array, norm: f64, odim0: u64, odim1: u64) -> Result<Array> {
    gate("fft2", Category::Floating, array.dtype())?;
    require_rank("fft2", array, 2)?;

    let handle = Handle::create(|out| {
        af_call!(af_fft2(
            out,
            array.handle().get(),
            norm as c_double,
            odim0 as dim_t,
            odim1 as dim_t
        ))
    })?;

    Array::from_handle_with_shape(handle, transformed(array.shape(), &[odim0, odim1]))
}

pub fn ifft2(array: &Array, norm: f64, odim0: u64, odim1: u64) -> Result<Array> {
    gate("ifft2", Category::ComplexFloating, array.dtype())?;
    require_rank("ifft2", array, 2)?;

    let handle = Handle::create(|out| {
        af_call!(af_ifft2(
            out,
            array.handle().get(),
            norm as c_double,
            odim0 as dim_t,
            odim1 as dim_t
        ))
    })?;

    Array::from_handle_with_shape(handle, transformed(array.shape(), &[odim0, odim1]))
}

pub fn fft3(array: &Array, norm: f64, odim0: u64, odim1: u64, odim2: u64) -> Result<Array> {
    gate("fft3", Category::Floating, array.dtype())?;
    require_rank("fft3", array, 3)?;

    let handle = Handle::create(|out| {
        af_call!(af_fft3(
            out,
            array.handle().get(),
            norm as c_double,
            odim0 as dim_t,
            odim1 as dim_t,
            odim2 as dim_t
        ))
    })?;

    Array::from_handle_with_shape(handle, transformed(array.shape(), &[odim0, odim1, odim2]))
}

pub fn ifft3(array: &Array, norm: f64, odim0: u64, odim1: u64, odim2: u64) -> Result<Array> {
    gate("ifft3", Category::ComplexFloating, array.dtype())?;
    require_rank("ifft3", array, 3)?;

    let handle = Handle::create(|out| {
        af_call!(af_ifft3(
            out,
            array.handle().get(),
            norm as c_double,
            odim0 as dim_t,
            odim1 as dim_t,
            odim2 as dim_t
        ))
    })?;

    Array::from_handle_with_shape(handle, transformed(array.shape(), &[odim0, odim1, odim2]))
}

/// The one-dimensional Fourier transform of a real signal, keeping only the non-redundant
/// half of the spectrum.
pub fn fft_r2c(array: &Array, norm: f64, pad0: u64) -> Result<Array> {
    gate("fft_r2c", Category::RealFloating, array.dtype())?;

    let handle = Handle::create(|out| {
        af_call!(af_fft_r2c(
            out,
            array.handle().get(),
            norm as c_double,
            pad0 as dim_t
        ))
    })?;

    let len = if pad0 > 0 { pad0 } else { array.shape().dims4()[0] };
    Array::from_handle_with_shape(handle, array.shape().with_axis(0, len / 2 + 1))
}

/// The inverse of [`fft_r2c`]; `is_odd` recovers the parity of the original signal length.
pub fn fft_c2r(array: &Array, norm: f64, is_odd: bool) -> Result<Array> {
    gate("fft_c2r", Category::ComplexFloating, array.dtype())?;

    let handle = Handle::create(|out| {
        af_call!(af_fft_c2r(
            out,
            array.handle().get(),
            norm as c_double,
            is_odd
        ))
    })?;

    let half = array.shape().dims4()[0];
    let len = 2 * half.saturating_sub(1) + is_odd as u64;
    Array::from_handle_with_shape(handle, array.shape().with_axis(0, len))
}

fn convolve(
    name: &'static str,
    rank: usize,
    signal: &Array,
    filter: &Array,
    mode: ConvMode,
    domain: ConvDomain,
) -> Result<Array> {
    gate(name, Category::Numeric, signal.dtype())?;
    gate(name, Category::Numeric, filter.dtype())?;

    let (s, f) = (signal.handle().get(), filter.handle().get());
    let (m, d) = (mode as c_int, domain as c_int);
    let handle = match rank {
        1 => Handle::create(|out| af_call!(af_convolve1(out, s, f, m, d)))?,
        2 => Handle::create(|out| af_call!(af_convolve2(out, s, f, m, d)))?,
        _ => Handle::create(|out| af_call!(af_convolve3(out, s, f, m, d)))?,
    };

    match mode {
        ConvMode::Default => Array::from_handle_with_shape(handle, *signal.shape()),
        ConvMode::Expand => Array::from_handle_with_ndim(handle, signal.ndim().max(filter.ndim())),
    }
}

/// Convolve a (batch of) one-dimensional signal(s) with a filter.
pub fn convolve1(signal: &Array, filter: &Array, mode: ConvMode, domain: ConvDomain) -> Result<Array> {
    convolve("convolve1", 1, signal, filter, mode, domain)
}

pub fn convolve2(signal: &Array, filter: &Array, mode: ConvMode, domain: ConvDomain) -> Result<Array> {
    convolve("convolve2", 2, signal, filter, mode, domain)
}

pub fn convolve3(signal: &Array, filter: &Array, mode: ConvMode, domain: ConvDomain) -> Result<Array> {
    convolve("convolve3", 3, signal, filter, mode, domain)
}

/// Apply a finite impulse response filter with coefficients `b` to the signal `x`.
pub fn fir(b: &Array, x: &Array) -> Result<Array> {
    gate("fir", Category::Floating, x.dtype())?;

    let handle =
        Handle::create(|y| af_call!(af_fir(y, b.handle().get(), x.handle().get())))?;

    Array::from_handle_with_shape(handle, *x.shape())
}

/// Apply an infinite impulse response filter with feedforward coefficients `b` and feedback
/// coefficients `a` to the signal `x`.
pub fn iir(b: &Array, a: &Array, x: &Array) -> Result<Array> {
    gate("iir", Category::Floating, x.dtype())?;

    let handle = Handle::create(|y| {
        af_call!(af_iir(
            y,
            b.handle().get(),
            a.handle().get(),
            x.handle().get()
        ))
    })?;

    Array::from_handle_with_shape(handle, *x.shape())
}

/// Interpolate a (batch of) one-dimensional signal(s) at the positions `pos`.
///
/// Positions outside the signal produce `off_grid`.
pub fn approx1(array: &Array, pos: &Array, method: InterpType, off_grid: f32) -> Result<Array> {
    gate("approx1", Category::Floating, array.dtype())?;
    gate("approx1", Category::RealFloating, pos.dtype())?;

    let handle = Handle::create(|out| {
        af_call!(af_approx1(
            out,
            array.handle().get(),
            pos.handle().get(),
            method as c_int,
            off_grid as c_float
        ))
    })?;

    Array::from_handle_with_shape(handle, array.shape().with_axis(0, pos.size()))
}

/// Replace each element of a (batch of) one-dimensional signal(s) with the median of a
/// window of `width` elements centered on it.
pub fn medfilt1(array: &Array, width: u64, border: BorderType) -> Result<Array> {
    gate("medfilt1", Category::RealNumeric, array.dtype())?;

    let handle = Handle::create(|out| {
        af_call!(af_medfilt1(
            out,
            array.handle().get(),
            width as dim_t,
            border as c_int
        ))
    })?;

    Array::from_handle_with_shape(handle, *array.shape())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Complex, Dtype};

    #[test]
    fn test_fft() {
        let signal = Array::from_vec(vec![1.0f32, 0.0, 0.0, 0.0]).unwrap();
        let spectrum = fft(&signal, 1.0, 0).unwrap();
        assert_eq!(spectrum.dtype(), Dtype::Complex64);
        assert_eq!(spectrum.shape().dims(), &[4]);
        assert_eq!(
            spectrum.to_vec::<Complex<f32>>().unwrap(),
            vec![Complex::new(1.0, 0.0); 4]
        );

        let restored = ifft(&spectrum, 0.25, 0).unwrap();
        assert_eq!(restored.to_vec::<Complex<f32>>().unwrap()[0], Complex::new(1.0, 0.0));

        let padded = fft(&signal, 1.0, 8).unwrap();
        assert_eq!(padded.shape().dims(), &[8]);

        assert!(ifft(&signal, 1.0, 0).is_err());
        assert!(fft2(&signal, 1.0, 0, 0).is_err());
    }

    #[test]
    fn test_real_fft() {
        let signal = Array::from_vec(vec![1.0f64, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let half = fft_r2c(&signal, 1.0, 0).unwrap();
        assert_eq!(half.shape().dims(), &[3]);

        let restored = fft_c2r(&half, 1.0 / 5.0, true).unwrap();
        assert_eq!(restored.shape().dims(), &[5]);
        for (actual, expected) in restored.to_vec::<f64>().unwrap().iter().zip(1..) {
            assert!((actual - expected as f64).abs() < 1e-9);
        }
    }

    #[test]
    fn test_convolve() {
        let signal = Array::from_vec(vec![1.0f32, 2.0, 3.0]).unwrap();
        let filter = Array::from_vec(vec![1.0f32, 1.0]).unwrap();

        let expanded = convolve1(&signal, &filter, ConvMode::Expand, ConvDomain::Spatial).unwrap();
        assert_eq!(expanded.to_vec::<f32>().unwrap(), vec![1.0, 3.0, 5.0, 3.0]);

        let same = convolve1(&signal, &filter, ConvMode::Default, ConvDomain::Auto).unwrap();
        assert_eq!(same.shape().dims(), &[3]);
    }

    #[test]
    fn test_filters() {
        let x = Array::from_vec(vec![1.0f32, 1.0, 1.0]).unwrap();
        let b = Array::from_vec(vec![0.5f32, 0.5]).unwrap();
        assert_eq!(fir(&b, &x).unwrap().to_vec::<f32>().unwrap(), vec![0.5, 1.0, 1.0]);

        let a = Array::from_vec(vec![1.0f32]).unwrap();
        assert_eq!(iir(&b, &a, &x).unwrap().shape().dims(), &[3]);

        let noisy = Array::from_vec(vec![1.0f32, 9.0, 1.0, 1.0]).unwrap();
        let filtered = medfilt1(&noisy, 3, BorderType::Zero).unwrap();
        assert_eq!(filtered.to_vec::<f32>().unwrap()[1], 1.0);
    }

    #[test]
    fn test_approx1() {
        let signal = Array::from_vec(vec![0.0f32, 10.0, 20.0]).unwrap();
        let pos = Array::from_vec(vec![0.5f32, 1.5, 5.0]).unwrap();
        let values = approx1(&signal, &pos, InterpType::Linear, -1.0).unwrap();
        assert_eq!(values.to_vec::<f32>().unwrap(), vec![5.0, 15.0, -1.0]);
    }
}
