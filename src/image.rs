//! Feature detection and basic image processing.
//!
//! An image is an array whose first two axes are rows and columns; a third axis, if present,
//! holds color channels or a batch of images.

use std::os::raw::{c_double, c_float, c_int, c_uint};
use std::ptr;

use log::{trace, warn};

use super::ffi::{self, af_array, af_features, dim_t};
use super::handle::Handle;
use super::native::{self, af_call};
use super::ops::gate;
use super::signal::{BorderType, InterpType};
use super::{Array, ArrayError, Category, Result, Shape};

/// A set of image features, as returned by a feature detector.
///
/// Each member array has one element per detected feature.
pub struct Features {
    pub x: Array,
    pub y: Array,
    pub score: Array,
    pub orientation: Array,
    pub size: Array,
    pub count: u64,
}

/// Owns a native feature set for as long as its member arrays are being read.
struct FeatureSet {
    raw: af_features,
}

impl FeatureSet {
    fn create<F: FnOnce(*mut af_features) -> Result<()>>(f: F) -> Result<Self> {
        let mut set = Self {
            raw: ptr::null_mut(),
        };

        f(ptr::addr_of_mut!(set.raw))?;
        trace!("created native feature set {:p}", set.raw);
        Ok(set)
    }

    fn count(&self) -> Result<u64> {
        let mut count: dim_t = 0;
        af_call!(af_get_features_num(&mut count, self.raw))?;
        Ok(count as u64)
    }

    // the feature set owns its members, so each one is retained before the set is released
    fn member(
        &self,
        name: &'static str,
        get: unsafe extern "C" fn(*mut af_array, af_features) -> ffi::af_err,
    ) -> Result<Array> {
        let mut borrowed: af_array = ptr::null_mut();
        native::check(name, unsafe { get(&mut borrowed, self.raw) })?;

        let handle = Handle::create(|out| af_call!(af_retain_array(out, borrowed)))?;
        Array::from_handle_with_ndim(handle, 1)
    }

    fn into_features(self) -> Result<Features> {
        Ok(Features {
            count: self.count()?,
            x: self.member("af_get_features_xpos", ffi::af_get_features_xpos)?,
            y: self.member("af_get_features_ypos", ffi::af_get_features_ypos)?,
            score: self.member("af_get_features_score", ffi::af_get_features_score)?,
            orientation: self.member(
                "af_get_features_orientation",
                ffi::af_get_features_orientation,
            )?,
            size: self.member("af_get_features_size", ffi::af_get_features_size)?,
        })
    }
}

impl Drop for FeatureSet {
    fn drop(&mut self) {
        if self.raw.is_null() {
            return;
        }

        trace!("release native feature set {:p}", self.raw);
        if let Err(cause) = af_call!(af_release_features(self.raw)) {
            warn!("failed to release a native feature set: {}", cause);
        }
    }
}

fn require_image(name: &str, image: &Array) -> Result<()> {
    if image.ndim() >= 2 {
        Ok(())
    } else {
        Err(ArrayError::Shape(format!(
            "{} requires an image with at least 2 dimensions, not shape {}",
            name,
            image.shape()
        )))
    }
}

fn require_gray(name: &str, image: &Array) -> Result<()> {
    if image.ndim() == 2 {
        Ok(())
    } else {
        Err(ArrayError::Shape(format!(
            "{} requires a grayscale image with 2 dimensions, not shape {}",
            name,
            image.shape()
        )))
    }
}

/// Detect corners with the FAST (features from accelerated segment test) algorithm.
pub fn fast(
    image: &Array,
    threshold: f32,
    arc_length: u32,
    non_max: bool,
    feature_ratio: f32,
    edge: u32,
) -> Result<Features> {
    gate("fast", Category::RealNumeric, image.dtype())?;
    require_gray("fast", image)?;

    let features = FeatureSet::create(|out| {
        af_call!(af_fast(
            out,
            image.handle().get(),
            threshold as c_float,
            arc_length as c_uint,
            non_max,
            feature_ratio as c_float,
            edge as c_uint
        ))
    })?;

    features.into_features()
}

/// Detect corners with the Harris corner detector.
pub fn harris(
    image: &Array,
    max_corners: u32,
    min_response: f32,
    sigma: f32,
    block_size: u32,
    k_threshold: f32,
) -> Result<Features> {
    gate("harris", Category::RealFloating, image.dtype())?;
    require_gray("harris", image)?;

    let features = FeatureSet::create(|out| {
        af_call!(af_harris(
            out,
            image.handle().get(),
            max_corners as c_uint,
            min_response as c_float,
            sigma as c_float,
            block_size as c_uint,
            k_threshold as c_float
        ))
    })?;

    features.into_features()
}

pub fn resize(image: &Array, odim0: u64, odim1: u64, method: InterpType) -> Result<Array> {
    gate("resize", Category::RealNumeric, image.dtype())?;
    require_image("resize", image)?;

    if odim0 == 0 || odim1 == 0 {
        return Err(ArrayError::Shape(format!(
            "cannot resize an image to {}x{}",
            odim0, odim1
        )));
    }

    let handle = Handle::create(|out| {
        af_call!(af_resize(
            out,
            image.handle().get(),
            odim0 as dim_t,
            odim1 as dim_t,
            method as c_int
        ))
    })?;

    let shape = image.shape().with_axis(0, odim0).with_axis(1, odim1);
    Array::from_handle_with_shape(handle, shape)
}

/// Rotate an image by `theta` radians. If `crop` is set, the output has the input's shape.
pub fn rotate(image: &Array, theta: f32, crop: bool, method: InterpType) -> Result<Array> {
    gate("rotate", Category::RealNumeric, image.dtype())?;
    require_image("rotate", image)?;

    let handle = Handle::create(|out| {
        af_call!(af_rotate(
            out,
            image.handle().get(),
            theta as c_float,
            crop,
            method as c_int
        ))
    })?;

    if crop {
        Array::from_handle_with_shape(handle, *image.shape())
    } else {
        Array::from_handle_with_ndim(handle, image.ndim())
    }
}

/// Count the elements of `image` falling in each of `nbins` equal bins over `[min, max]`.
pub fn histogram(image: &Array, nbins: u32, min: f64, max: f64) -> Result<Array> {
    gate("histogram", Category::RealNumeric, image.dtype())?;

    if nbins == 0 {
        return Err(ArrayError::Shape("a histogram requires at least one bin".into()));
    }

    if !(min < max) {
        return Err(ArrayError::TypeMismatch(format!(
            "invalid histogram range [{}, {}]",
            min, max
        )));
    }

    let handle = Handle::create(|out| {
        af_call!(af_histogram(
            out,
            image.handle().get(),
            nbins as c_uint,
            min as c_double,
            max as c_double
        ))
    })?;

    Array::from_handle_with_shape(handle, Shape::vector(nbins as u64))
}

/// Construct a `rows` by `cols` Gaussian kernel. A `sigma` of 0 is derived from the size.
pub fn gaussian_kernel(rows: u32, cols: u32, sigma_r: f64, sigma_c: f64) -> Result<Array> {
    if rows == 0 || cols == 0 {
        return Err(ArrayError::Shape(format!(
            "cannot construct a {}x{} kernel",
            rows, cols
        )));
    }

    let handle = Handle::create(|out| {
        af_call!(af_gaussian_kernel(
            out,
            rows as c_int,
            cols as c_int,
            sigma_r as c_double,
            sigma_c as c_double
        ))
    })?;

    Array::from_handle_with_shape(handle, Shape::new(&[rows as u64, cols as u64])?)
}

/// Convert a 3-channel image to grayscale using the given channel weights.
pub fn rgb2gray(image: &Array, r: f32, g: f32, b: f32) -> Result<Array> {
    gate("rgb2gray", Category::RealNumeric, image.dtype())?;

    if image.ndim() != 3 || image.shape().dims()[2] != 3 {
        return Err(ArrayError::Shape(format!(
            "rgb2gray requires an image with 3 channels, not shape {}",
            image.shape()
        )));
    }

    let handle = Handle::create(|out| {
        af_call!(af_rgb2gray(
            out,
            image.handle().get(),
            r as c_float,
            g as c_float,
            b as c_float
        ))
    })?;

    Array::from_handle_with_ndim(handle, 2)
}

/// Expand a grayscale image to 3 channels, scaling each by the given weight.
pub fn gray2rgb(image: &Array, r: f32, g: f32, b: f32) -> Result<Array> {
    gate("gray2rgb", Category::RealNumeric, image.dtype())?;
    require_gray("gray2rgb", image)?;

    let handle = Handle::create(|out| {
        af_call!(af_gray2rgb(
            out,
            image.handle().get(),
            r as c_float,
            g as c_float,
            b as c_float
        ))
    })?;

    Array::from_handle_with_shape(handle, image.shape().with_axis(2, 3))
}

/// Compute the horizontal and vertical derivatives of an image with a Sobel filter.
pub fn sobel(image: &Array, kernel_size: u32) -> Result<(Array, Array)> {
    gate("sobel", Category::RealNumeric, image.dtype())?;
    require_image("sobel", image)?;

    if kernel_size != 3 {
        return Err(ArrayError::Shape(format!(
            "unsupported Sobel kernel size {}",
            kernel_size
        )));
    }

    let (dx, dy) = Handle::create2(|dx, dy| {
        af_call!(af_sobel_operator(
            dx,
            dy,
            image.handle().get(),
            kernel_size as c_uint
        ))
    })?;

    Ok((
        Array::from_handle_with_shape(dx, *image.shape())?,
        Array::from_handle_with_shape(dy, *image.shape())?,
    ))
}

/// Apply a median filter over a `length` by `width` window.
pub fn medfilt2(image: &Array, length: u64, width: u64, border: BorderType) -> Result<Array> {
    gate("medfilt2", Category::RealNumeric, image.dtype())?;
    require_image("medfilt2", image)?;

    if !matches!(border, BorderType::Zero | BorderType::Symmetric) {
        return Err(ArrayError::TypeMismatch(format!(
            "medfilt2 does not support the border type {:?}",
            border
        )));
    }

    let handle = Handle::create(|out| {
        af_call!(af_medfilt2(
            out,
            image.handle().get(),
            length as dim_t,
            width as dim_t,
            border as c_int
        ))
    })?;

    Array::from_handle_with_shape(handle, *image.shape())
}
