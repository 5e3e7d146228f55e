//! Random number generation.

use std::fmt;
use std::os::raw::{c_int, c_uint, c_ulonglong};
use std::ptr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::ffi::af_random_engine;
use super::handle::{native_dims, Handle};
use super::native::af_call;
use super::ops::gate;
use super::{Array, ArrayError, Category, Dtype, Result, Shape, MAX_DIMS};

/// The algorithm of a [`RandomEngine`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(i32)]
pub enum RandomEngineType {
    Philox = 100,
    Threefry = 200,
    Mersenne = 300,
}

impl RandomEngineType {
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            100 => Ok(Self::Philox),
            200 => Ok(Self::Threefry),
            300 => Ok(Self::Mersenne),
            other => Err(ArrayError::TypeMismatch(format!(
                "unknown random engine type {}",
                other
            ))),
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "philox" => Ok(Self::Philox),
            "threefry" => Ok(Self::Threefry),
            "mersenne" => Ok(Self::Mersenne),
            other => Err(ArrayError::TypeMismatch(format!(
                "unknown random engine type {}",
                other
            ))),
        }
    }
}

impl fmt::Display for RandomEngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Philox => "philox",
            Self::Threefry => "threefry",
            Self::Mersenne => "mersenne",
        })
    }
}

/// A native random number generator, released when dropped.
pub struct RandomEngine {
    raw: af_random_engine,
}

// the native library serializes access to its engine table
unsafe impl Send for RandomEngine {}

impl RandomEngine {
    pub fn new(engine_type: RandomEngineType, seed: u64) -> Result<Self> {
        let mut raw: af_random_engine = ptr::null_mut();
        af_call!(af_create_random_engine(
            &mut raw,
            engine_type as c_int,
            seed as c_ulonglong
        ))?;

        debug!("created {} random engine with seed {}", engine_type, seed);
        Ok(Self { raw })
    }

    pub fn engine_type(&self) -> Result<RandomEngineType> {
        let mut code: c_int = 0;
        af_call!(af_random_engine_get_type(&mut code, self.raw))?;
        RandomEngineType::from_code(code)
    }

    pub fn set_engine_type(&mut self, engine_type: RandomEngineType) -> Result<()> {
        af_call!(af_random_engine_set_type(
            &mut self.raw,
            engine_type as c_int
        ))
    }

    pub fn seed(&self) -> Result<u64> {
        let mut seed: c_ulonglong = 0;
        af_call!(af_random_engine_get_seed(&mut seed, self.raw))?;
        Ok(seed as u64)
    }

    pub fn set_seed(&mut self, seed: u64) -> Result<()> {
        af_call!(af_random_engine_set_seed(
            &mut self.raw,
            seed as c_ulonglong
        ))
    }
}

impl fmt::Debug for RandomEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "random engine {:p}", self.raw)
    }
}

impl Drop for RandomEngine {
    fn drop(&mut self) {
        if self.raw.is_null() {
            return;
        }

        if let Err(cause) = af_call!(af_release_random_engine(self.raw)) {
            warn!("failed to release a random engine: {}", cause);
        }
    }
}

// the default engine belongs to the native library and must not be released
fn resolve(engine: Option<&RandomEngine>) -> Result<af_random_engine> {
    match engine {
        Some(engine) => Ok(engine.raw),
        None => {
            let mut raw: af_random_engine = ptr::null_mut();
            af_call!(af_get_default_random_engine(&mut raw))?;
            Ok(raw)
        }
    }
}

/// Sample the uniform distribution over `[0, 1)` (or the full range of an integer `dtype`).
pub fn randu(shape: &Shape, dtype: Dtype, engine: Option<&RandomEngine>) -> Result<Array> {
    gate("randu", Category::All, dtype)?;

    let engine = resolve(engine)?;
    let dims = native_dims(shape.dims4());
    let handle = Handle::create(|out| {
        af_call!(af_random_uniform(
            out,
            MAX_DIMS as c_uint,
            dims.as_ptr(),
            dtype.wire_code(),
            engine
        ))
    })?;

    Array::from_handle_with_shape(handle, *shape)
}

/// Sample the standard normal distribution.
pub fn randn(shape: &Shape, dtype: Dtype, engine: Option<&RandomEngine>) -> Result<Array> {
    gate("randn", Category::Floating, dtype)?;

    let engine = resolve(engine)?;
    let dims = native_dims(shape.dims4());
    let handle = Handle::create(|out| {
        af_call!(af_random_normal(
            out,
            MAX_DIMS as c_uint,
            dims.as_ptr(),
            dtype.wire_code(),
            engine
        ))
    })?;

    Array::from_handle_with_shape(handle, *shape)
}

/// Seed the default random engine.
pub fn set_seed(seed: u64) -> Result<()> {
    debug!("set the global random seed to {}", seed);
    af_call!(af_set_seed(seed as c_ulonglong))
}

/// The seed of the default random engine.
pub fn get_seed() -> Result<u64> {
    let mut seed: c_ulonglong = 0;
    af_call!(af_get_seed(&mut seed))?;
    Ok(seed as u64)
}

pub fn set_default_engine_type(engine_type: RandomEngineType) -> Result<()> {
    debug!("set the default random engine type to {}", engine_type);
    af_call!(af_set_default_random_engine_type(engine_type as c_int))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_type_names() {
        assert_eq!(
            RandomEngineType::from_name("Philox").unwrap(),
            RandomEngineType::Philox
        );
        assert_eq!(
            RandomEngineType::from_code(300).unwrap(),
            RandomEngineType::Mersenne
        );
        assert_eq!(RandomEngineType::Threefry.to_string(), "threefry");
        assert!(RandomEngineType::from_name("xorshift").is_err());
        assert!(RandomEngineType::from_code(0).is_err());
    }

    #[test]
    fn test_engine() {
        let mut engine = RandomEngine::new(RandomEngineType::Philox, 42).unwrap();
        assert_eq!(engine.seed().unwrap(), 42);
        assert_eq!(engine.engine_type().unwrap(), RandomEngineType::Philox);

        engine.set_seed(7).unwrap();
        engine.set_engine_type(RandomEngineType::Threefry).unwrap();
        assert_eq!(engine.seed().unwrap(), 7);
        assert_eq!(engine.engine_type().unwrap(), RandomEngineType::Threefry);
    }

    #[test]
    fn test_reproducible() {
        let shape = Shape::new(&[4, 3]).unwrap();

        let first = RandomEngine::new(RandomEngineType::Philox, 1).unwrap();
        let second = RandomEngine::new(RandomEngineType::Philox, 1).unwrap();

        let a = randu(&shape, Dtype::Float32, Some(&first)).unwrap();
        let b = randu(&shape, Dtype::Float32, Some(&second)).unwrap();
        assert_eq!(a.shape(), &shape);
        assert_eq!(a.to_vec::<f32>().unwrap(), b.to_vec::<f32>().unwrap());
        assert!(a.to_vec::<f32>().unwrap().iter().all(|x| (0.0..1.0).contains(x)));
    }

    #[test]
    fn test_default_engine() {
        let shape = Shape::vector(16);

        let normal = randn(&shape, Dtype::Float64, None).unwrap();
        assert_eq!(normal.dtype(), Dtype::Float64);
        assert_eq!(normal.size(), 16);

        assert!(randn(&shape, Dtype::Int32, None).is_err());
        assert_eq!(randu(&shape, Dtype::UInt8, None).unwrap().dtype(), Dtype::UInt8);

        set_seed(3).unwrap();
        assert_eq!(get_seed().unwrap(), 3);
    }
}
