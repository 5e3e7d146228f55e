//! Backend and device selection.
//!
//! One backend and one device are active per process at a time. Every array lives on the device
//! which was active when it was created.

use std::fmt;
use std::os::raw::c_int;

use arrayfire as af;
use log::debug;
use serde::{Deserialize, Serialize};

use super::ffi::{self, af_array};
use super::native::{self, af_call};
use super::{Array, ArrayError, Result};

/// A compute backend of the native library.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Default,
    Cpu,
    Cuda,
    OpenCl,
}

impl Backend {
    /// Look up a backend by the id the native library reports for an array.
    pub fn from_id(id: i32) -> Result<Self> {
        match id {
            ffi::AF_BACKEND_DEFAULT => Ok(Self::Default),
            ffi::AF_BACKEND_CPU => Ok(Self::Cpu),
            ffi::AF_BACKEND_CUDA => Ok(Self::Cuda),
            ffi::AF_BACKEND_OPENCL => Ok(Self::OpenCl),
            other => Err(ArrayError::Device(format!("unknown backend id {}", other))),
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "cpu" => Ok(Self::Cpu),
            "cuda" => Ok(Self::Cuda),
            "opencl" => Ok(Self::OpenCl),
            other => Err(ArrayError::Device(format!("unknown backend {}", other))),
        }
    }

    pub fn id(self) -> i32 {
        match self {
            Self::Default => ffi::AF_BACKEND_DEFAULT,
            Self::Cpu => ffi::AF_BACKEND_CPU,
            Self::Cuda => ffi::AF_BACKEND_CUDA,
            Self::OpenCl => ffi::AF_BACKEND_OPENCL,
        }
    }
}

impl From<Backend> for af::Backend {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Default => af::Backend::DEFAULT,
            Backend::Cpu => af::Backend::CPU,
            Backend::Cuda => af::Backend::CUDA,
            Backend::OpenCl => af::Backend::OPENCL,
        }
    }
}

impl From<af::Backend> for Backend {
    fn from(backend: af::Backend) -> Self {
        match backend {
            af::Backend::DEFAULT => Self::Default,
            af::Backend::CPU => Self::Cpu,
            af::Backend::CUDA => Self::Cuda,
            af::Backend::OPENCL => Self::OpenCl,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Default => "default",
            Self::Cpu => "cpu",
            Self::Cuda => "cuda",
            Self::OpenCl => "opencl",
        })
    }
}

/// Make `backend` the active backend for subsequent array creation.
pub fn set_backend(backend: Backend) -> Result<()> {
    if backend != Backend::Default && !available_backends()?.contains(&backend) {
        return Err(ArrayError::Device(format!(
            "the {} backend is not available",
            backend
        )));
    }

    debug!("set the active backend to {}", backend);
    native::guarded("af_set_backend", || af::set_backend(backend.into()))
}

pub fn get_backend() -> Result<Backend> {
    native::guarded("af_get_active_backend", af::get_active_backend).map(Backend::from)
}

pub fn available_backends() -> Result<Vec<Backend>> {
    native::guarded("af_get_available_backends", af::get_available_backends)
        .map(|backends| backends.into_iter().map(Backend::from).collect())
}

/// Make `device` the active device of the active backend.
pub fn set_device(device: i32) -> Result<()> {
    if device < 0 {
        return Err(ArrayError::Device(format!("invalid device id {}", device)));
    }

    if device != 0 && get_backend()? == Backend::Cpu {
        return Err(ArrayError::Device(format!(
            "the cpu backend has only device 0, not {}",
            device
        )));
    }

    let count = device_count()?;
    if device >= count {
        return Err(ArrayError::Device(format!(
            "device {} is out of range for {} available devices",
            device, count
        )));
    }

    debug!("set the active device to {}", device);
    native::guarded("af_set_device", || af::set_device(device))
}

pub fn get_device() -> Result<i32> {
    native::guarded("af_get_device", af::get_device)
}

pub fn device_count() -> Result<i32> {
    native::guarded("af_get_device_count", af::device_count)
}

/// Force the evaluation of every deferred computation behind the given arrays.
pub fn eval(arrays: &[&Array]) -> Result<()> {
    if arrays.is_empty() {
        return Ok(());
    }

    let mut handles: Vec<af_array> = arrays.iter().map(|array| array.handle().get()).collect();
    af_call!(af_eval_multiple(handles.len() as c_int, handles.as_mut_ptr()))
}

/// Block until all the queued work on `device` has completed.
pub fn sync(device: i32) -> Result<()> {
    if device < 0 {
        return Err(ArrayError::Device(format!("invalid device id {}", device)));
    }

    af_call!(af_sync(device as c_int))
}

/// Print a summary of the active backend and device to standard output.
pub fn info() -> Result<()> {
    native::guarded("af_info", af::info)
}

pub fn info_string(verbose: bool) -> Result<String> {
    native::guarded("af_info_string", || af::info_string(verbose))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_ids() {
        for backend in [Backend::Default, Backend::Cpu, Backend::Cuda, Backend::OpenCl] {
            assert_eq!(Backend::from_id(backend.id()).unwrap(), backend);
            assert_eq!(Backend::from_name(&backend.to_string()).unwrap(), backend);
        }

        assert_eq!(Backend::from_name("CUDA").unwrap(), Backend::Cuda);
        assert!(Backend::from_id(3).is_err());
        assert!(Backend::from_name("metal").is_err());
    }

    #[test]
    fn test_device() {
        let device = get_device().unwrap();
        assert!(device >= 0);
        assert!(device < device_count().unwrap());

        assert!(matches!(set_device(-1), Err(ArrayError::Device(_))));
        assert!(sync(-1).is_err());

        set_device(device).unwrap();
        sync(device).unwrap();
    }

    #[test]
    fn test_eval() {
        let a = Array::from_vec(vec![1.0f32, 2.0]).unwrap();
        let b = (&a + &a).unwrap();
        eval(&[&a, &b]).unwrap();
        eval(&[]).unwrap();

        assert_eq!(b.backend().unwrap(), get_backend().unwrap());
        assert!(!info_string(false).unwrap().is_empty());
    }
}
