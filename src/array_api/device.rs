use std::fmt;

use crate::{get_backend, ArrayError, Backend, Result};

use super::Array;

/// A device on which an [`Array`] can be allocated.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Device {
    Cpu,
    Gpu,
}

impl Device {
    /// The device of the given backend. The backend-neutral default is not a device.
    pub fn of(backend: Backend) -> Result<Self> {
        match backend {
            Backend::Cpu => Ok(Self::Cpu),
            Backend::Cuda | Backend::OpenCl => Ok(Self::Gpu),
            Backend::Default => Err(ArrayError::Device(
                "the default backend does not identify a device".into(),
            )),
        }
    }

    /// The device of the active backend.
    pub fn current() -> Result<Self> {
        get_backend().and_then(Self::of)
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cpu => "cpu",
            Self::Gpu => "gpu",
        })
    }
}

impl Array {
    /// The device on which this array is allocated.
    pub fn device(&self) -> Result<Device> {
        self.as_facade().backend().and_then(Device::of)
    }

    /// Copy this array to the given `device`.
    ///
    /// Only the device the array already resides on is supported, and `stream` must be `None`.
    pub fn to_device(&self, device: Device, stream: Option<i32>) -> Result<Array> {
        if let Some(stream) = stream {
            return Err(ArrayError::Device(format!(
                "streams are not supported (requested stream {})",
                stream
            )));
        }

        let current = self.device()?;
        if current == device {
            self.as_facade().copy().map(Array::new)
        } else {
            Err(ArrayError::Device(format!(
                "cannot move an array from {} to {} across backends",
                current, device
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array_api::zeros;
    use crate::Shape;

    #[test]
    fn test_device_of() {
        assert_eq!(Device::of(Backend::Cpu).unwrap(), Device::Cpu);
        assert_eq!(Device::of(Backend::Cuda).unwrap(), Device::Gpu);
        assert_eq!(Device::of(Backend::OpenCl).unwrap(), Device::Gpu);
        assert!(Device::of(Backend::Default).is_err());
    }

    #[test]
    fn test_to_device() {
        let x = zeros(&Shape::vector(3), None).unwrap();
        let device = x.device().unwrap();
        assert_eq!(device, Device::current().unwrap());

        let copy = x.to_device(device, None).unwrap();
        assert_eq!(copy.shape(), x.shape());

        assert!(matches!(
            x.to_device(device, Some(0)),
            Err(ArrayError::Device(_))
        ));

        let other = match device {
            Device::Cpu => Device::Gpu,
            Device::Gpu => Device::Cpu,
        };
        assert!(x.to_device(other, None).is_err());
    }
}
