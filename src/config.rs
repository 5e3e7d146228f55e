//! Process-wide runtime configuration, read from the environment.

use std::env;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{
    set_backend, set_default_engine_type, set_device, set_seed, ArrayError, Backend,
    RandomEngineType, Result,
};

/// The device selected when none is configured.
pub const DEFAULT_DEVICE: i32 = 0;

/// The seed of the default random engine when none is configured.
pub const DEFAULT_SEED: u64 = 0;

const BACKEND: &str = "AFND_BACKEND";
const DEVICE: &str = "AFND_DEVICE";
const SEED: &str = "AFND_SEED";
const RANDOM_ENGINE: &str = "AFND_RANDOM_ENGINE";

/// Which backend, device and random engine to use. Unset fields keep the native defaults.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct Config {
    pub backend: Option<Backend>,
    pub device: Option<i32>,
    pub seed: Option<u64>,
    pub engine: Option<RandomEngineType>,
}

impl Config {
    /// Read a `Config` from the `AFND_BACKEND`, `AFND_DEVICE`, `AFND_SEED` and
    /// `AFND_RANDOM_ENGINE` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self> {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let backend = var(BACKEND)
            .map(|value| {
                Backend::from_name(&value)
                    .map_err(|_| ArrayError::Device(format!("invalid {}: {}", BACKEND, value)))
            })
            .transpose()?;

        let device = var(DEVICE)
            .map(|value| match value.parse::<i32>() {
                Ok(device) if device >= 0 => Ok(device),
                _ => Err(ArrayError::Device(format!("invalid {}: {}", DEVICE, value))),
            })
            .transpose()?;

        let seed = var(SEED)
            .map(|value| {
                value.parse::<u64>().map_err(|cause| {
                    ArrayError::TypeMismatch(format!("invalid {}: {} ({})", SEED, value, cause))
                })
            })
            .transpose()?;

        let engine = var(RANDOM_ENGINE)
            .map(|value| {
                RandomEngineType::from_name(&value).map_err(|_| {
                    ArrayError::TypeMismatch(format!("invalid {}: {}", RANDOM_ENGINE, value))
                })
            })
            .transpose()?;

        Ok(Self {
            backend,
            device,
            seed,
            engine,
        })
    }

    /// Apply this configuration: backend, then device, then the random seed and engine type.
    pub fn apply(&self) -> Result<()> {
        debug!("apply {:?}", self);

        if let Some(backend) = self.backend {
            set_backend(backend)?;
        }

        if let Some(device) = self.device {
            set_device(device)?;
        }

        if let Some(seed) = self.seed {
            set_seed(seed)?;
        }

        if let Some(engine) = self.engine {
            set_default_engine_type(engine)?;
        }

        Ok(())
    }
}
