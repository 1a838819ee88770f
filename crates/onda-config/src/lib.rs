mod backend;
mod model;
mod paths;

pub use backend::{ConfigBackend, TomlConfigBackend};
pub use model::{API_SECTION, ApiConfig, STORAGE_SECTION, StorageConfig};
pub use paths::{ConfigError, OndaPaths};

use once_cell::sync::Lazy;

// Singleton de paths (portable / system). Datos inmutables de proceso,
// detectados una sola vez.
pub static PATHS: Lazy<OndaPaths> =
  Lazy::new(|| OndaPaths::detect().expect("failed to init OndaPaths"));

// Singleton del backend de config
pub static CONFIG_BACKEND: Lazy<TomlConfigBackend> =
  Lazy::new(|| TomlConfigBackend::new(PATHS.clone()));
