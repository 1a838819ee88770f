use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
  /// La clave ya existe y la política pedía no sobrescribir.
  #[error("object already exists: {0}")]
  Conflict(String),

  #[error("io error: {0}")]
  Io(String),

  #[error("backend error: {0}")]
  Backend(String),
}

/// Opciones de una subida de objeto: pista de caché para el CDN del
/// servicio y política de sobrescritura.
#[derive(Debug, Clone)]
pub struct UploadOptions {
  pub cache_control_secs: u32,
  /// Con `false`, una clave existente hace fallar la subida con
  /// `StorageError::Conflict` en lugar de pisar el objeto.
  pub overwrite: bool,
}

impl Default for UploadOptions {
  fn default() -> Self {
    Self { cache_control_secs: 3600, overwrite: false }
  }
}

/// Referencia al objeto ya almacenado. `path` es la ruta que el backend
/// espera encontrar luego en la fila de metadatos.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
  pub bucket: String,
  pub path: String,
}

/// Port del servicio de almacenamiento de objetos.
///
/// `remove` existe para poder deshacer escrituras cuando un paso posterior
/// del flujo falla; los adapters deberían tratarlo como idempotente.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
  async fn upload(
    &self,
    bucket: &str,
    key: &str,
    payload: &[u8],
    opts: &UploadOptions,
  ) -> Result<StoredObject, StorageError>;

  async fn remove(&self, bucket: &str, key: &str) -> Result<(), StorageError>;
}
