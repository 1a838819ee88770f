use async_trait::async_trait;
use reqwest::{StatusCode, header};
use serde::Deserialize;

use crate::client::RemoteClient;
use onda_core::ports::storage::{ObjectStorage, StorageError, StoredObject, UploadOptions};

/// Adapter remoto de `ObjectStorage` sobre la API de objetos del servicio.
///
/// La política de no sobrescritura viaja como cabecera (`x-upsert: false`)
/// y el backend la materializa en un 409 si la clave ya existe.
pub struct RemoteObjectStorage {
  client: RemoteClient,
}

/// El backend responde la clave completa del objeto subido; según la
/// versión el campo se llama `Key` o `path`.
#[derive(Debug, Deserialize)]
struct UploadResponse {
  #[serde(rename = "Key")]
  key: Option<String>,
  path: Option<String>,
}

impl UploadResponse {
  fn into_path(self, bucket: &str, key: &str) -> String {
    self.key.or(self.path).unwrap_or_else(|| format!("{bucket}/{key}"))
  }
}

impl RemoteObjectStorage {
  pub fn new(client: RemoteClient) -> Self {
    Self { client }
  }

  fn object_url(&self, bucket: &str, key: &str) -> String {
    self.client.url(&format!("/storage/v1/object/{bucket}/{key}"))
  }
}

#[async_trait]
impl ObjectStorage for RemoteObjectStorage {
  async fn upload(
    &self,
    bucket: &str,
    key: &str,
    payload: &[u8],
    opts: &UploadOptions,
  ) -> Result<StoredObject, StorageError> {
    let res = self
      .client
      .http()
      .post(self.object_url(bucket, key))
      .header(header::CACHE_CONTROL, format!("max-age={}", opts.cache_control_secs))
      .header("x-upsert", if opts.overwrite { "true" } else { "false" })
      .body(payload.to_vec())
      .send()
      .await
      .map_err(|e| StorageError::Backend(e.to_string()))?;

    let status = res.status();
    if status == StatusCode::CONFLICT {
      return Err(StorageError::Conflict(format!("{bucket}/{key}")));
    }
    if !status.is_success() {
      let body = res.text().await.unwrap_or_default();
      return Err(StorageError::Backend(format!("status {status}: {body}")));
    }

    let parsed: UploadResponse = res.json().await.map_err(|e| StorageError::Backend(e.to_string()))?;

    Ok(StoredObject { bucket: bucket.to_owned(), path: parsed.into_path(bucket, key) })
  }

  async fn remove(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
    let res = self
      .client
      .http()
      .delete(self.object_url(bucket, key))
      .send()
      .await
      .map_err(|e| StorageError::Backend(e.to_string()))?;

    let status = res.status();
    // Idempotente: un objeto ya ausente cuenta como borrado.
    if status.is_success() || status == StatusCode::NOT_FOUND {
      return Ok(());
    }

    let body = res.text().await.unwrap_or_default();
    Err(StorageError::Backend(format!("status {status}: {body}")))
  }
}
