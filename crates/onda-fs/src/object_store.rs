use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use onda_core::ports::storage::{ObjectStorage, StorageError, StoredObject, UploadOptions};

/// Adapter de `ObjectStorage` sobre el sistema de archivos local.
///
/// Cada bucket es un subdirectorio bajo `root` y la clave es el nombre del
/// fichero. La política de no sobrescritura se apoya en `create_new`: la
/// detección de claves repetidas la hace el propio filesystem, sin
/// comprobación previa con carrera.
///
/// La pista de caché de `UploadOptions` no significa nada en local y se
/// ignora.
pub struct FsObjectStorage {
  root: PathBuf,
}

impl FsObjectStorage {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  fn object_path(&self, bucket: &str, key: &str) -> PathBuf {
    self.root.join(bucket).join(key)
  }
}

#[async_trait]
impl ObjectStorage for FsObjectStorage {
  async fn upload(
    &self,
    bucket: &str,
    key: &str,
    payload: &[u8],
    opts: &UploadOptions,
  ) -> Result<StoredObject, StorageError> {
    let dir = self.root.join(bucket);
    fs::create_dir_all(&dir).await.map_err(map_io)?;

    let path = dir.join(key);
    let mut open = fs::OpenOptions::new();
    open.write(true);
    if opts.overwrite {
      open.create(true).truncate(true);
    } else {
      open.create_new(true);
    }

    let mut file = match open.open(&path).await {
      Ok(f) => f,
      Err(e) if e.kind() == ErrorKind::AlreadyExists => {
        return Err(StorageError::Conflict(format!("{bucket}/{key}")));
      }
      Err(e) => return Err(map_io(e)),
    };

    file.write_all(payload).await.map_err(map_io)?;
    file.sync_all().await.map_err(map_io)?;

    Ok(StoredObject { bucket: bucket.to_owned(), path: format!("{bucket}/{key}") })
  }

  async fn remove(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
    match fs::remove_file(self.object_path(bucket, key)).await {
      Ok(()) => Ok(()),
      // Idempotente: borrar algo ya borrado no es un error para el flujo.
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
      Err(e) => Err(map_io(e)),
    }
  }
}

fn map_io(err: std::io::Error) -> StorageError {
  StorageError::Io(err.to_string())
}
