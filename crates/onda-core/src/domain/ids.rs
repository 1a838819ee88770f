use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SongId(Uuid);

impl SongId {
  /// Genera un nuevo identificador único.
  pub fn new() -> Self {
    SongId(Uuid::new_v4())
  }

  /// Construye un `SongId` a partir de un `Uuid` existente.
  pub fn from_uuid(u: Uuid) -> Self {
    SongId(u)
  }

  /// Devuelve el `Uuid` interno.
  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl Default for SongId {
  fn default() -> Self {
    Self::new()
  }
}

impl From<Uuid> for SongId {
  fn from(u: Uuid) -> Self {
    SongId(u)
  }
}

impl From<SongId> for Uuid {
  fn from(id: SongId) -> Self {
    id.0
  }
}

impl fmt::Display for SongId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// Identidad del usuario autenticado. La asigna el servicio de auth
/// externo; aquí solo la transportamos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
  pub fn from_uuid(u: Uuid) -> Self {
    UserId(u)
  }

  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl From<Uuid> for UserId {
  fn from(u: Uuid) -> Self {
    UserId(u)
  }
}

impl From<UserId> for Uuid {
  fn from(id: UserId) -> Self {
    id.0
  }
}

impl fmt::Display for UserId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// Identificador de subida generado en el cliente.
///
/// A diferencia de `SongId` (fila del datastore) o `UserId` (auth externo),
/// este id existe solo para desambiguar las claves de los objetos binarios
/// de un mismo título. Resistente a colisiones por construcción (uuid v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UploadId(Uuid);

impl UploadId {
  pub fn new() -> Self {
    UploadId(Uuid::new_v4())
  }

  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl Default for UploadId {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for UploadId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}
