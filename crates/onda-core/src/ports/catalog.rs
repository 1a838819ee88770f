use crate::domain::song::{NewSong, Song};
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
  #[error("entity not found")]
  NotFound,

  #[error("backend error: {0}")]
  Backend(String),
}

/// Port del datastore de canciones.
///
/// La escritura es una sola operación (`insert`); el esquema y las
/// restricciones los posee el backend. El lado de lectura alimenta las
/// vistas de listado y búsqueda, con semántica de filtrado delegada
/// también al backend.
#[async_trait]
pub trait SongCatalog: Send + Sync {
  async fn insert(&self, song: NewSong) -> Result<Song, CatalogError>;

  async fn list(&self) -> Result<Vec<Song>, CatalogError>;

  async fn search(&self, query: &str) -> Result<Vec<Song>, CatalogError>;
}
