use crate::domain::ids::{SongId, UserId};
use serde::{Deserialize, Serialize};

/// Fila de canción tal como la expone el datastore remoto.
///
/// La UI solo maneja copias de lectura; las escrituras pasan siempre por el
/// flujo de subida.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
  /// Identificador único asignado por el datastore.
  pub id: SongId,
  pub title: String,
  pub author: String,
  /// Ruta del objeto de imagen dentro del storage remoto.
  pub image_path: String,
  /// Ruta del objeto de audio dentro del storage remoto.
  pub song_path: String,
  /// Usuario que subió la canción.
  pub user_id: UserId,
}

/// Payload de inserción. No lleva `id`: lo asigna el backend al insertar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSong {
  pub title: String,
  pub author: String,
  pub image_path: String,
  pub song_path: String,
  pub user_id: UserId,
}
