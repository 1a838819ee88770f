use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::client::RemoteClient;
use onda_core::domain::ids::{SongId, UserId};
use onda_core::domain::song::{NewSong, Song};
use onda_core::ports::catalog::{CatalogError, SongCatalog};

/// Fila de `songs` tal como la devuelve la API REST del datastore.
#[derive(Debug, Deserialize)]
struct SongRowDto {
  id: Uuid,
  title: String,
  author: String,
  image_path: String,
  song_path: String,
  user_id: Uuid,
}

#[derive(Debug, Serialize)]
struct NewSongDto<'a> {
  title: &'a str,
  author: &'a str,
  image_path: &'a str,
  song_path: &'a str,
  user_id: Uuid,
}

fn row_to_song(row: SongRowDto) -> Song {
  Song {
    id: SongId::from_uuid(row.id),
    title: row.title,
    author: row.author,
    image_path: row.image_path,
    song_path: row.song_path,
    user_id: UserId::from_uuid(row.user_id),
  }
}

fn new_song_dto(song: &NewSong) -> NewSongDto<'_> {
  NewSongDto {
    title: &song.title,
    author: &song.author,
    image_path: &song.image_path,
    song_path: &song.song_path,
    user_id: song.user_id.as_uuid(),
  }
}

/// Patrón de filtro de título para la API REST (substring, sin distinguir
/// mayúsculas; la semántica exacta la posee el backend).
fn ilike_pattern(query: &str) -> String {
  format!("ilike.*{query}*")
}

/// Adapter de `SongCatalog` sobre la API REST del datastore.
pub struct RemoteSongCatalog {
  client: RemoteClient,
}

impl RemoteSongCatalog {
  pub fn new(client: RemoteClient) -> Self {
    Self { client }
  }

  fn songs_url(&self) -> String {
    self.client.url("/rest/v1/songs")
  }

  async fn fetch_rows(&self, query: &[(&str, &str)]) -> Result<Vec<Song>, CatalogError> {
    let res = self
      .client
      .http()
      .get(self.songs_url())
      .query(query)
      .send()
      .await
      .map_err(|e| CatalogError::Backend(e.to_string()))?;

    let status = res.status();
    if !status.is_success() {
      let body = res.text().await.unwrap_or_default();
      return Err(CatalogError::Backend(format!("status {status}: {body}")));
    }

    let rows: Vec<SongRowDto> = res.json().await.map_err(|e| CatalogError::Backend(e.to_string()))?;
    Ok(rows.into_iter().map(row_to_song).collect())
  }
}

#[async_trait]
impl SongCatalog for RemoteSongCatalog {
  async fn insert(&self, song: NewSong) -> Result<Song, CatalogError> {
    // `Prefer: return=representation` hace que el backend devuelva la fila
    // insertada (como array), con el id que le asignó.
    let res = self
      .client
      .http()
      .post(self.songs_url())
      .header("Prefer", "return=representation")
      .json(&new_song_dto(&song))
      .send()
      .await
      .map_err(|e| CatalogError::Backend(e.to_string()))?;

    let status = res.status();
    if !status.is_success() {
      let body = res.text().await.unwrap_or_default();
      return Err(CatalogError::Backend(format!("status {status}: {body}")));
    }

    let mut rows: Vec<SongRowDto> =
      res.json().await.map_err(|e| CatalogError::Backend(e.to_string()))?;

    rows
      .pop()
      .map(row_to_song)
      .ok_or_else(|| CatalogError::Backend("empty insert representation".to_owned()))
  }

  async fn list(&self) -> Result<Vec<Song>, CatalogError> {
    self.fetch_rows(&[("select", "*")]).await
  }

  async fn search(&self, query: &str) -> Result<Vec<Song>, CatalogError> {
    let pattern = ilike_pattern(query);
    self.fetch_rows(&[("select", "*"), ("title", &pattern)]).await
  }
}
