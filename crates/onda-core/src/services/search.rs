use crate::domain::ids::SongId;
use crate::domain::song::Song;

/// Texto que muestra la vista cuando no hay resultados.
pub const NO_RESULTS_PLACEHOLDER: &str = "No songs found.";

/// Fila ya proyectada, lista para pintar. Clicable a través de su `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct SongRow {
  pub id: SongId,
  pub title: String,
  pub author: String,
  pub image_path: String,
}

/// Resultado de proyectar la lista de canciones de la vista de búsqueda:
/// o filas en el orden recibido, o el placeholder de vacío.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResults {
  Empty,
  Rows(Vec<SongRow>),
}

impl SearchResults {
  pub fn rows(&self) -> &[SongRow] {
    match self {
      SearchResults::Empty => &[],
      SearchResults::Rows(rows) => rows,
    }
  }

  pub fn is_empty(&self) -> bool {
    matches!(self, SearchResults::Empty)
  }

  /// Placeholder a pintar en lugar de la lista, si no hay filas.
  pub fn placeholder(&self) -> Option<&'static str> {
    match self {
      SearchResults::Empty => Some(NO_RESULTS_PLACEHOLDER),
      SearchResults::Rows(_) => None,
    }
  }
}

/// Proyección pura: mismo orden de entrada, sin filtrar, ordenar ni
/// paginar. Una lista vacía produce `Empty`, nunca cero filas.
pub fn project(songs: &[Song]) -> SearchResults {
  if songs.is_empty() {
    return SearchResults::Empty;
  }

  let rows = songs
    .iter()
    .map(|song| SongRow {
      id: song.id,
      title: song.title.clone(),
      author: song.author.clone(),
      image_path: song.image_path.clone(),
    })
    .collect();

  SearchResults::Rows(rows)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::ids::UserId;
  use uuid::Uuid;

  fn song(title: &str) -> Song {
    Song {
      id: SongId::new(),
      title: title.to_owned(),
      author: "Ana".to_owned(),
      image_path: format!("images/image-{title}"),
      song_path: format!("songs/song-{title}"),
      user_id: UserId::from_uuid(Uuid::new_v4()),
    }
  }

  #[test]
  fn empty_input_renders_only_the_placeholder() {
    let results = project(&[]);

    assert!(results.is_empty());
    assert_eq!(results.rows().len(), 0);
    assert_eq!(results.placeholder(), Some(NO_RESULTS_PLACEHOLDER));
  }

  #[test]
  fn rows_preserve_input_order() {
    let songs = vec![song("uno"), song("dos"), song("tres")];

    let results = project(&songs);

    assert!(results.placeholder().is_none());
    let titles: Vec<&str> = results.rows().iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["uno", "dos", "tres"]);
    let ids: Vec<_> = results.rows().iter().map(|r| r.id).collect();
    let expected: Vec<_> = songs.iter().map(|s| s.id).collect();
    assert_eq!(ids, expected);
  }
}
