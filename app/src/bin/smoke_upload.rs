//! End-to-end smoke of the upload flow against the local filesystem
//! storage adapter and an in-memory catalog.
//!
//! Run with `RUST_LOG=info` to see the phase transitions.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use onda::infrastructure::reporter::{BroadcastRefresh, TracingNotifier};
use onda_core::domain::ids::{SongId, UserId};
use onda_core::domain::song::{NewSong, Song};
use onda_core::domain::upload::FilePayload;
use onda_core::ports::catalog::{CatalogError, SongCatalog};
use onda_core::ports::session::{SessionProvider, User};
use onda_core::services::search;
use onda_core::services::upload::{StoragePolicy, UploadService};
use onda_fs::FsObjectStorage;
use onda_state::{ModalKind, ModalStore, PlayRequest, PlayerStore, UploadController};

struct StaticSession(User);

#[async_trait]
impl SessionProvider for StaticSession {
  async fn current_user(&self) -> Option<User> {
    Some(self.0.clone())
  }
}

#[derive(Clone, Default)]
struct MemoryCatalog {
  rows: Arc<Mutex<Vec<Song>>>,
}

#[async_trait]
impl SongCatalog for MemoryCatalog {
  async fn insert(&self, song: NewSong) -> Result<Song, CatalogError> {
    let row = Song {
      id: SongId::new(),
      title: song.title,
      author: song.author,
      image_path: song.image_path,
      song_path: song.song_path,
      user_id: song.user_id,
    };
    self.rows.lock().unwrap().push(row.clone());
    Ok(row)
  }

  async fn list(&self) -> Result<Vec<Song>, CatalogError> {
    Ok(self.rows.lock().unwrap().clone())
  }

  async fn search(&self, query: &str) -> Result<Vec<Song>, CatalogError> {
    let needle = query.to_lowercase();
    Ok(
      self
        .rows
        .lock()
        .unwrap()
        .iter()
        .filter(|song| song.title.to_lowercase().contains(&needle))
        .cloned()
        .collect(),
    )
  }
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  let root = std::env::temp_dir().join(format!("onda-smoke-{}", std::process::id()));
  println!("Object store root: {}", root.display());

  let user =
    User { id: UserId::from_uuid(uuid::Uuid::new_v4()), email: Some("smoke@onda.local".to_owned()) };
  let catalog = MemoryCatalog::default();
  let (refresh, mut refresh_rx) = BroadcastRefresh::new();

  let service = UploadService::new(
    StaticSession(user.clone()),
    FsObjectStorage::new(&root),
    catalog.clone(),
    TracingNotifier::new(),
    refresh,
    StoragePolicy::default(),
  );

  // Captura del formulario y envío a través del controlador del modal.
  let mut modals = ModalStore::new();
  modals.open(ModalKind::Upload);

  let mut controller = UploadController::new();
  let form = controller.form_mut();
  form.title = "Smoke".to_owned();
  form.author = "Onda".to_owned();
  form.song = Some(FilePayload::new("smoke.mp3", vec![0x49, 0x44, 0x33]));
  form.image = Some(FilePayload::new("smoke.png", vec![0x89, 0x50, 0x4e, 0x47]));

  let song = controller.submit(&service, &mut modals).await.expect("upload failed");
  println!("Stored song row: {song:?}");
  println!("Upload modal still open: {}", modals.is_open(ModalKind::Upload));

  refresh_rx.recv().await.expect("missing refresh tick");
  println!("Refresh tick received, re-fetching view data");

  // La vista de búsqueda: proyección pura de lo que devuelve el catálogo.
  let songs = catalog.search("smo").await.expect("search failed");
  let results = search::project(&songs);
  for row in results.rows() {
    println!("Row: {} by {}", row.title, row.author);
  }

  // Y el gate de reproducción sobre la primera fila.
  let mut player = PlayerStore::new();
  let gate = PlayRequest::new(StaticSession(user));
  gate.on_play(song.id, &songs, &mut player, &mut modals).await;
  println!("Now playing: {:?}, queue length {}", player.current(), player.queue().len());
}
