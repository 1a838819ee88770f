use crate::domain::ids::UploadId;
use crate::domain::song::{NewSong, Song};
use crate::domain::upload::UploadForm;
use crate::errors::UploadError;
use crate::ports::storage::UploadOptions;
use crate::ports::{Notifier, ObjectStorage, RefreshSignal, SessionProvider, SongCatalog};
use tracing::{info, warn};

/// Paso remoto del flujo de subida.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStep {
  SongUpload,
  ImageUpload,
  MetadataInsert,
}

/// Fases del flujo, en orden. `Failed` conserva el paso que rompió la
/// secuencia.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
  Idle,
  UploadingSong,
  UploadingImage,
  InsertingRecord,
  Committed,
  Failed(UploadStep),
}

/// Buckets y pista de caché, normalmente cargados desde la config.
#[derive(Debug, Clone)]
pub struct StoragePolicy {
  pub song_bucket: String,
  pub image_bucket: String,
  pub cache_control_secs: u32,
}

impl Default for StoragePolicy {
  fn default() -> Self {
    Self {
      song_bucket: "songs".to_owned(),
      image_bucket: "images".to_owned(),
      cache_control_secs: 3600,
    }
  }
}

impl StoragePolicy {
  fn options(&self) -> UploadOptions {
    UploadOptions { cache_control_secs: self.cache_control_secs, overwrite: false }
  }
}

impl UploadError {
  /// Paso remoto en el que falló el flujo, si fue un fallo remoto.
  pub fn failed_step(&self) -> Option<UploadStep> {
    match self {
      UploadError::SongUpload(_) => Some(UploadStep::SongUpload),
      UploadError::ImageUpload(_) => Some(UploadStep::ImageUpload),
      UploadError::MetadataInsert(_) => Some(UploadStep::MetadataInsert),
      _ => None,
    }
  }
}

/// Estado explícito de un envío: fase actual + lista de deshacer con las
/// escrituras de storage ya confirmadas (bucket, clave).
struct Saga {
  phase: UploadPhase,
  undo: Vec<(String, String)>,
}

impl Saga {
  fn new() -> Self {
    Self { phase: UploadPhase::Idle, undo: Vec::new() }
  }

  fn advance(&mut self, phase: UploadPhase) {
    info!(from = ?self.phase, to = ?phase, "upload phase");
    self.phase = phase;
  }

  fn record_write(&mut self, bucket: &str, key: &str) {
    self.undo.push((bucket.to_owned(), key.to_owned()));
  }
}

/// Flujo de subida de una canción: dos escrituras de storage + un insert
/// de metadatos, estrictamente secuenciales.
///
/// La serialización no es una elección de rendimiento: el insert necesita
/// las rutas que devuelven las dos subidas, así que el paso N+1 no puede
/// empezar sin que el N haya confirmado.
///
/// Invariante: nunca queda una fila de canción parcial. Si un paso falla,
/// el insert no ocurre y las escrituras de storage previas se deshacen en
/// orden inverso, así tampoco quedan binarios huérfanos.
pub struct UploadService<Se, St, Ca, No, Rf>
where
  Se: SessionProvider,
  St: ObjectStorage,
  Ca: SongCatalog,
  No: Notifier,
  Rf: RefreshSignal,
{
  session: Se,
  storage: St,
  catalog: Ca,
  notifier: No,
  refresh: Rf,
  policy: StoragePolicy,
}

impl<Se, St, Ca, No, Rf> UploadService<Se, St, Ca, No, Rf>
where
  Se: SessionProvider,
  St: ObjectStorage,
  Ca: SongCatalog,
  No: Notifier,
  Rf: RefreshSignal,
{
  pub fn new(
    session: Se,
    storage: St,
    catalog: Ca,
    notifier: No,
    refresh: Rf,
    policy: StoragePolicy,
  ) -> Self {
    Self { session, storage, catalog, notifier, refresh, policy }
  }

  /// Ejecuta el flujo completo para los valores actuales del formulario.
  ///
  /// Todo error se convierte aquí en una notificación transitoria; el
  /// `Result` devuelto es para que el controlador decida si limpia el
  /// formulario, no para re-lanzar el error hacia arriba.
  pub async fn submit(&self, form: &UploadForm) -> Result<Song, UploadError> {
    match self.run(form).await {
      Ok(song) => {
        self.notifier.success("Song created!").await;
        Ok(song)
      }
      Err(err) => {
        self.notifier.error(&err.to_string()).await;
        Err(err)
      }
    }
  }

  async fn run(&self, form: &UploadForm) -> Result<Song, UploadError> {
    // 1) Validación local. Sin los tres presentes no se toca la red.
    let Some(song_file) = form.song.as_ref() else {
      return Err(UploadError::MissingFields);
    };
    let Some(image_file) = form.image.as_ref() else {
      return Err(UploadError::MissingFields);
    };
    let Some(user) = self.session.current_user().await else {
      return Err(UploadError::MissingFields);
    };

    // 2) Identificador de subida generado en el cliente. La unicidad de
    //    las claves depende de él, no del título.
    let uid = UploadId::new();
    let opts = self.policy.options();
    let mut saga = Saga::new();

    // 3) Binario de la canción.
    saga.advance(UploadPhase::UploadingSong);
    let song_key = format!("song-{}-{}", form.title, uid);
    let stored_song = match self
      .storage
      .upload(&self.policy.song_bucket, &song_key, &song_file.bytes, &opts)
      .await
    {
      Ok(obj) => obj,
      Err(e) => {
        saga.advance(UploadPhase::Failed(UploadStep::SongUpload));
        return Err(UploadError::SongUpload(e.to_string()));
      }
    };
    saga.record_write(&self.policy.song_bucket, &song_key);

    // 4) Binario de la imagen.
    saga.advance(UploadPhase::UploadingImage);
    let image_key = format!("image-{}-{}", form.title, uid);
    let stored_image = match self
      .storage
      .upload(&self.policy.image_bucket, &image_key, &image_file.bytes, &opts)
      .await
    {
      Ok(obj) => obj,
      Err(e) => {
        saga.advance(UploadPhase::Failed(UploadStep::ImageUpload));
        self.compensate(&mut saga).await;
        return Err(UploadError::ImageUpload(e.to_string()));
      }
    };
    saga.record_write(&self.policy.image_bucket, &image_key);

    // 5) Fila de metadatos, con las rutas que confirmó el storage.
    saga.advance(UploadPhase::InsertingRecord);
    let record = NewSong {
      title: form.title.clone(),
      author: form.author.clone(),
      image_path: stored_image.path,
      song_path: stored_song.path,
      user_id: user.id,
    };
    let song = match self.catalog.insert(record).await {
      Ok(song) => song,
      Err(e) => {
        saga.advance(UploadPhase::Failed(UploadStep::MetadataInsert));
        self.compensate(&mut saga).await;
        return Err(UploadError::MetadataInsert(e.to_string()));
      }
    };

    // 6) Confirmado: una única señal de refresco para la vista.
    saga.advance(UploadPhase::Committed);
    self.refresh.refresh().await;

    Ok(song)
  }

  /// Deshace en orden inverso las escrituras de storage ya confirmadas.
  ///
  /// Un borrado compensatorio que falle deja el objeto huérfano; se
  /// registra y no enmascara el error primario del flujo.
  async fn compensate(&self, saga: &mut Saga) {
    while let Some((bucket, key)) = saga.undo.pop() {
      match self.storage.remove(&bucket, &key).await {
        Ok(()) => info!(bucket = %bucket, key = %key, "rolled back stored object"),
        Err(e) => {
          warn!(bucket = %bucket, key = %key, error = %e, "compensating delete failed, object left orphaned")
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::ids::{SongId, UserId};
  use crate::domain::upload::FilePayload;
  use crate::ports::catalog::CatalogError;
  use crate::ports::session::User;
  use crate::ports::storage::{StorageError, StoredObject};
  use async_trait::async_trait;
  use std::sync::{Arc, Mutex};
  use uuid::Uuid;

  /// Llamada observada en los ports remotos, en orden global.
  #[derive(Debug, Clone, PartialEq)]
  enum Call {
    Upload { bucket: String, key: String },
    Remove { bucket: String, key: String },
    Insert { title: String },
    Refresh,
  }

  type Log = Arc<Mutex<Vec<Call>>>;

  #[derive(Clone, Copy, PartialEq)]
  enum FailAt {
    Nothing,
    SongBucket,
    ImageBucket,
    Insert,
  }

  struct FakeSession {
    user: Option<User>,
  }

  #[async_trait]
  impl SessionProvider for FakeSession {
    async fn current_user(&self) -> Option<User> {
      self.user.clone()
    }
  }

  struct FakeStorage {
    log: Log,
    fail_at: FailAt,
  }

  #[async_trait]
  impl ObjectStorage for FakeStorage {
    async fn upload(
      &self,
      bucket: &str,
      key: &str,
      _payload: &[u8],
      _opts: &UploadOptions,
    ) -> Result<StoredObject, StorageError> {
      self.log.lock().unwrap().push(Call::Upload { bucket: bucket.to_owned(), key: key.to_owned() });
      let failing = match self.fail_at {
        FailAt::SongBucket => bucket == "songs",
        FailAt::ImageBucket => bucket == "images",
        _ => false,
      };
      if failing {
        return Err(StorageError::Backend("storage down".to_owned()));
      }
      Ok(StoredObject { bucket: bucket.to_owned(), path: format!("{bucket}/{key}") })
    }

    async fn remove(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
      self.log.lock().unwrap().push(Call::Remove { bucket: bucket.to_owned(), key: key.to_owned() });
      Ok(())
    }
  }

  struct FakeCatalog {
    log: Log,
    fail: bool,
  }

  #[async_trait]
  impl SongCatalog for FakeCatalog {
    async fn insert(&self, song: NewSong) -> Result<Song, CatalogError> {
      self.log.lock().unwrap().push(Call::Insert { title: song.title.clone() });
      if self.fail {
        return Err(CatalogError::Backend("insert rejected".to_owned()));
      }
      Ok(Song {
        id: SongId::new(),
        title: song.title,
        author: song.author,
        image_path: song.image_path,
        song_path: song.song_path,
        user_id: song.user_id,
      })
    }

    async fn list(&self) -> Result<Vec<Song>, CatalogError> {
      Ok(vec![])
    }

    async fn search(&self, _query: &str) -> Result<Vec<Song>, CatalogError> {
      Ok(vec![])
    }
  }

  struct FakeNotifier {
    successes: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
  }

  #[async_trait]
  impl Notifier for Arc<FakeNotifier> {
    async fn success(&self, message: &str) {
      self.successes.lock().unwrap().push(message.to_owned());
    }

    async fn error(&self, message: &str) {
      self.errors.lock().unwrap().push(message.to_owned());
    }
  }

  struct FakeRefresh {
    log: Log,
  }

  #[async_trait]
  impl RefreshSignal for FakeRefresh {
    async fn refresh(&self) {
      self.log.lock().unwrap().push(Call::Refresh);
    }
  }

  fn user() -> User {
    User { id: UserId::from_uuid(Uuid::new_v4()), email: Some("ana@example.com".to_owned()) }
  }

  fn complete_form() -> UploadForm {
    UploadForm {
      title: "Luz".to_owned(),
      author: "Ana".to_owned(),
      song: Some(FilePayload::new("luz.mp3", vec![1, 2, 3])),
      image: Some(FilePayload::new("luz.png", vec![4, 5])),
    }
  }

  fn service(
    log: &Log,
    session: Option<User>,
    fail_at: FailAt,
  ) -> (
    UploadService<FakeSession, FakeStorage, FakeCatalog, Arc<FakeNotifier>, FakeRefresh>,
    Arc<FakeNotifier>,
  ) {
    let notifier = Arc::new(FakeNotifier {
      successes: Mutex::new(vec![]),
      errors: Mutex::new(vec![]),
    });
    let svc = UploadService::new(
      FakeSession { user: session },
      FakeStorage { log: log.clone(), fail_at },
      FakeCatalog { log: log.clone(), fail: fail_at == FailAt::Insert },
      notifier.clone(),
      FakeRefresh { log: log.clone() },
      StoragePolicy::default(),
    );
    (svc, notifier)
  }

  fn calls(log: &Log) -> Vec<Call> {
    log.lock().unwrap().clone()
  }

  #[tokio::test]
  async fn missing_song_makes_no_remote_calls() {
    let log: Log = Default::default();
    let (svc, notifier) = service(&log, Some(user()), FailAt::Nothing);

    let mut form = complete_form();
    form.song = None;

    let err = svc.submit(&form).await.unwrap_err();
    assert!(matches!(err, UploadError::MissingFields));
    assert!(calls(&log).is_empty());
    assert_eq!(notifier.errors.lock().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn missing_image_makes_no_remote_calls() {
    let log: Log = Default::default();
    let (svc, _) = service(&log, Some(user()), FailAt::Nothing);

    let mut form = complete_form();
    form.image = None;

    let err = svc.submit(&form).await.unwrap_err();
    assert!(matches!(err, UploadError::MissingFields));
    assert!(calls(&log).is_empty());
  }

  #[tokio::test]
  async fn absent_session_makes_no_storage_calls() {
    let log: Log = Default::default();
    let (svc, _) = service(&log, None, FailAt::Nothing);

    let err = svc.submit(&complete_form()).await.unwrap_err();
    assert!(matches!(err, UploadError::MissingFields));
    assert!(calls(&log).is_empty());
  }

  #[tokio::test]
  async fn successful_submit_runs_steps_in_order() {
    let log: Log = Default::default();
    let (svc, notifier) = service(&log, Some(user()), FailAt::Nothing);

    let song = svc.submit(&complete_form()).await.unwrap();

    let calls = calls(&log);
    assert_eq!(calls.len(), 4);
    assert!(matches!(&calls[0], Call::Upload { bucket, key } if bucket == "songs" && key.starts_with("song-Luz-")));
    assert!(matches!(&calls[1], Call::Upload { bucket, key } if bucket == "images" && key.starts_with("image-Luz-")));
    assert!(matches!(&calls[2], Call::Insert { title } if title == "Luz"));
    assert_eq!(calls[3], Call::Refresh);

    // La fila referencia las rutas confirmadas por el storage.
    assert!(song.song_path.starts_with("songs/song-Luz-"));
    assert!(song.image_path.starts_with("images/image-Luz-"));
    assert_eq!(notifier.successes.lock().unwrap().as_slice(), ["Song created!"]);
    assert!(notifier.errors.lock().unwrap().is_empty());
  }

  #[tokio::test]
  async fn both_object_keys_share_one_upload_id() {
    let log: Log = Default::default();
    let (svc, _) = service(&log, Some(user()), FailAt::Nothing);

    svc.submit(&complete_form()).await.unwrap();

    let calls = calls(&log);
    let song_key = match &calls[0] {
      Call::Upload { key, .. } => key.clone(),
      other => panic!("unexpected call {other:?}"),
    };
    let image_key = match &calls[1] {
      Call::Upload { key, .. } => key.clone(),
      other => panic!("unexpected call {other:?}"),
    };
    let song_uid = song_key.strip_prefix("song-Luz-").unwrap();
    let image_uid = image_key.strip_prefix("image-Luz-").unwrap();
    assert_eq!(song_uid, image_uid);
  }

  #[test]
  fn only_remote_step_errors_carry_a_failed_step() {
    assert_eq!(
      UploadError::SongUpload("x".to_owned()).failed_step(),
      Some(UploadStep::SongUpload)
    );
    assert_eq!(UploadError::MissingFields.failed_step(), None);
    assert_eq!(UploadError::SubmissionInFlight.failed_step(), None);
    // El cajón de sastre de las capas frontera tampoco apunta a un paso.
    assert_eq!(UploadError::Unexpected("boom".to_owned()).failed_step(), None);
  }

  #[tokio::test]
  async fn song_upload_failure_short_circuits() {
    let log: Log = Default::default();
    let (svc, notifier) = service(&log, Some(user()), FailAt::SongBucket);

    let err = svc.submit(&complete_form()).await.unwrap_err();
    assert_eq!(err.failed_step(), Some(UploadStep::SongUpload));

    // Una sola llamada: el intento de subir la canción. Nada que deshacer.
    let calls = calls(&log);
    assert_eq!(calls.len(), 1);
    assert!(matches!(&calls[0], Call::Upload { bucket, .. } if bucket == "songs"));
    assert_eq!(notifier.errors.lock().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn image_upload_failure_rolls_back_song_object() {
    let log: Log = Default::default();
    let (svc, _) = service(&log, Some(user()), FailAt::ImageBucket);

    let err = svc.submit(&complete_form()).await.unwrap_err();
    assert_eq!(err.failed_step(), Some(UploadStep::ImageUpload));

    let calls = calls(&log);
    assert_eq!(calls.len(), 3);
    let song_key = match &calls[0] {
      Call::Upload { key, .. } => key.clone(),
      other => panic!("unexpected call {other:?}"),
    };
    assert!(matches!(&calls[1], Call::Upload { bucket, .. } if bucket == "images"));
    // Se borra exactamente el objeto de canción que se había subido.
    assert_eq!(calls[2], Call::Remove { bucket: "songs".to_owned(), key: song_key });
  }

  #[tokio::test]
  async fn insert_failure_rolls_back_both_objects_in_reverse() {
    let log: Log = Default::default();
    let (svc, _) = service(&log, Some(user()), FailAt::Insert);

    let err = svc.submit(&complete_form()).await.unwrap_err();
    assert_eq!(err.failed_step(), Some(UploadStep::MetadataInsert));

    let calls = calls(&log);
    assert_eq!(calls.len(), 5);
    let (song_key, image_key) = match (&calls[0], &calls[1]) {
      (Call::Upload { key: s, .. }, Call::Upload { key: i, .. }) => (s.clone(), i.clone()),
      other => panic!("unexpected calls {other:?}"),
    };
    assert!(matches!(&calls[2], Call::Insert { .. }));
    assert_eq!(calls[3], Call::Remove { bucket: "images".to_owned(), key: image_key });
    assert_eq!(calls[4], Call::Remove { bucket: "songs".to_owned(), key: song_key });
    // Sin refresh: la vista no tiene nada nuevo que pedir.
    assert!(!calls.contains(&Call::Refresh));
  }
}
