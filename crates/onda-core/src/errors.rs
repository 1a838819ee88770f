// crates/onda-core/src/errors.rs
use thiserror::Error;

/// Error del flujo de subida de canciones.
///
/// Las capas superiores (controlador del modal, shell) deberían convertir
/// este error en una notificación transitoria para el usuario; nunca se
/// propaga más arriba como error estructurado.
#[derive(Debug, Error)]
pub enum UploadError {
  /// Falta el archivo de audio, la imagen o la sesión. Con este error
  /// garantizamos que no se hizo ninguna llamada remota.
  #[error("missing fields")]
  MissingFields,

  #[error("song upload failed: {0}")]
  SongUpload(String),

  #[error("image upload failed: {0}")]
  ImageUpload(String),

  #[error("metadata insert failed: {0}")]
  MetadataInsert(String),

  /// Ya hay un envío en curso desde este mismo formulario.
  #[error("a submission is already in flight")]
  SubmissionInFlight,

  /// Cajón de sastre para las capas frontera (shell, adapters). El flujo
  /// en sí nunca lo produce: sus fallos siempre caen en una variante
  /// tipada. Existe para que un caller pueda mapear aquí cualquier fallo
  /// fuera de la taxonomía sin inventarse variantes nuevas.
  #[error("unexpected error: {0}")]
  Unexpected(String),
}
