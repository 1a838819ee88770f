use crate::modal::{ModalKind, ModalStore};
use onda_core::domain::song::Song;
use onda_core::domain::upload::UploadForm;
use onda_core::errors::UploadError;
use onda_core::ports::{Notifier, ObjectStorage, RefreshSignal, SessionProvider, SongCatalog};
use onda_core::services::upload::UploadService;
use tracing::debug;

/// Controlador del modal de subida.
///
/// Dueño del formulario transitorio y del flag `submitting` que bloquea
/// reenvíos mientras hay un envío en vuelo desde este mismo formulario. No
/// protege contra carreras entre clientes distintos.
#[derive(Debug, Default)]
pub struct UploadController {
  form: UploadForm,
  submitting: bool,
}

impl UploadController {
  pub fn new() -> Self {
    Self::default()
  }

  /// Acceso de escritura para la captura de campos del formulario.
  pub fn form_mut(&mut self) -> &mut UploadForm {
    &mut self.form
  }

  pub fn form(&self) -> &UploadForm {
    &self.form
  }

  pub fn is_submitting(&self) -> bool {
    self.submitting
  }

  /// Envía el formulario a través del servicio.
  ///
  /// En éxito limpia el formulario y cierra el modal de subida; en fallo
  /// conserva ambos para que el usuario reintente. El servicio ya notificó
  /// al usuario en los dos casos.
  pub async fn submit<Se, St, Ca, No, Rf>(
    &mut self,
    service: &UploadService<Se, St, Ca, No, Rf>,
    modals: &mut ModalStore,
  ) -> Result<Song, UploadError>
  where
    Se: SessionProvider,
    St: ObjectStorage,
    Ca: SongCatalog,
    No: Notifier,
    Rf: RefreshSignal,
  {
    if self.submitting {
      debug!("submit ignored, another submission is in flight");
      return Err(UploadError::SubmissionInFlight);
    }
    self.submitting = true;

    let result = service.submit(&self.form).await;
    self.submitting = false;

    if result.is_ok() {
      self.form.reset();
      modals.close(ModalKind::Upload);
    }

    result
  }

  /// Cierre manual del modal: también descarta el formulario a medias.
  pub fn dismiss(&mut self, modals: &mut ModalStore) {
    self.form.reset();
    modals.close(ModalKind::Upload);
  }

  #[cfg(test)]
  fn set_submitting(&mut self, value: bool) {
    self.submitting = value;
  }
}
