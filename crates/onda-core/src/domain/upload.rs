/// Contenido binario capturado del formulario (nombre + bytes).
#[derive(Debug, Clone, PartialEq)]
pub struct FilePayload {
  pub filename: String,
  pub bytes: Vec<u8>,
}

impl FilePayload {
  pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
    Self { filename: filename.into(), bytes }
  }
}

/// Valores transitorios del formulario de subida.
///
/// Viven lo que dura un envío: en éxito el controlador los descarta, en
/// fallo se conservan para que el usuario pueda reintentar sin reescribir.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadForm {
  pub title: String,
  pub author: String,
  pub song: Option<FilePayload>,
  pub image: Option<FilePayload>,
}

impl UploadForm {
  /// Vuelve al estado vacío inicial.
  pub fn reset(&mut self) {
    *self = Self::default();
  }
}
