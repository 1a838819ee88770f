use onda_core::domain::ids::SongId;

/// Estado del reproductor: pista actual + cola ordenada de ids.
///
/// Se muta solo a través del gate de reproducción (o de los controles de
/// reproducción del frontend); el resto de la aplicación lo lee. Sin
/// persistencia ni sincronización entre pestañas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerStore {
  current: Option<SongId>,
  queue: Vec<SongId>,
}

impl PlayerStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn current(&self) -> Option<SongId> {
    self.current
  }

  pub fn queue(&self) -> &[SongId] {
    &self.queue
  }

  pub fn play(&mut self, id: SongId) {
    self.current = Some(id);
  }

  /// Reemplaza la cola completa. El orden de entrada se respeta tal cual.
  pub fn set_queue(&mut self, ids: Vec<SongId>) {
    self.queue = ids;
  }

  pub fn clear(&mut self) {
    self.current = None;
    self.queue.clear();
  }
}
