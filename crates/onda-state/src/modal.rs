use std::collections::HashSet;

/// Modales que conoce la aplicación.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalKind {
  Upload,
  Auth,
}

/// Estado abierto/cerrado por modal, como objeto explícito que se pasa por
/// contexto a quien lo necesite.
///
/// Sin exclusión mutua en esta capa: cualquier caller puede abrir cualquier
/// modal independientemente de los demás. Sin persistencia entre recargas.
#[derive(Debug, Clone, Default)]
pub struct ModalStore {
  open: HashSet<ModalKind>,
}

impl ModalStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn open(&mut self, kind: ModalKind) {
    self.open.insert(kind);
  }

  pub fn close(&mut self, kind: ModalKind) {
    self.open.remove(&kind);
  }

  /// Invierte el estado del modal: abierto si estaba cerrado y viceversa.
  pub fn toggle(&mut self, kind: ModalKind) {
    if !self.open.remove(&kind) {
      self.open.insert(kind);
    }
  }

  pub fn is_open(&self, kind: ModalKind) -> bool {
    self.open.contains(&kind)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn open_and_close_track_each_modal() {
    let mut modals = ModalStore::new();
    assert!(!modals.is_open(ModalKind::Upload));

    modals.open(ModalKind::Upload);
    assert!(modals.is_open(ModalKind::Upload));

    modals.close(ModalKind::Upload);
    assert!(!modals.is_open(ModalKind::Upload));
  }

  #[test]
  fn toggle_flips_the_open_state() {
    let mut modals = ModalStore::new();

    modals.toggle(ModalKind::Auth);
    assert!(modals.is_open(ModalKind::Auth));

    modals.toggle(ModalKind::Auth);
    assert!(!modals.is_open(ModalKind::Auth));

    // No arrastra a los demás modales.
    modals.open(ModalKind::Upload);
    modals.toggle(ModalKind::Auth);
    assert!(modals.is_open(ModalKind::Upload));
    assert!(modals.is_open(ModalKind::Auth));
  }

  #[test]
  fn modals_do_not_exclude_each_other() {
    let mut modals = ModalStore::new();
    modals.open(ModalKind::Upload);
    modals.open(ModalKind::Auth);

    assert!(modals.is_open(ModalKind::Upload));
    assert!(modals.is_open(ModalKind::Auth));
  }
}
