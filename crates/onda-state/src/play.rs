use crate::modal::{ModalKind, ModalStore};
use crate::player::PlayerStore;
use onda_core::domain::ids::SongId;
use onda_core::domain::song::Song;
use onda_core::ports::SessionProvider;
use tracing::debug;

/// Gate de reproducción.
///
/// Sin sesión, pedir una canción abre el modal de auth y no toca el
/// reproductor. Con sesión, fija la pista actual y reemplaza la cola con
/// las canciones candidatas de la vista, en su orden original. Ninguna
/// llamada remota más allá de la lectura de sesión.
pub struct PlayRequest<Se: SessionProvider> {
  session: Se,
}

impl<Se: SessionProvider> PlayRequest<Se> {
  pub fn new(session: Se) -> Self {
    Self { session }
  }

  pub async fn on_play(
    &self,
    id: SongId,
    songs: &[Song],
    player: &mut PlayerStore,
    modals: &mut ModalStore,
  ) {
    if self.session.current_user().await.is_none() {
      debug!(%id, "play request without session, prompting auth");
      modals.open(ModalKind::Auth);
      return;
    }

    player.play(id);
    player.set_queue(songs.iter().map(|song| song.id).collect());
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use async_trait::async_trait;
  use onda_core::domain::ids::UserId;
  use onda_core::ports::session::User;
  use uuid::Uuid;

  struct FakeSession {
    user: Option<User>,
  }

  #[async_trait]
  impl SessionProvider for FakeSession {
    async fn current_user(&self) -> Option<User> {
      self.user.clone()
    }
  }

  fn song(id: SongId) -> Song {
    Song {
      id,
      title: "t".to_owned(),
      author: "a".to_owned(),
      image_path: "images/i".to_owned(),
      song_path: "songs/s".to_owned(),
      user_id: UserId::from_uuid(Uuid::new_v4()),
    }
  }

  #[tokio::test]
  async fn without_session_opens_auth_and_leaves_player_untouched() {
    let gate = PlayRequest::new(FakeSession { user: None });
    let mut player = PlayerStore::new();
    let mut modals = ModalStore::new();
    let id = SongId::new();

    gate.on_play(id, &[song(id)], &mut player, &mut modals).await;

    assert_eq!(player, PlayerStore::new());
    assert!(modals.is_open(ModalKind::Auth));
  }

  #[tokio::test]
  async fn with_session_sets_current_and_replaces_queue_in_order() {
    let user = User { id: UserId::from_uuid(Uuid::new_v4()), email: None };
    let gate = PlayRequest::new(FakeSession { user: Some(user) });
    let mut player = PlayerStore::new();
    let mut modals = ModalStore::new();

    let (s1, s2, s3) = (SongId::new(), SongId::new(), SongId::new());
    let songs = vec![song(s1), song(s2), song(s3)];

    gate.on_play(s3, &songs, &mut player, &mut modals).await;

    assert_eq!(player.current(), Some(s3));
    assert_eq!(player.queue(), [s1, s2, s3]);
    assert!(!modals.is_open(ModalKind::Auth));
  }
}
