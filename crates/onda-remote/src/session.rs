use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::client::RemoteClient;
use onda_core::domain::ids::UserId;
use onda_core::ports::session::{SessionProvider, User};

#[derive(Debug, Deserialize)]
struct UserDto {
  id: Uuid,
  email: Option<String>,
}

/// Adapter de sesión: consulta el endpoint de auth del backend.
///
/// Cualquier fallo (red caída, 401, respuesta corrupta) se trata como
/// ausencia de sesión; este port no tiene canal de error hacia el dominio.
pub struct RemoteSession {
  client: RemoteClient,
}

impl RemoteSession {
  pub fn new(client: RemoteClient) -> Self {
    Self { client }
  }
}

#[async_trait]
impl SessionProvider for RemoteSession {
  async fn current_user(&self) -> Option<User> {
    let url = self.client.url("/auth/v1/user");

    let res = match self.client.http().get(url).send().await {
      Ok(res) => res,
      Err(e) => {
        debug!(error = %e, "session lookup failed");
        return None;
      }
    };

    if !res.status().is_success() {
      return None;
    }

    match res.json::<UserDto>().await {
      Ok(dto) => Some(User { id: UserId::from_uuid(dto.id), email: dto.email }),
      Err(e) => {
        debug!(error = %e, "session payload decode failed");
        None
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn user_payload_decodes_with_optional_email() {
    let dto: UserDto =
      serde_json::from_str(r#"{ "id": "0e3f7c5a-2b4d-4f6e-8a9b-1c2d3e4f5a6b" }"#).unwrap();
    assert!(dto.email.is_none());

    let dto: UserDto = serde_json::from_str(
      r#"{ "id": "0e3f7c5a-2b4d-4f6e-8a9b-1c2d3e4f5a6b", "email": "ana@example.com" }"#,
    )
    .unwrap();
    assert_eq!(dto.email.as_deref(), Some("ana@example.com"));
  }
}
