use crate::domain::ids::UserId;
use serde::{Deserialize, Serialize};

/// Usuario autenticado tal como lo expone el proveedor de sesión.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
  pub id: UserId,
  pub email: Option<String>,
}

/// Port de lectura de sesión.
///
/// El adapter decide de dónde sale la sesión (servicio de auth remoto,
/// token cacheado, fake en tests). Desde el dominio solo importa si hay
/// usuario o no; la sesión es de solo lectura en esta capa.
#[async_trait::async_trait]
pub trait SessionProvider: Send + Sync {
  async fn current_user(&self) -> Option<User>;
}
