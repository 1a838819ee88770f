mod config;
pub mod infrastructure;

use onda_config::{API_SECTION, ApiConfig, CONFIG_BACKEND, STORAGE_SECTION, StorageConfig};
use onda_core::services::upload::UploadService;
use onda_remote::{RemoteClient, RemoteObjectStorage, RemoteSession, RemoteSongCatalog};
use tokio::sync::broadcast;

use infrastructure::reporter::{BroadcastRefresh, TracingNotifier};

pub use config::storage_policy;

/// Type alias to simplify the generic signature of the service.
pub type ConcreteUploadService =
  UploadService<RemoteSession, RemoteObjectStorage, RemoteSongCatalog, TracingNotifier, BroadcastRefresh>;

/// Builds the fully wired upload service from the on-disk configuration.
///
/// Returns the service plus a receiver on which view tasks get one tick per
/// committed upload, so they know to re-fetch their data.
pub fn build_upload_service() -> anyhow::Result<(ConcreteUploadService, broadcast::Receiver<()>)> {
  // --- Dependency Injection Phase ---

  // 1. Configuration (missing file or sections fall back to defaults)
  let api: ApiConfig = CONFIG_BACKEND.load_section_with_default(API_SECTION)?;
  let storage_cfg: StorageConfig = CONFIG_BACKEND.load_section_with_default(STORAGE_SECTION)?;

  // 2. Shared transport (base URL + auth headers)
  let client = RemoteClient::new(&api)?;

  // 3. Port adapters over the shared transport
  let session = RemoteSession::new(client.clone());
  let storage = RemoteObjectStorage::new(client.clone());
  let catalog = RemoteSongCatalog::new(client);

  // 4. Output port adapters (user feedback + view refresh fan-out)
  let notifier = TracingNotifier::new();
  let (refresh, refresh_rx) = BroadcastRefresh::new();

  // 5. Service wiring
  let service =
    UploadService::new(session, storage, catalog, notifier, refresh, storage_policy(&storage_cfg));

  Ok((service, refresh_rx))
}

#[cfg(test)]
mod tests {
  use super::*;

  // PATHS se resuelve una sola vez por proceso; este es el único test que
  // lo toca, así que fijar el override aquí es seguro.
  #[test]
  fn wiring_builds_from_default_config() {
    let tmp = tempfile::tempdir().unwrap();
    unsafe { std::env::set_var("ONDA_BASE_DIR", tmp.path()) };

    let (service, _refresh_rx) = build_upload_service().unwrap();
    let _: &ConcreteUploadService = &service;

    unsafe { std::env::remove_var("ONDA_BASE_DIR") };
  }
}
