use serde::{Deserialize, Serialize};

pub const API_SECTION: &str = "api";
pub const STORAGE_SECTION: &str = "storage";

/// Sección `[api]`: dónde vive el backend-as-a-service y con qué clave
/// pública se habla con él.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
  pub base_url: String,
  pub anon_key: String,
}

impl Default for ApiConfig {
  fn default() -> Self {
    // Puerto por defecto del stack local de desarrollo.
    Self { base_url: "http://localhost:54321".to_owned(), anon_key: String::new() }
  }
}

/// Sección `[storage]`: buckets de binarios y pista de caché que se envía
/// con cada subida.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
  pub song_bucket: String,
  pub image_bucket: String,
  pub cache_control_secs: u32,
}

impl Default for StorageConfig {
  fn default() -> Self {
    Self {
      song_bucket: "songs".to_owned(),
      image_bucket: "images".to_owned(),
      cache_control_secs: 3600,
    }
  }
}
