use onda_config::StorageConfig;
use onda_core::services::upload::StoragePolicy;

/// Maps the persisted storage section onto the policy object the upload
/// service consumes.
pub fn storage_policy(cfg: &StorageConfig) -> StoragePolicy {
  StoragePolicy {
    song_bucket: cfg.song_bucket.clone(),
    image_bucket: cfg.image_bucket.clone(),
    cache_control_secs: cfg.cache_control_secs,
  }
}
