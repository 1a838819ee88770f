pub mod search;
pub mod upload;

pub use search::{SearchResults, SongRow, project};
pub use upload::{StoragePolicy, UploadPhase, UploadService, UploadStep};
