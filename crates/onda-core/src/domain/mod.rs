pub mod ids;
pub mod song;
pub mod upload;

pub use ids::{SongId, UploadId, UserId};
pub use song::{NewSong, Song};
pub use upload::{FilePayload, UploadForm};
