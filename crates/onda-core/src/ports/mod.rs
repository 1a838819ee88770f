pub mod catalog;
pub mod notify;
pub mod session;
pub mod storage;

pub use catalog::{CatalogError, SongCatalog};
pub use notify::{Notifier, RefreshSignal};
pub use session::{SessionProvider, User};
pub use storage::{ObjectStorage, StorageError, StoredObject, UploadOptions};
