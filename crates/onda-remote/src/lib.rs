mod catalog;
mod client;
mod session;
mod storage;

pub use catalog::RemoteSongCatalog;
pub use client::{RemoteClient, RemoteError};
pub use session::RemoteSession;
pub use storage::RemoteObjectStorage;
