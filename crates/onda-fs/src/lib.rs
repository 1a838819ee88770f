mod io;
mod object_store;

pub use io::atomic_write_str;
pub use object_store::FsObjectStorage;
