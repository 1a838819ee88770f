pub mod modal;
pub mod play;
pub mod player;
pub mod upload;

pub use modal::{ModalKind, ModalStore};
pub use play::PlayRequest;
pub use player::PlayerStore;
pub use upload::UploadController;
