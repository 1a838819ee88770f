pub mod reporter;

pub use reporter::{BroadcastRefresh, TracingNotifier};
