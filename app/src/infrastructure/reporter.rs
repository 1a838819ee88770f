use async_trait::async_trait;
use onda_core::ports::{Notifier, RefreshSignal};
use tokio::sync::broadcast;
use tracing::{error, info};

/// A `Notifier` implementation that surfaces transient messages as tracing
/// events. A real frontend would swap this for its toast surface.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
  pub fn new() -> Self {
    Self
  }
}

#[async_trait]
impl Notifier for TracingNotifier {
  async fn success(&self, message: &str) {
    info!(target: "onda::notify", "{message}");
  }

  async fn error(&self, message: &str) {
    error!(target: "onda::notify", "{message}");
  }
}

/// `RefreshSignal` fan-out over a broadcast channel.
///
/// View tasks subscribe and re-fetch their backing data on every tick. The
/// signal carries no payload on purpose.
#[derive(Debug, Clone)]
pub struct BroadcastRefresh {
  tx: broadcast::Sender<()>,
}

impl BroadcastRefresh {
  pub fn new() -> (Self, broadcast::Receiver<()>) {
    let (tx, rx) = broadcast::channel(16);
    (Self { tx }, rx)
  }

  pub fn subscribe(&self) -> broadcast::Receiver<()> {
    self.tx.subscribe()
  }
}

#[async_trait]
impl RefreshSignal for BroadcastRefresh {
  async fn refresh(&self) {
    // No receivers is fine; the signal is fire-and-forget.
    let _ = self.tx.send(());
  }
}
