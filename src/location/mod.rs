//! Location sources - the seam in front of the platform geolocation facility

mod simulated;

pub use simulated::SimulatedLocationSource;

use anyhow::Result;
use async_trait::async_trait;
use foxtrack_shared::{Position, WatchId};
use tokio::sync::mpsc;

/// A continuous location update stream with cancellable subscriptions
#[async_trait]
pub trait LocationSource: Send + Sync {
    /// Start a watch. Updates are delivered to `sink` until the watch is
    /// cleared; clearing closes the sink.
    async fn watch(&self, sink: mpsc::Sender<Position>) -> Result<WatchId>;

    /// Cancel an active watch
    async fn clear(&self, watch_id: WatchId) -> Result<()>;
}
