//! Interval-driven simulated location source
//!
//! Stands in for a real geolocation facility during development: each watch
//! emits a position that drifts away from the configured origin on a fixed
//! interval.

use super::LocationSource;
use crate::config::SimulationConfig;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use foxtrack_shared::{Position, WatchId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

pub struct SimulatedLocationSource {
    config: SimulationConfig,
    next_watch_id: AtomicU64,
    watches: Mutex<HashMap<WatchId, JoinHandle<()>>>,
}

impl SimulatedLocationSource {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            next_watch_id: AtomicU64::new(0),
            watches: Mutex::new(HashMap::new()),
        }
    }

    /// Number of currently active watches
    pub async fn active_watches(&self) -> usize {
        self.watches.lock().await.len()
    }
}

#[async_trait]
impl LocationSource for SimulatedLocationSource {
    async fn watch(&self, sink: mpsc::Sender<Position>) -> Result<WatchId> {
        let watch_id = WatchId::new(self.next_watch_id.fetch_add(1, Ordering::SeqCst) + 1);
        let config = self.config.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(config.update_interval);
            let mut position = Position::new(config.origin_latitude, config.origin_longitude);

            loop {
                ticker.tick().await;

                position.latitude += config.drift_degrees;
                position.longitude += config.drift_degrees / 2.0;

                if sink.send(position).await.is_err() {
                    // Receiver gone, nothing left to report to
                    return;
                }
            }
        });

        self.watches.lock().await.insert(watch_id, handle);
        Ok(watch_id)
    }

    async fn clear(&self, watch_id: WatchId) -> Result<()> {
        let handle = self
            .watches
            .lock()
            .await
            .remove(&watch_id)
            .ok_or_else(|| anyhow!("Unknown watch id {}", watch_id))?;

        handle.abort();
        Ok(())
    }
}
