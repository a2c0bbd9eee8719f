//! Invocation polling loop with reconnect backoff
//!
//! The server's delivery channel for invocations is client-initiated: the
//! agent polls `GET /device/{id}/invocation` and backs off exponentially on
//! transport failures, resetting once a poll succeeds.

use crate::api::AgentApi;
use crate::config::AgentConfig;
use foxtrack_shared::Invocation;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Events emitted by the invocation poller
#[derive(Debug)]
pub enum PollEvent {
    /// One pending invocation fetched from the server
    Received(Invocation),
    /// Poll attempt failed; the loop backs off and retries
    Failed { reason: String },
}

/// Owns the background polling task
pub struct InvocationPoller {
    event_rx: mpsc::Receiver<PollEvent>,
}

impl InvocationPoller {
    /// Start the polling loop
    pub fn start(config: AgentConfig, api: Arc<dyn AgentApi>) -> Self {
        let (event_tx, event_rx) = mpsc::channel(100);

        tokio::spawn(async move {
            poll_loop(config, api, event_tx).await;
        });

        Self { event_rx }
    }

    /// Receive the next poll event
    pub async fn recv(&mut self) -> Option<PollEvent> {
        self.event_rx.recv().await
    }
}

async fn poll_loop(config: AgentConfig, api: Arc<dyn AgentApi>, event_tx: mpsc::Sender<PollEvent>) {
    let mut backoff = config.reconnect_delay;

    loop {
        match api.poll_invocation(config.device_id).await {
            Ok(Some(invocation)) => {
                backoff = config.reconnect_delay;
                if event_tx.send(PollEvent::Received(invocation)).await.is_err() {
                    return;
                }
                // Drain further pending invocations without waiting out the
                // poll interval
            }
            Ok(None) => {
                backoff = config.reconnect_delay;
                tokio::time::sleep(config.poll_interval).await;
            }
            Err(e) => {
                if event_tx
                    .send(PollEvent::Failed {
                        reason: e.to_string(),
                    })
                    .await
                    .is_err()
                {
                    return;
                }

                tokio::time::sleep(backoff).await;
                backoff = std::cmp::min(backoff * 2, config.max_reconnect_delay);
            }
        }
    }
}
