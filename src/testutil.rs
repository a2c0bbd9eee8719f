//! Test doubles for the agent's external seams

use crate::api::AgentApi;
use crate::location::LocationSource;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use foxtrack_shared::{Invocation, LocationReport, Position, WatchId};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tokio::sync::mpsc;

/// One recorded outbound server call
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    PutCommands {
        device_id: i64,
        command_ids: Vec<i64>,
    },
    PostLocation {
        device_id: i64,
        latitude: f64,
        longitude: f64,
    },
    PollInvocation {
        device_id: i64,
    },
}

/// Records every call and succeeds; polls return nothing pending
#[derive(Default)]
pub struct RecordingApi {
    calls: Mutex<Vec<ApiCall>>,
}

impl RecordingApi {
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl AgentApi for RecordingApi {
    async fn put_commands(&self, device_id: i64, command_ids: &[i64]) -> Result<()> {
        self.record(ApiCall::PutCommands {
            device_id,
            command_ids: command_ids.to_vec(),
        });
        Ok(())
    }

    async fn post_location(&self, device_id: i64, report: &LocationReport) -> Result<()> {
        self.record(ApiCall::PostLocation {
            device_id,
            latitude: report.latitude,
            longitude: report.longitude,
        });
        Ok(())
    }

    async fn poll_invocation(&self, device_id: i64) -> Result<Option<Invocation>> {
        self.record(ApiCall::PollInvocation { device_id });
        Ok(None)
    }
}

/// Replays a scripted sequence of poll outcomes; other calls succeed
#[derive(Default)]
pub struct ScriptedApi {
    script: Mutex<VecDeque<Result<Option<Invocation>>>>,
}

impl ScriptedApi {
    pub fn push(&self, outcome: Result<Option<Invocation>>) {
        self.script.lock().unwrap().push_back(outcome);
    }
}

#[async_trait]
impl AgentApi for ScriptedApi {
    async fn put_commands(&self, _device_id: i64, _command_ids: &[i64]) -> Result<()> {
        Ok(())
    }

    async fn post_location(&self, _device_id: i64, _report: &LocationReport) -> Result<()> {
        Ok(())
    }

    async fn poll_invocation(&self, _device_id: i64) -> Result<Option<Invocation>> {
        match self.script.lock().unwrap().pop_front() {
            Some(outcome) => outcome,
            None => Ok(None),
        }
    }
}

/// Hands out watch ids and lets tests push positions into active sinks
#[derive(Default)]
pub struct FakeLocationSource {
    next_watch_id: AtomicU64,
    watches_created: AtomicU64,
    sinks: tokio::sync::Mutex<HashMap<WatchId, mpsc::Sender<Position>>>,
    cleared: Mutex<Vec<WatchId>>,
}

impl FakeLocationSource {
    /// Total number of subscriptions ever created
    pub fn watch_count(&self) -> usize {
        self.watches_created.load(Ordering::SeqCst) as usize
    }

    pub fn cleared(&self) -> Vec<WatchId> {
        self.cleared.lock().unwrap().clone()
    }

    pub fn cleared_count(&self) -> usize {
        self.cleared.lock().unwrap().len()
    }

    /// Deliver a position update to every active watch
    pub async fn emit(&self, position: Position) {
        for sink in self.sinks.lock().await.values() {
            let _ = sink.send(position).await;
        }
    }
}

#[async_trait]
impl LocationSource for FakeLocationSource {
    async fn watch(&self, sink: mpsc::Sender<Position>) -> Result<WatchId> {
        let watch_id = WatchId::new(self.next_watch_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.watches_created.fetch_add(1, Ordering::SeqCst);
        self.sinks.lock().await.insert(watch_id, sink);
        Ok(watch_id)
    }

    async fn clear(&self, watch_id: WatchId) -> Result<()> {
        self.sinks
            .lock()
            .await
            .remove(&watch_id)
            .ok_or_else(|| anyhow!("Unknown watch id {}", watch_id))?;
        self.cleared.lock().unwrap().push(watch_id);
        Ok(())
    }
}
