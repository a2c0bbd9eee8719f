//! Command handlers for the registered command set

mod tracking;

pub use tracking::{handle_start_tracking, handle_stop_tracking};

use crate::api::AgentApi;
use crate::location::LocationSource;
use foxtrack_shared::state_machine::TrackingStateMachine;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Context passed to command handlers
#[derive(Clone)]
pub struct HandlerContext {
    /// Stable device identifier, used in server URLs
    pub device_id: i64,
    /// Tracking state of this device context
    pub tracking: Arc<RwLock<TrackingStateMachine>>,
    /// Server API for outbound calls
    pub api: Arc<dyn AgentApi>,
    /// Location update source
    pub source: Arc<dyn LocationSource>,
}

impl HandlerContext {
    pub fn new(device_id: i64, api: Arc<dyn AgentApi>, source: Arc<dyn LocationSource>) -> Self {
        Self {
            device_id,
            tracking: Arc::new(RwLock::new(TrackingStateMachine::new())),
            api,
            source,
        }
    }
}
