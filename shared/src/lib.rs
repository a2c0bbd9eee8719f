//! Foxtrack Shared Types
//!
//! This crate provides the wire types and the tracking state machine shared
//! between the device agent and the operator controller. Serde renames pin
//! the exact JSON field names the server speaks.

pub mod state_machine;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Timing parameters for the system
pub mod timing {
    /// Interval between invocation polls when nothing is pending
    pub const POLL_INTERVAL_MS: u64 = 2000;

    /// Initial delay before retrying a failed poll
    pub const RECONNECT_DELAY_MS: u64 = 1000;

    /// Maximum retry delay (backoff cap)
    pub const MAX_RECONNECT_DELAY_MS: u64 = 30000;

    /// Per-request HTTP timeout
    pub const HTTP_TIMEOUT_MS: u64 = 10000;
}

/// Errors that can occur when decoding wire payloads
#[derive(Error, Debug)]
pub enum WireError {
    #[error("Empty payload")]
    Empty,

    #[error("Malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Opaque handle for an active location subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchId(u64);

impl WatchId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for WatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single location fix produced by a location source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Body of the agent's `POST /device/location/{id}` report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationReport {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Position> for LocationReport {
    fn from(position: Position) -> Self {
        Self {
            latitude: position.latitude,
            longitude: position.longitude,
        }
    }
}

/// A request to run one registered command on a device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invocation {
    #[serde(rename = "CommandId")]
    pub command_id: i64,

    #[serde(rename = "Arguments", default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Value>,
}

impl Invocation {
    /// Create an invocation with no arguments
    pub fn new(command_id: i64) -> Self {
        Self {
            command_id,
            arguments: None,
        }
    }

    pub fn with_arguments(command_id: i64, arguments: Value) -> Self {
        Self {
            command_id,
            arguments: Some(arguments),
        }
    }

    /// Decode an invocation from a raw response body
    pub fn from_slice(data: &[u8]) -> Result<Self, WireError> {
        if data.is_empty() {
            return Err(WireError::Empty);
        }
        Ok(serde_json::from_slice(data)?)
    }
}

/// Read-only device projection served at each device resource URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSummary {
    #[serde(rename = "Id")]
    pub id: i64,

    #[serde(rename = "Name", default)]
    pub name: String,

    #[serde(rename = "Latitude", default)]
    pub latitude: f64,

    #[serde(rename = "Longitude", default)]
    pub longitude: f64,
}

/// One entry of a device's command list as served by
/// `GET /device/{id}/command`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Description", default)]
    pub description: String,

    #[serde(rename = "Trigger")]
    pub trigger: String,
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub assertion: String,
}

/// Response of a successful `POST /auth/login`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub email: String,
}
