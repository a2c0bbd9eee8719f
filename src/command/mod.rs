//! Command registry and dispatcher for the device agent

pub mod handlers;

use crate::api::AgentApi;
use anyhow::Result;
use foxtrack_shared::Invocation;
use handlers::HandlerContext;
use tracing::{debug, error, info};

/// Handler variants the registry can dispatch to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    StartTracking,
    StopTracking,
}

/// One entry in the fixed, process-wide command registry
#[derive(Debug, Clone, Copy)]
pub struct CommandEntry {
    pub id: i64,
    pub name: &'static str,
    pub kind: CommandKind,
}

/// The command registry. Registry order is the order ids are advertised to
/// the server; ids are protocol constants shared with the server and must
/// never be renumbered.
pub const COMMANDS: &[CommandEntry] = &[
    CommandEntry {
        id: 0,
        name: "start_tracking",
        kind: CommandKind::StartTracking,
    },
    CommandEntry {
        id: 1,
        name: "stop_tracking",
        kind: CommandKind::StopTracking,
    },
];

/// All registered command ids, in registry order
pub fn command_ids() -> Vec<i64> {
    COMMANDS.iter().map(|entry| entry.id).collect()
}

/// Advertise the full command set to the server.
///
/// Single attempt, no retry; the caller decides what a failure means. The
/// id list is independent of the device context's state.
pub async fn register_commands(api: &dyn AgentApi, device_id: i64) -> Result<()> {
    let ids = command_ids();
    info!("Registering commands {:?} for device {}", ids, device_id);
    api.put_commands(device_id, &ids).await
}

/// Execute one invocation against the registry.
///
/// An id with no registry entry is logged and dropped; callers cannot tell
/// that apart from a successful run. A matched handler reports its own
/// outcome through logging, not through this function.
pub async fn run_command(invocation: &Invocation, ctx: &HandlerContext) {
    let entry = COMMANDS
        .iter()
        .find(|entry| entry.id == invocation.command_id);

    let Some(entry) = entry else {
        error!("Failed to find command for id {}", invocation.command_id);
        return;
    };

    debug!("Running command {} (id={})", entry.name, entry.id);

    match entry.kind {
        CommandKind::StartTracking => {
            handlers::handle_start_tracking(ctx, invocation.arguments.as_ref()).await;
        }
        CommandKind::StopTracking => {
            handlers::handle_stop_tracking(ctx, invocation.arguments.as_ref()).await;
        }
    }
}
