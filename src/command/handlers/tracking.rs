//! Tracking command handlers (start, stop)

use super::HandlerContext;
use foxtrack_shared::state_machine::TrackingTransition;
use foxtrack_shared::LocationReport;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// Handle START_TRACKING (command id 0)
///
/// Idempotent: a start while a watch is already active is a no-op and keeps
/// the original subscription handle. Each position update fires a location
/// report; report failures are logged and otherwise ignored.
pub async fn handle_start_tracking(ctx: &HandlerContext, _arguments: Option<&Value>) {
    let mut tracking = ctx.tracking.write().await;

    if tracking.state().is_tracking() {
        debug!("Already tracking, ignoring start");
        return;
    }

    let (tx, mut rx) = mpsc::channel(16);

    let watch_id = match ctx.source.watch(tx).await {
        Ok(watch_id) => watch_id,
        Err(e) => {
            error!("Failed to start location watch: {}", e);
            return;
        }
    };

    tracking.record_start(watch_id);
    info!("Tracking started (watch {})", watch_id);

    // Forward updates until the source closes the channel
    let api = ctx.api.clone();
    let device_id = ctx.device_id;
    tokio::spawn(async move {
        while let Some(position) = rx.recv().await {
            debug!(
                "Updating location to ({}, {})",
                position.latitude, position.longitude
            );

            let report = LocationReport::from(position);
            if let Err(e) = api.post_location(device_id, &report).await {
                error!("Failed to report location: {}", e);
            }
        }
    });
}

/// Handle STOP_TRACKING (command id 1)
///
/// Idempotent: a stop while idle is a no-op.
pub async fn handle_stop_tracking(ctx: &HandlerContext, _arguments: Option<&Value>) {
    let mut tracking = ctx.tracking.write().await;

    let watch_id = match tracking.record_stop() {
        TrackingTransition::Stopped(watch_id) => watch_id,
        _ => {
            debug!("Not tracking, ignoring stop");
            return;
        }
    };

    if let Err(e) = ctx.source.clear(watch_id).await {
        error!("Failed to clear location watch {}: {}", watch_id, e);
    }

    info!("Tracking stopped (watch {})", watch_id);
}
