//! Device table assembly - the two-level device/command fetch

use crate::api::DirectoryApi;
use anyhow::{anyhow, Result};
use foxtrack_shared::{CommandDescriptor, DeviceSummary};
use futures::future::try_join_all;
use std::future::Future;

/// One renderable row of the device table
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceRow {
    /// Zero-based display index
    pub index: usize,
    /// Set on the first row only; drives the default-selection marker
    pub first: bool,
    pub summary: DeviceSummary,
    pub commands: Vec<CommandDescriptor>,
}

/// Run all requests concurrently and resolve to exactly N results in request
/// order, for any N. Fails fast if any request fails; partial successes are
/// discarded.
pub async fn join_all_ordered<T, F>(requests: Vec<F>) -> Result<Vec<T>>
where
    F: Future<Output = Result<T>>,
{
    try_join_all(requests).await
}

/// Fetch the full device table: the device index, then every device, then
/// every device's command list. All-or-nothing; any failure discards the
/// whole table.
pub async fn fetch_device_table(api: &dyn DirectoryApi) -> Result<Vec<DeviceRow>> {
    let index = api.device_index().await?;

    let devices =
        join_all_ordered(index.iter().map(|url| api.device(url)).collect()).await?;

    let commands = join_all_ordered(
        devices
            .iter()
            .map(|device| api.device_commands(device.id))
            .collect(),
    )
    .await?;

    Ok(devices
        .into_iter()
        .zip(commands)
        .enumerate()
        .map(|(index, (summary, commands))| DeviceRow {
            index,
            first: index == 0,
            summary,
            commands,
        })
        .collect())
}

/// Trigger one command on a device: fetch its command list, select the
/// descriptor at `index`, and POST that trigger URL. Returns the command
/// name for display.
pub async fn trigger_command(
    api: &dyn DirectoryApi,
    device_id: i64,
    index: usize,
) -> Result<String> {
    let commands = api.device_commands(device_id).await?;
    let descriptor = commands
        .get(index)
        .ok_or_else(|| anyhow!("Device {} has no command at index {}", device_id, index))?;

    api.trigger(&descriptor.trigger).await?;
    Ok(descriptor.name.clone())
}
