//! Test double for the controller's server seam

use crate::api::DirectoryApi;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use foxtrack_shared::{CommandDescriptor, DeviceSummary};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory stand-in for the server, with switchable failure modes
#[derive(Default)]
pub struct FakeDirectoryApi {
    pub session: Option<String>,
    pub index: Vec<String>,
    pub devices: HashMap<String, DeviceSummary>,
    pub commands: HashMap<i64, Vec<CommandDescriptor>>,
    pub fail_devices: bool,
    pub fail_commands: bool,
    pub fail_logout: bool,
    pub triggered: Mutex<Vec<String>>,
}

impl FakeDirectoryApi {
    /// Build a fake serving the given `(id, name, command names)` devices
    pub fn with_devices(devices: Vec<(i64, &str, Vec<&str>)>) -> Self {
        let mut fake = Self::default();

        for (id, name, command_names) in devices {
            let url = format!("/device/{}", id);
            fake.index.push(url.clone());
            fake.devices.insert(
                url,
                DeviceSummary {
                    id,
                    name: name.to_string(),
                    latitude: 32.0715,
                    longitude: 34.7817,
                },
            );

            let descriptors = command_names
                .into_iter()
                .enumerate()
                .map(|(i, command_name)| CommandDescriptor {
                    name: command_name.to_string(),
                    description: String::new(),
                    trigger: format!("/device/{}/command/{}", id, i),
                })
                .collect();
            fake.commands.insert(id, descriptors);
        }

        fake
    }

    pub fn triggered(&self) -> Vec<String> {
        self.triggered.lock().unwrap().clone()
    }
}

#[async_trait]
impl DirectoryApi for FakeDirectoryApi {
    async fn auth_check(&self) -> Result<Option<String>> {
        Ok(self.session.clone())
    }

    async fn login(&self, _assertion: &str) -> Result<String> {
        self.session
            .clone()
            .ok_or_else(|| anyhow!("Login rejected"))
    }

    async fn logout(&self) -> Result<()> {
        if self.fail_logout {
            return Err(anyhow!("Logout failed"));
        }
        Ok(())
    }

    async fn device_index(&self) -> Result<Vec<String>> {
        Ok(self.index.clone())
    }

    async fn device(&self, url: &str) -> Result<DeviceSummary> {
        if self.fail_devices {
            return Err(anyhow!("Failed to fetch {}", url));
        }
        self.devices
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("No such device: {}", url))
    }

    async fn device_commands(&self, device_id: i64) -> Result<Vec<CommandDescriptor>> {
        if self.fail_commands {
            return Err(anyhow!("Failed to fetch commands for {}", device_id));
        }
        self.commands
            .get(&device_id)
            .cloned()
            .ok_or_else(|| anyhow!("No such device: {}", device_id))
    }

    async fn trigger(&self, url: &str) -> Result<()> {
        self.triggered.lock().unwrap().push(url.to_string());
        Ok(())
    }
}
