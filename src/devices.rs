//! `docflow devices …`: scanners attached to Windows app instances.

#[cfg(test)]
#[path = "devices_test.rs"]
mod devices_test;

use clap::Subcommand;
use records::RecordId;
use records::resources::{ScanningDevice, WindowsAppInstance, choose_device};
use serde_json::{Value, json};
use tracing::info;

use crate::api::RestClient;
use crate::error::ConsoleError;
use crate::output::print_table;

#[derive(Subcommand, Debug)]
pub enum DevicesCommand {
    /// Devices of one app instance.
    List { instance_id: RecordId },
    /// Every device known across instances.
    Available,
    /// Make `device_id` the instance's only chosen device.
    Choose { instance_id: RecordId, device_id: RecordId },
}

/// # Errors
///
/// Transport and server failures; [`ConsoleError::NotFound`] for a device
/// the instance does not report.
pub async fn run(client: &RestClient, command: DevicesCommand) -> Result<(), ConsoleError> {
    let devices = match command {
        DevicesCommand::List { instance_id } => client.list(&WindowsAppInstance::devices_path(instance_id)).await?,
        DevicesCommand::Available => client.list(WindowsAppInstance::AVAILABLE_DEVICES_PATH).await?,
        DevicesCommand::Choose { instance_id, device_id } => choose(client, instance_id, device_id).await?,
    };
    let rows: Vec<&ScanningDevice> = devices.iter().collect();
    print_table(&rows);
    Ok(())
}

/// Choose a device, checking locally that the instance reports it.
///
/// # Errors
///
/// [`ConsoleError::NotFound`] before any write when `device_id` is unknown.
pub async fn choose(
    client: &RestClient,
    instance_id: RecordId,
    device_id: RecordId,
) -> Result<Vec<ScanningDevice>, ConsoleError> {
    let path = WindowsAppInstance::devices_path(instance_id);
    let mut devices: Vec<ScanningDevice> = client.list(&path).await?;
    if !choose_device(&mut devices, device_id) {
        return Err(ConsoleError::NotFound(device_id));
    }
    client.put::<_, Value>(&path, &json!({ "device_id": device_id })).await?;
    info!(instance_id, device_id, "device chosen");
    Ok(devices)
}
