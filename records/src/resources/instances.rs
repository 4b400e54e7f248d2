use serde::{Deserialize, Serialize};

use super::AppMode;
use crate::RecordId;
use crate::form::{FieldKind, FieldSpec, FormValues};
use crate::resource::{Resource, Row, or_dash, yes_no};
use crate::validation::{ValidationErrors, choice, positive, require};

/// Scanner reported by a Windows agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanningDevice {
    pub id: RecordId,
    pub device_name: String,
    #[serde(default)]
    pub chosen: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_instance_id: Option<RecordId>,
}

/// Remote agent that scans and submits documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowsAppInstance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub title: String,
    #[serde(default)]
    pub location: String,
    pub machine_id: String,
    #[serde(default)]
    pub mode: AppMode,
    /// Seconds between polls.
    pub polling_frequency: u32,
    /// Managed through the device chooser, never through the form.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub devices: Vec<ScanningDevice>,
}

const INSTANCE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("title", "Title", FieldKind::Text).required(),
    FieldSpec::new("location", "Location", FieldKind::Text),
    FieldSpec::new("machine_id", "Machine ID", FieldKind::Text).required(),
    FieldSpec::new("mode", "Mode", FieldKind::Select(AppMode::OPTIONS)).required(),
    FieldSpec::new("polling_frequency", "Polling frequency (s)", FieldKind::Number).required(),
];

impl WindowsAppInstance {
    /// Every device known across instances.
    pub const AVAILABLE_DEVICES_PATH: &'static str = "/api/windows-app-instance/available-devices";

    /// Devices of one instance; `PUT` with `{ "device_id": … }` chooses one.
    #[must_use]
    pub fn devices_path(id: RecordId) -> String {
        format!("/api/available-device/app-instance/{id}")
    }

    #[must_use]
    pub fn chosen_device(&self) -> Option<&ScanningDevice> {
        self.devices.iter().find(|d| d.chosen)
    }
}

/// Mark `device_id` as the only chosen device. Returns `false` when the id is unknown
/// and leaves `devices` untouched.
pub fn choose_device(devices: &mut [ScanningDevice], device_id: RecordId) -> bool {
    if !devices.iter().any(|d| d.id == device_id) {
        return false;
    }
    for device in devices {
        device.chosen = device.id == device_id;
    }
    true
}

impl Row for ScanningDevice {
    fn columns() -> &'static [&'static str] {
        &["ID", "Device", "Instance", "Chosen"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.device_name.clone(),
            or_dash(self.app_instance_id),
            yes_no(self.chosen),
        ]
    }
}

impl Row for WindowsAppInstance {
    fn columns() -> &'static [&'static str] {
        &["Title", "Location", "Machine", "Mode", "Polling (s)", "Device"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.location.clone(),
            self.machine_id.clone(),
            self.mode.label().to_owned(),
            self.polling_frequency.to_string(),
            self.chosen_device()
                .map_or_else(|| "-".to_owned(), |d| d.device_name.clone()),
        ]
    }

    fn category(&self) -> Option<&'static str> {
        Some(self.mode.as_str())
    }

    fn filter_options() -> &'static [(&'static str, &'static str)] {
        AppMode::OPTIONS
    }
}

impl Resource for WindowsAppInstance {
    const ENDPOINT: &'static str = "/api/windows-app-instance";
    const TITLE: &'static str = "Windows app instances";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn fields() -> &'static [FieldSpec] {
        INSTANCE_FIELDS
    }

    fn to_form(&self) -> FormValues {
        FormValues::default()
            .with_text("title", &self.title)
            .with_text("location", &self.location)
            .with_text("machine_id", &self.machine_id)
            .with_text("mode", self.mode.as_str())
            .with_text("polling_frequency", self.polling_frequency.to_string())
    }

    fn from_form(id: Option<RecordId>, form: &FormValues) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mode = choice(&mut errors, "mode", form.text("mode"), AppMode::from_value);
        let polling_frequency = positive(&mut errors, "polling_frequency", form.text("polling_frequency"));
        let value = Self {
            id,
            title: form.text("title").trim().to_owned(),
            location: form.text("location").trim().to_owned(),
            machine_id: form.text("machine_id").trim().to_owned(),
            mode,
            polling_frequency: polling_frequency.unwrap_or_default(),
            devices: Vec::new(),
        };
        require(&mut errors, "title", &value.title);
        require(&mut errors, "machine_id", &value.machine_id);
        errors.into_result()?;
        Ok(value)
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "title", &self.title);
        require(&mut errors, "machine_id", &self.machine_id);
        if self.polling_frequency == 0 {
            errors.push("polling_frequency", "must be greater than zero");
        }
        errors.into_result()
    }
}
