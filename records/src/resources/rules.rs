use serde::{Deserialize, Serialize};

use super::{ApiEndpoint, DocumentType, FtpEndpoint, LocalStorageFolder};
use crate::RecordId;
use crate::form::{FieldKind, FieldSpec, FormValues, id_text};
use crate::resource::{Resource, Row, yes_no};
use crate::validation::{REQUIRED, ValidationErrors, exactly_one, optional_id, require};

/// Links a document type to its delivery destinations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub document_type_id: RecordId,
    #[serde(default)]
    pub active: bool,
}

const PROCESSING_RULE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("title", "Title", FieldKind::Text).required(),
    FieldSpec::new("description", "Description", FieldKind::TextArea),
    FieldSpec::new("document_type_id", "Document type", FieldKind::Reference(DocumentType::ENDPOINT)).required(),
    FieldSpec::new("active", "Active", FieldKind::Checkbox),
];

impl Row for ProcessingRule {
    fn columns() -> &'static [&'static str] {
        &["Title", "Description", "Document type", "Active"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.description.clone(),
            self.document_type_id.to_string(),
            yes_no(self.active),
        ]
    }
}

impl Resource for ProcessingRule {
    const ENDPOINT: &'static str = "/api/processing-rules";
    const TITLE: &'static str = "Processing rules";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn fields() -> &'static [FieldSpec] {
        PROCESSING_RULE_FIELDS
    }

    fn to_form(&self) -> FormValues {
        FormValues::default()
            .with_text("title", &self.title)
            .with_text("description", &self.description)
            .with_text("document_type_id", self.document_type_id.to_string())
            .with_flag("active", self.active)
    }

    fn from_form(id: Option<RecordId>, form: &FormValues) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "title", form.text("title"));
        let document_type_id = required_id(&mut errors, "document_type_id", form.text("document_type_id"));
        errors.into_result()?;
        Ok(Self {
            id,
            title: form.text("title").trim().to_owned(),
            description: form.text("description").to_owned(),
            document_type_id: document_type_id.unwrap_or_default(),
            active: form.flag("active"),
        })
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "title", &self.title);
        errors.into_result()
    }

    fn active(&self) -> Option<bool> {
        Some(self.active)
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

fn required_id(errors: &mut ValidationErrors, field: &'static str, value: &str) -> Option<RecordId> {
    if value.trim().is_empty() {
        errors.push(field, REQUIRED);
        return None;
    }
    optional_id(errors, field, value)
}

/// Where a destination delivers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationTarget {
    Api(RecordId),
    Ftp(RecordId),
    LocalFolder(RecordId),
}

impl DestinationTarget {
    #[must_use]
    pub fn id(self) -> RecordId {
        match self {
            Self::Api(id) | Self::Ftp(id) | Self::LocalFolder(id) => id,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Api(_) => "API",
            Self::Ftp(_) => "FTP",
            Self::LocalFolder(_) => "Local folder",
        }
    }
}

/// One delivery target of a processing rule.
///
/// Exactly one of the three target ids is set on a valid destination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub rule_id: RecordId,
    #[serde(default)]
    pub api_endpoint_id: Option<RecordId>,
    #[serde(default)]
    pub ftp_endpoint_id: Option<RecordId>,
    #[serde(default)]
    pub local_folder_id: Option<RecordId>,
    #[serde(default)]
    pub active: bool,
}

const DESTINATION_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("rule_id", "Processing rule", FieldKind::Reference(ProcessingRule::ENDPOINT)).required(),
    FieldSpec::new("api_endpoint_id", "API endpoint", FieldKind::Reference(ApiEndpoint::ENDPOINT)),
    FieldSpec::new("ftp_endpoint_id", "FTP endpoint", FieldKind::Reference(FtpEndpoint::ENDPOINT)),
    FieldSpec::new("local_folder_id", "Local folder", FieldKind::Reference(LocalStorageFolder::ENDPOINT)),
    FieldSpec::new("active", "Active", FieldKind::Checkbox),
];

impl Destination {
    /// The single configured target, if the record is well formed.
    #[must_use]
    pub fn target(&self) -> Option<DestinationTarget> {
        match (self.api_endpoint_id, self.ftp_endpoint_id, self.local_folder_id) {
            (Some(id), None, None) => Some(DestinationTarget::Api(id)),
            (None, Some(id), None) => Some(DestinationTarget::Ftp(id)),
            (None, None, Some(id)) => Some(DestinationTarget::LocalFolder(id)),
            _ => None,
        }
    }

    /// Destinations belonging to `rule_id`.
    pub fn for_rule(all: &[Self], rule_id: RecordId) -> impl Iterator<Item = &Self> {
        all.iter().filter(move |d| d.rule_id == rule_id)
    }
}

impl Row for Destination {
    fn columns() -> &'static [&'static str] {
        &["Rule", "Type", "Target", "Active"]
    }

    fn cells(&self) -> Vec<String> {
        let (kind, target) = match self.target() {
            Some(t) => (t.label().to_owned(), t.id().to_string()),
            None => ("-".to_owned(), "-".to_owned()),
        };
        vec![self.rule_id.to_string(), kind, target, yes_no(self.active)]
    }

    fn category(&self) -> Option<&'static str> {
        self.target().map(|t| match t {
            DestinationTarget::Api(_) => "api",
            DestinationTarget::Ftp(_) => "ftp",
            DestinationTarget::LocalFolder(_) => "local",
        })
    }

    fn filter_options() -> &'static [(&'static str, &'static str)] {
        &[("api", "API"), ("ftp", "FTP"), ("local", "Local folder")]
    }
}

impl Resource for Destination {
    const ENDPOINT: &'static str = "/api/processing-rules/destinations";
    const TITLE: &'static str = "Destinations";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn fields() -> &'static [FieldSpec] {
        DESTINATION_FIELDS
    }

    fn to_form(&self) -> FormValues {
        FormValues::default()
            .with_text("rule_id", self.rule_id.to_string())
            .with_text("api_endpoint_id", id_text(self.api_endpoint_id))
            .with_text("ftp_endpoint_id", id_text(self.ftp_endpoint_id))
            .with_text("local_folder_id", id_text(self.local_folder_id))
            .with_flag("active", self.active)
    }

    fn from_form(id: Option<RecordId>, form: &FormValues) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let rule_id = required_id(&mut errors, "rule_id", form.text("rule_id"));
        let value = Self {
            id,
            rule_id: rule_id.unwrap_or_default(),
            api_endpoint_id: optional_id(&mut errors, "api_endpoint_id", form.text("api_endpoint_id")),
            ftp_endpoint_id: optional_id(&mut errors, "ftp_endpoint_id", form.text("ftp_endpoint_id")),
            local_folder_id: optional_id(&mut errors, "local_folder_id", form.text("local_folder_id")),
            active: form.flag("active"),
        };
        value.check_target(&mut errors);
        errors.into_result()?;
        Ok(value)
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.check_target(&mut errors);
        errors.into_result()
    }

    fn active(&self) -> Option<bool> {
        Some(self.active)
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl Destination {
    fn check_target(&self, errors: &mut ValidationErrors) {
        exactly_one(
            errors,
            "destination",
            &[
                self.api_endpoint_id.is_some(),
                self.ftp_endpoint_id.is_some(),
                self.local_folder_id.is_some(),
            ],
        );
    }
}
