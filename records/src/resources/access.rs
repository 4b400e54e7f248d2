use serde::{Deserialize, Serialize};

use crate::RecordId;
use crate::form::{FieldKind, FieldSpec, FormValues};
use crate::resource::{Resource, Row, yes_no};
use crate::validation::{ValidationErrors, require};

/// Initiator key authorizing remote-processing requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub token: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub active: bool,
}

const ACCESS_TOKEN_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("name", "Name", FieldKind::Text).required(),
    FieldSpec::new("token", "Token", FieldKind::Text).required(),
    FieldSpec::new("description", "Description", FieldKind::TextArea),
    FieldSpec::new("active", "Active", FieldKind::Checkbox),
];

impl Row for AccessToken {
    fn columns() -> &'static [&'static str] {
        &["Name", "Token", "Description", "Active"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.token.clone(),
            self.description.clone(),
            yes_no(self.active),
        ]
    }
}

impl Resource for AccessToken {
    const ENDPOINT: &'static str = "/api/access-rights";
    const TITLE: &'static str = "Access tokens";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn fields() -> &'static [FieldSpec] {
        ACCESS_TOKEN_FIELDS
    }

    fn to_form(&self) -> FormValues {
        FormValues::default()
            .with_text("name", &self.name)
            .with_text("token", &self.token)
            .with_text("description", &self.description)
            .with_flag("active", self.active)
    }

    fn from_form(id: Option<RecordId>, form: &FormValues) -> Result<Self, ValidationErrors> {
        let value = Self {
            id,
            token: form.text("token").trim().to_owned(),
            name: form.text("name").trim().to_owned(),
            description: form.text("description").to_owned(),
            active: form.flag("active"),
        };
        value.validate()?;
        Ok(value)
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "name", &self.name);
        require(&mut errors, "token", &self.token);
        errors.into_result()
    }

    fn active(&self) -> Option<bool> {
        Some(self.active)
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

/// Configured AI backend used for extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiProvider {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    pub provider: String,
    pub model: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub active: bool,
}

const AI_PROVIDER_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("name", "Name", FieldKind::Text).required(),
    FieldSpec::new("provider", "Provider", FieldKind::Text).required(),
    FieldSpec::new("model", "Model", FieldKind::Text).required(),
    FieldSpec::new("api_key", "API key", FieldKind::Password),
    FieldSpec::new("active", "Active", FieldKind::Checkbox),
];

impl Row for AiProvider {
    fn columns() -> &'static [&'static str] {
        &["Name", "Provider", "Model", "Active"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.provider.clone(),
            self.model.clone(),
            yes_no(self.active),
        ]
    }
}

impl Resource for AiProvider {
    const ENDPOINT: &'static str = "/api/ai-providers";
    const TITLE: &'static str = "AI providers";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn fields() -> &'static [FieldSpec] {
        AI_PROVIDER_FIELDS
    }

    fn to_form(&self) -> FormValues {
        FormValues::default()
            .with_text("name", &self.name)
            .with_text("provider", &self.provider)
            .with_text("model", &self.model)
            .with_text("api_key", &self.api_key)
            .with_flag("active", self.active)
    }

    fn from_form(id: Option<RecordId>, form: &FormValues) -> Result<Self, ValidationErrors> {
        let value = Self {
            id,
            name: form.text("name").trim().to_owned(),
            provider: form.text("provider").trim().to_owned(),
            model: form.text("model").trim().to_owned(),
            api_key: form.text("api_key").to_owned(),
            active: form.flag("active"),
        };
        value.validate()?;
        Ok(value)
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "name", &self.name);
        require(&mut errors, "provider", &self.provider);
        require(&mut errors, "model", &self.model);
        errors.into_result()
    }

    fn active(&self) -> Option<bool> {
        Some(self.active)
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}
