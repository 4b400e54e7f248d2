use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{AuthType, HttpMethod, ParamType};
use crate::RecordId;
use crate::form::{FieldKind, FieldSpec, FormValues};
use crate::resource::{Resource, Row, or_dash, yes_no};
use crate::validation::{ValidationErrors, choice, json_or, positive, require, require_url};

/// One query parameter of an API destination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParam {
    pub value: String,
    #[serde(rename = "type", default)]
    pub param_type: ParamType,
    #[serde(default)]
    pub required: bool,
}

/// HTTP destination that receives processing results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiEndpoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub auth_type: AuthType,
    #[serde(default)]
    pub method: HttpMethod,
    pub base_url: String,
    #[serde(default)]
    pub route: String,
    /// Parameter name to value, ordered by name.
    #[serde(default)]
    pub query_params: BTreeMap<String, QueryParam>,
    /// Passed through to the backend untouched.
    #[serde(default)]
    pub headers: Value,
    pub timeout: u32,
}

const API_ENDPOINT_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("title", "Title", FieldKind::Text).required(),
    FieldSpec::new("description", "Description", FieldKind::TextArea),
    FieldSpec::new("auth_type", "Auth type", FieldKind::Select(AuthType::OPTIONS)).required(),
    FieldSpec::new("method", "Method", FieldKind::Select(HttpMethod::OPTIONS)).required(),
    FieldSpec::new("base_url", "Base URL", FieldKind::Text).required(),
    FieldSpec::new("route", "Route", FieldKind::Text),
    FieldSpec::new("query_params", "Query parameters (JSON)", FieldKind::TextArea),
    FieldSpec::new("headers", "Headers (JSON)", FieldKind::TextArea),
    FieldSpec::new("timeout", "Timeout (s)", FieldKind::Number).required(),
    FieldSpec::new("active", "Active", FieldKind::Checkbox),
];

impl ApiEndpoint {
    /// Full request URL without query string.
    #[must_use]
    pub fn url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let route = self.route.trim_start_matches('/');
        if route.is_empty() {
            base.to_owned()
        } else {
            format!("{base}/{route}")
        }
    }
}

impl Row for ApiEndpoint {
    fn columns() -> &'static [&'static str] {
        &["Title", "Method", "URL", "Auth", "Active"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.method.label().to_owned(),
            self.url(),
            self.auth_type.label().to_owned(),
            yes_no(self.active),
        ]
    }

    fn category(&self) -> Option<&'static str> {
        Some(self.method.as_str())
    }

    fn filter_options() -> &'static [(&'static str, &'static str)] {
        HttpMethod::OPTIONS
    }
}

impl Resource for ApiEndpoint {
    const ENDPOINT: &'static str = "/api/api-endpoints";
    const TITLE: &'static str = "API endpoints";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn fields() -> &'static [FieldSpec] {
        API_ENDPOINT_FIELDS
    }

    fn to_form(&self) -> FormValues {
        let params = if self.query_params.is_empty() {
            String::new()
        } else {
            serde_json::to_string_pretty(&self.query_params).unwrap_or_default()
        };
        let headers = if self.headers.is_null() {
            String::new()
        } else {
            serde_json::to_string_pretty(&self.headers).unwrap_or_default()
        };
        FormValues::default()
            .with_text("title", &self.title)
            .with_text("description", &self.description)
            .with_text("auth_type", self.auth_type.as_str())
            .with_text("method", self.method.as_str())
            .with_text("base_url", &self.base_url)
            .with_text("route", &self.route)
            .with_text("query_params", params)
            .with_text("headers", headers)
            .with_text("timeout", self.timeout.to_string())
            .with_flag("active", self.active)
    }

    fn from_form(id: Option<RecordId>, form: &FormValues) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let auth_type = choice(&mut errors, "auth_type", form.text("auth_type"), AuthType::from_value);
        let method = choice(&mut errors, "method", form.text("method"), HttpMethod::from_value);
        let query_params = json_or(&mut errors, "query_params", form.text("query_params"), BTreeMap::new());
        let headers = json_or(&mut errors, "headers", form.text("headers"), Value::Null);
        let timeout = positive(&mut errors, "timeout", form.text("timeout")).unwrap_or_default();

        let value = Self {
            id,
            title: form.text("title").trim().to_owned(),
            description: form.text("description").to_owned(),
            active: form.flag("active"),
            auth_type,
            method,
            base_url: form.text("base_url").trim().to_owned(),
            route: form.text("route").trim().to_owned(),
            query_params,
            headers,
            timeout,
        };
        value.check(&mut errors);
        errors.into_result()?;
        Ok(value)
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.check(&mut errors);
        if self.timeout == 0 {
            errors.push("timeout", "must be greater than zero");
        }
        errors.into_result()
    }

    fn active(&self) -> Option<bool> {
        Some(self.active)
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl ApiEndpoint {
    fn check(&self, errors: &mut ValidationErrors) {
        require(errors, "title", &self.title);
        require_url(errors, "base_url", &self.base_url);
        for (name, param) in &self.query_params {
            if name.trim().is_empty() {
                errors.push("query_params", "parameter names must not be blank");
            } else if param.required && param.value.trim().is_empty() {
                errors.push("query_params", format!("required parameter `{name}` has no value"));
            }
        }
    }
}

/// FTP destination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FtpEndpoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub owner: Option<String>,
}

const FTP_ENDPOINT_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("title", "Title", FieldKind::Text).required(),
    FieldSpec::new("description", "Description", FieldKind::TextArea),
    FieldSpec::new("host", "Host", FieldKind::Text).required(),
    FieldSpec::new("port", "Port", FieldKind::Number).required(),
    FieldSpec::new("username", "Username", FieldKind::Text),
    FieldSpec::new("password", "Password", FieldKind::Password),
    FieldSpec::new("secure", "Secure (FTPS)", FieldKind::Checkbox),
    FieldSpec::new("path", "Remote path", FieldKind::Text),
    FieldSpec::new("owner", "Owner", FieldKind::Text),
];

impl Row for FtpEndpoint {
    fn columns() -> &'static [&'static str] {
        &["Title", "Host", "Port", "Path", "Secure", "Owner"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.host.clone(),
            self.port.to_string(),
            self.path.clone(),
            yes_no(self.secure),
            or_dash(self.owner.as_deref()),
        ]
    }
}

impl Resource for FtpEndpoint {
    const ENDPOINT: &'static str = "/api/ftp-endpoints";
    const TITLE: &'static str = "FTP endpoints";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn fields() -> &'static [FieldSpec] {
        FTP_ENDPOINT_FIELDS
    }

    fn to_form(&self) -> FormValues {
        FormValues::default()
            .with_text("title", &self.title)
            .with_text("description", &self.description)
            .with_text("host", &self.host)
            .with_text("port", self.port.to_string())
            .with_text("username", &self.username)
            .with_text("password", &self.password)
            .with_flag("secure", self.secure)
            .with_text("path", &self.path)
            .with_text("owner", self.owner.clone().unwrap_or_default())
    }

    fn from_form(id: Option<RecordId>, form: &FormValues) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let port = positive(&mut errors, "port", form.text("port")).unwrap_or_default();
        let owner = Some(form.text("owner").trim().to_owned()).filter(|o| !o.is_empty());
        let value = Self {
            id,
            title: form.text("title").trim().to_owned(),
            description: form.text("description").to_owned(),
            host: form.text("host").trim().to_owned(),
            port,
            username: form.text("username").trim().to_owned(),
            password: form.text("password").to_owned(),
            secure: form.flag("secure"),
            path: form.text("path").trim().to_owned(),
            owner,
        };
        require(&mut errors, "title", &value.title);
        require(&mut errors, "host", &value.host);
        errors.into_result()?;
        Ok(value)
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "title", &self.title);
        require(&mut errors, "host", &self.host);
        if self.port == 0 {
            errors.push("port", "must be greater than zero");
        }
        errors.into_result()
    }
}

/// Folder on the agent machine that receives processing results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalStorageFolder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub path: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub owner: Option<String>,
}

const LOCAL_FOLDER_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("title", "Title", FieldKind::Text).required(),
    FieldSpec::new("description", "Description", FieldKind::TextArea),
    FieldSpec::new("path", "Path", FieldKind::Text).required(),
    FieldSpec::new("owner", "Owner", FieldKind::Text),
    FieldSpec::new("active", "Active", FieldKind::Checkbox),
];

impl Row for LocalStorageFolder {
    fn columns() -> &'static [&'static str] {
        &["Title", "Path", "Owner", "Active"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.path.clone(),
            or_dash(self.owner.as_deref()),
            yes_no(self.active),
        ]
    }
}

impl Resource for LocalStorageFolder {
    const ENDPOINT: &'static str = "/api/local-storage-folder";
    const TITLE: &'static str = "Local storage folders";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn fields() -> &'static [FieldSpec] {
        LOCAL_FOLDER_FIELDS
    }

    fn to_form(&self) -> FormValues {
        FormValues::default()
            .with_text("title", &self.title)
            .with_text("description", &self.description)
            .with_text("path", &self.path)
            .with_text("owner", self.owner.clone().unwrap_or_default())
            .with_flag("active", self.active)
    }

    fn from_form(id: Option<RecordId>, form: &FormValues) -> Result<Self, ValidationErrors> {
        let value = Self {
            id,
            title: form.text("title").trim().to_owned(),
            description: form.text("description").to_owned(),
            path: form.text("path").trim().to_owned(),
            active: form.flag("active"),
            owner: Some(form.text("owner").trim().to_owned()).filter(|o| !o.is_empty()),
        };
        value.validate()?;
        Ok(value)
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "title", &self.title);
        require(&mut errors, "path", &self.path);
        errors.into_result()
    }

    fn active(&self) -> Option<bool> {
        Some(self.active)
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}
