use serde::{Deserialize, Serialize};

use crate::RecordId;
use crate::form::{FieldKind, FieldSpec, FormValues, id_text};
use crate::resource::{Resource, Row, or_dash};
use crate::validation::{ValidationErrors, optional_id, require};

/// Kind of document the platform knows how to extract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub document_layout_id: Option<RecordId>,
}

const DOCUMENT_TYPE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("name", "Name", FieldKind::Text).required(),
    FieldSpec::new("description", "Description", FieldKind::TextArea),
    FieldSpec::new("document_layout_id", "Layout", FieldKind::Reference(DocumentLayout::ENDPOINT)),
];

impl Row for DocumentType {
    fn columns() -> &'static [&'static str] {
        &["Name", "Description", "Layout"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.description.clone(),
            or_dash(self.document_layout_id),
        ]
    }
}

impl Resource for DocumentType {
    const ENDPOINT: &'static str = "/api/document-types";
    const TITLE: &'static str = "Document types";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn fields() -> &'static [FieldSpec] {
        DOCUMENT_TYPE_FIELDS
    }

    fn to_form(&self) -> FormValues {
        FormValues::default()
            .with_text("name", &self.name)
            .with_text("description", &self.description)
            .with_text("document_layout_id", id_text(self.document_layout_id))
    }

    fn from_form(id: Option<RecordId>, form: &FormValues) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let document_layout_id = optional_id(&mut errors, "document_layout_id", form.text("document_layout_id"));
        let value = Self {
            id,
            name: form.text("name").trim().to_owned(),
            description: form.text("description").to_owned(),
            document_layout_id,
        };
        require(&mut errors, "name", &value.name);
        errors.into_result()?;
        Ok(value)
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "name", &self.name);
        errors.into_result()
    }
}

/// Point in the layout's display coordinate space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

/// One named region of a layout, corners normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutField {
    pub name: String,
    pub upper_left: LayoutPoint,
    pub lower_right: LayoutPoint,
    #[serde(default)]
    pub multiline: bool,
}

/// Body sent when creating or updating a layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutDraft {
    pub name: String,
    pub fields: Vec<LayoutField>,
}

/// Named field regions over a reference image.
///
/// The image bytes live at `/api/document-layouts/{id}/image`; the stored
/// dimensions are the coordinate space the regions were drawn in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentLayout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default)]
    pub fields: Vec<LayoutField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl DocumentLayout {
    pub const ENDPOINT: &'static str = "/api/document-layouts";
    pub const TITLE: &'static str = "Document layouts";

    #[must_use]
    pub fn item_path(id: RecordId) -> String {
        format!("{}/{id}", Self::ENDPOINT)
    }

    #[must_use]
    pub fn image_path(id: RecordId) -> String {
        format!("{}/{id}/image", Self::ENDPOINT)
    }

    /// Response headers carrying the stored image dimensions.
    pub const WIDTH_HEADER: &'static str = "x-image-width";
    pub const HEIGHT_HEADER: &'static str = "x-image-height";
}

impl Row for DocumentLayout {
    fn columns() -> &'static [&'static str] {
        &["Name", "Fields", "Image"]
    }

    fn cells(&self) -> Vec<String> {
        let image = match (self.width, self.height) {
            (Some(w), Some(h)) => format!("{w}×{h}"),
            _ => "-".to_owned(),
        };
        vec![self.name.clone(), self.fields.len().to_string(), image]
    }

    fn search_text(&self) -> String {
        let mut text = self.name.clone();
        for field in &self.fields {
            text.push(' ');
            text.push_str(&field.name);
        }
        text
    }
}
