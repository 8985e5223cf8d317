use crate::element::ElementStyle;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Declared data type of an admin-defined custom field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomFieldKind {
    Text,
    Checkbox,
    Date,
    Select,
    /// Value is a raw seconds count; rendered through the duration formatter.
    Duration,
}

/// An admin-defined course or user attribute, distinct from the fixed
/// built-in fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomField {
    pub shortname: String,
    pub kind: CustomFieldKind,
    pub value: Option<String>,
}

impl CustomField {
    pub fn new(shortname: impl Into<String>, kind: CustomFieldKind, value: Option<String>) -> Self {
        Self {
            shortname: shortname.into(),
            kind,
            value,
        }
    }
}

/// Course row as handed over by the host data layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: u64,
    pub fullname: String,
    pub shortname: String,
    pub idnumber: String,
    pub summary: String,
    pub startdate: Option<DateTime<Utc>>,
    pub custom_fields: Vec<CustomField>,
}

/// User row as handed over by the host data layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub idnumber: String,
    pub institution: String,
    pub department: String,
    pub profile_fields: Vec<CustomField>,
}

impl UserRecord {
    pub fn fullname(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

/// Host context a render request happens in (permissions, filters).
/// Opaque here; carried through to the text formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderContext {
    pub id: u64,
}

/// Output format handed to the host text formatter. Elements always resolve
/// to HTML markup; the formatter owns any downstream conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Html,
}

/// Faults raised at the host boundary.
#[derive(Debug, thiserror::Error)]
pub enum HostFault {
    #[error("unknown course: {0}")]
    UnknownCourse(u64),

    #[error("unknown user: {0}")]
    UnknownUser(u64),

    #[error("unknown element: {0}")]
    UnknownElement(u64),

    #[error("{detail}")]
    Generic { detail: String },
}

impl HostFault {
    pub fn generic(msg: impl Into<String>) -> Self {
        Self::Generic { detail: msg.into() }
    }
}

/// Fetches course rows, including their custom-field values.
pub trait CourseProvider {
    fn fetch_course(&self, course_id: u64) -> Result<CourseRecord, HostFault>;
}

/// Fetches user rows, including their profile custom fields.
pub trait UserProvider {
    fn fetch_user(&self, user_id: u64) -> Result<UserRecord, HostFault>;
}

/// Configuration lookups for a persisted element.
pub trait ElementStore {
    fn course_id_for_element(&self, element_id: u64) -> Result<u64, HostFault>;
    fn render_context_for_element(&self, element_id: u64) -> Result<RenderContext, HostFault>;
}

/// Host-owned PDF drawing primitive. The element hands over its style and the
/// fully resolved text; positioning and font handling happen inside the host.
pub trait PdfCanvas {
    fn render_content(&mut self, style: &ElementStyle, text: &str);
}

/// Host-owned sanitizing text formatter. Escaping and markup cleanup are its
/// responsibility, never the resolver's.
pub trait TextFormatter {
    fn format_text(&self, raw: &str, format: OutputFormat, context: RenderContext) -> String;
}
