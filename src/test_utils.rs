//! In-memory host doubles for exercising elements without the real LMS.

use std::collections::HashMap;

use chrono::{TimeZone, Utc};

use crate::element::ElementStyle;
use crate::host::{
    CourseProvider, CourseRecord, CustomField, CustomFieldKind, ElementStore, HostFault,
    OutputFormat, PdfCanvas, RenderContext, TextFormatter, UserProvider, UserRecord,
};

/// Element id pre-linked by [`InMemoryHost::sample`].
pub const SAMPLE_ELEMENT: u64 = 1;

/// Course/user store backed by hash maps, with element→course links.
#[derive(Default)]
pub struct InMemoryHost {
    courses: HashMap<u64, CourseRecord>,
    users: HashMap<u64, UserRecord>,
    elements: HashMap<u64, (u64, RenderContext)>,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host populated with the sample course and user, with element
    /// `SAMPLE_ELEMENT` linked to the sample course. Used by the editor
    /// preview flow and by tests.
    pub fn sample() -> Self {
        let mut host = Self::new();
        host.add_course(sample_course());
        host.add_user(sample_user());
        host.link_element(SAMPLE_ELEMENT, 1, RenderContext { id: 1 });
        host
    }

    pub fn add_course(&mut self, course: CourseRecord) {
        self.courses.insert(course.id, course);
    }

    pub fn add_user(&mut self, user: UserRecord) {
        self.users.insert(user.id, user);
    }

    pub fn link_element(&mut self, element_id: u64, course_id: u64, context: RenderContext) {
        self.elements.insert(element_id, (course_id, context));
    }
}

impl CourseProvider for InMemoryHost {
    fn fetch_course(&self, course_id: u64) -> Result<CourseRecord, HostFault> {
        self.courses
            .get(&course_id)
            .cloned()
            .ok_or(HostFault::UnknownCourse(course_id))
    }
}

impl UserProvider for InMemoryHost {
    fn fetch_user(&self, user_id: u64) -> Result<UserRecord, HostFault> {
        self.users
            .get(&user_id)
            .cloned()
            .ok_or(HostFault::UnknownUser(user_id))
    }
}

impl ElementStore for InMemoryHost {
    fn course_id_for_element(&self, element_id: u64) -> Result<u64, HostFault> {
        self.elements
            .get(&element_id)
            .map(|(course_id, _)| *course_id)
            .ok_or(HostFault::UnknownElement(element_id))
    }

    fn render_context_for_element(&self, element_id: u64) -> Result<RenderContext, HostFault> {
        self.elements
            .get(&element_id)
            .map(|(_, context)| *context)
            .ok_or(HostFault::UnknownElement(element_id))
    }
}

/// Formatter double that passes markup through untouched.
pub struct PassthroughFormatter;

impl TextFormatter for PassthroughFormatter {
    fn format_text(&self, raw: &str, _format: OutputFormat, _context: RenderContext) -> String {
        raw.to_string()
    }
}

/// Canvas double that records every draw call.
#[derive(Default)]
pub struct RecordingCanvas {
    pub drawn: Vec<(ElementStyle, String)>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PdfCanvas for RecordingCanvas {
    fn render_content(&mut self, style: &ElementStyle, text: &str) {
        self.drawn.push((style.clone(), text.to_string()));
    }
}

pub fn sample_course() -> CourseRecord {
    CourseRecord {
        id: 1,
        fullname: "Advanced Ferrology".to_string(),
        shortname: "FER201".to_string(),
        idnumber: "FER-201".to_string(),
        summary: "Iron, rust and everything in between.".to_string(),
        startdate: Some(Utc.with_ymd_and_hms(2026, 2, 2, 9, 0, 0).unwrap()),
        custom_fields: vec![
            CustomField::new(
                "credithours",
                CustomFieldKind::Duration,
                Some("7200".to_string()),
            ),
            CustomField::new("campus", CustomFieldKind::Text, Some("North".to_string())),
        ],
    }
}

pub fn sample_user() -> UserRecord {
    UserRecord {
        id: 1,
        firstname: "Jamie".to_string(),
        lastname: "Oxide".to_string(),
        email: "jamie.oxide@example.com".to_string(),
        idnumber: "U-0001".to_string(),
        institution: "Example University".to_string(),
        department: "Metallurgy".to_string(),
        profile_fields: vec![CustomField::new(
            "businessunit",
            CustomFieldKind::Text,
            Some("Research".to_string()),
        )],
    }
}
