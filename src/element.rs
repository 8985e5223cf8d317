use log::debug;
use serde::{Deserialize, Serialize};

use crate::fields::FieldDictionaryBuilder;
use crate::host::{
    CourseProvider, ElementStore, HostFault, OutputFormat, PdfCanvas, TextFormatter, UserProvider,
    UserRecord,
};
use crate::resolver::PlaceholderResolver;

/// Rendering attributes shared by every element kind: where the element sits
/// on the page and how its text is typeset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementStyle {
    pub pos_x: u32,
    pub pos_y: u32,
    pub width: u32,
    pub font: String,
    pub font_size: u32,
    pub colour: String,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            pos_x: 0,
            pos_y: 0,
            width: 0,
            font: "freesans".to_string(),
            font_size: 12,
            colour: "#000000".to_string(),
        }
    }
}

/// Narrow view of the host services an element needs while rendering.
#[derive(Clone, Copy)]
pub struct HostServices<'a> {
    pub courses: &'a dyn CourseProvider,
    pub users: &'a dyn UserProvider,
    pub elements: &'a dyn ElementStore,
    pub formatter: &'a dyn TextFormatter,
}

/// Content strategy: what an element displays. Implementations resolve their
/// own display text; the surrounding `Element` owns position and typography.
pub trait ElementContent {
    fn display_text(
        &self,
        host: &HostServices<'_>,
        element_id: u64,
        user_id: u64,
    ) -> Result<String, HostFault>;
}

/// The text element's content: a raw template with `@{field}` placeholders.
/// The template is stored as an opaque blob in the element's generic data
/// column; the edit form passes it through unmodified in both directions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextContent {
    template: String,
}

impl TextContent {
    pub fn from_stored(data: &str) -> Self {
        Self {
            template: data.to_string(),
        }
    }

    /// Form save hook: the textarea value becomes the stored data unchanged.
    pub fn save_form_data(&mut self, text: &str) {
        self.template = text.to_string();
    }

    /// Form load hook: hands the stored data back to the edit form.
    pub fn load_form_data(&self) -> &str {
        &self.template
    }
}

impl ElementContent for TextContent {
    fn display_text(
        &self,
        host: &HostServices<'_>,
        element_id: u64,
        user_id: u64,
    ) -> Result<String, HostFault> {
        let course_id = host.elements.course_id_for_element(element_id)?;
        let context = host.elements.render_context_for_element(element_id)?;

        let fields = FieldDictionaryBuilder::new(host.courses, host.users).build(course_id, user_id)?;
        let resolved = PlaceholderResolver::new().resolve(&self.template, &fields);

        Ok(host.formatter.format_text(&resolved, OutputFormat::Html, context))
    }
}

/// A certificate element: common style plus one interchangeable content
/// strategy, composed rather than inherited.
pub struct Element<C: ElementContent> {
    pub id: u64,
    pub name: String,
    pub style: ElementStyle,
    pub content: C,
}

impl<C: ElementContent> Element<C> {
    pub fn new(id: u64, name: impl Into<String>, style: ElementStyle, content: C) -> Self {
        Self {
            id,
            name: name.into(),
            style,
            content,
        }
    }

    /// Draws the resolved text onto the PDF canvas at the element's
    /// configured position. In preview mode the caller supplies a sample
    /// user instead of a real logged-in one; resolution is identical.
    pub fn render(
        &self,
        pdf: &mut dyn PdfCanvas,
        host: &HostServices<'_>,
        preview: bool,
        user: &UserRecord,
    ) -> Result<(), HostFault> {
        debug!(
            "rendering element {} '{}' for user {} (preview: {preview})",
            self.id, self.name, user.id
        );
        let text = self.content.display_text(host, self.id, user.id)?;
        pdf.render_content(&self.style, &text);
        Ok(())
    }

    /// Renders the element as HTML for the drag-and-drop editor preview.
    /// There is no logged-in user in that flow; the caller passes the id of
    /// the host's default/sample user explicitly.
    pub fn render_html(
        &self,
        host: &HostServices<'_>,
        user_id: u64,
    ) -> Result<String, HostFault> {
        self.content.display_text(host, self.id, user_id)
    }
}

/// Wire form of an element row as the host persists it: the style columns
/// plus the opaque `data` blob owned by the content strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredElement {
    pub id: u64,
    pub name: String,
    #[serde(flatten)]
    pub style: ElementStyle,
    pub data: String,
}

impl Element<TextContent> {
    pub fn from_stored(stored: StoredElement) -> Self {
        Self {
            id: stored.id,
            name: stored.name,
            style: stored.style,
            content: TextContent::from_stored(&stored.data),
        }
    }

    pub fn to_stored(&self) -> StoredElement {
        StoredElement {
            id: self.id,
            name: self.name.clone(),
            style: self.style.clone(),
            data: self.content.load_form_data().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RenderContext;
    use crate::test_utils::{InMemoryHost, SAMPLE_ELEMENT};
    use std::cell::RefCell;

    #[test]
    fn display_text_goes_through_html_formatter() {
        struct CapturingFormatter(RefCell<Option<OutputFormat>>);

        impl TextFormatter for CapturingFormatter {
            fn format_text(
                &self,
                raw: &str,
                format: OutputFormat,
                _context: RenderContext,
            ) -> String {
                self.0.replace(Some(format));
                raw.to_string()
            }
        }

        let host = InMemoryHost::sample();
        let formatter = CapturingFormatter(RefCell::new(None));
        let services = HostServices {
            courses: &host,
            users: &host,
            elements: &host,
            formatter: &formatter,
        };

        let text = TextContent::from_stored("Certificate of Completion")
            .display_text(&services, SAMPLE_ELEMENT, 1)
            .unwrap();

        assert_eq!(text, "Certificate of Completion");
        assert_eq!(*formatter.0.borrow(), Some(OutputFormat::Html));
    }

    #[test]
    fn form_data_passes_through_unmodified() {
        let mut content = TextContent::default();
        content.save_form_data("Awarded to @{user_fullname}\n<b>raw markup kept</b>");
        assert_eq!(
            content.load_form_data(),
            "Awarded to @{user_fullname}\n<b>raw markup kept</b>"
        );
    }

    #[test]
    fn stored_element_round_trips_template_blob() {
        let element = Element::new(
            7,
            "text",
            ElementStyle::default(),
            TextContent::from_stored("Completed @{course_fullname}"),
        );

        let json = serde_json::to_string(&element.to_stored()).unwrap();
        let restored = Element::from_stored(serde_json::from_str(&json).unwrap());

        assert_eq!(restored.id, 7);
        assert_eq!(restored.content.load_form_data(), "Completed @{course_fullname}");
    }
}
