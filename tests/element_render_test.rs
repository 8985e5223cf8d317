use certtext::element::{Element, ElementStyle, TextContent};
use certtext::host::{CustomField, CustomFieldKind, HostFault, RenderContext};
use certtext::test_utils::{
    sample_course, sample_user, InMemoryHost, PassthroughFormatter, RecordingCanvas,
    SAMPLE_ELEMENT,
};
use certtext::HostServices;

fn services<'a>(host: &'a InMemoryHost, formatter: &'a PassthroughFormatter) -> HostServices<'a> {
    HostServices {
        courses: host,
        users: host,
        elements: host,
        formatter,
    }
}

fn text_element(template: &str) -> Element<TextContent> {
    Element::new(
        SAMPLE_ELEMENT,
        "text",
        ElementStyle::default(),
        TextContent::from_stored(template),
    )
}

#[test]
fn render_draws_resolved_text_on_pdf() {
    let host = InMemoryHost::sample();
    let formatter = PassthroughFormatter;
    let mut pdf = RecordingCanvas::new();

    let element = text_element("Awarded to @{user_fullname} for @{course_fullname}");
    element
        .render(&mut pdf, &services(&host, &formatter), false, &sample_user())
        .unwrap();

    assert_eq!(pdf.drawn.len(), 1);
    assert_eq!(
        pdf.drawn[0].1,
        "Awarded to Jamie Oxide for Advanced Ferrology"
    );
    assert_eq!(pdf.drawn[0].0, ElementStyle::default());
}

#[test]
fn render_formats_duration_custom_field() {
    let host = InMemoryHost::sample();
    let formatter = PassthroughFormatter;
    let mut pdf = RecordingCanvas::new();

    // sample course declares credithours = 7200 seconds
    let element = text_element("Duration: @{course_customfield_credithours}");
    element
        .render(&mut pdf, &services(&host, &formatter), false, &sample_user())
        .unwrap();

    assert_eq!(pdf.drawn[0].1, "Duration: 2 hours");
}

#[test]
fn missing_field_suppresses_whole_element() {
    let host = InMemoryHost::sample();
    let formatter = PassthroughFormatter;
    let mut pdf = RecordingCanvas::new();

    let element = text_element("@{user_fullname} finished @{course_customfield_nosuchfield}");
    element
        .render(&mut pdf, &services(&host, &formatter), false, &sample_user())
        .unwrap();

    // the draw still happens, with fully suppressed text
    assert_eq!(pdf.drawn.len(), 1);
    assert_eq!(pdf.drawn[0].1, "");
}

#[test]
fn empty_custom_field_value_suppresses_whole_element() {
    let mut course = sample_course();
    course.custom_fields.push(CustomField::new(
        "cohort",
        CustomFieldKind::Text,
        Some(String::new()),
    ));
    let mut host = InMemoryHost::new();
    host.add_course(course);
    host.add_user(sample_user());
    host.link_element(SAMPLE_ELEMENT, 1, RenderContext { id: 1 });
    let formatter = PassthroughFormatter;

    let element = text_element("Cohort @{course_customfield_cohort}");
    let html = element
        .render_html(&services(&host, &formatter), 1)
        .unwrap();

    assert_eq!(html, "");
}

#[test]
fn render_html_resolves_against_sample_user() {
    let host = InMemoryHost::sample();
    let formatter = PassthroughFormatter;

    let element = text_element("Preview for @{user_firstname} (@{user_profile_field_businessunit})");
    let html = element
        .render_html(&services(&host, &formatter), 1)
        .unwrap();

    assert_eq!(html, "Preview for Jamie (Research)");
}

#[test]
fn template_without_tokens_renders_verbatim() {
    let host = InMemoryHost::sample();
    let formatter = PassthroughFormatter;

    let element = text_element("Certificate of Completion");
    let html = element
        .render_html(&services(&host, &formatter), 1)
        .unwrap();

    assert_eq!(html, "Certificate of Completion");
}

#[test]
fn unknown_user_propagates_host_fault() {
    let host = InMemoryHost::sample();
    let formatter = PassthroughFormatter;

    let element = text_element("@{user_fullname}");
    let result = element.render_html(&services(&host, &formatter), 42);

    assert!(matches!(result, Err(HostFault::UnknownUser(42))));
}

#[test]
fn unlinked_element_propagates_host_fault() {
    let host = InMemoryHost::sample();
    let formatter = PassthroughFormatter;

    let element = Element::new(
        99,
        "text",
        ElementStyle::default(),
        TextContent::from_stored("@{course_shortname}"),
    );
    let result = element.render_html(&services(&host, &formatter), 1);

    assert!(matches!(result, Err(HostFault::UnknownElement(99))));
}
