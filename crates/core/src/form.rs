use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::{
    document::{ElementTag, FormDocument, FormElement},
    initializer::ATTENDANCE_DATE_ID,
};

pub const STATUS_PRESENT: &str = "present";
pub const STATUS_ABSENT: &str = "absent";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub semester: String,
}

/// A student enrolled in a course, as listed on the attendance page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub student_name: String,
}

/// Name of the status control for an enrollment.
pub fn status_field_name(enrollment_id: i64) -> String {
    format!("status_{enrollment_id}")
}

/// Builds the teacher-facing course attendance page.
///
/// The date input is left empty; the default date initializer fills it once
/// the document is ready.
pub fn attendance_form(course: &Course, enrollments: &[Enrollment]) -> FormDocument {
    let title = if course.semester.is_empty() {
        format!("Attendance for {}", course.name)
    } else {
        format!("Attendance for {} ({})", course.name, course.semester)
    };
    let mut document = FormDocument::new(
        title,
        format!("/teacher/process_attendance/{}", course.id),
    );

    document.push(
        FormElement::new(ElementTag::Input, ATTENDANCE_DATE_ID)
            .with_id(ATTENDANCE_DATE_ID)
            .with_input_type("date")
            .with_label("Date"),
    );

    for enrollment in enrollments {
        let name = status_field_name(enrollment.id);
        document.push(
            FormElement::new(ElementTag::Select, name.clone())
                .with_id(name)
                .with_label(enrollment.student_name.clone())
                .with_options([STATUS_PRESENT, STATUS_ABSENT])
                .with_value(STATUS_PRESENT),
        );
    }

    document
}

/// Renders the document as a standalone HTML page.
pub fn render_html(document: &FormDocument) -> String {
    let mut out = String::new();
    let title = escape_html(&document.title);

    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{title}</title>");
    out.push_str("</head>\n<body>\n");
    let _ = writeln!(out, "<h1>{title}</h1>");
    let _ = writeln!(
        out,
        "<form method=\"post\" action=\"{}\">",
        escape_html(&document.action)
    );

    for element in &document.elements {
        out.push_str("<p>\n");
        if let (Some(label), Some(id)) = (&element.label, &element.id) {
            let _ = writeln!(
                out,
                "<label for=\"{}\">{}</label>",
                escape_html(id),
                escape_html(label)
            );
        } else if let Some(label) = &element.label {
            let _ = writeln!(out, "<label>{}</label>", escape_html(label));
        }
        render_element(&mut out, element);
        out.push_str("</p>\n");
    }

    out.push_str("<button type=\"submit\">Submit</button>\n</form>\n</body>\n</html>\n");
    out
}

fn render_element(out: &mut String, element: &FormElement) {
    let tag = element.tag.as_str();
    let _ = write!(out, "<{tag} name=\"{}\"", escape_html(&element.name));
    if let Some(id) = &element.id {
        let _ = write!(out, " id=\"{}\"", escape_html(id));
    }

    match element.tag {
        ElementTag::Input => {
            if let Some(input_type) = &element.input_type {
                let _ = write!(out, " type=\"{}\"", escape_html(input_type));
            }
            let _ = writeln!(out, " value=\"{}\">", escape_html(element.value()));
        }
        ElementTag::Select => {
            out.push_str(">\n");
            for option in &element.options {
                let selected = if option == element.value() {
                    " selected"
                } else {
                    ""
                };
                let _ = writeln!(
                    out,
                    "<option value=\"{0}\"{selected}>{0}</option>",
                    escape_html(option)
                );
            }
            out.push_str("</select>\n");
        }
        ElementTag::Textarea => {
            let _ = writeln!(out, ">{}</textarea>", escape_html(element.value()));
        }
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        date::fixed_clock, document::Document, initializer::DefaultDateInitializer,
        lifecycle::DocumentLifecycle,
    };
    use chrono::NaiveDate;

    fn course() -> Course {
        Course {
            id: 7,
            name: "Algebra I".to_string(),
            semester: "Fall 2024".to_string(),
        }
    }

    fn enrollments() -> Vec<Enrollment> {
        vec![
            Enrollment {
                id: 3,
                student_name: "alice".to_string(),
            },
            Enrollment {
                id: 4,
                student_name: "bob".to_string(),
            },
        ]
    }

    #[test]
    fn builds_one_date_field_and_a_status_per_enrollment() {
        let doc = attendance_form(&course(), &enrollments());

        assert_eq!(doc.title, "Attendance for Algebra I (Fall 2024)");
        assert_eq!(doc.action, "/teacher/process_attendance/7");
        assert_eq!(
            doc.elements
                .iter()
                .filter(|e| e.id.as_deref() == Some(ATTENDANCE_DATE_ID))
                .count(),
            1
        );
        assert_eq!(doc.element_by_id(ATTENDANCE_DATE_ID).map(|e| e.value()), Some(""));

        let status = doc.element_by_id("status_4").expect("status field");
        assert_eq!(status.label.as_deref(), Some("bob"));
        assert_eq!(status.value(), STATUS_PRESENT);
        assert_eq!(status.options, vec![STATUS_PRESENT, STATUS_ABSENT]);
    }

    #[test]
    fn title_omits_blank_semester() {
        let mut course = course();
        course.semester.clear();
        assert_eq!(attendance_form(&course, &[]).title, "Attendance for Algebra I");
    }

    #[test]
    fn rendered_page_carries_initialized_date() {
        let mut lifecycle = DocumentLifecycle::new(attendance_form(&course(), &enrollments()));
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date");
        DefaultDateInitializer::new(fixed_clock(date)).install(&mut lifecycle);
        lifecycle.signal_ready();

        let html = render_html(lifecycle.document());
        assert!(html.contains(
            "<input name=\"attendance_date\" id=\"attendance_date\" type=\"date\" value=\"2024-03-05\">"
        ));
        assert!(html.contains("<form method=\"post\" action=\"/teacher/process_attendance/7\">"));
        assert!(html.contains("<option value=\"present\" selected>present</option>"));
        assert!(html.contains("<option value=\"absent\">absent</option>"));
    }

    #[test]
    fn rendering_escapes_markup() {
        let mut doc = FormDocument::new("<b>Roll & Call</b>", "/x?a=1&b=2");
        doc.push(
            FormElement::new(ElementTag::Textarea, "note")
                .with_label("\"Notes\"")
                .with_value("</textarea><script>"),
        );

        let html = render_html(&doc);
        assert!(html.contains("<title>&lt;b&gt;Roll &amp; Call&lt;/b&gt;</title>"));
        assert!(html.contains("action=\"/x?a=1&amp;b=2\""));
        assert!(html.contains("<label>&quot;Notes&quot;</label>"));
        assert!(html.contains(">&lt;/textarea&gt;&lt;script&gt;</textarea>"));
    }

    #[test]
    fn unready_page_renders_empty_date() {
        let doc = attendance_form(&course(), &[]);
        let html = render_html(&doc);
        assert!(html.contains("type=\"date\" value=\"\">"));
    }
}
