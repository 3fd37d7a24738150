use attendance_core::{
    attendance_form, render_html, Clock, Course, DefaultDateInitializer, Document,
    DocumentError, DocumentLifecycle, Enrollment, FormDocument, ATTENDANCE_DATE_ID,
};
use attendance_util::FormSource;
use tracing::info;

/// Course id used for the built-in attendance page.
const BUILTIN_COURSE_ID: i64 = 1;

/// Resolves the document the page would serve.
pub fn load_document(source: &FormSource) -> Result<FormDocument, DocumentError> {
    match source {
        FormSource::File(path) => {
            info!(stage = "page", path = %path.display(), "loading form definition");
            FormDocument::from_json_file(path)
        }
        FormSource::Builtin {
            course_name,
            course_semester,
            students,
        } => {
            let course = Course {
                id: BUILTIN_COURSE_ID,
                name: course_name.clone(),
                semester: course_semester.clone(),
            };
            let enrollments: Vec<Enrollment> = students
                .iter()
                .zip(1..)
                .map(|(name, id)| Enrollment {
                    id,
                    student_name: name.clone(),
                })
                .collect();
            info!(
                stage = "page",
                course = %course.name,
                enrollments = enrollments.len(),
                "building attendance form"
            );
            Ok(attendance_form(&course, &enrollments))
        }
    }
}

/// Runs the page through its ready event and renders the result.
pub fn render_page(document: FormDocument, clock: Clock) -> String {
    let mut lifecycle = DocumentLifecycle::new(document);
    DefaultDateInitializer::new(clock).install(&mut lifecycle);
    lifecycle.signal_ready();

    let document = lifecycle.into_document();
    match document.element_by_id(ATTENDANCE_DATE_ID) {
        Some(element) => {
            info!(stage = "page", value = %element.value(), "attendance date prefilled")
        }
        None => info!(stage = "page", "page has no attendance date field"),
    }
    render_html(&document)
}
