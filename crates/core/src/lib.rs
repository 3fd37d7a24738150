//! Attendance form domain: the in-memory form document, its one-shot ready
//! lifecycle, and the initializer that pre-fills the attendance date.

pub mod date;
pub mod document;
pub mod form;
pub mod initializer;
pub mod lifecycle;

pub use date::{fixed_clock, system_clock, CalendarDate, Clock};
pub use document::{Document, DocumentError, ElementTag, FormDocument, FormElement};
pub use form::{attendance_form, render_html, Course, Enrollment};
pub use initializer::{DefaultDateInitializer, InitOutcome, InitializerState, ATTENDANCE_DATE_ID};
pub use lifecycle::{DocumentLifecycle, ReadyState};
