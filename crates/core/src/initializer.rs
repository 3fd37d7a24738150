use tracing::debug;

use crate::{
    date::{system_clock, CalendarDate, Clock},
    document::Document,
    lifecycle::DocumentLifecycle,
};

/// Identifier the page must give the attendance date field.
pub const ATTENDANCE_DATE_ID: &str = "attendance_date";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitializerState {
    Pending,
    Done,
}

/// Result of a single initializer pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// The field was found and now holds this text.
    Filled(String),
    /// No element carries [`ATTENDANCE_DATE_ID`]; nothing was touched.
    TargetMissing,
}

/// Pre-fills the attendance date field with today's local date.
#[derive(Clone)]
pub struct DefaultDateInitializer {
    clock: Clock,
    state: InitializerState,
}

impl DefaultDateInitializer {
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            state: InitializerState::Pending,
        }
    }

    pub fn with_system_clock() -> Self {
        Self::new(system_clock())
    }

    pub fn state(&self) -> InitializerState {
        self.state
    }

    /// Performs the lookup and, when the field exists, writes the date into it.
    ///
    /// A missing field is not an error. Running again overwrites the field
    /// with the clock's current date.
    pub fn run<D: Document + ?Sized>(&mut self, document: &mut D) -> InitOutcome {
        let outcome = match document.element_by_id_mut(ATTENDANCE_DATE_ID) {
            Some(element) => {
                let text = CalendarDate::today(&self.clock).iso_text();
                element.set_value(text.clone());
                debug!(stage = "initializer", value = %text, "attendance date filled");
                InitOutcome::Filled(text)
            }
            None => {
                debug!(
                    stage = "initializer",
                    id = ATTENDANCE_DATE_ID,
                    "target element absent"
                );
                InitOutcome::TargetMissing
            }
        };
        self.state = InitializerState::Done;
        outcome
    }

    /// Registers the initializer to run once the document becomes ready.
    pub fn install<D>(mut self, lifecycle: &mut DocumentLifecycle<D>)
    where
        D: Document + 'static,
    {
        lifecycle.on_ready(move |document| {
            self.run(document);
        });
    }
}
